use crate::utils::error::{BedtimeError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BedtimeError::validation(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(BedtimeError::validation(
            field_name,
            path,
            "Path contains null bytes",
        ));
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BedtimeError::validation(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BedtimeError::validation(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(BedtimeError::validation(
            field_name,
            value,
            "Value must be a finite number",
        ));
    }
    Ok(())
}

/// value 必須落在 step 的整數倍上
pub fn validate_step(field_name: &str, value: f64, step: f64) -> Result<()> {
    let steps = value / step;
    if (steps - steps.round()).abs() > 1e-9 {
        return Err(BedtimeError::validation(
            field_name,
            value,
            format!("Value must be a multiple of {}", step),
        ));
    }
    Ok(())
}

pub fn parse_f64(field_name: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|e| BedtimeError::validation(field_name, raw, e.to_string()))
}

pub fn parse_i64(field_name: &str, raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| BedtimeError::validation(field_name, raw, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        assert!(validate_range("sleep_amount", 4.0, 4.0, 12.0).is_ok());
        assert!(validate_range("sleep_amount", 12.0, 4.0, 12.0).is_ok());
        assert!(validate_range("sleep_amount", 3.75, 4.0, 12.0).is_err());
        assert!(validate_range("coffee_intake", 21, 1, 20).is_err());
    }

    #[test]
    fn test_validate_step() {
        assert!(validate_step("sleep_amount", 7.25, 0.25).is_ok());
        assert!(validate_step("sleep_amount", 8.0, 0.25).is_ok());
        assert!(validate_step("sleep_amount", 7.3, 0.25).is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("model.path", "models/sleep_calculator.toml").is_ok());
        assert!(validate_path("model.path", "").is_err());
        assert!(validate_path("model.path", "bad\0path").is_err());
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_f64("sleep_amount", " 7.5 ").unwrap(), 7.5);
        assert!(parse_f64("sleep_amount", "eight").is_err());
        assert_eq!(parse_i64("coffee_intake", "3").unwrap(), 3);
        assert!(parse_i64("coffee_intake", "2.5").is_err());
        assert!(validate_finite("sleep_amount", f64::INFINITY).is_err());
    }
}
