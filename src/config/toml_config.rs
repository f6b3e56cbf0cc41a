use crate::core::ConfigProvider;
use crate::domain::model::{ClockFormat, CoffeeIntake, SleepAmount, SleepInputs, WakeTime};
use crate::utils::error::{BedtimeError, Result};
use crate::utils::validation::{validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_WAKE_TIME: &str = "07:00";
pub const DEFAULT_SLEEP_AMOUNT: f64 = 8.0;
pub const DEFAULT_COFFEE_INTAKE: i64 = 1;
pub const DEFAULT_MODEL_PATH: &str = "models/sleep_calculator.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// 表單的初始值 (起床時間預設 07:00)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub wake_time: String,
    pub sleep_amount: f64,
    pub coffee_intake: i64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            wake_time: DEFAULT_WAKE_TIME.to_string(),
            sleep_amount: DEFAULT_SLEEP_AMOUNT,
            coffee_intake: DEFAULT_COFFEE_INTAKE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_MODEL_PATH.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub clock: ClockFormat,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BedtimeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MODEL_DIR})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BedtimeError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 預設值本身也必須通過輸入驗證
    pub fn default_inputs(&self) -> Result<SleepInputs> {
        Ok(SleepInputs::new(
            WakeTime::parse(&self.defaults.wake_time)?,
            SleepAmount::new(self.defaults.sleep_amount)?,
            CoffeeIntake::new(self.defaults.coffee_intake)?,
        ))
    }

    pub fn validate_model_path(&self) -> Result<()> {
        validate_path("model.path", &self.model.path).map_err(|e| BedtimeError::ConfigError {
            message: format!("[model] {}", e),
        })
    }

    pub fn validate_config(&self) -> Result<()> {
        self.validate_model_path()?;
        self.default_inputs().map_err(|e| BedtimeError::ConfigError {
            message: format!("[defaults] {}", e),
        })?;
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn default_wake_time(&self) -> &str {
        &self.defaults.wake_time
    }

    fn default_sleep_amount(&self) -> f64 {
        self.defaults.sleep_amount
    }

    fn default_coffee_intake(&self) -> i64 {
        self.defaults.coffee_intake
    }

    fn model_path(&self) -> &str {
        &self.model.path
    }

    fn clock(&self) -> ClockFormat {
        self.display.clock
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[defaults]
wake_time = "06:30"
sleep_amount = 7.5
coffee_intake = 3

[model]
path = "models/custom.json"

[display]
clock = "12h"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.default_wake_time(), "06:30");
        assert_eq!(config.default_sleep_amount(), 7.5);
        assert_eq!(config.default_coffee_intake(), 3);
        assert_eq!(config.model_path(), "models/custom.json");
        assert_eq!(config.clock(), ClockFormat::TwelveHour);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_builtin_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.default_wake_time(), DEFAULT_WAKE_TIME);
        assert_eq!(config.default_sleep_amount(), DEFAULT_SLEEP_AMOUNT);
        assert_eq!(config.default_coffee_intake(), DEFAULT_COFFEE_INTAKE);
        assert_eq!(config.model_path(), DEFAULT_MODEL_PATH);
        assert_eq!(config.clock(), ClockFormat::TwentyFourHour);

        let inputs = config.default_inputs().unwrap();
        assert_eq!(inputs.wake_time.to_string(), "07:00");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BETTER_REST_TEST_MODEL_DIR", "/opt/models");

        let toml_content = r#"
[model]
path = "${BETTER_REST_TEST_MODEL_DIR}/sleep.toml"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.model_path(), "/opt/models/sleep.toml");

        std::env::remove_var("BETTER_REST_TEST_MODEL_DIR");
    }

    #[test]
    fn test_out_of_range_defaults_fail_validation() {
        let toml_content = r#"
[defaults]
sleep_amount = 13.0
coffee_intake = 21
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, BedtimeError::ConfigError { .. }));
    }

    #[test]
    fn test_empty_model_path_is_config_error() {
        let config = TomlConfig::from_toml_str("[model]\npath = \"\"").unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, BedtimeError::ConfigError { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[display]\nclock = \"sundial\"").unwrap_err();
        assert!(matches!(err, BedtimeError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[defaults]\nwake_time = \"05:45\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.default_wake_time(), "05:45");
        assert_eq!(config.default_sleep_amount(), DEFAULT_SLEEP_AMOUNT);
    }
}
