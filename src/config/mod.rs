pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::domain::model::{ClockFormat, CoffeeIntake, SleepAmount, SleepInputs, WakeTime};
#[cfg(feature = "cli")]
use crate::utils::error::{BedtimeError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::validate_path;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "better-rest")]
#[command(about = "Recommends a bedtime from wake time, desired sleep and coffee intake")]
pub struct CliConfig {
    /// Wake-up time, HH:MM or H:MM AM/PM [default: 07:00]
    #[arg(short, long)]
    pub wake: Option<String>,

    /// Desired sleep in hours, 4 to 12 in 0.25 steps [default: 8]
    #[arg(short, long)]
    pub sleep: Option<f64>,

    /// Cups of coffee per day, 1 to 20 [default: 1]
    #[arg(short, long)]
    pub coffee: Option<i64>,

    /// Path to the regression model artifact (.toml or .json)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Clock format for the result: 24h or 12h
    #[arg(long)]
    pub clock: Option<ClockFormat>,

    #[arg(long, help = "Print the result as JSON")]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 命令列參數優先，沒給的欄位才用 defaults 的值。
    /// 只驗證實際會用到的值，被覆蓋的預設值不檢查。
    pub fn resolve_inputs(&self, defaults: &impl ConfigProvider) -> Result<SleepInputs> {
        let wake_time = match &self.wake {
            Some(raw) => WakeTime::parse(raw)?,
            None => WakeTime::parse(defaults.default_wake_time()).map_err(stale_default)?,
        };
        let sleep_amount = match self.sleep {
            Some(hours) => SleepAmount::new(hours)?,
            None => SleepAmount::new(defaults.default_sleep_amount()).map_err(stale_default)?,
        };
        let coffee_intake = match self.coffee {
            Some(cups) => CoffeeIntake::new(cups)?,
            None => CoffeeIntake::new(defaults.default_coffee_intake()).map_err(stale_default)?,
        };

        Ok(SleepInputs::new(wake_time, sleep_amount, coffee_intake))
    }

    pub fn resolve_model_path(&self, defaults: &impl ConfigProvider) -> Result<String> {
        match &self.model {
            Some(path) => {
                validate_path("model", path)?;
                Ok(path.clone())
            }
            None => {
                let path = defaults.model_path();
                validate_path("model.path", path).map_err(|e| BedtimeError::ConfigError {
                    message: format!("[model] {}", e),
                })?;
                Ok(path.to_string())
            }
        }
    }

    pub fn resolve_clock(&self, defaults: &impl ConfigProvider) -> ClockFormat {
        self.clock.unwrap_or_else(|| defaults.clock())
    }
}

#[cfg(feature = "cli")]
fn stale_default(e: BedtimeError) -> BedtimeError {
    BedtimeError::ConfigError {
        message: format!("[defaults] {}", e),
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::config::toml_config::TomlConfig;

    #[test]
    fn test_cli_flags_override_defaults() {
        let config = CliConfig::parse_from([
            "better-rest",
            "--wake",
            "06:30",
            "--sleep",
            "7.5",
            "--coffee",
            "3",
            "--clock",
            "12h",
        ]);
        let defaults = TomlConfig::default();

        let inputs = config.resolve_inputs(&defaults).unwrap();
        assert_eq!(inputs.wake_time.to_string(), "06:30");
        assert_eq!(inputs.sleep_amount.hours(), 7.5);
        assert_eq!(inputs.coffee_intake.cups(), 3);
        assert_eq!(config.resolve_clock(&defaults), ClockFormat::TwelveHour);
    }

    #[test]
    fn test_missing_flags_fall_back_to_defaults() {
        let config = CliConfig::parse_from(["better-rest"]);
        let defaults = TomlConfig::default();

        let inputs = config.resolve_inputs(&defaults).unwrap();
        assert_eq!(inputs.wake_time.to_string(), "07:00");
        assert_eq!(inputs.sleep_amount.hours(), 8.0);
        assert_eq!(inputs.coffee_intake.cups(), 1);
        assert_eq!(
            config.resolve_model_path(&defaults).unwrap(),
            "models/sleep_calculator.toml"
        );
    }

    #[test]
    fn test_out_of_range_flags_are_validation_errors() {
        let defaults = TomlConfig::default();
        for args in [
            vec!["better-rest", "--sleep", "12.5"],
            vec!["better-rest", "--sleep", "3.75"],
            vec!["better-rest", "--coffee", "21"],
            vec!["better-rest", "--coffee", "0"],
        ] {
            let err = CliConfig::parse_from(args).resolve_inputs(&defaults).unwrap_err();
            assert!(matches!(err, BedtimeError::ValidationError { .. }));
        }
    }

    #[test]
    fn test_overridden_stale_defaults_are_ignored() {
        let stale = TomlConfig::from_toml_str(
            "[defaults]\nwake_time = \"noon\"\nsleep_amount = 13.0\ncoffee_intake = 0\n[model]\npath = \"\"",
        )
        .unwrap();
        let config = CliConfig::parse_from([
            "better-rest",
            "--wake",
            "07:00",
            "--sleep",
            "8",
            "--coffee",
            "1",
            "--model",
            "models/sleep_calculator.toml",
        ]);

        let inputs = config.resolve_inputs(&stale).unwrap();
        assert_eq!(inputs.sleep_amount.hours(), 8.0);
        assert_eq!(
            config.resolve_model_path(&stale).unwrap(),
            "models/sleep_calculator.toml"
        );
    }

    #[test]
    fn test_used_stale_default_is_config_error() {
        let stale = TomlConfig::from_toml_str("[defaults]\ncoffee_intake = 21\n").unwrap();
        let config = CliConfig::parse_from(["better-rest", "--wake", "07:00"]);

        let err = config.resolve_inputs(&stale).unwrap_err();
        assert!(matches!(err, BedtimeError::ConfigError { .. }));
        assert_eq!(err.exit_code(), 3);

        let empty_path = TomlConfig::from_toml_str("[model]\npath = \"\"").unwrap();
        let err = config.resolve_model_path(&empty_path).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
