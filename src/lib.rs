pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::config::{cli::LocalModelStore, toml_config::TomlConfig};
pub use crate::core::{
    batch::{calculate_batch, BatchSummary},
    estimator::BedtimeEstimator,
    regression::LinearRegressionModel,
    service::BedtimeService,
};
pub use domain::model::{Bedtime, ClockFormat, CoffeeIntake, SleepAmount, SleepInputs, WakeTime};
pub use utils::error::{BedtimeError, ModelError, PredictionError, Result};
