pub mod batch;
pub mod estimator;
pub mod regression;
pub mod service;

pub use crate::domain::model::{Bedtime, SleepFeatures, SleepInputs, SleepPrediction};
pub use crate::domain::ports::{ConfigProvider, ModelStore, SleepModel};
pub use crate::utils::error::Result;
pub use estimator::BedtimeEstimator;
pub use regression::LinearRegressionModel;
