use crate::domain::model::{ClockFormat, SleepFeatures, SleepPrediction};
use crate::utils::error::ModelError;
use std::sync::Arc;

/// Pre-trained regression strategy behind the bedtime calculation.
pub trait SleepModel: Send + Sync {
    fn predict(&self, features: &SleepFeatures) -> Result<SleepPrediction, ModelError>;
}

impl<M: SleepModel + ?Sized> SleepModel for Arc<M> {
    fn predict(&self, features: &SleepFeatures) -> Result<SleepPrediction, ModelError> {
        (**self).predict(features)
    }
}

impl<M: SleepModel + ?Sized> SleepModel for Box<M> {
    fn predict(&self, features: &SleepFeatures) -> Result<SleepPrediction, ModelError> {
        (**self).predict(features)
    }
}

/// Source of model artifact bytes.
pub trait ModelStore: Send + Sync {
    fn read_artifact(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, ModelError>> + Send;
}

/// Presentation-layer defaults. The estimator never reads these.
pub trait ConfigProvider: Send + Sync {
    fn default_wake_time(&self) -> &str;
    fn default_sleep_amount(&self) -> f64;
    fn default_coffee_intake(&self) -> i64;
    fn model_path(&self) -> &str;
    fn clock(&self) -> ClockFormat;
}
