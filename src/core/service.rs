use crate::core::{BedtimeEstimator, LinearRegressionModel, ModelStore};
use crate::domain::model::{Bedtime, SleepInputs};
use crate::utils::error::{ModelError, PredictionError};

/// Async front for the estimator.
///
/// The artifact is loaded on every call, so a replaced or corrupted model
/// file is picked up by the next calculation. Inference runs on the blocking
/// pool to keep the caller's executor free.
pub struct BedtimeService<S: ModelStore> {
    store: S,
    artifact_name: String,
}

impl<S: ModelStore> BedtimeService<S> {
    pub fn new(store: S, artifact_name: impl Into<String>) -> Self {
        Self {
            store,
            artifact_name: artifact_name.into(),
        }
    }

    pub fn artifact_name(&self) -> &str {
        &self.artifact_name
    }

    pub async fn load_model(&self) -> Result<LinearRegressionModel, PredictionError> {
        let bytes = self.store.read_artifact(&self.artifact_name).await.map_err(|e| {
            tracing::error!("❌ Could not read model artifact {}: {}", self.artifact_name, e);
            PredictionError::from(e)
        })?;

        LinearRegressionModel::from_bytes(&self.artifact_name, &bytes).map_err(|e| {
            tracing::error!("❌ Could not load model artifact {}: {}", self.artifact_name, e);
            PredictionError::from(e)
        })
    }

    pub async fn calculate(&self, inputs: SleepInputs) -> Result<Bedtime, PredictionError> {
        tracing::info!(
            "🛏️ Calculating bedtime: wake {}, sleep {}, coffee {}",
            inputs.wake_time,
            inputs.sleep_amount.label(),
            inputs.coffee_intake.label()
        );

        let model = self.load_model().await?;
        let estimator = BedtimeEstimator::new(model);

        tokio::task::spawn_blocking(move || estimator.estimate_bedtime(&inputs))
            .await
            .map_err(|e| {
                tracing::error!("❌ Bedtime calculation task failed: {}", e);
                PredictionError::from(ModelError::Unavailable {
                    message: e.to_string(),
                })
            })?
    }
}
