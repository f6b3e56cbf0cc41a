use crate::core::SleepModel;
use crate::domain::model::{SleepFeatures, SleepPrediction};
use crate::utils::error::ModelError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputUnit {
    #[default]
    Seconds,
    Hours,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficients {
    pub wake: f64,
    pub estimated_sleep: f64,
    pub coffee: f64,
}

/// On-disk form of a trained linear regression (TOML or JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default = "default_model_name")]
    pub name: String,
    #[serde(default)]
    pub output_unit: OutputUnit,
    #[serde(default)]
    pub intercept: f64,
    pub coefficients: Coefficients,
}

fn default_model_name() -> String {
    "SleepCalculator".to_string()
}

/// `actual_sleep = intercept + Σ coefficient * feature`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressionModel {
    artifact: ModelArtifact,
}

impl LinearRegressionModel {
    pub fn new(artifact: ModelArtifact) -> Result<Self, ModelError> {
        let c = &artifact.coefficients;
        let values = [
            ("intercept", artifact.intercept),
            ("coefficients.wake", c.wake),
            ("coefficients.estimated_sleep", c.estimated_sleep),
            ("coefficients.coffee", c.coffee),
        ];
        if let Some((field, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::InvalidArtifact {
                message: format!("{} must be finite, got {}", field, value),
            });
        }
        Ok(Self { artifact })
    }

    /// 依副檔名 (.toml / .json) 決定解析方式
    pub fn from_bytes(name: &str, bytes: &[u8]) -> Result<Self, ModelError> {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let artifact: ModelArtifact = match extension.as_deref() {
            Some("toml") => {
                let text = std::str::from_utf8(bytes).map_err(|e| ModelError::InvalidArtifact {
                    message: format!("artifact is not UTF-8: {}", e),
                })?;
                toml::from_str(text)?
            }
            Some("json") => serde_json::from_slice(bytes)?,
            _ => {
                return Err(ModelError::UnsupportedFormat {
                    name: name.to_string(),
                })
            }
        };

        tracing::debug!("Loaded model artifact '{}' from {}", artifact.name, name);
        Self::new(artifact)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&path.to_string_lossy(), &bytes)
    }

    pub fn name(&self) -> &str {
        &self.artifact.name
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }
}

impl SleepModel for LinearRegressionModel {
    fn predict(&self, features: &SleepFeatures) -> Result<SleepPrediction, ModelError> {
        let c = &self.artifact.coefficients;
        let raw = self.artifact.intercept
            + c.wake * features.wake
            + c.estimated_sleep * features.estimated_sleep
            + c.coffee * features.coffee;

        let actual_sleep = match self.artifact.output_unit {
            OutputUnit::Seconds => raw,
            OutputUnit::Hours => raw * 3600.0,
        };

        Ok(SleepPrediction { actual_sleep })
    }
}
