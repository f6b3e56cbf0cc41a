use thiserror::Error;

/// 預測失敗時顯示給使用者的通用訊息
pub const PREDICTION_FAILURE_MESSAGE: &str =
    "Sorry, there was a problem calculating your bedtime.";

/// The single failure the bedtime estimator reports.
///
/// Callers get no classification beyond "the model could not produce a
/// result". The underlying cause is kept only so it can be logged.
#[derive(Error, Debug)]
#[error("Could not calculate bedtime")]
pub struct PredictionError {
    #[source]
    cause: ModelError,
}

impl PredictionError {
    /// Human-readable cause, for logs only.
    pub fn log_detail(&self) -> String {
        self.cause.to_string()
    }
}

impl From<ModelError> for PredictionError {
    fn from(cause: ModelError) -> Self {
        Self { cause }
    }
}

/// Causes that collapse into [`PredictionError`] at the estimator boundary.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Model artifact could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("Model artifact is not valid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Model artifact is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported model artifact format: {name}")]
    UnsupportedFormat { name: String },

    #[error("Invalid model artifact: {message}")]
    InvalidArtifact { message: String },

    #[error("Model produced an unusable prediction: {value}")]
    InvalidPrediction { value: f64 },

    #[error("Model unavailable: {message}")]
    Unavailable { message: String },
}

#[derive(Error, Debug)]
pub enum BedtimeError {
    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BedtimeError {
    pub fn validation(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        BedtimeError::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// 給終端使用者看的訊息，不包含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            BedtimeError::Prediction(_) => PREDICTION_FAILURE_MESSAGE.to_string(),
            BedtimeError::ValidationError { field, value, reason } => {
                format!("'{}' is not a valid {}: {}", value, field, reason)
            }
            BedtimeError::ConfigError { message } => {
                format!("The configuration could not be used: {}", message)
            }
            BedtimeError::IoError(e) => format!("A file could not be accessed: {}", e),
            BedtimeError::CsvError(e) => format!("The CSV data could not be processed: {}", e),
            BedtimeError::SerializationError(e) => {
                format!("The result could not be written: {}", e)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BedtimeError::Prediction(_) => {
                "Check that the model artifact exists and is a valid TOML or JSON regression file, then try again"
            }
            BedtimeError::ValidationError { .. } => {
                "Wake time uses HH:MM, sleep is 4 to 12 hours in 0.25 steps, coffee is 1 to 20 cups"
            }
            BedtimeError::ConfigError { .. } => "Fix the configuration file and try again",
            BedtimeError::IoError(_) => "Check the file path and permissions",
            BedtimeError::CsvError(_) => {
                "The input CSV needs the header wake_time,sleep_amount,coffee_intake"
            }
            BedtimeError::SerializationError(_) => "Try again without --json",
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            BedtimeError::ValidationError { .. } => 1,
            BedtimeError::Prediction(_) => 2,
            BedtimeError::ConfigError { .. }
            | BedtimeError::IoError(_)
            | BedtimeError::CsvError(_)
            | BedtimeError::SerializationError(_) => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, BedtimeError>;
