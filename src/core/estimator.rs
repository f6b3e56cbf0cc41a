use crate::core::SleepModel;
use crate::domain::model::{Bedtime, SleepFeatures, SleepInputs};
use crate::utils::error::{ModelError, PredictionError};
use chrono::Duration;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Maps (wake time, sleep amount, coffee intake) to a recommended bedtime.
///
/// Stateless: the model is the only dependency, and every call re-reads the
/// inputs it is given. Any model failure is reported as one opaque
/// [`PredictionError`].
pub struct BedtimeEstimator<M: SleepModel> {
    model: M,
}

impl<M: SleepModel> BedtimeEstimator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn estimate_bedtime(&self, inputs: &SleepInputs) -> Result<Bedtime, PredictionError> {
        let features = SleepFeatures::from(inputs);
        tracing::debug!(
            "Predicting with wake={}s estimated_sleep={}h coffee={}",
            features.wake,
            features.estimated_sleep,
            features.coffee
        );

        let prediction = self.model.predict(&features).map_err(|e| {
            tracing::warn!("⚠️ Sleep model failed: {}", e);
            PredictionError::from(e)
        })?;

        let actual_sleep = prediction.actual_sleep;
        if !actual_sleep.is_finite() || actual_sleep < 0.0 {
            tracing::warn!("⚠️ Sleep model returned unusable value: {}", actual_sleep);
            return Err(ModelError::InvalidPrediction {
                value: actual_sleep,
            }
            .into());
        }

        // 只關心時鐘上的時間，先對一天取餘數
        let millis = (actual_sleep.rem_euclid(SECONDS_PER_DAY) * 1000.0).round() as i64;
        let (bedtime, _) = inputs
            .wake_time
            .as_naive_time()
            .overflowing_sub_signed(Duration::milliseconds(millis));

        tracing::debug!("Bedtime computed: {}", bedtime.format("%H:%M"));
        Ok(Bedtime::new(bedtime))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ClockFormat, SleepPrediction};

    /// actual_sleep == estimated_sleep
    struct IdentityModel;

    impl SleepModel for IdentityModel {
        fn predict(&self, features: &SleepFeatures) -> Result<SleepPrediction, ModelError> {
            Ok(SleepPrediction {
                actual_sleep: features.estimated_sleep * 3600.0,
            })
        }
    }

    struct UnavailableModel;

    impl SleepModel for UnavailableModel {
        fn predict(&self, _features: &SleepFeatures) -> Result<SleepPrediction, ModelError> {
            Err(ModelError::Unavailable {
                message: "incompatible runtime".to_string(),
            })
        }
    }

    struct ConstantModel(f64);

    impl SleepModel for ConstantModel {
        fn predict(&self, _features: &SleepFeatures) -> Result<SleepPrediction, ModelError> {
            Ok(SleepPrediction {
                actual_sleep: self.0,
            })
        }
    }

    fn inputs(wake: &str, sleep: &str, coffee: &str) -> SleepInputs {
        SleepInputs::parse(wake, sleep, coffee).unwrap()
    }

    #[test]
    fn test_eight_hours_before_seven_is_eleven_pm() {
        let estimator = BedtimeEstimator::new(IdentityModel);
        let bedtime = estimator.estimate_bedtime(&inputs("07:00", "8.0", "1")).unwrap();
        assert_eq!(bedtime.format(ClockFormat::TwentyFourHour), "23:00");
    }

    #[test]
    fn test_seven_and_a_half_hours_before_six_thirty() {
        let estimator = BedtimeEstimator::new(IdentityModel);
        let bedtime = estimator.estimate_bedtime(&inputs("06:30", "7.5", "3")).unwrap();
        assert_eq!(bedtime.to_string(), "23:00");
    }

    #[test]
    fn test_same_day_bedtime() {
        let estimator = BedtimeEstimator::new(IdentityModel);
        let bedtime = estimator.estimate_bedtime(&inputs("14:00", "4", "1")).unwrap();
        assert_eq!(bedtime.to_string(), "10:00");
    }

    #[test]
    fn test_unavailable_model_is_prediction_error() {
        let estimator = BedtimeEstimator::new(UnavailableModel);
        assert!(estimator.estimate_bedtime(&inputs("07:00", "8", "1")).is_err());
    }

    #[test]
    fn test_unusable_predictions_are_rejected() {
        for value in [f64::NAN, f64::INFINITY, -60.0] {
            let estimator = BedtimeEstimator::new(ConstantModel(value));
            let err = estimator
                .estimate_bedtime(&inputs("07:00", "8", "1"))
                .unwrap_err();
            assert!(err.log_detail().contains("unusable prediction"));
        }
    }

    #[test]
    fn test_prediction_longer_than_a_day_wraps() {
        let estimator = BedtimeEstimator::new(ConstantModel(86_400.0 + 3_600.0));
        let bedtime = estimator.estimate_bedtime(&inputs("07:00", "8", "1")).unwrap();
        assert_eq!(bedtime.to_string(), "06:00");
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let estimator = BedtimeEstimator::new(IdentityModel);
        let request = inputs("05:45", "9.25", "12");
        let first = estimator.estimate_bedtime(&request).unwrap();
        let second = estimator.estimate_bedtime(&request).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_string(), "20:30");
    }
}
