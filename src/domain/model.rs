use crate::utils::error::{BedtimeError, Result};
use crate::utils::validation::{
    parse_f64, parse_i64, validate_finite, validate_non_empty_string, validate_range,
    validate_step,
};
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MIN_SLEEP_HOURS: f64 = 4.0;
pub const MAX_SLEEP_HOURS: f64 = 12.0;
pub const SLEEP_STEP_HOURS: f64 = 0.25;

pub const MIN_COFFEE_CUPS: u8 = 1;
pub const MAX_COFFEE_CUPS: u8 = 20;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Desired wake-up time of day. Seconds and date are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WakeTime(NaiveTime);

impl WakeTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(WakeTime)
            .ok_or_else(|| {
                BedtimeError::validation(
                    "wake_time",
                    format!("{}:{:02}", hour, minute),
                    "Hour must be 0-23 and minute 0-59",
                )
            })
    }

    /// Accepts `HH:MM` (24-hour) or `H:MM AM/PM`.
    pub fn parse(raw: &str) -> Result<Self> {
        validate_non_empty_string("wake_time", raw)?;
        let normalized = raw.trim().to_uppercase();

        ["%H:%M", "%I:%M %p"]
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(&normalized, fmt).ok())
            .map(|t| WakeTime(t.with_second(0).unwrap_or(t)))
            .ok_or_else(|| {
                BedtimeError::validation("wake_time", raw, "Expected HH:MM or H:MM AM/PM")
            })
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn seconds_since_midnight(&self) -> f64 {
        (self.hour() as f64) * SECONDS_PER_HOUR + (self.minute() as f64) * 60.0
    }

    pub fn as_naive_time(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for WakeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

impl FromStr for WakeTime {
    type Err = BedtimeError;

    fn from_str(s: &str) -> Result<Self> {
        WakeTime::parse(s)
    }
}

/// Desired hours of sleep, 4 to 12 in quarter-hour steps.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct SleepAmount(f64);

impl SleepAmount {
    pub fn new(hours: f64) -> Result<Self> {
        validate_finite("sleep_amount", hours)?;
        validate_range("sleep_amount", hours, MIN_SLEEP_HOURS, MAX_SLEEP_HOURS)?;
        validate_step("sleep_amount", hours, SLEEP_STEP_HOURS)?;
        Ok(SleepAmount(hours))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Self::new(parse_f64("sleep_amount", raw)?)
    }

    pub fn hours(&self) -> f64 {
        self.0
    }

    pub fn step_up(self) -> Self {
        SleepAmount((self.0 + SLEEP_STEP_HOURS).min(MAX_SLEEP_HOURS))
    }

    pub fn step_down(self) -> Self {
        SleepAmount((self.0 - SLEEP_STEP_HOURS).max(MIN_SLEEP_HOURS))
    }

    /// "8 hours", "7.5 hours", "7.25 hours"
    pub fn label(&self) -> String {
        format!("{} hours", format_hours(self.0))
    }
}

fn format_hours(hours: f64) -> String {
    let text = format!("{:.2}", hours);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Cups of coffee per day, 1 to 20 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CoffeeIntake(u8);

impl CoffeeIntake {
    pub fn new(cups: i64) -> Result<Self> {
        validate_range(
            "coffee_intake",
            cups,
            MIN_COFFEE_CUPS as i64,
            MAX_COFFEE_CUPS as i64,
        )?;
        Ok(CoffeeIntake(cups as u8))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Self::new(parse_i64("coffee_intake", raw)?)
    }

    pub fn cups(&self) -> u8 {
        self.0
    }

    pub fn step_up(self) -> Self {
        CoffeeIntake(self.0.saturating_add(1).min(MAX_COFFEE_CUPS))
    }

    pub fn step_down(self) -> Self {
        CoffeeIntake(self.0.saturating_sub(1).max(MIN_COFFEE_CUPS))
    }

    pub fn label(&self) -> String {
        if self.0 == 1 {
            "1 cup".to_string()
        } else {
            format!("{} cups", self.0)
        }
    }
}

/// The three session inputs, re-read on every calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SleepInputs {
    pub wake_time: WakeTime,
    pub sleep_amount: SleepAmount,
    pub coffee_intake: CoffeeIntake,
}

impl SleepInputs {
    pub fn new(wake_time: WakeTime, sleep_amount: SleepAmount, coffee_intake: CoffeeIntake) -> Self {
        Self {
            wake_time,
            sleep_amount,
            coffee_intake,
        }
    }

    /// 從原始字串輸入建立，任何一欄不合法都會回傳 ValidationError
    pub fn parse(wake_time: &str, sleep_amount: &str, coffee_intake: &str) -> Result<Self> {
        Ok(Self {
            wake_time: WakeTime::parse(wake_time)?,
            sleep_amount: SleepAmount::parse(sleep_amount)?,
            coffee_intake: CoffeeIntake::parse(coffee_intake)?,
        })
    }
}

/// Feature vector handed to the regression model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepFeatures {
    /// Seconds since midnight.
    pub wake: f64,
    /// Hours.
    pub estimated_sleep: f64,
    /// Cups.
    pub coffee: f64,
}

impl From<&SleepInputs> for SleepFeatures {
    fn from(inputs: &SleepInputs) -> Self {
        Self {
            wake: inputs.wake_time.seconds_since_midnight(),
            estimated_sleep: inputs.sleep_amount.hours(),
            coffee: inputs.coffee_intake.cups() as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SleepPrediction {
    /// Sleep actually needed, in seconds.
    pub actual_sleep: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    #[default]
    #[serde(rename = "24h")]
    TwentyFourHour,
    #[serde(rename = "12h")]
    TwelveHour,
}

impl FromStr for ClockFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "24h" | "24" => Ok(ClockFormat::TwentyFourHour),
            "12h" | "12" => Ok(ClockFormat::TwelveHour),
            other => Err(format!("unknown clock format '{}', expected 24h or 12h", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bedtime(NaiveTime);

impl Bedtime {
    pub fn new(time: NaiveTime) -> Self {
        Bedtime(time)
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    pub fn format(&self, clock: ClockFormat) -> String {
        match clock {
            ClockFormat::TwentyFourHour => self.0.format("%H:%M").to_string(),
            ClockFormat::TwelveHour => self.0.format("%-I:%M %p").to_string(),
        }
    }
}

impl fmt::Display for Bedtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(ClockFormat::TwentyFourHour))
    }
}

/// Serializable summary of one calculation, used by `--json` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BedtimeReport {
    pub wake_time: String,
    pub sleep_amount: f64,
    pub coffee_intake: u8,
    pub bedtime: Option<String>,
    pub error: Option<String>,
}

impl BedtimeReport {
    pub fn new(inputs: &SleepInputs, outcome: std::result::Result<String, String>) -> Self {
        let (bedtime, error) = match outcome {
            Ok(b) => (Some(b), None),
            Err(e) => (None, Some(e)),
        };
        Self {
            wake_time: inputs.wake_time.to_string(),
            sleep_amount: inputs.sleep_amount.hours(),
            coffee_intake: inputs.coffee_intake.cups(),
            bedtime,
            error,
        }
    }
}
