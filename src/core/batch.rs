use crate::core::{BedtimeEstimator, SleepModel};
use crate::domain::model::{ClockFormat, SleepInputs};
use crate::utils::error::{BedtimeError, Result, PREDICTION_FAILURE_MESSAGE};
use serde::Serialize;
use std::io::{Read, Write};

pub const BATCH_COLUMNS: [&str; 3] = ["wake_time", "sleep_amount", "coffee_intake"];

/// One input row. Fields stay raw so a bad value only fails its own row.
#[derive(Debug, Clone, Default)]
pub struct BatchRow {
    pub wake_time: String,
    pub sleep_amount: String,
    pub coffee_intake: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchOutputRow {
    pub wake_time: String,
    pub sleep_amount: String,
    pub coffee_intake: String,
    pub bedtime: String,
    pub error: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Reads `wake_time,sleep_amount,coffee_intake` rows and writes one output row
/// per input row. A header without the three columns or an I/O failure aborts
/// the batch; anything wrong inside a single row is reported in that row.
pub fn calculate_batch<M, R, W>(
    estimator: &BedtimeEstimator<M>,
    reader: R,
    writer: W,
    clock: ClockFormat,
) -> Result<BatchSummary>
where
    M: SleepModel,
    R: Read,
    W: Write,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut columns = [0usize; 3];
    for (slot, name) in columns.iter_mut().zip(BATCH_COLUMNS) {
        *slot = headers.iter().position(|h| h == name).ok_or_else(|| {
            BedtimeError::validation(
                "csv header",
                headers.iter().collect::<Vec<_>>().join(","),
                format!("missing column '{}'", name),
            )
        })?;
    }

    let mut csv_writer = csv::Writer::from_writer(writer);
    let mut summary = BatchSummary::default();

    for (index, record) in csv_reader.records().enumerate() {
        summary.total += 1;

        let (row, outcome) = match record {
            Ok(record) => {
                let field = |i: usize| record.get(columns[i]).unwrap_or_default().to_string();
                let row = BatchRow {
                    wake_time: field(0),
                    sleep_amount: field(1),
                    coffee_intake: field(2),
                };
                let outcome = if record.len() != headers.len() {
                    Err(format!(
                        "Row has {} fields, expected {}",
                        record.len(),
                        headers.len()
                    ))
                } else {
                    calculate_row(estimator, &row, clock)
                };
                (row, outcome)
            }
            // 讀檔失敗無法繼續，其餘錯誤 (例如非 UTF-8) 只影響這一列
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => (BatchRow::default(), Err(format!("Row could not be read: {}", e))),
        };

        let (bedtime, error) = match outcome {
            Ok(bedtime) => {
                summary.succeeded += 1;
                (bedtime, String::new())
            }
            Err(message) => {
                tracing::warn!("⚠️ Row {} failed: {}", index + 1, message);
                summary.failed += 1;
                (String::new(), message)
            }
        };

        csv_writer.serialize(BatchOutputRow {
            wake_time: row.wake_time,
            sleep_amount: row.sleep_amount,
            coffee_intake: row.coffee_intake,
            bedtime,
            error,
        })?;
    }

    csv_writer.flush()?;
    tracing::info!(
        "📊 Batch finished: {} rows, {} succeeded, {} failed",
        summary.total,
        summary.succeeded,
        summary.failed
    );
    Ok(summary)
}

fn calculate_row<M: SleepModel>(
    estimator: &BedtimeEstimator<M>,
    row: &BatchRow,
    clock: ClockFormat,
) -> std::result::Result<String, String> {
    let inputs = SleepInputs::parse(&row.wake_time, &row.sleep_amount, &row.coffee_intake)
        .map_err(|e| e.user_friendly_message())?;

    estimator
        .estimate_bedtime(&inputs)
        .map(|bedtime| bedtime.format(clock))
        .map_err(|_| PREDICTION_FAILURE_MESSAGE.to_string())
}
