use better_rest::config::toml_config::DEFAULT_MODEL_PATH;
use better_rest::utils::error::{PredictionError, Result};
use better_rest::utils::logger;
use better_rest::{
    calculate_batch, BatchSummary, BedtimeError, BedtimeEstimator, ClockFormat,
    LinearRegressionModel,
};
use clap::Parser;
use std::fs::File;
use std::io::{BufReader, BufWriter};

#[derive(Parser)]
#[command(name = "batch-bedtime")]
#[command(about = "Calculates bedtimes for every row of a CSV file")]
struct Args {
    /// CSV with columns wake_time,sleep_amount,coffee_intake
    #[arg(short, long)]
    input: String,

    /// Where to write the results; stdout when omitted
    #[arg(short, long)]
    output: Option<String>,

    /// Path to the regression model artifact (.toml or .json)
    #[arg(short, long, default_value = DEFAULT_MODEL_PATH)]
    model: String,

    /// Clock format for bedtimes: 24h or 12h
    #[arg(long, default_value = "24h")]
    clock: ClockFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);
    tracing::info!("🚀 Starting batch bedtime calculation");
    tracing::info!("📁 Input: {}", args.input);

    match run(&args) {
        Ok(summary) => {
            eprintln!(
                "✅ {} rows processed: {} succeeded, {} failed",
                summary.total, summary.succeeded, summary.failed
            );
        }
        Err(e) => {
            tracing::error!("❌ Batch calculation failed: {}", e);
            if let BedtimeError::Prediction(p) = &e {
                tracing::error!("Cause: {}", p.log_detail());
            }
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

fn run(args: &Args) -> Result<BatchSummary> {
    // 模型載入失敗時整批都無法計算
    let model = LinearRegressionModel::from_file(&args.model).map_err(PredictionError::from)?;
    tracing::info!("🧠 Using model '{}'", model.name());

    let estimator = BedtimeEstimator::new(model);
    let reader = BufReader::new(File::open(&args.input)?);

    match &args.output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            let summary = calculate_batch(&estimator, reader, writer, args.clock)?;
            println!("📁 Results saved to: {}", path);
            Ok(summary)
        }
        None => calculate_batch(&estimator, reader, std::io::stdout().lock(), args.clock),
    }
}
