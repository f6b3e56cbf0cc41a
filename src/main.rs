use better_rest::config::toml_config::TomlConfig;
use better_rest::domain::model::BedtimeReport;
use better_rest::utils::{error::Result, logger};
use better_rest::{BedtimeError, BedtimeService, CliConfig, LocalModelStore};
use clap::Parser;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting better-rest CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!("❌ Bedtime calculation failed: {}", e);
        if let BedtimeError::Prediction(p) = &e {
            tracing::error!("Cause: {}", p.log_detail());
        }
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        if config.json {
            // 預測失敗的 JSON 報告已在 run() 裡輸出
            if !matches!(e, BedtimeError::Prediction(_)) {
                println!("{}", serde_json::json!({ "error": e.user_friendly_message() }));
            }
        } else {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        }

        std::process::exit(e.exit_code());
    }
}

async fn run(config: &CliConfig) -> Result<()> {
    let file_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            TomlConfig::from_file(path)?
        }
        None => TomlConfig::default(),
    };

    // 只驗證合併命令列參數之後實際用到的值
    let inputs = config.resolve_inputs(&file_config)?;
    let model_path = config.resolve_model_path(&file_config)?;
    let clock = config.resolve_clock(&file_config);

    let service = BedtimeService::new(LocalModelStore::default(), model_path);
    let outcome = service.calculate(inputs).await;

    if config.json {
        let report = BedtimeReport::new(
            &inputs,
            outcome
                .as_ref()
                .map(|bedtime| bedtime.format(clock))
                .map_err(|_| better_rest::utils::error::PREDICTION_FAILURE_MESSAGE.to_string()),
        );
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    let bedtime = outcome?;
    tracing::info!("✅ Bedtime calculated: {}", bedtime);

    if !config.json {
        println!("Wake up at {}", inputs.wake_time);
        println!("Sleep for {}", inputs.sleep_amount.label());
        println!("Coffee: {}", inputs.coffee_intake.label());
        println!();
        println!("Your ideal bedtime is… {}", bedtime.format(clock));
    }

    Ok(())
}
