use anyhow::Context;
use clap::Parser;
use coupon_engine::utils::error::ErrorSeverity;
use coupon_engine::utils::{logger, validation::Validate};
use coupon_engine::{
    CliConfig, Command, ConfigProvider, CouponEngine, CouponRequest, InMemoryFavoriteStore, ItemId,
    TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    let file_config = match &args.config {
        Some(path) => Some(
            TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?,
        ),
        None => None,
    };

    let verbose = args.verbose || file_config.as_ref().is_some_and(TomlConfig::verbose);
    let json_logs = args.json_logs || file_config.as_ref().is_some_and(TomlConfig::json_logs);

    // 初始化日誌
    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting coupon-engine");
    if verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    let outcome = match &file_config {
        Some(config) => run(config, &args.command).await,
        None => run(&args, &args.command).await,
    };

    match outcome {
        Ok(output) => println!("{}", output),
        Err(e) => {
            tracing::error!(
                "❌ Request failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 4,      // data missing, input was fine
                ErrorSeverity::Medium => 2,   // network, may be retried
                ErrorSeverity::High => 1,     // configuration or request
                ErrorSeverity::Critical => 3, // internal
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn run<P: ConfigProvider + Validate>(
    config: &P,
    command: &Command,
) -> coupon_engine::Result<String> {
    config.validate()?;

    match command {
        Command::Apply { items, amount } => {
            let engine = CouponEngine::from_config(config, InMemoryFavoriteStore::default())?;
            let request = CouponRequest {
                item_ids: items.iter().map(|id| ItemId::from(id.as_str())).collect(),
                amount: *amount,
            };
            let response = engine.apply_coupon(request).await?;
            Ok(serde_json::to_string_pretty(&response)?)
        }
        Command::Favorites => {
            let store = InMemoryFavoriteStore::from_config(config)?;
            let engine = CouponEngine::from_config(config, store)?;
            let favorites = engine.top_favorites()?;
            Ok(serde_json::to_string_pretty(&favorites)?)
        }
    }
}
