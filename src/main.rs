use btts_bot::adapters::telegram;
use btts_bot::utils::logger;
use btts_bot::{AppConfig, CliArgs};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    logger::init_logger(args.verbose, args.json_logs);

    tracing::info!("Starting btts-bot");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    // Secrets are checked before anything touches the network.
    let config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if !args.once {
        telegram::run_bot(config).await;
        return;
    }

    if args.dry_run {
        println!("{}", telegram::build_reply(config, args.date).await);
        return;
    }

    if let Err(e) = telegram::deliver_once(config, args.date).await {
        tracing::error!("❌ Delivery failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(2);
    }
}
