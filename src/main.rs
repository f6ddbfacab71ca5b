use anyhow::Context;
use clap::Parser;
use unit_converter::utils::{logger, validation::Validate};
use unit_converter::{CliConfig, Server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    logger::init_logger(
        config.logging.format,
        cli.verbose,
        config.logging.level.as_deref(),
    );

    tracing::info!("Starting unit-converter");
    tracing::debug!("Effective config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.security.csrf_enforce {
        tracing::info!("🔒 CSRF tokens required on conversion endpoints");
    }

    let address = config.bind_address();
    let server = Server::bind(config)
        .await
        .with_context(|| format!("failed to bind {}", address))?;

    server.run().await.context("server error")?;

    Ok(())
}
