use clap::Parser;
use storefront_client::commands::{self, Cli, Services};
use storefront_client::infrastructure::config::{Config, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env().map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

    // Initialize logging
    init_logging(&config);

    tracing::debug!(
        backend = %config.backend_base_url,
        token_file = %config.token_file.display(),
        "Starting storefront client"
    );

    let services = Services::from_config(config)?;

    commands::run(cli.command, &services).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| config.default_log_filter().into())
    };

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}
