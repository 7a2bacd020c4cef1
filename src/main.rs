use alerter::notify::config::{NOTIFY_ENDPOINT, TIMEOUT_ENV, TOKEN_ENV};
use alerter::shared::logging;
use alerter::{Client, Config, Context};
use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "alerter")]
#[command(about = "Send an error alert to LINE Notify", long_about = None)]
struct Cli {
    /// Label of the subsystem raising the alert
    #[arg(short, long)]
    source: String,

    /// Error text to report
    #[arg(short, long)]
    message: String,

    /// Notify access token
    #[arg(long, env = TOKEN_ENV, hide_env_values = true)]
    token: String,

    /// Request timeout in seconds (default 3)
    #[arg(long, env = TIMEOUT_ENV)]
    timeout_secs: Option<String>,

    #[arg(long, default_value = NOTIFY_ENDPOINT)]
    endpoint: String,

    /// Directory for log files
    #[arg(long, default_value = "./logs")]
    log_dir: String,
}

#[derive(Debug, Error)]
#[error("{0}")]
struct ReportedError(String);

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let _guard = logging::init_logging(&cli.log_dir, "alerter")?;

    let config = Config::from_values(&cli.token, cli.timeout_secs.as_deref())?
        .with_endpoint(cli.endpoint);
    let client = Client::new(Arc::new(config))?;

    let (ctx, cancel) = Context::background().with_cancel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling alert");
            cancel.cancel();
        }
    });

    match client.alert(&ctx, &cli.source, &ReportedError(cli.message)).await {
        Ok(()) => {
            info!("Alert from {} delivered", cli.source);
            Ok(())
        }
        Err(e) => {
            error!("Alert from {} failed: {}", cli.source, e);
            Err(e.into())
        }
    }
}
