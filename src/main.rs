use clap::Parser;
use gamemaster_checkout::application::service::CheckoutService;
use gamemaster_checkout::config::{AppConfig, Cli};
use gamemaster_checkout::infrastructure::csv_log::CsvTransactionLog;
use gamemaster_checkout::infrastructure::paypal::PaypalGateway;
use gamemaster_checkout::interfaces::http::{router, AppState};
use miette::{IntoDiagnostic, Result};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::resolve(cli).into_diagnostic()?;
    info!(
        port = config.port,
        paypal_api = %config.paypal_api_url,
        transaction_log = %config.transaction_log.display(),
        "starting checkout server"
    );

    let gateway = PaypalGateway::new(&config).into_diagnostic()?;
    let recorder =
        CsvTransactionLog::new(config.transaction_log.clone(), config.failed_log.clone());
    let service = CheckoutService::new(Box::new(gateway), Box::new(recorder));
    let state = Arc::new(AppState { service });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .into_diagnostic()?;
    info!("listening on http://0.0.0.0:{}", config.port);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .into_diagnostic()?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutdown signal received");
    }
}
