use crate::error::{CheckoutError, Result};
use clap::Parser;
use std::path::PathBuf;

/// Command-line options for the checkout server.
///
/// Operational settings live here; the PayPal credentials are deliberately
/// env-only (`PAYPAL_CLIENT_ID` / `PAYPAL_CLIENT_SECRET`) so they never end
/// up in shell history or process listings.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    pub port: u16,

    /// Append-only transaction log (created with its header on first write)
    #[arg(long, default_value = "transactions.csv")]
    pub transaction_log: PathBuf,

    /// Optional separate log for failed capture attempts
    #[arg(long)]
    pub failed_log: Option<PathBuf>,

    /// PayPal REST API base URL
    #[arg(long, default_value = "https://api-m.sandbox.paypal.com")]
    pub paypal_api_url: String,

    /// Public base URL used for the 3DS return/cancel redirect pages
    #[arg(long)]
    pub public_base_url: Option<String>,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub transaction_log: PathBuf,
    pub failed_log: Option<PathBuf>,
    pub paypal_api_url: String,
    pub public_base_url: String,
    pub credentials: Credentials,
}

/// PayPal client-credentials pair. `Debug` redacts the secret.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

impl Credentials {
    /// Reads the credential pair from the environment. Fails fast with the
    /// name of the missing variable rather than falling back to baked-in
    /// sandbox keys.
    pub fn from_env() -> Result<Self> {
        let client_id = require_env("PAYPAL_CLIENT_ID")?;
        let client_secret = require_env("PAYPAL_CLIENT_SECRET")?;
        Ok(Self {
            client_id,
            client_secret,
        })
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(CheckoutError::ConfigError(format!("{} is not set", name))),
    }
}

impl AppConfig {
    /// Combines CLI options with env-provided secrets.
    pub fn resolve(cli: Cli) -> Result<Self> {
        let credentials = Credentials::from_env()?;
        let public_base_url = cli
            .public_base_url
            .unwrap_or_else(|| format!("http://localhost:{}", cli.port));
        Ok(Self {
            port: cli.port,
            transaction_log: cli.transaction_log,
            failed_log: cli.failed_log,
            paypal_api_url: cli.paypal_api_url,
            public_base_url,
            credentials,
        })
    }
}
