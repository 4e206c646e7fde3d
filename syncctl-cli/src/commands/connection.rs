//! Credential and endpoint resolution shared by every subcommand.
//!
//! Precedence: flag, then environment, then `~/.syncctl/config.yaml`.

use anyhow::{Context, Result};
use clap::Args;

use syncctl_client::{ClientConfig, Credentials, HttpConnectorClient};
use syncctl_core::config::{self, Config};
use syncctl_core::Dashboard;

#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// API key.
    #[arg(long, env = "SYNCCTL_API_KEY", global = true)]
    pub api_key: Option<String>,

    /// API secret.
    #[arg(long, env = "SYNCCTL_API_SECRET", global = true, hide_env_values = true)]
    pub api_secret: Option<String>,

    /// Base URL of the connector API.
    #[arg(long, env = "SYNCCTL_API_BASE", global = true)]
    pub api_base: Option<String>,

    /// Base URL used for setup / logs links in error messages.
    #[arg(long, global = true)]
    pub dashboard_base: Option<String>,
}

/// A ready client plus the settings the workflow needs alongside it.
pub struct Connection {
    pub client: HttpConnectorClient,
    pub dashboard: Dashboard,
}

impl ConnectionArgs {
    /// Load the optional config file. Needs no credentials.
    pub fn load_config(&self) -> Result<Config> {
        config::load().context("failed to load ~/.syncctl/config.yaml")
    }

    pub fn connect(&self, config: &Config) -> Result<Connection> {
        let api_key = self
            .api_key
            .clone()
            .or_else(|| config.api_key.clone())
            .unwrap_or_default();
        let api_secret = self
            .api_secret
            .clone()
            .or_else(|| config.api_secret.clone())
            .unwrap_or_default();
        let credentials = Credentials::new(api_key, api_secret).context(
            "missing credentials; pass --api-key/--api-secret, set SYNCCTL_API_KEY/SYNCCTL_API_SECRET, or add them to ~/.syncctl/config.yaml",
        )?;

        let mut client_config = ClientConfig::default();
        if let Some(api_base) = self.api_base.clone().or_else(|| config.api_base.clone()) {
            client_config.api_base = api_base;
        }
        let dashboard = self
            .dashboard_base
            .clone()
            .or_else(|| config.dashboard_base.clone())
            .map(Dashboard::new)
            .unwrap_or_default();

        tracing::debug!(api_base = %client_config.api_base, "connecting");
        Ok(Connection {
            client: HttpConnectorClient::new(&credentials, client_config),
            dashboard,
        })
    }
}
