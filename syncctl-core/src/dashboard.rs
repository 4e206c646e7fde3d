//! Human-facing dashboard links attached to errors.

use crate::types::ConnectorDetails;

pub const DEFAULT_DASHBOARD_BASE: &str = "https://fivetran.com/dashboard";

/// Builds dashboard URLs from a connector's `service` and `schema`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dashboard {
    base: String,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(DEFAULT_DASHBOARD_BASE)
    }
}

impl Dashboard {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_owned();
        Self { base }
    }

    /// Page where an incomplete connector setup can be finished.
    pub fn setup_url(&self, details: &ConnectorDetails) -> String {
        self.connector_page(details, "setup")
    }

    /// Page listing the connector's sync logs.
    pub fn logs_url(&self, details: &ConnectorDetails) -> String {
        self.connector_page(details, "logs")
    }

    fn connector_page(&self, details: &ConnectorDetails, page: &str) -> String {
        format!(
            "{}/connectors/{}/{}/{page}",
            self.base, details.service, details.schema
        )
    }
}
