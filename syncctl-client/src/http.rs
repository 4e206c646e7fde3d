//! HTTP implementation of [`ConnectorApi`] over a blocking `ureq` agent.
//!
//! Requests run on tokio's blocking pool so the async controller never
//! stalls a runtime worker on network I/O.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde_json::Value;

use syncctl_core::{ConnectorDetails, ConnectorId, ConnectorPatch, Envelope, ForceAck};

use crate::api::ConnectorApi;
use crate::credentials::Credentials;
use crate::error::ClientError;

pub const DEFAULT_API_BASE: &str = "https://api.fivetran.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Content type the update endpoint expects.
const PATCH_CONTENT_TYPE: &str = "application/json;version=2";

/// Everything but RFC 3986 unreserved characters is escaped in a path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Connection settings for [`HttpConnectorClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: default_user_agent(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// `syncctl/<crate version>`.
pub fn default_user_agent() -> String {
    format!("syncctl/{}", env!("CARGO_PKG_VERSION"))
}

/// Basic-auth client for the `/v1/connectors` endpoints.
///
/// Any non-2xx response surfaces as [`ClientError::Status`].
#[derive(Clone)]
pub struct HttpConnectorClient {
    agent: ureq::Agent,
    api_base: String,
    authorization: String,
}

impl HttpConnectorClient {
    pub fn new(credentials: &Credentials, config: ClientConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();
        Self {
            agent,
            api_base: config.api_base.trim_end_matches('/').to_owned(),
            authorization: credentials.basic_auth(),
        }
    }

    /// `<api_base>/v1/connectors/<id>`, with `id` percent-encoded.
    pub fn connector_url(&self, id: &ConnectorId) -> String {
        format!(
            "{}/v1/connectors/{}",
            self.api_base,
            utf8_percent_encode(id.as_str(), PATH_SEGMENT)
        )
    }

    /// `<api_base>/v1/connectors/<id>/force`
    pub fn force_url(&self, id: &ConnectorId) -> String {
        format!("{}/force", self.connector_url(id))
    }

    async fn execute<T>(
        &self,
        method: &'static str,
        url: String,
        body: Option<Value>,
    ) -> Result<T, ClientError>
    where
        T: DeserializeOwned + Send + 'static,
    {
        tracing::debug!(method, url = %url, "connector request");
        let agent = self.agent.clone();
        let authorization = self.authorization.clone();
        tokio::task::spawn_blocking(move || {
            send_blocking(&agent, method, &url, &authorization, body)
        })
        .await?
    }
}

#[async_trait]
impl ConnectorApi for HttpConnectorClient {
    async fn get(&self, id: &ConnectorId) -> Result<ConnectorDetails, ClientError> {
        let envelope: Envelope<ConnectorDetails> =
            self.execute("GET", self.connector_url(id), None).await?;
        Ok(envelope.data)
    }

    async fn patch(
        &self,
        id: &ConnectorId,
        fields: &ConnectorPatch,
    ) -> Result<ConnectorDetails, ClientError> {
        let body = serde_json::to_value(fields).map_err(|source| ClientError::Encode {
            url: self.connector_url(id),
            source,
        })?;
        let envelope: Envelope<ConnectorDetails> = self
            .execute("PATCH", self.connector_url(id), Some(body))
            .await?;
        Ok(envelope.data)
    }

    async fn force_sync(&self, id: &ConnectorId) -> Result<ForceAck, ClientError> {
        self.execute("POST", self.force_url(id), None).await
    }
}

fn send_blocking<T: DeserializeOwned>(
    agent: &ureq::Agent,
    method: &'static str,
    url: &str,
    authorization: &str,
    body: Option<Value>,
) -> Result<T, ClientError> {
    let request = agent
        .request(method, url)
        .set("Authorization", authorization)
        .set("Accept", "application/json");

    let result = match body {
        Some(body) => request
            .set("Content-Type", PATCH_CONTENT_TYPE)
            .send_json(body),
        None => request.call(),
    };

    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            let body = response.into_string().unwrap_or_default();
            return Err(ClientError::Status {
                method,
                url: url.to_owned(),
                code,
                body,
            });
        }
        Err(ureq::Error::Transport(transport)) => {
            return Err(ClientError::Transport {
                url: url.to_owned(),
                source: Box::new(transport),
            });
        }
    };

    let text = response.into_string().map_err(|source| ClientError::Io {
        url: url.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ClientError::Decode {
        url: url.to_owned(),
        source,
    })
}
