//! # syncctl-client
//!
//! Status client for remote connectors: fetch details, apply partial
//! updates, force a sync. [`ConnectorApi`] is the seam the controller is
//! written against; [`HttpConnectorClient`] talks to the real API.

mod api;
mod credentials;
mod error;
pub mod http;

pub use api::ConnectorApi;
pub use credentials::Credentials;
pub use error::ClientError;
pub use http::{ClientConfig, HttpConnectorClient};
