use std::fmt;

use syncctl_core::ArgumentError;

/// API key + secret. Immutable once created; the secret never appears in `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, ArgumentError> {
        let api_key = api_key.into();
        let api_secret = api_secret.into();
        if api_key.is_empty() {
            return Err(ArgumentError::MissingCredential("api_key"));
        }
        if api_secret.is_empty() {
            return Err(ArgumentError::MissingCredential("api_secret"));
        }
        Ok(Self {
            api_key,
            api_secret,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// `Authorization` header value for HTTP basic auth.
    pub(crate) fn basic_auth(&self) -> String {
        format!(
            "Basic {}",
            base64::encode(format!("{}:{}", self.api_key, self.api_secret))
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
