//! Connection configuration for the administrative client

use url::Url;

use crate::error::{ClientError, Result};

/// Body encoding for the create-repository descriptor
///
/// Older server revisions accept only the XML document; newer ones accept
/// JSON as well. The `Content-type` header follows the chosen encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadFormat {
    #[default]
    Xml,
    Json,
}

impl PayloadFormat {
    /// `Content-type` value matching this encoding
    pub fn content_type(&self) -> &'static str {
        match self {
            PayloadFormat::Xml => "application/xml",
            PayloadFormat::Json => "application/json",
        }
    }
}

/// Connection settings: where the server lives and who we are
///
/// The credentials must belong to an admin user capable of creating and
/// mutating repositories. The base URL typically takes the form
/// `http://host:port/nexus`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL, normalized to carry no trailing slash
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Encoding used for the create-repository descriptor
    pub format: PayloadFormat,
}

impl ClientConfig {
    /// Validate and normalize the base URL and build a configuration.
    pub fn new(
        base_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        let base_url = base_url.into();

        let parsed = Url::parse(&base_url).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url,
                reason: "URL must start with http:// or https://".to_string(),
            });
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
            format: PayloadFormat::default(),
        })
    }

    /// Select the create-repository body encoding.
    pub fn with_format(mut self, format: PayloadFormat) -> Self {
        self.format = format;
        self
    }

    /// `Authorization` header value for these credentials
    pub(crate) fn basic_auth(&self) -> String {
        let encoded = base64::Engine::encode(
            &base64::engine::general_purpose::STANDARD,
            format!("{}:{}", self.username, self.password),
        );
        format!("Basic {}", encoded)
    }
}
