//! Service endpoint description.

use thiserror::Error;
use url::Url;

/// Service name used in the credential scope.
pub const SERVICE_NAME: &str = "awis";

/// Path every request is sent to.
pub const SERVICE_URI: &str = "/api";

/// Signing algorithm identifier.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-west-1";

/// Error returned for an unusable endpoint override.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// The endpoint could not be parsed as a URL.
    #[error("invalid endpoint '{0}': {1}")]
    Parse(String, String),

    /// The endpoint has no host component.
    #[error("endpoint '{0}' has no host")]
    MissingHost(String),
}

/// Where and how requests are signed and sent.
///
/// The `host` used for signing is always the host of the endpoint requests are
/// actually sent to, so an overridden endpoint stays verifiable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    service: String,
    region: String,
    uri: String,
    origin: String,
    host: String,
}

impl ServiceDescriptor {
    /// Creates a descriptor for the regional endpoint `awis.<region>.amazonaws.com`.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        let region = region.into();
        let host = format!("{SERVICE_NAME}.{region}.amazonaws.com");
        Self {
            service: SERVICE_NAME.to_string(),
            origin: format!("https://{host}"),
            host,
            region,
            uri: SERVICE_URI.to_string(),
        }
    }

    /// Sends requests to `endpoint` instead of the regional host.
    ///
    /// Only the scheme, host and port of `endpoint` are used.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not an absolute URL with a host.
    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, EndpointError> {
        let url = Url::parse(endpoint)
            .map_err(|e| EndpointError::Parse(endpoint.to_string(), e.to_string()))?;
        let host = url
            .host_str()
            .ok_or_else(|| EndpointError::MissingHost(endpoint.to_string()))?;

        self.host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        self.origin = url.origin().ascii_serialization();
        Ok(self)
    }

    /// Overrides the service name used in the credential scope.
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Overrides the request path.
    #[must_use]
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = uri.into();
        self
    }

    /// Returns the service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Returns the region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the request path.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Returns the value of the signed `host` header.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the endpoint URL without a query, e.g. `https://awis.us-west-1.amazonaws.com/api`.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("{}{}", self.origin, self.uri)
    }
}

impl Default for ServiceDescriptor {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}
