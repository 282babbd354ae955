//! Signed request construction.

use awis_types::{Credentials, DATE_STAMP_FORMAT};
use chrono::{DateTime, Utc};

use crate::signer::{self, SCOPE_TERMINATOR};
use crate::{ALGORITHM, CanonicalQuery, ServiceDescriptor};

/// Format of the `X-Amz-Date` header.
pub const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Headers covered by the signature, in canonical order.
const SIGNED_HEADERS: &str = "host;x-amz-date";

/// Content type requested from and announced to the service.
const XML_CONTENT_TYPE: &str = "application/xml";

/// A fully authenticated GET request.
///
/// The signature is bound to the timestamp it was built with, so a request is
/// built fresh for every attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// Endpoint URL including the canonical query.
    pub url: String,
    /// Value of the `X-Amz-Date` header.
    pub amz_date: String,
    /// Value of the `Authorization` header.
    pub authorization: String,
}

impl SignedRequest {
    /// Returns the headers to send with the request.
    #[must_use]
    pub fn headers(&self) -> [(&'static str, &str); 4] {
        [
            ("Accept", XML_CONTENT_TYPE),
            ("Content-Type", XML_CONTENT_TYPE),
            ("X-Amz-Date", &self.amz_date),
            ("Authorization", &self.authorization),
        ]
    }

    /// Returns the value of a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers()
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }
}

/// Builds signed requests for one set of credentials and one service.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    credentials: Credentials,
    service: ServiceDescriptor,
}

impl RequestBuilder {
    /// Creates a new request builder.
    #[must_use]
    pub const fn new(credentials: Credentials, service: ServiceDescriptor) -> Self {
        Self {
            credentials,
            service,
        }
    }

    /// Returns the service descriptor.
    #[must_use]
    pub const fn service(&self) -> &ServiceDescriptor {
        &self.service
    }

    /// Builds a signed request for `query` at instant `now`.
    ///
    /// Both the `X-Amz-Date` timestamp and the credential scope date are taken
    /// from `now`, so they always agree.
    #[must_use]
    pub fn build(&self, query: &CanonicalQuery, now: DateTime<Utc>) -> SignedRequest {
        let amz_date = now.format(AMZ_DATE_FORMAT).to_string();
        let date_stamp = now.format(DATE_STAMP_FORMAT).to_string();
        let canonical_query = query.render();

        let canonical_request = self.canonical_request(&canonical_query, &amz_date);
        let scope = self.credential_scope(&date_stamp);
        let string_to_sign = format!(
            "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
            signer::sha256_hex(canonical_request.as_bytes())
        );

        let key = signer::signing_key(
            self.credentials.secret_key(),
            &date_stamp,
            self.service.region(),
            self.service.service(),
        );
        let signature = signer::sign(&key, &string_to_sign);

        let authorization = format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
            self.credentials.access_id()
        );

        let url = if canonical_query.is_empty() {
            self.service.base_url()
        } else {
            format!("{}?{canonical_query}", self.service.base_url())
        };

        SignedRequest {
            url,
            amz_date,
            authorization,
        }
    }

    /// Returns the canonical request string hashed into the signature.
    #[must_use]
    pub fn canonical_request(&self, canonical_query: &str, amz_date: &str) -> String {
        let canonical_headers = format!("host:{}\nx-amz-date:{amz_date}\n", self.service.host());
        format!(
            "GET\n{}\n{canonical_query}\n{canonical_headers}\n{SIGNED_HEADERS}\n{}",
            self.service.uri(),
            signer::sha256_hex(b"")
        )
    }

    /// Returns the credential scope for a date stamp.
    #[must_use]
    pub fn credential_scope(&self, date_stamp: &str) -> String {
        format!(
            "{date_stamp}/{}/{}/{SCOPE_TERMINATOR}",
            self.service.region(),
            self.service.service()
        )
    }
}
