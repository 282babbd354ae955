//! Rust client library for the Alexa Web Information Service.
//!
//! This is a facade crate that re-exports functionality from the awis
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```ignore
//! use awis_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Credentials::new("AKID...", "secret...");
//!     let client = AwisClient::new(credentials, ClientConfig::default())?;
//!
//!     let query = HistoryQuery::new("example.com").with_range(90);
//!     for record in client.traffic_history(&query).await? {
//!         println!("{} rank {}", record.date, record.rank);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/whistlebee/awis-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use awis_types::*;

// Re-export request signing
pub use awis_sign::{
    CanonicalQuery, DEFAULT_REGION, EndpointError, RequestBuilder, ServiceDescriptor,
    SignedRequest, signer,
};

// Re-export fetch functionality
#[cfg(feature = "fetch")]
pub use awis_fetch::{
    AwisClient, ClientConfig, DispatchError, DispatchStrategy, Dispatcher, FailedWindow,
    HistoryReport, ParseError, UrlInfoResponse, WindowBatch, parse_traffic_history,
};

/// Prelude module for convenient imports.
///
/// ```
/// use awis_lib::prelude::*;
/// ```
pub mod prelude {
    pub use awis_types::{
        AwisError, Credentials, HistoryQuery, HistoryWindow, ResponseGroup, Result,
        TrafficHistoryRecord,
    };

    pub use awis_sign::{CanonicalQuery, RequestBuilder, ServiceDescriptor, SignedRequest};

    #[cfg(feature = "fetch")]
    pub use awis_fetch::{
        AwisClient, ClientConfig, DispatchStrategy, HistoryReport, UrlInfoResponse,
    };
}
