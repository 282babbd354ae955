//! SigV4 request signing for the awis web information service client.
//!
//! This crate turns a query into a ready-to-send request:
//!
//! - [`ServiceDescriptor`] - Service name, region, endpoint and URI path
//! - [`CanonicalQuery`] - Sorted, percent-encoded query parameters
//! - [`signer`] - The four-step HMAC key derivation and signature
//! - [`RequestBuilder`] - Produces a [`SignedRequest`] from a query and an instant

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/whistlebee/awis-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod query;
mod request;
mod service;
pub mod signer;

pub use query::CanonicalQuery;
pub use request::{RequestBuilder, SignedRequest};
pub use service::{
    ALGORITHM, DEFAULT_REGION, EndpointError, SERVICE_NAME, SERVICE_URI, ServiceDescriptor,
};
