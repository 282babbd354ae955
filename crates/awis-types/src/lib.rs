//! Core types for the awis web information service client.
//!
//! This crate provides the fundamental data structures used throughout awis:
//!
//! - [`TrafficHistoryRecord`] - One day of traffic statistics for a site
//! - [`ResponseGroup`] - Valid URL-info response groups
//! - [`Credentials`] - Access id and secret key used for request signing
//! - [`HistoryQuery`] - A traffic history request, planned into [`HistoryWindow`]s
//! - [`merge_records`] - Merges per-window results into one ordered sequence

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/whistlebee/awis-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod credentials;
mod error;
mod history;
mod record;
mod response_group;

pub use credentials::Credentials;
pub use error::{AwisError, Result, SearchRangeError};
pub use history::{
    DATE_STAMP_FORMAT, DEFAULT_SEARCH_RANGE, HistoryQuery, HistoryWindow, MAX_SEARCH_RANGE,
    merge_records,
};
pub use record::TrafficHistoryRecord;
pub use response_group::{ResponseGroup, ResponseGroupParseError};
