//! HTTP dispatch and response parsing for the awis web information service client.
//!
//! This crate provides the request pipeline:
//!
//! - [`Dispatcher`] - HTTP client sending signed requests, singly or in bounded batches
//! - [`parse::parse_traffic_history`] - Traffic history XML parsing
//! - [`UrlInfoResponse`] - Raw URL-info payload (unstable)
//! - [`AwisClient`] - High-level `url_info` and `traffic_history` operations

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/whistlebee/awis-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod dispatch;
mod history;
pub mod parse;

pub use client::AwisClient;
pub use dispatch::{ClientConfig, DispatchError, DispatchStrategy, Dispatcher};
pub use history::{FailedWindow, HistoryReport, WindowBatch};
pub use parse::{AWIS_NAMESPACE, ParseError, UrlInfoResponse, parse_traffic_history};
