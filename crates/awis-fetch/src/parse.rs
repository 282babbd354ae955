//! XML response parsing.

use std::str::FromStr;

use awis_types::TrafficHistoryRecord;
use bytes::Bytes;
use roxmltree::{Document, Node};
use thiserror::Error;

/// Namespace of the elements carrying response data.
pub const AWIS_NAMESPACE: &str = "http://awis.amazonaws.com/doc/2005-07-11";

/// Errors that can occur while parsing a response body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The body is not valid UTF-8.
    #[error("Response is not valid UTF-8")]
    Encoding,

    /// The body is not well-formed XML.
    #[error("Malformed XML: {0}")]
    Xml(String),

    /// No element of the data namespace appears in the document.
    #[error("Response namespace not found in document")]
    MissingNamespace,

    /// A `Data` record lacks a required child.
    #[error("Data record {record} is missing {element}")]
    MissingElement {
        /// Position of the record in the document.
        record: usize,
        /// Path of the missing element.
        element: &'static str,
    },

    /// A value could not be converted to the expected type.
    #[error("Data record {record} has invalid {element}: {value:?}")]
    InvalidValue {
        /// Position of the record in the document.
        record: usize,
        /// Path of the offending element.
        element: &'static str,
        /// The text found.
        value: String,
    },
}

/// Parses a traffic history response into records, in document order.
///
/// Every `Data` element of [`AWIS_NAMESPACE`] yields one record. A document
/// that uses the namespace but holds no `Data` element yields no records.
///
/// # Errors
///
/// Returns an error if the body is not well-formed XML, the namespace is
/// absent, or a record is missing a field or holds an unparsable value.
pub fn parse_traffic_history(body: &[u8]) -> Result<Vec<TrafficHistoryRecord>, ParseError> {
    let text = std::str::from_utf8(body).map_err(|_| ParseError::Encoding)?;
    let doc = Document::parse(text).map_err(|e| ParseError::Xml(e.to_string()))?;

    let uses_namespace = doc
        .descendants()
        .any(|node| node.is_element() && node.tag_name().namespace() == Some(AWIS_NAMESPACE));
    if !uses_namespace {
        return Err(ParseError::MissingNamespace);
    }

    doc.descendants()
        .filter(|node| node.has_tag_name((AWIS_NAMESPACE, "Data")))
        .enumerate()
        .map(|(record, data)| parse_data(record, data))
        .collect()
}

/// Parses a single `Data` element.
fn parse_data(record: usize, data: Node<'_, '_>) -> Result<TrafficHistoryRecord, ParseError> {
    let date = field_text(record, data, &["Date"], "Date")?;
    let page_views_per_million = field_value(
        record,
        data,
        &["PageViews", "PerMillion"],
        "PageViews/PerMillion",
    )?;
    let page_views_per_user =
        field_value(record, data, &["PageViews", "PerUser"], "PageViews/PerUser")?;
    let rank = field_value(record, data, &["Rank"], "Rank")?;
    let reach_per_million =
        field_value(record, data, &["Reach", "PerMillion"], "Reach/PerMillion")?;

    Ok(TrafficHistoryRecord::new(
        date,
        page_views_per_million,
        page_views_per_user,
        rank,
        reach_per_million,
    ))
}

/// Follows `path` through namespaced children and returns the trimmed text.
fn field_text<'a>(
    record: usize,
    data: Node<'a, '_>,
    path: &[&str],
    element: &'static str,
) -> Result<&'a str, ParseError> {
    let mut node = data;
    for name in path {
        node = node
            .children()
            .find(|child| child.has_tag_name((AWIS_NAMESPACE, *name)))
            .ok_or(ParseError::MissingElement { record, element })?;
    }
    node.text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(ParseError::MissingElement { record, element })
}

fn field_value<T: FromStr>(
    record: usize,
    data: Node<'_, '_>,
    path: &[&str],
    element: &'static str,
) -> Result<T, ParseError> {
    let text = field_text(record, data, path, element)?;
    text.parse().map_err(|_| ParseError::InvalidValue {
        record,
        element,
        value: text.to_string(),
    })
}

/// Raw body of a URL-info response.
///
/// # Stability
///
/// URL-info payloads are not parsed into structured data yet. This type only
/// guarantees that the body is well-formed XML; its accessors expose the raw
/// document and will be joined by typed accessors in a later release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlInfoResponse {
    body: Bytes,
}

impl UrlInfoResponse {
    /// Wraps a response body after checking it is well-formed XML.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not UTF-8 or not well-formed XML.
    pub fn from_body(body: Bytes) -> Result<Self, ParseError> {
        let text = std::str::from_utf8(&body).map_err(|_| ParseError::Encoding)?;
        Document::parse(text).map_err(|e| ParseError::Xml(e.to_string()))?;
        Ok(Self { body })
    }

    /// Returns the raw body bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.body
    }

    /// Returns the body as text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or_default()
    }

    /// Consumes the response, returning the raw body.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.body
    }
}
