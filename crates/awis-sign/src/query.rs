//! Canonical query strings.

use std::collections::BTreeMap;

use awis_types::{HistoryWindow, ResponseGroup};

/// Query parameters in canonical form.
///
/// Parameters are kept sorted by name and rendered with every byte outside the
/// unreserved set (`A-Z a-z 0-9 - . _ ~`) percent-encoded, so the string that
/// is hashed for the signature is exactly the string that is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalQuery {
    params: BTreeMap<String, String>,
}

impl CanonicalQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any previous value of the same name.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Builds the query for a URL-info lookup.
    #[must_use]
    pub fn url_info(url: &str, groups: &[ResponseGroup]) -> Self {
        Self::new()
            .param("Action", "urlInfo")
            .param("ResponseGroup", ResponseGroup::join(groups))
            .param("Url", url)
    }

    /// Builds the query for one traffic history window.
    #[must_use]
    pub fn traffic_history(url: &str, window: &HistoryWindow) -> Self {
        Self::new()
            .param("Action", "TrafficHistory")
            .param("Range", window.range.to_string())
            .param("ResponseGroup", "History")
            .param("Start", window.start_stamp())
            .param("Url", url)
    }

    /// Returns the raw (unencoded) value of a parameter.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Renders the encoded `name=value&...` string.
    #[must_use]
    pub fn render(&self) -> String {
        self.params
            .iter()
            .map(|(name, value)| {
                format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(value)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl std::fmt::Display for CanonicalQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
