//! High-level client for URL-info and traffic history lookups.

use awis_sign::{CanonicalQuery, RequestBuilder, ServiceDescriptor, SignedRequest};
use awis_types::{
    AwisError, Credentials, HistoryQuery, HistoryWindow, ResponseGroup, Result,
    TrafficHistoryRecord,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::history::{collect_resilient, collect_strict, dispatch_error};
use crate::{ClientConfig, DispatchError, Dispatcher, HistoryReport, UrlInfoResponse};

/// Client for the web information service.
///
/// Credentials and the service descriptor are fixed at construction. Every
/// call signs fresh requests with the current time.
#[derive(Debug, Clone)]
pub struct AwisClient {
    builder: RequestBuilder,
    dispatcher: Dispatcher,
}

impl AwisClient {
    /// Creates a client for the default region.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Self::with_service(credentials, ServiceDescriptor::default(), config)
    }

    /// Creates a client for a specific service descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_service(
        credentials: Credentials,
        service: ServiceDescriptor,
        config: ClientConfig,
    ) -> Result<Self> {
        let dispatcher = Dispatcher::new(config).map_err(|e| AwisError::Client(e.to_string()))?;
        Ok(Self {
            builder: RequestBuilder::new(credentials, service),
            dispatcher,
        })
    }

    /// Returns the service descriptor.
    #[must_use]
    pub const fn service(&self) -> &ServiceDescriptor {
        self.builder.service()
    }

    /// Returns the dispatcher configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        self.dispatcher.config()
    }

    /// Looks up URL information for `url`.
    ///
    /// Response groups are validated before any request is built.
    ///
    /// The returned payload is not parsed yet; see [`UrlInfoResponse`].
    ///
    /// # Errors
    ///
    /// Returns an error if a group name is invalid, the request fails, or the
    /// body is not well-formed XML.
    #[instrument(skip(self, groups))]
    pub async fn url_info<I, S>(&self, url: &str, groups: I) -> Result<UrlInfoResponse>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let groups = ResponseGroup::parse_set(groups)?;
        let query = CanonicalQuery::url_info(url, &groups);
        let request = self.builder.build(&query, Utc::now());

        let body = self
            .dispatcher
            .send(&request)
            .await
            .map_err(|e| dispatch_error(0, e))?;
        debug!(bytes = body.len(), "url info received");

        UrlInfoResponse::from_body(body).map_err(|e| AwisError::Parse {
            index: 0,
            message: e.to_string(),
        })
    }

    /// Splits a history query into sub-queries without sending anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is invalid or reaches today.
    pub fn plan(&self, query: &HistoryQuery) -> Result<Vec<HistoryWindow>> {
        Ok(query.plan(Utc::now().date_naive())?)
    }

    /// Retrieves the traffic history described by `query`.
    ///
    /// Spans longer than the per-request maximum are split into sub-queries,
    /// sent as one batch, and merged into a single date-ordered sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is invalid, or names the first
    /// sub-query (by plan order) whose request or response failed. A
    /// sub-query cut off by the batch deadline yields [`AwisError::Deadline`].
    #[instrument(skip(self), fields(url = %query.url, range = query.search_range))]
    pub async fn traffic_history(&self, query: &HistoryQuery) -> Result<Vec<TrafficHistoryRecord>> {
        let windows = self.plan(query)?;
        let outcomes = self.dispatch_windows(&query.url, &windows).await;
        let records = collect_strict(&windows, outcomes)?;
        info!(records = records.len(), "traffic history retrieved");
        Ok(records)
    }

    /// Retrieves the traffic history described by `query`, keeping the
    /// sub-queries that succeeded when others fail.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is invalid. Failed sub-queries, including
    /// those cut off by the batch deadline, are reported in
    /// [`HistoryReport::failed`].
    #[instrument(skip(self), fields(url = %query.url, range = query.search_range))]
    pub async fn traffic_history_resilient(&self, query: &HistoryQuery) -> Result<HistoryReport> {
        let windows = self.plan(query)?;
        let outcomes = self.dispatch_windows(&query.url, &windows).await;
        let report = collect_resilient(&windows, outcomes);
        info!(
            records = report.records.len(),
            failed = report.failed.len(),
            "traffic history retrieved"
        );
        Ok(report)
    }

    /// Builds one signed request per window, all stamped with the same instant.
    #[must_use]
    pub fn history_requests(
        &self,
        url: &str,
        windows: &[HistoryWindow],
        now: DateTime<Utc>,
    ) -> Vec<SignedRequest> {
        windows
            .iter()
            .map(|window| {
                self.builder
                    .build(&CanonicalQuery::traffic_history(url, window), now)
            })
            .collect()
    }

    async fn dispatch_windows(
        &self,
        url: &str,
        windows: &[HistoryWindow],
    ) -> Vec<std::result::Result<Bytes, DispatchError>> {
        debug!(windows = windows.len(), "dispatching history windows");
        let requests = self.history_requests(url, windows, Utc::now());
        self.dispatcher.send_all(requests).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn client() -> AwisClient {
        AwisClient::new(
            Credentials::new("AKID", "secret"),
            ClientConfig::default(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_invalid_group_rejected_before_request() {
        let result = client().url_info("example.com", ["Rank", "Bogus"]).await;
        assert!(matches!(result, Err(AwisError::InvalidResponseGroup(_))));
    }

    #[tokio::test]
    async fn test_invalid_range_rejected_before_request() {
        let query = HistoryQuery::new("example.com").with_range(0);
        let result = client().traffic_history(&query).await;
        assert!(matches!(result, Err(AwisError::InvalidSearchRange(_))));
    }

    #[test]
    fn test_plan_default_query() {
        let windows = client().plan(&HistoryQuery::new("example.com")).unwrap();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].range, 31);
    }

    #[test]
    fn test_history_requests_one_per_window() {
        let client = client();
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let windows = [HistoryWindow::new(start, 31), HistoryWindow::new(start, 14)];
        let now = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();

        let requests = client.history_requests("example.com", &windows, now);
        assert_eq!(requests.len(), 2);
        assert!(requests[0].url.contains("Range=31"));
        assert!(requests[1].url.contains("Range=14"));
        assert!(requests.iter().all(|r| r.amz_date == "20200601T000000Z"));
    }
}
