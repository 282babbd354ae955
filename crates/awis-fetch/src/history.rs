//! Traffic history result assembly.

use awis_types::{AwisError, HistoryWindow, TrafficHistoryRecord, merge_records};
use bytes::Bytes;
use tracing::warn;

use crate::{DispatchError, parse_traffic_history};

/// Records parsed from the response to one history window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowBatch {
    /// The window the request covered.
    pub window: HistoryWindow,
    /// The records returned for it, in document order.
    pub records: Vec<TrafficHistoryRecord>,
}

impl WindowBatch {
    /// Creates a new window batch.
    #[must_use]
    pub const fn new(window: HistoryWindow, records: Vec<TrafficHistoryRecord>) -> Self {
        Self { window, records }
    }

    /// Returns true if the service returned no records for the window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A history window whose request or response failed.
#[derive(Debug)]
pub struct FailedWindow {
    /// Position of the window among the planned sub-queries.
    pub index: usize,
    /// The window that could not be retrieved.
    pub window: HistoryWindow,
    /// Why it failed.
    pub error: AwisError,
}

/// Outcome of a traffic history lookup that tolerates failed windows.
#[derive(Debug, Default)]
pub struct HistoryReport {
    /// Records from every successful window, ordered by date, one per date.
    pub records: Vec<TrafficHistoryRecord>,
    /// Windows that failed, in plan order.
    pub failed: Vec<FailedWindow>,
}

impl HistoryReport {
    /// Returns true if every window was retrieved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Converts a dispatch failure into the client error for request `index`.
pub(crate) fn dispatch_error(index: usize, error: DispatchError) -> AwisError {
    match error {
        DispatchError::Deadline(limit) => AwisError::Deadline(limit),
        other => AwisError::Transport {
            index,
            message: other.to_string(),
        },
    }
}

/// Parses the response to one window.
pub(crate) fn process_outcome(
    index: usize,
    window: HistoryWindow,
    outcome: Result<Bytes, DispatchError>,
) -> Result<WindowBatch, AwisError> {
    let body = outcome.map_err(|e| dispatch_error(index, e))?;
    let records = parse_traffic_history(&body).map_err(|e| AwisError::Parse {
        index,
        message: e.to_string(),
    })?;
    Ok(WindowBatch::new(window, records))
}

/// Merges all windows, failing on the first window (by plan order) that failed.
pub(crate) fn collect_strict(
    windows: &[HistoryWindow],
    outcomes: Vec<Result<Bytes, DispatchError>>,
) -> Result<Vec<TrafficHistoryRecord>, AwisError> {
    let batches = windows
        .iter()
        .zip(outcomes)
        .enumerate()
        .map(|(index, (window, outcome))| {
            process_outcome(index, *window, outcome).map(|batch| batch.records)
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(merge_records(batches))
}

/// Merges the windows that succeeded and reports the ones that did not.
pub(crate) fn collect_resilient(
    windows: &[HistoryWindow],
    outcomes: Vec<Result<Bytes, DispatchError>>,
) -> HistoryReport {
    let mut batches = Vec::with_capacity(windows.len());
    let mut failed = Vec::new();

    for (index, (window, outcome)) in windows.iter().zip(outcomes).enumerate() {
        match process_outcome(index, *window, outcome) {
            Ok(batch) => batches.push(batch.records),
            Err(error) => {
                warn!(index, window = %window, error = %error, "skipping failed window");
                failed.push(FailedWindow {
                    index,
                    window: *window,
                    error,
                });
            }
        }
    }

    HistoryReport {
        records: merge_records(batches),
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window(day: u32, range: u32) -> HistoryWindow {
        HistoryWindow::new(NaiveDate::from_ymd_opt(2020, 1, day).unwrap(), range)
    }

    fn body(dates: &[&str]) -> Bytes {
        let data: String = dates
            .iter()
            .map(|date| {
                format!(
                    "<aws:Data><aws:Date>{date}</aws:Date><aws:PageViews><aws:PerMillion>1</aws:PerMillion>\
                     <aws:PerUser>1.0</aws:PerUser></aws:PageViews><aws:Rank>1</aws:Rank>\
                     <aws:Reach><aws:PerMillion>1</aws:PerMillion></aws:Reach></aws:Data>"
                )
            })
            .collect();
        Bytes::from(format!(
            r#"<aws:Response xmlns:aws="{}">{data}</aws:Response>"#,
            crate::AWIS_NAMESPACE
        ))
    }

    fn server_error() -> DispatchError {
        DispatchError::Status {
            status: 500,
            body: "boom".to_string(),
        }
    }

    #[test]
    fn test_window_batch() {
        let batch = WindowBatch::new(window(1, 2), Vec::new());
        assert!(batch.is_empty());
    }

    #[test]
    fn test_strict_merges_in_date_order() {
        let windows = [window(1, 2), window(3, 2)];
        let outcomes = vec![
            Ok(body(&["20200102", "20200101"])),
            Ok(body(&["20200104", "20200103"])),
        ];

        let records = collect_strict(&windows, outcomes).unwrap();
        let dates: Vec<_> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, ["20200101", "20200102", "20200103", "20200104"]);
    }

    #[test]
    fn test_strict_reports_failed_index() {
        let windows = [window(1, 2), window(3, 2)];
        let outcomes = vec![Ok(body(&["20200101"])), Err(server_error())];

        let result = collect_strict(&windows, outcomes);
        assert!(matches!(result, Err(AwisError::Transport { index: 1, .. })));
    }

    #[test]
    fn test_strict_reports_parse_index() {
        let windows = [window(1, 2), window(3, 2)];
        let outcomes = vec![Ok(Bytes::from_static(b"<oops/>")), Ok(body(&[]))];

        let result = collect_strict(&windows, outcomes);
        assert!(matches!(result, Err(AwisError::Parse { index: 0, .. })));
    }

    #[test]
    fn test_resilient_keeps_good_windows() {
        let windows = [window(1, 2), window(3, 2), window(5, 2)];
        let outcomes = vec![
            Ok(body(&["20200101", "20200102"])),
            Err(server_error()),
            Ok(body(&["20200105"])),
        ];

        let report = collect_resilient(&windows, outcomes);
        assert!(!report.is_complete());
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].index, 1);
        assert_eq!(report.failed[0].window, window(3, 2));
    }

    #[test]
    fn test_deadline_is_not_a_transport_error() {
        let error = dispatch_error(3, DispatchError::Deadline(std::time::Duration::from_secs(1)));
        assert!(matches!(error, AwisError::Deadline(_)));
    }
}
