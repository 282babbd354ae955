//! History command implementation.

use anyhow::{Context, Result, bail};
use awis_lib::DATE_STAMP_FORMAT;
use awis_lib::prelude::*;
use chrono::{NaiveDate, Utc};
use tracing::warn;

use crate::display::{Format, write_plan, write_records};

/// Build a history query from command-line arguments.
pub(crate) fn build_query(
    url: &str,
    range: u32,
    start: Option<&str>,
    reverse: bool,
) -> Result<HistoryQuery> {
    let mut query = HistoryQuery::new(url).with_range(range).reversed(reverse);
    if let Some(start) = start {
        let date = NaiveDate::parse_from_str(start, DATE_STAMP_FORMAT)
            .with_context(|| format!("invalid start date {start:?}, expected YYYYMMDD"))?;
        query = query.starting(date);
    }
    Ok(query)
}

/// Print the sub-queries a history lookup would send.
pub(crate) fn show_plan(query: &HistoryQuery) -> Result<()> {
    let windows = query.plan(Utc::now().date_naive())?;
    println!("{} sub-queries for {}:", windows.len(), query.url);
    write_plan(&windows, std::io::stdout().lock())
}

/// Fetch traffic history and print it in the requested format.
pub(crate) async fn history(
    client: &AwisClient,
    query: &HistoryQuery,
    resilient: bool,
    format: Format,
) -> Result<()> {
    let records = if resilient {
        let report = client.traffic_history_resilient(query).await?;
        for failed in &report.failed {
            warn!(index = failed.index, window = %failed.window, error = %failed.error, "window missing from output");
        }
        if report.records.is_empty() && !report.is_complete() {
            bail!("all {} sub-queries failed", report.failed.len());
        }
        report.records
    } else {
        client.traffic_history(query).await?
    };

    write_records(&records, format, std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_defaults() {
        let query = build_query("example.com", 31, None, false).unwrap();
        assert_eq!(query.url, "example.com");
        assert_eq!(query.search_range, 31);
        assert!(query.start_date.is_none());
        assert!(!query.search_reverse);
    }

    #[test]
    fn test_build_query_with_start() {
        let query = build_query("example.com", 45, Some("20200115"), true).unwrap();
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2020, 1, 15));
        assert!(query.search_reverse);
    }

    #[test]
    fn test_build_query_rejects_bad_start() {
        assert!(build_query("example.com", 31, Some("2020-01-15"), false).is_err());
        assert!(build_query("example.com", 31, Some("20201340"), false).is_err());
    }
}
