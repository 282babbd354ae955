//! Traffic history record representation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::DATE_STAMP_FORMAT;

/// Traffic statistics for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficHistoryRecord {
    /// Day the statistics refer to, as returned by the service (`YYYYMMDD`).
    pub date: String,
    /// Page views per million page views across all sites.
    pub page_views_per_million: u64,
    /// Average page views per visiting user.
    pub page_views_per_user: f64,
    /// Traffic rank of the site on this day.
    pub rank: u64,
    /// Visitors per million users.
    pub reach_per_million: u64,
}

impl TrafficHistoryRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        date: impl Into<String>,
        page_views_per_million: u64,
        page_views_per_user: f64,
        rank: u64,
        reach_per_million: u64,
    ) -> Self {
        Self {
            date: date.into(),
            page_views_per_million,
            page_views_per_user,
            rank,
            reach_per_million,
        }
    }

    /// Returns the record date as a calendar date.
    ///
    /// Accepts both `YYYYMMDD` and `YYYY-MM-DD`; returns `None` for anything else.
    #[must_use]
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, DATE_STAMP_FORMAT)
            .or_else(|_| NaiveDate::parse_from_str(&self.date, "%Y-%m-%d"))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_day_compact() {
        let record = TrafficHistoryRecord::new("20200101", 1000, 2.5, 500, 900);
        assert_eq!(record.day(), NaiveDate::from_ymd_opt(2020, 1, 1));
    }

    #[test]
    fn test_record_day_dashed() {
        let record = TrafficHistoryRecord::new("2020-02-29", 1, 1.0, 1, 1);
        assert_eq!(record.day(), NaiveDate::from_ymd_opt(2020, 2, 29));
    }

    #[test]
    fn test_record_day_invalid() {
        let record = TrafficHistoryRecord::new("yesterday", 1, 1.0, 1, 1);
        assert!(record.day().is_none());
    }

    #[test]
    fn test_record_serializes_field_names() {
        let record = TrafficHistoryRecord::new("20200101", 1000, 2.5, 500, 900);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "20200101");
        assert_eq!(json["rank"], 500);
        assert_eq!(json["reach_per_million"], 900);
    }
}
