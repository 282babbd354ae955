//! Benchmark utilities for awis.

use chrono::{Days, NaiveDate};

/// Response namespace used by generated payloads.
pub const NAMESPACE: &str = "http://awis.amazonaws.com/doc/2005-07-11";

/// Builds a traffic history response with one record per day from `start`.
#[must_use]
pub fn history_payload(start: NaiveDate, days: u32) -> String {
    let data: String = (0..u64::from(days))
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .enumerate()
        .map(|(i, day)| {
            format!(
                "<aws:Data><aws:Date>{}</aws:Date><aws:PageViews><aws:PerMillion>{}</aws:PerMillion>\
                 <aws:PerUser>{:.2}</aws:PerUser></aws:PageViews><aws:Rank>{}</aws:Rank>\
                 <aws:Reach><aws:PerMillion>{}</aws:PerMillion></aws:Reach></aws:Data>",
                day.format("%Y%m%d"),
                1000 + i,
                1.0 + i as f64 / 100.0,
                50 + i,
                300 + i
            )
        })
        .collect();
    format!(
        r#"<?xml version="1.0"?><aws:TrafficHistoryResponse xmlns:aws="{NAMESPACE}"><aws:Response><aws:TrafficHistoryResult><aws:Alexa><aws:TrafficHistory><aws:HistoricalData>{data}</aws:HistoricalData></aws:TrafficHistory></aws:Alexa></aws:TrafficHistoryResult></aws:Response></aws:TrafficHistoryResponse>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_payload_has_one_record_per_day() {
        let start = NaiveDate::from_ymd_opt(2020, 1, 30).unwrap();
        let payload = history_payload(start, 3);
        assert_eq!(payload.matches("<aws:Data>").count(), 3);
        assert!(payload.contains("20200201"));
    }
}
