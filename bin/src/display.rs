//! Display utilities and output formatting for the awis CLI.

use std::io::Write;

use anyhow::Result;
use awis_lib::prelude::*;
use clap::ValueEnum;

/// Output format for traffic history.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum Format {
    Table,
    Json,
    Ndjson,
}

impl Format {
    /// Returns the name of this format.
    pub(crate) const fn name(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Write traffic history records in the specified format.
pub(crate) fn write_records<W: Write>(
    records: &[TrafficHistoryRecord],
    format: Format,
    mut out: W,
) -> Result<()> {
    match format {
        Format::Table => {
            writeln!(
                out,
                "{:<12} {:>10} {:>14} {:>10} {:>12}",
                "Date", "Rank", "Views/Million", "Views/User", "Reach/Million"
            )?;
            writeln!(out, "{}", "-".repeat(62))?;
            for record in records {
                writeln!(
                    out,
                    "{:<12} {:>10} {:>14} {:>10.2} {:>12}",
                    record.date,
                    record.rank,
                    record.page_views_per_million,
                    record.page_views_per_user,
                    record.reach_per_million
                )?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, records)?;
            writeln!(out)?;
        }
        Format::Ndjson => {
            for record in records {
                serde_json::to_writer(&mut out, record)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Write the planned history windows, one per line.
pub(crate) fn write_plan<W: Write>(windows: &[HistoryWindow], mut out: W) -> Result<()> {
    for (index, window) in windows.iter().enumerate() {
        writeln!(out, "{index:>3}  {window}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn records() -> Vec<TrafficHistoryRecord> {
        vec![
            TrafficHistoryRecord::new("20200101", 1000, 2.5, 42, 300),
            TrafficHistoryRecord::new("20200102", 900, 2.0, 43, 280),
        ]
    }

    fn render(format: Format) -> String {
        let mut out = Vec::new();
        write_records(&records(), format, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_table_has_header_and_rows() {
        let table = render(Format::Table);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Date"));
        assert!(lines[2].starts_with("20200101"));
        assert!(lines[2].contains("2.50"));
    }

    #[test]
    fn test_json_is_an_array() {
        let value: serde_json::Value = serde_json::from_str(&render(Format::Json)).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[1]["rank"], 43);
    }

    #[test]
    fn test_ndjson_one_record_per_line() {
        let ndjson = render(Format::Ndjson);
        assert_eq!(ndjson.lines().count(), 2);
        for line in ndjson.lines() {
            let _: TrafficHistoryRecord = serde_json::from_str(line).unwrap();
        }
    }

    #[test]
    fn test_plan_lines() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let windows = [HistoryWindow::new(start, 31)];
        let mut out = Vec::new();
        write_plan(&windows, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "  0  2024-01-01 to 2024-01-31 (31 days)\n"
        );
    }
}
