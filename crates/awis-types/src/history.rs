//! Traffic history planning and result merging.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};

use crate::{SearchRangeError, TrafficHistoryRecord};

/// Largest span, in days, the service returns for a single request.
pub const MAX_SEARCH_RANGE: u32 = 31;

/// Span used when the caller does not ask for one.
pub const DEFAULT_SEARCH_RANGE: u32 = MAX_SEARCH_RANGE;

/// Date format of the `Start` parameter and of returned record dates.
pub const DATE_STAMP_FORMAT: &str = "%Y%m%d";

/// A traffic history request before it is split into sub-queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryQuery {
    /// Site to look up.
    pub url: String,
    /// Number of days to cover.
    pub search_range: u32,
    /// First day to cover. Defaults to `search_range` days before today.
    pub start_date: Option<NaiveDate>,
    /// Shift the window a further `search_range` days into the past.
    pub search_reverse: bool,
}

impl HistoryQuery {
    /// Creates a query for the last [`DEFAULT_SEARCH_RANGE`] days of `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            search_range: DEFAULT_SEARCH_RANGE,
            start_date: None,
            search_reverse: false,
        }
    }

    /// Sets the number of days to cover.
    #[must_use]
    pub const fn with_range(mut self, days: u32) -> Self {
        self.search_range = days;
        self
    }

    /// Sets an explicit first day.
    #[must_use]
    pub const fn starting(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Searches backwards from the start date instead of forwards.
    #[must_use]
    pub const fn reversed(mut self, reverse: bool) -> Self {
        self.search_reverse = reverse;
        self
    }

    /// Splits the query into contiguous windows of at most [`MAX_SEARCH_RANGE`] days.
    ///
    /// `today` is the first date the service has no data for; the last covered
    /// day must fall strictly before it.
    ///
    /// # Errors
    ///
    /// Returns an error if the range is shorter than one day or the covered span
    /// reaches `today` or later.
    pub fn plan(&self, today: NaiveDate) -> Result<Vec<HistoryWindow>, SearchRangeError> {
        if self.search_range < 1 {
            return Err(SearchRangeError::TooShort(self.search_range));
        }
        let range = u64::from(self.search_range);

        let mut start = match self.start_date {
            Some(date) => date,
            None => today
                .checked_sub_days(Days::new(range))
                .ok_or(SearchRangeError::OutOfRange(today))?,
        };
        if self.search_reverse {
            start = start
                .checked_sub_days(Days::new(range))
                .ok_or(SearchRangeError::OutOfRange(start))?;
        }

        let end = start
            .checked_add_days(Days::new(range - 1))
            .ok_or(SearchRangeError::OutOfRange(start))?;
        if end >= today {
            return Err(SearchRangeError::PastToday { start, end, today });
        }

        let count = self.search_range.div_ceil(MAX_SEARCH_RANGE);
        let remainder = self.search_range % MAX_SEARCH_RANGE;

        let mut windows = Vec::with_capacity(count as usize);
        let mut cursor = start;
        for i in 0..count {
            // An exact multiple leaves no remainder; the last window is then full.
            let span = if i + 1 == count && remainder != 0 {
                remainder
            } else {
                MAX_SEARCH_RANGE
            };
            windows.push(HistoryWindow::new(cursor, span));
            cursor = cursor
                .checked_add_days(Days::new(u64::from(span)))
                .ok_or(SearchRangeError::OutOfRange(cursor))?;
        }
        Ok(windows)
    }
}

/// One sub-query: `range` consecutive days starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HistoryWindow {
    /// First day (inclusive).
    pub start: NaiveDate,
    /// Number of days covered.
    pub range: u32,
}

impl HistoryWindow {
    /// Creates a new window.
    #[must_use]
    pub const fn new(start: NaiveDate, range: u32) -> Self {
        Self { start, range }
    }

    /// Returns the last day covered (inclusive).
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.start
            .checked_add_days(Days::new(u64::from(self.range.saturating_sub(1))))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Returns the start date in `YYYYMMDD` form.
    #[must_use]
    pub fn start_stamp(&self) -> String {
        self.start.format(DATE_STAMP_FORMAT).to_string()
    }

    /// Returns true if the window covers the given date.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end()
    }
}

impl std::fmt::Display for HistoryWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {} ({} days)", self.start, self.end(), self.range)
    }
}

/// Merges per-window results into one sequence ordered by date.
///
/// Each date appears once; a later batch overrides an earlier one for the same day.
#[must_use]
pub fn merge_records<I>(batches: I) -> Vec<TrafficHistoryRecord>
where
    I: IntoIterator<Item = Vec<TrafficHistoryRecord>>,
{
    let mut by_date = BTreeMap::new();
    for record in batches.into_iter().flatten() {
        by_date.insert(record.date.clone(), record);
    }
    by_date.into_values().collect()
}
