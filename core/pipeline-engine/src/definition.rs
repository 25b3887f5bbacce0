//! FILENAME: core/pipeline-engine/src/definition.rs
//! Pipeline Definition - The filter configuration.
//!
//! This module contains the types that DESCRIBE one dashboard run.
//! These structures are designed to be:
//! - Immutable snapshots of user intent (every widget change builds a new one)
//! - Serializable (exported alongside the computed view)
//! - Cheap to clone

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::PipelineCache;

/// Bounds of the "top N" slider.
pub const TOP_N_MIN: usize = 5;
pub const TOP_N_MAX: usize = 20;
pub const DEFAULT_TOP_N: usize = 10;

/// Bounds of the recent-reviews listing length.
pub const RECENT_LIMIT_MIN: usize = 10;
pub const RECENT_LIMIT_MAX: usize = 12;
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Category selector value that disables the category filter.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("top N must be between 5 and 20, got {0}")]
    TopNOutOfRange(usize),

    #[error("recent reviews limit must be between 10 and 12, got {0}")]
    RecentLimitOutOfRange(usize),

    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

/// Parses a widget date (`YYYY-MM-DD`).
pub fn parse_date(text: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidDate(text.trim().to_string()))
}

// ============================================================================
// DATE RANGE
// ============================================================================

/// Inclusive calendar-date range.
///
/// Matching is next-day-exclusive: a timestamp matches when
/// `start 00:00:00 <= ts < (end + 1 day) 00:00:00`, so the whole of the end
/// day is included without any sub-second boundary. `start > end` matches
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ConfigError> {
        Ok(DateRange::new(parse_date(start)?, parse_date(end)?))
    }

    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    pub fn lower_bound(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// `None` when `end` is the last representable date (no upper bound).
    pub fn upper_bound_exclusive(&self) -> Option<NaiveDateTime> {
        self.end.succ_opt().map(|next| next.and_time(NaiveTime::MIN))
    }

    pub fn contains(&self, timestamp: &NaiveDateTime) -> bool {
        if self.is_empty() || *timestamp < self.lower_bound() {
            return false;
        }
        match self.upper_bound_exclusive() {
            Some(upper) => *timestamp < upper,
            None => true,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} .. {}", self.start, self.end)
    }
}

// ============================================================================
// CATEGORY FILTER
// ============================================================================

/// Single-select category control with the special value "All".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// "All" (any case) or an empty string disables the filter.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() || text.eq_ignore_ascii_case(ALL_CATEGORIES) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(text.to_string())
        }
    }

    /// Rows without a category only pass when no category is selected.
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => category == Some(selected.as_str()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(name) => name,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// FILTER CONFIG
// ============================================================================

/// The complete, immutable input of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub date_range: DateRange,
    pub category: CategoryFilter,
    /// Length of the ranked product and customer tables.
    pub top_n: usize,
    /// Toggle for the recent-reviews panel.
    pub show_recent_reviews: bool,
    pub recent_limit: usize,
}

impl FilterConfig {
    pub fn new(date_range: DateRange) -> Self {
        FilterConfig {
            date_range,
            category: CategoryFilter::All,
            top_n: DEFAULT_TOP_N,
            show_recent_reviews: true,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Widget defaults for a snapshot: the full order-date span, all categories.
    pub fn defaults_for(cache: &PipelineCache) -> Self {
        let (start, end) = cache.order_date_bounds().unwrap_or_else(|| {
            let today = Utc::now().date_naive();
            (today, today)
        });
        FilterConfig::new(DateRange::new(start, end))
    }

    pub fn with_date_range(&self, date_range: DateRange) -> Self {
        FilterConfig { date_range, ..self.clone() }
    }

    pub fn with_start(&self, start: NaiveDate) -> Self {
        self.with_date_range(DateRange::new(start, self.date_range.end))
    }

    pub fn with_end(&self, end: NaiveDate) -> Self {
        self.with_date_range(DateRange::new(self.date_range.start, end))
    }

    pub fn with_category(&self, category: CategoryFilter) -> Self {
        FilterConfig { category, ..self.clone() }
    }

    pub fn with_top_n(&self, top_n: usize) -> Self {
        FilterConfig { top_n, ..self.clone() }
    }

    pub fn with_recent_reviews(&self, show_recent_reviews: bool) -> Self {
        FilterConfig { show_recent_reviews, ..self.clone() }
    }

    pub fn with_recent_limit(&self, recent_limit: usize) -> Self {
        FilterConfig { recent_limit, ..self.clone() }
    }

    /// Checks the slider bounds. The date range and category are never invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(TOP_N_MIN..=TOP_N_MAX).contains(&self.top_n) {
            return Err(ConfigError::TopNOutOfRange(self.top_n));
        }
        if !(RECENT_LIMIT_MIN..=RECENT_LIMIT_MAX).contains(&self.recent_limit) {
            return Err(ConfigError::RecentLimitOutOfRange(self.recent_limit));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_range_includes_whole_end_day() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        let last_second = date(2024, 1, 31).and_hms_opt(23, 59, 59).unwrap();
        let last_nano = date(2024, 1, 31).and_hms_nano_opt(23, 59, 59, 999_999_999).unwrap();
        let next_day = date(2024, 2, 1).and_hms_opt(0, 0, 0).unwrap();
        let first = date(2024, 1, 1).and_hms_opt(0, 0, 0).unwrap();

        assert!(range.contains(&first));
        assert!(range.contains(&last_second));
        assert!(range.contains(&last_nano));
        assert!(!range.contains(&next_day));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let range = DateRange::new(date(2024, 2, 1), date(2024, 1, 1));
        assert!(range.is_empty());
        assert!(!range.contains(&date(2024, 1, 15).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn test_unbounded_end() {
        let range = DateRange::new(date(2024, 1, 1), NaiveDate::MAX);
        assert!(range.upper_bound_exclusive().is_none());
        assert!(range.contains(&date(9999, 1, 1).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(CategoryFilter::parse("All"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse(" books "),
            CategoryFilter::Only("books".to_string())
        );
    }

    #[test]
    fn test_category_matches() {
        let books = CategoryFilter::Only("books".to_string());
        assert!(books.matches(Some("books")));
        assert!(!books.matches(Some("toys")));
        assert!(!books.matches(None));
        assert!(CategoryFilter::All.matches(None));
    }

    #[test]
    fn test_validate_bounds() {
        let config = FilterConfig::new(DateRange::new(date(2024, 1, 1), date(2024, 12, 31)));
        assert!(config.validate().is_ok());
        assert_eq!(
            config.with_top_n(4).validate(),
            Err(ConfigError::TopNOutOfRange(4))
        );
        assert!(config.with_top_n(20).validate().is_ok());
        assert_eq!(
            config.with_recent_limit(13).validate(),
            Err(ConfigError::RecentLimitOutOfRange(13))
        );
    }

    #[test]
    fn test_with_methods_leave_original_untouched() {
        let config = FilterConfig::new(DateRange::new(date(2024, 1, 1), date(2024, 12, 31)));
        let narrowed = config
            .with_end(date(2024, 6, 30))
            .with_category(CategoryFilter::parse("toys"));

        assert_eq!(config.date_range.end, date(2024, 12, 31));
        assert!(config.category.is_all());
        assert_eq!(narrowed.date_range.end, date(2024, 6, 30));
        assert_eq!(narrowed.category.label(), "toys");
    }

    #[test]
    fn test_filter_config_json() {
        let config = FilterConfig::new(DateRange::new(date(2024, 1, 1), date(2024, 3, 31)))
            .with_category(CategoryFilter::parse("books"))
            .with_top_n(7);
        let json = serde_json::to_string(&config).unwrap();
        let back: FilterConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_parse_date_errors() {
        assert!(parse_date("2024-02-30").is_err());
        assert_eq!(parse_date(" 2024-02-29 ").unwrap(), date(2024, 2, 29));
    }
}
