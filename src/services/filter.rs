//! Category filtering for listings.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::models::Record;

/// Which category a listing is narrowed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category == Some(wanted.as_str()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.to_string()))
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

/// Keep the items whose category matches `filter`.
pub fn filter_by<T, F>(items: &[T], filter: &CategoryFilter, category: F) -> Vec<T>
where
    T: Clone,
    F: Fn(&T) -> Option<&str>,
{
    items
        .iter()
        .filter(|item| filter.matches(category(*item)))
        .cloned()
        .collect()
}

/// Keep the records whose string field `key` matches `filter`.
pub fn filter_records(records: &[Record], key: &str, filter: &CategoryFilter) -> Vec<Record> {
    filter_by(records, filter, |record| record.get_str(key))
}

/// Split a listing into pinned and regular records.
///
/// Pinned records come from the whole listing so they stay visible under
/// any filter; regular records are the filtered ones that are not pinned.
pub fn split_pinned(all: &[Record], filtered: &[Record]) -> (Vec<Record>, Vec<Record>) {
    let pinned = all.iter().filter(|r| r.flag("pinned")).cloned().collect();
    let regular = filtered
        .iter()
        .filter(|r| !r.flag("pinned"))
        .cloned()
        .collect();
    (pinned, regular)
}

/// Sort records newest first by the date in `key`.
///
/// `YYYY-MM-DD` prefixes are compared as dates; records without a parsable
/// date keep their relative order after the dated ones.
pub fn sort_by_date_desc(records: &mut [Record], key: &str) {
    records.sort_by(|a, b| match (parse_date(a, key), parse_date(b, key)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

fn parse_date(record: &Record, key: &str) -> Option<NaiveDate> {
    let raw = record.get_str(key)?;
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
