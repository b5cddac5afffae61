// src/pipeline/list.rs

//! Listing pipeline: fetch, filter, paginate, localize.

use std::collections::BTreeSet;

use crate::error::Result;
use crate::locale::Locale;
use crate::models::{Endpoint, FetchOutcome, ListingConfig, Record};
use crate::services::filter::sort_by_date_desc;
use crate::services::paging::{clamp_page_number, page, page_count};
use crate::services::text::{excerpt, format_date, plain_text};
use crate::services::{CategoryFilter, LocalizedFieldResolver, filter_records, split_pinned};
use crate::sources::{ContentSource, fetch};
use crate::utils::log;

/// Keys that may carry a record's publication date, in priority order.
const DATE_KEYS: [&str; 4] = ["date", "published_at", "created_at", "start_date"];

/// Families whose text is long enough to need an excerpt.
const LONG_FIELDS: [&str; 4] = ["description", "summary", "content", "body"];

/// What to list.
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub endpoint: Endpoint,
    pub locale: Locale,
    pub category: CategoryFilter,
    /// One-based page number; out-of-range values are clamped
    pub page: usize,
}

impl ListRequest {
    pub fn new(endpoint: Endpoint, locale: Locale) -> Self {
        Self {
            endpoint,
            locale,
            category: CategoryFilter::All,
            page: 1,
        }
    }
}

/// One listing row, already resolved for the active locale.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    /// `(field, text)` pairs in display order
    pub fields: Vec<(String, String)>,
}

impl ListEntry {
    /// First non-empty field, used as the row heading.
    pub fn heading(&self) -> &str {
        self.fields
            .iter()
            .map(|(_, text)| text.as_str())
            .find(|text| !text.is_empty())
            .unwrap_or("")
    }
}

/// Result of a listing run.
#[derive(Debug, Clone)]
pub struct ListReport {
    pub endpoint: Endpoint,
    pub locale: Locale,
    /// `loaded`, `empty` or `failed`
    pub status: &'static str,
    pub failure: Option<String>,
    /// Records matching the category filter, matching pinned ones included
    pub matched: usize,
    pub categories: BTreeSet<String>,
    pub pinned: Vec<ListEntry>,
    pub entries: Vec<ListEntry>,
    pub page_number: usize,
    pub total_pages: usize,
}

/// Fetch and shape one page of a listing.
pub async fn build_list(
    source: &dyn ContentSource,
    resolver: &LocalizedFieldResolver,
    listing: &ListingConfig,
    request: &ListRequest,
) -> Result<ListReport> {
    let endpoint = request.endpoint;
    let outcome = fetch(source, endpoint, request.locale).await;

    let mut report = ListReport {
        endpoint,
        locale: request.locale,
        status: outcome.label(),
        failure: None,
        matched: 0,
        categories: BTreeSet::new(),
        pinned: Vec::new(),
        entries: Vec::new(),
        page_number: 1,
        total_pages: 0,
    };

    let mut records = match outcome {
        FetchOutcome::Loaded(records) => records,
        FetchOutcome::Empty => return Ok(report),
        FetchOutcome::Failed { reason } => {
            report.failure = Some(reason);
            return Ok(report);
        }
    };

    let category_key = endpoint.category_key();
    report.categories = records
        .iter()
        .filter_map(|r| r.get_str(category_key))
        .filter(|c| !c.is_empty())
        .map(str::to_owned)
        .collect();

    if let Some(date_key) = date_key(&records) {
        sort_by_date_desc(&mut records, date_key);
    }

    let filtered = filter_records(&records, category_key, &request.category);
    report.matched = filtered.len();
    let (pinned, regular) = if endpoint.has_pinned() {
        split_pinned(&records, &filtered)
    } else {
        (Vec::new(), filtered)
    };
    let shape = |record: &Record| to_entry(resolver, listing, endpoint, record, request.locale);

    let total_pages = page_count(regular.len(), listing.page_size);
    let number = clamp_page_number(request.page, total_pages);
    let current = page(&regular, number - 1, listing.page_size)?;

    report.page_number = current.number();
    report.total_pages = current.total_pages;
    report.entries = current.items.iter().map(&shape).collect();
    if report.page_number == 1 && !pinned.is_empty() {
        report.pinned = pinned.iter().map(&shape).collect();
        report.total_pages = report.total_pages.max(1);
    }
    Ok(report)
}

/// Print a listing report to the console.
pub fn print_list(report: &ListReport) {
    log::header(&format!("{} [{}]", report.endpoint, report.locale));

    if let Some(reason) = &report.failure {
        log::error(&format!("Could not load {}: {}", report.endpoint, reason));
        return;
    }
    if report.matched == 0 && report.pinned.is_empty() {
        log::info("Nothing published.");
        return;
    }

    if !report.categories.is_empty() {
        let categories: Vec<&str> = report.categories.iter().map(String::as_str).collect();
        log::info(&format!("Categories: {}", categories.join(", ")));
    }

    for entry in &report.pinned {
        print_entry("*", entry);
    }
    for (offset, entry) in report.entries.iter().enumerate() {
        print_entry(&format!("{}.", offset + 1), entry);
    }

    log::separator();
    log::info(&format!(
        "Page {}/{} · {} matching",
        report.page_number, report.total_pages, report.matched
    ));
}

fn print_entry(marker: &str, entry: &ListEntry) {
    let id = entry.id.as_deref().unwrap_or("-");
    log::info(&format!("{marker} [{id}] {}", entry.heading()));
    if let Some(date) = &entry.date {
        log::sub_item(date);
    }
    for (_, text) in entry.fields.iter().skip(1) {
        if !text.is_empty() {
            log::sub_item(text);
        }
    }
}

fn date_key(records: &[Record]) -> Option<&'static str> {
    DATE_KEYS
        .into_iter()
        .find(|key| records.iter().any(|r| r.get_str(key).is_some()))
}

fn to_entry(
    resolver: &LocalizedFieldResolver,
    listing: &ListingConfig,
    endpoint: Endpoint,
    record: &Record,
    locale: Locale,
) -> ListEntry {
    let fields = endpoint
        .display_fields()
        .iter()
        .map(|&field| {
            let text = if field == "full_name" {
                resolver.full_name(record, locale)
            } else {
                resolver.resolve(record, field, locale)
            };
            let text = if LONG_FIELDS.contains(&field) {
                excerpt(&plain_text(&text), listing.excerpt_length)
            } else {
                text
            };
            (field.to_string(), text)
        })
        .collect();

    ListEntry {
        id: record.id(),
        category: record.get_str(endpoint.category_key()).map(str::to_owned),
        date: DATE_KEYS
            .iter()
            .find_map(|key| record.get_str(key))
            .map(|raw| format_date(raw, locale)),
        fields,
    }
}
