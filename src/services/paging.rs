//! Client-side pagination.

use crate::error::{AppError, Result};

/// One page of a listing.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    /// Items on this page
    pub items: &'a [T],
    /// Zero-based page index
    pub index: usize,
    /// Total number of pages in the listing
    pub total_pages: usize,
}

impl<T> Page<'_, T> {
    /// One-based page number for display.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn has_prev(&self) -> bool {
        self.index > 0 && self.total_pages > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.total_pages
    }
}

/// Number of pages needed for `len` items.
pub fn page_count(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

/// Split `items` into consecutive pages of `page_size`.
///
/// The last page holds the remainder. An empty listing has no pages.
pub fn paginate<T>(items: &[T], page_size: usize) -> Result<Vec<&[T]>> {
    check_page_size(page_size)?;
    Ok(items.chunks(page_size).collect())
}

/// Page `index` (zero-based) of `items`.
///
/// An index past the end yields an empty page rather than an error.
pub fn page<T>(items: &[T], index: usize, page_size: usize) -> Result<Page<'_, T>> {
    check_page_size(page_size)?;

    let start = index.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Ok(Page {
        items: &items[start..end],
        index,
        total_pages: page_count(items.len(), page_size),
    })
}

/// Clamp a one-based page number into `1..=total_pages`.
pub fn clamp_page_number(number: usize, total_pages: usize) -> usize {
    number.clamp(1, total_pages.max(1))
}

fn check_page_size(page_size: usize) -> Result<()> {
    if page_size == 0 {
        return Err(AppError::validation("page size must be > 0"));
    }
    Ok(())
}
