//! Pagination of ranked results.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::EngineConfig;

/// A resolved page request: 1-based page number and an effective page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl PageRequest {
    /// Resolve a requested page and page size against the engine configuration.
    ///
    /// Pages below 1 become 1. A missing or zero page size uses the default, and a
    /// page size above the configured maximum is clamped to it.
    pub fn resolve(page: usize, page_size: Option<usize>, config: &EngineConfig) -> Self {
        let page_size = match page_size {
            None | Some(0) => config.default_page_size,
            Some(size) if size > config.max_page_size => {
                warn!(
                    requested = size,
                    max = config.max_page_size,
                    "page size clamped"
                );
                config.max_page_size
            }
            Some(size) => size,
        };

        PageRequest {
            page: page.max(1),
            page_size,
        }
    }

    /// 1-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Effective page size, always at least 1.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Slice the page out of a fully ordered list.
    ///
    /// A page past the end yields an empty page that still reports the full total.
    pub fn apply<T>(&self, items: Vec<T>) -> Page<T> {
        let total = items.len();
        let items = items
            .into_iter()
            .skip(self.offset())
            .take(self.page_size)
            .collect();

        Page {
            items,
            page: self.page,
            page_size: self.page_size,
            total,
        }
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page, in rank order.
    pub items: Vec<T>,
    /// 1-based page number.
    pub page: usize,
    /// Effective page size.
    pub page_size: usize,
    /// Number of matching candidates across all pages.
    pub total: usize,
}

impl<T> Page<T> {
    /// Number of pages needed to hold `total` items.
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size.max(1))
    }

    /// Whether a later page has items.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    /// Whether this page has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items on this page.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Transform the items, keeping the page metadata.
    pub fn map_items<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
        }
    }
}
