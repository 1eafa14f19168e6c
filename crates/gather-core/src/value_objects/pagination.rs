//! Page/pageSize arithmetic for administrative listings

use serde::{Deserialize, Serialize};

/// A requested page of an ordered listing
///
/// `page_size == -1` requests every row in a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    pub const DEFAULT_PAGE: i64 = 1;
    pub const DEFAULT_PAGE_SIZE: i64 = 10;
    pub const MAX_PAGE_SIZE: i64 = 100;
    pub const ALL: i64 = -1;
    /// Highest page whose offset still fits in an `i64`
    pub const MAX_PAGE: i64 = i64::MAX / Self::MAX_PAGE_SIZE;

    /// Build a page request, clamping out-of-range values
    pub fn new(page: i64, page_size: i64) -> Self {
        let page = page.clamp(1, Self::MAX_PAGE);
        let page_size = if page_size == Self::ALL {
            Self::ALL
        } else {
            page_size.clamp(1, Self::MAX_PAGE_SIZE)
        };
        Self { page, page_size }
    }

    /// Request every row
    pub fn all() -> Self {
        Self {
            page: 1,
            page_size: Self::ALL,
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn is_all(&self) -> bool {
        self.page_size == Self::ALL
    }

    /// SQL `LIMIT`; `None` means unbounded
    pub fn limit(&self) -> Option<i64> {
        (!self.is_all()).then_some(self.page_size)
    }

    /// SQL `OFFSET`
    pub fn offset(&self) -> i64 {
        if self.is_all() {
            0
        } else {
            (self.page - 1).saturating_mul(self.page_size)
        }
    }

    /// Apply this request to an already-ordered in-memory list
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let iter = items.iter().skip(start).cloned();
        match self.limit() {
            Some(limit) => iter.take(usize::try_from(limit).unwrap_or(0)).collect(),
            None => iter.collect(),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_PAGE_SIZE)
    }
}

/// One page of results together with the unpaginated total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64) -> Self {
        Self { items, total }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
