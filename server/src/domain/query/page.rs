//! Pagination types

use serde::Serialize;

/// One-based page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub length: u32,
}

impl PageRequest {
    /// Values below one are raised to one
    pub fn new(page: u32, length: u32) -> Self {
        Self {
            page: page.max(1),
            length: length.max(1),
        }
    }

    /// Window holding exactly one row, for single-entity lookups
    pub fn single() -> Self {
        Self { page: 1, length: 1 }
    }

    /// Cap the length at `max`
    pub fn clamp(self, max: u32) -> Self {
        Self {
            page: self.page,
            length: self.length.min(max.max(1)),
        }
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.length)
    }

    /// Slice an in-memory list. Used where rows are already materialised,
    /// such as a computed snapshot diff.
    pub fn paginate<T>(&self, items: Vec<T>) -> PageResult<T> {
        let total_count = items.len() as u64;
        let items = usize::try_from(self.offset())
            .map(|skip| {
                items
                    .into_iter()
                    .skip(skip)
                    .take(self.length as usize)
                    .collect()
            })
            .unwrap_or_default();
        PageResult { total_count, items }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            length: 100,
        }
    }
}

/// A page of items with the total number of matches across all pages
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult<T> {
    pub total_count: u64,
    pub items: Vec<T>,
}

impl<T> PageResult<T> {
    pub fn empty() -> Self {
        Self {
            total_count: 0,
            items: Vec::new(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResult<U> {
        PageResult {
            total_count: self.total_count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_raises_zero_to_one() {
        assert_eq!(PageRequest::new(0, 0), PageRequest { page: 1, length: 1 });
    }

    #[test]
    fn test_clamp() {
        assert_eq!(PageRequest::new(2, 5000).clamp(1000).length, 1000);
        assert_eq!(PageRequest::new(2, 50).clamp(1000).length, 50);
        assert_eq!(PageRequest::new(2, 5000).clamp(1000).page, 2);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 100).offset(), 0);
        assert_eq!(PageRequest::new(3, 25).offset(), 50);
        assert_eq!(
            PageRequest::new(u32::MAX, u32::MAX).offset(),
            u64::from(u32::MAX - 1) * u64::from(u32::MAX)
        );
    }

    #[test]
    fn test_paginate_in_memory() {
        let items: Vec<u32> = (1..=7).collect();

        let page = PageRequest::new(2, 3).paginate(items.clone());
        assert_eq!(page.total_count, 7);
        assert_eq!(page.items, vec![4, 5, 6]);

        let last = PageRequest::new(3, 3).paginate(items.clone());
        assert_eq!(last.items, vec![7]);

        let past_end = PageRequest::new(9, 3).paginate(items);
        assert_eq!(past_end.total_count, 7);
        assert!(past_end.items.is_empty());
    }

    #[test]
    fn test_map_keeps_total() {
        let page = PageResult {
            total_count: 10,
            items: vec![1, 2],
        }
        .map(|v| v * 10);
        assert_eq!(page.total_count, 10);
        assert_eq!(page.items, vec![10, 20]);
    }
}
