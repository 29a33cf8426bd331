//! Page-number pagination utilities.
//!
//! The backend answers list endpoints with a `{count, next, previous, results}`
//! envelope and takes a 1-based `page` query parameter.

use serde::{Deserialize, Serialize};

/// Number of items the backend returns per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page of a paginated list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Returns true if the backend advertises a following page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            count: 0,
            next: None,
            previous: None,
            results: Vec::new(),
        }
    }
}

/// Normalizes a requested page number; pages are 1-based.
pub fn normalize_page(page: u32) -> u32 {
    page.max(1)
}

/// Slices an in-memory collection into a page envelope.
///
/// `next` and `previous` carry relative `?page=N` links, mirroring the shape
/// the backend produces.
pub fn paginate<T: Clone>(items: &[T], page: u32, page_size: usize) -> Paginated<T> {
    let page = normalize_page(page);
    let page_size = page_size.max(1);
    let start = (page as usize - 1).saturating_mul(page_size);

    let results: Vec<T> = items.iter().skip(start).take(page_size).cloned().collect();
    let has_next = start.saturating_add(page_size) < items.len();

    Paginated {
        count: items.len(),
        next: has_next.then(|| format!("?page={}", page + 1)),
        previous: (page > 1).then(|| format!("?page={}", page - 1)),
        results,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_first_page() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 1, 10);

        assert_eq!(page.count, 25);
        assert_eq!(page.results, (1..=10).collect::<Vec<_>>());
        assert_eq!(page.next.as_deref(), Some("?page=2"));
        assert!(page.previous.is_none());
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 3, 10);

        assert_eq!(page.results, vec![21, 22, 23, 24, 25]);
        assert!(!page.has_next());
        assert_eq!(page.previous.as_deref(), Some("?page=2"));
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let items = vec!["a", "b"];
        let page = paginate(&items, 5, 10);
        assert!(page.results.is_empty());
        assert_eq!(page.count, 2);
    }

    #[test]
    fn test_page_zero_treated_as_first() {
        let items = vec![1, 2, 3];
        let page = paginate(&items, 0, 2);
        assert_eq!(page.results, vec![1, 2]);
        assert!(page.previous.is_none());
    }

    #[test]
    fn test_deserialize_backend_envelope() {
        let json = r#"{
            "count": 12,
            "next": "http://localhost:8000/api/shelters/?page=2",
            "previous": null,
            "results": [1, 2, 3]
        }"#;

        let page: Paginated<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, 12);
        assert!(page.has_next());
        assert_eq!(page.results.len(), 3);
    }

    #[test]
    fn test_deserialize_missing_fields_defaults() {
        let page: Paginated<u32> = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(page, Paginated::default());
    }
}
