//! Pagination metadata and page requests.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Page size used when none is requested.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page size the API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Pagination metadata from `meta.pagination` of a list response.
///
/// # Example
///
/// ```rust
/// use scalr_api::jsonapi::Pagination;
///
/// let pagination: Pagination = serde_json::from_str(
///     r#"{"current-page": 2, "prev-page": 1, "next-page": null, "total-pages": 2, "total-count": 150}"#,
/// ).unwrap();
///
/// assert!(!pagination.has_next());
/// assert_eq!(pagination.total_count, 150);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Pagination {
    /// The page this response holds (1-based).
    #[serde(default)]
    pub current_page: u32,
    /// The previous page, if any.
    #[serde(default)]
    pub prev_page: Option<u32>,
    /// The next page, if any.
    #[serde(default)]
    pub next_page: Option<u32>,
    /// The number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// The number of items across all pages.
    #[serde(default)]
    pub total_count: u64,
}

impl Pagination {
    /// Returns `true` if another page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.next_page.is_some()
    }
}

/// Page request sent as `page[number]` and `page[size]`.
///
/// # Example
///
/// ```rust
/// use scalr_api::jsonapi::PageOptions;
///
/// let page = PageOptions::new(3, 500);
/// assert_eq!(page.size, 100);
///
/// let query = page.to_query();
/// assert_eq!(query.get("page[number]").map(String::as_str), Some("3"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PageOptions {
    /// The page to fetch (1-based).
    #[serde(rename = "page[number]")]
    pub number: u32,
    /// The number of items per page.
    #[serde(rename = "page[size]")]
    pub size: u32,
}

impl PageOptions {
    /// Creates page options, clamping the size into `1..=MAX_PAGE_SIZE` and
    /// the number to at least 1.
    #[must_use]
    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number: number.max(1),
            size: size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Returns options for the given page with the same size.
    #[must_use]
    pub fn page(self, number: u32) -> Self {
        Self::new(number, self.size)
    }

    /// Renders the options as query parameters.
    #[must_use]
    pub fn to_query(&self) -> HashMap<String, String> {
        let mut query = HashMap::with_capacity(2);
        query.insert("page[number]".to_string(), self.number.to_string());
        query.insert("page[size]".to_string(), self.size.to_string());
        query
    }
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            number: 1,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pagination_reads_kebab_case_keys() {
        let pagination: Pagination = serde_json::from_value(json!({
            "current-page": 1,
            "prev-page": null,
            "next-page": 2,
            "total-pages": 4,
            "total-count": 350
        }))
        .unwrap();

        assert_eq!(pagination.current_page, 1);
        assert!(pagination.prev_page.is_none());
        assert!(pagination.has_next());
        assert_eq!(pagination.total_pages, 4);
        assert_eq!(pagination.total_count, 350);
    }

    #[test]
    fn test_pagination_missing_keys_default() {
        let pagination: Pagination = serde_json::from_value(json!({})).unwrap();
        assert_eq!(pagination, Pagination::default());
        assert!(!pagination.has_next());
    }

    #[test]
    fn test_page_options_defaults_and_clamping() {
        assert_eq!(PageOptions::default(), PageOptions::new(1, 100));
        assert_eq!(PageOptions::new(0, 0), PageOptions { number: 1, size: 1 });
        assert_eq!(PageOptions::new(2, 1000).size, MAX_PAGE_SIZE);
        assert_eq!(PageOptions::new(1, 20).page(5), PageOptions::new(5, 20));
    }

    #[test]
    fn test_page_options_serialize_as_bracket_keys() {
        assert_eq!(
            serde_json::to_value(PageOptions::new(2, 50)).unwrap(),
            json!({"page[number]": 2, "page[size]": 50})
        );
        let query = PageOptions::new(2, 50).to_query();
        assert_eq!(query.get("page[size]"), Some(&"50".to_string()));
    }
}
