//! Paged collection domain model.
//!
//! One `PageState` exists per list view. The fetcher in the application layer
//! owns it and keeps it consistent with the `(page, filter)` the view asked
//! for; this module holds the pure state and page arithmetic.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Items fetched per page. Every list view in the platform uses the same size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Optional filter forwarded verbatim as query parameters.
///
/// Canonical keys are `author_id`, `realm_id`, `category` and `tag`, but the
/// map is opaque to this layer and any key the API understands is passed
/// through unchanged.
pub type PageFilter = BTreeMap<String, String>;

/// Query parameters for one paged list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// Maximum number of items to return.
    pub take: u32,
    /// Number of items to skip from the start of the result set. Wide enough
    /// that the largest page number cannot overflow it.
    pub offset: u64,
    /// Additional filter parameters, forwarded verbatim.
    pub filter: PageFilter,
}

impl PageQuery {
    /// Builds the query for a 1-based page number.
    pub fn for_page(page: u32, page_size: u32, filter: PageFilter) -> Self {
        Self {
            take: page_size,
            offset: u64::from(page.saturating_sub(1)) * u64::from(page_size),
            filter,
        }
    }

    /// Flattens the query into `(key, value)` pairs for the request builder.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("take".to_string(), self.take.to_string()),
            ("offset".to_string(), self.offset.to_string()),
        ];
        for (key, value) in &self.filter {
            params.push((key.clone(), value.clone()));
        }
        params
    }
}

/// Response body of a paged list endpoint: `{ "data": [...], "count": n }`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PagedResponse {
    /// One page of opaque records.
    pub data: Vec<serde_json::Value>,
    /// Total items matching the filter, independent of page size.
    pub count: u64,
}

/// State of one paged list view.
///
/// Invariants maintained by the owning fetcher:
/// - `page >= 1`
/// - `items.len() <= page_size`
/// - `items`/`total_count` are only replaced together, never partially.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageState {
    /// Current page of opaque records.
    pub items: Vec<serde_json::Value>,
    /// Total items matching the current filter.
    pub total_count: u64,
    /// Current page number, 1-based.
    pub page: u32,
    /// Fixed page size.
    pub page_size: u32,
    /// Current filter, forwarded verbatim on every fetch.
    pub filter: PageFilter,
    /// True while a fetch is outstanding.
    pub loading: bool,
    /// Last fetch error (response body text), cleared on success.
    pub error: Option<String>,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            filter: PageFilter::new(),
            loading: false,
            error: None,
        }
    }
}

impl PageState {
    /// Creates the initial state for a list view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of pages for the current `total_count` (computed, not
    /// stored).
    pub fn page_count(&self) -> u32 {
        self.total_count.div_ceil(u64::from(self.page_size)) as u32
    }

    /// Whether a "previous page" control should be enabled.
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Whether a "next page" control should be enabled.
    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// The query matching the current `(page, filter)`.
    pub fn query(&self) -> PageQuery {
        PageQuery::for_page(self.page, self.page_size, self.filter.clone())
    }

    /// Replaces `items` and `total_count` from a successful fetch.
    ///
    /// The two fields are replaced together so observers never see a page of
    /// items paired with a stale count. Clears any previous error.
    pub fn apply(&mut self, response: PagedResponse) {
        self.items = response.data;
        self.total_count = response.count;
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_count_rounds_up() {
        let mut state = PageState::new();
        state.total_count = 25;
        assert_eq!(state.page_count(), 3);
        state.total_count = 30;
        assert_eq!(state.page_count(), 3);
        state.total_count = 0;
        assert_eq!(state.page_count(), 0);
    }

    #[test]
    fn test_navigation_bounds() {
        let mut state = PageState::new();
        state.total_count = 25;

        state.page = 1;
        assert!(!state.has_previous());
        assert!(state.has_next());

        state.page = 3;
        assert!(state.has_previous());
        assert!(!state.has_next());
    }

    #[test]
    fn test_query_offset_is_zero_based() {
        let query = PageQuery::for_page(1, 10, PageFilter::new());
        assert_eq!(query.offset, 0);
        let query = PageQuery::for_page(3, 10, PageFilter::new());
        assert_eq!(query.offset, 20);
    }

    #[test]
    fn test_query_offset_for_largest_page_does_not_overflow() {
        let query = PageQuery::for_page(u32::MAX, 10, PageFilter::new());
        assert_eq!(query.offset, (u64::from(u32::MAX) - 1) * 10);
    }

    #[test]
    fn test_query_params_include_filter() {
        let mut filter = PageFilter::new();
        filter.insert("realm_id".to_string(), "7".to_string());
        let params = PageQuery::for_page(2, 10, filter).to_params();
        assert!(params.contains(&("take".to_string(), "10".to_string())));
        assert!(params.contains(&("offset".to_string(), "10".to_string())));
        assert!(params.contains(&("realm_id".to_string(), "7".to_string())));
    }

    #[test]
    fn test_apply_replaces_items_and_count_together() {
        let mut state = PageState::new();
        state.error = Some("stale error".to_string());
        state.apply(PagedResponse {
            data: vec![json!({ "id": 1 }), json!({ "id": 2 })],
            count: 12,
        });
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.total_count, 12);
        assert!(state.error.is_none());
    }
}
