//! View state of a list page and its URL query-string mirror.
//!
//! The query string uses the same keys as the REST API (`page`, `limit`,
//! `search`, filter keys), so a bookmarked URL reproduces the request.

use contracts::shared::pagination::PageDescriptor;
use std::collections::BTreeMap;

/// Parameters sent to `GET /{resource}`; sorted, hence canonical
pub type ListParams = BTreeMap<String, String>;

pub const PAGE_PARAM: &str = "page";
pub const LIMIT_PARAM: &str = "limit";
pub const SEARCH_PARAM: &str = "search";
pub const STATUS_PARAM: &str = "status";

/// Page-specific knobs for reading state back from a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListStateSpec {
    pub default_page_size: u32,
    /// Query keys treated as categorical filters; anything else is ignored
    pub filter_keys: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQueryState {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub filters: BTreeMap<String, String>,
}

impl ListQueryState {
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            search: String::new(),
            filters: BTreeMap::new(),
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self.page = 1;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into().trim().to_string();
        self.page = 1;
        self
    }

    /// Set or clear (`None` / blank) a categorical filter
    pub fn with_filter(mut self, key: &str, value: Option<String>) -> Self {
        match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
            Some(v) => {
                self.filters.insert(key.to_string(), v);
            }
            None => {
                self.filters.remove(key);
            }
        }
        self.page = 1;
        self
    }

    /// Last valid page when the current one lies past the end of a
    /// collection of `total_items`; `None` when the page is in range.
    pub fn page_past_end(&self, total_items: u64) -> Option<u32> {
        let last = PageDescriptor::new(self.page, self.page_size, total_items).current_page;
        (last != self.page).then_some(last)
    }

    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    pub fn to_params(&self) -> ListParams {
        let mut params = ListParams::new();
        params.insert(PAGE_PARAM.to_string(), self.page.to_string());
        params.insert(LIMIT_PARAM.to_string(), self.page_size.to_string());
        if !self.search.is_empty() {
            params.insert(SEARCH_PARAM.to_string(), self.search.clone());
        }
        for (key, value) in &self.filters {
            params.insert(key.clone(), value.clone());
        }
        params
    }

    /// Query string for the browser URL (without the leading `?`)
    pub fn to_query_string(&self) -> String {
        serde_qs::to_string(&self.to_params()).unwrap_or_default()
    }

    /// Rebuild state from `location.search`; malformed values fall back to defaults
    pub fn from_query_string(search: &str, spec: &ListStateSpec) -> Self {
        let raw: BTreeMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();

        let mut state = Self::new(spec.default_page_size);
        if let Some(size) = raw.get(LIMIT_PARAM).and_then(|v| v.parse::<u32>().ok()) {
            state.page_size = size.max(1);
        }
        if let Some(search) = raw.get(SEARCH_PARAM) {
            state.search = search.trim().to_string();
        }
        for key in spec.filter_keys {
            if let Some(value) = raw.get(*key).filter(|v| !v.trim().is_empty()) {
                state.filters.insert((*key).to_string(), value.trim().to_string());
            }
        }
        state.page = raw
            .get(PAGE_PARAM)
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(1)
            .max(1);
        state
    }
}

/// Deterministic `k=v&k=v` rendering of params, used inside cache keys
pub fn canonical_params(params: &ListParams) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: ListStateSpec = ListStateSpec {
        default_page_size: 10,
        filter_keys: &[STATUS_PARAM, "orgType"],
    };

    #[test]
    fn test_any_filter_or_search_change_resets_page() {
        let moved = ListQueryState::new(10).with_page(7);
        assert_eq!(moved.clone().with_search("valve").page, 1);
        assert_eq!(
            moved.clone().with_filter(STATUS_PARAM, Some("active".into())).page,
            1
        );
        assert_eq!(moved.clone().with_filter(STATUS_PARAM, None).page, 1);
        assert_eq!(moved.clone().with_page_size(50).page, 1);

        let mut state = ListQueryState::new(10);
        let changes: [fn(ListQueryState) -> ListQueryState; 4] = [
            |s| s.with_search("pump"),
            |s| s.with_filter(STATUS_PARAM, Some("open".into())),
            |s| s.with_search(""),
            |s| s.with_filter("orgType", Some("vendor".into())),
        ];
        for (i, change) in changes.iter().enumerate() {
            state = state.with_page(i as u32 + 3);
            state = change(state);
            assert_eq!(state.page, 1);
        }
    }

    #[test]
    fn test_page_past_the_end_moves_to_last_page() {
        let state = ListQueryState::from_query_string("page=9&limit=10", &SPEC);
        assert_eq!(state.to_params()["page"], "9");
        assert_eq!(state.page_past_end(35), Some(4));
        assert_eq!(state.clone().with_page(4).page_past_end(35), None);

        // last row of the last page deleted
        let last = ListQueryState::new(10).with_page(4);
        assert_eq!(last.page_past_end(31), None);
        assert_eq!(last.page_past_end(30), Some(3));
        assert_eq!(last.page_past_end(0), Some(1));
        assert_eq!(ListQueryState::new(10).page_past_end(0), None);
    }

    #[test]
    fn test_blank_filter_is_removed() {
        let state = ListQueryState::new(10)
            .with_filter(STATUS_PARAM, Some("active".into()))
            .with_filter(STATUS_PARAM, Some("  ".into()));
        assert_eq!(state.filter(STATUS_PARAM), None);
    }

    #[test]
    fn test_params_use_api_keys() {
        let state = ListQueryState::new(25)
            .with_search("gasket")
            .with_filter(STATUS_PARAM, Some("open".into()))
            .with_page(3);
        let params = state.to_params();
        assert_eq!(params.get("page").map(String::as_str), Some("3"));
        assert_eq!(params.get("limit").map(String::as_str), Some("25"));
        assert_eq!(params.get("search").map(String::as_str), Some("gasket"));
        assert_eq!(params.get("status").map(String::as_str), Some("open"));
        assert!(!ListQueryState::new(25).to_params().contains_key("search"));
    }

    #[test]
    fn test_query_string_restores_state() {
        let state = ListQueryState::new(25)
            .with_search("fuel pump")
            .with_filter("orgType", Some("vendor".into()))
            .with_page(4);
        let restored = ListQueryState::from_query_string(&state.to_query_string(), &SPEC);
        assert_eq!(restored, state);
    }

    #[test]
    fn test_from_query_string_ignores_garbage() {
        let state =
            ListQueryState::from_query_string("?page=zero&limit=0&color=red&status=", &SPEC);
        assert_eq!(state.page, 1);
        assert_eq!(state.page_size, 1);
        assert!(state.filters.is_empty());

        let empty = ListQueryState::from_query_string("", &SPEC);
        assert_eq!(empty, ListQueryState::new(10));
    }

    #[test]
    fn test_canonical_params_is_order_independent() {
        let mut a = ListParams::new();
        a.insert("search".into(), "a b".into());
        a.insert("page".into(), "1".into());
        let mut b = ListParams::new();
        b.insert("page".into(), "1".into());
        b.insert("search".into(), "a b".into());
        assert_eq!(canonical_params(&a), canonical_params(&b));
        assert_eq!(canonical_params(&a), "page=1&search=a%20b");
    }
}
