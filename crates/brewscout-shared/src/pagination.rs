//! Pagination metadata carried out-of-band in HTTP headers.

use serde::{Deserialize, Serialize};

pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";
pub const TOTAL_PAGES_HEADER: &str = "X-Total-Pages";
pub const CURRENT_PAGE_HEADER: &str = "X-Current-Page";
pub const PAGE_SIZE_HEADER: &str = "X-Page-Size";

/// Request header naming the page the caller wants.
pub const PAGE_NUMBER_HEADER: &str = "X-Page-Number";

/// Raw pagination header values, serialized under their header names.
///
/// Values stay as strings, exactly as the gateway sent them. Use the
/// accessors for numeric views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationHeaders {
    #[serde(
        rename = "X-Total-Count",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_count: Option<String>,
    #[serde(
        rename = "X-Total-Pages",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub total_pages: Option<String>,
    #[serde(
        rename = "X-Current-Page",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub current_page: Option<String>,
    #[serde(
        rename = "X-Page-Size",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub page_size: Option<String>,
}

impl PaginationHeaders {
    /// Build from a header lookup, usually a case-insensitive map.
    pub fn from_lookup<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let grab = |name: &str| lookup(name).map(str::to_string);
        Self {
            total_count: grab(TOTAL_COUNT_HEADER),
            total_pages: grab(TOTAL_PAGES_HEADER),
            current_page: grab(CURRENT_PAGE_HEADER),
            page_size: grab(PAGE_SIZE_HEADER),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_count.is_none()
            && self.total_pages.is_none()
            && self.current_page.is_none()
            && self.page_size.is_none()
    }

    pub fn total_count(&self) -> Option<u64> {
        self.total_count.as_deref().and_then(|v| v.trim().parse().ok())
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages.as_deref().and_then(|v| v.trim().parse().ok())
    }

    pub fn current_page(&self) -> Option<u32> {
        self.current_page.as_deref().and_then(|v| v.trim().parse().ok())
    }

    pub fn page_size(&self) -> Option<u32> {
        self.page_size.as_deref().and_then(|v| v.trim().parse().ok())
    }
}

/// One page of a list endpoint together with its pagination headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: PaginationHeaders,
}

impl<T> Page<T> {
    /// True when the headers say there is a page after this one.
    pub fn has_next(&self) -> bool {
        match (self.pagination.current_page(), self.pagination.total_pages()) {
            (Some(current), Some(total)) => current < total,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_under_header_names() {
        let headers = PaginationHeaders {
            total_pages: Some("5".to_string()),
            ..Default::default()
        };

        let value = serde_json::to_value(&headers).unwrap();

        assert_eq!(value, json!({ "X-Total-Pages": "5" }));
    }

    #[test]
    fn test_from_lookup_collects_present_values() {
        let headers = PaginationHeaders::from_lookup(|name| match name {
            TOTAL_COUNT_HEADER => Some("42"),
            CURRENT_PAGE_HEADER => Some("2"),
            _ => None,
        });

        assert!(!headers.is_empty());
        assert_eq!(headers.total_count(), Some(42));
        assert_eq!(headers.current_page(), Some(2));
        assert!(headers.total_pages.is_none());
    }

    #[test]
    fn test_has_next() {
        let mut page = Page {
            items: vec![1, 2],
            pagination: PaginationHeaders {
                current_page: Some("1".to_string()),
                total_pages: Some("3".to_string()),
                ..Default::default()
            },
        };
        assert!(page.has_next());

        page.pagination.current_page = Some("3".to_string());
        assert!(!page.has_next());
    }
}
