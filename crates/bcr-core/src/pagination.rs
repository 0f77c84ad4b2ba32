//! Pagination utilities for list endpoints.
//!
//! List endpoints accept `page` and `pageSize` query parameters as raw
//! strings. The effective values are coerced to integers, falling back to
//! `page = 1` and `pageSize = 10` when absent or not a positive integer.
//! The effective page size is capped at [`MAX_PAGE_SIZE`].
//!
//! The metadata returned to clients echoes the raw query strings when they
//! were supplied, and the numeric defaults otherwise. Clients rely on this
//! asymmetry, so `page` and `pageSize` in [`PaginationMeta`] may be either a
//! JSON string or a JSON number.
//!
//! # Example
//!
//! ```ignore
//! use bcr_core::pagination::PaginationParams;
//!
//! // GET /v1/cars?page=3&pageSize=10
//! let params = PaginationParams::new(Some("3"), Some("10"));
//! assert_eq!(params.offset(), 20);
//!
//! let meta = params.meta(42);
//! // {"page":"3","pageCount":5,"pageSize":"10","count":42}
//! ```

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// A page value as reported back to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageValue {
    /// The query string value, echoed as received.
    Raw(String),
    Default(i64),
}

/// Metadata about a paginated response.
///
/// ```json
/// { "page": "2", "pageCount": 3, "pageSize": "5", "count": 15 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[schema(value_type = String, example = "1")]
    pub page: PageValue,
    pub page_count: i64,
    #[schema(value_type = String, example = "10")]
    pub page_size: PageValue,
    pub count: i64,
}

/// Raw `page` / `pageSize` query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-indexed, default: 1)
    pub page: Option<String>,
    /// Items per page (default: 10)
    pub page_size: Option<String>,
}

fn parse_positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|v| *v >= 1)
}

impl PaginationParams {
    pub fn new(page: Option<&str>, page_size: Option<&str>) -> Self {
        Self {
            page: page.map(str::to_string),
            page_size: page_size.map(str::to_string),
        }
    }

    /// Effective page number.
    #[must_use]
    pub fn page(&self) -> i64 {
        parse_positive(self.page.as_deref()).unwrap_or(DEFAULT_PAGE)
    }

    /// Effective page size, clamped to [1, 100]. Also the store `LIMIT`.
    #[must_use]
    pub fn page_size(&self) -> i64 {
        parse_positive(self.page_size.as_deref())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.page_size()
    }

    /// Number of rows to skip: `(page - 1) * pageSize`, saturating at
    /// `i64::MAX` so absurd pages just come back empty.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.page_size())
    }

    /// Builds the metadata block for a result set of `count` rows.
    #[must_use]
    pub fn meta(&self, count: i64) -> PaginationMeta {
        let page_size = self.page_size();
        let page_count = if count <= 0 {
            0
        } else {
            count / page_size + i64::from(count % page_size != 0)
        };

        PaginationMeta {
            page: self
                .page
                .clone()
                .map_or(PageValue::Default(DEFAULT_PAGE), PageValue::Raw),
            page_count,
            page_size: self
                .page_size
                .clone()
                .map_or(PageValue::Default(DEFAULT_PAGE_SIZE), PageValue::Raw),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_offset_from_page_and_size() {
        let params = PaginationParams::new(Some("3"), Some("10"));
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn test_offset_without_query_is_zero() {
        let params = PaginationParams::default();
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_offset_cases() {
        let cases = vec![
            (Some("1"), Some("10"), 0),
            (Some("2"), Some("5"), 5),
            (Some("4"), None, 30),
            (None, Some("25"), 0),
            (Some("10"), Some("1"), 9),
        ];

        for (page, size, expected) in cases {
            let params = PaginationParams::new(page, size);
            assert_eq!(params.offset(), expected, "page={page:?} size={size:?}");
        }
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let params = PaginationParams::new(Some("abc"), Some("0"));
        assert_eq!(params.page(), 1);
        assert_eq!(params.page_size(), 10);

        let params = PaginationParams::new(Some("-2"), Some(""));
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_meta_echoes_raw_values() {
        let params = PaginationParams::new(Some("2"), Some("5"));
        let meta = serde_json::to_value(params.meta(15)).unwrap();
        assert_eq!(
            meta,
            json!({ "page": "2", "pageCount": 3, "pageSize": "5", "count": 15 })
        );
    }

    #[test]
    fn test_meta_uses_numeric_defaults() {
        let meta = serde_json::to_value(PaginationParams::default().meta(20)).unwrap();
        assert_eq!(
            meta,
            json!({ "page": 1, "pageCount": 2, "pageSize": 10, "count": 20 })
        );
    }

    #[test]
    fn test_meta_page_count_rounds_up() {
        let params = PaginationParams::new(None, Some("10"));
        assert_eq!(params.meta(21).page_count, 3);
        assert_eq!(params.meta(1).page_count, 1);
        assert_eq!(params.meta(0).page_count, 0);
    }

    #[test]
    fn test_page_size_is_capped() {
        let params = PaginationParams::new(None, Some("250"));
        assert_eq!(params.page_size(), MAX_PAGE_SIZE);
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_huge_page_saturates_offset() {
        let max = i64::MAX.to_string();
        let params = PaginationParams::new(Some(&max), Some("2"));
        assert_eq!(params.offset(), i64::MAX);

        let meta = params.meta(15);
        assert_eq!(meta.page_count, 8);
        assert_eq!(meta.page, PageValue::Raw(max));
    }

    #[test]
    fn test_huge_page_size_does_not_overflow() {
        let max = i64::MAX.to_string();
        let params = PaginationParams::new(Some("1"), Some(&max));
        assert_eq!(params.offset(), 0);

        let meta = params.meta(15);
        assert_eq!(meta.page_count, 1);
        assert_eq!(meta.page_size, PageValue::Raw(max.clone()));

        let params = PaginationParams::new(Some(&max), Some(&max));
        assert_eq!(params.offset(), i64::MAX);
        assert_eq!(params.meta(i64::MAX).page_count, i64::MAX / 100 + i64::from(i64::MAX % 100 != 0));
    }

    #[test]
    fn test_deserialize_camel_case() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"page":"4","pageSize":"20"}"#).unwrap();
        assert_eq!(params.page(), 4);
        assert_eq!(params.page_size(), 20);
        assert_eq!(params.offset(), 60);
    }
}
