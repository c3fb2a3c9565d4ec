//! Pagination extractor for query parameters

use crate::extractors::ExtractorError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Pagination parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct Pagination {
    /// Page number (1-based)
    #[validate(range(min = 1, max = 10000))]
    pub page: Option<u32>,

    /// Number of items per page
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<u32>,

    /// Offset (alternative to page)
    #[validate(range(min = 0))]
    pub offset: Option<u32>,
}

impl Pagination {
    /// Get the effective limit (with default)
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(50).min(500)
    }

    /// Get the effective offset
    #[must_use]
    pub fn offset(&self) -> u32 {
        if let Some(offset) = self.offset {
            offset
        } else if let Some(page) = self.page {
            (page.saturating_sub(1)) * self.limit()
        } else {
            0
        }
    }

    /// Check if there's a next page
    #[must_use]
    pub fn has_next(&self, total_items: u64) -> bool {
        u64::from(self.offset()) + u64::from(self.limit()) < total_items
    }

    /// Check if there's a previous page
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.offset() > 0
    }

    /// Convert to SQL LIMIT/OFFSET values
    #[must_use]
    pub fn to_sql(&self) -> (i64, i64) {
        (i64::from(self.limit()), i64::from(self.offset()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ExtractorError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();

        let pagination: Self = serde_urlencoded::from_str(query)
            .map_err(|e| ExtractorError::bad_request(format!("Invalid pagination parameters: {e}")))?;

        if let Err(validation_errors) = pagination.validate() {
            return Err(ExtractorError::bad_request(format!(
                "Invalid pagination parameters: {validation_errors:?}"
            )));
        }

        Ok(pagination)
    }
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let pagination = Pagination::default();

        assert_eq!(pagination.limit(), 50);
        assert_eq!(pagination.offset(), 0);
        assert!(!pagination.has_prev());
    }

    #[test]
    fn test_limit_is_capped() {
        let pagination = Pagination {
            limit: Some(9999),
            ..Pagination::default()
        };

        assert_eq!(pagination.limit(), 500);
    }

    #[test]
    fn test_page_to_offset() {
        let pagination = Pagination {
            page: Some(3),
            limit: Some(20),
            offset: None,
        };

        assert_eq!(pagination.offset(), 40);
        assert!(pagination.has_prev());
    }

    #[test]
    fn test_explicit_offset_wins_over_page() {
        let pagination = Pagination {
            page: Some(5),
            limit: Some(10),
            offset: Some(7),
        };

        assert_eq!(pagination.offset(), 7);
    }

    #[test]
    fn test_has_next() {
        let pagination = Pagination {
            limit: Some(10),
            ..Pagination::default()
        };

        assert!(pagination.has_next(11));
        assert!(!pagination.has_next(10));
        assert!(!pagination.has_next(0));
    }

    #[test]
    fn test_to_sql() {
        let pagination = Pagination {
            page: Some(2),
            limit: Some(25),
            offset: None,
        };

        assert_eq!(pagination.to_sql(), (25, 25));
    }

    #[test]
    fn test_query_string_parsing() {
        let pagination: Pagination =
            serde_urlencoded::from_str("page=2&limit=10").expect("should parse");
        assert_eq!(pagination.offset(), 10);
        assert_eq!(pagination.limit(), 10);
    }

    #[test]
    fn test_validation_rejects_zero_limit() {
        let pagination = Pagination {
            limit: Some(0),
            ..Pagination::default()
        };
        assert!(pagination.validate().is_err());
    }
}
