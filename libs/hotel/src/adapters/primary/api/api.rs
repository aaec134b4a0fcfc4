use serde::{Deserialize, Serialize};

use crate::domain::model::hotel::HotelDoc;
use crate::domain::model::search::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

fn default_page() -> i64 {
    DEFAULT_PAGE
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Query string of the paged listing, `?page=2&pageSize=20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

impl PageQuery {
    /// The page actually served, non positive values fall back to the first page.
    pub fn page(&self) -> i64 {
        if self.page < 1 {
            DEFAULT_PAGE
        } else {
            self.page
        }
    }

    pub fn page_size(&self) -> i64 {
        if self.page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }
}

impl Default for PageQuery {
    fn default() -> Self {
        PageQuery {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelPageResponse {
    pub data: Vec<HotelDoc>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
}

impl Default for DeleteResponse {
    fn default() -> Self {
        DeleteResponse {
            message: String::from("hotel deleted"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        HealthResponse {
            status: String::from("ok"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_missing_page_parameters() {
        let query: PageQuery = serde_json::from_str(r#"{ "pageSize": 20 }"#).unwrap();
        assert_eq!(
            query,
            PageQuery {
                page: 1,
                page_size: 20
            }
        );
    }

    #[test]
    fn should_normalize_non_positive_values() {
        let query = PageQuery {
            page: 0,
            page_size: -5,
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), 10);
    }

    #[test]
    fn should_serialize_page_in_camel_case() {
        let response = HotelPageResponse {
            data: vec![],
            total: 42,
            page: 2,
            page_size: 10,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "data": [], "total": 42, "page": 2, "pageSize": 10 })
        );
    }
}
