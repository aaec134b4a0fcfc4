use serde::{Deserialize, Serialize};

use super::hotel::HotelDoc;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Ordering of the search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Relevance,
    PriceAsc,
    PriceDesc,
    ScoreAsc,
    ScoreDesc,
}

impl From<i64> for SortMode {
    fn from(sort_by: i64) -> Self {
        match sort_by {
            1 => SortMode::PriceAsc,
            2 => SortMode::PriceDesc,
            3 => SortMode::ScoreAsc,
            4 => SortMode::ScoreDesc,
            _ => SortMode::Relevance,
        }
    }
}

impl SortMode {
    /// The field and order to sort on, `None` when results stay ordered by relevance.
    pub fn sort_key(&self) -> Option<(&'static str, &'static str)> {
        match self {
            SortMode::Relevance => None,
            SortMode::PriceAsc => Some(("price", "asc")),
            SortMode::PriceDesc => Some(("price", "desc")),
            SortMode::ScoreAsc => Some(("score", "asc")),
            SortMode::ScoreDesc => Some(("score", "desc")),
        }
    }
}

/// Parameters of a full text listing, as sent by clients.
///
/// Fields are kept as received, use the accessors to get the normalized values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchRequest {
    pub key: String,
    pub page: i64,
    pub size: i64,
    pub sort_by: i64,
}

impl SearchRequest {
    /// The keyword to match, if any.
    pub fn keyword(&self) -> Option<&str> {
        if self.key.is_empty() {
            None
        } else {
            Some(self.key.as_str())
        }
    }

    pub fn page(&self) -> i64 {
        if self.page <= 0 {
            DEFAULT_PAGE
        } else {
            self.page
        }
    }

    pub fn size(&self) -> i64 {
        if self.size <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.size
        }
    }

    /// Number of results to skip before the requested page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.size())
    }

    pub fn sort_mode(&self) -> SortMode {
        SortMode::from(self.sort_by)
    }
}

/// One page of a full text listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// Total number of matches reported by the search engine.
    pub total: i64,
    pub hotels: Vec<HotelDoc>,
    /// Hits of this page that could not be decoded.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub skipped: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}
