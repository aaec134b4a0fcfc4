//! ES response for various ES queries, these only deserialize the fields that we use.
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use crate::domain::model::{hotel::HotelDoc, search::PageResult};

/// ES response for a search query.
#[derive(Debug, Deserialize)]
pub struct ElasticsearchSearchResponse {
    pub hits: ElasticsearchHits,
}

#[derive(Debug, Deserialize)]
pub struct ElasticsearchHits {
    #[serde(default)]
    pub total: Option<ElasticsearchTotal>,
    #[serde(default)]
    pub hits: Vec<ElasticsearchHit>,
}

/// Recent versions report `{"value": 12, "relation": "eq"}`, older ones a bare number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ElasticsearchTotal {
    Object { value: i64 },
    Count(i64),
}

impl ElasticsearchTotal {
    pub fn value(&self) -> i64 {
        match self {
            ElasticsearchTotal::Object { value } => *value,
            ElasticsearchTotal::Count(value) => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ElasticsearchHit {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Value,
    #[serde(default)]
    pub highlight: HashMap<String, Vec<String>>,
}

impl ElasticsearchHit {
    /// Decodes the hit, replacing the name by its first highlighted fragment, if any.
    pub fn into_doc(self) -> Result<HotelDoc, serde_json::Error> {
        let mut doc: HotelDoc = serde_json::from_value(self.source)?;
        if let Some(fragment) = self.highlight.get("name").and_then(|f| f.first()) {
            doc.name = fragment.clone();
        }
        Ok(doc)
    }
}

impl ElasticsearchSearchResponse {
    /// Consumes the response into a page of documents. Hits that cannot be decoded
    /// are left out and counted, the total is the one reported by Elasticsearch.
    pub fn into_page(self) -> PageResult {
        let total = self.hits.total.as_ref().map_or(0, ElasticsearchTotal::value);
        let mut skipped = 0;

        let hotels = self
            .hits
            .hits
            .into_iter()
            .filter_map(|hit| {
                let id = hit.id.clone();
                match hit.into_doc() {
                    Ok(doc) => Some(doc),
                    Err(err) => {
                        warn!("skipping hit '{}': {}", id, err);
                        skipped += 1;
                        None
                    }
                }
            })
            .collect();

        PageResult {
            total,
            hotels,
            skipped,
        }
    }
}

/// ES response for a get query.
#[derive(Debug, Deserialize)]
pub struct ElasticsearchGetResponse {
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_source", default)]
    pub source: Option<Value>,
}

/// ES response for bulk queries.
#[derive(Debug, Deserialize)]
pub struct ElasticsearchBulkResponse {
    #[serde(default)]
    pub errors: bool,
    pub items: Vec<ElasticsearchBulkItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElasticsearchBulkItem {
    Index(ElasticsearchBulkStatus),
    Create(ElasticsearchBulkStatus),
    Update(ElasticsearchBulkStatus),
    Delete(ElasticsearchBulkStatus),
}

impl ElasticsearchBulkItem {
    pub fn inner(self) -> ElasticsearchBulkStatus {
        match self {
            ElasticsearchBulkItem::Index(status)
            | ElasticsearchBulkItem::Create(status)
            | ElasticsearchBulkItem::Update(status)
            | ElasticsearchBulkItem::Delete(status) => status,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ElasticsearchBulkStatus {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub status: u16,
    #[serde(default)]
    pub result: Option<ElasticsearchBulkResult>,
    #[serde(default)]
    pub error: Option<ElasticsearchBulkError>,
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ElasticsearchBulkResult {
    Created,
    Updated,
    Deleted,
    NotFound,
    Noop,
}

#[derive(Debug, Deserialize)]
pub struct ElasticsearchBulkError {
    #[serde(rename = "type")]
    pub err_type: String,
    pub reason: String,
}
