use elasticsearch::http::response::{Exception, Response};
use elasticsearch::http::StatusCode;
use elasticsearch::indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts};
use elasticsearch::{BulkOperation, BulkParts, DeleteParts, GetParts, SearchParts};
use futures::stream::{Stream, StreamExt};
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use snafu::{ResultExt, Snafu};
use tracing::debug;

use super::configuration::hotel_index_body;
use super::models::{
    ElasticsearchBulkItem, ElasticsearchBulkResponse, ElasticsearchBulkResult,
    ElasticsearchGetResponse, ElasticsearchSearchResponse,
};
use super::ElasticsearchStorage;
use crate::domain::model::{hotel::HotelDoc, search::PageResult, stats::InsertStats};
use common::document::Document;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    /// Elasticsearch Error
    #[snafu(display("Elasticsearch Error: {} [{}]", source, details))]
    ElasticsearchClient {
        details: String,
        source: elasticsearch::Error,
    },

    /// Elasticsearch Not Created
    #[snafu(display("Elasticsearch Response: Not Created: {}", details))]
    NotCreated { details: String },

    /// Elasticsearch Not Deleted
    #[snafu(display("Elasticsearch Response: Not Deleted: {}", details))]
    NotDeleted { details: String },

    /// Elasticsearch Failure without Exception
    #[snafu(display("Elasticsearch Failure without Exception"))]
    ElasticsearchFailureWithoutException,

    /// Elasticsearch Unhandled Exception
    #[snafu(display("Elasticsearch Unhandled Exception: {}", details))]
    ElasticsearchUnhandledException { details: String },

    /// Elasticsearch Duplicate Index
    #[snafu(display("Elasticsearch Duplicate Index: {}", index))]
    ElasticsearchDuplicateIndex { index: String },

    /// Elasticsearch Failed To Parse
    #[snafu(display("Elasticsearch Failed to Parse"))]
    ElasticsearchFailedToParse,

    /// Elasticsearch Invalid Mapping
    #[snafu(display("Elasticsearch Failed to Parse Mapping of {}: {}", object, reason))]
    ElasticsearchInvalidMapping { object: String, reason: String },

    /// Elasticsearch Unknown Index
    #[snafu(display("Elasticsearch Unknown Index: {}", index))]
    ElasticsearchUnknownIndex { index: String },

    /// Elasticsearch Unknown Setting
    #[snafu(display("Elasticsearch Unknown Setting: {}", setting))]
    ElasticsearchUnknownSetting { setting: String },

    /// Elasticsearch Deserialization Error
    #[snafu(display("JSON Elasticsearch Deserialization Error: {}", source))]
    ElasticsearchDeserialization { source: elasticsearch::Error },

    /// Serde Deserialization Error
    #[snafu(display("JSON Serde Deserialization Error: {} [{}]", source, details))]
    JsonDeserialization {
        source: serde_json::Error,
        details: String,
    },

    /// Invalid JSON Value
    #[snafu(display("JSON Deserialization Invalid: {} {:?}", details, json))]
    JsonInvalid { details: String, json: Value },

    /// Elasticsearch Unhandled Status
    #[snafu(display("Elasticsearch Unhandled Status: {}", details))]
    ElasticsearchUnhandledStatus { details: String },

    /// Bulk item rejected
    #[snafu(display("Elasticsearch Bulk Item '{}' Rejected: {} [{}]", id, reason, err_type))]
    BulkItemRejected {
        id: String,
        err_type: String,
        reason: String,
    },
}

impl From<Exception> for Error {
    // This function analyzes the content of an elasticsearch exception,
    // and returns an error, the type of which should mirror the exception's content.
    fn from(exception: Exception) -> Error {
        let root_cause = exception.error().root_cause();
        if root_cause.is_empty() {
            // If there is no root cause, there maybe a reason
            match exception.error().reason() {
                Some(reason) => Error::ElasticsearchUnhandledException {
                    details: String::from(reason),
                },
                None => Error::ElasticsearchUnhandledException {
                    details: String::from("Unspecified root cause or reason"),
                },
            }
        } else {
            lazy_static! {
                static ref ALREADY_EXISTS: Regex =
                    Regex::new(r"index \[([^\]/]+).*\] already exists").unwrap();
            }
            lazy_static! {
                static ref NOT_FOUND: Regex = Regex::new(r"no such index \[([^\]/]+).*\]").unwrap();
            }
            lazy_static! {
                static ref FAILED_PARSE: Regex = Regex::new(r"failed to parse").unwrap();
            }
            lazy_static! {
                // Example: Failed to parse mapping [_doc]: analyzer [ik_max_word] has not been configured in mappings
                static ref FAILED_PARSE_MAPPING: Regex =
                    Regex::new(r"Failed to parse mapping \[([^\]/]+).*\]: (.*)").unwrap();
            }
            lazy_static! {
                static ref UNKNOWN_SETTING: Regex =
                    Regex::new(r"unknown setting \[([^\]/]+).*\]").unwrap();
            }
            match root_cause[0].reason() {
                Some(reason) => {
                    if let Some(caps) = ALREADY_EXISTS.captures(reason) {
                        Error::ElasticsearchDuplicateIndex {
                            index: String::from(&caps[1]),
                        }
                    } else if let Some(caps) = NOT_FOUND.captures(reason) {
                        Error::ElasticsearchUnknownIndex {
                            index: String::from(&caps[1]),
                        }
                    } else if let Some(caps) = FAILED_PARSE_MAPPING.captures(reason) {
                        Error::ElasticsearchInvalidMapping {
                            object: String::from(&caps[1]),
                            reason: String::from(&caps[2]),
                        }
                    } else if FAILED_PARSE.is_match(reason) {
                        Error::ElasticsearchFailedToParse
                    } else if let Some(caps) = UNKNOWN_SETTING.captures(reason) {
                        Error::ElasticsearchUnknownSetting {
                            setting: String::from(&caps[1]),
                        }
                    } else {
                        Error::ElasticsearchUnhandledException {
                            details: format!("Unidentified reason: {}", reason),
                        }
                    }
                }
                None => Error::ElasticsearchUnhandledException {
                    details: String::from("Unspecified reason"),
                },
            }
        }
    }
}

impl From<Option<Exception>> for Error {
    fn from(opt_exc: Option<Exception>) -> Self {
        opt_exc
            .map(Into::into)
            .unwrap_or(Error::ElasticsearchFailureWithoutException)
    }
}

// Turns an error response into an error, the exception it carries being analyzed.
async fn response_error(response: Response) -> Error {
    match response.exception().await {
        Ok(exception) => Error::from(exception),
        Err(err) => Error::ElasticsearchDeserialization { source: err },
    }
}

// Response similar to:
// Object({"acknowledged": Bool(true), "index": String("name"), "shards_acknowledged": Bool(true)})
async fn acknowledged(response: Response) -> Result<bool, Error> {
    let json = response
        .json::<Value>()
        .await
        .context(ElasticsearchDeserializationSnafu)?;

    json.as_object()
        .ok_or(Error::JsonInvalid {
            details: String::from("expected JSON object"),
            json: json.clone(),
        })?
        .get("acknowledged")
        .ok_or(Error::JsonInvalid {
            details: String::from("expected 'acknowledged'"),
            json: json.clone(),
        })?
        .as_bool()
        .ok_or(Error::JsonInvalid {
            details: String::from("expected JSON bool"),
            json: json.clone(),
        })
}

impl ElasticsearchStorage {
    pub(super) async fn put_index(&self, index: &str) -> Result<(), Error> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .request_timeout(self.config.timeout)
            .body(hotel_index_body(&self.config.analyzer))
            .send()
            .await
            .context(ElasticsearchClientSnafu {
                details: format!("cannot create index '{}'", index),
            })?;

        if !response.status_code().is_success() {
            return Err(response_error(response).await);
        }

        if acknowledged(response).await? {
            Ok(())
        } else {
            Err(Error::NotCreated {
                details: format!("index creation {}", index),
            })
        }
    }

    pub(super) async fn remove_index(&self, index: &str) -> Result<(), Error> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .request_timeout(self.config.timeout)
            .send()
            .await
            .context(ElasticsearchClientSnafu {
                details: format!("cannot delete index '{}'", index),
            })?;

        if !response.status_code().is_success() {
            return Err(response_error(response).await);
        }

        if acknowledged(response).await? {
            Ok(())
        } else {
            Err(Error::NotDeleted {
                details: String::from("Elasticsearch response to index deletion not acknowledged"),
            })
        }
    }

    pub(super) async fn check_index(&self, index: &str) -> Result<bool, Error> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .request_timeout(self.config.timeout)
            .send()
            .await
            .context(ElasticsearchClientSnafu {
                details: format!("cannot find index '{}'", index),
            })?;

        match response.status_code() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(Error::ElasticsearchUnhandledStatus {
                details: format!("index '{}' existence check returned {}", index, status),
            }),
        }
    }

    pub(super) async fn insert_documents_in_index<D, S>(
        &self,
        index: &str,
        documents: S,
    ) -> Result<InsertStats, Error>
    where
        D: Document + Send + Sync + 'static,
        S: Stream<Item = D> + Send + Sync + Unpin,
    {
        let mut chunks = documents.chunks(self.config.insertion_chunk_size.max(1));
        let mut stats = InsertStats::default();

        while let Some(chunk) = chunks.next().await {
            let operations = chunk
                .into_iter()
                .map(|doc| {
                    let doc_id = doc.id();
                    BulkOperation::index(doc).id(doc_id).into()
                })
                .collect::<Vec<BulkOperation<D>>>();

            stats = stats + self.bulk_block(index, operations).await?;
        }

        Ok(stats)
    }

    async fn bulk_block<D>(
        &self,
        index: &str,
        operations: Vec<BulkOperation<D>>,
    ) -> Result<InsertStats, Error>
    where
        D: Document + Send + Sync + 'static,
    {
        let mut stats = InsertStats::default();

        debug!("bulk inserting {} documents in {}", operations.len(), index);

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .request_timeout(self.config.timeout)
            .body(operations)
            .send()
            .await
            .context(ElasticsearchClientSnafu {
                details: "cannot bulk insert",
            })?;

        if !response.status_code().is_success() {
            return Err(response_error(response).await);
        }

        let es_response: ElasticsearchBulkResponse = response
            .json()
            .await
            .context(ElasticsearchDeserializationSnafu)?;

        es_response
            .items
            .into_iter()
            .map(ElasticsearchBulkItem::inner)
            .try_for_each(|item| {
                if let Some(error) = item.error {
                    return Err(Error::BulkItemRejected {
                        id: item.id,
                        err_type: error.err_type,
                        reason: error.reason,
                    });
                }

                match item.result {
                    Some(ElasticsearchBulkResult::Created) => stats.created += 1,
                    Some(ElasticsearchBulkResult::Updated) => stats.updated += 1,
                    _ => {}
                }

                Ok(())
            })?;

        Ok(stats)
    }

    pub(super) async fn get_document_by_id(
        &self,
        index: &str,
        id: &str,
    ) -> Result<Option<HotelDoc>, Error> {
        let response = self
            .client
            .get(GetParts::IndexId(index, id))
            .request_timeout(self.config.timeout)
            .send()
            .await
            .context(ElasticsearchClientSnafu {
                details: format!("cannot get document '{}' from '{}'", id, index),
            })?;

        let status = response.status_code();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(response_error(response).await);
        }

        // A missing document is reported with a 404 and `"found": false`,
        // a missing index with a 404 and an exception.
        let json = response
            .json::<Value>()
            .await
            .context(ElasticsearchDeserializationSnafu)?;

        if json.get("error").is_some() {
            return Err(Error::ElasticsearchUnknownIndex {
                index: String::from(index),
            });
        }

        let body: ElasticsearchGetResponse =
            serde_json::from_value(json).context(JsonDeserializationSnafu {
                details: "could not deserialize Elasticsearch get response",
            })?;

        match (body.found, body.source) {
            (true, Some(source)) => serde_json::from_value(source)
                .map(Some)
                .context(JsonDeserializationSnafu {
                    details: format!("could not deserialize document '{}'", id),
                }),
            _ => Ok(None),
        }
    }

    pub(super) async fn delete_document_by_id(&self, index: &str, id: &str) -> Result<bool, Error> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(index, id))
            .request_timeout(self.config.timeout)
            .send()
            .await
            .context(ElasticsearchClientSnafu {
                details: format!("cannot delete document '{}' from '{}'", id, index),
            })?;

        let status = response.status_code();
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(response_error(response).await);
        }

        let json = response
            .json::<Value>()
            .await
            .context(ElasticsearchDeserializationSnafu)?;

        let result = json.get("result").and_then(Value::as_str).map(String::from);

        match result.as_deref() {
            Some("deleted") => Ok(true),
            Some("not_found") => Ok(false),
            _ if json.get("error").is_some() => Err(Error::ElasticsearchUnknownIndex {
                index: String::from(index),
            }),
            _ => Err(Error::JsonInvalid {
                details: String::from("expected 'result'"),
                json,
            }),
        }
    }

    pub(super) async fn search_in_index(&self, index: &str, query: Value) -> Result<PageResult, Error> {
        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .request_timeout(self.config.timeout)
            .body(query)
            .send()
            .await
            .context(ElasticsearchClientSnafu {
                details: format!("could not search index {}", index),
            })?;

        if !response.status_code().is_success() {
            return Err(response_error(response).await);
        }

        let body = response
            .json::<ElasticsearchSearchResponse>()
            .await
            .context(ElasticsearchDeserializationSnafu)?;

        Ok(body.into_page())
    }
}
