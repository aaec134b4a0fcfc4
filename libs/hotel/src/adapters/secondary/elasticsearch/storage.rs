use async_trait::async_trait;
use futures::stream::Stream;

use super::ElasticsearchStorage;
use crate::domain::model::{hotel::HotelDoc, stats::InsertStats};
use crate::domain::ports::secondary::storage::{Error as StorageError, Storage};
use common::document::Document;

#[async_trait]
impl Storage for ElasticsearchStorage {
    async fn create_container(&self, index: String) -> Result<(), StorageError> {
        self.put_index(&index)
            .await
            .map_err(|err| StorageError::ContainerCreation {
                source: Box::new(err),
            })
    }

    async fn delete_container(&self, index: String) -> Result<(), StorageError> {
        self.remove_index(&index)
            .await
            .map_err(|err| StorageError::ContainerDeletion {
                source: Box::new(err),
            })
    }

    async fn container_exists(&self, index: String) -> Result<bool, StorageError> {
        self.check_index(&index)
            .await
            .map_err(|err| StorageError::ContainerSearch {
                source: Box::new(err),
            })
    }

    async fn insert_documents<D, S>(
        &self,
        index: String,
        documents: S,
    ) -> Result<InsertStats, StorageError>
    where
        D: Document + Send + Sync + 'static,
        S: Stream<Item = D> + Send + Sync + Unpin + 'static,
    {
        self.insert_documents_in_index(&index, documents)
            .await
            .map_err(|err| StorageError::DocumentInsertion {
                source: Box::new(err),
            })
    }

    async fn get_document(
        &self,
        index: String,
        id: String,
    ) -> Result<Option<HotelDoc>, StorageError> {
        self.get_document_by_id(&index, &id)
            .await
            .map_err(|err| StorageError::DocumentRetrieval {
                source: Box::new(err),
            })
    }

    async fn delete_document(&self, index: String, id: String) -> Result<bool, StorageError> {
        self.delete_document_by_id(&index, &id)
            .await
            .map_err(|err| StorageError::DocumentDeletion {
                source: Box::new(err),
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use warp::http::{Method, StatusCode};

    use super::*;
    use crate::adapters::secondary::elasticsearch::fake;
    use crate::domain::model::hotel::tests::hotel;
    use crate::domain::model::hotel::Hotel;

    #[tokio::test]
    async fn should_create_index_with_mapping() {
        let server = fake::serve(|method, path, _| {
            if *method == Method::PUT && path == "/hotel" {
                (
                    StatusCode::OK,
                    json!({ "acknowledged": true, "shards_acknowledged": true, "index": "hotel" }),
                )
            } else {
                fake::not_found()
            }
        })
        .await;

        let storage = server.storage().await;
        storage
            .create_container(String::from("hotel"))
            .await
            .unwrap();

        let requests = server.requests();
        assert_eq!(requests[0].method, Method::PUT);
        assert_eq!(requests[0].path, "/hotel");
        let properties = &requests[0].body["mappings"]["properties"];
        assert_eq!(properties["name"]["analyzer"], "ik_max_word");
        assert_eq!(properties["location"]["type"], "geo_point");
    }

    #[tokio::test]
    async fn should_fail_when_creation_is_not_acknowledged() {
        let server = fake::serve(|_, _, _| (StatusCode::OK, json!({ "acknowledged": false }))).await;

        let storage = server.storage().await;
        let res = storage.create_container(String::from("hotel")).await;

        assert!(matches!(res, Err(StorageError::ContainerCreation { .. })));
    }

    #[tokio::test]
    async fn should_report_duplicate_index() {
        let server = fake::serve(|_, _, _| {
            fake::exception(
                StatusCode::BAD_REQUEST,
                "resource_already_exists_exception",
                "index [hotel/s8DpXqOHSo-CTP26bNr6yg] already exists",
            )
        })
        .await;

        let storage = server.storage().await;
        let err = storage
            .create_container(String::from("hotel"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Duplicate Index: hotel"));
    }

    #[tokio::test]
    async fn should_delete_index() {
        let server = fake::serve(|method, path, _| {
            if *method == Method::DELETE && path == "/hotel" {
                (StatusCode::OK, json!({ "acknowledged": true }))
            } else {
                fake::not_found()
            }
        })
        .await;

        let storage = server.storage().await;
        assert!(storage
            .delete_container(String::from("hotel"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn should_report_unknown_index_on_deletion() {
        let server = fake::serve(|_, _, _| {
            fake::exception(
                StatusCode::NOT_FOUND,
                "index_not_found_exception",
                "no such index [hotel]",
            )
        })
        .await;

        let storage = server.storage().await;
        let err = storage
            .delete_container(String::from("hotel"))
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::ContainerDeletion { .. }));
        assert!(err.to_string().contains("Unknown Index: hotel"));
    }

    #[tokio::test]
    async fn should_check_index_existence() {
        let server = fake::serve(|method, path, _| {
            if *method == Method::HEAD && path == "/hotel" {
                (StatusCode::OK, json!({}))
            } else {
                (StatusCode::NOT_FOUND, json!({}))
            }
        })
        .await;

        let storage = server.storage().await;
        assert!(storage
            .container_exists(String::from("hotel"))
            .await
            .unwrap());
        assert!(!storage
            .container_exists(String::from("motel"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn should_fail_existence_check_on_server_error() {
        let server = fake::serve(|_, _, _| (StatusCode::INTERNAL_SERVER_ERROR, json!({}))).await;

        let storage = server.storage().await;
        let res = storage.container_exists(String::from("hotel")).await;

        assert!(matches!(res, Err(StorageError::ContainerSearch { .. })));
    }

    fn bulk_created(body: &serde_json::Value) -> (StatusCode, serde_json::Value) {
        // Bulk bodies alternate action and source lines.
        let items = body
            .as_array()
            .map(|lines| {
                lines
                    .iter()
                    .step_by(2)
                    .map(|action| {
                        json!({ "index": {
                            "_index": "hotel",
                            "_id": action["index"]["_id"],
                            "status": 201,
                            "result": "created"
                        } })
                    })
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        (StatusCode::OK, json!({ "took": 1, "errors": false, "items": items }))
    }

    #[tokio::test]
    async fn should_insert_documents_in_chunks() {
        let server = fake::serve(|method, path, body| {
            if *method == Method::POST && path == "/hotel/_bulk" {
                bulk_created(body)
            } else {
                fake::not_found()
            }
        })
        .await;

        let documents = (1..=5)
            .map(|id| HotelDoc::from(Hotel { id, ..hotel() }))
            .collect::<Vec<_>>();

        let storage = server.storage().await;
        let stats = storage
            .insert_documents(String::from("hotel"), futures::stream::iter(documents))
            .await
            .unwrap();

        assert_eq!(stats.created, 5);

        // insertion_chunk_size is 2 in the fake configuration.
        let requests = server.requests();
        assert_eq!(requests.len(), 3);
        assert!(requests
            .iter()
            .all(|request| request.method == Method::POST && request.path == "/hotel/_bulk"));
        assert_eq!(requests[0].body[0]["index"]["_id"], "1");
        assert_eq!(requests[0].body[1]["location"], "31.251433, 121.48022");
        assert_eq!(requests[2].body.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn should_fail_insertion_on_rejected_item() {
        let server = fake::serve(|_, _, _| {
            (
                StatusCode::OK,
                json!({
                    "took": 1,
                    "errors": true,
                    "items": [{ "index": {
                        "_index": "hotel",
                        "_id": "36934",
                        "status": 400,
                        "error": {
                            "type": "mapper_parsing_exception",
                            "reason": "failed to parse field [location] of type [geo_point]"
                        }
                    } }]
                }),
            )
        })
        .await;

        let storage = server.storage().await;
        let err = storage
            .insert_documents(
                String::from("hotel"),
                futures::stream::iter(vec![HotelDoc::from(hotel())]),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, StorageError::DocumentInsertion { .. }));
        assert!(err.to_string().contains("36934"));
    }

    #[tokio::test]
    async fn should_get_document_by_id() {
        let server = fake::serve(|method, path, _| {
            if *method == Method::GET && path == "/hotel/_doc/36934" {
                (
                    StatusCode::OK,
                    json!({
                        "_index": "hotel",
                        "_id": "36934",
                        "found": true,
                        "_source": HotelDoc::from(hotel())
                    }),
                )
            } else {
                (
                    StatusCode::NOT_FOUND,
                    json!({ "_index": "hotel", "_id": "1", "found": false }),
                )
            }
        })
        .await;

        let storage = server.storage().await;
        let doc = storage
            .get_document(String::from("hotel"), String::from("36934"))
            .await
            .unwrap();
        assert_eq!(doc, Some(HotelDoc::from(hotel())));

        let doc = storage
            .get_document(String::from("hotel"), String::from("1"))
            .await
            .unwrap();
        assert_eq!(doc, None);
    }

    #[tokio::test]
    async fn should_delete_document_by_id() {
        let server = fake::serve(|method, path, _| {
            if *method == Method::DELETE && path == "/hotel/_doc/36934" {
                (
                    StatusCode::OK,
                    json!({ "_index": "hotel", "_id": "36934", "result": "deleted" }),
                )
            } else {
                (
                    StatusCode::NOT_FOUND,
                    json!({ "_index": "hotel", "_id": "1", "result": "not_found" }),
                )
            }
        })
        .await;

        let storage = server.storage().await;
        assert!(storage
            .delete_document(String::from("hotel"), String::from("36934"))
            .await
            .unwrap());
        assert!(!storage
            .delete_document(String::from("hotel"), String::from("1"))
            .await
            .unwrap());

        let paths = server
            .requests()
            .into_iter()
            .map(|request| (request.method, request.path))
            .collect::<Vec<_>>();
        assert_eq!(
            paths,
            vec![
                (Method::DELETE, String::from("/hotel/_doc/36934")),
                (Method::DELETE, String::from("/hotel/_doc/1")),
            ]
        );
    }
}
