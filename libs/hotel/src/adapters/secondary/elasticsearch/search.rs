use async_trait::async_trait;

use super::dsl::build_search_query;
use super::ElasticsearchStorage;
use crate::domain::model::search::{PageResult, SearchRequest};
use crate::domain::ports::secondary::search::{Error as SearchError, Search};

#[async_trait]
impl Search for ElasticsearchStorage {
    #[tracing::instrument(skip(self))]
    async fn search_hotels(&self, request: SearchRequest) -> Result<PageResult, SearchError> {
        let query = build_search_query(&request);

        self.search_in_index(&self.config.index, query)
            .await
            .map_err(|err| SearchError::DocumentRetrieval {
                source: Box::new(err),
            })
    }
}
