use async_trait::async_trait;
use snafu::Snafu;

use crate::domain::model::search::{PageResult, SearchRequest};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Document Retrieval Error: {}", source))]
    DocumentRetrieval {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[async_trait]
pub trait Search {
    /// Runs a full text listing and returns one page of documents, along with
    /// the total number of matches. No partial result is returned on failure.
    async fn search_hotels(&self, request: SearchRequest) -> Result<PageResult, Error>;
}

#[cfg(test)]
mockall::mock! {
    pub Search {
        pub fn search_hotels_(&self, request: SearchRequest) -> Result<PageResult, Error>;
    }
}

#[cfg(test)]
#[async_trait]
impl Search for MockSearch {
    async fn search_hotels(&self, request: SearchRequest) -> Result<PageResult, Error> {
        self.search_hotels_(request)
    }
}
