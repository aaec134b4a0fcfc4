use async_trait::async_trait;

use crate::domain::model::{
    error::Error as ModelError,
    search::{PageResult, SearchRequest},
};

#[async_trait]
pub trait ListHotels {
    /// Full text listing, served by the search index.
    async fn list_hotels(&self, request: SearchRequest) -> Result<PageResult, ModelError>;
}
