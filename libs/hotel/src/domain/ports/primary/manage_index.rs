use async_trait::async_trait;
use futures::stream::Stream;
use tracing::{info, info_span};
use tracing_futures::Instrument;

use crate::domain::model::{error::Error as ModelError, hotel::HotelDoc, stats::InsertStats};
use crate::domain::ports::secondary::storage::Storage;
use common::document::ContainerDocument;

/// Administration of the search index.
#[async_trait]
pub trait ManageIndex {
    async fn create_index(&self, index: String) -> Result<(), ModelError>;

    async fn delete_index(&self, index: String) -> Result<(), ModelError>;

    async fn index_exists(&self, index: String) -> Result<bool, ModelError>;

    /// Bulk inserts the documents, creating the index first if it does not exist.
    async fn import_documents<D, S>(
        &self,
        index: String,
        documents: S,
    ) -> Result<InsertStats, ModelError>
    where
        D: ContainerDocument + Send + Sync + 'static,
        S: Stream<Item = D> + Send + Sync + Unpin + 'static;

    async fn find_document(&self, index: String, id: String)
        -> Result<Option<HotelDoc>, ModelError>;

    /// Returns false if there was no such document.
    async fn remove_document(&self, index: String, id: String) -> Result<bool, ModelError>;
}

#[async_trait]
impl<T> ManageIndex for T
where
    T: Storage + Send + Sync + 'static,
{
    async fn create_index(&self, index: String) -> Result<(), ModelError> {
        self.create_container(index)
            .await
            .map_err(|err| ModelError::IndexCreation { source: err.into() })
    }

    async fn delete_index(&self, index: String) -> Result<(), ModelError> {
        self.delete_container(index)
            .await
            .map_err(|err| ModelError::IndexDeletion { source: err.into() })
    }

    async fn index_exists(&self, index: String) -> Result<bool, ModelError> {
        self.container_exists(index)
            .await
            .map_err(|err| ModelError::IndexSearch { source: err.into() })
    }

    #[tracing::instrument(skip(self, documents))]
    async fn import_documents<D, S>(
        &self,
        index: String,
        documents: S,
    ) -> Result<InsertStats, ModelError>
    where
        D: ContainerDocument + Send + Sync + 'static,
        S: Stream<Item = D> + Send + Sync + Unpin + 'static,
    {
        let exists = self
            .container_exists(index.clone())
            .instrument(info_span!("Find container"))
            .await
            .map_err(|err| ModelError::IndexSearch { source: err.into() })?;

        if !exists {
            info!("creating index {}", index);
            self.create_container(index.clone())
                .instrument(info_span!("Create container"))
                .await
                .map_err(|err| ModelError::IndexCreation { source: err.into() })?;
        }

        let stats = self
            .insert_documents(index, documents)
            .instrument(info_span!("Insert documents", doc_type = D::static_doc_type()))
            .await
            .map_err(|err| ModelError::DocumentStreamInsertion { source: err.into() })?;

        info!("Index import stats: {:?}", stats);

        Ok(stats)
    }

    async fn find_document(
        &self,
        index: String,
        id: String,
    ) -> Result<Option<HotelDoc>, ModelError> {
        self.get_document(index, id)
            .await
            .map_err(|err| ModelError::DocumentRetrieval { source: err.into() })
    }

    async fn remove_document(&self, index: String, id: String) -> Result<bool, ModelError> {
        self.delete_document(index, id)
            .await
            .map_err(|err| ModelError::DocumentDeletion { source: err.into() })
    }
}
