use async_trait::async_trait;
use futures::stream::Stream;
use snafu::Snafu;

use crate::domain::model::{hotel::HotelDoc, stats::InsertStats};
use common::document::Document;

type Source = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Container Creation Error: {}", source))]
    ContainerCreation { source: Source },

    #[snafu(display("Container Deletion Error: {}", source))]
    ContainerDeletion { source: Source },

    #[snafu(display("Container Search Error: {}", source))]
    ContainerSearch { source: Source },

    #[snafu(display("Document Insertion Error: {}", source))]
    DocumentInsertion { source: Source },

    #[snafu(display("Document Retrieval Error: {}", source))]
    DocumentRetrieval { source: Source },

    #[snafu(display("Document Deletion Error: {}", source))]
    DocumentDeletion { source: Source },
}

/// Lifecycle of the search index and of the documents it holds.
#[async_trait]
pub trait Storage {
    /// Creates the container with the hotel mapping.
    async fn create_container(&self, index: String) -> Result<(), Error>;

    async fn delete_container(&self, index: String) -> Result<(), Error>;

    async fn container_exists(&self, index: String) -> Result<bool, Error>;

    async fn insert_documents<D, S>(
        &self,
        index: String,
        documents: S,
    ) -> Result<InsertStats, Error>
    where
        D: Document + Send + Sync + 'static,
        S: Stream<Item = D> + Send + Sync + Unpin + 'static;

    async fn get_document(&self, index: String, id: String) -> Result<Option<HotelDoc>, Error>;

    /// Returns false if there was no such document.
    async fn delete_document(&self, index: String, id: String) -> Result<bool, Error>;
}

#[cfg(test)]
mockall::mock! {
    pub Storage {
        pub fn create_container_(&self, index: String) -> Result<(), Error>;

        pub fn delete_container_(&self, index: String) -> Result<(), Error>;

        pub fn container_exists_(&self, index: String) -> Result<bool, Error>;

        pub fn insert_documents_<D, S>(
            &self,
            index: String,
            documents: S,
        ) -> Result<InsertStats, Error>
        where
            D: Document + Send + Sync + 'static,
            S: Stream<Item = D> + Send + Sync + Unpin + 'static;

        pub fn get_document_(&self, index: String, id: String) -> Result<Option<HotelDoc>, Error>;

        pub fn delete_document_(&self, index: String, id: String) -> Result<bool, Error>;
    }
}

#[cfg(test)]
#[async_trait]
impl Storage for MockStorage {
    async fn create_container(&self, index: String) -> Result<(), Error> {
        self.create_container_(index)
    }

    async fn delete_container(&self, index: String) -> Result<(), Error> {
        self.delete_container_(index)
    }

    async fn container_exists(&self, index: String) -> Result<bool, Error> {
        self.container_exists_(index)
    }

    async fn insert_documents<D, S>(
        &self,
        index: String,
        documents: S,
    ) -> Result<InsertStats, Error>
    where
        D: Document + Send + Sync + 'static,
        S: Stream<Item = D> + Send + Sync + Unpin + 'static,
    {
        self.insert_documents_(index, documents)
    }

    async fn get_document(&self, index: String, id: String) -> Result<Option<HotelDoc>, Error> {
        self.get_document_(index, id)
    }

    async fn delete_document(&self, index: String, id: String) -> Result<bool, Error> {
        self.delete_document_(index, id)
    }
}
