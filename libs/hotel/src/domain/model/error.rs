use snafu::Snafu;

use crate::domain::ports::secondary::{record_store, search};

type Source = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Hotel Not Found: {}", id))]
    HotelNotFound { id: i64 },

    #[snafu(display("Record Store Error: {}", source))]
    RecordStore { source: Source },

    #[snafu(display("Search Error: {}", source))]
    Search { source: Source },

    #[snafu(display("Index Creation Error: {}", source))]
    IndexCreation { source: Source },

    #[snafu(display("Index Deletion Error: {}", source))]
    IndexDeletion { source: Source },

    #[snafu(display("Index Search Error: {}", source))]
    IndexSearch { source: Source },

    #[snafu(display("Document Stream Insertion Error: {}", source))]
    DocumentStreamInsertion { source: Source },

    #[snafu(display("Document Retrieval Error: {}", source))]
    DocumentRetrieval { source: Source },

    #[snafu(display("Document Deletion Error: {}", source))]
    DocumentDeletion { source: Source },
}

// Conversion from secondary ports errors

impl From<record_store::Error> for Error {
    fn from(err: record_store::Error) -> Self {
        match err {
            record_store::Error::NotFound { id } => Self::HotelNotFound { id },
            err => Self::RecordStore {
                source: Box::new(err),
            },
        }
    }
}

impl From<search::Error> for Error {
    fn from(err: search::Error) -> Self {
        Self::Search {
            source: Box::new(err),
        }
    }
}
