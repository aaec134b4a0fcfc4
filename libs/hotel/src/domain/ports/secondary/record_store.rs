use async_trait::async_trait;
use snafu::Snafu;

use crate::domain::model::hotel::Hotel;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Record Not Found: {}", id))]
    NotFound { id: i64 },

    #[snafu(display("Record Store Execution Error: {}", source))]
    Execution {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Access to the authoritative hotel records.
///
/// List queries return records ordered by id.
#[async_trait]
pub trait RecordStore {
    async fn find_by_id(&self, id: i64) -> Result<Hotel, Error>;

    async fn find_all(&self) -> Result<Vec<Hotel>, Error>;

    /// Returns the requested page along with the total number of records.
    async fn find_by_page(&self, page: i64, page_size: i64) -> Result<(Vec<Hotel>, i64), Error>;

    /// Inserts the record, ignoring its id, and returns it with the id assigned by the store.
    async fn create(&self, hotel: Hotel) -> Result<Hotel, Error>;

    /// Replaces every field of the record with the same id.
    async fn update(&self, hotel: Hotel) -> Result<Hotel, Error>;

    async fn delete(&self, id: i64) -> Result<(), Error>;

    async fn find_by_city(&self, city: String) -> Result<Vec<Hotel>, Error>;

    async fn find_by_brand(&self, brand: String) -> Result<Vec<Hotel>, Error>;
}

#[cfg(test)]
mockall::mock! {
    pub RecordStore {
        pub fn find_by_id_(&self, id: i64) -> Result<Hotel, Error>;

        pub fn find_all_(&self) -> Result<Vec<Hotel>, Error>;

        pub fn find_by_page_(&self, page: i64, page_size: i64) -> Result<(Vec<Hotel>, i64), Error>;

        pub fn create_(&self, hotel: Hotel) -> Result<Hotel, Error>;

        pub fn update_(&self, hotel: Hotel) -> Result<Hotel, Error>;

        pub fn delete_(&self, id: i64) -> Result<(), Error>;

        pub fn find_by_city_(&self, city: String) -> Result<Vec<Hotel>, Error>;

        pub fn find_by_brand_(&self, brand: String) -> Result<Vec<Hotel>, Error>;
    }
}

#[cfg(test)]
#[async_trait]
impl RecordStore for MockRecordStore {
    async fn find_by_id(&self, id: i64) -> Result<Hotel, Error> {
        self.find_by_id_(id)
    }

    async fn find_all(&self) -> Result<Vec<Hotel>, Error> {
        self.find_all_()
    }

    async fn find_by_page(&self, page: i64, page_size: i64) -> Result<(Vec<Hotel>, i64), Error> {
        self.find_by_page_(page, page_size)
    }

    async fn create(&self, hotel: Hotel) -> Result<Hotel, Error> {
        self.create_(hotel)
    }

    async fn update(&self, hotel: Hotel) -> Result<Hotel, Error> {
        self.update_(hotel)
    }

    async fn delete(&self, id: i64) -> Result<(), Error> {
        self.delete_(id)
    }

    async fn find_by_city(&self, city: String) -> Result<Vec<Hotel>, Error> {
        self.find_by_city_(city)
    }

    async fn find_by_brand(&self, brand: String) -> Result<Vec<Hotel>, Error> {
        self.find_by_brand_(brand)
    }
}
