use async_trait::async_trait;

use crate::domain::model::{
    error::Error as ModelError,
    hotel::{Hotel, HotelDoc},
};

/// Reads and writes of the authoritative hotel records.
///
/// Records are returned in their display shape, except for the write
/// operations which return the record as stored.
#[async_trait]
pub trait LookupHotels {
    async fn get_hotel_by_id(&self, id: i64) -> Result<HotelDoc, ModelError>;

    async fn get_all_hotels(&self) -> Result<Vec<HotelDoc>, ModelError>;

    /// Returns one page of documents and the total number of records.
    async fn get_hotels_by_page(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<HotelDoc>, i64), ModelError>;

    async fn create_hotel(&self, hotel: Hotel) -> Result<Hotel, ModelError>;

    async fn update_hotel(&self, hotel: Hotel) -> Result<Hotel, ModelError>;

    async fn delete_hotel(&self, id: i64) -> Result<(), ModelError>;

    async fn get_hotels_by_city(&self, city: String) -> Result<Vec<HotelDoc>, ModelError>;

    async fn get_hotels_by_brand(&self, brand: String) -> Result<Vec<HotelDoc>, ModelError>;
}
