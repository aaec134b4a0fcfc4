use async_trait::async_trait;
use tracing::warn;

use crate::domain::model::{
    error::Error as ModelError,
    hotel::{Hotel, HotelDoc},
    search::{PageResult, SearchRequest, DEFAULT_PAGE, DEFAULT_PAGE_SIZE},
};
use crate::domain::ports::primary::{list_hotels::ListHotels, lookup_hotels::LookupHotels};
use crate::domain::ports::secondary::{record_store::RecordStore, search::Search};

/// Serves hotel records from the record store, and full text listings from
/// the search index. Writes go to the record store only.
#[derive(Debug, Clone)]
pub struct HotelService<R, S> {
    records: R,
    search: S,
}

impl<R, S> HotelService<R, S> {
    pub fn new(records: R, search: S) -> Self {
        HotelService { records, search }
    }
}

fn into_docs(hotels: Vec<Hotel>) -> Vec<HotelDoc> {
    hotels.into_iter().map(HotelDoc::from).collect()
}

#[async_trait]
impl<R, S> LookupHotels for HotelService<R, S>
where
    R: RecordStore + Send + Sync,
    S: Send + Sync,
{
    async fn get_hotel_by_id(&self, id: i64) -> Result<HotelDoc, ModelError> {
        let hotel = self.records.find_by_id(id).await?;
        Ok(HotelDoc::from(hotel))
    }

    async fn get_all_hotels(&self) -> Result<Vec<HotelDoc>, ModelError> {
        let hotels = self.records.find_all().await?;
        Ok(into_docs(hotels))
    }

    async fn get_hotels_by_page(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<HotelDoc>, i64), ModelError> {
        let page = if page < 1 { DEFAULT_PAGE } else { page };
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };
        let (hotels, total) = self.records.find_by_page(page, page_size).await?;
        Ok((into_docs(hotels), total))
    }

    async fn create_hotel(&self, hotel: Hotel) -> Result<Hotel, ModelError> {
        self.records.create(hotel).await.map_err(ModelError::from)
    }

    async fn update_hotel(&self, hotel: Hotel) -> Result<Hotel, ModelError> {
        self.records.update(hotel).await.map_err(ModelError::from)
    }

    async fn delete_hotel(&self, id: i64) -> Result<(), ModelError> {
        self.records.delete(id).await.map_err(ModelError::from)
    }

    async fn get_hotels_by_city(&self, city: String) -> Result<Vec<HotelDoc>, ModelError> {
        let hotels = self.records.find_by_city(city).await?;
        Ok(into_docs(hotels))
    }

    async fn get_hotels_by_brand(&self, brand: String) -> Result<Vec<HotelDoc>, ModelError> {
        let hotels = self.records.find_by_brand(brand).await?;
        Ok(into_docs(hotels))
    }
}

#[async_trait]
impl<R, S> ListHotels for HotelService<R, S>
where
    R: Send + Sync,
    S: Search + Send + Sync,
{
    async fn list_hotels(&self, request: SearchRequest) -> Result<PageResult, ModelError> {
        let result = self.search.search_hotels(request).await?;
        if result.skipped > 0 {
            warn!(
                "{} hit(s) could not be decoded out of {} total",
                result.skipped, result.total
            );
        }
        Ok(result)
    }
}
