use common::document::{ContainerDocument, Document};
use serde::{Deserialize, Serialize};

/// A hotel, as recorded in the relational store.
///
/// The identifier is assigned by the store on creation, every other field
/// can be replaced by an update. Missing fields in a JSON body take their
/// default value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hotel {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub price: i64,
    pub score: i64,
    pub brand: String,
    pub city: String,
    pub star_name: String,
    pub business: String,
    pub longitude: String,
    pub latitude: String,
    pub pic: String,
}

/// The read shape of a hotel, used for API responses and stored in the search index.
///
/// Latitude and longitude are merged into a single `location` field, which
/// Elasticsearch reads as a geo point. When the document comes out of a text
/// search, `name` may hold the highlighted fragment instead of the stored name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HotelDoc {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub price: i64,
    pub score: i64,
    pub brand: String,
    pub city: String,
    pub star_name: String,
    pub business: String,
    pub location: String,
    pub pic: String,
}

/// Formats a location the way the search index expects a geo point given as a string.
pub fn location(latitude: &str, longitude: &str) -> String {
    format!("{}, {}", latitude, longitude)
}

impl From<Hotel> for HotelDoc {
    fn from(hotel: Hotel) -> Self {
        let Hotel {
            id,
            name,
            address,
            price,
            score,
            brand,
            city,
            star_name,
            business,
            longitude,
            latitude,
            pic,
        } = hotel;

        HotelDoc {
            id,
            name,
            address,
            price,
            score,
            brand,
            city,
            star_name,
            business,
            location: location(&latitude, &longitude),
            pic,
        }
    }
}

impl Document for HotelDoc {
    fn id(&self) -> String {
        self.id.to_string()
    }
}

impl ContainerDocument for HotelDoc {
    fn static_doc_type() -> &'static str {
        "hotel"
    }
}
