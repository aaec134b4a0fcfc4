use crate::domain::model::hotel::Hotel;

/// A row of `tb_hotel`. Some deployments allow NULL in the descriptive columns.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HotelRow {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub price: i64,
    pub score: i64,
    pub brand: String,
    pub city: String,
    pub star_name: Option<String>,
    pub business: Option<String>,
    pub longitude: String,
    pub latitude: String,
    pub pic: Option<String>,
}

impl From<HotelRow> for Hotel {
    fn from(row: HotelRow) -> Self {
        Hotel {
            id: row.id,
            name: row.name,
            address: row.address,
            price: row.price,
            score: row.score,
            brand: row.brand,
            city: row.city,
            star_name: row.star_name.unwrap_or_default(),
            business: row.business.unwrap_or_default(),
            longitude: row.longitude,
            latitude: row.latitude,
            pic: row.pic.unwrap_or_default(),
        }
    }
}
