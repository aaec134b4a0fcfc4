use async_trait::async_trait;

use super::models::HotelRow;
use super::SqlRecordStore;
use crate::domain::model::hotel::Hotel;
use crate::domain::ports::secondary::record_store::{Error as RecordStoreError, RecordStore};

const SELECT_BY_ID: &str = "SELECT id, name, address, price, score, brand, city, star_name, \
    business, longitude, latitude, pic FROM tb_hotel WHERE id = ?";

const SELECT_ALL: &str = "SELECT id, name, address, price, score, brand, city, star_name, \
    business, longitude, latitude, pic FROM tb_hotel ORDER BY id";

const SELECT_PAGE: &str = "SELECT id, name, address, price, score, brand, city, star_name, \
    business, longitude, latitude, pic FROM tb_hotel ORDER BY id LIMIT ? OFFSET ?";

const SELECT_BY_CITY: &str = "SELECT id, name, address, price, score, brand, city, star_name, \
    business, longitude, latitude, pic FROM tb_hotel WHERE city = ? ORDER BY id";

const SELECT_BY_BRAND: &str = "SELECT id, name, address, price, score, brand, city, star_name, \
    business, longitude, latitude, pic FROM tb_hotel WHERE brand = ? ORDER BY id";

const COUNT_ALL: &str = "SELECT COUNT(*) FROM tb_hotel";

const INSERT: &str = "INSERT INTO tb_hotel (name, address, price, score, brand, city, star_name, \
    business, longitude, latitude, pic) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

const UPDATE: &str = "UPDATE tb_hotel SET name = ?, address = ?, price = ?, score = ?, brand = ?, \
    city = ?, star_name = ?, business = ?, longitude = ?, latitude = ?, pic = ? WHERE id = ?";

const DELETE: &str = "DELETE FROM tb_hotel WHERE id = ?";

// SQLite does not report the id of an inserted row through the Any driver.
const LAST_INSERT_ROWID: &str = "SELECT last_insert_rowid()";

fn execution(err: sqlx::Error) -> RecordStoreError {
    RecordStoreError::Execution {
        source: Box::new(err),
    }
}

fn into_hotels(rows: Vec<HotelRow>) -> Vec<Hotel> {
    rows.into_iter().map(Hotel::from).collect()
}

#[async_trait]
impl RecordStore for SqlRecordStore {
    async fn find_by_id(&self, id: i64) -> Result<Hotel, RecordStoreError> {
        sqlx::query_as::<_, HotelRow>(SELECT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(execution)?
            .map(Hotel::from)
            .ok_or(RecordStoreError::NotFound { id })
    }

    async fn find_all(&self) -> Result<Vec<Hotel>, RecordStoreError> {
        let rows = sqlx::query_as::<_, HotelRow>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(execution)?;
        Ok(into_hotels(rows))
    }

    async fn find_by_page(
        &self,
        page: i64,
        page_size: i64,
    ) -> Result<(Vec<Hotel>, i64), RecordStoreError> {
        let total = sqlx::query_scalar::<_, i64>(COUNT_ALL)
            .fetch_one(&self.pool)
            .await
            .map_err(execution)?;

        let offset = (page - 1).saturating_mul(page_size);
        let rows = sqlx::query_as::<_, HotelRow>(SELECT_PAGE)
            .bind(page_size)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(execution)?;

        Ok((into_hotels(rows), total))
    }

    async fn create(&self, hotel: Hotel) -> Result<Hotel, RecordStoreError> {
        // The id is read on the connection that ran the insert.
        let mut conn = self.pool.acquire().await.map_err(execution)?;

        let result = sqlx::query(INSERT)
            .bind(hotel.name.as_str())
            .bind(hotel.address.as_str())
            .bind(hotel.price)
            .bind(hotel.score)
            .bind(hotel.brand.as_str())
            .bind(hotel.city.as_str())
            .bind(hotel.star_name.as_str())
            .bind(hotel.business.as_str())
            .bind(hotel.longitude.as_str())
            .bind(hotel.latitude.as_str())
            .bind(hotel.pic.as_str())
            .execute(&mut *conn)
            .await
            .map_err(execution)?;

        let id = match result.last_insert_id() {
            Some(id) => id,
            None => sqlx::query_scalar::<_, i64>(LAST_INSERT_ROWID)
                .fetch_one(&mut *conn)
                .await
                .map_err(execution)?,
        };

        Ok(Hotel { id, ..hotel })
    }

    async fn update(&self, hotel: Hotel) -> Result<Hotel, RecordStoreError> {
        let result = sqlx::query(UPDATE)
            .bind(hotel.name.as_str())
            .bind(hotel.address.as_str())
            .bind(hotel.price)
            .bind(hotel.score)
            .bind(hotel.brand.as_str())
            .bind(hotel.city.as_str())
            .bind(hotel.star_name.as_str())
            .bind(hotel.business.as_str())
            .bind(hotel.longitude.as_str())
            .bind(hotel.latitude.as_str())
            .bind(hotel.pic.as_str())
            .bind(hotel.id)
            .execute(&self.pool)
            .await
            .map_err(execution)?;

        // MySQL does not count rows left unchanged as affected.
        if result.rows_affected() == 0 {
            self.find_by_id(hotel.id).await?;
        }

        Ok(hotel)
    }

    async fn delete(&self, id: i64) -> Result<(), RecordStoreError> {
        sqlx::query(DELETE)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(execution)?;
        Ok(())
    }

    async fn find_by_city(&self, city: String) -> Result<Vec<Hotel>, RecordStoreError> {
        let rows = sqlx::query_as::<_, HotelRow>(SELECT_BY_CITY)
            .bind(city)
            .fetch_all(&self.pool)
            .await
            .map_err(execution)?;
        Ok(into_hotels(rows))
    }

    async fn find_by_brand(&self, brand: String) -> Result<Vec<Hotel>, RecordStoreError> {
        let rows = sqlx::query_as::<_, HotelRow>(SELECT_BY_BRAND)
            .bind(brand)
            .fetch_all(&self.pool)
            .await
            .map_err(execution)?;
        Ok(into_hotels(rows))
    }
}

#[cfg(test)]
mod tests {
    use sqlx::any::AnyPoolOptions;

    use super::*;
    use crate::adapters::secondary::sql::SqlStorageConfig;
    use crate::domain::model::hotel::tests::hotel;
    use crate::domain::ports::secondary::remote::Remote;

    const CREATE_TABLE: &str = "CREATE TABLE tb_hotel (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        address TEXT NOT NULL,
        price INTEGER NOT NULL,
        score INTEGER NOT NULL,
        brand TEXT NOT NULL,
        city TEXT NOT NULL,
        star_name TEXT,
        business TEXT,
        longitude TEXT NOT NULL,
        latitude TEXT NOT NULL,
        pic TEXT
    )";

    async fn store() -> SqlRecordStore {
        let config = SqlStorageConfig {
            url: Some(String::from("sqlite::memory:")),
            host: String::from("localhost"),
            port: 3306,
            username: String::from("root"),
            password: String::new(),
            dbname: String::from("heima"),
            // A single connection keeps the in-memory database alive and shared.
            max_connections: 1,
        };

        let store = AnyPoolOptions::new()
            .conn(config)
            .await
            .expect("sqlite connection");

        sqlx::query(CREATE_TABLE)
            .execute(&store.pool)
            .await
            .expect("tb_hotel creation");

        store
    }

    fn named(name: &str, city: &str, brand: &str) -> Hotel {
        Hotel {
            id: 0,
            name: String::from(name),
            city: String::from(city),
            brand: String::from(brand),
            ..hotel()
        }
    }

    #[tokio::test]
    async fn should_create_and_find_record() {
        let store = store().await;

        let created = store.create(hotel()).await.unwrap();
        assert!(created.id > 0);

        let found = store.find_by_id(created.id).await.unwrap();
        assert_eq!(found, Hotel { id: created.id, ..hotel() });
    }

    #[tokio::test]
    async fn should_assign_distinct_ids_to_new_records() {
        let store = store().await;

        let first = store.create(named("如家外滩店", "上海", "如家")).await.unwrap();
        let second = store.create(named("汉庭西单店", "北京", "汉庭")).await.unwrap();
        assert_ne!(first.id, second.id);

        let hotels = store.find_all().await.unwrap();
        let ids = hotels.iter().map(|h| h.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(store.find_by_id(second.id).await.unwrap().name, "汉庭西单店");
    }

    #[tokio::test]
    async fn should_report_missing_record() {
        let store = store().await;

        let res = store.find_by_id(404).await;

        assert!(matches!(res, Err(RecordStoreError::NotFound { id: 404 })));
    }

    #[tokio::test]
    async fn should_read_null_columns_as_empty() {
        let store = store().await;
        sqlx::query(
            "INSERT INTO tb_hotel (name, address, price, score, brand, city, longitude, latitude) \
             VALUES ('汉庭', '徐汇区', 200, 40, '汉庭', '上海', '121.4', '31.1')",
        )
        .execute(&store.pool)
        .await
        .unwrap();

        let hotels = store.find_all().await.unwrap();
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].star_name, "");
        assert_eq!(hotels[0].pic, "");
    }

    #[tokio::test]
    async fn should_page_records_with_total() {
        let store = store().await;
        for i in 0..25 {
            store
                .create(named(&format!("hotel {}", i), "上海", "如家"))
                .await
                .unwrap();
        }

        let (hotels, total) = store.find_by_page(3, 10).await.unwrap();
        assert_eq!(total, 25);
        assert_eq!(hotels.len(), 5);
        assert_eq!(hotels[0].name, "hotel 20");

        let (hotels, total) = store.find_by_page(4, 10).await.unwrap();
        assert_eq!(total, 25);
        assert!(hotels.is_empty());
    }

    #[tokio::test]
    async fn should_update_record() {
        let store = store().await;
        let created = store.create(hotel()).await.unwrap();

        let updated = store
            .update(Hotel {
                price: 999,
                name: String::from("7天优品"),
                ..created.clone()
            })
            .await
            .unwrap();
        assert_eq!(updated.price, 999);

        let found = store.find_by_id(created.id).await.unwrap();
        assert_eq!(found.price, 999);
        assert_eq!(found.name, "7天优品");
        assert_eq!(found.city, created.city);
    }

    #[tokio::test]
    async fn should_not_update_missing_record() {
        let store = store().await;

        let res = store.update(Hotel { id: 77, ..hotel() }).await;

        assert!(matches!(res, Err(RecordStoreError::NotFound { id: 77 })));
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_delete_record_and_ignore_missing_one() {
        let store = store().await;
        let created = store.create(hotel()).await.unwrap();

        store.delete(created.id).await.unwrap();
        assert!(matches!(
            store.find_by_id(created.id).await,
            Err(RecordStoreError::NotFound { .. })
        ));

        assert!(store.delete(created.id).await.is_ok());
    }

    #[tokio::test]
    async fn should_filter_by_city_and_brand() {
        let store = store().await;
        store.create(named("如家外滩店", "上海", "如家")).await.unwrap();
        store.create(named("汉庭西单店", "北京", "汉庭")).await.unwrap();
        store.create(named("如家国贸店", "北京", "如家")).await.unwrap();

        let beijing = store.find_by_city(String::from("北京")).await.unwrap();
        let names = beijing.iter().map(|h| h.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["汉庭西单店", "如家国贸店"]);

        let home_inn = store.find_by_brand(String::from("如家")).await.unwrap();
        let names = home_inn.iter().map(|h| h.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["如家外滩店", "如家国贸店"]);

        assert!(store
            .find_by_brand(String::from("希尔顿"))
            .await
            .unwrap()
            .is_empty());
    }
}
