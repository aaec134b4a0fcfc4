use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::instrument;
use warp::{
    http::StatusCode,
    reject::Reject,
    reply::{json, with_status},
};

use crate::{
    adapters::{
        primary::api::api::{DeleteResponse, HealthResponse, HotelPageResponse, PageQuery},
        secondary::{elasticsearch::ElasticsearchStorageConfig, sql::SqlStorageConfig},
    },
    domain::{
        model::{error::Error as ModelError, hotel::Hotel, search::SearchRequest},
        ports::primary::{list_hotels::ListHotels, lookup_hotels::LookupHotels},
    },
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    /// Host on which we expose the api. Example: 'http://localhost', '0.0.0.0'
    pub host: String,
    /// Port on which we expose the api.
    pub port: u16,
    /// Used on POST and PUT requests to set an upper limit on the size of the body (in bytes)
    pub content_length_limit: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Logging {
    /// A directory gets a daily rolling file, a file is appended to, stdout otherwise.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub mode: String,
    #[serde(default)]
    pub logging: Logging,
    pub database: SqlStorageConfig,
    pub elasticsearch: ElasticsearchStorageConfig,
    pub service: Service,
    pub nb_threads: Option<usize>,
}

/// Shared by every handler, built once when the server starts.
pub struct Context<S> {
    pub service: Arc<S>,
}

impl<S> Clone for Context<S> {
    fn clone(&self) -> Self {
        Context {
            service: self.service.clone(),
        }
    }
}

impl<S> Context<S> {
    pub fn new(service: S) -> Self {
        Context {
            service: Arc::new(service),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub enum InternalErrorReason {
    ObjectNotFoundError,
    RecordStoreError,
    ElasticSearchError,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct InternalError {
    pub reason: InternalErrorReason,
    pub info: String,
}

impl Reject for InternalError {}

impl From<ModelError> for InternalError {
    fn from(err: ModelError) -> Self {
        let reason = match err {
            ModelError::HotelNotFound { .. } => InternalErrorReason::ObjectNotFoundError,
            ModelError::Search { .. } => InternalErrorReason::ElasticSearchError,
            _ => InternalErrorReason::RecordStoreError,
        };
        InternalError {
            reason,
            info: err.to_string(),
        }
    }
}

fn reject(err: ModelError) -> warp::Rejection {
    warp::reject::custom(InternalError::from(err))
}

pub async fn health() -> Result<impl warp::Reply, warp::Rejection> {
    Ok(with_status(json(&HealthResponse::default()), StatusCode::OK))
}

#[instrument(skip(ctx))]
pub async fn get_hotels_by_page<S>(
    ctx: Context<S>,
    params: PageQuery,
) -> Result<impl warp::Reply, warp::Rejection>
where
    S: LookupHotels,
{
    let page = params.page();
    let page_size = params.page_size();

    let (data, total) = ctx
        .service
        .get_hotels_by_page(page, page_size)
        .await
        .map_err(reject)?;

    let resp = HotelPageResponse {
        data,
        total,
        page,
        page_size,
    };
    Ok(with_status(json(&resp), StatusCode::OK))
}

#[instrument(skip(ctx))]
pub async fn get_hotel<S>(ctx: Context<S>, id: i64) -> Result<impl warp::Reply, warp::Rejection>
where
    S: LookupHotels,
{
    let doc = ctx.service.get_hotel_by_id(id).await.map_err(reject)?;
    Ok(with_status(json(&doc), StatusCode::OK))
}

#[instrument(skip(ctx, hotel))]
pub async fn create_hotel<S>(
    ctx: Context<S>,
    hotel: Hotel,
) -> Result<impl warp::Reply, warp::Rejection>
where
    S: LookupHotels,
{
    let hotel = ctx.service.create_hotel(hotel).await.map_err(reject)?;
    tracing::info!(id = hotel.id, "hotel created");
    Ok(with_status(json(&hotel), StatusCode::CREATED))
}

#[instrument(skip(ctx, hotel))]
pub async fn update_hotel<S>(
    ctx: Context<S>,
    id: i64,
    hotel: Hotel,
) -> Result<impl warp::Reply, warp::Rejection>
where
    S: LookupHotels,
{
    // The path decides which record is updated.
    let hotel = Hotel { id, ..hotel };
    let hotel = ctx.service.update_hotel(hotel).await.map_err(reject)?;
    Ok(with_status(json(&hotel), StatusCode::OK))
}

#[instrument(skip(ctx))]
pub async fn delete_hotel<S>(ctx: Context<S>, id: i64) -> Result<impl warp::Reply, warp::Rejection>
where
    S: LookupHotels,
{
    ctx.service.delete_hotel(id).await.map_err(reject)?;
    Ok(with_status(json(&DeleteResponse::default()), StatusCode::OK))
}

#[instrument(skip(ctx))]
pub async fn get_hotels_by_city<S>(
    ctx: Context<S>,
    city: String,
) -> Result<impl warp::Reply, warp::Rejection>
where
    S: LookupHotels,
{
    let docs = ctx.service.get_hotels_by_city(city).await.map_err(reject)?;
    Ok(with_status(json(&docs), StatusCode::OK))
}

#[instrument(skip(ctx))]
pub async fn get_hotels_by_brand<S>(
    ctx: Context<S>,
    brand: String,
) -> Result<impl warp::Reply, warp::Rejection>
where
    S: LookupHotels,
{
    let docs = ctx
        .service
        .get_hotels_by_brand(brand)
        .await
        .map_err(reject)?;
    Ok(with_status(json(&docs), StatusCode::OK))
}

#[instrument(skip(ctx))]
pub async fn list_hotels<S>(
    ctx: Context<S>,
    request: SearchRequest,
) -> Result<impl warp::Reply, warp::Rejection>
where
    S: ListHotels,
{
    let page = ctx.service.list_hotels(request).await.map_err(reject)?;
    Ok(with_status(json(&page), StatusCode::OK))
}
