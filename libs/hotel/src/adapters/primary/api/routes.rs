use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use warp::{
    filters::body::BodyDeserializeError,
    http::StatusCode,
    path,
    reject::{MethodNotAllowed, PayloadTooLarge, Reject},
    Filter, Rejection, Reply,
};

use super::api::PageQuery;
use super::handlers::{self, Context, InternalError, InternalErrorReason};
use crate::domain::model::{hotel::Hotel, search::SearchRequest};
use crate::domain::ports::primary::{list_hotels::ListHotels, lookup_hotels::LookupHotels};

#[derive(Deserialize, Serialize, Debug)]
pub struct ApiError {
    pub short: String,
    pub long: String,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub enum InvalidRequestReason {
    CannotDecodePath,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct InvalidRequest {
    pub reason: InvalidRequestReason,
    pub info: String,
}

impl Reject for InvalidRequest {}

pub fn with_context<S>(
    ctx: Context<S>,
) -> impl Filter<Extract = (Context<S>,), Error = Infallible> + Clone
where
    S: Send + Sync,
{
    warp::any().map(move || ctx.clone())
}

/// Extracts a path segment, percent decoded: `/city/%E4%B8%8A%E6%B5%B7` gives `上海`.
pub fn decoded_segment() -> impl Filter<Extract = (String,), Error = Rejection> + Copy {
    warp::path::param::<String>().and_then(|segment: String| async move {
        percent_decode_str(&segment)
            .decode_utf8()
            .map(|decoded| decoded.into_owned())
            .map_err(|err| {
                warp::reject::custom(InvalidRequest {
                    reason: InvalidRequestReason::CannotDecodePath,
                    info: format!("{}: {}", segment, err),
                })
            })
    })
}

/// Extracts a JSON body, no larger than the given limit.
pub fn json_body<T>(
    content_length_limit: u64,
) -> impl Filter<Extract = (T,), Error = Rejection> + Copy
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(content_length_limit).and(warp::body::json())
}

/// All the endpoints of the hotel api, with errors turned into JSON replies.
///
/// Paths are matched before methods, so that an unknown path gives a 404 and
/// a known path with an unsupported method gives a 405.
pub fn hotel_api<S>(
    ctx: Context<S>,
    content_length_limit: u64,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone
where
    S: LookupHotels + ListHotels + Send + Sync + 'static,
{
    let health = path!("health")
        .and(warp::get())
        .and_then(handlers::health);

    let page = path!("api" / "hotel")
        .and(warp::get())
        .and(with_context(ctx.clone()))
        .and(warp::query::<PageQuery>())
        .and_then(handlers::get_hotels_by_page);

    let create = path!("api" / "hotel")
        .and(warp::post())
        .and(with_context(ctx.clone()))
        .and(json_body::<Hotel>(content_length_limit))
        .and_then(handlers::create_hotel);

    let list = path!("api" / "hotel" / "list")
        .and(warp::post())
        .and(with_context(ctx.clone()))
        .and(json_body::<SearchRequest>(content_length_limit))
        .and_then(handlers::list_hotels);

    let by_city = warp::path!("api" / "hotel" / "city" / ..)
        .and(decoded_segment())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_context(ctx.clone()))
        .and_then(|city: String, ctx: Context<S>| {
            handlers::get_hotels_by_city(ctx, city)
        });

    let by_brand = warp::path!("api" / "hotel" / "brand" / ..)
        .and(decoded_segment())
        .and(warp::path::end())
        .and(warp::get())
        .and(with_context(ctx.clone()))
        .and_then(|brand: String, ctx: Context<S>| {
            handlers::get_hotels_by_brand(ctx, brand)
        });

    let get = path!("api" / "hotel" / i64)
        .and(warp::get())
        .and(with_context(ctx.clone()))
        .and_then(|id: i64, ctx: Context<S>| handlers::get_hotel(ctx, id));

    let update = path!("api" / "hotel" / i64)
        .and(warp::put())
        .and(with_context(ctx.clone()))
        .and(json_body::<Hotel>(content_length_limit))
        .and_then(|id: i64, ctx: Context<S>, hotel: Hotel| {
            handlers::update_hotel(ctx, id, hotel)
        });

    let delete = path!("api" / "hotel" / i64)
        .and(warp::delete())
        .and(with_context(ctx))
        .and_then(|id: i64, ctx: Context<S>| handlers::delete_hotel(ctx, id));

    health
        .or(page)
        .or(create)
        .or(list)
        .or(by_city)
        .or(by_brand)
        .or(get)
        .or(update)
        .or(delete)
        .recover(report_invalid)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "request",
                method = %info.method(),
                path = %info.path(),
            )
        }))
}

fn api_error(
    short: &str,
    long: String,
    status: StatusCode,
) -> warp::reply::WithStatus<warp::reply::Json> {
    warp::reply::with_status(
        warp::reply::json(&ApiError {
            short: short.to_string(),
            long,
        }),
        status,
    )
}

pub async fn report_invalid(rejection: Rejection) -> Result<impl Reply, Infallible> {
    let reply = if let Some(err) = rejection.find::<InternalError>() {
        match err.reason {
            InternalErrorReason::ObjectNotFoundError => {
                tracing::info!("Object not found {:?}", err);
                api_error(
                    "Unable to find object",
                    err.info.clone(),
                    StatusCode::NOT_FOUND,
                )
            }
            _ => {
                tracing::error!("Internal error {:?}", err);
                api_error(
                    "query error",
                    err.info.clone(),
                    StatusCode::INTERNAL_SERVER_ERROR,
                )
            }
        }
    } else if let Some(err) = rejection.find::<InvalidRequest>() {
        tracing::warn!("Invalid request {:?}", err);
        api_error("validation error", err.info.clone(), StatusCode::BAD_REQUEST)
    } else if let Some(err) = rejection.find::<warp::reject::InvalidQuery>() {
        tracing::warn!("Invalid query {:?}", err);
        api_error("invalid query", err.to_string(), StatusCode::BAD_REQUEST)
    } else if let Some(err) = rejection.find::<BodyDeserializeError>() {
        tracing::warn!("Invalid body {:?}", err);
        api_error("invalid body", err.to_string(), StatusCode::BAD_REQUEST)
    } else if let Some(err) = rejection.find::<PayloadTooLarge>() {
        tracing::warn!("Payload too large {:?}", err);
        api_error(
            "payload too large",
            err.to_string(),
            StatusCode::PAYLOAD_TOO_LARGE,
        )
    } else if let Some(err) = rejection.find::<MethodNotAllowed>() {
        tracing::warn!("MethodNotAllowed {:?}", err);
        api_error(
            "method not allowed",
            err.to_string(),
            StatusCode::METHOD_NOT_ALLOWED,
        )
    } else if rejection.is_not_found() {
        api_error("no route", String::from("Not Found"), StatusCode::NOT_FOUND)
    } else {
        tracing::warn!("Unhandled rejection {:?}", rejection);
        api_error(
            "bad request",
            format!("{:?}", rejection),
            StatusCode::BAD_REQUEST,
        )
    };
    Ok(reply)
}
