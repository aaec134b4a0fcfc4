pub mod api;
pub mod handlers;
pub mod routes;
