pub mod elasticsearch;
pub mod sql;
