pub mod error;
pub mod hotel;
pub mod search;
pub mod stats;
