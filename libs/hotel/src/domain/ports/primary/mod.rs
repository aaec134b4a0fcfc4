pub mod list_hotels;
pub mod lookup_hotels;
pub mod manage_index;
