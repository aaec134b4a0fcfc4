pub mod record_store;
pub mod remote;
pub mod search;
pub mod storage;
