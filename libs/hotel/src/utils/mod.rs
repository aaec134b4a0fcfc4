pub mod deserialize;
