use crate::utils::deserialize::{deserialize_duration, serialize_duration};
use elasticsearch::Elasticsearch;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

pub mod configuration;
pub mod dsl;
pub(super) mod internal;
pub mod models;
pub mod remote;
pub mod search;
pub mod storage;

#[cfg(test)]
pub(crate) mod fake;

/// A structure wrapping around the elasticsearch's client.
#[derive(Clone, Debug)]
pub struct ElasticsearchStorage {
    /// Elasticsearch client
    pub(crate) client: Elasticsearch,
    /// Client configuration
    pub config: ElasticsearchStorageConfig,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ElasticsearchStorageConfig {
    pub url: Url,
    /// Sent as `Authorization: ApiKey <key>` when present.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Index serving the full text listing.
    pub index: String,
    pub analyzer: String,
    #[serde(
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub timeout: Duration,
    /// Skip TLS certificate validation.
    pub insecure: bool,
    pub insertion_chunk_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_read_configuration_with_optional_api_key() {
        let config: ElasticsearchStorageConfig = serde_json::from_value(serde_json::json!({
            "url": "https://es.example.com:9243",
            "index": "hotel",
            "analyzer": "standard",
            "timeout": 2500,
            "insecure": true,
            "insertion_chunk_size": 50
        }))
        .unwrap();

        assert_eq!(config.api_key, None);
        assert_eq!(config.timeout, Duration::from_millis(2500));
        assert_eq!(config.url.host_str(), Some("es.example.com"));
    }

    #[test]
    fn should_not_print_api_key() {
        let config = ElasticsearchStorageConfig {
            api_key: Some(String::from("secret")),
            ..fake::config(Url::parse("http://localhost:9200").unwrap())
        };
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("api_key").is_none());
        assert_eq!(json["timeout"], 10000);
    }
}
