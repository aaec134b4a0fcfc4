use async_trait::async_trait;
use elasticsearch::cert::CertificateValidation;
use elasticsearch::http::headers::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION};
use elasticsearch::http::transport::{
    BuildError as TransportBuilderError, SingleNodeConnectionPool, TransportBuilder,
};
use elasticsearch::Elasticsearch;
use snafu::{ResultExt, Snafu};
use tracing::info;
use url::Url;

use super::{ElasticsearchStorage, ElasticsearchStorageConfig};
use crate::domain::ports::secondary::remote::{Error as RemoteError, Remote};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Invalid API Key: {}", source))]
    InvalidApiKey { source: InvalidHeaderValue },

    /// Elasticsearch Build Error
    #[snafu(display("Elasticsearch Connection Error: {}", source))]
    ElasticsearchConnection { source: TransportBuilderError },
}

#[async_trait]
impl Remote for SingleNodeConnectionPool {
    type Conn = ElasticsearchStorage;
    type Config = ElasticsearchStorageConfig;

    /// Use the connection to create a client.
    async fn conn(self, config: Self::Config) -> Result<Self::Conn, RemoteError> {
        build_client(self, &config)
            .map(|client| ElasticsearchStorage { client, config })
            .map_err(|err| RemoteError::Connection {
                source: Box::new(err),
            })
    }
}

fn build_client(
    pool: SingleNodeConnectionPool,
    config: &ElasticsearchStorageConfig,
) -> Result<Elasticsearch, Error> {
    let mut builder = TransportBuilder::new(pool)
        .disable_proxy()
        .timeout(config.timeout);

    if config.insecure {
        info!("Elasticsearch certificate validation is disabled");
        builder = builder.cert_validation(CertificateValidation::None);
    }

    if let Some(api_key) = config.api_key.as_ref() {
        let mut headers = HeaderMap::new();
        let mut value =
            HeaderValue::from_str(&format!("ApiKey {}", api_key)).context(InvalidApiKeySnafu)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
        builder = builder.headers(headers);
    }

    let transport = builder.build().context(ElasticsearchConnectionSnafu)?;
    Ok(Elasticsearch::new(transport))
}

/// Open a connection to elasticsearch
pub fn connection_pool_url(url: &Url) -> SingleNodeConnectionPool {
    SingleNodeConnectionPool::new(url.clone())
}
