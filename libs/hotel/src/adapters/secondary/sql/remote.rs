use async_trait::async_trait;
use snafu::ResultExt;
use sqlx::any::AnyPoolOptions;
use tracing::info;

use super::{DatabaseConnectionSnafu, Error, SqlRecordStore, SqlStorageConfig};
use crate::domain::ports::secondary::remote::{Error as RemoteError, Remote};

#[async_trait]
impl Remote for AnyPoolOptions {
    type Conn = SqlRecordStore;
    type Config = SqlStorageConfig;

    async fn conn(self, config: Self::Config) -> Result<Self::Conn, RemoteError> {
        connect(self, &config)
            .await
            .map(|pool| SqlRecordStore { pool })
            .map_err(|err| RemoteError::Connection {
                source: Box::new(err),
            })
    }
}

async fn connect(options: AnyPoolOptions, config: &SqlStorageConfig) -> Result<sqlx::AnyPool, Error> {
    sqlx::any::install_default_drivers();

    let url = config.connection_url()?;
    match config.url {
        Some(_) => info!("connecting to the configured database url"),
        None => info!(
            "connecting to {}:{}/{} with at most {} connections",
            config.host, config.port, config.dbname, config.max_connections
        ),
    }

    options
        .max_connections(config.max_connections)
        .connect(&url)
        .await
        .context(DatabaseConnectionSnafu)
}
