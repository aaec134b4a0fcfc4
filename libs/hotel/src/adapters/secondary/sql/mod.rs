use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};
use sqlx::AnyPool;
use url::Url;

pub mod models;
pub mod record_store;
pub mod remote;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Invalid Database URL: {}", source))]
    InvalidUrl { source: url::ParseError },

    #[snafu(display("Invalid Database Settings: {}", details))]
    InvalidSettings { details: String },

    #[snafu(display("Database Connection Error: {}", source))]
    DatabaseConnection { source: sqlx::Error },
}

/// The relational store holding the hotel records, in table `tb_hotel`.
#[derive(Clone, Debug)]
pub struct SqlRecordStore {
    pub(crate) pool: AnyPool,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SqlStorageConfig {
    /// Full connection url, takes precedence over the individual settings.
    #[serde(default, skip_serializing)]
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub dbname: String,
    pub max_connections: u32,
}

impl SqlStorageConfig {
    /// The url to connect to, a MySQL one unless `url` is set.
    pub fn connection_url(&self) -> Result<String, Error> {
        if let Some(url) = self.url.as_ref() {
            return Ok(url.clone());
        }

        let invalid = |setting: &str| Error::InvalidSettings {
            details: format!("cannot use {} in a database url", setting),
        };

        let mut url = Url::parse("mysql://localhost").context(InvalidUrlSnafu)?;
        url.set_host(Some(&self.host)).context(InvalidUrlSnafu)?;
        url.set_port(Some(self.port)).map_err(|_| invalid("port"))?;
        url.set_username(&self.username)
            .map_err(|_| invalid("username"))?;
        url.set_password(Some(&self.password))
            .map_err(|_| invalid("password"))?;
        url.set_path(&self.dbname);

        Ok(url.to_string())
    }
}
