//! Configuration shared by the hotel binaries.
//!
//! Settings are read from sub directories of a config directory, see
//! `common::config::config_from`, on top of hardcoded fallbacks so that a
//! binary can start without any file. The `DATABASE_URL` and
//! `ELASTICSEARCH_URL` environment variables take precedence over everything.
use config::{builder::DefaultState, Config, ConfigBuilder};
use snafu::{ResultExt, Snafu};
use std::env;
use std::path::Path;

pub mod hotel_index;

/// Prefix of the environment variables overriding settings, eg `HOTEL_SERVICE__PORT`
/// or `HOTEL_ELASTICSEARCH__API_KEY`.
pub const ENV_PREFIX: &str = "HOTEL";

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Config Compilation Error: {}", source))]
    ConfigCompilation { source: common::config::Error },

    #[snafu(display("Config Merge Error: {} [{}]", msg, source))]
    ConfigMerge {
        msg: String,
        source: config::ConfigError,
    },
}

fn with_fallbacks(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    builder
        .set_default("mode", "default")?
        .set_default("service.host", "0.0.0.0")?
        .set_default("service.port", 8089_i64)?
        .set_default("service.content_length_limit", 32768_i64)?
        .set_default("database.host", "localhost")?
        .set_default("database.port", 3306_i64)?
        .set_default("database.username", "root")?
        .set_default("database.password", "123")?
        .set_default("database.dbname", "heima")?
        .set_default("database.max_connections", 10_i64)?
        .set_default("elasticsearch.url", "http://localhost:9200")?
        .set_default("elasticsearch.index", "hotel")?
        .set_default("elasticsearch.analyzer", "ik_max_word")?
        .set_default("elasticsearch.timeout", 10000_i64)?
        .set_default("elasticsearch.insecure", false)?
        .set_default("elasticsearch.insertion_chunk_size", 100_i64)
}

fn with_backend_env(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, config::ConfigError> {
    let builder = match env::var("DATABASE_URL") {
        Ok(url) => builder.set_override("database.url", url)?,
        Err(_) => builder,
    };
    match env::var("ELASTICSEARCH_URL") {
        Ok(url) => builder.set_override("elasticsearch.url", url),
        Err(_) => Ok(builder),
    }
}

/// Compiles the configuration of a binary, read from `sub_dirs` of `config_dir`.
pub fn build_config(
    config_dir: &Path,
    sub_dirs: &[&str],
    run_mode: Option<&str>,
    overrides: Vec<String>,
) -> Result<Config, Error> {
    let builder = with_fallbacks(Config::builder()).context(ConfigMergeSnafu {
        msg: "Cannot register default settings",
    })?;

    let builder = builder.add_source(
        common::config::config_from(config_dir, sub_dirs, run_mode, ENV_PREFIX, overrides)
            .context(ConfigCompilationSnafu)?,
    );

    with_backend_env(builder)
        .context(ConfigMergeSnafu {
            msg: "Cannot read backend urls from the environment",
        })?
        .build()
        .context(ConfigMergeSnafu {
            msg: "Cannot build the configuration from sources",
        })
}
