/// This module contains the definition for hotel-index configuration and command line arguments.
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use snafu::{ResultExt, Snafu};
use std::path::PathBuf;

use hotel::adapters::primary::api::handlers::Logging;
use hotel::adapters::secondary::{elasticsearch::ElasticsearchStorageConfig, sql::SqlStorageConfig};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Config Error: {}", source))]
    Config { source: super::Error },

    #[snafu(display("Config Merge Error: {} [{}]", msg, source))]
    ConfigMerge {
        msg: String,
        source: config::ConfigError,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub mode: Option<String>,
    #[serde(default)]
    pub logging: Logging,
    pub database: SqlStorageConfig,
    pub elasticsearch: ElasticsearchStorageConfig,
    pub nb_threads: Option<usize>,
}

#[derive(Debug, Parser)]
#[command(name = "hotel-index", about = "Manage the hotel search index", version)]
pub struct Opts {
    /// Defines the config directory
    ///
    /// This directory may contain 'index', 'database' and 'elasticsearch' subdirectories.
    #[arg(short = 'c', long = "config-dir")]
    pub config_dir: PathBuf,

    /// Defines the run mode in {testing, dev, prod, ...}
    ///
    /// If no run mode is provided, a default behavior will be used.
    #[arg(short = 'm', long = "run-mode")]
    pub run_mode: Option<String>,

    /// Override settings values using key=value
    #[arg(short = 's', long = "setting")]
    pub settings: Vec<String>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Creates the index with the hotel mapping
    Create,
    /// Deletes the index
    Delete,
    /// Tells whether the index exists
    Exists,
    /// Indexes every hotel record, creating the index if needed
    Import,
    /// Prints the indexed document with the given id
    Get { id: i64 },
    /// Removes the indexed document with the given id
    Remove { id: i64 },
    /// Prints hotel-index's configuration
    Config,
}

impl Settings {
    // Read the configuration from <config-dir>/index, <config-dir>/database and
    // <config-dir>/elasticsearch
    pub fn new(opts: &Opts) -> Result<Self, Error> {
        let config = super::build_config(
            opts.config_dir.as_ref(),
            &["index", "database", "elasticsearch"],
            opts.run_mode.as_deref(),
            opts.settings.clone(),
        )
        .context(ConfigSnafu)?;

        config.try_deserialize().context(ConfigMergeSnafu {
            msg: "Cannot convert configuration into hotel-index settings",
        })
    }
}
