use clap::{Parser, Subcommand};
use snafu::{ResultExt, Snafu};
use std::path::PathBuf;

use hotel::adapters::primary::api::handlers::Settings;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Config Error: {}", source))]
    Config {
        source: hotel_search::settings::Error,
    },

    #[snafu(display("Config Merge Error: {} [{}]", msg, source))]
    ConfigMerge {
        msg: String,
        source: config::ConfigError,
    },
}

#[derive(Debug, Parser)]
#[command(name = "hotel-api", about = "REST API for hotel records and search", version)]
pub struct Opts {
    /// Defines the config directory
    ///
    /// This directory may contain 'api', 'database' and 'elasticsearch' subdirectories.
    #[arg(short = 'c', long = "config-dir")]
    pub config_dir: PathBuf,

    /// Defines the run mode in {testing, dev, prod, ...}
    #[arg(short = 'm', long = "run-mode")]
    pub run_mode: Option<String>,

    /// Override settings values using key=value
    #[arg(short = 's', long = "setting")]
    pub settings: Vec<String>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the api
    Run,
    /// Prints the api's configuration
    Config,
}

// Reads the configuration from <config-dir>/api, <config-dir>/database and
// <config-dir>/elasticsearch, over the fallbacks of hotel_search::settings.
impl TryFrom<&Opts> for Settings {
    type Error = Error;

    fn try_from(opts: &Opts) -> Result<Self, Self::Error> {
        let config = hotel_search::settings::build_config(
            opts.config_dir.as_ref(),
            &["api", "database", "elasticsearch"],
            opts.run_mode.as_deref(),
            opts.settings.clone(),
        )
        .context(ConfigSnafu)?;

        config.try_deserialize().context(ConfigMergeSnafu {
            msg: "Cannot convert configuration into api settings",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn opts(run_mode: Option<&str>, settings: Vec<String>) -> Opts {
        Opts {
            config_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config"),
            run_mode: run_mode.map(String::from),
            settings,
            cmd: Command::Run,
        }
    }

    #[test]
    #[serial]
    fn should_return_ok_with_default_config_dir() {
        let settings = Settings::try_from(&opts(Some("testing"), vec![])).unwrap();

        assert_eq!(settings.mode, "testing");
        assert_eq!(settings.service.port, 5089);
        assert_eq!(settings.service.content_length_limit, 32768);
        assert_eq!(settings.database.max_connections, 1);
    }

    #[test]
    #[serial]
    fn should_override_service_port_with_command_line() {
        let settings =
            Settings::try_from(&opts(None, vec![String::from("service.port=9999")])).unwrap();

        assert_eq!(settings.service.port, 9999);
        assert_eq!(settings.elasticsearch.analyzer, "ik_max_word");
    }

    #[test]
    #[serial]
    fn should_override_service_port_with_environment_variable() {
        std::env::set_var("HOTEL_SERVICE__PORT", "7777");
        let settings = Settings::try_from(&opts(None, vec![]));
        std::env::remove_var("HOTEL_SERVICE__PORT");

        assert_eq!(settings.unwrap().service.port, 7777);
    }

    #[test]
    #[serial]
    fn should_override_keys_with_underscores_with_environment_variables() {
        std::env::set_var("HOTEL_ELASTICSEARCH__API_KEY", "c2VjcmV0");
        std::env::set_var("HOTEL_DATABASE__MAX_CONNECTIONS", "3");
        std::env::set_var("HOTEL_SERVICE__CONTENT_LENGTH_LIMIT", "1024");
        let settings = Settings::try_from(&opts(None, vec![]));
        std::env::remove_var("HOTEL_ELASTICSEARCH__API_KEY");
        std::env::remove_var("HOTEL_DATABASE__MAX_CONNECTIONS");
        std::env::remove_var("HOTEL_SERVICE__CONTENT_LENGTH_LIMIT");

        let settings = settings.unwrap();
        assert_eq!(settings.elasticsearch.api_key.as_deref(), Some("c2VjcmV0"));
        assert_eq!(settings.database.max_connections, 3);
        assert_eq!(settings.service.content_length_limit, 1024);
    }
}
