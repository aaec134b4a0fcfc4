use config::{builder::DefaultState, Config, ConfigBuilder, Environment, File};
use snafu::{ResultExt, Snafu};
use std::env;
use std::path::Path;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Key Value Splitting Error: {}", msg))]
    Splitting { msg: String },

    #[snafu(display("Setting Config Value Error: {}", source))]
    ConfigValue { source: config::ConfigError },

    #[snafu(display("Config Compilation Error: {}", source))]
    ConfigCompilation { source: config::ConfigError },
}

/// Create a new configuration source from a list of assignments key=value
///
/// The function iterates over the list, and for each element, it tries to
/// (a) identify the key and the value, by searching for the '=' sign.
/// (b) parse the value into one of bool, i64, f64. if not it's a string.
pub fn config_from_args(args: impl IntoIterator<Item = String>) -> Result<Config, Error> {
    let mut config = Config::builder();

    for arg in args {
        let (key, val) = arg.split_once('=').ok_or(Error::Splitting {
            msg: format!("missing '=' in setting override: {}", arg),
        })?;

        config = {
            if let Ok(as_bool) = val.parse::<bool>() {
                config.set_override(key, as_bool).context(ConfigValueSnafu)
            } else if let Ok(as_int) = val.parse::<i64>() {
                config.set_override(key, as_int).context(ConfigValueSnafu)
            } else if let Ok(as_float) = val.parse::<f64>() {
                config.set_override(key, as_float).context(ConfigValueSnafu)
            } else {
                config.set_override(key, val).context(ConfigValueSnafu)
            }
        }?
    }

    config.build().context(ConfigCompilationSnafu)
}

// Layers, for each sub directory of the config directory:
// * '<sub_dir>/default.toml', if present,
// * '<sub_dir>/<run_mode>.toml', where the RUN_MODE environment variable takes precedence
//   over the run mode given as argument. This file must exist once a run mode is requested.
// * '<sub_dir>/local.toml', if present. This file shouldn't be checked in to git.
// Then the environment, with the given prefix. Nested keys are separated by a double
// underscore: HOTEL_SERVICE__PORT=8080 sets 'service.port', and
// HOTEL_ELASTICSEARCH__API_KEY sets 'elasticsearch.api_key'.
pub fn config_builder_from<'a, T: Into<Option<&'a str>> + Clone>(
    config_dir: &Path,
    sub_dirs: &[&str],
    run_mode: T,
    prefix: &str,
) -> ConfigBuilder<DefaultState> {
    let run_mode = env::var("RUN_MODE")
        .ok()
        .or_else(|| run_mode.into().map(String::from));

    let builder = sub_dirs
        .iter()
        .fold(Config::builder(), |mut builder, sub_dir| {
            let dir_path = config_dir.join(sub_dir);

            let default_path = dir_path.join("default").with_extension("toml");
            builder = builder.add_source(File::from(default_path).required(false));

            if let Some(run_mode) = run_mode.as_ref() {
                let run_mode_path = dir_path.join(run_mode).with_extension("toml");
                builder = builder.add_source(File::from(run_mode_path).required(true));
            }

            let local_path = dir_path.join("local").with_extension("toml");
            builder.add_source(File::from(local_path).required(false))
        });

    builder.add_source(
        Environment::with_prefix(prefix)
            .prefix_separator("_")
            .separator("__"),
    )
}

/// Compiles the configuration found in the given sub directories of `config_dir`, and
/// applies the `key=value` overrides on top of it.
pub fn config_from<'a, T: Into<Option<&'a str>> + Clone>(
    config_dir: &Path,
    sub_dirs: &[&str],
    run_mode: T,
    prefix: &str,
    overrides: Vec<String>,
) -> Result<Config, Error> {
    config_builder_from(config_dir, sub_dirs, run_mode, prefix)
        .add_source(config_from_args(overrides)?)
        .build()
        .context(ConfigCompilationSnafu)
}
