use hotel_search::utils::{launch::launch_with_runtime, logger::logger_init};
use snafu::{ResultExt, Snafu};
use sqlx::any::AnyPoolOptions;
use std::net::ToSocketAddrs;
use tracing::{info, instrument};

use super::settings::{Error as SettingsError, Opts};
use hotel::adapters::primary::api::handlers::{Context, Settings};
use hotel::adapters::primary::api::routes;
use hotel::adapters::secondary::elasticsearch::remote::connection_pool_url;
use hotel::domain::ports::secondary::remote::{Error as PortRemoteError, Remote};
use hotel::domain::usecases::hotel_service::HotelService;

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Could not establish Elasticsearch Connection: {}", source))]
    ElasticsearchConnection { source: PortRemoteError },

    #[snafu(display("Could not establish Database Connection: {}", source))]
    DatabaseConnection { source: PortRemoteError },

    #[snafu(display("Could not generate settings: {}", source))]
    SettingsProcessing { source: SettingsError },

    #[snafu(display("Socket Addr Error with host {} / port {}: {}", host, port, source))]
    SockAddr {
        host: String,
        port: u16,
        source: std::io::Error,
    },

    #[snafu(display("Addr Resolution Error {}", msg))]
    AddrResolution { msg: String },

    #[snafu(display("Could not init logger: {}", source))]
    InitLog {
        source: hotel_search::utils::logger::Error,
    },

    #[snafu(display("Could not start the runtime: {}", source))]
    Runtime {
        source: hotel_search::utils::launch::Error,
    },

    #[snafu(display("Could not serialize settings: {}", source))]
    SettingsSerialization { source: serde_json::Error },
}

pub fn run(opts: &Opts) -> Result<(), Error> {
    let settings: Settings = opts.try_into().context(SettingsProcessingSnafu)?;
    let _log_guard = logger_init(settings.logging.path.as_ref()).context(InitLogSnafu)?;

    launch_with_runtime(settings.nb_threads, run_server(settings)).context(RuntimeSnafu)?
}

pub fn config(opts: &Opts) -> Result<(), Error> {
    let settings: Settings = opts.try_into().context(SettingsProcessingSnafu)?;
    let json = serde_json::to_string_pretty(&settings).context(SettingsSerializationSnafu)?;
    println!("{}", json);
    Ok(())
}

#[instrument(skip(settings))]
pub async fn run_server(settings: Settings) -> Result<(), Error> {
    info!(
        "Connecting to Elasticsearch at {}",
        &settings.elasticsearch.url
    );
    let search = connection_pool_url(&settings.elasticsearch.url)
        .conn(settings.elasticsearch.clone())
        .await
        .context(ElasticsearchConnectionSnafu)?;

    let records = AnyPoolOptions::new()
        .conn(settings.database.clone())
        .await
        .context(DatabaseConnectionSnafu)?;

    // Shared by all handlers, records answer lookups and the index answers listings.
    let ctx = Context::new(HotelService::new(records, search));
    let api = routes::hotel_api(ctx, settings.service.content_length_limit);

    info!("api ready");

    let host = settings.service.host;
    let port = settings.service.port;
    let addr = (host.as_str(), port);
    let addr = addr
        .to_socket_addrs()
        .context(SockAddrSnafu { host: host.clone(), port })?
        .next()
        .ok_or(Error::AddrResolution {
            msg: String::from("Cannot resolve the api addr."),
        })?;

    info!("Serving the hotel api on {}", addr);
    warp::serve(api).run(addr).await;
    Ok(())
}
