use clap::Parser;
use serde::Serialize;
use snafu::{ResultExt, Snafu};
use sqlx::any::AnyPoolOptions;
use tracing::info;

use hotel::adapters::secondary::elasticsearch::remote::connection_pool_url;
use hotel::domain::model::error::Error as ModelError;
use hotel::domain::ports::primary::{lookup_hotels::LookupHotels, manage_index::ManageIndex};
use hotel::domain::ports::secondary::remote::{Error as RemoteError, Remote};
use hotel::domain::usecases::hotel_service::HotelService;
use hotel_search::settings::hotel_index as settings;
use hotel_search::utils::{launch::launch_with_runtime, logger::logger_init};

#[derive(Debug, Snafu)]
pub enum Error {
    #[snafu(display("Settings (Configuration or CLI) Error: {}", source))]
    Settings { source: settings::Error },

    #[snafu(display("Could not init logger: {}", source))]
    InitLog {
        source: hotel_search::utils::logger::Error,
    },

    #[snafu(display("Runtime Error: {}", source))]
    Runtime {
        source: hotel_search::utils::launch::Error,
    },

    #[snafu(display("Elasticsearch Connection Pool {}", source))]
    ElasticsearchConnection { source: RemoteError },

    #[snafu(display("Database Connection Pool {}", source))]
    DatabaseConnection { source: RemoteError },

    #[snafu(display("Index Administration Error: {}", source))]
    Index { source: ModelError },

    #[snafu(display("Hotel Records Error: {}", source))]
    Records { source: ModelError },

    #[snafu(display("Could not serialize {}: {}", what, source))]
    Serialization {
        what: String,
        source: serde_json::Error,
    },
}

fn to_json<T: Serialize>(value: &T, what: &str) -> Result<String, Error> {
    serde_json::to_string_pretty(value).context(SerializationSnafu { what })
}

fn main() -> Result<(), Error> {
    let opts = settings::Opts::parse();
    let settings = settings::Settings::new(&opts).context(SettingsSnafu)?;

    if opts.cmd == settings::Command::Config {
        println!("{}", to_json(&settings, "settings")?);
        return Ok(());
    }

    let _log_guard = logger_init(settings.logging.path.as_ref()).context(InitLogSnafu)?;

    launch_with_runtime(settings.nb_threads, run(opts.cmd, settings)).context(RuntimeSnafu)?
}

async fn run(cmd: settings::Command, settings: settings::Settings) -> Result<(), Error> {
    info!(
        "Trying to connect to elasticsearch at {}",
        &settings.elasticsearch.url
    );
    let storage = connection_pool_url(&settings.elasticsearch.url)
        .conn(settings.elasticsearch.clone())
        .await
        .context(ElasticsearchConnectionSnafu)?;

    info!("Connected to elasticsearch.");

    let index = settings.elasticsearch.index.clone();

    match cmd {
        settings::Command::Create => {
            storage.create_index(index.clone()).await.context(IndexSnafu)?;
            println!("index {} created", index);
        }
        settings::Command::Delete => {
            storage.delete_index(index.clone()).await.context(IndexSnafu)?;
            println!("index {} deleted", index);
        }
        settings::Command::Exists => {
            let exists = storage.index_exists(index).await.context(IndexSnafu)?;
            println!("{}", exists);
        }
        settings::Command::Import => {
            let records = AnyPoolOptions::new()
                .conn(settings.database.clone())
                .await
                .context(DatabaseConnectionSnafu)?;

            let service = HotelService::new(records, storage.clone());
            let docs = service.get_all_hotels().await.context(RecordsSnafu)?;
            info!("read {} hotel records", docs.len());

            let stats = storage
                .import_documents(index, futures::stream::iter(docs))
                .await
                .context(IndexSnafu)?;
            println!("{} created, {} updated", stats.created, stats.updated);
        }
        settings::Command::Get { id } => {
            match storage
                .find_document(index, id.to_string())
                .await
                .context(IndexSnafu)?
            {
                Some(doc) => println!("{}", to_json(&doc, &format!("document {}", id))?),
                None => println!("no document {}", id),
            }
        }
        settings::Command::Remove { id } => {
            let removed = storage
                .remove_document(index, id.to_string())
                .await
                .context(IndexSnafu)?;
            if removed {
                println!("document {} removed", id);
            } else {
                println!("no document {}", id);
            }
        }
        settings::Command::Config => {}
    }

    Ok(())
}
