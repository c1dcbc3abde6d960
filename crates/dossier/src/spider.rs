use deadpool_postgres::{ManagerConfig, RecyclingMethod, Runtime};
use dossier_spider::source::{Buffer, EdgarApi, Source};
use dossier_spider::store::{MemoryStore, PgStore};
use dossier_spider::tui::{banner, progress};
use dossier_spider::{self as spider, Cik, Config};
use std::path::PathBuf;
use tracing::{debug, error, info, trace};

/// Collect every requested company into the document store.
pub(crate) async fn run(
    ciks: Option<Vec<String>>,
    buffer: Option<PathBuf>,
    dry_run: bool,
    tui: bool,
) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    trace!("config loaded: {config:?}");

    // if no CIKs provided, collect the built-in list
    let ciks: Vec<Cik> = match ciks {
        Some(ciks) => ciks
            .iter()
            .map(|raw| Cik::parse(raw))
            .collect::<Result<_, _>>()?,
        None => spider::config::default_ciks(),
    };

    // 1. pick the source
    let source: Box<dyn Source + Send + Sync> = match buffer {
        Some(dir) => {
            debug!("reading payloads from {}", dir.display());
            Box::new(Buffer::new(dir))
        }
        None => Box::new(EdgarApi::new(&config)?),
    };

    // 2. pick the store and start collecting
    if tui {
        println!("{}", banner("SEC EDGAR"));
    }
    let pb = progress(ciks.len(), tui)?;

    let summary = if dry_run {
        let store = MemoryStore::new();
        let summary = spider::run(source.as_ref(), &store, &ciks, &pb).await;
        pb.finish_and_clear();
        for doc in store.documents() {
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        summary
    } else {
        let store = connect(&config).await?;
        let summary = spider::run(source.as_ref(), &store, &ciks, &pb).await;
        pb.finish_and_clear();
        summary
    };

    info!(
        "dossier finished: {} collected, {} failed",
        summary.succeeded, summary.failed
    );
    if tui {
        println!(
            "collected {} of {} companies ({} failed)",
            summary.succeeded,
            ciks.len(),
            summary.failed
        );
    }

    Ok(())
}

/// Build the dossier connection pool and make sure the collection exists.
async fn connect(config: &Config) -> anyhow::Result<PgStore> {
    trace!("creating postgres connection pool config");
    let mut pg_config = deadpool_postgres::Config::new();
    pg_config.url = Some(config.database_url.clone());
    pg_config.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });

    trace!("creating dossier connection pool");
    let pool = pg_config
        .create_pool(Some(Runtime::Tokio1), tokio_postgres::NoTls)
        .map_err(|err| {
            error!("dossier connection pool error: {err}");
            err
        })?;

    let store = PgStore::new(pool);
    store.init().await?;
    debug!("dossier connection pool established");

    Ok(store)
}
