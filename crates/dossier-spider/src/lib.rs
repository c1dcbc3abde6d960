pub mod cik;
pub mod company;
pub mod config;
pub mod error;
pub mod extract;
pub mod fs;
pub mod source;
pub mod store;
pub mod tui;

pub use cik::Cik;
pub use config::Config;
pub use error::Error;

use crate::source::Source;
use crate::store::Store;
use indicatif::ProgressBar;
use tracing::{debug, error, info};

/// Shortcut for required API elements.
pub(crate) mod http {
    pub(crate) use dotenv::var;
    pub(crate) use reqwest::Client as HttpClient;
}

/// Tally of a collection run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Collect every company in `ciks`, one after another: fetch from `source`, extract, and
/// upsert into `store`.
///
/// A failure only ever costs the company it happened on; it is logged and the run moves on.
pub async fn run<S, D>(source: &S, store: &D, ciks: &[Cik], pb: &ProgressBar) -> Summary
where
    S: Source + ?Sized,
    D: Store + ?Sized,
{
    let time = std::time::Instant::now();
    let mut summary = Summary::default();

    for cik in ciks {
        pb.set_message(format!("CIK{cik}"));
        match collect(source, store, cik).await {
            Ok(()) => summary.succeeded += 1,
            Err(err) => {
                error!("failed to collect CIK{cik}, error({err})");
                summary.failed += 1;
            }
        }
        pb.inc(1);
    }

    info!(
        "collected {} of {} companies ({} failed), {}",
        summary.succeeded,
        ciks.len(),
        summary.failed,
        time_elapsed(time)
    );

    summary
}

/// Fetch, extract and store a single company.
async fn collect<S, D>(source: &S, store: &D, cik: &Cik) -> anyhow::Result<()>
where
    S: Source + ?Sized,
    D: Store + ?Sized,
{
    let time = std::time::Instant::now();

    let submissions = source
        .submissions(cik)
        .await
        .ok_or_else(|| anyhow::anyhow!("no submissions fetched for CIK{cik}"))?;

    // facts are optional; without them the filing index is all there is
    let facts = source.facts(cik).await;
    if facts.is_none() {
        debug!("no company facts for CIK{cik}, using the filing index only");
    }

    let company = extract::company(cik, &submissions, facts.as_ref(), chrono::Utc::now());
    store.upsert(&company).await?;

    info!(
        "stored CIK{cik} {}, {}",
        company.profile.name,
        time_elapsed(time)
    );

    Ok(())
}

/// Human readable elapsed time since `time`.
pub(crate) fn time_elapsed(time: std::time::Instant) -> String {
    format!("time elapsed: {:.2?}", time.elapsed())
}
