//! Where company payloads come from.
//!
//! Both payloads are handed on undecoded beyond [`serde_json::Value`]; the extractor reads
//! only the fields it needs and tolerates the rest of the structure being absent.
//!
//! - [`EdgarApi`]: the live [SEC API], throttled.
//! - [`Buffer`]: a directory of unzipped bulk archives (`submissions.zip`,
//!   `companyfacts.zip`).
//!
//! [SEC API]: https://www.sec.gov/search-filings/edgar-application-programming-interfaces
use crate::http::*;
use crate::{Cik, Config};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{error, trace};

#[async_trait]
pub trait Source {
    /// The submission index: profile fields and the recent filings arrays.
    async fn submissions(&self, cik: &Cik) -> Option<Value>;

    /// The XBRL company facts.
    async fn facts(&self, cik: &Cik) -> Option<Value>;
}

// api
// ----------------------------------------------------------------------------

/// The SEC's `data.sec.gov` endpoints.
pub struct EdgarApi {
    client: HttpClient,
    base_url: String,
    delay: Duration,
}

impl EdgarApi {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_client(&config.user_agent)?,
            base_url: config.edgar_url.clone(),
            delay: config.delay,
        })
    }

    pub fn submissions_url(&self, cik: &Cik) -> String {
        format!("{}/submissions/CIK{cik}.json", self.base_url)
    }

    pub fn facts_url(&self, cik: &Cik) -> String {
        format!("{}/api/xbrl/companyfacts/CIK{cik}.json", self.base_url)
    }

    /// GET `url` as JSON, then pause for the throttle interval whatever the outcome.
    async fn get(&self, url: &str) -> Option<Value> {
        trace!("GET {url}");
        let result = self.try_get(url).await;
        tokio::time::sleep(self.delay).await;

        match result {
            Ok(json) => Some(json),
            Err(err) => {
                error!("failed to fetch {url}, error({err})");
                None
            }
        }
    }

    async fn try_get(&self, url: &str) -> anyhow::Result<Value> {
        let json = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(json)
    }
}

#[async_trait]
impl Source for EdgarApi {
    async fn submissions(&self, cik: &Cik) -> Option<Value> {
        self.get(&self.submissions_url(cik)).await
    }

    async fn facts(&self, cik: &Cik) -> Option<Value> {
        self.get(&self.facts_url(cik)).await
    }
}

fn build_client(user_agent: &str) -> anyhow::Result<HttpClient> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    let client = reqwest::ClientBuilder::new()
        .user_agent(user_agent)
        .default_headers(headers)
        .build()
        .map_err(|err| {
            error!("failed to build reqwest client, error({err})");
            err
        })?;
    Ok(client)
}

// buffer
// ----------------------------------------------------------------------------

/// Payloads already on disk, laid out as the SEC bulk archives unzip:
///
/// ```text
/// <dir>/submissions/CIK0000320193.json
/// <dir>/companyfacts/CIK0000320193.json
/// ```
pub struct Buffer {
    dir: PathBuf,
}

impl Buffer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, archive: &str, cik: &Cik) -> PathBuf {
        self.dir.join(archive).join(format!("CIK{cik}.json"))
    }

    async fn read(&self, archive: &str, cik: &Cik) -> Option<Value> {
        let path = self.path(archive, cik);
        match crate::fs::read_json(&path).await {
            Ok(json) => Some(json),
            Err(err) => {
                error!("failed to read file at \"{}\", error({err})", path.display());
                None
            }
        }
    }
}

#[async_trait]
impl Source for Buffer {
    async fn submissions(&self, cik: &Cik) -> Option<Value> {
        self.read("submissions", cik).await
    }

    async fn facts(&self, cik: &Cik) -> Option<Value> {
        self.read("companyfacts", cik).await
    }
}
