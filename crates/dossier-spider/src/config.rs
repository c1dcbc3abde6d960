use crate::http::var;
use crate::Cik;
use std::time::Duration;

/// Companies collected when no list is given on the command line.
pub const DEFAULT_CIKS: [&str; 10] = [
    "0000320193", // Apple
    "0000789019", // Microsoft
    "0001652044", // Alphabet
    "0001018724", // Amazon
    "0000051143", // IBM
    "0000078003", // JPMorgan Chase
    "0000070858", // Walmart
    "0001326801", // Meta
    "0000200406", // Chevron
    "0001534701", // Tesla
];

const DEFAULT_USER_AGENT: &str = "dossier admin@example.com";
const DEFAULT_DATABASE_URL: &str = "postgres://localhost:5432/dossier";
const DEFAULT_EDGAR_URL: &str = "https://data.sec.gov";

/// SEC fair access allows 10 requests per second.
const DEFAULT_DELAY_MS: u64 = 100;

/// Runtime settings, read from the environment (and `.env`).
#[derive(Clone, Debug)]
pub struct Config {
    /// `USER_AGENT`: the SEC rejects requests without a descriptive one.
    pub user_agent: String,
    /// `DOSSIER_URL`
    pub database_url: String,
    /// `EDGAR_URL`
    pub edgar_url: String,
    /// `EDGAR_DELAY_MS`: pause after every request to the SEC.
    pub delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            edgar_url: DEFAULT_EDGAR_URL.to_string(),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}

impl Config {
    /// Build the config from environment variables, falling back to defaults for any that
    /// are unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = Self::default();

        let delay = match var("EDGAR_DELAY_MS") {
            Ok(ms) => Duration::from_millis(ms.parse::<u64>().map_err(|err| {
                anyhow::anyhow!("invalid EDGAR_DELAY_MS {ms:?}, must be an integer ({err})")
            })?),
            Err(_) => defaults.delay,
        };

        Ok(Self {
            user_agent: var("USER_AGENT").unwrap_or(defaults.user_agent),
            database_url: var("DOSSIER_URL").unwrap_or(defaults.database_url),
            edgar_url: var("EDGAR_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.edgar_url),
            delay,
        })
    }
}

/// The built-in company list.
pub fn default_ciks() -> Vec<Cik> {
    DEFAULT_CIKS
        .iter()
        .filter_map(|raw| Cik::parse(raw).ok())
        .collect()
}
