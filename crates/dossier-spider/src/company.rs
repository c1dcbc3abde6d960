use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

// ser
// ----------------------------------------------------------------------------

// ======
// Output
// ======

// {
//     "profile": { "name": "Apple Inc.", "cik": "0000320193", ... },
//     "financials": {
//         "metrics": { "totalAssets": 352583000000, ... },
//         "filingDate": "2023-11-03",
//         "source": "SEC EDGAR",
//         "lastUpdated": "2024-01-01T00:00:00Z"
//     },
//     "filingHistory": [ { "form": "10-K", "filingDate": "2023-11-03", ... }, ... ],
//     "lastUpdated": "2024-01-01T00:00:00Z"
// }

/// One stored document per company; rebuilt from scratch on every collection.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub profile: Profile,
    pub financials: Financials,
    pub filing_history: Vec<Filing>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Clone, Debug, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    /// Zero-padded; the key documents are stored under.
    pub cik: String,
    pub sic: String,
    pub sic_description: String,
    pub tickers: Vec<String>,
    pub exchanges: Vec<String>,
    pub fiscal_year_end: String,
    pub state_of_incorporation: String,
    pub phones: Vec<String>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    pub metrics: BTreeMap<Metric, Value>,
    /// Filing date of the most recent annual report, when one was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filing_date: Option<String>,
    pub source: String,
    pub last_updated: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Filing {
    pub form: String,
    pub filing_date: String,
    pub accession_number: String,
    pub primary_document: String,
}

/// The headline figures kept in [`Financials::metrics`].
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    TotalAssets,
    TotalLiabilities,
    Revenues,
    NetIncome,
    EarningsPerShare,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::TotalAssets,
        Metric::TotalLiabilities,
        Metric::Revenues,
        Metric::NetIncome,
        Metric::EarningsPerShare,
    ];

    /// Key of the metric, both in the stored document and in the filing index arrays.
    pub fn key(self) -> &'static str {
        match self {
            Metric::TotalAssets => "totalAssets",
            Metric::TotalLiabilities => "totalLiabilities",
            Metric::Revenues => "revenues",
            Metric::NetIncome => "netIncome",
            Metric::EarningsPerShare => "earningsPerShare",
        }
    }
}
