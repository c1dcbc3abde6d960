//! Payload → [`Company`] transformation. No I/O happens here.
//!
//! The SEC payloads are read as loose JSON: a missing field falls back to a default, and a
//! missing structure is logged while everything derived so far is kept.
use crate::company::{Company, Filing, Financials, Metric, Profile};
use crate::{Cik, Error};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, error, trace, warn};

/// Form type the filing index is scanned for.
pub const ANNUAL_REPORT: &str = "10-K";

/// Source tag written into every financial summary.
pub const SOURCE: &str = "SEC EDGAR";

const TAXONOMY: &str = "us-gaap";
const UNIT: &str = "USD";

/// Company facts concepts and the metric each one overrides.
const FACT_METRICS: [(&str, Metric); 4] = [
    ("Assets", Metric::TotalAssets),
    ("Liabilities", Metric::TotalLiabilities),
    ("Revenues", Metric::Revenues),
    ("NetIncomeLoss", Metric::NetIncome),
];

/// Build the full document for `cik` from its submission index and, when available, its
/// company facts.
pub fn company(
    cik: &Cik,
    submissions: &Value,
    facts: Option<&Value>,
    now: DateTime<Utc>,
) -> Company {
    Company {
        profile: profile(cik, submissions),
        financials: financials(submissions, facts, now),
        filing_history: filing_history(submissions),
        last_updated: now,
    }
}

// profile
// ----------------------------------------------------------------------------

/// Copy the registrant's details out of the submission index.
///
/// Missing keys fall back to empty values. The CIK is always the padded `cik` asked for,
/// whatever form the payload carries it in.
pub fn profile(cik: &Cik, submissions: &Value) -> Profile {
    let reported = text(submissions, "cik");
    if !reported.is_empty() && Cik::parse(&reported).as_ref() != Ok(cik) {
        warn!("submission index for CIK{cik} reports CIK {reported:?}");
    }

    // the live API serves a single `phone`; older payloads a `phones` list
    let phones = match submissions.get("phones") {
        Some(Value::Array(_)) => texts(submissions, "phones"),
        _ => Some(text(submissions, "phone"))
            .filter(|phone| !phone.is_empty())
            .into_iter()
            .collect(),
    };

    Profile {
        name: text(submissions, "name"),
        cik: cik.to_string(),
        sic: text(submissions, "sic"),
        sic_description: text(submissions, "sicDescription"),
        tickers: texts(submissions, "tickers"),
        exchanges: texts(submissions, "exchanges"),
        fiscal_year_end: text(submissions, "fiscalYearEnd"),
        state_of_incorporation: text(submissions, "stateOfIncorporation"),
        phones,
    }
}

// financials
// ----------------------------------------------------------------------------

/// Summarise the latest annual figures.
///
/// The first [`ANNUAL_REPORT`] in the filing index supplies the filing date and any metric
/// values it carries; company facts, when present, then override the metrics they cover.
pub fn financials(submissions: &Value, facts: Option<&Value>, now: DateTime<Utc>) -> Financials {
    let mut financials = Financials {
        metrics: BTreeMap::new(),
        filing_date: None,
        source: SOURCE.to_string(),
        last_updated: now,
    };

    if let Err(err) = annual_report(submissions, &mut financials) {
        error!("failed to extract {ANNUAL_REPORT} data from the filing index, error({err})");
    }

    if let Some(facts) = facts {
        if let Err(err) = latest_facts(facts, &mut financials.metrics) {
            warn!("failed to extract company facts, error({err})");
        }
    }

    financials
}

fn annual_report(submissions: &Value, financials: &mut Financials) -> Result<(), Error> {
    let recent = recent(submissions)?;
    let Some(idx) = column(recent, "form")?
        .iter()
        .position(|form| form.as_str() == Some(ANNUAL_REPORT))
    else {
        debug!("no {ANNUAL_REPORT} among the recent filings");
        return Ok(());
    };
    trace!("{ANNUAL_REPORT} found at index {idx}");

    for metric in Metric::ALL {
        let value = recent
            .get(metric.key())
            .and_then(Value::as_array)
            .and_then(|values| values.get(idx))
            .filter(|value| !value.is_null());
        if let Some(value) = value {
            financials.metrics.insert(metric, value.clone());
        }
    }

    let filing_date = column(recent, "filingDate")?
        .get(idx)
        .and_then(Value::as_str)
        .ok_or(Error::MissingKey("filingDate"))?;
    financials.filing_date = Some(filing_date.to_string());

    Ok(())
}

fn latest_facts(facts: &Value, metrics: &mut BTreeMap<Metric, Value>) -> Result<(), Error> {
    let taxonomy = facts
        .get("facts")
        .ok_or(Error::MissingKey("facts"))?
        .get(TAXONOMY)
        .ok_or(Error::MissingKey("facts.us-gaap"))?;

    for (concept, metric) in FACT_METRICS {
        let Some(entries) = taxonomy
            .get(concept)
            .and_then(|data| data.get("units"))
            .and_then(|units| units.get(UNIT))
            .and_then(Value::as_array)
        else {
            trace!("no {UNIT} values for {concept}");
            continue;
        };

        match latest_fact(entries).and_then(|entry| entry.get("val")) {
            Some(val) if !val.is_null() => {
                metrics.insert(metric, val.clone());
            }
            _ => debug!("no usable {concept} value among {} entries", entries.len()),
        }
    }

    Ok(())
}

/// The entry with the latest `end` date.
///
/// `end` must be an ISO `YYYY-MM-DD` date; entries without one are skipped. On a tie the
/// earliest entry wins.
pub fn latest_fact(entries: &[Value]) -> Option<&Value> {
    let mut latest: Option<(NaiveDate, &Value)> = None;

    for entry in entries {
        let Some(end) = entry.get("end").and_then(Value::as_str) else {
            warn!("fact without an end date skipped: {entry}");
            continue;
        };
        let end = match NaiveDate::parse_from_str(end, "%Y-%m-%d") {
            Ok(end) => end,
            Err(err) => {
                warn!("fact with malformed end date {end:?} skipped, error({err})");
                continue;
            }
        };
        if latest.map_or(true, |(best, _)| end > best) {
            latest = Some((end, entry));
        }
    }

    latest.map(|(_, entry)| entry)
}

// filing history
// ----------------------------------------------------------------------------

/// Every recent filing, in index order. Empty if the index is absent.
pub fn filing_history(submissions: &Value) -> Vec<Filing> {
    match recent_filings(submissions) {
        Ok(filings) => filings,
        Err(err) => {
            debug!("no filing history, error({err})");
            Vec::new()
        }
    }
}

fn recent_filings(submissions: &Value) -> Result<Vec<Filing>, Error> {
    let recent = recent(submissions)?;
    let forms = column(recent, "form")?;
    let dates = column(recent, "filingDate")?;
    let accessions = column(recent, "accessionNumber")?;
    let documents = column(recent, "primaryDocument")?;

    let lens = [forms.len(), dates.len(), accessions.len(), documents.len()];
    if lens.iter().any(|len| *len != forms.len()) {
        warn!("filing index columns are misaligned {lens:?}; truncating to the shortest");
    }

    let filings = forms
        .iter()
        .zip(dates.iter())
        .zip(accessions.iter())
        .zip(documents.iter())
        .map(|(((form, date), accession), document)| Filing {
            form: as_text(form),
            filing_date: as_text(date),
            accession_number: as_text(accession),
            primary_document: as_text(document),
        })
        .collect();

    Ok(filings)
}

// helpers
// ----------------------------------------------------------------------------

// "filings": {
//     "recent": {
//         "accessionNumber": ["0000320193-23-000106", ...],
//         "filingDate": ["2023-11-03", ...],
//         "form": ["10-K", ...],
//         "primaryDocument": ["aapl-20230930.htm", ...],
//         ...
//     },
//     "files": [ ... ]
// }
fn recent(submissions: &Value) -> Result<&Map<String, Value>, Error> {
    submissions
        .get("filings")
        .ok_or(Error::MissingKey("filings"))?
        .get("recent")
        .and_then(Value::as_object)
        .ok_or(Error::MissingKey("filings.recent"))
}

fn column<'a>(recent: &'a Map<String, Value>, key: &'static str) -> Result<&'a Vec<Value>, Error> {
    recent
        .get(key)
        .ok_or(Error::MissingKey(key))?
        .as_array()
        .ok_or(Error::NotAList(key))
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

fn text(value: &Value, key: &str) -> String {
    value.get(key).map(as_text).unwrap_or_default()
}

fn texts(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|values| {
            values
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn apple() -> Cik {
        Cik::parse("320193").unwrap()
    }

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn profile_defaults_missing_fields() {
        let profile = profile(&apple(), &json!({ "name": "Apple Inc.", "tickers": ["AAPL"] }));

        assert_eq!(profile.name, "Apple Inc.");
        assert_eq!(profile.cik, "0000320193");
        assert_eq!(profile.tickers, vec!["AAPL"]);
        assert!(profile.sic.is_empty());
        assert!(profile.exchanges.is_empty());
        assert!(profile.phones.is_empty());
    }

    #[test]
    fn profile_takes_single_phone() {
        let profile = profile(&apple(), &json!({ "cik": "320193", "phone": "(408) 996-1010" }));
        assert_eq!(profile.phones, vec!["(408) 996-1010"]);

        let profile = super::profile(&apple(), &json!({ "phones": ["1", "2"], "phone": "3" }));
        assert_eq!(profile.phones, vec!["1", "2"]);
    }

    #[test]
    fn annual_report_drops_absent_metrics() {
        let submissions = json!({
            "filings": { "recent": {
                "form": ["8-K", "10-K", "10-Q"],
                "filingDate": ["2023-11-30", "2023-09-30", "2023-08-04"],
                "totalAssets": [1, 2, 3],
                "revenues": [4, null, 6]
            }}
        });

        let financials = financials(&submissions, None, now());

        assert_eq!(financials.filing_date.as_deref(), Some("2023-09-30"));
        assert_eq!(financials.metrics.len(), 1);
        assert_eq!(financials.metrics[&Metric::TotalAssets], json!(2));
        assert_eq!(financials.source, SOURCE);
        assert_eq!(financials.last_updated, now());
    }

    #[test]
    fn no_annual_report_leaves_summary_empty() {
        let submissions = json!({
            "filings": { "recent": { "form": ["10-Q"], "filingDate": ["2023-08-04"] }}
        });

        let financials = financials(&submissions, None, now());

        assert!(financials.filing_date.is_none());
        assert!(financials.metrics.is_empty());
    }

    #[test]
    fn facts_override_filing_index() {
        let submissions = json!({
            "filings": { "recent": {
                "form": ["10-K"],
                "filingDate": ["2023-09-30"],
                "totalAssets": [1],
                "earningsPerShare": [6.13]
            }}
        });
        let facts = json!({ "facts": { "us-gaap": {
            "Assets": { "units": { "USD": [{ "end": "2023-09-30", "val": 352583000000u64 }] } }
        }}});

        let financials = financials(&submissions, Some(&facts), now());

        assert_eq!(financials.metrics[&Metric::TotalAssets], json!(352583000000u64));
        assert_eq!(financials.metrics[&Metric::EarningsPerShare], json!(6.13));
    }

    #[test]
    fn facts_apply_without_filing_index() {
        let facts = json!({ "facts": { "us-gaap": {
            "NetIncomeLoss": { "units": { "USD": [{ "end": "2023-09-30", "val": 5 }] } }
        }}});

        let financials = financials(&json!({}), Some(&facts), now());

        assert!(financials.filing_date.is_none());
        assert_eq!(financials.metrics[&Metric::NetIncome], json!(5));
    }

    #[test]
    fn latest_fact_picks_max_end_date() {
        let entries = vec![
            json!({ "end": "2021-09-25", "val": 1 }),
            json!({ "end": "2023-09-30", "val": 3 }),
            json!({ "end": "2022-09-24", "val": 2 }),
            json!({ "end": "2023-09-30", "val": 4 }),
        ];

        assert_eq!(latest_fact(&entries).unwrap()["val"], 3);
    }

    #[test]
    fn latest_fact_skips_malformed_dates() {
        let entries = vec![
            json!({ "end": "2022-09-24", "val": 2 }),
            json!({ "end": "FY2024", "val": 9 }),
            json!({ "val": 8 }),
        ];

        assert_eq!(latest_fact(&entries).unwrap()["val"], 2);
        assert!(latest_fact(&entries[1..]).is_none());
        assert!(latest_fact(&[]).is_none());
    }

    #[test]
    fn filing_history_zips_in_order() {
        let submissions = json!({
            "filings": { "recent": {
                "form": ["10-K", "8-K"],
                "filingDate": ["2023-11-03", "2023-08-03"],
                "accessionNumber": ["0000320193-23-000106", "0000320193-23-000075"],
                "primaryDocument": ["aapl-20230930.htm", "aapl-20230803.htm"]
            }}
        });

        let history = filing_history(&submissions);

        assert_eq!(
            history,
            vec![
                Filing {
                    form: "10-K".to_string(),
                    filing_date: "2023-11-03".to_string(),
                    accession_number: "0000320193-23-000106".to_string(),
                    primary_document: "aapl-20230930.htm".to_string(),
                },
                Filing {
                    form: "8-K".to_string(),
                    filing_date: "2023-08-03".to_string(),
                    accession_number: "0000320193-23-000075".to_string(),
                    primary_document: "aapl-20230803.htm".to_string(),
                },
            ]
        );
    }

    #[test]
    fn filing_history_without_index_is_empty() {
        assert!(filing_history(&json!({ "name": "Apple Inc." })).is_empty());
        let partial = json!({ "filings": { "recent": { "form": ["10-K"] } } });
        assert!(filing_history(&partial).is_empty());
    }

    #[test]
    fn misaligned_columns_truncate() {
        let submissions = json!({
            "filings": { "recent": {
                "form": ["10-K", "8-K", "4"],
                "filingDate": ["2023-11-03", "2023-08-03"],
                "accessionNumber": ["a", "b", "c"],
                "primaryDocument": ["x", "y", "z"]
            }}
        });

        assert_eq!(filing_history(&submissions).len(), 2);
    }
}
