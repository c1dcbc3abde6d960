use super::Store;
use crate::company::Company;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tracing::trace;

/// Documents held in memory, keyed by CIK; for dry runs and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: Mutex<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs().is_empty()
    }

    pub fn get(&self, cik: &str) -> Option<Value> {
        self.docs().get(cik).cloned()
    }

    /// Every document, ordered by CIK.
    pub fn documents(&self) -> Vec<Value> {
        self.docs().values().cloned().collect()
    }

    fn docs(&self) -> MutexGuard<'_, BTreeMap<String, Value>> {
        self.docs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn upsert(&self, company: &Company) -> anyhow::Result<()> {
        let doc = serde_json::to_value(company)?;
        let cik = company.profile.cik.clone();
        trace!("upserting CIK{cik} in memory");
        self.docs().insert(cik, doc);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::{Financials, Profile};
    use chrono::Utc;

    fn company(name: &str) -> Company {
        let now = Utc::now();
        Company {
            profile: Profile {
                name: name.to_string(),
                cik: "0000320193".to_string(),
                ..Profile::default()
            },
            financials: Financials {
                metrics: Default::default(),
                filing_date: None,
                source: crate::extract::SOURCE.to_string(),
                last_updated: now,
            },
            filing_history: vec![],
            last_updated: now,
        }
    }

    #[tokio::test]
    async fn upsert_replaces_existing_document() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.upsert(&company("Apple Computer, Inc.")).await.unwrap();
        store.upsert(&company("Apple Inc.")).await.unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("0000320193").unwrap()["profile"]["name"], "Apple Inc.");
    }
}
