use super::{sql, Store};
use crate::company::Company;
use async_trait::async_trait;
use deadpool_postgres::Pool;
use serde_json::Value;
use tokio_postgres::types::Json;
use tracing::{debug, error, trace};

/// Postgres used as a document store: `dossier.companies` is the collection, `doc` the
/// document.
pub struct PgStore {
    pool: Pool,
}

impl PgStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Create the schema and table if absent.
    pub async fn init(&self) -> anyhow::Result<()> {
        let pg_client = self.pool.get().await?;
        pg_client
            .batch_execute(sql::CREATE_COMPANIES)
            .await
            .map_err(|err| {
                error!("failed to create dossier.companies, error({err})");
                err
            })?;
        debug!("dossier.companies ready");
        Ok(())
    }

    /// The stored document for `cik`, if any.
    pub async fn get(&self, cik: &str) -> anyhow::Result<Option<Value>> {
        let pg_client = self.pool.get().await?;
        let row = pg_client.query_opt(sql::GET_COMPANY, &[&cik]).await?;
        Ok(row.map(|row| {
            let Json(doc): Json<Value> = row.get(0);
            doc
        }))
    }
}

#[async_trait]
impl Store for PgStore {
    async fn upsert(&self, company: &Company) -> anyhow::Result<()> {
        let cik = &company.profile.cik;

        let pg_client = self.pool.get().await.map_err(|err| {
            error!("failed to get pg client from pool, error({err})");
            err
        })?;
        let query = pg_client.prepare_cached(sql::UPSERT_COMPANY).await?;

        pg_client
            .execute(&query, &[cik, &Json(company), &company.last_updated])
            .await
            .map_err(|err| {
                error!("failed to upsert CIK{cik} into dossier.companies, error({err})");
                err
            })?;
        trace!("upserted CIK{cik} into dossier.companies");

        Ok(())
    }
}
