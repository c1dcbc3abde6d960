//! Where collected companies end up: one document per CIK, overwritten in full on every
//! collection.
mod memory;
mod pg;
mod sql;

pub use memory::MemoryStore;
pub use pg::PgStore;

use crate::company::Company;
use async_trait::async_trait;

#[async_trait]
pub trait Store {
    /// Insert the document for `company.profile.cik`, or replace it if one exists.
    async fn upsert(&self, company: &Company) -> anyhow::Result<()>;
}
