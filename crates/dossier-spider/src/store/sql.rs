//////////////////////////////////////////////////////////////////
// companies
//////////////////////////////////////////////////////////////////

/// `dossier.companies` holds one JSON document per company, keyed by its padded CIK.
pub(crate) static CREATE_COMPANIES: &str = "
    CREATE SCHEMA IF NOT EXISTS dossier;
    CREATE TABLE IF NOT EXISTS dossier.companies (
        cik TEXT PRIMARY KEY,
        doc JSONB NOT NULL,
        last_updated TIMESTAMPTZ NOT NULL
    );
";

/// Replace the whole document; nothing from a previous collection is merged.
pub(crate) static UPSERT_COMPANY: &str = "
    INSERT INTO dossier.companies (cik, doc, last_updated)
    VALUES ($1, $2, $3)
    ON CONFLICT (cik)
    DO UPDATE SET doc = EXCLUDED.doc, last_updated = EXCLUDED.last_updated
";

pub(crate) static GET_COMPANY: &str = "
    SELECT doc FROM dossier.companies WHERE cik = $1
";
