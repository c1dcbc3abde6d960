use chrono::Utc;
use deadpool_postgres::{ManagerConfig, RecyclingMethod};
use dossier_spider::extract;
use dossier_spider::store::{PgStore, Store};
use dossier_spider::Cik;
use dotenv::var;
use serde_json::json;

// Needs a live database at DOSSIER_URL: `cargo test -- --ignored`
#[tokio::test]
#[ignore]
async fn pg_upsert_is_idempotent() {
    dotenv::dotenv().ok();

    // -- CONNECT TO POSTGRES --
    let mut pg_config = deadpool_postgres::Config::new();
    pg_config.url = Some(var("DOSSIER_URL").expect("environment variable DOSSIER_URL"));
    pg_config.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });
    let pool = pg_config
        .create_pool(Some(deadpool_postgres::Runtime::Tokio1), tokio_postgres::NoTls)
        .unwrap();
    let store = PgStore::new(pool);
    store.init().await.unwrap();

    // -- UPSERT TWICE --
    let cik = Cik::parse("9999999999").unwrap();
    let first = extract::company(&cik, &json!({ "name": "First" }), None, Utc::now());
    let second = extract::company(&cik, &json!({ "name": "Second" }), None, Utc::now());
    store.upsert(&first).await.unwrap();
    store.upsert(&second).await.unwrap();

    let doc = store.get(cik.as_str()).await.unwrap().expect("stored document");
    assert_eq!(doc["profile"]["name"], "Second");
    assert_eq!(doc["profile"]["cik"], "9999999999");
}
