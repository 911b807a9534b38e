#![cfg(test)]
use models::db::Store;

/// Private in-memory database per test, schema already applied.
pub async fn get_store() -> Result<Store, anyhow::Error> {
    Store::open_in_memory().await
}
