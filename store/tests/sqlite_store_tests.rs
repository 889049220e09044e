use sqlx::SqlitePool;

use store::StateStore;
use store::keys;
use store::sqlite_store::SQLiteStateStore;

///
/// Test suite for SQLiteStateStore
///
/// This suite verifies:
///   · schema creation via migrate()
///   · get() on a missing key
///   · put() insert + overwrite
///   · remove() of present and absent keys
///   · independence of distinct keys
///
async fn store_with_schema(pool: SqlitePool) -> anyhow::Result<SQLiteStateStore> {
    let store = SQLiteStateStore::from_pool(pool);
    store.migrate().await?;
    Ok(store)
}

#[sqlx::test]
async fn missing_key_reads_as_none(pool: SqlitePool) -> anyhow::Result<()> {
    let store = store_with_schema(pool).await?;

    assert_eq!(store.get(keys::AUTH_TOKEN).await?, None);

    Ok(())
}

#[sqlx::test]
async fn put_then_get_roundtrips(pool: SqlitePool) -> anyhow::Result<()> {
    let store = store_with_schema(pool).await?;

    store.put(keys::AUTH_TOKEN, r#"{"xtoken":"tok1"}"#).await?;

    let loaded = store.get(keys::AUTH_TOKEN).await?;
    assert_eq!(loaded.as_deref(), Some(r#"{"xtoken":"tok1"}"#));

    Ok(())
}

#[sqlx::test]
async fn put_overwrites_existing_value(pool: SqlitePool) -> anyhow::Result<()> {
    let store = store_with_schema(pool).await?;

    // Insert
    store.put(keys::SHOPPING_LISTS, "[]").await?;

    // Overwrite
    store
        .put(keys::SHOPPING_LISTS, r#"[{"shoppingListId":1}]"#)
        .await?;

    let loaded = store.get(keys::SHOPPING_LISTS).await?;
    assert_eq!(loaded.as_deref(), Some(r#"[{"shoppingListId":1}]"#));

    Ok(())
}

#[sqlx::test]
async fn remove_deletes_and_tolerates_absent_keys(pool: SqlitePool) -> anyhow::Result<()> {
    let store = store_with_schema(pool).await?;

    store.put(keys::LOGGED_USER, r#"{"userId":7}"#).await?;
    store.remove(keys::LOGGED_USER).await?;

    assert_eq!(store.get(keys::LOGGED_USER).await?, None);

    // Removing again is a no-op
    store.remove(keys::LOGGED_USER).await?;

    Ok(())
}

#[sqlx::test]
async fn keys_do_not_interfere(pool: SqlitePool) -> anyhow::Result<()> {
    let store = store_with_schema(pool).await?;

    store.put(keys::AUTH_TOKEN, r#"{"xtoken":"tok1"}"#).await?;
    store.put(keys::SHOPPING_LISTS, "[]").await?;

    store.remove(keys::AUTH_TOKEN).await?;

    assert_eq!(store.get(keys::AUTH_TOKEN).await?, None);
    assert_eq!(store.get(keys::SHOPPING_LISTS).await?.as_deref(), Some("[]"));

    Ok(())
}
