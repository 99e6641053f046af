//! SqliteRecordStore tests against an in-memory database.

use sqlx::sqlite::SqlitePoolOptions;
use std::{collections::HashMap, sync::Arc};
use thumbgen::models::record::ThumbnailRecord;
use thumbgen::services::record_store::{RecordStore, SqliteRecordStore};

async fn store() -> (Arc<sqlx::SqlitePool>, SqliteRecordStore) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    let sql = include_str!("../migrations/0001_init.sql");
    for stmt in sql.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(stmt).execute(&pool).await.unwrap();
    }

    let pool = Arc::new(pool);
    (pool.clone(), SqliteRecordStore::new(pool))
}

#[tokio::test]
async fn put_then_get_round_trips() {
    let (_pool, store) = store().await;

    let mut meta = HashMap::new();
    meta.insert("author".to_string(), "ansel".to_string());
    let record = ThumbnailRecord::from_run("photos/cat.jpg", "thumbs/photos/cat.jpg", &meta);
    store.put_record(&record).await.unwrap();

    let fetched = store.get_record("photos/cat.jpg").await.unwrap().unwrap();
    assert_eq!(fetched.id, record.id);
    assert_eq!(fetched.thumbnail_key, "thumbs/photos/cat.jpg");
    assert_eq!(fetched.author.as_deref(), Some("ansel"));
    assert!(fetched.title.is_none());
}

#[tokio::test]
async fn second_put_for_same_source_key_overwrites() {
    let (pool, store) = store().await;

    let first = ThumbnailRecord::from_run("a.jpg", "thumbs/a.jpg", &HashMap::new());
    store.put_record(&first).await.unwrap();

    let mut meta = HashMap::new();
    meta.insert("title".to_string(), "revised".to_string());
    let second = ThumbnailRecord::from_run("a.jpg", "thumbs/a.jpg", &meta);
    store.put_record(&second).await.unwrap();

    let fetched = store.get_record("a.jpg").await.unwrap().unwrap();
    assert_eq!(fetched.title.as_deref(), Some("revised"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM thumbnails")
        .fetch_one(&*pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn missing_source_key_yields_none() {
    let (_pool, store) = store().await;
    assert!(store.get_record("nope.jpg").await.unwrap().is_none());
}
