use quiz_core::model::{ItemId, MasteryPartition};
use storage::record::MasteryRecord;
use storage::repository::{KeyValueStore, Storage};
use storage::sqlite::SqliteKvStore;

fn ids(raw: &[u64]) -> Vec<ItemId> {
    raw.iter().copied().map(ItemId::new).collect()
}

#[tokio::test]
async fn sqlite_set_get_remove() {
    let store = SqliteKvStore::connect("sqlite:file:memdb_kv_basic?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    assert_eq!(store.get("kanji-5").await.unwrap(), None);

    store.set("kanji-5", "one").await.unwrap();
    store.set("kanji-5", "two").await.unwrap();
    store.set("vocab-5", "other").await.unwrap();
    assert_eq!(store.get("kanji-5").await.unwrap().as_deref(), Some("two"));
    assert_eq!(store.get("vocab-5").await.unwrap().as_deref(), Some("other"));

    store.remove("kanji-5").await.unwrap();
    store.remove("kanji-5").await.unwrap();
    assert_eq!(store.get("kanji-5").await.unwrap(), None);
    assert_eq!(store.get("vocab-5").await.unwrap().as_deref(), Some("other"));
}

#[tokio::test]
async fn sqlite_migrations_are_idempotent() {
    let store = SqliteKvStore::connect("sqlite:file:memdb_kv_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("first migrate");
    store.migrate().await.expect("second migrate");

    store.set("k", "v").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
}

#[tokio::test]
async fn mastery_record_survives_sqlite_round_trip() {
    let storage = Storage::sqlite("sqlite:file:memdb_kv_mastery?mode=memory&cache=shared")
        .await
        .expect("storage");

    let scope = ids(&[1, 2, 3, 4, 5]);
    let mut partition = MasteryPartition::fresh(scope.clone());
    partition.record_answer(ItemId::new(1), false);
    partition.record_answer(ItemId::new(4), true);

    let json = MasteryRecord::from_partition(&partition).to_json().unwrap();
    storage.kv.set("kanji-5", &json).await.unwrap();

    let raw = storage.kv.get("kanji-5").await.unwrap().expect("stored");
    let restored = MasteryRecord::from_json(&raw).unwrap().into_partition(scope.clone());

    assert_eq!(restored, partition);
    assert!(restored.covers_exactly(scope));
}
