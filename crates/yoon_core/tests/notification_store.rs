use std::collections::HashSet;
use yoon_core::notification::templates::{
    consultation_status_changed, payment_confirmed, search_completed,
};
use yoon_core::{
    ConsultationStatus, LocalStorage, MemoryStorage, NewNotification, Notification,
    NotificationCategory, NotificationId, NotificationStore, SqliteStorage, DEFAULT_STORAGE_KEY,
};

fn info(title: &str) -> NewNotification {
    NewNotification::new(title, "message", NotificationCategory::Info)
}

fn empty_store() -> NotificationStore<MemoryStorage> {
    NotificationStore::load(MemoryStorage::new(), DEFAULT_STORAGE_KEY)
}

#[test]
fn add_assigns_fresh_unread_ids() {
    let mut store = empty_store();
    let mut seen = HashSet::new();

    for index in 0..200 {
        let created = store.add(info(&format!("n{index}")));
        assert!(!created.is_read());
        assert!(seen.insert(created.id().clone()), "id reused: {}", created.id());
    }

    assert_eq!(store.len(), 200);
    assert_eq!(store.unread_count(), 200);
}

#[test]
fn unread_count_tracks_read_flags() {
    let mut store = empty_store();
    let a = store.add(info("a"));
    store.add(info("b"));
    store.add(info("c"));

    store.mark_as_read(a.id());
    assert_eq!(store.unread_count(), 2);
    assert_eq!(
        store.unread_count(),
        store.notifications().iter().filter(|n| !n.is_read()).count()
    );

    store.mark_all_as_read();
    assert_eq!(store.unread_count(), 0);
}

#[test]
fn mark_as_read_is_idempotent() {
    let mut once = empty_store();
    let created = once.add(info("a"));
    once.mark_as_read(created.id());
    let after_once = once.notifications().to_vec();

    once.mark_as_read(created.id());
    assert_eq!(once.notifications(), after_once.as_slice());
}

#[test]
fn missing_ids_are_ignored() {
    let mut store = empty_store();
    store.add(info("a"));
    let before = store.notifications().to_vec();

    let missing = NotificationId::from("does-not-exist");
    store.mark_as_read(&missing);
    store.remove(&missing);

    assert_eq!(store.notifications(), before.as_slice());
}

#[test]
fn removed_ids_never_come_back() {
    let mut store = empty_store();
    let kept = store.add(search_completed("user_1", "bail", 1));
    let removed = store.add(payment_confirmed("p1", "user_1", 5_000));

    store.remove(removed.id());

    let owned: Vec<_> = store.by_owner("user_1").map(Notification::id).collect();
    assert_eq!(owned, vec![kept.id()]);
    assert!(store.get(removed.id()).is_none());
    assert!(store.notifications().iter().all(|n| n.id() != removed.id()));
}

#[test]
fn by_owner_preserves_store_order() {
    let mut store = empty_store();
    let first = store.add(search_completed("user_1", "divorce", 5));
    store.add(search_completed("user_2", "bail", 0));
    store.add(info("broadcast"));
    let third = store.add(consultation_status_changed(
        "c7",
        "user_1",
        ConsultationStatus::Accepted,
    ));

    let owned: Vec<_> = store.by_owner("user_1").map(|n| n.id().clone()).collect();
    assert_eq!(owned, vec![third.id().clone(), first.id().clone()]);
    assert_eq!(store.by_owner("nobody").count(), 0);
}

#[test]
fn persisted_collection_round_trips() {
    let mut store = empty_store();
    store.add(search_completed("user_1", "contrat de travail", 3));
    let read = store.add(consultation_status_changed(
        "c1",
        "user_2",
        ConsultationStatus::Completed,
    ));
    store.add(info("plain"));
    store.mark_as_read(read.id());
    let expected = store.notifications().to_vec();

    let reloaded = NotificationStore::load(store.into_storage(), DEFAULT_STORAGE_KEY);
    assert_eq!(reloaded.notifications(), expected.as_slice());
    assert_eq!(reloaded.unread_count(), 2);
}

#[test]
fn wire_format_matches_browser_records() {
    let raw = r#"[
        {
            "id": "1724155000000k3j9x2abc",
            "title": "Recherche juridique complétée",
            "message": "Votre recherche \"divorce\" a retourné 5 résultat(s)",
            "type": "success",
            "timestamp": "2025-08-20T12:36:31.123Z",
            "read": false,
            "userId": "user_2",
            "actionUrl": "/legal-search",
            "metadata": {"type": "legal_search", "searchQuery": "divorce", "resultsCount": 5}
        },
        {
            "id": "1724155000001zz",
            "title": "Attention",
            "message": "Veuillez saisir un terme de recherche",
            "type": "warning",
            "timestamp": "2025-08-20T12:30:00Z",
            "read": true
        }
    ]"#;
    let mut storage = MemoryStorage::new();
    storage.set_item(DEFAULT_STORAGE_KEY, raw).unwrap();

    let store = NotificationStore::load(storage, DEFAULT_STORAGE_KEY);
    assert_eq!(store.len(), 2);
    assert_eq!(store.unread_count(), 1);

    let first = &store.notifications()[0];
    assert_eq!(first.id().as_str(), "1724155000000k3j9x2abc");
    assert_eq!(first.category(), NotificationCategory::Success);
    assert_eq!(first.owner_user_id(), Some("user_2"));
    assert_eq!(first.created_at().unix_timestamp(), 1_755_693_391);
    assert_eq!(first.created_at().millisecond(), 123);
    assert_eq!(store.notifications()[1].owner_user_id(), None);
}

fn browser_record(id: &str, metadata: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": "t",
        "message": "m",
        "type": "info",
        "timestamp": "2025-08-20T12:00:00Z",
        "read": false,
        "metadata": metadata
    })
}

#[test]
fn every_browser_metadata_shape_survives_load_and_add() {
    let shapes = [
        serde_json::json!({"type": "legal_search", "searchQuery": "divorce", "resultsCount": 5}),
        serde_json::json!({"type": "legal_update", "affectedTexts": [16, 17], "updateType": "modified"}),
        serde_json::json!({"type": "expert_availability", "expertCount": 3, "domain": "Droit civil"}),
        serde_json::json!({"consultationId": "c1", "type": "consultation_created"}),
        serde_json::json!({"consultationId": "c1", "newStatus": "accepted"}),
        serde_json::json!({"conversationId": "conv1", "senderId": "u9"}),
        serde_json::json!({"documentId": "d1", "documentName": "bail.pdf"}),
        serde_json::json!({"expertId": "e1", "type": "expert_registration"}),
        serde_json::json!({"severity": "high", "source": "monitor"}),
        serde_json::json!({"paymentId": "p1", "amount": 150}),
        serde_json::json!({"paymentId": "p2", "amount": 49.99}),
        serde_json::json!({"type": "maintenance", "date": "2025-09-01", "startTime": "02:00", "endTime": "04:00"}),
        serde_json::json!({"type": "app_update", "version": "2.1.0"}),
    ];
    let records: Vec<serde_json::Value> = shapes
        .iter()
        .enumerate()
        .map(|(index, metadata)| browser_record(&format!("b{index}"), metadata.clone()))
        .collect();

    let mut storage = MemoryStorage::new();
    storage
        .set_item(
            DEFAULT_STORAGE_KEY,
            &serde_json::to_string(&records).unwrap(),
        )
        .unwrap();

    let mut store = NotificationStore::load(storage, DEFAULT_STORAGE_KEY);
    assert_eq!(store.len(), shapes.len());

    store.add(info("fresh"));
    let raw = store
        .into_storage()
        .get_item(DEFAULT_STORAGE_KEY)
        .unwrap()
        .unwrap();
    let persisted: Vec<serde_json::Value> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted.len(), shapes.len() + 1);
    for (index, metadata) in shapes.iter().enumerate() {
        let id = format!("b{index}");
        let record = persisted
            .iter()
            .find(|record| record["id"] == id.as_str())
            .unwrap_or_else(|| panic!("record {id} lost"));
        assert_eq!(&record["metadata"], metadata, "metadata of {id} changed");
    }
}

#[test]
fn malformed_record_is_skipped_without_losing_the_rest() {
    let raw = serde_json::json!([
        browser_record("keep-1", serde_json::json!({"type": "app_update", "version": "2.1.0"})),
        {"id": "broken", "read": "nope"},
        browser_record("keep-2", serde_json::json!({"consultationId": "c1", "newStatus": "accepted"})),
    ]);
    let mut storage = MemoryStorage::new();
    storage
        .set_item(DEFAULT_STORAGE_KEY, &raw.to_string())
        .unwrap();

    let mut store = NotificationStore::load(storage, DEFAULT_STORAGE_KEY);
    let ids: Vec<&str> = store.notifications().iter().map(|n| n.id().as_str()).collect();
    assert_eq!(ids, ["keep-1", "keep-2"]);

    store.add(info("fresh"));
    let reloaded = NotificationStore::load(store.into_storage(), DEFAULT_STORAGE_KEY);
    assert_eq!(reloaded.len(), 3);
    assert!(reloaded.get(&NotificationId::from("keep-1")).is_some());
    assert!(reloaded.get(&NotificationId::from("keep-2")).is_some());
}

#[test]
fn corrupt_storage_yields_empty_store() {
    let mut storage = MemoryStorage::new();
    storage.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();

    let mut store = NotificationStore::load(storage, DEFAULT_STORAGE_KEY);
    assert!(store.is_empty());

    store.add(info("fresh"));
    let raw = store
        .into_storage()
        .get_item(DEFAULT_STORAGE_KEY)
        .unwrap()
        .unwrap();
    assert!(raw.starts_with('['));
}

#[test]
fn clear_then_reload_is_empty() {
    let mut store = empty_store();
    store.add(info("a"));
    store.add(info("b"));
    store.clear();
    assert!(store.is_empty());

    let reloaded = NotificationStore::load(store.into_storage(), DEFAULT_STORAGE_KEY);
    assert!(reloaded.is_empty());

    let from_nothing = NotificationStore::load(MemoryStorage::new(), DEFAULT_STORAGE_KEY);
    assert!(from_nothing.is_empty());
}

#[test]
fn sqlite_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("yoon.sqlite3");

    let expected = {
        let storage = SqliteStorage::open(&path).unwrap();
        let mut store = NotificationStore::load(storage, DEFAULT_STORAGE_KEY);
        store.add(search_completed("user_1", "bail", 1));
        store.add(info("second"));
        store.notifications().to_vec()
    };

    let storage = SqliteStorage::open(&path).unwrap();
    let store = NotificationStore::load(storage, DEFAULT_STORAGE_KEY);
    assert_eq!(store.notifications(), expected.as_slice());
}

#[test]
fn stores_with_distinct_keys_do_not_share_records() {
    let mut store = NotificationStore::load(MemoryStorage::new(), "tab_a");
    store.add(info("only in a"));

    let other = NotificationStore::load(store.into_storage(), "tab_b");
    assert!(other.is_empty());
    assert_eq!(other.storage_key(), "tab_b");
}
