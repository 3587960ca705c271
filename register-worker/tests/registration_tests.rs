mod common;

use std::collections::HashSet;

use common::*;
use photo_storage::{events::ObjectCreatedEvent, photo_record::PhotoRecordStorageError};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_registers_one_record_per_created_object() {
    let context = TestContext::new();
    let keys = [
        "photos/0a1b-cat.png",
        "photos/2c3d-dog.jpg",
        "photos/4e5f-bird.gif",
    ];

    let written = context
        .registration()
        .register(&created_event(&keys))
        .await
        .unwrap();

    assert_eq!(written.len(), 3);
    assert_eq!(
        written.iter().map(|r| r.key.as_str()).collect::<Vec<_>>(),
        keys
    );
    let ids: HashSet<_> = written.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids.len(), 3);
    assert_eq!(context.records.records(), written);
}

#[tokio::test]
async fn test_record_id_is_unrelated_to_key_token() {
    let context = TestContext::new();

    let written = context
        .registration()
        .register(&created_event(&["photos/5f1c9a-cat.png"]))
        .await
        .unwrap();

    assert_eq!(written[0].key, "photos/5f1c9a-cat.png");
    assert!(!written[0].key.contains(&written[0].id));
    assert_eq!(written[0].id.len(), 36);
}

#[tokio::test]
async fn test_empty_batch_writes_nothing() {
    let context = TestContext::new();

    let written = context
        .registration()
        .register(&ObjectCreatedEvent::default())
        .await
        .unwrap();

    assert!(written.is_empty());
    assert!(context.records.records().is_empty());
}

#[tokio::test]
async fn test_notified_keys_are_url_decoded() {
    let context = TestContext::new();

    context
        .registration()
        .register(&created_event(&[
            "photos/abc-my+holiday+%281%29.jpg",
            "photos/def-caf%C3%A9.png",
        ]))
        .await
        .unwrap();

    assert_eq!(
        context.stored_keys(),
        vec![
            "photos/abc-my holiday (1).jpg".to_string(),
            "photos/def-café.png".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_non_creation_events_are_skipped() {
    let context = TestContext::new();
    let event = ObjectCreatedEvent {
        records: vec![
            event_record("ObjectRemoved:Delete", "photos/gone-cat.png"),
            event_record("ObjectCreated:CompleteMultipartUpload", "photos/big-pano.jpg"),
            event_record("ObjectCreated:Copy", "photos/copy-dog.png"),
        ],
    };

    let written = context.registration().register(&event).await.unwrap();

    assert_eq!(written.len(), 2);
    assert_eq!(
        context.stored_keys(),
        vec![
            "photos/big-pano.jpg".to_string(),
            "photos/copy-dog.png".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_stops_at_first_failed_write() {
    let context = TestContext::new();
    context.records.fail_writes_after(1);

    let result = context
        .registration()
        .register(&created_event(&[
            "photos/1-a.png",
            "photos/2-b.png",
            "photos/3-c.png",
        ]))
        .await;

    assert!(matches!(
        result,
        Err(PhotoRecordStorageError::Unavailable(_))
    ));
    // Writes before the failure are kept
    assert_eq!(context.stored_keys(), vec!["photos/1-a.png".to_string()]);
}

#[tokio::test]
async fn test_same_key_registered_twice_gets_two_records() {
    let context = TestContext::new();
    let event = created_event(&["photos/1-a.png"]);

    context.registration().register(&event).await.unwrap();
    context.registration().register(&event).await.unwrap();

    let records = context.records.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].key, records[1].key);
    assert_ne!(records[0].id, records[1].id);
}
