//! End-to-end tests for the read path: catalog selection, generation,
//! checkpointing and resumption across invocations.

use checkpoint::{PurchasesCheckpoint, SyncState, UsersCheckpoint};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};
use source_faker::{catalog, read, read_at, SourceConfig, SourceError};
use source_protocol::{ConfiguredCatalog, Message, RecordMessage, StreamName};

fn configured(names: &[StreamName]) -> ConfiguredCatalog {
    ConfiguredCatalog::select(&catalog::discover().unwrap(), names)
}

fn config(count: u64, per_sync: u64, per_slice: u64, seed: Option<u64>) -> SourceConfig {
    SourceConfig {
        count,
        seed,
        records_per_sync: per_sync,
        records_per_slice: per_slice,
    }
}

fn run(config: &SourceConfig, names: &[StreamName], state: SyncState) -> Vec<Message> {
    read(config, &configured(names), state)
        .expect("read should start")
        .collect::<Result<Vec<_>, _>>()
        .expect("read should complete")
}

fn records<'a>(messages: &'a [Message], stream: &str) -> Vec<&'a RecordMessage> {
    messages
        .iter()
        .filter_map(Message::as_record)
        .filter(|r| r.stream == stream)
        .collect()
}

/// The combined state carried by the last STATE message.
fn final_state(messages: &[Message]) -> SyncState {
    let data = messages
        .iter()
        .rev()
        .find_map(Message::as_state)
        .expect("at least one STATE message")
        .data
        .clone();
    SyncState::from_map(data)
}

fn parse_ts(value: &Value) -> Option<chrono::DateTime<Utc>> {
    value
        .as_str()
        .map(|s| chrono::DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc))
}

#[test]
fn test_users_and_purchases_slices() {
    let messages = run(
        &config(5, 5, 2, Some(42)),
        &[StreamName::Users, StreamName::Purchases],
        SyncState::new(),
    );

    // Walk the sequence: each user is directly followed by its own purchases,
    // and Users checkpoints land after the 2nd and 4th user.
    let mut users_seen = 0;
    let mut current_user = None;
    let mut purchases_seen = 0u64;
    let mut intermediate_cursors = Vec::new();
    let mut final_messages = Vec::new();

    for message in &messages {
        match message {
            Message::Record { record } if record.stream == "Users" => {
                users_seen += 1;
                current_user = record.get("id").cloned();
                assert_eq!(current_user, Some(json!(users_seen)));
            }
            Message::Record { record } => {
                assert_eq!(record.stream, "Purchases");
                assert_eq!(record.get("user_id").cloned(), current_user);
                purchases_seen += 1;
                assert_eq!(record.get("id"), Some(&json!(purchases_seen)));
            }
            Message::State { state } if users_seen < 5 => {
                intermediate_cursors.push(state.data["Users"]["cursor"].clone());
            }
            Message::State { state } => final_messages.push(state.data.clone()),
            other => panic!("unexpected message: {other:?}"),
        }
    }

    assert_eq!(users_seen, 5);
    assert_eq!(intermediate_cursors, vec![json!(2), json!(4)]);

    // Final Users checkpoint, then the Purchases checkpoint; both carry the
    // purchase counter
    assert_eq!(final_messages.len(), 2);
    assert_eq!(final_messages[0]["Users"], json!({"cursor": 5, "seed": 42}));
    assert_eq!(
        final_messages[0]["Purchases"],
        json!({"purchases_count": purchases_seen})
    );
    assert_eq!(
        final_messages[1]["Purchases"],
        json!({"purchases_count": purchases_seen})
    );
    assert_eq!(final_messages[1]["Users"], json!({"cursor": 5, "seed": 42}));
}

#[test]
fn test_products_only() {
    let first = run(&config(0, 500, 100, None), &[StreamName::Products], SyncState::new());
    let second = run(&config(0, 500, 100, None), &[StreamName::Products], SyncState::new());

    let products = records(&first, "Products");
    let fixture = faker_generator::generate_products().unwrap();
    assert_eq!(products.len(), fixture.len());
    assert_eq!(first.len(), fixture.len() + 1);

    let last = first.last().and_then(Message::as_state).unwrap();
    assert_eq!(
        last.data["Products"],
        json!({"product_count": fixture.len()})
    );

    let data_first: Vec<_> = products.iter().map(|r| r.data.clone()).collect();
    let data_second: Vec<_> = records(&second, "Products")
        .iter()
        .map(|r| r.data.clone())
        .collect();
    assert_eq!(data_first, data_second);
}

#[test]
fn test_products_ignore_prior_state() {
    let mut state = SyncState::new();
    state
        .update(&UsersCheckpoint {
            cursor: 100,
            seed: Some(1),
        })
        .unwrap();

    let fresh = run(&config(0, 500, 100, None), &[StreamName::Products], SyncState::new());
    let resumed = run(&config(0, 500, 100, None), &[StreamName::Products], state);

    assert_eq!(records(&fresh, "Products").len(), records(&resumed, "Products").len());
}

#[test]
fn test_purchases_without_users_rejected() {
    let result = read(
        &config(5, 5, 2, Some(42)),
        &configured(&[StreamName::Purchases]),
        SyncState::new(),
    );

    assert!(matches!(result, Err(SourceError::Configuration(_))));
}

#[test]
fn test_resumption_continues_ids() {
    let cfg = config(9, 4, 2, Some(42));
    let streams = [StreamName::Users, StreamName::Purchases];

    let mut state = SyncState::new();
    let mut user_ids = Vec::new();
    let mut purchase_ids = Vec::new();

    // 9 users at 4 per sync: three invocations, the last one short
    for _ in 0..3 {
        let messages = run(&cfg, &streams, state.clone());
        user_ids.extend(records(&messages, "Users").iter().map(|r| r.data["id"].clone()));
        purchase_ids.extend(
            records(&messages, "Purchases")
                .iter()
                .map(|r| r.data["id"].as_u64().unwrap()),
        );
        state = final_state(&messages);
    }

    let expected_users: Vec<_> = (1..=9).map(|id| json!(id)).collect();
    assert_eq!(user_ids, expected_users);

    let expected_purchases: Vec<_> = (1..=purchase_ids.len() as u64).collect();
    assert_eq!(purchase_ids, expected_purchases);

    let purchases: PurchasesCheckpoint = state.get().unwrap().unwrap();
    assert_eq!(purchases.purchases_count, purchase_ids.len() as u64);

    // A fourth invocation has nothing left to generate
    let messages = run(&cfg, &streams, state);
    assert!(records(&messages, "Users").is_empty());
}

#[test]
fn test_resume_from_intermediate_checkpoint_continues_purchase_ids() {
    let cfg = config(10, 0, 2, Some(42));
    let streams = [StreamName::Users, StreamName::Purchases];
    let messages = run(&cfg, &streams, SyncState::new());

    // Interrupted after the second slice: keep what was emitted up to that state
    let (cut, state) = messages
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.as_state().map(|s| (i, s.data.clone())))
        .nth(1)
        .unwrap();
    assert_eq!(state["Users"]["cursor"], json!(4));
    let emitted_before: Vec<_> = records(&messages[..cut], "Purchases")
        .iter()
        .map(|r| r.data["id"].as_u64().unwrap())
        .collect();

    let resumed = run(&cfg, &streams, SyncState::from_map(state));
    let resumed_ids: Vec<_> = records(&resumed, "Purchases")
        .iter()
        .map(|r| r.data["id"].as_u64().unwrap())
        .collect();

    let last_before = emitted_before.last().copied().unwrap_or(0);
    if let Some(first) = resumed_ids.first() {
        assert_eq!(*first, last_before + 1);
    }
    assert!(resumed_ids.iter().all(|id| !emitted_before.contains(id)));

    let user_ids: Vec<_> = records(&resumed, "Users")
        .iter()
        .map(|r| r.data["id"].as_u64().unwrap())
        .collect();
    assert_eq!(user_ids, (5..=10).collect::<Vec<_>>());
}

#[test]
fn test_users_identical_with_or_without_purchases() {
    let cfg = config(5, 500, 100, Some(42));

    let users_only = run(&cfg, &[StreamName::Users], SyncState::new());
    let with_purchases = run(
        &cfg,
        &[StreamName::Users, StreamName::Purchases],
        SyncState::new(),
    );

    let data = |messages: &[Message]| -> Vec<_> {
        records(messages, "Users")
            .iter()
            .map(|r| r.data.clone())
            .collect()
    };
    assert_eq!(data(&users_only), data(&with_purchases));
}

#[test]
fn test_resumed_sync_never_reemits_earlier_users() {
    let mut state = SyncState::new();
    state
        .update(&UsersCheckpoint {
            cursor: 7,
            seed: Some(42),
        })
        .unwrap();

    let messages = run(&config(12, 500, 100, Some(42)), &[StreamName::Users], state);
    let ids: Vec<_> = records(&messages, "Users")
        .iter()
        .map(|r| r.data["id"].as_u64().unwrap())
        .collect();

    assert_eq!(ids, vec![8, 9, 10, 11, 12]);
}

#[test]
fn test_same_seed_same_users() {
    let mut state = SyncState::new();
    state
        .update(&UsersCheckpoint {
            cursor: 3,
            seed: Some(42),
        })
        .unwrap();

    let first = run(&config(10, 500, 100, Some(42)), &[StreamName::Users], state.clone());
    let second = run(&config(10, 500, 100, Some(42)), &[StreamName::Users], state);

    let users_first: Vec<_> = records(&first, "Users").iter().map(|r| r.data.clone()).collect();
    let users_second: Vec<_> = records(&second, "Users").iter().map(|r| r.data.clone()).collect();
    assert_eq!(users_first.len(), 7);
    assert_eq!(users_first, users_second);
    assert!(users_first.iter().all(|u| !u.contains_key("birthdate")));
}

#[test]
fn test_same_seed_same_purchases_with_fixed_now() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let cfg = config(20, 500, 100, Some(7));
    let catalog = configured(&[StreamName::Users, StreamName::Purchases]);

    let collect = || {
        read_at(&cfg, &catalog, SyncState::new(), now)
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    };
    let first = collect();
    let second = collect();

    let purchases = |messages: &[Message]| -> Vec<_> {
        records(messages, "Purchases")
            .iter()
            .map(|r| r.data.clone())
            .collect()
    };
    assert_eq!(purchases(&first), purchases(&second));
}

#[test]
fn test_generated_invariants() {
    let messages = run(
        &config(300, 0, 50, Some(3)),
        &[StreamName::Users, StreamName::Purchases],
        SyncState::new(),
    );

    for user in records(&messages, "Users") {
        let created = parse_ts(&user.data["created_at"]).unwrap();
        let updated = parse_ts(&user.data["updated_at"]).unwrap();
        assert!(updated >= created);
    }

    let mut last_id = 0;
    for purchase in records(&messages, "Purchases") {
        let id = purchase.data["id"].as_u64().unwrap();
        assert!(id > last_id);
        last_id = id;

        let added = parse_ts(&purchase.data["added_to_cart_at"]);
        let purchased = parse_ts(&purchase.data["purchased_at"]);
        let returned = parse_ts(&purchase.data["returned_at"]);
        if added.is_none() {
            assert!(purchased.is_none());
        }
        if purchased.is_none() {
            assert!(returned.is_none());
        }
    }
}

#[test]
fn test_record_shape() {
    let messages = run(
        &config(1, 500, 100, Some(42)),
        &[StreamName::Users],
        SyncState::new(),
    );

    let user = records(&messages, "Users")[0];
    assert_eq!(user.emitted_at % 1000, 0);
    for field in [
        "id",
        "name",
        "username",
        "mail",
        "address",
        "job",
        "company",
        "website",
        "created_at",
        "updated_at",
    ] {
        assert!(user.data.contains_key(field), "missing {field}");
    }

    let line = serde_json::to_string(&messages[0]).unwrap();
    assert!(line.starts_with(r#"{"type":"RECORD","record":{"stream":"Users""#));
}
