mod common;

use common::{open_service, FlakyStore};
use quotebook_core::storage::{LAST_VIEWED_QUOTE_KEY, QUOTES_KEY, SELECTED_CATEGORY_KEY};
use quotebook_core::{
    KeyValueStore, MemoryKeyValueStore, QuoteError, QuoteOrigin, QuoteService,
    QuoteValidationError, SqliteKeyValueStore,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

#[test]
fn open_without_stored_list_seeds_built_in_quotes() {
    let service = open_service(Arc::new(MemoryKeyValueStore::new()));
    assert_eq!(service.store().len(), 8);
    assert_eq!(service.current_category(), "all");
    assert!(service.categories().contains(&"motivation".to_string()));
}

#[test]
fn added_quote_survives_reopen_of_sqlite_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quotebook.sqlite3");

    {
        let durable = Arc::new(SqliteKeyValueStore::open(&path).unwrap());
        let mut service = open_service(durable);
        let added = service.add_quote("  Ship it.  ", " Work ").unwrap();
        assert_eq!(added.text, "Ship it.");
        assert_eq!(added.category, "work");
        assert_eq!(added.origin, QuoteOrigin::Local);
        service.filter("work").unwrap();
    }

    let durable = Arc::new(SqliteKeyValueStore::open(&path).unwrap());
    let service = open_service(durable);
    assert_eq!(service.store().len(), 9);
    assert_eq!(service.current_category(), "work");
    assert_eq!(service.filtered().len(), 1);
}

#[test]
fn invalid_add_is_rejected_and_nothing_is_persisted() {
    let durable = Arc::new(MemoryKeyValueStore::new());
    let mut service = open_service(durable.clone());

    let err = service.add_quote("   ", "life").unwrap_err();
    assert!(matches!(
        err,
        QuoteError::Validation(QuoteValidationError::EmptyText)
    ));
    let err = service.add_quote("Text", "  ").unwrap_err();
    assert!(matches!(
        err,
        QuoteError::Validation(QuoteValidationError::EmptyCategory)
    ));

    assert_eq!(service.store().len(), 8);
    assert_eq!(durable.get(QUOTES_KEY).unwrap(), None);
}

#[test]
fn failed_write_rolls_back_add() {
    let durable = Arc::new(FlakyStore::default());
    let mut service = open_service(durable.clone());
    durable.fail_writes(true);

    let err = service.add_quote("Lost quote", "life").unwrap_err();
    assert!(matches!(err, QuoteError::Storage(_)));
    assert_eq!(service.store().len(), 8);
    assert!(!service
        .store()
        .as_slice()
        .iter()
        .any(|quote| quote.text == "Lost quote"));
}

#[test]
fn filter_persists_selected_category() {
    let durable = Arc::new(MemoryKeyValueStore::new());
    let mut service = open_service(durable.clone());

    let life = service.filter("LIFE").unwrap();
    assert_eq!(life.len(), 2);
    assert!(life.iter().all(|quote| quote.category == "life"));
    assert_eq!(
        durable.get(SELECTED_CATEGORY_KEY).unwrap().as_deref(),
        Some("life")
    );

    let all = service.filter("all").unwrap();
    assert_eq!(all.len(), 8);
}

#[test]
fn show_random_picks_from_filter_and_records_last_viewed() {
    let session = Arc::new(MemoryKeyValueStore::new());
    let mut service =
        QuoteService::open(Arc::new(MemoryKeyValueStore::new()), session.clone()).unwrap();
    assert_eq!(service.last_viewed().unwrap(), None);

    service.filter("motivation").unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let picked = service.show_random_with(&mut rng).unwrap();
    assert_eq!(picked.category, "motivation");

    assert!(session.get(LAST_VIEWED_QUOTE_KEY).unwrap().is_some());
    assert_eq!(service.last_viewed().unwrap(), Some(picked));
}

#[test]
fn show_random_on_empty_category_fails() {
    let mut service = open_service(Arc::new(MemoryKeyValueStore::new()));
    assert!(service.filter("astronomy").unwrap().is_empty());
    assert!(matches!(
        service.show_random(),
        Err(QuoteError::EmptyCollection)
    ));
    assert_eq!(service.last_viewed().unwrap(), None);
}

#[test]
fn corrupt_stored_list_is_reported_and_left_in_place() {
    let durable = Arc::new(MemoryKeyValueStore::new());
    durable.set(QUOTES_KEY, "{not json").unwrap();

    let result = QuoteService::open(durable.clone(), Arc::new(MemoryKeyValueStore::new()));
    assert!(matches!(result, Err(QuoteError::Parse(_))));
    assert_eq!(durable.get(QUOTES_KEY).unwrap().as_deref(), Some("{not json"));
}
