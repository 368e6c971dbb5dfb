//! Optimistic create/update/delete/move/copy lifecycle for cards.

use wishdeck_core::{CardUpdate, LocalStore};
use wishdeck_engine::SyncStatus;
use wishdeck_test_utils::test_engine;

#[tokio::test]
async fn test_create_card_failure_leaves_store_untouched() {
    // createItem("img.png","Foo",undefined,"g1") with a forced remote
    // failure: in-memory cards for the stack are empty again, the
    // error observable is set, the durable store is unchanged.
    let (engine, remote, dir) = test_engine();
    engine.create_stack("g1", None).await;
    let g1 = engine.stacks()[0].id.clone();

    let store = LocalStore::open(dir.path());
    let cards_on_disk_before = store.cards();

    remote.fail_next("create rejected");
    engine.create_card("img.png", "Foo", None, &g1).await;

    assert!(engine.cards_in_stack(&g1).is_empty());
    assert_eq!(engine.sync_status(), SyncStatus::Error);
    assert!(engine.last_error().unwrap().contains("create rejected"));
    assert_eq!(store.cards(), cards_on_disk_before);
}

#[tokio::test]
async fn test_create_card_promotes_temp_id() {
    let (engine, _remote, _dir) = test_engine();
    engine.create_stack("Books", None).await;
    let stack_id = engine.stacks()[0].id.clone();

    engine
        .create_card("img.png", "Foo", Some("a note".into()), &stack_id)
        .await;

    let cards = engine.cards_in_stack(&stack_id);
    assert_eq!(cards.len(), 1);
    assert!(!cards[0].id.is_temp());
    assert_eq!(cards[0].name, "Foo");
    assert_eq!(cards[0].description.as_deref(), Some("a note"));
}

#[tokio::test]
async fn test_update_card_rollback_restores_exact_prior_state() {
    let (engine, remote, _dir) = test_engine();
    engine.create_stack("Books", None).await;
    let stack_id = engine.stacks()[0].id.clone();
    engine
        .create_card("img.png", "Foo", Some("keep me".into()), &stack_id)
        .await;
    let before = engine.cards()[0].clone();

    remote.fail_next("write refused");
    engine
        .update_card(
            &before.id,
            CardUpdate::new().with_name("Bar").clear_description(),
        )
        .await;

    assert_eq!(engine.cards()[0], before);
    assert_eq!(engine.sync_status(), SyncStatus::Error);
}

#[tokio::test]
async fn test_delete_card_rollback_reinserts_in_creation_order() {
    let (engine, remote, _dir) = test_engine();
    engine.create_stack("Books", None).await;
    let stack_id = engine.stacks()[0].id.clone();
    engine.create_card("1.png", "One", None, &stack_id).await;
    engine.create_card("2.png", "Two", None, &stack_id).await;
    engine.create_card("3.png", "Three", None, &stack_id).await;

    let before = engine.cards();

    remote.fail_next("delete refused");
    engine.delete_card(&before[0].id).await;

    assert_eq!(engine.cards(), before);
    assert_eq!(engine.sync_status(), SyncStatus::Error);
}

#[tokio::test]
async fn test_move_card_changes_only_ownership() {
    let (engine, _remote, _dir) = test_engine();
    engine.create_stack("From", None).await;
    engine.create_stack("To", None).await;
    let from = engine.stacks()[0].id.clone();
    let to = engine.stacks()[1].id.clone();
    engine.create_card("img.png", "Foo", None, &from).await;
    let card = engine.cards()[0].clone();

    engine.move_card(&card.id, &to).await;

    assert_eq!(engine.card_count(&from), 0);
    let moved = &engine.cards_in_stack(&to)[0];
    assert_eq!(moved.id, card.id);
    assert_eq!(moved.name, card.name);
    assert_eq!(moved.cover, card.cover);
}

#[tokio::test]
async fn test_copy_card_is_independent_of_source() {
    let (engine, _remote, _dir) = test_engine();
    engine.create_stack("From", None).await;
    engine.create_stack("To", None).await;
    let from = engine.stacks()[0].id.clone();
    let to = engine.stacks()[1].id.clone();
    engine
        .create_card("img.png", "Foo", Some("note".into()), &from)
        .await;
    let source = engine.cards()[0].clone();

    engine.copy_card(&source.id, &to).await;

    // Source untouched under its original stack
    assert_eq!(engine.cards_in_stack(&from), vec![source.clone()]);

    // Copy carries the content under a distinct identifier
    let copies = engine.cards_in_stack(&to);
    assert_eq!(copies.len(), 1);
    assert_ne!(copies[0].id, source.id);
    assert!(!copies[0].id.is_temp());
    assert_eq!(copies[0].cover, source.cover);
    assert_eq!(copies[0].name, source.name);
    assert_eq!(copies[0].description, source.description);
}

#[tokio::test]
async fn test_copy_unknown_card_is_noop() {
    let (engine, _remote, _dir) = test_engine();
    engine.create_stack("To", None).await;
    let to = engine.stacks()[0].id.clone();

    engine
        .copy_card(&wishdeck_core::RecordId::generate(), &to)
        .await;

    assert!(engine.cards().is_empty());
    assert_eq!(engine.sync_status(), SyncStatus::Idle);
}
