// ConversationStore Tests - Testing lookup, creation order and message routing

use crate::storage::{ConversationStore, Direction, HistoryState, Message};

#[test]
fn test_store_creation() {
    let store = ConversationStore::new();
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert!(store.get("79991234567").is_none());
}

#[test]
fn test_ensure_creates_once_in_creation_order() {
    let mut store = ConversationStore::new();

    store.ensure("79990000002");
    store.ensure("79990000001");
    store.ensure("79990000002");

    let order: Vec<&str> = store.list().iter().map(|c| c.counterpart_id.as_str()).collect();
    assert_eq!(order, vec!["79990000002", "79990000001"]);
    assert_eq!(store.len(), 2);
}

#[test]
fn test_append_outgoing_creates_conversation() {
    let mut store = ConversationStore::new();

    assert!(store.append_outgoing("79991234567", Message::outgoing("123", "hello", 1)));

    let conversation = store.get("79991234567").expect("Conversation should exist");
    assert_eq!(conversation.messages.len(), 1);
    assert_eq!(conversation.messages[0].direction, Direction::Outgoing);
    assert_eq!(conversation.history, HistoryState::Unloaded);
}

#[test]
fn test_append_incoming_forces_incoming_direction() {
    let mut store = ConversationStore::new();

    store.append_incoming("79991234567", Message::outgoing("A1", "hi", 1));

    let conversation = store.get("79991234567").expect("Conversation should exist");
    assert_eq!(conversation.messages[0].direction, Direction::Incoming);
}

#[test]
fn test_messages_route_to_their_own_conversation() {
    let mut store = ConversationStore::new();

    store.append_incoming("79990000001", Message::incoming("A1", "one", 1));
    store.append_incoming("79990000002", Message::incoming("A2", "two", 2));
    store.append_outgoing("79990000001", Message::outgoing("S1", "reply", 3));

    let first = store.get("79990000001").expect("Missing conversation");
    let second = store.get("79990000002").expect("Missing conversation");
    assert_eq!(first.messages.len(), 2);
    assert_eq!(second.messages.len(), 1);
    assert_eq!(second.messages[0].text, "two");
}

#[test]
fn test_duplicate_ids_are_not_appended() {
    let mut store = ConversationStore::new();

    assert!(store.append_incoming("79991234567", Message::incoming("A1", "hi", 1)));
    assert!(!store.append_incoming("79991234567", Message::incoming("A1", "hi", 1)));

    assert_eq!(store.get("79991234567").map(|c| c.messages.len()), Some(1));
}

#[test]
fn test_backfill_history_once() {
    let mut store = ConversationStore::new();
    store.append_outgoing("79991234567", Message::outgoing("123", "hello", 10));

    let added = store.backfill_history(
        "79991234567",
        vec![Message::incoming("h1", "old", 1), Message::outgoing("h2", "old reply", 2)],
    );
    assert_eq!(added, 2);

    let again = store.backfill_history("79991234567", vec![Message::incoming("h0", "x", 0)]);
    assert_eq!(again, 0, "Loaded conversations are never backfilled again");

    let conversation = store.get("79991234567").expect("Missing conversation");
    let ids: Vec<&str> = conversation.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["h1", "h2", "123"]);
    assert_eq!(conversation.history, HistoryState::Loaded);
}

#[test]
fn test_backfill_history_creates_missing_conversation() {
    let mut store = ConversationStore::new();

    store.backfill_history("79991234567", vec![Message::incoming("h1", "old", 1)]);

    let conversation = store.get("79991234567").expect("Conversation should be created");
    assert!(conversation.history_loaded());
    assert_eq!(conversation.messages.len(), 1);
}

#[test]
fn test_history_load_claim_and_abort() {
    let mut store = ConversationStore::new();

    assert!(store.begin_history_load("79991234567"));
    assert!(!store.begin_history_load("79991234567"));

    store.abort_history_load("79991234567");
    assert_eq!(
        store.get("79991234567").map(|c| c.history),
        Some(HistoryState::Unloaded)
    );

    // Aborting an unknown counterpart does not create it
    store.abort_history_load("79990000000");
    assert!(!store.contains("79990000000"));
}
