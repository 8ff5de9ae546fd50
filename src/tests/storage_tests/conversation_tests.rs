// Conversation Tests - Testing timeline append, dedup and history backfill

use crate::storage::{Conversation, HistoryState, Message};

fn ids(conversation: &Conversation) -> Vec<&str> {
    conversation.messages.iter().map(|m| m.id.as_str()).collect()
}

#[test]
fn test_new_conversation_is_empty_and_unloaded() {
    let conversation = Conversation::new("79991234567".to_string());

    assert_eq!(conversation.counterpart_id, "79991234567");
    assert!(conversation.messages.is_empty());
    assert_eq!(conversation.history, HistoryState::Unloaded);
    assert!(!conversation.history_loaded());
    assert!(conversation.last_message().is_none());
}

#[test]
fn test_append_keeps_order_and_skips_duplicates() {
    let mut conversation = Conversation::new("79991234567".to_string());

    assert!(conversation.append_message(Message::outgoing("1", "a", 10)));
    assert!(conversation.append_message(Message::incoming("2", "b", 5)));
    assert!(
        !conversation.append_message(Message::incoming("1", "again", 20)),
        "Duplicate id should be rejected"
    );

    // Arrival order, not timestamp order
    assert_eq!(ids(&conversation), vec!["1", "2"]);
    assert_eq!(conversation.messages[0].text, "a");
    assert_eq!(conversation.last_message().map(|m| m.id.as_str()), Some("2"));
}

#[test]
fn test_history_load_state_transitions() {
    let mut conversation = Conversation::new("79991234567".to_string());

    assert!(conversation.begin_history_load());
    assert_eq!(conversation.history, HistoryState::Loading);
    assert!(!conversation.begin_history_load(), "Second claim must fail while loading");

    conversation.abort_history_load();
    assert_eq!(conversation.history, HistoryState::Unloaded);

    assert!(conversation.begin_history_load());
    conversation.backfill(Vec::new());
    assert_eq!(conversation.history, HistoryState::Loaded);
    assert!(!conversation.begin_history_load(), "Loaded is permanent");

    conversation.abort_history_load();
    assert_eq!(conversation.history, HistoryState::Loaded, "Abort must not undo a load");
}

#[test]
fn test_backfill_prepends_before_existing_messages() {
    let mut conversation = Conversation::new("79991234567".to_string());
    conversation.append_message(Message::outgoing("new", "just sent", 100));

    let added = conversation.backfill(vec![
        Message::incoming("h1", "old", 1),
        Message::outgoing("h2", "older reply", 2),
    ]);

    assert_eq!(added, 2);
    assert_eq!(ids(&conversation), vec!["h1", "h2", "new"]);
    assert!(conversation.history_loaded());
}

#[test]
fn test_backfill_skips_ids_already_present() {
    let mut conversation = Conversation::new("79991234567".to_string());
    conversation.append_message(Message::outgoing("123", "hello", 100));

    // History already contains the message we just sent
    let added = conversation.backfill(vec![
        Message::incoming("h1", "old", 1),
        Message::outgoing("123", "hello", 99),
        Message::incoming("h1", "repeat", 2),
    ]);

    assert_eq!(added, 1);
    assert_eq!(ids(&conversation), vec!["h1", "123"]);
    assert_eq!(conversation.messages[1].timestamp, 100, "Existing message wins");
}

#[test]
fn test_backfill_is_noop_once_loaded() {
    let mut conversation = Conversation::new("79991234567".to_string());
    conversation.backfill(vec![Message::incoming("h1", "old", 1)]);

    let added = conversation.backfill(vec![Message::incoming("h0", "older", 0)]);

    assert_eq!(added, 0);
    assert_eq!(ids(&conversation), vec!["h1"]);
}
