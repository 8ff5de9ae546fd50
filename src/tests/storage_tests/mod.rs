// Storage Tests Module - Testing the storage module
// Tests organized by storage module functionality:
// - message_tests: Message struct and direction helpers
// - conversation_tests: Conversation append, dedup and one-time backfill
// - store_tests: ConversationStore lookup, creation order and routing
// - settings_tests: Settings defaults, persistence and normalization
// - credentials_tests: Credentials validation and CredentialStore persistence

mod conversation_tests;
mod store_tests;
mod settings_tests;
mod credentials_tests;
