// TUI Tests Module - Testing the public tui module
// Tests organized by TUI module structure:
// - app_tests: App struct and its screen transitions against a scripted gateway
// - screens_tests: All screen structs (Login, ChatList, NewChat, ChatView)
// - types_tests: Screen and LoginField enums
// - ui_tests: UI helper functions and full-frame rendering

mod types_tests;
