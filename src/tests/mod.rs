// Test modules for Greenchat
// Each module tests the corresponding source module; `support` holds the
// scripted gateway shared by the controller, poller and session tests.

mod support;

mod storage_tests;
mod tui_tests;
