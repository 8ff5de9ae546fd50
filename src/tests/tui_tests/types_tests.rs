// Types Tests - Testing Screen and LoginField enums

use crate::tui::{LoginField, Screen};

#[test]
fn test_login_field_toggle() {
    assert_eq!(LoginField::IdInstance.toggle(), LoginField::ApiToken);
    assert_eq!(LoginField::ApiToken.toggle(), LoginField::IdInstance);
    assert_eq!(LoginField::IdInstance.toggle().toggle(), LoginField::IdInstance);
}

#[test]
fn test_login_field_labels_match_gateway_names() {
    assert_eq!(LoginField::IdInstance.label(), "idInstance");
    assert_eq!(LoginField::ApiToken.label(), "apiTokenInstance");
}

#[test]
fn test_screen_equality() {
    assert_eq!(Screen::Login, Screen::Login);
    assert_ne!(Screen::ChatList, Screen::ChatView);
}
