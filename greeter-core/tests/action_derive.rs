//! Tests for #[derive(Action)]

use greeter_core::{Action, ActionCategory};

#[derive(greeter_core::Action, Clone, Debug, PartialEq)]
#[action(infer_categories)]
enum TestAction {
    GreetingStage { greeting: String },
    GreetingCommit,
    UiFocusNext,
    #[action(category = "lifecycle")]
    Quit,
    #[action(skip_category)]
    GreetingReset,
    Echo(String),
}

#[derive(greeter_core::Action, Clone, Debug)]
enum PlainAction {
    Ping,
    Pong(u8),
}

#[test]
fn test_names() {
    assert_eq!(
        TestAction::GreetingStage {
            greeting: "Yo".into()
        }
        .name(),
        "GreetingStage"
    );
    assert_eq!(TestAction::GreetingCommit.name(), "GreetingCommit");
    assert_eq!(TestAction::Echo("x".into()).name(), "Echo");
    assert_eq!(PlainAction::Ping.name(), "Ping");
    assert_eq!(PlainAction::Pong(1).name(), "Pong");
}

#[test]
fn test_inferred_categories() {
    assert_eq!(TestAction::GreetingCommit.category(), Some("greeting"));
    assert_eq!(
        TestAction::GreetingStage {
            greeting: String::new()
        }
        .category(),
        Some("greeting")
    );
    assert_eq!(TestAction::UiFocusNext.category(), Some("ui"));
    assert_eq!(TestAction::Echo("x".into()).category(), None);
}

#[test]
fn test_category_overrides() {
    assert_eq!(TestAction::Quit.category(), Some("lifecycle"));
    assert_eq!(TestAction::GreetingReset.category(), None);
}

#[test]
fn test_category_predicates() {
    assert!(TestAction::GreetingCommit.is_greeting());
    assert!(!TestAction::GreetingReset.is_greeting());
    assert!(TestAction::UiFocusNext.is_ui());
    assert!(TestAction::Quit.is_lifecycle());
}
