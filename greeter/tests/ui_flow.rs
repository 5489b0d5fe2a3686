//! End-to-end flows: events -> GreeterUi -> emitted actions -> store

use std::cell::RefCell;
use std::rc::Rc;

use greeter::action::Action;
use greeter::config::default_keybindings;
use greeter::reducer::reducer;
use greeter::state::GreetingState;
use greeter::ui::{Focus, GreeterUi};
use greeter_core::testing::*;
use greeter_core::{count_emitted, DispatchRuntime, EventKind, Store};

fn setup(state: GreetingState) -> (TestHarness<GreetingState, Action>, GreeterUi) {
    let ui = GreeterUi::new(&state, default_keybindings());
    (TestHarness::new(state, reducer), ui)
}

/// Map one event through the UI and dispatch whatever it emits
fn send(harness: &mut TestHarness<GreetingState, Action>, ui: &mut GreeterUi, event: EventKind) {
    let outcome = ui.map_event(&event, harness.state());
    harness.emit_all(outcome.actions);
    harness.flush();
}

#[test]
fn test_typing_stages_without_committing() {
    let (mut harness, mut ui) = setup(GreetingState::default());

    for event in typed("Hey") {
        let outcome = ui.map_event(&event, harness.state());
        harness.emit_all(outcome.actions);
        harness.flush();
    }

    assert_eq!(harness.state().proposed_greeting, "Hey");
    assert_eq!(harness.state().greeting, "Hello");
}

#[test]
fn test_fast_typing_through_runtime_keeps_every_key() {
    let state = GreetingState::default();
    let mut ui = GreeterUi::new(&state, default_keybindings());
    let mut runtime = DispatchRuntime::new(state, reducer);

    // Back-to-back events, nothing in between to drain a queue
    for event in typed("ab") {
        let quit = runtime.handle_event(
            &event,
            |event: &EventKind, state: &GreetingState| ui.map_event(event, state),
            |action: &Action| matches!(action, Action::Quit),
        );
        assert!(!quit);
    }

    assert_eq!(runtime.state().proposed_greeting, "ab");
    assert_eq!(runtime.state().greeting, "Hello");
}

#[test]
fn test_runtime_quit_key_leaves_state() {
    let state = GreetingState::new("Hi", "Yo");
    let mut ui = GreeterUi::new(&state, default_keybindings());
    let mut runtime = DispatchRuntime::new(state, reducer);

    let quit = runtime.handle_event(
        &EventKind::Key(key("esc")),
        |event: &EventKind, state: &GreetingState| ui.map_event(event, state),
        |action: &Action| matches!(action, Action::Quit),
    );

    assert!(quit);
    assert_eq!(*runtime.state(), GreetingState::new("Hi", "Yo"));
}

#[test]
fn test_each_keystroke_emits_one_stage() {
    let (harness, mut ui) = setup(GreetingState::default());

    let mut emitted = Vec::new();
    let mut state = harness.state().clone();
    for event in typed("Yo") {
        let outcome = ui.map_event(&event, &state);
        for action in &outcome.actions {
            if let Action::GreetingStage { greeting } = action {
                state.proposed_greeting = greeting.clone();
            }
        }
        emitted.extend(outcome.actions);
    }

    assert_eq!(count_emitted!(emitted, Action::GreetingStage { .. }), 2);
    assert_eq!(emitted.last(), Some(&Action::stage("Yo")));
}

#[test]
fn test_type_then_enter_commits() {
    let (mut harness, mut ui) = setup(GreetingState::new("Hi", "Hi"));

    send(&mut harness, &mut ui, EventKind::Key(key("ctrl+u")));
    for event in typed("Yo") {
        send(&mut harness, &mut ui, event);
    }
    assert_eq!(*harness.state(), GreetingState::new("Hi", "Yo"));

    send(&mut harness, &mut ui, EventKind::Key(key("enter")));
    assert_eq!(*harness.state(), GreetingState::new("Yo", "Yo"));
}

#[test]
fn test_tab_then_button_press_commits() {
    let (mut harness, mut ui) = setup(GreetingState::default());

    for event in typed("Howdy") {
        send(&mut harness, &mut ui, event);
    }
    send(&mut harness, &mut ui, EventKind::Key(key("tab")));
    assert_eq!(ui.focus(), Focus::Button);

    // Typing on the button does nothing
    send(&mut harness, &mut ui, EventKind::Key(char_key('x')));
    assert_eq!(harness.state().proposed_greeting, "Howdy");

    send(&mut harness, &mut ui, EventKind::Key(key("space")));
    assert_eq!(harness.state().greeting, "Howdy");
}

#[test]
fn test_click_on_button_commits() {
    let (mut harness, mut ui) = setup(GreetingState::new("Hello", "Bonjour"));
    let mut render = RenderHarness::new(60, 20);

    let buffer = render.render(|frame| {
        let area = frame.area();
        ui.render(frame, area, harness.state());
    });

    // Locate the button label on screen and click it
    let text = buffer_to_string_plain(&buffer);
    let (row, line) = text
        .lines()
        .enumerate()
        .find(|(_, line)| line.contains("Change greeting"))
        .expect("button rendered");
    let byte_index = line.find("Change greeting").expect("label column");
    // Borders are multi-byte, so count chars for the screen column
    let column = line[..byte_index].chars().count();

    send(
        &mut harness,
        &mut ui,
        EventKind::Mouse(click(column as u16 + 1, row as u16)),
    );

    assert_eq!(*harness.state(), GreetingState::new("Bonjour", "Bonjour"));
    assert_eq!(ui.focus(), Focus::Button);
}

#[test]
fn test_ctrl_s_commits_from_anywhere() {
    let (mut harness, mut ui) = setup(GreetingState::new("Hello", "Salut"));

    send(&mut harness, &mut ui, EventKind::Key(ctrl_key('s')));

    assert_eq!(harness.state().greeting, "Salut");
}

#[test]
fn test_quit_is_emitted_but_state_untouched() {
    let (mut harness, mut ui) = setup(GreetingState::default());

    let outcome = ui.map_event(&EventKind::Key(key("esc")), harness.state());
    harness.emit_all(outcome.actions);

    let emitted = harness.flush();
    assert_eq!(emitted, vec![Action::Quit]);
    assert_eq!(*harness.state(), GreetingState::default());
}

#[test]
fn test_greeting_category_drain() {
    let (mut harness, mut ui) = setup(GreetingState::default());

    for event in typed("ab") {
        let outcome = ui.map_event(&event, harness.state());
        harness.emit_all(outcome.actions);
    }
    harness.emit(Action::Quit);

    let greeting_actions = harness.drain_category("greeting");
    assert_eq!(greeting_actions.len(), 2);
    assert_eq!(harness.drain_emitted(), vec![Action::Quit]);
}

#[test]
fn test_store_listeners_see_only_changes() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut store = Store::new(GreetingState::new("Hi", "Hi"), reducer);

    let log = Rc::clone(&seen);
    store.subscribe(move |state: &GreetingState| log.borrow_mut().push(state.clone()));

    store.dispatch(Action::stage("Yo"));
    store.dispatch(Action::Unknown);
    store.dispatch(Action::GreetingCommit);

    assert_eq!(
        *seen.borrow(),
        vec![GreetingState::new("Hi", "Yo"), GreetingState::new("Yo", "Yo")]
    );
}

#[test]
fn test_scripted_actions_from_json() {
    let mut harness = TestHarness::new(GreetingState::new("Hi", "Hi"), reducer);
    let script = greeter::action::parse_actions(
        r#"[
            {"type": "STAGE_GREETING", "greeting": "Yo"},
            {"type": "CHANGE_COLOR", "color": "red"},
            {"type": "COMMIT_GREETING", "greeting": "ignored"}
        ]"#,
    )
    .unwrap();

    let changed = harness.dispatch_all(script);

    assert_eq!(changed, 2);
    assert_eq!(*harness.state(), GreetingState::new("Yo", "Yo"));
}
