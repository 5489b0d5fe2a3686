//! What the store's logging middleware writes for greeter actions

use std::io;
use std::sync::{Arc, Mutex};

use greeter::action::Action;
use greeter::reducer::reducer;
use greeter::state::GreetingState;
use greeter_core::{LoggingMiddleware, StoreWithMiddleware};

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn captured(dispatch: impl FnOnce()) -> String {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, dispatch);

    let bytes = buf.0.lock().unwrap().clone();
    String::from_utf8(bytes).unwrap()
}

#[test]
fn test_stage_logs_summary_not_text() {
    let mut store = StoreWithMiddleware::new(
        GreetingState::default(),
        reducer,
        LoggingMiddleware::new(),
    );

    let logs = captured(|| {
        store.dispatch(Action::stage("hunter2"));
    });

    assert!(logs.contains("GreetingStage(7 chars)"), "logs: {logs}");
    assert!(!logs.contains("hunter2"), "logs: {logs}");
    assert_eq!(store.state().proposed_greeting, "hunter2");
}

#[test]
fn test_commit_logs_state_change() {
    let mut store = StoreWithMiddleware::new(
        GreetingState::new("Hi", "Yo"),
        reducer,
        LoggingMiddleware::new(),
    );

    let logs = captured(|| {
        store.dispatch(Action::GreetingCommit);
    });

    assert!(logs.contains("GreetingCommit"));
    assert!(logs.contains("state_changed=true"));
}
