//! Crossterm event polling on a background task

use crate::event::EventKind;
use crossterm::event::{self, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Raw event from crossterm before processing
#[derive(Debug)]
pub enum RawEvent {
    Key(crossterm::event::KeyEvent),
    Mouse(crossterm::event::MouseEvent),
    Resize(u16, u16),
}

/// Spawn the event polling task with cancellation support
///
/// Polls crossterm and forwards events through `tx` until `cancel_token` is
/// cancelled or the receiver is dropped.
///
/// # Arguments
/// * `tx` - Channel to send raw events
/// * `poll_timeout` - Timeout for each poll operation
/// * `loop_sleep` - Sleep duration between poll cycles
/// * `cancel_token` - Token to cancel the polling task
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        const MAX_EVENTS_PER_BATCH: usize = 20;

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("Event poller cancelled, draining buffer");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut events_processed = 0;
                    while events_processed < MAX_EVENTS_PER_BATCH
                        && event::poll(poll_timeout).unwrap_or(false)
                    {
                        events_processed += 1;
                        let Ok(evt) = event::read() else {
                            continue;
                        };
                        let raw = match evt {
                            event::Event::Key(key) => Some(RawEvent::Key(key)),
                            event::Event::Mouse(mouse) => Some(RawEvent::Mouse(mouse)),
                            event::Event::Resize(w, h) => Some(RawEvent::Resize(w, h)),
                            _ => None,
                        };
                        if let Some(raw) = raw {
                            if tx.send(raw).is_err() {
                                debug!("Event channel closed, stopping poller");
                                return;
                            }
                        }
                    }
                }
            }
        }
    })
}

/// Process a raw event into an `EventKind`
///
/// Key releases and repeats are dropped (Windows reports both), so each
/// physical key press yields exactly one event.
pub fn process_raw_event(raw: RawEvent) -> Option<EventKind> {
    match raw {
        RawEvent::Key(key) if key.kind != KeyEventKind::Press => None,
        RawEvent::Key(key) => Some(EventKind::Key(key)),
        RawEvent::Mouse(mouse) => Some(EventKind::Mouse(mouse)),
        RawEvent::Resize(w, h) => Some(EventKind::Resize(w, h)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{char_key, click};

    #[test]
    fn test_process_key_press() {
        let event = process_raw_event(RawEvent::Key(char_key('a')));
        assert_eq!(event, Some(EventKind::Key(char_key('a'))));
    }

    #[test]
    fn test_process_key_release_dropped() {
        let mut release = char_key('a');
        release.kind = KeyEventKind::Release;
        assert_eq!(process_raw_event(RawEvent::Key(release)), None);
    }

    #[test]
    fn test_process_mouse_and_resize() {
        assert_eq!(
            process_raw_event(RawEvent::Mouse(click(3, 4))),
            Some(EventKind::Mouse(click(3, 4)))
        );
        assert_eq!(
            process_raw_event(RawEvent::Resize(100, 40)),
            Some(EventKind::Resize(100, 40))
        );
    }
}
