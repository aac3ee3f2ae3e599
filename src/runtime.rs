use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::debug;

/// How often the front end wakes up to redraw and poll the countdown.
pub const UI_TICK_RATE: Duration = Duration::from_millis(100);

/// What the front end reacts to. `Tick` means "nothing arrived within one
/// tick interval"; the countdown itself runs off the guide's scheduler.
#[derive(Clone, Debug)]
pub enum GuideEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Somewhere events come from: the terminal, or a channel fed by a test.
pub trait GuideEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GuideEvent, RecvTimeoutError>;
}

/// Reads the terminal on a background thread and forwards key presses and
/// resizes over a channel. The thread never touches the session.
pub struct CrosstermEventSource {
    rx: Receiver<GuideEvent>,
}

impl CrosstermEventSource {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // release and repeat events would double every press on some terminals
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => GuideEvent::Key(key),
                Ok(Event::Resize(_, _)) => GuideEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    debug!(%err, "terminal event reader stopped");
                    break;
                }
            };
            if tx.send(forwarded).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl GuideEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GuideEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Channel-backed source for headless runs.
pub struct TestEventSource {
    rx: Receiver<GuideEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<GuideEvent>) -> Self {
        Self { rx }
    }
}

impl GuideEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<GuideEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Hands out one event per call, or `Tick` once the tick interval passes
/// quietly.
pub struct Runner<E: GuideEventSource> {
    events: E,
    tick_rate: Duration,
}

impl<E: GuideEventSource> Runner<E> {
    pub fn new(events: E, tick_rate: Duration) -> Self {
        Self { events, tick_rate }
    }

    pub fn step(&self) -> GuideEvent {
        // a closed source looks like silence; the caller decides when to stop
        self.events
            .recv_timeout(self.tick_rate)
            .unwrap_or(GuideEvent::Tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn runner(rx: Receiver<GuideEvent>) -> Runner<TestEventSource> {
        Runner::new(TestEventSource::new(rx), Duration::from_millis(1))
    }

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        assert!(matches!(runner(rx).step(), GuideEvent::Tick));
    }

    #[test]
    fn step_passes_events_through_in_order() {
        let (tx, rx) = mpsc::channel();
        let enter = GuideEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        tx.send(enter).unwrap();
        tx.send(GuideEvent::Resize).unwrap();
        let runner = runner(rx);

        match runner.step() {
            GuideEvent::Key(key) => assert_eq!(key.code, KeyCode::Enter),
            other => panic!("expected Enter, got {other:?}"),
        }
        assert!(matches!(runner.step(), GuideEvent::Resize));
        assert!(matches!(runner.step(), GuideEvent::Tick));
    }

    #[test]
    fn step_ticks_after_sender_dropped() {
        let (tx, rx) = mpsc::channel::<GuideEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx), UI_TICK_RATE);
        assert!(matches!(runner.step(), GuideEvent::Tick));
    }
}
