use std::cell::Cell;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Unified event type consumed by the app runner
#[derive(Clone, Debug)]
pub enum DrillEvent {
    Key(KeyEvent),
    Resize,
    /// Countdown step carrying the seconds elapsed since the previous tick.
    Tick(f64),
}

/// Source of terminal events (keyboard, resize, etc.)
pub trait DrillEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError>;
}

/// Production event source reading crossterm events on a helper thread
pub struct CrosstermEventSource {
    rx: Receiver<DrillEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                Ok(CtEvent::Key(key)) => DrillEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => DrillEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    log::error!("terminal event reader stopped: {}", e);
                    break;
                }
            };
            if tx.send(ev).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DrillEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Event source fed from a channel, for headless runs and tests
pub struct TestEventSource {
    rx: Receiver<DrillEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<DrillEvent>) -> Self {
        Self { rx }
    }
}

impl DrillEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<DrillEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the application one event at a time, interleaving ticks at a
/// fixed interval. Ticks report wall-clock time so the countdown stays
/// accurate while keys are arriving.
pub struct Runner<E: DrillEventSource> {
    event_source: E,
    interval: Duration,
    last_tick: Cell<Instant>,
}

impl<E: DrillEventSource> Runner<E> {
    pub fn new(event_source: E, interval: Duration) -> Self {
        Self {
            event_source,
            interval,
            last_tick: Cell::new(Instant::now()),
        }
    }

    /// Restarts tick accounting, e.g. when a new question appears.
    pub fn restart_clock(&self) {
        self.last_tick.set(Instant::now());
    }

    /// Blocks until the next event or tick deadline, whichever comes first.
    pub fn step(&self) -> DrillEvent {
        let since = self.last_tick.get().elapsed();
        if since < self.interval {
            let wait = self.interval - since;
            match self.event_source.recv_timeout(wait) {
                Ok(ev) => return ev,
                Err(RecvTimeoutError::Disconnected) => std::thread::sleep(wait),
                Err(RecvTimeoutError::Timeout) => {}
            }
        }
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_tick.get());
        self.last_tick.set(now);
        DrillEvent::Tick(elapsed.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(2));

        match runner.step() {
            DrillEvent::Tick(elapsed) => assert!(elapsed >= 0.002),
            other => panic!("expected Tick on timeout, got {:?}", other),
        }
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(DrillEvent::Resize).unwrap();
        let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(50));

        match runner.step() {
            DrillEvent::Resize => {}
            other => panic!("expected Resize event, got {:?}", other),
        }
    }

    #[test]
    fn restart_clock_discards_time_before_restart() {
        let (_tx, rx) = mpsc::channel::<DrillEvent>();
        let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(10));
        std::thread::sleep(Duration::from_millis(200));
        runner.restart_clock();

        match runner.step() {
            DrillEvent::Tick(elapsed) => assert!(elapsed < 0.15, "elapsed {}", elapsed),
            other => panic!("expected Tick after restart, got {:?}", other),
        }
    }

    #[test]
    fn disconnected_source_still_ticks() {
        let (tx, rx) = mpsc::channel::<DrillEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx), Duration::from_millis(1));
        assert!(matches!(runner.step(), DrillEvent::Tick(_)));
    }
}
