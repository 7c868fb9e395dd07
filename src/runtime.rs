use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use log::warn;

/// Events driving the split timer loop
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// redraw the running clock
    Tick,
}

/// What the loop should do after handling an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Source of terminal input events
pub trait AppEventSource: Send + 'static {
    /// Waits up to `timeout` for the next event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;
}

/// Reads crossterm events on a background thread. Only key presses are
/// forwarded so a split is never recorded twice on terminals that report
/// releases.
pub struct CrosstermEventSource {
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(e) => {
                    warn!("terminal input closed: {e}");
                    break;
                }
            };
            if tx.send(evt).is_err() {
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

impl AppEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// How often the running clock is redrawn
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis.max(1)))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed event source for headless tests
pub struct TestEventSource {
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<AppEvent>) -> Self {
        Self { rx }
    }
}

impl AppEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Advances the timer loop one event or tick at a time
pub struct Runner<E: AppEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: AppEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Next event, or `Tick` once the tick interval passes without one
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => AppEvent::Tick,
        }
    }

    /// Feeds events to `handler` until it asks to exit or `max_steps` pass.
    /// Returns the number of steps taken.
    pub fn run_until<F, Err>(&self, max_steps: Option<usize>, mut handler: F) -> Result<usize, Err>
    where
        F: FnMut(AppEvent) -> Result<Flow, Err>,
    {
        let mut steps = 0;
        while max_steps.map_or(true, |max| steps < max) {
            steps += 1;
            if handler(self.step())? == Flow::Exit {
                break;
            }
        }
        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::convert::Infallible;

    #[test]
    fn step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(TestEventSource::new(rx), FixedTicker::from_millis(1));

        assert!(matches!(runner.step(), AppEvent::Tick));
    }

    #[test]
    fn step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Resize).unwrap();
        let runner = Runner::new(TestEventSource::new(rx), FixedTicker::from_millis(10));

        assert!(matches!(runner.step(), AppEvent::Resize));
    }

    #[test]
    fn run_until_stops_on_exit() {
        let (tx, rx) = mpsc::channel();
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)))
            .unwrap();
        let runner = Runner::new(TestEventSource::new(rx), FixedTicker::from_millis(1));

        let steps = runner
            .run_until(Some(50), |ev| {
                Ok::<_, Infallible>(match ev {
                    AppEvent::Key(_) => Flow::Exit,
                    _ => Flow::Continue,
                })
            })
            .unwrap();
        assert_eq!(steps, 1);
    }

    #[test]
    fn run_until_respects_step_limit() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(TestEventSource::new(rx), FixedTicker::from_millis(1));

        let steps = runner
            .run_until(Some(3), |_| Ok::<_, Infallible>(Flow::Continue))
            .unwrap();
        assert_eq!(steps, 3);
    }

    #[test]
    fn zero_tick_is_clamped() {
        assert_eq!(FixedTicker::from_millis(0).interval(), Duration::from_millis(1));
    }
}
