//! Repeating timer: runs an action once per fixed interval without drift.
//!
//! Deadlines advance from the construction time in whole intervals, so a slow
//! tick is compensated by a shorter sleep before the next one instead of
//! pushing every later tick back. Time is read through a [`Clock`] so tests
//! can drive the timer on virtual time.

use std::fmt;
use std::time::{Duration, Instant};

// ── Error type ──

/// Timer construction and tick errors.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerError {
    /// Interval is zero or negative.
    NonPositiveInterval,
    /// Interval is NaN, infinite, or too large to represent.
    NonNumericInterval(f64),
    /// Interval pushes the next deadline past what the clock can represent.
    IntervalTooLarge(Duration),
    /// `update()` was called with no action bound.
    MissingAction,
}

impl fmt::Display for TimerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerError::NonPositiveInterval => {
                write!(f, "timer interval must be greater than 0 seconds")
            }
            TimerError::NonNumericInterval(v) => {
                write!(f, "timer interval must be a finite number of seconds, got {v}")
            }
            TimerError::IntervalTooLarge(d) => {
                write!(f, "timer interval of {}s is too large", d.as_secs_f64())
            }
            TimerError::MissingAction => write!(f, "timer ticked with no action bound"),
        }
    }
}

impl std::error::Error for TimerError {}

pub type Result<T> = std::result::Result<T, TimerError>;

/// Convert user-supplied seconds into a strictly positive interval.
pub fn interval_from_secs(secs: f64) -> Result<Duration> {
    if !secs.is_finite() {
        return Err(TimerError::NonNumericInterval(secs));
    }
    if secs <= 0.0 {
        return Err(TimerError::NonPositiveInterval);
    }
    let interval =
        Duration::try_from_secs_f64(secs).map_err(|_| TimerError::NonNumericInterval(secs))?;
    if interval.is_zero() {
        return Err(TimerError::NonPositiveInterval);
    }
    Ok(interval)
}

// ── Clock ──

/// Source of monotonic time and the blocking sleep used between ticks.
pub trait Clock: Clone {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

/// Wall clock: `Instant::now()` and `thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

// ── Action ──

/// Work performed once per timer tick.
pub trait Tick {
    fn tick(&mut self) -> crate::error::Result<()>;
}

impl<F> Tick for F
where
    F: FnMut() -> crate::error::Result<()>,
{
    fn tick(&mut self) -> crate::error::Result<()> {
        self()
    }
}

// ── Timer ──

/// Periodic scheduler invoking its action once per `interval`.
pub struct RepeatingTimer<A, C = SystemClock> {
    clock: C,
    start_time: Instant,
    next_deadline: Instant,
    interval: Duration,
    action: Option<A>,
    ticks: u64,
}

impl<A: Tick, C: Clock> RepeatingTimer<A, C> {
    /// Create a timer with no action bound. Fails on a zero interval or one
    /// whose first deadline cannot be represented.
    pub fn new(interval: Duration, clock: C) -> Result<Self> {
        if interval.is_zero() {
            return Err(TimerError::NonPositiveInterval);
        }
        let start_time = clock.now();
        check_deadline(start_time, interval)?;
        Ok(RepeatingTimer {
            clock,
            start_time,
            next_deadline: start_time,
            interval,
            action: None,
            ticks: 0,
        })
    }

    pub fn with_action(interval: Duration, action: A, clock: C) -> Result<Self> {
        let mut timer = Self::new(interval, clock)?;
        timer.set_action(action);
        Ok(timer)
    }

    pub fn set_action(&mut self, action: A) {
        self.action = Some(action);
    }

    pub fn set_interval(&mut self, interval: Duration) -> Result<()> {
        if interval.is_zero() {
            return Err(TimerError::NonPositiveInterval);
        }
        check_deadline(self.next_deadline, interval)?;
        self.interval = interval;
        Ok(())
    }

    pub fn set_interval_secs(&mut self, secs: f64) -> Result<()> {
        self.set_interval(interval_from_secs(secs)?)
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time elapsed since the timer was created.
    pub fn runtime(&self) -> Duration {
        self.clock.now().saturating_duration_since(self.start_time)
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    /// Run one tick: advance the deadline, run the action, then sleep until
    /// the deadline. If the action overran the deadline, return immediately.
    pub fn update(&mut self) -> crate::error::Result<()> {
        self.next_deadline = check_deadline(self.next_deadline, self.interval)?;

        let action = self.action.as_mut().ok_or(TimerError::MissingAction)?;
        action.tick()?;
        self.ticks += 1;

        let now = self.clock.now();
        match self.next_deadline.checked_duration_since(now) {
            Some(wait) if !wait.is_zero() => self.clock.sleep(wait),
            _ => log::debug!(
                "tick {} overran its deadline by {:?}",
                self.ticks,
                now.saturating_duration_since(self.next_deadline)
            ),
        }
        Ok(())
    }
}

fn check_deadline(from: Instant, interval: Duration) -> Result<Instant> {
    from.checked_add(interval).ok_or(TimerError::IntervalTooLarge(interval))
}

// ── Manual clock for testing ──

/// Virtual clock for unit and integration tests.
///
/// Always compiled (zero runtime cost), hidden from public docs.
#[doc(hidden)]
pub mod mock {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Clock whose time only moves on [`ManualClock::advance`] or `sleep`.
    /// Clones share the same time line; every `sleep` is recorded.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        origin: Instant,
        elapsed: Rc<Cell<Duration>>,
        sleeps: Rc<RefCell<Vec<Duration>>>,
    }

    impl Default for ManualClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl ManualClock {
        pub fn new() -> Self {
            ManualClock {
                origin: Instant::now(),
                elapsed: Rc::new(Cell::new(Duration::ZERO)),
                sleeps: Rc::new(RefCell::new(Vec::new())),
            }
        }

        /// Move time forward without recording a sleep (simulates slow work).
        pub fn advance(&self, by: Duration) {
            self.elapsed.set(self.elapsed.get() + by);
        }

        /// Virtual time since the clock was created.
        pub fn elapsed(&self) -> Duration {
            self.elapsed.get()
        }

        /// Every sleep requested so far, in order.
        pub fn sleeps(&self) -> Vec<Duration> {
            self.sleeps.borrow().clone()
        }

        pub fn total_slept(&self) -> Duration {
            self.sleeps.borrow().iter().sum()
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.origin + self.elapsed.get()
        }

        fn sleep(&self, duration: Duration) {
            self.sleeps.borrow_mut().push(duration);
            self.advance(duration);
        }
    }
}
