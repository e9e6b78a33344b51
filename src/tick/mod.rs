//! Tick sources: the host's per-frame scheduling primitive.
//!
//! The scheduler itself is agnostic to where ticks come from: a timer
//! thread, an event-loop hook, or a platform animation callback all
//! work, as long as something yields [`Tick`]s with a monotonic elapsed
//! time. Two implementations ship with the crate:
//!
//! - [`IntervalTicker`]: a dedicated-thread timer for hosts without
//!   their own frame clock.
//! - [`ManualTicks`]: hand-cranked synthetic ticks, for embedding into
//!   an existing frame loop and for deterministic tests.

mod interval;

pub use interval::IntervalTicker;

use std::time::Duration;

/// One discrete scheduling opportunity.
#[derive(Debug, Clone, Copy)]
pub struct Tick {
    /// Frame number (monotonically increasing).
    pub frame: u64,
    /// Time elapsed since the tick source was started.
    pub elapsed: Duration,
}

/// A supplier of scheduling opportunities.
pub trait TickSource {
    /// Yield the next tick, blocking if the source paces itself.
    ///
    /// Returns `None` once the source is shut down.
    fn next_tick(&mut self) -> Option<Tick>;
}

/// Synthetic ticks advancing by a fixed step per call.
///
/// Useful when the host already has a frame loop (call [`ManualTicks::advance`]
/// once per frame with real elapsed time), and in tests where wall-clock
/// sleeping would make scheduling assertions flaky.
#[derive(Debug, Clone)]
pub struct ManualTicks {
    frame: u64,
    elapsed: Duration,
    step: Duration,
}

impl ManualTicks {
    /// Create a manual tick source advancing `step` per tick.
    pub const fn new(step: Duration) -> Self {
        Self {
            frame: 0,
            elapsed: Duration::ZERO,
            step,
        }
    }

    /// Produce the next tick after an arbitrary elapsed-time advance.
    pub fn advance(&mut self, by: Duration) -> Tick {
        self.elapsed += by;
        let tick = Tick {
            frame: self.frame,
            elapsed: self.elapsed,
        };
        self.frame += 1;
        tick
    }
}

impl TickSource for ManualTicks {
    fn next_tick(&mut self) -> Option<Tick> {
        let step = self.step;
        Some(self.advance(step))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_ticks_advance_monotonically() {
        let mut ticks = ManualTicks::new(Duration::from_millis(16));

        let first = ticks.next_tick().unwrap();
        let second = ticks.next_tick().unwrap();
        assert_eq!(first.frame, 0);
        assert_eq!(second.frame, 1);
        assert!(second.elapsed > first.elapsed);
    }

    #[test]
    fn test_manual_ticks_arbitrary_advance() {
        let mut ticks = ManualTicks::new(Duration::from_millis(16));
        let tick = ticks.advance(Duration::from_millis(250));
        assert_eq!(tick.elapsed, Duration::from_millis(250));
    }
}
