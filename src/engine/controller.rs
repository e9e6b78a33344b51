//! Reveal engine: lifecycle controller and cooperative scheduler.
//!
//! The engine owns one [`TextSource`] and at most one in-flight run.
//! The host drives it by forwarding ticks from a [`TickSource`]; the
//! engine never spawns threads or blocks on its own. Complete sources
//! are paced by the timing model, incremental sources are drained as
//! fast as chunks arrive.

use super::state::{RunPhase, StreamState};
use crate::source::{Feed, Poll, SourceError, TextSource};
use crate::tick::{Tick, TickSource};
use crate::timing::{RevealMode, TimingParams};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Completion callback, fired at most once per run.
type CompleteFn = Box<dyn FnMut()>;
/// Error callback for consumption failures.
type ErrorFn = Box<dyn FnMut(&SourceError)>;

/// Progressive text-reveal engine.
///
/// One engine instance owns one source and one live [`StreamState`];
/// starting a new run implicitly cancels any prior one. All scheduling
/// is cooperative and single-threaded: nothing advances outside of
/// [`RevealEngine::tick`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use unfurl::{ManualTicks, RevealEngine, RunPhase};
///
/// let mut engine = RevealEngine::new("Hello!");
/// engine.start();
///
/// let mut ticks = ManualTicks::new(Duration::from_millis(100));
/// engine.drive(&mut ticks);
///
/// assert_eq!(engine.phase(), RunPhase::Completed);
/// assert_eq!(engine.displayed_text(), "Hello!");
/// ```
pub struct RevealEngine {
    /// The source of the current and future runs.
    source: TextSource,
    /// Pacing configuration, re-read at the start of every tick.
    timing: TimingParams,
    /// Live snapshot of the current run.
    state: StreamState,
    /// Lifecycle phase of the current run.
    phase: RunPhase,
    /// Uniform feed over the source, present while a run is armed.
    feed: Option<Feed>,
    /// Elapsed time of the last accepted tick.
    last_accepted: Option<Duration>,
    /// Cooperative cancellation flag, checked before every append.
    cancelled: bool,
    /// Failure of the current run, if any.
    last_error: Option<SourceError>,
    on_complete: Option<CompleteFn>,
    on_error: Option<ErrorFn>,
    /// Run counter, for diagnostics only.
    run: u64,
}

impl RevealEngine {
    /// Create an engine over the given source with default timing
    /// (speed 20, typewriter).
    pub fn new(source: impl Into<TextSource>) -> Self {
        Self {
            source: source.into(),
            timing: TimingParams::default(),
            state: StreamState::new(),
            phase: RunPhase::Idle,
            feed: None,
            last_accepted: None,
            cancelled: false,
            last_error: None,
            on_complete: None,
            on_error: None,
            run: 0,
        }
    }

    /// Set the pacing configuration.
    #[must_use]
    pub fn with_timing(mut self, timing: TimingParams) -> Self {
        self.timing = timing;
        self
    }

    /// Register a completion callback, fired at most once per run.
    #[must_use]
    pub fn on_complete(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Register an error callback for source consumption failures.
    #[must_use]
    pub fn on_error(mut self, callback: impl FnMut(&SourceError) + 'static) -> Self {
        self.on_error = Some(Box::new(callback));
        self
    }

    // ------------------------------------------------------------------
    // Live view
    // ------------------------------------------------------------------

    /// Text revealed so far.
    pub fn displayed_text(&self) -> &str {
        self.state.displayed()
    }

    /// Whether the current run has finished revealing (successfully or
    /// not; see [`RevealEngine::last_error`]).
    pub const fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Sentence segments of the displayed text (fade mode only).
    pub fn segments(&self) -> &[crate::segment::Segment] {
        self.state.segments()
    }

    /// The current run's lifecycle phase.
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    /// The live snapshot of the current run.
    pub const fn state(&self) -> &StreamState {
        &self.state
    }

    /// The failure that terminated the current run, if any.
    pub const fn last_error(&self) -> Option<&SourceError> {
        self.last_error.as_ref()
    }

    /// Current pacing configuration.
    pub const fn timing(&self) -> &TimingParams {
        &self.timing
    }

    /// Mutable pacing configuration.
    ///
    /// Changes take effect on the next tick; text already revealed is
    /// never re-derived.
    pub const fn timing_mut(&mut self) -> &mut TimingParams {
        &mut self.timing
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Begin a new run from empty state.
    ///
    /// Idempotent re-entry: calling `start()` while a run is in flight
    /// resets (cancelling that run) and begins a fresh one.
    pub fn start(&mut self) {
        self.reset();
        self.run += 1;
        self.feed = Some(Feed::new(&self.source));
        self.phase = RunPhase::Streaming;
        debug!(
            run = self.run,
            paced = self.source.is_pausable(),
            "reveal run started"
        );
    }

    /// Freeze scheduling without losing accumulated state.
    ///
    /// Only meaningful while streaming a complete source; incremental
    /// feeds have no natural pause point, so this is a no-op for them.
    pub fn pause(&mut self) {
        if self.phase == RunPhase::Streaming && self.source.is_pausable() {
            self.phase = RunPhase::Paused;
            debug!(run = self.run, "reveal run paused");
        }
    }

    /// Restart pacing from the current cursor.
    pub fn resume(&mut self) {
        if self.phase == RunPhase::Paused {
            // Forget the last accepted tick so the next one advances
            // immediately instead of waiting out a stale frame delay.
            self.last_accepted = None;
            self.phase = RunPhase::Streaming;
            debug!(run = self.run, "reveal run resumed");
        }
    }

    /// Return to `Idle`, discarding the current run's state.
    pub fn reset(&mut self) {
        self.state = StreamState::new();
        self.phase = RunPhase::Idle;
        self.feed = None;
        self.last_accepted = None;
        self.cancelled = false;
        self.last_error = None;
    }

    /// Irrevocably stop the current run.
    ///
    /// Already-revealed text is retained; no further appends happen and
    /// the run's completion notification is suppressed. A later run
    /// (after `start()`) gets a fresh completion.
    pub fn cancel(&mut self) {
        if self.phase == RunPhase::Streaming || self.phase == RunPhase::Paused {
            self.cancelled = true;
            self.feed = None;
            self.phase = RunPhase::Cancelled;
            debug!(run = self.run, "reveal run cancelled");
        }
    }

    /// Replace the source, cancelling the in-flight run and starting a
    /// new one from empty state.
    pub fn set_source(&mut self, source: impl Into<TextSource>) {
        self.cancel();
        self.source = source.into();
        self.start();
    }

    // ------------------------------------------------------------------
    // Scheduling
    // ------------------------------------------------------------------

    /// Offer the engine one scheduling opportunity.
    ///
    /// Ticks are ignored unless a run is streaming. For a complete
    /// source a tick below the current frame delay re-arms without
    /// advancing; an accepted tick reveals up to `chunk_size()`
    /// graphemes. For an incremental source every chunk currently
    /// available is appended, with no artificial pacing.
    pub fn tick(&mut self, tick: Tick) {
        if self.phase != RunPhase::Streaming || self.cancelled {
            return;
        }
        let Some(paced) = self.feed.as_ref().map(Feed::is_paced) else {
            return;
        };
        if paced {
            self.tick_paced(tick);
        } else {
            self.drain_chunks();
        }
    }

    /// Tick until the current run reaches a terminal phase.
    ///
    /// Convenience for hosts that dedicate a tick source to one run;
    /// hosts multiplexing ticks with other events call
    /// [`RevealEngine::tick`] directly.
    pub fn drive(&mut self, ticks: &mut impl TickSource) {
        while self.phase == RunPhase::Streaming {
            match ticks.next_tick() {
                Some(tick) => self.tick(tick),
                None => break,
            }
        }
    }

    /// Advance a paced (complete-source) run by one tick.
    fn tick_paced(&mut self, tick: Tick) {
        // Re-read timing every tick: live changes pace what follows.
        let timing = self.timing;
        if let Some(last) = self.last_accepted {
            if tick.elapsed.saturating_sub(last) < timing.frame_delay() {
                return;
            }
        }
        self.last_accepted = Some(tick.elapsed);

        let Some(event) = self.feed.as_mut().map(|feed| feed.poll(timing.chunk_size())) else {
            return;
        };
        match event {
            Poll::Delta(delta) => {
                trace!(run = self.run, grown = delta.len(), "revealed chunk");
                self.state
                    .append(&delta, matches!(timing.mode, RevealMode::Fade));
                if self.feed.as_ref().is_some_and(Feed::finished) {
                    self.finish_run();
                }
            }
            Poll::Exhausted => self.finish_run(),
            // Complete feeds never yield these.
            Poll::Idle | Poll::Failed(_) => {}
        }
    }

    /// Append every chunk currently available from an incremental feed.
    fn drain_chunks(&mut self) {
        loop {
            if self.cancelled {
                return;
            }
            let Some(event) = self.feed.as_mut().map(|feed| feed.poll(1)) else {
                return;
            };
            match event {
                Poll::Delta(delta) => {
                    trace!(run = self.run, grown = delta.len(), "appended chunk");
                    let fade = matches!(self.timing.mode, RevealMode::Fade);
                    self.state.append(&delta, fade);
                }
                Poll::Idle => return,
                Poll::Exhausted => {
                    self.finish_run();
                    return;
                }
                Poll::Failed(error) => {
                    self.fail_run(error);
                    return;
                }
            }
        }
    }

    /// Transition to `Completed` and notify, exactly once per run.
    fn finish_run(&mut self) {
        self.phase = RunPhase::Completed;
        self.fire_completion();
        debug!(run = self.run, revealed = self.state.cursor(), "reveal run completed");
    }

    /// Transition to `Failed`: surface the error, then mark the run
    /// complete so the host is never left waiting on a stuck stream.
    /// Partial output is accepted as final.
    fn fail_run(&mut self, error: SourceError) {
        warn!(run = self.run, %error, "source consumption failed");
        if let Some(callback) = self.on_error.as_mut() {
            callback(&error);
        }
        self.last_error = Some(error);
        self.phase = RunPhase::Failed;
        self.fire_completion();
    }

    fn fire_completion(&mut self) {
        if self.state.mark_complete() {
            if let Some(callback) = self.on_complete.as_mut() {
                callback();
            }
        }
    }
}

impl Drop for RevealEngine {
    fn drop(&mut self) {
        // Teardown is an implicit cancellation of any in-flight run.
        self.cancel();
    }
}
