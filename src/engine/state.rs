//! Run state: the live snapshot one reveal run mutates.

use crate::segment::{split_sentences, Segment};

/// Lifecycle phase of a reveal run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunPhase {
    /// No run in flight.
    #[default]
    Idle,
    /// A run is consuming its source.
    Streaming,
    /// A complete-source run frozen by `pause()`.
    Paused,
    /// The source was fully revealed.
    Completed,
    /// The run was cancelled; displayed text is retained but frozen.
    Cancelled,
    /// The source failed mid-consumption; partial output is final.
    Failed,
}

impl RunPhase {
    /// Whether this phase is terminal for its run.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Failed)
    }
}

/// The live view of one run: what has been revealed so far.
///
/// Created fresh on `start()`/`reset()` and never shared between runs.
/// `displayed` only ever grows within a run, and is always an exact
/// prefix of the resolved text (complete source) or the concatenation
/// of chunks observed so far (incremental source).
#[derive(Debug, Clone, Default)]
pub struct StreamState {
    /// Text revealed so far.
    displayed: String,
    /// Whether the run has reached a terminal snapshot. `false → true`
    /// at most once per run.
    complete: bool,
    /// Sentence segments of `displayed`; non-empty only in fade mode.
    segments: Vec<Segment>,
    /// Byte offset into the source already revealed.
    cursor: usize,
}

impl StreamState {
    /// Fresh, unstarted state.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Text revealed so far.
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    /// Whether the run has finished revealing.
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Sentence segments of the displayed text (fade mode only).
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Byte offset into the source already revealed.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Append newly revealed text, re-deriving segments when fading.
    pub(crate) fn append(&mut self, delta: &str, fade: bool) {
        self.displayed.push_str(delta);
        self.cursor += delta.len();
        if fade {
            self.segments = split_sentences(&self.displayed);
        }
    }

    /// Flip the completion flag. Returns `true` only on the first call
    /// of a run, so completion can be observed exactly once.
    pub(crate) fn mark_complete(&mut self) -> bool {
        if self.complete {
            false
        } else {
            self.complete = true;
            true
        }
    }
}
