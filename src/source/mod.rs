//! Source Adapter: normalizes text sources into one incremental feed.
//!
//! A reveal run consumes either a complete string (paced by the timing
//! model) or an open-ended chunk feed (paced only by arrival). Both are
//! normalized into a [`Feed`] the scheduler polls; the scheduler never
//! needs to know which kind it is driving beyond whether pacing applies.
//!
//! The chunk feed is a bounded crossbeam channel. Dropping the
//! [`ChunkSender`] marks normal exhaustion; sending an `Err` marks a
//! consumption failure mid-stream.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

/// Error raised by a chunk producer mid-iteration.
///
/// Consumption failures are fail-soft: the run keeps the text revealed
/// so far as its final output and reports the error through the
/// engine's error callback.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SourceError {
    /// The producer reported a failure while generating chunks.
    #[error("chunk producer failed: {0}")]
    Producer(String),
}

type ChunkResult = Result<String, SourceError>;

/// Default bound for chunk channels created by [`chunk_channel`].
const DEFAULT_FEED_CAPACITY: usize = 64;

/// Producer handle for an incremental text source.
///
/// Dropping the sender closes the feed, which the engine treats as
/// normal completion of the source.
#[derive(Debug, Clone)]
pub struct ChunkSender {
    tx: Sender<ChunkResult>,
}

impl ChunkSender {
    /// Send the next chunk of text.
    ///
    /// Blocks while the feed is full. Returns `false` if the consuming
    /// run is gone (chunk discarded).
    pub fn send(&self, chunk: impl Into<String>) -> bool {
        self.tx.send(Ok(chunk.into())).is_ok()
    }

    /// Terminate the feed with a consumption failure.
    ///
    /// Consumes the sender; no chunks can follow an error. Returns
    /// `false` if the consuming run is gone.
    pub fn fail(self, error: SourceError) -> bool {
        self.tx.send(Err(error)).is_ok()
    }
}

/// A text source for one reveal engine.
#[derive(Debug, Clone)]
pub enum TextSource {
    /// The full text is known upfront; the scheduler paces its reveal.
    Complete(String),
    /// An open-ended sequence of chunks arriving over time.
    Incremental(Receiver<ChunkResult>),
}

impl TextSource {
    /// Whether this source supports pause/resume pacing.
    ///
    /// Incremental feeds have no natural pause point between arbitrary
    /// chunk boundaries; only cancellation applies to them.
    pub const fn is_pausable(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

impl From<String> for TextSource {
    fn from(text: String) -> Self {
        Self::Complete(text)
    }
}

impl From<&str> for TextSource {
    fn from(text: &str) -> Self {
        Self::Complete(text.to_owned())
    }
}

/// Create a bounded incremental source and its producer handle.
pub fn chunk_channel() -> (ChunkSender, TextSource) {
    let (tx, rx) = bounded(DEFAULT_FEED_CAPACITY);
    (ChunkSender { tx }, TextSource::Incremental(rx))
}

/// One scheduling observation of the feed.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Poll {
    /// Newly revealed text to append to the displayed snapshot.
    Delta(String),
    /// Nothing available right now; keep ticking.
    Idle,
    /// The source is fully drained.
    Exhausted,
    /// The producer failed mid-stream.
    Failed(SourceError),
}

/// Uniform incremental view over a [`TextSource`], for one run.
///
/// Complete sources carry their own cursor (a byte offset at a grapheme
/// boundary); incremental sources just drain the channel. Crossbeam
/// receivers are cheaply cloneable, so building a feed leaves the
/// caller's `TextSource` intact.
#[derive(Debug)]
pub(crate) enum Feed {
    Complete {
        text: String,
        cursor: usize,
    },
    Incremental {
        rx: Receiver<ChunkResult>,
        finished: bool,
    },
}

impl Feed {
    pub(crate) fn new(source: &TextSource) -> Self {
        match source {
            TextSource::Complete(text) => Self::Complete {
                text: text.clone(),
                cursor: 0,
            },
            TextSource::Incremental(rx) => Self::Incremental {
                rx: rx.clone(),
                finished: false,
            },
        }
    }

    /// Whether pacing applies (complete source) for this feed.
    pub(crate) const fn is_paced(&self) -> bool {
        matches!(self, Self::Complete { .. })
    }

    /// Whether the feed has nothing more to yield.
    pub(crate) fn finished(&self) -> bool {
        match self {
            Self::Complete { text, cursor } => *cursor >= text.len(),
            Self::Incremental { finished, .. } => *finished,
        }
    }

    /// Take the next observation from the feed.
    ///
    /// `chunk` bounds the advance in graphemes and only applies to
    /// complete sources; incremental chunks append verbatim at whatever
    /// size they arrived.
    pub(crate) fn poll(&mut self, chunk: usize) -> Poll {
        match self {
            Self::Complete { text, cursor } => {
                if *cursor >= text.len() {
                    return Poll::Exhausted;
                }
                let end = advance_graphemes(text, *cursor, chunk);
                let delta = text[*cursor..end].to_owned();
                *cursor = end;
                Poll::Delta(delta)
            }
            Self::Incremental { rx, finished } => {
                if *finished {
                    return Poll::Exhausted;
                }
                match rx.try_recv() {
                    Ok(Ok(chunk)) => Poll::Delta(chunk),
                    Ok(Err(error)) => {
                        *finished = true;
                        Poll::Failed(error)
                    }
                    Err(TryRecvError::Empty) => Poll::Idle,
                    Err(TryRecvError::Disconnected) => {
                        *finished = true;
                        Poll::Exhausted
                    }
                }
            }
        }
    }
}

/// Advance `count` grapheme clusters past `byte_offset`, returning the
/// new byte offset. Never lands inside a code point or cluster.
fn advance_graphemes(text: &str, byte_offset: usize, count: usize) -> usize {
    let rest = &text[byte_offset..];
    rest.grapheme_indices(true)
        .nth(count)
        .map_or(text.len(), |(offset, _)| byte_offset + offset)
}
