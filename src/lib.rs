//! # Unfurl
//!
//! A progressive text-reveal engine for streaming AI responses.
//!
//! Unfurl incrementally materializes a block of (markdown) text,
//! either from a complete string or from an open-ended chunk feed,
//! under a cooperative, single-threaded scheduling loop, with two
//! presentation strategies and explicit lifecycle control.
//!
//! ## Core Concepts
//!
//! - **Tick-driven scheduling**: the host supplies the frame clock;
//!   nothing advances outside of [`RevealEngine::tick`]
//! - **Two sources**: complete strings are paced by a speed dial,
//!   incremental chunk feeds reveal as fast as they arrive
//! - **Two strategies**: character-wise typewriter, sentence-wise fade
//! - **Lifecycle control**: start, pause, resume, reset, cancel, with
//!   a completion notification fired exactly once per run
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use unfurl::{ManualTicks, RevealEngine, TimingParams};
//!
//! let mut engine = RevealEngine::new("Streaming, one tick at a time.")
//!     .with_timing(TimingParams { speed: 40, ..TimingParams::default() });
//! engine.start();
//!
//! let mut ticks = ManualTicks::new(Duration::from_millis(16));
//! engine.drive(&mut ticks);
//! assert!(engine.is_complete());
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod engine;
pub mod render;
pub mod segment;
pub mod source;
pub mod tick;
pub mod timing;

// Re-exports for convenience
pub use engine::{RevealEngine, RunPhase, StreamState};
pub use render::{
    FadePresenter, FadeTimeline, MarkdownRenderer, TerminalRenderer, TypewriterPresenter,
};
pub use segment::Segment;
pub use source::{chunk_channel, ChunkSender, SourceError, TextSource};
pub use tick::{IntervalTicker, ManualTicks, Tick, TickSource};
pub use timing::{RevealMode, TimingParams};
