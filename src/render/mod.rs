//! Presentation Adapter: the external rendering boundary.
//!
//! The engine only produces a live snapshot (displayed text plus, in
//! fade mode, sentence segments). Everything visual lives here, behind
//! the [`MarkdownRenderer`] trait:
//!
//! - [`TypewriterPresenter`] re-renders the whole displayed text on
//!   every tick.
//! - [`FadePresenter`] renders each segment independently at its
//!   current fade-in opacity, and fires its completion callback only
//!   once the last segment's fade has finished. Completion here is a
//!   visual event, not merely a text-generation event.
//! - [`TerminalRenderer`] is a reference renderer: markdown as styled
//!   inline terminal text. Markdown *semantics* remain the external
//!   renderer's business; swap in your own `MarkdownRenderer` for
//!   anything richer.

mod presenter;
mod terminal;
mod timeline;

pub use presenter::{FadePresenter, MarkdownRenderer, TypewriterPresenter};
pub use terminal::TerminalRenderer;
pub use timeline::FadeTimeline;
