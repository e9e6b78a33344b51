//! Presenters: the two visual strategies over a live snapshot.

use super::timeline::FadeTimeline;
use crate::engine::RevealEngine;
use std::io;
use std::time::Duration;

/// Boundary to whatever actually renders markdown.
///
/// The engine side only guarantees the snapshot it hands over is valid
/// markdown-in-progress; how faithfully it is rendered is entirely the
/// implementor's business. `opacity` is the fade-in progress of the
/// snapshot being rendered (always 1.0 in typewriter mode).
pub trait MarkdownRenderer {
    /// Called once before the frame's snapshots.
    fn begin_frame(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Render one markdown snapshot at the given opacity.
    fn render(&mut self, markdown: &str, opacity: f32) -> io::Result<()>;

    /// Called once after the frame's snapshots (flush point).
    fn finish_frame(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Typewriter strategy: the whole displayed text, re-rendered per tick.
pub struct TypewriterPresenter<R> {
    renderer: R,
}

impl<R: MarkdownRenderer> TypewriterPresenter<R> {
    /// Wrap a renderer.
    pub const fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Render the engine's current snapshot.
    pub fn present(&mut self, engine: &RevealEngine) -> io::Result<()> {
        self.renderer.begin_frame()?;
        self.renderer.render(engine.displayed_text(), 1.0)?;
        self.renderer.finish_frame()
    }

    /// Get the wrapped renderer back.
    pub fn into_inner(self) -> R {
        self.renderer
    }
}

/// Fade strategy: each sentence segment rendered independently at its
/// current fade-in opacity.
///
/// Completion here is a *visual* event: the callback registered with
/// [`FadePresenter::on_settled`] fires only once the engine's text is
/// complete and the last segment's fade-in has finished, at most once
/// per run.
pub struct FadePresenter<R> {
    renderer: R,
    timeline: FadeTimeline,
    on_settled: Option<Box<dyn FnMut()>>,
    settled_fired: bool,
}

impl<R: MarkdownRenderer> FadePresenter<R> {
    /// Wrap a renderer.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            timeline: FadeTimeline::new(),
            on_settled: None,
            settled_fired: false,
        }
    }

    /// Register the visual-completion callback.
    #[must_use]
    pub fn on_settled(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_settled = Some(Box::new(callback));
        self
    }

    /// Forget all fade state (call alongside the engine's `reset()`).
    pub fn reset(&mut self) {
        self.timeline.reset();
        self.settled_fired = false;
    }

    /// Render the engine's current segments at their fade opacities.
    ///
    /// `now` is elapsed time in the same clock that drives the engine's
    /// ticks. A shrinking segment list means the engine began a new
    /// run, which resets the fade state automatically.
    pub fn present(&mut self, engine: &RevealEngine, now: Duration) -> io::Result<()> {
        let segments = engine.segments();
        if segments.len() < self.timeline.observed() {
            self.reset();
        }
        self.timeline.observe(segments.len(), now);

        self.renderer.begin_frame()?;
        for segment in segments {
            let opacity = self.timeline.opacity(segment.index, now, engine.timing());
            self.renderer.render(&segment.text, opacity)?;
        }
        self.renderer.finish_frame()?;

        if engine.is_complete()
            && !self.settled_fired
            && self.timeline.settled(now, engine.timing())
        {
            self.settled_fired = true;
            if let Some(callback) = self.on_settled.as_mut() {
                callback();
            }
        }
        Ok(())
    }

    /// Whether the last segment's fade-in has finished.
    pub fn settled(&self, engine: &RevealEngine, now: Duration) -> bool {
        self.timeline.settled(now, engine.timing())
    }

    /// Get the wrapped renderer back.
    pub fn into_inner(self) -> R {
        self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tick::{ManualTicks, TickSource};
    use crate::timing::{RevealMode, TimingParams};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Records every render call instead of drawing.
    #[derive(Default)]
    struct Recorder {
        frames: Vec<Vec<(String, f32)>>,
        current: Vec<(String, f32)>,
    }

    impl MarkdownRenderer for Recorder {
        fn begin_frame(&mut self) -> io::Result<()> {
            self.current.clear();
            Ok(())
        }

        fn render(&mut self, markdown: &str, opacity: f32) -> io::Result<()> {
            self.current.push((markdown.to_owned(), opacity));
            Ok(())
        }

        fn finish_frame(&mut self) -> io::Result<()> {
            self.frames.push(std::mem::take(&mut self.current));
            Ok(())
        }
    }

    fn fade_timing() -> TimingParams {
        TimingParams {
            mode: RevealMode::Fade,
            fade_duration_ms: Some(100),
            segment_delay_ms: Some(50),
            frame_delay_ms: Some(0),
            ..TimingParams::default()
        }
    }

    #[test]
    fn test_typewriter_renders_whole_snapshot() {
        let mut engine = RevealEngine::new("Hello world")
            .with_timing(TimingParams { chunk_size: Some(5), ..TimingParams::default() });
        engine.start();

        let mut presenter = TypewriterPresenter::new(Recorder::default());
        let mut ticks = ManualTicks::new(Duration::from_millis(100));

        engine.tick(ticks.next_tick().unwrap());
        presenter.present(&engine).unwrap();
        engine.tick(ticks.next_tick().unwrap());
        presenter.present(&engine).unwrap();

        let recorder = presenter.into_inner();
        assert_eq!(recorder.frames[0], [("Hello".to_owned(), 1.0)]);
        assert_eq!(recorder.frames[1], [("Hello worl".to_owned(), 1.0)]);
    }

    #[test]
    fn test_fade_renders_segments_with_stagger() {
        let mut engine = RevealEngine::new("One. Two.").with_timing(fade_timing());
        engine.start();
        engine.drive(&mut ManualTicks::new(Duration::from_millis(1)));
        assert!(engine.is_complete());

        let mut presenter = FadePresenter::new(Recorder::default());
        // Both segments first seen at t=0.
        presenter.present(&engine, Duration::ZERO).unwrap();
        presenter.present(&engine, Duration::from_millis(100)).unwrap();

        let recorder = presenter.into_inner();
        let frame = &recorder.frames[1];
        assert_eq!(frame[0].0, "One.");
        assert!((frame[0].1 - 1.0).abs() < 1e-6);
        assert_eq!(frame[1].0, "Two.");
        // Staggered 50 ms behind: halfway through its 100 ms fade.
        assert!((frame[1].1 - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_visual_completion_fires_once_after_settle() {
        let settled = Rc::new(Cell::new(0));
        let settled_clone = settled.clone();

        let mut engine = RevealEngine::new("One. Two.").with_timing(fade_timing());
        engine.start();
        engine.drive(&mut ManualTicks::new(Duration::from_millis(1)));

        let mut presenter = FadePresenter::new(Recorder::default())
            .on_settled(move || settled_clone.set(settled_clone.get() + 1));

        presenter.present(&engine, Duration::ZERO).unwrap();
        assert_eq!(settled.get(), 0);

        // Last segment: 50 ms stagger + 100 ms fade.
        presenter.present(&engine, Duration::from_millis(149)).unwrap();
        assert_eq!(settled.get(), 0);

        presenter.present(&engine, Duration::from_millis(150)).unwrap();
        assert_eq!(settled.get(), 1);

        presenter.present(&engine, Duration::from_millis(500)).unwrap();
        assert_eq!(settled.get(), 1);
    }

    #[test]
    fn test_new_run_resets_fade_state() {
        let mut engine = RevealEngine::new("One. Two. Three.").with_timing(fade_timing());
        engine.start();
        engine.drive(&mut ManualTicks::new(Duration::from_millis(1)));

        let mut presenter = FadePresenter::new(Recorder::default());
        presenter.present(&engine, Duration::from_millis(10)).unwrap();
        assert_eq!(presenter.timeline.observed(), 3);

        // New, shorter run: segment list shrinks, fade state resets.
        engine.set_source("Fresh.");
        engine.drive(&mut ManualTicks::new(Duration::from_millis(1)));
        presenter.present(&engine, Duration::from_millis(20)).unwrap();
        assert_eq!(presenter.timeline.observed(), 1);
    }
}
