//! Timing Model: maps a speed dial to concrete pacing values.
//!
//! All derived values are computed on demand from the current
//! [`TimingParams`], so mutating the params mid-run changes the pacing
//! of every subsequent tick without touching text that is already
//! revealed.
//!
//! The curves are inverse-square-root in the speed: higher speed means
//! bigger chunks and shorter delays, without delays collapsing to zero
//! at speed 100 or exploding at speed 1.

use std::time::Duration;

/// How revealed text is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RevealMode {
    /// Progressive character/chunk-wise reveal.
    #[default]
    Typewriter,
    /// Progressive sentence-wise reveal; each sentence fades in
    /// independently.
    Fade,
}

/// Pacing configuration, re-read at the start of every scheduling tick.
///
/// `speed` is a 1–100 dial (out-of-range values are clamped on read,
/// never rejected). Each explicit override takes precedence over the
/// speed-derived value; overrides are likewise clamped to their valid
/// domain rather than raised as errors; timing is cosmetic, so the
/// engine is fail-soft here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingParams {
    /// Speed dial, clamped to 1–100 on read.
    pub speed: u32,
    /// Presentation mode.
    pub mode: RevealMode,
    /// Explicit chunk size in graphemes (floored at 1).
    pub chunk_size: Option<usize>,
    /// Explicit delay between accepted ticks, in milliseconds.
    pub frame_delay_ms: Option<u64>,
    /// Explicit per-segment fade-in duration, in milliseconds (floored at 10).
    pub fade_duration_ms: Option<u64>,
    /// Explicit stagger between segment fade-ins, in milliseconds.
    pub segment_delay_ms: Option<u64>,
}

/// Default speed dial position.
pub const DEFAULT_SPEED: u32 = 20;

impl Default for TimingParams {
    fn default() -> Self {
        Self {
            speed: DEFAULT_SPEED,
            mode: RevealMode::default(),
            chunk_size: None,
            frame_delay_ms: None,
            fade_duration_ms: None,
            segment_delay_ms: None,
        }
    }
}

impl TimingParams {
    /// Create params for a given mode at the default speed.
    pub fn for_mode(mode: RevealMode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// The speed dial clamped to its valid 1–100 domain.
    fn normalized_speed(&self) -> f64 {
        f64::from(self.speed.clamp(1, 100))
    }

    /// Inverse-square-root pacing curve: `100 / sqrt(speed)`, floored at 1 ms.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn paced_delay_ms(&self) -> u64 {
        ((100.0 / self.normalized_speed().sqrt()).round() as u64).max(1)
    }

    /// Number of graphemes revealed per accepted tick.
    ///
    /// Fade mode always advances one grapheme at a time; the sentence
    /// grouping happens downstream in the segmenter.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn chunk_size(&self) -> usize {
        if let Some(size) = self.chunk_size {
            return size.max(1);
        }

        match self.mode {
            RevealMode::Typewriter => {
                let speed = self.normalized_speed();
                if speed < 25.0 {
                    1
                } else {
                    (((speed - 25.0) / 10.0).round() as usize).max(1)
                }
            }
            RevealMode::Fade => 1,
        }
    }

    /// Minimum time between accepted ticks.
    pub fn frame_delay(&self) -> Duration {
        let ms = self.frame_delay_ms.unwrap_or_else(|| self.paced_delay_ms());
        Duration::from_millis(ms)
    }

    /// How long a single segment's fade-in runs.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn fade_duration(&self) -> Duration {
        let ms = self.fade_duration_ms.map_or_else(
            || (1000.0 / self.normalized_speed().sqrt()).round() as u64,
            |ms| ms.max(10),
        );
        Duration::from_millis(ms)
    }

    /// Stagger between the start of consecutive segment fade-ins.
    pub fn segment_delay(&self) -> Duration {
        let ms = self.segment_delay_ms.unwrap_or_else(|| self.paced_delay_ms());
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_size_typewriter_slow_is_one() {
        for speed in [1, 10, 24] {
            let params = TimingParams { speed, ..TimingParams::default() };
            assert_eq!(params.chunk_size(), 1, "speed {speed}");
        }
    }

    #[test]
    fn test_chunk_size_typewriter_scales_with_speed() {
        let at = |speed| TimingParams { speed, ..TimingParams::default() }.chunk_size();
        assert_eq!(at(25), 1); // round(0/10) floors to 1
        assert_eq!(at(50), 3); // round(25/10)
        assert_eq!(at(100), 8); // round(75/10)
    }

    #[test]
    fn test_chunk_size_fade_always_one() {
        let params = TimingParams {
            speed: 100,
            mode: RevealMode::Fade,
            ..TimingParams::default()
        };
        assert_eq!(params.chunk_size(), 1);
    }

    #[test]
    fn test_chunk_size_override_wins_and_floors() {
        let params = TimingParams { chunk_size: Some(0), ..TimingParams::default() };
        assert_eq!(params.chunk_size(), 1);

        let params = TimingParams { chunk_size: Some(7), ..TimingParams::default() };
        assert_eq!(params.chunk_size(), 7);
    }

    #[test]
    fn test_frame_delay_curve() {
        // round(100 / sqrt(10)) = 32
        let params = TimingParams { speed: 10, ..TimingParams::default() };
        assert_eq!(params.frame_delay(), Duration::from_millis(32));

        // round(100 / sqrt(100)) = 10
        let params = TimingParams { speed: 100, ..TimingParams::default() };
        assert_eq!(params.frame_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_frame_delay_override_allows_zero() {
        let params = TimingParams { frame_delay_ms: Some(0), ..TimingParams::default() };
        assert_eq!(params.frame_delay(), Duration::ZERO);
    }

    #[test]
    fn test_fade_duration_curve_and_floor() {
        // round(1000 / sqrt(20)) = 224
        let params = TimingParams { speed: 20, ..TimingParams::default() };
        assert_eq!(params.fade_duration(), Duration::from_millis(224));

        let params = TimingParams { fade_duration_ms: Some(3), ..TimingParams::default() };
        assert_eq!(params.fade_duration(), Duration::from_millis(10));
    }

    #[test]
    fn test_speed_clamped_not_rejected() {
        let params = TimingParams { speed: 0, ..TimingParams::default() };
        assert_eq!(params.frame_delay(), Duration::from_millis(100));

        let params = TimingParams { speed: 10_000, ..TimingParams::default() };
        assert_eq!(params.frame_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_segment_delay_matches_frame_curve() {
        let params = TimingParams { speed: 10, mode: RevealMode::Fade, ..TimingParams::default() };
        assert_eq!(params.segment_delay(), Duration::from_millis(32));
    }
}
