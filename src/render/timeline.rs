//! Fade timeline: the per-segment fade-in schedule.

use crate::timing::TimingParams;
use std::time::Duration;

/// Schedule of segment fade-ins for one run.
///
/// A segment's fade starts when it first appears, staggered by
/// `index × segment_delay()`, and runs for `fade_duration()`. The
/// timeline only records first-seen times; both durations are read
/// fresh from [`TimingParams`] on every query, so live timing changes
/// affect fades still in flight.
///
/// All timestamps live in the tick clock's elapsed-time domain, which
/// keeps the schedule deterministic under synthetic ticks.
#[derive(Debug, Clone, Default)]
pub struct FadeTimeline {
    /// Elapsed time at which each segment was first observed.
    first_seen: Vec<Duration>,
}

impl FadeTimeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record first-seen times for any newly appeared segments.
    ///
    /// Segment lists only grow within a run, so existing entries are
    /// never touched.
    pub fn observe(&mut self, segment_count: usize, now: Duration) {
        while self.first_seen.len() < segment_count {
            self.first_seen.push(now);
        }
    }

    /// Number of segments observed so far.
    pub fn observed(&self) -> usize {
        self.first_seen.len()
    }

    /// Forget all segments (new run).
    pub fn reset(&mut self) {
        self.first_seen.clear();
    }

    /// Current fade-in opacity of a segment, in `0.0..=1.0`.
    ///
    /// Returns 1.0 for indexes the timeline has never observed; an
    /// unknown segment must not flicker dark if queried early.
    pub fn opacity(&self, index: usize, now: Duration, timing: &TimingParams) -> f32 {
        let Some(&seen) = self.first_seen.get(index) else {
            return 1.0;
        };
        let start = seen + timing.segment_delay() * index_u32(index);
        if now <= start {
            return 0.0;
        }
        let fade = timing.fade_duration();
        if fade.is_zero() {
            return 1.0;
        }
        let progress = (now - start).as_secs_f32() / fade.as_secs_f32();
        progress.clamp(0.0, 1.0)
    }

    /// Whether every observed segment has fully faded in.
    pub fn settled(&self, now: Duration, timing: &TimingParams) -> bool {
        self.first_seen.iter().enumerate().all(|(index, &seen)| {
            let end = seen + timing.segment_delay() * index_u32(index) + timing.fade_duration();
            now >= end
        })
    }
}

/// Segment indexes are small; saturate rather than wrap if a host
/// somehow exceeds `u32::MAX` segments.
#[allow(clippy::cast_possible_truncation)]
const fn index_u32(index: usize) -> u32 {
    if index > u32::MAX as usize {
        u32::MAX
    } else {
        index as u32
    }
}
