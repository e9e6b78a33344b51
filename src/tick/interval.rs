//! Interval ticker: dedicated thread generating timing events.
//!
//! This decouples frame pacing from the host thread. Ticks are sent
//! over a small bounded channel; if the consumer falls behind, ticks
//! are dropped rather than queued, so a slow frame never causes a
//! burst of catch-up reveals.

use super::{Tick, TickSource};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Tick source backed by a dedicated timer thread.
pub struct IntervalTicker {
    /// Handle to the ticker thread.
    handle: Option<JoinHandle<()>>,
    /// Flag to signal shutdown.
    shutdown: Arc<AtomicBool>,
    /// Receiver for tick events.
    tick_rx: Receiver<Tick>,
}

impl IntervalTicker {
    /// Spawn a ticker emitting one tick per `interval` (e.g. 16 ms for
    /// ~60 ticks/s).
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the ticker thread.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn(interval: Duration) -> Self {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        // Bounded channel with small buffer - we don't want ticks to queue up
        let (tick_tx, tick_rx) = bounded(2);

        let handle = thread::Builder::new()
            .name("unfurl-ticker".to_string())
            .spawn(move || {
                Self::run_loop(&tick_tx, &shutdown_clone, interval);
            })
            .expect("Failed to spawn ticker thread");

        Self {
            handle: Some(handle),
            shutdown,
            tick_rx,
        }
    }

    /// Get a reference to the raw tick receiver.
    ///
    /// Use this with `select!` when the host multiplexes ticks with
    /// other channels (input events, chunk arrival, ...).
    #[inline]
    pub const fn receiver(&self) -> &Receiver<Tick> {
        &self.tick_rx
    }

    /// Signal the ticker to shutdown.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    /// Wait for the ticker thread to finish.
    pub fn join(mut self) {
        self.shutdown();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Main ticker loop.
    fn run_loop(tick_tx: &Sender<Tick>, shutdown: &Arc<AtomicBool>, interval: Duration) {
        let start = Instant::now();
        let mut frame = 0u64;
        let mut next_tick = start + interval;

        loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            let now = Instant::now();
            if now >= next_tick {
                let tick = Tick {
                    frame,
                    elapsed: now - start,
                };

                // Non-blocking send - if the buffer is full the consumer
                // is too slow; skip this tick instead of queuing.
                let _ = tick_tx.try_send(tick);

                frame += 1;
                next_tick += interval;

                // Handle case where we're behind (catch up without queuing)
                if next_tick < now {
                    next_tick = now + interval;
                }
            } else {
                let sleep_duration = next_tick - now;
                thread::sleep(sleep_duration.min(Duration::from_millis(1)));
            }
        }
    }
}

impl TickSource for IntervalTicker {
    fn next_tick(&mut self) -> Option<Tick> {
        self.tick_rx.recv().ok()
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_ticker_emits() {
        let ticker = IntervalTicker::spawn(Duration::from_millis(10));

        let tick = ticker.receiver().recv_timeout(Duration::from_millis(100));
        assert!(tick.is_ok());
        assert_eq!(tick.unwrap().frame, 0);

        let tick2 = ticker.receiver().recv_timeout(Duration::from_millis(50));
        assert!(tick2.is_ok());

        ticker.join();
    }

    #[test]
    fn test_interval_ticker_shutdown() {
        let ticker = IntervalTicker::spawn(Duration::from_millis(100));
        ticker.shutdown();

        thread::sleep(Duration::from_millis(50));
        ticker.join();
    }
}
