//! Chunk Feed Demo: fade-mode reveal of an incremental source.
//!
//! A producer thread plays the role of a model streaming tokens: it
//! sends word-sized chunks into the feed with small random-ish delays,
//! then drops the sender to mark exhaustion. The engine appends chunks
//! as they arrive (no artificial pacing), the segmenter re-derives
//! sentences on every growth, and the fade presenter staggers each
//! sentence's fade-in, reporting visual completion once the last one
//! settles.

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io;
use std::thread;
use std::time::Duration;
use unfurl::{
    chunk_channel, FadePresenter, IntervalTicker, RevealEngine, RevealMode, RunPhase,
    TerminalRenderer, TickSource, TimingParams,
};

/// The "model output", streamed a word at a time.
const RESPONSE: &str = "Sentence-wise reveal reads differently. Each sentence fades in \
                        on its own schedule! The engine only tracks text and segments. \
                        Everything visual stays on this side of the boundary.";

fn main() -> io::Result<()> {
    let (tx, source) = chunk_channel();

    // Producer: a fake model streaming word chunks.
    let producer = thread::spawn(move || {
        for (count, word) in RESPONSE.split_inclusive(' ').enumerate() {
            if !tx.send(word) {
                return;
            }
            // Uneven arrival, like real token streams.
            thread::sleep(Duration::from_millis(30 + (count as u64 * 7) % 50));
        }
        // Dropping the sender marks normal exhaustion.
    });

    let mut engine = RevealEngine::new(source).with_timing(TimingParams {
        speed: 30,
        mode: RevealMode::Fade,
        ..TimingParams::default()
    });
    engine.start();

    let mut ticker = IntervalTicker::spawn(Duration::from_millis(16));
    let mut presenter = FadePresenter::new(TerminalRenderer::new(io::stdout(), 72))
        .on_settled(|| println!("\n[all segments settled]"));

    loop {
        let Some(tick) = ticker.next_tick() else { break };
        engine.tick(tick);

        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        presenter.present(&engine, tick.elapsed)?;

        if engine.phase() != RunPhase::Streaming && presenter.settled(&engine, tick.elapsed) {
            break;
        }
    }

    let _ = producer.join();
    ticker.join();
    println!("\n[{} segments revealed]", engine.segments().len());
    Ok(())
}
