//! Typewriter Demo: paced reveal of a complete markdown response.
//!
//! Simulates rendering a pre-resolved LLM answer with the typewriter
//! strategy. The interval ticker supplies the frame clock; the engine
//! advances only on accepted ticks, so changing the speed dial below
//! changes the feel without touching the loop.
//!
//! Press Ctrl+C to quit early.

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use std::time::Duration;
use unfurl::{
    IntervalTicker, RevealEngine, RunPhase, TerminalRenderer, TickSource, TimingParams,
    TypewriterPresenter,
};

/// Sample response to reveal (simulating an LLM answer).
const SAMPLE_TEXT: &str = r"Happy to explain how a progressive reveal works!

## The Scheduling Loop

The engine never owns a thread. Instead it is offered **ticks** by the host:

1. A tick below the current frame delay re-arms without advancing.
2. An accepted tick reveals up to `chunk_size()` graphemes.
3. Reaching the end of the source fires the completion notification, exactly once.

## Why Pacing Matters

Dumping a full response at once reads as a wall of text. A paced reveal keeps
the reader's eye on the newest sentence, which is where the model is *talking*.
";

fn main() -> io::Result<()> {
    let mut engine = RevealEngine::new(SAMPLE_TEXT)
        .with_timing(TimingParams {
            speed: 60,
            ..TimingParams::default()
        })
        .on_complete(|| {
            // The engine stays usable after completion; this just marks
            // the moment in the demo output.
        });
    engine.start();

    let mut ticker = IntervalTicker::spawn(Duration::from_millis(16));
    let mut presenter = TypewriterPresenter::new(TerminalRenderer::new(io::stdout(), 72));

    while engine.phase() == RunPhase::Streaming {
        let Some(tick) = ticker.next_tick() else { break };
        let before = engine.displayed_text().len();
        engine.tick(tick);
        if engine.displayed_text().len() == before {
            continue;
        }

        // Typewriter strategy: re-render the whole snapshot per frame.
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        presenter.present(&engine)?;
    }

    let mut stdout = io::stdout();
    writeln!(stdout, "\n[revealed {} bytes]", engine.displayed_text().len())?;
    Ok(())
}
