//! Segmenter: splits revealed text into sentence-level display units.
//!
//! Only fade mode consumes segments. The split is intentionally naive:
//! sentence-terminal punctuation (`.`, `!`, `?`), runs of terminators
//! kept attached to their sentence. That is enough because the input is a
//! response-sized block of text, not a document corpus. The whole list
//! is recomputed from scratch every time the displayed text grows;
//! at that scale a linear rescan is cheaper than bookkeeping.

/// One sentence-level display unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    /// The trimmed sentence text, terminators included.
    pub text: String,
    /// Stable zero-based position within the segment list.
    pub index: usize,
}

/// True for characters that terminate a sentence.
const fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Split `text` into sentence segments.
///
/// Each segment is trimmed; empty segments are dropped and the
/// remaining ones are indexed by position. Text with no terminal
/// punctuation yields a single segment spanning the whole text; empty
/// text yields no segments.
pub fn split_sentences(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_terminator_run = false;

    for (offset, ch) in text.char_indices() {
        if is_terminal(ch) {
            in_terminator_run = true;
        } else if in_terminator_run {
            // First character past a terminator run closes the sentence.
            push_trimmed(&mut segments, &text[start..offset]);
            start = offset;
            in_terminator_run = false;
        }
    }
    push_trimmed(&mut segments, &text[start..]);

    segments
}

fn push_trimmed(segments: &mut Vec<Segment>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        segments.push(Segment {
            text: trimmed.to_owned(),
            index: segments.len(),
        });
    }
}
