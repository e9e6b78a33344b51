//! Terminal renderer: markdown snapshots as styled inline text.
//!
//! This is a reference implementation of the [`MarkdownRenderer`]
//! boundary, not a compliant markdown engine: it walks the
//! `pulldown-cmark` event stream and maps a useful subset (headings,
//! emphasis, code, lists, block quotes) onto crossterm styling, word-
//! wrapped to a fixed column width. Fade opacity scales the foreground
//! color toward black, which reads as a fade-in on dark terminals.

use super::presenter::MarkdownRenderer;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::queue;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

/// Styled markdown writer over any [`Write`] sink.
pub struct TerminalRenderer<W: Write> {
    out: W,
    /// Wrap column.
    width: usize,
    /// Base foreground color at full opacity.
    base_fg: (u8, u8, u8),
    /// Current output column, for wrapping.
    column: usize,
    /// Indent applied at the start of wrapped lines (list nesting).
    indent: usize,
    /// Ordered-list counters, one per open list (None = bullet list).
    list_stack: Vec<Option<u64>>,
}

impl<W: Write> TerminalRenderer<W> {
    /// Create a renderer wrapping at `width` columns.
    pub const fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width,
            base_fg: (220, 220, 220),
            column: 0,
            indent: 0,
            list_stack: Vec::new(),
        }
    }

    /// Set the full-opacity foreground color.
    pub fn set_base_fg(&mut self, r: u8, g: u8, b: u8) {
        self.base_fg = (r, g, b);
    }

    /// Get the sink back.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Foreground color scaled by fade opacity.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn faded(&self, opacity: f32) -> Color {
        let scale = |channel: u8| (f32::from(channel) * opacity.clamp(0.0, 1.0)) as u8;
        let (r, g, b) = self.base_fg;
        Color::Rgb {
            r: scale(r),
            g: scale(g),
            b: scale(b),
        }
    }

    fn newline(&mut self) -> io::Result<()> {
        queue!(self.out, Print("\n"))?;
        self.column = 0;
        Ok(())
    }

    /// Ensure the cursor sits at the start of an empty line.
    fn break_line(&mut self) -> io::Result<()> {
        if self.column > 0 {
            self.newline()?;
        }
        Ok(())
    }

    /// Write text with word wrapping at the configured width.
    fn write_wrapped(&mut self, text: &str) -> io::Result<()> {
        for word in text.split_inclusive(' ') {
            let word_width = UnicodeWidthStr::width(word.trim_end());
            if self.column > self.indent && self.column + word_width > self.width {
                self.newline()?;
            }
            if self.column == 0 && self.indent > 0 {
                queue!(self.out, Print(" ".repeat(self.indent)))?;
                self.column = self.indent;
            }
            queue!(self.out, Print(word))?;
            self.column += UnicodeWidthStr::width(word);
        }
        Ok(())
    }

    /// Write preformatted text verbatim, line by line.
    fn write_verbatim(&mut self, text: &str) -> io::Result<()> {
        for line in text.lines() {
            if self.indent > 0 {
                queue!(self.out, Print(" ".repeat(self.indent)))?;
            }
            queue!(self.out, Print(line))?;
            self.newline()?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_lines)]
    fn render_events(&mut self, markdown: &str) -> io::Result<()> {
        let mut in_code_block = false;

        for event in Parser::new(markdown) {
            match event {
                Event::Start(tag) => match tag {
                    Tag::Paragraph => self.break_line()?,
                    Tag::Heading { .. } => {
                        self.break_line()?;
                        queue!(self.out, SetAttribute(Attribute::Bold))?;
                    }
                    Tag::BlockQuote(_) => {
                        self.break_line()?;
                        self.indent += 2;
                        queue!(self.out, SetAttribute(Attribute::Italic))?;
                    }
                    Tag::CodeBlock(_) => {
                        self.break_line()?;
                        self.indent += 4;
                        in_code_block = true;
                        queue!(self.out, SetAttribute(Attribute::Dim))?;
                    }
                    Tag::List(start) => {
                        self.break_line()?;
                        self.list_stack.push(start);
                    }
                    Tag::Item => {
                        self.break_line()?;
                        let marker = match self.list_stack.last_mut() {
                            Some(Some(counter)) => {
                                let marker = format!("{counter}. ");
                                *counter += 1;
                                marker
                            }
                            _ => "- ".to_owned(),
                        };
                        self.write_wrapped(&marker)?;
                        self.indent += 2;
                    }
                    Tag::Emphasis => queue!(self.out, SetAttribute(Attribute::Italic))?,
                    Tag::Strong => queue!(self.out, SetAttribute(Attribute::Bold))?,
                    _ => {}
                },
                Event::End(tag) => match tag {
                    TagEnd::Paragraph | TagEnd::Heading(_) => {
                        if matches!(tag, TagEnd::Heading(_)) {
                            queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
                        }
                        self.break_line()?;
                    }
                    TagEnd::BlockQuote(_) => {
                        self.indent = self.indent.saturating_sub(2);
                        queue!(self.out, SetAttribute(Attribute::NoItalic))?;
                        self.break_line()?;
                    }
                    TagEnd::CodeBlock => {
                        self.indent = self.indent.saturating_sub(4);
                        in_code_block = false;
                        queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
                        self.break_line()?;
                    }
                    TagEnd::List(_) => {
                        self.list_stack.pop();
                        self.break_line()?;
                    }
                    TagEnd::Item => {
                        self.indent = self.indent.saturating_sub(2);
                        self.break_line()?;
                    }
                    TagEnd::Emphasis => queue!(self.out, SetAttribute(Attribute::NoItalic))?,
                    TagEnd::Strong => {
                        queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
                    }
                    _ => {}
                },
                Event::Text(text) => {
                    if in_code_block {
                        self.write_verbatim(&text)?;
                    } else {
                        self.write_wrapped(&text)?;
                    }
                }
                Event::Code(code) => {
                    queue!(self.out, SetAttribute(Attribute::Dim))?;
                    self.write_wrapped(&code)?;
                    queue!(self.out, SetAttribute(Attribute::NormalIntensity))?;
                }
                Event::SoftBreak => self.write_wrapped(" ")?,
                Event::HardBreak => self.newline()?,
                Event::Rule => {
                    self.break_line()?;
                    let rule = "─".repeat(self.width.min(40));
                    queue!(self.out, Print(rule))?;
                    self.newline()?;
                }
                _ => {}
            }
        }
        Ok(())
    }
}

impl<W: Write> MarkdownRenderer for TerminalRenderer<W> {
    fn render(&mut self, markdown: &str, opacity: f32) -> io::Result<()> {
        let fg = self.faded(opacity);
        queue!(self.out, SetForegroundColor(fg))?;
        self.render_events(markdown)?;
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    fn finish_frame(&mut self) -> io::Result<()> {
        self.break_line()?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(markdown: &str, opacity: f32) -> String {
        let mut renderer = TerminalRenderer::new(Vec::new(), 80);
        renderer.render(markdown, opacity).unwrap();
        renderer.finish_frame().unwrap();
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_plain_text_passes_through() {
        let out = rendered("Hello world", 1.0);
        assert!(out.contains("Hello world"));
    }

    #[test]
    fn test_list_items_get_markers() {
        let out = rendered("- one\n- two\n\n1. first\n2. second", 1.0);
        assert!(out.contains("- one"));
        assert!(out.contains("- two"));
        assert!(out.contains("1. first"));
        assert!(out.contains("2. second"));
    }

    #[test]
    fn test_wrapping_respects_width() {
        let mut renderer = TerminalRenderer::new(Vec::new(), 20);
        renderer
            .render("a few words that will definitely wrap at twenty columns", 1.0)
            .unwrap();
        renderer.finish_frame().unwrap();
        let out = String::from_utf8(renderer.into_inner()).unwrap();

        for line in out.lines() {
            // Strip ANSI escapes before measuring.
            let visible: String = strip_ansi(line);
            assert!(
                UnicodeWidthStr::width(visible.trim_end()) <= 20,
                "line too wide: {visible:?}"
            );
        }
    }

    #[test]
    fn test_opacity_scales_foreground() {
        let full = rendered("x", 1.0);
        let half = rendered("x", 0.5);
        assert_ne!(full, half);
        // Half opacity of 220 is 110.
        assert!(half.contains("110"));
    }

    #[test]
    fn test_code_block_is_verbatim() {
        let out = rendered("```\nlet x = 1;\n```", 1.0);
        assert!(out.contains("let x = 1;"));
    }

    fn strip_ansi(line: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for ch in line.chars() {
            match ch {
                '\x1b' => in_escape = true,
                'm' if in_escape => in_escape = false,
                _ if !in_escape => out.push(ch),
                _ => {}
            }
        }
        out
    }
}
