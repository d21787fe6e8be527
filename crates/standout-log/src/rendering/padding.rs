//! Field-width padding.
//!
//! Padding is always plain spaces and never truncates. Content that is
//! already known as text goes through [`apply`]; content that is only known
//! once rendered goes through [`render_aligned`], which renders it once into
//! a [`MeasuringSink`] to learn its width.

use std::io;

use console::Style;

use crate::sink::{MeasuringSink, OutputSink};
use crate::template::{Alignment, AlignmentDirection};
use crate::util::display_width;

/// Writes `text` in `style`, padded to `alignment`.
pub fn apply(
    sink: &mut dyn OutputSink,
    text: &str,
    style: &Style,
    alignment: Option<Alignment>,
) -> io::Result<()> {
    let pad = alignment.map_or(0, |a| a.width.saturating_sub(display_width(text)));
    match alignment {
        Some(a) if pad > 0 && a.direction == AlignmentDirection::Right => {
            write_spaces(sink, pad)?;
            sink.write_styled(text, style)
        }
        _ => {
            sink.write_styled(text, style)?;
            write_spaces(sink, pad)
        }
    }
}

/// Runs `render` against `sink`, padded to `alignment`.
///
/// With an alignment, `render` is called twice: once into a private
/// measuring sink that mirrors `sink`'s capabilities, then into `sink`.
/// It must produce the same text both times.
pub fn render_aligned<F>(
    sink: &mut dyn OutputSink,
    alignment: Option<Alignment>,
    mut render: F,
) -> io::Result<()>
where
    F: FnMut(&mut dyn OutputSink) -> io::Result<()>,
{
    let Some(alignment) = alignment else {
        return render(sink);
    };

    let mut measure = MeasuringSink::like(&*sink);
    render(&mut measure)?;
    let pad = alignment.width.saturating_sub(measure.width());

    match alignment.direction {
        AlignmentDirection::Right => {
            write_spaces(sink, pad)?;
            render(&mut *sink)
        }
        AlignmentDirection::Left => {
            render(&mut *sink)?;
            write_spaces(sink, pad)
        }
    }
}

/// Spaces alone, for content that rendered as nothing.
pub fn pad_empty(sink: &mut dyn OutputSink, alignment: Option<Alignment>) -> io::Result<()> {
    write_spaces(sink, alignment.map_or(0, |a| a.width))
}

fn write_spaces(sink: &mut dyn OutputSink, count: usize) -> io::Result<()> {
    if count == 0 {
        return Ok(());
    }
    sink.write_plain(&" ".repeat(count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::CaptureSink;

    fn padded(text: &str, alignment: Option<Alignment>) -> String {
        let mut sink = CaptureSink::new();
        apply(&mut sink, text, &Style::new().red(), alignment).unwrap();
        sink.output()
    }

    #[test]
    fn test_no_alignment() {
        assert_eq!(padded("abc", None), "abc");
    }

    #[test]
    fn test_right_and_left() {
        assert_eq!(padded("abc", Some(Alignment::right(6))), "   abc");
        assert_eq!(padded("abc", Some(Alignment::left(6))), "abc   ");
    }

    #[test]
    fn test_never_truncates() {
        assert_eq!(padded("abcdef", Some(Alignment::right(3))), "abcdef");
        assert_eq!(padded("abc", Some(Alignment::left(3))), "abc");
    }

    #[test]
    fn test_padding_is_plain() {
        let mut sink = CaptureSink::new();
        apply(&mut sink, "x", &Style::new().red(), Some(Alignment::right(3))).unwrap();
        assert!(sink.spans()[0].style.is_none());
        assert!(sink.spans()[1].style.is_some());
    }

    #[test]
    fn test_wide_characters_count_twice() {
        assert_eq!(padded("日本", Some(Alignment::left(6))), "日本  ");
    }

    #[test]
    fn test_render_aligned_measures_styled_content() {
        let mut sink = CaptureSink::new();
        render_aligned(&mut sink, Some(Alignment::right(8)), |s| {
            s.write_styled("ab", &Style::new().bold())?;
            s.write_styled("cd", &Style::new().green())
        })
        .unwrap();
        assert_eq!(sink.output(), "    abcd");
        // The measuring pass never reaches the real sink.
        assert_eq!(sink.spans().len(), 3);
    }

    #[test]
    fn test_render_aligned_without_alignment_renders_once() {
        let mut calls = 0;
        let mut sink = CaptureSink::new();
        render_aligned(&mut sink, None, |s| {
            calls += 1;
            s.write_plain("x")
        })
        .unwrap();
        assert_eq!(calls, 1);
        assert_eq!(sink.output(), "x");
    }

    #[test]
    fn test_pad_empty() {
        let mut sink = CaptureSink::new();
        pad_empty(&mut sink, Some(Alignment::left(4))).unwrap();
        pad_empty(&mut sink, None).unwrap();
        assert_eq!(sink.output(), "    ");
    }
}
