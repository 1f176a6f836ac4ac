//! Shared wrapping helpers.
//!
//! Card bodies and the text-input preview are pre-wrapped with `textwrap`
//! (honoring hard line breaks) and rendered as literal lines, so the same
//! function drives both height prediction and rendering. Keeping one code
//! path means the two can never disagree.

/// Wrapping options matching how the wrapped lines are rendered
/// (no trailing hyphens, long tokens broken at the width boundary).
pub fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Wrap `text` to `width` columns, preserving hard line breaks.
/// Blank source lines survive as empty output lines.
pub fn wrap_text_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    for raw_line in text.lines() {
        let line = raw_line.trim_end();
        if line.is_empty() {
            out.push(String::new());
            continue;
        }
        for piece in textwrap::wrap(line, wrap_options(width)) {
            out.push(piece.into_owned());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_line_stays_single() {
        assert_eq!(wrap_text_lines("Hello", 80), vec!["Hello"]);
    }

    #[test]
    fn wraps_at_width_boundary() {
        assert_eq!(wrap_text_lines("Hello world", 5), vec!["Hello", "world"]);
    }

    #[test]
    fn breaks_long_words() {
        assert_eq!(wrap_text_lines("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn preserves_hard_line_breaks_and_blanks() {
        let text = "First paragraph.\n\nSecond paragraph.";
        assert_eq!(
            wrap_text_lines(text, 80),
            vec!["First paragraph.", "", "Second paragraph."]
        );
    }

    #[test]
    fn zero_width_yields_nothing() {
        assert!(wrap_text_lines("anything", 0).is_empty());
    }
}
