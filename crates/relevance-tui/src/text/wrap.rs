//! Text wrapping utilities.

use std::borrow::Cow;

/// Wrap text to the specified width.
///
/// Each input line is wrapped on its own. Leading spaces are kept on every
/// wrapped row, so pretty-printed JSON stays visually nested. Indentation
/// that would eat half the width or more is not repeated.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return text.split('\n').map(str::to_string).collect();
    }

    let mut result = Vec::new();

    for line in text.split('\n') {
        let body = line.trim_start_matches(' ');
        if body.is_empty() {
            result.push(String::new());
            continue;
        }

        let indent = &line[..line.len() - body.len()];
        let rows = if indent.len() * 2 >= width {
            textwrap::wrap(line, width)
        } else {
            let options = textwrap::Options::new(width)
                .initial_indent(indent)
                .subsequent_indent(indent);
            textwrap::wrap(body, options)
        };
        result.extend(rows.into_iter().map(Cow::into_owned));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_short() {
        assert_eq!(wrap_text("Hello", 10), vec!["Hello"]);
    }

    #[test]
    fn test_wrap_text_splits_newlines() {
        assert_eq!(
            wrap_text("Decision: SPAM\nConfidence: 87%", 40),
            vec!["Decision: SPAM", "Confidence: 87%"]
        );
    }

    #[test]
    fn test_wrap_text_keeps_blank_lines() {
        assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn test_wrap_text_long() {
        let lines = wrap_text("Hello world this is a long line", 10);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.chars().count() <= 10);
        }
    }

    #[test]
    fn test_wrap_text_preserves_indent() {
        let lines = wrap_text("  \"text\": \"Has nice food choices and friendly staff\"", 20);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.starts_with("  "), "line {line:?} lost its indent");
            assert!(line.chars().count() <= 20);
        }
    }

    #[test]
    fn test_wrap_text_breaks_long_words() {
        let url = "https://lh5.googleusercontent.com/p/AF1QipMDSa1pSffRzM1AqS0phG3a";
        let lines = wrap_text(url, 16);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), url);
    }

    #[test]
    fn test_wrap_text_zero_width() {
        assert_eq!(wrap_text("a\nb", 0), vec!["a", "b"]);
    }
}
