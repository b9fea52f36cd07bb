//! End-of-line comment removal.
//!
//! Only whole-line comments are recognized: optional leading whitespace
//! followed by `--` or `//`. A comment trailing other text on the same line
//! is left alone. Runs on literal-disguised text so comment-looking content
//! inside a string literal is never touched.

/// Remove every whole-line `--`/`//` comment, keeping line boundaries.
pub(crate) fn strip_line_comments(src: &str) -> String {
    let mut out = String::with_capacity(src.len());
    for line in src.split_inclusive('\n') {
        let (content, terminator) = match line.strip_suffix('\n') {
            Some(content) => (content, "\n"),
            None => (line, ""),
        };
        let trimmed = content.trim_start();
        if !trimmed.starts_with("--") && !trimmed.starts_with("//") {
            out.push_str(content);
        }
        out.push_str(terminator);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_whole_line_comments() {
        assert_eq!(strip_line_comments("-- note\nselect 1"), "\nselect 1");
        assert_eq!(strip_line_comments("  // note\nselect 1"), "\nselect 1");
    }

    #[test]
    fn test_keeps_trailing_comments() {
        let src = "select 1 -- trailing\nselect 2";
        assert_eq!(strip_line_comments(src), src);
    }

    #[test]
    fn test_keeps_line_boundaries() {
        assert_eq!(strip_line_comments("--a\n--b\nselect 1\n"), "\n\nselect 1\n");
    }

    #[test]
    fn test_comment_only_input_becomes_blank() {
        assert_eq!(strip_line_comments("-- just a note"), "");
        assert_eq!(strip_line_comments("// just a note\n"), "\n");
    }
}
