//! Brace-span scanning and line helpers
//!
//! The ritobin text format never puts braces inside string values, so a
//! plain depth counter over `{` and `}` is enough to pair them. All offsets
//! are byte offsets; braces and newlines are ASCII, so every offset returned
//! here is a valid `str` slice boundary.

use crate::error::{Error, Result};

/// Find the `}` that closes the first `{` at or after `from`.
///
/// The opening brace counts as depth 1; the returned offset is the brace
/// that brings depth back to 0.
///
/// # Errors
/// Returns [`Error::UnbalancedBraces`] if there is no opening brace at or
/// after `from`, or if the text ends before depth returns to zero.
pub fn find_matching_close(text: &str, from: usize) -> Result<usize> {
    let bytes = text.as_bytes();
    let open = bytes
        .iter()
        .skip(from)
        .position(|&b| b == b'{')
        .map(|p| p + from)
        .ok_or(Error::UnbalancedBraces { offset: from })?;

    let mut depth = 0usize;
    for (i, &b) in bytes.iter().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }

    Err(Error::UnbalancedBraces { offset: open })
}

/// Net brace balance of a single line (opens minus closes).
pub fn brace_delta(line: &str) -> i32 {
    line.bytes().fold(0, |acc, b| match b {
        b'{' => acc + 1,
        b'}' => acc - 1,
        _ => acc,
    })
}

/// Offset of the first byte of the line containing `pos`.
pub fn line_start(text: &str, pos: usize) -> usize {
    text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// Offset of the newline ending the line containing `pos` (or the text length).
pub fn line_end(text: &str, pos: usize) -> usize {
    text[pos..].find('\n').map_or(text.len(), |i| i + pos)
}

/// The line break (`"\n"` or `"\r\n"`) ending the line containing `pos`.
///
/// An unterminated last line takes the break of the text's first line.
pub fn line_break_at(text: &str, pos: usize) -> &'static str {
    let mut le = line_end(text, pos);
    if le == text.len() {
        match text.find('\n') {
            Some(first) => le = first,
            None => return "\n",
        }
    }
    if text[..le].ends_with('\r') { "\r\n" } else { "\n" }
}

/// Leading whitespace of a line.
pub fn indent_of(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

/// Brace depth at `pos`, counting from the opening brace at `open`.
///
/// A position directly inside the block body (not inside any nested block)
/// has depth 1.
pub fn depth_at(text: &str, open: usize, pos: usize) -> i32 {
    brace_delta(&text[open..pos])
}

/// One line of a block body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyLine {
    /// Offset of the first byte of the line.
    pub start: usize,
    /// Offset of the terminating newline (exclusive end of the line content).
    pub end: usize,
    /// Nesting depth at the start of the line; 0 means a direct child of the block.
    pub depth: i32,
}

impl BodyLine {
    /// The line content without its newline.
    pub fn text<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    /// Whether the line holds only whitespace.
    pub fn is_blank(&self, text: &str) -> bool {
        self.text(text).trim().is_empty()
    }
}

/// Lines strictly between the line holding `open` and the line holding `close`.
///
/// Returns an empty list when both braces sit on the same line.
pub fn body_lines(text: &str, open: usize, close: usize) -> Vec<BodyLine> {
    let mut lines = Vec::new();
    let first = line_end(text, open) + 1;
    let stop = line_start(text, close);
    if first > stop {
        return lines;
    }

    let mut depth = 0;
    let mut pos = first;
    while pos < stop {
        let end = line_end(text, pos);
        lines.push(BodyLine { start: pos, end, depth });
        depth += brace_delta(&text[pos..end]);
        pos = end + 1;
    }
    lines
}

/// A direct child of a block body, spanning one or more lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyEntry {
    /// Index of the first line in the `body_lines` list.
    pub first: usize,
    /// Index of the last line (where depth returns to zero).
    pub last: usize,
}

/// Group body lines into direct children.
///
/// An entry starts at a non-blank depth-0 line. If that line opens more
/// braces than it closes the entry continues until depth returns to zero;
/// a same-line body such as `"e" = FaceTargetEventData {}` is one line.
pub fn body_entries(text: &str, lines: &[BodyLine]) -> Vec<BodyEntry> {
    let mut entries = Vec::new();
    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];
        if line.depth != 0 || line.is_blank(text) {
            i += 1;
            continue;
        }
        let mut depth = brace_delta(line.text(text));
        let mut last = i;
        while depth > 0 && last + 1 < lines.len() {
            last += 1;
            depth += brace_delta(lines[last].text(text));
        }
        entries.push(BodyEntry { first: i, last });
        i = last + 1;
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested(depth: usize) -> String {
        let mut s = String::new();
        for i in 0..depth {
            s.push_str(&format!("L{i} = T {{ "));
        }
        for _ in 0..depth {
            s.push_str("} ");
        }
        s
    }

    #[test]
    fn test_matching_close_nested_fixtures() {
        for depth in 1..=10 {
            let text = nested(depth);
            let opens: Vec<usize> = text.match_indices('{').map(|(i, _)| i).collect();
            let closes: Vec<usize> = text.match_indices('}').map(|(i, _)| i).collect();
            for (k, &open) in opens.iter().enumerate() {
                let close = find_matching_close(&text, open).unwrap();
                assert_eq!(close, closes[closes.len() - 1 - k], "depth {depth}, brace {k}");
            }
        }
    }

    #[test]
    fn test_matching_close_skips_to_first_open() {
        let text = "name = T { a { } } tail";
        assert_eq!(find_matching_close(text, 0).unwrap(), 17);
    }

    #[test]
    fn test_matching_close_sibling_blocks() {
        let text = "{ {} {} } {}";
        assert_eq!(find_matching_close(text, 0).unwrap(), 8);
        assert_eq!(find_matching_close(text, 2).unwrap(), 3);
        assert_eq!(find_matching_close(text, 9).unwrap(), 11);
    }

    #[test]
    fn test_matching_close_unbalanced() {
        let err = find_matching_close("a = T { b = U {", 0).unwrap_err();
        assert!(matches!(err, Error::UnbalancedBraces { offset: 6 }));
        assert!(find_matching_close("no braces", 0).is_err());
    }

    #[test]
    fn test_brace_delta() {
        assert_eq!(brace_delta("\"e\" = FaceTargetEventData {}"), 0);
        assert_eq!(brace_delta("\"e\" = ParticleEventData {"), 1);
        assert_eq!(brace_delta("    }"), -1);
    }

    #[test]
    fn test_line_helpers() {
        let text = "ab\n  cd\nef";
        assert_eq!(line_start(text, 5), 3);
        assert_eq!(line_end(text, 5), 7);
        assert_eq!(line_end(text, 8), 10);
        assert_eq!(indent_of("    x = 1"), "    ");
        assert_eq!(indent_of("\tx"), "\t");
    }

    #[test]
    fn test_line_break_at() {
        let text = "a {\r\n    b\r\n}";
        assert_eq!(line_break_at(text, 0), "\r\n");
        assert_eq!(line_break_at(text, text.len()), "\r\n");
        assert_eq!(line_break_at("a\nb", 0), "\n");
        assert_eq!(line_break_at("single", 0), "\n");
    }

    #[test]
    fn test_body_lines_and_entries() {
        let text = "X = T {\n    a: u8 = 1\n    b: embed = U {\n        c: u8 = 2\n    }\n    d = V {}\n}\n";
        let close = find_matching_close(text, 0).unwrap();
        let lines = body_lines(text, 6, close);
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0].depth, 0);
        assert_eq!(lines[2].depth, 1);

        let entries = body_entries(text, &lines);
        assert_eq!(entries, vec![
            BodyEntry { first: 0, last: 0 },
            BodyEntry { first: 1, last: 3 },
            BodyEntry { first: 4, last: 4 },
        ]);
    }

    #[test]
    fn test_body_lines_same_line_block() {
        let text = "X = T {}";
        assert!(body_lines(text, 6, 7).is_empty());
    }
}
