//! Text splicing primitives shared by the editors
//!
//! Everything here builds a new `String`; the input is never modified in
//! place, so a failed operation leaves the caller's text untouched.

use super::locate::Braces;
use super::scan::{indent_of, line_break_at, line_end, line_start};

/// Re-indent a block or entry so its first line starts at `indent`.
///
/// The first line is taken as-is after trimming its leading whitespace
/// (extracted blocks start mid-line). Later lines keep their indentation
/// relative to the least indented of them, which for a block is its
/// closing brace.
pub fn reindent(block: &str, indent: &str) -> String {
    let block = block.trim_end_matches(['\n', '\r']);
    let mut lines = block.lines();
    let Some(first) = lines.next() else {
        return String::new();
    };
    let rest: Vec<&str> = lines.collect();

    let base = rest
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_of(l).len())
        .min()
        .unwrap_or(0);

    let mut out = String::with_capacity(block.len() + indent.len() * (rest.len() + 1));
    out.push_str(indent);
    out.push_str(first.trim_start());
    for line in rest {
        out.push('\n');
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let own = indent_of(line).len();
        out.push_str(indent);
        out.push_str(&line[own.min(base)..]);
    }
    out
}

/// Remove the text from `start` through `end` inclusive.
///
/// When the span occupies whole lines (only whitespace before `start` and
/// after `end` on their lines) the lines are removed with their newline,
/// together with any blank lines that directly follow, so repeated removals
/// never leave blank lines behind. Otherwise only the span and the spaces
/// following it are removed.
pub fn remove_span(text: &str, start: usize, end: usize) -> String {
    let ls = line_start(text, start);
    let mut le = line_end(text, end);
    let before = &text[ls..start];
    let after = &text[end + 1..le];

    let mut out = String::with_capacity(text.len());
    if before.trim().is_empty() && after.trim().is_empty() {
        while le < text.len() {
            let next = line_end(text, le + 1);
            if next >= text.len() || !text[le + 1..next].trim().is_empty() {
                break;
            }
            le = next;
        }
        out.push_str(&text[..ls]);
        if le < text.len() {
            out.push_str(&text[le + 1..]);
        }
    } else {
        out.push_str(&text[..start]);
        out.push_str(text[end + 1..].trim_start_matches([' ', '\t']));
    }
    out
}

/// Remove whole lines from the start of `first` through the end of `last`.
pub fn remove_lines(text: &str, first: usize, last: usize) -> String {
    let ls = line_start(text, first);
    let le = line_end(text, last);
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..ls]);
    if le < text.len() {
        out.push_str(&text[le + 1..]);
    }
    out
}

/// Rewrite every line break in `s` as `eol`.
pub fn with_line_break(s: &str, eol: &str) -> String {
    let unix = s.replace("\r\n", "\n");
    if eol == "\n" { unix } else { unix.replace('\n', eol) }
}

/// Insert `entry` immediately before the closing brace of `braces`.
///
/// The entry is re-indented to `entry_indent`. If the closing brace sits on
/// its own line the entry goes on a new line above it and the brace line is
/// left untouched. A same-line body (`= {}` or `= { x }`) is expanded onto
/// separate lines, closing at `closing_indent`. New lines use the line
/// break of the opening brace's line.
pub fn insert_before_close(
    text: &str,
    braces: Braces,
    entry: &str,
    entry_indent: &str,
    closing_indent: &str,
) -> String {
    let eol = line_break_at(text, braces.open);
    let entry = with_line_break(&reindent(entry, entry_indent), eol);
    let close_line = line_start(text, braces.close);
    let mut out = String::with_capacity(text.len() + entry.len() + 2 * eol.len());

    if close_line > braces.open && text[close_line..braces.close].trim().is_empty() {
        out.push_str(&text[..close_line]);
        out.push_str(&entry);
        out.push_str(eol);
        out.push_str(&text[close_line..]);
    } else {
        let inner = text[braces.open + 1..braces.close].trim();
        out.push_str(&text[..=braces.open]);
        out.push_str(eol);
        if !inner.is_empty() {
            out.push_str(entry_indent);
            out.push_str(inner);
            out.push_str(eol);
        }
        out.push_str(&entry);
        out.push_str(eol);
        out.push_str(closing_indent);
        out.push_str(&text[braces.close..]);
    }
    out
}

/// Insert `line` (already indented) as a new line after the line holding `pos`.
///
/// `line` may span several lines; it takes the line break of the line at `pos`.
pub fn insert_line_after(text: &str, pos: usize, line: &str) -> String {
    let eol = line_break_at(text, pos);
    let line = with_line_break(line, eol);
    let le = line_end(text, pos);
    let mut out = String::with_capacity(text.len() + line.len() + eol.len());
    if le < text.len() {
        out.push_str(&text[..=le]);
        out.push_str(&line);
        out.push_str(eol);
        out.push_str(&text[le + 1..]);
    } else {
        out.push_str(text);
        out.push_str(eol);
        out.push_str(&line);
    }
    out
}

/// Replace the line holding `pos` with `line` (already indented).
///
/// The line keeps its original line break.
pub fn replace_line(text: &str, pos: usize, line: &str) -> String {
    let ls = line_start(text, pos);
    let le = line_end(text, pos);
    let end = if text[ls..le].ends_with('\r') { le - 1 } else { le };
    let mut out = String::with_capacity(text.len() + line.len());
    out.push_str(&text[..ls]);
    out.push_str(line);
    out.push_str(&text[end..]);
    out
}
