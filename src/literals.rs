//! Quoted-literal extraction and restoration.
//!
//! String literals are pulled out of the batch text before any statement
//! heuristic runs, so their content can never be mistaken for statement
//! syntax (keywords, semicolons, comment markers). Each literal is replaced
//! by a placeholder carrying its bank index; the splitter restores them per
//! statement once splitting is done.
//!
//! A doubled single quote (`''`) is always an escaped quote, inside or
//! outside a literal, and never opens or closes one. Literals are stored
//! exactly as typed, quotes included, so restoration is byte-identical.

use crate::boundaries::GUARD;
use crate::error::{BatchError, Result};

/// Start sentinel of a literal placeholder.
pub(crate) const PLACEHOLDER_START: char = '\u{E000}';
/// End sentinel of a literal placeholder.
pub(crate) const PLACEHOLDER_END: char = '\u{E001}';

/// Upper bound on extracted literals per parse call.
///
/// The bank is indexed out-of-band, so this is a guardrail rather than an
/// addressing limit; hitting it is reported instead of corrupting output.
pub(crate) const MAX_LITERALS_PER_BATCH: usize = 900_000;

/// Ordered bank of literals extracted from one batch.
///
/// Indices are assigned strictly in extraction order and are only valid for
/// the text returned by the same [`extract`] call.
#[derive(Debug, Default)]
pub(crate) struct LiteralBank {
    literals: Vec<String>,
}

impl LiteralBank {
    fn push(&mut self, literal: &str) -> Result<usize> {
        if self.literals.len() >= MAX_LITERALS_PER_BATCH {
            return Err(BatchError::TooManyLiterals {
                limit: MAX_LITERALS_PER_BATCH,
            });
        }
        self.literals.push(literal.to_string());
        Ok(self.literals.len() - 1)
    }

    pub(crate) fn get(&self, index: usize) -> Option<&str> {
        self.literals.get(index).map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.literals.len()
    }
}

/// Replace every single-quoted literal in `src` with an indexed placeholder.
///
/// Scans once, left to right. An unterminated trailing literal is left in
/// place verbatim. Sentinel characters appearing in the raw input are
/// dropped so a placeholder can never be forged by user text.
pub(crate) fn extract(src: &str) -> Result<(String, LiteralBank)> {
    let mut bank = LiteralBank::default();
    let mut out = String::with_capacity(src.len());
    let chars: Vec<char> = src.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if c != '\'' {
            push_scrubbed(&mut out, c);
            i += 1;
            continue;
        }
        if chars.get(i + 1) == Some(&'\'') {
            // Escaped quote pair outside a literal: plain text.
            out.push_str("''");
            i += 2;
            continue;
        }
        match literal_end(&chars, i + 1) {
            Some(close) => {
                let literal: String = chars[i..=close].iter().collect();
                let index = bank.push(&literal)?;
                out.push(PLACEHOLDER_START);
                out.push_str(&index.to_string());
                out.push(PLACEHOLDER_END);
                i = close + 1;
            }
            None => {
                // Unterminated literal: pass the rest through untouched.
                for &rest in &chars[i..] {
                    push_scrubbed(&mut out, rest);
                }
                break;
            }
        }
    }

    Ok((out, bank))
}

/// Reverse every placeholder in `src` back to its original literal.
pub(crate) fn restore(src: &str, bank: &LiteralBank) -> String {
    let mut out = String::with_capacity(src.len());
    let mut chars = src.chars().peekable();

    while let Some(c) = chars.next() {
        if c != PLACEHOLDER_START {
            out.push(c);
            continue;
        }
        let mut index = 0usize;
        let mut has_digits = false;
        while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
            index = index * 10 + d as usize;
            has_digits = true;
            chars.next();
        }
        if chars.peek() == Some(&PLACEHOLDER_END) {
            chars.next();
        }
        // Placeholders are only ever produced by extract(), so the lookup
        // cannot fail for text that went through this module.
        if has_digits {
            if let Some(literal) = bank.get(index) {
                out.push_str(literal);
            }
        }
    }

    out
}

/// Decode a banked literal into its string value: outer quotes stripped,
/// doubled quotes collapsed to one.
pub(crate) fn decode(literal: &str) -> String {
    let inner = literal
        .strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(literal);
    inner.replace("''", "'")
}

/// If `piece` is exactly one placeholder, return its bank index.
pub(crate) fn lone_placeholder_index(piece: &str) -> Option<usize> {
    let inner = piece
        .strip_prefix(PLACEHOLDER_START)?
        .strip_suffix(PLACEHOLDER_END)?;
    if inner.is_empty() || !inner.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    inner.parse().ok()
}

/// Find the closing quote of a literal opened just before `from`.
///
/// Returns the index of the closing quote, skipping `''` pairs. `None`
/// means the literal never closes.
fn literal_end(chars: &[char], from: usize) -> Option<usize> {
    let mut i = from;
    while i < chars.len() {
        if chars[i] == '\'' {
            if chars.get(i + 1) == Some(&'\'') {
                i += 2;
                continue;
            }
            return Some(i);
        }
        i += 1;
    }
    None
}

fn push_scrubbed(out: &mut String, c: char) {
    if c != PLACEHOLDER_START && c != PLACEHOLDER_END && c != GUARD {
        out.push(c);
    }
}
