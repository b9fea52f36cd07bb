//! Statement splitting.
//!
//! Drives the pipeline: extract literals, strip whole-line comments, guard
//! non-breaking keywords, inject a separator before every remaining
//! statement-start keyword, then split, trim and restore. No semicolons are
//! required between statements the splitter can recognize; an explicit `;`
//! always splits.

use log::debug;

use crate::boundaries::{self, is_word_start, word_at, GUARD};
use crate::comments;
use crate::error::Result;
use crate::literals;

/// Keywords that may start a new statement when whitespace-bounded.
///
/// `alter` and `drop` are deliberately absent: they occur mid-statement in
/// `alter table … alter|drop column …`, so a preceding statement must be
/// ended with an explicit semicolon instead.
const STATEMENT_STARTS: [&str; 12] = [
    "select",
    "insert",
    "update",
    "upsert",
    "delete",
    "truncate",
    "create",
    "partition",
    "exec",
    "execute",
    "explain",
    "explainproc",
];

/// Split a raw multi-statement script into individual statements.
///
/// Statements come back trimmed, comment-free, with string literals intact
/// and double quotes `\`-escaped for transport. Whitespace-only and
/// comment-only input yields an empty list.
///
/// # Examples
///
/// ```
/// let statements = sqlbatch::parse_user_input(
///     "select * from t; select * from t2",
/// ).unwrap();
/// assert_eq!(statements, vec!["select * from t", "select * from t2"]);
///
/// // No split inside INSERT ... SELECT:
/// let statements = sqlbatch::parse_user_input(
///     "insert into t (a,b) select x,y from u",
/// ).unwrap();
/// assert_eq!(statements.len(), 1);
/// ```
///
/// # Errors
///
/// Returns [`BatchError::TooManyLiterals`](crate::BatchError::TooManyLiterals)
/// when a single batch carries more quoted literals than the bank accepts.
pub fn parse_user_input(src: &str) -> Result<Vec<String>> {
    let (disguised, bank) = literals::extract(src)?;
    debug!("extracted {} quoted literals", bank.len());
    let stripped = comments::strip_line_comments(&disguised);
    let guarded = boundaries::guard_non_breaking(&stripped);
    debug!("guarded batch: {:?}", guarded);

    let separated = inject_separators(&guarded);
    let plain: String = separated.chars().filter(|&c| c != GUARD).collect();
    debug!("separated batch: {:?}", plain);

    let mut statements = Vec::new();
    for segment in plain.split(';') {
        let statement = segment.trim();
        if statement.is_empty() {
            continue;
        }
        let restored = literals::restore(statement, &bank);
        statements.push(restored.replace('"', "\\\""));
    }
    Ok(statements)
}

/// Insert a `;` before every unguarded, whitespace-bounded statement-start
/// keyword. The single whitespace character after the keyword is normalized
/// to one space so leading-keyword dispatch stays reliable.
fn inject_separators(src: &str) -> String {
    let chars: Vec<char> = src.chars().collect();
    let mut out = String::with_capacity(src.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        let preceded_by_ws = i > 0 && chars[i - 1].is_whitespace();
        if preceded_by_ws && is_word_start(&chars, i) {
            if let Some(end) = match_statement_start(&chars, i) {
                out.push(';');
                out.extend(&chars[i..end]);
                out.push(' ');
                i = end + 1;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

/// Whole-word match of a statement-start keyword followed by whitespace.
/// Returns the position just past the keyword.
fn match_statement_start(chars: &[char], i: usize) -> Option<usize> {
    for kw in STATEMENT_STARTS {
        if word_at(chars, i, kw) {
            let end = i + kw.len();
            return matches!(chars.get(end), Some(c) if c.is_whitespace()).then_some(end);
        }
    }
    None
}
