//! Non-breaking keyword protection.
//!
//! Statement boundaries are guessed, not parsed: the splitter starts a new
//! statement before every statement-start keyword it sees. This module
//! disguises the keyword occurrences that are provably mid-statement so no
//! separator lands in front of them. Two ordered rules, applied in sequence:
//!
//! 1. The `select` in `INSERT|UPSERT INTO <table> [(<columns>)] … SELECT`.
//! 2. A statement keyword continuing a compound construct: after `explain`,
//!    a set operator (`union`, `intersect`, `except`, `all`), or an open
//!    parenthesis (subselects and set-operation arguments).
//!
//! Protection inserts a guard sentinel immediately before the keyword. The
//! splitter strips the sentinel after splitting, restoring the surrounding
//! whitespace exactly as typed.

/// Guard sentinel inserted before a protected keyword.
pub(crate) const GUARD: char = '\u{E002}';

/// Keywords that open a compound construct when followed by whitespace.
const CONTINUATION_TRIGGERS: [&str; 5] = ["explain", "union", "intersect", "except", "all"];

/// Statement keywords that may legitimately continue a compound construct.
const CONTINUATION_KEYWORDS: [&str; 6] =
    ["select", "insert", "update", "upsert", "delete", "truncate"];

/// Disguise every keyword occurrence that must not trigger a statement split.
pub(crate) fn guard_non_breaking(src: &str) -> String {
    let guarded = guard_insert_into_select(src);
    guard_compound_continuations(&guarded)
}

/// Rule 1: protect the `select` of `INSERT|UPSERT INTO … SELECT`.
fn guard_insert_into_select(src: &str) -> String {
    let chars: Vec<char> = src.chars().collect();
    let mut marks = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if !is_word_start(&chars, i) {
            i += 1;
            continue;
        }
        if let Some(select_pos) = match_insert_into_select(&chars, i) {
            marks.push(select_pos);
            i = select_pos + "select".len();
        } else {
            i = word_end(&chars, i);
        }
    }

    insert_guards(&chars, &marks)
}

/// Rule 2: protect a statement keyword continuing a compound construct.
///
/// Runs after rule 1; a guard already placed blocks re-matching across it,
/// so a keyword is never protected twice.
fn guard_compound_continuations(src: &str) -> String {
    let chars: Vec<char> = src.chars().collect();
    let mut marks = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if chars[i] == '(' {
            if let Some((start, end)) = match_continuation(&chars, i + 1) {
                marks.push(start);
                i = end;
            } else {
                i += 1;
            }
            continue;
        }
        if is_word_start(&chars, i) {
            let end = word_end(&chars, i);
            let bounded = i == 0 || chars[i - 1].is_whitespace();
            let trailing_ws = matches!(chars.get(end), Some(c) if c.is_whitespace());
            if bounded && trailing_ws && matches_any(&chars, i, &CONTINUATION_TRIGGERS) {
                if let Some((start, kw_end)) = match_continuation(&chars, end) {
                    marks.push(start);
                    i = kw_end;
                    continue;
                }
            }
            i = end;
            continue;
        }
        i += 1;
    }

    insert_guards(&chars, &marks)
}

/// After a trigger: skip whitespace and open parens, then expect one of the
/// continuation keywords followed by whitespace. Returns (keyword start,
/// keyword end).
fn match_continuation(chars: &[char], mut p: usize) -> Option<(usize, usize)> {
    while matches!(chars.get(p), Some(c) if c.is_whitespace() || *c == '(') {
        p += 1;
    }
    for kw in CONTINUATION_KEYWORDS {
        if word_at(chars, p, kw) {
            let end = p + kw.len();
            if matches!(chars.get(end), Some(c) if c.is_whitespace()) {
                return Some((p, end));
            }
        }
    }
    None
}

/// Match `insert|upsert into <identifier> [(<columns>)] [(\s]* select` from
/// a word start. Returns the position of the protected `select`.
fn match_insert_into_select(chars: &[char], start: usize) -> Option<usize> {
    if !word_at(chars, start, "insert") && !word_at(chars, start, "upsert") {
        return None;
    }
    let mut p = start + "insert".len();

    let after_ws = skip_whitespace(chars, p);
    if after_ws == p {
        return None;
    }
    p = after_ws;

    for kc in "into".chars() {
        if !matches!(chars.get(p), Some(c) if c.eq_ignore_ascii_case(&kc)) {
            return None;
        }
        p += 1;
    }
    // An identifier may be glued to INTO only when double-quoted.
    if !matches!(chars.get(p), Some(c) if *c == '"' || c.is_whitespace()) {
        return None;
    }
    p = skip_whitespace(chars, p);

    p = if chars.get(p) == Some(&'"') {
        match_quoted_identifier(chars, p)?
    } else {
        match_bare_identifier(chars, p)?
    };
    let after_identifier = skip_whitespace(chars, p);

    // Prefer the column-list form; fall back to matching without it.
    if let Some(after_columns) = match_column_list(chars, after_identifier) {
        if let Some(select_pos) = match_parens_then_select(chars, after_columns) {
            return Some(select_pos);
        }
    }
    match_parens_then_select(chars, after_identifier)
}

/// Skip a run of open parens and whitespace, then expect the word `select`.
fn match_parens_then_select(chars: &[char], mut p: usize) -> Option<usize> {
    while matches!(chars.get(p), Some(c) if c.is_whitespace() || *c == '(') {
        p += 1;
    }
    word_at(chars, p, "select").then_some(p)
}

/// `[a-z][a-z0-9_]*`, case-insensitive. Returns the position after it.
fn match_bare_identifier(chars: &[char], p: usize) -> Option<usize> {
    if !matches!(chars.get(p), Some(c) if c.is_ascii_alphabetic()) {
        return None;
    }
    Some(word_end(chars, p))
}

/// `"…"` with internal doubled quotes, non-empty. Returns the position
/// after the closing quote.
fn match_quoted_identifier(chars: &[char], p: usize) -> Option<usize> {
    if chars.get(p) != Some(&'"') {
        return None;
    }
    let mut q = p + 1;
    let mut content = 0usize;
    loop {
        match chars.get(q) {
            None => return None,
            Some('"') => {
                if chars.get(q + 1) == Some(&'"') {
                    q += 2;
                    content += 1;
                } else if content > 0 {
                    return Some(q + 1);
                } else {
                    return None;
                }
            }
            Some(_) => {
                q += 1;
                content += 1;
            }
        }
    }
}

/// `(<anything but ")" outside quoted identifiers>)`, non-empty. Returns
/// the position after the closing paren.
fn match_column_list(chars: &[char], p: usize) -> Option<usize> {
    if chars.get(p) != Some(&'(') {
        return None;
    }
    let mut q = p + 1;
    let mut content = 0usize;
    loop {
        match chars.get(q) {
            None => return None,
            Some('"') => {
                q = match_quoted_identifier(chars, q)?;
                content += 1;
            }
            Some(')') => {
                return if content > 0 { Some(q + 1) } else { None };
            }
            Some(_) => {
                q += 1;
                content += 1;
            }
        }
    }
}

fn insert_guards(chars: &[char], marks: &[usize]) -> String {
    let mut out = String::with_capacity(chars.len() + marks.len());
    let mut next_mark = 0;
    for (i, &c) in chars.iter().enumerate() {
        if next_mark < marks.len() && marks[next_mark] == i {
            out.push(GUARD);
            next_mark += 1;
        }
        out.push(c);
    }
    out
}

fn matches_any(chars: &[char], pos: usize, words: &[&str]) -> bool {
    words.iter().any(|w| word_at(chars, pos, w))
}

// --- shared scanning helpers (also used by the splitter) ---

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub(crate) fn is_word_start(chars: &[char], i: usize) -> bool {
    is_word_char(chars[i]) && (i == 0 || !is_word_char(chars[i - 1]))
}

pub(crate) fn word_end(chars: &[char], mut i: usize) -> usize {
    while matches!(chars.get(i), Some(c) if is_word_char(*c)) {
        i += 1;
    }
    i
}

/// Case-insensitive whole-word match at `pos` (end boundary checked; the
/// start boundary is the caller's business).
pub(crate) fn word_at(chars: &[char], pos: usize, word: &str) -> bool {
    let mut p = pos;
    for wc in word.chars() {
        match chars.get(p) {
            Some(c) if c.eq_ignore_ascii_case(&wc) => p += 1,
            _ => return false,
        }
    }
    !matches!(chars.get(p), Some(c) if is_word_char(*c))
}

pub(crate) fn skip_whitespace(chars: &[char], mut i: usize) -> usize {
    while matches!(chars.get(i), Some(c) if c.is_whitespace()) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard_positions(src: &str) -> Vec<String> {
        // Returns the word immediately following each guard.
        let guarded = guard_non_breaking(src);
        let chars: Vec<char> = guarded.chars().collect();
        let mut words = Vec::new();
        for (i, &c) in chars.iter().enumerate() {
            if c == GUARD {
                let end = word_end(&chars, i + 1);
                words.push(chars[i + 1..end].iter().collect());
            }
        }
        words
    }

    #[test]
    fn test_insert_into_select_is_guarded() {
        assert_eq!(
            guard_positions("insert into t (a,b) select x,y from u"),
            vec!["select"]
        );
        assert_eq!(
            guard_positions("upsert into t select x from u"),
            vec!["select"]
        );
    }

    #[test]
    fn test_quoted_identifier_glued_to_into() {
        assert_eq!(
            guard_positions("insert into\"Fo\"\"o\"select 1 from u"),
            vec!["select"]
        );
    }

    #[test]
    fn test_set_operator_continuation_is_guarded() {
        assert_eq!(
            guard_positions("select a from t union select b from t2"),
            vec!["select"]
        );
        assert_eq!(
            guard_positions("select a from t except all select b from t2"),
            vec!["select"]
        );
    }

    #[test]
    fn test_subselect_after_paren_is_guarded() {
        assert_eq!(
            guard_positions("select * from (select a from t) s"),
            vec!["select"]
        );
        assert_eq!(
            guard_positions("select * from ( ( select a from t)) s"),
            vec!["select"]
        );
    }

    #[test]
    fn test_explain_at_start_of_input_is_a_trigger() {
        assert_eq!(guard_positions("explain select * from t"), vec!["select"]);
        assert_eq!(guard_positions("explain update t set a = 1"), vec!["update"]);
    }

    #[test]
    fn test_plain_statement_sequence_is_not_guarded() {
        assert!(guard_positions("select * from t select * from t2").is_empty());
        assert!(guard_positions("delete from t update t2 set a = 1").is_empty());
    }

    #[test]
    fn test_guard_is_not_doubled_by_both_rules() {
        // Rule 1 guards this select; the paren trigger of rule 2 must not
        // re-match across the guard.
        assert_eq!(
            guard_positions("insert into t (select 1 from u)"),
            vec!["select"]
        );
    }

    #[test]
    fn test_keyword_glued_to_punctuation_is_not_a_continuation() {
        // `select` not followed by whitespace is never recognized.
        assert!(guard_positions("union select1 from t").is_empty());
    }

    #[test]
    fn test_guard_removal_restores_original_whitespace() {
        let src = "select a from t union\n\tselect b from t2";
        let guarded = guard_non_breaking(src);
        let stripped: String = guarded.chars().filter(|&c| c != GUARD).collect();
        assert_eq!(stripped, src);
    }
}
