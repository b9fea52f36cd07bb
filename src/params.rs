//! Stored-procedure parameter tokenization.
//!
//! Parameters can be separated by commas or whitespace; repeated separators
//! collapse into one. A bare `null` (any case) is the null sentinel, while
//! `'null'` is the four-character string.

use crate::error::Result;
use crate::literals;

/// Split a procedure-call argument list into ordered parameter tokens.
///
/// By caller convention the first token is the procedure name and the rest
/// are its parameters. `None` is the explicit null; quoted tokens come back
/// decoded (outer quotes stripped, `''` collapsed to `'`).
///
/// # Examples
///
/// ```
/// let tokens = sqlbatch::parse_procedure_call_parameters("'a,b', 5, null , 'c d'").unwrap();
/// assert_eq!(tokens, vec![
///     Some("a,b".to_string()),
///     Some("5".to_string()),
///     None,
///     Some("c d".to_string()),
/// ]);
/// ```
///
/// # Errors
///
/// Returns [`BatchError::TooManyLiterals`](crate::BatchError::TooManyLiterals)
/// when the argument list carries more quoted literals than the bank accepts.
pub fn parse_procedure_call_parameters(src: &str) -> Result<Vec<Option<String>>> {
    let (disguised, bank) = literals::extract(src)?;

    let mut tokens = Vec::new();
    for piece in disguised.split(|c: char| c.is_whitespace() || c == ',') {
        if piece.is_empty() {
            continue;
        }
        if piece.eq_ignore_ascii_case("null") {
            tokens.push(None);
            continue;
        }
        let token = match literals::lone_placeholder_index(piece) {
            Some(index) => match bank.get(index) {
                Some(literal) => literals::decode(literal),
                None => continue,
            },
            // A literal glued to other text stays in its quoted form; no
            // placeholder may leak either way.
            None => literals::restore(piece, &bank),
        };
        tokens.push(Some(token));
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_mixed_separators_collapse() {
        let tokens = parse_procedure_call_parameters("'a,b', 5, null , 'c d'").unwrap();
        assert_eq!(tokens, vec![some("a,b"), some("5"), None, some("c d")]);
    }

    #[test]
    fn test_null_is_case_insensitive() {
        let tokens = parse_procedure_call_parameters("proc NULL Null null").unwrap();
        assert_eq!(tokens, vec![some("proc"), None, None, None]);
    }

    #[test]
    fn test_quoted_null_is_a_string() {
        let tokens = parse_procedure_call_parameters("proc 'null'").unwrap();
        assert_eq!(tokens, vec![some("proc"), some("null")]);
    }

    #[test]
    fn test_doubled_quote_decodes() {
        let tokens = parse_procedure_call_parameters("proc 'it''s'").unwrap();
        assert_eq!(tokens, vec![some("proc"), some("it's")]);
    }

    #[test]
    fn test_empty_input_yields_no_tokens() {
        assert!(parse_procedure_call_parameters("").unwrap().is_empty());
        assert!(parse_procedure_call_parameters(" ,, ").unwrap().is_empty());
    }

    #[test]
    fn test_literal_glued_to_text_does_not_leak_placeholders() {
        let tokens = parse_procedure_call_parameters("x'a b'").unwrap();
        assert_eq!(tokens, vec![some("x'a b'")]);
    }

    #[test]
    fn test_order_is_preserved() {
        let tokens = parse_procedure_call_parameters("p 1 2 3").unwrap();
        assert_eq!(tokens, vec![some("p"), some("1"), some("2"), some("3")]);
    }
}
