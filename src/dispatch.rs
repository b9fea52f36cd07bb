//! Statement classification for the execution dispatcher.
//!
//! Each statement produced by [`parse_user_input`](crate::parse_user_input)
//! is routed by its leading keyword: procedure calls, diagnostic `explain`
//! submissions, or generic ad-hoc SQL. Payloads are normalized for the wire
//! here (newline runs collapsed to a space, apostrophes doubled); actually
//! submitting them is someone else's job.

use crate::error::{BatchError, Result};
use crate::params::parse_procedure_call_parameters;

/// Where a single statement should be routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// `exec`/`execute <name> [params…]`: a named stored-procedure call.
    Procedure {
        name: String,
        params: Vec<Option<String>>,
    },
    /// `explain <sql>`: diagnostic-only submission of the statement.
    Explain(String),
    /// `explainproc <name>`: diagnostic submission naming a procedure.
    ExplainProc(String),
    /// Anything else: generic ad-hoc SQL.
    AdHoc(String),
}

/// Classify one statement by its leading keyword.
///
/// # Examples
///
/// ```
/// use sqlbatch::Submission;
///
/// let submission = sqlbatch::classify("exec add_user 'alice' null").unwrap();
/// assert_eq!(submission, Submission::Procedure {
///     name: "add_user".to_string(),
///     params: vec![Some("alice".to_string()), None],
/// });
///
/// let submission = sqlbatch::classify("select * from t").unwrap();
/// assert_eq!(submission, Submission::AdHoc("select * from t".to_string()));
/// ```
///
/// # Errors
///
/// [`BatchError::MissingProcedureName`] when an `exec`/`execute` statement
/// names no procedure (or names it `null`);
/// [`BatchError::TooManyLiterals`](crate::BatchError::TooManyLiterals) if
/// its parameter list overflows the literal bank.
pub fn classify(statement: &str) -> Result<Submission> {
    let Some((head, rest)) = statement.split_once(char::is_whitespace) else {
        return Ok(Submission::AdHoc(prepare_payload(statement)));
    };

    if head.eq_ignore_ascii_case("exec") || head.eq_ignore_ascii_case("execute") {
        let mut tokens = parse_procedure_call_parameters(rest)?.into_iter();
        let name = tokens
            .next()
            .flatten()
            .ok_or(BatchError::MissingProcedureName)?;
        return Ok(Submission::Procedure {
            name,
            params: tokens.collect(),
        });
    }
    if head.eq_ignore_ascii_case("explain") {
        return Ok(Submission::Explain(prepare_payload(rest)));
    }
    if head.eq_ignore_ascii_case("explainproc") {
        return Ok(Submission::ExplainProc(prepare_payload(rest)));
    }
    Ok(Submission::AdHoc(prepare_payload(statement)))
}

/// Normalize a payload for submission: newline runs become one space,
/// apostrophes are doubled.
fn prepare_payload(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut in_newline_run = false;
    for c in sql.chars() {
        match c {
            '\r' | '\n' => {
                if !in_newline_run {
                    out.push(' ');
                    in_newline_run = true;
                }
            }
            '\'' => {
                out.push_str("''");
                in_newline_run = false;
            }
            _ => {
                out.push(c);
                in_newline_run = false;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exec_routes_to_procedure() {
        let submission = classify("exec myproc 1, null, 'a b'").unwrap();
        assert_eq!(
            submission,
            Submission::Procedure {
                name: "myproc".to_string(),
                params: vec![Some("1".to_string()), None, Some("a b".to_string())],
            }
        );
    }

    #[test]
    fn test_execute_is_an_alias_for_exec() {
        assert_eq!(classify("execute p 1").unwrap(), classify("exec p 1").unwrap());
        assert_eq!(classify("EXECUTE p").unwrap(), classify("exec p").unwrap());
    }

    #[test]
    fn test_exec_without_name_is_an_error() {
        assert_eq!(
            classify("exec   ").unwrap_err(),
            BatchError::MissingProcedureName
        );
        assert_eq!(
            classify("exec null 1").unwrap_err(),
            BatchError::MissingProcedureName
        );
    }

    #[test]
    fn test_bare_exec_is_ad_hoc() {
        // No whitespace after the keyword means no procedure-call shape.
        assert_eq!(
            classify("exec").unwrap(),
            Submission::AdHoc("exec".to_string())
        );
    }

    #[test]
    fn test_explain_payload_is_normalized() {
        assert_eq!(
            classify("explain select 'x'\nfrom t").unwrap(),
            Submission::Explain("select ''x'' from t".to_string())
        );
    }

    #[test]
    fn test_explainproc_names_the_procedure() {
        assert_eq!(
            classify("explainproc myproc").unwrap(),
            Submission::ExplainProc("myproc".to_string())
        );
    }

    #[test]
    fn test_ad_hoc_collapses_newline_runs_and_doubles_apostrophes() {
        assert_eq!(
            classify("select 'a'\r\n\r\nfrom t").unwrap(),
            Submission::AdHoc("select ''a'' from t".to_string())
        );
    }
}
