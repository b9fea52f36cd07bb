//! sqlbatch - heuristic SQL batch tokenizer for interactive consoles
//!
//! Splits a raw, user-typed multi-statement script into individual
//! statements without a SQL grammar, and tokenizes stored-procedure
//! parameter lists. Statement boundaries are guessed: a new statement
//! starts before every whitespace-bounded statement keyword, except where
//! the keyword is provably mid-statement (`INSERT … SELECT`, subselects,
//! set-operator continuations). Quoted literals and whole-line comments are
//! handled first so their content never confuses the heuristics. No
//! semicolons are required; an explicit `;` always splits.
//!
//! No validation happens here - malformed SQL passes through opaquely for
//! the execution layer to reject.
//!
//! # Example
//!
//! ```
//! use sqlbatch::{classify, parse_user_input, Submission};
//!
//! let statements = parse_user_input(
//!     "-- load then inspect\n\
//!      insert into t (a,b) select x,y from u\n\
//!      exec count_rows 't'",
//! )?;
//! assert_eq!(statements.len(), 2);
//!
//! match classify(&statements[1])? {
//!     Submission::Procedure { name, params } => {
//!         assert_eq!(name, "count_rows");
//!         assert_eq!(params, vec![Some("t".to_string())]);
//!     }
//!     other => panic!("unexpected routing: {other:?}"),
//! }
//! # Ok::<(), sqlbatch::BatchError>(())
//! ```

mod boundaries;
mod comments;
mod literals;

pub mod dispatch;
pub mod error;
pub mod params;
pub mod splitter;

pub use dispatch::{classify, Submission};
pub use error::{BatchError, Result};
pub use params::parse_procedure_call_parameters;
pub use splitter::parse_user_input;
