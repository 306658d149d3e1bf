//! Classic list-processing exercises over s-expressions: enumeration,
//! change-making, special-form detection, and `let` desugaring.

pub mod cli;
pub mod engine;
pub mod logging;
pub mod repl;

#[cfg(test)]
mod test_utils;

pub use engine::analyze::{analyze, analyze_all};
pub use engine::ast::Expr;
pub use engine::builtins::change::list_change;
pub use engine::builtins::list::{cons_all, enumerate, map, zip};
pub use engine::error::SchemeError;

use tracing::{debug, instrument};

/// Reads every datum in `source` and rewrites each one.
#[instrument(skip(source, source_name), fields(source_name = %source_name), err)]
pub fn analyze_source(source: &str, source_name: &str) -> Result<Vec<Expr>, SchemeError> {
    let exprs = engine::parser::parse_program(source)?;
    debug!(count = exprs.len(), "Read data from source");
    analyze_all(&exprs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::init_test_logging;
    use crate::test_utils::read;

    #[test]
    fn analyze_source_rewrites_every_datum() {
        init_test_logging();
        let source = "(define (f) (let ((x 1)) x))\n; comment\n(f)\n";
        assert_eq!(
            analyze_source(source, "test"),
            Ok(vec![read("(define (f) ((lambda (x) x) 1))"), read("(f)")])
        );
    }

    #[test]
    fn analyze_source_reports_parse_and_form_errors() {
        init_test_logging();
        assert!(matches!(
            analyze_source("(let ((x 1)) x", "test"),
            Err(SchemeError::Parse(_))
        ));
        assert!(matches!(
            analyze_source("(let ((x 1)))", "test"),
            Err(SchemeError::MalformedForm { .. })
        ));
    }

    #[test]
    fn analyze_source_keeps_integer_literals_exact() {
        init_test_logging();
        assert_eq!(
            analyze_source("(+ 9223372036854775807 1)", "test"),
            Ok(vec![read("(+ 9223372036854775807 1)")])
        );
        assert!(matches!(
            analyze_source("(+ 99999999999999999999 1)", "test"),
            Err(SchemeError::Parse(_))
        ));
    }

    #[test]
    fn analyze_source_rejects_runaway_nesting() {
        init_test_logging();
        let source = format!("{}x{}", "(".repeat(50_000), ")".repeat(50_000));
        assert!(matches!(
            analyze_source(&source, "test"),
            Err(SchemeError::NestingTooDeep(_))
        ));
    }
}
