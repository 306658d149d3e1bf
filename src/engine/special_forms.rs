//! Special forms recognized by the rewriter, and predicates that detect them.

use crate::engine::ast::Expr;

// Constants for individual special form names, can be used for matching.
pub const LAMBDA: &str = "lambda";
pub const DEFINE: &str = "define";
pub const MU: &str = "mu";
pub const QUOTE: &str = "quote";
pub const LET: &str = "let";

/// Returns a predicate that holds for combinations headed by `form`.
///
/// Atoms, including the empty list, never match.
pub fn check_special(form: &'static str) -> impl Fn(&Expr) -> bool {
    move |expr: &Expr| expr.head_symbol() == Some(form)
}

pub fn is_lambda(expr: &Expr) -> bool {
    check_special(LAMBDA)(expr)
}

pub fn is_define(expr: &Expr) -> bool {
    check_special(DEFINE)(expr)
}

pub fn is_mu(expr: &Expr) -> bool {
    check_special(MU)(expr)
}

pub fn is_quoted(expr: &Expr) -> bool {
    check_special(QUOTE)(expr)
}

pub fn is_let(expr: &Expr) -> bool {
    check_special(LET)(expr)
}
