//! `let` elimination: rewrites every `let` into an immediately-applied `lambda`.
//!
//! ```text
//! (let ((x 1) (y 2)) (+ x y))  =>  ((lambda (x y) (+ x y)) 1 2)
//! ```
//!
//! Quoted data is never rewritten. Function-definition forms (`lambda`, `mu`,
//! `define`) keep their head and parameters and have their bodies rewritten.
//! Any other combination is rewritten element by element.

use crate::engine::ast::{Expr, MAX_NESTING};
use crate::engine::builtins::list::{map, zip};
use crate::engine::error::SchemeError;
use crate::engine::special_forms::{
    DEFINE, LAMBDA, LET, QUOTE, is_define, is_lambda, is_let, is_mu, is_quoted,
};
use std::collections::HashSet;
use tracing::{debug, error, instrument, trace};

/// Rewrites a single expression.
pub fn analyze(expr: &Expr) -> Result<Expr, SchemeError> {
    analyze_at(expr, 0)
}

/// Rewrites a sequence of expressions, preserving order and length.
pub fn analyze_all(exprs: &[Expr]) -> Result<Vec<Expr>, SchemeError> {
    map(analyze, exprs)
}

#[instrument(level = "trace", skip(expr), fields(expr = %expr), ret, err)]
fn analyze_at(expr: &Expr, depth: usize) -> Result<Expr, SchemeError> {
    if expr.is_atom() {
        trace!("Atom, returned unchanged");
        return Ok(expr.clone());
    }
    if depth >= MAX_NESTING {
        error!(depth, "Expression nested too deeply to rewrite");
        return Err(SchemeError::NestingTooDeep(MAX_NESTING));
    }

    let operands = operands(expr);
    if is_quoted(expr) {
        check_form(QUOTE, operands, 1, Some(1))?;
        trace!("Quoted datum, returned unchanged");
        Ok(expr.clone())
    } else if is_lambda(expr) || is_mu(expr) || is_define(expr) {
        rewrite_function_form(expr, depth)
    } else if is_let(expr) {
        rewrite_let(expr, depth)
    } else {
        trace!("Generic combination, rewriting every element");
        Ok(Expr::List(analyze_nested(elements(expr), depth)?))
    }
}

// Rewrites the children of a combination at `depth`.
fn analyze_nested(exprs: &[Expr], depth: usize) -> Result<Vec<Expr>, SchemeError> {
    map(|expr: &Expr| analyze_at(expr, depth + 1), exprs)
}

// Every element of a combination, head included.
fn elements(expr: &Expr) -> &[Expr] {
    expr.as_list().unwrap_or(&[])
}

// Everything after the head.
fn operands(expr: &Expr) -> &[Expr] {
    elements(expr).get(1..).unwrap_or(&[])
}

// (form params body...) => (form params analyzed-body...)
fn rewrite_function_form(expr: &Expr, depth: usize) -> Result<Expr, SchemeError> {
    let form = expr.head_symbol().unwrap_or(LAMBDA);
    let operands = operands(expr);
    check_form(form, operands, 2, None)?;

    let params = expr.cadr()?;
    if form == DEFINE {
        check_define_target(params, operands)?;
    } else {
        check_formals(form, params)?;
    }

    let body = expr.cddr()?;
    debug!(form, %params, "Rewriting function-definition body");
    let mut rewritten = vec![Expr::symbol(form), params.clone()];
    rewritten.extend(analyze_nested(elements(&body), depth)?);
    Ok(Expr::List(rewritten))
}

// (let ((n1 v1) (n2 v2)) body...) => ((lambda (n1 n2) body...) v1 v2)
fn rewrite_let(expr: &Expr, depth: usize) -> Result<Expr, SchemeError> {
    check_form(LET, operands(expr), 2, None)?;

    let bindings = binding_pairs(expr.cadr()?)?;
    let (names, values) = zip(&bindings);
    check_formals(LET, &Expr::List(names.clone()))?;

    let body = expr.cddr()?;
    let mut lambda = vec![Expr::symbol(LAMBDA), Expr::List(names)];
    lambda.extend(analyze_nested(elements(&body), depth)?);

    let mut application = vec![Expr::List(lambda)];
    application.extend(analyze_nested(&values, depth)?);
    debug!(bindings = bindings.len(), "Rewrote let into lambda application");
    Ok(Expr::List(application))
}

fn binding_pairs(bindings: &Expr) -> Result<Vec<(Expr, Expr)>, SchemeError> {
    let Some(items) = bindings.as_list() else {
        error!(%bindings, "let bindings are not a list");
        return Err(SchemeError::malformed(
            LET,
            format!("bad bindings list {}", bindings),
        ));
    };

    map(
        |binding: &Expr| match binding.as_list() {
            Some([name @ Expr::Symbol(_), value]) => Ok((name.clone(), value.clone())),
            _ => {
                error!(%binding, "let binding is not a (symbol expression) pair");
                Err(SchemeError::malformed(
                    LET,
                    format!("bad binding {}", binding),
                ))
            }
        },
        items,
    )
}

// Fails unless `operands` holds between `min` and `max` items.
fn check_form(
    form: &str,
    operands: &[Expr],
    min: usize,
    max: Option<usize>,
) -> Result<(), SchemeError> {
    let count = operands.len();
    if count < min {
        error!(form, count, min, "Too few operands");
        return Err(SchemeError::malformed(form, "too few operands in form"));
    }
    if let Some(max) = max {
        if count > max {
            error!(form, count, max, "Too many operands");
            return Err(SchemeError::malformed(form, "too many operands in form"));
        }
    }
    Ok(())
}

// Parameters must be a list of distinct symbols.
fn check_formals(form: &str, formals: &Expr) -> Result<(), SchemeError> {
    let Some(items) = formals.as_list() else {
        error!(form, %formals, "Parameters are not a list");
        return Err(SchemeError::malformed(
            form,
            format!("parameters must be a list, found {}", formals),
        ));
    };

    let mut seen = HashSet::new();
    for item in items {
        let Some(name) = item.as_symbol() else {
            error!(form, %item, "Parameter is not a symbol");
            return Err(SchemeError::malformed(
                form,
                format!("non-symbol parameter {}", item),
            ));
        };
        if !seen.insert(name) {
            error!(form, name, "Duplicate parameter");
            return Err(SchemeError::malformed(
                form,
                format!("duplicate parameter {}", name),
            ));
        }
    }
    Ok(())
}

// (define name value) or (define (name params...) body...)
fn check_define_target(target: &Expr, operands: &[Expr]) -> Result<(), SchemeError> {
    match target {
        Expr::Symbol(_) => check_form(DEFINE, operands, 2, Some(2)),
        Expr::List(items) if !items.is_empty() => check_formals(DEFINE, target),
        other => {
            error!(%other, "Definition target is neither a symbol nor a signature");
            Err(SchemeError::malformed(
                DEFINE,
                format!("non-symbol target {}", other),
            ))
        }
    }
}
