// This module is only compiled when running tests
#![cfg(test)]

use crate::engine::ast::Expr;
use crate::engine::parser::parse_single;
use crate::engine::special_forms::{LAMBDA, LET, QUOTE};
use std::collections::HashMap;
use std::rc::Rc;

/// Reads one datum, panicking on malformed test input.
pub fn read(source: &str) -> Expr {
    parse_single(source)
        .unwrap_or_else(|e| panic!("Test parse error for code '{}': {}", source, e))
}

/// Evaluates `expr` with a tiny evaluator that knows integers, booleans,
/// `quote`, `if`, `lambda`, `let`, and the primitives `+ - * < =`.
///
/// It exists only to check that rewritten expressions compute the same
/// values as the originals.
pub fn eval_for_test(expr: &Expr) -> Result<Expr, String> {
    let globals = Rc::new(Frame {
        bindings: ["+", "-", "*", "<", "="]
            .into_iter()
            .map(|name| (name.to_string(), Value::Primitive(name)))
            .collect(),
        parent: None,
    });
    match eval(expr, &globals)? {
        Value::Datum(datum) => Ok(datum),
        _ => Err("result is a procedure".to_string()),
    }
}

#[derive(Clone)]
enum Value {
    Datum(Expr),
    Primitive(&'static str),
    Closure(Rc<Closure>),
}

struct Closure {
    params: Vec<String>,
    body: Vec<Expr>,
    env: Rc<Frame>,
}

struct Frame {
    bindings: HashMap<String, Value>,
    parent: Option<Rc<Frame>>,
}

impl Frame {
    fn lookup(&self, name: &str) -> Result<Value, String> {
        match (self.bindings.get(name), &self.parent) {
            (Some(value), _) => Ok(value.clone()),
            (None, Some(parent)) => parent.lookup(name),
            (None, None) => Err(format!("unknown identifier: {}", name)),
        }
    }
}

fn eval(expr: &Expr, env: &Rc<Frame>) -> Result<Value, String> {
    let items = match expr {
        Expr::Symbol(name) => return env.lookup(name),
        Expr::List(items) if !items.is_empty() => items,
        atom => return Ok(Value::Datum(atom.clone())),
    };

    match expr.head_symbol() {
        Some(QUOTE) => Ok(Value::Datum(items[1].clone())),
        Some("if") => match eval(&items[1], env)? {
            Value::Datum(Expr::Bool(false)) => match items.get(3) {
                Some(alternative) => eval(alternative, env),
                None => Ok(Value::Datum(Expr::nil())),
            },
            _ => eval(&items[2], env),
        },
        Some(LAMBDA) => {
            let params = items[1]
                .as_list()
                .ok_or("bad parameters")?
                .iter()
                .map(|p| p.as_symbol().map(str::to_string).ok_or("bad parameter"))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Closure(Rc::new(Closure {
                params,
                body: items[2..].to_vec(),
                env: Rc::clone(env),
            })))
        }
        Some(LET) => {
            let mut bindings = HashMap::new();
            for binding in items[1].as_list().ok_or("bad bindings")? {
                let name = binding.car().map_err(|e| e.to_string())?;
                let value = eval(binding.cadr().map_err(|e| e.to_string())?, env)?;
                bindings.insert(name.to_string(), value);
            }
            let frame = Rc::new(Frame {
                bindings,
                parent: Some(Rc::clone(env)),
            });
            eval_body(&items[2..], &frame)
        }
        _ => {
            let procedure = eval(&items[0], env)?;
            let args = items[1..]
                .iter()
                .map(|arg| eval(arg, env))
                .collect::<Result<Vec<_>, _>>()?;
            apply(procedure, args)
        }
    }
}

fn eval_body(body: &[Expr], env: &Rc<Frame>) -> Result<Value, String> {
    let mut result = Value::Datum(Expr::nil());
    for expr in body {
        result = eval(expr, env)?;
    }
    Ok(result)
}

fn apply(procedure: Value, args: Vec<Value>) -> Result<Value, String> {
    match procedure {
        Value::Primitive(name) => {
            let numbers = args
                .iter()
                .map(|arg| match arg {
                    Value::Datum(Expr::Integer(n)) => Ok(*n),
                    _ => Err(format!("{} expects integers", name)),
                })
                .collect::<Result<Vec<i64>, _>>()?;
            let result = match (name, numbers.as_slice()) {
                ("+", ns) => Expr::Integer(ns.iter().sum()),
                ("*", ns) => Expr::Integer(ns.iter().product()),
                ("-", [n]) => Expr::Integer(-n),
                ("-", [first, rest @ ..]) => Expr::Integer(first - rest.iter().sum::<i64>()),
                ("<", [a, b]) => Expr::Bool(a < b),
                ("=", [a, b]) => Expr::Bool(a == b),
                _ => return Err(format!("bad call to {}", name)),
            };
            Ok(Value::Datum(result))
        }
        Value::Closure(closure) => {
            if closure.params.len() != args.len() {
                return Err("arity mismatch".to_string());
            }
            let frame = Rc::new(Frame {
                bindings: closure.params.iter().cloned().zip(args).collect(),
                parent: Some(Rc::clone(&closure.env)),
            });
            eval_body(&closure.body, &frame)
        }
        Value::Datum(datum) => Err(format!("cannot call: {}", datum)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluator_handles_closures_and_let() {
        assert_eq!(
            eval_for_test(&read("(let ((x 2) (y 3)) (* x y))")),
            Ok(Expr::Integer(6))
        );
        assert_eq!(
            eval_for_test(&read("((lambda (f) (f 4)) (lambda (n) (- n 1)))")),
            Ok(Expr::Integer(3))
        );
        assert_eq!(
            eval_for_test(&read("(if (< 1 2) 'yes 'no)")),
            Ok(Expr::symbol("yes"))
        );
    }

    #[test]
    fn evaluator_reports_errors() {
        assert!(eval_for_test(&read("undefined-name")).is_err());
        assert!(eval_for_test(&read("(1 2)")).is_err());
        assert!(eval_for_test(&read("(lambda (x) x)")).is_err());
    }
}
