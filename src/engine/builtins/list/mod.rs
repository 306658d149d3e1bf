//! Structural list utilities shared by the change enumerator and the rewriter.

use crate::engine::ast::Expr;
use crate::engine::error::SchemeError;
use tracing::{error, trace};

/// Applies `transform` to every item in order. The first failure is returned.
pub fn map<T, U, E, F>(mut transform: F, items: &[T]) -> Result<Vec<U>, E>
where
    F: FnMut(&T) -> Result<U, E>,
{
    let mut mapped = Vec::with_capacity(items.len());
    for item in items {
        mapped.push(transform(item)?);
    }
    Ok(mapped)
}

/// Prepends `value` to every sequence in `sequences`, keeping their order.
pub fn cons_all<T: Clone>(value: T, sequences: &[Vec<T>]) -> Vec<Vec<T>> {
    sequences
        .iter()
        .map(|sequence| {
            let mut consed = Vec::with_capacity(sequence.len() + 1);
            consed.push(value.clone());
            consed.extend_from_slice(sequence);
            consed
        })
        .collect()
}

/// Splits a sequence of pairs into its first and second components.
pub fn zip<A: Clone, B: Clone>(pairs: &[(A, B)]) -> (Vec<A>, Vec<B>) {
    let mut firsts = Vec::with_capacity(pairs.len());
    let mut seconds = Vec::with_capacity(pairs.len());
    for (first, second) in pairs {
        firsts.push(first.clone());
        seconds.push(second.clone());
    }
    (firsts, seconds)
}

/// Pairs every item with its position, starting at 0.
pub fn enumerate<T: Clone>(items: &[T]) -> Vec<(usize, T)> {
    connect(0, items, Vec::with_capacity(items.len()))
}

// Walks the list carrying the next index.
fn connect<T: Clone>(
    mut index: usize,
    mut rest: &[T],
    mut acc: Vec<(usize, T)>,
) -> Vec<(usize, T)> {
    while let Some((head, tail)) = rest.split_first() {
        acc.push((index, head.clone()));
        index += 1;
        rest = tail;
    }
    acc
}

/// Enumerates a list datum into `((0 a) (1 b) ...)`.
pub fn enumerate_expr(list: &Expr) -> Result<Expr, SchemeError> {
    trace!(%list, "Enumerating list datum");
    let items = match list {
        Expr::List(items) => items,
        other => {
            error!(found = %other, "enumerate expects a list");
            return Err(SchemeError::TypeError {
                expected: "List".to_string(),
                found: other.type_name().to_string(),
            });
        }
    };

    let pairs = enumerate(items)
        .into_iter()
        .map(|(index, item)| Expr::List(vec![Expr::Integer(index as i64), item]))
        .collect();
    Ok(Expr::List(pairs))
}
