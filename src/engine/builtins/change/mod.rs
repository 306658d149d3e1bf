//! Change-making: every way to reach a total from a sequence of denominations.

use crate::engine::ast::Expr;
use crate::engine::error::SchemeError;
use tracing::{debug, error, instrument, trace};

/// Lists every combination of `denoms` that sums to `total`.
///
/// Denominations are consumed from the front. Each branch either uses the
/// first denomination once more or drops it for good, so every combination
/// appears exactly once and lists its denominations in the order they were
/// offered. A total of 0 yields no combinations.
///
/// # Errors
/// `NegativeTotal` if `total < 0`, `InvalidDenomination` if any denomination
/// is zero or negative.
#[instrument(level = "debug", skip(denoms), fields(denoms = ?denoms), err)]
pub fn list_change(total: i64, denoms: &[i64]) -> Result<Vec<Vec<i64>>, SchemeError> {
    if total < 0 {
        error!(total, "Total must be non-negative");
        return Err(SchemeError::NegativeTotal(total));
    }
    if let Some(&bad) = denoms.iter().find(|&&d| d <= 0) {
        error!(denomination = bad, "Denominations must be positive");
        return Err(SchemeError::InvalidDenomination(bad));
    }
    if total == 0 {
        return Ok(Vec::new());
    }

    let ways = change(total, denoms);
    debug!(count = ways.len(), "Enumerated change combinations");
    Ok(ways)
}

// One denomination on the search path: how much was left before it and how
// many copies of it the current combination holds.
struct Choice {
    index: usize,
    remaining: i64,
    uses: usize,
}

// Walks the search tree with an explicit stack so the depth of the walk is
// bounded by the number of denominations, not by the number of coins. Copies
// of each denomination are tried from the most that fit down to none, which
// yields the same order as peeling off one coin at a time.
fn change(total: i64, denoms: &[i64]) -> Vec<Vec<i64>> {
    let mut ways = Vec::new();
    let mut path: Vec<i64> = Vec::new();
    let mut choices: Vec<Choice> = Vec::new();
    let mut remaining = total;
    let mut index = 0;

    loop {
        if remaining == 0 {
            trace!(combination = ?path, "Found combination");
            ways.push(path.clone());
        } else if let Some(&denom) = denoms.get(index) {
            let uses = (remaining / denom) as usize;
            path.extend(std::iter::repeat_n(denom, uses));
            choices.push(Choice {
                index,
                remaining,
                uses,
            });
            remaining -= denom * uses as i64;
            index += 1;
            continue;
        }

        // Backtrack to the deepest denomination that can give up a copy.
        loop {
            let Some(choice) = choices.last_mut() else {
                return ways;
            };
            if choice.uses == 0 {
                choices.pop();
                continue;
            }
            choice.uses -= 1;
            path.pop();
            remaining = choice.remaining - denoms[choice.index] * choice.uses as i64;
            index = choice.index + 1;
            break;
        }
    }
}

/// Converts one combination into a list datum, e.g. `(3 1 1)`.
pub fn combination_to_expr(way: &[i64]) -> Expr {
    Expr::List(way.iter().copied().map(Expr::Integer).collect())
}
