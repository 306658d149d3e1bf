use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, multispace1, not_line_ending, one_of, satisfy},
    combinator::{all_consuming, eof, map_res, opt, peek, recognize, value},
    error::{Error, ErrorKind},
    multi::many0,
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded, terminated},
};
use tracing::{error, instrument, trace};

use crate::engine::ast::{Expr, MAX_NESTING};
use crate::engine::error::SchemeError;
use crate::engine::special_forms::QUOTE;

// Consumes any run of whitespace and `;` line comments, possibly empty.
fn skip(input: &str) -> IResult<&str, &str> {
    recognize(many0(alt((
        multispace1,
        recognize(preceded(char(';'), not_line_ending)),
    ))))
    .parse(input)
}

// Succeeds without consuming when the next character ends an atom.
fn delimiter(input: &str) -> IResult<&str, ()> {
    peek(value(
        (),
        alt((multispace1, tag("("), tag(")"), tag(";"), tag("'"), eof)),
    ))
    .parse(input)
}

// A digit run followed by `.` or an exponent is left for the float parser. A
// complete integer token that does not fit in an i64 is a hard failure rather
// than a float.
#[instrument(level = "trace", skip(input), fields(input = %input))]
fn parse_integer_raw(input: &str) -> IResult<&str, Expr> {
    trace!("Attempting to parse raw integer token");
    let (rest, token) =
        terminated(recognize(pair(opt(one_of("+-")), digit1)), delimiter).parse(input)?;
    match token.parse::<i64>() {
        Ok(n) => Ok((rest, Expr::Integer(n))),
        Err(e) => {
            error!(%token, error = %e, "Integer literal out of range");
            Err(nom::Err::Failure(Error::new(input, ErrorKind::MapRes)))
        }
    }
}

#[instrument(level = "trace", skip(input), fields(input = %input))]
fn parse_float_raw(input: &str) -> IResult<&str, Expr> {
    trace!("Attempting to parse raw float token");
    map_res(recognize_float, |s: &str| s.parse::<f64>())
        .map(Expr::Float)
        .parse(input)
}

#[instrument(level = "trace", skip(input), fields(input = %input))]
fn parse_bool_raw(input: &str) -> IResult<&str, Expr> {
    trace!("Attempting to parse raw boolean token");
    alt((
        value(true, tag("#t")),
        value(false, tag("#f")),
        value(true, tag("true")),
        value(false, tag("false")),
    ))
    .map(Expr::Bool)
    .parse(input)
}

// `nil` reads as the empty list.
#[instrument(level = "trace", skip(input), fields(input = %input))]
fn parse_nil_raw(input: &str) -> IResult<&str, Expr> {
    trace!("Attempting to parse raw 'nil' literal token");
    tag("nil").map(|_| Expr::nil()).parse(input)
}

#[instrument(level = "trace", skip(input), fields(input = %input))]
fn parse_symbol_raw(input: &str) -> IResult<&str, Expr> {
    trace!("Attempting to parse symbol");

    let initial_char = satisfy(|c: char| c.is_alphabetic() || "!$%&*/:<=>?@^_~+-".contains(c));
    let subsequent_char =
        satisfy(|c: char| c.is_alphanumeric() || "!$%&*/:<=>?@^_~+-.#".contains(c));

    recognize(pair(initial_char, many0(subsequent_char)))
        .map(|s: &str| Expr::Symbol(s.to_string()))
        .parse(input)
}

// Every atom must be followed by a delimiter, so `123abc` is not read as `123`.
fn atom_raw(input: &str) -> IResult<&str, Expr> {
    alt((
        parse_integer_raw,
        terminated(parse_float_raw, delimiter),
        terminated(parse_bool_raw, delimiter),
        terminated(parse_nil_raw, delimiter),
        terminated(parse_symbol_raw, delimiter),
    ))
    .parse(input)
}

// Fails hard once a list would open at `depth` or deeper than the limit.
fn check_depth(input: &str, depth: usize) -> IResult<&str, ()> {
    if depth >= MAX_NESTING {
        error!(depth, "List nested too deeply");
        return Err(nom::Err::Failure(Error::new(input, ErrorKind::TooLarge)));
    }
    Ok((input, ()))
}

#[instrument(level = "trace", skip(input), fields(input = %input))]
fn list_raw(input: &str, depth: usize) -> IResult<&str, Expr> {
    trace!("Attempting to parse raw list token");
    let (input, _) = char('(').parse(input)?;
    let (input, _) = check_depth(input, depth)?;
    terminated(
        many0(preceded(skip, |i| datum_raw(i, depth + 1))),
        preceded(skip, char(')')),
    )
    .map(Expr::List)
    .parse(input)
}

// 'x reads as (quote x).
#[instrument(level = "trace", skip(input), fields(input = %input))]
fn quoted_raw(input: &str, depth: usize) -> IResult<&str, Expr> {
    trace!("Attempting to parse quote shorthand");
    let (input, _) = terminated(char('\''), skip).parse(input)?;
    let (input, _) = check_depth(input, depth)?;
    let (input, quoted) = datum_raw(input, depth + 1)?;
    Ok((input, Expr::List(vec![Expr::symbol(QUOTE), quoted])))
}

fn datum_raw(input: &str, depth: usize) -> IResult<&str, Expr> {
    alt((
        |i| list_raw(i, depth),
        |i| quoted_raw(i, depth),
        atom_raw,
    ))
    .parse(input)
}

// A datum at the top level.
fn datum(input: &str) -> IResult<&str, Expr> {
    datum_raw(input, 0)
}

/// Parses a single datum, consuming surrounding whitespace and comments.
#[instrument(level = "trace", skip(input), fields(input = %input))]
pub fn parse_expr(input: &str) -> IResult<&str, Expr> {
    trace!("Attempting to parse expression (with surrounding whitespace handling)");
    delimited(skip, datum, skip).parse(input)
}

/// Reads every datum in `source`. Trailing input that is not a datum is an error.
#[instrument(level = "debug", skip(source), err)]
pub fn parse_program(source: &str) -> Result<Vec<Expr>, SchemeError> {
    let result = all_consuming(terminated(many0(preceded(skip, datum)), skip)).parse(source);
    match result {
        Ok((_, exprs)) => {
            trace!(count = exprs.len(), "Parsed program");
            Ok(exprs)
        }
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::TooLarge => {
            Err(SchemeError::NestingTooDeep(MAX_NESTING))
        }
        Err(nom::Err::Failure(e)) if e.code == ErrorKind::MapRes => {
            let offset = source.len() - e.input.len();
            Err(SchemeError::Parse(format!(
                "integer literal out of range at offset {}",
                offset
            )))
        }
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            let offset = source.len() - e.input.len();
            let snippet: String = e.input.chars().take(20).collect();
            error!(offset, %snippet, "Unreadable input");
            Err(SchemeError::Parse(format!(
                "unexpected input at offset {}: {:?}",
                offset, snippet
            )))
        }
        Err(nom::Err::Incomplete(_)) => {
            error!("Input ended before a datum was complete");
            Err(SchemeError::Parse("incomplete input".to_string()))
        }
    }
}

/// Reads exactly one datum from `source`.
pub fn parse_single(source: &str) -> Result<Expr, SchemeError> {
    let mut exprs = parse_program(source)?;
    match exprs.len() {
        1 => Ok(exprs.remove(0)),
        n => {
            error!(count = n, "Expected exactly one datum");
            Err(SchemeError::Parse(format!(
                "expected exactly one datum, found {}",
                n
            )))
        }
    }
}
