use crate::engine::error::SchemeError;
use std::fmt;

/// Deepest list nesting the reader and the rewriter accept.
pub const MAX_NESTING: usize = 128;

/// A symbolic value, read as either data or code.
///
/// The empty list doubles as the empty-marker atom: the reader maps both `()`
/// and `nil` onto `Expr::List(vec![])`. A non-empty list is a combination.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Symbol(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    List(Vec<Expr>),
}

impl Expr {
    pub fn symbol(name: impl Into<String>) -> Self {
        Expr::Symbol(name.into())
    }

    /// The empty-marker, `()`.
    pub fn nil() -> Self {
        Expr::List(Vec::new())
    }

    /// Everything except a non-empty list is an atom.
    pub fn is_atom(&self) -> bool {
        match self {
            Expr::List(items) => items.is_empty(),
            _ => true,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Expr::Symbol(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Expr]> {
        match self {
            Expr::List(items) => Some(items),
            _ => None,
        }
    }

    /// The head symbol of a combination, if it has one.
    pub fn head_symbol(&self) -> Option<&str> {
        match self {
            Expr::List(items) => items.first().and_then(Expr::as_symbol),
            _ => None,
        }
    }

    /// Short name of the variant, used in type errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Expr::Symbol(_) => "Symbol",
            Expr::Integer(_) => "Integer",
            Expr::Float(_) => "Float",
            Expr::Bool(_) => "Bool",
            Expr::List(items) if items.is_empty() => "Nil",
            Expr::List(_) => "List",
        }
    }

    fn pair_items(&self, accessor: &str) -> Result<&[Expr], SchemeError> {
        match self {
            Expr::List(items) if !items.is_empty() => Ok(items),
            other => Err(SchemeError::NotAPair(format!(
                "{} of {}",
                accessor, other
            ))),
        }
    }

    fn nth(&self, accessor: &str, index: usize) -> Result<&Expr, SchemeError> {
        self.pair_items(accessor)?
            .get(index)
            .ok_or_else(|| SchemeError::NotAPair(format!("{} of {}", accessor, self)))
    }

    fn tail_from(&self, accessor: &str, index: usize) -> Result<Expr, SchemeError> {
        let items = self.pair_items(accessor)?;
        if items.len() < index {
            return Err(SchemeError::NotAPair(format!("{} of {}", accessor, self)));
        }
        Ok(Expr::List(items[index..].to_vec()))
    }

    pub fn car(&self) -> Result<&Expr, SchemeError> {
        self.nth("car", 0)
    }

    pub fn cdr(&self) -> Result<Expr, SchemeError> {
        self.tail_from("cdr", 1)
    }

    pub fn cadr(&self) -> Result<&Expr, SchemeError> {
        self.nth("cadr", 1)
    }

    pub fn cddr(&self) -> Result<Expr, SchemeError> {
        self.tail_from("cddr", 2)
    }

    pub fn caddr(&self) -> Result<&Expr, SchemeError> {
        self.nth("caddr", 2)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Symbol(name) => write!(f, "{}", name),
            Expr::Integer(n) => write!(f, "{}", n),
            // Debug keeps the fractional part so the output reads back as a float.
            Expr::Float(n) => write!(f, "{:?}", n),
            Expr::Bool(true) => write!(f, "#t"),
            Expr::Bool(false) => write!(f, "#f"),
            Expr::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::Integer(n)
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Bool(b)
    }
}

impl From<&str> for Expr {
    fn from(name: &str) -> Self {
        Expr::Symbol(name.to_string())
    }
}

impl From<Vec<Expr>> for Expr {
    fn from(items: Vec<Expr>) -> Self {
        Expr::List(items)
    }
}
