use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemeError {
    #[error("Not a pair: {0}")]
    NotAPair(String),
    #[error("Type error: expected {expected}, found {found}")]
    TypeError { expected: String, found: String },
    #[error("Malformed '{form}' form: {message}")]
    MalformedForm { form: String, message: String },
    #[error("Precondition violated: denominations must be positive, got {0}")]
    InvalidDenomination(i64),
    #[error("Precondition violated: total must be non-negative, got {0}")]
    NegativeTotal(i64),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Nesting exceeds {0} levels")]
    NestingTooDeep(usize),
}

impl SchemeError {
    pub(crate) fn malformed(form: &str, message: impl Into<String>) -> Self {
        SchemeError::MalformedForm {
            form: form.to_string(),
            message: message.into(),
        }
    }
}
