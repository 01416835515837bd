use thiserror::Error;

/// Why an expression could not be parsed or evaluated.
///
/// Positions are byte offsets into the expression text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("empty expression")]
    Empty,

    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedChar { ch: char, position: usize },

    #[error("invalid number '{text}' at position {position}")]
    InvalidNumber { text: String, position: usize },

    #[error("unexpected '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("bracket opened at position {open} is closed by '{found}' at position {position}")]
    MismatchedBracket {
        open: usize,
        found: char,
        position: usize,
    },

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("function '{function}' expects {expected} argument(s), got {found}")]
    Arity {
        function: &'static str,
        expected: &'static str,
        found: usize,
    },

    #[error("unknown variable or constant '{0}'")]
    UnknownIdentifier(String),

    #[error("expression nests or chains more than {limit} levels")]
    TooDeep { limit: usize },
}
