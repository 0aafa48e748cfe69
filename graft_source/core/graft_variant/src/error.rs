use thiserror::Error;

/// Why a value could not be converted between wire and native form.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    #[error("cannot convert {found} to {expected}")]
    Mismatch { expected: String, found: String },

    #[error("{ty} expects {expected} components, got {found}")]
    Arity {
        ty: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("\"{name}\" is not a member of {ty}")]
    UnknownMember { ty: &'static str, name: String },

    #[error("{value} is out of range for {ty}")]
    OutOfRange { ty: String, value: String },

    #[error("cannot parse {input:?} as {expected}")]
    Parse { expected: String, input: String },

    #[error("no converter registered for {0}")]
    NoConverter(String),
}

impl ConversionError {
    pub(crate) fn mismatch(expected: impl ToString, found: impl ToString) -> Self {
        ConversionError::Mismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub(crate) fn parse(expected: impl ToString, input: &str) -> Self {
        ConversionError::Parse {
            expected: expected.to_string(),
            input: input.to_string(),
        }
    }
}
