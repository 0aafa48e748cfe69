use graft_variant::ConversionError;
use thiserror::Error;

/// Failure codes reported by [`PropertyAccessor`](crate::PropertyAccessor).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyErrorKind {
    NullContainer,
    InvalidContainerType,
    MissingPropertyBag,
    InvalidCast,
    InvalidPath,
    AccessViolation,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    #[error("container is null")]
    NullContainer,

    #[error("{ty} cannot be visited as {expected}")]
    InvalidContainerType {
        ty: &'static str,
        expected: &'static str,
    },

    #[error("no property bag registered for {0} or any of its base types")]
    MissingPropertyBag(&'static str),

    #[error("cannot assign {path}: {source}")]
    InvalidCast {
        path: String,
        #[source]
        source: ConversionError,
    },

    #[error("{path} does not resolve on {ty}")]
    InvalidPath { path: String, ty: &'static str },

    #[error("{path} is read-only")]
    AccessViolation { path: String },
}

impl PropertyError {
    pub fn kind(&self) -> PropertyErrorKind {
        match self {
            PropertyError::NullContainer => PropertyErrorKind::NullContainer,
            PropertyError::InvalidContainerType { .. } => PropertyErrorKind::InvalidContainerType,
            PropertyError::MissingPropertyBag(_) => PropertyErrorKind::MissingPropertyBag,
            PropertyError::InvalidCast { .. } => PropertyErrorKind::InvalidCast,
            PropertyError::InvalidPath { .. } => PropertyErrorKind::InvalidPath,
            PropertyError::AccessViolation { .. } => PropertyErrorKind::AccessViolation,
        }
    }
}
