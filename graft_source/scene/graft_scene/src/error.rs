use graft_ids::{NativeHandle, ObjectID};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("{0} is not alive")]
    DeadHandle(NativeHandle),

    #[error("cannot parent {child} under its own descendant {parent}")]
    Cycle {
        child: NativeHandle,
        parent: NativeHandle,
    },

    #[error("{child} is not a child of {parent}")]
    NotAChild { child: NativeHandle, parent: String },

    #[error("{0} components cannot be destroyed")]
    Indestructible(&'static str),

    #[error("unknown {kind} type \"{name}\"")]
    UnknownType { kind: &'static str, name: String },

    #[error("{0} has no UIDocument")]
    MissingUiRoot(ObjectID),
}

impl SceneError {
    pub(crate) fn dead(handle: impl Into<NativeHandle>) -> Self {
        SceneError::DeadHandle(handle.into())
    }
}
