#![forbid(unsafe_code)]

//! Render-target side of a tree reconciler, backed by [`graft_nodes`].

mod adapter;
mod diff;
mod error;
mod priority;

pub use adapter::{
    IS_PRIMARY_RENDERER, NO_EVENT_TIMESTAMP, NO_TIMEOUT, ReconcilerAdapter, ReconcilerTarget,
    SUPPORTS_HYDRATION, SUPPORTS_MUTATION, SUPPORTS_PERSISTENCE,
};
pub use diff::{diff_props, same_value};
pub use error::ReconcileError;
pub use priority::{CONTINUOUS_EVENTS, DISCRETE_EVENTS, EventPriority};
