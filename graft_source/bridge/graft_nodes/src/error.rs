use std::sync::Arc;

use graft_properties::PropertyError;
use graft_scene::SceneError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error(transparent)]
    Property(#[from] PropertyError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Props(#[from] SetPropsError),

    #[error("{target} does not support {op}")]
    Unsupported { op: &'static str, target: String },

    #[error("{parent} cannot parent {child}")]
    InvalidParent { child: String, parent: String },

    #[error("Cannot change attachment of {component} from {from} to {to}")]
    AttachmentChange {
        component: String,
        from: String,
        to: String,
    },

    #[error("{name} not found in {scope}")]
    NotFound { name: String, scope: String },

    #[error("{0} is not attached to a native object yet")]
    Unresolved(String),

    #[error("{0} has been disposed")]
    Disposed(String),

    #[error("{key} expects an event handler, got {found}")]
    InvalidHandler { key: String, found: &'static str },
}

/// One rejected entry of a prop batch.
#[derive(Debug, Clone, PartialEq)]
pub struct PropFailure {
    pub key: Arc<str>,
    pub error: NodeError,
}

/// Every entry of a batch that could not be applied. The other entries of
/// the batch were applied.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} prop(s) failed on {target}: {}", .failures.len(), summary(.failures))]
pub struct SetPropsError {
    pub target: String,
    pub failures: Vec<PropFailure>,
}

impl SetPropsError {
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.failures.iter().map(|failure| &*failure.key)
    }

    pub fn get(&self, key: &str) -> Option<&NodeError> {
        self.failures
            .iter()
            .find(|failure| &*failure.key == key)
            .map(|failure| &failure.error)
    }
}

fn summary(failures: &[PropFailure]) -> String {
    failures
        .iter()
        .map(|failure| format!("{}: {}", failure.key, failure.error))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
