use graft_ids::NativeHandle;
use graft_variant::WireMap;

use super::{Kind, Node, NodeBehavior, NodeCx, NodeKind, Variant};
use crate::error::NodeError;
use crate::host::Host;
use crate::rect::DomRect;

/// `#name`: an override for something that already exists under the parent
/// it is attached to. Props wait until the attach resolves the name.
pub(crate) struct DeferredNode {
    name: String,
    buffer: WireMap,
    target: Option<Node>,
}

impl DeferredNode {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: WireMap::new(),
            target: None,
        }
    }

    pub(crate) fn from_kind(_host: &Host, kind: &Kind) -> Option<NodeKind> {
        let Kind::Name(name) = kind else {
            return None;
        };
        let name = name.strip_prefix('#')?;
        Some(DeferredNode::new(name).into())
    }

    fn unresolved(&self) -> NodeError {
        NodeError::Unresolved(format!("#{}", self.name))
    }
}

impl NodeBehavior for DeferredNode {
    fn variant(&self) -> Variant {
        Variant::Deferred
    }

    fn handle(&self) -> Option<NativeHandle> {
        self.target.as_ref()?.native_handle()
    }

    fn describe(&self, _host: &Host) -> String {
        format!("#{}", self.name)
    }

    fn set_props(&mut self, _cx: &NodeCx<'_>, props: &WireMap) -> Result<(), NodeError> {
        match &self.target {
            Some(target) => target.set_props(props),
            None => {
                self.buffer
                    .extend(props.iter().map(|(key, value)| (key.clone(), value.clone())));
                Ok(())
            }
        }
    }

    fn set_active(&mut self, _cx: &NodeCx<'_>, active: bool) -> Result<(), NodeError> {
        match &self.target {
            Some(target) => target.set_active(active),
            None => Err(self.unresolved()),
        }
    }

    /// Resolves the name under `parent` and flushes buffered props into
    /// the result. Detaching forgets both; the target itself is left alone.
    fn set_parent(
        &mut self,
        cx: &NodeCx<'_>,
        parent: Option<&Node>,
        _before: Option<&Node>,
    ) -> Result<(), NodeError> {
        let Some(parent) = parent else {
            self.buffer.clear();
            self.target = None;
            return Ok(());
        };
        let target = Node::search(cx.host, &self.name, Some(parent)).ok_or_else(|| {
            NodeError::NotFound {
                name: self.name.clone(),
                scope: parent.describe(),
            }
        })?;
        log::debug!("#{} resolved to {}", self.name, target.describe());
        let buffered = std::mem::take(&mut self.buffer);
        self.target = Some(target.clone());
        target.set_props(&buffered)
    }

    fn clear(&mut self, _cx: &NodeCx<'_>) -> Result<(), NodeError> {
        match &self.target {
            Some(target) => target.clear(),
            None => Ok(()),
        }
    }

    fn dispose(&mut self, _cx: &NodeCx<'_>) -> Result<(), NodeError> {
        self.buffer.clear();
        self.target = None;
        Ok(())
    }

    fn bounding_rect(&self, _cx: &NodeCx<'_>) -> Option<DomRect> {
        self.target.as_ref()?.bounding_rect()
    }
}
