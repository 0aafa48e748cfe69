use graft_ids::{ComponentID, NativeHandle};
use graft_scene::ComponentType;
use graft_variant::WireMap;

use super::{Kind, Node, NodeBehavior, NodeCx, NodeKind, Variant, container_object};
use crate::error::NodeError;
use crate::host::Host;
use crate::rect::DomRect;

enum State {
    /// Not on any object yet; props and activation wait here.
    Detached {
        buffer: WireMap,
        enabled: Option<bool>,
    },
    Attached(ComponentID),
}

/// A component owned by exactly one container. Resolves on first attach to
/// the target's existing component of its type, or a new one.
pub(crate) struct ComponentNode {
    ty: ComponentType,
    state: State,
}

impl ComponentNode {
    pub(crate) fn detached(ty: ComponentType) -> Self {
        Self {
            ty,
            state: State::Detached {
                buffer: WireMap::new(),
                enabled: None,
            },
        }
    }

    pub(crate) fn attached(ty: ComponentType, id: ComponentID) -> Self {
        Self {
            ty,
            state: State::Attached(id),
        }
    }

    /// Accepts registered component type names and types.
    pub(crate) fn from_kind(host: &Host, kind: &Kind) -> Option<NodeKind> {
        let name = match kind {
            Kind::Name(name) => name.as_str(),
            Kind::Type(ty) => ty.name,
            _ => return None,
        };
        let ty = host.world().component_type_named(name)?;
        Some(ComponentNode::detached(ty).into())
    }

    fn attach(&mut self, cx: &NodeCx<'_>, parent: &Node) -> Result<(), NodeError> {
        let Some(NativeHandle::Object(object)) = parent.native_handle() else {
            return Err(NodeError::InvalidParent {
                child: self.describe(cx.host),
                parent: parent.describe(),
            });
        };
        let id = cx.host.world_mut().get_or_add_component(object, self.ty)?;
        let handle = NativeHandle::Component(id);
        // a wrapper handed out earlier for this component stays the registered one
        cx.host
            .wrappers_mut()
            .get_or_insert_with(handle, || cx.this.clone());

        let State::Detached { buffer, enabled } = std::mem::replace(&mut self.state, State::Attached(id))
        else {
            return Ok(());
        };
        log::debug!("{} attached", cx.host.describe(handle));

        let flushed = cx.host.apply_props(handle, &buffer);
        if let Some(enabled) = enabled {
            self.enable(cx, id, enabled)?;
        }
        flushed
    }

    /// Destroys a destroyable component and returns to buffering; resets a
    /// non-destroyable one in place.
    fn detach(&mut self, cx: &NodeCx<'_>, id: ComponentID) -> Result<(), NodeError> {
        let handle = NativeHandle::Component(id);
        if !cx.host.world().contains(handle) {
            cx.host.wrappers_mut().release(handle, cx.this);
            self.state = State::Detached {
                buffer: WireMap::new(),
                enabled: None,
            };
            return Ok(());
        }
        if !self.ty.destroyable {
            cx.host.world_mut().reset_component(id)?;
            log::debug!("{} reset", cx.host.describe(handle));
            return Ok(());
        }
        cx.host.world_mut().destroy_component(id)?;
        cx.host.wrappers_mut().release(handle, cx.this);
        self.state = State::Detached {
            buffer: WireMap::new(),
            enabled: None,
        };
        log::debug!("{} component destroyed", self.ty.name());
        Ok(())
    }

    fn enable(&self, cx: &NodeCx<'_>, id: ComponentID, enabled: bool) -> Result<(), NodeError> {
        let supported = cx.host.world_mut().set_component_enabled(id, enabled)?;
        if supported {
            Ok(())
        } else {
            Err(NodeError::Unsupported {
                op: "setActive",
                target: cx.host.describe(NativeHandle::Component(id)),
            })
        }
    }
}

impl NodeBehavior for ComponentNode {
    fn variant(&self) -> Variant {
        Variant::Component
    }

    fn handle(&self) -> Option<NativeHandle> {
        match self.state {
            State::Attached(id) => Some(NativeHandle::Component(id)),
            State::Detached { .. } => None,
        }
    }

    fn describe(&self, host: &Host) -> String {
        match self.state {
            State::Attached(id) => host.describe(NativeHandle::Component(id)),
            State::Detached { .. } => format!("{} (detached)", self.ty.name()),
        }
    }

    fn set_props(&mut self, cx: &NodeCx<'_>, props: &WireMap) -> Result<(), NodeError> {
        match &mut self.state {
            State::Detached { buffer, .. } => {
                buffer.extend(props.iter().map(|(key, value)| (key.clone(), value.clone())));
                Ok(())
            }
            State::Attached(id) => cx.host.apply_props(NativeHandle::Component(*id), props),
        }
    }

    fn set_active(&mut self, cx: &NodeCx<'_>, active: bool) -> Result<(), NodeError> {
        match &mut self.state {
            State::Detached { enabled, .. } => {
                *enabled = Some(active);
                Ok(())
            }
            State::Attached(id) => {
                let id = *id;
                self.enable(cx, id, active)
            }
        }
    }

    fn set_parent(
        &mut self,
        cx: &NodeCx<'_>,
        parent: Option<&Node>,
        _before: Option<&Node>,
    ) -> Result<(), NodeError> {
        match (parent, &mut self.state) {
            (None, State::Detached { buffer, enabled }) => {
                buffer.clear();
                *enabled = None;
                Ok(())
            }
            (None, State::Attached(id)) => {
                let id = *id;
                self.detach(cx, id)
            }
            (Some(parent), State::Detached { .. }) => self.attach(cx, parent),
            (Some(parent), State::Attached(id)) => {
                let id = *id;
                let owner = cx.host.world().component_owner(id);
                let target = container_object(cx.host, parent);
                if owner.is_some() && owner == target {
                    return Ok(());
                }
                Err(NodeError::AttachmentChange {
                    component: cx.host.describe(NativeHandle::Component(id)),
                    from: owner.map_or_else(|| "nothing".to_string(), |o| cx.host.describe(o.into())),
                    to: parent.describe(),
                })
            }
        }
    }

    fn clear(&mut self, _cx: &NodeCx<'_>) -> Result<(), NodeError> {
        Ok(())
    }

    fn dispose(&mut self, cx: &NodeCx<'_>) -> Result<(), NodeError> {
        match self.state {
            State::Attached(id) => {
                self.detach(cx, id)?;
                cx.host
                    .wrappers_mut()
                    .release(NativeHandle::Component(id), cx.this);
                Ok(())
            }
            State::Detached { .. } => {
                self.state = State::Detached {
                    buffer: WireMap::new(),
                    enabled: None,
                };
                Ok(())
            }
        }
    }

    fn bounding_rect(&self, _cx: &NodeCx<'_>) -> Option<DomRect> {
        None
    }
}
