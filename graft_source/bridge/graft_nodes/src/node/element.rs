use graft_ids::{ElementID, NativeHandle};
use graft_scene::{Asset, EventKind, SceneError, SubscriptionId};
use graft_variant::{External, WireMap, WireValue};
use smallvec::SmallVec;

use super::{Kind, Node, NodeBehavior, NodeCx, NodeKind, Variant};
use crate::error::{NodeError, PropFailure};
use crate::event::{Handler, event_kind_for_prop, route};
use crate::host::Host;
use crate::rect::DomRect;

struct HandlerSlot {
    kind: EventKind,
    /// The external the handler arrived in; compared by identity.
    handler: External,
    subscription: SubscriptionId,
}

/// A retained-mode UI element. Event props (`onClick`, ...) become native
/// subscriptions; everything else goes through the property accessor.
pub(crate) struct ElementNode {
    element: ElementID,
    handlers: SmallVec<[HandlerSlot; 2]>,
}

impl ElementNode {
    pub(crate) fn new(element: ElementID) -> Self {
        Self {
            element,
            handlers: SmallVec::new(),
        }
    }

    /// Accepts registered element type names and types, and visual tree
    /// assets (cloned).
    pub(crate) fn from_kind(host: &Host, kind: &Kind) -> Option<NodeKind> {
        let element = match kind {
            Kind::Asset(Asset::VisualTree(template)) => {
                let cloned = host.world_mut().instantiate_tree(*template);
                match cloned {
                    Ok(id) => id,
                    Err(err) => {
                        log::warn!("cannot instantiate {kind}: {err}");
                        return None;
                    }
                }
            }
            Kind::Name(name) => {
                let ty = host.world().element_type_named(name)?;
                host.world_mut().create_element_of(ty)
            }
            Kind::Type(info) => {
                let ty = host.world().element_type_named(info.name)?;
                host.world_mut().create_element_of(ty)
            }
            _ => return None,
        };
        Some(ElementNode::new(element).into())
    }

    #[inline]
    fn native(&self) -> NativeHandle {
        NativeHandle::Element(self.element)
    }

    fn set_handler(
        &mut self,
        host: &Host,
        key: &str,
        kind: EventKind,
        value: &WireValue,
    ) -> Result<(), NodeError> {
        let position = self.handlers.iter().position(|slot| slot.kind == kind);

        if value.is_nullish() {
            if let Some(index) = position {
                let slot = self.handlers.remove(index);
                host.world_mut().unsubscribe(self.element, kind, slot.subscription);
                log::trace!("{key} removed from {}", host.describe(self.native()));
            }
            return Ok(());
        }

        let invalid = || NodeError::InvalidHandler {
            key: key.to_string(),
            found: value.kind_name(),
        };
        let external = value.as_external().ok_or_else(invalid)?;
        let handler = external.downcast_ref::<Handler>().cloned().ok_or_else(invalid)?;

        if let Some(index) = position {
            if self.handlers[index].handler.ptr_eq(external) {
                return Ok(());
            }
            let old = self.handlers.remove(index);
            host.world_mut().unsubscribe(self.element, kind, old.subscription);
        }
        let subscription = host
            .world_mut()
            .subscribe(self.element, kind, route(host.downgrade(), handler))?;
        self.handlers.push(HandlerSlot {
            kind,
            handler: external.clone(),
            subscription,
        });
        log::trace!("{key} installed on {}", host.describe(self.native()));
        Ok(())
    }

    /// The element `parent` hosts children under: itself, or the UI root of
    /// a container (or of a component's owner).
    fn parent_element(&self, cx: &NodeCx<'_>, parent: &Node) -> Result<ElementID, NodeError> {
        let invalid = || NodeError::InvalidParent {
            child: self.describe(cx.host),
            parent: parent.describe(),
        };
        let object = match parent.native_handle().ok_or_else(invalid)? {
            NativeHandle::Element(id) => return Ok(id),
            NativeHandle::Object(object) => object,
            NativeHandle::Component(component) => {
                let owner = cx.host.world().component_owner(component);
                owner.ok_or_else(invalid)?
            }
        };
        let root = cx.host.world_mut().ui_root(object)?;
        Ok(root)
    }
}

impl NodeBehavior for ElementNode {
    fn variant(&self) -> Variant {
        Variant::Element
    }

    fn handle(&self) -> Option<NativeHandle> {
        Some(self.native())
    }

    fn describe(&self, host: &Host) -> String {
        host.describe(self.native())
    }

    fn set_props(&mut self, cx: &NodeCx<'_>, props: &WireMap) -> Result<(), NodeError> {
        let handle = self.native();
        let mut failures = Vec::new();
        for (key, value) in props {
            match event_kind_for_prop(key) {
                Some(kind) => {
                    if let Err(error) = self.set_handler(cx.host, key, kind, value) {
                        failures.push(PropFailure {
                            key: key.clone(),
                            error,
                        });
                    }
                }
                None => cx.host.apply_prop(handle, key, value, &mut failures),
            }
        }
        cx.host.props_result(handle, failures)
    }

    fn set_active(&mut self, cx: &NodeCx<'_>, active: bool) -> Result<(), NodeError> {
        let mut world = cx.host.world_mut();
        let element = world
            .element_mut(self.element)
            .ok_or(SceneError::DeadHandle(self.native()))?;
        element.core_mut().visible = active;
        Ok(())
    }

    fn set_parent(
        &mut self,
        cx: &NodeCx<'_>,
        parent: Option<&Node>,
        before: Option<&Node>,
    ) -> Result<(), NodeError> {
        let Some(parent) = parent else {
            let mut world = cx.host.world_mut();
            if let Some(old) = world.element_parent(self.element) {
                world.remove_element(old, self.element)?;
            }
            return Ok(());
        };
        let target = self.parent_element(cx, parent)?;

        let index = match before {
            None => None,
            Some(node) => {
                let Some(NativeHandle::Element(sibling)) = node.native_handle() else {
                    return Err(NodeError::InvalidParent {
                        child: node.describe(),
                        parent: parent.describe(),
                    });
                };
                let index = cx.host.world().index_of(target, sibling);
                let index = index.ok_or_else(|| SceneError::NotAChild {
                    child: sibling.into(),
                    parent: cx.host.describe(target.into()),
                })?;
                Some(index)
            }
        };
        cx.host.world_mut().insert_element(target, self.element, index)?;
        Ok(())
    }

    fn clear(&mut self, cx: &NodeCx<'_>) -> Result<(), NodeError> {
        cx.host.world_mut().clear_element(self.element)?;
        Ok(())
    }

    fn dispose(&mut self, cx: &NodeCx<'_>) -> Result<(), NodeError> {
        let handle = self.native();
        {
            let mut world = cx.host.world_mut();
            for slot in self.handlers.drain(..) {
                world.unsubscribe(self.element, slot.kind, slot.subscription);
            }
            if world.contains(handle) {
                world.destroy_element(self.element)?;
            }
        }
        cx.host.wrappers_mut().release(handle, cx.this);
        cx.host.prune_wrappers();
        Ok(())
    }

    /// Layout rectangle in panel space.
    fn bounding_rect(&self, cx: &NodeCx<'_>) -> Option<DomRect> {
        cx.host.world().world_bound(self.element).map(DomRect::from)
    }
}
