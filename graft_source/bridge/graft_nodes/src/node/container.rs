use graft_ids::{NativeHandle, ObjectID};
use graft_scene::Asset;
use graft_scene::types::GAME_OBJECT;
use graft_variant::WireMap;

use super::{Kind, Node, NodeBehavior, NodeCx, NodeKind, Variant, container_object};
use crate::error::NodeError;
use crate::host::Host;
use crate::rect::DomRect;

/// A scene-graph object. Detached objects wait, inactive, under the host's
/// parking root.
pub(crate) struct ContainerNode {
    object: ObjectID,
}

impl ContainerNode {
    pub(crate) fn new(object: ObjectID) -> Self {
        Self { object }
    }

    /// Accepts prefab assets (instantiated) and the plain `GameObject` type
    /// (a new empty object). Either way the object starts out parked.
    pub(crate) fn from_kind(host: &Host, kind: &Kind) -> Option<NodeKind> {
        let created = match kind {
            Kind::Asset(Asset::Prefab(template)) => host.world_mut().instantiate(*template),
            Kind::Name(name) if name == GAME_OBJECT.name => Ok(host.world_mut().create_object(name.as_str())),
            Kind::Type(ty) if **ty == GAME_OBJECT => Ok(host.world_mut().create_object(ty.name)),
            _ => return None,
        };
        let object = match created {
            Ok(object) => object,
            Err(err) => {
                log::warn!("cannot instantiate {kind}: {err}");
                return None;
            }
        };
        let parking = host.parking_root();
        if let Err(err) = host.world_mut().set_parent(object, Some(parking), None) {
            log::warn!("cannot park {object:?}: {err}");
        }
        Some(ContainerNode::new(object).into())
    }
}

/// Moves `object` under the parking root and resets its local transform.
fn park(host: &Host, object: ObjectID) -> Result<(), NodeError> {
    let parking = host.parking_root();
    let mut world = host.world_mut();
    let parent = world.object(object).and_then(|o| o.parent());
    if parent != Some(parking) {
        world.set_parent(object, Some(parking), None)?;
    }
    if let Some(transform) = world.transform_mut(object) {
        transform.reset_local();
    }
    Ok(())
}

impl NodeBehavior for ContainerNode {
    fn variant(&self) -> Variant {
        Variant::Container
    }

    fn handle(&self) -> Option<NativeHandle> {
        Some(NativeHandle::Object(self.object))
    }

    fn describe(&self, host: &Host) -> String {
        host.describe(NativeHandle::Object(self.object))
    }

    fn set_props(&mut self, cx: &NodeCx<'_>, props: &WireMap) -> Result<(), NodeError> {
        cx.host.apply_props(NativeHandle::Object(self.object), props)
    }

    fn set_active(&mut self, cx: &NodeCx<'_>, active: bool) -> Result<(), NodeError> {
        cx.host.world_mut().set_active(self.object, active)?;
        Ok(())
    }

    fn set_parent(
        &mut self,
        cx: &NodeCx<'_>,
        parent: Option<&Node>,
        before: Option<&Node>,
    ) -> Result<(), NodeError> {
        let Some(parent) = parent else {
            return park(cx.host, self.object);
        };
        let target = container_object(cx.host, parent).ok_or_else(|| NodeError::InvalidParent {
            child: self.describe(cx.host),
            parent: parent.describe(),
        })?;
        let before = match before {
            None => None,
            Some(node) => match node.native_handle() {
                Some(NativeHandle::Object(id)) => Some(id),
                _ => {
                    return Err(NodeError::InvalidParent {
                        child: node.describe(),
                        parent: parent.describe(),
                    });
                }
            },
        };
        cx.host.world_mut().set_parent(self.object, Some(target), before)?;
        Ok(())
    }

    fn clear(&mut self, cx: &NodeCx<'_>) -> Result<(), NodeError> {
        let children = cx
            .host
            .world()
            .object(self.object)
            .map(|object| object.children().to_vec())
            .unwrap_or_default();
        for child in children {
            park(cx.host, child)?;
        }
        Ok(())
    }

    fn dispose(&mut self, cx: &NodeCx<'_>) -> Result<(), NodeError> {
        let alive = cx.host.world().object(self.object).is_some();
        if alive {
            cx.host.world_mut().destroy_object(self.object)?;
        }
        cx.host
            .wrappers_mut()
            .release(NativeHandle::Object(self.object), cx.this);
        cx.host.prune_wrappers();
        Ok(())
    }

    /// The renderer's world bounds projected through the main camera.
    fn bounding_rect(&self, cx: &NodeCx<'_>) -> Option<DomRect> {
        let world = cx.host.world();
        let bounds = world.renderer_bounds(self.object)?;
        let screen = world.screen();

        let (mut min_x, mut min_y) = (f32::MAX, f32::MAX);
        let (mut max_x, mut max_y) = (f32::MIN, f32::MIN);
        for corner in bounds.corners() {
            let point = world.world_to_screen(corner)?;
            let y = screen.height - point.y;
            min_x = min_x.min(point.x);
            max_x = max_x.max(point.x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        let scale = if screen.dpi > 0.0 {
            cx.host.config().reference_dpi / screen.dpi
        } else {
            1.0
        };
        Some(DomRect::new(
            min_x * scale,
            min_y * scale,
            (max_x - min_x) * scale,
            (max_y - min_y) * scale,
        ))
    }
}
