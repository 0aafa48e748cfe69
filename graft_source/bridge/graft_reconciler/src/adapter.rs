use std::cell::Cell;

use graft_ids::NativeHandle;
use graft_nodes::{CurrentEvent, EventDispatchContext, Host, Kind, Node};
use graft_scene::Asset;
use graft_variant::{WireMap, WireValue};

use crate::diff::diff_props;
use crate::error::ReconcileError;
use crate::priority::EventPriority;

pub const SUPPORTS_MUTATION: bool = true;
pub const SUPPORTS_PERSISTENCE: bool = false;
pub const SUPPORTS_HYDRATION: bool = false;
pub const IS_PRIMARY_RENDERER: bool = true;
pub const NO_TIMEOUT: i32 = -1;
/// Reported as the event timestamp when no fresh event is being handled.
pub const NO_EVENT_TIMESTAMP: f64 = -1.1;

/// What a tree-reconciliation engine calls on its render target while it
/// mounts, updates and unmounts a declarative tree.
///
/// Containers are ordinary instances. Hooks for features the target does not
/// have (text instances, hydration, suspense) come with defaults.
pub trait ReconcilerTarget {
    type Instance;
    type Error;

    fn create_instance(&self, ty: &str, props: &WireMap) -> Result<Self::Instance, Self::Error>;
    fn create_text_instance(&self, text: &str) -> Result<Self::Instance, Self::Error>;

    fn append_initial_child(&self, parent: &Self::Instance, child: &Self::Instance) -> Result<(), Self::Error>;
    fn append_child(&self, parent: &Self::Instance, child: &Self::Instance) -> Result<(), Self::Error>;
    fn append_child_to_container(
        &self,
        container: &Self::Instance,
        child: &Self::Instance,
    ) -> Result<(), Self::Error>;
    fn insert_before(
        &self,
        parent: &Self::Instance,
        child: &Self::Instance,
        before: &Self::Instance,
    ) -> Result<(), Self::Error>;
    fn insert_in_container_before(
        &self,
        container: &Self::Instance,
        child: &Self::Instance,
        before: &Self::Instance,
    ) -> Result<(), Self::Error>;
    fn remove_child(&self, parent: &Self::Instance, child: &Self::Instance) -> Result<(), Self::Error>;
    fn remove_child_from_container(
        &self,
        container: &Self::Instance,
        child: &Self::Instance,
    ) -> Result<(), Self::Error>;

    fn commit_update(&self, instance: &Self::Instance, prev: &WireMap, next: &WireMap) -> Result<(), Self::Error>;
    fn hide_instance(&self, instance: &Self::Instance) -> Result<(), Self::Error>;
    fn unhide_instance(&self, instance: &Self::Instance) -> Result<(), Self::Error>;
    fn clear_container(&self, container: &Self::Instance) -> Result<(), Self::Error>;
    fn detach_deleted_instance(&self, instance: &Self::Instance) -> Result<(), Self::Error>;

    fn set_current_update_priority(&self, priority: EventPriority);
    fn get_current_update_priority(&self) -> EventPriority;
    fn resolve_update_priority(&self) -> EventPriority;
    fn track_scheduler_event(&self);
    fn resolve_event_type(&self) -> Option<&'static str>;
    fn resolve_event_timestamp(&self) -> f64;

    fn should_set_text_content(&self, _ty: &str, _props: &WireMap) -> bool {
        false
    }

    fn finalize_initial_children(&self, _instance: &Self::Instance, _ty: &str, _props: &WireMap) -> bool {
        false
    }

    fn prepare_for_commit(&self) {}

    fn reset_after_commit(&self) {}

    fn may_suspend_commit(&self, _ty: &str, _props: &WireMap) -> bool {
        false
    }

    /// Every instance counts as loaded.
    fn preload_instance(&self, _ty: &str, _props: &WireMap) -> bool {
        true
    }

    fn start_suspending_commit(&self) {}

    fn suspend_instance(&self, _ty: &str, _props: &WireMap) {}

    /// Whether the commit has to wait for anything. It never does.
    fn wait_for_commit_to_be_ready(&self) -> bool {
        false
    }

    fn should_attempt_eager_transition(&self) -> bool {
        false
    }
}

/// Renders a declarative tree into a [`Host`]'s scene through node
/// wrappers.
pub struct ReconcilerAdapter {
    host: Host,
    current_priority: Cell<EventPriority>,
    scheduler_event: Cell<Option<CurrentEvent>>,
}

impl ReconcilerAdapter {
    pub fn new(host: Host) -> Self {
        Self {
            host,
            current_priority: Cell::new(EventPriority::NONE),
            scheduler_event: Cell::new(None),
        }
    }

    #[inline]
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// The wrapper for an existing scene object, to use as a render root.
    pub fn container(&self, handle: NativeHandle) -> Option<Node> {
        self.host.wrap(handle)
    }

    /// Kind carried by the handle prop: a wrapper, a native handle, an asset
    /// or a name.
    fn kind_from_handle_prop(value: &WireValue) -> Option<Kind> {
        if let Some(name) = value.as_str() {
            return Some(Kind::Name(name.to_string()));
        }
        let external = value.as_external()?;
        if let Some(node) = external.downcast_ref::<Node>() {
            return node.native_handle().map(Kind::Handle);
        }
        if let Some(handle) = external.downcast_ref::<NativeHandle>() {
            return Some(Kind::Handle(*handle));
        }
        external.downcast_ref::<Asset>().cloned().map(Kind::Asset)
    }

    /// The event being handled right now, unless it is the one the scheduler
    /// was already told about.
    fn fresh_event(&self) -> Option<CurrentEvent> {
        let event = EventDispatchContext::current_event()?;
        (self.scheduler_event.get() != Some(event)).then_some(event)
    }
}

impl ReconcilerTarget for ReconcilerAdapter {
    type Instance = Node;
    type Error = ReconcileError;

    fn create_instance(&self, ty: &str, props: &WireMap) -> Result<Node, ReconcileError> {
        let handle_prop = self.host.config().handle_prop.as_str();
        let kind = props
            .get(handle_prop)
            .filter(|value| !value.is_nullish())
            .map(|value| {
                Self::kind_from_handle_prop(value)
                    .ok_or_else(|| ReconcileError::UnknownType(format!("{handle_prop}={value}")))
            })
            .transpose()?
            .unwrap_or_else(|| Kind::Name(ty.to_string()));

        let node = Node::create(&self.host, &kind).ok_or_else(|| ReconcileError::UnknownType(kind.to_string()))?;
        log::debug!("created <{ty}> as {}", node.describe());

        let mut rest = props.clone();
        rest.remove(handle_prop);
        self.commit_update(&node, &WireMap::new(), &rest)?;
        Ok(node)
    }

    fn create_text_instance(&self, text: &str) -> Result<Node, ReconcileError> {
        Err(ReconcileError::TextInstance(text.to_string()))
    }

    fn append_initial_child(&self, parent: &Node, child: &Node) -> Result<(), ReconcileError> {
        self.append_child(parent, child)
    }

    fn append_child(&self, parent: &Node, child: &Node) -> Result<(), ReconcileError> {
        child.set_parent(Some(parent), None)?;
        Ok(())
    }

    fn append_child_to_container(&self, container: &Node, child: &Node) -> Result<(), ReconcileError> {
        self.append_child(container, child)
    }

    fn insert_before(&self, parent: &Node, child: &Node, before: &Node) -> Result<(), ReconcileError> {
        child.set_parent(Some(parent), Some(before))?;
        Ok(())
    }

    fn insert_in_container_before(
        &self,
        container: &Node,
        child: &Node,
        before: &Node,
    ) -> Result<(), ReconcileError> {
        self.insert_before(container, child, before)
    }

    fn remove_child(&self, _parent: &Node, child: &Node) -> Result<(), ReconcileError> {
        child.set_parent(None, None)?;
        Ok(())
    }

    fn remove_child_from_container(&self, container: &Node, child: &Node) -> Result<(), ReconcileError> {
        self.remove_child(container, child)
    }

    fn commit_update(&self, instance: &Node, prev: &WireMap, next: &WireMap) -> Result<(), ReconcileError> {
        let changed = diff_props(prev, next);
        if changed.is_empty() {
            return Ok(());
        }
        log::trace!("committing {} prop(s) to {}", changed.len(), instance.describe());
        instance.set_props(&changed)?;
        Ok(())
    }

    fn hide_instance(&self, instance: &Node) -> Result<(), ReconcileError> {
        instance.set_active(false)?;
        Ok(())
    }

    fn unhide_instance(&self, instance: &Node) -> Result<(), ReconcileError> {
        instance.set_active(true)?;
        Ok(())
    }

    fn clear_container(&self, container: &Node) -> Result<(), ReconcileError> {
        container.clear()?;
        Ok(())
    }

    fn detach_deleted_instance(&self, instance: &Node) -> Result<(), ReconcileError> {
        instance.dispose()?;
        Ok(())
    }

    fn set_current_update_priority(&self, priority: EventPriority) {
        self.current_priority.set(priority);
    }

    fn get_current_update_priority(&self) -> EventPriority {
        self.current_priority.get()
    }

    /// The explicit priority if one is set, else one inferred from the input
    /// event being handled.
    fn resolve_update_priority(&self) -> EventPriority {
        let current = self.current_priority.get();
        if !current.is_none() {
            return current;
        }
        match EventDispatchContext::current_event() {
            Some(event) => EventPriority::for_event_type(event.kind.type_name()),
            None => EventPriority::DEFAULT,
        }
    }

    fn track_scheduler_event(&self) {
        self.scheduler_event.set(EventDispatchContext::current_event());
    }

    fn resolve_event_type(&self) -> Option<&'static str> {
        self.fresh_event().map(|event| event.kind.type_name())
    }

    fn resolve_event_timestamp(&self) -> f64 {
        self.fresh_event()
            .map_or(NO_EVENT_TIMESTAMP, |event| event.time_stamp)
    }
}
