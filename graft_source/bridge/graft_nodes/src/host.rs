use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use graft_ids::{NativeHandle, ObjectID};
use graft_properties::{PropertyAccessor, PropertyError, PropertyPath};
use graft_scene::{EventCategory, NativeEvent, World, dispatch_event};
use graft_variant::{ConversionRegistry, External, WireMap, WireValue};

use crate::config::GraftConfig;
use crate::error::{NodeError, PropFailure, SetPropsError};
use crate::event::EventPool;
use crate::node::{ComponentNode, ContainerNode, ElementNode, Node, NodeKind};
use crate::registry::WrapperRegistry;

pub(crate) struct HostInner {
    world: RefCell<World>,
    accessor: PropertyAccessor,
    config: GraftConfig,
    wrappers: RefCell<WrapperRegistry>,
    events: RefCell<EventPool>,
    parking: Cell<Option<ObjectID>>,
}

/// Everything nodes share: the world they mutate, the property accessor,
/// the identity map and the bridge config. Cheap to clone.
#[derive(Clone)]
pub struct Host(Rc<HostInner>);

#[derive(Clone)]
pub(crate) struct WeakHost(Weak<HostInner>);

impl WeakHost {
    pub(crate) fn upgrade(&self) -> Option<Host> {
        self.0.upgrade().map(Host)
    }
}

impl Host {
    pub fn new(world: World) -> Self {
        Self::with_config(world, GraftConfig::default())
    }

    /// Uses the built-in scene catalog and default conversions.
    pub fn with_config(world: World, config: GraftConfig) -> Self {
        let accessor = PropertyAccessor::new(graft_scene::catalog(), ConversionRegistry::new());
        Self::with_accessor(world, accessor, config)
    }

    pub fn with_accessor(world: World, mut accessor: PropertyAccessor, config: GraftConfig) -> Self {
        accessor
            .conversions_mut()
            .register_handle_extractor(node_handle);
        let accessor = accessor.with_multi_value_suffixes(config.multi_value_suffixes.iter().cloned());
        Self(Rc::new(HostInner {
            world: RefCell::new(world),
            accessor,
            config,
            wrappers: RefCell::new(WrapperRegistry::new()),
            events: RefCell::new(EventPool::default()),
            parking: Cell::new(None),
        }))
    }

    #[inline]
    pub fn world(&self) -> Ref<'_, World> {
        self.0.world.borrow()
    }

    #[inline]
    pub fn world_mut(&self) -> RefMut<'_, World> {
        self.0.world.borrow_mut()
    }

    #[inline]
    pub fn accessor(&self) -> &PropertyAccessor {
        &self.0.accessor
    }

    #[inline]
    pub fn config(&self) -> &GraftConfig {
        &self.0.config
    }

    pub fn wrappers(&self) -> Ref<'_, WrapperRegistry> {
        self.0.wrappers.borrow()
    }

    pub(crate) fn wrappers_mut(&self) -> RefMut<'_, WrapperRegistry> {
        self.0.wrappers.borrow_mut()
    }

    pub(crate) fn events(&self) -> &RefCell<EventPool> {
        &self.0.events
    }

    pub(crate) fn downgrade(&self) -> WeakHost {
        WeakHost(Rc::downgrade(&self.0))
    }

    pub fn ptr_eq(&self, other: &Host) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// The inactive object detached containers wait under. Created on first
    /// use, and again if something destroyed it.
    pub fn parking_root(&self) -> ObjectID {
        if let Some(id) = self.0.parking.get() {
            if self.world().object(id).is_some() {
                return id;
            }
            log::warn!("parking root {id:?} was destroyed, creating a new one");
        }
        let mut world = self.world_mut();
        let id = world.create_object(self.0.config.parking_name.clone());
        if let Err(err) = world.set_active(id, false) {
            log::warn!("cannot deactivate parking root: {err}");
        }
        self.0.parking.set(Some(id));
        log::debug!("parking root is {id:?}");
        id
    }

    /// The wrapper for a live native object, created on first request.
    pub fn wrap(&self, handle: NativeHandle) -> Option<Node> {
        if let Some(node) = self.0.wrappers.borrow().get(handle) {
            return Some(node);
        }
        let kind: NodeKind = {
            let world = self.world();
            if !world.contains(handle) {
                return None;
            }
            match handle {
                NativeHandle::Object(id) => ContainerNode::new(id).into(),
                NativeHandle::Component(id) => ComponentNode::attached(world.component_type(id)?, id).into(),
                NativeHandle::Element(id) => ElementNode::new(id).into(),
            }
        };
        let node = self
            .wrappers_mut()
            .get_or_insert_with(handle, || Node::new(self.clone(), kind));
        Some(node)
    }

    /// Delivers a native event to the element's subscribers.
    pub fn dispatch(&self, event: NativeEvent) -> usize {
        dispatch_event(&self.0.world, event)
    }

    /// Drops identity-map entries for dropped wrappers and dead objects.
    pub fn prune_wrappers(&self) -> usize {
        let world = self.world();
        self.wrappers_mut().prune(|handle| world.contains(handle))
    }

    pub fn pooled_events(&self, category: EventCategory) -> usize {
        self.0.events.borrow().available(category)
    }

    /// Diagnostic name of a native object. Falls back to the bare handle
    /// while the world is being mutated.
    pub fn describe(&self, handle: NativeHandle) -> String {
        match self.0.world.try_borrow() {
            Ok(world) => world.describe(handle),
            Err(_) => handle.to_string(),
        }
    }

    /// Prop key → property path, honouring the dash alias setting.
    pub fn parse_key(&self, key: &str) -> Result<PropertyPath, PropertyError> {
        if self.0.config.path_dash_alias {
            PropertyPath::from_wire_key(key)
        } else {
            PropertyPath::parse(key)
        }
    }

    pub fn get_prop(&self, handle: NativeHandle, key: &str) -> Result<WireValue, NodeError> {
        let path = self.parse_key(key)?;
        let world = self.world();
        Ok(self.0.accessor.try_get(world.container(handle), &path)?)
    }

    // ---- prop application ----

    pub(crate) fn apply_prop(
        &self,
        handle: NativeHandle,
        key: &Arc<str>,
        value: &WireValue,
        failures: &mut Vec<PropFailure>,
    ) {
        let result = self.parse_key(key).and_then(|path| {
            let mut world = self.world_mut();
            self.0.accessor.try_set(world.container_mut(handle), &path, value)
        });
        if let Err(error) = result {
            log::trace!("{key} rejected on {handle}: {error}");
            failures.push(PropFailure {
                key: Arc::clone(key),
                error: error.into(),
            });
        }
    }

    /// Applies every entry independently; failures are reported together.
    pub(crate) fn apply_props(&self, handle: NativeHandle, props: &WireMap) -> Result<(), NodeError> {
        let mut failures = Vec::new();
        for (key, value) in props {
            self.apply_prop(handle, key, value, &mut failures);
        }
        self.props_result(handle, failures)
    }

    pub(crate) fn props_result(
        &self,
        handle: NativeHandle,
        failures: Vec<PropFailure>,
    ) -> Result<(), NodeError> {
        if failures.is_empty() {
            return Ok(());
        }
        let target = self.describe(handle);
        log::warn!("{} prop(s) failed on {target}", failures.len());
        Err(SetPropsError { target, failures }.into())
    }
}

fn node_handle(external: &External) -> Option<NativeHandle> {
    external.downcast_ref::<Node>()?.native_handle()
}
