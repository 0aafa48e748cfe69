//! Wrappers unifying container objects, attached components, UI elements
//! and deferred overrides behind one create/configure/reparent/dispose
//! contract.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use enum_dispatch::enum_dispatch;
use graft_ids::{NativeHandle, ObjectID};
use graft_properties::TypeInfo;
use graft_scene::Asset;
use graft_variant::{WireMap, WireValue};

use crate::error::NodeError;
use crate::host::Host;
use crate::rect::DomRect;

mod component;
mod container;
mod deferred;
mod element;

pub(crate) use component::ComponentNode;
pub(crate) use container::ContainerNode;
pub(crate) use deferred::DeferredNode;
pub(crate) use element::ElementNode;

/// What a node should be created from.
#[derive(Clone, Debug, PartialEq)]
pub enum Kind {
    /// A type name, a resource path, or `#name` for a deferred override.
    Name(String),
    Type(&'static TypeInfo),
    Asset(Asset),
    /// An existing native object.
    Handle(NativeHandle),
}

impl From<&str> for Kind {
    fn from(name: &str) -> Self {
        Kind::Name(name.to_string())
    }
}

impl From<String> for Kind {
    fn from(name: String) -> Self {
        Kind::Name(name)
    }
}

impl From<&'static TypeInfo> for Kind {
    fn from(ty: &'static TypeInfo) -> Self {
        Kind::Type(ty)
    }
}

impl From<Asset> for Kind {
    fn from(asset: Asset) -> Self {
        Kind::Asset(asset)
    }
}

impl From<NativeHandle> for Kind {
    fn from(handle: NativeHandle) -> Self {
        Kind::Handle(handle)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Name(name) => write!(f, "\"{name}\""),
            Kind::Type(ty) => write!(f, "type {ty}"),
            Kind::Asset(asset) => write!(f, "{asset:?}"),
            Kind::Handle(handle) => write!(f, "{handle}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Container,
    Component,
    Element,
    Deferred,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Variant::Container => "container",
            Variant::Component => "component",
            Variant::Element => "element",
            Variant::Deferred => "deferred",
        })
    }
}

pub(crate) struct NodeCx<'a> {
    pub(crate) host: &'a Host,
    pub(crate) this: &'a Node,
}

/// Per-variant behaviour behind [`Node`]'s public operations.
#[enum_dispatch]
pub(crate) trait NodeBehavior {
    fn variant(&self) -> Variant;
    fn handle(&self) -> Option<NativeHandle>;
    fn describe(&self, host: &Host) -> String;
    fn set_props(&mut self, cx: &NodeCx<'_>, props: &WireMap) -> Result<(), NodeError>;
    fn set_active(&mut self, cx: &NodeCx<'_>, active: bool) -> Result<(), NodeError>;
    fn set_parent(
        &mut self,
        cx: &NodeCx<'_>,
        parent: Option<&Node>,
        before: Option<&Node>,
    ) -> Result<(), NodeError>;
    fn clear(&mut self, cx: &NodeCx<'_>) -> Result<(), NodeError>;
    fn dispose(&mut self, cx: &NodeCx<'_>) -> Result<(), NodeError>;
    fn bounding_rect(&self, cx: &NodeCx<'_>) -> Option<DomRect>;
}

#[enum_dispatch(NodeBehavior)]
pub(crate) enum NodeKind {
    ContainerNode,
    ComponentNode,
    ElementNode,
    DeferredNode,
}

type Constructor = fn(&Host, &Kind) -> Option<NodeKind>;

/// Variants in the order they are offered a kind; the first to accept wins.
const CONSTRUCTORS: [Constructor; 4] = [
    DeferredNode::from_kind,
    ElementNode::from_kind,
    ComponentNode::from_kind,
    ContainerNode::from_kind,
];

pub(crate) struct NodeData {
    host: Host,
    kind: RefCell<NodeKind>,
    variant: Variant,
    /// Last known handle, for reads made while an operation holds `kind`.
    handle: Cell<Option<NativeHandle>>,
    disposed: Cell<bool>,
}

/// A wrapper around one native object. Clones share identity.
#[derive(Clone)]
pub struct Node(Rc<NodeData>);

#[derive(Clone)]
pub struct WeakNode(Weak<NodeData>);

impl WeakNode {
    pub fn upgrade(&self) -> Option<Node> {
        self.0.upgrade().map(Node)
    }

    pub fn is_live(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({} {})", self.0.variant, self.describe())
    }
}

impl Node {
    pub(crate) fn new(host: Host, kind: NodeKind) -> Self {
        let variant = kind.variant();
        let handle = kind.handle();
        Self(Rc::new(NodeData {
            host,
            kind: RefCell::new(kind),
            variant,
            handle: Cell::new(handle),
            disposed: Cell::new(false),
        }))
    }

    // ---- creation and lookup ----

    /// Builds a node for `kind`. A name that is a registered resource path
    /// creates from that asset; a handle returns the object's existing
    /// wrapper. Otherwise each variant is offered the kind in order. `None` when
    /// nothing accepts the kind.
    pub fn create(host: &Host, kind: &Kind) -> Option<Node> {
        let asset;
        let kind = match kind {
            Kind::Handle(handle) => return host.wrap(*handle),
            Kind::Name(name) if !name.starts_with('#') => {
                let resource = host.world().resource(name);
                match resource {
                    Some(found) => {
                        asset = Kind::Asset(found);
                        &asset
                    }
                    None => kind,
                }
            }
            _ => kind,
        };

        for construct in CONSTRUCTORS {
            let Some(node_kind) = construct(host, kind) else {
                continue;
            };
            let node = Node::new(host.clone(), node_kind);
            if let Some(handle) = node.native_handle() {
                host.wrappers_mut().insert(handle, &node);
            }
            log::debug!("created {} node for {kind}", node.variant());
            return Some(node);
        }
        log::debug!("no node variant accepts {kind}");
        None
    }

    /// Creates a node from the asset registered under `path`.
    pub fn load_asset(host: &Host, path: &str) -> Option<Node> {
        let asset = host.world().resource(path)?;
        Node::create(host, &Kind::Asset(asset))
    }

    /// Finds `name` relative to `scope`: a UI element scope queries its
    /// tree, a container scope gets or adds the component of that type (or
    /// else a direct child object of that name), no scope finds an active
    /// object anywhere in the scene.
    pub fn search(host: &Host, name: &str, scope: Option<&Node>) -> Option<Node> {
        let Some(scope) = scope else {
            let found = host.world().find(name);
            return host.wrap(found?.into());
        };
        let found: NativeHandle = match scope.native_handle()? {
            NativeHandle::Element(root) => {
                let element = host.world().query_element(root, name);
                element?.into()
            }
            NativeHandle::Object(object) => {
                let component_type = host.world().component_type_named(name);
                match component_type {
                    Some(ty) => {
                        let added = host.world_mut().get_or_add_component(object, ty);
                        match added {
                            Ok(id) => id.into(),
                            Err(err) => {
                                log::warn!("cannot add {name} while searching: {err}");
                                return None;
                            }
                        }
                    }
                    None => {
                        let child = host.world().find_child(object, name);
                        child?.into()
                    }
                }
            }
            NativeHandle::Component(_) => return None,
        };
        host.wrap(found)
    }

    /// The node an external on the wire refers to: a wrapper, or a bare
    /// native handle.
    pub fn from_wire(host: &Host, value: &WireValue) -> Option<Node> {
        let external = value.as_external()?;
        if let Some(node) = external.downcast_ref::<Node>() {
            return Some(node.clone());
        }
        external
            .downcast_ref::<NativeHandle>()
            .and_then(|handle| host.wrap(*handle))
    }

    // ---- identity ----

    #[inline]
    pub fn host(&self) -> &Host {
        &self.0.host
    }

    #[inline]
    pub fn variant(&self) -> Variant {
        self.0.variant
    }

    pub fn native_handle(&self) -> Option<NativeHandle> {
        match self.0.kind.try_borrow() {
            Ok(kind) => kind.handle(),
            Err(_) => self.0.handle.get(),
        }
    }

    #[inline]
    pub fn is_disposed(&self) -> bool {
        self.0.disposed.get()
    }

    pub fn downgrade(&self) -> WeakNode {
        WeakNode(Rc::downgrade(&self.0))
    }

    pub fn to_wire(&self) -> WireValue {
        WireValue::external(self.clone())
    }

    pub fn describe(&self) -> String {
        match self.0.kind.try_borrow() {
            Ok(kind) => kind.describe(&self.0.host),
            Err(_) => match self.0.handle.get() {
                Some(handle) => self.0.host.describe(handle),
                None => format!("{} node", self.0.variant),
            },
        }
    }

    // ---- operations ----

    fn run<R>(
        &self,
        op: &'static str,
        f: impl FnOnce(&mut NodeKind, &NodeCx<'_>) -> Result<R, NodeError>,
    ) -> Result<R, NodeError> {
        if self.is_disposed() {
            return Err(NodeError::Disposed(self.describe()));
        }
        let Ok(mut kind) = self.0.kind.try_borrow_mut() else {
            return Err(NodeError::Unsupported {
                op,
                target: format!("{} node already in an operation", self.0.variant),
            });
        };
        let cx = NodeCx {
            host: &self.0.host,
            this: self,
        };
        let result = f(&mut kind, &cx);
        self.0.handle.set(kind.handle());
        result
    }

    /// Applies each entry independently. Entries that fail are collected
    /// into one [`SetPropsError`](crate::SetPropsError); the rest still apply.
    pub fn set_props(&self, props: &WireMap) -> Result<(), NodeError> {
        if props.is_empty() {
            return Ok(());
        }
        self.run("setProps", |kind, cx| kind.set_props(cx, props))
    }

    pub fn set_active(&self, active: bool) -> Result<(), NodeError> {
        self.run("setActive", |kind, cx| kind.set_active(cx, active))
    }

    /// Attaches under `parent` before `before` (or last), or detaches when
    /// `parent` is `None`.
    pub fn set_parent(&self, parent: Option<&Node>, before: Option<&Node>) -> Result<(), NodeError> {
        if let Some(parent) = parent {
            if parent == self {
                return Err(NodeError::InvalidParent {
                    child: self.describe(),
                    parent: "itself".to_string(),
                });
            }
            if parent.is_disposed() {
                return Err(NodeError::Disposed(parent.describe()));
            }
        }
        if before == Some(self) {
            return Ok(());
        }
        self.run("setParent", |kind, cx| kind.set_parent(cx, parent, before))
    }

    /// Detaches every child.
    pub fn clear(&self) -> Result<(), NodeError> {
        self.run("clear", |kind, cx| kind.clear(cx))
    }

    /// Releases the native object. Calling it again does nothing.
    pub fn dispose(&self) -> Result<(), NodeError> {
        if self.is_disposed() {
            return Ok(());
        }
        self.run("dispose", |kind, cx| kind.dispose(cx))?;
        self.0.disposed.set(true);
        self.0.handle.set(None);
        log::debug!("disposed {} node", self.0.variant);
        Ok(())
    }

    /// On-screen extent in CSS pixels, when the node has one.
    pub fn bounding_rect(&self) -> Option<DomRect> {
        if self.is_disposed() {
            return None;
        }
        let kind = self.0.kind.try_borrow().ok()?;
        let cx = NodeCx {
            host: &self.0.host,
            this: self,
        };
        kind.bounding_rect(&cx)
    }

    pub fn get_prop(&self, key: &str) -> Result<WireValue, NodeError> {
        let handle = self
            .native_handle()
            .ok_or_else(|| NodeError::Unresolved(self.describe()))?;
        self.0.host.get_prop(handle, key)
    }

    /// Every catalogued property of the wrapped object, one per line.
    pub fn dump(&self) -> Vec<String> {
        let Some(handle) = self.native_handle() else {
            return Vec::new();
        };
        let world = self.0.host.world();
        match world.container(handle) {
            Some(container) => self.0.host.accessor().dump(container),
            None => Vec::new(),
        }
    }
}

/// The container object a node stands for: a container itself, or the
/// owner of a component.
pub(crate) fn container_object(host: &Host, node: &Node) -> Option<ObjectID> {
    match node.native_handle()? {
        NativeHandle::Object(id) => Some(id),
        NativeHandle::Component(id) => host.world().component_owner(id),
        NativeHandle::Element(_) => None,
    }
}
