//! The in-process scene graph: game objects with their components, UI
//! element trees, resources, native event subscriptions and a main-camera
//! projection onto the screen.

use std::any::Any;

use graft_ids::{ComponentID, ElementID, NativeHandle, ObjectID};
use graft_properties::{PropertyContainer, TypeInfo};
use graft_structs::{Bounds, Matrix4x4, Rect, Vector2, Vector3};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::arena::Arena;
use crate::components::{
    Camera, Component, ComponentType, Transform, UIDocument, builtin_component_types,
    transform_type,
};
use crate::error::SceneError;
use crate::event::{EventCallback, EventKind, Subscription, SubscriptionId};
use crate::object::GameObject;
use crate::resources::{Asset, Resources};
use crate::screen::Screen;
use crate::types::{CAMERA, TRANSFORM, UI_DOCUMENT};
use crate::ui::{ElementType, UiElement, VisualElement, builtin_element_types};

struct ComponentSlot {
    ty: ComponentType,
    value: Box<dyn Component>,
}

pub struct World {
    objects: Arena<ObjectID, GameObject>,
    components: Arena<ComponentID, ComponentSlot>,
    elements: Arena<ElementID, Box<dyn UiElement>>,
    roots: Vec<ObjectID>,
    component_types: FxHashMap<&'static str, ComponentType>,
    element_types: FxHashMap<&'static str, ElementType>,
    resources: Resources,
    subscriptions: FxHashMap<(ElementID, EventKind), SmallVec<[Subscription; 2]>>,
    next_subscription: u64,
    screen: Screen,
    time: f64,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// A world with every built-in component and element type registered.
    pub fn new() -> Self {
        let mut world = Self::empty();
        for ty in builtin_component_types() {
            world.register_component_type(ty);
        }
        for ty in builtin_element_types() {
            world.register_element_type(ty);
        }
        world
    }

    /// A world with no registered types.
    pub fn empty() -> Self {
        Self {
            objects: Arena::new(),
            components: Arena::new(),
            elements: Arena::new(),
            roots: Vec::new(),
            component_types: FxHashMap::default(),
            element_types: FxHashMap::default(),
            resources: Resources::default(),
            subscriptions: FxHashMap::default(),
            next_subscription: 1,
            screen: Screen::default(),
            time: 0.0,
        }
    }

    // ---- Objects ----

    /// Creates a root-level object with its Transform.
    pub fn create_object(&mut self, name: impl Into<String>) -> ObjectID {
        let id = self.objects.insert(GameObject::new(name));
        let ty = transform_type();
        let transform = self.components.insert(ComponentSlot {
            ty,
            value: (ty.create)(id),
        });
        if let Some(object) = self.objects.get_mut(id) {
            object.components.push(transform);
        }
        self.roots.push(id);
        log::trace!("created {id:?}");
        id
    }

    #[inline]
    pub fn object(&self, id: ObjectID) -> Option<&GameObject> {
        self.objects.get(id)
    }

    #[inline]
    pub fn object_mut(&mut self, id: ObjectID) -> Option<&mut GameObject> {
        self.objects.get_mut(id)
    }

    #[inline]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Top-level objects in sibling order.
    #[inline]
    pub fn roots(&self) -> &[ObjectID] {
        &self.roots
    }

    /// Destroys `id`, its descendants, their components and any UI trees
    /// owned by their documents.
    pub fn destroy_object(&mut self, id: ObjectID) -> Result<(), SceneError> {
        let parent = self.objects.get(id).ok_or_else(|| SceneError::dead(id))?.parent;
        if let Some(list) = self.siblings_mut(parent) {
            list.retain(|&sibling| sibling != id);
        }

        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(object) = self.objects.remove(next) else {
                continue;
            };
            stack.extend(object.children);
            for component in object.components {
                if let Some(slot) = self.components.remove(component) {
                    if let Some(root) = document_root(&*slot.value) {
                        if let Err(err) = self.destroy_element(root) {
                            log::warn!("cannot destroy UI tree of {component:?}: {err}");
                        }
                    }
                }
            }
        }
        log::trace!("destroyed {id:?}");
        Ok(())
    }

    /// Moves `child` under `parent` (scene root when `None`), before the
    /// sibling `before` or at the end. The local transform is kept as is.
    pub fn set_parent(
        &mut self,
        child: ObjectID,
        parent: Option<ObjectID>,
        before: Option<ObjectID>,
    ) -> Result<(), SceneError> {
        let old_parent = self.objects.get(child).ok_or_else(|| SceneError::dead(child))?.parent;
        if let Some(parent) = parent {
            if !self.objects.contains(parent) {
                return Err(SceneError::dead(parent));
            }
            if parent == child || self.is_descendant(parent, child) {
                return Err(SceneError::Cycle {
                    child: child.into(),
                    parent: parent.into(),
                });
            }
        }
        if before == Some(child) {
            return Ok(());
        }
        if let Some(before) = before {
            let sibling = self.objects.get(before).ok_or_else(|| SceneError::dead(before))?;
            if sibling.parent != parent {
                return Err(SceneError::NotAChild {
                    child: before.into(),
                    parent: self.describe_parent(parent),
                });
            }
        }

        if let Some(list) = self.siblings_mut(old_parent) {
            list.retain(|&sibling| sibling != child);
        }
        if let Some(list) = self.siblings_mut(parent) {
            let index = before
                .and_then(|before| list.iter().position(|&sibling| sibling == before))
                .unwrap_or(list.len());
            list.insert(index, child);
        }
        if let Some(object) = self.objects.get_mut(child) {
            object.parent = parent;
        }
        Ok(())
    }

    fn siblings_mut(&mut self, parent: Option<ObjectID>) -> Option<&mut Vec<ObjectID>> {
        match parent {
            Some(parent) => self.objects.get_mut(parent).map(|object| &mut object.children),
            None => Some(&mut self.roots),
        }
    }

    fn describe_parent(&self, parent: Option<ObjectID>) -> String {
        match parent {
            Some(parent) => self.describe(parent.into()),
            None => "the scene root".to_string(),
        }
    }

    /// True when `ancestor` appears on the parent chain of `node`.
    pub fn is_descendant(&self, node: ObjectID, ancestor: ObjectID) -> bool {
        let mut next = self.objects.get(node).and_then(|object| object.parent);
        while let Some(current) = next {
            if current == ancestor {
                return true;
            }
            next = self.objects.get(current).and_then(|object| object.parent);
        }
        false
    }

    pub fn sibling_index(&self, id: ObjectID) -> Option<usize> {
        let parent = self.objects.get(id)?.parent;
        let list = match parent {
            Some(parent) => &self.objects.get(parent)?.children,
            None => &self.roots,
        };
        list.iter().position(|&sibling| sibling == id)
    }

    pub fn set_active(&mut self, id: ObjectID, active: bool) -> Result<(), SceneError> {
        let object = self.objects.get_mut(id).ok_or_else(|| SceneError::dead(id))?;
        object.active_self = active;
        Ok(())
    }

    /// Active itself and every ancestor active.
    pub fn active_in_hierarchy(&self, id: ObjectID) -> bool {
        let mut next = Some(id);
        while let Some(current) = next {
            let Some(object) = self.objects.get(current) else {
                return false;
            };
            if !object.active_self {
                return false;
            }
            next = object.parent;
        }
        true
    }

    /// Finds an active object by name, or by `a/b/c` path from a scene root.
    pub fn find(&self, name: &str) -> Option<ObjectID> {
        if !name.contains('/') {
            let mut stack: Vec<ObjectID> = self.roots.iter().rev().copied().collect();
            while let Some(id) = stack.pop() {
                let Some(object) = self.objects.get(id) else {
                    continue;
                };
                if !object.active_self {
                    continue;
                }
                if object.name() == name {
                    return Some(id);
                }
                stack.extend(object.children.iter().rev());
            }
            return None;
        }

        let mut segments = name.trim_start_matches('/').split('/');
        let first = segments.next()?;
        let mut current = self
            .roots
            .iter()
            .copied()
            .find(|&id| self.objects.get(id).is_some_and(|o| o.active_self && o.name() == first))?;
        for segment in segments {
            current = self.find_child(current, segment)?;
            if !self.active_in_hierarchy(current) {
                return None;
            }
        }
        Some(current)
    }

    /// First direct child of `parent` named `name`, active or not.
    pub fn find_child(&self, parent: ObjectID, name: &str) -> Option<ObjectID> {
        self.objects
            .get(parent)?
            .children
            .iter()
            .copied()
            .find(|&child| self.objects.get(child).is_some_and(|o| o.name() == name))
    }

    /// Deep-clones `template` (components, children, document trees) into a
    /// new scene root.
    pub fn instantiate(&mut self, template: ObjectID) -> Result<ObjectID, SceneError> {
        let id = self.clone_subtree(template, None)?;
        self.roots.push(id);
        log::trace!("instantiated {template:?} as {id:?}");
        Ok(id)
    }

    fn clone_subtree(
        &mut self,
        source: ObjectID,
        parent: Option<ObjectID>,
    ) -> Result<ObjectID, SceneError> {
        let mut copy = self.objects.get(source).ok_or_else(|| SceneError::dead(source))?.clone();
        let components = std::mem::take(&mut copy.components);
        let children = std::mem::take(&mut copy.children);
        copy.parent = parent;
        let id = self.objects.insert(copy);

        for component in components {
            let Some(slot) = self.components.get(component) else {
                continue;
            };
            let ty = slot.ty;
            let mut value = slot.value.clone_box();
            value.core_mut().game_object = id;
            if let Some(root) = document_root(&*value) {
                let tree = self.instantiate_tree(root)?;
                set_document_root(&mut *value, Some(tree));
            }
            let cloned = self.components.insert(ComponentSlot { ty, value });
            if let Some(object) = self.objects.get_mut(id) {
                object.components.push(cloned);
            }
        }
        for child in children {
            let cloned = self.clone_subtree(child, Some(id))?;
            if let Some(object) = self.objects.get_mut(id) {
                object.children.push(cloned);
            }
        }
        Ok(id)
    }

    // ---- Components ----

    pub fn register_component_type(&mut self, ty: ComponentType) {
        log::trace!("registered component type {}", ty.name());
        self.component_types.insert(ty.name(), ty);
    }

    pub fn component_type_named(&self, name: &str) -> Option<ComponentType> {
        self.component_types.get(name).copied()
    }

    /// Attaches a component by registered type name.
    pub fn add_component(&mut self, object: ObjectID, name: &str) -> Result<ComponentID, SceneError> {
        let ty = self
            .component_type_named(name)
            .ok_or_else(|| SceneError::UnknownType {
                kind: "component",
                name: name.to_string(),
            })?;
        self.add_component_of(object, ty)
    }

    /// Attaches a new component of `ty`. Objects hold a single Transform, so
    /// asking for another returns the existing one.
    pub fn add_component_of(
        &mut self,
        object: ObjectID,
        ty: ComponentType,
    ) -> Result<ComponentID, SceneError> {
        if !self.objects.contains(object) {
            return Err(SceneError::dead(object));
        }
        if ty.info == &TRANSFORM {
            if let Some(existing) = self.get_component(object, &TRANSFORM) {
                return Ok(existing);
            }
        }
        let id = self.components.insert(ComponentSlot {
            ty,
            value: (ty.create)(object),
        });
        if let Some(owner) = self.objects.get_mut(object) {
            owner.components.push(id);
        }
        Ok(id)
    }

    /// First component on `object` whose type is `ty` or derives from it.
    pub fn get_component(&self, object: ObjectID, ty: &TypeInfo) -> Option<ComponentID> {
        self.objects.get(object)?.components.iter().copied().find(|&id| {
            self.components
                .get(id)
                .is_some_and(|slot| slot.value.type_info().is_a(ty))
        })
    }

    pub fn get_or_add_component(
        &mut self,
        object: ObjectID,
        ty: ComponentType,
    ) -> Result<ComponentID, SceneError> {
        match self.get_component(object, ty.info) {
            Some(id) => Ok(id),
            None => self.add_component_of(object, ty),
        }
    }

    #[inline]
    pub fn component(&self, id: ComponentID) -> Option<&dyn Component> {
        self.components.get(id).map(|slot| &*slot.value)
    }

    #[inline]
    pub fn component_mut(&mut self, id: ComponentID) -> Option<&mut dyn Component> {
        self.components.get_mut(id).map(|slot| &mut *slot.value)
    }

    /// Typed view of a component through the embedded struct registered for `ty`.
    pub fn component_as<T: Any>(&self, id: ComponentID, ty: &TypeInfo) -> Option<&T> {
        self.components.get(id)?.value.upcast(ty)?.downcast_ref::<T>()
    }

    pub fn component_as_mut<T: Any>(&mut self, id: ComponentID, ty: &TypeInfo) -> Option<&mut T> {
        self.components.get_mut(id)?.value.upcast_mut(ty)?.downcast_mut::<T>()
    }

    pub fn component_type(&self, id: ComponentID) -> Option<ComponentType> {
        self.components.get(id).map(|slot| slot.ty)
    }

    pub fn component_owner(&self, id: ComponentID) -> Option<ObjectID> {
        self.components.get(id).map(|slot| slot.value.core().game_object)
    }

    pub fn destroy_component(&mut self, id: ComponentID) -> Result<(), SceneError> {
        let slot = self.components.get(id).ok_or_else(|| SceneError::dead(id))?;
        if !slot.ty.destroyable {
            return Err(SceneError::Indestructible(slot.ty.name()));
        }
        let owner = slot.value.core().game_object;
        if let Some(object) = self.objects.get_mut(owner) {
            object.components.retain(|&component| component != id);
        }
        if let Some(slot) = self.components.remove(id) {
            if let Some(root) = document_root(&*slot.value) {
                if let Err(err) = self.destroy_element(root) {
                    log::warn!("cannot destroy UI tree of {id:?}: {err}");
                }
            }
        }
        Ok(())
    }

    /// Restores every field to its default while keeping identity, the
    /// object core and a document's UI tree.
    pub fn reset_component(&mut self, id: ComponentID) -> Result<(), SceneError> {
        let slot = self.components.get_mut(id).ok_or_else(|| SceneError::dead(id))?;
        let core = slot.value.core().clone();
        let root = document_root(&*slot.value);
        let mut fresh = (slot.ty.create)(core.game_object);
        *fresh.core_mut() = core;
        if root.is_some() {
            set_document_root(&mut *fresh, root);
        }
        slot.value = fresh;
        Ok(())
    }

    /// Returns whether the component kind carries an enabled flag.
    pub fn set_component_enabled(&mut self, id: ComponentID, enabled: bool) -> Result<bool, SceneError> {
        let slot = self.components.get_mut(id).ok_or_else(|| SceneError::dead(id))?;
        Ok(slot.value.set_enabled(enabled))
    }

    pub fn transform(&self, object: ObjectID) -> Option<&Transform> {
        let id = self.objects.get(object)?.transform()?;
        self.component_as::<Transform>(id, &TRANSFORM)
    }

    pub fn transform_mut(&mut self, object: ObjectID) -> Option<&mut Transform> {
        let id = self.objects.get(object)?.transform()?;
        self.component_as_mut::<Transform>(id, &TRANSFORM)
    }

    // ---- UI elements ----

    pub fn register_element_type(&mut self, ty: ElementType) {
        log::trace!("registered element type {}", ty.name());
        self.element_types.insert(ty.name(), ty);
    }

    pub fn element_type_named(&self, name: &str) -> Option<ElementType> {
        self.element_types.get(name).copied()
    }

    /// Creates a detached element by registered type name.
    pub fn create_element(&mut self, name: &str) -> Result<ElementID, SceneError> {
        let ty = self
            .element_type_named(name)
            .ok_or_else(|| SceneError::UnknownType {
                kind: "element",
                name: name.to_string(),
            })?;
        Ok(self.create_element_of(ty))
    }

    pub fn create_element_of(&mut self, ty: ElementType) -> ElementID {
        self.add_element((ty.create)())
    }

    /// Stores a detached element. Any hierarchy it carries is discarded.
    pub fn add_element(&mut self, mut element: Box<dyn UiElement>) -> ElementID {
        let core = element.core_mut();
        core.parent = None;
        core.children.clear();
        self.elements.insert(element)
    }

    #[inline]
    pub fn element(&self, id: ElementID) -> Option<&dyn UiElement> {
        self.elements.get(id).map(|element| &**element)
    }

    #[inline]
    pub fn element_mut(&mut self, id: ElementID) -> Option<&mut dyn UiElement> {
        self.elements.get_mut(id).map(|element| &mut **element)
    }

    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn element_parent(&self, id: ElementID) -> Option<ElementID> {
        self.elements.get(id)?.core().parent
    }

    pub fn element_children(&self, id: ElementID) -> &[ElementID] {
        self.elements
            .get(id)
            .map(|element| element.core().children())
            .unwrap_or(&[])
    }

    fn is_element_descendant(&self, node: ElementID, ancestor: ElementID) -> bool {
        let mut next = self.element_parent(node);
        while let Some(current) = next {
            if current == ancestor {
                return true;
            }
            next = self.element_parent(current);
        }
        false
    }

    /// Inserts `child` under `parent` at `index` (end when `None` or past the
    /// end), detaching it from its previous parent first.
    pub fn insert_element(
        &mut self,
        parent: ElementID,
        child: ElementID,
        index: Option<usize>,
    ) -> Result<(), SceneError> {
        let old_parent = self
            .elements
            .get(child)
            .ok_or_else(|| SceneError::dead(child))?
            .core()
            .parent;
        if !self.elements.contains(parent) {
            return Err(SceneError::dead(parent));
        }
        if parent == child || self.is_element_descendant(parent, child) {
            return Err(SceneError::Cycle {
                child: child.into(),
                parent: parent.into(),
            });
        }

        let mut index = index;
        if let Some(old) = old_parent {
            if let Some(element) = self.elements.get_mut(old) {
                let children = &mut element.core_mut().children;
                if let Some(position) = children.iter().position(|&c| c == child) {
                    children.remove(position);
                    if old == parent {
                        index = index.map(|i| if i > position { i - 1 } else { i });
                    }
                }
            }
        }

        if let Some(element) = self.elements.get_mut(parent) {
            let children = &mut element.core_mut().children;
            let at = index.map_or(children.len(), |i| i.min(children.len()));
            children.insert(at, child);
        }
        if let Some(element) = self.elements.get_mut(child) {
            element.core_mut().parent = Some(parent);
        }
        Ok(())
    }

    pub fn remove_element(&mut self, parent: ElementID, child: ElementID) -> Result<(), SceneError> {
        if !self.elements.contains(parent) {
            return Err(SceneError::dead(parent));
        }
        if self.element_parent(child) != Some(parent) {
            return Err(SceneError::NotAChild {
                child: child.into(),
                parent: self.describe(parent.into()),
            });
        }
        if let Some(element) = self.elements.get_mut(parent) {
            element.core_mut().children.retain(|&c| c != child);
        }
        if let Some(element) = self.elements.get_mut(child) {
            element.core_mut().parent = None;
        }
        Ok(())
    }

    /// Detaches every child of `parent`, returning them in order.
    pub fn clear_element(&mut self, parent: ElementID) -> Result<Vec<ElementID>, SceneError> {
        let element = self.elements.get_mut(parent).ok_or_else(|| SceneError::dead(parent))?;
        let children = std::mem::take(&mut element.core_mut().children);
        for &child in &children {
            if let Some(element) = self.elements.get_mut(child) {
                element.core_mut().parent = None;
            }
        }
        Ok(children)
    }

    pub fn index_of(&self, parent: ElementID, child: ElementID) -> Option<usize> {
        self.element_children(parent).iter().position(|&c| c == child)
    }

    /// Depth-first search for an element named `name`, `root` included.
    pub fn query_element(&self, root: ElementID, name: &str) -> Option<ElementID> {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let element = self.elements.get(id)?;
            if element.core().name == name {
                return Some(id);
            }
            stack.extend(element.core().children.iter().rev());
        }
        None
    }

    /// Removes `id` and its subtree, along with their event subscriptions.
    pub fn destroy_element(&mut self, id: ElementID) -> Result<(), SceneError> {
        let parent = self.element_parent(id);
        if !self.elements.contains(id) {
            return Err(SceneError::dead(id));
        }
        if let Some(parent) = parent.and_then(|parent| self.elements.get_mut(parent)) {
            parent.core_mut().children.retain(|&c| c != id);
        }

        let mut stack = vec![id];
        let mut removed = Vec::new();
        while let Some(next) = stack.pop() {
            if let Some(element) = self.elements.remove(next) {
                stack.extend(element.core().children.iter().copied());
                removed.push(next);
            }
        }
        self.subscriptions
            .retain(|(element, _), _| !removed.contains(element));
        Ok(())
    }

    /// Deep-clones an element tree. The copy is detached.
    pub fn instantiate_tree(&mut self, template: ElementID) -> Result<ElementID, SceneError> {
        let source = self.elements.get(template).ok_or_else(|| SceneError::dead(template))?;
        let children = source.core().children.clone();
        let copy = source.clone_box();
        let id = self.add_element(copy);
        for child in children {
            let cloned = self.instantiate_tree(child)?;
            self.insert_element(id, cloned, None)?;
        }
        Ok(id)
    }

    /// Layout rectangle in panel space: each ancestor's inline layout
    /// resolved against its parent's size, the root against the screen.
    pub fn world_bound(&self, id: ElementID) -> Option<Rect> {
        let mut chain = vec![id];
        let mut next = self.element_parent(id);
        while let Some(parent) = next {
            chain.push(parent);
            next = self.element_parent(parent);
        }

        let mut origin = Vector2::zero();
        let mut size = (self.screen.width, self.screen.height);
        let mut rect = Rect::new(0.0, 0.0, size.0, size.1);
        for element in chain.into_iter().rev() {
            let local = self.elements.get(element)?.core().layout_in(size);
            origin = origin + local.position();
            size = (local.width, local.height);
            rect = Rect::new(origin.x, origin.y, local.width, local.height);
        }
        Some(rect)
    }

    /// Root element of the object's UIDocument, created on first use.
    pub fn ui_root(&mut self, object: ObjectID) -> Result<ElementID, SceneError> {
        if !self.objects.contains(object) {
            return Err(SceneError::dead(object));
        }
        let document = self
            .get_component(object, &UI_DOCUMENT)
            .ok_or(SceneError::MissingUiRoot(object))?;
        let existing = self
            .component_as::<UIDocument>(document, &UI_DOCUMENT)
            .and_then(UIDocument::root);
        if let Some(root) = existing.filter(|&root| self.elements.contains(root)) {
            return Ok(root);
        }
        let root = self.add_element(Box::new(VisualElement::named("root")));
        if let Some(document) = self.component_as_mut::<UIDocument>(document, &UI_DOCUMENT) {
            document.root = Some(root);
        }
        Ok(root)
    }

    // ---- Native events ----

    pub fn subscribe(
        &mut self,
        element: ElementID,
        kind: EventKind,
        callback: EventCallback,
    ) -> Result<SubscriptionId, SceneError> {
        if !self.elements.contains(element) {
            return Err(SceneError::dead(element));
        }
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions
            .entry((element, kind))
            .or_default()
            .push(Subscription { id, callback });
        Ok(id)
    }

    pub fn unsubscribe(&mut self, element: ElementID, kind: EventKind, id: SubscriptionId) -> bool {
        let Some(list) = self.subscriptions.get_mut(&(element, kind)) else {
            return false;
        };
        let before = list.len();
        list.retain(|subscription| subscription.id != id);
        let removed = list.len() != before;
        if list.is_empty() {
            self.subscriptions.remove(&(element, kind));
        }
        removed
    }

    /// Callbacks registered on `element` for `kind`, in subscription order.
    pub fn subscribers(&self, element: ElementID, kind: EventKind) -> Vec<EventCallback> {
        self.subscriptions
            .get(&(element, kind))
            .map(|list| list.iter().map(|s| s.callback.clone()).collect())
            .unwrap_or_default()
    }

    pub fn subscription_count(&self, element: ElementID) -> usize {
        self.subscriptions
            .iter()
            .filter(|((owner, _), _)| *owner == element)
            .map(|(_, list)| list.len())
            .sum()
    }

    // ---- Handles ----

    pub fn contains(&self, handle: NativeHandle) -> bool {
        match handle {
            NativeHandle::Object(id) => self.objects.contains(id),
            NativeHandle::Component(id) => self.components.contains(id),
            NativeHandle::Element(id) => self.elements.contains(id),
        }
    }

    /// The property container behind any live handle.
    pub fn container(&self, handle: NativeHandle) -> Option<&dyn PropertyContainer> {
        match handle {
            NativeHandle::Object(id) => self
                .objects
                .get(id)
                .map(|object| object as &dyn PropertyContainer),
            NativeHandle::Component(id) => self.components.get(id).map(|slot| slot.value.as_container()),
            NativeHandle::Element(id) => self.elements.get(id).map(|element| element.as_container()),
        }
    }

    pub fn container_mut(&mut self, handle: NativeHandle) -> Option<&mut dyn PropertyContainer> {
        match handle {
            NativeHandle::Object(id) => self
                .objects
                .get_mut(id)
                .map(|object| object as &mut dyn PropertyContainer),
            NativeHandle::Component(id) => self
                .components
                .get_mut(id)
                .map(|slot| slot.value.as_container_mut()),
            NativeHandle::Element(id) => self
                .elements
                .get_mut(id)
                .map(|element| element.as_container_mut()),
        }
    }

    /// Human-readable name for diagnostics, e.g. `Light on "Lamp"`.
    pub fn describe(&self, handle: NativeHandle) -> String {
        match handle {
            NativeHandle::Object(id) => match self.objects.get(id) {
                Some(object) => format!("GameObject \"{}\"", object.name()),
                None => handle.to_string(),
            },
            NativeHandle::Component(id) => match self.components.get(id) {
                Some(slot) => {
                    let owner = slot.value.core().game_object;
                    let name = self.objects.get(owner).map(GameObject::name).unwrap_or("?");
                    format!("{} on \"{name}\"", slot.ty.name())
                }
                None => handle.to_string(),
            },
            NativeHandle::Element(id) => match self.elements.get(id) {
                Some(element) => {
                    format!("{} \"{}\"", element.type_info().name, element.core().name)
                }
                None => handle.to_string(),
            },
        }
    }

    // ---- Projection ----

    /// First enabled camera on an object active in the hierarchy.
    pub fn main_camera(&self) -> Option<ComponentID> {
        self.components.iter().find_map(|(id, slot)| {
            let camera = slot.value.type_info().is_a(&CAMERA)
                && slot.value.enabled() == Some(true)
                && self.active_in_hierarchy(slot.value.core().game_object);
            camera.then_some(id)
        })
    }

    /// Local-to-world matrix of an object, composed along its parent chain.
    pub fn world_matrix(&self, object: ObjectID) -> Matrix4x4 {
        let mut matrix = glam::Mat4::IDENTITY;
        let mut next = Some(object);
        while let Some(current) = next {
            if let Some(transform) = self.transform(current) {
                matrix = transform.local_matrix().to_glam() * matrix;
            }
            next = self.objects.get(current).and_then(|o| o.parent);
        }
        Matrix4x4::from_glam(matrix)
    }

    fn camera_matrices(&self, camera: ComponentID) -> Option<(glam::Mat4, glam::Mat4, &Camera)> {
        let data = self.component_as::<Camera>(camera, &CAMERA)?;
        let owner = self.component_owner(camera)?;
        let view = self.world_matrix(owner).to_glam().inverse();
        let viewport = data.rect;
        let aspect = if viewport.height > 0.0 {
            self.screen.aspect() * viewport.width / viewport.height
        } else {
            self.screen.aspect()
        };
        let projection = if data.orthographic {
            let half_height = data.orthographic_size;
            let half_width = half_height * aspect;
            glam::Mat4::orthographic_lh(
                -half_width,
                half_width,
                -half_height,
                half_height,
                data.near_clip_plane,
                data.far_clip_plane,
            )
        } else {
            glam::Mat4::perspective_lh(
                data.field_of_view.to_radians(),
                aspect,
                data.near_clip_plane,
                data.far_clip_plane,
            )
        };
        Some((view, projection, data))
    }

    /// Projection times view of `camera`.
    pub fn view_projection(&self, camera: ComponentID) -> Option<Matrix4x4> {
        let (view, projection, _) = self.camera_matrices(camera)?;
        Some(Matrix4x4::from_glam(projection * view))
    }

    /// Pixel position (bottom-left origin) of a world point through the main
    /// camera; `z` is the distance in front of the camera. `None` without a
    /// camera or for points behind a perspective camera.
    pub fn world_to_screen(&self, point: Vector3) -> Option<Vector3> {
        let camera = self.main_camera()?;
        let (view, projection, data) = self.camera_matrices(camera)?;
        let eye = view * point.to_glam().extend(1.0);
        let clip = projection * eye;
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        let viewport = data.rect;
        let x = (viewport.x + (ndc.x * 0.5 + 0.5) * viewport.width) * self.screen.width;
        let y = (viewport.y + (ndc.y * 0.5 + 0.5) * viewport.height) * self.screen.height;
        Some(Vector3::new(x, y, eye.z))
    }

    /// World-space AABB of the first renderer on `object`.
    pub fn renderer_bounds(&self, object: ObjectID) -> Option<Bounds> {
        let local = self
            .objects
            .get(object)?
            .components
            .iter()
            .find_map(|&id| self.components.get(id)?.value.local_bounds())?;
        let matrix = self.world_matrix(object);
        let corners = local.corners().map(|corner| matrix.multiply_point(corner));
        let (min, max) = corners[1..]
            .iter()
            .fold((corners[0], corners[0]), |(min, max), &c| (min.min(c), max.max(c)));
        Some(Bounds::from_min_max(min, max))
    }

    // ---- Clock / screen / resources ----

    /// Unscaled seconds since the world was created.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn advance_time(&mut self, seconds: f64) {
        self.time += seconds;
    }

    #[inline]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    #[inline]
    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    #[inline]
    pub fn resources_mut(&mut self) -> &mut Resources {
        &mut self.resources
    }

    pub fn resource(&self, path: &str) -> Option<Asset> {
        self.resources.get(path)
    }
}

fn document_root(component: &dyn Component) -> Option<ElementID> {
    component
        .upcast(&UI_DOCUMENT)?
        .downcast_ref::<UIDocument>()?
        .root()
}

fn set_document_root(component: &mut dyn Component, root: Option<ElementID>) {
    if let Some(document) = component
        .upcast_mut(&UI_DOCUMENT)
        .and_then(|any| any.downcast_mut::<UIDocument>())
    {
        document.root = root;
    }
}
