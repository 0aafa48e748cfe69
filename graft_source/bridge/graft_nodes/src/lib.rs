#![forbid(unsafe_code)]

//! Reconcilable wrappers over the scene: one [`Node`] per native object,
//! created by kind, configured by prop batches and moved between parents.

mod config;
mod error;
mod event;
mod host;
mod node;
mod rect;
mod registry;

pub use config::GraftConfig;
pub use error::{ConfigError, NodeError, PropFailure, SetPropsError};
pub use event::{
    ChangeDetail, CurrentEvent, DispatchScope, Event, EventDetail, EventDispatchContext, Handler,
    KeyboardDetail, NavigationDetail, PointerDetail, event_kind_for_prop, event_prop_names,
};
pub use host::Host;
pub use node::{Kind, Node, Variant, WeakNode};
pub use rect::DomRect;
pub use registry::WrapperRegistry;

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use graft_ids::{NativeHandle, ObjectID};
    use graft_properties::PropertyError;
    use graft_scene::style::Length;
    use graft_scene::types::LIGHT;
    use graft_scene::{
        Asset, EventCategory, EventData, EventKind, Modifiers, NativeEvent, SceneError, World,
    };
    use graft_structs::{Vector2, Vector3};
    use graft_variant::{WireMap, WireValue};

    use super::*;

    fn host() -> Host {
        Host::new(World::new())
    }

    fn props<const N: usize>(entries: [(&str, WireValue); N]) -> WireMap {
        entries
            .into_iter()
            .map(|(key, value)| (Arc::<str>::from(key), value))
            .collect()
    }

    fn object(host: &Host, name: &str) -> Node {
        let id = host.world_mut().create_object(name);
        host.wrap(id.into()).unwrap()
    }

    fn object_id(node: &Node) -> ObjectID {
        match node.native_handle() {
            Some(NativeHandle::Object(id)) => id,
            other => panic!("expected an object handle, got {other:?}"),
        }
    }

    fn named(host: &Host, kind: &str, name: &str) -> Node {
        let node = Node::create(host, &kind.into()).unwrap();
        node.set_props(&props([("name", name.into())])).unwrap();
        node
    }

    fn child_names(host: &Host, parent: &Node) -> Vec<String> {
        let world = host.world();
        match parent.native_handle().unwrap() {
            NativeHandle::Object(id) => world
                .object(id)
                .unwrap()
                .children()
                .iter()
                .map(|&child| world.object(child).unwrap().name().to_string())
                .collect(),
            NativeHandle::Element(id) => world
                .element_children(id)
                .iter()
                .map(|&child| world.element(child).unwrap().core().name.clone())
                .collect(),
            NativeHandle::Component(_) => Vec::new(),
        }
    }

    fn vector(x: f64, y: f64, z: f64) -> WireValue {
        WireValue::Array(vec![x.into(), y.into(), z.into()])
    }

    // ---- Creation and identity ----

    #[test]
    fn create_picks_the_variant_by_kind() {
        let host = host();
        assert_eq!(Node::create(&host, &"GameObject".into()).unwrap().variant(), Variant::Container);
        assert_eq!(Node::create(&host, &"Light".into()).unwrap().variant(), Variant::Component);
        assert_eq!(Node::create(&host, &"Label".into()).unwrap().variant(), Variant::Element);
        assert_eq!(Node::create(&host, &"#Light".into()).unwrap().variant(), Variant::Deferred);
        assert_eq!(
            Node::create(&host, &Kind::Type(&graft_scene::types::GAME_OBJECT)).unwrap().variant(),
            Variant::Container
        );
        assert!(Node::create(&host, &"NoSuchThing".into()).is_none());
    }

    #[test]
    fn resource_paths_instantiate_prefabs() {
        let host = host();
        let template = host.world_mut().create_object("Crate");
        host.world_mut()
            .resources_mut()
            .insert("prefabs/crate", Asset::Prefab(template));

        let node = Node::create(&host, &"prefabs/crate".into()).unwrap();
        let id = object_id(&node);
        assert_ne!(id, template);
        assert_eq!(host.world().object(id).unwrap().name(), "Crate");
        assert_eq!(host.world().object(id).unwrap().parent(), Some(host.parking_root()));

        let loaded = Node::load_asset(&host, "prefabs/crate").unwrap();
        assert_ne!(loaded, node);
        assert!(Node::load_asset(&host, "prefabs/missing").is_none());
    }

    #[test]
    fn wrappers_are_stable_per_native_object() {
        let host = host();
        let node = Node::create(&host, &"GameObject".into()).unwrap();
        let handle = node.native_handle().unwrap();

        assert_eq!(host.wrap(handle).unwrap(), node);
        assert_eq!(Node::create(&host, &Kind::Handle(handle)).unwrap(), node);
        assert_eq!(Node::from_wire(&host, &node.to_wire()).unwrap(), node);
        assert_eq!(Node::from_wire(&host, &WireValue::external(handle)).unwrap(), node);

        let plain = host.world_mut().create_object("plain");
        let first = host.wrap(plain.into()).unwrap();
        assert_eq!(host.wrap(plain.into()).unwrap(), first);
    }

    #[test]
    fn dropped_wrappers_are_pruned() {
        let host = host();
        let id = host.world_mut().create_object("temp");
        drop(host.wrap(id.into()));
        assert_eq!(host.prune_wrappers(), 1);
        assert!(host.wrappers().is_empty());
        assert!(host.wrap(id.into()).is_some());
    }

    // ---- Containers ----

    #[test]
    fn containers_wait_under_the_parking_root() {
        let host = host();
        let scene = object(&host, "scene");
        let node = Node::create(&host, &"GameObject".into()).unwrap();
        let id = object_id(&node);

        assert_eq!(host.world().object(id).unwrap().parent(), Some(host.parking_root()));
        assert!(!host.world().active_in_hierarchy(id));

        node.set_parent(Some(&scene), None).unwrap();
        assert_eq!(host.world().object(id).unwrap().parent(), Some(object_id(&scene)));
        assert!(host.world().active_in_hierarchy(id));
    }

    #[test]
    fn detaching_a_container_parks_it_and_resets_its_transform() {
        let host = host();
        let scene = object(&host, "scene");
        let node = Node::create(&host, &"GameObject".into()).unwrap();
        node.set_parent(Some(&scene), None).unwrap();
        let id = object_id(&node);
        host.world_mut().transform_mut(id).unwrap().local_position = Vector3::new(1.0, 2.0, 3.0);

        // detaching again leaves it parked
        for _ in 0..2 {
            node.set_parent(None, None).unwrap();
            let world = host.world();
            assert_eq!(world.object(id).unwrap().parent(), Some(host.parking_root()));
            assert!(world.transform(id).unwrap().is_identity());
        }
        assert!(child_names(&host, &scene).is_empty());
    }

    #[test]
    fn insert_before_orders_siblings() {
        let host = host();
        let scene = object(&host, "scene");
        let [a, b, c] = ["A", "B", "C"].map(|name| named(&host, "GameObject", name));
        for node in [&a, &b, &c] {
            node.set_parent(Some(&scene), None).unwrap();
        }
        let d = named(&host, "GameObject", "D");
        d.set_parent(Some(&scene), Some(&b)).unwrap();
        assert_eq!(child_names(&host, &scene), ["A", "D", "B", "C"]);

        // moving within the same parent
        c.set_parent(Some(&scene), Some(&a)).unwrap();
        assert_eq!(child_names(&host, &scene), ["C", "A", "D", "B"]);
    }

    #[test]
    fn clear_parks_every_child() {
        let host = host();
        let scene = object(&host, "scene");
        let [a, b] = ["A", "B"].map(|name| named(&host, "GameObject", name));
        a.set_parent(Some(&scene), None).unwrap();
        b.set_parent(Some(&scene), None).unwrap();

        scene.clear().unwrap();
        assert!(child_names(&host, &scene).is_empty());
        assert_eq!(host.world().object(object_id(&a)).unwrap().parent(), Some(host.parking_root()));
    }

    #[test]
    fn a_node_cannot_parent_itself() {
        let host = host();
        let node = Node::create(&host, &"GameObject".into()).unwrap();
        assert!(matches!(
            node.set_parent(Some(&node), None),
            Err(NodeError::InvalidParent { .. })
        ));
    }

    #[test]
    fn disposed_nodes_reject_operations() {
        let host = host();
        let node = Node::create(&host, &"GameObject".into()).unwrap();
        let handle = node.native_handle().unwrap();

        node.dispose().unwrap();
        node.dispose().unwrap();
        assert!(node.is_disposed());
        assert!(!host.world().contains(handle));
        assert!(host.wrappers().get(handle).is_none());
        assert!(matches!(node.set_active(true), Err(NodeError::Disposed(_))));

        let other = Node::create(&host, &"GameObject".into()).unwrap();
        assert!(matches!(
            other.set_parent(Some(&node), None),
            Err(NodeError::Disposed(_))
        ));
    }

    #[test]
    fn container_bounding_rect_projects_renderer_bounds() {
        let host = host();
        {
            let mut world = host.world_mut();
            let eye = world.create_object("Main Camera");
            world.add_component(eye, "Camera").unwrap();
        }
        let cube = object(&host, "Cube");
        {
            let mut world = host.world_mut();
            let id = object_id(&cube);
            world.add_component(id, "MeshRenderer").unwrap();
            world.transform_mut(id).unwrap().local_position = Vector3::new(0.0, 0.0, 10.0);
        }

        let rect = cube.bounding_rect().unwrap();
        assert!(rect.width > 0.0 && rect.height > 0.0);
        assert!(rect.x < 960.0 && rect.x + rect.width > 960.0);
        assert!(rect.y < 540.0 && rect.y + rect.height > 540.0);

        let empty = object(&host, "Empty");
        assert!(empty.bounding_rect().is_none());
    }

    // ---- Components ----

    #[test]
    fn components_buffer_until_attached() {
        let host = host();
        let lamp = object(&host, "lamp");
        let light = Node::create(&host, &"Light".into()).unwrap();
        assert!(light.native_handle().is_none());

        light.set_props(&props([("intensity", 3.0.into())])).unwrap();
        light.set_props(&props([("range", 4.0.into())])).unwrap();
        light.set_active(false).unwrap();
        assert!(matches!(light.get_prop("intensity"), Err(NodeError::Unresolved(_))));

        light.set_parent(Some(&lamp), None).unwrap();
        let Some(NativeHandle::Component(id)) = light.native_handle() else {
            panic!("light should be attached");
        };
        assert_eq!(host.world().component_owner(id), Some(object_id(&lamp)));
        assert_eq!(light.get_prop("intensity").unwrap(), WireValue::Number(3.0));
        assert_eq!(light.get_prop("range").unwrap(), WireValue::Number(4.0));
        assert_eq!(light.get_prop("enabled").unwrap(), WireValue::Bool(false));
        assert_eq!(host.wrap(NativeHandle::Component(id)).unwrap(), light);
    }

    #[test]
    fn components_cannot_move_between_containers() {
        let host = host();
        let [first, second] = ["first", "second"].map(|name| object(&host, name));
        let light = Node::create(&host, &"Light".into()).unwrap();
        light.set_parent(Some(&first), None).unwrap();

        light.set_parent(Some(&first), None).unwrap();
        let err = light.set_parent(Some(&second), None).unwrap_err();
        assert!(matches!(err, NodeError::AttachmentChange { .. }));
        assert!(err.to_string().starts_with("Cannot change attachment of Light"));
    }

    #[test]
    fn detaching_destroys_a_destroyable_component() {
        let host = host();
        let lamp = object(&host, "lamp");
        let light = Node::create(&host, &"Light".into()).unwrap();
        light.set_parent(Some(&lamp), None).unwrap();

        for _ in 0..2 {
            light.set_parent(None, None).unwrap();
            assert!(light.native_handle().is_none());
            assert!(host.world().get_component(object_id(&lamp), &LIGHT).is_none());
        }

        // back to buffering; a second attach creates a fresh component
        light.set_props(&props([("intensity", 2.0.into())])).unwrap();
        light.set_parent(Some(&lamp), None).unwrap();
        assert_eq!(light.get_prop("intensity").unwrap(), WireValue::Number(2.0));
    }

    #[test]
    fn detaching_resets_an_indestructible_component() {
        let host = host();
        let cube = object(&host, "cube");
        let transform = Node::search(&host, "Transform", Some(&cube)).unwrap();
        assert_eq!(transform.variant(), Variant::Component);

        transform
            .set_props(&props([("localPosition", vector(1.0, 2.0, 3.0))]))
            .unwrap();
        let handle = transform.native_handle();
        for _ in 0..2 {
            transform.set_parent(None, None).unwrap();
            assert_eq!(transform.native_handle(), handle);
            assert_eq!(transform.get_prop("localPosition").unwrap(), vector(0.0, 0.0, 0.0));
        }
    }

    #[test]
    fn attaching_keeps_an_earlier_wrapper_registered() {
        let host = host();
        let lamp = object(&host, "lamp");
        let found = Node::search(&host, "Light", Some(&lamp)).unwrap();

        let light = Node::create(&host, &"Light".into()).unwrap();
        light.set_parent(Some(&lamp), None).unwrap();
        assert_eq!(light.native_handle(), found.native_handle());
        assert_eq!(Node::search(&host, "Light", Some(&lamp)).unwrap(), found);
        assert_eq!(host.wrap(found.native_handle().unwrap()).unwrap(), found);
    }

    #[test]
    fn set_active_needs_an_enabled_flag() {
        let host = host();
        let cube = object(&host, "cube");
        let transform = Node::search(&host, "Transform", Some(&cube)).unwrap();
        assert!(matches!(
            transform.set_active(false),
            Err(NodeError::Unsupported { op: "setActive", .. })
        ));
    }

    #[test]
    fn components_attach_only_to_containers() {
        let host = host();
        let light = Node::create(&host, &"Light".into()).unwrap();
        let label = Node::create(&host, &"Label".into()).unwrap();
        assert!(matches!(
            light.set_parent(Some(&label), None),
            Err(NodeError::InvalidParent { .. })
        ));
    }

    // ---- Search ----

    #[test]
    fn search_resolves_relative_to_scope() {
        let host = host();
        let scene = object(&host, "scene");
        let child = named(&host, "GameObject", "door");
        child.set_parent(Some(&scene), None).unwrap();

        assert_eq!(Node::search(&host, "door", Some(&scene)).unwrap(), child);
        assert_eq!(Node::search(&host, "door", None).unwrap(), child);
        assert!(Node::search(&host, "window", Some(&scene)).is_none());

        let light = Node::search(&host, "Light", Some(&scene)).unwrap();
        assert_eq!(Node::search(&host, "Light", Some(&scene)).unwrap(), light);
        assert!(Node::search(&host, "door", Some(&light)).is_none());
    }

    // ---- Deferred overrides ----

    #[test]
    fn deferred_nodes_resolve_on_attach() {
        let host = host();
        let lamp = object(&host, "lamp");
        let existing = host.world_mut().add_component(object_id(&lamp), "Light").unwrap();

        let node = Node::create(&host, &"#Light".into()).unwrap();
        assert_eq!(node.describe(), "#Light");
        node.set_props(&props([("intensity", 5.0.into())])).unwrap();
        assert!(matches!(node.set_active(true), Err(NodeError::Unresolved(_))));

        node.set_parent(Some(&lamp), None).unwrap();
        assert_eq!(node.native_handle(), Some(NativeHandle::Component(existing)));
        assert_eq!(node.get_prop("intensity").unwrap(), WireValue::Number(5.0));

        node.set_props(&props([("range", 7.0.into())])).unwrap();
        assert_eq!(node.get_prop("range").unwrap(), WireValue::Number(7.0));

        node.dispose().unwrap();
        assert!(host.world().contains(NativeHandle::Component(existing)));
    }

    #[test]
    fn detaching_an_unresolved_override_drops_buffered_props() {
        let host = host();
        let lamp = object(&host, "lamp");
        let existing = host.world_mut().add_component(object_id(&lamp), "Light").unwrap();

        let node = Node::create(&host, &"#Light".into()).unwrap();
        node.set_props(&props([("intensity", 5.0.into())])).unwrap();
        node.set_parent(None, None).unwrap();
        node.set_parent(None, None).unwrap();
        assert!(node.native_handle().is_none());

        node.set_parent(Some(&lamp), None).unwrap();
        assert_eq!(node.native_handle(), Some(NativeHandle::Component(existing)));
        assert_eq!(node.get_prop("intensity").unwrap(), WireValue::Number(1.0));
    }

    #[test]
    fn unresolvable_deferred_names_fail_on_attach() {
        let host = host();
        let lamp = object(&host, "lamp");
        let node = Node::create(&host, &"#Missing".into()).unwrap();
        let err = node.set_parent(Some(&lamp), None).unwrap_err();
        assert_eq!(
            err,
            NodeError::NotFound {
                name: "Missing".to_string(),
                scope: "GameObject \"lamp\"".to_string(),
            }
        );
    }

    // ---- Elements ----

    #[test]
    fn elements_attach_under_document_roots() {
        let host = host();
        let hud = object(&host, "hud");
        let label = Node::create(&host, &"Label".into()).unwrap();
        let Some(NativeHandle::Element(id)) = label.native_handle() else {
            panic!("label should be an element");
        };

        assert!(matches!(
            label.set_parent(Some(&hud), None),
            Err(NodeError::Scene(SceneError::MissingUiRoot(_)))
        ));

        host.world_mut().add_component(object_id(&hud), "UIDocument").unwrap();
        label.set_parent(Some(&hud), None).unwrap();
        let root = host.world_mut().ui_root(object_id(&hud)).unwrap();
        assert_eq!(host.world().element_parent(id), Some(root));

        for _ in 0..2 {
            label.set_parent(None, None).unwrap();
            assert_eq!(host.world().element_parent(id), None);
            assert!(host.world().element_children(root).is_empty());
        }
    }

    #[test]
    fn element_children_keep_insertion_order() {
        let host = host();
        let panel = named(&host, "VisualElement", "panel");
        let [a, b, c] = ["A", "B", "C"].map(|name| named(&host, "Label", name));
        for node in [&a, &b, &c] {
            node.set_parent(Some(&panel), None).unwrap();
        }
        let d = named(&host, "Label", "D");
        d.set_parent(Some(&panel), Some(&b)).unwrap();
        assert_eq!(child_names(&host, &panel), ["A", "D", "B", "C"]);

        panel.clear().unwrap();
        assert!(child_names(&host, &panel).is_empty());
    }

    #[test]
    fn element_props_apply_and_reset() {
        let host = host();
        let label = Node::create(&host, &"Label".into()).unwrap();
        label.set_props(&props([("text", "hi".into())])).unwrap();
        assert_eq!(label.get_prop("text").unwrap(), WireValue::string("hi"));

        label.set_props(&props([("text", WireValue::Undefined)])).unwrap();
        assert_eq!(label.get_prop("text").unwrap(), WireValue::string(""));

        label.set_active(false).unwrap();
        assert_eq!(label.get_prop("visible").unwrap(), WireValue::Bool(false));
    }

    #[test]
    fn failed_props_do_not_block_the_rest_of_the_batch() {
        let host = host();
        let label = Node::create(&host, &"Label".into()).unwrap();
        let err = label
            .set_props(&props([
                ("text", "kept".into()),
                ("bogus", 1.0.into()),
                ("tabIndex", 2.0.into()),
            ]))
            .unwrap_err();

        let NodeError::Props(failures) = err else {
            panic!("expected a batch error, got {err:?}");
        };
        assert_eq!(failures.keys().collect::<Vec<_>>(), ["bogus"]);
        assert!(matches!(
            failures.get("bogus"),
            Some(NodeError::Property(PropertyError::InvalidPath { .. }))
        ));
        assert_eq!(label.get_prop("text").unwrap(), WireValue::string("kept"));
        assert_eq!(label.get_prop("tabIndex").unwrap(), WireValue::Number(2.0));
    }

    #[test]
    fn element_bounding_rect_uses_layout() {
        let host = host();
        let panel = Node::create(&host, &"VisualElement".into()).unwrap();
        let Some(NativeHandle::Element(id)) = panel.native_handle() else {
            panic!("panel should be an element");
        };
        {
            let mut world = host.world_mut();
            let style = &mut world.element_mut(id).unwrap().core_mut().style;
            style.left.value = Length::px(10.0);
            style.top.value = Length::px(20.0);
            style.width.value = Length::px(200.0);
            style.height.value = Length::px(100.0);
        }
        let rect = panel.bounding_rect().unwrap();
        assert_eq!(rect, DomRect::new(10.0, 20.0, 200.0, 100.0));
        assert_eq!((rect.left(), rect.top()), (10.5, 20.5));
        assert_eq!((rect.right(), rect.bottom()), (210.5, 120.5));

        let light = Node::create(&host, &"Light".into()).unwrap();
        assert!(light.bounding_rect().is_none());
    }

    #[test]
    fn dom_rect_wire_form_has_edges() {
        let wire = DomRect::new(1.0, 2.0, 3.0, 4.0).to_wire();
        assert_eq!(wire.get("width"), Some(&WireValue::Number(3.0)));
        assert_eq!(wire.get("left"), Some(&WireValue::Number(1.5)));
        assert_eq!(wire.get("bottom"), Some(&WireValue::Number(6.5)));
    }

    // ---- Events ----

    type Seen = Rc<RefCell<Vec<(String, f64, Option<Node>, Option<CurrentEvent>)>>>;

    fn recording_handler(seen: &Seen) -> Handler {
        let seen = seen.clone();
        Handler::new(move |event: &Event| {
            seen.borrow_mut().push((
                event.event_type().to_string(),
                event.time_stamp(),
                event.target().cloned(),
                EventDispatchContext::current_event(),
            ));
        })
    }

    fn click(target: graft_ids::ElementID, seconds: f64) -> NativeEvent {
        NativeEvent::new(
            EventKind::Click,
            target,
            seconds,
            EventData::Pointer {
                position: Vector2::new(3.0, 4.0),
                delta: Vector2::zero(),
                button: 0,
                pointer_id: 1,
                click_count: 1,
                modifiers: Modifiers::default(),
            },
        )
    }

    #[test]
    fn handlers_receive_pooled_event_records() {
        let host = host();
        let button = Node::create(&host, &"Button".into()).unwrap();
        let Some(NativeHandle::Element(id)) = button.native_handle() else {
            panic!("button should be an element");
        };
        let seen: Seen = Rc::default();
        button
            .set_props(&props([("onClick", recording_handler(&seen).to_wire())]))
            .unwrap();
        assert_eq!(host.world().subscription_count(id), 1);

        assert_eq!(host.dispatch(click(id, 1.5)), 1);
        assert_eq!(EventDispatchContext::current_event(), None);
        assert_eq!(host.pooled_events(EventCategory::Pointer), 1);

        let seen = seen.borrow();
        let (kind, time_stamp, target, current) = &seen[0];
        assert_eq!(kind, "click");
        assert_eq!(*time_stamp, 1500.0);
        assert_eq!(target.as_ref(), Some(&button));
        assert_eq!(
            *current,
            Some(CurrentEvent {
                kind: EventKind::Click,
                time_stamp: 1500.0,
            })
        );
    }

    #[test]
    fn handler_props_follow_identity() {
        let host = host();
        let button = Node::create(&host, &"Button".into()).unwrap();
        let Some(NativeHandle::Element(id)) = button.native_handle() else {
            panic!("button should be an element");
        };
        let seen: Seen = Rc::default();
        let wire = recording_handler(&seen).to_wire();

        button.set_props(&props([("onClick", wire.clone())])).unwrap();
        button.set_props(&props([("onClick", wire)])).unwrap();
        assert_eq!(host.world().subscription_count(id), 1);

        let other: Seen = Rc::default();
        button
            .set_props(&props([("onClick", recording_handler(&other).to_wire())]))
            .unwrap();
        assert_eq!(host.world().subscription_count(id), 1);
        host.dispatch(click(id, 0.0));
        assert!(seen.borrow().is_empty());
        assert_eq!(other.borrow().len(), 1);

        button.set_props(&props([("onClick", WireValue::Null)])).unwrap();
        assert_eq!(host.world().subscription_count(id), 0);
    }

    #[test]
    fn non_handler_values_are_rejected() {
        let host = host();
        let button = Node::create(&host, &"Button".into()).unwrap();
        let err = button
            .set_props(&props([("onClick", "nope".into())]))
            .unwrap_err();
        let NodeError::Props(failures) = err else {
            panic!("expected a batch error, got {err:?}");
        };
        assert_eq!(
            failures.get("onClick"),
            Some(&NodeError::InvalidHandler {
                key: "onClick".to_string(),
                found: "string",
            })
        );
    }

    #[test]
    fn disposing_an_element_drops_its_subscriptions() {
        let host = host();
        let button = Node::create(&host, &"Button".into()).unwrap();
        let Some(NativeHandle::Element(id)) = button.native_handle() else {
            panic!("button should be an element");
        };
        let seen: Seen = Rc::default();
        button
            .set_props(&props([("onClick", recording_handler(&seen).to_wire())]))
            .unwrap();
        button.dispose().unwrap();
        assert_eq!(host.world().subscription_count(id), 0);
        assert!(host.world().element(id).is_none());
    }

    #[test]
    fn dispatch_scopes_nest() {
        let outer = CurrentEvent {
            kind: EventKind::KeyDown,
            time_stamp: 10.0,
        };
        let inner = CurrentEvent {
            kind: EventKind::Click,
            time_stamp: 20.0,
        };
        {
            let _outer = DispatchScope::enter(outer);
            {
                let _inner = DispatchScope::enter(inner);
                assert_eq!(EventDispatchContext::current_event(), Some(inner));
            }
            assert_eq!(EventDispatchContext::current_event(), Some(outer));
        }
        assert_eq!(EventDispatchContext::current_event(), None);
    }

    #[test]
    fn event_props_map_to_native_kinds() {
        assert_eq!(event_kind_for_prop("onClick"), Some(EventKind::Click));
        assert_eq!(event_kind_for_prop("onPointerDown"), Some(EventKind::PointerDown));
        assert_eq!(event_kind_for_prop("text"), None);
        assert!(event_prop_names().all(|name| name.starts_with("on")));
    }

    // ---- Config ----

    #[test]
    fn config_reads_partial_toml() {
        let config = GraftConfig::from_toml_str("reference_dpi = 72.0\nparking_name = \"[pool]\"\n").unwrap();
        assert_eq!(config.reference_dpi, 72.0);
        assert_eq!(config.parking_name, "[pool]");
        assert_eq!(config.handle_prop, "$$$");
        assert!(config.path_dash_alias);

        assert!(matches!(
            GraftConfig::from_toml_str("reference_dpi = \"high\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn parking_name_comes_from_config() {
        let config = GraftConfig {
            parking_name: "[pool]".to_string(),
            ..GraftConfig::default()
        };
        let host = Host::with_config(World::new(), config);
        let parking = host.parking_root();
        assert_eq!(host.world().object(parking).unwrap().name(), "[pool]");
        assert!(!host.world().object(parking).unwrap().active_self());
        assert_eq!(host.parking_root(), parking);
    }
}
