use std::cell::RefCell;
use std::rc::Rc;

use graft_ids::{NativeHandle, ObjectID};
use graft_nodes::{Event, Handler, Host, Node, NodeError, Variant};
use graft_reconciler::{EventPriority, NO_EVENT_TIMESTAMP, ReconcileError, ReconcilerAdapter, ReconcilerTarget};
use graft_scene::types::LIGHT;
use graft_scene::{Asset, EventData, EventKind, NativeEvent, UiElement, World};
use graft_variant::{WireMap, WireValue};
use serde_json::json;

fn props(value: serde_json::Value) -> WireMap {
    WireValue::from_json_value(value).as_object().cloned().unwrap()
}

/// A scene with one `scene` root object carrying a UI document.
fn setup() -> (ReconcilerAdapter, Node) {
    let mut world = World::new();
    let scene = world.create_object("scene");
    world.add_component(scene, "UIDocument").unwrap();
    let adapter = ReconcilerAdapter::new(Host::new(world));
    let root = adapter.container(scene.into()).unwrap();
    (adapter, root)
}

fn object_id(node: &Node) -> ObjectID {
    match node.native_handle() {
        Some(NativeHandle::Object(id)) => id,
        other => panic!("expected an object handle, got {other:?}"),
    }
}

fn child_names(adapter: &ReconcilerAdapter, parent: &Node) -> Vec<String> {
    let world = adapter.host().world();
    world
        .object(object_id(parent))
        .unwrap()
        .children()
        .iter()
        .map(|&child| world.object(child).unwrap().name().to_string())
        .collect()
}

#[test]
fn mounts_objects_and_components() {
    let (adapter, root) = setup();
    let player = adapter
        .create_instance("GameObject", &props(json!({ "name": "player", "tag": "Player" })))
        .unwrap();
    let light = adapter
        .create_instance("Light", &props(json!({ "intensity": 2.5, "range": 12 })))
        .unwrap();
    adapter.append_initial_child(&player, &light).unwrap();
    adapter.append_child_to_container(&root, &player).unwrap();

    assert_eq!(child_names(&adapter, &root), ["player"]);
    assert_eq!(player.get_prop("tag").unwrap(), WireValue::string("Player"));

    let world = adapter.host().world();
    let component = world.get_component(object_id(&player), &LIGHT).unwrap();
    assert_eq!(light.native_handle(), Some(NativeHandle::Component(component)));
    drop(world);
    assert_eq!(light.get_prop("intensity").unwrap(), WireValue::Number(2.5));
    assert_eq!(light.get_prop("range").unwrap(), WireValue::Number(12.0));
}

#[test]
fn insert_before_places_siblings() {
    let (adapter, root) = setup();
    let [a, b, c, d] = ["A", "B", "C", "D"].map(|name| {
        adapter
            .create_instance("GameObject", &props(json!({ "name": name })))
            .unwrap()
    });
    for node in [&a, &b, &c] {
        adapter.append_child_to_container(&root, node).unwrap();
    }
    adapter.insert_in_container_before(&root, &d, &b).unwrap();
    assert_eq!(child_names(&adapter, &root), ["A", "D", "B", "C"]);

    adapter.insert_before(&root, &a, &c).unwrap();
    assert_eq!(child_names(&adapter, &root), ["D", "B", "A", "C"]);
}

#[test]
fn updates_apply_only_the_diff() {
    let (adapter, root) = setup();
    let first = props(json!({ "name": "title", "text": "Hello", "tooltip": "tip" }));
    let label = adapter.create_instance("Label", &first).unwrap();
    adapter.append_child(&root, &label).unwrap();

    // edit the label natively; an unchanged key must not overwrite it
    let Some(NativeHandle::Element(id)) = label.native_handle() else {
        panic!("label should be an element");
    };
    adapter.host().world_mut().element_mut(id).unwrap().core_mut().name = "renamed".to_string();

    let second = props(json!({ "name": "title", "text": "World" }));
    adapter.commit_update(&label, &first, &second).unwrap();
    assert_eq!(label.get_prop("name").unwrap(), WireValue::string("renamed"));
    assert_eq!(label.get_prop("text").unwrap(), WireValue::string("World"));
    assert_eq!(label.get_prop("tooltip").unwrap(), WireValue::string(""));
}

#[test]
fn elements_mount_under_the_document_root() {
    let (adapter, root) = setup();
    let panel = adapter
        .create_instance("VisualElement", &props(json!({ "name": "panel" })))
        .unwrap();
    let button = adapter
        .create_instance("Button", &props(json!({ "name": "ok", "text": "OK" })))
        .unwrap();
    adapter.append_initial_child(&panel, &button).unwrap();
    adapter.append_child_to_container(&root, &panel).unwrap();

    let found = Node::search(adapter.host(), "ok", Some(&panel)).unwrap();
    assert_eq!(found, button);

    let ui_root = adapter.host().world_mut().ui_root(object_id(&root)).unwrap();
    let Some(NativeHandle::Element(panel_id)) = panel.native_handle() else {
        panic!("panel should be an element");
    };
    assert_eq!(adapter.host().world().element_parent(panel_id), Some(ui_root));
}

#[test]
fn handle_prop_wraps_existing_objects_and_assets() {
    let (adapter, root) = setup();
    let existing = adapter.host().world_mut().create_object("existing");
    let mut with_handle = props(json!({ "name": "renamed" }));
    with_handle.insert("$$$".into(), WireValue::external(NativeHandle::Object(existing)));
    let node = adapter.create_instance("GameObject", &with_handle).unwrap();
    assert_eq!(object_id(&node), existing);
    assert_eq!(node.get_prop("name").unwrap(), WireValue::string("renamed"));
    assert_eq!(adapter.container(existing.into()).unwrap(), node);

    let template = adapter.host().world_mut().create_object("Crate");
    let mut with_asset = WireMap::new();
    with_asset.insert("$$$".into(), WireValue::external(Asset::Prefab(template)));
    let copy = adapter.create_instance("ignored", &with_asset).unwrap();
    assert_ne!(object_id(&copy), template);
    adapter.append_child_to_container(&root, &copy).unwrap();
    assert_eq!(child_names(&adapter, &root), ["Crate"]);
}

#[test]
fn deferred_overrides_patch_existing_components() {
    let (adapter, root) = setup();
    let player = adapter
        .create_instance("GameObject", &props(json!({ "name": "player" })))
        .unwrap();
    let transform = adapter
        .create_instance("#Transform", &props(json!({ "localPosition": [1, 2, 3] })))
        .unwrap();
    assert_eq!(transform.variant(), Variant::Deferred);

    adapter.append_initial_child(&player, &transform).unwrap();
    adapter.append_child_to_container(&root, &player).unwrap();
    let position = adapter
        .host()
        .world()
        .transform(object_id(&player))
        .unwrap()
        .local_position;
    assert_eq!((position.x, position.y, position.z), (1.0, 2.0, 3.0));

    adapter
        .commit_update(
            &transform,
            &props(json!({ "localPosition": [1, 2, 3] })),
            &props(json!({ "localPosition": [4, 5, 6] })),
        )
        .unwrap();
    let position = adapter
        .host()
        .world()
        .transform(object_id(&player))
        .unwrap()
        .local_position;
    assert_eq!(position.z, 6.0);
}

#[test]
fn hide_remove_clear_and_delete() {
    let (adapter, root) = setup();
    let [a, b] = ["a", "b"].map(|name| {
        adapter
            .create_instance("GameObject", &props(json!({ "name": name })))
            .unwrap()
    });
    adapter.append_child_to_container(&root, &a).unwrap();
    adapter.append_child_to_container(&root, &b).unwrap();

    adapter.hide_instance(&a).unwrap();
    assert_eq!(a.get_prop("activeSelf").unwrap(), WireValue::Bool(false));
    adapter.unhide_instance(&a).unwrap();
    assert_eq!(a.get_prop("activeSelf").unwrap(), WireValue::Bool(true));

    adapter.remove_child_from_container(&root, &a).unwrap();
    assert_eq!(child_names(&adapter, &root), ["b"]);
    let parking = adapter.host().parking_root();
    assert_eq!(adapter.host().world().object(object_id(&a)).unwrap().parent(), Some(parking));

    adapter.clear_container(&root).unwrap();
    assert!(child_names(&adapter, &root).is_empty());

    let handle = b.native_handle().unwrap();
    adapter.detach_deleted_instance(&b).unwrap();
    assert!(!adapter.host().world().contains(handle));
    assert!(matches!(
        adapter.append_child_to_container(&root, &b),
        Err(ReconcileError::Node(NodeError::Disposed(_)))
    ));
}

#[test]
fn unsupported_instances_are_errors() {
    let (adapter, _) = setup();
    assert_eq!(
        adapter.create_text_instance("loose text"),
        Err(ReconcileError::TextInstance("loose text".to_string()))
    );
    assert!(matches!(
        adapter.create_instance("Spaceship", &WireMap::new()),
        Err(ReconcileError::UnknownType(_))
    ));
    assert!(!adapter.should_set_text_content("Label", &WireMap::new()));
    assert!(adapter.preload_instance("Label", &WireMap::new()));
    assert!(!adapter.may_suspend_commit("Label", &WireMap::new()));
}

#[test]
fn bad_initial_props_fail_creation() {
    let (adapter, _) = setup();
    let err = adapter
        .create_instance("Label", &props(json!({ "text": "ok", "noSuchProp": 1 })))
        .unwrap_err();
    let ReconcileError::Node(NodeError::Props(batch)) = err else {
        panic!("expected a batch error, got {err:?}");
    };
    assert_eq!(batch.keys().collect::<Vec<_>>(), ["noSuchProp"]);
}

// ---- Events and priorities ----

#[derive(Debug, PartialEq)]
struct Seen {
    priority: EventPriority,
    event_type: Option<&'static str>,
    time_stamp: f64,
    after_tracking: Option<&'static str>,
}

#[test]
fn priorities_follow_the_event_being_handled() {
    let (adapter, root) = setup();
    let adapter = Rc::new(adapter);
    let seen: Rc<RefCell<Vec<Seen>>> = Rc::default();

    let handler = {
        let adapter = Rc::clone(&adapter);
        let seen = Rc::clone(&seen);
        Handler::new(move |_: &Event| {
            let priority = adapter.resolve_update_priority();
            let event_type = adapter.resolve_event_type();
            let time_stamp = adapter.resolve_event_timestamp();
            adapter.track_scheduler_event();
            seen.borrow_mut().push(Seen {
                priority,
                event_type,
                time_stamp,
                after_tracking: adapter.resolve_event_type(),
            });
        })
    };
    let button = adapter
        .create_instance("Button", &props(json!({ "name": "go" })))
        .unwrap();
    let mut on_click = WireMap::new();
    on_click.insert("onClick".into(), handler.to_wire());
    button.set_props(&on_click).unwrap();
    adapter.append_child_to_container(&root, &button).unwrap();

    let Some(NativeHandle::Element(id)) = button.native_handle() else {
        panic!("button should be an element");
    };
    adapter
        .host()
        .dispatch(NativeEvent::new(EventKind::Click, id, 2.0, EventData::None));

    assert_eq!(
        seen.borrow().as_slice(),
        [Seen {
            priority: EventPriority::DISCRETE,
            event_type: Some("click"),
            time_stamp: 2000.0,
            after_tracking: None,
        }]
    );

    assert_eq!(adapter.resolve_update_priority(), EventPriority::DEFAULT);
    assert_eq!(adapter.resolve_event_type(), None);
    assert_eq!(adapter.resolve_event_timestamp(), NO_EVENT_TIMESTAMP);

    adapter.set_current_update_priority(EventPriority::IDLE);
    assert_eq!(adapter.get_current_update_priority(), EventPriority::IDLE);
    assert_eq!(adapter.resolve_update_priority(), EventPriority::IDLE);
}
