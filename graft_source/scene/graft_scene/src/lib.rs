#![forbid(unsafe_code)]

mod arena;
pub mod catalog;
pub mod components;
pub mod error;
pub mod event;
pub mod object;
pub mod resources;
pub mod screen;
pub mod types;
pub mod ui;
pub mod world;

pub use arena::Arena;
pub use catalog::catalog;
pub use components::*;
pub use error::SceneError;
pub use event::*;
pub use graft_properties::{PropertyContainer, TypeInfo};
pub use object::{GameObject, ObjectCore};
pub use resources::{Asset, Resources};
pub use screen::Screen;
pub use ui::*;
pub use world::World;

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use graft_ids::{ElementID, NativeHandle, ObjectID};
    use graft_properties::{PropertyAccessor, PropertyError, PropertyPath};
    use graft_structs::{Quaternion, Vector3};
    use graft_variant::{ConversionRegistry, WireValue};

    use super::*;
    use crate::style::Length;
    use crate::types::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    fn path(text: &str) -> PropertyPath {
        PropertyPath::parse(text).unwrap()
    }

    fn accessor() -> PropertyAccessor {
        PropertyAccessor::new(catalog(), ConversionRegistry::new())
    }

    fn names(world: &World, ids: &[ObjectID]) -> Vec<String> {
        ids.iter()
            .map(|&id| world.object(id).unwrap().name().to_string())
            .collect()
    }

    // ---- Objects ----

    #[test]
    fn new_object_is_a_root_with_a_transform() {
        let mut world = World::new();
        let cube = world.create_object("Cube");
        assert_eq!(world.roots(), &[cube]);
        let transform = world.object(cube).unwrap().transform().unwrap();
        assert_eq!(world.component_type(transform).unwrap().name(), "Transform");
        assert!(world.transform(cube).unwrap().is_identity());
        assert_eq!(world.component_owner(transform), Some(cube));
    }

    #[test]
    fn set_parent_orders_before_sibling() {
        let mut world = World::new();
        let parent = world.create_object("parent");
        let a = world.create_object("a");
        let b = world.create_object("b");
        let c = world.create_object("c");
        world.set_parent(a, Some(parent), None).unwrap();
        world.set_parent(b, Some(parent), None).unwrap();
        world.set_parent(c, Some(parent), Some(a)).unwrap();

        let children = world.object(parent).unwrap().children().to_vec();
        assert_eq!(names(&world, &children), ["c", "a", "b"]);
        assert_eq!(world.roots(), &[parent]);
        assert_eq!(world.sibling_index(b), Some(2));

        // moving within the same parent
        world.set_parent(b, Some(parent), Some(c)).unwrap();
        let children = world.object(parent).unwrap().children().to_vec();
        assert_eq!(names(&world, &children), ["b", "c", "a"]);

        world.set_parent(a, None, None).unwrap();
        assert_eq!(world.roots(), &[parent, a]);
        assert_eq!(world.object(a).unwrap().parent(), None);
    }

    #[test]
    fn set_parent_keeps_local_transform() {
        let mut world = World::new();
        let parent = world.create_object("parent");
        let child = world.create_object("child");
        world.transform_mut(parent).unwrap().local_position = Vector3::new(10.0, 0.0, 0.0);
        world.transform_mut(child).unwrap().local_position = Vector3::new(1.0, 0.0, 0.0);
        world.set_parent(child, Some(parent), None).unwrap();
        assert_eq!(world.transform(child).unwrap().local_position, Vector3::new(1.0, 0.0, 0.0));
        let world_pos = world.world_matrix(child).multiply_point(Vector3::zero());
        assert!(approx(world_pos.x, 11.0));
    }

    #[test]
    fn set_parent_rejects_cycles_and_foreign_siblings() {
        let mut world = World::new();
        let a = world.create_object("a");
        let b = world.create_object("b");
        let stranger = world.create_object("stranger");
        world.set_parent(b, Some(a), None).unwrap();

        let err = world.set_parent(a, Some(b), None).unwrap_err();
        assert_eq!(
            err,
            SceneError::Cycle {
                child: a.into(),
                parent: b.into()
            }
        );
        assert!(matches!(world.set_parent(a, Some(a), None), Err(SceneError::Cycle { .. })));

        let err = world.set_parent(stranger, Some(a), Some(stranger)).map(|_| ());
        assert_eq!(err, Ok(()));
        let other = world.create_object("other");
        let err = world.set_parent(other, Some(a), Some(stranger)).unwrap_err();
        assert!(matches!(err, SceneError::NotAChild { .. }));
        assert_eq!(err.to_string(), format!("{} is not a child of GameObject \"a\"", NativeHandle::from(stranger)));
    }

    #[test]
    fn destroy_object_removes_subtree_and_components() {
        let mut world = World::new();
        let root = world.create_object("root");
        let child = world.create_object("child");
        world.set_parent(child, Some(root), None).unwrap();
        let light = world.add_component(child, "Light").unwrap();
        let document = world.add_component(root, "UIDocument").unwrap();
        let ui = world.ui_root(root).unwrap();

        world.destroy_object(root).unwrap();
        assert!(world.object(root).is_none());
        assert!(world.object(child).is_none());
        assert!(world.component(light).is_none());
        assert!(world.component(document).is_none());
        assert!(world.element(ui).is_none());
        assert!(world.roots().is_empty());
        assert_eq!(world.destroy_object(root), Err(SceneError::DeadHandle(root.into())));
    }

    #[test]
    fn stale_ids_do_not_resolve_after_reuse() {
        let mut world = World::new();
        let first = world.create_object("first");
        world.destroy_object(first).unwrap();
        let second = world.create_object("second");
        assert_eq!(first.index(), second.index());
        assert!(world.object(first).is_none());
        assert!(!world.contains(first.into()));
        assert!(world.contains(second.into()));
    }

    #[test]
    fn active_in_hierarchy_follows_ancestors() {
        let mut world = World::new();
        let parent = world.create_object("parent");
        let child = world.create_object("child");
        world.set_parent(child, Some(parent), None).unwrap();
        assert!(world.active_in_hierarchy(child));
        world.set_active(parent, false).unwrap();
        assert!(world.object(child).unwrap().active_self());
        assert!(!world.active_in_hierarchy(child));
    }

    #[test]
    fn find_by_name_and_path_skips_inactive() {
        let mut world = World::new();
        let ui = world.create_object("UI");
        let panel = world.create_object("Panel");
        let button = world.create_object("Button");
        world.set_parent(panel, Some(ui), None).unwrap();
        world.set_parent(button, Some(panel), None).unwrap();

        assert_eq!(world.find("Button"), Some(button));
        assert_eq!(world.find("UI/Panel/Button"), Some(button));
        assert_eq!(world.find("/UI/Panel"), Some(panel));
        assert_eq!(world.find("UI/Nope"), None);

        world.set_active(panel, false).unwrap();
        assert_eq!(world.find("Button"), None);
        assert_eq!(world.find("UI/Panel/Button"), None);
        assert_eq!(world.find_child(ui, "Panel"), Some(panel));
    }

    #[test]
    fn instantiate_deep_clones() {
        let mut world = World::new();
        let template = world.create_object("Lamp");
        let bulb = world.create_object("Bulb");
        world.set_parent(bulb, Some(template), None).unwrap();
        let light = world.add_component(bulb, "Light").unwrap();
        world.component_as_mut::<Light>(light, &LIGHT).unwrap().intensity = 4.0;
        world.add_component(template, "UIDocument").unwrap();
        let ui = world.ui_root(template).unwrap();
        let label = world.create_element("Label").unwrap();
        world.insert_element(ui, label, None).unwrap();

        let copy = world.instantiate(template).unwrap();
        assert_ne!(copy, template);
        assert_eq!(world.roots().last(), Some(&copy));

        let copied_bulb = world.find_child(copy, "Bulb").unwrap();
        assert_ne!(copied_bulb, bulb);
        let copied_light = world.get_component(copied_bulb, &LIGHT).unwrap();
        assert_ne!(copied_light, light);
        assert_eq!(world.component_owner(copied_light), Some(copied_bulb));
        assert_eq!(world.component_as::<Light>(copied_light, &LIGHT).unwrap().intensity, 4.0);

        let copied_ui = world.ui_root(copy).unwrap();
        assert_ne!(copied_ui, ui);
        assert_eq!(world.element_children(copied_ui).len(), 1);
    }

    // ---- Components ----

    #[test]
    fn get_component_matches_derived_types() {
        let mut world = World::new();
        let cube = world.create_object("Cube");
        let renderer = world.add_component(cube, "MeshRenderer").unwrap();
        assert_eq!(world.get_component(cube, &RENDERER), Some(renderer));
        assert_eq!(world.get_component(cube, &COMPONENT), world.object(cube).unwrap().transform());
        assert_eq!(world.get_component(cube, &CAMERA), None);

        let camera_type = world.component_type_named("Camera").unwrap();
        let camera = world.get_or_add_component(cube, camera_type).unwrap();
        assert_eq!(world.get_or_add_component(cube, camera_type).unwrap(), camera);
    }

    #[test]
    fn unknown_component_type_is_reported() {
        let mut world = World::new();
        let cube = world.create_object("Cube");
        let err = world.add_component(cube, "Rigidbody").unwrap_err();
        assert_eq!(err.to_string(), "unknown component type \"Rigidbody\"");
    }

    #[test]
    fn transform_is_unique_and_indestructible() {
        let mut world = World::new();
        let cube = world.create_object("Cube");
        let transform = world.object(cube).unwrap().transform().unwrap();
        assert_eq!(world.add_component(cube, "Transform").unwrap(), transform);
        assert_eq!(world.object(cube).unwrap().components().len(), 1);
        assert_eq!(
            world.destroy_component(transform),
            Err(SceneError::Indestructible("Transform"))
        );
    }

    #[test]
    fn destroy_component_detaches_it() {
        let mut world = World::new();
        let cube = world.create_object("Cube");
        let light = world.add_component(cube, "Light").unwrap();
        world.destroy_component(light).unwrap();
        assert!(world.component(light).is_none());
        assert_eq!(world.object(cube).unwrap().components().len(), 1);
    }

    #[test]
    fn destroying_a_document_drops_its_ui_tree() {
        let mut world = World::new();
        let hud = world.create_object("hud");
        let document = world.add_component(hud, "UIDocument").unwrap();
        let root = world.ui_root(hud).unwrap();
        let label = world.create_element("Label").unwrap();
        world.insert_element(root, label, None).unwrap();
        assert_eq!(world.element_count(), 2);

        world.destroy_component(document).unwrap();
        assert_eq!(world.element_count(), 0);

        // a root that is already gone does not stop the object from going
        let menu = world.create_object("menu");
        world.add_component(menu, "UIDocument").unwrap();
        let root = world.ui_root(menu).unwrap();
        world.destroy_element(root).unwrap();
        world.destroy_object(menu).unwrap();
        assert!(world.object(menu).is_none());
    }

    #[test]
    fn reset_component_restores_defaults_in_place() {
        let mut world = World::new();
        let cube = world.create_object("Cube");
        {
            let transform = world.transform_mut(cube).unwrap();
            transform.local_position = Vector3::new(1.0, 2.0, 3.0);
            transform.local_rotation = Quaternion::from_euler_degrees(Vector3::new(0.0, 90.0, 0.0));
            transform.base.base.name = "kept".into();
        }
        let id = world.object(cube).unwrap().transform().unwrap();
        world.reset_component(id).unwrap();
        let transform = world.transform(cube).unwrap();
        assert!(transform.is_identity());
        assert_eq!(transform.base.base.name, "kept");
        assert_eq!(transform.base.game_object, cube);
    }

    #[test]
    fn enabled_flag_only_on_behaviours() {
        let mut world = World::new();
        let cube = world.create_object("Cube");
        let light = world.add_component(cube, "Light").unwrap();
        let transform = world.object(cube).unwrap().transform().unwrap();
        assert_eq!(world.set_component_enabled(light, false), Ok(true));
        assert_eq!(world.component(light).unwrap().enabled(), Some(false));
        assert_eq!(world.set_component_enabled(transform, false), Ok(false));
    }

    // ---- UI elements ----

    fn element_tree(world: &mut World) -> (ElementID, [ElementID; 3]) {
        let root = world.create_element("VisualElement").unwrap();
        let kids = [
            world.create_element("Label").unwrap(),
            world.create_element("Button").unwrap(),
            world.create_element("Toggle").unwrap(),
        ];
        for kid in kids {
            world.insert_element(root, kid, None).unwrap();
        }
        (root, kids)
    }

    #[test]
    fn insert_element_adjusts_index_within_same_parent() {
        let mut world = World::new();
        let (root, [a, b, c]) = element_tree(&mut world);
        world.insert_element(root, a, Some(2)).unwrap();
        assert_eq!(world.element_children(root), &[b, a, c]);
        world.insert_element(root, c, Some(0)).unwrap();
        assert_eq!(world.element_children(root), &[c, b, a]);
        world.insert_element(root, b, Some(99)).unwrap();
        assert_eq!(world.element_children(root), &[c, a, b]);
        assert_eq!(world.index_of(root, a), Some(1));
    }

    #[test]
    fn insert_element_moves_between_parents_and_rejects_cycles() {
        let mut world = World::new();
        let (root, [a, b, _]) = element_tree(&mut world);
        world.insert_element(a, b, None).unwrap();
        assert_eq!(world.element_parent(b), Some(a));
        assert_eq!(world.index_of(root, b), None);

        let err = world.insert_element(b, root, None).unwrap_err();
        assert!(matches!(err, SceneError::Cycle { .. }));
    }

    #[test]
    fn remove_and_clear_elements() {
        let mut world = World::new();
        let (root, [a, b, c]) = element_tree(&mut world);
        world.remove_element(root, b).unwrap();
        assert_eq!(world.element_parent(b), None);
        assert!(matches!(world.remove_element(root, b), Err(SceneError::NotAChild { .. })));

        let cleared = world.clear_element(root).unwrap();
        assert_eq!(cleared, vec![a, c]);
        assert!(world.element_children(root).is_empty());
        assert_eq!(world.element_parent(a), None);
        assert!(world.element(a).is_some());
    }

    #[test]
    fn query_element_searches_depth_first() {
        let mut world = World::new();
        let (root, [a, b, _]) = element_tree(&mut world);
        world.element_mut(root).unwrap().core_mut().name = "root".into();
        world.element_mut(b).unwrap().core_mut().name = "ok".into();
        let nested = world.create_element("Label").unwrap();
        world.element_mut(nested).unwrap().core_mut().name = "deep".into();
        world.insert_element(a, nested, None).unwrap();

        assert_eq!(world.query_element(root, "root"), Some(root));
        assert_eq!(world.query_element(root, "deep"), Some(nested));
        assert_eq!(world.query_element(root, "ok"), Some(b));
        assert_eq!(world.query_element(root, "missing"), None);
    }

    #[test]
    fn destroy_element_drops_subtree_and_subscriptions() {
        let mut world = World::new();
        let (root, [a, _, _]) = element_tree(&mut world);
        world.subscribe(a, EventKind::Click, Rc::new(|_: &NativeEvent| {})).unwrap();
        assert_eq!(world.subscription_count(a), 1);
        world.destroy_element(root).unwrap();
        assert!(world.element(a).is_none());
        assert_eq!(world.subscription_count(a), 0);
        assert_eq!(world.element_count(), 0);
    }

    #[test]
    fn instantiate_tree_clones_detached() {
        let mut world = World::new();
        let (root, _) = element_tree(&mut world);
        let parent = world.create_element("VisualElement").unwrap();
        world.insert_element(parent, root, None).unwrap();

        let copy = world.instantiate_tree(root).unwrap();
        assert_eq!(world.element_parent(copy), None);
        assert_eq!(world.element_children(copy).len(), 3);
        assert_eq!(world.element(copy).unwrap().type_info(), &VISUAL_ELEMENT);
        let label = world.element_children(copy)[0];
        assert_eq!(world.element(label).unwrap().type_info().name, "Label");
    }

    #[test]
    fn world_bound_accumulates_ancestor_layout() {
        let mut world = World::new();
        let root = world.create_element("VisualElement").unwrap();
        let child = world.create_element("Label").unwrap();
        world.insert_element(root, child, None).unwrap();
        {
            let style = &mut world.element_mut(root).unwrap().core_mut().style;
            style.left.value = Length::px(10.0);
            style.top.value = Length::px(20.0);
            style.width.value = Length::px(200.0);
            style.height.value = Length::px(100.0);
        }
        {
            let style = &mut world.element_mut(child).unwrap().core_mut().style;
            style.left.value = Length::px(5.0);
            style.margin_top.value = Length::px(5.0);
            style.width.value = Length::percent(50.0);
            style.height.value = Length::px(10.0);
        }
        let rect = world.world_bound(child).unwrap();
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (15.0, 25.0, 100.0, 10.0));
    }

    #[test]
    fn ui_root_is_created_once() {
        let mut world = World::new();
        let hud = world.create_object("hud");
        assert_eq!(world.ui_root(hud), Err(SceneError::MissingUiRoot(hud)));
        world.add_component(hud, "UIDocument").unwrap();
        let root = world.ui_root(hud).unwrap();
        assert_eq!(world.ui_root(hud).unwrap(), root);
        assert_eq!(world.element(root).unwrap().core().name, "root");
    }

    // ---- Native events ----

    #[test]
    fn bubbling_events_reach_ancestors_in_order() {
        let world = RefCell::new(World::new());
        let (root, [a, _, _]) = element_tree(&mut world.borrow_mut());
        let log: Rc<RefCell<Vec<String>>> = Rc::default();

        for (element, tag) in [(a, "label"), (root, "root")] {
            let log = log.clone();
            world
                .borrow_mut()
                .subscribe(element, EventKind::Click, Rc::new(move |event: &NativeEvent| {
                    log.borrow_mut().push(format!("{tag}:{}", event.current_target == event.target));
                }))
                .unwrap();
        }
        let count = dispatch_event(&world, NativeEvent::new(EventKind::Click, a, 1.5, EventData::None));
        assert_eq!(count, 2);
        assert_eq!(*log.borrow(), ["label:true", "root:false"]);
    }

    #[test]
    fn non_bubbling_events_stay_on_target() {
        let world = RefCell::new(World::new());
        let (root, [a, _, _]) = element_tree(&mut world.borrow_mut());
        let hits = Rc::new(RefCell::new(0));
        let counter = hits.clone();
        world
            .borrow_mut()
            .subscribe(root, EventKind::Focus, Rc::new(move |_: &NativeEvent| *counter.borrow_mut() += 1))
            .unwrap();
        dispatch_event(&world, NativeEvent::new(EventKind::Focus, a, 0.0, EventData::None));
        assert_eq!(*hits.borrow(), 0);
        dispatch_event(&world, NativeEvent::new(EventKind::Focus, root, 0.0, EventData::None));
        assert_eq!(*hits.borrow(), 1);
    }

    #[test]
    fn callbacks_may_mutate_the_world() {
        let world = Rc::new(RefCell::new(World::new()));
        let target = world.borrow_mut().create_element("Button").unwrap();
        let inner = Rc::downgrade(&world);
        world
            .borrow_mut()
            .subscribe(target, EventKind::Click, Rc::new(move |event: &NativeEvent| {
                if let Some(world) = inner.upgrade() {
                    let _ = world.borrow_mut().destroy_element(event.target);
                }
            }))
            .unwrap();
        dispatch_event(&world, NativeEvent::new(EventKind::Click, target, 0.0, EventData::None));
        assert!(world.borrow().element(target).is_none());
    }

    #[test]
    fn unsubscribe_by_id() {
        let mut world = World::new();
        let target = world.create_element("Button").unwrap();
        let first = world.subscribe(target, EventKind::Click, Rc::new(|_: &NativeEvent| {})).unwrap();
        let second = world.subscribe(target, EventKind::Click, Rc::new(|_: &NativeEvent| {})).unwrap();
        assert_ne!(first, second);
        assert!(world.unsubscribe(target, EventKind::Click, first));
        assert!(!world.unsubscribe(target, EventKind::Click, first));
        assert_eq!(world.subscribers(target, EventKind::Click).len(), 1);
    }

    #[test]
    fn event_kind_names() {
        assert_eq!(EventKind::from_type_name("pointerdown"), Some(EventKind::PointerDown));
        assert_eq!(EventKind::PointerDown.category(), EventCategory::Pointer);
        assert!(!EventKind::PointerEnter.bubbles());
        assert_eq!(EventKind::from_type_name("nope"), None);
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_type_name(kind.type_name()), Some(*kind));
        }
    }

    // ---- Projection ----

    fn world_with_camera() -> World {
        let mut world = World::new();
        let eye = world.create_object("Main Camera");
        world.add_component(eye, "Camera").unwrap();
        world
    }

    #[test]
    fn world_to_screen_centers_the_view_axis() {
        let world = world_with_camera();
        let p = world.world_to_screen(Vector3::new(0.0, 0.0, 10.0)).unwrap();
        assert!(approx(p.x, 960.0));
        assert!(approx(p.y, 540.0));
        assert!(approx(p.z, 10.0));
        assert!(world.world_to_screen(Vector3::new(0.0, 0.0, -5.0)).is_none());

        let above = world.world_to_screen(Vector3::new(0.0, 1.0, 10.0)).unwrap();
        assert!(above.y > 540.0);
    }

    #[test]
    fn main_camera_skips_disabled_and_inactive() {
        let mut world = World::new();
        assert!(world.world_to_screen(Vector3::zero()).is_none());
        let off = world.create_object("off");
        let disabled = world.add_component(off, "Camera").unwrap();
        world.set_component_enabled(disabled, false).unwrap();
        let hidden = world.create_object("hidden");
        world.add_component(hidden, "Camera").unwrap();
        world.set_active(hidden, false).unwrap();
        assert_eq!(world.main_camera(), None);

        let on = world.create_object("on");
        let camera = world.add_component(on, "Camera").unwrap();
        assert_eq!(world.main_camera(), Some(camera));
        assert!(world.view_projection(camera).is_some());
    }

    #[test]
    fn renderer_bounds_are_world_space() {
        let mut world = World::new();
        let cube = world.create_object("Cube");
        assert!(world.renderer_bounds(cube).is_none());
        world.add_component(cube, "MeshRenderer").unwrap();
        {
            let transform = world.transform_mut(cube).unwrap();
            transform.local_position = Vector3::new(1.0, 2.0, 3.0);
            transform.local_scale = Vector3::new(2.0, 2.0, 2.0);
        }
        let bounds = world.renderer_bounds(cube).unwrap();
        let (min, max) = (bounds.min(), bounds.max());
        assert!(approx(min.x, 0.0) && approx(min.y, 1.0) && approx(min.z, 2.0));
        assert!(approx(max.x, 2.0) && approx(max.y, 3.0) && approx(max.z, 4.0));
    }

    // ---- Catalog ----

    #[test]
    fn inherited_descriptors_resolve_through_embedded_bases() {
        let accessor = accessor();
        let mut world = World::new();
        let cube = world.create_object("Cube");
        let light = world.add_component(cube, "Light").unwrap();
        let handle = NativeHandle::Component(light);

        accessor
            .try_set(world.container_mut(handle), &path("name"), &WireValue::string("sun"))
            .unwrap();
        accessor
            .try_set(world.container_mut(handle), &path("enabled"), &WireValue::Bool(false))
            .unwrap();
        accessor
            .try_set(world.container_mut(handle), &path("type"), &WireValue::string("Directional"))
            .unwrap();

        let data = world.component_as::<Light>(light, &LIGHT).unwrap();
        assert_eq!(data.base.base.base.name, "sun");
        assert!(!data.base.enabled);
        assert_eq!(data.light_type, LightType::Directional);

        let owner = accessor.try_get(world.container(handle), &path("gameObject")).unwrap();
        let owner = owner.as_external().and_then(|e| e.downcast_ref::<NativeHandle>()).copied();
        assert_eq!(owner, Some(NativeHandle::Object(cube)));
        let err = accessor
            .try_set(world.container_mut(handle), &path("gameObject"), &WireValue::Null)
            .unwrap_err();
        assert_eq!(err, PropertyError::AccessViolation { path: "gameObject".into() });
    }

    #[test]
    fn transform_euler_angles_property() {
        let accessor = accessor();
        let mut world = World::new();
        let cube = world.create_object("Cube");
        let handle = NativeHandle::Component(world.object(cube).unwrap().transform().unwrap());
        let angles = WireValue::Array(vec![
            WireValue::Number(0.0),
            WireValue::Number(90.0),
            WireValue::Number(0.0),
        ]);
        accessor
            .try_set(world.container_mut(handle), &path("localEulerAngles"), &angles)
            .unwrap();
        let euler = world.transform(cube).unwrap().local_euler_angles();
        assert!(approx(euler.y, 90.0));
    }

    #[test]
    fn label_resolves_text_element_bag() {
        let accessor = accessor();
        let mut world = World::new();
        let label = world.create_element("Label").unwrap();
        let handle = NativeHandle::Element(label);
        accessor
            .try_set(world.container_mut(handle), &path("text"), &WireValue::string("Hello"))
            .unwrap();
        let text = accessor.try_get(world.container(handle), &path("text")).unwrap();
        assert_eq!(text.as_str(), Some("Hello"));
    }

    #[test]
    fn style_paths_and_shorthand() {
        let accessor = accessor();
        let mut world = World::new();
        let element = world.create_element("VisualElement").unwrap();
        let handle = NativeHandle::Element(element);

        accessor
            .try_set(world.container_mut(handle), &path("style.width"), &WireValue::Number(120.0))
            .unwrap();
        let key = PropertyPath::from_wire_key("style-paddingLeft-value-unit").unwrap();
        accessor
            .try_set(world.container_mut(handle), &key, &WireValue::string("Percent"))
            .unwrap();
        accessor
            .try_set(
                world.container_mut(handle),
                &path("style.justifyContent"),
                &WireValue::string("Center"),
            )
            .unwrap();

        let style = &world.element(element).unwrap().core().style;
        assert_eq!(style.width.value, Length::px(120.0));
        assert_eq!(style.padding_left.value.unit, LengthUnit::Percent);
        assert_eq!(style.justify_content.value, Justify::Center);

        let width = accessor
            .try_get(world.container(handle), &path("style.width.value.value"))
            .unwrap();
        assert_eq!(width.as_number(), Some(120.0));
    }

    #[test]
    fn flags_accept_member_lists() {
        let accessor = accessor();
        let mut world = World::new();
        let element = world.create_element("Button").unwrap();
        let handle = NativeHandle::Element(element);
        let hints = WireValue::Array(vec![
            WireValue::string("DynamicTransform"),
            WireValue::string("DynamicColor"),
        ]);
        accessor
            .try_set(world.container_mut(handle), &path("usageHints"), &hints)
            .unwrap();
        assert_eq!(
            world.element(element).unwrap().core().usage_hints,
            UsageHints::DYNAMIC_TRANSFORM | UsageHints::DYNAMIC_COLOR
        );
    }

    #[test]
    fn dump_recurses_into_style() {
        let accessor = accessor();
        let mut world = World::new();
        let element = world.create_element("Toggle").unwrap();
        world.element_mut(element).unwrap().core_mut().name = "check".into();
        let lines = accessor.dump(world.element(element).unwrap().as_container());
        assert!(lines.contains(&"name: String = \"check\"".to_string()), "{lines:#?}");
        assert!(lines.iter().any(|l| l.starts_with("layout: Rect (read-only)")));
        assert!(lines.contains(&"style: IStyle".to_string()));
        assert!(lines.contains(&"  width: StyleLength".to_string()));
        assert!(lines.contains(&"    value: Length".to_string()));
        assert!(lines.iter().any(|l| l.starts_with("value: Bool")));
    }

    #[test]
    fn describe_handles() {
        let mut world = World::new();
        let cube = world.create_object("Cube");
        let light = world.add_component(cube, "Light").unwrap();
        let label = world.create_element("Label").unwrap();
        world.element_mut(label).unwrap().core_mut().name = "title".into();
        assert_eq!(world.describe(cube.into()), "GameObject \"Cube\"");
        assert_eq!(world.describe(light.into()), "Light on \"Cube\"");
        assert_eq!(world.describe(label.into()), "Label \"title\"");
        world.destroy_object(cube).unwrap();
        assert_eq!(world.describe(light.into()), NativeHandle::from(light).to_string());
    }

    #[test]
    fn resources_register_templates() {
        let mut world = World::new();
        let prefab = world.create_object("Prefab");
        world.resources_mut().insert("Prefabs/Lamp", Asset::Prefab(prefab));
        assert_eq!(world.resource("Prefabs/Lamp"), Some(Asset::Prefab(prefab)));
        assert_eq!(world.resource("missing"), None);
        assert_eq!(world.resources().len(), 1);
    }
}
