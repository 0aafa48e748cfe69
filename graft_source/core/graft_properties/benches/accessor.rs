use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use graft_properties::{
    PropertyAccessor, PropertyBag, PropertyCatalog, PropertyPath, TypeInfo,
    impl_property_container,
};
use graft_structs::Vector3;
use graft_variant::{ConversionRegistry, WireValue};

static BOX: TypeInfo = TypeInfo::new("Box");
static PADDING: TypeInfo = TypeInfo::new("Padding");

#[derive(Default)]
struct Padding {
    left: f32,
}

#[derive(Default)]
struct Boxed {
    position: Vector3,
    opacity: f32,
    label: String,
    padding: Padding,
}

impl_property_container!(Boxed, &BOX);
impl_property_container!(Padding, &PADDING);

fn accessor() -> PropertyAccessor {
    let mut catalog = PropertyCatalog::new();
    catalog.register(
        PropertyBag::builder::<Boxed>(&BOX)
            .property("position", |b| b.position, |b, v| b.position = v)
            .property("opacity", |b| b.opacity, |b, v| b.opacity = v)
            .property("label", |b| b.label.clone(), |b, v| b.label = v)
            .nested("padding", &PADDING, |b: &Boxed| &b.padding, |b: &mut Boxed| &mut b.padding)
            .build(),
    );
    catalog.register(
        PropertyBag::builder::<Padding>(&PADDING)
            .property("left", |p| p.left, |p, v| p.left = v)
            .build(),
    );
    PropertyAccessor::new(catalog, ConversionRegistry::new())
}

fn bench_set(c: &mut Criterion) {
    let accessor = accessor();
    let mut target = Boxed::default();

    let opacity = PropertyPath::parse("opacity").unwrap();
    let position = PropertyPath::parse("position").unwrap();
    let nested = PropertyPath::from_wire_key("padding-left").unwrap();
    let vector = WireValue::Array(vec![WireValue::Number(1.0), WireValue::Number(2.0), WireValue::Number(3.0)]);

    c.bench_function("set_scalar", |b| {
        b.iter(|| {
            accessor
                .try_set(Some(&mut target), black_box(&opacity), &WireValue::Number(0.5))
                .unwrap()
        })
    });
    c.bench_function("set_aggregate", |b| {
        b.iter(|| {
            accessor
                .try_set(Some(&mut target), black_box(&position), &vector)
                .unwrap()
        })
    });
    c.bench_function("set_nested_string", |b| {
        b.iter(|| {
            accessor
                .try_set(Some(&mut target), black_box(&nested), &WireValue::string("12"))
                .unwrap()
        })
    });
}

fn bench_get(c: &mut Criterion) {
    let accessor = accessor();
    let target = Boxed {
        label: "header".into(),
        ..Default::default()
    };
    let label = PropertyPath::parse("label").unwrap();

    c.bench_function("get_string", |b| {
        b.iter(|| accessor.try_get(Some(&target), black_box(&label)).unwrap())
    });
    c.bench_function("parse_wire_key", |b| {
        b.iter(|| PropertyPath::from_wire_key(black_box("style-paddingLeft-value")).unwrap())
    });
}

criterion_group!(benches, bench_set, bench_get);
criterion_main!(benches);
