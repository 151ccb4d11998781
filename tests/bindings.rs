mod common;

use lathe::prelude::*;
use lathe::shapes::ShapeAttribType;

use crate::common::{TestAttrib, TestShape};

fn three_attrib_shape() -> TestShape {
    let mut shape = TestShape::new();
    shape.attribs = vec![
        TestAttrib {
            attrib: VertexAttribKind::Position.into(),
            tp: ShapeAttribType::F32,
            values_per_vertex: 3,
            divisor: 0,
        },
        TestAttrib {
            attrib: VertexAttribKind::Normal.into(),
            tp: ShapeAttribType::F32,
            values_per_vertex: 3,
            divisor: 0,
        },
        TestAttrib {
            attrib: VertexAttrib::new(VertexAttribKind::WrapCoord, 1),
            tp: ShapeAttribType::F32,
            values_per_vertex: 2,
            divisor: 0,
        },
    ];
    shape
}

#[test]
fn default_binding_is_deterministic() {
    let shape = three_attrib_shape();

    let first = VertexAttribBindings::from_generator(&shape);
    let second = VertexAttribBindings::from_generator(&shape);

    assert_eq!(first.attrib_count(), second.attrib_count());
    for i in 0..first.attrib_count() {
        assert_eq!(first.attrib_variant(i), second.attrib_variant(i));
    }
}

#[test]
fn default_binding_follows_enumeration_order() {
    let shape = three_attrib_shape();
    let bindings = VertexAttribBindings::from_generator(&shape);

    assert_eq!(bindings.attrib_count(), 3);
    assert_eq!(bindings.position_loc(), Some(0));
    assert_eq!(bindings.normal_loc(), Some(1));
    assert_eq!(
        bindings.kind_loc(VertexAttribKind::WrapCoord, 1),
        Some(2)
    );
}

#[test]
fn explicit_binding_follows_list_order() {
    let bindings = VertexAttribBindings::from_variants(&[
        VertexAttribKind::WrapCoord.into(),
        VertexAttribKind::Position.into(),
    ]);

    assert_eq!(bindings.wrap_coord_loc(), Some(0));
    assert_eq!(bindings.position_loc(), Some(1));
}

#[test]
fn unbound_variants_are_inactive() {
    let shape = three_attrib_shape();
    let bindings = VertexAttribBindings::from_generator(&shape);

    // Not part of the binding set at all.
    assert_eq!(bindings.color_loc(), None);
    // The generator has WrapCoord #1 but not WrapCoord #0.
    assert_eq!(bindings.wrap_coord_loc(), None);

    // Every bound slot is distinguishable from the inactive answer.
    for i in 0..bindings.attrib_count() {
        let variant = bindings.attrib_variant(i).unwrap();
        assert_eq!(bindings.location(variant), Some(i as u32));
    }
}

#[test]
fn constant_fallback_values() {
    let color = VertexAttrib::from(VertexAttribKind::Color);
    let bindings = VertexAttribBindings::from_variants_and_values(&[
        (VertexAttribKind::Position.into(), AttribValue::Absent),
        (color, AttribValue::Vector3f([0.2, 0.4, 0.6])),
    ]);

    let (loc, value) = bindings.location_and_value(color);
    assert_eq!(loc, Some(1));
    assert_eq!(value, AttribValue::Vector3f([0.2, 0.4, 0.6]));

    let (loc, value) = bindings.location_and_value(VertexAttribKind::Weight.into());
    assert_eq!(loc, None);
    assert_eq!(value, AttribValue::Absent);
}
