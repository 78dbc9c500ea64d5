#![allow(missing_docs)]

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tidom::element::{Decimal, Element, ElementError, ElementType, Metas};

fn hash_of(element: &Element) -> u64 {
	let mut hasher = DefaultHasher::new();
	element.hash(&mut hasher);
	hasher.finish()
}

#[test]
fn elements_differing_only_in_metas_are_equal() {
	let base = Element::list([Element::int(1), Element::string("x")]);
	let m1 = base.with_metas(Metas::empty().with("k", 1_i64));
	let m2 = base.with_metas(Metas::empty().with("k", 2_i64).with("extra", true));
	assert_eq!(m1, m2);
	assert_eq!(hash_of(&m1), hash_of(&m2));
}

#[test]
fn struct_equality_is_order_insensitive() {
	let ab = Element::struct_of([("a", Element::int(1)), ("b", Element::int(2))]);
	let ba = Element::struct_of([("b", Element::int(2)), ("a", Element::int(1))]);
	assert_eq!(ab, ba);
	assert_eq!(hash_of(&ab), hash_of(&ba));
}

#[test]
fn struct_equality_is_multiplicity_sensitive() {
	let twice = Element::struct_of([("a", Element::int(1)), ("a", Element::int(2))]);
	let once = Element::struct_of([("a", Element::int(1))]);
	assert_ne!(twice, once);
	assert_eq!(twice.as_struct().expect("struct").get_all("a").count(), 2);
}

#[test]
fn nulls_of_distinct_subtypes_are_pairwise_unequal() {
	let plain = Element::null();
	let of_int = Element::null_of(ElementType::Int);
	let of_string = Element::null_of(ElementType::String);
	assert_ne!(plain, of_int);
	assert_ne!(plain, of_string);
	assert_ne!(of_int, of_string);
	assert_eq!(plain, Element::null());
	assert_eq!(of_int, Element::null_of(ElementType::Int));
	assert_eq!(of_string, Element::null_of(ElementType::String));
}

#[test]
fn typed_null_never_equals_a_value_of_its_declared_type() {
	assert_ne!(Element::null_of(ElementType::Bool), Element::bool(false));
	assert_ne!(Element::null_of(ElementType::List), Element::list(Vec::<Element>::new()));
}

#[test]
fn struct_accessor_on_an_int_reports_both_tags() {
	let err = Element::int(3).as_struct().expect_err("wrong variant");
	assert_eq!(
		err,
		ElementError::TypeMismatch {
			expected: ElementType::Struct,
			actual: ElementType::Int,
		}
	);
}

#[test]
fn decimal_equality_distinguishes_scale() {
	assert_ne!(Element::decimal(Decimal::new(110, -2)), Element::decimal(Decimal::new(11, -1)));
}

#[test]
fn float_equality_is_reflexive_for_every_payload() {
	for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, 0.0, -0.0, 1.5] {
		assert_eq!(Element::float(value), Element::float(value));
	}
	assert_ne!(Element::float(0.0), Element::float(-0.0));
}

#[test]
fn annotations_are_part_of_value_identity() {
	let bare = Element::symbol("s");
	let tagged = bare.with_annotations(["a", "b"]);
	let reordered = bare.with_annotations(["b", "a"]);
	assert_ne!(bare, tagged);
	assert_ne!(tagged, reordered);
}
