use std::sync::Arc;

use crate::element::{Element, ElementError, ElementType, Metas, SeqBuilder, StructBuilder, StructField};

fn duplicates() -> Element {
	Element::struct_of([
		("a", Element::int(1)),
		("b", Element::int(2)),
		("a", Element::int(3)),
		("c", Element::int(4)),
	])
}

#[test]
fn set_replaces_all_occurrences_at_first_position() {
	let mut draft = duplicates().update_struct().expect("struct");
	draft.set("a", Element::int(9));
	let built = draft.build();
	let strukt = built.as_struct().expect("struct");
	let pairs: Vec<_> = strukt.fields().map(|f| (f.name.as_ref().to_owned(), f.value.as_ref().clone())).collect();
	assert_eq!(
		pairs,
		vec![
			("a".to_owned(), Element::int(9)),
			("b".to_owned(), Element::int(2)),
			("c".to_owned(), Element::int(4)),
		]
	);
}

#[test]
fn set_appends_when_name_is_absent() {
	let mut draft = StructBuilder::new();
	draft.set("x", Element::int(1));
	let built = draft.build();
	assert_eq!(built.as_struct().expect("struct").get("x").expect("present"), &Element::int(1));
}

#[test]
fn add_creates_duplicate_fields() {
	let mut draft = StructBuilder::new();
	draft.add("a", Element::int(1)).add("a", Element::int(2));
	let built = draft.build();
	assert_eq!(built.as_struct().expect("struct").get_all("a").count(), 2);
}

#[test]
fn remove_drops_every_occurrence_and_missing_name_is_a_noop() {
	let mut draft = duplicates().update_struct().expect("struct");
	draft.remove("a").remove("missing");
	let built = draft.build();
	let strukt = built.as_struct().expect("struct");
	assert!(!strukt.contains_field("a"));
	assert_eq!(strukt.len(), 2);
}

#[test]
fn remove_field_drops_only_the_first_equal_pair() {
	let mut draft = StructBuilder::new();
	draft.add("a", Element::int(1)).add("a", Element::int(1)).add("a", Element::int(2));
	draft.remove_field(&StructField::new("a", Element::int(1)));
	draft.remove_field(&StructField::new("a", Element::int(7)));
	let built = draft.build();
	let values: Vec<_> = built.as_struct().expect("struct").get_all("a").cloned().collect();
	assert_eq!(values, vec![Element::int(1), Element::int(2)]);
}

#[test]
fn set_all_removes_named_fields_then_appends_incoming() {
	let mut draft = duplicates().update_struct().expect("struct");
	draft.set_all([
		StructField::new("a", Element::int(7)),
		StructField::new("a", Element::int(8)),
	]);
	let built = draft.build();
	let strukt = built.as_struct().expect("struct");
	let names: Vec<_> = strukt.fields().map(|f| f.name.as_ref()).collect();
	assert_eq!(names, vec!["b", "c", "a", "a"]);
}

#[test]
fn draft_reads_observe_the_draft_state() {
	let mut draft = duplicates().update_struct().expect("struct");
	draft.set("a", Element::int(9)).add("d", Element::int(5));
	assert_eq!(draft.get("a").expect("present"), &Element::int(9));
	assert_eq!(draft.get_all("a").count(), 1);
	assert!(draft.contains_field("d"));
	assert_eq!(draft.get("zz").expect_err("absent"), ElementError::FieldNotFound { name: "zz".to_owned() });
}

#[test]
fn update_leaves_the_source_untouched() {
	let source = duplicates();
	let mut draft = source.update_struct().expect("struct");
	draft.remove("a").set("b", Element::int(0));
	let updated = draft.build();
	assert_eq!(source.as_struct().expect("struct").get_all("a").count(), 2);
	assert_eq!(source.as_struct().expect("struct").get("b").expect("present"), &Element::int(2));
	assert_ne!(source, updated);
}

#[test]
fn seeded_draft_shares_untouched_values() {
	let source = duplicates();
	let mut draft = source.update_struct().expect("struct");
	draft.set("b", Element::int(0));
	let updated = draft.build();
	let source_c = &source.as_struct().expect("struct").as_slice()[3].value;
	let updated_c = &updated.as_struct().expect("struct").as_slice()[3].value;
	assert!(Arc::ptr_eq(source_c, updated_c));
}

#[test]
fn build_carries_source_annotations_and_metas() {
	let source = duplicates().with_added_annotations(["tag"]).with_meta("k", 1_i64);
	let mut draft = source.update_struct().expect("struct");
	draft.set("b", Element::int(0));
	let updated = draft.build();
	assert!(updated.annotations().contains("tag"));
	assert_eq!(updated.metas().get::<i64>("k"), Some(&1));
}

#[test]
fn builder_annotation_and_meta_overrides_apply_to_the_result() {
	let mut draft = StructBuilder::new();
	draft.add("a", Element::int(1));
	draft.set_annotations(["x"]).set_metas(Metas::empty().with("m", 2_i64));
	let built = draft.build();
	assert!(built.annotations().contains("x"));
	assert_eq!(built.metas().get::<i64>("m"), Some(&2));
}

#[test]
fn update_struct_on_a_non_struct_is_a_type_mismatch() {
	let err = Element::int(1).update_struct().expect_err("not a struct");
	assert_eq!(
		err,
		ElementError::TypeMismatch {
			expected: ElementType::Struct,
			actual: ElementType::Int,
		}
	);
}

#[test]
fn seq_builder_edits_and_bounds_checks() {
	let source = Element::list([Element::int(1), Element::int(2), Element::int(3)]);
	let mut draft = source.update_seq().expect("list");
	draft.set(1, Element::int(9)).expect("in range");
	draft.insert(0, Element::int(0)).expect("in range");
	let removed = draft.remove(2).expect("in range");
	assert_eq!(removed.as_ref(), &Element::int(9));
	assert_eq!(draft.set(9, Element::int(0)).expect_err("out of range"), ElementError::IndexOutOfBounds { index: 9, len: 3 });
	assert_eq!(draft.remove(3).expect_err("out of range"), ElementError::IndexOutOfBounds { index: 3, len: 3 });
	let built = draft.build();
	assert_eq!(built, Element::list([Element::int(0), Element::int(1), Element::int(3)]));
	assert_eq!(source.as_list().expect("list").len(), 3);
}

#[test]
fn seq_builder_preserves_the_sexp_variant() {
	let source = Element::sexp([Element::symbol("x")]);
	let mut draft = source.update_seq().expect("sexp");
	draft.push(Element::symbol("y"));
	let built = draft.build();
	assert_eq!(built.element_type(), ElementType::Sexp);
	assert_eq!(built.as_sexp().expect("sexp").len(), 2);
}

#[test]
fn empty_seq_builders_pick_their_variant() {
	assert_eq!(SeqBuilder::new_list().build().element_type(), ElementType::List);
	assert_eq!(SeqBuilder::new_sexp().build().element_type(), ElementType::Sexp);
	assert_eq!(SeqBuilder::new_list().kind(), ElementType::List);
}
