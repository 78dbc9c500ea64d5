#![allow(missing_docs)]

use std::sync::Arc;

use tidom::element::{Element, Struct};

fn field_arc<'a>(strukt: &'a Struct, name: &str) -> &'a Arc<Element> {
	&strukt
		.as_slice()
		.iter()
		.find(|f| f.name.as_ref() == name)
		.expect("field present")
		.value
}

/// The defining invariant of the update engine: after a nested bottom-up
/// edit, every sibling subtree off the edit path is the same allocation as
/// in the original tree, not merely an equal value.
#[test]
fn nested_update_shares_every_untouched_subtree() {
	let source = Element::struct_of([
		("a", Element::struct_of([("x", Element::int(1)), ("y", Element::int(2))])),
		("b", Element::int(5)),
	]);

	// Bottom-up: rebuild the nested child first, then set it on the parent.
	let inner = source.as_struct().expect("struct").get("a").expect("a");
	let mut inner_draft = inner.update_struct().expect("struct");
	inner_draft.set("x", Element::int(9));
	let new_inner = inner_draft.build();

	let mut root_draft = source.update_struct().expect("struct");
	root_draft.set("a", new_inner);
	let updated = root_draft.build();

	let source_fields = source.as_struct().expect("struct");
	let updated_fields = updated.as_struct().expect("struct");

	// The edited path was reallocated.
	assert!(!Arc::ptr_eq(field_arc(source_fields, "a"), field_arc(updated_fields, "a")));
	assert_eq!(updated_fields.get("a").expect("a").as_struct().expect("struct").get("x").expect("x"), &Element::int(9));

	// Siblings off the path kept their identity, not just their value.
	assert!(Arc::ptr_eq(field_arc(source_fields, "b"), field_arc(updated_fields, "b")));
	let source_inner = field_arc(source_fields, "a").as_struct().expect("struct");
	let updated_inner = field_arc(updated_fields, "a").as_struct().expect("struct");
	assert!(Arc::ptr_eq(field_arc(source_inner, "y"), field_arc(updated_inner, "y")));

	// The original tree is untouched.
	assert_eq!(
		source.as_struct().expect("struct").get("a").expect("a").as_struct().expect("struct").get("x").expect("x"),
		&Element::int(1)
	);
}

#[test]
fn sequence_update_shares_untouched_items() {
	let source = Element::list([Element::string("keep"), Element::string("replace")]);
	let mut draft = source.update_seq().expect("list");
	draft.set(1, Element::string("new")).expect("in range");
	let updated = draft.build();

	let source_items = source.as_list().expect("list").items();
	let updated_items = updated.as_list().expect("list").items();
	assert!(Arc::ptr_eq(&source_items[0], &updated_items[0]));
	assert!(!Arc::ptr_eq(&source_items[1], &updated_items[1]));
	assert_eq!(updated_items[1].as_ref(), &Element::string("new"));
}

#[test]
fn construction_defensively_copies_the_callers_sequence() {
	let mut items = vec![Element::int(1), Element::int(2)];
	let list = Element::list(items.iter().cloned());
	items.push(Element::int(3));
	items[0] = Element::int(99);
	let sequence = list.as_list().expect("list");
	assert_eq!(sequence.len(), 2);
	assert_eq!(sequence.get(0).expect("item"), &Element::int(1));
	assert_eq!(sequence.get(1).expect("item"), &Element::int(2));
}

#[test]
fn annotation_rebuild_shares_the_payload() {
	let source = Element::struct_of([("a", Element::int(1))]);
	let tagged = source.with_annotations(["tag"]);
	let source_fields = source.as_struct().expect("struct");
	let tagged_fields = tagged.as_struct().expect("struct");
	assert!(Arc::ptr_eq(field_arc(source_fields, "a"), field_arc(tagged_fields, "a")));
	assert_ne!(source, tagged);
}

#[test]
fn meta_rebuild_preserves_equality_and_sharing() {
	let source = Element::list([Element::struct_of([("deep", Element::int(1))])]);
	let stamped = source.with_meta("stamp", 42_u64);
	assert_eq!(source, stamped);
	assert!(Arc::ptr_eq(&source.as_list().expect("list").items()[0], &stamped.as_list().expect("list").items()[0]));
	assert_eq!(stamped.metas().get::<u64>("stamp"), Some(&42));
	assert!(source.metas().is_empty());
}
