use std::sync::Arc;

use crate::element::{Element, ElementError, Result};

/// One named field of a [`Struct`].
///
/// The value is held by shared ownership so fields can move between a
/// frozen struct and a transient draft without copying the subtree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StructField {
	/// Field name; names may repeat within a struct.
	pub name: Arc<str>,
	/// Field value.
	pub value: Arc<Element>,
}

impl StructField {
	/// Build a field from a name and an owned or already-shared value.
	pub fn new(name: impl Into<Arc<str>>, value: impl Into<Arc<Element>>) -> Self {
		Self {
			name: name.into(),
			value: value.into(),
		}
	}
}

/// Insertion-ordered multimap of named fields backing the struct variant.
///
/// Names may repeat; iteration preserves insertion order. Equality (defined
/// with the rest of the element contract) is order-insensitive but
/// multiplicity-sensitive. Construction copies the caller's collection.
#[derive(Debug, Clone)]
pub struct Struct {
	fields: Arc<[StructField]>,
}

impl Struct {
	/// Build a struct from fields, preserving their order and multiplicity.
	pub fn new<I>(fields: I) -> Self
	where
		I: IntoIterator<Item = StructField>,
	{
		Self {
			fields: fields.into_iter().collect::<Vec<_>>().into(),
		}
	}

	/// The empty struct.
	pub fn empty() -> Self {
		Self::new(Vec::new())
	}

	/// Number of fields, counting repeats.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// True when the struct holds no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Value of the first field named `name`.
	///
	/// Fails with [`ElementError::FieldNotFound`] only when no such field
	/// exists; a present field holding a null value is found normally.
	pub fn get(&self, name: &str) -> Result<&Element> {
		self.get_optional(name).ok_or_else(|| ElementError::FieldNotFound { name: name.to_owned() })
	}

	/// Value of the first field named `name`, or `None`.
	pub fn get_optional(&self, name: &str) -> Option<&Element> {
		self.fields.iter().find(|f| f.name.as_ref() == name).map(|f| f.value.as_ref())
	}

	/// All values of fields named `name`, lazily, in insertion order.
	///
	/// The returned iterator is `Clone`, so a traversal can be restarted.
	pub fn get_all<'a>(&'a self, name: &'a str) -> FieldValues<'a> {
		FieldValues {
			fields: self.fields.iter(),
			name,
		}
	}

	/// True when at least one field is named `name`.
	pub fn contains_field(&self, name: &str) -> bool {
		self.fields.iter().any(|f| f.name.as_ref() == name)
	}

	/// Iterate the fields in insertion order.
	pub fn fields(&self) -> impl Iterator<Item = &StructField> {
		self.fields.iter()
	}

	/// Fields with their shared ownership exposed, in insertion order.
	pub fn as_slice(&self) -> &[StructField] {
		&self.fields
	}

	/// Distinct field names, in first-occurrence order.
	pub fn field_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = Vec::with_capacity(self.fields.len());
		for field in self.fields.iter() {
			if !names.contains(&field.name.as_ref()) {
				names.push(field.name.as_ref());
			}
		}
		names
	}
}

impl Default for Struct {
	fn default() -> Self {
		Self::empty()
	}
}

impl FromIterator<StructField> for Struct {
	fn from_iter<I: IntoIterator<Item = StructField>>(iter: I) -> Self {
		Self::new(iter)
	}
}

/// Lazy iterator over the values of same-named fields, in insertion order.
#[derive(Debug, Clone)]
pub struct FieldValues<'a> {
	fields: std::slice::Iter<'a, StructField>,
	name: &'a str,
}

impl<'a> FieldValues<'a> {
	pub(crate) fn over(fields: &'a [StructField], name: &'a str) -> Self {
		Self {
			fields: fields.iter(),
			name,
		}
	}
}

impl<'a> Iterator for FieldValues<'a> {
	type Item = &'a Element;

	fn next(&mut self) -> Option<Self::Item> {
		for field in self.fields.by_ref() {
			if field.name.as_ref() == self.name {
				return Some(field.value.as_ref());
			}
		}
		None
	}
}
