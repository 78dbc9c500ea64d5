use std::sync::Arc;

use crate::element::{Annotations, Element, ElementError, ElementType, Metas, Result, Sequence, Struct, StructField, Value};
use crate::element::strukt::FieldValues;

/// Transient draft of a struct element.
///
/// A builder is either empty ([`StructBuilder::new`]) or seeded from a
/// frozen struct ([`Element::update_struct`]), which shallow-copies only
/// the immediate field index; child subtrees stay shared. Mutations apply
/// to the draft alone, and [`StructBuilder::build`] consumes the draft by
/// value, so a frozen result can never be mutated and a spent draft can
/// never be reused.
#[derive(Debug, Clone)]
pub struct StructBuilder {
	fields: Vec<StructField>,
	annotations: Annotations,
	metas: Metas,
}

impl StructBuilder {
	/// Empty draft with no fields, annotations, or metas.
	pub fn new() -> Self {
		Self {
			fields: Vec::new(),
			annotations: Annotations::empty(),
			metas: Metas::empty(),
		}
	}

	/// Number of fields in the draft, counting repeats.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// True when the draft holds no fields.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Value of the first draft field named `name`.
	pub fn get(&self, name: &str) -> Result<&Element> {
		self.get_optional(name).ok_or_else(|| ElementError::FieldNotFound { name: name.to_owned() })
	}

	/// Value of the first draft field named `name`, or `None`.
	pub fn get_optional(&self, name: &str) -> Option<&Element> {
		self.fields.iter().find(|f| f.name.as_ref() == name).map(|f| f.value.as_ref())
	}

	/// All draft values under `name`, lazily, in draft order.
	pub fn get_all<'a>(&'a self, name: &'a str) -> FieldValues<'a> {
		FieldValues::over(&self.fields, name)
	}

	/// True when at least one draft field is named `name`.
	pub fn contains_field(&self, name: &str) -> bool {
		self.fields.iter().any(|f| f.name.as_ref() == name)
	}

	/// Remove every field named `name` and insert the single replacement at
	/// the position of the first removed occurrence, or append it if the
	/// name was absent.
	pub fn set(&mut self, name: impl Into<Arc<str>>, value: impl Into<Arc<Element>>) -> &mut Self {
		let name = name.into();
		let value = value.into();
		match self.fields.iter().position(|f| f.name.as_ref() == name.as_ref()) {
			Some(index) => {
				self.fields.retain(|f| f.name.as_ref() != name.as_ref());
				self.fields.insert(index, StructField { name, value });
			}
			None => self.fields.push(StructField { name, value }),
		}
		self
	}

	/// Remove every existing field whose name occurs among `fields`, then
	/// append the given fields in order, keeping their multiplicity.
	pub fn set_all<I>(&mut self, fields: I) -> &mut Self
	where
		I: IntoIterator<Item = StructField>,
	{
		let incoming: Vec<StructField> = fields.into_iter().collect();
		self.fields.retain(|f| !incoming.iter().any(|g| g.name.as_ref() == f.name.as_ref()));
		self.fields.extend(incoming);
		self
	}

	/// Append a field unconditionally, even when the name already exists.
	/// This is how duplicate fields are created.
	pub fn add(&mut self, name: impl Into<Arc<str>>, value: impl Into<Arc<Element>>) -> &mut Self {
		self.fields.push(StructField::new(name, value));
		self
	}

	/// Append a prepared field unconditionally.
	pub fn add_field(&mut self, field: StructField) -> &mut Self {
		self.fields.push(field);
		self
	}

	/// Remove every field named `name`; a no-op when none exist.
	pub fn remove(&mut self, name: &str) -> &mut Self {
		self.fields.retain(|f| f.name.as_ref() != name);
		self
	}

	/// Remove the first field equal to the given (name, value) pair; a
	/// no-op when none matches.
	pub fn remove_field(&mut self, field: &StructField) -> &mut Self {
		if let Some(index) = self.fields.iter().position(|f| f == field) {
			self.fields.remove(index);
		}
		self
	}

	/// Replace the annotations the built element will carry.
	pub fn set_annotations<I, S>(&mut self, texts: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Arc<str>>,
	{
		self.annotations = Annotations::from_texts(texts);
		self
	}

	/// Replace the metas the built element will carry.
	pub fn set_metas(&mut self, metas: Metas) -> &mut Self {
		self.metas = metas;
		self
	}

	/// Freeze the draft into an immutable struct element.
	///
	/// Consumes the builder: further mutation or a second freeze of the
	/// same draft is unrepresentable.
	pub fn build(self) -> Element {
		Element::with_parts(Value::Struct(Struct::new(self.fields)), self.annotations, self.metas)
	}
}

impl Default for StructBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Transient draft of a list or s-expression element.
///
/// Seeded empty or from a frozen sequence element; the seed shallow-copies
/// only the immediate item index. [`SeqBuilder::build`] consumes the draft
/// by value.
#[derive(Debug, Clone)]
pub struct SeqBuilder {
	kind: ElementType,
	items: Vec<Arc<Element>>,
	annotations: Annotations,
	metas: Metas,
}

impl SeqBuilder {
	/// Empty list draft.
	pub fn new_list() -> Self {
		Self::empty(ElementType::List)
	}

	/// Empty s-expression draft.
	pub fn new_sexp() -> Self {
		Self::empty(ElementType::Sexp)
	}

	fn empty(kind: ElementType) -> Self {
		Self {
			kind,
			items: Vec::new(),
			annotations: Annotations::empty(),
			metas: Metas::empty(),
		}
	}

	/// Sequence variant this draft will freeze into.
	pub fn kind(&self) -> ElementType {
		self.kind
	}

	/// Number of items in the draft.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	/// True when the draft holds no items.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Draft item at `index`, if in range.
	pub fn get(&self, index: usize) -> Option<&Element> {
		self.items.get(index).map(AsRef::as_ref)
	}

	/// Append an item.
	pub fn push(&mut self, value: impl Into<Arc<Element>>) -> &mut Self {
		self.items.push(value.into());
		self
	}

	/// Replace the item at `index`.
	pub fn set(&mut self, index: usize, value: impl Into<Arc<Element>>) -> Result<&mut Self> {
		match self.items.get_mut(index) {
			Some(slot) => {
				*slot = value.into();
				Ok(self)
			}
			None => Err(ElementError::IndexOutOfBounds { index, len: self.items.len() }),
		}
	}

	/// Insert an item before `index`; `index == len` appends.
	pub fn insert(&mut self, index: usize, value: impl Into<Arc<Element>>) -> Result<&mut Self> {
		if index > self.items.len() {
			return Err(ElementError::IndexOutOfBounds { index, len: self.items.len() });
		}
		self.items.insert(index, value.into());
		Ok(self)
	}

	/// Remove and return the item at `index`.
	pub fn remove(&mut self, index: usize) -> Result<Arc<Element>> {
		if index >= self.items.len() {
			return Err(ElementError::IndexOutOfBounds { index, len: self.items.len() });
		}
		Ok(self.items.remove(index))
	}

	/// Replace the annotations the built element will carry.
	pub fn set_annotations<I, S>(&mut self, texts: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Arc<str>>,
	{
		self.annotations = Annotations::from_texts(texts);
		self
	}

	/// Replace the metas the built element will carry.
	pub fn set_metas(&mut self, metas: Metas) -> &mut Self {
		self.metas = metas;
		self
	}

	/// Freeze the draft into an immutable list or s-expression element.
	pub fn build(self) -> Element {
		let sequence = Sequence::new(self.items);
		let value = match self.kind {
			ElementType::Sexp => Value::Sexp(sequence),
			_ => Value::List(sequence),
		};
		Element::with_parts(value, self.annotations, self.metas)
	}
}

impl Element {
	/// Begin a persistent update of a struct element.
	///
	/// The returned draft holds a shallow copy of the field index; every
	/// field value is shared with `self`. Freezing the draft yields a new
	/// element, and `self` remains valid and unchanged.
	pub fn update_struct(&self) -> Result<StructBuilder> {
		let strukt = self.as_struct()?;
		Ok(StructBuilder {
			fields: strukt.as_slice().to_vec(),
			annotations: self.annotations().clone(),
			metas: self.metas().clone(),
		})
	}

	/// Begin a persistent update of a list or s-expression element.
	pub fn update_seq(&self) -> Result<SeqBuilder> {
		let sequence = self.as_seq()?;
		Ok(SeqBuilder {
			kind: self.element_type(),
			items: sequence.items().to_vec(),
			annotations: self.annotations().clone(),
			metas: self.metas().clone(),
		})
	}
}

#[cfg(test)]
mod tests;
