use std::sync::Arc;

use num_bigint::BigInt;

use crate::element::{Annotations, Decimal, ElementType, Int, Metas, Sequence, Struct, StructField, Timestamp};

/// Payload of an [`Element`]: the variant tag plus its per-case data.
///
/// Container, text, and lob payloads are `Arc`-backed, so cloning a value
/// (for example when rebuilding a node with different annotations) shares
/// the payload instead of copying it.
#[derive(Debug, Clone)]
pub enum Value {
	/// Null carrying its declared subtype; [`ElementType::Null`] marks the
	/// untyped null.
	Null(ElementType),
	/// Boolean.
	Bool(bool),
	/// Integer.
	Int(Int),
	/// 64-bit binary float.
	Float(f64),
	/// Exact decimal.
	Decimal(Decimal),
	/// Calendar timestamp.
	Timestamp(Timestamp),
	/// Text string.
	String(Arc<str>),
	/// Symbolic identifier.
	Symbol(Arc<str>),
	/// Opaque binary payload.
	Blob(Arc<[u8]>),
	/// Character-oriented binary payload.
	Clob(Arc<[u8]>),
	/// Ordered list of child elements.
	List(Sequence),
	/// S-expression of child elements.
	Sexp(Sequence),
	/// Multimap of named fields.
	Struct(Struct),
}

/// Immutable node of the interchange data model.
///
/// An element is a [`Value`] plus an ordered annotation sequence and an
/// out-of-band metadata map. Once published, an element never changes; the
/// `with_*` operations return new elements that share the payload and
/// children of the original by reference.
#[derive(Clone)]
pub struct Element {
	value: Value,
	annotations: Annotations,
	metas: Metas,
}

impl Element {
	/// Build an element from a bare payload, with no annotations or metas.
	pub fn new(value: Value) -> Self {
		Self {
			value,
			annotations: Annotations::empty(),
			metas: Metas::empty(),
		}
	}

	/// The untyped null.
	pub fn null() -> Self {
		Self::new(Value::Null(ElementType::Null))
	}

	/// A typed null declaring the given subtype. `ElementType::Null` yields
	/// the untyped null.
	pub fn null_of(subtype: ElementType) -> Self {
		Self::new(Value::Null(subtype))
	}

	/// A boolean element.
	pub fn bool(value: bool) -> Self {
		Self::new(Value::Bool(value))
	}

	/// An integer element.
	pub fn int(value: impl Into<Int>) -> Self {
		Self::new(Value::Int(value.into()))
	}

	/// A float element.
	pub fn float(value: f64) -> Self {
		Self::new(Value::Float(value))
	}

	/// A decimal element.
	pub fn decimal(value: Decimal) -> Self {
		Self::new(Value::Decimal(value))
	}

	/// A timestamp element.
	pub fn timestamp(value: Timestamp) -> Self {
		Self::new(Value::Timestamp(value))
	}

	/// A string element.
	pub fn string(value: impl Into<Arc<str>>) -> Self {
		Self::new(Value::String(value.into()))
	}

	/// A symbol element.
	pub fn symbol(value: impl Into<Arc<str>>) -> Self {
		Self::new(Value::Symbol(value.into()))
	}

	/// A blob element. The bytes are copied in.
	pub fn blob(value: impl Into<Arc<[u8]>>) -> Self {
		Self::new(Value::Blob(value.into()))
	}

	/// A clob element. The bytes are copied in.
	pub fn clob(value: impl Into<Arc<[u8]>>) -> Self {
		Self::new(Value::Clob(value.into()))
	}

	/// A list element. The item collection is copied in.
	pub fn list<I, T>(items: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Arc<Element>>,
	{
		Self::new(Value::List(Sequence::new(items)))
	}

	/// An s-expression element. The item collection is copied in.
	pub fn sexp<I, T>(items: I) -> Self
	where
		I: IntoIterator<Item = T>,
		T: Into<Arc<Element>>,
	{
		Self::new(Value::Sexp(Sequence::new(items)))
	}

	/// A struct element built from (name, value) pairs, preserving order
	/// and multiplicity. The field collection is copied in.
	pub fn struct_of<I, N, V>(fields: I) -> Self
	where
		I: IntoIterator<Item = (N, V)>,
		N: Into<Arc<str>>,
		V: Into<Arc<Element>>,
	{
		Self::struct_from_fields(fields.into_iter().map(|(name, value)| StructField::new(name, value)))
	}

	/// A struct element built from prepared fields.
	pub fn struct_from_fields<I>(fields: I) -> Self
	where
		I: IntoIterator<Item = StructField>,
	{
		Self::new(Value::Struct(Struct::new(fields)))
	}

	/// The payload of this element.
	pub fn value(&self) -> &Value {
		&self.value
	}

	/// The ordered annotation sequence of this element.
	pub fn annotations(&self) -> &Annotations {
		&self.annotations
	}

	/// The metadata map of this element.
	pub fn metas(&self) -> &Metas {
		&self.metas
	}

	/// New element with the annotation sequence replaced; payload, children,
	/// and metas are shared with `self`.
	pub fn with_annotations<I, S>(&self, texts: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Arc<str>>,
	{
		Self {
			value: self.value.clone(),
			annotations: Annotations::from_texts(texts),
			metas: self.metas.clone(),
		}
	}

	/// New element with `texts` appended to the existing annotations.
	pub fn with_added_annotations<I, S>(&self, texts: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Arc<str>>,
	{
		Self {
			value: self.value.clone(),
			annotations: self.annotations.appending(texts),
			metas: self.metas.clone(),
		}
	}

	/// New element with no annotations.
	pub fn without_annotations(&self) -> Self {
		Self {
			value: self.value.clone(),
			annotations: Annotations::empty(),
			metas: self.metas.clone(),
		}
	}

	/// New element with the metadata map replaced wholesale.
	pub fn with_metas(&self, metas: Metas) -> Self {
		Self {
			value: self.value.clone(),
			annotations: self.annotations.clone(),
			metas,
		}
	}

	/// New element with one metadata entry added or replaced.
	pub fn with_meta(&self, key: impl Into<String>, value: impl std::any::Any + Send + Sync) -> Self {
		Self {
			value: self.value.clone(),
			annotations: self.annotations.clone(),
			metas: self.metas.with(key, value),
		}
	}

	/// New element with no metas.
	pub fn without_metas(&self) -> Self {
		Self {
			value: self.value.clone(),
			annotations: self.annotations.clone(),
			metas: Metas::empty(),
		}
	}

	pub(crate) fn with_parts(value: Value, annotations: Annotations, metas: Metas) -> Self {
		Self {
			value,
			annotations,
			metas,
		}
	}
}

impl std::fmt::Debug for Element {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let mut dbg = f.debug_struct("Element");
		dbg.field("value", &self.value);
		if !self.annotations.is_empty() {
			dbg.field("annotations", &self.annotations);
		}
		if !self.metas.is_empty() {
			dbg.field("metas", &self.metas);
		}
		dbg.finish()
	}
}

impl From<bool> for Element {
	fn from(value: bool) -> Self {
		Self::bool(value)
	}
}

impl From<i64> for Element {
	fn from(value: i64) -> Self {
		Self::int(value)
	}
}

impl From<i32> for Element {
	fn from(value: i32) -> Self {
		Self::int(value)
	}
}

impl From<BigInt> for Element {
	fn from(value: BigInt) -> Self {
		Self::int(value)
	}
}

impl From<f64> for Element {
	fn from(value: f64) -> Self {
		Self::float(value)
	}
}

impl From<Decimal> for Element {
	fn from(value: Decimal) -> Self {
		Self::decimal(value)
	}
}

impl From<Timestamp> for Element {
	fn from(value: Timestamp) -> Self {
		Self::timestamp(value)
	}
}

impl From<&str> for Element {
	fn from(value: &str) -> Self {
		Self::string(value)
	}
}

impl From<String> for Element {
	fn from(value: String) -> Self {
		Self::string(value)
	}
}
