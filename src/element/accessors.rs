//! Typed views over [`Element`]: the only supported way to reach
//! variant-specific payloads and children.
//!
//! Each `as_*` accessor returns the typed view when the tag matches and
//! fails with [`ElementError::TypeMismatch`] otherwise. Any null element,
//! typed or not, fails the plain accessors with `actual = null`; the
//! `as_*_or_null` variants accept nulls as `Ok(None)` instead. The tag
//! predicates never fail.

use crate::element::{Decimal, Element, ElementError, ElementType, Int, Result, Sequence, Struct, Timestamp, Value};

impl Element {
	/// The variant tag. A typed null reports its declared subtype; the
	/// untyped null reports [`ElementType::Null`].
	pub fn element_type(&self) -> ElementType {
		match self.value() {
			Value::Null(subtype) => *subtype,
			Value::Bool(_) => ElementType::Bool,
			Value::Int(_) => ElementType::Int,
			Value::Float(_) => ElementType::Float,
			Value::Decimal(_) => ElementType::Decimal,
			Value::Timestamp(_) => ElementType::Timestamp,
			Value::String(_) => ElementType::String,
			Value::Symbol(_) => ElementType::Symbol,
			Value::Blob(_) => ElementType::Blob,
			Value::Clob(_) => ElementType::Clob,
			Value::List(_) => ElementType::List,
			Value::Sexp(_) => ElementType::Sexp,
			Value::Struct(_) => ElementType::Struct,
		}
	}

	/// True for the untyped null and every typed null.
	pub fn is_null(&self) -> bool {
		matches!(self.value(), Value::Null(_))
	}

	/// True when [`Element::element_type`] equals `t`. Never fails; note
	/// that a typed null reports its declared subtype here.
	pub fn is_type(&self, t: ElementType) -> bool {
		self.element_type() == t
	}

	fn mismatch(&self, expected: ElementType) -> ElementError {
		let actual = if self.is_null() { ElementType::Null } else { self.element_type() };
		ElementError::TypeMismatch { expected, actual }
	}

	/// The boolean payload.
	pub fn as_bool(&self) -> Result<bool> {
		match self.value() {
			Value::Bool(v) => Ok(*v),
			_ => Err(self.mismatch(ElementType::Bool)),
		}
	}

	/// The integer payload.
	pub fn as_int(&self) -> Result<&Int> {
		match self.value() {
			Value::Int(v) => Ok(v),
			_ => Err(self.mismatch(ElementType::Int)),
		}
	}

	/// The float payload.
	pub fn as_float(&self) -> Result<f64> {
		match self.value() {
			Value::Float(v) => Ok(*v),
			_ => Err(self.mismatch(ElementType::Float)),
		}
	}

	/// The decimal payload.
	pub fn as_decimal(&self) -> Result<&Decimal> {
		match self.value() {
			Value::Decimal(v) => Ok(v),
			_ => Err(self.mismatch(ElementType::Decimal)),
		}
	}

	/// The timestamp payload.
	pub fn as_timestamp(&self) -> Result<&Timestamp> {
		match self.value() {
			Value::Timestamp(v) => Ok(v),
			_ => Err(self.mismatch(ElementType::Timestamp)),
		}
	}

	/// The text payload of a string or symbol. A non-text element reports
	/// the string tag as expected.
	pub fn as_text(&self) -> Result<&str> {
		match self.value() {
			Value::String(v) | Value::Symbol(v) => Ok(v),
			_ => Err(self.mismatch(ElementType::String)),
		}
	}

	/// The string payload.
	pub fn as_string(&self) -> Result<&str> {
		match self.value() {
			Value::String(v) => Ok(v),
			_ => Err(self.mismatch(ElementType::String)),
		}
	}

	/// The symbol payload.
	pub fn as_symbol(&self) -> Result<&str> {
		match self.value() {
			Value::Symbol(v) => Ok(v),
			_ => Err(self.mismatch(ElementType::Symbol)),
		}
	}

	/// The blob payload.
	pub fn as_blob(&self) -> Result<&[u8]> {
		match self.value() {
			Value::Blob(v) => Ok(v),
			_ => Err(self.mismatch(ElementType::Blob)),
		}
	}

	/// The clob payload.
	pub fn as_clob(&self) -> Result<&[u8]> {
		match self.value() {
			Value::Clob(v) => Ok(v),
			_ => Err(self.mismatch(ElementType::Clob)),
		}
	}

	/// The byte payload of a blob or clob. A non-lob element reports the
	/// blob tag as expected.
	pub fn as_lob(&self) -> Result<&[u8]> {
		match self.value() {
			Value::Blob(v) | Value::Clob(v) => Ok(v),
			_ => Err(self.mismatch(ElementType::Blob)),
		}
	}

	/// The list children.
	pub fn as_list(&self) -> Result<&Sequence> {
		match self.value() {
			Value::List(v) => Ok(v),
			_ => Err(self.mismatch(ElementType::List)),
		}
	}

	/// The s-expression children.
	pub fn as_sexp(&self) -> Result<&Sequence> {
		match self.value() {
			Value::Sexp(v) => Ok(v),
			_ => Err(self.mismatch(ElementType::Sexp)),
		}
	}

	/// The children of a list or s-expression. A non-sequence element
	/// reports the list tag as expected.
	pub fn as_seq(&self) -> Result<&Sequence> {
		match self.value() {
			Value::List(v) | Value::Sexp(v) => Ok(v),
			_ => Err(self.mismatch(ElementType::List)),
		}
	}

	/// The struct fields.
	pub fn as_struct(&self) -> Result<&Struct> {
		match self.value() {
			Value::Struct(v) => Ok(v),
			_ => Err(self.mismatch(ElementType::Struct)),
		}
	}

	/// [`Element::as_bool`], with any null accepted as `None`.
	pub fn as_bool_or_null(&self) -> Result<Option<bool>> {
		if self.is_null() { Ok(None) } else { self.as_bool().map(Some) }
	}

	/// [`Element::as_int`], with any null accepted as `None`.
	pub fn as_int_or_null(&self) -> Result<Option<&Int>> {
		if self.is_null() { Ok(None) } else { self.as_int().map(Some) }
	}

	/// [`Element::as_float`], with any null accepted as `None`.
	pub fn as_float_or_null(&self) -> Result<Option<f64>> {
		if self.is_null() { Ok(None) } else { self.as_float().map(Some) }
	}

	/// [`Element::as_decimal`], with any null accepted as `None`.
	pub fn as_decimal_or_null(&self) -> Result<Option<&Decimal>> {
		if self.is_null() { Ok(None) } else { self.as_decimal().map(Some) }
	}

	/// [`Element::as_timestamp`], with any null accepted as `None`.
	pub fn as_timestamp_or_null(&self) -> Result<Option<&Timestamp>> {
		if self.is_null() { Ok(None) } else { self.as_timestamp().map(Some) }
	}

	/// [`Element::as_text`], with any null accepted as `None`.
	pub fn as_text_or_null(&self) -> Result<Option<&str>> {
		if self.is_null() { Ok(None) } else { self.as_text().map(Some) }
	}

	/// [`Element::as_string`], with any null accepted as `None`.
	pub fn as_string_or_null(&self) -> Result<Option<&str>> {
		if self.is_null() { Ok(None) } else { self.as_string().map(Some) }
	}

	/// [`Element::as_symbol`], with any null accepted as `None`.
	pub fn as_symbol_or_null(&self) -> Result<Option<&str>> {
		if self.is_null() { Ok(None) } else { self.as_symbol().map(Some) }
	}

	/// [`Element::as_blob`], with any null accepted as `None`.
	pub fn as_blob_or_null(&self) -> Result<Option<&[u8]>> {
		if self.is_null() { Ok(None) } else { self.as_blob().map(Some) }
	}

	/// [`Element::as_clob`], with any null accepted as `None`.
	pub fn as_clob_or_null(&self) -> Result<Option<&[u8]>> {
		if self.is_null() { Ok(None) } else { self.as_clob().map(Some) }
	}

	/// [`Element::as_lob`], with any null accepted as `None`.
	pub fn as_lob_or_null(&self) -> Result<Option<&[u8]>> {
		if self.is_null() { Ok(None) } else { self.as_lob().map(Some) }
	}

	/// [`Element::as_list`], with any null accepted as `None`.
	pub fn as_list_or_null(&self) -> Result<Option<&Sequence>> {
		if self.is_null() { Ok(None) } else { self.as_list().map(Some) }
	}

	/// [`Element::as_sexp`], with any null accepted as `None`.
	pub fn as_sexp_or_null(&self) -> Result<Option<&Sequence>> {
		if self.is_null() { Ok(None) } else { self.as_sexp().map(Some) }
	}

	/// [`Element::as_seq`], with any null accepted as `None`.
	pub fn as_seq_or_null(&self) -> Result<Option<&Sequence>> {
		if self.is_null() { Ok(None) } else { self.as_seq().map(Some) }
	}

	/// [`Element::as_struct`], with any null accepted as `None`.
	pub fn as_struct_or_null(&self) -> Result<Option<&Struct>> {
		if self.is_null() { Ok(None) } else { self.as_struct().map(Some) }
	}
}

#[cfg(test)]
mod tests {
	use crate::element::{Element, ElementError, ElementType};

	#[test]
	fn struct_accessor_on_int_names_both_tags() {
		let err = Element::int(1).as_struct().expect_err("int is not a struct");
		assert_eq!(
			err,
			ElementError::TypeMismatch {
				expected: ElementType::Struct,
				actual: ElementType::Int,
			}
		);
	}

	#[test]
	fn typed_null_reports_declared_subtype_but_fails_accessors_as_null() {
		let e = Element::null_of(ElementType::Int);
		assert_eq!(e.element_type(), ElementType::Int);
		assert!(e.is_null());
		let err = e.as_int().expect_err("typed null holds no payload");
		assert_eq!(
			err,
			ElementError::TypeMismatch {
				expected: ElementType::Int,
				actual: ElementType::Null,
			}
		);
		assert_eq!(e.as_int_or_null().expect("null is accepted"), None);
	}

	#[test]
	fn combined_accessors_cover_both_variants() {
		assert_eq!(Element::symbol("s").as_text().expect("symbol is text"), "s");
		assert_eq!(Element::string("s").as_text().expect("string is text"), "s");
		assert!(Element::clob(&b"c"[..]).as_lob().is_ok());
		assert!(Element::sexp([Element::int(1)]).as_seq().is_ok());
		assert!(Element::list([Element::int(1)]).as_sexp().is_err());
	}
}
