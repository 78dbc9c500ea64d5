use std::fmt;

/// Variant tag of an [`Element`](crate::element::Element).
///
/// `Null` names the untyped null; a typed null reports the variant it
/// declares instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
	/// Untyped null.
	Null,
	/// Boolean.
	Bool,
	/// Arbitrary-precision integer.
	Int,
	/// 64-bit binary float.
	Float,
	/// Exact decimal.
	Decimal,
	/// Calendar timestamp.
	Timestamp,
	/// Text string.
	String,
	/// Symbolic identifier.
	Symbol,
	/// Opaque binary payload.
	Blob,
	/// Character-oriented binary payload.
	Clob,
	/// Ordered list.
	List,
	/// S-expression.
	Sexp,
	/// Multimap of named fields.
	Struct,
}

impl ElementType {
	/// True for the variants that contain child elements.
	pub fn is_container(self) -> bool {
		matches!(self, Self::List | Self::Sexp | Self::Struct)
	}

	/// True for the ordered-sequence variants.
	pub fn is_seq(self) -> bool {
		matches!(self, Self::List | Self::Sexp)
	}

	/// True for the text variants.
	pub fn is_text(self) -> bool {
		matches!(self, Self::String | Self::Symbol)
	}

	/// True for the binary payload variants.
	pub fn is_lob(self) -> bool {
		matches!(self, Self::Blob | Self::Clob)
	}

	/// Lowercase tag name as used in the text form and error messages.
	pub fn name(self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::Decimal => "decimal",
			Self::Timestamp => "timestamp",
			Self::String => "string",
			Self::Symbol => "symbol",
			Self::Blob => "blob",
			Self::Clob => "clob",
			Self::List => "list",
			Self::Sexp => "sexp",
			Self::Struct => "struct",
		}
	}

	/// Parse a lowercase tag name, as written after `null.` in the text form.
	pub fn from_name(name: &str) -> Option<Self> {
		Some(match name {
			"null" => Self::Null,
			"bool" => Self::Bool,
			"int" => Self::Int,
			"float" => Self::Float,
			"decimal" => Self::Decimal,
			"timestamp" => Self::Timestamp,
			"string" => Self::String,
			"symbol" => Self::Symbol,
			"blob" => Self::Blob,
			"clob" => Self::Clob,
			"list" => Self::List,
			"sexp" => Self::Sexp,
			"struct" => Self::Struct,
			_ => return None,
		})
	}
}

impl fmt::Display for ElementType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}
