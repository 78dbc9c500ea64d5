use thiserror::Error;

/// One-based line/column position within a text-form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Location {
	/// One-based line number.
	pub line: u32,
	/// One-based column number, counted in characters.
	pub column: u32,
}

impl std::fmt::Display for Location {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.line, self.column)
	}
}

/// Errors produced while reading the text form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadError {
	/// Input ended in the middle of a value.
	#[error("unexpected end of input at {location}")]
	UnexpectedEof {
		/// Position where more input was required.
		location: Location,
	},
	/// A character that cannot start or continue the expected construct.
	#[error("unexpected character {ch:?} at {location}")]
	UnexpectedChar {
		/// Offending character.
		ch: char,
		/// Position of the character.
		location: Location,
	},
	/// Unknown or malformed escape sequence in a string, symbol, or clob.
	#[error("invalid escape sequence starting with {ch:?} at {location}")]
	InvalidEscape {
		/// Character following the backslash.
		ch: char,
		/// Position of the backslash.
		location: Location,
	},
	/// Numeric token that does not form a valid int, float, or decimal.
	#[error("invalid number {text:?} at {location}")]
	InvalidNumber {
		/// Offending token text.
		text: String,
		/// Position where the token started.
		location: Location,
	},
	/// Timestamp token with invalid syntax or calendar fields.
	#[error("invalid timestamp {text:?} at {location}")]
	InvalidTimestamp {
		/// Offending token text.
		text: String,
		/// Position where the token started.
		location: Location,
	},
	/// `null.<name>` with an unknown type name.
	#[error("unknown null type {name:?} at {location}")]
	UnknownNullType {
		/// Offending type name.
		name: String,
		/// Position of the name.
		location: Location,
	},
	/// Blob content that is not valid base64.
	#[error("invalid base64 blob content at {location}")]
	InvalidBase64 {
		/// Position where the blob content started.
		location: Location,
	},
	/// `load_one` input held more than one top-level value.
	#[error("expected a single value but found another at {location}")]
	ExpectedSingleValue {
		/// Position of the second value.
		location: Location,
	},
	/// `load_one` input held no value at all.
	#[error("no value found in input")]
	NoValueFound,
}

impl ReadError {
	/// Position the error refers to, when one exists.
	pub fn location(&self) -> Option<Location> {
		match self {
			Self::UnexpectedEof { location }
			| Self::UnexpectedChar { location, .. }
			| Self::InvalidEscape { location, .. }
			| Self::InvalidNumber { location, .. }
			| Self::InvalidTimestamp { location, .. }
			| Self::UnknownNullType { location, .. }
			| Self::InvalidBase64 { location }
			| Self::ExpectedSingleValue { location } => Some(*location),
			Self::NoValueFound => None,
		}
	}
}

/// Errors produced while writing the text form.
#[derive(Debug, Error)]
pub enum WriteError {
	/// The output sink failed.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
}
