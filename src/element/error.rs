use thiserror::Error;

use crate::element::ElementType;

/// Crate-local result type for element operations.
pub type Result<T> = std::result::Result<T, ElementError>;

/// Errors produced while inspecting, converting, and updating elements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElementError {
	/// A typed accessor was called on an element of a different variant.
	#[error("type mismatch: expected {expected}, actual {actual}")]
	TypeMismatch {
		/// Variant the caller asked for.
		expected: ElementType,
		/// Variant the element actually holds.
		actual: ElementType,
	},
	/// Single-result struct lookup found no field with the requested name.
	#[error("field not found: {name}")]
	FieldNotFound {
		/// Requested field name.
		name: String,
	},
	/// Sequence index was outside the item range.
	#[error("index {index} out of bounds for sequence of length {len}")]
	IndexOutOfBounds {
		/// Requested zero-based index.
		index: usize,
		/// Number of items in the sequence.
		len: usize,
	},
	/// Calendar fields do not form a valid timestamp.
	#[error("invalid timestamp {year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}")]
	InvalidTimestamp {
		/// Proleptic-Gregorian year.
		year: i32,
		/// One-based month.
		month: u8,
		/// One-based day of month.
		day: u8,
		/// Hour of day.
		hour: u8,
		/// Minute of hour.
		minute: u8,
		/// Second of minute.
		second: u8,
	},
	/// Fractional seconds outside the representable range.
	#[error("invalid fractional seconds: {nanos} nanoseconds over {digits} digits")]
	InvalidFraction {
		/// Nanoseconds within the second.
		nanos: u32,
		/// Declared count of fractional digits.
		digits: u8,
	},
	/// Timestamp offset outside the representable range.
	#[error("invalid timestamp offset: {minutes} minutes")]
	InvalidOffset {
		/// Offset from UTC in minutes.
		minutes: i32,
	},
	/// Path expression syntax is invalid.
	#[error("invalid element path: {path}")]
	InvalidPath {
		/// Original user-provided path string.
		path: String,
	},
}
