use num_bigint::BigInt;

/// Integer payload of an element.
///
/// Values representable as `i64` always use the `I64` case; `Big` holds
/// only values outside that range. Constructors normalize, so derived
/// equality and hashing over the two cases are exact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Int {
	/// Machine-word fast path.
	I64(i64),
	/// Arbitrary-precision spill for values outside the `i64` range.
	Big(BigInt),
}

impl Int {
	/// The value as `i64`, or `None` when it does not fit.
	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Self::I64(v) => Some(*v),
			Self::Big(_) => None,
		}
	}

	/// The value widened to a [`BigInt`].
	pub fn to_big(&self) -> BigInt {
		match self {
			Self::I64(v) => BigInt::from(*v),
			Self::Big(v) => v.clone(),
		}
	}

	/// True when the value is strictly negative.
	pub fn is_negative(&self) -> bool {
		match self {
			Self::I64(v) => *v < 0,
			Self::Big(v) => v.sign() == num_bigint::Sign::Minus,
		}
	}

	/// True when the value is zero.
	pub fn is_zero(&self) -> bool {
		match self {
			Self::I64(v) => *v == 0,
			// Normalization keeps zero in the I64 case.
			Self::Big(_) => false,
		}
	}
}

impl From<i64> for Int {
	fn from(value: i64) -> Self {
		Self::I64(value)
	}
}

impl From<i32> for Int {
	fn from(value: i32) -> Self {
		Self::I64(i64::from(value))
	}
}

impl From<u64> for Int {
	fn from(value: u64) -> Self {
		match i64::try_from(value) {
			Ok(v) => Self::I64(v),
			Err(_) => Self::Big(BigInt::from(value)),
		}
	}
}

impl From<BigInt> for Int {
	fn from(value: BigInt) -> Self {
		match i64::try_from(&value) {
			Ok(v) => Self::I64(v),
			Err(_) => Self::Big(value),
		}
	}
}

impl std::fmt::Display for Int {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::I64(v) => write!(f, "{v}"),
			Self::Big(v) => write!(f, "{v}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use num_bigint::BigInt;

	use super::Int;

	#[test]
	fn big_in_i64_range_normalizes_to_i64() {
		let a = Int::from(BigInt::from(42));
		assert_eq!(a, Int::I64(42));
		assert_eq!(a.as_i64(), Some(42));
	}

	#[test]
	fn out_of_range_stays_big() {
		let big = BigInt::from(i64::MAX) + 1i32;
		let a = Int::from(big.clone());
		assert_eq!(a.as_i64(), None);
		assert_eq!(a.to_big(), big);
	}

	#[test]
	fn normalized_cases_compare_equal() {
		assert_eq!(Int::from(BigInt::from(-7)), Int::from(-7_i64));
		assert_eq!(Int::from(u64::MAX), Int::Big(BigInt::from(u64::MAX)));
	}
}
