use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};

/// Exact decimal payload of an element: `coefficient * 10^exponent`.
///
/// Equality and hashing are representation-exact on (sign, coefficient,
/// exponent), so `1.10` and `1.1` are distinct values, and negative zero is
/// distinct from positive zero. This matches exact-precision interchange
/// semantics; no arithmetic is provided.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
	negative: bool,
	coefficient: BigUint,
	exponent: i64,
}

impl Decimal {
	/// Build from a signed machine-word coefficient and a power-of-ten
	/// exponent.
	pub fn new(coefficient: i64, exponent: i64) -> Self {
		Self {
			negative: coefficient < 0,
			coefficient: coefficient.unsigned_abs().into(),
			exponent,
		}
	}

	/// Build from an arbitrary-precision signed coefficient.
	pub fn from_bigint(coefficient: BigInt, exponent: i64) -> Self {
		let (sign, magnitude) = coefficient.into_parts();
		Self {
			negative: sign == Sign::Minus,
			coefficient: magnitude,
			exponent,
		}
	}

	/// Negative zero with the given exponent.
	pub fn negative_zero(exponent: i64) -> Self {
		Self {
			negative: true,
			coefficient: BigUint::ZERO,
			exponent,
		}
	}

	/// Coefficient magnitude, without the sign.
	pub fn coefficient(&self) -> &BigUint {
		&self.coefficient
	}

	/// Coefficient with the sign applied. Negative zero collapses to zero
	/// here; use [`Decimal::is_negative`] to recover the sign.
	pub fn signed_coefficient(&self) -> BigInt {
		let sign = if self.coefficient == BigUint::ZERO {
			Sign::NoSign
		} else if self.negative {
			Sign::Minus
		} else {
			Sign::Plus
		};
		BigInt::from_biguint(sign, self.coefficient.clone())
	}

	/// Power-of-ten exponent.
	pub fn exponent(&self) -> i64 {
		self.exponent
	}

	/// True for negative values and for negative zero.
	pub fn is_negative(&self) -> bool {
		self.negative
	}

	/// True when the coefficient is zero, regardless of sign.
	pub fn is_zero(&self) -> bool {
		self.coefficient == BigUint::ZERO
	}
}

impl From<i64> for Decimal {
	fn from(value: i64) -> Self {
		Self::new(value, 0)
	}
}

impl fmt::Display for Decimal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.negative {
			f.write_str("-")?;
		}
		let digits = self.coefficient.to_string();
		if self.exponent == 0 {
			// Trailing point marks the value as a decimal in the text form.
			return write!(f, "{digits}.");
		}
		if self.exponent < 0 {
			let shift = self.exponent.unsigned_abs() as usize;
			if shift < digits.len() {
				let point = digits.len() - shift;
				return write!(f, "{}.{}", &digits[..point], &digits[point..]);
			}
			if shift <= digits.len() + 6 {
				return write!(f, "0.{}{digits}", "0".repeat(shift - digits.len()));
			}
		}
		write!(f, "{digits}d{}", self.exponent)
	}
}
