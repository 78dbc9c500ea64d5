//! The structural-equality and hashing contract for elements.
//!
//! Equality compares tag, payload, and annotations and deliberately
//! excludes metas. Floats compare by bit pattern so equality is total and
//! reflexive (`nan == nan`, `0e0 != -0e0`). Struct equality is
//! order-insensitive but multiplicity-sensitive; struct hashing combines
//! per-field hashes in sorted order so equal structs hash alike.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::element::{Element, Sequence, Struct, StructField, Value};

impl PartialEq for Element {
	fn eq(&self, other: &Self) -> bool {
		// Metas intentionally not compared.
		self.annotations() == other.annotations() && values_equal(self.value(), other.value())
	}
}

impl Eq for Element {}

impl PartialEq for Sequence {
	fn eq(&self, other: &Self) -> bool {
		self.items() == other.items()
	}
}

impl Eq for Sequence {}

impl PartialEq for Struct {
	fn eq(&self, other: &Self) -> bool {
		fields_multiset_equal(self.as_slice(), other.as_slice())
	}
}

impl Eq for Struct {}

fn values_equal(left: &Value, right: &Value) -> bool {
	match (left, right) {
		(Value::Null(a), Value::Null(b)) => a == b,
		(Value::Bool(a), Value::Bool(b)) => a == b,
		(Value::Int(a), Value::Int(b)) => a == b,
		(Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
		(Value::Decimal(a), Value::Decimal(b)) => a == b,
		(Value::Timestamp(a), Value::Timestamp(b)) => a == b,
		(Value::String(a), Value::String(b)) => a == b,
		(Value::Symbol(a), Value::Symbol(b)) => a == b,
		(Value::Blob(a), Value::Blob(b)) => a == b,
		(Value::Clob(a), Value::Clob(b)) => a == b,
		(Value::List(a), Value::List(b)) => a == b,
		(Value::Sexp(a), Value::Sexp(b)) => a == b,
		(Value::Struct(a), Value::Struct(b)) => a == b,
		_ => false,
	}
}

fn fields_multiset_equal(left: &[StructField], right: &[StructField]) -> bool {
	if left.len() != right.len() {
		return false;
	}
	// Same order is the common case and avoids counting.
	if left.iter().zip(right.iter()).all(|(a, b)| a == b) {
		return true;
	}
	let mut counts: HashMap<&StructField, i64> = HashMap::with_capacity(left.len());
	for field in left {
		*counts.entry(field).or_insert(0) += 1;
	}
	for field in right {
		match counts.get_mut(field) {
			Some(count) if *count > 0 => *count -= 1,
			_ => return false,
		}
	}
	true
}

impl Hash for Element {
	fn hash<H: Hasher>(&self, state: &mut H) {
		match self.value() {
			Value::Null(subtype) => {
				state.write_u8(0);
				subtype.hash(state);
			}
			Value::Bool(v) => {
				state.write_u8(1);
				v.hash(state);
			}
			Value::Int(v) => {
				state.write_u8(2);
				v.hash(state);
			}
			Value::Float(v) => {
				state.write_u8(3);
				v.to_bits().hash(state);
			}
			Value::Decimal(v) => {
				state.write_u8(4);
				v.hash(state);
			}
			Value::Timestamp(v) => {
				state.write_u8(5);
				v.hash(state);
			}
			Value::String(v) => {
				state.write_u8(6);
				v.hash(state);
			}
			Value::Symbol(v) => {
				state.write_u8(7);
				v.hash(state);
			}
			Value::Blob(v) => {
				state.write_u8(8);
				v.hash(state);
			}
			Value::Clob(v) => {
				state.write_u8(9);
				v.hash(state);
			}
			Value::List(v) => {
				state.write_u8(10);
				hash_sequence(v, state);
			}
			Value::Sexp(v) => {
				state.write_u8(11);
				hash_sequence(v, state);
			}
			Value::Struct(v) => {
				state.write_u8(12);
				hash_struct(v, state);
			}
		}
		self.annotations().hash(state);
		// Metas intentionally not hashed.
	}
}

fn hash_sequence<H: Hasher>(sequence: &Sequence, state: &mut H) {
	state.write_usize(sequence.len());
	for item in sequence.iter() {
		item.hash(state);
	}
}

fn hash_struct<H: Hasher>(strukt: &Struct, state: &mut H) {
	// Field hashes are combined in sorted order so field order cannot
	// influence the result, matching order-insensitive equality.
	let mut field_hashes: Vec<u64> = strukt
		.fields()
		.map(|field| {
			let mut hasher = DefaultHasher::new();
			field.hash(&mut hasher);
			hasher.finish()
		})
		.collect();
	field_hashes.sort_unstable();
	state.write_usize(field_hashes.len());
	for h in field_hashes {
		state.write_u64(h);
	}
}
