use std::sync::Arc;

use crate::element::{Element, ElementError, Result, Struct, StructField, Value};

/// One parsed operation in an element path expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select the first struct field with this name.
	Field(String),
	/// Select a sequence item by zero-based index.
	Index(usize),
}

/// Parsed element path expression, e.g. `a.b[2].c`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl ElementPath {
	/// A path built directly from steps.
	pub fn new(steps: Vec<PathStep>) -> Self {
		Self { steps }
	}

	/// Parse dotted field syntax with optional `[index]` selectors.
	///
	/// A path may also begin with an index selector, for trees whose root
	/// is a sequence.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || ElementError::InvalidPath { path: input.to_owned() };
		if input.is_empty() {
			return Err(invalid());
		}

		let bytes = input.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			if bytes[idx] != b'[' {
				let start = idx;
				while idx < bytes.len() {
					let byte = bytes[idx];
					if byte.is_ascii_alphanumeric() || byte == b'_' {
						idx += 1;
					} else {
						break;
					}
				}
				if idx == start {
					return Err(invalid());
				}
				steps.push(PathStep::Field(input[start..idx].to_owned()));
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				let n_start = idx;
				while idx < bytes.len() && bytes[idx].is_ascii_digit() {
					idx += 1;
				}
				if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
					return Err(invalid());
				}
				let number = input[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
				steps.push(PathStep::Index(number));
				idx += 1;
			}

			if idx < bytes.len() && bytes[idx] != b'[' {
				if bytes[idx] != b'.' {
					return Err(invalid());
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(invalid());
				}
			}
		}

		Ok(Self { steps })
	}
}

impl Element {
	/// Traverse the path from this element, following first-occurrence
	/// field lookup in structs and zero-based indexes in sequences.
	pub fn get_path(&self, path: &ElementPath) -> Result<&Element> {
		let mut current = self;
		for step in &path.steps {
			current = match step {
				PathStep::Field(name) => current.as_struct()?.get(name)?,
				PathStep::Index(index) => {
					let sequence = current.as_seq()?;
					sequence.get(*index).ok_or(ElementError::IndexOutOfBounds {
						index: *index,
						len: sequence.len(),
					})?
				}
			};
		}
		Ok(current)
	}

	/// Produce a new root with the element at `path` replaced by `value`.
	///
	/// Performs the bottom-up path copy: every node on the path is rebuilt,
	/// every subtree off the path is shared with `self` by reference. The
	/// original tree remains valid and unchanged. An empty path yields the
	/// replacement itself.
	pub fn replace_at(&self, path: &ElementPath, value: impl Into<Arc<Element>>) -> Result<Element> {
		replace_steps(self, &path.steps, value.into())
	}
}

fn replace_steps(node: &Element, steps: &[PathStep], value: Arc<Element>) -> Result<Element> {
	let Some((head, rest)) = steps.split_first() else {
		return Ok(value.as_ref().clone());
	};
	match head {
		PathStep::Field(name) => {
			let strukt = node.as_struct()?;
			let position = strukt
				.as_slice()
				.iter()
				.position(|f| f.name.as_ref() == name.as_str())
				.ok_or_else(|| ElementError::FieldNotFound { name: name.clone() })?;
			let replacement = replaced_child(&strukt.as_slice()[position].value, rest, value)?;
			let mut fields: Vec<StructField> = strukt.as_slice().to_vec();
			fields[position].value = replacement;
			Ok(Element::with_parts(
				Value::Struct(Struct::new(fields)),
				node.annotations().clone(),
				node.metas().clone(),
			))
		}
		PathStep::Index(index) => {
			let sequence = node.as_seq()?;
			if *index >= sequence.len() {
				return Err(ElementError::IndexOutOfBounds {
					index: *index,
					len: sequence.len(),
				});
			}
			let replacement = replaced_child(&sequence.items()[*index], rest, value)?;
			let mut items: Vec<Arc<Element>> = sequence.items().to_vec();
			items[*index] = replacement;
			let rebuilt = crate::element::Sequence::new(items);
			let rebuilt = match node.value() {
				Value::Sexp(_) => Value::Sexp(rebuilt),
				_ => Value::List(rebuilt),
			};
			Ok(Element::with_parts(rebuilt, node.annotations().clone(), node.metas().clone()))
		}
	}
}

fn replaced_child(child: &Arc<Element>, rest: &[PathStep], value: Arc<Element>) -> Result<Arc<Element>> {
	if rest.is_empty() {
		Ok(value)
	} else {
		Ok(Arc::new(replace_steps(child, rest, value)?))
	}
}
