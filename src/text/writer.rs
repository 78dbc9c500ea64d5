use std::io::Write;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::debug;

use crate::element::{Element, ElementType, Value};
use crate::text::WriteError;

/// Consumer of elements targeting an external representation.
///
/// Implementations must reproduce annotations and the untyped/typed-null
/// distinction faithfully; metas are outside the value model and need not
/// be persisted.
pub trait ElementWriter {
	/// Write one element.
	fn write(&mut self, element: &Element) -> Result<(), WriteError>;
}

/// Compact text-form writer over any [`io::Write`](std::io::Write) sink.
#[derive(Debug)]
pub struct TextWriter<W: Write> {
	out: W,
	started: bool,
}

impl<W: Write> TextWriter<W> {
	/// Writer over `out`.
	pub fn new(out: W) -> Self {
		Self { out, started: false }
	}

	/// Write each element, separating top-level values with newlines.
	pub fn write_all<'a, I>(&mut self, elements: I) -> Result<(), WriteError>
	where
		I: IntoIterator<Item = &'a Element>,
	{
		let mut count = 0_usize;
		for element in elements {
			self.write(element)?;
			count += 1;
		}
		debug!(count, "wrote top-level elements");
		Ok(())
	}

	/// Recover the underlying sink.
	pub fn into_inner(self) -> W {
		self.out
	}
}

impl<W: Write> ElementWriter for TextWriter<W> {
	fn write(&mut self, element: &Element) -> Result<(), WriteError> {
		if self.started {
			self.out.write_all(b"\n")?;
		}
		self.started = true;
		emit_element(&mut self.out, element)?;
		Ok(())
	}
}

/// Render one element to a string in the compact text form.
pub fn to_text(element: &Element) -> String {
	let mut out = Vec::new();
	// A Vec sink cannot fail.
	emit_element(&mut out, element).expect("writing to a Vec cannot fail");
	String::from_utf8(out).expect("the text form is always UTF-8")
}

impl std::fmt::Display for Element {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&to_text(self))
	}
}

fn emit_element(out: &mut impl Write, element: &Element) -> Result<(), WriteError> {
	for annotation in element.annotations().iter() {
		emit_symbol_text(out, annotation)?;
		out.write_all(b"::")?;
	}
	match element.value() {
		Value::Null(ElementType::Null) => out.write_all(b"null")?,
		Value::Null(subtype) => write!(out, "null.{}", subtype.name())?,
		Value::Bool(true) => out.write_all(b"true")?,
		Value::Bool(false) => out.write_all(b"false")?,
		Value::Int(v) => write!(out, "{v}")?,
		Value::Float(v) => emit_float(out, *v)?,
		Value::Decimal(v) => write!(out, "{v}")?,
		Value::Timestamp(v) => write!(out, "{v}")?,
		Value::String(v) => emit_quoted(out, v, b'"')?,
		Value::Symbol(v) => emit_symbol_text(out, v)?,
		Value::Blob(v) => write!(out, "{{{{{}}}}}", BASE64.encode(v))?,
		Value::Clob(v) => emit_clob(out, v)?,
		Value::List(items) => {
			out.write_all(b"[")?;
			for (index, item) in items.iter().enumerate() {
				if index > 0 {
					out.write_all(b",")?;
				}
				emit_element(out, item)?;
			}
			out.write_all(b"]")?;
		}
		Value::Sexp(items) => {
			out.write_all(b"(")?;
			for (index, item) in items.iter().enumerate() {
				if index > 0 {
					out.write_all(b" ")?;
				}
				emit_element(out, item)?;
			}
			out.write_all(b")")?;
		}
		Value::Struct(fields) => {
			out.write_all(b"{")?;
			for (index, field) in fields.fields().enumerate() {
				if index > 0 {
					out.write_all(b",")?;
				}
				emit_symbol_text(out, &field.name)?;
				out.write_all(b":")?;
				emit_element(out, &field.value)?;
			}
			out.write_all(b"}")?;
		}
	}
	Ok(())
}

fn emit_float(out: &mut impl Write, value: f64) -> Result<(), WriteError> {
	if value.is_nan() {
		out.write_all(b"nan")?;
	} else if value == f64::INFINITY {
		out.write_all(b"+inf")?;
	} else if value == f64::NEG_INFINITY {
		out.write_all(b"-inf")?;
	} else {
		// `{:e}` is the shortest representation that parses back to the
		// same bits.
		write!(out, "{value:e}")?;
	}
	Ok(())
}

/// Write symbol text bare when it is identifier-shaped and not a keyword,
/// otherwise single-quoted.
fn emit_symbol_text(out: &mut impl Write, text: &str) -> Result<(), WriteError> {
	if is_bare_symbol(text) {
		out.write_all(text.as_bytes())?;
		Ok(())
	} else {
		emit_quoted(out, text, b'\'')
	}
}

fn is_bare_symbol(text: &str) -> bool {
	let mut chars = text.chars();
	let Some(first) = chars.next() else {
		return false;
	};
	if !(first.is_ascii_alphabetic() || first == '_' || first == '$') {
		return false;
	}
	if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
		return false;
	}
	!matches!(text, "null" | "true" | "false" | "nan")
}

fn emit_quoted(out: &mut impl Write, text: &str, quote: u8) -> Result<(), WriteError> {
	out.write_all(&[quote])?;
	for ch in text.chars() {
		match ch {
			'\\' => out.write_all(b"\\\\")?,
			'"' if quote == b'"' => out.write_all(b"\\\"")?,
			'\'' if quote == b'\'' => out.write_all(b"\\'")?,
			'\n' => out.write_all(b"\\n")?,
			'\r' => out.write_all(b"\\r")?,
			'\t' => out.write_all(b"\\t")?,
			c if (c as u32) < 0x20 => write!(out, "\\x{:02x}", c as u32)?,
			c => write!(out, "{c}")?,
		}
	}
	out.write_all(&[quote])?;
	Ok(())
}

fn emit_clob(out: &mut impl Write, bytes: &[u8]) -> Result<(), WriteError> {
	out.write_all(b"{{\"")?;
	for byte in bytes {
		match byte {
			b'\\' => out.write_all(b"\\\\")?,
			b'"' => out.write_all(b"\\\"")?,
			b'\n' => out.write_all(b"\\n")?,
			b'\r' => out.write_all(b"\\r")?,
			b'\t' => out.write_all(b"\\t")?,
			b if (0x20..0x7f).contains(b) => out.write_all(&[*b])?,
			b => write!(out, "\\x{b:02x}")?,
		}
	}
	out.write_all(b"\"}}")?;
	Ok(())
}
