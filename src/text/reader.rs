use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use num_bigint::BigInt;
use tracing::{debug, trace};

use crate::element::{Decimal, Element, ElementType, Int, StructField, Timestamp};
use crate::text::scanner::Scanner;
use crate::text::{LOCATION_META_KEY, Location, ReadError};

/// Behavior switches for the text reader.
#[derive(Debug, Clone, Default)]
pub struct TextReaderOptions {
	/// Attach a [`Location`] meta to every produced element, keyed by
	/// [`LOCATION_META_KEY`](crate::text::LOCATION_META_KEY).
	pub include_location_meta: bool,
}

/// Producer of elements from an external token stream.
///
/// Both operations may fail with a [`ReadError`] carrying a line/column
/// position on malformed input; consumers of this trait propagate such
/// failures unchanged.
pub trait ElementReader {
	/// Advance past the next top-level element and return it, or `None` at
	/// end of input.
	fn next_element(&mut self) -> Result<Option<Element>, ReadError>;

	/// Materialize the element at the current position without advancing.
	fn current_element(&mut self) -> Result<Element, ReadError>;
}

/// Recursive-descent reader over a text-form input.
#[derive(Debug)]
pub struct TextReader<'a> {
	scanner: Scanner<'a>,
	options: TextReaderOptions,
}

impl<'a> TextReader<'a> {
	/// Reader with default options.
	pub fn new(input: &'a str) -> Self {
		Self::with_options(input, TextReaderOptions::default())
	}

	/// Reader with explicit options.
	pub fn with_options(input: &'a str, options: TextReaderOptions) -> Self {
		Self {
			scanner: Scanner::new(input),
			options,
		}
	}

	fn parse_top(&mut self) -> Result<Option<Element>, ReadError> {
		self.scanner.skip_trivia()?;
		if self.scanner.is_eof() {
			return Ok(None);
		}
		self.parse_value().map(Some)
	}

	fn parse_value(&mut self) -> Result<Element, ReadError> {
		self.scanner.skip_trivia()?;
		let location = self.scanner.location();
		let mut annotations: Vec<String> = Vec::new();
		let element = loop {
			self.scanner.skip_trivia()?;
			let Some(ch) = self.scanner.peek() else {
				return Err(ReadError::UnexpectedEof { location: self.scanner.location() });
			};
			match ch {
				'[' => break self.parse_list()?,
				'(' => break self.parse_sexp()?,
				'{' if self.scanner.peek_second() == Some('{') => break self.parse_lob()?,
				'{' => break self.parse_struct()?,
				'"' => break Element::string(self.parse_string_like('"')?),
				'\'' => {
					let text = self.parse_string_like('\'')?;
					if self.eat_annotation_marker()? {
						annotations.push(text);
						continue;
					}
					break Element::symbol(text);
				}
				c if c == '-' || c == '+' || c.is_ascii_digit() => break self.parse_number()?,
				c if is_identifier_start(c) => {
					let ident = self.scanner.take_while(is_identifier_part).to_owned();
					if self.eat_annotation_marker()? {
						annotations.push(ident);
						continue;
					}
					break self.ident_element(ident)?;
				}
				other => {
					return Err(ReadError::UnexpectedChar {
						ch: other,
						location: self.scanner.location(),
					});
				}
			}
		};
		let element = if annotations.is_empty() {
			element
		} else {
			element.with_annotations(annotations)
		};
		if self.options.include_location_meta {
			Ok(element.with_meta(LOCATION_META_KEY, location))
		} else {
			Ok(element)
		}
	}

	/// Look ahead past trivia for a `::` annotation marker; consume it when
	/// present, otherwise restore the position.
	fn eat_annotation_marker(&mut self) -> Result<bool, ReadError> {
		let checkpoint = self.scanner.checkpoint();
		self.scanner.skip_trivia()?;
		if self.scanner.peek() == Some(':') && self.scanner.peek_second() == Some(':') {
			self.scanner.bump();
			self.scanner.bump();
			Ok(true)
		} else {
			self.scanner.restore(checkpoint);
			Ok(false)
		}
	}

	fn ident_element(&mut self, ident: String) -> Result<Element, ReadError> {
		match ident.as_str() {
			"null" => {
				if self.scanner.eat('.') {
					let location = self.scanner.location();
					let name = self.scanner.take_while(is_identifier_part);
					match ElementType::from_name(name) {
						Some(subtype) => Ok(Element::null_of(subtype)),
						None => Err(ReadError::UnknownNullType {
							name: name.to_owned(),
							location,
						}),
					}
				} else {
					Ok(Element::null())
				}
			}
			"true" => Ok(Element::bool(true)),
			"false" => Ok(Element::bool(false)),
			"nan" => Ok(Element::float(f64::NAN)),
			_ => Ok(Element::symbol(ident)),
		}
	}

	fn parse_list(&mut self) -> Result<Element, ReadError> {
		self.scanner.bump();
		let mut items: Vec<Element> = Vec::new();
		loop {
			self.scanner.skip_trivia()?;
			if self.scanner.eat(']') {
				break;
			}
			items.push(self.parse_value()?);
			self.scanner.skip_trivia()?;
			if self.scanner.eat(',') {
				continue;
			}
			if self.scanner.eat(']') {
				break;
			}
			return Err(self.delimiter_error());
		}
		Ok(Element::list(items))
	}

	fn parse_sexp(&mut self) -> Result<Element, ReadError> {
		self.scanner.bump();
		let mut items: Vec<Element> = Vec::new();
		loop {
			self.scanner.skip_trivia()?;
			if self.scanner.eat(')') {
				break;
			}
			if self.scanner.is_eof() {
				return Err(ReadError::UnexpectedEof { location: self.scanner.location() });
			}
			items.push(self.parse_value()?);
		}
		Ok(Element::sexp(items))
	}

	fn parse_struct(&mut self) -> Result<Element, ReadError> {
		self.scanner.bump();
		let mut fields: Vec<StructField> = Vec::new();
		loop {
			self.scanner.skip_trivia()?;
			if self.scanner.eat('}') {
				break;
			}
			let location = self.scanner.location();
			let name = match self.scanner.peek() {
				None => return Err(ReadError::UnexpectedEof { location }),
				Some('"') => self.parse_string_like('"')?,
				Some('\'') => self.parse_string_like('\'')?,
				Some(c) if is_identifier_start(c) => self.scanner.take_while(is_identifier_part).to_owned(),
				Some(c) => return Err(ReadError::UnexpectedChar { ch: c, location }),
			};
			self.scanner.skip_trivia()?;
			if !self.scanner.eat(':') {
				return Err(self.delimiter_error());
			}
			if self.scanner.peek() == Some(':') {
				return Err(ReadError::UnexpectedChar {
					ch: ':',
					location: self.scanner.location(),
				});
			}
			let value = self.parse_value()?;
			fields.push(StructField::new(name, value));
			self.scanner.skip_trivia()?;
			if self.scanner.eat(',') {
				continue;
			}
			if self.scanner.eat('}') {
				break;
			}
			return Err(self.delimiter_error());
		}
		Ok(Element::struct_from_fields(fields))
	}

	fn parse_lob(&mut self) -> Result<Element, ReadError> {
		self.scanner.bump();
		self.scanner.bump();
		self.scanner.skip_trivia()?;
		let location = self.scanner.location();
		if self.scanner.peek() == Some('"') {
			let text = self.parse_string_like('"')?;
			let mut bytes = Vec::with_capacity(text.len());
			for ch in text.chars() {
				let code = u32::from(ch);
				if code > 0xFF {
					return Err(ReadError::UnexpectedChar { ch, location });
				}
				bytes.push(code as u8);
			}
			self.scanner.skip_trivia()?;
			self.expect_lob_close()?;
			Ok(Element::clob(bytes))
		} else {
			let content = self.scanner.take_while(|c| c != '}');
			let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
			let bytes = BASE64.decode(compact.as_bytes()).map_err(|_| ReadError::InvalidBase64 { location })?;
			self.expect_lob_close()?;
			Ok(Element::blob(bytes))
		}
	}

	fn expect_lob_close(&mut self) -> Result<(), ReadError> {
		for _ in 0..2 {
			if !self.scanner.eat('}') {
				return Err(self.delimiter_error());
			}
		}
		Ok(())
	}

	fn parse_string_like(&mut self, delimiter: char) -> Result<String, ReadError> {
		self.scanner.bump();
		let mut out = String::new();
		loop {
			let location = self.scanner.location();
			let Some(ch) = self.scanner.bump() else {
				return Err(ReadError::UnexpectedEof { location });
			};
			if ch == delimiter {
				return Ok(out);
			}
			match ch {
				'\n' => return Err(ReadError::UnexpectedChar { ch, location }),
				'\\' => out.push(self.parse_escape()?),
				other => out.push(other),
			}
		}
	}

	fn parse_escape(&mut self) -> Result<char, ReadError> {
		let location = self.scanner.location();
		let Some(ch) = self.scanner.bump() else {
			return Err(ReadError::UnexpectedEof { location });
		};
		Ok(match ch {
			'n' => '\n',
			't' => '\t',
			'r' => '\r',
			'0' => '\0',
			'\\' => '\\',
			'"' => '"',
			'\'' => '\'',
			'/' => '/',
			'x' => self.parse_hex_escape(2, location)?,
			'u' => self.parse_hex_escape(4, location)?,
			other => return Err(ReadError::InvalidEscape { ch: other, location }),
		})
	}

	fn parse_hex_escape(&mut self, width: u32, location: Location) -> Result<char, ReadError> {
		let mut value = 0_u32;
		for _ in 0..width {
			let Some(ch) = self.scanner.bump() else {
				return Err(ReadError::UnexpectedEof { location: self.scanner.location() });
			};
			let digit = ch.to_digit(16).ok_or(ReadError::InvalidEscape { ch, location })?;
			value = value * 16 + digit;
		}
		char::from_u32(value).ok_or(ReadError::InvalidEscape { ch: 'u', location })
	}

	fn parse_number(&mut self) -> Result<Element, ReadError> {
		let location = self.scanner.location();
		let rest = self.scanner.rest();
		if rest.starts_with("+inf") || rest.starts_with("-inf") {
			let negative = rest.starts_with('-');
			for _ in 0..4 {
				self.scanner.bump();
			}
			if self.scanner.peek().is_some_and(is_identifier_part) {
				return Err(ReadError::InvalidNumber {
					text: rest.chars().take(5).collect(),
					location,
				});
			}
			return Ok(Element::float(if negative { f64::NEG_INFINITY } else { f64::INFINITY }));
		}
		if looks_like_timestamp(rest) {
			return self.parse_timestamp();
		}

		let mut negative = false;
		if self.scanner.peek() == Some('-') {
			self.scanner.bump();
			negative = true;
		} else if self.scanner.peek() == Some('+') {
			return Err(ReadError::UnexpectedChar { ch: '+', location });
		}
		let integral = self.scanner.take_while(|c| c.is_ascii_digit()).to_owned();
		if integral.is_empty() {
			return Err(ReadError::InvalidNumber {
				text: "-".to_owned(),
				location,
			});
		}

		let mut fraction = String::new();
		let mut has_point = false;
		if self.scanner.peek() == Some('.') {
			self.scanner.bump();
			has_point = true;
			fraction.push_str(self.scanner.take_while(|c| c.is_ascii_digit()));
		}

		let element = match self.scanner.peek() {
			Some('e') | Some('E') => {
				self.scanner.bump();
				let exponent = self.exponent_digits(location, &integral)?;
				let mut text = String::new();
				if negative {
					text.push('-');
				}
				text.push_str(&integral);
				if has_point {
					text.push('.');
					text.push_str(&fraction);
				}
				text.push('e');
				text.push_str(&exponent);
				let parsed: f64 = text.parse().map_err(|_| ReadError::InvalidNumber {
					text: text.clone(),
					location,
				})?;
				Element::float(parsed)
			}
			Some('d') | Some('D') => {
				self.scanner.bump();
				let exponent_text = self.exponent_digits(location, &integral)?;
				let declared: i64 = exponent_text.parse().map_err(|_| ReadError::InvalidNumber {
					text: exponent_text.clone(),
					location,
				})?;
				self.decimal_element(negative, &integral, &fraction, declared, location)?
			}
			_ if has_point => self.decimal_element(negative, &integral, &fraction, 0, location)?,
			_ => {
				let mut text = String::new();
				if negative {
					text.push('-');
				}
				text.push_str(&integral);
				match text.parse::<i64>() {
					Ok(v) => Element::int(v),
					Err(_) => {
						let big = BigInt::parse_bytes(text.as_bytes(), 10).ok_or_else(|| ReadError::InvalidNumber {
							text: text.clone(),
							location,
						})?;
						Element::int(Int::from(big))
					}
				}
			}
		};

		if self.scanner.peek().is_some_and(|c| is_identifier_part(c) || c == '.') {
			return Err(ReadError::InvalidNumber {
				text: integral,
				location,
			});
		}
		Ok(element)
	}

	/// Optional sign plus mandatory digits of an `e`/`d` exponent.
	fn exponent_digits(&mut self, location: Location, token: &str) -> Result<String, ReadError> {
		let mut out = String::new();
		if self.scanner.peek() == Some('-') || self.scanner.peek() == Some('+') {
			out.push(self.scanner.bump().unwrap_or('-'));
		}
		let digits = self.scanner.take_while(|c| c.is_ascii_digit());
		if digits.is_empty() {
			return Err(ReadError::InvalidNumber {
				text: token.to_owned(),
				location,
			});
		}
		out.push_str(digits);
		Ok(out)
	}

	fn decimal_element(&mut self, negative: bool, integral: &str, fraction: &str, declared_exponent: i64, location: Location) -> Result<Element, ReadError> {
		let mut digits = String::with_capacity(integral.len() + fraction.len());
		digits.push_str(integral);
		digits.push_str(fraction);
		let coefficient = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(|| ReadError::InvalidNumber {
			text: digits.clone(),
			location,
		})?;
		let exponent = declared_exponent.checked_sub(fraction.len() as i64).ok_or_else(|| ReadError::InvalidNumber {
			text: digits.clone(),
			location,
		})?;
		let decimal = if negative {
			if coefficient == BigInt::ZERO {
				Decimal::negative_zero(exponent)
			} else {
				Decimal::from_bigint(-coefficient, exponent)
			}
		} else {
			Decimal::from_bigint(coefficient, exponent)
		};
		Ok(Element::decimal(decimal))
	}

	fn parse_timestamp(&mut self) -> Result<Element, ReadError> {
		let location = self.scanner.location();
		let token = self
			.scanner
			.take_while(|c| c.is_ascii_digit() || matches!(c, '-' | ':' | '+' | '.' | 'T' | 'Z'))
			.to_owned();
		match parse_timestamp_token(&token) {
			Some(timestamp) => Ok(Element::timestamp(timestamp)),
			None => Err(ReadError::InvalidTimestamp { text: token, location }),
		}
	}

	fn delimiter_error(&mut self) -> ReadError {
		match self.scanner.peek() {
			Some(ch) => ReadError::UnexpectedChar {
				ch,
				location: self.scanner.location(),
			},
			None => ReadError::UnexpectedEof {
				location: self.scanner.location(),
			},
		}
	}
}

impl ElementReader for TextReader<'_> {
	fn next_element(&mut self) -> Result<Option<Element>, ReadError> {
		let element = self.parse_top()?;
		trace!(found = element.is_some(), "advanced past top-level element");
		Ok(element)
	}

	fn current_element(&mut self) -> Result<Element, ReadError> {
		let checkpoint = self.scanner.checkpoint();
		let result = self.parse_top();
		self.scanner.restore(checkpoint);
		result?.ok_or(ReadError::NoValueFound)
	}
}

/// Load exactly one top-level element from `input`.
///
/// Fails with [`ReadError::NoValueFound`] on empty input and
/// [`ReadError::ExpectedSingleValue`] when further values follow.
pub fn load_one(input: &str) -> Result<Element, ReadError> {
	let mut reader = TextReader::new(input);
	let Some(element) = reader.next_element()? else {
		return Err(ReadError::NoValueFound);
	};
	reader.scanner.skip_trivia()?;
	if !reader.scanner.is_eof() {
		return Err(ReadError::ExpectedSingleValue {
			location: reader.scanner.location(),
		});
	}
	debug!("loaded single top-level element");
	Ok(element)
}

/// Load every top-level element from `input`, in order.
pub fn load_all(input: &str) -> Result<Vec<Element>, ReadError> {
	let mut reader = TextReader::new(input);
	let mut elements = Vec::new();
	while let Some(element) = reader.next_element()? {
		elements.push(element);
	}
	debug!(count = elements.len(), "loaded top-level elements");
	Ok(elements)
}

fn is_identifier_start(ch: char) -> bool {
	ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

fn is_identifier_part(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || ch == '_' || ch == '$'
}

fn looks_like_timestamp(rest: &str) -> bool {
	let bytes = rest.as_bytes();
	bytes.len() >= 5 && bytes[..4].iter().all(u8::is_ascii_digit) && (bytes[4] == b'-' || bytes[4] == b'T')
}

fn parse_timestamp_token(token: &str) -> Option<Timestamp> {
	let bytes = token.as_bytes();
	let year: i32 = fixed_digits(token, 0, 4)?;
	if token.len() == 5 && bytes[4] == b'T' {
		return Timestamp::year(year).ok();
	}
	if bytes.get(4) != Some(&b'-') {
		return None;
	}
	let month: u8 = fixed_digits(token, 5, 2)?;
	if token.len() == 8 && bytes[7] == b'T' {
		return Timestamp::month(year, month).ok();
	}
	if bytes.get(7) != Some(&b'-') {
		return None;
	}
	let day: u8 = fixed_digits(token, 8, 2)?;
	if token.len() == 10 {
		return Timestamp::day(year, month, day).ok();
	}
	if bytes.get(10) != Some(&b'T') {
		return None;
	}
	if token.len() == 11 {
		return Timestamp::day(year, month, day).ok();
	}

	let hour: u8 = fixed_digits(token, 11, 2)?;
	if bytes.get(13) != Some(&b':') {
		return None;
	}
	let minute: u8 = fixed_digits(token, 14, 2)?;
	let mut idx = 16;

	let mut timestamp = if bytes.get(idx) == Some(&b':') {
		let second: u8 = fixed_digits(token, idx + 1, 2)?;
		idx += 3;
		let mut with_seconds = Timestamp::second(year, month, day, hour, minute, second).ok()?;
		if bytes.get(idx) == Some(&b'.') {
			idx += 1;
			let start = idx;
			while idx < bytes.len() && bytes[idx].is_ascii_digit() {
				idx += 1;
			}
			let digits = idx - start;
			if digits == 0 || digits > 9 {
				return None;
			}
			let value: u32 = token[start..idx].parse().ok()?;
			let nanos = value * 10_u32.pow(9 - digits as u32);
			with_seconds = with_seconds.with_fraction(nanos, digits as u8).ok()?;
		}
		with_seconds
	} else {
		Timestamp::minute(year, month, day, hour, minute).ok()?
	};

	// Time precision requires an explicit offset; "-00:00" declares it
	// unknown.
	match bytes.get(idx) {
		Some(&b'Z') => {
			idx += 1;
			timestamp = timestamp.with_offset_minutes(0).ok()?;
		}
		Some(&b'+') | Some(&b'-') => {
			let negative = bytes[idx] == b'-';
			let offset_hours: i16 = fixed_digits(token, idx + 1, 2)?;
			if bytes.get(idx + 3) != Some(&b':') {
				return None;
			}
			let offset_minutes: i16 = fixed_digits(token, idx + 4, 2)?;
			idx += 6;
			let total = offset_hours * 60 + offset_minutes;
			if negative && total == 0 {
				// Unknown offset stays unset.
			} else {
				let signed = if negative { -total } else { total };
				timestamp = timestamp.with_offset_minutes(signed).ok()?;
			}
		}
		_ => return None,
	}

	if idx != token.len() { None } else { Some(timestamp) }
}

/// Fixed-width run of ASCII digits starting at `start`, parsed as `T`.
fn fixed_digits<T: std::str::FromStr>(token: &str, start: usize, width: usize) -> Option<T> {
	let slice = token.get(start..start + width)?;
	if !slice.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	slice.parse().ok()
}

#[cfg(test)]
mod tests;
