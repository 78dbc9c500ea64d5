use num_bigint::BigInt;
use rstest::rstest;

use crate::element::{Decimal, Element, ElementType, Int, Timestamp};
use crate::text::{ElementReader, LOCATION_META_KEY, Location, ReadError, TextReader, TextReaderOptions, load_all, load_one};

fn ts_day(y: i32, m: u8, d: u8) -> Element {
	Element::timestamp(Timestamp::day(y, m, d).expect("valid date"))
}

#[rstest]
#[case("null", Element::null())]
#[case("null.null", Element::null())]
#[case("null.int", Element::null_of(ElementType::Int))]
#[case("null.struct", Element::null_of(ElementType::Struct))]
#[case("true", Element::bool(true))]
#[case("false", Element::bool(false))]
#[case("42", Element::int(42))]
#[case("-7", Element::int(-7))]
#[case("0", Element::int(0))]
#[case("2.5e0", Element::float(2.5))]
#[case("-1e-2", Element::float(-0.01))]
#[case("nan", Element::float(f64::NAN))]
#[case("+inf", Element::float(f64::INFINITY))]
#[case("-inf", Element::float(f64::NEG_INFINITY))]
#[case("1.10", Element::decimal(Decimal::new(110, -2)))]
#[case("1.1", Element::decimal(Decimal::new(11, -1)))]
#[case("5d3", Element::decimal(Decimal::new(5, 3)))]
#[case("1.23d2", Element::decimal(Decimal::new(123, 0)))]
#[case("5.", Element::decimal(Decimal::new(5, 0)))]
#[case("-0.", Element::decimal(Decimal::negative_zero(0)))]
#[case("0.005", Element::decimal(Decimal::new(5, -3)))]
#[case("\"hi\"", Element::string("hi"))]
#[case("\"a\\nb\\x41\\u00e9\"", Element::string("a\nbA\u{e9}"))]
#[case("sym", Element::symbol("sym"))]
#[case("'quoted sym'", Element::symbol("quoted sym"))]
#[case("''", Element::symbol(""))]
#[case("{{aGVsbG8=}}", Element::blob(&b"hello"[..]))]
#[case("{{ }}", Element::blob(&b""[..]))]
#[case("{{\"clob text\"}}", Element::clob(&b"clob text"[..]))]
#[case("[]", Element::list(Vec::<Element>::new()))]
#[case("[1, 2,]", Element::list([Element::int(1), Element::int(2)]))]
#[case("()", Element::sexp(Vec::<Element>::new()))]
#[case("(a b 3)", Element::sexp([Element::symbol("a"), Element::symbol("b"), Element::int(3)]))]
#[case("{}", Element::struct_of::<_, &str, Element>([]))]
#[case("{a:1,'b c':2,\"d\":3,}", Element::struct_of([
	("a", Element::int(1)),
	("b c", Element::int(2)),
	("d", Element::int(3)),
]))]
#[case("{a:1,a:2}", Element::struct_of([("a", Element::int(1)), ("a", Element::int(2))]))]
#[case("foo::1", Element::int(1).with_annotations(["foo"]))]
#[case("foo::bar::1", Element::int(1).with_annotations(["foo", "bar"]))]
#[case("'odd name' :: x", Element::symbol("x").with_annotations(["odd name"]))]
#[case("// note\n1", Element::int(1))]
#[case("/* note */ 1", Element::int(1))]
#[case("2024T", Element::timestamp(Timestamp::year(2024).expect("valid")))]
#[case("2024-08T", Element::timestamp(Timestamp::month(2024, 8).expect("valid")))]
#[case("2024-08-06", ts_day(2024, 8, 6))]
#[case("2024-08-06T", ts_day(2024, 8, 6))]
#[case(
	"2024-08-06T10:30Z",
	Element::timestamp(Timestamp::minute(2024, 8, 6, 10, 30).expect("valid").with_offset_minutes(0).expect("valid"))
)]
#[case(
	"2024-08-06T10:30-00:00",
	Element::timestamp(Timestamp::minute(2024, 8, 6, 10, 30).expect("valid"))
)]
#[case(
	"2024-08-06T10:30:05.12+05:30",
	Element::timestamp(
		Timestamp::second(2024, 8, 6, 10, 30, 5)
			.expect("valid")
			.with_fraction(120_000_000, 2)
			.expect("valid")
			.with_offset_minutes(330)
			.expect("valid")
	)
)]
fn parses_scalar_and_container_forms(#[case] input: &str, #[case] expected: Element) {
	let parsed = load_one(input).expect("input parses");
	assert_eq!(parsed, expected, "input {input:?}");
}

#[test]
fn parses_integers_beyond_i64() {
	let parsed = load_one("123456789012345678901234567890").expect("parses");
	let expected: BigInt = "123456789012345678901234567890".parse().expect("valid bigint");
	assert_eq!(parsed, Element::int(Int::from(expected)));
	assert!(parsed.as_int().expect("int").as_i64().is_none());
}

#[test]
fn parses_nested_structures() {
	let parsed = load_one("foo::{a:1,b:[1,2],c:(1 2)}").expect("parses");
	let strukt = parsed.as_struct().expect("struct");
	assert_eq!(strukt.get("a").expect("a"), &Element::int(1));
	assert_eq!(strukt.get("b").expect("b"), &Element::list([Element::int(1), Element::int(2)]));
	assert_eq!(strukt.get("c").expect("c"), &Element::sexp([Element::int(1), Element::int(2)]));
	assert!(parsed.annotations().contains("foo"));
}

#[test]
fn load_all_returns_every_top_level_value() {
	let elements = load_all("1 two \"three\"\n[4]").expect("parses");
	assert_eq!(
		elements,
		vec![
			Element::int(1),
			Element::symbol("two"),
			Element::string("three"),
			Element::list([Element::int(4)]),
		]
	);
	assert_eq!(load_all("").expect("empty input is fine"), Vec::<Element>::new());
}

#[test]
fn load_one_rejects_empty_and_multiple_inputs() {
	assert_eq!(load_one("  ").expect_err("empty"), ReadError::NoValueFound);
	let err = load_one("1 2").expect_err("two values");
	assert!(matches!(err, ReadError::ExpectedSingleValue { .. }));
}

#[test]
fn next_element_advances_and_current_element_does_not() {
	let mut reader = TextReader::new("1 2");
	let current = reader.current_element().expect("first value");
	assert_eq!(current, Element::int(1));
	assert_eq!(reader.current_element().expect("still first"), Element::int(1));
	assert_eq!(reader.next_element().expect("first"), Some(Element::int(1)));
	assert_eq!(reader.current_element().expect("second"), Element::int(2));
	assert_eq!(reader.next_element().expect("second"), Some(Element::int(2)));
	assert_eq!(reader.next_element().expect("end"), None);
	assert_eq!(reader.current_element().expect_err("end"), ReadError::NoValueFound);
}

#[rstest]
#[case("[1")]
#[case("{a:1")]
#[case("(1")]
#[case("\"open")]
#[case("'open")]
#[case("foo::")]
#[case("/* open")]
#[case("{{aGVsbG8=")]
fn truncated_input_reports_eof(#[case] input: &str) {
	let err = load_one(input).expect_err("truncated input");
	assert!(matches!(err, ReadError::UnexpectedEof { .. }), "input {input:?} gave {err:?}");
}

#[rstest]
#[case("1.2.3")]
#[case("1e")]
#[case("1d")]
#[case("123abc")]
#[case("+5")]
#[case("-")]
fn malformed_numbers_are_rejected(#[case] input: &str) {
	let err = load_one(input).expect_err("malformed number");
	assert!(
		matches!(err, ReadError::InvalidNumber { .. } | ReadError::UnexpectedChar { .. }),
		"input {input:?} gave {err:?}"
	);
}

#[rstest]
#[case("2024-13-01")]
#[case("2023-02-29")]
#[case("2024-08-06T25:00Z")]
#[case("2024-08-06T10:30")]
#[case("2024-08-06T10:30:05.1234567890Z")]
#[case("2024-08")]
fn malformed_timestamps_are_rejected(#[case] input: &str) {
	let err = load_one(input).expect_err("malformed timestamp");
	assert!(matches!(err, ReadError::InvalidTimestamp { .. }), "input {input:?} gave {err:?}");
}

#[test]
fn unknown_null_type_names_the_offender() {
	let err = load_one("null.integer").expect_err("unknown null type");
	assert!(matches!(err, ReadError::UnknownNullType { ref name, .. } if name == "integer"), "{err:?}");
}

#[test]
fn invalid_base64_is_reported() {
	let err = load_one("{{!!}}").expect_err("bad base64");
	assert!(matches!(err, ReadError::InvalidBase64 { .. }), "{err:?}");
}

#[test]
fn double_colon_after_field_name_is_rejected() {
	let err = load_one("{a::1}").expect_err("field names take a single colon");
	assert!(matches!(err, ReadError::UnexpectedChar { ch: ':', .. }), "{err:?}");
}

#[test]
fn errors_carry_one_based_positions() {
	let err = load_one("\n  @").expect_err("bad char");
	assert_eq!(
		err,
		ReadError::UnexpectedChar {
			ch: '@',
			location: Location { line: 2, column: 3 },
		}
	);
	assert_eq!(err.location(), Some(Location { line: 2, column: 3 }));
}

#[test]
fn invalid_escape_is_reported_with_position() {
	let err = load_one("\"a\\qb\"").expect_err("bad escape");
	assert!(matches!(err, ReadError::InvalidEscape { ch: 'q', .. }), "{err:?}");
}

#[test]
fn location_metas_are_attached_on_request() {
	let options = TextReaderOptions { include_location_meta: true };
	let mut reader = TextReader::with_options("{a: [true]}", options);
	let parsed = reader.next_element().expect("parses").expect("present");
	assert_eq!(parsed.metas().get::<Location>(LOCATION_META_KEY), Some(&Location { line: 1, column: 1 }));
	let list = parsed.as_struct().expect("struct").get("a").expect("a");
	assert_eq!(list.metas().get::<Location>(LOCATION_META_KEY), Some(&Location { line: 1, column: 5 }));

	// Locations are metas, so they never affect equality.
	assert_eq!(parsed, load_one("{a: [true]}").expect("parses"));
}

#[test]
fn default_reader_attaches_no_metas() {
	let parsed = load_one("1").expect("parses");
	assert!(parsed.metas().is_empty());
}
