//! Line codec for drawer files
//!
//! Each record is stored as one line:
//!
//! ```text
//! <name>:<value>[,<value>]*
//! ```
//!
//! Text values are always written inside double quotes, so text that
//! looks like a number or a boolean keeps its kind. Decoding infers the
//! kind of each token in this order:
//!
//! 1. empty token: empty text
//! 2. `true` / `false`: boolean
//! 3. `"..."`: text, outer quotes stripped
//! 4. contains `.` and is a decimal literal: float
//! 5. optional `-` followed by digits: integer
//! 6. anything else: text, verbatim
//!
//! There is no escaping. Names may not contain `:` and text values may not
//! contain `"` or `,`; neither may contain line breaks. `encode` rejects
//! such records instead of writing a line that would read back differently.

use thiserror::Error;

use super::record::Record;
use super::value::{format_float, Value};

/// Separates the record name from its values
pub const NAME_SEPARATOR: char = ':';

/// Separates values from each other
pub const VALUE_SEPARATOR: char = ',';

/// Wraps text values
pub const QUOTE: char = '"';

#[derive(Debug, Error, PartialEq)]
pub enum CodecError {
    #[error("Invalid record name '{0}': names cannot contain ':' or line breaks")]
    InvalidName(String),

    #[error("Cannot store text {text:?} in record '{name}': text cannot contain '\"', ',' or line breaks")]
    UnencodableText { name: String, text: String },

    #[error("Cannot store non-finite float {value} in record '{name}'")]
    NonFiniteFloat { name: String, value: f64 },
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Encodes a record as a single line, without the trailing newline
pub fn encode(record: &Record) -> Result<String, CodecError> {
    let name = record.name();
    if name.contains(|c: char| c == NAME_SEPARATOR || is_line_break(c)) {
        return Err(CodecError::InvalidName(name.to_string()));
    }

    let mut tokens = Vec::with_capacity(record.len());
    for value in record.values() {
        tokens.push(encode_value(name, value)?);
    }

    Ok(format!(
        "{}{}{}",
        name,
        NAME_SEPARATOR,
        tokens.join(&VALUE_SEPARATOR.to_string())
    ))
}

fn encode_value(name: &str, value: &Value) -> Result<String, CodecError> {
    match value {
        Value::Text(text) => {
            if text.contains(|c: char| c == QUOTE || c == VALUE_SEPARATOR || is_line_break(c)) {
                return Err(CodecError::UnencodableText {
                    name: name.to_string(),
                    text: text.clone(),
                });
            }
            Ok(format!("{}{}{}", QUOTE, text, QUOTE))
        }
        Value::Float(f) if !f.is_finite() => Err(CodecError::NonFiniteFloat {
            name: name.to_string(),
            value: *f,
        }),
        Value::Float(f) => Ok(format_float(*f)),
        Value::Integer(_) | Value::Boolean(_) => Ok(value.to_string()),
    }
}

fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Returns the name portion of a line without decoding its values
///
/// A line without a `:` is all name.
pub fn line_name(line: &str) -> &str {
    let line = strip_line_ending(line);
    match line.split_once(NAME_SEPARATOR) {
        Some((name, _)) => name,
        None => line,
    }
}

/// Decodes one line into a record
///
/// Never fails: a line without a `:` becomes a record with no values, and
/// tokens that are not valid numbers are kept as text.
pub fn decode(line: &str) -> Record {
    let line = strip_line_ending(line);

    let (name, rest) = match line.split_once(NAME_SEPARATOR) {
        Some((name, rest)) => (name, rest),
        None => return Record::empty(line),
    };

    if rest.is_empty() {
        return Record::empty(name);
    }

    let values = rest.split(VALUE_SEPARATOR).map(parse_token).collect();
    Record::new(name, values)
}

/// Infers the value of a single token
pub fn parse_token(token: &str) -> Value {
    if token.is_empty() {
        return Value::Text(String::new());
    }

    match token {
        "true" => return Value::Boolean(true),
        "false" => return Value::Boolean(false),
        _ => {}
    }

    if token.len() >= 2 && token.starts_with(QUOTE) && token.ends_with(QUOTE) {
        return Value::Text(token[1..token.len() - 1].to_string());
    }

    let digits = token.strip_prefix('-').unwrap_or(token);

    if token.contains('.') {
        if is_decimal_literal(digits) {
            if let Ok(f) = token.parse::<f64>() {
                return Value::Float(f);
            }
        }
        return Value::Text(token.to_string());
    }

    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = token.parse::<i64>() {
            return Value::Integer(n);
        }
    }

    Value::Text(token.to_string())
}

/// `digits.digits*` with a single point and a leading digit
fn is_decimal_literal(s: &str) -> bool {
    s.starts_with(|c: char| c.is_ascii_digit())
        && s.chars().filter(|&c| c == '.').count() == 1
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn user() -> Record {
        Record::new(
            "user",
            vec![Value::from("alice"), Value::from(30), Value::from(true)],
        )
    }

    #[test]
    fn encode_quotes_text_only() {
        assert_eq!(encode(&user()).unwrap(), r#"user:"alice",30,true"#);

        let record = Record::new("score", vec![Value::from(99.5), Value::from(false)]);
        assert_eq!(encode(&record).unwrap(), "score:99.5,false");
    }

    #[test]
    fn encode_no_values() {
        assert_eq!(encode(&Record::empty("x")).unwrap(), "x:");
    }

    #[test]
    fn encode_whole_float() {
        let record = Record::new("f", vec![Value::from(3.0)]);
        assert_eq!(encode(&record).unwrap(), "f:3.0");
        assert_eq!(decode("f:3.0"), record);
    }

    #[test]
    fn encode_rejects_separator_in_name() {
        let err = encode(&Record::empty("a:b")).unwrap_err();
        assert_eq!(err, CodecError::InvalidName("a:b".to_string()));
        assert!(encode(&Record::empty("a\nb")).is_err());
    }

    #[test]
    fn encode_rejects_unescapable_text() {
        for text in ["say \"hi\"", "a,b", "two\nlines", "cr\r"] {
            let record = Record::new("t", vec![Value::from(text)]);
            assert!(
                matches!(encode(&record), Err(CodecError::UnencodableText { .. })),
                "{:?} should be rejected",
                text
            );
        }
    }

    #[test]
    fn encode_allows_colon_in_text() {
        let record = Record::new("url", vec![Value::from("http://example.com")]);
        let line = encode(&record).unwrap();
        assert_eq!(line, r#"url:"http://example.com""#);
        assert_eq!(decode(&line), record);
    }

    #[test]
    fn encode_rejects_non_finite_floats() {
        for f in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let record = Record::new("f", vec![Value::from(f)]);
            assert!(matches!(
                encode(&record),
                Err(CodecError::NonFiniteFloat { .. })
            ));
        }
    }

    #[test]
    fn decode_preserves_order_and_kind() {
        let record = decode(r#"mixed:1,"a",true,2.5"#);
        assert_eq!(record.name(), "mixed");
        assert_eq!(
            record.values(),
            &[
                Value::Integer(1),
                Value::Text("a".into()),
                Value::Boolean(true),
                Value::Float(2.5),
            ]
        );
    }

    #[test]
    fn decode_empty_remainder_has_no_values() {
        let record = decode("x:");
        assert_eq!(record.name(), "x");
        assert!(record.is_empty());
    }

    #[test]
    fn decode_empty_token_is_empty_text() {
        assert_eq!(decode("x:,1").values(), &[Value::from(""), Value::from(1)]);
        assert_eq!(decode("x:1,").values(), &[Value::from(1), Value::from("")]);
    }

    #[test]
    fn empty_text_roundtrip() {
        let record = Record::new("x", vec![Value::from("")]);
        let line = encode(&record).unwrap();
        assert_eq!(line, r#"x:"""#);

        let decoded = decode(&line);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded.get(0).unwrap(), &Value::Text(String::new()));
    }

    #[test]
    fn decode_without_separator_is_name_only() {
        let record = decode("orphan");
        assert_eq!(record, Record::empty("orphan"));
    }

    #[test]
    fn decode_splits_at_first_separator() {
        let record = decode("k:a:b");
        assert_eq!(record.name(), "k");
        assert_eq!(record.values(), &[Value::from("a:b")]);
    }

    #[test]
    fn decode_strips_line_endings() {
        assert_eq!(decode("n:1\n"), Record::new("n", vec![Value::from(1)]));
        assert_eq!(decode("n:1\r\n"), Record::new("n", vec![Value::from(1)]));
    }

    #[test]
    fn unquoted_tokens_are_inferred() {
        assert_eq!(parse_token("42"), Value::Integer(42));
        assert_eq!(parse_token("-42"), Value::Integer(-42));
        assert_eq!(parse_token("4.25"), Value::Float(4.25));
        assert_eq!(parse_token("-0.5"), Value::Float(-0.5));
        assert_eq!(parse_token("true"), Value::Boolean(true));
        assert_eq!(parse_token("false"), Value::Boolean(false));
        assert_eq!(parse_token("bob"), Value::from("bob"));
    }

    #[test]
    fn malformed_numbers_stay_text() {
        assert_eq!(parse_token(".5"), Value::from(".5"));
        assert_eq!(parse_token("1.2.3"), Value::from("1.2.3"));
        assert_eq!(parse_token("12ab"), Value::from("12ab"));
        assert_eq!(parse_token("v1.0"), Value::from("v1.0"));
        assert_eq!(parse_token("-"), Value::from("-"));
        assert_eq!(parse_token("+5"), Value::from("+5"));
        assert_eq!(parse_token("TRUE"), Value::from("TRUE"));
        assert_eq!(
            parse_token("99999999999999999999"),
            Value::from("99999999999999999999")
        );
    }

    #[test]
    fn quotes_keep_text_that_looks_typed() {
        assert_eq!(parse_token(r#""42""#), Value::from("42"));
        assert_eq!(parse_token(r#""true""#), Value::from("true"));
        assert_eq!(parse_token(r#""2.5""#), Value::from("2.5"));
        assert_eq!(parse_token(r#""""#), Value::from(""));
        // A lone quote is not a quoted token
        assert_eq!(parse_token("\""), Value::from("\""));
    }

    #[test]
    fn line_name_ignores_values() {
        assert_eq!(line_name(r#"user:"alice",30"#), "user");
        assert_eq!(line_name("bare\n"), "bare");
        assert_eq!(line_name(":1"), "");
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        prop_oneof![
            "[^\",\r\n]{0,16}".prop_map(Value::Text),
            any::<i64>().prop_map(Value::Integer),
            any::<f64>()
                .prop_filter("finite", |f| f.is_finite())
                .prop_map(Value::Float),
            any::<bool>().prop_map(Value::Boolean),
        ]
    }

    fn arb_record() -> impl Strategy<Value = Record> {
        (
            "[^:\r\n]{0,12}",
            proptest::collection::vec(arb_value(), 0..8),
        )
            .prop_map(|(name, values)| Record::new(name, values))
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(record in arb_record()) {
            let line = encode(&record).unwrap();
            prop_assert_eq!(decode(&line), record);
        }

        #[test]
        fn prop_line_name_matches_decoded_name(record in arb_record()) {
            let line = encode(&record).unwrap();
            prop_assert_eq!(line_name(&line), record.name());
        }
    }
}
