//! Attribute value decoder.
//!
//! Recursively converts the change stream's tagged attribute-value
//! format into untyped JSON. Numeric attributes are parsed as
//! arbitrary-precision JSON numbers so that decimal literals survive
//! the conversion exactly; a 20-digit key decodes to that integer, not
//! a rounded float.
//!
//! Decoding is a pure function over its input: no side effects, no I/O.

use serde_json::{Number, Value};

use crate::errors::DecodeError;
use stream_indexer_shared::{AttributeMap, AttributeValue, Document};

/// Decode a single attribute value into its JSON representation.
///
/// Dispatch is an exhaustive match over the closed tag set: null, bool,
/// string, number, string-set, number-set, and (recursively) map. Set
/// element order is preserved.
///
/// # Errors
///
/// `DecodeError::InvalidNumber` if a numeric literal does not parse as
/// a decimal.
pub fn decode_attribute(value: &AttributeValue) -> Result<Value, DecodeError> {
    match value {
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::Bool(flag) => Ok(Value::Bool(*flag)),
        AttributeValue::String(text) => Ok(Value::String(text.clone())),
        AttributeValue::Number(literal) => decode_number(literal).map(Value::Number),
        AttributeValue::StringSet(items) => Ok(Value::Array(
            items.iter().cloned().map(Value::String).collect(),
        )),
        AttributeValue::NumberSet(items) => {
            let numbers = items
                .iter()
                .map(|literal| decode_number(literal).map(Value::Number))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Array(numbers))
        }
        AttributeValue::Map(entries) => decode_document(entries).map(Value::Object),
    }
}

/// Decode a full attribute map into a document body.
///
/// The key set is preserved exactly: every attribute contributes one
/// document field, and a failure on any field fails the whole record so
/// partially decoded documents are never produced.
pub fn decode_document(attributes: &AttributeMap) -> Result<Document, DecodeError> {
    let mut document = Document::new();
    for (key, value) in attributes {
        document.insert(key.clone(), decode_attribute(value)?);
    }
    Ok(document)
}

fn decode_number(literal: &str) -> Result<Number, DecodeError> {
    literal
        .parse::<Number>()
        .map_err(|_| DecodeError::InvalidNumber(literal.to_string()))
}
