//! Typed attribute-value wire format.
//!
//! The source store's change stream describes every field as a tagged
//! value: exactly one type tag (`NULL`, `BOOL`, `S`, `N`, `SS`, `NS`,
//! `M`) carries the payload. Modeling the tags as a closed enum makes
//! the "exactly one tag populated" invariant hold by construction, and
//! the externally tagged serde representation matches the stream JSON
//! (e.g. `{"S": "widget"}` or `{"M": {"city": {"S": "NYC"}}}`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An attribute map: the typed form of one record image.
pub type AttributeMap = HashMap<String, AttributeValue>;

/// A single typed attribute value from the change stream.
///
/// Numeric values (`N`, `NS`) are carried as decimal strings, never
/// native floats, so textual precision survives the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// Null marker. The wire always sends `true`; the flag is kept for
    /// wire fidelity.
    #[serde(rename = "NULL")]
    Null(bool),
    /// Boolean value.
    #[serde(rename = "BOOL")]
    Bool(bool),
    /// String value, verbatim.
    #[serde(rename = "S")]
    String(String),
    /// Numeric value as a decimal-preserving string.
    #[serde(rename = "N")]
    Number(String),
    /// Set of strings, order preserved.
    #[serde(rename = "SS")]
    StringSet(Vec<String>),
    /// Set of numeric strings, order preserved.
    #[serde(rename = "NS")]
    NumberSet(Vec<String>),
    /// Nested attribute map.
    #[serde(rename = "M")]
    Map(AttributeMap),
}

impl AttributeValue {
    /// Create a string attribute.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Create a numeric attribute from its decimal literal.
    pub fn number(literal: impl Into<String>) -> Self {
        Self::Number(literal.into())
    }
}
