//! Typed reads of `data-*` configuration attributes
//!
//! Missing or empty attributes fall back to the caller's default, but a falsy
//! default (`""`, `0`, not-a-number, `false`) collapses to `Bool(false)`.
//! Callers that want a literal `0` or `""` have to check for `Bool(false)`.

use crate::dom::{Document, NodeId};

/// How to coerce the raw attribute text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrType {
    Str,
    Int,
    Bool,
}

/// A coerced attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Str(String),
    /// Integer read with `parseInt` rules; `None` is not-a-number
    Int(Option<i64>),
    Bool(bool),
}

impl AttrValue {
    /// JavaScript-style truthiness
    pub fn is_truthy(&self) -> bool {
        match self {
            AttrValue::Str(s) => !s.is_empty(),
            AttrValue::Int(n) => matches!(n, Some(v) if *v != 0),
            AttrValue::Bool(b) => *b,
        }
    }

    /// String payload, `None` for every other variant
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Integer payload; not-a-number and non-integers are `None`
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(n) => *n,
            _ => None,
        }
    }

    /// Boolean view: `Bool(b)` is `b`, anything else is its truthiness
    pub fn as_bool(&self) -> bool {
        self.is_truthy()
    }
}

/// Parse the leading decimal integer of `raw` like `parseInt(raw, 10)`.
///
/// Leading whitespace and one sign are accepted, trailing junk is ignored
/// (`"12px"` → 12). No digits, or a value outside `i64`, is not-a-number.
pub fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => ("-", &trimmed[1..]),
        Some(b'+') => ("", &trimmed[1..]),
        _ => ("", trimmed),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    format!("{}{}", sign, digits).parse().ok()
}

/// Reads prefixed metadata attributes off elements of one document
#[derive(Debug, Clone, Copy)]
pub struct AttributeReader<'a> {
    doc: &'a Document,
    prefix: &'a str,
}

impl<'a> AttributeReader<'a> {
    pub fn new(doc: &'a Document, prefix: &'a str) -> Self {
        Self { doc, prefix }
    }

    /// Read `<prefix><name>` off `element`, coerced to `ty`
    pub fn read(
        &self,
        name: &str,
        element: NodeId,
        ty: AttrType,
        default: Option<AttrValue>,
    ) -> AttrValue {
        let key = format!("{}{}", self.prefix, name);
        let raw = match self.doc.attribute(element, &key) {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                return default
                    .filter(AttrValue::is_truthy)
                    .unwrap_or(AttrValue::Bool(false))
            }
        };

        match ty {
            AttrType::Str => AttrValue::Str(raw.to_string()),
            AttrType::Int => AttrValue::Int(parse_int(raw)),
            AttrType::Bool => AttrValue::Bool(raw == "true"),
        }
    }
}
