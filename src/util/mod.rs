//! Pure helpers: attribute reading and text metrics

pub mod attributes;
pub mod text;

pub use attributes::{parse_int, AttrType, AttrValue, AttributeReader};
pub use text::{collapse_whitespace, markup_length, single_line_value, split_lines};
