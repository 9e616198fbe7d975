//! Whole-value conversion between JSON text and [`Value`](crate::core::Value).
//!
//! The parser drives a [`JsonReader`](crate::stream::JsonReader) recursively
//! and the builder drives a [`JsonWriter`](crate::stream::JsonWriter) the
//! same way. Anything implementing [`Buildable`] can be written, which
//! covers `Value`, host sequences and string-keyed maps, and
//! `serde_json::Value` with the `serde-json` feature.
//!
//! # Examples
//!
//! ```
//! use scope_json::tree::{parse_str, to_string};
//!
//! let value = parse_str(r#" { "price" : 19.990, "tags" : [ "new" ] } "#).unwrap();
//! assert_eq!(to_string(&value).unwrap(), r#"{"price":19.990,"tags":["new"]}"#);
//! ```

/// Text to value.
pub mod parser;

/// Value to text.
pub mod builder;

pub use builder::{
    Buildable, build_mapping, build_sequence, build_value, to_path, to_string, to_string_pretty,
    to_writer,
};
pub use parser::{
    parse_document, parse_path, parse_reader, parse_source, parse_str, parse_value,
};
