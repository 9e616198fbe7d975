//! Low-level streaming access to JSON text.
//!
//! # Module Architecture
//!
//! The stream module consists of two mirror-image components:
//!
//! 1. **JsonReader**: a pull reader holding exactly one character of lookahead.
//!    The caller asks what comes next with `peek_type`, then consumes it with
//!    the matching `enter_*` or `read_*` call. Nothing beyond the current token
//!    is ever buffered, so arbitrarily large documents can be walked.
//!
//! 2. **JsonWriter**: a push writer that inserts separators itself and refuses
//!    any call sequence that would produce malformed JSON.
//!
//! Both share one [`ScopeStack`](crate::core::ScopeStack), so a call sequence
//! the writer rejects is exactly one the reader would reject too.
//!
//! # Examples
//!
//! ## Walking a document
//!
//! ```
//! use scope_json::stream::JsonReaderBuilder;
//! use scope_json::core::JsonType;
//!
//! let mut reader = JsonReaderBuilder::new()
//!     .from_str(r#"[{"id": 1, "active": true}, {"id": 2, "active": false}]"#)
//!     .unwrap();
//!
//! let mut active = Vec::new();
//! reader.enter_array().unwrap();
//! while reader.has_more_values().unwrap() {
//!     reader.enter_object().unwrap();
//!     let mut id = None;
//!     while reader.has_more_values().unwrap() {
//!         match reader.read_name().unwrap().as_str() {
//!             "id" => id = Some(reader.read_number().unwrap()),
//!             "active" if reader.peek_type().unwrap() == JsonType::Boolean => {
//!                 if reader.read_bool().unwrap() {
//!                     active.extend(id);
//!                 }
//!             }
//!             _ => reader.skip_value().unwrap(),
//!         }
//!     }
//!     reader.exit_scope().unwrap();
//! }
//! reader.exit_scope().unwrap();
//! reader.finish().unwrap();
//!
//! assert_eq!(active.len(), 1);
//! assert_eq!(active[0].to_string(), "1");
//! ```
//!
//! ## Writing a document
//!
//! ```
//! use scope_json::stream::JsonWriterBuilder;
//! use rust_decimal::Decimal;
//!
//! let mut writer = JsonWriterBuilder::new().from_sink(String::new());
//!
//! writer.write_start_object().unwrap();
//! writer.write_name("price").unwrap();
//! writer.write_decimal(Decimal::new(1999, 2)).unwrap();
//! writer.write_name("tags").unwrap();
//! writer.write_start_array().unwrap();
//! writer.write_string("new").unwrap();
//! writer.write_string("sale").unwrap();
//!
//! let json = writer.close().unwrap();
//! assert_eq!(json, r#"{"price":19.99,"tags":["new","sale"]}"#);
//! ```

/// One-character lookahead with line and column tracking.
pub mod cursor;

/// String, number, and keyword primitives.
pub mod lexer;

/// The pull reader and its builder.
pub mod reader;

/// The push writer and its builder.
pub mod writer;

pub use cursor::Position;
pub use reader::{JsonReader, JsonReaderBuilder, ReaderSettings};
pub use writer::{JsonWriter, JsonWriterBuilder, WriterSettings};
