/// Item reader and writer traits used for element streaming.
pub mod item;

/// Nesting-scope state machine shared by the reader and the writer.
pub mod scope;

/// Character outputs.
pub mod sink;

/// Character inputs.
pub mod source;

/// In-memory value model.
pub mod value;

pub use scope::{Scope, ScopeKind, ScopeStack};
pub use sink::{CharSink, IoSink};
pub use source::{CharSource, ReadSource, StrSource};
pub use value::{JsonType, Map, Value};
