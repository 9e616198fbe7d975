//! Element streaming over a root JSON array.
//!
//! Large exports are usually one array of records. [`ArrayItemReader`] pulls
//! those records one [`Value`](crate::core::Value) at a time and
//! [`ArrayItemWriter`] pushes them back out in batches, both through the
//! [`ItemReader`](crate::core::item::ItemReader) and
//! [`ItemWriter`](crate::core::item::ItemWriter) traits.

/// Pulls the elements of a root array.
pub mod array_reader;

/// Pushes items as the elements of a root array.
pub mod array_writer;

pub use array_reader::ArrayItemReader;
pub use array_writer::ArrayItemWriter;
