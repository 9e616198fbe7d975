use log::debug;

use crate::{
    core::{
        item::{ItemWriter, ItemWriterResult},
        sink::CharSink,
    },
    stream::JsonWriter,
    tree::Buildable,
};

/// Writes items as the elements of a root array.
///
/// `open` writes the opening bracket, every `write` appends elements, and
/// `close` ends the array and flushes. Pretty printing follows the settings
/// of the wrapped writer.
///
/// # Examples
///
/// ```
/// use scope_json::core::item::ItemWriter;
/// use scope_json::item::ArrayItemWriter;
/// use scope_json::stream::JsonWriterBuilder;
///
/// let mut writer = ArrayItemWriter::new(JsonWriterBuilder::new().from_sink(String::new()));
///
/// ItemWriter::<Vec<&str>>::open(&mut writer).unwrap();
/// writer.write(&[vec!["a", "b"], vec![]]).unwrap();
/// ItemWriter::<Vec<&str>>::close(&mut writer).unwrap();
///
/// assert_eq!(writer.into_inner(), r#"[["a","b"],[]]"#);
/// ```
pub struct ArrayItemWriter<K> {
    writer: JsonWriter<K>,
}

impl<K: CharSink> ArrayItemWriter<K> {
    pub fn new(writer: JsonWriter<K>) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &K {
        self.writer.get_ref()
    }

    pub fn into_inner(self) -> K {
        self.writer.into_inner()
    }
}

impl<K: CharSink, T: Buildable> ItemWriter<T> for ArrayItemWriter<K> {
    fn write(&mut self, items: &[T]) -> ItemWriterResult {
        for item in items {
            item.build(&mut self.writer)?;
        }
        debug!("{} item(s) written", items.len());
        Ok(())
    }

    fn flush(&mut self) -> ItemWriterResult {
        self.writer.flush()
    }

    fn open(&mut self) -> ItemWriterResult {
        self.writer.write_start_array()
    }

    fn close(&mut self) -> ItemWriterResult {
        self.writer.write_end_document()?;
        self.writer.flush()
    }
}
