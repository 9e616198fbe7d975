use log::debug;

use crate::{
    core::{
        item::{ItemReader, ItemReaderResult},
        source::CharSource,
        value::Value,
    },
    stream::JsonReader,
    tree::parse_value,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Pending,
    Open,
    Done,
}

/// Reads the elements of a root array one at a time.
///
/// Only the element being read is materialized, so arrays larger than
/// memory can be processed. After the last element the reader checks that
/// the document ends there.
///
/// # Examples
///
/// ```
/// use scope_json::core::item::ItemReader;
/// use scope_json::item::ArrayItemReader;
/// use scope_json::stream::JsonReaderBuilder;
///
/// let reader = JsonReaderBuilder::new()
///     .from_str(r#"[{"id": 1}, {"id": 2}]"#)
///     .unwrap();
/// let mut items = ArrayItemReader::new(reader);
///
/// let mut ids = Vec::new();
/// while let Some(item) = items.read().unwrap() {
///     ids.push(item.get("id").cloned().unwrap());
/// }
/// assert_eq!(ids.len(), 2);
/// ```
pub struct ArrayItemReader<S> {
    reader: JsonReader<S>,
    state: State,
    count: usize,
}

impl<S: CharSource> ArrayItemReader<S> {
    pub fn new(reader: JsonReader<S>) -> Self {
        Self {
            reader,
            state: State::Pending,
            count: 0,
        }
    }

    /// Number of elements read so far.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn into_inner(self) -> JsonReader<S> {
        self.reader
    }
}

impl<S: CharSource> ItemReader<Value> for ArrayItemReader<S> {
    fn read(&mut self) -> ItemReaderResult<Value> {
        match self.state {
            State::Done => return Ok(None),
            State::Pending => {
                self.reader.enter_array()?;
                self.state = State::Open;
            }
            State::Open => {}
        }

        if self.reader.has_more_values()? {
            let value = parse_value(&mut self.reader)?;
            self.count += 1;
            return Ok(Some(value));
        }

        self.reader.exit_scope()?;
        self.reader.finish()?;
        self.state = State::Done;
        debug!("array exhausted after {} element(s)", self.count);
        Ok(None)
    }
}
