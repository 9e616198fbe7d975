use crate::error::JsonError;

/// Result of a single read: `Ok(None)` once the input is exhausted.
pub type ItemReaderResult<R> = Result<Option<R>, JsonError>;

/// Result of a writer operation.
pub type ItemWriterResult = Result<(), JsonError>;

/// Yields items one at a time from a JSON input.
pub trait ItemReader<R> {
    fn read(&mut self) -> ItemReaderResult<R>;
}

/// Writes batches of items to a JSON output.
///
/// `open` must be called before the first `write`, and `close` after the
/// last one.
pub trait ItemWriter<W> {
    fn write(&mut self, items: &[W]) -> ItemWriterResult;

    fn flush(&mut self) -> ItemWriterResult;

    fn open(&mut self) -> ItemWriterResult {
        Ok(())
    }

    fn close(&mut self) -> ItemWriterResult {
        Ok(())
    }
}
