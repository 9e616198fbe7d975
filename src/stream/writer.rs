use std::{fs::File, io::Write, path::Path};

use log::{debug, trace};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    core::{
        scope::{Scope, ScopeKind, ScopeStack},
        sink::{CharSink, IoSink},
    },
    error::{JsonError, JsonResult},
};

/// Writer configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterSettings {
    /// Buffer size used when writing to an [`std::io::Write`].
    pub capacity: usize,
    /// Put every member and element on its own indented line.
    pub pretty: bool,
    /// Indentation unit used by the pretty formatter.
    pub indent: String,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            capacity: 8 * 1024,
            pretty: false,
            indent: "  ".to_string(),
        }
    }
}

/// Push writer emitting JSON text into a [`CharSink`].
///
/// Commas and colons are inserted by the writer; the caller only states
/// what comes next. Any call that would produce malformed JSON fails with
/// [`JsonError::Sequencing`] before anything is written.
///
/// # Examples
///
/// ```
/// use scope_json::stream::JsonWriter;
///
/// let mut writer = JsonWriter::new(String::new());
/// writer.write_start_object().unwrap();
/// writer.write_name("a").unwrap();
/// writer.write_start_array().unwrap();
/// writer.write_bool(true).unwrap();
/// writer.write_null().unwrap();
/// writer.write_end_document().unwrap();
///
/// assert_eq!(writer.into_inner(), r#"{"a":[true,null]}"#);
/// ```
pub struct JsonWriter<K> {
    sink: K,
    scopes: ScopeStack,
    indent: Option<String>,
}

impl<K: CharSink> JsonWriter<K> {
    pub fn new(sink: K) -> Self {
        Self::with_settings(sink, &WriterSettings::default())
    }

    pub fn with_settings(sink: K, settings: &WriterSettings) -> Self {
        Self {
            sink,
            scopes: ScopeStack::new(None),
            indent: settings.pretty.then(|| settings.indent.clone()),
        }
    }

    pub fn write_start_object(&mut self) -> JsonResult<()> {
        self.write_start(ScopeKind::Object)
    }

    pub fn write_start_array(&mut self) -> JsonResult<()> {
        self.write_start(ScopeKind::Array)
    }

    fn write_start(&mut self, kind: ScopeKind) -> JsonResult<()> {
        let parent = self.scopes.current_kind();
        let depth = self.scopes.depth();
        let comma = self.scopes.enter(kind)?;
        if parent == Some(ScopeKind::Array) {
            self.separate(comma, depth)?;
        }
        self.sink.write_char(kind.open_char())
    }

    /// Closes the innermost container.
    pub fn write_end(&mut self) -> JsonResult<()> {
        let has_values = self.scopes.current().is_some_and(Scope::has_values);
        let kind = self.scopes.exit()?;
        if has_values {
            self.new_line(self.scopes.depth())?;
        }
        self.sink.write_char(kind.close_char())
    }

    /// Closes every open container.
    pub fn write_end_document(&mut self) -> JsonResult<()> {
        while !self.scopes.is_empty() {
            self.write_end()?;
        }
        Ok(())
    }

    pub fn write_name(&mut self, name: &str) -> JsonResult<()> {
        let comma = self.scopes.name()?;
        self.separate(comma, self.scopes.depth())?;
        write_escaped(&mut self.sink, name)?;
        self.sink.write_char(':')?;
        if self.indent.is_some() {
            self.sink.write_char(' ')?;
        }
        trace!("name {:?}", name);
        Ok(())
    }

    pub fn write_string(&mut self, value: &str) -> JsonResult<()> {
        self.begin_value()?;
        write_escaped(&mut self.sink, value)
    }

    pub fn write_decimal(&mut self, value: Decimal) -> JsonResult<()> {
        self.begin_value()?;
        self.sink.write_str(&value.to_string())
    }

    pub fn write_bool(&mut self, value: bool) -> JsonResult<()> {
        self.begin_value()?;
        self.sink.write_str(if value { "true" } else { "false" })
    }

    pub fn write_null(&mut self) -> JsonResult<()> {
        self.begin_value()?;
        self.sink.write_str("null")
    }

    /// Passes whitespace through untouched. Only spaces, tabs, and line
    /// breaks are accepted, and only inside an open container.
    pub fn write_raw_whitespace(&mut self, whitespace: &str) -> JsonResult<()> {
        if self.scopes.is_empty() {
            return Err(JsonError::Sequencing(
                "whitespace can only be written inside an open container".to_string(),
            ));
        }
        if let Some(c) = whitespace
            .chars()
            .find(|c| !matches!(c, ' ' | '\t' | '\n' | '\r'))
        {
            return Err(JsonError::Argument(format!(
                "'{}' is not JSON whitespace",
                c.escape_debug()
            )));
        }
        self.sink.write_str(whitespace)
    }

    pub fn flush(&mut self) -> JsonResult<()> {
        self.sink.flush()?;
        debug!("writer flushed at depth {}", self.scopes.depth());
        Ok(())
    }

    /// Closes every open container, flushes, and hands back the sink.
    pub fn close(mut self) -> JsonResult<K> {
        self.write_end_document()?;
        self.flush()?;
        Ok(self.sink)
    }

    /// Number of open containers.
    pub fn depth(&self) -> usize {
        self.scopes.depth()
    }

    pub fn get_ref(&self) -> &K {
        &self.sink
    }

    /// Hands back the sink as is, without closing anything.
    pub fn into_inner(self) -> K {
        self.sink
    }

    fn begin_value(&mut self) -> JsonResult<()> {
        let Some(kind) = self.scopes.current_kind() else {
            return Err(JsonError::Sequencing(
                "values can only be written inside an open container".to_string(),
            ));
        };
        let comma = self.scopes.value()?;
        if kind == ScopeKind::Array {
            self.separate(comma, self.scopes.depth())?;
        }
        Ok(())
    }

    // Emitted before a member name or an array element.
    fn separate(&mut self, comma: bool, level: usize) -> JsonResult<()> {
        if comma {
            self.sink.write_char(',')?;
        }
        self.new_line(level)
    }

    fn new_line(&mut self, level: usize) -> JsonResult<()> {
        if let Some(indent) = &self.indent {
            self.sink.write_char('\n')?;
            for _ in 0..level {
                self.sink.write_str(indent)?;
            }
        }
        Ok(())
    }
}

/// Writes `value` as a quoted JSON string.
///
/// Quote, backslash, and the control characters with a short form use the
/// two-character escapes. Everything else outside printable ASCII is written
/// as `\uXXXX` UTF-16 code units.
pub fn write_escaped<K: CharSink>(sink: &mut K, value: &str) -> JsonResult<()> {
    sink.write_char('"')?;
    for c in value.chars() {
        match c {
            '"' => sink.write_str("\\\"")?,
            '\\' => sink.write_str("\\\\")?,
            '\u{8}' => sink.write_str("\\b")?,
            '\u{c}' => sink.write_str("\\f")?,
            '\n' => sink.write_str("\\n")?,
            '\r' => sink.write_str("\\r")?,
            '\t' => sink.write_str("\\t")?,
            ' '..='~' => sink.write_char(c)?,
            _ => {
                let mut units = [0; 2];
                for unit in c.encode_utf16(&mut units) {
                    sink.write_str(&format!("\\u{:04x}", unit))?;
                }
            }
        }
    }
    sink.write_char('"')
}

/// Builder for [`JsonWriter`].
///
/// # Examples
///
/// ```
/// use scope_json::stream::JsonWriterBuilder;
///
/// let mut writer = JsonWriterBuilder::new()
///     .pretty_formatter(true)
///     .from_writer(Vec::new());
///
/// writer.write_start_array().unwrap();
/// writer.write_string("a").unwrap();
///
/// let bytes = writer.close().unwrap().into_inner().unwrap();
/// assert_eq!(String::from_utf8(bytes).unwrap(), "[\n  \"a\"\n]");
/// ```
#[derive(Default)]
pub struct JsonWriterBuilder {
    settings: WriterSettings,
}

impl JsonWriterBuilder {
    pub fn new() -> JsonWriterBuilder {
        Self {
            settings: WriterSettings::default(),
        }
    }

    pub fn capacity(mut self, capacity: usize) -> JsonWriterBuilder {
        self.settings.capacity = capacity;
        self
    }

    pub fn pretty_formatter(mut self, yes: bool) -> JsonWriterBuilder {
        self.settings.pretty = yes;
        self
    }

    pub fn indent(mut self, indent: &str) -> JsonWriterBuilder {
        self.settings.indent = indent.to_string();
        self
    }

    pub fn settings(mut self, settings: WriterSettings) -> JsonWriterBuilder {
        self.settings = settings;
        self
    }

    pub fn from_sink<K: CharSink>(self, sink: K) -> JsonWriter<K> {
        JsonWriter::with_settings(sink, &self.settings)
    }

    pub fn from_writer<W: Write>(self, wtr: W) -> JsonWriter<IoSink<W>> {
        let sink = IoSink::with_capacity(self.settings.capacity, wtr);
        self.from_sink(sink)
    }

    /// Creates (or truncates) the file at `path`.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> JsonResult<JsonWriter<IoSink<File>>> {
        let file = File::create(path)?;
        Ok(self.from_writer(file))
    }
}
