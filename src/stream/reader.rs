use std::{fs::File, io::Read, path::Path};

use log::{debug, trace};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    cursor::{describe, Cursor, Position},
    lexer,
};
use crate::{
    core::{
        scope::{ScopeKind, ScopeStack},
        source::{CharSource, ReadSource, StrSource},
        value::JsonType,
    },
    error::{JsonError, JsonResult},
};

/// Default nesting limit of a reader.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Reader configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    /// Buffer size used when reading from an [`std::io::Read`]. Zero is
    /// treated as one.
    pub capacity: usize,
    /// Maximum number of nested containers, `None` for no limit.
    pub max_depth: Option<usize>,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            capacity: 8 * 1024,
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }
}

/// Pull reader over a character source.
///
/// The reader exposes the next value through [`Self::peek_type`] and lets
/// the caller consume it with the matching `read_*` or `enter_*` call.
/// Every grammar or sequencing violation is fatal: once an error has been
/// returned the reader must be dropped.
///
/// # Examples
///
/// ```
/// use scope_json::stream::JsonReaderBuilder;
/// use scope_json::core::JsonType;
///
/// let mut reader = JsonReaderBuilder::new()
///     .from_str(r#"{"name": "Alice", "tags": ["admin"]}"#)
///     .unwrap();
///
/// reader.enter_object().unwrap();
/// assert_eq!(reader.read_name().unwrap(), "name");
/// assert_eq!(reader.peek_type().unwrap(), JsonType::String);
/// assert_eq!(reader.read_string().unwrap(), "Alice");
///
/// assert_eq!(reader.read_name().unwrap(), "tags");
/// reader.enter_array().unwrap();
/// while reader.has_more_values().unwrap() {
///     assert_eq!(reader.read_string().unwrap(), "admin");
/// }
/// reader.exit_scope().unwrap();
///
/// reader.exit_scope().unwrap();
/// reader.finish().unwrap();
/// ```
pub struct JsonReader<S> {
    cursor: Cursor<S>,
    scopes: ScopeStack,
    // A ',' was consumed and no member or element has followed it yet.
    comma_pending: bool,
}

impl<S: CharSource> JsonReader<S> {
    pub fn new(source: S) -> JsonResult<Self> {
        Self::with_settings(source, &ReaderSettings::default())
    }

    pub fn with_settings(source: S, settings: &ReaderSettings) -> JsonResult<Self> {
        let mut cursor = Cursor::new(source)?;
        cursor.skip_whitespace()?;

        Ok(Self {
            cursor,
            scopes: ScopeStack::new(settings.max_depth),
            comma_pending: false,
        })
    }

    /// Classifies the next value without consuming anything.
    pub fn peek_type(&self) -> JsonResult<JsonType> {
        match self.cursor.peek() {
            Some('{') => Ok(JsonType::Object),
            Some('[') => Ok(JsonType::Array),
            Some('"') => Ok(JsonType::String),
            Some('t' | 'f') => Ok(JsonType::Boolean),
            Some('n') => Ok(JsonType::Null),
            Some('0'..='9' | '-' | '+' | '.') => Ok(JsonType::Number),
            other => Err(self
                .cursor
                .grammar(format!("expected a value but found {}", describe(other)))),
        }
    }

    /// True unless the lookahead closes the current container.
    pub fn has_more_values(&self) -> JsonResult<bool> {
        match self.cursor.peek() {
            Some('}' | ']') => Ok(false),
            Some(_) => Ok(true),
            None if self.scopes.is_empty() => Ok(false),
            None => Err(self.cursor.grammar("unexpected end of input")),
        }
    }

    pub fn enter_object(&mut self) -> JsonResult<()> {
        self.enter(ScopeKind::Object)
    }

    pub fn enter_array(&mut self) -> JsonResult<()> {
        self.enter(ScopeKind::Array)
    }

    fn enter(&mut self, kind: ScopeKind) -> JsonResult<()> {
        self.scopes.enter(kind)?;
        self.cursor.expect(kind.open_char())?;
        self.cursor.skip_whitespace()?;
        self.comma_pending = false;
        Ok(())
    }

    /// Closes the innermost container and consumes the separator that
    /// follows it in the parent.
    pub fn exit_scope(&mut self) -> JsonResult<ScopeKind> {
        let kind = self.scopes.check_exit()?;
        if self.comma_pending {
            return Err(self.cursor.grammar(format!(
                "expected a value after ',' but found {}",
                describe(self.cursor.peek())
            )));
        }
        if self.cursor.peek() != Some(kind.close_char()) {
            return Err(self.cursor.grammar(format!(
                "expected '{}' but found {}",
                kind.close_char(),
                describe(self.cursor.peek())
            )));
        }

        self.scopes.exit()?;
        self.cursor.bump()?;
        self.cursor.skip_whitespace()?;
        self.consume_separator()?;
        Ok(kind)
    }

    /// Reads a member name and the `:` after it.
    pub fn read_name(&mut self) -> JsonResult<String> {
        self.scopes.name()?;
        if self.cursor.peek() != Some('"') {
            return Err(self.cursor.grammar(format!(
                "expected a member name but found {}",
                describe(self.cursor.peek())
            )));
        }

        let name = lexer::read_string(&mut self.cursor)?;
        self.cursor.skip_whitespace()?;
        self.cursor.expect(':')?;
        self.cursor.skip_whitespace()?;
        self.comma_pending = false;
        trace!("name {:?}", name);
        Ok(name)
    }

    pub fn read_string(&mut self) -> JsonResult<String> {
        self.scopes.check_value()?;
        let value = lexer::read_string(&mut self.cursor)?;
        self.complete_value()?;
        Ok(value)
    }

    pub fn read_number(&mut self) -> JsonResult<Decimal> {
        self.scopes.check_value()?;
        let value = lexer::read_number(&mut self.cursor)?;
        self.complete_value()?;
        Ok(value)
    }

    pub fn read_bool(&mut self) -> JsonResult<bool> {
        self.scopes.check_value()?;
        let value = match self.cursor.peek() {
            Some('t') => {
                lexer::read_keyword(&mut self.cursor, "true")?;
                true
            }
            Some('f') => {
                lexer::read_keyword(&mut self.cursor, "false")?;
                false
            }
            other => {
                return Err(self
                    .cursor
                    .grammar(format!("expected a boolean but found {}", describe(other))));
            }
        };
        self.complete_value()?;
        Ok(value)
    }

    pub fn read_null(&mut self) -> JsonResult<()> {
        self.scopes.check_value()?;
        lexer::read_keyword(&mut self.cursor, "null")?;
        self.complete_value()
    }

    /// Consumes the next value, whatever its kind, without keeping it.
    pub fn skip_value(&mut self) -> JsonResult<()> {
        match self.peek_type()? {
            JsonType::Object => {
                self.enter_object()?;
                while self.has_more_values()? {
                    self.read_name()?;
                    self.skip_value()?;
                }
                self.exit_scope()?;
            }
            JsonType::Array => {
                self.enter_array()?;
                while self.has_more_values()? {
                    self.skip_value()?;
                }
                self.exit_scope()?;
            }
            JsonType::String => {
                self.read_string()?;
            }
            JsonType::Number => {
                self.read_number()?;
            }
            JsonType::Boolean => {
                self.read_bool()?;
            }
            JsonType::Null => self.read_null()?,
        }
        Ok(())
    }

    /// Checks that the root value is complete and nothing but whitespace
    /// follows it.
    pub fn finish(&mut self) -> JsonResult<()> {
        if !self.scopes.is_empty() {
            return Err(JsonError::Sequencing(format!(
                "{} container(s) are still open",
                self.scopes.depth()
            )));
        }
        if !self.scopes.is_root_complete() {
            return Err(JsonError::Sequencing(
                "no value has been read".to_string(),
            ));
        }
        if let Some(c) = self.cursor.peek() {
            return Err(self.cursor.grammar(format!(
                "unexpected '{}' after the end of the document",
                c.escape_debug()
            )));
        }
        debug!("document complete at {}", self.cursor.position());
        Ok(())
    }

    /// Number of open containers.
    pub fn depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Position of the next unconsumed character.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    pub fn into_inner(self) -> S {
        self.cursor.into_inner()
    }

    fn complete_value(&mut self) -> JsonResult<()> {
        self.cursor.skip_whitespace()?;
        self.scopes.commit_value();
        self.consume_separator()
    }

    // Inside a container the next character must be ',' or the closing
    // bracket. A comma is consumed here.
    fn consume_separator(&mut self) -> JsonResult<()> {
        self.comma_pending = false;
        let Some(kind) = self.scopes.current_kind() else {
            return Ok(());
        };

        match self.cursor.peek() {
            Some(',') => {
                self.cursor.bump()?;
                self.cursor.skip_whitespace()?;
                self.comma_pending = true;
                Ok(())
            }
            Some(c) if c == kind.close_char() => Ok(()),
            other => Err(self.cursor.grammar(format!(
                "expected ',' or '{}' but found {}",
                kind.close_char(),
                describe(other)
            ))),
        }
    }
}

/// Builder for [`JsonReader`].
///
/// # Examples
///
/// ```
/// use scope_json::stream::JsonReaderBuilder;
/// use std::io::Cursor;
///
/// let mut reader = JsonReaderBuilder::new()
///     .capacity(64)
///     .max_depth(Some(4))
///     .from_reader(Cursor::new("[4.2]"))
///     .unwrap();
///
/// reader.enter_array().unwrap();
/// assert_eq!(reader.read_number().unwrap().to_string(), "4.2");
/// ```
#[derive(Default)]
pub struct JsonReaderBuilder {
    settings: ReaderSettings,
}

impl JsonReaderBuilder {
    pub fn new() -> JsonReaderBuilder {
        Self {
            settings: ReaderSettings::default(),
        }
    }

    pub fn capacity(mut self, capacity: usize) -> JsonReaderBuilder {
        self.settings.capacity = capacity;
        self
    }

    pub fn max_depth(mut self, max_depth: Option<usize>) -> JsonReaderBuilder {
        self.settings.max_depth = max_depth;
        self
    }

    pub fn settings(mut self, settings: ReaderSettings) -> JsonReaderBuilder {
        self.settings = settings;
        self
    }

    pub fn from_source<S: CharSource>(self, source: S) -> JsonResult<JsonReader<S>> {
        JsonReader::with_settings(source, &self.settings)
    }

    pub fn from_str(self, text: &str) -> JsonResult<JsonReader<StrSource<'_>>> {
        self.from_source(StrSource::new(text))
    }

    pub fn from_reader<R: Read>(self, rdr: R) -> JsonResult<JsonReader<ReadSource<R>>> {
        let source = ReadSource::with_capacity(self.settings.capacity, rdr);
        self.from_source(source)
    }

    pub fn from_path<P: AsRef<Path>>(self, path: P) -> JsonResult<JsonReader<ReadSource<File>>> {
        let file = File::open(path)?;
        self.from_reader(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(text: &str) -> JsonReader<StrSource<'_>> {
        JsonReaderBuilder::new().from_str(text).unwrap()
    }

    #[test]
    fn peek_type_classifies_lookahead() {
        let cases = [
            ("{}", JsonType::Object),
            (" []", JsonType::Array),
            ("\"x\"", JsonType::String),
            ("-1", JsonType::Number),
            ("0", JsonType::Number),
            ("true", JsonType::Boolean),
            ("false", JsonType::Boolean),
            ("null", JsonType::Null),
        ];
        for (text, expected) in cases {
            assert_eq!(reader(text).peek_type().unwrap(), expected, "{}", text);
        }

        assert!(matches!(reader("").peek_type(), Err(JsonError::Grammar(_))));
        assert!(matches!(reader("}").peek_type(), Err(JsonError::Grammar(_))));
    }

    #[test]
    fn reads_members_in_order() {
        let mut r = reader(r#"{ "a" : 1 , "b":true,"c" :null, "d": "x" }"#);
        r.enter_object().unwrap();
        assert_eq!(r.read_name().unwrap(), "a");
        assert_eq!(r.read_number().unwrap(), Decimal::ONE);
        assert_eq!(r.read_name().unwrap(), "b");
        assert!(r.read_bool().unwrap());
        assert_eq!(r.read_name().unwrap(), "c");
        r.read_null().unwrap();
        assert_eq!(r.read_name().unwrap(), "d");
        assert_eq!(r.read_string().unwrap(), "x");
        assert!(!r.has_more_values().unwrap());
        assert_eq!(r.exit_scope().unwrap(), ScopeKind::Object);
        r.finish().unwrap();
    }

    #[test]
    fn top_level_scalar() {
        let mut r = reader(" 4e2 ");
        assert_eq!(r.read_number().unwrap(), Decimal::new(400, 0));
        r.finish().unwrap();
    }

    #[test]
    fn name_in_array_is_a_sequencing_error() {
        let mut r = reader(r#"["a"]"#);
        r.enter_array().unwrap();
        assert!(matches!(r.read_name(), Err(JsonError::Sequencing(_))));
    }

    #[test]
    fn value_before_name_is_a_sequencing_error() {
        let mut r = reader(r#"{"a":1}"#);
        r.enter_object().unwrap();
        assert!(matches!(r.read_string(), Err(JsonError::Sequencing(_))));
    }

    #[test]
    fn two_names_in_a_row_are_a_sequencing_error() {
        let mut r = reader(r#"{"a":"b":1}"#);
        r.enter_object().unwrap();
        r.read_name().unwrap();
        assert!(matches!(r.read_name(), Err(JsonError::Sequencing(_))));
    }

    #[test]
    fn exit_after_dangling_name_is_a_sequencing_error() {
        let mut r = reader(r#"{"a":1}"#);
        r.enter_object().unwrap();
        r.read_name().unwrap();
        assert!(matches!(r.exit_scope(), Err(JsonError::Sequencing(_))));
    }

    #[test]
    fn exit_without_scope_is_a_sequencing_error() {
        let mut r = reader("[]");
        r.enter_array().unwrap();
        r.exit_scope().unwrap();
        assert!(matches!(r.exit_scope(), Err(JsonError::Sequencing(_))));
    }

    #[test]
    fn missing_separator_is_a_grammar_error() {
        let mut r = reader("[1 2]");
        r.enter_array().unwrap();
        assert!(matches!(r.read_number(), Err(JsonError::Grammar(_))));

        let mut r = reader(r#"{"a" 1}"#);
        r.enter_object().unwrap();
        assert!(matches!(r.read_name(), Err(JsonError::Grammar(_))));
    }

    #[test]
    fn trailing_comma_is_a_grammar_error() {
        let mut r = reader("[1,]");
        r.enter_array().unwrap();
        r.read_number().unwrap();
        assert!(!r.has_more_values().unwrap());
        assert!(matches!(r.exit_scope(), Err(JsonError::Grammar(_))));
    }

    #[test]
    fn mismatched_bracket_is_a_grammar_error() {
        let mut r = reader("[1}");
        r.enter_array().unwrap();
        assert!(matches!(r.read_number(), Err(JsonError::Grammar(_))));
    }

    #[test]
    fn end_of_input_inside_container() {
        let mut r = reader("[");
        r.enter_array().unwrap();
        assert!(matches!(r.has_more_values(), Err(JsonError::Grammar(_))));
    }

    #[test]
    fn trailing_content_is_rejected_by_finish() {
        let mut r = reader("[] x");
        r.enter_array().unwrap();
        r.exit_scope().unwrap();
        assert!(matches!(r.finish(), Err(JsonError::Grammar(_))));
    }

    #[test]
    fn second_root_value_is_rejected() {
        let mut r = reader("[] []");
        r.enter_array().unwrap();
        r.exit_scope().unwrap();
        assert!(matches!(r.enter_array(), Err(JsonError::Sequencing(_))));
    }

    #[test]
    fn skip_value_consumes_nested_containers() {
        let mut r = reader(r#"[{"a":[1,{"b":null}],"c":"d"}, 7]"#);
        r.enter_array().unwrap();
        r.skip_value().unwrap();
        assert_eq!(r.read_number().unwrap(), Decimal::new(7, 0));
        r.exit_scope().unwrap();
        r.finish().unwrap();
    }

    #[test]
    fn depth_limit_applies() {
        let mut r = JsonReaderBuilder::new()
            .max_depth(Some(1))
            .from_str("[[1]]")
            .unwrap();
        r.enter_array().unwrap();
        assert!(matches!(r.enter_array(), Err(JsonError::DepthLimitExceeded(1))));
    }

    #[test]
    fn errors_carry_position() {
        let mut r = reader("[\n  1,\n  x]");
        r.enter_array().unwrap();
        r.read_number().unwrap();
        match r.peek_type() {
            Err(JsonError::Grammar(message)) => assert!(message.ends_with("line 3, column 3")),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[cfg(feature = "serde-json")]
    #[test]
    fn settings_deserialize_with_defaults() {
        let settings: ReaderSettings = serde_json::from_str(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(settings.max_depth, Some(8));
        assert_eq!(settings.capacity, ReaderSettings::default().capacity);
    }

    #[test]
    fn any_capacity_reads_the_whole_document() {
        for capacity in [0, 1, 2, 8 * 1024] {
            let mut reader = JsonReaderBuilder::new()
                .capacity(capacity)
                .from_reader(std::io::Cursor::new("[1, 2]"))
                .unwrap();

            reader.enter_array().unwrap();
            assert_eq!(reader.read_number().unwrap(), Decimal::from(1), "{}", capacity);
            assert_eq!(reader.read_number().unwrap(), Decimal::from(2), "{}", capacity);
            reader.exit_scope().unwrap();
            reader.finish().unwrap();
        }
    }
}
