use std::{fs::File, io::Read, path::Path, str::FromStr};

use log::debug;

use crate::{
    core::{
        source::{CharSource, ReadSource},
        value::{JsonType, Map, Value},
    },
    error::{JsonError, JsonResult},
    stream::{JsonReader, JsonReaderBuilder},
};

/// Materializes the value at the reader's position.
///
/// The reader is left right after the value, so this can be called on
/// every element of a larger document. Duplicate member names keep the
/// position of their first occurrence and the value of their last.
pub fn parse_value<S: CharSource>(reader: &mut JsonReader<S>) -> JsonResult<Value> {
    match reader.peek_type()? {
        JsonType::Object => {
            reader.enter_object()?;
            let mut members = Map::new();
            while reader.has_more_values()? {
                let name = reader.read_name()?;
                let value = parse_value(reader)?;
                members.insert(name, value);
            }
            reader.exit_scope()?;
            Ok(Value::Object(members))
        }
        JsonType::Array => {
            reader.enter_array()?;
            let mut elements = Vec::new();
            while reader.has_more_values()? {
                elements.push(parse_value(reader)?);
            }
            reader.exit_scope()?;
            Ok(Value::Array(elements))
        }
        JsonType::String => reader.read_string().map(Value::String),
        JsonType::Number => reader.read_number().map(Value::Number),
        JsonType::Boolean => reader.read_bool().map(Value::Bool),
        JsonType::Null => reader.read_null().map(|()| Value::Null),
    }
}

/// Parses a whole document: exactly one value, optionally surrounded by
/// whitespace.
pub fn parse_document<S: CharSource>(mut reader: JsonReader<S>) -> JsonResult<Value> {
    let value = parse_value(&mut reader)?;
    reader.finish()?;
    debug!("parsed a document with a root {}", value.json_type());
    Ok(value)
}

pub fn parse_source<S: CharSource>(source: S) -> JsonResult<Value> {
    parse_document(JsonReaderBuilder::new().from_source(source)?)
}

/// # Examples
///
/// ```
/// use scope_json::tree::parse_str;
///
/// let value = parse_str(r#"{"Test": "Hello World"}"#).unwrap();
/// assert_eq!(value.get("Test").and_then(|v| v.as_str()), Some("Hello World"));
/// ```
pub fn parse_str(text: &str) -> JsonResult<Value> {
    parse_document(JsonReaderBuilder::new().from_str(text)?)
}

pub fn parse_reader<R: Read>(rdr: R) -> JsonResult<Value> {
    parse_document(JsonReaderBuilder::new().from_reader(rdr)?)
}

pub fn parse_path<P: AsRef<Path>>(path: P) -> JsonResult<Value> {
    let reader: JsonReader<ReadSource<File>> = JsonReaderBuilder::new().from_path(path)?;
    parse_document(reader)
}

impl FromStr for Value {
    type Err = JsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s)
    }
}
