use std::{collections::BTreeMap, fs::File, io::Write, path::Path};

use indexmap::IndexMap;
use log::debug;
use rust_decimal::Decimal;

use crate::{
    core::{
        sink::{CharSink, IoSink},
        value::Value,
    },
    error::{JsonError, JsonResult},
    stream::{JsonWriter, JsonWriterBuilder},
};

/// Anything that can be emitted through a [`JsonWriter`].
///
/// Sequences map to arrays and string-keyed mappings to objects. Scalars
/// can only be built inside a container because the writer refuses values
/// at the top level.
pub trait Buildable {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()>;
}

fn unsupported(what: impl std::fmt::Display) -> JsonError {
    JsonError::UnsupportedValue(format!("{} is not a recognized value kind", what))
}

impl Buildable for Value {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        match self {
            Value::Null => writer.write_null(),
            Value::Bool(b) => writer.write_bool(*b),
            Value::Number(n) => writer.write_decimal(*n),
            Value::String(s) => writer.write_string(s),
            Value::Array(elements) => elements.build(writer),
            Value::Object(members) => members.build(writer),
        }
    }
}

impl Buildable for str {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        writer.write_string(self)
    }
}

impl Buildable for String {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        writer.write_string(self)
    }
}

impl Buildable for Decimal {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        writer.write_decimal(*self)
    }
}

impl Buildable for bool {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        writer.write_bool(*self)
    }
}

impl Buildable for i64 {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        writer.write_decimal(Decimal::from(*self))
    }
}

impl Buildable for u64 {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        writer.write_decimal(Decimal::from(*self))
    }
}

/// NaN and infinities have no JSON form and are rejected.
impl Buildable for f64 {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        let value = Decimal::try_from(*self).map_err(|_| unsupported(self))?;
        writer.write_decimal(value.normalize())
    }
}

/// `None` is written as `null`.
impl<T: Buildable> Buildable for Option<T> {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        match self {
            Some(value) => value.build(writer),
            None => writer.write_null(),
        }
    }
}

impl<T: Buildable + ?Sized> Buildable for &T {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        (**self).build(writer)
    }
}

impl<T: Buildable> Buildable for [T] {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        build_sequence(self, writer)
    }
}

impl<T: Buildable> Buildable for Vec<T> {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        build_sequence(self, writer)
    }
}

impl<T: Buildable> Buildable for IndexMap<String, T> {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        build_mapping(self, writer)
    }
}

impl<T: Buildable> Buildable for BTreeMap<String, T> {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        build_mapping(self, writer)
    }
}

#[cfg(feature = "serde-json")]
impl Buildable for serde_json::Value {
    fn build<K: CharSink>(&self, writer: &mut JsonWriter<K>) -> JsonResult<()> {
        match self {
            serde_json::Value::Null => writer.write_null(),
            serde_json::Value::Bool(b) => writer.write_bool(*b),
            serde_json::Value::Number(n) => {
                writer.write_decimal(crate::core::value::decimal_from_number(n)?)
            }
            serde_json::Value::String(s) => writer.write_string(s),
            serde_json::Value::Array(elements) => build_sequence(elements, writer),
            serde_json::Value::Object(members) => build_mapping(members, writer),
        }
    }
}

/// Writes every item as an element of a new array.
pub fn build_sequence<I, K>(items: I, writer: &mut JsonWriter<K>) -> JsonResult<()>
where
    I: IntoIterator,
    I::Item: Buildable,
    K: CharSink,
{
    writer.write_start_array()?;
    for item in items {
        item.build(writer)?;
    }
    writer.write_end()
}

/// Writes every pair as a member of a new object.
pub fn build_mapping<I, N, V, K>(members: I, writer: &mut JsonWriter<K>) -> JsonResult<()>
where
    I: IntoIterator<Item = (N, V)>,
    N: AsRef<str>,
    V: Buildable,
    K: CharSink,
{
    writer.write_start_object()?;
    for (name, value) in members {
        writer.write_name(name.as_ref())?;
        value.build(writer)?;
    }
    writer.write_end()
}

/// Emits `value` through `writer`.
pub fn build_value<T, K>(value: &T, writer: &mut JsonWriter<K>) -> JsonResult<()>
where
    T: Buildable + ?Sized,
    K: CharSink,
{
    value.build(writer)
}

/// Renders `value` as compact JSON text.
///
/// # Examples
///
/// ```
/// use scope_json::core::Value;
/// use scope_json::tree::to_string;
///
/// let value: Value = [("a", Value::from(vec![Value::from(1), Value::Null]))]
///     .into_iter()
///     .collect();
///
/// assert_eq!(to_string(&value).unwrap(), r#"{"a":[1,null]}"#);
/// ```
pub fn to_string<T: Buildable + ?Sized>(value: &T) -> JsonResult<String> {
    let mut writer = JsonWriter::new(String::new());
    value.build(&mut writer)?;
    writer.close()
}

/// Renders `value` with one member or element per line, indented by two
/// spaces.
pub fn to_string_pretty<T: Buildable + ?Sized>(value: &T) -> JsonResult<String> {
    let mut writer = JsonWriterBuilder::new()
        .pretty_formatter(true)
        .from_sink(String::new());
    value.build(&mut writer)?;
    writer.close()
}

/// Writes `value` as compact JSON into `wtr` and flushes it.
pub fn to_writer<T, W>(value: &T, wtr: W) -> JsonResult<W>
where
    T: Buildable + ?Sized,
    W: Write,
{
    let mut writer = JsonWriterBuilder::new().from_writer(wtr);
    value.build(&mut writer)?;
    writer.close()?.into_inner()
}

/// Writes `value` into a new file at `path`.
pub fn to_path<T, P>(value: &T, path: P, pretty: bool) -> JsonResult<()>
where
    T: Buildable + ?Sized,
    P: AsRef<Path>,
{
    let mut writer: JsonWriter<IoSink<File>> = JsonWriterBuilder::new()
        .pretty_formatter(pretty)
        .from_path(path.as_ref())?;
    value.build(&mut writer)?;
    writer.close()?.into_inner()?;
    debug!("wrote {}", path.as_ref().display());
    Ok(())
}
