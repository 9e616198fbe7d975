#![allow(dead_code)]

mod mocks;

pub use mocks::{MockFile, MockInput};

use std::{env::temp_dir, path::PathBuf};

use rand::distr::{Alphanumeric, SampleString};
use rust_decimal::Decimal;
use scope_json::{
    JsonError, JsonResult,
    core::{CharSink, CharSource},
    stream::{JsonReader, JsonWriter},
};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A fresh file name in the temporary directory.
pub fn temp_path(extension: &str) -> PathBuf {
    let file_name = Alphanumeric.sample_string(&mut rand::rng(), 16);
    temp_dir().join(format!("{}.{}", file_name, extension))
}

/// One call against either side of the codec.
#[derive(Clone, Copy, Debug)]
pub enum Call {
    StartObject,
    StartArray,
    End,
    Name(&'static str),
    Str(&'static str),
    Number(i64, u32),
    Bool(bool),
    Null,
}

/// A call sequence and the text it corresponds to.
///
/// With `fails_at == None` the writer must produce `text` exactly and the
/// reader must accept `text` through the same calls. Otherwise both sides
/// must fail with a sequencing error at that call.
pub struct Fixture {
    pub name: &'static str,
    pub calls: &'static [Call],
    pub text: &'static str,
    pub fails_at: Option<usize>,
}

use Call::*;

pub const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "empty object",
        calls: &[StartObject, End],
        text: "{}",
        fails_at: None,
    },
    Fixture {
        name: "empty array",
        calls: &[StartArray, End],
        text: "[]",
        fails_at: None,
    },
    Fixture {
        name: "name then empty array",
        calls: &[StartObject, Name("a"), StartArray, End, End],
        text: r#"{"a":[]}"#,
        fails_at: None,
    },
    Fixture {
        name: "nested containers",
        calls: &[
            StartObject,
            Name("a"),
            StartArray,
            StartObject,
            Name("b"),
            StartArray,
            End,
            End,
            End,
            End,
        ],
        text: r#"{"a":[{"b":[]}]}"#,
        fails_at: None,
    },
    Fixture {
        name: "scalars in an array",
        calls: &[
            StartArray,
            Number(4242, 2),
            Str("x"),
            Bool(true),
            Bool(false),
            Null,
            End,
        ],
        text: r#"[42.42,"x",true,false,null]"#,
        fails_at: None,
    },
    Fixture {
        name: "members and siblings",
        calls: &[
            StartObject,
            Name("a"),
            Number(1, 0),
            Name("b"),
            StartObject,
            Name("c"),
            Str("d"),
            End,
            Name("e"),
            StartArray,
            Number(-1, 0),
            StartArray,
            Number(2, 0),
            End,
            End,
            End,
        ],
        text: r#"{"a":1,"b":{"c":"d"},"e":[-1,[2]]}"#,
        fails_at: None,
    },
    Fixture {
        name: "escaped text",
        calls: &[StartArray, Str("tab\there \"é😀\""), End],
        text: r#"["tab\there \"\u00e9\ud83d\ude00\""]"#,
        fails_at: None,
    },
    Fixture {
        name: "value before name",
        calls: &[StartObject, Str("a")],
        text: r#"{"a":1}"#,
        fails_at: Some(1),
    },
    Fixture {
        name: "container before name",
        calls: &[StartObject, StartArray],
        text: r#"{"a":[]}"#,
        fails_at: Some(1),
    },
    Fixture {
        name: "two names in a row",
        calls: &[StartObject, Name("a"), Name("b")],
        text: r#"{"a":"b"}"#,
        fails_at: Some(2),
    },
    Fixture {
        name: "name inside an array",
        calls: &[StartArray, Name("a")],
        text: r#"["a"]"#,
        fails_at: Some(1),
    },
    Fixture {
        name: "end with a dangling name",
        calls: &[StartObject, Name("a"), End],
        text: r#"{"a":1}"#,
        fails_at: Some(2),
    },
    Fixture {
        name: "extra end",
        calls: &[StartArray, End, End],
        text: "[]",
        fails_at: Some(2),
    },
    Fixture {
        name: "second root",
        calls: &[StartArray, End, StartArray],
        text: "[][]",
        fails_at: Some(2),
    },
];

pub fn replay_writer<K: CharSink>(writer: &mut JsonWriter<K>, call: Call) -> JsonResult<()> {
    match call {
        StartObject => writer.write_start_object(),
        StartArray => writer.write_start_array(),
        End => writer.write_end(),
        Name(name) => writer.write_name(name),
        Str(value) => writer.write_string(value),
        Number(mantissa, scale) => writer.write_decimal(Decimal::new(mantissa, scale)),
        Bool(value) => writer.write_bool(value),
        Null => writer.write_null(),
    }
}

/// Replays `call` and checks that what was read matches it.
pub fn replay_reader<S: CharSource>(reader: &mut JsonReader<S>, call: Call) -> JsonResult<()> {
    match call {
        StartObject => reader.enter_object(),
        StartArray => reader.enter_array(),
        End => reader.exit_scope().map(|_| ()),
        Name(name) => {
            let read = reader.read_name()?;
            assert_eq!(read, name);
            Ok(())
        }
        Str(value) => {
            let read = reader.read_string()?;
            assert_eq!(read, value);
            Ok(())
        }
        Number(mantissa, scale) => {
            let read = reader.read_number()?;
            assert_eq!(read, Decimal::new(mantissa, scale));
            Ok(())
        }
        Bool(value) => {
            let read = reader.read_bool()?;
            assert_eq!(read, value);
            Ok(())
        }
        Null => reader.read_null(),
    }
}

pub fn is_sequencing<T>(result: &Result<T, JsonError>) -> bool {
    matches!(result, Err(JsonError::Sequencing(_)))
}
