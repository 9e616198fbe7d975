#![cfg_attr(docsrs, feature(doc_cfg))]
//#![warn(missing_docs)]

/*!
 # Scope JSON

 A streaming JSON reader and writer for Rust. Both sides are driven by the same
 nesting-scope state machine: the reader accepts exactly the call sequences the
 writer is allowed to produce, one character of lookahead at a time, without
 ever buffering the whole document.

 ## Core Concepts

Understanding these core components will help you get started:

- **ScopeStack:** Tracks the open objects and arrays, whether a member name is waiting for its value, and whether a separating comma is due.
- **JsonReader:** A pull reader. Ask what comes next with `peek_type`, then consume it with `enter_object`, `read_name`, `read_number` and friends.
- **JsonWriter:** A push writer. Commas and colons are inserted for you and any call that would produce malformed JSON is refused.
- **Value:** An in-memory tree with ordered objects and exact decimal numbers, materialized by the parser and emitted by the builder.
- **ItemReader / ItemWriter:** Element streaming over a root array, one record at a time.

 ## Features

| **Feature**   | **Description**                                                          |
|---------------|--------------------------------------------------------------------------|
| serde-json    | Converts `serde_json::Value` into `Value` and builds it directly         |
| full          | Enables all available features                                           |

 ## Getting Started

```toml
[dependencies]
scope-json-rs = { version = "<version>", features = ["<full|serde-json>"] }
```

Then, on your main.rs:

```rust
use rust_decimal::Decimal;
use scope_json::{
    core::{
        item::{ItemReader, ItemWriter},
        Value,
    },
    error::JsonError,
    item::{ArrayItemReader, ArrayItemWriter},
    stream::{JsonReaderBuilder, JsonWriterBuilder},
};

fn main() -> Result<(), JsonError> {
    let input = r#"[
        {"make": "Porsche", "model": "356", "year": 1948},
        {"make": "Peugeot", "model": "205", "year": 1995},
        {"make": "Mazda", "model": "CX-30", "year": 2021}
    ]"#;

    let mut reader = ArrayItemReader::new(JsonReaderBuilder::new().from_str(input)?);
    let mut writer = ArrayItemWriter::new(JsonWriterBuilder::new().from_sink(String::new()));

    ItemWriter::<Value>::open(&mut writer)?;
    while let Some(car) = reader.read()? {
        let recent = car
            .get("year")
            .and_then(Value::as_decimal)
            .is_some_and(|year| year > Decimal::new(1990, 0));
        if recent {
            writer.write(&[car])?;
        }
    }
    ItemWriter::<Value>::close(&mut writer)?;

    assert_eq!(
        writer.into_inner(),
        r#"[{"make":"Peugeot","model":"205","year":1995},{"make":"Mazda","model":"CX-30","year":2021}]"#
    );

    Ok(())
}
```

 ## License
 Licensed under either of

 -   Apache License, Version 2.0
     ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
 -   MIT license
     ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)

 at your option.

 */

/// Core module: scope stack, sources, sinks, and the value model
pub mod core;

/// Error types for reading and writing
pub mod error;

#[doc(inline)]
pub use error::*;

/// Array element readers / writers
pub mod item;

/// Streaming reader and writer
pub mod stream;

/// Whole-value parser and builder
pub mod tree;
