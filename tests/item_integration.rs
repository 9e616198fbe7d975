mod common;

use common::{init_logger, temp_path};

use std::{collections::BTreeMap, fs, io::Cursor};

use rust_decimal::Decimal;
use scope_json::{
    core::{
        Value,
        item::{ItemReader, ItemWriter},
    },
    item::{ArrayItemReader, ArrayItemWriter},
    stream::{JsonReaderBuilder, JsonWriterBuilder},
};

const CARS: &str = r#"[
  {"year": 1948, "make": "Porsche", "model": "356", "description": "Luxury sports car"},
  {"year": 1995, "make": "Peugeot", "model": "205", "description": "City car"},
  {"year": 2021, "make": "Mazda", "model": "CX-30", "description": "SUV Compact"},
  {"year": 1967, "make": "Ford", "model": "Mustang fastback 1967", "description": "American car"}
]"#;

#[test]
fn read_every_element_from_a_reader() -> anyhow::Result<()> {
    init_logger();

    let reader = JsonReaderBuilder::new()
        .capacity(16)
        .from_reader(Cursor::new(CARS))?;
    let mut items = ArrayItemReader::new(reader);

    let mut makes = Vec::new();
    while let Some(car) = items.read()? {
        makes.push(car.get("make").and_then(Value::as_str).unwrap().to_string());
    }

    assert_eq!(makes, vec!["Porsche", "Peugeot", "Mazda", "Ford"]);
    assert_eq!(items.count(), 4);
    Ok(())
}

#[test]
fn copy_and_transform_through_files() -> anyhow::Result<()> {
    init_logger();
    let input_path = temp_path("json");
    let output_path = temp_path("json");
    fs::write(&input_path, CARS)?;

    let mut reader = ArrayItemReader::new(JsonReaderBuilder::new().from_path(&input_path)?);
    let mut writer = ArrayItemWriter::new(
        JsonWriterBuilder::new()
            .pretty_formatter(true)
            .from_path(&output_path)?,
    );

    ItemWriter::<BTreeMap<String, Value>>::open(&mut writer)?;
    let mut chunk = Vec::new();
    while let Some(car) = reader.read()? {
        let mut record = BTreeMap::new();
        let make = car.get("make").and_then(Value::as_str).unwrap_or_default();
        record.insert("make".to_string(), Value::from(make.to_uppercase()));
        record.insert("year".to_string(), car.get("year").cloned().unwrap_or_default());
        chunk.push(record);

        if chunk.len() == 2 {
            writer.write(&chunk)?;
            chunk.clear();
        }
    }
    writer.write(&chunk)?;
    ItemWriter::<BTreeMap<String, Value>>::close(&mut writer)?;
    drop(writer);

    let file_content = fs::read_to_string(&output_path)?;
    assert!(file_content.starts_with("[\n  {\n    \"make\": \"PORSCHE\",\n    \"year\": 1948\n  },"));
    assert!(file_content.ends_with("\n]"));

    let mut copied = ArrayItemReader::new(JsonReaderBuilder::new().from_path(&output_path)?);
    let mut years = Vec::new();
    while let Some(record) = copied.read()? {
        years.extend(record.get("year").and_then(Value::as_decimal));
    }
    assert_eq!(
        years,
        vec![
            Decimal::new(1948, 0),
            Decimal::new(1995, 0),
            Decimal::new(2021, 0),
            Decimal::new(1967, 0)
        ]
    );

    fs::remove_file(&input_path)?;
    fs::remove_file(&output_path)?;
    Ok(())
}

#[test]
fn empty_input_array() -> anyhow::Result<()> {
    let mut items = ArrayItemReader::new(JsonReaderBuilder::new().from_str(" [ ] ")?);
    assert!(items.read()?.is_none());
    assert_eq!(items.count(), 0);
    Ok(())
}
