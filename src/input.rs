//! Record file decoding
//!
//! Two layouts are read:
//! - `json`: one array of objects
//! - `jsonl`: one object per line, blank lines skipped
//!
//! Objects become [`FieldMap`]s so that a missing column is reported by the
//! loader as a malformed record rather than rejected here.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use serde_json::Value as Json;
use crate::{Error, Result};
use crate::record::{FieldMap, Value};

/// Layout of a record file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    JsonLines,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Json => "json",
            InputFormat::JsonLines => "jsonl",
        }
    }

    /// Guess the layout from a file extension, defaulting to `json`
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some("jsonl") | Some("ndjson") => InputFormat::JsonLines,
            _ => InputFormat::Json,
        }
    }
}

impl FromStr for InputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(InputFormat::Json),
            "jsonl" | "ndjson" | "lines" => Ok(InputFormat::JsonLines),
            _ => Err(Error::Input(format!("Unknown input format: {}", s))),
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decode every record from `reader`
pub fn read_records<R: Read>(reader: R, format: InputFormat) -> Result<Vec<FieldMap>> {
    match format {
        InputFormat::Json => {
            let doc: Json = serde_json::from_reader(reader)
                .map_err(|e| Error::Input(format!("invalid JSON: {}", e)))?;
            let Json::Array(items) = doc else {
                return Err(Error::Input("expected a JSON array of records".to_string()));
            };
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| to_field_map(i, item))
                .collect()
        }
        InputFormat::JsonLines => {
            let mut records = Vec::new();
            for (line_no, line) in BufReader::new(reader).lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let item: Json = serde_json::from_str(&line)
                    .map_err(|e| Error::Input(format!("line {}: invalid JSON: {}", line_no + 1, e)))?;
                records.push(to_field_map(records.len(), item)?);
            }
            Ok(records)
        }
    }
}

/// Open `path` and decode it, guessing the format unless one is given
pub fn read_file(path: &Path, format: Option<InputFormat>) -> Result<Vec<FieldMap>> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    let file = std::fs::File::open(path)?;
    tracing::debug!("Reading {} as {}", path.display(), format);
    read_records(file, format)
}

fn to_field_map(index: usize, item: Json) -> Result<FieldMap> {
    let Json::Object(object) = item else {
        return Err(Error::Input(format!("record #{} is not an object", index)));
    };

    let mut map = FieldMap::new();
    for (key, value) in object {
        let value = to_value(value)
            .ok_or_else(|| Error::Input(format!("record #{}: unsupported value for `{}`", index, key)))?;
        map.insert(&key, value);
    }
    Ok(map)
}

/// Arrays of byte-sized integers are blobs; objects and booleans have no column type
fn to_value(json: Json) -> Option<Value> {
    match json {
        Json::Null => Some(Value::Null),
        Json::Number(n) => n
            .as_i64()
            .map(Value::Integer)
            .or_else(|| n.as_f64().map(Value::Real)),
        Json::String(s) => Some(Value::Text(s)),
        Json::Array(items) => items
            .iter()
            .map(|v| v.as_u64().and_then(|b| u8::try_from(b).ok()))
            .collect::<Option<Vec<u8>>>()
            .map(Value::Blob),
        Json::Bool(_) | Json::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{IntoRow, Record};

    #[test]
    fn test_format_detection() {
        assert_eq!(InputFormat::from_path(Path::new("rows.jsonl")), InputFormat::JsonLines);
        assert_eq!(InputFormat::from_path(Path::new("rows.ndjson")), InputFormat::JsonLines);
        assert_eq!(InputFormat::from_path(Path::new("rows.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("rows")), InputFormat::Json);
        assert_eq!("NDJSON".parse::<InputFormat>().unwrap(), InputFormat::JsonLines);
        assert!("csv".parse::<InputFormat>().is_err());
    }

    #[test]
    fn test_read_json_array() {
        let input = r#"[
            {"pid": 42, "price": 42.195, "name": "run", "data": [104, 101, 108, 111]},
            {"pid": 634, "price": 3.776, "name": "fuji", "data": [109, 111, 117, 110, 116]}
        ]"#;

        let maps = read_records(input.as_bytes(), InputFormat::Json).unwrap();
        let records: Vec<_> = maps
            .into_iter()
            .enumerate()
            .map(|(i, m)| m.into_row(i).unwrap())
            .collect();

        let expected: Vec<_> = Record::samples()
            .into_iter()
            .map(|r| r.into_row(0).unwrap())
            .collect();
        assert_eq!(records, expected);
    }

    #[test]
    fn test_read_json_lines() {
        let input = "{\"pid\": 1, \"price\": 2, \"name\": \"a\", \"data\": []}\n\n{\"pid\": 2, \"price\": 0.5, \"name\": null, \"data\": [0]}\n";

        let maps = read_records(input.as_bytes(), InputFormat::JsonLines).unwrap();
        assert_eq!(maps.len(), 2);
        assert_eq!(maps[0].get("price"), Some(&Value::Integer(2)));
        assert_eq!(maps[0].get("data"), Some(&Value::Blob(Vec::new())));
        assert_eq!(maps[1].get("name"), Some(&Value::Null));
    }

    #[test]
    fn test_missing_field_survives_decoding() {
        let maps = read_records(r#"[{"pid": 1, "price": 1.0, "data": []}]"#.as_bytes(), InputFormat::Json).unwrap();
        assert_eq!(maps[0].get("name"), None);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(matches!(
            read_records(r#"{"pid": 1}"#.as_bytes(), InputFormat::Json),
            Err(Error::Input(_))
        ));
        assert!(matches!(
            read_records(r#"[1, 2]"#.as_bytes(), InputFormat::Json),
            Err(Error::Input(_))
        ));
        assert!(matches!(
            read_records(r#"[{"data": [1, 300]}]"#.as_bytes(), InputFormat::Json),
            Err(Error::Input(_))
        ));
        assert!(matches!(
            read_records("{\"pid\": true}\n".as_bytes(), InputFormat::JsonLines),
            Err(Error::Input(_))
        ));
        assert!(matches!(
            read_records("not json\n".as_bytes(), InputFormat::JsonLines),
            Err(Error::Input(_))
        ));
    }
}
