use std::path::{Path, PathBuf};

use serde_json::Value as JSValue;
use survey_filter::{Record, Value};

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

/// The location of a file referenced by a configuration.
pub fn resolve_path(root: &Path, file_path: &str) -> String {
    let p: PathBuf = root.join(file_path);
    p.as_path().display().to_string()
}

// Anything that is not a number or a string ends up in the undefined bucket.
pub fn json_to_value(js: &JSValue) -> Value {
    match js {
        JSValue::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Undefined),
        JSValue::String(s) => Value::Text(s.clone()),
        _ => Value::Undefined,
    }
}

pub fn value_to_json(v: &Value) -> JSValue {
    match v {
        Value::Undefined => JSValue::Null,
        Value::Number(x) => serde_json::Number::from_f64(*x)
            .map(JSValue::Number)
            .unwrap_or(JSValue::Null),
        Value::Text(s) => JSValue::String(s.clone()),
    }
}

pub fn json_to_record(js: &JSValue) -> Record {
    match js {
        JSValue::Object(obj) => obj
            .iter()
            .map(|(k, v)| (k.clone(), json_to_value(v)))
            .collect(),
        _ => Record::new(),
    }
}

pub fn record_to_json(record: &Record) -> JSValue {
    JSValue::Object(
        record
            .fields()
            .map(|(k, v)| (k.clone(), value_to_json(v)))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_records() {
        let r = json_to_record(&json!({"Age": "25_39", "Round": 2, "Gender": null, "X": true}));
        assert_eq!(r.get("Age"), Value::from("25_39"));
        assert_eq!(r.get("Round"), Value::Number(2.0));
        assert_eq!(r.get("Gender"), Value::Undefined);
        assert_eq!(r.get("X"), Value::Undefined);
        assert_eq!(json_to_record(&json!("not an object")), Record::new());

        let back = record_to_json(&r);
        assert_eq!(back["Age"], json!("25_39"));
        assert_eq!(back["Round"], json!(2.0));
        assert_eq!(back["Gender"], JSValue::Null);
    }

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/data/http/data.json"), "data");
        assert_eq!(
            resolve_path(Path::new("/data/http"), "adm3.json"),
            "/data/http/adm3.json"
        );
    }
}
