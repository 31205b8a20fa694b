// Primitives for reading and writing JSON records.

use crate::dash::io_common::{json_to_record, record_to_json};
use crate::dash::*;

/// Reads a JSON array of flat objects. Elements that are not objects become empty records.
pub fn read_json_records(path: &str) -> DashResult<Vec<Record>> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    let elements = js.as_array().context(NotAnArraySnafu { path })?;
    let records: Vec<Record> = elements.iter().map(json_to_record).collect();
    debug!("read_json_records: {:?}: {} records", path, records.len());
    Ok(records)
}

/// Writes records as a JSON array. Undefined values are written as null.
pub fn write_json_records(records: &[Record], path: &str) -> DashResult<()> {
    let js = JSValue::Array(records.iter().map(record_to_json).collect());
    let contents = serde_json::to_string_pretty(&js).context(ParsingJsonSnafu {})?;
    fs::write(path, contents).context(WritingOutputSnafu { path })?;
    info!("write_json_records: {} records written to {:?}", records.len(), path);
    Ok(())
}
