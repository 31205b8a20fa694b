// Primitives for reading CSV files.

use survey_filter::builder::Builder;

use crate::dash::*;

/// Reads a CSV file whose first row holds the names of the fields.
pub fn read_csv_records(path: &str, numeric_fields: &[String]) -> DashResult<Vec<Record>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .context(OpeningCsvSnafu { path })?;
    let header: Vec<String> = rdr
        .headers()
        .context(OpeningCsvSnafu { path })?
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    debug!("read_csv_records: header: {:?}", header);

    let mut builder = Builder::new()
        .fields(&header)
        .context(IndexSnafu {})?
        .numeric_fields(numeric_fields)
        .context(IndexSnafu {})?;

    for (idx, line_r) in rdr.records().enumerate() {
        // The header is the first line.
        let lineno = idx + 2;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let cells: Vec<String> = line.iter().map(|s| s.to_string()).collect();
        builder.add_row(&cells).context(IndexSnafu {})?;
    }
    debug!("read_csv_records: {:?}: {} records", path, builder.len());
    Ok(builder.into_records())
}
