// Primitives for reading Excel spreadsheets (exports of online survey tools).

use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::dash::*;

/// Reads a worksheet whose first row holds the names of the fields.
pub fn read_xlsx_records(path: &str, worksheet_name: Option<&str>) -> DashResult<Vec<Record>> {
    let wrange = get_range(path, worksheet_name)?;
    let mut rows = wrange.rows();
    let header: Vec<Option<String>> = rows
        .next()
        .context(EmptyExcelSnafu { path })?
        .iter()
        .map(|cell| match cell {
            DataType::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        })
        .collect();
    debug!("read_xlsx_records: header: {:?}", header);

    let records: Vec<Record> = rows
        .map(|row| {
            header
                .iter()
                .zip(row.iter())
                // Columns without a name are skipped.
                .filter_map(|(name, cell)| name.as_ref().map(|n| (n.clone(), read_cell(cell))))
                .collect()
        })
        .collect();
    debug!("read_xlsx_records: {:?}: {} records", path, records.len());
    Ok(records)
}

fn read_cell(cell: &DataType) -> Value {
    match cell {
        DataType::String(s) if s.is_empty() => Value::Undefined,
        DataType::String(s) => Value::Text(s.clone()),
        DataType::Float(f) => Value::Number(*f),
        DataType::Int(i) => Value::Number(*i as f64),
        DataType::Bool(b) => Value::Text(b.to_string()),
        _ => Value::Undefined,
    }
}

fn get_range(path: &str, worksheet_name: Option<&str>) -> DashResult<calamine::Range<DataType>> {
    debug!(
        "read_xlsx_records: path: {:?} worksheet: {:?}",
        path, worksheet_name
    );
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;

    // A worksheet name was provided, use it.
    let wrange = if let Some(name) = worksheet_name {
        workbook
            .worksheet_range(name)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?
    } else {
        workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?
            .context(OpeningExcelSnafu { path })?
    };
    Ok(wrange)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells() {
        assert_eq!(read_cell(&DataType::String("".to_string())), Value::Undefined);
        assert_eq!(
            read_cell(&DataType::String("August".to_string())),
            Value::from("August")
        );
        assert_eq!(read_cell(&DataType::Int(3)), Value::Number(3.0));
        assert_eq!(read_cell(&DataType::Empty), Value::Undefined);
    }

    #[test]
    fn missing_workbook() {
        let res = read_xlsx_records("/nonexistent/survey.xlsx", None);
        assert!(matches!(res, Err(DashError::OpeningExcel { .. })));
    }

    const SURVEY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/survey.xlsx");

    #[test]
    fn worksheet_with_header() {
        let records = read_xlsx_records(SURVEY, None).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].get("District"), Value::from("Gorkha"));
        assert_eq!(records[0].get("Round"), Value::from("August"));
        assert_eq!(records[0].get("Age"), Value::Number(30.0));
        // The missing round of the second response.
        assert_eq!(records[1].get("Round"), Value::Undefined);
        assert_eq!(records[2].get("Age"), Value::Number(22.5));
        // The second column has no name.
        assert!(records
            .iter()
            .all(|r| r.fields().all(|(k, _)| k == "District" || k == "Round" || k == "Age")));
    }

    #[test]
    fn named_worksheet() {
        let records = read_xlsx_records(SURVEY, Some("Responses")).unwrap();
        assert_eq!(records.len(), 3);
        let res = read_xlsx_records(SURVEY, Some("Activities"));
        assert!(matches!(res, Err(DashError::EmptyExcel { .. })));
    }
}
