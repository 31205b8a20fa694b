pub use crate::config::*;
use crate::DatasetIndex;

/// A builder for assembling the records of a collection row by row.
///
/// This is the natural entry point for tabular inputs (CSV files, spreadsheets).
///
/// ```
/// pub use survey_filter::builder::Builder;
/// pub use survey_filter::DatasetIndex;
/// # use survey_filter::IndexError;
///
/// let mut builder = Builder::new().fields(&["District".to_string(), "Cluster".to_string()])?;
///
/// builder.add_row(&["Gorkha".to_string(), "Shelter".to_string()])?;
/// builder.add_row(&["Dhading".to_string(), "".to_string()])?;
///
/// let mut index = DatasetIndex::new();
/// let coll = builder.build(&mut index)?;
/// assert_eq!(index.total_count(coll)?, 2);
///
/// # Ok::<(), IndexError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
    pub(crate) _fields: Vec<String>,
    pub(crate) _numeric_fields: Vec<String>,
    pub(crate) _records: Vec<Record>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder::default()
    }

    /// Sets the names of the columns of the rows. Any record added before is discarded.
    pub fn fields(self, names: &[String]) -> Result<Builder, IndexError> {
        Ok(Builder {
            _fields: names.to_vec(),
            _numeric_fields: self._numeric_fields,
            _records: Vec::new(),
        })
    }

    /// Declares columns whose cells should be read as numbers when they parse as such.
    pub fn numeric_fields(self, names: &[String]) -> Result<Builder, IndexError> {
        Ok(Builder {
            _fields: self._fields,
            _numeric_fields: names.to_vec(),
            _records: self._records,
        })
    }

    /// Adds a row of cells, in the order of the fields.
    ///
    /// Empty cells are undefined. Extra cells beyond the declared fields are ignored,
    /// missing cells are undefined.
    pub fn add_row(&mut self, cells: &[String]) -> Result<(), IndexError> {
        let record: Record = self
            ._fields
            .iter()
            .zip(cells.iter())
            .map(|(name, cell)| {
                let v = match cell.as_str() {
                    "" => Value::Undefined,
                    s if self._numeric_fields.contains(name) => match s.trim().parse::<f64>() {
                        Ok(x) => Value::Number(x),
                        Err(_) => Value::Text(s.to_string()),
                    },
                    s => Value::Text(s.to_string()),
                };
                (name.clone(), v)
            })
            .collect();
        self.add_record(&record)
    }

    pub fn add_record(&mut self, record: &Record) -> Result<(), IndexError> {
        self._records.push(record.clone());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self._records.len()
    }

    pub fn is_empty(&self) -> bool {
        self._records.is_empty()
    }

    /// The records added so far.
    pub fn records(&self) -> &[Record] {
        &self._records
    }

    pub fn into_records(self) -> Vec<Record> {
        self._records
    }

    /// Registers the records as a new collection of the index.
    pub fn build(self, index: &mut DatasetIndex) -> Result<CollectionId, IndexError> {
        index.create_collection(self._records)
    }
}
