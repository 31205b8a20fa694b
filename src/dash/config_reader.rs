use crate::dash::io_common::{json_to_value, simplify_file_name};
use crate::dash::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "roundField")]
    pub round_field: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
    #[serde(rename = "numericFields")]
    pub numeric_fields: Option<Vec<String>>,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct BoundariesConfig {
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "keyProperty")]
    pub key_property: Option<String>,
}

impl BoundariesConfig {
    pub const DEFAULT_KEY_PROPERTY: &'static str = "DISTRICT";

    pub fn key_property(&self) -> &str {
        self.key_property
            .as_deref()
            .unwrap_or(BoundariesConfig::DEFAULT_KEY_PROPERTY)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ContourConfig {
    #[serde(rename = "filePath")]
    pub file_path: String,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub anchor: String,
    pub kind: String,
    pub source: String,
    pub field: Option<String>,
    pub domain: Option<Vec<JSValue>>,
}

impl ChartConfig {
    pub fn chart_kind(&self) -> DashResult<ChartKind> {
        match self.kind.as_str() {
            "bar" => Ok(ChartKind::Bar),
            "pie" => Ok(ChartKind::Pie),
            "row" => Ok(ChartKind::Row),
            "choropleth" => Ok(ChartKind::Choropleth),
            "dataCount" => Ok(ChartKind::DataCount),
            x => UnknownChartKindSnafu { kind: x }.fail(),
        }
    }

    /// The field of the chart. Every chart except the record counter needs one.
    pub fn field(&self) -> DashResult<&str> {
        match self.field.as_deref() {
            Some(f) => Ok(f),
            None => whatever!("chart {} does not have a field", self.anchor),
        }
    }

    pub fn domain(&self) -> Option<Vec<Value>> {
        self.domain
            .as_ref()
            .map(|d| d.iter().map(json_to_value).collect())
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct DashConfig {
    pub title: Option<String>,
    #[serde(rename = "censorBelow")]
    pub censor_below: Option<u64>,
    pub sources: Vec<SourceConfig>,
    pub boundaries: Option<BoundariesConfig>,
    pub contour: Option<ContourConfig>,
    pub charts: Vec<ChartConfig>,
}

impl DashConfig {
    pub fn censor_below(&self) -> u64 {
        self.censor_below.unwrap_or(CountFormat::DEFAULT_THRESHOLD)
    }
}

pub fn read_config(path: &str) -> DashResult<DashConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: DashConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_config: {:?}", config);
    Ok(config)
}

/// A dashboard with one bar chart per field and a record counter, over a single file.
pub fn config_from_input(
    input: &str,
    input_type: Option<&str>,
    fields: &[String],
    round_field: Option<&str>,
    excel_worksheet_name: Option<&str>,
) -> DashConfig {
    let source_name = simplify_file_name(input);
    let mut charts: Vec<ChartConfig> = fields
        .iter()
        .map(|f| ChartConfig {
            anchor: f.clone(),
            kind: "bar".to_string(),
            source: source_name.clone(),
            field: Some(f.clone()),
            domain: None,
        })
        .collect();
    charts.push(ChartConfig {
        anchor: "count-info".to_string(),
        kind: "dataCount".to_string(),
        source: source_name.clone(),
        field: None,
        domain: None,
    });
    DashConfig {
        title: Some(source_name.clone()),
        censor_below: None,
        sources: vec![SourceConfig {
            name: source_name,
            provider: input_type.unwrap_or("json").to_string(),
            file_path: input.to_string(),
            round_field: round_field.map(|s| s.to_string()),
            excel_worksheet_name: excel_worksheet_name.map(|s| s.to_string()),
            numeric_fields: None,
        }],
        boundaries: None,
        contour: None,
        charts,
    }
}

/// Reads a snapshot stored as a reference.
pub fn read_summary(path: &str) -> DashResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(js)
}
