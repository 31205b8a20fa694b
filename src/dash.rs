use log::{debug, info, log_enabled, warn, Level};

use snafu::{prelude::*, Snafu};

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use survey_filter::coordinator::{
    BindingSource, ChartBinding, ChartKind, CoordinatorConfig, DashboardSession, ViewCoordinator,
};
use survey_filter::{CollectionId, CountFormat, DatasetIndex, DimensionId, GroupId};
use survey_filter::{IndexError, Record, Value};

use crate::args::Args;
use crate::dash::charts::SnapshotChart;
use crate::dash::config_reader::*;
use crate::dash::io_common::resolve_path;

pub mod charts;
pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_geojson;
pub mod io_json;
pub mod io_xlsx;

#[derive(Debug, Snafu)]
pub enum DashError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Expected a JSON array of records in {path}"))]
    NotAnArray { path: String },
    #[snafu(display("Error opening CSV file {path}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error parsing CSV line {lineno}"))]
    CsvLineParse { source: csv::Error, lineno: usize },
    #[snafu(display("Error opening Excel file {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Missing worksheet or header in Excel file {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("Error parsing GeoJSON file {path}"))]
    ParsingGeoJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("The GeoJSON file {path} does not contain any feature"))]
    MissingFeatures { path: String },
    #[snafu(display("Cannot find the directory of the configuration file"))]
    MissingParentDir {},
    #[snafu(display("Unknown source {name}"))]
    UnknownSource { name: String },
    #[snafu(display("Provider not implemented {provider:?}"))]
    UnknownProvider { provider: String },
    #[snafu(display("Unknown chart kind {kind:?}"))]
    UnknownChartKind { kind: String },
    #[snafu(display("The source {name} does not contain any record"))]
    EmptyDataset { name: String },
    #[snafu(display("Dashboard error: {source}"))]
    Index { source: IndexError },
    #[snafu(display("Error writing file {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashResult<T> = Result<T, DashError>;

/// A source, as read by the readers.
#[derive(Debug, Clone)]
struct LoadedSource {
    name: String,
    records: Vec<Record>,
}

/// Everything that must be loaded before any chart is bound.
#[derive(Debug, Clone)]
struct LoadedData {
    sources: Vec<LoadedSource>,
    regions: Option<Vec<Value>>,
    contour_features: Option<usize>,
}

fn read_source(root: &Path, cfs: &SourceConfig) -> DashResult<Vec<Record>> {
    let p = resolve_path(root, &cfs.file_path);
    info!("Attempting to read source {} from {:?}", cfs.name, p);
    match cfs.provider.as_str() {
        "json" => io_json::read_json_records(&p),
        "csv" => io_csv::read_csv_records(&p, cfs.numeric_fields.as_deref().unwrap_or(&[])),
        "xlsx" => io_xlsx::read_xlsx_records(&p, cfs.excel_worksheet_name.as_deref()),
        x => UnknownProviderSnafu { provider: x }.fail(),
    }
}

// Any failure here aborts the construction of the whole dashboard.
fn load_data(config: &DashConfig, root: &Path) -> DashResult<LoadedData> {
    let mut sources: Vec<LoadedSource> = Vec::new();
    for cfs in config.sources.iter() {
        let records = read_source(root, cfs)?;
        sources.push(LoadedSource {
            name: cfs.name.clone(),
            records,
        });
    }

    let regions = match &config.boundaries {
        Some(b) => {
            let features = io_geojson::read_features(&resolve_path(root, &b.file_path))?;
            let keys = io_geojson::region_keys(&features, b.key_property());
            info!("load_data: {} regions", keys.len());
            Some(keys)
        }
        None => None,
    };

    let contour_features = match &config.contour {
        Some(c) => Some(io_geojson::read_features(&resolve_path(root, &c.file_path))?.len()),
        None => None,
    };

    Ok(LoadedData {
        sources,
        regions,
        contour_features,
    })
}

fn field_dimension_for(
    session: &mut DashboardSession,
    coll: CollectionId,
    field: &str,
) -> DashResult<DimensionId> {
    if let Some(dim) = session.index().dimension_by_name(coll, field) {
        return Ok(dim);
    }
    session
        .index_mut()
        .field_dimension(coll, field)
        .context(IndexSnafu {})
}

fn group_for(
    session: &mut DashboardSession,
    groups: &mut HashMap<DimensionId, GroupId>,
    dim: DimensionId,
) -> DashResult<GroupId> {
    if let Some(g) = groups.get(&dim) {
        return Ok(*g);
    }
    let g = session.index_mut().group(dim).context(IndexSnafu {})?;
    groups.insert(dim, g);
    Ok(g)
}

struct Dashboard {
    session: DashboardSession,
    collections: Vec<(String, CollectionId)>,
    bindings: Vec<(ChartBinding, SnapshotChart)>,
    overlay_anchor: Option<String>,
}

fn build_session(config: &DashConfig, data: LoadedData) -> DashResult<Dashboard> {
    let mut index = DatasetIndex::new();
    let mut collections: Vec<(String, CollectionId)> = Vec::new();
    for src in data.sources {
        let coll = match index.create_collection(src.records) {
            Ok(c) => c,
            Err(IndexError::EmptyDataset) => {
                return EmptyDatasetSnafu { name: src.name }.fail();
            }
            Err(e) => return Err(e).context(IndexSnafu {}),
        };
        collections.push((src.name, coll));
    }
    let collection_of = |name: &str| -> DashResult<CollectionId> {
        collections
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
            .context(UnknownSourceSnafu { name })
    };

    let mut session = DashboardSession::new(index);
    for cfs in config.sources.iter() {
        if let Some(round_field) = &cfs.round_field {
            let dim = field_dimension_for(&mut session, collection_of(&cfs.name)?, round_field)?;
            session.add_round_dimension(dim).context(IndexSnafu {})?;
        }
    }

    let overlay_anchor: Option<String> = match data.contour_features {
        Some(_) => config
            .charts
            .iter()
            .find(|c| c.kind == "choropleth")
            .map(|c| c.anchor.clone()),
        None => None,
    };
    if data.contour_features.is_some() && overlay_anchor.is_none() {
        warn!("build_session: a contour is configured but there is no map");
    }

    let mut groups: HashMap<DimensionId, GroupId> = HashMap::new();
    let mut bindings: Vec<(ChartBinding, SnapshotChart)> = Vec::new();
    for chart in config.charts.iter() {
        let kind = chart.chart_kind()?;
        let coll = collection_of(&chart.source)?;
        let source = if kind == ChartKind::DataCount {
            BindingSource::Collection(coll)
        } else {
            let dim = field_dimension_for(&mut session, coll, chart.field()?)?;
            let group = group_for(&mut session, &mut groups, dim)?;
            match (kind, chart.domain(), &data.regions) {
                (ChartKind::Choropleth, _, Some(regions)) => {
                    BindingSource::Regions(group, regions.clone())
                }
                (ChartKind::Choropleth, Some(domain), None) => BindingSource::Regions(group, domain),
                (_, Some(domain), _) => BindingSource::Ordinal(group, domain),
                (_, None, _) => BindingSource::Group(group),
            }
        };
        debug!("build_session: chart {}: {:?}", chart.anchor, source);

        let collaborator = match (overlay_anchor.as_deref(), data.contour_features) {
            (Some(a), Some(n)) if a == chart.anchor => SnapshotChart::with_contour(&chart.anchor, n),
            _ => SnapshotChart::new(&chart.anchor),
        };
        bindings.push((ChartBinding::new(kind, source), collaborator));
    }

    Ok(Dashboard {
        session,
        collections,
        bindings,
        overlay_anchor,
    })
}

// Rounds are matched as numbers when the data stores them as numbers.
fn round_value(session: &DashboardSession, round: &str) -> Value {
    let index = session.index();
    let numeric = session.round_dimensions().iter().any(|dim| {
        let field = index.dimension_name(*dim).unwrap_or_default();
        index
            .records(dim.collection())
            .map(|recs| recs.iter().any(|r| matches!(r.get(field), Value::Number(_))))
            .unwrap_or(false)
    });
    match round.trim().parse::<f64>() {
        Ok(x) if numeric => Value::Number(x),
        _ => Value::Text(round.to_string()),
    }
}

/// The last visible records along each round dimension, one line per record.
fn top_records(session: &DashboardSession, n: usize) -> DashResult<Vec<String>> {
    let index = session.index();
    let mut lines: Vec<String> = Vec::new();
    for dim in session.round_dimensions().iter() {
        let name = index.dimension_name(*dim).context(IndexSnafu {})?;
        for r in index.top(*dim, n).context(IndexSnafu {})? {
            let fields: Vec<String> = r.fields().map(|(k, v)| format!("{}={}", k, v)).collect();
            lines.push(format!("{}: {}", name, fields.join(", ")));
        }
    }
    Ok(lines)
}

fn build_summary_js(
    config: &DashConfig,
    round: Option<&Value>,
    format: CountFormat,
    dashboard: &Dashboard,
    coordinator: &ViewCoordinator<SnapshotChart>,
) -> DashResult<JSValue> {
    let mut sources: Vec<JSValue> = Vec::new();
    for (name, coll) in dashboard.collections.iter() {
        let index = dashboard.session.index();
        let selected = index.visible_count(*coll).context(IndexSnafu {})?;
        let total = index.total_count(*coll).context(IndexSnafu {})?;
        sources.push(json!({
            "name": name,
            "selected": format.format(selected),
            "total": format.format(total),
        }));
    }
    let charts: Vec<JSValue> = coordinator.collaborators().map(|c| c.to_json()).collect();
    Ok(json!({
        "title": config.title,
        "round": round.map(|r| r.to_string()),
        "censorBelow": format.censor_below,
        "sources": sources,
        "charts": charts,
    }))
}

/// Loads the data of a dashboard, binds all the charts and returns a snapshot of what they show.
///
/// Nothing is bound if any of the data files fails to load.
pub fn build_dashboard(
    config: &DashConfig,
    root: &Path,
    round: Option<&str>,
    export_json: Option<&str>,
) -> DashResult<JSValue> {
    let data = load_data(config, root)?;

    if let Some(p) = export_json {
        match data.sources.first() {
            Some(src) => io_json::write_json_records(&src.records, p)?,
            None => whatever!("No source to export"),
        }
    }

    let mut dashboard = build_session(config, data)?;
    let mut coordinator: ViewCoordinator<SnapshotChart> = ViewCoordinator::new(CoordinatorConfig {
        censor_below: config.censor_below(),
        overlay_anchor: dashboard.overlay_anchor.clone(),
    });
    let bindings = std::mem::take(&mut dashboard.bindings);
    coordinator
        .bind_all(&dashboard.session, bindings)
        .context(IndexSnafu {})?;
    coordinator
        .render_all(&dashboard.session)
        .context(IndexSnafu {})?;

    let round_v: Option<Value> = round.map(|r| round_value(&dashboard.session, r));
    if let Some(r) = &round_v {
        if dashboard.session.round_dimensions().is_empty() {
            warn!("build_dashboard: no source declares a round field");
        }
        coordinator
            .on_round_selected(&mut dashboard.session, Some(r.clone()))
            .context(IndexSnafu {})?;
    }

    if log_enabled!(Level::Debug) {
        for line in top_records(&dashboard.session, 5)? {
            debug!("build_dashboard: top record {}", line);
        }
    }

    build_summary_js(
        config,
        round_v.as_ref(),
        coordinator.format(),
        &dashboard,
        &coordinator,
    )
}

pub fn run_dashboard(args: &Args) -> DashResult<()> {
    let (config, root): (DashConfig, PathBuf) = match (&args.config, &args.input) {
        (Some(config_path), _) => {
            let config = read_config(config_path)?;
            let root = Path::new(config_path)
                .parent()
                .context(MissingParentDirSnafu {})?
                .to_path_buf();
            (config, root)
        }
        (None, Some(input)) => {
            let config = config_from_input(
                input,
                args.input_type.as_deref(),
                args.fields.as_deref().unwrap_or(&[]),
                args.round_field.as_deref(),
                args.excel_worksheet_name.as_deref(),
            );
            (config, PathBuf::new())
        }
        (None, None) => whatever!("Either --config or --input must be provided"),
    };
    info!(
        "run_dashboard: {:?}: {} sources, {} charts",
        config.title,
        config.sources.len(),
        config.charts.len()
    );

    let summary = build_dashboard(
        &config,
        root.as_path(),
        args.round.as_deref(),
        args.export_json.as_deref(),
    )?;
    let pretty_js_stats = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;

    match args.out.as_deref() {
        None | Some("stdout") => println!("{}", pretty_js_stats),
        Some(out_path) => {
            fs::write(out_path, &pretty_js_stats).context(WritingOutputSnafu { path: out_path })?;
            info!("run_dashboard: snapshot written to {:?}", out_path);
        }
    }

    // The reference snapshot, if provided for comparison
    if let Some(reference_path) = &args.reference {
        let summary_ref = read_summary(reference_path)?;
        if summary_ref != summary {
            let pretty_js_summary_ref =
                serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
            warn!("Found differences with the reference snapshot");
            print_diff(
                pretty_js_summary_ref.as_str(),
                pretty_js_stats.as_ref(),
                "\n",
            );
            whatever!("Difference detected between computed snapshot and reference snapshot")
        }
    }

    Ok(())
}
