// Primitives for reading boundary files.

use std::fs::File;
use std::io::BufReader;

use geojson::{Feature, GeoJson};

use crate::dash::io_common::json_to_value;
use crate::dash::*;

pub fn read_features(path: &str) -> DashResult<Vec<Feature>> {
    let file = File::open(path).context(OpeningJsonSnafu { path })?;
    let geojson =
        GeoJson::from_reader(BufReader::new(file)).context(ParsingGeoJsonSnafu { path })?;
    let features = match geojson {
        GeoJson::FeatureCollection(fc) => fc.features,
        GeoJson::Feature(f) => vec![f],
        GeoJson::Geometry(_) => return MissingFeaturesSnafu { path }.fail(),
    };
    debug!("read_features: {:?}: {} features", path, features.len());
    Ok(features)
}

/// The names of the regions, in the order of the features. Features without
/// the key property are skipped.
pub fn region_keys(features: &[Feature], key_property: &str) -> Vec<Value> {
    let mut res: Vec<Value> = Vec::new();
    for f in features.iter() {
        let key = f
            .properties
            .as_ref()
            .and_then(|props| props.get(key_property))
            .map(json_to_value)
            .unwrap_or(Value::Undefined);
        if key.is_undefined() {
            warn!("region_keys: feature without {} property", key_property);
        } else if !res.contains(&key) {
            res.push(key);
        }
    }
    res
}
