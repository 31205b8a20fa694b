/*!

This is the long-form manual for `survey_filter` and `surveydash`.

## Input formats

The following formats are supported for the survey and activity records:
* `json` a JSON array of flat objects
* `csv` Comma Separated Values with a header row
* `xlsx` Excel spreadsheet with a header row

District boundaries and the country contour are read from GeoJSON feature collections.

### `json`

Each object of the array is one record. Numbers are read as numbers, strings as text.
Any other value (`null`, booleans, nested objects) is undefined.

```json
[
  {"Age": "25_39", "Round": "August", "District": "Gorkha", "A0JS": "3___neutral"},
  {"Age": "40_54", "Round": "September", "District": "Dhading", "A0JS": "refused"}
]
```

### `csv`

The first row holds the names of the fields. All the cells are read as text, empty cells
are undefined. This is typically used for the organization/activity records
(`District`, `Organization`, `Cluster`).

### `xlsx`

The first row of the worksheet holds the names of the fields. Text cells are text,
numeric cells are numbers, empty cells are undefined. The worksheet can be selected
with `excelWorksheetName`, otherwise the first worksheet is used.

## Configuration

The dashboard is described by a JSON file. All the paths are relative to the
configuration file.

```json
{
  "title": "Nepal recovery survey",
  "censorBelow": 20,
  "sources": [
    {"name": "survey", "provider": "json", "filePath": "data.json", "roundField": "Round"},
    {"name": "activities", "provider": "csv", "filePath": "activities.csv"}
  ],
  "boundaries": {"filePath": "adm3.json", "keyProperty": "DISTRICT"},
  "contour": {"filePath": "adm0.json"},
  "charts": [
    {"anchor": "map", "kind": "choropleth", "source": "survey", "field": "District"},
    {"anchor": "age_chart", "kind": "bar", "source": "survey", "field": "Age",
     "domain": ["15_24", "25_39", "40_54", "55", "55_greater", "refused", "don_t_know"]},
    {"anchor": "ethnicity_chart", "kind": "pie", "source": "survey", "field": "Ethnicity"},
    {"anchor": "occupation_chart", "kind": "row", "source": "survey", "field": "Occupation"},
    {"anchor": "count-info", "kind": "dataCount", "source": "survey"}
  ]
}
```

* `censorBelow` (default 20): every count at or below this value is displayed as `< 20*`.
* `roundField`: the field holding the survey round. Selecting a round filters every
  source that declares one. Sources without a round field are never filtered by round.
* `domain`: the ordered list of categories of an ordinal chart. Categories that are not
  in the list are not plotted, but they are still counted by the `dataCount` chart.
* `boundaries`: the regions of the choropleth map. Every feature is one region, named by
  the `keyProperty` property. Regions without any visible record are shown without data.
* `contour`: the static boundary drawn on top of the map after every redraw.

Charts over the same source and field share the same dimension.

## Filtering model

All the dimensions of a source are filtered independently, and a record is visible only if
it passes every filter of its source. Groups count the visible records per distinct key
and are updated incrementally: changing a filter only visits the records that enter or
leave the selection.

Sources are never linked: a filter on one source does not affect another one, even if they
share field names.
*/
