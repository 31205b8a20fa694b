// Chart collaborators that keep the last frame they were asked to draw.

use survey_filter::coordinator::{ChartCollaborator, ChartFrame, ChartKind};

use crate::dash::*;

pub fn kind_name(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Bar => "bar",
        ChartKind::Pie => "pie",
        ChartKind::Row => "row",
        ChartKind::Choropleth => "choropleth",
        ChartKind::DataCount => "dataCount",
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotChart {
    anchor: String,
    // Number of features of the contour, for the chart that carries it.
    contour_features: Option<usize>,
    contour_drawn: bool,
    last: Option<ChartFrame>,
}

impl SnapshotChart {
    pub fn new(anchor: &str) -> SnapshotChart {
        SnapshotChart {
            anchor: anchor.to_string(),
            contour_features: None,
            contour_drawn: false,
            last: None,
        }
    }

    pub fn with_contour(anchor: &str, features: usize) -> SnapshotChart {
        SnapshotChart {
            contour_features: Some(features),
            ..SnapshotChart::new(anchor)
        }
    }

    pub fn contour_drawn(&self) -> bool {
        self.contour_drawn
    }

    pub fn to_json(&self) -> JSValue {
        let mut js = match &self.last {
            Some(frame) => frame_to_json(frame),
            None => json!({ "anchor": self.anchor }),
        };
        if let Some(n) = self.contour_features {
            js["contour"] = json!({ "features": n, "drawn": self.contour_drawn });
        }
        js
    }
}

impl ChartCollaborator for SnapshotChart {
    fn anchor(&self) -> &str {
        &self.anchor
    }

    fn redraw(&mut self, frame: &ChartFrame) {
        // Redrawing rebuilds the drawing surface: the contour is gone.
        self.contour_drawn = false;
        self.last = Some(frame.clone());
    }

    fn apply_overlay(&mut self) {
        if self.contour_features.is_some() {
            self.contour_drawn = true;
        } else {
            warn!("apply_overlay: chart {} has no contour", self.anchor);
        }
    }
}

pub fn frame_to_json(frame: &ChartFrame) -> JSValue {
    if frame.kind == ChartKind::DataCount {
        return json!({
            "anchor": frame.anchor,
            "kind": kind_name(frame.kind),
            "selected": frame.selected.map(|c| c.to_string()),
            "total": frame.total.map(|c| c.to_string()),
        });
    }
    let entries: Vec<JSValue> = frame
        .entries
        .iter()
        .map(|e| {
            json!({
                "key": e.key.to_string(),
                "count": e.count.map(|c| c.to_string()),
            })
        })
        .collect();
    json!({
        "anchor": frame.anchor,
        "kind": kind_name(frame.kind),
        "entries": entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_filter::coordinator::FrameEntry;
    use survey_filter::DisplayCount;

    #[test]
    fn redraw_clears_the_contour() {
        let mut map = SnapshotChart::with_contour("map", 1);
        map.apply_overlay();
        assert!(map.contour_drawn());
        map.redraw(&ChartFrame {
            anchor: "map".to_string(),
            kind: ChartKind::Choropleth,
            entries: vec![],
            selected: None,
            total: None,
        });
        assert!(!map.contour_drawn());
        map.apply_overlay();
        assert!(map.contour_drawn());
    }

    #[test]
    fn frames_as_json() {
        let frame = ChartFrame {
            anchor: "age_chart".to_string(),
            kind: ChartKind::Bar,
            entries: vec![
                FrameEntry {
                    key: Value::from("15_24"),
                    count: Some(DisplayCount::Exact(42)),
                },
                FrameEntry {
                    key: Value::Undefined,
                    count: Some(DisplayCount::Censored { threshold: 20 }),
                },
            ],
            selected: None,
            total: None,
        };
        assert_eq!(
            frame_to_json(&frame),
            json!({
                "anchor": "age_chart",
                "kind": "bar",
                "entries": [
                    {"key": "15_24", "count": "42"},
                    {"key": "undefined", "count": "< 20*"}
                ]
            })
        );
    }
}
