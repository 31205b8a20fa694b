//! Binding of groups to charts and the redraw protocol.
//!
//! The charts themselves are external collaborators: they receive a
//! [ChartFrame] on every redraw and are free to render it however they want.
//! The map chart additionally receives a static contour overlay after every
//! redraw, since redrawing it clears whatever was drawn on top of it.

use log::{debug, info, warn};

use crate::{CollectionId, CountFormat, DatasetIndex, DimensionId, DisplayCount, Filter, GroupId};
use crate::{IndexError, Value};

/// All the filtering state of one dashboard.
///
/// It is built once the data is loaded and then only mutated through a
/// [ViewCoordinator].
#[derive(Debug, Clone, Default)]
pub struct DashboardSession {
    index: DatasetIndex,
    round_dimensions: Vec<DimensionId>,
}

impl DashboardSession {
    pub fn new(index: DatasetIndex) -> DashboardSession {
        DashboardSession {
            index,
            round_dimensions: Vec::new(),
        }
    }

    pub fn index(&self) -> &DatasetIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut DatasetIndex {
        &mut self.index
    }

    /// Declares the dimension that holds the survey round of a collection.
    ///
    /// Selecting a round filters every declared round dimension.
    pub fn add_round_dimension(&mut self, dimension: DimensionId) -> Result<(), IndexError> {
        self.index.filter(dimension)?;
        if !self.round_dimensions.contains(&dimension) {
            self.round_dimensions.push(dimension);
        }
        Ok(())
    }

    pub fn round_dimensions(&self) -> &[DimensionId] {
        &self.round_dimensions
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum ChartKind {
    Bar,
    Pie,
    Row,
    Choropleth,
    /// The "N selected out of M records" counter.
    DataCount,
}

/// Where a chart takes its data from.
#[derive(PartialEq, Debug, Clone)]
pub enum BindingSource {
    /// Every key of the group, ascending.
    Group(GroupId),
    /// Only the keys listed in the domain, in the order of the domain.
    Ordinal(GroupId, Vec<Value>),
    /// One entry per region. Regions without any visible record have no count.
    Regions(GroupId, Vec<Value>),
    Collection(CollectionId),
}

#[derive(PartialEq, Debug, Clone)]
pub struct ChartBinding {
    pub kind: ChartKind,
    pub source: BindingSource,
}

impl ChartBinding {
    pub fn new(kind: ChartKind, source: BindingSource) -> ChartBinding {
        ChartBinding { kind, source }
    }

    fn validate(&self, anchor: &str, index: &DatasetIndex) -> Result<(), IndexError> {
        let consistent = matches!(
            (self.kind, &self.source),
            (ChartKind::DataCount, BindingSource::Collection(_))
                | (ChartKind::Choropleth, BindingSource::Regions(_, _))
                | (ChartKind::Choropleth, BindingSource::Group(_))
                | (
                    ChartKind::Bar | ChartKind::Pie | ChartKind::Row,
                    BindingSource::Group(_) | BindingSource::Ordinal(_, _)
                )
        );
        if !consistent {
            return Err(IndexError::InvalidBinding(anchor.to_string()));
        }
        match &self.source {
            BindingSource::Group(g) | BindingSource::Ordinal(g, _) | BindingSource::Regions(g, _) => {
                index.group_size(*g).map(|_| ())
            }
            BindingSource::Collection(c) => index.total_count(*c).map(|_| ()),
        }
    }
}

/// One plotted element of a chart.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct FrameEntry {
    pub key: Value,
    /// `None` for a region without data.
    pub count: Option<DisplayCount>,
}

/// The data a chart needs to redraw itself. All the counts are already
/// censored.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ChartFrame {
    pub anchor: String,
    pub kind: ChartKind,
    pub entries: Vec<FrameEntry>,
    /// Only for the record counter.
    pub selected: Option<DisplayCount>,
    pub total: Option<DisplayCount>,
}

/// A chart widget, identified by a stable anchor.
pub trait ChartCollaborator {
    fn anchor(&self) -> &str;

    fn redraw(&mut self, frame: &ChartFrame);

    /// Draws the static contour on top of the chart. Only called on the map.
    fn apply_overlay(&mut self) {}
}

impl<T: ChartCollaborator + ?Sized> ChartCollaborator for Box<T> {
    fn anchor(&self) -> &str {
        (**self).anchor()
    }

    fn redraw(&mut self, frame: &ChartFrame) {
        (**self).redraw(frame)
    }

    fn apply_overlay(&mut self) {
        (**self).apply_overlay()
    }
}

#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CoordinatorConfig {
    /// Counts at or below this value are never displayed exactly.
    pub censor_below: u64,
    /// The anchor of the chart that receives the contour overlay.
    pub overlay_anchor: Option<String>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        CoordinatorConfig {
            censor_below: CountFormat::DEFAULT_THRESHOLD,
            overlay_anchor: None,
        }
    }
}

/// Keeps the charts consistent with the filters of a [DashboardSession].
pub struct ViewCoordinator<C: ChartCollaborator> {
    format: CountFormat,
    overlay_anchor: Option<String>,
    bindings: Vec<(ChartBinding, C)>,
}

impl<C: ChartCollaborator> ViewCoordinator<C> {
    pub fn new(config: CoordinatorConfig) -> ViewCoordinator<C> {
        ViewCoordinator {
            format: CountFormat::new(config.censor_below),
            overlay_anchor: config.overlay_anchor,
            bindings: Vec::new(),
        }
    }

    pub fn format(&self) -> CountFormat {
        self.format
    }

    /// Registers the charts. Nothing is bound if any of the bindings is invalid.
    pub fn bind_all(
        &mut self,
        session: &DashboardSession,
        bindings: Vec<(ChartBinding, C)>,
    ) -> Result<(), IndexError> {
        for (binding, chart) in bindings.iter() {
            binding.validate(chart.anchor(), session.index())?;
        }
        info!("bind_all: binding {} charts", bindings.len());
        self.bindings.extend(bindings);
        Ok(())
    }

    pub fn collaborators(&self) -> impl Iterator<Item = &C> {
        self.bindings.iter().map(|(_, c)| c)
    }

    /// Computes what a chart should show for the current filters.
    pub fn frame(
        &self,
        session: &DashboardSession,
        anchor: &str,
        binding: &ChartBinding,
    ) -> Result<ChartFrame, IndexError> {
        let index = session.index();
        let mut frame = ChartFrame {
            anchor: anchor.to_string(),
            kind: binding.kind,
            entries: Vec::new(),
            selected: None,
            total: None,
        };
        match &binding.source {
            BindingSource::Group(g) => {
                frame.entries = index
                    .group_entries(*g)?
                    .into_iter()
                    .map(|e| FrameEntry {
                        key: e.key,
                        count: Some(self.format.display(e.count)),
                    })
                    .collect();
            }
            BindingSource::Ordinal(g, domain) => {
                frame.entries = index
                    .ordinal_entries(*g, domain)?
                    .into_iter()
                    .map(|e| FrameEntry {
                        key: e.key,
                        count: Some(self.format.display(e.count)),
                    })
                    .collect();
            }
            BindingSource::Regions(g, regions) => {
                let entries = index.ordinal_entries(*g, regions)?;
                frame.entries = regions
                    .iter()
                    .map(|region| {
                        let count = entries
                            .iter()
                            .find(|e| e.key == *region && e.count > 0)
                            .map(|e| self.format.display(e.count));
                        FrameEntry {
                            key: region.clone(),
                            count,
                        }
                    })
                    .collect();
            }
            BindingSource::Collection(c) => {
                frame.selected = Some(self.format.display(index.visible_count(*c)?));
                frame.total = Some(self.format.display(index.total_count(*c)?));
            }
        }
        Ok(frame)
    }

    /// Redraws every chart, then reapplies the contour overlay on the map.
    pub fn redraw_all(&mut self, session: &DashboardSession) -> Result<(), IndexError> {
        let frames: Vec<ChartFrame> = self
            .bindings
            .iter()
            .map(|(binding, chart)| self.frame(session, chart.anchor(), binding))
            .collect::<Result<Vec<ChartFrame>, IndexError>>()?;

        for ((_, chart), frame) in self.bindings.iter_mut().zip(frames.iter()) {
            debug!("redraw_all: redrawing {}", frame.anchor);
            chart.redraw(frame);
        }

        if let Some(overlay_anchor) = self.overlay_anchor.as_deref() {
            match self
                .bindings
                .iter_mut()
                .find(|(_, chart)| chart.anchor() == overlay_anchor)
            {
                Some((_, map)) => {
                    debug!("redraw_all: applying the contour overlay on {}", overlay_anchor);
                    map.apply_overlay();
                }
                None => warn!(
                    "redraw_all: no chart with anchor {} for the contour overlay",
                    overlay_anchor
                ),
            }
        }
        Ok(())
    }

    /// The initial rendering, once all the charts are bound.
    pub fn render_all(&mut self, session: &DashboardSession) -> Result<(), IndexError> {
        info!("render_all: rendering {} charts", self.bindings.len());
        self.redraw_all(session)
    }

    /// Restricts every collection that has a round to the given round, or
    /// clears the round filters with `None`.
    pub fn on_round_selected(
        &mut self,
        session: &mut DashboardSession,
        round: Option<Value>,
    ) -> Result<(), IndexError> {
        info!("on_round_selected: selecting round {:?}", round);
        let dims: Vec<DimensionId> = session.round_dimensions().to_vec();
        for dim in dims {
            session
                .index_mut()
                .set_filter(dim, Filter::from(round.clone()))?;
        }
        self.redraw_all(session)
    }

    /// Removes every filter of every collection.
    pub fn on_clear_filters(&mut self, session: &mut DashboardSession) -> Result<(), IndexError> {
        info!("on_clear_filters");
        for coll in session.index().collection_ids() {
            session.index_mut().clear_all_filters(coll)?;
        }
        self.redraw_all(session)
    }
}
