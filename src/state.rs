use std::collections::BTreeMap;
use std::sync::Arc;

use crate::chart::ChartSpec;
use crate::color::ColorMap;
use crate::data::filter::{PayloadRange, SLIDER_STEP_KG, SiteSelection, SliderScale};
use crate::data::model::Dataset;
use crate::reactive::{Dispatcher, InputEvent, Inputs, OutputId};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded launch table, shared read-only with every reaction.
    pub dataset: Arc<Dataset>,

    /// Current dropdown and slider values.
    pub inputs: Inputs,

    /// Track of the payload range control.
    pub slider: SliderScale,

    /// Labelled ticks under the track, computed once per dataset.
    pub slider_marks: Vec<(f64, String)>,

    /// Latest chart per display region.
    pub charts: BTreeMap<OutputId, ChartSpec>,

    /// Booster category → colour, stable across filtering.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    dispatcher: Dispatcher,
}

impl AppState {
    /// Initial state: every site, the observed payload range.
    pub fn new(dataset: Dataset) -> Self {
        let inputs = default_inputs(&dataset);
        Self::with_inputs(dataset, inputs)
    }

    /// State starting from explicit inputs; all charts are rendered once.
    pub fn with_inputs(dataset: Dataset, inputs: Inputs) -> Self {
        let slider = slider_for(&dataset);
        let mut state = Self {
            slider_marks: slider.marks(),
            slider,
            color_map: ColorMap::new(dataset.booster_categories()),
            dataset: Arc::new(dataset),
            inputs,
            charts: BTreeMap::new(),
            status_message: None,
            dispatcher: Dispatcher::dashboard(),
        };
        state.render_all();
        state
    }

    /// Replace the dataset (File → Open) and reset the controls.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.inputs = default_inputs(&dataset);
        self.slider = slider_for(&dataset);
        self.slider_marks = self.slider.marks();
        self.color_map = ColorMap::new(dataset.booster_categories());
        self.dataset = Arc::new(dataset);
        self.status_message = None;
        self.render_all();
    }

    /// Feed one interaction through the reaction table.
    pub fn apply(&mut self, event: InputEvent) {
        let input = event.input();
        if !self.inputs.apply(event) {
            return;
        }
        let emissions = self.dispatcher.dispatch(&self.dataset, &self.inputs, &[input]);
        for e in emissions {
            self.charts.insert(e.output, e.spec);
        }
    }

    pub fn chart(&self, output: OutputId) -> Option<&ChartSpec> {
        self.charts.get(&output)
    }

    fn render_all(&mut self) {
        self.charts = self
            .dispatcher
            .fire_all(&self.dataset, &self.inputs)
            .into_iter()
            .map(|e| (e.output, e.spec))
            .collect();
    }
}

/// Observed payload bounds, or an empty `[0, 0]` range for an empty table.
pub fn default_range(dataset: &Dataset) -> PayloadRange {
    dataset
        .payload_bounds()
        .and_then(|(lo, hi)| PayloadRange::new(lo, hi).ok())
        .unwrap_or(PayloadRange::EMPTY)
}

fn default_inputs(dataset: &Dataset) -> Inputs {
    Inputs {
        site: SiteSelection::All,
        payload: default_range(dataset),
    }
}

/// Slider track in whole steps around the observed payloads.
pub fn slider_for(dataset: &Dataset) -> SliderScale {
    let (lo, hi) = dataset.payload_bounds().unwrap_or((0.0, 0.0));
    SliderScale::from_bounds(lo, hi, SLIDER_STEP_KG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn state() -> AppState {
        AppState::new(Dataset::from_records(vec![
            record("A", 500.0, "FT", 1),
            record("A", 2500.0, "v1.1", 0),
            record("B", 7000.0, "B4", 1),
        ]))
    }

    fn scatter_len(state: &AppState) -> usize {
        match state.chart(OutputId::SuccessPayloadScatterChart) {
            Some(ChartSpec::Scatter(s)) => s.points.len(),
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn starts_with_both_charts_for_all_sites() {
        let s = state();
        assert_eq!(s.charts.len(), 2);
        assert_eq!(s.inputs.payload, PayloadRange::new(500.0, 7000.0).unwrap());
        assert_eq!((s.slider.min, s.slider.max), (0.0, 7000.0));
        assert_eq!(scatter_len(&s), 3);
    }

    #[test]
    fn range_change_only_updates_scatter() {
        let mut s = state();
        let pie_before = s.chart(OutputId::SuccessPieChart).cloned();

        s.apply(InputEvent::RangeChanged(PayloadRange::new(1000.0, 5000.0).unwrap()));

        assert_eq!(scatter_len(&s), 1);
        assert_eq!(s.chart(OutputId::SuccessPieChart).cloned(), pie_before);
    }

    #[test]
    fn site_change_updates_both() {
        let mut s = state();
        s.apply(InputEvent::SiteChanged(SiteSelection::from("B")));

        assert_eq!(
            s.chart(OutputId::SuccessPieChart).map(ChartSpec::title),
            Some("Total Success and Failed Launches for site B")
        );
        assert_eq!(scatter_len(&s), 1);
    }

    #[test]
    fn reload_resets_controls() {
        let mut s = state();
        s.apply(InputEvent::SiteChanged(SiteSelection::from("A")));
        s.status_message = Some("Error: stale".into());

        s.set_dataset(Dataset::from_records(vec![
            record("C", 500.0, "B5", 1),
            record("C", 12000.0, "B5", 1),
        ]));

        assert_eq!(s.inputs.site, SiteSelection::All);
        assert_eq!((s.slider.min, s.slider.max), (0.0, 12000.0));
        assert_eq!(s.slider_marks.last().map(|m| m.0), Some(12000.0));
        assert!(s.status_message.is_none());
        assert_eq!(scatter_len(&s), 2);
    }

    #[test]
    fn single_payload_track_is_one_step_wide() {
        let s = AppState::new(Dataset::from_records(vec![record("C", 12000.0, "B5", 1)]));
        assert_eq!((s.slider.min, s.slider.max), (12000.0, 13000.0));
    }

    #[test]
    fn empty_dataset_still_renders() {
        let s = AppState::new(Dataset::from_records(Vec::new()));
        assert_eq!(s.inputs.payload, PayloadRange::new(0.0, 0.0).unwrap());
        assert_eq!(scatter_len(&s), 0);
    }
}
