use serde::Serialize;

use crate::data::filter::{PayloadRange, SiteSelection, filter_by_payload_range, filter_by_site};
use crate::data::model::{BOOSTER_CATEGORY, CLASS, LAUNCH_SITE, LaunchRecord, PAYLOAD_MASS};

// ---------------------------------------------------------------------------
// Declarative chart descriptions
// ---------------------------------------------------------------------------

/// A chart to render, independent of how it is drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieSpec),
    Scatter(ScatterSpec),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(p) => &p.title,
            ChartSpec::Scatter(s) => &s.title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSpec {
    pub title: String,
    /// Column the slices are grouped by.
    pub names: &'static str,
    /// Column summed per slice; `None` counts rows.
    pub values: Option<&'static str>,
    pub slices: Vec<PieSlice>,
}

impl PieSpec {
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSpec {
    pub title: String,
    pub x: &'static str,
    pub y: &'static str,
    pub color: &'static str,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub color: String,
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Success pie: sum of `class` per site for `All`, else the 0/1 split of the
/// selected site.
pub fn build_pie_spec(records: &[LaunchRecord], selection: &SiteSelection) -> ChartSpec {
    let filtered = filter_by_site(records, selection);

    let spec = match selection {
        SiteSelection::All => PieSpec {
            title: "Total Success Launches By Site".to_string(),
            names: LAUNCH_SITE,
            values: Some(CLASS),
            slices: group_in_order(
                filtered
                    .iter()
                    .map(|r| (r.launch_site.as_str(), u64::from(r.outcome_class))),
            ),
        },
        SiteSelection::Site(site) => PieSpec {
            title: format!("Total Success and Failed Launches for site {site}"),
            names: CLASS,
            values: None,
            slices: group_in_order(filtered.iter().map(|r| (class_label(r), 1))),
        },
    };

    ChartSpec::Pie(spec)
}

/// Payload vs. outcome for the selected site within `range`.
pub fn build_scatter_spec(
    records: &[LaunchRecord],
    selection: &SiteSelection,
    range: PayloadRange,
) -> ChartSpec {
    let by_site = filter_by_site(records, selection);
    let filtered = filter_by_payload_range(&by_site, range);

    ChartSpec::Scatter(ScatterSpec {
        title: format!(
            "Correlation between Payload and Success for {}",
            selection.label()
        ),
        x: PAYLOAD_MASS,
        y: CLASS,
        color: BOOSTER_CATEGORY,
        points: filtered
            .into_iter()
            .map(|r| ScatterPoint {
                x: r.payload_mass_kg,
                y: f64::from(r.outcome_class),
                color: r.booster_version_category,
            })
            .collect(),
    })
}

fn class_label(record: &LaunchRecord) -> &'static str {
    if record.is_success() { "1" } else { "0" }
}

/// Sum values per key, keeping keys in order of first appearance.
fn group_in_order<'a>(items: impl Iterator<Item = (&'a str, u64)>) -> Vec<PieSlice> {
    let mut slices: Vec<PieSlice> = Vec::new();
    for (key, value) in items {
        match slices.iter_mut().find(|s| s.label == key) {
            Some(slice) => slice.value += value,
            None => slices.push(PieSlice {
                label: key.to_string(),
                value,
            }),
        }
    }
    slices
}
