use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

use super::model::LaunchRecord;

// ---------------------------------------------------------------------------
// Site selection
// ---------------------------------------------------------------------------

/// Dropdown value: every site, or exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Wire value of the "every site" sentinel.
    pub const ALL: &'static str = "ALL";

    /// Human-readable form used in chart titles.
    pub fn label(&self) -> &str {
        match self {
            SiteSelection::All => "All Sites",
            SiteSelection::Site(s) => s,
        }
    }
}

impl From<&str> for SiteSelection {
    fn from(value: &str) -> Self {
        if value == Self::ALL {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => f.write_str(Self::ALL),
            SiteSelection::Site(s) => f.write_str(s),
        }
    }
}

// ---------------------------------------------------------------------------
// Payload range
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum RangeError {
    #[error("payload bounds must be finite and non-negative, got [{low}, {high}]")]
    OutOfDomain { low: f64, high: f64 },
    #[error("payload range is inverted: {low} > {high}")]
    Inverted { low: f64, high: f64 },
}

/// Closed interval `[low, high]` of payload mass in kg.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// `[0, 0]`, the range of a table with no records.
    pub const EMPTY: PayloadRange = PayloadRange { low: 0.0, high: 0.0 };

    pub fn new(low: f64, high: f64) -> Result<Self, RangeError> {
        if !low.is_finite() || !high.is_finite() || low < 0.0 || high < 0.0 {
            return Err(RangeError::OutOfDomain { low, high });
        }
        if low > high {
            return Err(RangeError::Inverted { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Inclusive at both ends.
    pub fn contains(&self, mass: f64) -> bool {
        self.low <= mass && mass <= self.high
    }
}

// ---------------------------------------------------------------------------
// Slider scale derived from the observed payload bounds
// ---------------------------------------------------------------------------

pub const SLIDER_STEP_KG: f64 = 1000.0;

/// Most tick labels drawn under the track.
pub const MAX_SLIDER_MARKS: usize = 11;

/// Track of the payload range control: whole steps around the observed data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderScale {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderScale {
    /// `[floor(min/step)*step, ceil(max/step)*step]`; a degenerate range is
    /// widened by one step so the track is never empty.
    pub fn from_bounds(min: f64, max: f64, step: f64) -> Self {
        let lo = (min / step).floor() * step;
        let mut hi = (max / step).ceil() * step;
        if hi <= lo {
            hi = lo + step;
        }
        Self { min: lo, max: hi, step }
    }

    /// Tick marks labelled like `"2000 Kg"`, every step on short tracks and
    /// every few steps on long ones, never more than [`MAX_SLIDER_MARKS`].
    pub fn marks(&self) -> Vec<(f64, String)> {
        let steps = ((self.max - self.min) / self.step).round() as usize;
        let stride = steps.div_ceil(MAX_SLIDER_MARKS - 1).max(1);
        (0..=steps / stride)
            .map(|i| {
                let v = self.min + (i * stride) as f64 * self.step;
                (v, format!("{v} Kg"))
            })
            .collect()
    }

    /// Clamp a requested range onto the track.
    pub fn clamp(&self, range: PayloadRange) -> PayloadRange {
        PayloadRange {
            low: range.low.clamp(self.min, self.max),
            high: range.high.clamp(self.min, self.max),
        }
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Keep the records launched from the selected site.
///
/// `All` hands back the input itself (borrowed, no copy). A site with no
/// records yields an empty result.
pub fn filter_by_site<'a>(
    records: &'a [LaunchRecord],
    selection: &SiteSelection,
) -> Cow<'a, [LaunchRecord]> {
    match selection {
        SiteSelection::All => Cow::Borrowed(records),
        SiteSelection::Site(site) => Cow::Owned(
            records
                .iter()
                .filter(|r| &r.launch_site == site)
                .cloned()
                .collect(),
        ),
    }
}

/// Keep the records whose payload lies within `range` (inclusive).
pub fn filter_by_payload_range(records: &[LaunchRecord], range: PayloadRange) -> Vec<LaunchRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.payload_mass_kg))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    fn sample() -> Vec<LaunchRecord> {
        vec![
            record("A", 500.0, "v1.0", 0),
            record("B", 2500.0, "FT", 1),
            record("A", 1000.0, "FT", 1),
            record("C", 7000.0, "B4", 0),
            record("A", 5000.0, "B5", 1),
            record("B", 0.0, "v1.1", 0),
        ]
    }

    #[test]
    fn all_sites_is_identity_without_copy() {
        let records = sample();
        let out = filter_by_site(&records, &SiteSelection::All);
        assert!(matches!(out, Cow::Borrowed(_)));
        assert!(std::ptr::eq(out.as_ref(), records.as_slice()));
        assert_eq!(out.as_ref(), records.as_slice());
    }

    #[test]
    fn site_filter_keeps_order() {
        let records = sample();
        let out = filter_by_site(&records, &SiteSelection::from("A"));
        assert!(out.iter().all(|r| r.launch_site == "A"));
        let masses: Vec<f64> = out.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(masses, [500.0, 1000.0, 5000.0]);
    }

    #[test]
    fn unknown_site_yields_empty() {
        let records = sample();
        assert!(filter_by_site(&records, &SiteSelection::from("Z")).is_empty());
    }

    #[test]
    fn payload_filter_is_inclusive() {
        let records = sample();
        let range = PayloadRange::new(1000.0, 5000.0).unwrap();
        let out = filter_by_payload_range(&records, range);
        let masses: Vec<f64> = out.iter().map(|r| r.payload_mass_kg).collect();
        assert_eq!(masses, [2500.0, 1000.0, 5000.0]);
    }

    #[test]
    fn payload_filter_scenario() {
        let records = vec![
            record("A", 500.0, "FT", 1),
            record("A", 2500.0, "FT", 1),
            record("A", 7000.0, "FT", 0),
        ];
        let out = filter_by_payload_range(&records, PayloadRange::new(1000.0, 5000.0).unwrap());
        assert_eq!(out, vec![record("A", 2500.0, "FT", 1)]);
    }

    #[test]
    fn filters_commute() {
        let records = sample();
        let selections = ["ALL", "A", "B", "C", "Z"].map(SiteSelection::from);
        let ranges = [(0.0, 10000.0), (500.0, 500.0), (1000.0, 5000.0), (6000.0, 9000.0)];

        for sel in &selections {
            for &(lo, hi) in &ranges {
                let range = PayloadRange::new(lo, hi).unwrap();
                let site_first = filter_by_payload_range(&filter_by_site(&records, sel), range);
                let by_range = filter_by_payload_range(&records, range);
                let range_first = filter_by_site(&by_range, sel);
                assert_eq!(site_first.as_slice(), range_first.as_ref(), "{sel} [{lo}, {hi}]");
            }
        }
    }

    #[test]
    fn range_rejects_bad_bounds() {
        assert_eq!(
            PayloadRange::new(5.0, 1.0),
            Err(RangeError::Inverted { low: 5.0, high: 1.0 })
        );
        assert!(matches!(
            PayloadRange::new(-1.0, 1.0),
            Err(RangeError::OutOfDomain { .. })
        ));
        assert!(PayloadRange::new(3.0, 3.0).is_ok());
    }

    #[test]
    fn selection_round_trips_sentinel() {
        assert_eq!(SiteSelection::from("ALL"), SiteSelection::All);
        assert_eq!(SiteSelection::All.to_string(), "ALL");
        assert_eq!(SiteSelection::All.label(), "All Sites");
        assert_eq!(SiteSelection::from("A").label(), "A");
    }

    #[test]
    fn slider_scale_snaps_to_whole_steps() {
        let scale = SliderScale::from_bounds(350.0, 9600.0, SLIDER_STEP_KG);
        assert_eq!(scale.min, 0.0);
        assert_eq!(scale.max, 10000.0);

        let marks = scale.marks();
        assert_eq!(marks.len(), 11);
        assert_eq!(marks[0].1, "0 Kg");
        assert_eq!(marks[3], (3000.0, "3000 Kg".to_string()));

        let flat = SliderScale::from_bounds(2000.0, 2000.0, SLIDER_STEP_KG);
        assert_eq!((flat.min, flat.max), (2000.0, 3000.0));
    }

    #[test]
    fn slider_marks_stay_bounded_on_long_tracks() {
        let scale = SliderScale::from_bounds(0.0, 1.0e9, SLIDER_STEP_KG);
        let marks = scale.marks();
        assert!(marks.len() <= MAX_SLIDER_MARKS, "{} marks", marks.len());
        assert_eq!(marks[0].0, 0.0);
        assert_eq!(marks[1], (1.0e8, "100000000 Kg".to_string()));
        assert_eq!(marks.last().map(|m| m.0), Some(1.0e9));

        let odd = SliderScale::from_bounds(0.0, 23000.0, SLIDER_STEP_KG).marks();
        assert!(odd.len() <= MAX_SLIDER_MARKS);
        assert!(odd.iter().all(|(v, _)| *v <= 23000.0));
    }

    #[test]
    fn slider_scale_clamps_requests() {
        let scale = SliderScale::from_bounds(0.0, 10000.0, SLIDER_STEP_KG);
        let clamped = scale.clamp(PayloadRange::new(0.0, 50000.0).unwrap());
        assert_eq!((clamped.low(), clamped.high()), (0.0, 10000.0));
    }
}
