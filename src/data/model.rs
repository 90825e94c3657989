use std::collections::BTreeSet;

use thiserror::Error;

use super::filter::SiteSelection;

// ---------------------------------------------------------------------------
// Column names as they appear in the source table
// ---------------------------------------------------------------------------

pub const LAUNCH_SITE: &str = "Launch Site";
pub const PAYLOAD_MASS: &str = "Payload Mass (kg)";
pub const BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const CLASS: &str = "class";

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the launch table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Always finite and non-negative.
    pub payload_mass_kg: f64,
    pub booster_version_category: String,
    /// 0 = failure, 1 = success.
    pub outcome_class: u8,
}

/// A row whose values violate the record invariants.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("empty launch site")]
    EmptySite,
    #[error("payload mass {0} is not a finite non-negative number")]
    InvalidPayload(f64),
    #[error("class must be 0 or 1, got {0}")]
    InvalidClass(i64),
}

impl LaunchRecord {
    /// Validate raw values and build a record.
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        booster_version_category: impl Into<String>,
        outcome_class: i64,
    ) -> Result<Self, RecordError> {
        let launch_site = launch_site.into();
        if launch_site.trim().is_empty() {
            return Err(RecordError::EmptySite);
        }
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(RecordError::InvalidPayload(payload_mass_kg));
        }
        let outcome_class = match outcome_class {
            0 => 0,
            1 => 1,
            other => return Err(RecordError::InvalidClass(other)),
        };
        Ok(Self {
            launch_site,
            payload_mass_kg,
            booster_version_category: booster_version_category.into(),
            outcome_class,
        })
    }

    pub fn is_success(&self) -> bool {
        self.outcome_class == 1
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// One entry of the launch-site dropdown.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteOption {
    pub label: String,
    pub value: SiteSelection,
}

/// The full parsed table with pre-computed lookups. Read-only after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    records: Vec<LaunchRecord>,
    /// Distinct sites in order of first appearance.
    sites: Vec<String>,
    /// Sorted distinct booster categories.
    booster_categories: BTreeSet<String>,
    /// Observed (min, max) payload mass; `None` when empty.
    payload_bounds: Option<(f64, f64)>,
}

impl Dataset {
    /// Build lookups from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            if !sites.contains(&rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            booster_categories.insert(rec.booster_version_category.clone());
            let m = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((lo, hi)) => (lo.min(m), hi.max(m)),
                None => (m, m),
            });
        }

        Dataset {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn booster_categories(&self) -> &BTreeSet<String> {
        &self.booster_categories
    }

    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        self.payload_bounds
    }

    pub fn contains_site(&self, site: &str) -> bool {
        self.sites.iter().any(|s| s == site)
    }

    /// Dropdown options: "All Sites" followed by each site in table order.
    pub fn site_options(&self) -> Vec<SiteOption> {
        std::iter::once(SiteOption {
            label: "All Sites".to_string(),
            value: SiteSelection::All,
        })
        .chain(self.sites.iter().map(|s| SiteOption {
            label: s.clone(),
            value: SiteSelection::Site(s.clone()),
        }))
        .collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(site: &str, payload: f64, booster: &str, class: i64) -> LaunchRecord {
    LaunchRecord::new(site, payload, booster, class).expect("valid test record")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            LaunchRecord::new("A", 10.0, "v1.0", 2),
            Err(RecordError::InvalidClass(2))
        );
        assert_eq!(
            LaunchRecord::new("A", -1.0, "v1.0", 1),
            Err(RecordError::InvalidPayload(-1.0))
        );
        assert!(matches!(
            LaunchRecord::new("A", f64::NAN, "v1.0", 1),
            Err(RecordError::InvalidPayload(_))
        ));
        assert_eq!(
            LaunchRecord::new("  ", 10.0, "v1.0", 1),
            Err(RecordError::EmptySite)
        );
    }

    #[test]
    fn lookups_follow_table_order() {
        let ds = Dataset::from_records(vec![
            record("KSC LC-39A", 2500.0, "FT", 1),
            record("CCAFS LC-40", 500.0, "v1.0", 0),
            record("KSC LC-39A", 7000.0, "B4", 1),
        ]);

        assert_eq!(ds.sites(), ["KSC LC-39A", "CCAFS LC-40"]);
        assert_eq!(ds.payload_bounds(), Some((500.0, 7000.0)));
        assert_eq!(ds.booster_categories().len(), 3);
        assert!(ds.contains_site("CCAFS LC-40"));
        assert!(!ds.contains_site("VAFB SLC-4E"));

        let options = ds.site_options();
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].label, "All Sites");
        assert_eq!(options[0].value, SiteSelection::All);
        assert_eq!(options[2].value, SiteSelection::Site("CCAFS LC-40".into()));
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds(), None);
        assert_eq!(ds.site_options().len(), 1);
    }
}
