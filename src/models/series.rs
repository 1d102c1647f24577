use serde::{Deserialize, Serialize};

/// A single observation: adoption share at a point in time.
///
/// Years are real-valued; a mid-year observation like `2025.5` is legal.
/// Shares are fractions in `[0, 1]`, not percentages.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub year: f64,
    pub share: f64,
}

/// One entity's adoption time series, samples sorted by year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionSeries {
    /// Entity name (country, region, or group)
    pub entity: String,
    /// Optional short code (e.g. ISO country code)
    pub code: Option<String>,
    pub samples: Vec<Sample>,
}

impl AdoptionSeries {
    /// Create a new empty series for an entity.
    pub fn new(entity: impl Into<String>) -> Self {
        Self {
            entity: entity.into(),
            code: None,
            samples: Vec::new(),
        }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Largest observed share, or `None` for an empty series.
    pub fn max_share(&self) -> Option<f64> {
        self.samples
            .iter()
            .map(|s| s.share)
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }

    /// (min year, max year) over the observations, or `None` if empty.
    pub fn year_range(&self) -> Option<(f64, f64)> {
        let first = self.samples.first()?;
        let mut lo = first.year;
        let mut hi = first.year;
        for s in &self.samples {
            lo = lo.min(s.year);
            hi = hi.max(s.year);
        }
        Some((lo, hi))
    }

    /// Sort observations by year, keeping the sort stable for ties.
    pub fn sort_by_year(&mut self) {
        self.samples
            .sort_by(|a, b| a.year.partial_cmp(&b.year).unwrap_or(std::cmp::Ordering::Equal));
    }
}

/// A complete adoption dataset: one series per entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionDataset {
    /// Name or identifier for this dataset
    pub name: String,
    /// Per-entity series, sorted by entity name
    pub series: Vec<AdoptionSeries>,
}

impl AdoptionDataset {
    /// Create a new empty dataset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            series: Vec::new(),
        }
    }

    /// Number of entities.
    pub fn num_entities(&self) -> usize {
        self.series.len()
    }

    /// Total number of observations across all entities.
    pub fn num_samples(&self) -> usize {
        self.series.iter().map(|s| s.samples.len()).sum()
    }

    /// Look up one entity's series by name.
    pub fn entity(&self, name: &str) -> Option<&AdoptionSeries> {
        self.series.iter().find(|s| s.entity == name)
    }

    /// All entity names, in dataset order.
    pub fn entity_names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.entity.as_str()).collect()
    }

    /// (min year, max year) across every series, or `None` for an empty dataset.
    pub fn year_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for s in &self.series {
            if let Some((lo, hi)) = s.year_range() {
                range = Some(match range {
                    Some((a, b)) => (a.min(lo), b.max(hi)),
                    None => (lo, hi),
                });
            }
        }
        range
    }

    /// Sort series by entity name and each series by year.
    pub fn normalize_order(&mut self) {
        for s in &mut self.series {
            s.sort_by_year();
        }
        self.series.sort_by(|a, b| a.entity.cmp(&b.entity));
    }
}
