use serde::{Deserialize, Serialize};

use crate::error::AdoptionError;

/// Cumulative days before each month in a 365-day year.
const MONTH_OFFSETS: [u32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// A point-in-time policy event for one region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyEvent {
    pub region: String,
    pub label: String,
    /// Fractional year (e.g. 2025.54 for 2025-07-15)
    pub date: f64,
}

/// A policy in force over a duration, for one region.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyBand {
    pub region: String,
    pub label: String,
    pub start: f64,
    pub end: f64,
}

/// A multi-region policy timeline: point events plus duration bands.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolicyTimeline {
    pub events: Vec<PolicyEvent>,
    pub bands: Vec<PolicyBand>,
}

impl PolicyTimeline {
    /// Region names in first-appearance order across bands and events.
    pub fn regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = Vec::new();
        let all = self
            .bands
            .iter()
            .map(|b| b.region.as_str())
            .chain(self.events.iter().map(|e| e.region.as_str()));
        for r in all {
            if !regions.contains(&r) {
                regions.push(r);
            }
        }
        regions
    }

    /// (min year, max year) across all items, or `None` when empty.
    pub fn year_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        let mut extend = |lo: f64, hi: f64| {
            range = Some(match range {
                Some((a, b)) => (a.min(lo), b.max(hi)),
                None => (lo, hi),
            });
        };
        for b in &self.bands {
            extend(b.start, b.end);
        }
        for e in &self.events {
            extend(e.date, e.date);
        }
        range
    }

    /// True when the timeline has no bands and no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.bands.is_empty()
    }
}

/// Parse a policy date into a fractional year.
///
/// Accepts a bare year (`"1990"`) or an ISO date (`"2025-07-15"`). Day
/// precision uses a fixed 365-day year; leap days are not significant at
/// timeline resolution.
pub fn parse_policy_date(text: &str) -> Result<f64, AdoptionError> {
    let text = text.trim();
    let mut parts = text.splitn(3, '-');

    let year: i32 = parts
        .next()
        .unwrap_or("")
        .parse()
        .map_err(|_| AdoptionError::ParseError(format!("invalid date '{text}'")))?;

    let month = match parts.next() {
        Some(m) => m
            .parse::<u32>()
            .ok()
            .filter(|m| (1..=12).contains(m))
            .ok_or_else(|| AdoptionError::ParseError(format!("invalid month in '{text}'")))?,
        None => return Ok(year as f64),
    };
    let day = match parts.next() {
        Some(d) => d
            .parse::<u32>()
            .ok()
            .filter(|d| (1..=31).contains(d))
            .ok_or_else(|| AdoptionError::ParseError(format!("invalid day in '{text}'")))?,
        None => 1,
    };

    let day_of_year = MONTH_OFFSETS[(month - 1) as usize] + day - 1;
    Ok(year as f64 + day_of_year as f64 / 365.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_parse_bare_year() {
        assert_eq!(parse_policy_date("1990").unwrap(), 1990.0);
        assert_eq!(parse_policy_date(" 2016 ").unwrap(), 2016.0);
    }

    #[test]
    fn test_parse_january_first() {
        assert_eq!(parse_policy_date("2023-01-01").unwrap(), 2023.0);
    }

    #[test]
    fn test_parse_mid_year() {
        // 2025-07-15 is day 195 of a 365-day year
        assert_approx_eq!(parse_policy_date("2025-07-15").unwrap(), 2025.0 + 195.0 / 365.0, 1e-9);
    }

    #[test]
    fn test_parse_year_month() {
        assert_approx_eq!(parse_policy_date("2025-09").unwrap(), 2025.0 + 243.0 / 365.0, 1e-9);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_policy_date("soon").is_err());
        assert!(parse_policy_date("2025-13-01").is_err());
        assert!(parse_policy_date("2025-02-40").is_err());
    }

    #[test]
    fn test_regions_first_appearance_order() {
        let tl = PolicyTimeline {
            bands: vec![PolicyBand {
                region: "Norway".to_string(),
                label: "VAT exemption".to_string(),
                start: 2001.0,
                end: 2022.0,
            }],
            events: vec![
                PolicyEvent {
                    region: "China".to_string(),
                    label: "NEV subsidy starts".to_string(),
                    date: 2009.0,
                },
                PolicyEvent {
                    region: "Norway".to_string(),
                    label: "Bus lane access".to_string(),
                    date: 2003.0,
                },
            ],
        };
        assert_eq!(tl.regions(), vec!["Norway", "China"]);
    }

    #[test]
    fn test_year_range_spans_bands_and_events() {
        let tl = PolicyTimeline {
            bands: vec![PolicyBand {
                region: "EU".to_string(),
                label: "CO2 fleet targets".to_string(),
                start: 2019.0,
                end: 2030.0,
            }],
            events: vec![PolicyEvent {
                region: "Norway".to_string(),
                label: "Purchase tax exemption".to_string(),
                date: 1990.0,
            }],
        };
        assert_eq!(tl.year_range(), Some((1990.0, 2030.0)));
    }

    #[test]
    fn test_empty_timeline() {
        let tl = PolicyTimeline::default();
        assert!(tl.is_empty());
        assert!(tl.year_range().is_none());
        assert!(tl.regions().is_empty());
    }
}
