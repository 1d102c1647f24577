use serde::{Deserialize, Serialize};

use crate::analysis::logistic::LogisticParams;

/// One projected point: predicted adoption share at a year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year: f64,
    pub share: f64,
}

/// Evaluate the fitted curve at unit year steps over `[start, horizon]`,
/// both endpoints included.
///
/// Pure and deterministic. `start` is normally the first observed year and
/// `horizon` the configured prediction year; a horizon before the start
/// yields an empty projection.
pub fn project(params: &LogisticParams, start: f64, horizon: f64) -> Vec<ProjectionPoint> {
    let mut points = Vec::new();
    let mut year = start;
    while year <= horizon + 1e-9 {
        points.push(ProjectionPoint {
            year,
            share: params.value_at(year),
        });
        year += 1.0;
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> LogisticParams {
        LogisticParams {
            l: 0.9,
            k: 0.5,
            t0: 2020.0,
        }
    }

    #[test]
    fn test_projection_spans_inclusive_range() {
        let points = project(&params(), 2015.0, 2030.0);
        assert_eq!(points.len(), 16);
        assert_eq!(points.first().unwrap().year, 2015.0);
        assert_eq!(points.last().unwrap().year, 2030.0);
    }

    #[test]
    fn test_projection_single_year() {
        let points = project(&params(), 2020.0, 2020.0);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].share, 0.45);
    }

    #[test]
    fn test_projection_empty_when_horizon_before_start() {
        assert!(project(&params(), 2030.0, 2020.0).is_empty());
    }

    #[test]
    fn test_projection_values_match_model() {
        let p = params();
        for point in project(&p, 2010.0, 2035.0) {
            assert_eq!(point.share, p.value_at(point.year));
        }
    }

    #[test]
    fn test_projection_monotone_for_positive_growth() {
        let points = project(&params(), 2000.0, 2040.0);
        for pair in points.windows(2) {
            assert!(pair[1].share >= pair[0].share);
        }
    }

    #[test]
    fn test_fractional_start_keeps_unit_steps() {
        let points = project(&params(), 2015.5, 2018.0);
        let years: Vec<f64> = points.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![2015.5, 2016.5, 2017.5]);
    }
}
