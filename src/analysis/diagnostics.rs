use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::analysis::fit::{normal_equations, sum_squared_residuals};
use crate::analysis::logistic::LogisticParams;
use crate::error::AdoptionError;
use crate::models::Sample;

/// A fitted parameter with its standard error and confidence interval.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParameterEstimate {
    pub estimate: f64,
    pub std_error: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Student-t confidence intervals for the three logistic parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterIntervals {
    pub confidence_level: f64,
    pub l: ParameterEstimate,
    pub k: ParameterEstimate,
    pub t0: ParameterEstimate,
}

/// Goodness-of-fit summary for one entity's fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitDiagnostics {
    pub sample_size: usize,
    pub rmse: f64,
    pub r_squared: f64,
    /// Present when the series has at least 4 observations and the
    /// Gauss-Newton covariance is well conditioned.
    pub intervals: Option<ParameterIntervals>,
}

impl FitDiagnostics {
    /// Compute fit diagnostics at a given confidence level (e.g. 0.95).
    ///
    /// Standard errors come from the Gauss-Newton covariance
    /// `s^2 (J'J)^-1` with `s^2 = SSE / (n - 3)`; intervals use a
    /// Student-t quantile with `n - 3` degrees of freedom.
    pub fn compute(
        samples: &[Sample],
        params: &LogisticParams,
        confidence: f64,
    ) -> Result<Self, AdoptionError> {
        let n = samples.len();
        if n == 0 {
            return Err(AdoptionError::InsufficientData(
                "no samples to diagnose".to_string(),
            ));
        }

        let sse = sum_squared_residuals(samples, params);
        let rmse = (sse / n as f64).sqrt();

        let mean_share = samples.iter().map(|s| s.share).sum::<f64>() / n as f64;
        let tss: f64 = samples
            .iter()
            .map(|s| (s.share - mean_share).powi(2))
            .sum();
        let r_squared = if tss > f64::EPSILON {
            1.0 - sse / tss
        } else {
            0.0
        };

        let intervals = if n >= 4 {
            compute_intervals(samples, params, sse, confidence)?
        } else {
            None
        };

        Ok(FitDiagnostics {
            sample_size: n,
            rmse,
            r_squared,
            intervals,
        })
    }
}

fn compute_intervals(
    samples: &[Sample],
    params: &LogisticParams,
    sse: f64,
    confidence: f64,
) -> Result<Option<ParameterIntervals>, AdoptionError> {
    let n = samples.len();
    let df = (n - 3) as f64;
    let variance = sse / df;

    let (jtj, _) = normal_equations(samples, params);
    let covariance = match jtj.try_inverse() {
        Some(inv) => inv * variance,
        None => return Ok(None),
    };

    let alpha = 1.0 - confidence;
    let t_dist = StudentsT::new(0.0, 1.0, df)
        .map_err(|e| AdoptionError::AnalysisError(e.to_string()))?;
    let t_value = t_dist.inverse_cdf(1.0 - alpha / 2.0);

    let estimate = |value: f64, var: f64| {
        let std_error = var.max(0.0).sqrt();
        let margin = t_value * std_error;
        ParameterEstimate {
            estimate: value,
            std_error,
            lower: value - margin,
            upper: value + margin,
        }
    };

    Ok(Some(ParameterIntervals {
        confidence_level: confidence,
        l: estimate(params.l, covariance[(0, 0)]),
        k: estimate(params.k, covariance[(1, 1)]),
        t0: estimate(params.t0, covariance[(2, 2)]),
    }))
}
