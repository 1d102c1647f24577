use nalgebra::{Cholesky, Matrix3, Vector3};

use crate::analysis::logistic::{sigmoid, LogisticParams};
use crate::error::AdoptionError;
use crate::models::Sample;

/// Default initial growth-rate guess, a moderate positive slope.
pub const DEFAULT_INITIAL_GROWTH_RATE: f64 = 0.4;

/// Optional box constraints on the fitted parameters.
///
/// The default fit is unconstrained; bounds exist for callers that want to
/// keep a pathological series from wandering (e.g. cap `L` at 1.05).
#[derive(Debug, Clone, Copy)]
pub struct ParameterBounds {
    pub l: (f64, f64),
    pub k: (f64, f64),
    pub t0: (f64, f64),
}

impl ParameterBounds {
    fn clamp(&self, p: LogisticParams) -> LogisticParams {
        LogisticParams {
            l: p.l.clamp(self.l.0, self.l.1),
            k: p.k.clamp(self.k.0, self.k.1),
            t0: p.t0.clamp(self.t0.0, self.t0.1),
        }
    }
}

/// Options controlling the nonlinear least-squares fit.
#[derive(Debug, Clone)]
pub struct FitOptions {
    /// Outer iteration budget for the optimizer.
    pub max_iterations: usize,
    /// Relative residual-improvement threshold treated as convergence.
    pub tolerance: f64,
    /// Initial guess for the growth rate `k`.
    pub initial_growth_rate: f64,
    /// Optional box constraints; `None` (the default) leaves the fit
    /// unconstrained.
    pub bounds: Option<ParameterBounds>,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-12,
            initial_growth_rate: DEFAULT_INITIAL_GROWTH_RATE,
            bounds: None,
        }
    }
}

/// Nonlinear least-squares fitter for the logistic growth model.
///
/// Levenberg–Marquardt with an analytic Jacobian: each iteration solves the
/// damped normal equations `(JᵀJ + λ·diag(JᵀJ)) δ = -Jᵀr` and accepts the
/// step only when the residual shrinks, raising the damping otherwise.
/// The start point is derived deterministically from the data, so fitting
/// identical input twice yields identical parameters.
#[derive(Debug, Clone, Default)]
pub struct CurveFitter {
    options: FitOptions,
}

const LAMBDA_INIT: f64 = 1e-3;
const LAMBDA_MIN: f64 = 1e-12;
const GRADIENT_TOL: f64 = 1e-12;
const STEP_TOL: f64 = 1e-10;
const MAX_DAMPING_RETRIES: usize = 20;

impl CurveFitter {
    pub fn new(options: FitOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FitOptions {
        &self.options
    }

    /// Initial parameter guess, derived from the data:
    /// `L0 = min(1.0, 1.05 * max share)`, `k0` a fixed moderate constant,
    /// `t0` the median observed year.
    pub fn initial_guess(&self, samples: &[Sample]) -> Result<LogisticParams, AdoptionError> {
        if samples.is_empty() {
            return Err(AdoptionError::InsufficientData(
                "cannot fit an empty series".to_string(),
            ));
        }
        let max_share = samples.iter().map(|s| s.share).fold(f64::MIN, f64::max);
        Ok(LogisticParams {
            l: (max_share * 1.05).min(1.0),
            k: self.options.initial_growth_rate,
            t0: median(samples.iter().map(|s| s.year).collect()),
        })
    }

    /// Fit the logistic model to one entity's samples.
    ///
    /// Fails with [`AdoptionError::NoConvergence`] when the iteration budget
    /// runs out before the residual stabilizes. That outcome is recoverable;
    /// batch callers skip the entity and keep going.
    pub fn fit(&self, samples: &[Sample]) -> Result<LogisticParams, AdoptionError> {
        let mut params = self.initial_guess(samples)?;
        if let Some(bounds) = self.options.bounds {
            params = bounds.clamp(params);
        }

        let mut lambda = LAMBDA_INIT;
        let mut current_sse = sum_squared_residuals(samples, &params);

        for _ in 0..self.options.max_iterations {
            let (jtj, jtr) = normal_equations(samples, &params);

            if jtr.amax() < GRADIENT_TOL {
                return Ok(params);
            }

            let mut stepped = false;
            for _ in 0..MAX_DAMPING_RETRIES {
                let mut damped = jtj;
                for i in 0..3 {
                    damped[(i, i)] += lambda * (jtj[(i, i)] + LAMBDA_MIN);
                }

                let delta = match Cholesky::new(damped) {
                    Some(chol) => chol.solve(&(-jtr)),
                    None => {
                        lambda *= 10.0;
                        continue;
                    }
                };

                let mut candidate = LogisticParams {
                    l: params.l + delta.x,
                    k: params.k + delta.y,
                    t0: params.t0 + delta.z,
                };
                if let Some(bounds) = self.options.bounds {
                    candidate = bounds.clamp(candidate);
                }

                let candidate_sse = sum_squared_residuals(samples, &candidate);
                if candidate_sse.is_finite() && candidate_sse <= current_sse {
                    let improvement =
                        (current_sse - candidate_sse) / current_sse.max(f64::MIN_POSITIVE);
                    params = candidate;
                    current_sse = candidate_sse;
                    lambda = (lambda * 0.5).max(LAMBDA_MIN);
                    stepped = true;

                    if improvement < self.options.tolerance || delta.amax() < STEP_TOL {
                        return Ok(params);
                    }
                    break;
                }
                lambda *= 10.0;
            }

            if !stepped {
                return Err(AdoptionError::NoConvergence(format!(
                    "residual stuck at {current_sse:.3e} with damping exhausted"
                )));
            }
        }

        Err(AdoptionError::NoConvergence(format!(
            "no stable fit after {} iterations",
            self.options.max_iterations
        )))
    }
}

/// Sum of squared residuals of the model against the observations.
pub(crate) fn sum_squared_residuals(samples: &[Sample], params: &LogisticParams) -> f64 {
    samples
        .iter()
        .map(|s| {
            let r = params.value_at(s.year) - s.share;
            r * r
        })
        .sum()
}

/// Gradient of the model with respect to (L, k, t0) at time `t`.
fn jacobian_row(params: &LogisticParams, t: f64) -> Vector3<f64> {
    let s = sigmoid(params.k * (t - params.t0));
    let bell = params.l * s * (1.0 - s);
    Vector3::new(s, bell * (t - params.t0), -bell * params.k)
}

/// Build `JᵀJ` and `Jᵀr` for the current parameters.
pub(crate) fn normal_equations(
    samples: &[Sample],
    params: &LogisticParams,
) -> (Matrix3<f64>, Vector3<f64>) {
    let mut jtj = Matrix3::zeros();
    let mut jtr = Vector3::zeros();
    for s in samples {
        let row = jacobian_row(params, s.year);
        let residual = params.value_at(s.year) - s.share;
        jtj += row * row.transpose();
        jtr += row * residual;
    }
    (jtj, jtr)
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let n = values.len();
    if n % 2 == 1 {
        values[n / 2]
    } else {
        0.5 * (values[n / 2 - 1] + values[n / 2])
    }
}
