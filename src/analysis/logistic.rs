use serde::{Deserialize, Serialize};

/// Fitted parameters of the logistic growth model
/// `f(t) = L / (1 + exp(-k * (t - t0)))`.
///
/// A pure output value: produced once per entity by the fitter and
/// immutable afterwards. `L` is the upper asymptote (for adoption shares it
/// should land near or below 1.0), `k` the growth rate, and `t0` the
/// inflection year. Out-of-range values are a legitimate fit outcome, not
/// an error; nothing here enforces bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogisticParams {
    #[serde(rename = "L")]
    pub l: f64,
    pub k: f64,
    pub t0: f64,
}

impl LogisticParams {
    /// Evaluate the fitted curve at time `t`.
    ///
    /// Uses the numerically stable sigmoid form: `exp` of a large negative
    /// argument underflows toward zero, which is exactly the asymptotic
    /// behavior the model wants.
    pub fn value_at(&self, t: f64) -> f64 {
        self.l * sigmoid(self.k * (t - self.t0))
    }
}

/// Standard logistic sigmoid, evaluated without overflow on either tail.
pub(crate) fn sigmoid(z: f64) -> f64 {
    if z >= 0.0 {
        1.0 / (1.0 + (-z).exp())
    } else {
        let e = z.exp();
        e / (1.0 + e)
    }
}
