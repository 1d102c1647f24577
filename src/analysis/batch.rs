use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analysis::diagnostics::FitDiagnostics;
use crate::analysis::fit::CurveFitter;
use crate::analysis::logistic::LogisticParams;
use crate::models::AdoptionDataset;

/// A successful fit for one entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityFit {
    pub entity: String,
    pub code: Option<String>,
    pub params: LogisticParams,
    pub diagnostics: FitDiagnostics,
}

/// An entity excluded from the output, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedEntity {
    pub entity: String,
    pub reason: String,
}

/// Result of fitting a whole dataset: converged fits plus skipped entities.
///
/// Skipped entities are absent from the parameter artifact; the `skipped`
/// list exists so callers can surface the exclusions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFitResult {
    pub fits: Vec<EntityFit>,
    pub skipped: Vec<SkippedEntity>,
}

impl BatchFitResult {
    /// Look up one entity's fit.
    pub fn fit_for(&self, entity: &str) -> Option<&EntityFit> {
        self.fits.iter().find(|f| f.entity == entity)
    }
}

/// Fit every entity in the dataset independently.
///
/// Each fit is a stateless computation; a non-convergent or empty entity is
/// skipped and the batch continues. Nothing here aborts the whole run.
pub fn fit_dataset(
    dataset: &AdoptionDataset,
    fitter: &CurveFitter,
    confidence: f64,
) -> BatchFitResult {
    let mut fits = Vec::new();
    let mut skipped = Vec::new();

    for series in &dataset.series {
        if series.is_empty() {
            warn!(entity = %series.entity, "skipping entity with no usable samples");
            skipped.push(SkippedEntity {
                entity: series.entity.clone(),
                reason: "no usable samples".to_string(),
            });
            continue;
        }

        let params = match fitter.fit(&series.samples) {
            Ok(p) => p,
            Err(e) => {
                warn!(entity = %series.entity, error = %e, "skipping entity");
                skipped.push(SkippedEntity {
                    entity: series.entity.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let diagnostics = match FitDiagnostics::compute(&series.samples, &params, confidence) {
            Ok(d) => d,
            Err(e) => {
                warn!(entity = %series.entity, error = %e, "skipping entity");
                skipped.push(SkippedEntity {
                    entity: series.entity.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        debug!(
            entity = %series.entity,
            l = params.l,
            k = params.k,
            t0 = params.t0,
            rmse = diagnostics.rmse,
            "fitted entity"
        );
        fits.push(EntityFit {
            entity: series.entity.clone(),
            code: series.code.clone(),
            params,
            diagnostics,
        });
    }

    BatchFitResult { fits, skipped }
}
