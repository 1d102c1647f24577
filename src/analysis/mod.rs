mod batch;
mod diagnostics;
mod fit;
mod logistic;
mod projection;

pub use batch::{fit_dataset, BatchFitResult, EntityFit, SkippedEntity};
pub use diagnostics::{FitDiagnostics, ParameterEstimate, ParameterIntervals};
pub use fit::{CurveFitter, FitOptions, ParameterBounds, DEFAULT_INITIAL_GROWTH_RATE};
pub use logistic::LogisticParams;
pub use projection::{project, ProjectionPoint};
