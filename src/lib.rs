pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

pub use analysis::{CurveFitter, LogisticParams};
pub use config::AnalysisConfig;
pub use error::AdoptionError;
pub use io::{DatasetReader, DatasetWriter};
pub use models::{AdoptionDataset, AdoptionSeries, PolicyTimeline, Sample};
