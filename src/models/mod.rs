mod series;
mod timeline;

pub use series::{AdoptionDataset, AdoptionSeries, Sample};
pub use timeline::{parse_policy_date, PolicyBand, PolicyEvent, PolicyTimeline};
