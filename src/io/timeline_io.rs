use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::error::AdoptionError;
use crate::models::{parse_policy_date, PolicyBand, PolicyEvent, PolicyTimeline};

/// CSV row structure for policy timeline data.
///
/// `kind` is `event` (uses `start` as the date) or `band` (uses `start`
/// and `end`); dates are `YYYY` or `YYYY-MM-DD`.
#[derive(Debug, Deserialize)]
struct PolicyRow {
    region: String,
    policy: String,
    kind: String,
    start: String,
    end: Option<String>,
}

fn parse_timeline_records<R: Read>(
    rdr: &mut csv::Reader<R>,
) -> Result<PolicyTimeline, AdoptionError> {
    let mut timeline = PolicyTimeline::default();

    for result in rdr.deserialize() {
        let row: PolicyRow = result?;
        match row.kind.trim().to_lowercase().as_str() {
            "event" => timeline.events.push(PolicyEvent {
                region: row.region,
                label: row.policy,
                date: parse_policy_date(&row.start)?,
            }),
            "band" => {
                let end = row.end.as_deref().filter(|e| !e.trim().is_empty()).ok_or_else(
                    || {
                        AdoptionError::ParseError(format!(
                            "band '{}' for {} has no end date",
                            row.policy, row.region
                        ))
                    },
                )?;
                timeline.bands.push(PolicyBand {
                    region: row.region,
                    label: row.policy,
                    start: parse_policy_date(&row.start)?,
                    end: parse_policy_date(end)?,
                });
            }
            other => {
                return Err(AdoptionError::ParseError(format!(
                    "unknown policy kind '{other}' (expected event or band)"
                )))
            }
        }
    }

    Ok(timeline)
}

/// Read a policy timeline from a CSV file
/// (`region,policy,kind,start,end`).
pub fn read_timeline_csv(path: impl AsRef<Path>) -> Result<PolicyTimeline, AdoptionError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;
    parse_timeline_records(&mut rdr)
}

/// Read a policy timeline from CSV bytes.
pub fn read_timeline_from_bytes(data: &[u8]) -> Result<PolicyTimeline, AdoptionError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);
    parse_timeline_records(&mut rdr)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POLICY_CSV: &str = "\
region,policy,kind,start,end
Norway,Import/purchase tax exemption,event,1990,
Norway,VAT exemption,band,2001-01-01,2022-12-31
EU,CO2 fleet targets,band,2019-01-01,2030-12-31
US,IRA EV tax credit starts,event,2023-01-01,
";

    #[test]
    fn test_read_events_and_bands() {
        let tl = read_timeline_from_bytes(POLICY_CSV.as_bytes()).unwrap();
        assert_eq!(tl.events.len(), 2);
        assert_eq!(tl.bands.len(), 2);
        assert_eq!(tl.events[0].region, "Norway");
        assert_eq!(tl.events[0].date, 1990.0);
        assert_eq!(tl.bands[0].label, "VAT exemption");
        assert!(tl.bands[0].start >= 2001.0 && tl.bands[0].start < 2001.01);
    }

    #[test]
    fn test_regions_cover_both_kinds() {
        let tl = read_timeline_from_bytes(POLICY_CSV.as_bytes()).unwrap();
        let regions = tl.regions();
        assert!(regions.contains(&"Norway"));
        assert!(regions.contains(&"EU"));
        assert!(regions.contains(&"US"));
    }

    #[test]
    fn test_band_without_end_is_error() {
        let csv = "region,policy,kind,start,end\nNorway,VAT exemption,band,2001,\n";
        let err = read_timeline_from_bytes(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("no end date"));
    }

    #[test]
    fn test_unknown_kind_is_error() {
        let csv = "region,policy,kind,start,end\nNorway,VAT exemption,window,2001,2022\n";
        let err = read_timeline_from_bytes(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("unknown policy kind"));
    }

    #[test]
    fn test_kind_is_case_insensitive() {
        let csv = "region,policy,kind,start,end\nNorway,Bus lane access,EVENT,2003,\n";
        let tl = read_timeline_from_bytes(csv.as_bytes()).unwrap();
        assert_eq!(tl.events.len(), 1);
    }
}
