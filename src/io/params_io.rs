use std::path::Path;

use crate::analysis::BatchFitResult;
use crate::error::AdoptionError;

/// Write fitted parameters to a CSV file, one row per converged entity,
/// columns `entity,L,k,t0`.
///
/// Entities whose fit did not converge are simply absent; that exclusion is
/// the documented batch policy, not an error state.
pub fn write_params_csv(
    result: &BatchFitResult,
    path: impl AsRef<Path>,
) -> Result<(), AdoptionError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    wtr.write_record(["entity", "L", "k", "t0"])?;

    for fit in &result.fits {
        wtr.write_record([
            fit.entity.clone(),
            fit.params.l.to_string(),
            fit.params.k.to_string(),
            fit.params.t0.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the full fit report (parameters, diagnostics, skipped entities)
/// to a JSON file.
pub fn write_params_json(
    result: &BatchFitResult,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), AdoptionError> {
    let content = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{fit_dataset, BatchFitResult, CurveFitter};
    use crate::models::{AdoptionDataset, AdoptionSeries, Sample};

    fn fitted_batch() -> BatchFitResult {
        let mut ds = AdoptionDataset::new("t");
        let mut s = AdoptionSeries::new("Norway");
        s.samples = vec![
            Sample { year: 2015.0, share: 0.01 },
            Sample { year: 2017.0, share: 0.05 },
            Sample { year: 2019.0, share: 0.15 },
            Sample { year: 2021.0, share: 0.40 },
            Sample { year: 2023.0, share: 0.70 },
            Sample { year: 2025.0, share: 0.85 },
        ];
        ds.series.push(s);
        ds.series.push(AdoptionSeries::new("Atlantis"));
        fit_dataset(&ds, &CurveFitter::default(), 0.95)
    }

    #[test]
    fn test_csv_has_spec_columns_and_excludes_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.csv");

        let result = fitted_batch();
        write_params_csv(&result, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next().unwrap(), "entity,L,k,t0");
        assert!(lines.next().unwrap().starts_with("Norway,"));
        assert!(!content.contains("Atlantis"));
    }

    #[test]
    fn test_json_report_includes_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");

        let result = fitted_batch();
        write_params_json(&result, &path, true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["fits"][0]["entity"], "Norway");
        assert!(parsed["fits"][0]["params"]["L"].is_number());
        assert_eq!(parsed["skipped"][0]["entity"], "Atlantis");
    }

    #[test]
    fn test_empty_batch_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        let result = BatchFitResult {
            fits: vec![],
            skipped: vec![],
        };
        write_params_csv(&result, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "entity,L,k,t0");
    }
}
