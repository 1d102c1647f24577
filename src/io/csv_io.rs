use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::error::AdoptionError;
use crate::models::{AdoptionDataset, AdoptionSeries, Sample};

/// Options for reading an adoption-share CSV.
#[derive(Debug, Clone, Default)]
pub struct CsvReadOptions {
    /// Explicit share column name; when unset the column is discovered
    /// from the headers.
    pub share_column: Option<String>,
}

/// Normalize a header the way the source data expects:
/// trim, lowercase, spaces to underscores.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// True when a column under this header holds percentages rather than
/// fractions.
fn is_percent_header(header: &str) -> bool {
    header.contains('%') || header.contains("percent") || header.contains("pct")
}

struct ColumnMap {
    entity: usize,
    code: Option<usize>,
    year: usize,
    share: usize,
    share_is_percent: bool,
}

fn resolve_columns(headers: &[String], opts: &CsvReadOptions) -> Result<ColumnMap, AdoptionError> {
    let find = |name: &str| headers.iter().position(|h| h == name);

    let entity = ["entity", "country", "region"]
        .into_iter()
        .find_map(|n| find(n))
        .ok_or_else(|| {
            AdoptionError::SchemaError(format!(
                "no entity column (expected one of entity/country/region) in {headers:?}"
            ))
        })?;

    let year = find("year").ok_or_else(|| {
        AdoptionError::SchemaError(format!("no year column in {headers:?}"))
    })?;

    let share = match &opts.share_column {
        Some(name) => {
            let wanted = normalize_header(name);
            find(&wanted).ok_or_else(|| {
                AdoptionError::SchemaError(format!(
                    "configured share column '{name}' not found in {headers:?}"
                ))
            })?
        }
        None => find("share")
            .or_else(|| {
                headers
                    .iter()
                    .position(|h| h.contains("share") || h.contains('%'))
            })
            .ok_or_else(|| {
                AdoptionError::SchemaError(format!("no share column in {headers:?}"))
            })?,
    };

    Ok(ColumnMap {
        entity,
        code: find("code"),
        year,
        share,
        share_is_percent: is_percent_header(&headers[share]),
    })
}

fn parse_csv_records<R: Read>(
    rdr: &mut csv::Reader<R>,
    name: &str,
    opts: &CsvReadOptions,
) -> Result<AdoptionDataset, AdoptionError> {
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    let columns = resolve_columns(&headers, opts)?;

    let mut by_entity: BTreeMap<String, AdoptionSeries> = BTreeMap::new();
    let mut skipped_rows = 0usize;

    for result in rdr.records() {
        let record = result?;
        let entity = match record.get(columns.entity) {
            Some(e) if !e.trim().is_empty() => e.trim().to_string(),
            _ => {
                skipped_rows += 1;
                continue;
            }
        };

        let year = record
            .get(columns.year)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite());
        let share = record
            .get(columns.share)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite());

        let (year, mut share) = match (year, share) {
            (Some(y), Some(s)) => (y, s),
            _ => {
                skipped_rows += 1;
                continue;
            }
        };
        if columns.share_is_percent {
            share /= 100.0;
        }

        let series = by_entity
            .entry(entity.clone())
            .or_insert_with(|| AdoptionSeries::new(entity));
        if series.code.is_none() {
            series.code = columns
                .code
                .and_then(|i| record.get(i))
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty());
        }
        series.samples.push(Sample { year, share });
    }

    if skipped_rows > 0 {
        debug!(skipped_rows, "dropped rows with missing year or share");
    }

    let mut dataset = AdoptionDataset::new(name);
    dataset.series = by_entity.into_values().collect();
    dataset.normalize_order();
    Ok(dataset)
}

/// Read an adoption dataset from a CSV file with default options.
pub fn read_csv(path: impl AsRef<Path>) -> Result<AdoptionDataset, AdoptionError> {
    read_csv_with(path, &CsvReadOptions::default())
}

/// Read an adoption dataset from a CSV file.
pub fn read_csv_with(
    path: impl AsRef<Path>,
    opts: &CsvReadOptions,
) -> Result<AdoptionDataset, AdoptionError> {
    let path = path.as_ref();
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    parse_csv_records(&mut rdr, &name, opts)
}

/// Read an adoption dataset from CSV bytes.
pub fn read_csv_from_bytes(
    data: &[u8],
    name: &str,
    opts: &CsvReadOptions,
) -> Result<AdoptionDataset, AdoptionError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);
    parse_csv_records(&mut rdr, name, opts)
}

/// Write an adoption dataset to a CSV file (`entity,code,year,share`,
/// shares as fractions).
pub fn write_csv(dataset: &AdoptionDataset, path: impl AsRef<Path>) -> Result<(), AdoptionError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;
    wtr.write_record(["entity", "code", "year", "share"])?;

    for series in &dataset.series {
        let code = series.code.as_deref().unwrap_or("");
        for sample in &series.samples {
            wtr.write_record([
                series.entity.clone(),
                code.to_string(),
                sample.year.to_string(),
                sample.share.to_string(),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
