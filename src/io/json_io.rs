use std::path::Path;

use crate::error::AdoptionError;
use crate::models::AdoptionDataset;

/// Read an adoption dataset from a JSON file.
pub fn read_json(path: impl AsRef<Path>) -> Result<AdoptionDataset, AdoptionError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let mut dataset: AdoptionDataset = serde_json::from_str(&content)?;
    dataset.normalize_order();
    Ok(dataset)
}

/// Read an adoption dataset from JSON bytes.
pub fn read_json_from_bytes(data: &[u8], name: &str) -> Result<AdoptionDataset, AdoptionError> {
    let content = std::str::from_utf8(data)
        .map_err(|e| AdoptionError::ParseError(format!("Invalid UTF-8: {e}")))?;
    let mut dataset: AdoptionDataset = serde_json::from_str(content)?;
    dataset.name = name.to_string();
    dataset.normalize_order();
    Ok(dataset)
}

/// Write an adoption dataset to a JSON file.
pub fn write_json(
    dataset: &AdoptionDataset,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), AdoptionError> {
    let content = if pretty {
        serde_json::to_string_pretty(dataset)?
    } else {
        serde_json::to_string(dataset)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}
