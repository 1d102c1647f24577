use thiserror::Error;

/// Errors that can occur in EV adoption analysis.
#[derive(Error, Debug)]
pub enum AdoptionError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Fit did not converge: {0}")]
    NoConvergence(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Analysis error: {0}")]
    AnalysisError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = AdoptionError::from(io_err);
        let msg = err.to_string();
        assert!(msg.contains("IO error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_schema_error_display() {
        let err = AdoptionError::SchemaError("no share column".to_string());
        assert_eq!(err.to_string(), "Schema error: no share column");
    }

    #[test]
    fn test_no_convergence_display() {
        let err = AdoptionError::NoConvergence("Norway".to_string());
        assert_eq!(err.to_string(), "Fit did not converge: Norway");
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = AdoptionError::InsufficientData("empty series".to_string());
        assert_eq!(err.to_string(), "Insufficient data: empty series");
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: AdoptionError = io_err.into();
        assert!(matches!(err, AdoptionError::Io(_)));
    }

    #[test]
    fn test_json_error_from_conversion() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("not valid json{{{");
        let json_err = result.unwrap_err();
        let err: AdoptionError = json_err.into();
        assert!(matches!(err, AdoptionError::Json(_)));
        assert!(err.to_string().contains("JSON error"));
    }

    #[test]
    fn test_error_is_debug() {
        let err = AdoptionError::ParseError("test".to_string());
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("ParseError"));
    }
}
