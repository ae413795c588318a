//! Readers for the two JSON inputs of a recommendation run.
//!
//! - target file: `{"target": "<username>"}`
//! - catalog file: `[{"user_id": 1, "username": "...", "notes": {"<title>": <rating>, ...}}, ...]`

use crate::error::{DataLoadError, Result};
use crate::types::{Catalog, CatalogLimits};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, instrument};

/// Read a whole file, mapping a missing file to `FileNotFound`
fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn parse_json(content: &str, file: &str) -> Result<Value> {
    serde_json::from_str(content).map_err(|source| DataLoadError::JsonError {
        file: file.to_string(),
        source,
    })
}

/// Parse the target file and return the target username
#[instrument]
pub fn parse_target(path: &Path) -> Result<String> {
    let content = read_to_string(path)?;
    parse_target_str(&content, &path.display().to_string())
}

/// Parse target file content. `file` is only used in error messages.
pub fn parse_target_str(content: &str, file: &str) -> Result<String> {
    let root = parse_json(content, file)?;
    let target = root.get("target").ok_or_else(|| DataLoadError::MissingField {
        file: file.to_string(),
        field: "target".to_string(),
    })?;

    target
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DataLoadError::InvalidValue {
            field: "target".to_string(),
            value: target.to_string(),
        })
}

/// Load the user catalog from a JSON file
#[instrument(skip(limits))]
pub fn parse_catalog(path: &Path, limits: CatalogLimits) -> Result<Catalog> {
    let content = read_to_string(path)?;
    let catalog = parse_catalog_str(&content, &path.display().to_string(), limits)?;
    info!("Loaded {} users from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Parse catalog file content. `file` is only used in error messages.
pub fn parse_catalog_str(content: &str, file: &str, limits: CatalogLimits) -> Result<Catalog> {
    let root = parse_json(content, file)?;
    Catalog::from_json_value(&root, file, limits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_target() {
        let target = parse_target_str(r#"{"target": "Alice"}"#, "target.json").unwrap();
        assert_eq!(target, "Alice");
    }

    #[test]
    fn test_parse_target_keeps_whitespace() {
        let target = parse_target_str(r#"{"target": " Alice "}"#, "target.json").unwrap();
        assert_eq!(target, " Alice ");
    }

    #[test]
    fn test_parse_target_missing_field() {
        let result = parse_target_str(r#"{"user": "Alice"}"#, "target.json");
        assert!(matches!(result, Err(DataLoadError::MissingField { .. })));
    }

    #[test]
    fn test_parse_target_wrong_type() {
        let result = parse_target_str(r#"{"target": 12}"#, "target.json");
        assert!(matches!(result, Err(DataLoadError::InvalidValue { .. })));
    }

    #[test]
    fn test_parse_target_invalid_json() {
        let result = parse_target_str("{target", "target.json");
        assert!(matches!(result, Err(DataLoadError::JsonError { .. })));
    }

    #[test]
    fn test_parse_target_missing_file() {
        let result = parse_target(Path::new("/definitely/not/here/target_user.json"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_parse_catalog_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"user_id": 1, "username": "Alice", "notes": {{"Matrix": 5, "Inception": 4}}}},
                {{"user_id": 2, "username": "Bob", "notes": {{}}}}
            ]"#
        )
        .unwrap();

        let catalog = parse_catalog(file.path(), CatalogLimits::default()).unwrap();
        assert_eq!(catalog.counts(), (2, 2));
        assert!(catalog.find_by_username("Bob").is_some());
    }

    #[test]
    fn test_parse_catalog_not_an_array() {
        let result = parse_catalog_str(r#"{"username": "Alice"}"#, "users.json", CatalogLimits::default());
        assert!(matches!(result, Err(DataLoadError::NotACollection { .. })));
    }

    #[test]
    fn test_parse_catalog_invalid_json() {
        let result = parse_catalog_str("[{", "users.json", CatalogLimits::default());
        assert!(matches!(result, Err(DataLoadError::JsonError { .. })));
    }
}
