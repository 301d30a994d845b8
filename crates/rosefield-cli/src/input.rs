//! Loading configuration files with source provenance.

use std::path::Path;

use rosefield_spec::{ConfigError, RoseConfig};

/// A configuration read from disk.
#[derive(Debug, Clone)]
pub struct LoadResult {
    /// The parsed configuration.
    pub config: RoseConfig,
    /// BLAKE3 hash of the file content (hex string).
    pub source_hash: String,
}

/// Reads and parses a configuration file.
pub fn load_config(path: &Path) -> Result<LoadResult, ConfigError> {
    let source = std::fs::read_to_string(path)?;
    let config = RoseConfig::from_json_str(&source)?;
    Ok(LoadResult {
        config,
        source_hash: blake3::hash(source.as_bytes()).to_hex().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_hashes_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rose.json");
        std::fs::write(&path, r#"{ "petals": 7 }"#).unwrap();

        let loaded = load_config(&path).unwrap();
        assert_eq!(loaded.config.petals, 7.0);
        assert_eq!(loaded.source_hash.len(), 64);
        assert_eq!(loaded.source_hash, load_config(&path).unwrap().source_hash);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_config(Path::new("/nonexistent/rose.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rose.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_config(&path).unwrap_err(), ConfigError::JsonParse(_)));
    }
}
