//! JSON file helpers
//!
//! Writes go to a sibling temp file that is renamed over the target, so a
//! snapshot on disk is always either the old one or the new one.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::BudgetError;

fn storage_err(action: &str, path: &Path, e: impl std::fmt::Display) -> BudgetError {
    BudgetError::Storage(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// Read JSON from `path`, or `None` if the file doesn't exist
pub fn read_json_optional<T, P>(path: P) -> Result<Option<T>, BudgetError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }

    let file = File::open(path).map_err(|e| storage_err("open", path, e))?;
    let value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| storage_err("parse", path, e))?;

    debug!(path = %path.display(), "loaded json file");
    Ok(Some(value))
}

/// Read JSON from `path`, failing if the file doesn't exist
pub fn read_json_required<T, P>(path: P) -> Result<T, BudgetError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    read_json_optional(path)?.ok_or_else(|| {
        BudgetError::Storage(format!("File not found: {}", path.display()))
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write JSON to `path` atomically
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BudgetError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| storage_err("create directory", parent, e))?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = temp_path_for(path);

    let result = (|| {
        let file = File::create(&temp_path).map_err(|e| storage_err("create", &temp_path, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, data)
            .map_err(|e| storage_err("serialize", path, e))?;
        writer.flush().map_err(|e| storage_err("flush", &temp_path, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| storage_err("sync", &temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| storage_err("replace", path, e))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    } else {
        debug!(path = %path.display(), "wrote json file");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Totals {
        label: String,
        cents: Vec<i64>,
    }

    fn sample() -> Totals {
        Totals {
            label: "january".into(),
            cents: vec![120000, 8550],
        }
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        assert!(read_json_optional::<Totals, _>(&path).unwrap().is_none());
        assert!(matches!(
            read_json_required::<Totals, _>(&path),
            Err(BudgetError::Storage(_))
        ));
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data").join("totals.json");

        write_json_atomic(&path, &sample()).unwrap();

        assert!(path.exists());
        assert!(!temp_dir.path().join("data").join("totals.json.tmp").exists());
        assert_eq!(read_json_required::<Totals, _>(&path).unwrap(), sample());
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("totals.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            read_json_optional::<Totals, _>(&path),
            Err(BudgetError::Storage(_))
        ));
    }
}
