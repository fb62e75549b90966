//! JSON directory store.
//!
//! Layout:
//! - `versions.json`: array of timetable versions
//! - `holidays.json`: array of weekday names
//!
//! Writes go to a `.tmp` sibling first and are renamed over the target,
//! so a crash mid-write leaves the previous document intact. A failed
//! write removes its temp file.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::Persistence;
use crate::error::{Error, Result};
use crate::models::{HolidaySet, TimetableVersion};

const VERSIONS_FILE: &str = "versions.json";
const HOLIDAYS_FILE: &str = "holidays.json";

/// Store backed by JSON files in one directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Uses `dir`, creating it on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The backing directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn versions_path(&self) -> PathBuf {
        self.dir.join(VERSIONS_FILE)
    }

    fn holidays_path(&self) -> PathBuf {
        self.dir.join(HOLIDAYS_FILE)
    }
}

impl Persistence for JsonFileStore {
    fn load_versions(&self) -> Result<Vec<TimetableVersion>> {
        Ok(read_json(&self.versions_path(), "timetable versions")?.unwrap_or_default())
    }

    fn save_versions(&mut self, versions: &[TimetableVersion]) -> Result<()> {
        write_json(&self.versions_path(), versions, "timetable versions")
    }

    fn load_holidays(&self) -> Result<Option<HolidaySet>> {
        read_json(&self.holidays_path(), "holidays")
    }

    fn save_holidays(&mut self, holidays: &HolidaySet) -> Result<()> {
        write_json(&self.holidays_path(), holidays, "holidays")
    }
}

/// Reads a JSON document; `None` if the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path, what: &'static str) -> Result<Option<T>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io("read", path, e)),
    };

    let value = serde_json::from_slice(&bytes)
        .map_err(|source| Error::Deserialization { what, source })?;

    tracing::info!("Loaded {} from {}", what, path.display());
    Ok(Some(value))
}

/// Writes a JSON document atomically (temp file + rename).
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T, what: &'static str) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|source| Error::Serialization { what, source })?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io("create directory", parent, e))?;
    }

    let temp_path = path.with_extension("json.tmp");
    if let Err(e) = write_and_replace(&temp_path, path, &bytes) {
        if let Err(cleanup) = fs::remove_file(&temp_path) {
            if cleanup.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Could not remove {}: {}", temp_path.display(), cleanup);
            }
        }
        return Err(e);
    }

    tracing::info!("Saved {} to {}", what, path.display());
    Ok(())
}

fn write_and_replace(temp_path: &Path, path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(temp_path).map_err(|e| Error::io("create", temp_path, e))?;
    file.write_all(bytes)
        .map_err(|e| Error::io("write", temp_path, e))?;
    file.sync_all()
        .map_err(|e| Error::io("sync", temp_path, e))?;
    drop(file);

    fs::rename(temp_path, path).map_err(|source| Error::AtomicWriteFailed {
        temp_path: temp_path.to_path_buf(),
        target_path: path.to_path_buf(),
        source,
    })
}
