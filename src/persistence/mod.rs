//! Storage of timetable versions and holiday settings.
//!
//! [`Persistence`] is the seam between the workflow and storage.
//! [`MemoryStore`] keeps everything in process; [`JsonFileStore`] writes
//! one JSON document per collection into a directory.

mod json;

pub use json::JsonFileStore;

use crate::error::Result;
use crate::models::{HolidaySet, TimetableVersion};

/// Durable storage for the version list and holiday set.
pub trait Persistence {
    /// Stored versions; empty when nothing has been saved yet.
    fn load_versions(&self) -> Result<Vec<TimetableVersion>>;

    /// Replaces the stored version list.
    fn save_versions(&mut self, versions: &[TimetableVersion]) -> Result<()>;

    /// Stored holidays; `None` when nothing has been saved yet.
    fn load_holidays(&self) -> Result<Option<HolidaySet>>;

    /// Replaces the stored holiday set.
    fn save_holidays(&mut self, holidays: &HolidaySet) -> Result<()>;
}

/// Process-local store. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    versions: Vec<TimetableVersion>,
    holidays: Option<HolidaySet>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `save_versions` calls so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Persistence for MemoryStore {
    fn load_versions(&self) -> Result<Vec<TimetableVersion>> {
        Ok(self.versions.clone())
    }

    fn save_versions(&mut self, versions: &[TimetableVersion]) -> Result<()> {
        self.versions = versions.to_vec();
        self.saves += 1;
        Ok(())
    }

    fn load_holidays(&self) -> Result<Option<HolidaySet>> {
        Ok(self.holidays.clone())
    }

    fn save_holidays(&mut self, holidays: &HolidaySet) -> Result<()> {
        self.holidays = Some(holidays.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Weekday;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::new();
        assert!(store.load_versions().unwrap().is_empty());
        assert!(store.load_holidays().unwrap().is_none());

        let v = TimetableVersion::draft("tt-1", 1, Vec::new());
        store.save_versions(std::slice::from_ref(&v)).unwrap();
        store
            .save_holidays(&HolidaySet::new().with(Weekday::Friday))
            .unwrap();

        assert_eq!(store.load_versions().unwrap(), vec![v]);
        assert!(store.load_holidays().unwrap().unwrap().contains(Weekday::Friday));
        assert_eq!(store.save_count(), 1);
    }
}
