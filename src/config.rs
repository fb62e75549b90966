//! Engine configuration.
//!
//! Everything the generator and repairer treat as fixed for a run: the
//! weekly grid, the non-academic periods every section must receive,
//! and the default generation constraints. Loadable from JSON; every
//! field has a default so partial files are accepted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{TeachingWeek, Weekday};

/// A non-academic subject every section gets a fixed number of times per week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MandatoryPeriod {
    /// Subject name. Its lecturer is the owning faculty of the catalog
    /// subject with this name.
    pub subject: String,
    /// Fixed classroom label written into the entry.
    pub classroom: String,
    /// Sessions per week per section.
    pub sessions: u32,
}

impl MandatoryPeriod {
    /// Creates a mandatory period.
    pub fn new(subject: impl Into<String>, classroom: impl Into<String>, sessions: u32) -> Self {
        Self {
            subject: subject.into(),
            classroom: classroom.into(),
            sessions,
        }
    }
}

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Days and time-slot labels.
    pub week: TeachingWeek,
    /// Non-academic periods placed before academic subjects.
    pub mandatory_periods: Vec<MandatoryPeriod>,
    /// Sections generated when a request names none.
    pub default_sections: Vec<String>,
    /// Default lower bound of sessions per section per day.
    pub default_min_classes: u32,
    /// Default upper bound of sessions per section per day.
    pub default_max_classes: u32,
    /// Also reserve the mandatory classroom label in the booking index.
    ///
    /// Off by default: mandatory sessions of different sections may share
    /// their fixed classroom label in one cell.
    pub book_mandatory_classrooms: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            week: TeachingWeek::default(),
            mandatory_periods: vec![
                MandatoryPeriod::new("Library", "Library", 2),
                MandatoryPeriod::new("Sports", "Sports Ground", 2),
            ],
            default_sections: vec!["A".to_string()],
            default_min_classes: 2,
            default_max_classes: 4,
            book_mandatory_classrooms: false,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON configuration and validates it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Deserialization {
            what: "engine configuration",
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| Error::io("read", path, e))?;
        let config = Self::from_json_str(&json)?;
        tracing::info!("Loaded engine configuration from {}", path.display());
        Ok(config)
    }

    /// Rejects configurations the generator cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.week.days.is_empty() {
            return Err(Error::invalid_config("teaching week has no days"));
        }
        if self.week.time_slots.is_empty() {
            return Err(Error::invalid_config("teaching week has no time slots"));
        }
        if self.week.time_slots.iter().any(|s| s.trim().is_empty()) {
            return Err(Error::invalid_config("empty time-slot label"));
        }
        if self.default_min_classes > self.default_max_classes {
            return Err(Error::invalid_config(format!(
                "default_min_classes ({}) exceeds default_max_classes ({})",
                self.default_min_classes, self.default_max_classes
            )));
        }
        Ok(())
    }

    /// Replaces the teaching days.
    pub fn with_days(mut self, days: Vec<Weekday>) -> Self {
        self.week.days = days;
        self
    }

    /// Replaces the time-slot labels.
    pub fn with_time_slots<S: Into<String>>(mut self, slots: impl IntoIterator<Item = S>) -> Self {
        self.week.time_slots = slots.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the mandatory periods.
    pub fn with_mandatory_periods(mut self, periods: Vec<MandatoryPeriod>) -> Self {
        self.mandatory_periods = periods;
        self
    }

    /// Whether `subject` names a mandatory period.
    pub fn is_mandatory(&self, subject: &str) -> bool {
        self.mandatory_periods.iter().any(|p| p.subject == subject)
    }

    /// Names of all mandatory subjects.
    pub fn mandatory_subjects(&self) -> Vec<&str> {
        self.mandatory_periods
            .iter()
            .map(|p| p.subject.as_str())
            .collect()
    }
}
