//! Timetable load statistics.
//!
//! Summarizes a timetable version for the admin overview.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total sessions | Number of entries |
//! | Sessions by section | Weekly sessions per section label |
//! | Sessions by lecturer | Weekly sessions per lecturer name |
//! | Sessions by classroom | Weekly sessions per classroom name |
//! | Overloaded lecturers | Catalog faculty whose weekly sessions exceed `workload_hours` |
//! | Conflicts | Deduplicated double-bookings |
//! | Grid fill | Sessions / (sections × schedulable cells) |

use std::collections::BTreeMap;

use super::ConflictDetector;
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::models::TimetableVersion;

/// A lecturer teaching more weekly sessions than their workload allows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overload {
    pub lecturer: String,
    pub sessions: u32,
    pub workload_hours: u32,
}

/// Session counts and health indicators of one timetable version.
#[derive(Debug, Clone, PartialEq)]
pub struct TimetableStats {
    /// Number of entries.
    pub total_sessions: usize,
    /// Weekly sessions per section.
    pub sessions_by_section: BTreeMap<String, u32>,
    /// Weekly sessions per lecturer.
    pub sessions_by_lecturer: BTreeMap<String, u32>,
    /// Weekly sessions per classroom.
    pub sessions_by_classroom: BTreeMap<String, u32>,
    /// Faculty over their weekly workload, sorted by name.
    pub overloaded: Vec<Overload>,
    /// Deduplicated conflict count.
    pub conflict_count: usize,
    /// Fraction of section cells holding a session (0.0..=1.0).
    pub grid_fill: f64,
}

impl TimetableStats {
    /// Computes statistics for `version`.
    ///
    /// Session hours are counted one per entry; lecturers absent from the
    /// catalog are counted but never reported as overloaded.
    pub fn calculate(
        version: &TimetableVersion,
        catalog: &dyn Catalog,
        config: &EngineConfig,
    ) -> Self {
        let mut sessions_by_section: BTreeMap<String, u32> = BTreeMap::new();
        let mut sessions_by_lecturer: BTreeMap<String, u32> = BTreeMap::new();
        let mut sessions_by_classroom: BTreeMap<String, u32> = BTreeMap::new();

        for e in &version.entries {
            *sessions_by_section.entry(e.section.clone()).or_insert(0) += 1;
            *sessions_by_lecturer.entry(e.lecturer.clone()).or_insert(0) += 1;
            *sessions_by_classroom.entry(e.classroom.clone()).or_insert(0) += 1;
        }

        let mut overloaded: Vec<Overload> = sessions_by_lecturer
            .iter()
            .filter_map(|(name, &sessions)| {
                let member = catalog.faculty_by_name(name)?;
                (sessions > member.workload_hours).then(|| Overload {
                    lecturer: name.clone(),
                    sessions,
                    workload_hours: member.workload_hours,
                })
            })
            .collect();
        overloaded.sort_by(|a, b| a.lecturer.cmp(&b.lecturer));

        let cells = config.week.schedulable_days(catalog.holidays()).len()
            * config.week.slots_per_day()
            * sessions_by_section.len();
        let grid_fill = if cells == 0 {
            0.0
        } else {
            (version.entries.len() as f64 / cells as f64).min(1.0)
        };

        Self {
            total_sessions: version.entries.len(),
            sessions_by_section,
            sessions_by_lecturer,
            sessions_by_classroom,
            overloaded,
            conflict_count: ConflictDetector::new().detect(&version.entries).len(),
            grid_fill,
        }
    }

    /// Whether the version is conflict-free and nobody is overloaded.
    pub fn is_healthy(&self) -> bool {
        self.conflict_count == 0 && self.overloaded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use crate::models::{FacultyMember, ScheduleEntry, Weekday};

    fn entry(day: Weekday, slot: &str, lecturer: &str, room: &str, section: &str) -> ScheduleEntry {
        ScheduleEntry::new(day, slot, "Subject", lecturer, room, section)
    }

    fn catalog() -> CatalogStore {
        CatalogStore::new()
            .with_faculty(FacultyMember::new("F1", "Prof. Smith").with_workload(1))
            .with_faculty(FacultyMember::new("F2", "Dr. Jones").with_workload(10))
    }

    #[test]
    fn test_stats_counts() {
        let version = TimetableVersion::draft(
            "tt-1",
            1,
            vec![
                entry(Weekday::Monday, "09:00-10:00", "Prof. Smith", "Room 101", "A"),
                entry(Weekday::Monday, "10:10-11:10", "Prof. Smith", "Room 101", "B"),
                entry(Weekday::Tuesday, "09:00-10:00", "Dr. Jones", "Lab A", "A"),
            ],
        );
        let stats = TimetableStats::calculate(&version, &catalog(), &EngineConfig::default());

        assert_eq!(stats.total_sessions, 3);
        assert_eq!(stats.sessions_by_section["A"], 2);
        assert_eq!(stats.sessions_by_section["B"], 1);
        assert_eq!(stats.sessions_by_lecturer["Prof. Smith"], 2);
        assert_eq!(stats.sessions_by_classroom["Lab A"], 1);
        assert_eq!(stats.conflict_count, 0);
    }

    #[test]
    fn test_stats_overload() {
        let version = TimetableVersion::draft(
            "tt-1",
            1,
            vec![
                entry(Weekday::Monday, "09:00-10:00", "Prof. Smith", "Room 101", "A"),
                entry(Weekday::Tuesday, "09:00-10:00", "Prof. Smith", "Room 101", "A"),
                entry(Weekday::Tuesday, "10:10-11:10", "Guest", "Room 101", "A"),
                entry(Weekday::Tuesday, "11:10-12:10", "Guest", "Room 101", "A"),
            ],
        );
        let stats = TimetableStats::calculate(&version, &catalog(), &EngineConfig::default());

        assert_eq!(
            stats.overloaded,
            vec![Overload {
                lecturer: "Prof. Smith".into(),
                sessions: 2,
                workload_hours: 1,
            }]
        );
        assert!(!stats.is_healthy());
    }

    #[test]
    fn test_stats_conflicts_and_fill() {
        let version = TimetableVersion::draft(
            "tt-1",
            1,
            vec![
                entry(Weekday::Monday, "09:00-10:00", "Dr. Jones", "Room 101", "A"),
                entry(Weekday::Monday, "09:00-10:00", "Dr. Jones", "Lab A", "B"),
            ],
        );
        let stats = TimetableStats::calculate(&version, &catalog(), &EngineConfig::default());
        assert_eq!(stats.conflict_count, 1);

        // Two sections over 5 days × 6 slots.
        assert!((stats.grid_fill - 2.0 / 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_stats_empty() {
        let version = TimetableVersion::draft("tt-1", 1, Vec::new());
        let stats = TimetableStats::calculate(&version, &catalog(), &EngineConfig::default());
        assert_eq!(stats.total_sessions, 0);
        assert!(stats.sessions_by_section.is_empty());
        assert!((stats.grid_fill - 0.0).abs() < 1e-10);
        assert!(stats.is_healthy());
    }
}
