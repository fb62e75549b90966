//! Timetable (solution) model.
//!
//! A timetable version is an ordered list of schedule entries plus the
//! workflow metadata that decides whether it is authoritative. Conflicts
//! are double-bookings found in a version's entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Weekday;

/// One session: a section meets a lecturer for a subject in a room.
///
/// Value object. Two entries are equal iff every field is equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub day: Weekday,
    pub time_slot: String,
    pub subject: String,
    pub lecturer: String,
    pub classroom: String,
    pub section: String,
}

/// A (day, time-slot) cell of the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub day: Weekday,
    pub time_slot: String,
}

/// Workflow status of a timetable version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VersionStatus {
    Draft,
    #[serde(rename = "Pending Approval")]
    PendingApproval,
    Approved,
    Rejected,
}

/// A stored timetable version.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimetableVersion {
    /// Unique version identifier.
    pub id: String,
    /// Monotonic version number (max existing + 1 at creation).
    pub version: u32,
    /// Workflow status.
    pub status: VersionStatus,
    /// Sessions, in insertion order.
    pub entries: Vec<ScheduleEntry>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Free-text note (rejection reason, provenance, supersession).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A double-booking found in a version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Conflict {
    pub day: Weekday,
    pub time_slot: String,
    pub kind: ConflictKind,
    /// Human-readable reason.
    pub message: String,
}

/// Which resource is double-booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConflictKind {
    Lecturer,
    Classroom,
}

impl ScheduleEntry {
    /// Creates an entry.
    pub fn new(
        day: Weekday,
        time_slot: impl Into<String>,
        subject: impl Into<String>,
        lecturer: impl Into<String>,
        classroom: impl Into<String>,
        section: impl Into<String>,
    ) -> Self {
        Self {
            day,
            time_slot: time_slot.into(),
            subject: subject.into(),
            lecturer: lecturer.into(),
            classroom: classroom.into(),
            section: section.into(),
        }
    }

    /// The cell this entry occupies.
    pub fn cell(&self) -> Cell {
        Cell::new(self.day, self.time_slot.clone())
    }

    /// Whether this entry occupies (`day`, `time_slot`).
    #[inline]
    pub fn is_at(&self, day: Weekday, time_slot: &str) -> bool {
        self.day == day && self.time_slot == time_slot
    }
}

impl Cell {
    pub fn new(day: Weekday, time_slot: impl Into<String>) -> Self {
        Self {
            day,
            time_slot: time_slot.into(),
        }
    }
}

impl VersionStatus {
    /// Entries may be replaced only in Draft or Rejected.
    #[inline]
    pub fn is_editable(&self) -> bool {
        matches!(self, VersionStatus::Draft | VersionStatus::Rejected)
    }

    /// Versions may be deleted only in Draft or Rejected.
    #[inline]
    pub fn is_deletable(&self) -> bool {
        self.is_editable()
    }

    /// Whether `submit` may move a version out of this status.
    #[inline]
    pub fn can_submit(&self) -> bool {
        self.is_editable()
    }

    /// Whether `approve` or `reject` may move a version out of this status.
    #[inline]
    pub fn is_under_review(&self) -> bool {
        matches!(self, VersionStatus::PendingApproval)
    }
}

impl TimetableVersion {
    /// Creates a Draft version stamped with the current time.
    pub fn draft(id: impl Into<String>, version: u32, entries: Vec<ScheduleEntry>) -> Self {
        Self {
            id: id.into(),
            version,
            status: VersionStatus::Draft,
            entries,
            created_at: Utc::now(),
            notes: None,
        }
    }

    /// Sets the note.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, status: VersionStatus) -> Self {
        self.status = status;
        self
    }

    /// Entries of one section.
    pub fn entries_for_section(&self, section: &str) -> Vec<&ScheduleEntry> {
        self.entries.iter().filter(|e| e.section == section).collect()
    }

    /// Entries taught by one lecturer.
    pub fn entries_for_lecturer(&self, lecturer: &str) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.lecturer == lecturer)
            .collect()
    }

    /// Number of entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}

impl Conflict {
    /// A lecturer appears twice in one cell.
    pub fn lecturer(entry: &ScheduleEntry) -> Self {
        Self {
            day: entry.day,
            time_slot: entry.time_slot.clone(),
            kind: ConflictKind::Lecturer,
            message: format!("Lecturer {} is double-booked.", entry.lecturer),
        }
    }

    /// A classroom appears twice in one cell.
    pub fn classroom(entry: &ScheduleEntry) -> Self {
        Self {
            day: entry.day,
            time_slot: entry.time_slot.clone(),
            kind: ConflictKind::Classroom,
            message: format!("Classroom {} is double-booked.", entry.classroom),
        }
    }
}
