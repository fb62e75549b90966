//! Catalog resource models.
//!
//! Resources are what sessions consume: a subject taught by a faculty
//! member, in a classroom. Faculty carry a weekday availability set;
//! classrooms carry an availability flag and a capacity.
//!
//! Capacity is recorded but not matched against section size.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Weekday;

/// A course offered by a faculty member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject identifier.
    pub id: String,
    /// Display name, copied into schedule entries.
    pub name: String,
    /// Course code (e.g., "CS401").
    pub code: String,
    /// Owning faculty member's id.
    pub faculty_id: String,
}

/// A room sessions can be held in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique classroom identifier.
    pub id: String,
    /// Display name, copied into schedule entries.
    pub name: String,
    /// Seats.
    pub capacity: u32,
    /// Whether the generator may book this room.
    pub is_available: bool,
}

/// A lecturer with weekly availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacultyMember {
    /// Unique faculty identifier.
    pub id: String,
    /// Display name, copied into schedule entries as the lecturer.
    pub name: String,
    /// Department.
    pub department: String,
    /// Contracted teaching hours per week.
    pub workload_hours: u32,
    /// Weekdays this lecturer may teach. Absent day = unavailable.
    pub availability: BTreeSet<Weekday>,
}

impl Subject {
    /// Creates a subject owned by `faculty_id`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        code: impl Into<String>,
        faculty_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            code: code.into(),
            faculty_id: faculty_id.into(),
        }
    }
}

impl Classroom {
    /// Creates an available classroom.
    pub fn new(id: impl Into<String>, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            capacity,
            is_available: true,
        }
    }

    /// Sets the availability flag.
    pub fn with_availability(mut self, is_available: bool) -> Self {
        self.is_available = is_available;
        self
    }
}

impl FacultyMember {
    /// Creates a faculty member with no availability.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            department: String::new(),
            workload_hours: 0,
            availability: BTreeSet::new(),
        }
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the weekly workload.
    pub fn with_workload(mut self, hours: u32) -> Self {
        self.workload_hours = hours;
        self
    }

    /// Sets the weekdays this lecturer may teach.
    pub fn with_availability(mut self, days: impl IntoIterator<Item = Weekday>) -> Self {
        self.availability = days.into_iter().collect();
        self
    }

    /// Whether this lecturer may teach on `day`.
    #[inline]
    pub fn is_available_on(&self, day: Weekday) -> bool {
        self.availability.contains(&day)
    }
}
