//! Per-cell booking index.
//!
//! Records which lecturers and classrooms are committed in each
//! (day, slot) cell while a timetable is being built or repaired.
//! Lookups take `&str` slot labels, so no allocation on the hot path.

use std::collections::{HashMap, HashSet};

use crate::models::{ScheduleEntry, Weekday};

#[derive(Debug, Clone, Default)]
struct CellBookings {
    lecturers: HashSet<String>,
    classrooms: HashSet<String>,
    sections: HashSet<String>,
}

/// Lecturer, classroom, and section occupancy by cell.
#[derive(Debug, Clone, Default)]
pub struct BookingIndex {
    cells: HashMap<Weekday, HashMap<String, CellBookings>>,
}

impl BookingIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index covering every resource of `entries`.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a ScheduleEntry>) -> Self {
        let mut index = Self::new();
        for e in entries {
            index.book_entry(e);
        }
        index
    }

    fn cell(&self, day: Weekday, slot: &str) -> Option<&CellBookings> {
        self.cells.get(&day).and_then(|slots| slots.get(slot))
    }

    fn cell_mut(&mut self, day: Weekday, slot: &str) -> &mut CellBookings {
        self.cells
            .entry(day)
            .or_default()
            .entry(slot.to_string())
            .or_default()
    }

    /// Whether `lecturer` is committed at (`day`, `slot`).
    pub fn is_lecturer_booked(&self, day: Weekday, slot: &str, lecturer: &str) -> bool {
        self.cell(day, slot)
            .is_some_and(|c| c.lecturers.contains(lecturer))
    }

    /// Whether `classroom` is committed at (`day`, `slot`).
    pub fn is_classroom_booked(&self, day: Weekday, slot: &str, classroom: &str) -> bool {
        self.cell(day, slot)
            .is_some_and(|c| c.classrooms.contains(classroom))
    }

    /// Whether `section` already has a session at (`day`, `slot`).
    pub fn is_section_booked(&self, day: Weekday, slot: &str, section: &str) -> bool {
        self.cell(day, slot)
            .is_some_and(|c| c.sections.contains(section))
    }

    /// Commits a lecturer to a cell.
    pub fn book_lecturer(&mut self, day: Weekday, slot: &str, lecturer: &str) {
        self.cell_mut(day, slot)
            .lecturers
            .insert(lecturer.to_string());
    }

    /// Commits a classroom to a cell.
    pub fn book_classroom(&mut self, day: Weekday, slot: &str, classroom: &str) {
        self.cell_mut(day, slot)
            .classrooms
            .insert(classroom.to_string());
    }

    /// Commits a section to a cell.
    pub fn book_section(&mut self, day: Weekday, slot: &str, section: &str) {
        self.cell_mut(day, slot)
            .sections
            .insert(section.to_string());
    }

    /// Commits the lecturer, classroom, and section of `entry`.
    pub fn book_entry(&mut self, entry: &ScheduleEntry) {
        let cell = self.cell_mut(entry.day, &entry.time_slot);
        cell.lecturers.insert(entry.lecturer.clone());
        cell.classrooms.insert(entry.classroom.clone());
        cell.sections.insert(entry.section.clone());
    }

    /// Whether `entry`'s lecturer, classroom, and section are all free
    /// at (`day`, `slot`).
    pub fn is_free_for(&self, day: Weekday, slot: &str, entry: &ScheduleEntry) -> bool {
        match self.cell(day, slot) {
            None => true,
            Some(c) => {
                !c.lecturers.contains(&entry.lecturer)
                    && !c.classrooms.contains(&entry.classroom)
                    && !c.sections.contains(&entry.section)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index_is_free() {
        let idx = BookingIndex::new();
        assert!(!idx.is_lecturer_booked(Weekday::Monday, "09:00-10:00", "Prof. Smith"));
        assert!(!idx.is_classroom_booked(Weekday::Monday, "09:00-10:00", "Room 101"));
    }

    #[test]
    fn test_bookings_are_per_cell() {
        let mut idx = BookingIndex::new();
        idx.book_lecturer(Weekday::Monday, "09:00-10:00", "Prof. Smith");
        idx.book_classroom(Weekday::Monday, "09:00-10:00", "Room 101");

        assert!(idx.is_lecturer_booked(Weekday::Monday, "09:00-10:00", "Prof. Smith"));
        assert!(!idx.is_lecturer_booked(Weekday::Monday, "10:10-11:10", "Prof. Smith"));
        assert!(!idx.is_lecturer_booked(Weekday::Tuesday, "09:00-10:00", "Prof. Smith"));
        assert!(idx.is_classroom_booked(Weekday::Monday, "09:00-10:00", "Room 101"));
        assert!(!idx.is_classroom_booked(Weekday::Monday, "09:00-10:00", "Lab A"));
    }

    #[test]
    fn test_from_entries_and_free_check() {
        let booked = ScheduleEntry::new(
            Weekday::Monday,
            "09:00-10:00",
            "Advanced React",
            "Prof. Smith",
            "Room 101",
            "A",
        );
        let idx = BookingIndex::from_entries([&booked]);
        assert!(idx.is_section_booked(Weekday::Monday, "09:00-10:00", "A"));

        let other = ScheduleEntry::new(
            Weekday::Monday,
            "09:00-10:00",
            "Python for AI",
            "Dr. Jones",
            "Lab A",
            "B",
        );
        assert!(idx.is_free_for(Weekday::Monday, "09:00-10:00", &other));

        let same_room = ScheduleEntry {
            classroom: "Room 101".into(),
            ..other.clone()
        };
        assert!(!idx.is_free_for(Weekday::Monday, "09:00-10:00", &same_room));

        let same_section = ScheduleEntry {
            section: "A".into(),
            ..other
        };
        assert!(!idx.is_free_for(Weekday::Monday, "09:00-10:00", &same_section));
        assert!(idx.is_free_for(Weekday::Monday, "10:10-11:10", &same_section));
    }
}
