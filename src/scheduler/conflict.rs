//! Double-booking detection.
//!
//! # Algorithm
//! 1. Group entries by (day, slot), in order of first appearance.
//! 2. In each group of two or more, count lecturers and classrooms.
//! 3. Every entry whose lecturer (classroom) count exceeds one yields a
//!    lecturer (classroom) conflict for its cell.
//! 4. Identical (day, slot, message) records are reported once.
//!
//! Callers should treat the output as a set; only grouping order is stable.

use std::collections::{HashMap, HashSet};

use crate::models::{Conflict, ScheduleEntry, Weekday};

/// Scans entries for lecturer and classroom double-bookings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConflictDetector;

impl ConflictDetector {
    /// Creates a detector.
    pub fn new() -> Self {
        Self
    }

    /// Reports every double-booked lecturer and classroom, deduplicated.
    pub fn detect(&self, entries: &[ScheduleEntry]) -> Vec<Conflict> {
        let mut conflicts = self.detect_per_entry(entries);
        let mut seen = HashSet::new();
        conflicts.retain(|c| seen.insert((c.day, c.time_slot.clone(), c.message.clone())));
        conflicts
    }

    /// One record per offending entry, before deduplication.
    ///
    /// Two entries sharing a classroom yield two identical records here.
    pub fn detect_per_entry(&self, entries: &[ScheduleEntry]) -> Vec<Conflict> {
        let mut conflicts = Vec::new();

        for indices in group_by_cell(entries) {
            if indices.len() < 2 {
                continue;
            }
            let group: Vec<&ScheduleEntry> = indices.iter().map(|&i| &entries[i]).collect();

            let mut lecturer_counts: HashMap<&str, usize> = HashMap::new();
            let mut classroom_counts: HashMap<&str, usize> = HashMap::new();
            for e in &group {
                *lecturer_counts.entry(e.lecturer.as_str()).or_insert(0) += 1;
                *classroom_counts.entry(e.classroom.as_str()).or_insert(0) += 1;
            }

            for e in &group {
                if lecturer_counts[e.lecturer.as_str()] > 1 {
                    conflicts.push(Conflict::lecturer(e));
                }
                if classroom_counts[e.classroom.as_str()] > 1 {
                    conflicts.push(Conflict::classroom(e));
                }
            }
        }

        conflicts
    }

    /// Whether `entries` contain no double-booking.
    pub fn is_conflict_free(&self, entries: &[ScheduleEntry]) -> bool {
        self.detect(entries).is_empty()
    }
}

/// Groups entry indices by cell, preserving first-appearance order of
/// cells and original order within each cell.
pub(crate) fn group_by_cell(entries: &[ScheduleEntry]) -> Vec<Vec<usize>> {
    let mut order: Vec<(Weekday, &str)> = Vec::new();
    let mut groups: HashMap<(Weekday, &str), Vec<usize>> = HashMap::new();

    for (i, e) in entries.iter().enumerate() {
        let key = (e.day, e.time_slot.as_str());
        groups
            .entry(key)
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(i);
    }

    order
        .into_iter()
        .filter_map(|key| groups.remove(&key))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ConflictKind;

    fn entry(day: Weekday, slot: &str, lecturer: &str, classroom: &str, section: &str) -> ScheduleEntry {
        ScheduleEntry::new(day, slot, "Subject", lecturer, classroom, section)
    }

    #[test]
    fn test_shared_classroom_reported_once() {
        let entries = vec![
            entry(Weekday::Monday, "09:00-10:00", "Prof. Smith", "Room 101", "A"),
            entry(Weekday::Monday, "09:00-10:00", "Dr. Jones", "Room 101", "B"),
        ];
        let conflicts = ConflictDetector::new().detect(&entries);

        // Both entries produce the same record; deduplication keeps one.
        assert_eq!(conflicts.len(), 1);
        let c = &conflicts[0];
        assert_eq!(c.day, Weekday::Monday);
        assert_eq!(c.time_slot, "09:00-10:00");
        assert_eq!(c.kind, ConflictKind::Classroom);
        assert_eq!(c.message, "Classroom Room 101 is double-booked.");
    }

    #[test]
    fn test_per_entry_records_before_dedup() {
        let entries = vec![
            entry(Weekday::Monday, "09:00-10:00", "Prof. Smith", "Room 101", "A"),
            entry(Weekday::Monday, "09:00-10:00", "Dr. Jones", "Room 101", "B"),
        ];
        let records = ConflictDetector::new().detect_per_entry(&entries);
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|c| c.message == "Classroom Room 101 is double-booked."
            && c.day == Weekday::Monday
            && c.time_slot == "09:00-10:00"));
    }

    #[test]
    fn test_lecturer_and_classroom_conflicts() {
        let entries = vec![
            entry(Weekday::Tuesday, "10:10-11:10", "Dr. Jones", "Lab A", "A"),
            entry(Weekday::Tuesday, "10:10-11:10", "Dr. Jones", "Lab A", "B"),
        ];
        let conflicts = ConflictDetector::new().detect(&entries);
        let messages: HashSet<_> = conflicts.iter().map(|c| c.message.as_str()).collect();
        assert_eq!(
            messages,
            HashSet::from([
                "Lecturer Dr. Jones is double-booked.",
                "Classroom Lab A is double-booked."
            ])
        );
    }

    #[test]
    fn test_different_cells_do_not_conflict() {
        let entries = vec![
            entry(Weekday::Monday, "09:00-10:00", "Prof. Smith", "Room 101", "A"),
            entry(Weekday::Monday, "10:10-11:10", "Prof. Smith", "Room 101", "A"),
            entry(Weekday::Tuesday, "09:00-10:00", "Prof. Smith", "Room 101", "A"),
        ];
        let detector = ConflictDetector::new();
        assert!(detector.detect(&entries).is_empty());
        assert!(detector.is_conflict_free(&entries));
    }

    #[test]
    fn test_section_overlap_alone_is_not_reported() {
        let entries = vec![
            entry(Weekday::Monday, "09:00-10:00", "Prof. Smith", "Room 101", "A"),
            entry(Weekday::Monday, "09:00-10:00", "Dr. Jones", "Lab A", "A"),
        ];
        assert!(ConflictDetector::new().detect(&entries).is_empty());
    }

    #[test]
    fn test_multiple_cells_reported_separately() {
        let entries = vec![
            entry(Weekday::Monday, "09:00-10:00", "Prof. Smith", "Room 101", "A"),
            entry(Weekday::Monday, "09:00-10:00", "Dr. Jones", "Room 101", "B"),
            entry(Weekday::Friday, "14:10-15:10", "Ms. Davis", "Hall B", "A"),
            entry(Weekday::Friday, "14:10-15:10", "Ms. Davis", "Lab B", "C"),
        ];
        let conflicts = ConflictDetector::new().detect(&entries);
        assert_eq!(conflicts.len(), 2);
        assert!(conflicts
            .iter()
            .any(|c| c.day == Weekday::Friday && c.kind == ConflictKind::Lecturer));
    }

    #[test]
    fn test_empty_input() {
        assert!(ConflictDetector::new().detect(&[]).is_empty());
    }

    #[test]
    fn test_group_by_cell_order() {
        let entries = vec![
            entry(Weekday::Tuesday, "09:00-10:00", "X", "R1", "A"),
            entry(Weekday::Monday, "09:00-10:00", "Y", "R2", "A"),
            entry(Weekday::Tuesday, "09:00-10:00", "Z", "R3", "B"),
        ];
        let groups = group_by_cell(&entries);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], vec![0, 2]);
        assert_eq!(groups[1], vec![1]);
    }
}
