//! Conflict repair ("auto-arrange").
//!
//! # Algorithm
//!
//! 1. Group entries by cell. Walking each group in original order, the
//!    first entry to claim a lecturer or classroom keeps its place; a
//!    later entry whose lecturer or classroom is already claimed is
//!    marked for relocation.
//! 2. Marked entries leave the working set.
//! 3. Each marked entry, in marking order, takes the first cell
//!    (schedulable days on which its lecturer teaches, then slots, both in
//!    configured order) where its lecturer, classroom, and section are
//!    free against the working set, and rejoins the set there.
//! 4. An entry with no such cell rejoins at its original cell and stays
//!    in conflict.
//!
//! Deterministic: no randomness is involved. On conflict-free input
//! nothing is marked and the entries come back unchanged.

use std::collections::HashSet;

use super::conflict::group_by_cell;
use super::BookingIndex;
use crate::catalog::Catalog;
use crate::config::EngineConfig;
use crate::models::{Cell, ScheduleEntry, Weekday};

/// An entry moved to a new cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// The entry as it now stands.
    pub entry: ScheduleEntry,
    /// Where it was before.
    pub from: Cell,
}

/// Outcome of a repair pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RepairReport {
    /// Revised entries: kept entries in original order, then the
    /// relocated and unresolved ones in marking order.
    pub entries: Vec<ScheduleEntry>,
    /// Entries that found a conflict-free cell.
    pub relocated: Vec<Relocation>,
    /// Entries left at their original, still conflicting cell.
    pub unresolved: Vec<ScheduleEntry>,
}

impl RepairReport {
    /// Whether every marked entry was relocated.
    pub fn is_fully_resolved(&self) -> bool {
        self.unresolved.is_empty()
    }

    /// Whether the pass changed nothing.
    pub fn is_noop(&self) -> bool {
        self.relocated.is_empty() && self.unresolved.is_empty()
    }
}

/// Relocates double-booked entries to free cells.
#[derive(Debug, Clone)]
pub struct Repairer<'a> {
    config: &'a EngineConfig,
}

impl<'a> Repairer<'a> {
    /// Creates a repairer over `config`.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Repairs `entries`.
    pub fn repair(&self, catalog: &dyn Catalog, entries: &[ScheduleEntry]) -> RepairReport {
        let marked = mark_conflicting(entries);
        if marked.is_empty() {
            return RepairReport {
                entries: entries.to_vec(),
                ..Default::default()
            };
        }

        let mut working: Vec<ScheduleEntry> = entries
            .iter()
            .enumerate()
            .filter(|(i, _)| !marked.contains(i))
            .map(|(_, e)| e.clone())
            .collect();
        let mut bookings = BookingIndex::from_entries(&working);

        let days = self.config.week.schedulable_days(catalog.holidays());
        let mut report = RepairReport::default();

        let mut order: Vec<usize> = marked.into_iter().collect();
        order.sort_unstable();

        for idx in order {
            let mut entry = entries[idx].clone();
            let from = entry.cell();

            match self.find_free_cell(catalog, &days, &entry, &bookings) {
                Some((day, slot)) => {
                    entry.day = day;
                    entry.time_slot = slot;
                    tracing::debug!(
                        subject = entry.subject.as_str(),
                        section = entry.section.as_str(),
                        from = %from.day,
                        to = %entry.day,
                        slot = entry.time_slot.as_str(),
                        "relocated conflicting entry"
                    );
                    report.relocated.push(Relocation {
                        entry: entry.clone(),
                        from,
                    });
                }
                None => {
                    tracing::warn!(
                        subject = entry.subject.as_str(),
                        section = entry.section.as_str(),
                        day = %entry.day,
                        slot = entry.time_slot.as_str(),
                        "no free cell; entry left in conflict"
                    );
                    report.unresolved.push(entry.clone());
                }
            }

            bookings.book_entry(&entry);
            working.push(entry);
        }

        tracing::info!(
            relocated = report.relocated.len(),
            unresolved = report.unresolved.len(),
            "repair pass finished"
        );
        report.entries = working;
        report
    }

    fn find_free_cell(
        &self,
        catalog: &dyn Catalog,
        days: &[Weekday],
        entry: &ScheduleEntry,
        bookings: &BookingIndex,
    ) -> Option<(Weekday, String)> {
        // Lecturers outside the catalog carry no availability restriction.
        let lecturer = catalog.faculty_by_name(&entry.lecturer);

        days.iter()
            .copied()
            .filter(|&day| lecturer.map_or(true, |f| f.is_available_on(day)))
            .find_map(|day| {
                self.config
                    .week
                    .time_slots
                    .iter()
                    .find(|slot| bookings.is_free_for(day, slot, entry))
                    .map(|slot| (day, slot.clone()))
            })
    }
}

/// Indices of entries that lose their cell to an earlier claimant.
fn mark_conflicting(entries: &[ScheduleEntry]) -> HashSet<usize> {
    let mut marked = HashSet::new();

    for group in group_by_cell(entries) {
        let mut lecturers: HashSet<&str> = HashSet::new();
        let mut classrooms: HashSet<&str> = HashSet::new();
        for i in group {
            let e = &entries[i];
            if lecturers.contains(e.lecturer.as_str()) || classrooms.contains(e.classroom.as_str()) {
                marked.insert(i);
            } else {
                lecturers.insert(e.lecturer.as_str());
                classrooms.insert(e.classroom.as_str());
            }
        }
    }

    marked
}
