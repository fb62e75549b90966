//! Timetable construction, conflict detection, and repair.
//!
//! # Algorithm
//!
//! `Generator` is a randomized greedy builder: per section it places
//! mandatory non-academic periods first, then fills each schedulable day
//! with academic sessions, each drawing a random subject, a lecturer
//! available that day, and a free classroom. It is not optimal and makes
//! no fairness guarantee; it provides a fast, plausible starting draft.
//!
//! `ConflictDetector` reports lecturer and classroom double-bookings.
//! `Repairer` moves the losing side of each double-booking to the first
//! free cell on a day its lecturer teaches.
//!
//! # Statistics
//!
//! `TimetableStats` computes per-section, per-lecturer, and per-classroom
//! session counts, workload overloads, and conflict counts.

mod booking;
mod conflict;
mod generator;
mod repair;
mod stats;

pub use booking::BookingIndex;
pub use conflict::ConflictDetector;
pub use generator::{GenerateRequest, Generator};
pub use repair::{Relocation, RepairReport, Repairer};
pub use stats::{Overload, TimetableStats};
