//! Weekly class timetabling with a review workflow.
//!
//! Builds weekly timetables for course sections from a catalog of
//! subjects, classrooms, and faculty, finds and repairs double-bookings,
//! and carries each timetable through draft, review, and approval.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ScheduleEntry`, `TimetableVersion`,
//!   `Subject`, `Classroom`, `FacultyMember`, `HolidaySet`, `Role`
//! - **`catalog`**: The `Catalog` read contract and the `CatalogStore` repository
//! - **`config`**: Weekly grid, mandatory periods, and generation defaults
//! - **`scheduler`**: `Generator`, `ConflictDetector`, `Repairer`, `TimetableStats`
//! - **`workflow`**: `VersionManager`, the version lifecycle facade
//! - **`persistence`**: `Persistence` with in-memory and JSON-file stores
//! - **`notify`**: `Notifier` and the in-memory `NotificationLog`
//! - **`views`** / **`dashboard`**: Read-side projections per role
//! - **`validation`**: Catalog and request integrity checks
//!
//! # Failure model
//!
//! Scheduling never fails: sessions that cannot be placed are omitted,
//! conflicts that cannot be repaired are reported. Unknown ids and
//! refused transitions come back as `None`/`false`. Only storage,
//! configuration, and an exhausted version counter produce an [`Error`].

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod notify;
pub mod persistence;
pub mod scheduler;
pub mod validation;
pub mod views;
pub mod workflow;

pub use error::{Error, Result};
