//! Timetabling domain models.
//!
//! Provides the core data types for representing a weekly academic
//! timetable: the catalog resources it draws on, the entries it is
//! made of, the versions that wrap it, and the users who review it.
//!
//! # Domain Mappings
//!
//! | u-timetable | University | School | Training Center |
//! |-------------|------------|--------|-----------------|
//! | Section | Cohort | Class/Form | Course Run |
//! | Subject | Course | Subject | Module |
//! | FacultyMember | Lecturer | Teacher | Trainer |
//! | Classroom | Lecture Hall | Classroom | Training Room |
//! | TimetableVersion | Term Timetable | School Timetable | Course Calendar |

mod calendar;
mod resource;
mod schedule;
mod user;

pub use calendar::{slot_bounds, HolidaySet, ParseWeekdayError, TeachingWeek, Weekday};
pub use resource::{Classroom, FacultyMember, Subject};
pub use schedule::{Cell, Conflict, ConflictKind, ScheduleEntry, TimetableVersion, VersionStatus};
pub use user::{ActionKind, Audience, Notification, QuickAction, Role, User};
