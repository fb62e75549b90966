//! Read-side projections of timetable versions.
//!
//! Filters used to display a version: per section, per lecturer, and
//! the version a role opens by default.

use std::collections::BTreeSet;

use crate::models::{Role, ScheduleEntry, TimetableVersion, VersionStatus};

/// Sorted, unique section labels across `versions`.
pub fn sections(versions: &[TimetableVersion]) -> Vec<String> {
    versions
        .iter()
        .flat_map(|v| v.entries.iter().map(|e| e.section.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Entries of one section, in stored order.
pub fn section_view<'a>(version: &'a TimetableVersion, section: &str) -> Vec<&'a ScheduleEntry> {
    version.entries_for_section(section)
}

/// A lecturer's week: their own classes plus the non-academic sessions
/// (`mandatory_subjects`) of every section they teach.
pub fn lecturer_view<'a>(
    version: &'a TimetableVersion,
    lecturer: &str,
    mandatory_subjects: &[&str],
) -> Vec<&'a ScheduleEntry> {
    let taught: BTreeSet<&str> = version
        .entries
        .iter()
        .filter(|e| e.lecturer == lecturer)
        .map(|e| e.section.as_str())
        .collect();

    version
        .entries
        .iter()
        .filter(|e| {
            e.lecturer == lecturer
                || (mandatory_subjects.contains(&e.subject.as_str())
                    && taught.contains(e.section.as_str()))
        })
        .collect()
}

/// The version a role sees first.
///
/// Admins get the newest version awaiting review, else the approved one,
/// else the newest. Lecturers get the approved one, else the newest.
/// Students only ever see the approved version.
pub fn default_version_for(role: Role, versions: &[TimetableVersion]) -> Option<&TimetableVersion> {
    let mut newest_first: Vec<&TimetableVersion> = versions.iter().collect();
    newest_first.sort_by(|a, b| b.version.cmp(&a.version));

    let find = |status: VersionStatus| newest_first.iter().copied().find(|v| v.status == status);
    let newest = newest_first.first().copied();

    match role {
        Role::Admin => find(VersionStatus::PendingApproval)
            .or_else(|| find(VersionStatus::Approved))
            .or(newest),
        Role::Lecturer => find(VersionStatus::Approved).or(newest),
        Role::Student => find(VersionStatus::Approved),
    }
}
