//! Role-specific landing summary.

use chrono::{DateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::catalog::Catalog;
use crate::models::{
    slot_bounds, QuickAction, Role, TimetableVersion, User, VersionStatus, Weekday,
};

/// How many versions the dashboard lists.
const RECENT_VERSIONS: usize = 3;

/// A class still ahead today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpcomingClass {
    pub subject: String,
    pub time_slot: String,
    pub classroom: String,
    pub section: String,
    /// Taught by the viewing lecturer (and so cancellable by them).
    pub is_my_class: bool,
}

/// A version as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionSummary {
    pub id: String,
    pub version: u32,
    pub status: VersionStatus,
    pub created_at: DateTime<Utc>,
}

/// What a user sees after signing in.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Today's remaining classes from the approved version. Empty for admins.
    pub upcoming_classes: Vec<UpcomingClass>,
    /// Names of subjects the user owns. Empty for students.
    pub my_subjects: Vec<String>,
    /// Versions awaiting review.
    pub pending_review_count: usize,
    /// Newest versions first.
    pub recent_versions: Vec<VersionSummary>,
    pub quick_actions: &'static [QuickAction],
}

impl Dashboard {
    /// Builds the dashboard for `user` at `today`/`now`.
    ///
    /// A class is upcoming while its slot's end time is after `now`.
    /// Slots whose label does not parse as `HH:MM-HH:MM` never count.
    pub fn build(
        user: &User,
        versions: &[TimetableVersion],
        catalog: &dyn Catalog,
        today: Weekday,
        now: NaiveTime,
    ) -> Self {
        let upcoming_classes = match user.role {
            Role::Admin => Vec::new(),
            _ => upcoming(user, versions, today, now),
        };

        let my_subjects = match user.role {
            Role::Student => Vec::new(),
            _ => catalog
                .subjects()
                .iter()
                .filter(|s| s.faculty_id == user.id)
                .map(|s| s.name.clone())
                .collect(),
        };

        let pending_review_count = versions
            .iter()
            .filter(|v| v.status == VersionStatus::PendingApproval)
            .count();

        let mut recent: Vec<&TimetableVersion> = versions.iter().collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.version.cmp(&a.version)));
        let recent_versions = recent
            .into_iter()
            .take(RECENT_VERSIONS)
            .map(|v| VersionSummary {
                id: v.id.clone(),
                version: v.version,
                status: v.status,
                created_at: v.created_at,
            })
            .collect();

        Self {
            upcoming_classes,
            my_subjects,
            pending_review_count,
            recent_versions,
            quick_actions: user.role.quick_actions(),
        }
    }
}

fn upcoming(
    user: &User,
    versions: &[TimetableVersion],
    today: Weekday,
    now: NaiveTime,
) -> Vec<UpcomingClass> {
    let Some(approved) = versions
        .iter()
        .find(|v| v.status == VersionStatus::Approved)
    else {
        return Vec::new();
    };

    let mut classes: Vec<_> = approved
        .entries
        .iter()
        .filter(|e| e.day == today)
        .filter(|e| slot_bounds(&e.time_slot).is_some_and(|(_, end)| end > now))
        .filter(|e| match (user.role, user.section.as_deref()) {
            (Role::Lecturer, _) => e.lecturer == user.name,
            (Role::Student, Some(section)) => e.section == section,
            _ => true,
        })
        .collect();
    classes.sort_by(|a, b| a.time_slot.cmp(&b.time_slot));

    classes
        .into_iter()
        .map(|e| UpcomingClass {
            subject: e.subject.clone(),
            time_slot: e.time_slot.clone(),
            classroom: e.classroom.clone(),
            section: e.section.clone(),
            is_my_class: user.role == Role::Lecturer && e.lecturer == user.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use crate::models::{ScheduleEntry, Subject};
    use chrono::Duration;

    fn entry(day: Weekday, slot: &str, lecturer: &str, section: &str) -> ScheduleEntry {
        ScheduleEntry::new(day, slot, "Subject", lecturer, "Room 101", section)
    }

    fn versions() -> Vec<TimetableVersion> {
        let approved = TimetableVersion::draft(
            "tt-1",
            1,
            vec![
                entry(Weekday::Monday, "13:10-14:10", "Prof. Smith", "A"),
                entry(Weekday::Monday, "09:00-10:00", "Prof. Smith", "A"),
                entry(Weekday::Monday, "10:10-11:10", "Dr. Jones", "B"),
                entry(Weekday::Tuesday, "15:20-16:20", "Prof. Smith", "A"),
            ],
        )
        .with_status(VersionStatus::Approved);
        let mut pending = TimetableVersion::draft("tt-2", 2, Vec::new())
            .with_status(VersionStatus::PendingApproval);
        pending.created_at = approved.created_at + Duration::seconds(1);
        vec![approved, pending]
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_lecturer_dashboard() {
        let catalog = CatalogStore::new()
            .with_subject(Subject::new("S1", "Advanced React", "CS401", "lecturer01"))
            .with_subject(Subject::new("S2", "Python for AI", "AI302", "lecturer02"));
        let user = User::new("lecturer01", "Prof. Smith", Role::Lecturer);

        let d = Dashboard::build(&user, &versions(), &catalog, Weekday::Monday, at(9, 30));
        let slots: Vec<_> = d.upcoming_classes.iter().map(|c| c.time_slot.as_str()).collect();
        assert_eq!(slots, vec!["09:00-10:00", "13:10-14:10"]);
        assert!(d.upcoming_classes.iter().all(|c| c.is_my_class));
        assert_eq!(d.my_subjects, vec!["Advanced React"]);
        assert_eq!(d.pending_review_count, 1);
        assert_eq!(d.quick_actions, Role::Lecturer.quick_actions());
    }

    #[test]
    fn test_finished_classes_drop_out() {
        let user = User::new("lecturer01", "Prof. Smith", Role::Lecturer);
        let d = Dashboard::build(&user, &versions(), &CatalogStore::new(), Weekday::Monday, at(10, 0));
        assert_eq!(d.upcoming_classes.len(), 1);
        assert_eq!(d.upcoming_classes[0].time_slot, "13:10-14:10");
    }

    #[test]
    fn test_student_sees_own_section() {
        let user = User::new("student01", "Student", Role::Student).with_section("B");
        let d = Dashboard::build(&user, &versions(), &CatalogStore::new(), Weekday::Monday, at(8, 0));
        assert_eq!(d.upcoming_classes.len(), 1);
        assert_eq!(d.upcoming_classes[0].section, "B");
        assert!(!d.upcoming_classes[0].is_my_class);
        assert!(d.my_subjects.is_empty());
    }

    #[test]
    fn test_admin_dashboard() {
        let user = User::new("admin01", "Admin", Role::Admin);
        let d = Dashboard::build(&user, &versions(), &CatalogStore::new(), Weekday::Monday, at(8, 0));
        assert!(d.upcoming_classes.is_empty());
        assert_eq!(d.recent_versions.len(), 2);
        assert_eq!(d.recent_versions[0].version, 2);
        assert_eq!(d.quick_actions.len(), 3);
    }
}
