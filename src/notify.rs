//! Notification delivery.
//!
//! Workflow transitions announce themselves through a [`Notifier`]. The
//! crate ships [`NotificationLog`], an in-memory inbox; callers with a
//! real delivery channel implement the trait themselves.

use chrono::Utc;
use uuid::Uuid;

use crate::models::{Audience, Notification, Role};

/// Sink for workflow announcements.
pub trait Notifier {
    /// Delivers `message` to `audience`, optionally narrowed to one section.
    fn notify(&mut self, message: &str, audience: Audience, section: Option<&str>);
}

/// In-memory notification inbox, newest first.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    items: Vec<Notification>,
}

impl NotificationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications, newest first.
    pub fn all(&self) -> &[Notification] {
        &self.items
    }

    /// Notifications a user with `role` (and `section`, for students) sees.
    pub fn for_role(&self, role: Role, section: Option<&str>) -> Vec<&Notification> {
        self.items
            .iter()
            .filter(|n| n.is_visible_to(role, section))
            .collect()
    }

    /// Unread count as seen by `role`.
    pub fn unread_count(&self, role: Role, section: Option<&str>) -> usize {
        self.for_role(role, section)
            .into_iter()
            .filter(|n| !n.is_read)
            .count()
    }

    /// Marks one notification read. Returns `false` for unknown ids.
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.is_read = true;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Notifier for NotificationLog {
    fn notify(&mut self, message: &str, audience: Audience, section: Option<&str>) {
        tracing::info!(?audience, section, "notification: {message}");
        self.items.insert(
            0,
            Notification {
                id: format!("notif-{}", Uuid::new_v4()),
                message: message.to_string(),
                timestamp: Utc::now(),
                is_read: false,
                audience,
                section: section.map(String::from),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first() {
        let mut log = NotificationLog::new();
        log.notify("first", Audience::All, None);
        log.notify("second", Audience::All, None);
        assert_eq!(log.len(), 2);
        assert_eq!(log.all()[0].message, "second");
        assert_eq!(log.all()[1].message, "first");
    }

    #[test]
    fn test_for_role_filters_audience() {
        let mut log = NotificationLog::new();
        log.notify("everyone", Audience::All, None);
        log.notify("admins only", Audience::Admin, None);
        log.notify("students", Audience::Student, None);

        let admin: Vec<_> = log
            .for_role(Role::Admin, None)
            .iter()
            .map(|n| n.message.as_str())
            .collect();
        assert_eq!(admin, vec!["admins only", "everyone"]);

        let lecturer = log.for_role(Role::Lecturer, None);
        assert_eq!(lecturer.len(), 1);
        assert_eq!(lecturer[0].message, "everyone");
    }

    #[test]
    fn test_section_filter_for_students() {
        let mut log = NotificationLog::new();
        log.notify("A cancelled", Audience::Student, Some("A"));
        log.notify("B cancelled", Audience::Student, Some("B"));

        let a = log.for_role(Role::Student, Some("A"));
        assert_eq!(a.len(), 1);
        assert_eq!(a[0].message, "A cancelled");

        // A student without a section sees every student notice.
        assert_eq!(log.for_role(Role::Student, None).len(), 2);
    }

    #[test]
    fn test_mark_read() {
        let mut log = NotificationLog::new();
        log.notify("hello", Audience::All, None);
        let id = log.all()[0].id.clone();

        assert_eq!(log.unread_count(Role::Student, None), 1);
        assert!(log.mark_read(&id));
        assert_eq!(log.unread_count(Role::Student, None), 0);
        assert!(!log.mark_read("missing"));
    }
}
