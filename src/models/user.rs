//! Users, roles, and notification models.
//!
//! Roles decide which notifications a user sees, which timetable
//! version they open by default, and which quick actions they get.
//! All of this is a fixed table keyed by [`Role`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a signed-in user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Student,
    Lecturer,
    Admin,
}

/// Recipients of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Audience {
    All,
    Student,
    Lecturer,
    Admin,
}

/// A user of the system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: Role,
    /// Section a student belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// A message delivered to an audience.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    pub audience: Audience,
    /// Restricts a student notification to one section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

/// What a quick action does when triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActionKind {
    /// Switch to another page.
    Navigate,
    /// Open a dialog.
    Modal,
}

/// A shortcut offered on a role's dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickAction {
    pub label: &'static str,
    pub kind: ActionKind,
    pub target: &'static str,
}

const ADMIN_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "Generate Timetable",
        kind: ActionKind::Navigate,
        target: "scheduler",
    },
    QuickAction {
        label: "Manage Classrooms & Faculty",
        kind: ActionKind::Navigate,
        target: "management",
    },
    QuickAction {
        label: "Send Notification",
        kind: ActionKind::Modal,
        target: "sendNotification",
    },
];

const LECTURER_ACTIONS: &[QuickAction] = &[
    QuickAction {
        label: "Generate Timetable",
        kind: ActionKind::Navigate,
        target: "scheduler",
    },
    QuickAction {
        label: "Update My Subjects",
        kind: ActionKind::Modal,
        target: "manageSubjects",
    },
    QuickAction {
        label: "Send Notification",
        kind: ActionKind::Modal,
        target: "sendNotification",
    },
];

const STUDENT_ACTIONS: &[QuickAction] = &[QuickAction {
    label: "View Full Timetable",
    kind: ActionKind::Navigate,
    target: "scheduler",
}];

impl Role {
    /// The audience a notification must target for this role to see it
    /// (besides [`Audience::All`]).
    pub fn audience(&self) -> Audience {
        match self {
            Role::Student => Audience::Student,
            Role::Lecturer => Audience::Lecturer,
            Role::Admin => Audience::Admin,
        }
    }

    /// Default recipients when this role sends a notification.
    pub fn default_send_target(&self) -> Audience {
        match self {
            Role::Lecturer => Audience::Student,
            Role::Student | Role::Admin => Audience::All,
        }
    }

    /// Whether this role may send notifications at all.
    pub fn can_send_notifications(&self) -> bool {
        !matches!(self, Role::Student)
    }

    /// Dashboard shortcuts for this role.
    pub fn quick_actions(&self) -> &'static [QuickAction] {
        match self {
            Role::Admin => ADMIN_ACTIONS,
            Role::Lecturer => LECTURER_ACTIONS,
            Role::Student => STUDENT_ACTIONS,
        }
    }
}

impl User {
    /// Creates a user.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            section: None,
        }
    }

    /// Sets the student's section.
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

impl Notification {
    /// Whether a user with `role` (and optional `section`) should see this.
    pub fn is_visible_to(&self, role: Role, section: Option<&str>) -> bool {
        let audience_matches = self.audience == Audience::All || self.audience == role.audience();
        if !audience_matches {
            return false;
        }
        match (&self.section, role, section) {
            (Some(target), Role::Student, Some(own)) => target == own,
            _ => true,
        }
    }
}
