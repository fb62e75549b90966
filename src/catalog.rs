//! Catalog of schedulable resources.
//!
//! [`Catalog`] is the read-only view the engine components consume.
//! [`CatalogStore`] is the owned repository behind it, with the
//! management operations (add/update/delete) an administrator uses.
//!
//! Unknown ids are not errors: mutations return `false`/`None`.

use uuid::Uuid;

use crate::models::{Classroom, FacultyMember, HolidaySet, Subject, Weekday};

/// Read access to subjects, classrooms, faculty, and holidays.
pub trait Catalog {
    /// All subjects.
    fn subjects(&self) -> &[Subject];

    /// All classrooms, available or not.
    fn classrooms(&self) -> &[Classroom];

    /// All faculty members.
    fn faculty(&self) -> &[FacultyMember];

    /// Weekdays excluded from scheduling.
    fn holidays(&self) -> &HolidaySet;

    /// Looks up a faculty member by id.
    fn faculty_by_id(&self, id: &str) -> Option<&FacultyMember> {
        self.faculty().iter().find(|f| f.id == id)
    }

    /// Looks up a faculty member by display name.
    fn faculty_by_name(&self, name: &str) -> Option<&FacultyMember> {
        self.faculty().iter().find(|f| f.name == name)
    }

    /// Looks up a subject by display name.
    fn subject_by_name(&self, name: &str) -> Option<&Subject> {
        self.subjects().iter().find(|s| s.name == name)
    }

    /// Classrooms the generator may book.
    fn available_classrooms(&self) -> Vec<&Classroom> {
        self.classrooms().iter().filter(|c| c.is_available).collect()
    }
}

/// Fields of a classroom that `update_classroom` may change.
#[derive(Debug, Clone, Default)]
pub struct ClassroomUpdate {
    pub name: Option<String>,
    pub capacity: Option<u32>,
}

/// Fields of a faculty member that `update_faculty` may change.
///
/// Availability is set at creation and not edited here.
#[derive(Debug, Clone, Default)]
pub struct FacultyUpdate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub workload_hours: Option<u32>,
}

/// In-memory catalog repository.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    subjects: Vec<Subject>,
    classrooms: Vec<Classroom>,
    faculty: Vec<FacultyMember>,
    holidays: HolidaySet,
}

impl CatalogStore {
    /// Creates an empty catalog with the default holidays.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subject with a caller-chosen id.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Adds a classroom with a caller-chosen id.
    pub fn with_classroom(mut self, classroom: Classroom) -> Self {
        self.classrooms.push(classroom);
        self
    }

    /// Adds a faculty member with a caller-chosen id.
    pub fn with_faculty(mut self, member: FacultyMember) -> Self {
        self.faculty.push(member);
        self
    }

    /// Replaces the holiday set.
    pub fn with_holidays(mut self, holidays: HolidaySet) -> Self {
        self.holidays = holidays;
        self
    }

    /// Adds a subject and returns its generated id.
    pub fn add_subject(
        &mut self,
        name: impl Into<String>,
        code: impl Into<String>,
        faculty_id: impl Into<String>,
    ) -> String {
        let id = format!("sub-{}", Uuid::new_v4());
        self.subjects
            .push(Subject::new(id.clone(), name, code, faculty_id));
        id
    }

    /// Removes a subject. Returns `false` if unknown.
    pub fn delete_subject(&mut self, id: &str) -> bool {
        let before = self.subjects.len();
        self.subjects.retain(|s| s.id != id);
        self.subjects.len() < before
    }

    /// Adds an available classroom and returns its generated id.
    pub fn add_classroom(&mut self, name: impl Into<String>, capacity: u32) -> String {
        let id = format!("cr-{}", Uuid::new_v4());
        self.classrooms
            .push(Classroom::new(id.clone(), name, capacity));
        id
    }

    /// Applies `update` to a classroom. Returns `None` if unknown.
    pub fn update_classroom(&mut self, id: &str, update: ClassroomUpdate) -> Option<&Classroom> {
        let room = self.classrooms.iter_mut().find(|c| c.id == id)?;
        if let Some(name) = update.name {
            room.name = name;
        }
        if let Some(capacity) = update.capacity {
            room.capacity = capacity;
        }
        Some(room)
    }

    /// Sets a classroom's availability flag. Returns `false` if unknown.
    pub fn set_classroom_availability(&mut self, id: &str, is_available: bool) -> bool {
        match self.classrooms.iter_mut().find(|c| c.id == id) {
            Some(room) => {
                room.is_available = is_available;
                true
            }
            None => false,
        }
    }

    /// Removes a classroom. Returns `false` if unknown.
    pub fn delete_classroom(&mut self, id: &str) -> bool {
        let before = self.classrooms.len();
        self.classrooms.retain(|c| c.id != id);
        self.classrooms.len() < before
    }

    /// Adds a faculty member and returns the generated id.
    pub fn add_faculty(
        &mut self,
        name: impl Into<String>,
        department: impl Into<String>,
        workload_hours: u32,
        availability: impl IntoIterator<Item = Weekday>,
    ) -> String {
        let id = format!("lecturer-{}", Uuid::new_v4());
        self.faculty.push(
            FacultyMember::new(id.clone(), name)
                .with_department(department)
                .with_workload(workload_hours)
                .with_availability(availability),
        );
        id
    }

    /// Applies `update` to a faculty member. Returns `None` if unknown.
    pub fn update_faculty(&mut self, id: &str, update: FacultyUpdate) -> Option<&FacultyMember> {
        let member = self.faculty.iter_mut().find(|f| f.id == id)?;
        if let Some(name) = update.name {
            member.name = name;
        }
        if let Some(department) = update.department {
            member.department = department;
        }
        if let Some(hours) = update.workload_hours {
            member.workload_hours = hours;
        }
        Some(member)
    }

    /// Removes a faculty member. Returns `false` if unknown.
    ///
    /// Subjects owned by the member stay; the generator skips them.
    pub fn delete_faculty(&mut self, id: &str) -> bool {
        let before = self.faculty.len();
        self.faculty.retain(|f| f.id != id);
        self.faculty.len() < before
    }

    /// Replaces the holiday set.
    pub fn set_holidays(&mut self, holidays: HolidaySet) {
        self.holidays = holidays;
    }

    /// Sample catalog: eighteen lecturers, seven academic subjects,
    /// twenty-eight classrooms, plus librarian and coach staff for the
    /// Library and Sports periods.
    pub fn demo() -> Self {
        use Weekday::{Friday, Monday, Thursday, Tuesday, Wednesday};

        let faculty = [
            ("lecturer01", "Prof. Smith", "Computer Science", 12, vec![Monday, Wednesday, Friday]),
            ("lecturer02", "Dr. Jones", "Artificial Intelligence", 15, vec![Tuesday, Thursday]),
            ("lecturer03", "Ms. Davis", "Design", 10, vec![Monday, Tuesday, Wednesday, Thursday, Friday]),
            ("lecturer04", "Dr. Emily Carter", "Mechanical Engineering", 14, vec![Monday, Tuesday, Wednesday]),
            ("lecturer05", "Prof. David Chen", "Electrical Engineering", 13, vec![Tuesday, Wednesday, Thursday]),
            ("lecturer06", "Dr. Sarah Miller", "Civil Engineering", 16, vec![Monday, Wednesday, Friday]),
            ("lecturer07", "Prof. Michael Brown", "Biotechnology", 11, vec![Thursday, Friday]),
            ("lecturer08", "Dr. Linda Wilson", "Physics", 14, vec![Monday, Tuesday, Thursday, Friday]),
            ("lecturer09", "Prof. Robert Taylor", "Chemistry", 12, vec![Monday, Wednesday, Friday]),
            ("lecturer10", "Dr. Jessica Martinez", "Mathematics", 15, vec![Tuesday, Thursday]),
            ("lecturer11", "Prof. William Anderson", "English", 9, vec![Monday, Tuesday, Wednesday]),
            ("lecturer12", "Dr. Karen Thompson", "Management", 13, vec![Tuesday, Wednesday, Thursday, Friday]),
            ("lecturer13", "Prof. Charles White", "Economics", 14, vec![Monday, Wednesday]),
            ("lecturer14", "Dr. Patricia Harris", "History", 10, vec![Tuesday, Thursday, Friday]),
            ("lecturer15", "Prof. Christopher Clark", "Sociology", 12, vec![Monday, Wednesday, Friday]),
            ("lecturer16", "Dr. Nancy Rodriguez", "Psychology", 15, vec![Monday, Tuesday, Thursday]),
            ("lecturer17", "Prof. Daniel Lewis", "Information Technology", 16, vec![Wednesday, Thursday, Friday]),
            ("lecturer18", "Dr. Betty Walker", "Environmental Science", 11, vec![Tuesday, Wednesday]),
            ("librarian01", "Mr. Librarian", "Library", 20, vec![Monday, Tuesday, Wednesday, Thursday, Friday]),
            ("coach01", "Coach Sports", "Physical Education", 20, vec![Monday, Tuesday, Wednesday, Thursday, Friday]),
        ];

        let subjects = [
            ("sub01", "Advanced React", "CS401", "lecturer01"),
            ("sub02", "Python for AI", "AI302", "lecturer02"),
            ("sub03", "Database Systems", "DB201", "lecturer02"),
            ("sub04", "UI/UX Design", "DS101", "lecturer03"),
            ("sub05", "Network Security", "CS505", "lecturer01"),
            ("sub06", "Cloud Computing", "IT601", "lecturer03"),
            ("sub07", "Machine Learning", "AI401", "lecturer02"),
            ("sub-lib", "Library", "LIB", "librarian01"),
            ("sub-sports", "Sports", "PE", "coach01"),
        ];

        let classrooms = [
            ("cr01", "Room 101", 50, true),
            ("cr02", "Lab A", 30, true),
            ("cr03", "Room 203", 60, false),
            ("cr04", "Hall B", 120, true),
            ("cr05", "Room 102", 50, true),
            ("cr06", "Lab B", 40, true),
            ("cr07", "Seminar Hall C", 150, true),
            ("cr08", "Room 301", 70, false),
            ("cr09", "Room 103", 50, true),
            ("cr10", "Room 104", 50, true),
            ("cr11", "Room 201", 60, true),
            ("cr12", "Room 202", 60, false),
            ("cr13", "Room 302", 70, true),
            ("cr14", "Room 303", 70, true),
            ("cr15", "Room 401", 80, true),
            ("cr16", "Room 402", 80, false),
            ("cr17", "Lab C", 40, true),
            ("cr18", "Lab D", 40, true),
            ("cr19", "Seminar Hall D", 150, false),
            ("cr20", "Auditorium A", 300, true),
            ("cr21", "Smart Room 1", 35, true),
            ("cr22", "Smart Room 2", 35, true),
            ("cr23", "E-Classroom 1", 60, false),
            ("cr24", "E-Classroom 2", 60, true),
            ("cr25", "Tutorial Room 1", 25, true),
            ("cr26", "Tutorial Room 2", 25, true),
            ("cr27", "Conference Hall", 100, false),
            ("cr28", "Drawing Hall", 90, true),
        ];

        Self {
            subjects: subjects
                .into_iter()
                .map(|(id, name, code, owner)| Subject::new(id, name, code, owner))
                .collect(),
            classrooms: classrooms
                .into_iter()
                .map(|(id, name, cap, avail)| Classroom::new(id, name, cap).with_availability(avail))
                .collect(),
            faculty: faculty
                .into_iter()
                .map(|(id, name, dept, hours, days)| {
                    FacultyMember::new(id, name)
                        .with_department(dept)
                        .with_workload(hours)
                        .with_availability(days)
                })
                .collect(),
            holidays: HolidaySet::default(),
        }
    }
}

impl Catalog for CatalogStore {
    fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    fn classrooms(&self) -> &[Classroom] {
        &self.classrooms
    }

    fn faculty(&self) -> &[FacultyMember] {
        &self.faculty
    }

    fn holidays(&self) -> &HolidaySet {
        &self.holidays
    }
}
