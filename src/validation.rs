//! Input validation for timetable generation.
//!
//! Checks structural integrity of the catalog and of a generation
//! request before scheduling. Detects:
//! - Duplicate IDs
//! - Subjects owned by unknown faculty
//! - Faculty with no teaching day
//! - No bookable classroom
//! - Empty section labels and inverted per-day bounds
//!
//! Findings do not stop generation; they explain why a generated
//! timetable came out thinner than requested.

use std::collections::HashSet;

use crate::catalog::Catalog;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A subject references a faculty member that doesn't exist.
    UnknownFaculty,
    /// A faculty member is available on no day.
    NoAvailability,
    /// No classroom is flagged available.
    NoClassroom,
    /// A section label is empty.
    EmptySection,
    /// Minimum sessions per day exceeds the maximum.
    InvertedBounds,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates catalog data.
///
/// Checks:
/// 1. No duplicate subject, classroom, or faculty IDs
/// 2. Every subject's owner exists
/// 3. Every faculty member is available at least one day
/// 4. At least one classroom is available
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &dyn Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    let mut faculty_ids = HashSet::new();
    for f in catalog.faculty() {
        if !faculty_ids.insert(f.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate faculty ID: {}", f.id),
            ));
        }
        if f.availability.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoAvailability,
                format!("Faculty '{}' is not available on any day", f.name),
            ));
        }
    }

    let mut subject_ids = HashSet::new();
    for s in catalog.subjects() {
        if !subject_ids.insert(s.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate subject ID: {}", s.id),
            ));
        }
        if !faculty_ids.contains(s.faculty_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownFaculty,
                format!(
                    "Subject '{}' references unknown faculty '{}'",
                    s.name, s.faculty_id
                ),
            ));
        }
    }

    let mut classroom_ids = HashSet::new();
    for c in catalog.classrooms() {
        if !classroom_ids.insert(c.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate classroom ID: {}", c.id),
            ));
        }
    }

    if catalog.available_classrooms().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoClassroom,
            "No classroom is available for booking",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
