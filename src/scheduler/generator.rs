//! Randomized two-stage timetable generator.
//!
//! # Algorithm
//!
//! For each requested section, sharing one [`BookingIndex`] across all
//! sections of the call:
//!
//! 1. **Mandatory periods.** Each configured non-academic period is
//!    placed `sessions` times. Days (holidays excluded) are tried in
//!    random order, and within a day the slots in random order; the first
//!    cell where the period's lecturer is available that weekday, the
//!    section is free, and the lecturer is not booked is taken.
//! 2. **Academic fill.** Per schedulable day, a target in
//!    `[min_classes, max_classes]` is drawn and reduced by the sessions
//!    stage 1 already put on that day. Slots are visited in random order;
//!    in each, subjects whose lecturer teaches that weekday are tried in
//!    random order, and the first one with a free lecturer and a free
//!    available classroom (random order) is committed.
//!
//! Anything that cannot be placed is omitted. Generation never fails.
//!
//! # Complexity
//! O(s * d * t * (p + c)) where s=sections, d=days, t=slots,
//! p=subjects, c=classrooms.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use super::BookingIndex;
use crate::catalog::Catalog;
use crate::config::{EngineConfig, MandatoryPeriod};
use crate::models::{FacultyMember, ScheduleEntry, Weekday};
use crate::validation::{ValidationError, ValidationErrorKind, ValidationResult};

/// Input container for generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    /// Section labels to generate, in order.
    pub sections: Vec<String>,
    /// Lower bound of sessions per section per day.
    pub min_classes: u32,
    /// Upper bound of sessions per section per day.
    pub max_classes: u32,
}

impl GenerateRequest {
    /// Creates a request.
    pub fn new<S: Into<String>>(
        sections: impl IntoIterator<Item = S>,
        min_classes: u32,
        max_classes: u32,
    ) -> Self {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
            min_classes,
            max_classes,
        }
    }

    /// A request using the configured default sections and bounds.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            sections: config.default_sections.clone(),
            min_classes: config.default_min_classes,
            max_classes: config.default_max_classes,
        }
    }

    /// Sets the sections.
    pub fn with_sections<S: Into<String>>(mut self, sections: impl IntoIterator<Item = S>) -> Self {
        self.sections = sections.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the per-day bounds.
    pub fn with_bounds(mut self, min_classes: u32, max_classes: u32) -> Self {
        self.min_classes = min_classes;
        self.max_classes = max_classes;
        self
    }

    /// Checks section labels and bounds.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        if self.sections.iter().any(|s| s.trim().is_empty()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptySection,
                "Section labels must be non-empty",
            ));
        }
        if self.min_classes > self.max_classes {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedBounds,
                format!(
                    "min_classes ({}) exceeds max_classes ({})",
                    self.min_classes, self.max_classes
                ),
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Usable sections and bounds: blank labels dropped, config default
    /// sections when none remain, and `max` raised to `min` if inverted.
    fn normalized(&self, config: &EngineConfig) -> (Vec<String>, u32, u32) {
        let mut sections: Vec<String> = self
            .sections
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if sections.is_empty() {
            sections = config.default_sections.clone();
        }
        let max = self.max_classes.max(self.min_classes);
        (sections, self.min_classes, max)
    }
}

/// Two-stage randomized timetable generator.
///
/// # Example
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_timetable::catalog::CatalogStore;
/// use u_timetable::config::EngineConfig;
/// use u_timetable::scheduler::{GenerateRequest, Generator};
///
/// let config = EngineConfig::default();
/// let catalog = CatalogStore::demo();
/// let request = GenerateRequest::new(["A", "B"], 2, 4);
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let entries = Generator::new(&config).generate(&catalog, &request, &mut rng);
/// assert!(!entries.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct Generator<'a> {
    config: &'a EngineConfig,
}

impl<'a> Generator<'a> {
    /// Creates a generator over `config`.
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Generates entries for every requested section.
    pub fn generate<R: Rng>(
        &self,
        catalog: &dyn Catalog,
        request: &GenerateRequest,
        rng: &mut R,
    ) -> Vec<ScheduleEntry> {
        if let Err(errors) = request.validate() {
            for e in &errors {
                tracing::warn!(kind = ?e.kind, "{}", e.message);
            }
        }
        let (sections, min_classes, max_classes) = request.normalized(self.config);
        let days = self.config.week.schedulable_days(catalog.holidays());

        let mut bookings = BookingIndex::new();
        let mut entries = Vec::new();

        for section in &sections {
            let before = entries.len();
            let per_day = self.place_mandatory(catalog, section, &days, &mut bookings, &mut entries, rng);
            self.fill_academic(
                catalog,
                section,
                &days,
                (min_classes, max_classes),
                &per_day,
                &mut bookings,
                &mut entries,
                rng,
            );
            tracing::debug!(
                section = section.as_str(),
                sessions = entries.len() - before,
                "generated section timetable"
            );
        }

        tracing::info!(
            sections = sections.len(),
            entries = entries.len(),
            "generated timetable"
        );
        entries
    }

    /// Stage 1. Returns sessions placed per day.
    fn place_mandatory<R: Rng>(
        &self,
        catalog: &dyn Catalog,
        section: &str,
        days: &[Weekday],
        bookings: &mut BookingIndex,
        entries: &mut Vec<ScheduleEntry>,
        rng: &mut R,
    ) -> HashMap<Weekday, u32> {
        let mut per_day: HashMap<Weekday, u32> = HashMap::new();

        for period in &self.config.mandatory_periods {
            let Some(lecturer) = mandatory_lecturer(catalog, period) else {
                tracing::warn!(
                    subject = period.subject.as_str(),
                    "mandatory subject has no catalog lecturer; skipped"
                );
                continue;
            };

            for _ in 0..period.sessions {
                let placed = self.find_mandatory_cell(lecturer, period, section, days, bookings, rng);
                let Some((day, slot)) = placed else {
                    tracing::debug!(
                        section,
                        subject = period.subject.as_str(),
                        "no cell for mandatory session; omitted"
                    );
                    continue;
                };

                bookings.book_lecturer(day, &slot, &lecturer.name);
                bookings.book_section(day, &slot, section);
                if self.config.book_mandatory_classrooms {
                    bookings.book_classroom(day, &slot, &period.classroom);
                }
                *per_day.entry(day).or_insert(0) += 1;
                entries.push(ScheduleEntry::new(
                    day,
                    slot,
                    period.subject.clone(),
                    lecturer.name.clone(),
                    period.classroom.clone(),
                    section,
                ));
            }
        }

        per_day
    }

    fn find_mandatory_cell<R: Rng>(
        &self,
        lecturer: &FacultyMember,
        period: &MandatoryPeriod,
        section: &str,
        days: &[Weekday],
        bookings: &BookingIndex,
        rng: &mut R,
    ) -> Option<(Weekday, String)> {
        let mut day_order = days.to_vec();
        day_order.shuffle(rng);

        for day in day_order {
            if !lecturer.is_available_on(day) {
                continue;
            }
            let mut slots: Vec<&String> = self.config.week.time_slots.iter().collect();
            slots.shuffle(rng);
            for slot in slots {
                if bookings.is_section_booked(day, slot, section)
                    || bookings.is_lecturer_booked(day, slot, &lecturer.name)
                    || (self.config.book_mandatory_classrooms
                        && bookings.is_classroom_booked(day, slot, &period.classroom))
                {
                    continue;
                }
                return Some((day, slot.clone()));
            }
        }
        None
    }

    /// Stage 2.
    #[allow(clippy::too_many_arguments)]
    fn fill_academic<R: Rng>(
        &self,
        catalog: &dyn Catalog,
        section: &str,
        days: &[Weekday],
        (min_classes, max_classes): (u32, u32),
        mandatory_per_day: &HashMap<Weekday, u32>,
        bookings: &mut BookingIndex,
        entries: &mut Vec<ScheduleEntry>,
        rng: &mut R,
    ) {
        let classrooms = catalog.available_classrooms();

        for &day in days {
            let target = rng.random_range(min_classes..=max_classes);
            let already = mandatory_per_day.get(&day).copied().unwrap_or(0);
            let quota = target.saturating_sub(already);
            if quota == 0 {
                continue;
            }

            // (subject name, lecturer name) pairs teachable today
            let mut pool: Vec<(&str, &str)> = catalog
                .subjects()
                .iter()
                .filter(|s| !self.config.is_mandatory(&s.name))
                .filter_map(|s| {
                    let owner = catalog.faculty_by_id(&s.faculty_id)?;
                    owner
                        .is_available_on(day)
                        .then_some((s.name.as_str(), owner.name.as_str()))
                })
                .collect();
            if pool.is_empty() {
                continue;
            }

            let mut slots: Vec<&String> = self.config.week.time_slots.iter().collect();
            slots.shuffle(rng);

            let mut placed = 0;
            for slot in slots {
                if placed >= quota {
                    break;
                }
                if bookings.is_section_booked(day, slot, section) {
                    continue;
                }

                pool.shuffle(rng);
                let mut rooms = classrooms.clone();
                rooms.shuffle(rng);

                let choice = pool
                    .iter()
                    .filter(|(_, lecturer)| !bookings.is_lecturer_booked(day, slot, lecturer))
                    .find_map(|&(subject, lecturer)| {
                        rooms
                            .iter()
                            .find(|room| !bookings.is_classroom_booked(day, slot, &room.name))
                            .map(|room| (subject, lecturer, room.name.as_str()))
                    });

                if let Some((subject, lecturer, classroom)) = choice {
                    let entry = ScheduleEntry::new(day, slot.clone(), subject, lecturer, classroom, section);
                    bookings.book_entry(&entry);
                    entries.push(entry);
                    placed += 1;
                }
            }

            if placed < quota {
                tracing::debug!(
                    section,
                    day = %day,
                    placed,
                    quota,
                    "academic quota not met"
                );
            }
        }
    }
}

/// Lecturer of the catalog subject named like the mandatory period.
fn mandatory_lecturer<'c>(
    catalog: &'c dyn Catalog,
    period: &MandatoryPeriod,
) -> Option<&'c FacultyMember> {
    let subject = catalog.subject_by_name(&period.subject)?;
    catalog.faculty_by_id(&subject.faculty_id)
}
