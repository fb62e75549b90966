//! Weekly calendar models.
//!
//! Defines the teaching week: which weekdays carry classes, which
//! time-slot labels exist on each day, and which weekdays are holidays.
//!
//! # Time Model
//! A timetable repeats weekly. A cell is identified by a weekday and a
//! time-slot label such as `"09:00-10:00"`. Labels are opaque for
//! scheduling purposes; only the dashboard parses them into clock times.
//!
//! # Precedence
//! Holidays override teaching days. A weekday is schedulable iff:
//! - It is listed in the teaching week's `days`, AND
//! - It is NOT in the `HolidaySet`.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// Day of the week, serialized by its full English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All seven days, Monday first.
    pub fn all() -> [Weekday; 7] {
        [
            Weekday::Monday,
            Weekday::Tuesday,
            Weekday::Wednesday,
            Weekday::Thursday,
            Weekday::Friday,
            Weekday::Saturday,
            Weekday::Sunday,
        ]
    }

    /// Monday through Friday.
    pub fn weekdays() -> Vec<Weekday> {
        Self::all()[..5].to_vec()
    }

    /// Full English name.
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown weekday name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weekday: {0}")]
pub struct ParseWeekdayError(pub String);

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseWeekdayError(s.to_string()))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// Weekdays excluded from scheduling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidaySet(BTreeSet<Weekday>);

impl HolidaySet {
    /// Creates an empty holiday set.
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds a holiday (builder form).
    pub fn with(mut self, day: Weekday) -> Self {
        self.0.insert(day);
        self
    }

    /// Whether `day` is a holiday.
    #[inline]
    pub fn contains(&self, day: Weekday) -> bool {
        self.0.contains(&day)
    }

    /// Marks `day` as a holiday. Returns `false` if it already was.
    pub fn insert(&mut self, day: Weekday) -> bool {
        self.0.insert(day)
    }

    /// Unmarks `day`. Returns `false` if it was not a holiday.
    pub fn remove(&mut self, day: Weekday) -> bool {
        self.0.remove(&day)
    }

    /// Holidays in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Saturday is a holiday unless configured otherwise.
impl Default for HolidaySet {
    fn default() -> Self {
        Self::new().with(Weekday::Saturday)
    }
}

impl FromIterator<Weekday> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The weekly grid sessions are placed into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeachingWeek {
    /// Days that may carry classes, in search order.
    pub days: Vec<Weekday>,
    /// Time-slot labels, in search order.
    pub time_slots: Vec<String>,
}

impl TeachingWeek {
    /// Creates a teaching week.
    pub fn new(days: Vec<Weekday>, time_slots: Vec<String>) -> Self {
        Self { days, time_slots }
    }

    /// Teaching days that are not holidays, in configured order.
    pub fn schedulable_days(&self, holidays: &HolidaySet) -> Vec<Weekday> {
        self.days
            .iter()
            .copied()
            .filter(|d| !holidays.contains(*d))
            .collect()
    }

    /// Number of cells per day.
    #[inline]
    pub fn slots_per_day(&self) -> usize {
        self.time_slots.len()
    }
}

/// Monday-Friday with six one-hour slots.
impl Default for TeachingWeek {
    fn default() -> Self {
        Self {
            days: Weekday::weekdays(),
            time_slots: [
                "09:00-10:00",
                "10:10-11:10",
                "11:10-12:10",
                "13:10-14:10",
                "14:10-15:10",
                "15:20-16:20",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// Parses the start and end of a `"HH:MM-HH:MM"` slot label.
///
/// Returns `None` for labels that do not follow that shape.
pub fn slot_bounds(label: &str) -> Option<(NaiveTime, NaiveTime)> {
    let (start, end) = label.split_once('-')?;
    let start = NaiveTime::parse_from_str(start.trim(), "%H:%M").ok()?;
    let end = NaiveTime::parse_from_str(end.trim(), "%H:%M").ok()?;
    Some((start, end))
}
