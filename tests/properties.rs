//! Invariants of generation, detection, repair, and version numbering.

use std::collections::HashSet;

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use u_timetable::catalog::CatalogStore;
use u_timetable::config::EngineConfig;
use u_timetable::models::{ScheduleEntry, Weekday};
use u_timetable::notify::NotificationLog;
use u_timetable::persistence::MemoryStore;
use u_timetable::scheduler::{ConflictDetector, GenerateRequest, Generator, Repairer};
use u_timetable::workflow::VersionManager;

const SLOTS: [&str; 6] = [
    "09:00-10:00",
    "10:10-11:10",
    "11:10-12:10",
    "13:10-14:10",
    "14:10-15:10",
    "15:20-16:20",
];
const LECTURERS: [&str; 4] = ["Prof. Smith", "Dr. Jones", "Ms. Davis", "Dr. Emily Carter"];
const ROOMS: [&str; 3] = ["Room 101", "Lab A", "Hall B"];
const SECTIONS: [&str; 3] = ["A", "B", "C"];

fn arb_entry() -> impl Strategy<Value = ScheduleEntry> {
    (0usize..5, 0usize..6, 0usize..4, 0usize..3, 0usize..3).prop_map(|(d, t, l, r, s)| {
        ScheduleEntry::new(
            Weekday::weekdays()[d],
            SLOTS[t],
            "Subject",
            LECTURERS[l],
            ROOMS[r],
            SECTIONS[s],
        )
    })
}

fn assert_exclusive(entries: &[ScheduleEntry]) {
    let mut lecturers = HashSet::new();
    let mut rooms = HashSet::new();
    let mut sections = HashSet::new();
    for e in entries {
        assert!(lecturers.insert((e.day, e.time_slot.clone(), e.lecturer.clone())), "lecturer clash: {e:?}");
        assert!(rooms.insert((e.day, e.time_slot.clone(), e.classroom.clone())), "classroom clash: {e:?}");
        assert!(sections.insert((e.day, e.time_slot.clone(), e.section.clone())), "section clash: {e:?}");
    }
}

fn tuple_multiset(entries: &[ScheduleEntry]) -> Vec<(String, String, String, String)> {
    let mut v: Vec<_> = entries
        .iter()
        .map(|e| (e.subject.clone(), e.lecturer.clone(), e.classroom.clone(), e.section.clone()))
        .collect();
    v.sort();
    v
}

proptest! {
    #[test]
    fn generated_timetables_are_exclusive(
        seed in any::<u64>(),
        sections in 1usize..=4,
        min in 0u32..=3,
        extra in 0u32..=3,
    ) {
        let config = EngineConfig::default();
        let catalog = CatalogStore::demo();
        let request = GenerateRequest::new(SECTIONS.iter().chain(["D"].iter()).take(sections).copied(), min, min + extra);
        let mut rng = SmallRng::seed_from_u64(seed);

        let entries = Generator::new(&config).generate(&catalog, &request, &mut rng);

        assert_exclusive(&entries);
        prop_assert!(ConflictDetector::new().detect(&entries).is_empty());
        prop_assert!(entries.iter().all(|e| e.day != Weekday::Saturday && e.day != Weekday::Sunday));
    }

    #[test]
    fn repair_keeps_sessions_and_is_noop_when_clean(
        entries in prop::collection::vec(arb_entry(), 0..24),
    ) {
        let config = EngineConfig::default();
        let catalog = CatalogStore::demo();
        let repairer = Repairer::new(&config);

        let report = repairer.repair(&catalog, &entries);

        prop_assert_eq!(report.entries.len(), entries.len());
        prop_assert_eq!(tuple_multiset(&report.entries), tuple_multiset(&entries));

        if report.is_fully_resolved() {
            prop_assert!(ConflictDetector::new().is_conflict_free(&report.entries));
            let again = repairer.repair(&catalog, &report.entries);
            prop_assert!(again.is_noop());
            prop_assert_eq!(again.entries, report.entries);
        }
    }

    #[test]
    fn repair_leaves_generated_timetables_alone(seed in any::<u64>()) {
        let config = EngineConfig::default();
        let catalog = CatalogStore::demo();
        let mut rng = SmallRng::seed_from_u64(seed);
        let entries = Generator::new(&config).generate(&catalog, &GenerateRequest::new(["A", "B"], 2, 4), &mut rng);

        let report = Repairer::new(&config).repair(&catalog, &entries);
        prop_assert!(report.is_noop());
        prop_assert_eq!(report.entries, entries);
    }

    #[test]
    fn version_numbers_strictly_increase(ops in prop::collection::vec(0u8..3, 1..12), seed in any::<u64>()) {
        let mut manager = VersionManager::open(
            CatalogStore::demo(),
            EngineConfig::default(),
            MemoryStore::new(),
            NotificationLog::new(),
        )
        .unwrap()
        .with_seed(seed);

        for op in ops {
            let max_before = manager.versions().iter().map(|v| v.version).max().unwrap_or(0);
            let created = match op {
                0 => Some(manager.generate(&GenerateRequest::new(["A"], 1, 2)).unwrap()),
                1 => {
                    let source = manager.versions().first().map(|v| v.id.clone());
                    match source {
                        Some(id) => manager.clone_as_draft(&id).unwrap(),
                        None => None,
                    }
                }
                _ => {
                    let newest = manager.versions().last().map(|v| v.id.clone());
                    if let Some(id) = newest {
                        manager.delete(&id).unwrap();
                    }
                    None
                }
            };
            if let Some(v) = created {
                prop_assert!(v.version > max_before);
            }
        }
    }
}
