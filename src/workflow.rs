//! Timetable version lifecycle.
//!
//! [`VersionManager`] owns the catalog, the version list, and the
//! storage and notification collaborators. Every version moves through
//!
//! ```text
//! Draft --submit--> PendingApproval --approve--> Approved
//!   ^                     |
//!   |                  reject(notes)
//!   |                     v
//!   +-----(edit)------ Rejected --submit--> PendingApproval
//! ```
//!
//! Unknown ids and refused transitions return `None`/`false` and leave
//! state untouched. `Err` from a mutation means the change was applied
//! in memory but could not be written to storage.
//!
//! Mutations take `&mut self`; wrap the manager in a `Mutex` to share it.

use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

use crate::catalog::{Catalog, CatalogStore};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::models::{Audience, Conflict, HolidaySet, ScheduleEntry, TimetableVersion, VersionStatus};
use crate::notify::Notifier;
use crate::persistence::Persistence;
use crate::scheduler::{ConflictDetector, GenerateRequest, Generator, RepairReport, Repairer, TimetableStats};
use crate::validation::validate_catalog;

/// Note written on an Approved version displaced by a newer approval.
pub const SUPERSEDED_NOTE: &str = "Superseded by new approved version";

/// Owns timetable versions and drives their workflow.
pub struct VersionManager<P: Persistence, N: Notifier> {
    catalog: CatalogStore,
    config: EngineConfig,
    versions: Vec<TimetableVersion>,
    store: P,
    notifier: N,
    rng: StdRng,
}

impl<P: Persistence, N: Notifier> VersionManager<P, N> {
    /// Opens a manager over `store`, loading stored versions and holidays.
    ///
    /// Stored holidays replace the catalog's; when none are stored the
    /// catalog's holidays stay in effect.
    pub fn open(
        mut catalog: CatalogStore,
        config: EngineConfig,
        store: P,
        notifier: N,
    ) -> Result<Self> {
        config.validate()?;
        let versions = store.load_versions()?;
        if let Some(holidays) = store.load_holidays()? {
            catalog.set_holidays(holidays);
        }
        tracing::info!(versions = versions.len(), "opened timetable store");

        Ok(Self {
            catalog,
            config,
            versions,
            store,
            notifier,
            rng: StdRng::from_os_rng(),
        })
    }

    /// Replaces the random source with a seeded one.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    // ---- reads ----

    /// All versions, in creation order.
    pub fn versions(&self) -> &[TimetableVersion] {
        &self.versions
    }

    /// Looks up a version by id.
    pub fn version(&self, id: &str) -> Option<&TimetableVersion> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// An owned copy of every version.
    pub fn snapshot(&self) -> Vec<TimetableVersion> {
        self.versions.clone()
    }

    /// The Approved version, if any.
    pub fn approved(&self) -> Option<&TimetableVersion> {
        self.versions
            .iter()
            .find(|v| v.status == VersionStatus::Approved)
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut CatalogStore {
        &mut self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    /// Deduplicated double-bookings of a version; `None` for unknown ids.
    pub fn detect_conflicts(&self, id: &str) -> Option<Vec<Conflict>> {
        self.version(id)
            .map(|v| ConflictDetector::new().detect(&v.entries))
    }

    /// Load statistics of a version; `None` for unknown ids.
    pub fn stats(&self, id: &str) -> Option<TimetableStats> {
        self.version(id)
            .map(|v| TimetableStats::calculate(v, &self.catalog, &self.config))
    }

    // ---- creation ----

    /// Generates a new Draft version and stores it.
    ///
    /// Catalog findings are logged, never fatal: the draft may simply
    /// come out thinner than requested. Fails with
    /// [`Error::VersionsExhausted`] once the newest version is `u32::MAX`.
    pub fn generate(&mut self, request: &GenerateRequest) -> Result<TimetableVersion> {
        let number = self
            .next_version_number()
            .ok_or(Error::VersionsExhausted { last: u32::MAX })?;
        if let Err(errors) = validate_catalog(&self.catalog) {
            for e in &errors {
                tracing::warn!(kind = ?e.kind, "{}", e.message);
            }
        }

        let entries = Generator::new(&self.config).generate(&self.catalog, request, &mut self.rng);
        let version = TimetableVersion::draft(new_id(), number, entries);
        tracing::info!(
            version = version.version,
            entries = version.entries.len(),
            "generated draft timetable"
        );

        self.versions.push(version.clone());
        self.persist()?;
        Ok(version)
    }

    /// Copies a version's entries into a new Draft.
    ///
    /// `None` when the source is unknown or no version number is left.
    pub fn clone_as_draft(&mut self, source_id: &str) -> Result<Option<TimetableVersion>> {
        let Some(source) = self.version(source_id) else {
            return Ok(None);
        };
        let Some(number) = self.next_version_number() else {
            tracing::warn!(source = source.version, "version numbers exhausted; clone refused");
            return Ok(None);
        };

        let version = TimetableVersion::draft(new_id(), number, source.entries.clone())
        .with_notes(format!("Draft created from Version {}", source.version));
        tracing::info!(version = version.version, "cloned draft timetable");

        self.versions.push(version.clone());
        self.persist()?;
        Ok(Some(version))
    }

    // ---- transitions ----

    /// Draft or Rejected → PendingApproval; notifies admins.
    pub fn submit(&mut self, id: &str) -> Result<Option<TimetableVersion>> {
        let Some(idx) = self.position(id) else {
            return Ok(None);
        };
        let v = &mut self.versions[idx];
        if !v.status.can_submit() {
            tracing::warn!(version = v.version, status = ?v.status, "submit refused");
            return Ok(None);
        }

        v.status = VersionStatus::PendingApproval;
        let message = format!("Timetable v{} has been submitted for your review.", v.version);
        tracing::info!(version = v.version, "timetable submitted for review");
        let submitted = v.clone();

        self.notifier.notify(&message, Audience::Admin, None);
        self.persist()?;
        Ok(Some(submitted))
    }

    /// PendingApproval → Approved; any other Approved version becomes
    /// Rejected with [`SUPERSEDED_NOTE`]. Notifies everyone.
    pub fn approve(&mut self, id: &str) -> Result<Option<TimetableVersion>> {
        let Some(idx) = self.position(id) else {
            return Ok(None);
        };
        if !self.versions[idx].status.is_under_review() {
            let v = &self.versions[idx];
            tracing::warn!(version = v.version, status = ?v.status, "approve refused");
            return Ok(None);
        }

        for (i, other) in self.versions.iter_mut().enumerate() {
            if i != idx && other.status == VersionStatus::Approved {
                other.status = VersionStatus::Rejected;
                other.notes = Some(SUPERSEDED_NOTE.to_string());
                tracing::info!(version = other.version, "approved timetable superseded");
            }
        }

        let v = &mut self.versions[idx];
        v.status = VersionStatus::Approved;
        let message = format!("Timetable v{} has been approved and is now active.", v.version);
        tracing::info!(version = v.version, "timetable approved");
        let approved = v.clone();

        self.notifier.notify(&message, Audience::All, None);
        self.persist()?;
        Ok(Some(approved))
    }

    /// PendingApproval → Rejected with `notes`; notifies admins.
    pub fn reject(&mut self, id: &str, notes: &str) -> Result<Option<TimetableVersion>> {
        let Some(idx) = self.position(id) else {
            return Ok(None);
        };
        let v = &mut self.versions[idx];
        if !v.status.is_under_review() {
            tracing::warn!(version = v.version, status = ?v.status, "reject refused");
            return Ok(None);
        }

        v.status = VersionStatus::Rejected;
        v.notes = Some(notes.to_string());
        let message = format!("Timetable v{} was rejected. Reason: {}", v.version, notes);
        tracing::info!(version = v.version, "timetable rejected");
        let rejected = v.clone();

        self.notifier.notify(&message, Audience::Admin, None);
        self.persist()?;
        Ok(Some(rejected))
    }

    /// Removes a Draft or Rejected version.
    ///
    /// Returns `false` for unknown ids and for versions under review or
    /// approved.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(idx) = self.position(id) else {
            return Ok(false);
        };
        let v = &self.versions[idx];
        if !v.status.is_deletable() {
            tracing::warn!(version = v.version, status = ?v.status, "delete refused");
            return Ok(false);
        }

        let removed = self.versions.remove(idx);
        tracing::info!(version = removed.version, "timetable deleted");
        self.persist()?;
        Ok(true)
    }

    // ---- edits ----

    /// Replaces the entries of a Draft or Rejected version.
    pub fn save_entries(&mut self, id: &str, entries: Vec<ScheduleEntry>) -> Result<bool> {
        let Some(idx) = self.position(id) else {
            return Ok(false);
        };
        let v = &mut self.versions[idx];
        if !v.status.is_editable() {
            tracing::warn!(version = v.version, status = ?v.status, "entry edit refused");
            return Ok(false);
        }

        v.entries = entries;
        tracing::info!(version = v.version, entries = v.entries.len(), "timetable entries saved");
        self.persist()?;
        Ok(true)
    }

    /// Relocates double-booked entries of a Draft or Rejected version.
    ///
    /// `None` for unknown ids and non-editable versions. Unresolved
    /// conflicts are reported in the returned [`RepairReport`].
    pub fn auto_arrange(&mut self, id: &str) -> Result<Option<RepairReport>> {
        let Some(idx) = self.position(id) else {
            return Ok(None);
        };
        if !self.versions[idx].status.is_editable() {
            let v = &self.versions[idx];
            tracing::warn!(version = v.version, status = ?v.status, "auto-arrange refused");
            return Ok(None);
        }

        let report = Repairer::new(&self.config).repair(&self.catalog, &self.versions[idx].entries);
        if !report.is_noop() {
            self.versions[idx].entries = report.entries.clone();
            self.persist()?;
        }
        Ok(Some(report))
    }

    // ---- side channels ----

    /// Announces a cancelled class to the students of its section.
    pub fn cancel_class(&mut self, entry: &ScheduleEntry) {
        let message = format!(
            "{} class on {} at {} is cancelled.",
            entry.subject, entry.day, entry.time_slot
        );
        tracing::info!(
            subject = entry.subject.as_str(),
            section = entry.section.as_str(),
            "class cancelled"
        );
        self.notifier
            .notify(&message, Audience::Student, Some(&entry.section));
    }

    /// Replaces the holiday set and stores it.
    pub fn set_holidays(&mut self, holidays: HolidaySet) -> Result<()> {
        tracing::info!(count = holidays.len(), "holidays updated");
        self.catalog.set_holidays(holidays);
        self.store.save_holidays(self.catalog.holidays())
    }

    /// Current holidays.
    pub fn holidays(&self) -> &HolidaySet {
        self.catalog.holidays()
    }

    // ---- internals ----

    fn position(&self, id: &str) -> Option<usize> {
        self.versions.iter().position(|v| v.id == id)
    }

    fn next_version_number(&self) -> Option<u32> {
        self.versions.iter().map(|v| v.version).max().unwrap_or(0).checked_add(1)
    }

    fn persist(&mut self) -> Result<()> {
        self.store.save_versions(&self.versions)
    }
}

fn new_id() -> String {
    format!("tt-{}", Uuid::new_v4())
}
