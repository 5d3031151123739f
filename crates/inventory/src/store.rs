//! Ordered, in-memory list of medicine records.
//!
//! The store is the only way to mutate the list. Each entry keeps two views of
//! a record:
//! - the committed, typed [`MedicineRecord`] (always valid; alerts and
//!   snapshots read this), and
//! - the [`RecordDraft`] text currently shown for it, which may transiently
//!   hold invalid input while the user is typing.
//!
//! Every successful mutation recomputes the alert list before returning and
//! publishes one [`InventoryEvent`] to subscribers.

use chrono::Utc;

use pharmademand_core::{DomainError, DomainResult, Field};
use pharmademand_events::{EventBus, InMemoryEventBus, Subscription};

use crate::alerts::{Alert, AlertPolicy};
use crate::event::{InventoryChange, InventoryEvent};
use crate::record::{MedicineRecord, RecordDraft};
use crate::validate::{self, ValidationResult};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    record: MedicineRecord,
    draft: RecordDraft,
}

#[derive(Debug)]
pub struct RecordListStore {
    entries: Vec<Entry>,
    policy: AlertPolicy,
    alerts: Vec<Alert>,
    bus: InMemoryEventBus<InventoryEvent>,
}

impl Default for RecordListStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordListStore {
    /// Empty store with the default alert policy.
    pub fn new() -> Self {
        Self::from_policy(AlertPolicy::default())
    }

    /// Empty store with a custom policy. The policy's default threshold gets
    /// the same check as a per-record threshold.
    pub fn with_policy(policy: AlertPolicy) -> DomainResult<Self> {
        validate::check_threshold(policy.default_threshold)?;
        Ok(Self::from_policy(policy))
    }

    /// Empty store using `threshold` as the shared default.
    pub fn with_default_threshold(threshold: i64) -> DomainResult<Self> {
        Self::with_policy(AlertPolicy::new(threshold))
    }

    fn from_policy(policy: AlertPolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
            alerts: Vec::new(),
            bus: InMemoryEventBus::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn policy(&self) -> AlertPolicy {
        self.policy
    }

    pub fn default_threshold(&self) -> i64 {
        self.policy.default_threshold
    }

    /// Validate a draft and append it. Returns the new entry's index.
    ///
    /// On failure the list is left exactly as it was.
    pub fn add(&mut self, draft: &RecordDraft) -> DomainResult<usize> {
        let record = draft.parse()?;
        Ok(self.push(record, draft.clone()))
    }

    /// Append an already-typed record, after the same validation as [`add`](Self::add).
    pub fn add_record(&mut self, mut record: MedicineRecord) -> DomainResult<usize> {
        validate::check_record(&record)?;
        record.name = record.name.trim().to_string();
        let draft = record.to_draft();
        Ok(self.push(record, draft))
    }

    fn push(&mut self, record: MedicineRecord, draft: RecordDraft) -> usize {
        let index = self.entries.len();
        self.entries.push(Entry {
            record: record.clone(),
            draft,
        });
        tracing::debug!(index, name = %record.name, "record added");
        self.changed(InventoryChange::RecordAdded { index, record });
        index
    }

    /// Store `raw` into one field of the entry at `index`.
    ///
    /// The returned verdict is advisory: the draft always takes the new text,
    /// but the committed record only changes when the text validates.
    pub fn update(&mut self, index: usize, field: Field, raw: &str) -> DomainResult<ValidationResult> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or_else(|| DomainError::index_out_of_range(index, len))?;

        entry.draft.set(field, raw);
        let parsed = validate::parse_field(field, raw);
        let verdict = ValidationResult::from(&parsed);
        let committed = match parsed {
            Ok(value) => {
                entry.record.apply(value);
                true
            }
            Err(err) => {
                tracing::debug!(index, %field, error = %err, "draft holds invalid text");
                false
            }
        };

        self.changed(InventoryChange::RecordUpdated {
            index,
            field,
            committed,
        });
        Ok(verdict)
    }

    /// Remove the entry at `index`, keeping the others in order.
    pub fn remove(&mut self, index: usize) -> DomainResult<MedicineRecord> {
        if index >= self.entries.len() {
            return Err(DomainError::index_out_of_range(index, self.entries.len()));
        }
        let Entry { record, .. } = self.entries.remove(index);
        tracing::debug!(index, name = %record.name, "record removed");
        self.changed(InventoryChange::RecordRemoved {
            index,
            record: record.clone(),
        });
        Ok(record)
    }

    /// Remove every entry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.changed(InventoryChange::ListCleared { removed });
        removed
    }

    pub fn set_default_threshold(&mut self, threshold: i64) -> DomainResult<()> {
        validate::check_threshold(threshold)?;
        self.policy.default_threshold = threshold;
        self.changed(InventoryChange::DefaultThresholdChanged { threshold });
        Ok(())
    }

    /// The committed records, in list order, by value.
    pub fn snapshot(&self) -> Vec<MedicineRecord> {
        self.entries.iter().map(|e| e.record.clone()).collect()
    }

    /// The draft text of every entry, in list order, by value.
    ///
    /// This is what submission re-validates, so pending invalid edits block it.
    pub fn drafts(&self) -> Vec<RecordDraft> {
        self.entries.iter().map(|e| e.draft.clone()).collect()
    }

    pub fn get(&self, index: usize) -> Option<&MedicineRecord> {
        self.entries.get(index).map(|e| &e.record)
    }

    pub fn draft(&self, index: usize) -> Option<&RecordDraft> {
        self.entries.get(index).map(|e| &e.draft)
    }

    /// The first validation failure of the entry's draft text, if any.
    pub fn pending_error(&self, index: usize) -> Option<DomainError> {
        self.entries.get(index).and_then(|e| e.draft.parse().err())
    }

    /// Alerts for the current committed records.
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Receive an [`InventoryEvent`] for every subsequent mutation.
    pub fn subscribe(&self) -> Subscription<InventoryEvent> {
        self.bus.subscribe()
    }

    fn changed(&mut self, change: InventoryChange) {
        let records: Vec<MedicineRecord> = self.entries.iter().map(|e| e.record.clone()).collect();
        self.alerts = self.policy.evaluate(&records);

        let critical = self.alerts.iter().filter(|a| a.is_critical()).count();
        tracing::debug!(
            records = records.len(),
            critical,
            warning = self.alerts.len() - critical,
            "alerts recomputed"
        );

        let event = InventoryEvent {
            change,
            len: self.entries.len(),
            alerts: self.alerts.clone(),
            occurred_at: Utc::now(),
        };
        if let Err(err) = self.bus.publish(event) {
            tracing::warn!(error = %err, "failed to publish inventory change");
        }
    }
}
