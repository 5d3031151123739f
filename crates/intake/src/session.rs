//! One interactive intake session: a store, a coordinator, and text replies.

use core::fmt::Write as _;

use pharmademand_core::{DomainError, Field};
use pharmademand_events::{Event, Subscription};
use pharmademand_inventory::{FieldValue, InventoryEvent, RecordDraft, RecordListStore, parse_field};
use pharmademand_submission::{SubmissionClient, SubmissionCoordinator, SubmissionOutcome};

use crate::command::{HELP, IntakeCommand, ParseError};

/// Text to print after a command, and whether the shell should exit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub quit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            quit: false,
        }
    }

    fn quit() -> Self {
        Self {
            text: String::new(),
            quit: true,
        }
    }
}

pub struct IntakeSession<C> {
    store: RecordListStore,
    coordinator: SubmissionCoordinator<C>,
    changes: Subscription<InventoryEvent>,
}

impl<C: SubmissionClient> IntakeSession<C> {
    pub fn new(store: RecordListStore, client: C) -> Self {
        let changes = store.subscribe();
        Self {
            store,
            coordinator: SubmissionCoordinator::new(client),
            changes,
        }
    }

    pub fn store(&self) -> &RecordListStore {
        &self.store
    }

    /// Parse and run one input line.
    pub async fn handle_line(&mut self, line: &str) -> Reply {
        match line.parse::<IntakeCommand>() {
            Ok(command) => self.execute(command).await,
            Err(ParseError::Empty) => Reply::text(""),
            Err(err) => Reply::text(err.to_string()),
        }
    }

    pub async fn execute(&mut self, command: IntakeCommand) -> Reply {
        let reply = match command {
            IntakeCommand::Add(draft) => self.add(&draft),
            IntakeCommand::Set {
                index,
                field,
                value,
            } => self.set(index, field, &value),
            IntakeCommand::Remove { index } => match self.store.remove(index) {
                Ok(_) => Reply::text(format!(
                    "Medicine removed successfully!\n{}",
                    self.render_alerts()
                )),
                Err(err) => Reply::text(self.describe(&err)),
            },
            IntakeCommand::List => Reply::text(self.render_list()),
            IntakeCommand::Alerts => Reply::text(self.render_alerts()),
            IntakeCommand::Threshold(raw) => self.set_threshold(&raw),
            IntakeCommand::Submit => self.submit().await,
            IntakeCommand::Help => Reply::text(HELP),
            IntakeCommand::Quit => Reply::quit(),
        };
        self.log_changes();
        reply
    }

    fn add(&mut self, draft: &RecordDraft) -> Reply {
        let missing = [Field::Name, Field::Stock, Field::Demand]
            .iter()
            .any(|field| draft.get(*field).trim().is_empty());
        if missing {
            return Reply::text("Please fill out all fields!");
        }
        match self.store.add(draft) {
            Ok(_) => Reply::text(format!(
                "Medicine added successfully!\n{}",
                self.render_alerts()
            )),
            Err(err) => Reply::text(self.describe(&err)),
        }
    }

    fn set(&mut self, index: usize, field: Field, value: &str) -> Reply {
        match self.store.update(index, field, value) {
            Ok(verdict) if verdict.ok => Reply::text(format!(
                "Updated {field} of #{}.\n{}",
                index + 1,
                self.render_alerts()
            )),
            Ok(verdict) => Reply::text(format!(
                "#{} {field} not saved: {} (fix it before submitting)",
                index + 1,
                verdict.message
            )),
            Err(err) => Reply::text(self.describe(&err)),
        }
    }

    fn set_threshold(&mut self, raw: &str) -> Reply {
        // Same rules as a record's threshold, except that the default cannot be unset.
        let result = match parse_field(Field::Threshold, raw) {
            Ok(FieldValue::Threshold(Some(threshold))) => {
                self.store.set_default_threshold(threshold)
            }
            Ok(_) => Err(DomainError::empty_field(Field::Threshold)),
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => Reply::text(format!(
                "Default threshold set to {}.\n{}",
                self.store.default_threshold(),
                self.render_alerts()
            )),
            Err(err) => Reply::text(self.describe(&err)),
        }
    }

    async fn submit(&mut self) -> Reply {
        let drafts = self.store.drafts();
        let outcome = self.coordinator.submit(&drafts).await;
        if let SubmissionOutcome::Success(receipt) = &outcome {
            tracing::info!(
                id = %receipt.id,
                response = %receipt.response,
                "response from backend"
            );
        }
        Reply::text(outcome.message())
    }

    /// User-facing text for a domain error (list positions are 1-based).
    fn describe(&self, err: &DomainError) -> String {
        match err {
            DomainError::IndexOutOfRange { index, len } => {
                format!("There is no medicine #{} (the list has {len}).", index + 1)
            }
            other => other.to_string(),
        }
    }

    fn render_list(&self) -> String {
        if self.store.is_empty() {
            return "No medicines added yet.".to_string();
        }
        let mut out = String::new();
        for (index, record) in self.store.snapshot().iter().enumerate() {
            let _ = write!(
                out,
                "{}. {}: Stock - {}, Demand - {}",
                index + 1,
                record.name,
                record.stock,
                record.demand
            );
            if let Some(threshold) = record.threshold {
                let _ = write!(out, ", Threshold - {threshold}");
            }
            if let Some(err) = self.store.pending_error(index) {
                let _ = write!(out, " (unsaved edit: {err})");
            }
            out.push('\n');
        }
        let _ = write!(out, "Default threshold: {}", self.store.default_threshold());
        out
    }

    fn render_alerts(&self) -> String {
        let alerts = self.store.alerts();
        if alerts.is_empty() {
            return "No stock alerts.".to_string();
        }
        alerts
            .iter()
            .map(|alert| format!("#{} {alert}", alert.index + 1))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn log_changes(&self) {
        for event in self.changes.drain() {
            tracing::info!(
                event = event.event_type(),
                records = event.len,
                alerts = event.alerts.len(),
                "inventory changed"
            );
        }
    }
}
