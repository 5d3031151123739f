//! Validate-then-send orchestration.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use pharmademand_core::{DomainError, SubmissionId};
use pharmademand_inventory::{MedicineRecord, RecordDraft, check_record};

use crate::client::SubmissionClient;
use crate::error::TransportError;

/// What the backend accepted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReceipt {
    pub id: SubmissionId,
    pub records_sent: usize,
    /// Opaque JSON returned by the server.
    pub response: Value,
    pub completed_at: DateTime<Utc>,
}

/// Result of one `submit` call.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Success(SubmissionReceipt),
    /// Nothing to send; no request was made.
    EmptySubmission,
    /// The record at `index` failed validation; no request was made.
    ValidationFailed { index: usize, error: DomainError },
    /// The request was made and failed. The list is untouched and may be resubmitted.
    TransportFailed(TransportError),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }

    /// User-facing status text.
    pub fn message(&self) -> String {
        match self {
            SubmissionOutcome::Success(_) => "Data successfully sent to the backend!".to_string(),
            SubmissionOutcome::EmptySubmission => {
                "No medicines to submit. Please add some first!".to_string()
            }
            SubmissionOutcome::ValidationFailed { index, error } => {
                format!("Medicine #{} is invalid: {error}", index + 1)
            }
            SubmissionOutcome::TransportFailed(TransportError::Rejected {
                message: Some(message),
                ..
            }) => message.clone(),
            SubmissionOutcome::TransportFailed(TransportError::Rejected { message: None, .. }) => {
                "Failed to send data to the backend.".to_string()
            }
            SubmissionOutcome::TransportFailed(_) => {
                "Error sending data to the backend. Please try again.".to_string()
            }
        }
    }
}

/// Re-validates a record list and sends it through a [`SubmissionClient`].
///
/// Holds no list state of its own, so the store stays editable while a
/// submission is awaiting the server. Overlapping calls are not serialized;
/// callers that need that must await one submission before starting another.
#[derive(Debug, Clone)]
pub struct SubmissionCoordinator<C> {
    client: C,
}

impl<C: SubmissionClient> SubmissionCoordinator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Validate every draft and, if all pass, send them in one request.
    pub async fn submit(&self, drafts: &[RecordDraft]) -> SubmissionOutcome {
        let mut records = Vec::with_capacity(drafts.len());
        for (index, draft) in drafts.iter().enumerate() {
            match draft.parse() {
                Ok(record) => records.push(record),
                Err(error) => return validation_failed(index, error),
            }
        }
        self.send(records).await
    }

    /// Same as [`submit`](Self::submit) for already-typed records.
    pub async fn submit_records(&self, records: &[MedicineRecord]) -> SubmissionOutcome {
        for (index, record) in records.iter().enumerate() {
            if let Err(error) = check_record(record) {
                return validation_failed(index, error);
            }
        }
        self.send(records.to_vec()).await
    }

    async fn send(&self, records: Vec<MedicineRecord>) -> SubmissionOutcome {
        if records.is_empty() {
            tracing::info!("submission skipped: no records");
            return SubmissionOutcome::EmptySubmission;
        }

        let id = SubmissionId::new();
        tracing::info!(%id, records = records.len(), "submitting records");

        match self.client.submit(&records).await {
            Ok(response) => {
                tracing::info!(%id, "submission accepted");
                SubmissionOutcome::Success(SubmissionReceipt {
                    id,
                    records_sent: records.len(),
                    response,
                    completed_at: Utc::now(),
                })
            }
            Err(err) => {
                tracing::warn!(%id, error = %err, "submission failed");
                SubmissionOutcome::TransportFailed(err)
            }
        }
    }
}

fn validation_failed(index: usize, error: DomainError) -> SubmissionOutcome {
    tracing::info!(index, error = %error, "submission blocked by invalid record");
    SubmissionOutcome::ValidationFailed { index, error }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pharmademand_core::Field;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every call and answers with a canned result.
    struct FakeClient {
        calls: Mutex<Vec<Vec<MedicineRecord>>>,
        reply: Result<Value, TransportError>,
    }

    impl FakeClient {
        fn replying(reply: Result<Value, TransportError>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }

        fn calls(&self) -> Vec<Vec<MedicineRecord>> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SubmissionClient for FakeClient {
        async fn submit(&self, records: &[MedicineRecord]) -> Result<Value, TransportError> {
            self.calls.lock().unwrap().push(records.to_vec());
            self.reply.clone()
        }
    }

    fn ok_coordinator() -> SubmissionCoordinator<FakeClient> {
        SubmissionCoordinator::new(FakeClient::replying(Ok(json!({ "status": "ok" }))))
    }

    #[tokio::test]
    async fn empty_list_makes_no_request() {
        let coordinator = ok_coordinator();
        let outcome = coordinator.submit(&[]).await;
        assert_eq!(outcome, SubmissionOutcome::EmptySubmission);
        assert_eq!(outcome.message(), "No medicines to submit. Please add some first!");
        assert!(coordinator.client().calls().is_empty());
    }

    #[tokio::test]
    async fn negative_stock_fails_validation_without_a_request() {
        let coordinator = ok_coordinator();
        let outcome = coordinator
            .submit(&[RecordDraft::new("Aspirin", "-1", "5")])
            .await;
        assert_eq!(
            outcome,
            SubmissionOutcome::ValidationFailed {
                index: 0,
                error: DomainError::not_positive(Field::Stock, -1),
            }
        );
        assert!(coordinator.client().calls().is_empty());

        let outcome = coordinator
            .submit_records(&[MedicineRecord::new("Aspirin", -1, 5)])
            .await;
        assert!(matches!(
            outcome,
            SubmissionOutcome::ValidationFailed {
                error: DomainError::NotPositive { field: Field::Stock, .. },
                ..
            }
        ));
        assert!(coordinator.client().calls().is_empty());
    }

    #[tokio::test]
    async fn first_invalid_record_is_reported() {
        let coordinator = ok_coordinator();
        let outcome = coordinator
            .submit(&[
                RecordDraft::new("Aspirin", "10", "5"),
                RecordDraft::new("Ibuprofen", "10", "0"),
                RecordDraft::new("", "10", "5"),
            ])
            .await;
        match outcome {
            SubmissionOutcome::ValidationFailed { index, ref error } => {
                assert_eq!(index, 1);
                assert_eq!(error.field(), Some(Field::Demand));
                assert!(outcome.message().starts_with("Medicine #2 is invalid"));
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn valid_list_is_sent_exactly_once() {
        let coordinator = ok_coordinator();
        let drafts = vec![
            RecordDraft::new("Aspirin", "200", "20"),
            RecordDraft::new("Ibuprofen", "150", "10").with_threshold("30"),
        ];

        let outcome = coordinator.submit(&drafts).await;

        let calls = coordinator.client().calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0][1], MedicineRecord::new("Ibuprofen", 150, 10).with_threshold(30));
        match outcome {
            SubmissionOutcome::Success(ref receipt) => {
                assert_eq!(receipt.records_sent, 2);
                assert_eq!(receipt.response, json!({ "status": "ok" }));
            }
            ref other => panic!("expected Success, got {other:?}"),
        }
        assert_eq!(outcome.message(), "Data successfully sent to the backend!");
    }

    #[tokio::test]
    async fn transport_failures_are_not_retried() {
        let coordinator = SubmissionCoordinator::new(FakeClient::replying(Err(
            TransportError::Network("connection refused".to_string()),
        )));
        let outcome = coordinator
            .submit(&[RecordDraft::new("Aspirin", "200", "20")])
            .await;

        assert_eq!(coordinator.client().calls().len(), 1);
        assert!(!outcome.is_success());
        assert_eq!(
            outcome.message(),
            "Error sending data to the backend. Please try again."
        );
    }

    #[test]
    fn rejection_messages_prefer_the_server_text() {
        let with_text = SubmissionOutcome::TransportFailed(TransportError::Rejected {
            status: 400,
            message: Some("Invalid data format".to_string()),
        });
        assert_eq!(with_text.message(), "Invalid data format");

        let without = SubmissionOutcome::TransportFailed(TransportError::Rejected {
            status: 500,
            message: None,
        });
        assert_eq!(without.message(), "Failed to send data to the backend.");
    }
}
