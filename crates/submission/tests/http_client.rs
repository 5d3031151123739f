// Integration tests for `HttpSubmissionClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pharmademand_inventory::{MedicineRecord, RecordDraft};
use pharmademand_submission::{
    HttpSubmissionClient, SubmissionClient, SubmissionCoordinator, SubmissionOutcome, TransportError,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, HttpSubmissionClient) {
    let server = MockServer::start().await;
    let client = HttpSubmissionClient::from_reqwest(&server.uri(), reqwest::Client::new()).unwrap();
    (server, client)
}

fn records() -> Vec<MedicineRecord> {
    vec![
        MedicineRecord::new("Aspirin", 200, 20),
        MedicineRecord::new("Antibiotics", 50, 15).with_threshold(20),
    ]
}

// ── Happy path ──────────────────────────────────────────────────────

#[tokio::test]
async fn posts_a_flat_json_array() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/submit-data"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!([
            { "name": "Aspirin", "stock": 200, "demand": 20 },
            { "name": "Antibiotics", "stock": 50, "demand": 15, "threshold": 20 },
        ])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Data received" })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.submit(&records()).await.unwrap();
    assert_eq!(response, json!({ "message": "Data received" }));
}

#[tokio::test]
async fn coordinator_sends_validated_drafts_once() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/submit-data"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "accepted": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let coordinator = SubmissionCoordinator::new(client);
    let outcome = coordinator
        .submit(&[RecordDraft::new("Aspirin", " 200 ", "20")])
        .await;

    match outcome {
        SubmissionOutcome::Success(receipt) => {
            assert_eq!(receipt.records_sent, 1);
            assert_eq!(receipt.response, json!({ "accepted": 1 }));
        }
        other => panic!("expected Success, got {other:?}"),
    }
}

// ── Error paths ─────────────────────────────────────────────────────

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/submit-data"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "Invalid data format" })))
        .mount(&server)
        .await;

    let err = client.submit(&records()).await.unwrap_err();
    assert_eq!(
        err,
        TransportError::Rejected {
            status: 400,
            message: Some("Invalid data format".to_string()),
        }
    );
}

#[tokio::test]
async fn non_json_error_body_asks_the_user_to_retry() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/submit-data"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>Internal Server Error</html>"))
        .mount(&server)
        .await;

    let coordinator = SubmissionCoordinator::new(client);
    let outcome = coordinator.submit_records(&records()).await;

    assert!(matches!(
        outcome,
        SubmissionOutcome::TransportFailed(TransportError::InvalidResponse(_))
    ));
    assert_eq!(
        outcome.message(),
        "Error sending data to the backend. Please try again."
    );
}

#[tokio::test]
async fn json_error_body_without_error_field_is_a_generic_rejection() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/submit-data"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "x" })))
        .mount(&server)
        .await;

    let coordinator = SubmissionCoordinator::new(client);
    let outcome = coordinator.submit_records(&records()).await;

    assert_eq!(
        outcome,
        SubmissionOutcome::TransportFailed(TransportError::Rejected {
            status: 500,
            message: None,
        })
    );
    assert_eq!(outcome.message(), "Failed to send data to the backend.");
}

#[tokio::test]
async fn non_json_success_body_is_invalid_response() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/submit-data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&server)
        .await;

    let err = client.submit(&records()).await.unwrap_err();
    assert!(matches!(err, TransportError::InvalidResponse(_)));
}

#[tokio::test]
async fn invalid_drafts_never_reach_the_server() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/submit-data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let coordinator = SubmissionCoordinator::new(client);
    let outcome = coordinator
        .submit(&[RecordDraft::new("Aspirin", "-1", "5")])
        .await;
    assert!(matches!(outcome, SubmissionOutcome::ValidationFailed { index: 0, .. }));

    let outcome = coordinator.submit(&[]).await;
    assert_eq!(outcome, SubmissionOutcome::EmptySubmission);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = HttpSubmissionClient::from_reqwest(&uri, reqwest::Client::new()).unwrap();
    let err = client.submit(&records()).await.unwrap_err();
    assert!(matches!(err, TransportError::Network(_)));
}
