//! Drives `ApiClient` and `QaSession` end to end against an in-process
//! fake backend speaking the real wire format: multipart upload with a
//! single "pdf" field, JSON ask bodies keyed `fileId`/`question`, and
//! `{"error": ...}` payloads on rejection.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use uuid::Uuid;

use qa_session::{
    ApiClient, QaApi, QaSession, SelectedFile, QUESTION_FAILED_MESSAGE, UPLOAD_FAILED_MESSAGE,
};

#[derive(Clone, Default)]
struct BackendState {
    file_ids: Arc<Mutex<HashSet<String>>>,
}

async fn upload_pdf(State(state): State<BackendState>, mut multipart: Multipart) -> Response {
    while let Some(field) = multipart.next_field().await.unwrap() {
        if field.name() == Some("pdf") {
            let data = field.bytes().await.unwrap();
            if data.is_empty() {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "No file selected"})),
                )
                    .into_response();
            }

            let file_id = Uuid::new_v4().to_string();
            state.file_ids.lock().unwrap().insert(file_id.clone());
            return Json(json!({
                "fileId": file_id,
                "message": "PDF processed successfully",
                "chunks_count": 4
            }))
            .into_response();
        }
    }

    (
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "No PDF file provided"})),
    )
        .into_response()
}

async fn ask_question(
    State(state): State<BackendState>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let file_id = body["fileId"].as_str().unwrap_or_default();
    let question = body["question"].as_str().unwrap_or_default();

    if !state.file_ids.lock().unwrap().contains(file_id) {
        return (StatusCode::NOT_FOUND, Json(json!({"error": "File not found"}))).into_response();
    }

    Json(json!({
        "answer": format!("The document says: {}", question),
        "relevant_chunks_used": 3
    }))
    .into_response()
}

async fn health(State(state): State<BackendState>) -> Response {
    let count = state.file_ids.lock().unwrap().len();
    Json(json!({"status": "healthy", "files_processed": count})).into_response()
}

async fn spawn_backend() -> (String, BackendState) {
    let state = BackendState::default();
    let app = Router::new()
        .route("/api/upload-pdf", post(upload_pdf))
        .route("/api/ask-question", post(ask_question))
        .route("/api/health", get(health))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), state)
}

fn sample_pdf() -> SelectedFile {
    SelectedFile {
        name: "sample.pdf".to_string(),
        media_type: "application/pdf".to_string(),
        data: b"%PDF-1.4 fake body".to_vec(),
    }
}

#[tokio::test]
async fn upload_and_ask_round_trip() {
    let (base_url, _state) = spawn_backend().await;
    let mut session = QaSession::new(ApiClient::new(&base_url));

    session.upload_file(sample_pdf()).await;

    let file = session.uploaded_file().expect("upload should succeed");
    assert_eq!(file.name, "sample.pdf");
    assert_eq!(file.size, sample_pdf().size());
    assert!(!file.id.is_empty());
    assert!(session.error().is_none());

    session.set_question("What is covered?");
    session.submit_question().await;

    assert_eq!(session.answers().len(), 1);
    assert_eq!(session.answers()[0].answer, "The document says: What is covered?");
    assert_eq!(session.question(), "");
    assert!(session.error().is_none());
}

#[tokio::test]
async fn backend_rejection_keeps_session_state_clean() {
    let (base_url, _state) = spawn_backend().await;
    let mut session = QaSession::new(ApiClient::new(&base_url));

    // the fake backend answers empty uploads with a 400
    let empty = SelectedFile {
        name: "empty.pdf".to_string(),
        media_type: "application/pdf".to_string(),
        data: Vec::new(),
    };
    session.upload_file(empty).await;

    assert_eq!(session.error(), Some(UPLOAD_FAILED_MESSAGE));
    assert!(session.uploaded_file().is_none());
    assert!(!session.is_uploading());
}

#[tokio::test]
async fn unknown_file_id_carries_the_server_detail() {
    let (base_url, _state) = spawn_backend().await;
    let api = ApiClient::new(&base_url);

    let err = api
        .ask_question("missing-id", "anything")
        .await
        .expect_err("backend should reject unknown ids");
    assert!(err.to_string().contains("File not found"));
}

#[tokio::test]
async fn unreachable_backend_sets_the_fixed_messages() {
    // nothing listens on the discard port
    let mut session = QaSession::new(ApiClient::new("http://127.0.0.1:9"));

    session.upload_file(sample_pdf()).await;
    assert_eq!(session.error(), Some(UPLOAD_FAILED_MESSAGE));
    assert!(session.uploaded_file().is_none());
    assert!(!session.is_uploading());
}

#[tokio::test]
async fn question_failure_preserves_the_typed_question() {
    let (base_url, state) = spawn_backend().await;
    let mut session = QaSession::new(ApiClient::new(&base_url));

    session.upload_file(sample_pdf()).await;
    assert!(session.uploaded_file().is_some());

    // the backend forgets the file, as if it restarted
    state.file_ids.lock().unwrap().clear();

    session.set_question("still here?");
    session.submit_question().await;

    assert_eq!(session.error(), Some(QUESTION_FAILED_MESSAGE));
    assert_eq!(session.question(), "still here?");
    assert!(session.answers().is_empty());
    assert!(!session.is_asking());
}

#[tokio::test]
async fn health_reports_processed_files() {
    let (base_url, _state) = spawn_backend().await;
    let api = ApiClient::new(&base_url);

    let health = api.health().await.unwrap();
    assert_eq!(health.status, "healthy");
    assert_eq!(health.files_processed, Some(0));

    let mut session = QaSession::new(api.clone());
    session.upload_file(sample_pdf()).await;

    let health = api.health().await.unwrap();
    assert_eq!(health.files_processed, Some(1));
}
