//! Integration tests for the HTTP gateway against a stub backend.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use ledgerdesk_client::gateway::Decision;
use ledgerdesk_client::{AttachmentExt, HttpGateway, LedgerApi};
use ledgerdesk_core::UserRole;
use ledgerdesk_core::liability::{LiabilityKind, total_outstanding};
use ledgerdesk_core::workflow::WorkFlow;
use ledgerdesk_shared::AppError;
use ledgerdesk_shared::config::ApiConfig;
use ledgerdesk_shared::types::{Amount, DocId, LedgerEntryId, UserId};

async fn sign_in(Json(body): Json<Value>) -> impl IntoResponse {
    if body["UserId"] == 12 && body["Password"] == "secret" {
        Json(json!({
            "Id": 12,
            "UserName": "Ravi",
            "UserType": "Collector",
            "ParentId": 3
        }))
        .into_response()
    } else {
        (StatusCode::UNAUTHORIZED, "bad credentials").into_response()
    }
}

async fn ledgers(Query(query): Query<HashMap<String, String>>) -> impl IntoResponse {
    if query.get("userId").map(String::as_str) == Some("12") {
        (StatusCode::INTERNAL_SERVER_ERROR, "").into_response()
    } else {
        Json(json!([])).into_response()
    }
}

async fn liabilities(Path(kind): Path<String>) -> impl IntoResponse {
    if kind != "retailers" {
        return (StatusCode::NOT_FOUND, "no such report").into_response();
    }
    Json(json!([
        {"UserId": 4, "UserName": "Kiran", "ParentName": "Ravi", "Outstanding": "250.50"},
        {"UserId": 5, "UserName": "Asha", "TotalGiven": "1100", "TotalApproved": 100, "Outstanding": 1000}
    ]))
    .into_response()
}

async fn decide(Path(id): Path<i64>, Json(body): Json<Value>) -> StatusCode {
    if id == 7 && body == json!({"WorkFlow": 3}) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::BAD_REQUEST
    }
}

async fn attachment(Path(id): Path<i64>) -> Json<Value> {
    Json(json!({
        "DocId": id,
        "FileName": "receipt.pdf",
        "ContentType": "application/pdf",
        "Content": "aGVsbG8="
    }))
}

/// Starts the stub backend on an ephemeral port and returns a gateway to it.
async fn spawn_backend() -> HttpGateway {
    let router = Router::new()
        .route("/auth/signin", post(sign_in))
        .route("/master-data", get(|| async { "not json" }))
        .route("/ledgers", get(ledgers))
        .route("/liabilities/{kind}", get(liabilities))
        .route("/approvals/{id}", post(decide))
        .route("/attachments/{id}", get(attachment));
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind stub backend");
    let addr = listener.local_addr().expect("Failed to read stub address");
    tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Stub backend failed");
    });
    HttpGateway::new(&ApiConfig {
        base_url: format!("http://{addr}/"),
        timeout_secs: 5,
    })
    .expect("Failed to build gateway")
}

#[tokio::test]
async fn test_sign_in_success() {
    let gateway = spawn_backend().await;
    let user = gateway
        .sign_in(UserId::new(12), "secret")
        .await
        .expect("Sign-in should succeed");
    assert_eq!(user.user_name, "Ravi");
    assert_eq!(user.role().unwrap(), UserRole::Collector);
    assert_eq!(user.parent_id, Some(UserId::new(3)));
}

#[tokio::test]
async fn test_sign_in_rejected_is_auth_error() {
    let gateway = spawn_backend().await;
    let err = gateway.sign_in(UserId::new(12), "wrong").await.unwrap_err();
    assert!(matches!(err, AppError::Auth(message) if message == "bad credentials"));
}

#[tokio::test]
async fn test_server_error_without_body_uses_reason() {
    let gateway = spawn_backend().await;
    let err = gateway.list_ledger(UserId::new(12)).await.unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert!(err.to_string().contains("Internal Server Error"));

    let empty = gateway
        .list_ledger(UserId::new(4))
        .await
        .expect("Other users list fine");
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_liabilities_decode_mixed_amounts() {
    let gateway = spawn_backend().await;
    let rows = gateway
        .liabilities(LiabilityKind::Retailers)
        .await
        .expect("Report should load");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].total_approved, Amount::ZERO);
    assert_eq!(rows[1].total_given, Amount::new(dec!(1100)));
    assert_eq!(total_outstanding(&rows), Amount::new(dec!(1250.50)));

    let err = gateway
        .liabilities(LiabilityKind::Cashiers)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "NOT_FOUND");
}

#[tokio::test]
async fn test_unparseable_body_is_decode_error() {
    let gateway = spawn_backend().await;
    let err = gateway.master_data().await.unwrap_err();
    assert_eq!(err.error_code(), "DECODE_ERROR");
}

#[tokio::test]
async fn test_decision_body_shape() {
    let gateway = spawn_backend().await;
    let approve = Decision {
        work_flow: WorkFlow::ApprovedByCollector,
        comment: None,
    };
    gateway
        .decide(LedgerEntryId::new(7), &approve)
        .await
        .expect("Decision should be accepted");

    let err = gateway
        .decide(LedgerEntryId::new(8), &approve)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(400));
}

#[tokio::test]
async fn test_attachment_download_and_save() {
    let gateway = spawn_backend().await;
    let attachment = gateway
        .download_attachment(DocId::new(31))
        .await
        .expect("Download should succeed");
    assert_eq!(attachment.doc_id, DocId::new(31));

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = attachment
        .save_to(dir.path())
        .await
        .expect("Save should succeed");
    assert_eq!(std::fs::read(path).expect("Saved file readable"), b"hello");
}
