//! Client tests against an in-process axum backend.
//!
//! The routes mirror the slice of the backend API the UI consumes, with
//! the same response shapes and FastAPI-style `detail` error bodies.

use axum::extract::{Path, Query};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::json;

use graphdeck_client::{ApiClient, DocStatus};
use graphdeck_core::{ApiConfig, Error};
use graphdeck_graph::{GraphStore, KnowledgeGraph};

fn backend_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/documents", get(documents))
        .route("/documents/scan", post(scan))
        .route("/kg/entity/{name}", put(update_entity))
        .route("/kg/relation/{src}/{tgt}", put(update_relation))
        .route("/kg/{label}", get(knowledge_graph))
}

async fn health(headers: HeaderMap) -> Json<serde_json::Value> {
    let status = match headers.get("X-API-Key") {
        Some(key) if key == "secret" => "healthy",
        Some(_) => "unauthorized",
        None => "healthy",
    };
    Json(json!({ "status": status }))
}

async fn documents() -> Json<serde_json::Value> {
    Json(json!({
        "statuses": {
            "processed": [{
                "id": "doc-1",
                "content_summary": "Notes on graphs",
                "content_length": 1204,
                "status": "processed",
                "created_at": "2024-05-01T10:00:00+00:00",
                "updated_at": "2024-05-02T10:00:00+00:00",
                "chunks_count": 7
            }],
            "failed": [{
                "id": "doc-2",
                "content_summary": "Corrupt upload",
                "content_length": 88,
                "status": "failed",
                "created_at": "2024-05-03T10:00:00+00:00",
                "updated_at": "2024-05-03T10:05:00+00:00",
                "error": "decode error"
            }]
        }
    }))
}

async fn scan() -> Json<serde_json::Value> {
    Json(json!({ "status": "scanning_started" }))
}

async fn update_entity(
    Path(name): Path<String>,
    Json(props): Json<serde_json::Value>,
) -> impl IntoResponse {
    if name == "Missing Entity" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "entity does not exist" })),
        )
            .into_response();
    }
    if name == "Broken" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    let keys = props.as_object().map(|o| o.len()).unwrap_or(0);
    Json(json!({
        "status": "success",
        "message": format!("updated {} ({} properties)", name, keys),
    }))
    .into_response()
}

async fn update_relation(Path((src, tgt)): Path<(String, String)>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "message": format!("updated {} -> {}", src, tgt),
    }))
}

#[derive(serde::Deserialize)]
struct KgQuery {
    max_depth: u32,
}

async fn knowledge_graph(
    Path(label): Path<String>,
    Query(query): Query<KgQuery>,
) -> Json<serde_json::Value> {
    Json(json!({
        "nodes": [
            { "id": "n1", "labels": [label], "properties": { "depth": query.max_depth } },
            { "id": "n2", "labels": ["Neighbor"], "properties": {} }
        ],
        "edges": [
            { "id": "e1", "source": "n1", "target": "n2", "type": "related", "properties": {} }
        ]
    }))
}

async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, backend_routes()).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn client_for(base_url: String) -> ApiClient {
    let config = ApiConfig {
        base_url,
        ..ApiConfig::default()
    };
    ApiClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_health_and_api_key_header() {
    let base = spawn_backend().await;

    let anonymous = client_for(base.clone()).await;
    assert!(anonymous.health().await.unwrap().is_healthy());

    let keyed = ApiClient::new(&ApiConfig {
        base_url: base,
        api_key: Some("secret".to_string()),
        ..ApiConfig::default()
    })
    .unwrap();
    assert!(keyed.health().await.unwrap().is_healthy());
}

#[tokio::test]
async fn test_documents_decode() {
    let client = client_for(spawn_backend().await).await;
    let docs = client.documents().await.unwrap();

    assert_eq!(docs.total_count(), 2);
    let processed = &docs.statuses[&DocStatus::Processed];
    assert_eq!(processed[0].chunks_count, Some(7));
    let failed = &docs.statuses[&DocStatus::Failed];
    assert_eq!(failed[0].error.as_deref(), Some("decode error"));
}

#[tokio::test]
async fn test_scan_returns_status_message() {
    let client = client_for(spawn_backend().await).await;
    let scan = client.scan_new_documents().await.unwrap();
    assert_eq!(scan.status, "scanning_started");
}

#[tokio::test]
async fn test_update_entity_name_roundtrips_through_path() {
    let client = client_for(spawn_backend().await).await;
    let props = json!({ "description": "mathematician", "entity_type": "person" });

    let resp = client.update_entity("Ada Lovelace", &props).await.unwrap();
    assert_eq!(resp.status, "success");
    // The space survived percent-encoding and came back decoded.
    assert_eq!(resp.message, "updated Ada Lovelace (2 properties)");
}

#[tokio::test]
async fn test_update_relation_uses_both_labels() {
    let client = client_for(spawn_backend().await).await;
    let resp = client
        .update_relation("Ada Lovelace", "Charles Babbage", &json!({ "weight": "2.0" }))
        .await
        .unwrap();
    assert_eq!(resp.message, "updated Ada Lovelace -> Charles Babbage");
}

#[tokio::test]
async fn test_error_detail_extraction() {
    let client = client_for(spawn_backend().await).await;
    let err = client
        .update_entity("Missing Entity", &json!({}))
        .await
        .unwrap_err();

    match err {
        Error::Api { status, ref message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "entity does not exist");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
    assert_eq!(err.user_message(), "entity does not exist");
}

#[tokio::test]
async fn test_error_fallback_without_detail() {
    let client = client_for(spawn_backend().await).await;
    let err = client.update_entity("Broken", &json!({})).await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "request failed with status 500");
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_knowledge_graph_feeds_the_store() {
    let client = client_for(spawn_backend().await).await;
    let kg: KnowledgeGraph = client.knowledge_graph("Ada Lovelace", 2).await.unwrap();
    assert_eq!(kg.nodes.len(), 2);

    let store = GraphStore::new();
    store.replace(kg);
    assert_eq!(store.stats().edge_count, 1);
    assert_eq!(store.node("n1").unwrap().display_label(), "Ada Lovelace");
}
