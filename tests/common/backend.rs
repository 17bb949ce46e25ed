use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct Backend {
    pub seen: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

async fn model_handler(
    State(backend): State<Backend>,
    Path(model): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    backend.seen.lock().unwrap().push((model.clone(), auth, body.clone()));

    let input = body["inputs"].as_str().unwrap_or_default().to_string();
    match model.as_str() {
        "chat" => (StatusCode::OK, Json(json!([{ "generated_text": format!(" reply to {input} ") }]))),
        "sst2" => (
            StatusCode::OK,
            Json(json!([[
                { "label": "POSITIVE", "score": 0.25 },
                { "label": "NEGATIVE", "score": 0.75 }
            ]])),
        ),
        "loading" => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "Model loading is taking longer than expected" })),
        ),
        _ => (StatusCode::NOT_FOUND, Json(json!("no such model"))),
    }
}

/// Serves `chat` (generation), `sst2` (classification), `loading` (backend error);
/// any other model is a 404.
pub async fn spawn_backend() -> (String, Backend) {
    let backend = Backend::default();
    let app = Router::new()
        .route("/models/{model}", post(model_handler))
        .with_state(backend.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}"), backend)
}
