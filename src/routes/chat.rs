use axum::{
    Json,
    body::Bytes,
    extract::State,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse, HealthResponse},
    services::metrics_manager::MetricsData,
    state::SharedState,
};

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

// The body is parsed by hand so a missing or wrong Content-Type still works
// and every parse failure maps to the same 400.
pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let span = tracing::info_span!("chat", request_id = %Uuid::new_v4());

    async move {
        tracing::info!("/chat route hit");
        state.metrics.record_request().await;

        let payload = ChatRequest::from_slice(&body).map_err(|e| {
            tracing::warn!("JSON error: {e}");
            AppError::InvalidJson
        })?;

        let message = payload.message.unwrap_or_default();

        match state.chat.generate_reply(&message, payload.options.as_ref()).await {
            Ok(reply) => {
                if let Some(sentiment) = &reply.sentiment {
                    state.metrics.record_sentiment(&sentiment.label).await;
                }
                Ok(Json(ChatResponse::from(reply)))
            }
            Err(err) => {
                let err = AppError::from(err);
                match &err {
                    AppError::Internal(msg) => {
                        state.metrics.record_failure().await;
                        tracing::error!("generation failed: {msg}");
                    }
                    other => tracing::warn!("rejected request: {other}"),
                }
                Err(err)
            }
        }
    }
    .instrument(span)
    .await
}

pub async fn get_metrics_handler(State(state): State<SharedState>) -> Json<MetricsData> {
    Json(state.metrics.get_metrics().await)
}
