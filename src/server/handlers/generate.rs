use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub response: String,
}

pub async fn generate_response(
    State(state): State<Arc<AppState>>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let response = state
        .generator
        .generate(&request.message)
        .await
        .map_err(|err| {
            tracing::error!("Failed to generate response: {}", err);
            ApiError::from(err)
        })?;

    Ok(Json(MessageResponse { response }))
}
