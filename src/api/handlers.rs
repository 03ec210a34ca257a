use super::protocol::{
    ErrorResponse, INVALID_JSON, SAVE_FAILED, SUBMIT_CONFIRMATION, SubmitResponse,
};
use crate::storage::store::RecordStore;
use crate::storage::types::SubmissionRecord;
use crate::validation::validator::validate;

use axum::{Extension, Json, body::Bytes, http::StatusCode};
use serde_json::Value;
use std::sync::Arc;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, reason: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: reason.into(),
        }),
    )
}

pub async fn handle_submit<S: RecordStore>(
    Extension(store): Extension<Arc<S>>,
    body: Bytes,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let raw: Value = match serde_json::from_slice(&body) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!("Rejected unparseable submission body: {}", e);
            return Err(api_error(StatusCode::BAD_REQUEST, INVALID_JSON));
        }
    };

    let submission = validate(&raw).map_err(|reason| {
        tracing::warn!("Rejected submission: {}", reason);
        api_error(StatusCode::BAD_REQUEST, reason.to_string())
    })?;

    match store.append(submission).await {
        Ok(record) => {
            tracing::info!("Stored survey response at {}", record.timestamp);
            Ok((
                StatusCode::CREATED,
                Json(SubmitResponse {
                    message: SUBMIT_CONFIRMATION.to_string(),
                }),
            ))
        }
        Err(e) => {
            tracing::error!("Failed to store survey response: {}", e);
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, SAVE_FAILED))
        }
    }
}

pub async fn handle_results<S: RecordStore>(
    Extension(store): Extension<Arc<S>>,
) -> Json<Vec<SubmissionRecord>> {
    Json(store.read_all().await)
}

/// Wrong method on an API path.
pub async fn handle_not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not Found")
}
