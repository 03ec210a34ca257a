//! API Protocol
//!
//! Endpoint paths and the JSON bodies exchanged with the browser client.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Accepts one survey response.
pub const ENDPOINT_SUBMIT: &str = "/api/submit";
/// Returns every stored response.
pub const ENDPOINT_RESULTS: &str = "/api/results";

pub const SUBMIT_CONFIRMATION: &str = "Response submitted successfully!";
pub const INVALID_JSON: &str = "invalid JSON";
pub const SAVE_FAILED: &str = "Error saving data";

// --- Data Transfer Objects ---

/// Body of a `201 Created` reply to a submission.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub message: String,
}

/// Body of every `4xx`/`5xx` reply from the API routes.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable reason, e.g. "no goals selected".
    pub error: String,
}
