//! Survey Collection Service Library
//!
//! A browser form posts survey responses to an HTTP endpoint which appends them to a
//! single JSON file; a second endpoint reads the file back for tabular display.
//!
//! ## Modules
//! - **`api`**: The axum router. Submit and results endpoints, CORS, static assets.
//! - **`config`**: Server settings from flags and environment.
//! - **`storage`**: The append-only record store over one JSON array on disk.
//! - **`validation`**: Turns an untyped request body into a typed submission.

pub mod api;
pub mod config;
pub mod storage;
pub mod validation;
