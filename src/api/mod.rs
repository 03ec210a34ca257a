//! HTTP API Module
//!
//! Maps HTTP method + path onto the record store and validator. Holds no state of its own;
//! the store and the static-asset root are injected as axum `Extension`s.
//!
//! ## Routes
//! - `POST /api/submit`: parse body -> validate -> append -> `201 {"message": ...}`.
//! - `GET /api/results`: the whole collection as a JSON array, in append order.
//! - `OPTIONS *`: `204` pre-flight reply from the CORS middleware.
//! - anything else: static files from the public directory, or `404`.
//!
//! ## Submodules
//! - **`protocol`**: Endpoint paths and response DTOs.
//! - **`handlers`**: Axum handlers for the API routes.
//! - **`assets`**: Static-file responder and content-type mapping.
//! - **`cors`**: Cross-origin headers and pre-flight handling.
//! - **`router`**: Wires it all into an `axum::Router`.

pub mod assets;
pub mod cors;
pub mod handlers;
pub mod protocol;
pub mod router;
