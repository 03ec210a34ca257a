use super::assets::{StaticAssets, handle_static};
use super::cors::cors;
use super::handlers::{handle_not_found, handle_results, handle_submit};
use super::protocol::{ENDPOINT_RESULTS, ENDPOINT_SUBMIT};
use crate::storage::store::RecordStore;

use axum::{
    Extension, Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

/// Builds the HTTP application around a record store and a public directory.
pub fn build_router<S: RecordStore>(store: Arc<S>, assets: StaticAssets) -> Router {
    Router::new()
        .route(
            ENDPOINT_SUBMIT,
            post(handle_submit::<S>).fallback(handle_not_found),
        )
        .route(
            ENDPOINT_RESULTS,
            get(handle_results::<S>).fallback(handle_not_found),
        )
        .fallback(handle_static)
        .layer(Extension(store))
        .layer(Extension(Arc::new(assets)))
        .layer(middleware::from_fn(cors))
}
