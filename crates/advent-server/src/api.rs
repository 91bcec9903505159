use std::sync::Arc;

use advent_feed::{FeedService, ATOM_CONTENT_TYPE};
use advent_upstream::UpstreamClient;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id, RequestId};

const FEED_ERROR_BODY: &str = "Failed to fetch feed";

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<FeedService<UpstreamClient>>,
    pub store_name: Arc<str>,
}

impl AppState {
    pub fn new(service: Arc<FeedService<UpstreamClient>>) -> Self {
        let store_name = Arc::from(service.profile().name.as_str());
        Self {
            service,
            store_name,
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/feed", get(feed))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

async fn index(State(state): State<AppState>) -> String {
    format!(
        "{} Advent Calendar Feed\n\nGet the feed at /feed\n",
        state.store_name
    )
}

async fn feed(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Response {
    let document = match state.service.get_feed().await {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "failed to fetch feed");
            return (StatusCode::INTERNAL_SERVER_ERROR, FEED_ERROR_BODY).into_response();
        }
    };

    match document.to_xml() {
        Ok(xml) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, ATOM_CONTENT_TYPE)],
            xml,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(request_id = %req_id.0, error = %e, "failed to render feed");
            (StatusCode::INTERNAL_SERVER_ERROR, FEED_ERROR_BODY).into_response()
        }
    }
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "404 page not found\n")
}
