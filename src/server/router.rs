use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{generate, health};
use crate::state::AppState;

/// Creates the application router.
///
/// Routes:
/// - `POST /generate-response/` drafts a reply to a prospect message (also
///   served without the trailing slash)
/// - `GET /health` reports liveness and corpus size
///
/// A CORS layer is added only when origins are configured.
pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = build_cors_layer(&state.config.server.cors_allowed_origins);

    let router = Router::new()
        .route("/health", get(health::health))
        .route("/generate-response/", post(generate::generate_response))
        .route("/generate-response", post(generate::generate_response))
        .with_state(state);

    let router = match cors_layer {
        Some(layer) => router.layer(layer),
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

fn build_cors_layer(origins: &[String]) -> Option<CorsLayer> {
    let allowed_origins = origins
        .iter()
        .map(|origin| origin.trim())
        .filter(|origin| !origin.is_empty())
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect::<Vec<_>>();

    if allowed_origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(allowed_origins))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::ACCEPT, header::CONTENT_TYPE]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_origins_means_no_cors_layer() {
        assert!(build_cors_layer(&[]).is_none());
        assert!(build_cors_layer(&["  ".to_string()]).is_none());
    }

    #[test]
    fn configured_origins_enable_cors() {
        let origins = vec!["http://localhost:3000".to_string()];
        assert!(build_cors_layer(&origins).is_some());
    }
}
