pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::answer::handlers as answer_handlers;
use crate::scan::handlers as scan_handlers;
use crate::settings::handlers as settings_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Scan API: extraction preview without generating anything
        .route("/api/v1/scan", post(scan_handlers::handle_scan))
        // Answer API: scan + generate, plus history
        .route(
            "/api/v1/answers",
            post(answer_handlers::handle_generate).get(answer_handlers::handle_list_answers),
        )
        .route(
            "/api/v1/answers/:id",
            get(answer_handlers::handle_get_answer),
        )
        // Settings API: Gemini key and resume
        .route(
            "/api/v1/settings",
            get(settings_handlers::handle_get_settings)
                .put(settings_handlers::handle_update_settings),
        )
        .route(
            "/api/v1/settings/resume",
            post(settings_handlers::handle_upload_resume),
        )
        .with_state(state)
}
