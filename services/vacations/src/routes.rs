//! Vacation service routes

use axum::{
    Json, Router, middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;

use crate::{middleware::require_session, state::AppState};

pub mod auth;
pub mod vacations;


/// Create the router for the vacation service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            "/auth/logout",
            get(auth::logout).post(auth::logout).delete(auth::logout),
        )
        .route(
            "/vacations",
            get(vacations::list_vacations).post(vacations::create_vacation),
        )
        .route("/vacations/countries", get(vacations::list_countries))
        .route(
            "/vacations/:id",
            get(vacations::get_vacation)
                .put(vacations::update_vacation)
                .post(vacations::update_vacation)
                .delete(vacations::delete_vacation),
        )
        .route("/vacations/:id/delete", post(vacations::delete_vacation))
        .route("/vacations/:id/like", post(vacations::toggle_like))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/auth/login", get(auth::login_page).post(auth::login))
        .route("/auth/signup", get(auth::signup_page).post(auth::signup))
        .merge(protected_routes)
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "vacations"
    }))
}
