use axum::{Router, routing::get};

pub mod access;
pub mod system;
pub mod team;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/access", access::router())
        .nest("/team", team::router())
}
