use std::sync::Arc;

#[tokio::main]
async fn main() {
    selldesk_observability::init();

    // Dev wiring: unsigned JSON claims + in-memory grants. A real deployment
    // injects a verifying ClaimsVerifier and a durable grant store.
    tracing::warn!("using the unsigned dev claims verifier; do not expose this build");

    let verifier = Arc::new(selldesk_api::middleware::JsonClaimsVerifier);
    let services = Arc::new(selldesk_api::app::services::AppServices::in_memory());
    let app = selldesk_api::app::build_app(verifier, services);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
