use isoforge_risk::AiBackendConfig;

#[tokio::main]
async fn main() {
    isoforge_observability::init();

    let config = backend_config_from_env();
    if !config.is_configured() {
        tracing::warn!(
            "ISOFORGE_AI_API_KEY not set; risk inference runs in deterministic fallback mode"
        );
    }

    let app = isoforge_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}

/// Read backend configuration from the environment, once, at startup. The
/// engine itself never touches ambient state.
fn backend_config_from_env() -> AiBackendConfig {
    let defaults = AiBackendConfig::default();

    AiBackendConfig {
        api_key: std::env::var("ISOFORGE_AI_API_KEY").ok(),
        endpoint: std::env::var("ISOFORGE_AI_ENDPOINT").unwrap_or(defaults.endpoint),
        model: std::env::var("ISOFORGE_AI_MODEL").unwrap_or(defaults.model),
        timeout: defaults.timeout,
    }
}
