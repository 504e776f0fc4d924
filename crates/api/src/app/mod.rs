//! HTTP application wiring (Axum router + service wiring).
//!
//! Folder layout:
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use isoforge_events::{EventEnvelope, InMemoryEventBus};
use isoforge_infra::{InMemoryOrgStore, OrganizationService};
use isoforge_orgs::{OrganizationEvent, TemplateCatalog};
use isoforge_risk::{AiBackendConfig, RiskInferenceEngine};

pub mod dto;
pub mod errors;
pub mod routes;

/// Concrete service wiring used by the API (in-memory store + bus).
pub type AppOrgService = OrganizationService<
    Arc<InMemoryOrgStore>,
    Arc<InMemoryEventBus<EventEnvelope<OrganizationEvent>>>,
>;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AiBackendConfig) -> Router {
    let engine = RiskInferenceEngine::from_config(config);
    let service: Arc<AppOrgService> = Arc::new(OrganizationService::new(
        Arc::new(InMemoryOrgStore::new()),
        Arc::new(InMemoryEventBus::new()),
        engine,
        TemplateCatalog::builtin(),
    ));

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/templates", get(routes::system::list_templates))
        .nest("/organizations", routes::organizations::router())
        .layer(ServiceBuilder::new().layer(Extension(service)))
}
