use std::str::FromStr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};

use isoforge_core::AggregateId;
use isoforge_infra::{RegisterOrganizationInput, UpdateSecurityProfileInput, report_inputs};
use isoforge_orgs::OrganizationId;

use crate::app::{AppOrgService, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(register_organization).get(list_organizations))
        .route("/:id", get(get_organization).delete(delete_organization))
        .route("/:id/security", put(update_security_profile))
        .route("/:id/risk-scenarios", get(get_risk_scenarios))
        .route("/:id/report-inputs", get(get_report_inputs))
}

pub async fn register_organization(
    Extension(service): Extension<Arc<AppOrgService>>,
    Json(body): Json<dto::RegisterOrganizationRequest>,
) -> axum::response::Response {
    let input = RegisterOrganizationInput {
        name: body.name,
        industry: body.industry,
        profile: body.security_profile,
        template_key: body.template_key,
    };

    match service.register_organization(input).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn list_organizations(
    Extension(service): Extension<Arc<AppOrgService>>,
) -> axum::response::Response {
    let items = service.list_organizations();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_organization(
    Extension(service): Extension<Arc<AppOrgService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_organization_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match service.get_organization(id) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn update_security_profile(
    Extension(service): Extension<Arc<AppOrgService>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateSecurityProfileRequest>,
) -> axum::response::Response {
    let id = match parse_organization_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let input = UpdateSecurityProfileInput {
        profile: body.security_profile,
        template_key: body.template_key,
    };

    match service.update_security_profile(id, input).await {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn delete_organization(
    Extension(service): Extension<Arc<AppOrgService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_organization_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match service.delete_organization(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn get_risk_scenarios(
    Extension(service): Extension<Arc<AppOrgService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_organization_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match service.get_organization(id) {
        Ok(record) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "items": record.risk_scenarios,
                "lastInferenceAt": record.last_inference_at,
            })),
        )
            .into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

pub async fn get_report_inputs(
    Extension(service): Extension<Arc<AppOrgService>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match parse_organization_id(&id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match service.get_organization(id) {
        Ok(record) => (StatusCode::OK, Json(report_inputs(&record))).into_response(),
        Err(err) => errors::domain_error_to_response(err),
    }
}

fn parse_organization_id(raw: &str) -> Result<OrganizationId, axum::response::Response> {
    AggregateId::from_str(raw)
        .map(OrganizationId::new)
        .map_err(errors::domain_error_to_response)
}
