use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::AppOrgService;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn list_templates(
    Extension(service): Extension<Arc<AppOrgService>>,
) -> impl IntoResponse {
    let items: Vec<serde_json::Value> = service
        .templates()
        .all()
        .iter()
        .map(|t| {
            serde_json::json!({
                "key": t.key,
                "name": t.name,
                "industry": t.industry,
            })
        })
        .collect();

    Json(serde_json::json!({ "items": items }))
}
