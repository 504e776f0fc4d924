use serde::Deserialize;

use isoforge_orgs::SecurityProfile;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOrganizationRequest {
    pub name: String,
    pub industry: Option<String>,
    #[serde(default)]
    pub security_profile: SecurityProfile,
    pub template_key: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSecurityProfileRequest {
    #[serde(default)]
    pub security_profile: SecurityProfile,
    pub template_key: Option<String>,
}
