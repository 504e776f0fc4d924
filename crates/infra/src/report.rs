//! Read-only handoff to the document-assembly collaborator.
//!
//! Report rendering (prose, tables, PDF) lives outside this system; it
//! receives the finished scenario list as the named `riskScenarios` input and
//! nothing here knows about rendering formats.

use serde_json::{Value as JsonValue, json};

use crate::store::OrganizationRecord;

/// Assemble the named inputs for risk-assessment report rendering.
pub fn report_inputs(record: &OrganizationRecord) -> JsonValue {
    json!({
        "organizationId": record.organization_id,
        "organizationName": record.name,
        "industry": record.industry,
        "securityFacts": record.profile,
        "riskScenarios": record.risk_scenarios,
        "lastInferenceAt": record.last_inference_at,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use isoforge_core::AggregateId;
    use isoforge_orgs::{OrganizationId, SecurityProfile};

    use super::*;

    #[test]
    fn scenarios_are_exposed_under_the_expected_key() {
        let now = Utc::now();
        let record = OrganizationRecord {
            organization_id: OrganizationId::new(AggregateId::new()),
            name: "Acme SL".to_string(),
            industry: None,
            profile: SecurityProfile::default(),
            risk_scenarios: Vec::new(),
            last_inference_at: Some(now),
            created_at: now,
            updated_at: now,
            version: 1,
        };

        let inputs = report_inputs(&record);

        assert!(inputs["riskScenarios"].is_array());
        assert_eq!(inputs["organizationName"], "Acme SL");
        assert!(inputs["securityFacts"]["informationAssets"].is_array());
    }
}
