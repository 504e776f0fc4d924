use serde::{Deserialize, Serialize};

/// The four labeled containers describing an organization's security posture.
///
/// Containers are ordered; duplicates are tolerated within a container
/// except at the template-merge boundary below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityProfile {
    #[serde(default)]
    pub information_assets: Vec<String>,
    #[serde(default)]
    pub threats: Vec<String>,
    #[serde(default)]
    pub vulnerabilities: Vec<String>,
    #[serde(default)]
    pub existing_measures: Vec<String>,
}

impl SecurityProfile {
    /// Merge a template into this profile: set union preserving first-seen
    /// order, per container. Existing entries are kept; template entries are
    /// appended only if not already present (case-sensitive exact match).
    ///
    /// Idempotent — applying the same template twice adds nothing — and never
    /// removes an existing entry.
    pub fn merge_template(&mut self, template: &SecurityProfile) {
        merge_entries(&mut self.information_assets, &template.information_assets);
        merge_entries(&mut self.threats, &template.threats);
        merge_entries(&mut self.vulnerabilities, &template.vulnerabilities);
        merge_entries(&mut self.existing_measures, &template.existing_measures);
    }
}

fn merge_entries(existing: &mut Vec<String>, additions: &[String]) {
    for entry in additions {
        if !existing.iter().any(|e| e == entry) {
            existing.push(entry.clone());
        }
    }
}
