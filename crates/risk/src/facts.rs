//! Input snapshot for the inference pipeline.
//!
//! The pipeline defines its own input type rather than importing domain
//! aggregates; higher layers build a snapshot from whatever they store.

use serde::{Deserialize, Serialize};

/// The four labeled containers describing an organization's security posture.
///
/// All containers are ordered; duplicates are not rejected here (the
/// template-merge boundary is where uniqueness is enforced).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityFacts {
    #[serde(default)]
    pub information_assets: Vec<String>,
    #[serde(default)]
    pub threats: Vec<String>,
    #[serde(default)]
    pub vulnerabilities: Vec<String>,
    /// May be empty; organizations often start with no controls in place.
    #[serde(default)]
    pub existing_measures: Vec<String>,
}

impl SecurityFacts {
    pub fn new(
        information_assets: Vec<String>,
        threats: Vec<String>,
        vulnerabilities: Vec<String>,
        existing_measures: Vec<String>,
    ) -> Self {
        Self {
            information_assets,
            threats,
            vulnerabilities,
            existing_measures,
        }
    }

    /// Sufficiency guard: inference is attempted only when assets, threats
    /// and vulnerabilities are all non-empty. Existing measures are optional.
    pub fn has_inference_inputs(&self) -> bool {
        !self.information_assets.is_empty()
            && !self.threats.is_empty()
            && !self.vulnerabilities.is_empty()
    }
}
