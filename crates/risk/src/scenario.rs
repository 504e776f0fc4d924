//! Risk scenario output type (an insight payload, not a domain event).

use serde::{Deserialize, Serialize};

use crate::level::RiskLevel;

/// A scored risk scenario linking one asset, one threat and one vulnerability.
///
/// `id` is order-significant: position in the list is the display priority.
/// The labels SHOULD reference entries of the organization's security facts,
/// but unknown labels are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScenario {
    pub id: String,
    pub asset: String,
    pub threat: String,
    pub vulnerability: String,
    pub probability: RiskLevel,
    pub impact: RiskLevel,
    pub risk_level: RiskLevel,
    /// Non-empty ordered list of recommended controls.
    pub controls: Vec<String>,
}

/// Canonical scenario id for a 1-based position: `R` + 2-digit zero-padded.
pub fn sequential_id(position: usize) -> String {
    format!("R{position:02}")
}

/// Whether an id matches the expected `R` + digits shape.
pub(crate) fn is_valid_id(id: &str) -> bool {
    match id.strip_prefix('R') {
        Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
        None => false,
    }
}
