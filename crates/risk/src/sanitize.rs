//! Scenario validator/sanitizer: the trust boundary for generator output.
//!
//! Candidates arrive as raw `serde_json::Value`s (the extraction step only
//! guarantees "a JSON array"). Every candidate is repaired field by field and
//! kept; nothing is rejected and nothing can panic past this boundary. Direct
//! deserialization into [`RiskScenario`] is deliberately not used here so the
//! coercion rules stay auditable in one place.

use serde_json::Value as JsonValue;

use crate::facts::SecurityFacts;
use crate::level::{RiskLevel, combine};
use crate::scenario::{RiskScenario, is_valid_id, sequential_id};

/// Control recommendation substituted when a candidate carries no usable list.
pub const PLACEHOLDER_CONTROL: &str =
    "Definir e implantar controles específicos para este riesgo";

// Backstops for the impossible case where a facts container is empty at
// validation time (the sufficiency guard runs first). They keep the repair
// rules total without panicking.
const BACKSTOP_ASSET: &str = "Activo de información";
const BACKSTOP_THREAT: &str = "Amenaza no identificada";
const BACKSTOP_VULNERABILITY: &str = "Vulnerabilidad no identificada";

/// Repair an untrusted candidate list into syntactically valid scenarios.
///
/// Output length always equals input length; repairing an already-valid list
/// is the identity.
pub fn sanitize_scenarios(candidates: &[JsonValue], facts: &SecurityFacts) -> Vec<RiskScenario> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| repair_candidate(candidate, index, facts))
        .collect()
}

fn repair_candidate(candidate: &JsonValue, index: usize, facts: &SecurityFacts) -> RiskScenario {
    let id = candidate
        .get("id")
        .and_then(JsonValue::as_str)
        .filter(|s| is_valid_id(s))
        .map(str::to_string)
        .unwrap_or_else(|| sequential_id(index + 1));

    let probability = level_field(candidate, "probability");
    let impact = level_field(candidate, "impact");

    // A well-formed generator-supplied riskLevel is trusted as-is; only a
    // missing or malformed one is recomputed from the matrix.
    let risk_level = candidate
        .get("riskLevel")
        .and_then(JsonValue::as_str)
        .and_then(RiskLevel::parse)
        .unwrap_or_else(|| combine(probability, impact));

    let asset = label_field(candidate, "asset", &facts.information_assets, BACKSTOP_ASSET);
    let threat = label_field(candidate, "threat", &facts.threats, BACKSTOP_THREAT);
    let vulnerability = label_field(
        candidate,
        "vulnerability",
        &facts.vulnerabilities,
        BACKSTOP_VULNERABILITY,
    );

    let controls = controls_field(candidate);

    RiskScenario {
        id,
        asset,
        threat,
        vulnerability,
        probability,
        impact,
        risk_level,
        controls,
    }
}

fn level_field(candidate: &JsonValue, key: &str) -> RiskLevel {
    candidate
        .get(key)
        .and_then(JsonValue::as_str)
        .and_then(RiskLevel::parse)
        .unwrap_or(RiskLevel::Medium)
}

fn label_field(candidate: &JsonValue, key: &str, pool: &[String], backstop: &str) -> String {
    candidate
        .get(key)
        .and_then(JsonValue::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
        .or_else(|| pool.first().cloned())
        .unwrap_or_else(|| backstop.to_string())
}

fn controls_field(candidate: &JsonValue) -> Vec<String> {
    let controls: Vec<String> = candidate
        .get("controls")
        .and_then(JsonValue::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(JsonValue::as_str)
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    if controls.is_empty() {
        vec![PLACEHOLDER_CONTROL.to_string()]
    } else {
        controls
    }
}
