//! Risk severity levels and the 3×3 risk matrix.

use serde::{Deserialize, Serialize};

/// Severity level, totally ordered: Low < Medium < High.
///
/// The canonical persisted/rendered strings are Spanish ("Bajo", "Medio",
/// "Alto"); compliance documents are produced in that language.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum RiskLevel {
    #[serde(rename = "Bajo")]
    Low,
    #[serde(rename = "Medio")]
    Medium,
    #[serde(rename = "Alto")]
    High,
}

impl RiskLevel {
    /// Canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Bajo",
            RiskLevel::Medium => "Medio",
            RiskLevel::High => "Alto",
        }
    }

    /// Parse a canonical string. Anything else is `None`; callers decide the
    /// coercion (the sanitizer substitutes Medium).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "Bajo" => Some(RiskLevel::Low),
            "Medio" => Some(RiskLevel::Medium),
            "Alto" => Some(RiskLevel::High),
            _ => None,
        }
    }
}

impl core::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The risk matrix: derive a risk level from probability and impact.
///
/// Pure and total over the 3×3 domain. The lattice is fixed:
///
/// | prob \ impact | Alto  | Medio | Bajo  |
/// |---------------|-------|-------|-------|
/// | Alto          | Alto  | Alto  | Medio |
/// | Medio         | Alto  | Medio | Bajo  |
/// | Bajo          | Medio | Bajo  | Bajo  |
pub fn combine(probability: RiskLevel, impact: RiskLevel) -> RiskLevel {
    use RiskLevel::{High, Low, Medium};

    match (probability, impact) {
        (High, High) => High,
        (High, Medium) => High,
        (High, Low) => Medium,
        (Medium, High) => High,
        (Medium, Medium) => Medium,
        (Medium, Low) => Low,
        (Low, High) => Medium,
        (Low, Medium) => Low,
        (Low, Low) => Low,
    }
}

#[cfg(test)]
mod tests {
    use super::RiskLevel::{High, Low, Medium};
    use super::*;

    #[test]
    fn matrix_matches_reference_table() {
        let cases = [
            (High, High, High),
            (High, Medium, High),
            (High, Low, Medium),
            (Medium, High, High),
            (Medium, Medium, Medium),
            (Medium, Low, Low),
            (Low, High, Medium),
            (Low, Medium, Low),
            (Low, Low, Low),
        ];

        for (probability, impact, expected) in cases {
            assert_eq!(
                combine(probability, impact),
                expected,
                "combine({probability}, {impact})"
            );
        }
    }

    #[test]
    fn matrix_is_symmetric_by_construction() {
        for p in [Low, Medium, High] {
            for i in [Low, Medium, High] {
                assert_eq!(combine(p, i), combine(i, p));
            }
        }
    }

    #[test]
    fn levels_are_totally_ordered() {
        assert!(Low < Medium);
        assert!(Medium < High);
    }

    #[test]
    fn canonical_strings_round_trip() {
        for level in [Low, Medium, High] {
            assert_eq!(RiskLevel::parse(level.as_str()), Some(level));
        }
    }

    #[test]
    fn parse_rejects_non_canonical_strings() {
        for s in ["bajo", "ALTO", "High", "Moderado", ""] {
            assert_eq!(RiskLevel::parse(s), None, "parse({s:?})");
        }
        // Surrounding whitespace is tolerated; casing is not.
        assert_eq!(RiskLevel::parse(" Alto "), Some(High));
    }

    #[test]
    fn serde_uses_canonical_strings() {
        assert_eq!(serde_json::to_string(&High).unwrap(), "\"Alto\"");
        let parsed: RiskLevel = serde_json::from_str("\"Bajo\"").unwrap();
        assert_eq!(parsed, Low);
    }
}
