//! Deterministic fallback scenario generator.
//!
//! Used whenever no AI backend is configured or the AI path fails at any
//! stage. Offline, side-effect free and total: the same facts always produce
//! the same list. The keyword heuristics are literal lookup tables — constant
//! data, inspectable and testable as such.

use crate::facts::SecurityFacts;
use crate::level::{RiskLevel, combine};
use crate::scenario::{RiskScenario, sequential_id};

/// Upper bound on generated scenarios (fewer if fewer assets exist).
const MAX_SCENARIOS: usize = 5;

/// Vulnerability labels containing any of these raise probability to High.
/// Lowercase; matching is case-insensitive substring.
const WEAKNESS_KEYWORDS: &[&str] = &[
    "débil",
    "debil",
    "falta",
    "insuficiente",
    "ausencia",
    "carece",
];

/// Asset labels containing any of these raise impact to High.
const SENSITIVE_KEYWORDS: &[&str] = &[
    "cliente",
    "financier",
    "crítico",
    "critico",
    "personal",
    "confidencial",
];

/// Threat-category table: first row whose keywords match the threat label
/// (case-insensitive substring) supplies the recommended controls.
const THREAT_CONTROLS: &[(&[&str], &[&str])] = &[
    (
        &["malware", "virus", "ransomware"],
        &[
            "Instalar y mantener soluciones antimalware actualizadas",
            "Aplicar parches de seguridad de forma periódica",
            "Restringir la ejecución de software no autorizado",
        ],
    ),
    (
        &["acceso no autorizado", "intrusión", "intrusion"],
        &[
            "Implantar autenticación multifactor",
            "Revisar periódicamente los privilegios de acceso",
            "Registrar y monitorizar los accesos a sistemas críticos",
        ],
    ),
    (
        &["fuga", "filtración", "filtracion", "robo de información", "robo de informacion"],
        &[
            "Cifrar la información sensible en reposo y en tránsito",
            "Clasificar la información según su criticidad",
            "Implantar controles de prevención de fuga de datos",
        ],
    ),
    (
        &["phishing", "suplantación", "suplantacion", "ingeniería social", "ingenieria social"],
        &[
            "Formar al personal en la identificación de correos fraudulentos",
            "Implantar filtrado de correo y autenticación de dominios",
            "Realizar simulaciones de phishing de forma periódica",
        ],
    ),
    (
        &["denegación de servicio", "denegacion de servicio", "ddos"],
        &[
            "Contratar protección frente a ataques de denegación de servicio",
            "Dimensionar la capacidad con margen frente a picos de tráfico",
            "Definir un plan de continuidad para servicios expuestos",
        ],
    ),
    (
        &["error humano", "errores humanos", "descuido", "negligencia"],
        &[
            "Formar y concienciar periódicamente al personal",
            "Documentar los procedimientos operativos críticos",
            "Exigir doble verificación en las tareas sensibles",
        ],
    ),
];

/// Controls recommended when no threat category matches.
const GENERIC_CONTROLS: &[&str] = &[
    "Realizar evaluaciones de riesgo periódicas",
    "Aplicar el principio de mínimo privilegio en los accesos",
    "Mantener copias de seguridad verificadas y planes de recuperación",
];

/// Generate up to [`MAX_SCENARIOS`] scenarios, one per asset index, cycling
/// through threats and vulnerabilities.
///
/// Returns an empty list when the sufficiency guard's precondition does not
/// hold. Never reads external state and never fails.
pub fn generate(facts: &SecurityFacts) -> Vec<RiskScenario> {
    if !facts.has_inference_inputs() {
        return Vec::new();
    }

    let count = facts.information_assets.len().min(MAX_SCENARIOS);

    (0..count)
        .map(|i| {
            let asset = &facts.information_assets[i];
            let threat = &facts.threats[i % facts.threats.len()];
            let vulnerability = &facts.vulnerabilities[i % facts.vulnerabilities.len()];

            let probability = if contains_any(vulnerability, WEAKNESS_KEYWORDS) {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            };
            let impact = if contains_any(asset, SENSITIVE_KEYWORDS) {
                RiskLevel::High
            } else {
                RiskLevel::Medium
            };

            RiskScenario {
                id: sequential_id(i + 1),
                asset: asset.clone(),
                threat: threat.clone(),
                vulnerability: vulnerability.clone(),
                probability,
                impact,
                risk_level: combine(probability, impact),
                controls: controls_for_threat(threat),
            }
        })
        .collect()
}

/// Look up the control recommendations for a threat label.
pub fn controls_for_threat(threat: &str) -> Vec<String> {
    let lowered = threat.to_lowercase();

    let controls = THREAT_CONTROLS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.contains(k)))
        .map(|(_, controls)| *controls)
        .unwrap_or(GENERIC_CONTROLS);

    controls.iter().map(|c| c.to_string()).collect()
}

fn contains_any(label: &str, keywords: &[&str]) -> bool {
    let lowered = label.to_lowercase();
    keywords.iter().any(|k| lowered.contains(k))
}
