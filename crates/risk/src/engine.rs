//! Inference orchestration: AI-assisted when configured, deterministic
//! fallback otherwise — and on every failure.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::client::{AiBackendConfig, ChatCompletion, HttpChatClient};
use crate::error::InferenceError;
use crate::extract::extract_scenario_array;
use crate::facts::SecurityFacts;
use crate::fallback;
use crate::prompt::{SYSTEM_PROMPT, build_prompt};
use crate::sanitize::sanitize_scenarios;
use crate::scenario::RiskScenario;

/// The inference orchestrator.
///
/// Constructed with explicit configuration (never ambient state) so both
/// modes are exercisable deterministically. Three terminal outcomes, always
/// a concrete list:
///
/// 1. insufficient facts → fallback output (empty by construction);
/// 2. no backend configured → fallback output;
/// 3. AI attempt → sanitized scenarios, or fallback on any failure.
///
/// `run_inference` never fails outward; callers may treat inference as
/// side-effect-free on failure. An empty result means "not yet assessable",
/// not an error.
pub struct RiskInferenceEngine {
    backend: Option<Arc<dyn ChatCompletion>>,
}

impl RiskInferenceEngine {
    /// Fallback-only engine (no credential configured).
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    pub fn with_backend(backend: Arc<dyn ChatCompletion>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Build from configuration. A missing credential selects fallback mode;
    /// a present-but-unusable one is logged and degrades to fallback as well.
    pub fn from_config(config: &AiBackendConfig) -> Self {
        if !config.is_configured() {
            return Self::disabled();
        }

        match HttpChatClient::new(config) {
            Ok(client) => Self::with_backend(Arc::new(client)),
            Err(error) => {
                warn!(error = %error, "AI backend misconfigured; running fallback-only");
                Self::disabled()
            }
        }
    }

    pub fn is_ai_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Produce the scenario list for a facts snapshot. Infallible.
    pub async fn run_inference(&self, facts: &SecurityFacts) -> Vec<RiskScenario> {
        if !facts.has_inference_inputs() {
            debug!("insufficient security facts; returning empty scenario list");
            return fallback::generate(facts);
        }

        let Some(backend) = &self.backend else {
            debug!("no AI backend configured; using deterministic fallback");
            return fallback::generate(facts);
        };

        match attempt_ai(backend.as_ref(), facts).await {
            Ok(scenarios) => {
                info!(count = scenarios.len(), "AI risk inference succeeded");
                scenarios
            }
            Err(error) => {
                warn!(error = %error, "AI risk inference failed; using deterministic fallback");
                fallback::generate(facts)
            }
        }
    }
}

impl core::fmt::Debug for RiskInferenceEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RiskInferenceEngine")
            .field("ai_enabled", &self.is_ai_enabled())
            .finish()
    }
}

async fn attempt_ai(
    backend: &dyn ChatCompletion,
    facts: &SecurityFacts,
) -> Result<Vec<RiskScenario>, InferenceError> {
    let prompt = build_prompt(facts);
    let raw = backend.complete(SYSTEM_PROMPT, &prompt).await?;
    let candidates = extract_scenario_array(&raw)?;
    Ok(sanitize_scenarios(&candidates, facts))
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::level::RiskLevel;
    use crate::sanitize::PLACEHOLDER_CONTROL;

    /// Backend fake returning a fixed response text.
    struct FixedResponse(&'static str);

    #[async_trait]
    impl ChatCompletion for FixedResponse {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, InferenceError> {
            Ok(self.0.to_string())
        }
    }

    /// Backend fake failing at the transport layer.
    struct FailingBackend;

    #[async_trait]
    impl ChatCompletion for FailingBackend {
        async fn complete(&self, _system: &str, _user: &str) -> Result<String, InferenceError> {
            Err(InferenceError::Transport("connection refused".to_string()))
        }
    }

    fn facts() -> SecurityFacts {
        SecurityFacts::new(
            vec!["DB".to_string()],
            vec!["Malware".to_string()],
            vec!["Software desactualizado".to_string()],
            Vec::new(),
        )
    }

    #[tokio::test]
    async fn empty_facts_yield_empty_list_regardless_of_backend() {
        let empty = SecurityFacts::default();

        let engine = RiskInferenceEngine::disabled();
        assert!(engine.run_inference(&empty).await.is_empty());

        let engine = RiskInferenceEngine::with_backend(Arc::new(FixedResponse("[]")));
        assert!(engine.run_inference(&empty).await.is_empty());
    }

    #[tokio::test]
    async fn no_backend_equals_fallback_exactly() {
        let engine = RiskInferenceEngine::disabled();
        let facts = facts();

        assert_eq!(
            engine.run_inference(&facts).await,
            fallback::generate(&facts)
        );
    }

    #[tokio::test]
    async fn transport_failure_downgrades_to_fallback() {
        let engine = RiskInferenceEngine::with_backend(Arc::new(FailingBackend));
        let facts = facts();

        assert_eq!(
            engine.run_inference(&facts).await,
            fallback::generate(&facts)
        );
    }

    #[tokio::test]
    async fn garbage_response_downgrades_to_fallback() {
        let engine = RiskInferenceEngine::with_backend(Arc::new(FixedResponse(
            "Lo siento, como modelo de lenguaje no puedo...",
        )));
        let facts = facts();

        assert_eq!(
            engine.run_inference(&facts).await,
            fallback::generate(&facts)
        );
    }

    #[tokio::test]
    async fn non_array_json_downgrades_to_fallback() {
        let engine =
            RiskInferenceEngine::with_backend(Arc::new(FixedResponse(r#"{"ok": true}"#)));
        let facts = facts();

        assert_eq!(
            engine.run_inference(&facts).await,
            fallback::generate(&facts)
        );
    }

    #[tokio::test]
    async fn fenced_partial_candidate_is_repaired() {
        let engine = RiskInferenceEngine::with_backend(Arc::new(FixedResponse(
            "```json\n[{\"asset\":\"X\"}]\n```",
        )));

        let scenarios = engine.run_inference(&facts()).await;

        assert_eq!(scenarios.len(), 1);
        let s = &scenarios[0];
        assert_eq!(s.id, "R01");
        assert_eq!(s.asset, "X");
        assert_eq!(s.threat, "Malware");
        assert_eq!(s.vulnerability, "Software desactualizado");
        assert_eq!(s.probability, RiskLevel::Medium);
        assert_eq!(s.impact, RiskLevel::Medium);
        assert_eq!(s.risk_level, RiskLevel::Medium);
        assert_eq!(s.controls, vec![PLACEHOLDER_CONTROL.to_string()]);
    }

    #[tokio::test]
    async fn valid_ai_output_is_returned_sanitized() {
        let engine = RiskInferenceEngine::with_backend(Arc::new(FixedResponse(
            r#"[
                {"id":"R01","asset":"DB","threat":"Malware","vulnerability":"Software desactualizado",
                 "probability":"Alto","impact":"Alto","riskLevel":"Alto",
                 "controls":["Aplicar parches"]},
                {"asset":"DB","probability":"Bajo","impact":"Bajo"}
            ]"#,
        )));

        let scenarios = engine.run_inference(&facts()).await;

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].risk_level, RiskLevel::High);
        assert_eq!(scenarios[1].id, "R02");
        assert_eq!(scenarios[1].risk_level, RiskLevel::Low);
    }

    #[tokio::test]
    async fn unconfigured_config_selects_fallback_mode() {
        let engine = RiskInferenceEngine::from_config(&AiBackendConfig::disabled());
        assert!(!engine.is_ai_enabled());

        let engine = RiskInferenceEngine::from_config(&AiBackendConfig::with_api_key("sk-test"));
        assert!(engine.is_ai_enabled());
    }
}
