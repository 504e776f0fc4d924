//! Prompt construction for the external generation backend.
//!
//! Deterministic text template: the same facts always render the same
//! prompt. The instructions demand a bare JSON array so the extraction step
//! has a fighting chance; the sanitizer still assumes nothing.

use crate::facts::SecurityFacts;

/// System instruction sent with every inference request.
pub const SYSTEM_PROMPT: &str = "Eres un consultor experto en seguridad de la información y en \
     la norma ISO/IEC 27001. Respondes únicamente con JSON válido, sin texto adicional.";

/// Render the user message embedding the four fact containers.
pub fn build_prompt(facts: &SecurityFacts) -> String {
    let mut out = String::new();

    out.push_str(
        "Analiza la siguiente información sobre la postura de seguridad de una \
         organización y genera escenarios de riesgo para su evaluación ISO 27001.\n\n",
    );

    push_section(&mut out, "Activos de información", &facts.information_assets);
    push_section(&mut out, "Amenazas", &facts.threats);
    push_section(&mut out, "Vulnerabilidades", &facts.vulnerabilities);
    push_section(&mut out, "Medidas de seguridad existentes", &facts.existing_measures);

    out.push_str(
        "Devuelve exclusivamente un array JSON de entre 7 y 10 objetos, sin prosa, \
         sin comentarios y sin texto fuera del array. Cada objeto debe tener \
         exactamente esta forma:\n\
         {\"id\": \"R01\", \"asset\": \"...\", \"threat\": \"...\", \
         \"vulnerability\": \"...\", \"probability\": \"Bajo|Medio|Alto\", \
         \"impact\": \"Bajo|Medio|Alto\", \"riskLevel\": \"Bajo|Medio|Alto\", \
         \"controls\": [\"...\", \"...\"]}\n",
    );

    out
}

fn push_section(out: &mut String, title: &str, entries: &[String]) {
    out.push_str(title);
    out.push_str(":\n");

    if entries.is_empty() {
        out.push_str("- (ninguna registrada)\n");
    } else {
        for entry in entries {
            out.push_str("- ");
            out.push_str(entry);
            out.push('\n');
        }
    }

    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facts() -> SecurityFacts {
        SecurityFacts::new(
            vec!["BD de clientes".to_string()],
            vec!["Malware".to_string(), "Phishing".to_string()],
            vec!["Contraseñas débiles".to_string()],
            Vec::new(),
        )
    }

    #[test]
    fn prompt_embeds_every_fact_entry() {
        let prompt = build_prompt(&facts());

        assert!(prompt.contains("- BD de clientes"));
        assert!(prompt.contains("- Malware"));
        assert!(prompt.contains("- Phishing"));
        assert!(prompt.contains("- Contraseñas débiles"));
    }

    #[test]
    fn empty_measures_render_empty_safe() {
        let prompt = build_prompt(&facts());
        assert!(prompt.contains("Medidas de seguridad existentes:\n- (ninguna registrada)"));
    }

    #[test]
    fn prompt_demands_a_bare_json_array() {
        let prompt = build_prompt(&facts());

        assert!(prompt.contains("array JSON de entre 7 y 10 objetos"));
        assert!(prompt.contains("\"riskLevel\""));
        assert!(prompt.contains("sin prosa"));
    }

    #[test]
    fn prompt_is_deterministic() {
        assert_eq!(build_prompt(&facts()), build_prompt(&facts()));
    }
}
