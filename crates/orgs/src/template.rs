//! Industry security templates: named presets mergeable into a profile.

use serde::{Deserialize, Serialize};

use crate::profile::SecurityProfile;

/// A named, industry-tagged preset of security facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityTemplate {
    /// Stable lookup key (e.g. "tecnologia").
    pub key: String,
    pub name: String,
    pub industry: String,
    pub profile: SecurityProfile,
}

/// Catalog of available templates.
///
/// Ships with a built-in set; resolution happens at the service boundary so
/// the aggregate only ever sees already-merged profiles.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    templates: Vec<SecurityTemplate>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<SecurityTemplate>) -> Self {
        Self { templates }
    }

    /// The built-in industry presets.
    pub fn builtin() -> Self {
        Self::new(vec![
            template(
                "tecnologia",
                "Empresa tecnológica",
                "Tecnología",
                &[
                    "Código fuente",
                    "Base de datos de clientes",
                    "Infraestructura en la nube",
                    "Credenciales de despliegue",
                ],
                &["Malware", "Acceso no autorizado", "Fuga de información", "Phishing"],
                &[
                    "Dependencias de software sin actualizar",
                    "Falta de revisión de código",
                    "Contraseñas débiles",
                ],
                &["Control de versiones", "Copias de seguridad automatizadas"],
            ),
            template(
                "financiero",
                "Entidad financiera",
                "Finanzas",
                &[
                    "Datos financieros de clientes",
                    "Sistema de pagos",
                    "Registros contables",
                ],
                &[
                    "Fraude interno",
                    "Acceso no autorizado",
                    "Denegación de servicio",
                    "Phishing",
                ],
                &[
                    "Falta de segregación de funciones",
                    "Monitorización insuficiente de transacciones",
                ],
                &["Auditorías periódicas", "Cifrado de comunicaciones"],
            ),
            template(
                "salud",
                "Centro sanitario",
                "Salud",
                &[
                    "Historias clínicas",
                    "Datos personales de pacientes",
                    "Equipamiento médico conectado",
                ],
                &["Ransomware", "Fuga de información", "Error humano"],
                &[
                    "Sistemas heredados sin soporte",
                    "Falta de formación del personal",
                ],
                &["Control de acceso físico"],
            ),
            template(
                "comercio",
                "Comercio minorista",
                "Comercio",
                &[
                    "Datos de tarjetas de pago",
                    "Plataforma de venta online",
                    "Inventario",
                ],
                &["Phishing", "Malware", "Denegación de servicio"],
                &["TPV sin parches", "Ausencia de segmentación de red"],
                &["Pasarela de pago externa"],
            ),
        ])
    }

    pub fn get(&self, key: &str) -> Option<&SecurityTemplate> {
        self.templates.iter().find(|t| t.key == key)
    }

    pub fn all(&self) -> &[SecurityTemplate] {
        &self.templates
    }
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn template(
    key: &str,
    name: &str,
    industry: &str,
    assets: &[&str],
    threats: &[&str],
    vulnerabilities: &[&str],
    measures: &[&str],
) -> SecurityTemplate {
    let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();

    SecurityTemplate {
        key: key.to_string(),
        name: name.to_string(),
        industry: industry.to_string(),
        profile: SecurityProfile {
            information_assets: owned(assets),
            threats: owned(threats),
            vulnerabilities: owned(vulnerabilities),
            existing_measures: owned(measures),
        },
    }
}
