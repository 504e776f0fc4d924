//! `isoforge-orgs` — the Organization aggregate and its security profile.
//!
//! An organization owns the four labeled containers describing its security
//! posture, optionally seeded from an industry template. Risk scenarios are
//! **not** part of this aggregate: they are insights produced by the
//! inference pipeline and persisted by the infrastructure layer.

pub mod organization;
pub mod profile;
pub mod template;

pub use organization::{
    DeleteOrganization, Organization, OrganizationCommand, OrganizationDeleted, OrganizationEvent,
    OrganizationId, OrganizationRegistered, OrganizationStatus, RegisterOrganization,
    SecurityProfileUpdated, UpdateSecurityProfile,
};
pub use profile::SecurityProfile;
pub use template::{SecurityTemplate, TemplateCatalog};
