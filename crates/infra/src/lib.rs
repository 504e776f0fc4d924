//! Infrastructure layer: organization record store, the mutation-trigger
//! service around the inference pipeline, and the document-assembly handoff.

pub mod report;
pub mod service;
pub mod store;

pub use report::report_inputs;
pub use service::{OrganizationService, RegisterOrganizationInput, UpdateSecurityProfileInput};
pub use store::{InMemoryOrgStore, OrgStore, OrganizationRecord};
