//! Organization service: the mutation trigger around the inference pipeline.
//!
//! This is the only call site of [`RiskInferenceEngine::run_inference`].
//! Inference runs synchronously on registration and on every detected change
//! of the security profile; the resulting scenario list replaces the stored
//! one wholesale, together with `last_inference_at`.
//!
//! Concurrency note: concurrent runs for the *same* organization are neither
//! deduplicated nor serialized; the store upsert is last-write-wins for the
//! scenario list and `last_inference_at`. Acceptable under the product's low
//! per-organization write concurrency.

use chrono::Utc;
use tracing::{debug, warn};
use uuid::Uuid;

use isoforge_core::{Aggregate, AggregateRoot, DomainError, DomainResult};
use isoforge_events::{EventBus, EventEnvelope};
use isoforge_orgs::{
    DeleteOrganization, Organization, OrganizationCommand, OrganizationEvent, OrganizationId,
    RegisterOrganization, SecurityProfile, TemplateCatalog, UpdateSecurityProfile,
};
use isoforge_risk::{RiskInferenceEngine, SecurityFacts};

use crate::store::{OrgStore, OrganizationRecord};

const AGGREGATE_TYPE: &str = "organization";

/// Input for organization registration.
#[derive(Debug, Clone)]
pub struct RegisterOrganizationInput {
    pub name: String,
    pub industry: Option<String>,
    pub profile: SecurityProfile,
    /// Optional template key, resolved against the catalog and merged into
    /// `profile` before the command is dispatched.
    pub template_key: Option<String>,
}

/// Input for a security-profile update (wholesale replacement + optional
/// template merge).
#[derive(Debug, Clone)]
pub struct UpdateSecurityProfileInput {
    pub profile: SecurityProfile,
    pub template_key: Option<String>,
}

pub struct OrganizationService<S, B> {
    store: S,
    bus: B,
    engine: RiskInferenceEngine,
    templates: TemplateCatalog,
}

impl<S, B> OrganizationService<S, B>
where
    S: OrgStore,
    B: EventBus<EventEnvelope<OrganizationEvent>>,
{
    pub fn new(store: S, bus: B, engine: RiskInferenceEngine, templates: TemplateCatalog) -> Self {
        Self {
            store,
            bus,
            engine,
            templates,
        }
    }

    pub fn templates(&self) -> &TemplateCatalog {
        &self.templates
    }

    /// Register an organization and run the initial risk inference.
    pub async fn register_organization(
        &self,
        input: RegisterOrganizationInput,
    ) -> DomainResult<OrganizationRecord> {
        let profile = self.resolve_profile(input.profile, input.template_key.as_deref())?;

        let id = OrganizationId::new(isoforge_core::AggregateId::new());
        let mut org = Organization::empty(id);
        let events = org.handle(&OrganizationCommand::RegisterOrganization(
            RegisterOrganization {
                organization_id: id,
                name: input.name,
                industry: input.industry,
                profile,
                occurred_at: Utc::now(),
            },
        ))?;
        for event in &events {
            org.apply(event);
        }

        let scenarios = self.engine.run_inference(&facts_from(org.profile())).await;

        let now = Utc::now();
        let record = OrganizationRecord {
            organization_id: id,
            name: org.name().to_string(),
            industry: org.industry().map(str::to_string),
            profile: org.profile().clone(),
            risk_scenarios: scenarios,
            last_inference_at: Some(now),
            created_at: now,
            updated_at: now,
            version: org.version(),
        };

        self.store.upsert(record.clone());
        self.publish(id, org.version(), &events);

        Ok(record)
    }

    /// Replace the security profile and rerun inference if it changed.
    ///
    /// An update that leaves the merged profile identical to the stored one
    /// skips inference entirely; the stored scenario list and
    /// `last_inference_at` stay untouched.
    pub async fn update_security_profile(
        &self,
        id: OrganizationId,
        input: UpdateSecurityProfileInput,
    ) -> DomainResult<OrganizationRecord> {
        let existing = self.store.get(id).ok_or_else(DomainError::not_found)?;
        let profile = self.resolve_profile(input.profile, input.template_key.as_deref())?;

        if profile == existing.profile {
            debug!(organization = %id, "security profile unchanged; skipping inference");
            return Ok(existing);
        }

        let mut org = Organization::restore(
            id,
            existing.name.clone(),
            existing.industry.clone(),
            existing.profile.clone(),
            existing.version,
        );
        let events = org.handle(&OrganizationCommand::UpdateSecurityProfile(
            UpdateSecurityProfile {
                organization_id: id,
                profile,
                occurred_at: Utc::now(),
            },
        ))?;
        for event in &events {
            org.apply(event);
        }

        let scenarios = self.engine.run_inference(&facts_from(org.profile())).await;

        let now = Utc::now();
        let record = OrganizationRecord {
            profile: org.profile().clone(),
            risk_scenarios: scenarios,
            last_inference_at: Some(now),
            updated_at: now,
            version: org.version(),
            ..existing
        };

        self.store.upsert(record.clone());
        self.publish(id, org.version(), &events);

        Ok(record)
    }

    pub fn get_organization(&self, id: OrganizationId) -> DomainResult<OrganizationRecord> {
        self.store.get(id).ok_or_else(DomainError::not_found)
    }

    pub fn list_organizations(&self) -> Vec<OrganizationRecord> {
        self.store.list()
    }

    /// Delete an organization; its scenario list is destroyed with it.
    pub fn delete_organization(&self, id: OrganizationId) -> DomainResult<()> {
        let existing = self.store.get(id).ok_or_else(DomainError::not_found)?;

        let mut org = Organization::restore(
            id,
            existing.name,
            existing.industry,
            existing.profile,
            existing.version,
        );
        let events = org.handle(&OrganizationCommand::DeleteOrganization(
            DeleteOrganization {
                organization_id: id,
                occurred_at: Utc::now(),
            },
        ))?;
        for event in &events {
            org.apply(event);
        }

        self.store.remove(id);
        self.publish(id, org.version(), &events);

        Ok(())
    }

    fn resolve_profile(
        &self,
        mut profile: SecurityProfile,
        template_key: Option<&str>,
    ) -> DomainResult<SecurityProfile> {
        if let Some(key) = template_key {
            let template = self.templates.get(key).ok_or_else(|| {
                DomainError::validation(format!("unknown security template: {key}"))
            })?;
            profile.merge_template(&template.profile);
        }
        Ok(profile)
    }

    /// Best-effort publication: the record write is the source of truth.
    fn publish(&self, id: OrganizationId, version_after: u64, events: &[OrganizationEvent]) {
        let first_sequence = version_after.saturating_sub(events.len() as u64) + 1;

        for (offset, event) in events.iter().enumerate() {
            let envelope = EventEnvelope::new(
                Uuid::now_v7(),
                id.0,
                AGGREGATE_TYPE,
                first_sequence + offset as u64,
                Utc::now(),
                event.clone(),
            );

            if let Err(error) = self.bus.publish(envelope) {
                warn!(organization = %id, error = ?error, "failed to publish organization event");
            }
        }
    }
}

/// Map the domain profile into the pipeline's input snapshot. The pipeline
/// crate owns its own types and never imports domain aggregates.
fn facts_from(profile: &SecurityProfile) -> SecurityFacts {
    SecurityFacts::new(
        profile.information_assets.clone(),
        profile.threats.clone(),
        profile.vulnerabilities.clone(),
        profile.existing_measures.clone(),
    )
}
