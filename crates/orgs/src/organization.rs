use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use isoforge_core::{Aggregate, AggregateId, AggregateRoot, DomainError};
use isoforge_events::Event;

use crate::profile::SecurityProfile;

/// Organization identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(pub AggregateId);

impl OrganizationId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Organization lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationStatus {
    Active,
    Deleted,
}

/// Aggregate root: an organization and its security profile.
///
/// Risk scenarios are deliberately absent here: they are derived insights,
/// replaced wholesale by the inference pipeline and persisted by the
/// infrastructure layer alongside this aggregate's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    id: OrganizationId,
    name: String,
    industry: Option<String>,
    profile: SecurityProfile,
    status: OrganizationStatus,
    version: u64,
    created: bool,
}

impl Organization {
    /// Create an empty, not-yet-created aggregate instance for rehydration.
    pub fn empty(id: OrganizationId) -> Self {
        Self {
            id,
            name: String::new(),
            industry: None,
            profile: SecurityProfile::default(),
            status: OrganizationStatus::Active,
            version: 0,
            created: false,
        }
    }

    /// Rehydrate from a persisted record snapshot (record-store persistence
    /// keeps state, not event streams).
    pub fn restore(
        id: OrganizationId,
        name: String,
        industry: Option<String>,
        profile: SecurityProfile,
        version: u64,
    ) -> Self {
        Self {
            id,
            name,
            industry,
            profile,
            status: OrganizationStatus::Active,
            version,
            created: true,
        }
    }

    pub fn id_typed(&self) -> OrganizationId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }

    pub fn profile(&self) -> &SecurityProfile {
        &self.profile
    }

    pub fn status(&self) -> OrganizationStatus {
        self.status
    }

    /// Invariant helper: deleted organizations accept no further commands.
    pub fn is_active(&self) -> bool {
        self.created && self.status == OrganizationStatus::Active
    }
}

impl AggregateRoot for Organization {
    type Id = OrganizationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: RegisterOrganization. `profile` arrives already merged with any
/// referenced template (resolution happens at the service boundary).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterOrganization {
    pub organization_id: OrganizationId,
    pub name: String,
    pub industry: Option<String>,
    pub profile: SecurityProfile,
    pub occurred_at: DateTime<Utc>,
}

/// Command: UpdateSecurityProfile (wholesale replacement).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSecurityProfile {
    pub organization_id: OrganizationId,
    pub profile: SecurityProfile,
    pub occurred_at: DateTime<Utc>,
}

/// Command: DeleteOrganization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOrganization {
    pub organization_id: OrganizationId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganizationCommand {
    RegisterOrganization(RegisterOrganization),
    UpdateSecurityProfile(UpdateSecurityProfile),
    DeleteOrganization(DeleteOrganization),
}

/// Event: OrganizationRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRegistered {
    pub organization_id: OrganizationId,
    pub name: String,
    pub industry: Option<String>,
    pub profile: SecurityProfile,
    pub occurred_at: DateTime<Utc>,
}

/// Event: SecurityProfileUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityProfileUpdated {
    pub organization_id: OrganizationId,
    pub profile: SecurityProfile,
    pub occurred_at: DateTime<Utc>,
}

/// Event: OrganizationDeleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationDeleted {
    pub organization_id: OrganizationId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganizationEvent {
    OrganizationRegistered(OrganizationRegistered),
    SecurityProfileUpdated(SecurityProfileUpdated),
    OrganizationDeleted(OrganizationDeleted),
}

impl Event for OrganizationEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrganizationEvent::OrganizationRegistered(_) => "orgs.organization.registered",
            OrganizationEvent::SecurityProfileUpdated(_) => "orgs.organization.profile_updated",
            OrganizationEvent::OrganizationDeleted(_) => "orgs.organization.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            OrganizationEvent::OrganizationRegistered(e) => e.occurred_at,
            OrganizationEvent::SecurityProfileUpdated(e) => e.occurred_at,
            OrganizationEvent::OrganizationDeleted(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Organization {
    type Command = OrganizationCommand;
    type Event = OrganizationEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            OrganizationEvent::OrganizationRegistered(e) => {
                self.id = e.organization_id;
                self.name = e.name.clone();
                self.industry = e.industry.clone();
                self.profile = e.profile.clone();
                self.status = OrganizationStatus::Active;
                self.created = true;
            }
            OrganizationEvent::SecurityProfileUpdated(e) => {
                self.profile = e.profile.clone();
            }
            OrganizationEvent::OrganizationDeleted(_) => {
                self.status = OrganizationStatus::Deleted;
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            OrganizationCommand::RegisterOrganization(cmd) => self.handle_register(cmd),
            OrganizationCommand::UpdateSecurityProfile(cmd) => self.handle_update(cmd),
            OrganizationCommand::DeleteOrganization(cmd) => self.handle_delete(cmd),
        }
    }
}

impl Organization {
    fn ensure_organization_id(&self, organization_id: OrganizationId) -> Result<(), DomainError> {
        if self.id != organization_id {
            return Err(DomainError::invariant("organization_id mismatch"));
        }
        Ok(())
    }

    fn ensure_not_deleted(&self) -> Result<(), DomainError> {
        if self.status == OrganizationStatus::Deleted {
            return Err(DomainError::conflict("organization is deleted"));
        }
        Ok(())
    }

    fn handle_register(
        &self,
        cmd: &RegisterOrganization,
    ) -> Result<Vec<OrganizationEvent>, DomainError> {
        if self.created {
            return Err(DomainError::conflict("organization already exists"));
        }

        if cmd.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        Ok(vec![OrganizationEvent::OrganizationRegistered(
            OrganizationRegistered {
                organization_id: cmd.organization_id,
                name: cmd.name.clone(),
                industry: cmd.industry.clone(),
                profile: cmd.profile.clone(),
                occurred_at: cmd.occurred_at,
            },
        )])
    }

    fn handle_update(
        &self,
        cmd: &UpdateSecurityProfile,
    ) -> Result<Vec<OrganizationEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_organization_id(cmd.organization_id)?;
        self.ensure_not_deleted()?;

        Ok(vec![OrganizationEvent::SecurityProfileUpdated(
            SecurityProfileUpdated {
                organization_id: cmd.organization_id,
                profile: cmd.profile.clone(),
                occurred_at: cmd.occurred_at,
            },
        )])
    }

    fn handle_delete(
        &self,
        cmd: &DeleteOrganization,
    ) -> Result<Vec<OrganizationEvent>, DomainError> {
        if !self.created {
            return Err(DomainError::not_found());
        }
        self.ensure_organization_id(cmd.organization_id)?;
        self.ensure_not_deleted()?;

        Ok(vec![OrganizationEvent::OrganizationDeleted(
            OrganizationDeleted {
                organization_id: cmd.organization_id,
                occurred_at: cmd.occurred_at,
            },
        )])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_org_id() -> OrganizationId {
        OrganizationId::new(AggregateId::new())
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn test_profile() -> SecurityProfile {
        SecurityProfile {
            information_assets: vec!["BD de clientes".to_string()],
            threats: vec!["Malware".to_string()],
            vulnerabilities: vec!["Contraseñas débiles".to_string()],
            existing_measures: Vec::new(),
        }
    }

    fn registered(id: OrganizationId) -> Organization {
        let mut org = Organization::empty(id);
        let events = org
            .handle(&OrganizationCommand::RegisterOrganization(
                RegisterOrganization {
                    organization_id: id,
                    name: "Acme SL".to_string(),
                    industry: Some("Tecnología".to_string()),
                    profile: test_profile(),
                    occurred_at: test_time(),
                },
            ))
            .unwrap();
        org.apply(&events[0]);
        org
    }

    #[test]
    fn register_emits_organization_registered_event() {
        let id = test_org_id();
        let org = Organization::empty(id);
        let cmd = RegisterOrganization {
            organization_id: id,
            name: "Acme SL".to_string(),
            industry: None,
            profile: test_profile(),
            occurred_at: test_time(),
        };

        let events = org
            .handle(&OrganizationCommand::RegisterOrganization(cmd))
            .unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            OrganizationEvent::OrganizationRegistered(e) => {
                assert_eq!(e.organization_id, id);
                assert_eq!(e.name, "Acme SL");
                assert_eq!(e.profile, test_profile());
            }
            _ => panic!("Expected OrganizationRegistered event"),
        }
    }

    #[test]
    fn register_rejects_empty_name() {
        let id = test_org_id();
        let org = Organization::empty(id);
        let cmd = RegisterOrganization {
            organization_id: id,
            name: "   ".to_string(),
            industry: None,
            profile: SecurityProfile::default(),
            occurred_at: test_time(),
        };

        let err = org
            .handle(&OrganizationCommand::RegisterOrganization(cmd))
            .unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for empty name"),
        }
    }

    #[test]
    fn register_rejects_duplicate_creation() {
        let id = test_org_id();
        let org = registered(id);

        let cmd = RegisterOrganization {
            organization_id: id,
            name: "Acme SL".to_string(),
            industry: None,
            profile: test_profile(),
            occurred_at: test_time(),
        };

        let err = org
            .handle(&OrganizationCommand::RegisterOrganization(cmd))
            .unwrap_err();
        match err {
            DomainError::Conflict(_) => {}
            _ => panic!("Expected Conflict error for duplicate creation"),
        }
    }

    #[test]
    fn update_replaces_profile_wholesale() {
        let id = test_org_id();
        let mut org = registered(id);

        let new_profile = SecurityProfile {
            information_assets: vec!["Servidor web".to_string()],
            ..SecurityProfile::default()
        };
        let events = org
            .handle(&OrganizationCommand::UpdateSecurityProfile(
                UpdateSecurityProfile {
                    organization_id: id,
                    profile: new_profile.clone(),
                    occurred_at: test_time(),
                },
            ))
            .unwrap();
        org.apply(&events[0]);

        assert_eq!(org.profile(), &new_profile);
        assert_eq!(org.version(), 2);
    }

    #[test]
    fn update_rejects_non_existent_organization() {
        let id = test_org_id();
        let org = Organization::empty(id);

        let err = org
            .handle(&OrganizationCommand::UpdateSecurityProfile(
                UpdateSecurityProfile {
                    organization_id: id,
                    profile: SecurityProfile::default(),
                    occurred_at: test_time(),
                },
            ))
            .unwrap_err();
        match err {
            DomainError::NotFound => {}
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn update_rejects_organization_id_mismatch() {
        let id = test_org_id();
        let org = registered(id);

        let err = org
            .handle(&OrganizationCommand::UpdateSecurityProfile(
                UpdateSecurityProfile {
                    organization_id: test_org_id(),
                    profile: SecurityProfile::default(),
                    occurred_at: test_time(),
                },
            ))
            .unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation error"),
        }
    }

    #[test]
    fn delete_marks_organization_deleted_and_blocks_further_commands() {
        let id = test_org_id();
        let mut org = registered(id);

        let events = org
            .handle(&OrganizationCommand::DeleteOrganization(DeleteOrganization {
                organization_id: id,
                occurred_at: test_time(),
            }))
            .unwrap();
        org.apply(&events[0]);

        assert_eq!(org.status(), OrganizationStatus::Deleted);
        assert!(!org.is_active());

        let err = org
            .handle(&OrganizationCommand::UpdateSecurityProfile(
                UpdateSecurityProfile {
                    organization_id: id,
                    profile: SecurityProfile::default(),
                    occurred_at: test_time(),
                },
            ))
            .unwrap_err();
        match err {
            DomainError::Conflict(_) => {}
            _ => panic!("Expected Conflict error for deleted organization"),
        }
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let id = test_org_id();
        let org = registered(id);
        let before_version = org.version();
        let before_profile = org.profile().clone();

        let cmd = OrganizationCommand::UpdateSecurityProfile(UpdateSecurityProfile {
            organization_id: id,
            profile: SecurityProfile::default(),
            occurred_at: test_time(),
        });

        let events1 = org.handle(&cmd).unwrap();
        let events2 = org.handle(&cmd).unwrap();

        assert_eq!(org.version(), before_version);
        assert_eq!(org.profile(), &before_profile);
        assert_eq!(events1, events2);
    }

    #[test]
    fn apply_is_deterministic() {
        let id = test_org_id();
        let time = test_time();
        let event1 = OrganizationEvent::OrganizationRegistered(OrganizationRegistered {
            organization_id: id,
            name: "Acme SL".to_string(),
            industry: None,
            profile: test_profile(),
            occurred_at: time,
        });
        let event2 = OrganizationEvent::OrganizationDeleted(OrganizationDeleted {
            organization_id: id,
            occurred_at: time,
        });

        let mut a = Organization::empty(id);
        a.apply(&event1);
        a.apply(&event2);

        let mut b = Organization::empty(id);
        b.apply(&event1);
        b.apply(&event2);

        assert_eq!(a, b);
        assert_eq!(a.version(), 2);
        assert_eq!(a.status(), OrganizationStatus::Deleted);
    }

    #[test]
    fn event_types_are_stable() {
        let id = test_org_id();
        let e = OrganizationEvent::OrganizationDeleted(OrganizationDeleted {
            organization_id: id,
            occurred_at: test_time(),
        });

        assert_eq!(e.event_type(), "orgs.organization.deleted");
        assert_eq!(Event::version(&e), 1);
    }
}
