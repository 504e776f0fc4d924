//! Organization record store abstraction.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use isoforge_orgs::{OrganizationId, SecurityProfile};
use isoforge_risk::RiskScenario;

/// Persisted organization security state.
///
/// The scenario list is an insight derived by the inference pipeline; it is
/// replaced wholesale whenever inference reruns and is always consistent with
/// some prior snapshot of `profile` (never partially merged).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationRecord {
    pub organization_id: OrganizationId,
    pub name: String,
    pub industry: Option<String>,
    pub profile: SecurityProfile,
    pub risk_scenarios: Vec<RiskScenario>,
    /// When inference last ran for this organization (including runs that
    /// produced an empty list).
    pub last_inference_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: u64,
}

/// Key/value store abstraction for organization records.
pub trait OrgStore: Send + Sync {
    fn get(&self, id: OrganizationId) -> Option<OrganizationRecord>;
    fn upsert(&self, record: OrganizationRecord);
    fn list(&self) -> Vec<OrganizationRecord>;
    /// Remove a record; returns whether it existed.
    fn remove(&self, id: OrganizationId) -> bool;
}

impl<S> OrgStore for Arc<S>
where
    S: OrgStore + ?Sized,
{
    fn get(&self, id: OrganizationId) -> Option<OrganizationRecord> {
        (**self).get(id)
    }

    fn upsert(&self, record: OrganizationRecord) {
        (**self).upsert(record)
    }

    fn list(&self) -> Vec<OrganizationRecord> {
        (**self).list()
    }

    fn remove(&self, id: OrganizationId) -> bool {
        (**self).remove(id)
    }
}

/// In-memory store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryOrgStore {
    inner: RwLock<HashMap<OrganizationId, OrganizationRecord>>,
}

impl InMemoryOrgStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrgStore for InMemoryOrgStore {
    fn get(&self, id: OrganizationId) -> Option<OrganizationRecord> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    fn upsert(&self, record: OrganizationRecord) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(record.organization_id, record);
        }
    }

    fn list(&self) -> Vec<OrganizationRecord> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut records: Vec<OrganizationRecord> = map.values().cloned().collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        records
    }

    fn remove(&self, id: OrganizationId) -> bool {
        match self.inner.write() {
            Ok(mut map) => map.remove(&id).is_some(),
            Err(_) => false,
        }
    }
}
