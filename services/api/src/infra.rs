use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use contentieux::workflows::recovery::{
    ActorAssignment, AuditError, AuditSink, AuditTrail, Case, CaseDirectory, CaseId,
    DirectoryError, DistributionLedger, DistributionPolicy, DistributionRecord, LedgerError,
    PaymentId, RecoveryService, SpecialRole, SpecialRoleRegistry, SpecialRoleWindow,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type InMemoryRecoveryService = RecoveryService<
    InMemoryCaseDirectory,
    InMemorySpecialRoleRegistry,
    InMemoryDistributionLedger,
    InMemoryAuditSink,
>;

#[derive(Default)]
pub(crate) struct InMemoryCaseDirectory {
    cases: Mutex<HashMap<CaseId, Case>>,
    assignments: Mutex<Vec<ActorAssignment>>,
}

impl CaseDirectory for InMemoryCaseDirectory {
    fn case(&self, id: &CaseId) -> Result<Option<Case>, DirectoryError> {
        let guard = self.cases.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn case_actors(&self, id: &CaseId) -> Result<Vec<ActorAssignment>, DirectoryError> {
        let guard = self.assignments.lock().expect("directory mutex poisoned");
        Ok(guard
            .iter()
            .filter(|assignment| &assignment.case_id == id)
            .cloned()
            .collect())
    }

    fn register(
        &self,
        case: Case,
        assignments: Vec<ActorAssignment>,
    ) -> Result<(), DirectoryError> {
        let mut cases = self.cases.lock().expect("directory mutex poisoned");
        if cases.contains_key(&case.id) {
            return Err(DirectoryError::Conflict);
        }
        cases.insert(case.id.clone(), case);
        self.assignments
            .lock()
            .expect("directory mutex poisoned")
            .extend(assignments);
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct InMemorySpecialRoleRegistry {
    windows: Mutex<Vec<SpecialRoleWindow>>,
}

impl InMemorySpecialRoleRegistry {
    pub(crate) fn appoint(&self, window: SpecialRoleWindow) {
        self.windows
            .lock()
            .expect("registry mutex poisoned")
            .push(window);
    }
}

impl SpecialRoleRegistry for InMemorySpecialRoleRegistry {
    fn active_windows(
        &self,
        role: SpecialRole,
        on: NaiveDate,
    ) -> Result<Vec<SpecialRoleWindow>, DirectoryError> {
        let guard = self.windows.lock().expect("registry mutex poisoned");
        Ok(guard
            .iter()
            .filter(|window| window.role == role && window.is_active_on(on))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryDistributionLedger {
    records: Mutex<HashMap<PaymentId, DistributionRecord>>,
}

impl DistributionLedger for InMemoryDistributionLedger {
    fn record(&self, record: DistributionRecord) -> Result<DistributionRecord, LedgerError> {
        let mut guard = self.records.lock().expect("ledger mutex poisoned");
        if guard.contains_key(&record.payment_id) {
            return Err(LedgerError::Conflict);
        }
        guard.insert(record.payment_id.clone(), record.clone());
        Ok(record)
    }

    fn fetch(&self, payment_id: &PaymentId) -> Result<Option<DistributionRecord>, LedgerError> {
        let guard = self.records.lock().expect("ledger mutex poisoned");
        Ok(guard.get(payment_id).cloned())
    }
}

#[derive(Default)]
pub(crate) struct InMemoryAuditSink {
    trails: Mutex<Vec<AuditTrail>>,
}

impl InMemoryAuditSink {
    pub(crate) fn trails(&self) -> Vec<AuditTrail> {
        self.trails.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn publish(&self, trail: AuditTrail) -> Result<(), AuditError> {
        self.trails
            .lock()
            .expect("audit mutex poisoned")
            .push(trail);
        Ok(())
    }
}

pub(crate) fn build_recovery_service() -> (
    Arc<InMemoryRecoveryService>,
    Arc<InMemoryCaseDirectory>,
    Arc<InMemorySpecialRoleRegistry>,
    Arc<InMemoryAuditSink>,
) {
    let directory = Arc::new(InMemoryCaseDirectory::default());
    let registry = Arc::new(InMemorySpecialRoleRegistry::default());
    let ledger = Arc::new(InMemoryDistributionLedger::default());
    let audit = Arc::new(InMemoryAuditSink::default());
    let service = Arc::new(RecoveryService::new(
        directory.clone(),
        registry.clone(),
        ledger,
        audit.clone(),
        DistributionPolicy::statutory(),
    ));
    (service, directory, registry, audit)
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}
