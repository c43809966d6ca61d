use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use crate::workflows::recovery::distribution::{DistributionEngine, DistributionPolicy};
use crate::workflows::recovery::domain::{
    ActorAssignment, AgentId, AgentRef, BeneficiarySet, Case, CaseId, CaseRole, Payment,
    PaymentId, PaymentStatus, SpecialRole, SpecialRoleWindow,
};
use crate::workflows::recovery::ledger::{
    AuditError, AuditSink, AuditTrail, CaseDirectory, DirectoryError, DistributionLedger,
    DistributionRecord, LedgerError, SpecialRoleRegistry,
};
use crate::workflows::recovery::router::recovery_router;
use crate::workflows::recovery::service::RecoveryService;

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn agent(id: &str, name: &str, service_code: &str, center_code: &str) -> AgentRef {
    AgentRef {
        id: AgentId(id.to_string()),
        name: name.to_string(),
        service_code: service_code.to_string(),
        center_code: center_code.to_string(),
    }
}

pub(super) fn chief_dupont() -> AgentRef {
    agent("agt-100", "M. Dupont", "SRV-EST", "CTR-01")
}

pub(super) fn chief_laurent() -> AgentRef {
    agent("agt-101", "Mme Laurent", "SRV-EST", "CTR-01")
}

pub(super) fn seizing_moreau() -> AgentRef {
    agent("agt-200", "M. Moreau", "SRV-OUEST", "CTR-02")
}

pub(super) fn seizing_petit() -> AgentRef {
    agent("agt-201", "Mme Petit", "SRV-OUEST", "CTR-02")
}

pub(super) fn seizing_roux() -> AgentRef {
    agent("agt-202", "M. Roux", "SRV-NORD", "CTR-01")
}

pub(super) fn dg_holder() -> AgentRef {
    agent("agt-900", "M. Garnier", "DIR-GEN", "CTR-HQ")
}

pub(super) fn dd_holder() -> AgentRef {
    agent("agt-901", "Mme Fabre", "DIR-DEP", "CTR-HQ")
}

pub(super) fn sample_case() -> Case {
    Case {
        id: CaseId("aff-2024-001".to_string()),
        case_number: "AFF/2024/001".to_string(),
        fine_amount: dec!(2_500_000),
        opened_on: date(2024, 3, 1),
    }
}

pub(super) fn payment(id: &str, amount: Decimal, on: NaiveDate) -> Payment {
    Payment {
        id: PaymentId(id.to_string()),
        case_id: sample_case().id,
        amount,
        date: on,
        status: PaymentStatus::Validated,
    }
}

pub(super) fn statutory_engine() -> DistributionEngine {
    DistributionEngine::statutory()
}

/// Beneficiary set built from the fixture agents: up to two chiefs and three
/// seizing agents, plus the optional special-role holders.
pub(super) fn beneficiaries(chiefs: usize, seizing: usize, dg: bool, dd: bool) -> BeneficiarySet {
    let chief_pool = [chief_dupont(), chief_laurent()];
    let seizing_pool = [seizing_moreau(), seizing_petit(), seizing_roux()];
    BeneficiarySet {
        chiefs: chief_pool.into_iter().take(chiefs).collect(),
        seizing_agents: seizing_pool.into_iter().take(seizing).collect(),
        director_general: dg.then(dg_holder),
        departmental_director: dd.then(dd_holder),
    }
}

pub(super) fn assignment(case_id: &CaseId, agent: AgentRef, role: CaseRole) -> ActorAssignment {
    ActorAssignment {
        case_id: case_id.clone(),
        agent,
        role,
    }
}

/// Standard seeded case: two chiefs, three seizing agents.
pub(super) fn seed_standard_case(directory: &MemoryDirectory) -> Case {
    let case = sample_case();
    let assignments = vec![
        assignment(&case.id, chief_dupont(), CaseRole::Chief),
        assignment(&case.id, chief_laurent(), CaseRole::Chief),
        assignment(&case.id, seizing_moreau(), CaseRole::SeizingAgent),
        assignment(&case.id, seizing_petit(), CaseRole::SeizingAgent),
        assignment(&case.id, seizing_roux(), CaseRole::SeizingAgent),
    ];
    directory
        .register(case.clone(), assignments)
        .expect("case registers");
    case
}

pub(super) fn dg_window(from: NaiveDate, to: Option<NaiveDate>) -> SpecialRoleWindow {
    SpecialRoleWindow {
        role: SpecialRole::DirectorGeneral,
        agent: dg_holder(),
        active_from: from,
        active_to: to,
    }
}

pub(super) fn dd_window(from: NaiveDate, to: Option<NaiveDate>) -> SpecialRoleWindow {
    SpecialRoleWindow {
        role: SpecialRole::DepartmentalDirector,
        agent: dd_holder(),
        active_from: from,
        active_to: to,
    }
}

#[derive(Default)]
pub(super) struct MemoryDirectory {
    cases: Mutex<HashMap<CaseId, Case>>,
    assignments: Mutex<Vec<ActorAssignment>>,
}

impl CaseDirectory for MemoryDirectory {
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
pub(super) struct MemoryRegistry {
    windows: Mutex<Vec<SpecialRoleWindow>>,
}

impl MemoryRegistry {
    pub(super) fn appoint(&self, window: SpecialRoleWindow) {
        self.windows
            .lock()
            .expect("registry mutex poisoned")
            .push(window);
    }
}

impl SpecialRoleRegistry for MemoryRegistry {
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
pub(super) struct MemoryLedger {
    records: Mutex<HashMap<PaymentId, DistributionRecord>>,
}

impl DistributionLedger for MemoryLedger {
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
pub(super) struct MemoryAudit {
    trails: Mutex<Vec<AuditTrail>>,
}

impl MemoryAudit {
    pub(super) fn trails(&self) -> Vec<AuditTrail> {
        self.trails.lock().expect("audit mutex poisoned").clone()
    }
}

impl AuditSink for MemoryAudit {
    fn publish(&self, trail: AuditTrail) -> Result<(), AuditError> {
        self.trails
            .lock()
            .expect("audit mutex poisoned")
            .push(trail);
        Ok(())
    }
}

pub(super) type MemoryRecoveryService =
    RecoveryService<MemoryDirectory, MemoryRegistry, MemoryLedger, MemoryAudit>;

pub(super) fn build_service() -> (
    Arc<MemoryRecoveryService>,
    Arc<MemoryDirectory>,
    Arc<MemoryRegistry>,
    Arc<MemoryLedger>,
    Arc<MemoryAudit>,
) {
    let directory = Arc::new(MemoryDirectory::default());
    let registry = Arc::new(MemoryRegistry::default());
    let ledger = Arc::new(MemoryLedger::default());
    let audit = Arc::new(MemoryAudit::default());
    let service = Arc::new(RecoveryService::new(
        directory.clone(),
        registry.clone(),
        ledger.clone(),
        audit.clone(),
        DistributionPolicy::statutory(),
    ));
    (service, directory, registry, ledger, audit)
}

pub(super) fn recovery_router_with_service(service: Arc<MemoryRecoveryService>) -> axum::Router {
    recovery_router(service)
}

pub(super) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
