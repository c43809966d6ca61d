use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier wrapper for collection events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaymentId(pub String);

/// Identifier wrapper for litigation case files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CaseId(pub String);

/// Identifier wrapper for agents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub String);

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One collection event of money against a case. Immutable once validated;
/// created by the collection workflow, never by the distribution engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub case_id: CaseId,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: PaymentStatus,
}

/// Validation state tracked by the collection workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Validated,
    Pending,
    Other,
}

impl PaymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            PaymentStatus::Validated => "validated",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Other => "other",
        }
    }

    pub const fn is_validated(self) -> bool {
        matches!(self, PaymentStatus::Validated)
    }
}

/// A litigation file carrying a fine and a set of actor assignments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    pub case_number: String,
    pub fine_amount: Decimal,
    pub opened_on: NaiveDate,
}

/// Case-scoped roles an agent may hold. Many agents may share a role on the
/// same case; the same agent may hold different roles on different cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseRole {
    Chief,
    SeizingAgent,
}

impl CaseRole {
    pub const fn label(self) -> &'static str {
        match self {
            CaseRole::Chief => "chief",
            CaseRole::SeizingAgent => "seizing_agent",
        }
    }
}

/// Denormalized agent snapshot carried by shares and report groupings, so
/// downstream consumers never reach back into the agent store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRef {
    pub id: AgentId,
    pub name: String,
    pub service_code: String,
    pub center_code: String,
}

/// Ternary relation binding an agent to a case under a role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorAssignment {
    pub case_id: CaseId,
    pub agent: AgentRef,
    pub role: CaseRole,
}

/// Organization-wide roles, each held by at most one agent at a time. An
/// active holder participates in the chiefs pool of every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialRole {
    DirectorGeneral,
    DepartmentalDirector,
}

impl SpecialRole {
    pub const fn code(self) -> &'static str {
        match self {
            SpecialRole::DirectorGeneral => "DG",
            SpecialRole::DepartmentalDirector => "DD",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SpecialRole::DirectorGeneral => "director general",
            SpecialRole::DepartmentalDirector => "departmental director",
        }
    }
}

/// Activation record for a special role. `active_to` of `None` means the
/// appointment is open-ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialRoleWindow {
    pub role: SpecialRole,
    pub agent: AgentRef,
    pub active_from: NaiveDate,
    pub active_to: Option<NaiveDate>,
}

impl SpecialRoleWindow {
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        if date < self.active_from {
            return false;
        }
        match self.active_to {
            Some(end) => date <= end,
            None => true,
        }
    }
}

/// Capacity under which an individual share is attributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BeneficiaryRole {
    Chief,
    SeizingAgent,
    DirectorGeneral,
    DepartmentalDirector,
}

impl BeneficiaryRole {
    pub const fn label(self) -> &'static str {
        match self {
            BeneficiaryRole::Chief => "chief",
            BeneficiaryRole::SeizingAgent => "seizing_agent",
            BeneficiaryRole::DirectorGeneral => "director_general",
            BeneficiaryRole::DepartmentalDirector => "departmental_director",
        }
    }
}

impl From<SpecialRole> for BeneficiaryRole {
    fn from(role: SpecialRole) -> Self {
        match role {
            SpecialRole::DirectorGeneral => BeneficiaryRole::DirectorGeneral,
            SpecialRole::DepartmentalDirector => BeneficiaryRole::DepartmentalDirector,
        }
    }
}

/// The resolved input to one distribution: case-scoped actors plus the
/// organization-wide special-role holders active on the payment date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeneficiarySet {
    pub chiefs: Vec<AgentRef>,
    pub seizing_agents: Vec<AgentRef>,
    pub director_general: Option<AgentRef>,
    pub departmental_director: Option<AgentRef>,
}

impl BeneficiarySet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Union eligible for the chiefs pool: case chiefs, then the DG holder,
    /// then the DD holder. Order is stable so results are reproducible.
    pub fn chiefs_pool_members(&self) -> Vec<(&AgentRef, BeneficiaryRole)> {
        let mut members: Vec<(&AgentRef, BeneficiaryRole)> = self
            .chiefs
            .iter()
            .map(|agent| (agent, BeneficiaryRole::Chief))
            .collect();
        if let Some(dg) = &self.director_general {
            members.push((dg, BeneficiaryRole::DirectorGeneral));
        }
        if let Some(dd) = &self.departmental_director {
            members.push((dd, BeneficiaryRole::DepartmentalDirector));
        }
        members
    }
}
