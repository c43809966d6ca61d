use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::{AgentId, AgentRef, BeneficiarySet, CaseId, CaseRole, SpecialRole};
use super::ledger::{CaseDirectory, DirectoryError, SpecialRoleRegistry};

/// Case-scoped actors eligible for individual shares. Empty lists are a
/// normal state, not an error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseActors {
    pub chiefs: Vec<AgentRef>,
    pub seizing_agents: Vec<AgentRef>,
}

/// Failures surfaced while projecting beneficiaries out of the backing
/// stores.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("case {0} not found")]
    CaseNotFound(CaseId),
    #[error("special role {} has {} simultaneous active holders", .role.code(), .holders.len())]
    DataIntegrity {
        role: SpecialRole,
        holders: Vec<AgentId>,
    },
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Read-only projection over the case directory and the special-role
/// registry. Holds no state of its own; every call reflects the stores at
/// query time.
pub struct BeneficiaryResolver<D, S> {
    directory: Arc<D>,
    registry: Arc<S>,
}

impl<D, S> BeneficiaryResolver<D, S>
where
    D: CaseDirectory,
    S: SpecialRoleRegistry,
{
    pub fn new(directory: Arc<D>, registry: Arc<S>) -> Self {
        Self {
            directory,
            registry,
        }
    }

    /// Current chiefs and seizing agents assigned to a case.
    pub fn resolve_case_actors(&self, case_id: &CaseId) -> Result<CaseActors, ResolutionError> {
        if self.directory.case(case_id)?.is_none() {
            return Err(ResolutionError::CaseNotFound(case_id.clone()));
        }

        let mut actors = CaseActors::default();
        for assignment in self.directory.case_actors(case_id)? {
            match assignment.role {
                CaseRole::Chief => actors.chiefs.push(assignment.agent),
                CaseRole::SeizingAgent => actors.seizing_agents.push(assignment.agent),
            }
        }
        Ok(actors)
    }

    /// The single agent holding `role` on the given date, or none.
    ///
    /// More than one active window is a corrupt-state condition: it is
    /// reported with every conflicting holder, never resolved by picking one.
    pub fn resolve_active_special_role(
        &self,
        role: SpecialRole,
        on: NaiveDate,
    ) -> Result<Option<AgentRef>, ResolutionError> {
        let mut windows = self.registry.active_windows(role, on)?;
        windows.retain(|window| window.is_active_on(on));

        match windows.len() {
            0 => Ok(None),
            1 => Ok(Some(windows.remove(0).agent)),
            _ => Err(ResolutionError::DataIntegrity {
                role,
                holders: windows.into_iter().map(|window| window.agent.id).collect(),
            }),
        }
    }

    /// Full beneficiary set for one payment: case actors plus whichever
    /// special-role holders are active on the payment date.
    pub fn beneficiaries_for(
        &self,
        case_id: &CaseId,
        on: NaiveDate,
    ) -> Result<BeneficiarySet, ResolutionError> {
        let actors = self.resolve_case_actors(case_id)?;
        let director_general =
            self.resolve_active_special_role(SpecialRole::DirectorGeneral, on)?;
        let departmental_director =
            self.resolve_active_special_role(SpecialRole::DepartmentalDirector, on)?;

        Ok(BeneficiarySet {
            chiefs: actors.chiefs,
            seizing_agents: actors.seizing_agents,
            director_general,
            departmental_director,
        })
    }
}
