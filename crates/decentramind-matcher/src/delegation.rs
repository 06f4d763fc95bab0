//! Master -> sub-agent delegation planning
//!
//! A plan names the sub-agents to assign and the XP each participant earns.
//! Applying the XP is left to the caller; the matcher never mutates agents.

use decentramind_common::{Agent, MatchError};
use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::analysis::TaskAnalysis;
use crate::selection::MatchOutcome;
use crate::TaskMatcher;

/// XP owed to one agent once the delegated task completes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct XpGrant {
    pub agent_id: Uuid,
    pub xp: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationPlan {
    pub master_id: Uuid,
    pub analysis: TaskAnalysis,
    /// Assigned sub-agents, best first
    pub assignees: Vec<Uuid>,
    /// Master grant first, then one per assignee
    pub grants: Vec<XpGrant>,
}

impl DelegationPlan {
    pub fn total_xp(&self) -> u64 {
        self.grants.iter().map(|g| g.xp).sum()
    }
}

impl TaskMatcher {
    /// Plan how `master` delegates `task` to its sub-agents.
    ///
    /// Simple tasks go to the single best sub-agent; complex tasks go to every
    /// ready sub-agent covering the domain.
    #[instrument(skip(self, master, task, agents), fields(master = %master.id))]
    pub fn plan_delegation(
        &self,
        master: &Agent,
        task: &str,
        agents: &[Agent],
    ) -> Result<DelegationPlan, MatchError> {
        if !master.is_master() {
            warn!("Delegation requested by a non-master agent");
            return Err(MatchError::NotAMaster {
                agent_id: master.id.to_string(),
            });
        }

        let analysis = self.analyze(task)?;

        let mut subs = agents.iter().filter(|a| !a.is_master()).peekable();
        if subs.peek().is_none() {
            warn!("No sub-agents to delegate to");
            return Err(MatchError::NoSubAgents);
        }

        let mut selected: Vec<Uuid> = match self.select(analysis.domain, subs) {
            MatchOutcome::Matched { agents, .. } => agents.iter().map(|a| a.id).collect(),
            other => {
                warn!(domain = %other.domain(), "No sub-agent can take the task");
                return Err(MatchError::NoSuitableAgent {
                    domain: other.domain().label().to_string(),
                });
            }
        };
        if !analysis.requires_multiple_agents() {
            selected.truncate(1);
        }

        let mut grants = Vec::with_capacity(selected.len() + 1);
        grants.push(XpGrant {
            agent_id: master.id,
            xp: self.config.master_delegation_xp,
        });
        grants.extend(selected.iter().map(|&agent_id| XpGrant {
            agent_id,
            xp: self.config.sub_delegation_xp,
        }));

        info!(
            domain = %analysis.domain,
            assignees = selected.len(),
            "Delegation planned"
        );

        Ok(DelegationPlan {
            master_id: master.id,
            analysis,
            assignees: selected,
            grants,
        })
    }
}
