//! Agent selection for a classified task

use decentramind_common::{Agent, MatchError};
use tracing::{debug, instrument, warn};

use crate::classifier::{classify, Domain};
use crate::TaskMatcher;

/// Result of matching a task against an agent pool
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome<'a> {
    /// The pool was empty
    NoAgents { domain: Domain },
    /// Agents exist but none covers the domain
    NoSuitableAgent { domain: Domain },
    /// Agents cover the domain but none is ready (inactive or under-levelled)
    BelowReadiness {
        domain: Domain,
        candidates: Vec<&'a Agent>,
    },
    /// Ready agents, best first
    Matched {
        domain: Domain,
        agents: Vec<&'a Agent>,
    },
}

impl<'a> MatchOutcome<'a> {
    pub fn domain(&self) -> Domain {
        match self {
            MatchOutcome::NoAgents { domain }
            | MatchOutcome::NoSuitableAgent { domain }
            | MatchOutcome::BelowReadiness { domain, .. }
            | MatchOutcome::Matched { domain, .. } => *domain,
        }
    }

    /// Ready agents; empty unless `Matched`
    pub fn agents(&self) -> &[&'a Agent] {
        match self {
            MatchOutcome::Matched { agents, .. } => agents,
            _ => &[],
        }
    }

    /// Highest ranked ready agent
    pub fn best(&self) -> Option<&'a Agent> {
        self.agents().first().copied()
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }

    /// Collapse into the ready agents, or `NoSuitableAgent`
    pub fn into_result(self) -> Result<Vec<&'a Agent>, MatchError> {
        match self {
            MatchOutcome::Matched { agents, .. } => Ok(agents),
            other => Err(MatchError::NoSuitableAgent {
                domain: other.domain().label().to_string(),
            }),
        }
    }
}

/// Whether an agent covers a domain by its domain, name or skills
pub fn covers_domain(agent: &Agent, domain: Domain) -> bool {
    if domain.mentioned_in(&agent.domain.to_lowercase())
        || domain.mentioned_in(&agent.name.to_lowercase())
    {
        return true;
    }

    agent.skills.iter().any(|skill| {
        let skill = skill.to_lowercase();
        domain.keywords().iter().any(|kw| skill.contains(kw))
    })
}

impl TaskMatcher {
    /// Active and at or above the configured minimum level
    pub fn is_ready(&self, agent: &Agent) -> bool {
        agent.is_active() && agent.level >= self.config.min_level
    }

    /// Classify the task and select the agents able to take it
    #[instrument(skip(self, task, agents), fields(pool = agents.len()))]
    pub fn match_agents<'a>(
        &self,
        task: &str,
        agents: &'a [Agent],
    ) -> Result<MatchOutcome<'a>, MatchError> {
        let domain = classify(task)?;
        Ok(self.select(domain, agents))
    }

    /// Rank the agents of `pool` that cover an already classified domain
    pub(crate) fn select<'a, I>(&self, domain: Domain, pool: I) -> MatchOutcome<'a>
    where
        I: IntoIterator<Item = &'a Agent>,
    {
        let mut pool_size = 0usize;
        let candidates: Vec<&Agent> = pool
            .into_iter()
            .inspect(|_| pool_size += 1)
            .filter(|agent| covers_domain(agent, domain))
            .collect();

        if pool_size == 0 {
            warn!(domain = %domain, "No agents available");
            return MatchOutcome::NoAgents { domain };
        }
        if candidates.is_empty() {
            warn!(domain = %domain, "No agent covers domain");
            return MatchOutcome::NoSuitableAgent { domain };
        }

        let mut ready: Vec<&Agent> = candidates
            .iter()
            .copied()
            .filter(|agent| self.is_ready(agent))
            .collect();

        if ready.is_empty() {
            warn!(
                domain = %domain,
                candidates = candidates.len(),
                min_level = self.config.min_level,
                "Candidates below readiness"
            );
            return MatchOutcome::BelowReadiness { domain, candidates };
        }

        ready.sort_by(|a, b| b.level.cmp(&a.level).then_with(|| a.name.cmp(&b.name)));
        debug!(domain = %domain, matched = ready.len(), "Agents matched");

        MatchOutcome::Matched {
            domain,
            agents: ready,
        }
    }
}
