//! Evolution engine
//!
//! `apply_evolution` works on a clone of the agent and returns it whole, so a
//! failed evolution leaves nothing half-applied.

use chrono::{DateTime, Utc};
use decentramind_common::{
    Agent, AgentType, EvolutionError, EvolutionRecord, EvolutionStage, MAX_DOMAIN_EXPERTISE,
};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::profile::{llm_profile, rag_profile};
use crate::tier::{EvolutionLadder, EvolutionTier};
use crate::xp::{XpAward, XpCurve};
use crate::EvolutionConfig;

/// Successful evolution
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOutcome {
    /// Updated agent snapshot for the caller to persist
    pub agent: Agent,
    /// Tier the agent stepped into
    pub tier: EvolutionTier,
    pub previous_level: u32,
    pub new_level: u32,
    /// DMT charged (the tier's cost)
    pub dmt_spent: Decimal,
    /// Portion of the charge removed from supply
    pub burned: Decimal,
    /// Overpayment returned to the caller
    pub change: Decimal,
    /// Superpowers newly added to the agent's capabilities
    pub new_superpowers: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EvolutionEngine {
    config: EvolutionConfig,
    master_ladder: EvolutionLadder,
    sub_ladder: EvolutionLadder,
    curve: XpCurve,
}

impl EvolutionEngine {
    /// Engine with the built-in ladders
    pub fn new(config: EvolutionConfig) -> Result<Self, EvolutionError> {
        Self::with_ladders(config, EvolutionLadder::master(), EvolutionLadder::sub_agent())
    }

    pub fn with_ladders(
        config: EvolutionConfig,
        master_ladder: EvolutionLadder,
        sub_ladder: EvolutionLadder,
    ) -> Result<Self, EvolutionError> {
        if config.burn_rate < Decimal::ZERO || config.burn_rate > Decimal::ONE {
            return Err(EvolutionError::InvalidInput(format!(
                "burn rate {} outside [0, 1]",
                config.burn_rate
            )));
        }
        let curve = XpCurve::new(config.xp_thresholds.clone())?;

        Ok(Self {
            config,
            master_ladder,
            sub_ladder,
            curve,
        })
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    pub fn curve(&self) -> &XpCurve {
        &self.curve
    }

    pub fn ladder(&self, agent_type: AgentType) -> &EvolutionLadder {
        match agent_type {
            AgentType::Master => &self.master_ladder,
            AgentType::Sub => &self.sub_ladder,
        }
    }

    /// Next tier for the agent, `None` at the top of its ladder
    pub fn next_tier(&self, agent: &Agent) -> Option<&EvolutionTier> {
        self.ladder(agent.agent_type).next_tier(agent)
    }

    /// Spend DMT to move the agent one tier up its ladder
    #[instrument(skip(self, agent), fields(agent_id = %agent.id, agent_type = ?agent.agent_type))]
    pub fn apply_evolution(
        &self,
        agent: &Agent,
        dmt_amount: Decimal,
        at: DateTime<Utc>,
    ) -> Result<EvolutionOutcome, EvolutionError> {
        if dmt_amount.is_sign_negative() {
            warn!(%dmt_amount, "Negative evolution payment");
            return Err(EvolutionError::InvalidInput(format!(
                "dmt amount must not be negative, got {}",
                dmt_amount
            )));
        }
        let spent = agent.individual_stats.total_dmt_spent;
        if spent.is_sign_negative() {
            return Err(EvolutionError::InvalidInput(format!(
                "agent total DMT spent is negative ({})",
                spent
            )));
        }

        let ladder = self.ladder(agent.agent_type);
        let index = match ladder.next_index(spent) {
            Some(index) => index,
            None => {
                warn!(level = agent.level, "Agent already at top tier");
                return Err(EvolutionError::MaxTierReached { level: agent.level });
            }
        };
        let tier = &ladder.tiers()[index];

        if dmt_amount < tier.dmt_required {
            warn!(
                required = %tier.dmt_required,
                supplied = %dmt_amount,
                "Insufficient DMT for evolution"
            );
            return Err(EvolutionError::InsufficientFunds {
                required: tier.dmt_required,
                supplied: dmt_amount,
            });
        }

        let previous_tier_level = index
            .checked_sub(1)
            .map(|prev| ladder.tiers()[prev].level)
            .unwrap_or(tier.level);
        let level_delta = tier.level - previous_tier_level;
        debug!(tier_level = tier.level, level_delta, "Applying tier");

        let mut evolved = agent.clone();
        let previous_level = agent.level;
        let new_level = previous_level.saturating_add(level_delta);

        evolved.level = new_level;
        evolved.xp = agent.xp.saturating_add(self.config.evolution_xp_bonus);
        let new_superpowers: Vec<String> = tier
            .superpowers
            .iter()
            .filter(|power| evolved.unlock_capability(power))
            .cloned()
            .collect();
        evolved.evolution_stage = agent
            .evolution_stage
            .max(EvolutionStage::for_level(new_level));
        evolved.llm_config = llm_profile(&tier.llm_upgrade);

        let agent_id = agent.id.to_string();
        evolved.rag_config = rag_profile(&agent_id, &agent.domain, new_level, at);

        evolved.evolution_history.push(EvolutionRecord {
            timestamp: at,
            previous_level,
            new_level,
            dmt_spent: tier.dmt_required,
            llm_upgrade: tier.llm_upgrade.clone(),
            new_superpowers: tier.superpowers.clone(),
            reason: format!(
                "{} upgraded to {} with {} capabilities",
                agent.agent_type,
                tier.llm_upgrade,
                tier.superpowers.join(", ")
            ),
        });

        let stats = &mut evolved.individual_stats;
        stats.total_upgrades += 1;
        stats.total_dmt_spent += tier.dmt_required;
        stats.domain_expertise = stats
            .domain_expertise
            .saturating_add(self.config.expertise_gain)
            .min(MAX_DOMAIN_EXPERTISE);
        stats.last_active = Some(at);
        evolved.performance.tasks_completed += 1;

        let burned = tier.dmt_required * self.config.burn_rate;
        let change = dmt_amount - tier.dmt_required;

        info!(
            previous_level,
            new_level,
            llm = %tier.llm_upgrade,
            dmt_spent = %tier.dmt_required,
            %burned,
            "Agent evolved"
        );

        Ok(EvolutionOutcome {
            agent: evolved,
            tier: tier.clone(),
            previous_level,
            new_level,
            dmt_spent: tier.dmt_required,
            burned,
            change,
            new_superpowers,
        })
    }

    /// Credit task XP on the engine's curve
    #[instrument(skip(self, agent), fields(agent_id = %agent.id))]
    pub fn award_xp(&self, agent: &Agent, amount: u64, at: DateTime<Utc>) -> XpAward {
        self.curve.award(agent, amount, at)
    }
}
