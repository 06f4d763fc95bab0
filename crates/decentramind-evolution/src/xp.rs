//! XP curve, task XP awards and per-level evolution rewards

use chrono::{DateTime, Utc};
use decentramind_common::{Agent, EvolutionError, EvolutionStage};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};

/// Cumulative XP required for each level; index 0 is level 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XpCurve {
    thresholds: Vec<u64>,
}

impl XpCurve {
    pub fn new(thresholds: Vec<u64>) -> Result<Self, EvolutionError> {
        if thresholds.first() != Some(&0) {
            return Err(EvolutionError::InvalidInput(
                "xp curve must start at 0".to_string(),
            ));
        }
        if thresholds.windows(2).any(|w| w[1] <= w[0]) {
            return Err(EvolutionError::InvalidInput(
                "xp thresholds must be strictly increasing".to_string(),
            ));
        }
        Ok(Self { thresholds })
    }

    pub fn max_level(&self) -> u32 {
        self.thresholds.len() as u32
    }

    /// Highest level whose threshold `xp` has reached
    pub fn level_for_xp(&self, xp: u64) -> u32 {
        self.thresholds.iter().take_while(|&&t| xp >= t).count().max(1) as u32
    }

    /// XP still missing to leave `level`; zero at or past the curve's top
    pub fn xp_to_next_level(&self, level: u32, xp: u64) -> u64 {
        self.thresholds
            .get(level as usize)
            .map(|next| next.saturating_sub(xp))
            .unwrap_or(0)
    }

    /// Credit XP for a completed task. Evolved levels above the curve are kept.
    pub fn award(&self, agent: &Agent, amount: u64, at: DateTime<Utc>) -> XpAward {
        let mut updated = agent.clone();
        let previous_level = agent.level;

        updated.xp = agent.xp.saturating_add(amount);
        updated.level = previous_level.max(self.level_for_xp(updated.xp));
        updated.evolution_stage = updated
            .evolution_stage
            .max(EvolutionStage::for_level(updated.level));
        updated.performance.tasks_completed += 1;
        updated.individual_stats.last_active = Some(at);

        let leveled_up = updated.level > previous_level;
        if leveled_up {
            info!(
                agent_id = %agent.id,
                previous_level,
                new_level = updated.level,
                "Agent leveled up"
            );
        } else {
            debug!(agent_id = %agent.id, xp = updated.xp, "XP awarded");
        }

        XpAward {
            xp_to_next: self.xp_to_next_level(updated.level, updated.xp),
            previous_level,
            new_level: updated.level,
            leveled_up,
            agent: updated,
        }
    }
}

impl Default for XpCurve {
    fn default() -> Self {
        Self {
            thresholds: crate::EvolutionConfig::default().xp_thresholds,
        }
    }
}

/// Result of crediting XP
#[derive(Debug, Clone, PartialEq)]
pub struct XpAward {
    pub agent: Agent,
    pub previous_level: u32,
    pub new_level: u32,
    pub leveled_up: bool,
    pub xp_to_next: u64,
}

/// Perks attached to an agent level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionRewards {
    pub xp_multiplier: Decimal,
    pub skill_unlocks: u32,
    pub capability_points: u32,
    pub research_credits: u32,
}

pub fn evolution_rewards(level: u32) -> EvolutionRewards {
    EvolutionRewards {
        xp_multiplier: Decimal::ONE + Decimal::from(level) * Decimal::new(1, 1),
        skill_unlocks: level / 5,
        capability_points: level.saturating_mul(2),
        research_credits: level / 3,
    }
}
