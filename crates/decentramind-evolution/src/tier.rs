//! Evolution tiers and ladders
//!
//! A ladder is an ordered list of tiers. Reaching tier `i` costs the sum of
//! `dmt_required` over tiers `0..=i` (its cumulative threshold); the first
//! tier is free and every agent starts there.

use decentramind_common::{Agent, AgentType, EvolutionError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One rung of an evolution ladder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionTier {
    pub level: u32,
    /// DMT cost of stepping into this tier
    pub dmt_required: Decimal,
    /// Model name of the LLM profile granted by this tier
    pub llm_upgrade: String,
    pub voice_capabilities: Vec<String>,
    pub superpowers: Vec<String>,
    pub description: String,
}

fn tier(
    level: u32,
    dmt_required: u32,
    llm_upgrade: &str,
    voice: &[&str],
    superpowers: &[&str],
    description: &str,
) -> EvolutionTier {
    EvolutionTier {
        level,
        dmt_required: Decimal::from(dmt_required),
        llm_upgrade: llm_upgrade.to_string(),
        voice_capabilities: voice.iter().map(|s| s.to_string()).collect(),
        superpowers: superpowers.iter().map(|s| s.to_string()).collect(),
        description: description.to_string(),
    }
}

const VOICE_L1: &[&str] = &["Basic Speech"];
const VOICE_L2: &[&str] = &["Natural Speech", "Emotion Detection"];
const VOICE_L3: &[&str] = &["Multi-language", "Voice Cloning", "Emotion Synthesis"];
const VOICE_L4: &[&str] = &["Real-time Translation", "Voice Customization", "Accent Training"];
const VOICE_L5: &[&str] = &["Voice Cloning", "Emotional Intelligence", "Personality Molding"];
const VOICE_L10: &[&str] = &["Universal Translation", "Voice Synthesis", "Emotional Mastery"];
const VOICE_L20: &[&str] = &["Reality Voice", "Dimensional Speech", "Thought Projection"];

/// Strictly ordered, validated list of tiers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvolutionLadder {
    tiers: Vec<EvolutionTier>,
}

impl EvolutionLadder {
    /// Build a ladder, rejecting empty lists, a non-free base tier, and
    /// non-increasing levels or costs
    pub fn new(tiers: Vec<EvolutionTier>) -> Result<Self, EvolutionError> {
        let base = tiers
            .first()
            .ok_or_else(|| EvolutionError::InvalidLadder("ladder has no tiers".to_string()))?;

        if !base.dmt_required.is_zero() {
            return Err(EvolutionError::InvalidLadder(format!(
                "base tier (level {}) must be free, costs {}",
                base.level, base.dmt_required
            )));
        }

        for pair in tiers.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.level <= prev.level {
                return Err(EvolutionError::InvalidLadder(format!(
                    "level {} does not increase over {}",
                    next.level, prev.level
                )));
            }
            if next.dmt_required <= prev.dmt_required {
                return Err(EvolutionError::InvalidLadder(format!(
                    "level {} costs {} which is not above {}",
                    next.level, next.dmt_required, prev.dmt_required
                )));
            }
        }

        Ok(Self { tiers })
    }

    /// Built-in master agent ladder
    pub fn master() -> Self {
        Self {
            tiers: vec![
                tier(
                    1,
                    0,
                    "GPT-3.5",
                    VOICE_L1,
                    &["Basic Coordination"],
                    "Basic Master Agent with fundamental coordination capabilities",
                ),
                tier(
                    2,
                    50,
                    "GPT-4",
                    VOICE_L2,
                    &["Advanced Coordination", "Task Delegation"],
                    "Enhanced Master Agent coordination and natural voice interaction",
                ),
                tier(
                    3,
                    100,
                    "Claude-3",
                    VOICE_L3,
                    &["Multi-Agent Orchestration", "Predictive Analysis", "Memory Enhancement"],
                    "Master Agent with multi-language support and advanced orchestration",
                ),
                tier(
                    4,
                    200,
                    "GPT-4 Turbo",
                    VOICE_L4,
                    &["Strategic Planning", "Knowledge Synthesis", "Adaptive Learning"],
                    "Master Agent with strategic planning and real-time translation",
                ),
                tier(
                    5,
                    500,
                    "Claude-3.5 Sonnet",
                    VOICE_L5,
                    &["Quantum Thinking", "Time Management", "Creative Synthesis"],
                    "Master Agent with quantum thinking and personality molding",
                ),
                tier(
                    10,
                    1000,
                    "GPT-5 (Preview)",
                    VOICE_L10,
                    &["Omniscient Coordination", "Predictive Mastery", "Creative Genius"],
                    "Master Agent with omniscient coordination and universal translation",
                ),
                tier(
                    20,
                    5000,
                    "Claude-4",
                    VOICE_L20,
                    &["Reality Manipulation", "Time Dilation", "Dimensional Travel"],
                    "Master Agent with reality manipulation and dimensional capabilities",
                ),
            ],
        }
    }

    /// Built-in sub-agent ladder
    pub fn sub_agent() -> Self {
        Self {
            tiers: vec![
                tier(
                    1,
                    0,
                    "GPT-3.5",
                    VOICE_L1,
                    &["Basic Specialization"],
                    "Basic Sub-Agent with fundamental domain specialization",
                ),
                tier(
                    2,
                    25,
                    "GPT-4",
                    VOICE_L2,
                    &["Advanced Specialization", "Domain Expertise"],
                    "Enhanced Sub-Agent with advanced domain expertise",
                ),
                tier(
                    3,
                    50,
                    "Claude-3",
                    VOICE_L3,
                    &["Expert Specialization", "Deep Domain Knowledge", "Skill Mastery"],
                    "Sub-Agent with expert specialization and deep domain knowledge",
                ),
                tier(
                    4,
                    100,
                    "GPT-4 Turbo",
                    VOICE_L4,
                    &["Master Specialization", "Innovation Skills", "Problem Solving"],
                    "Sub-Agent with master specialization and innovation skills",
                ),
                tier(
                    5,
                    250,
                    "Claude-3.5 Sonnet",
                    VOICE_L5,
                    &["Legendary Specialization", "Creative Mastery", "Advanced Problem Solving"],
                    "Sub-Agent with legendary specialization and creative mastery",
                ),
                tier(
                    10,
                    500,
                    "GPT-5 (Preview)",
                    VOICE_L10,
                    &["Mythical Specialization", "Domain Mastery", "Revolutionary Skills"],
                    "Sub-Agent with mythical specialization and domain mastery",
                ),
                tier(
                    20,
                    2500,
                    "Claude-4",
                    VOICE_L20,
                    &["Divine Specialization", "Reality Manipulation", "Dimensional Skills"],
                    "Sub-Agent with divine specialization and reality manipulation",
                ),
            ],
        }
    }

    pub fn for_type(agent_type: AgentType) -> Self {
        match agent_type {
            AgentType::Master => Self::master(),
            AgentType::Sub => Self::sub_agent(),
        }
    }

    pub fn tiers(&self) -> &[EvolutionTier] {
        &self.tiers
    }

    pub fn top(&self) -> &EvolutionTier {
        // non-empty by construction
        &self.tiers[self.tiers.len() - 1]
    }

    /// Total DMT needed to reach the tier at `index`
    pub fn cumulative_threshold(&self, index: usize) -> Decimal {
        self.tiers
            .iter()
            .take(index + 1)
            .map(|t| t.dmt_required)
            .sum()
    }

    /// Index of the first tier whose cumulative threshold exceeds `total_spent`
    pub fn next_index(&self, total_spent: Decimal) -> Option<usize> {
        let mut threshold = Decimal::ZERO;
        for (index, tier) in self.tiers.iter().enumerate() {
            threshold += tier.dmt_required;
            if threshold > total_spent {
                return Some(index);
            }
        }
        None
    }

    /// Tier the agent will step into next; `None` at the top of the ladder
    pub fn next_tier(&self, agent: &Agent) -> Option<&EvolutionTier> {
        self.next_index(agent.individual_stats.total_dmt_spent)
            .map(|index| &self.tiers[index])
    }

    /// Tier the agent currently holds
    pub fn current_tier(&self, agent: &Agent) -> &EvolutionTier {
        match self.next_index(agent.individual_stats.total_dmt_spent) {
            Some(index) => &self.tiers[index.saturating_sub(1)],
            None => self.top(),
        }
    }
}
