//! Agent - AI-agent NFT snapshot
//!
//! Agents come in two roles:
//! - **Master** agents coordinate and delegate tasks
//! - **Sub** agents specialize in one domain and perform the work
//!
//! Level and XP only ever grow. Evolution (paid in DMT) moves an agent up its
//! ladder and swaps its LLM/RAG profile; every evolution is appended to
//! `evolution_history`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::MIN_AGENT_LEVEL;

/// Agent role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    /// Coordinator that delegates to sub-agents
    Master,
    /// Domain specialist
    Sub,
}

impl std::fmt::Display for AgentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentType::Master => write!(f, "Master Agent"),
            AgentType::Sub => write!(f, "Sub-Agent"),
        }
    }
}

/// Operational status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Active,
    Inactive,
    Training,
}

/// Evolution stage label, ordered from weakest to strongest
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum EvolutionStage {
    #[default]
    Basic,
    Advanced,
    Expert,
    Master,
    Legendary,
}

impl EvolutionStage {
    /// Stage reached at a given level
    pub fn for_level(level: u32) -> Self {
        match level {
            l if l >= 20 => EvolutionStage::Legendary,
            l if l >= 15 => EvolutionStage::Master,
            l if l >= 10 => EvolutionStage::Expert,
            l if l >= 5 => EvolutionStage::Advanced,
            _ => EvolutionStage::Basic,
        }
    }
}

impl std::fmt::Display for EvolutionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EvolutionStage::Basic => "Basic",
            EvolutionStage::Advanced => "Advanced",
            EvolutionStage::Expert => "Expert",
            EvolutionStage::Master => "Master",
            EvolutionStage::Legendary => "Legendary",
        };
        f.write_str(label)
    }
}

/// LLM profile attached to an agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmConfig {
    pub model: String,
    pub version: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub context_window: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "GPT-3.5".to_string(),
            version: "3.5-turbo-0613".to_string(),
            temperature: 0.7,
            max_tokens: 4096,
            context_window: 4096,
        }
    }
}

/// Retrieval-augmented generation profile
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RagConfig {
    pub data_source: String,
    pub vector_db: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs_hash: Option<String>,
    #[serde(default)]
    pub knowledge_base: Vec<String>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Immutable log entry written on every evolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvolutionRecord {
    pub timestamp: DateTime<Utc>,
    pub previous_level: u32,
    pub new_level: u32,
    pub dmt_spent: Decimal,
    pub llm_upgrade: String,
    pub new_superpowers: Vec<String>,
    pub reason: String,
}

/// Per-agent lifetime statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualStats {
    pub total_upgrades: u32,
    /// Cumulative DMT spent on evolutions
    pub total_dmt_spent: Decimal,
    pub unique_conversations: u64,
    /// Domain expertise (0-100)
    pub domain_expertise: u8,
    #[serde(default)]
    pub last_active: Option<DateTime<Utc>>,
}

/// Task performance counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentPerformance {
    pub tasks_completed: u64,
}

/// AI agent snapshot as loaded from storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: Uuid,
    pub name: String,
    /// Free-text domain classification, e.g. "Health & Wellness"
    pub domain: String,
    #[serde(default)]
    pub personality: String,
    /// Owner wallet address
    #[serde(default)]
    pub owner: String,
    #[serde(rename = "type")]
    pub agent_type: AgentType,
    #[serde(default)]
    pub status: AgentStatus,
    pub level: u32,
    pub xp: u64,
    #[serde(default)]
    pub skills: Vec<String>,
    /// Unlocked superpowers; grow-only
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub evolution_stage: EvolutionStage,
    #[serde(default)]
    pub llm_config: LlmConfig,
    #[serde(default)]
    pub rag_config: RagConfig,
    #[serde(default)]
    pub evolution_history: Vec<EvolutionRecord>,
    #[serde(default)]
    pub individual_stats: IndividualStats,
    #[serde(default)]
    pub performance: AgentPerformance,
}

impl Agent {
    /// Create a freshly minted level-1 agent
    pub fn new(name: impl Into<String>, domain: impl Into<String>, agent_type: AgentType) -> Self {
        Self {
            id: Uuid::now_v7(),
            name: name.into(),
            domain: domain.into(),
            personality: String::new(),
            owner: String::new(),
            agent_type,
            status: AgentStatus::Active,
            level: MIN_AGENT_LEVEL,
            xp: 0,
            skills: Vec::new(),
            capabilities: Vec::new(),
            evolution_stage: EvolutionStage::Basic,
            llm_config: LlmConfig::default(),
            rag_config: RagConfig::default(),
            evolution_history: Vec::new(),
            individual_stats: IndividualStats::default(),
            performance: AgentPerformance::default(),
        }
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn with_personality(mut self, personality: impl Into<String>) -> Self {
        self.personality = personality.into();
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_status(mut self, status: AgentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(MIN_AGENT_LEVEL);
        self.evolution_stage = EvolutionStage::for_level(self.level);
        self
    }

    #[inline]
    pub fn is_master(&self) -> bool {
        self.agent_type == AgentType::Master
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.status == AgentStatus::Active
    }

    /// Add a capability unless already unlocked
    pub fn unlock_capability(&mut self, capability: &str) -> bool {
        if self.capabilities.iter().any(|c| c == capability) {
            return false;
        }
        self.capabilities.push(capability.to_string());
        true
    }
}

impl std::fmt::Display for Agent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Agent({}, {}, level={}, xp={}, stage={})",
            self.name, self.domain, self.level, self.xp, self.evolution_stage
        )
    }
}
