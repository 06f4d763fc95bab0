//! # DecentraMind Matcher
//!
//! Routes a free-text task to the agents qualified to handle it.
//!
//! ## Pipeline
//!
//! ```text
//! task text -> classify -> Domain -> filter pool -> readiness -> ranked agents
//! ```
//!
//! Classification is a case-insensitive keyword lookup against a fixed,
//! ordered domain table; the first domain with a matching keyword wins and
//! `General` is the fallback. Matching never mutates the agents it inspects.

pub mod analysis;
pub mod classifier;
pub mod delegation;
pub mod selection;

pub use analysis::{Complexity, TaskAnalysis, Urgency};
pub use classifier::{classify, Domain};
pub use delegation::{DelegationPlan, XpGrant};
pub use selection::MatchOutcome;

use serde::Deserialize;

/// Matcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Minimum level for an agent to be considered ready
    pub min_level: u32,
    /// XP granted to a master for each delegated task
    pub master_delegation_xp: u64,
    /// XP granted to each sub-agent assigned a delegated task
    pub sub_delegation_xp: u64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_level: decentramind_common::MIN_AGENT_LEVEL,
            master_delegation_xp: 10,
            sub_delegation_xp: 5,
        }
    }
}

/// Task matcher bound to a configuration
#[derive(Debug, Clone, Default)]
pub struct TaskMatcher {
    config: MatcherConfig,
}

impl TaskMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }
}
