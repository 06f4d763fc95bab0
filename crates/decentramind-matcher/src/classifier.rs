//! Task domain classification
//!
//! Domains are checked in table order (Learning, Health & Wellness, Technical,
//! Business, Creative); the first one with a keyword contained in the task
//! wins. Tasks matching nothing are `General`.

use std::str::FromStr;

use decentramind_common::MatchError;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Closed set of task domains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Domain {
    Learning,
    #[serde(rename = "Health & Wellness")]
    HealthWellness,
    Technical,
    Business,
    Creative,
    General,
}

impl Domain {
    /// Classification order
    pub const TABLE: [Domain; 5] = [
        Domain::Learning,
        Domain::HealthWellness,
        Domain::Technical,
        Domain::Business,
        Domain::Creative,
    ];

    /// Canonical label as stored on agents
    pub fn label(self) -> &'static str {
        match self {
            Domain::Learning => "Learning",
            Domain::HealthWellness => "Health & Wellness",
            Domain::Technical => "Technical",
            Domain::Business => "Business",
            Domain::Creative => "Creative",
            Domain::General => "General",
        }
    }

    /// Lowercase keywords that select this domain
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Domain::Learning => &["learn", "study", "german", "language", "teach", "education"],
            Domain::HealthWellness => &[
                "health", "fitness", "wellness", "exercise", "workout", "muscle", "gym", "diet",
                "nutrition", "weight", "strength", "cardio",
            ],
            Domain::Technical => &[
                "technical",
                "code",
                "programming",
                "debug",
                "software",
                "development",
                "computer",
                "smart contract",
                "blockchain",
                "deploy",
                "solidity",
                "web3",
                "crypto",
                "token",
                "dapp",
                "defi",
            ],
            Domain::Business => &[
                "business",
                "strategy",
                "planning",
                "funding",
                "finance",
                "marketing",
            ],
            // no bare "art": it would match "smart contract"
            Domain::Creative => &[
                "creative", "design", "write", "story", "music", "draw", "artistic", "artwork",
                "illustration",
            ],
            Domain::General => &[],
        }
    }

    /// Keywords of this domain contained in already-lowercased text
    pub fn matched_keywords(self, lowered: &str) -> Vec<&'static str> {
        self.keywords()
            .iter()
            .copied()
            .filter(|kw| lowered.contains(kw))
            .collect()
    }

    /// Whether lowercased text mentions the label or one of the keywords
    pub(crate) fn mentioned_in(self, lowered: &str) -> bool {
        lowered.contains(&self.label().to_lowercase())
            || self.keywords().iter().any(|kw| lowered.contains(kw))
    }

    /// Map a free-form domain string ("health", "Health & Wellness",
    /// "Smart contract audits") onto the closed set, falling back to `General`
    pub fn normalize(raw: &str) -> Domain {
        raw.parse().unwrap_or_else(|_| {
            let lowered = raw.to_lowercase();
            Self::lookup(&lowered).unwrap_or(Domain::General)
        })
    }

    fn lookup(lowered: &str) -> Option<Domain> {
        Self::TABLE
            .iter()
            .copied()
            .find(|domain| domain.keywords().iter().any(|kw| lowered.contains(kw)))
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Domain {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "learning" | "education" => Ok(Domain::Learning),
            "health & wellness" | "health and wellness" | "health" | "wellness" | "fitness" => {
                Ok(Domain::HealthWellness)
            }
            "technical" | "tech" => Ok(Domain::Technical),
            "business" => Ok(Domain::Business),
            "creative" => Ok(Domain::Creative),
            "general" => Ok(Domain::General),
            other => Err(MatchError::InvalidInput(format!("unknown domain '{}'", other))),
        }
    }
}

/// Classify task text into a domain
#[instrument(skip(task), fields(task_len = task.len()))]
pub fn classify(task: &str) -> Result<Domain, MatchError> {
    if task.trim().is_empty() {
        return Err(MatchError::InvalidInput("task text is empty".to_string()));
    }

    let lowered = task.to_lowercase();
    let domain = Domain::lookup(&lowered).unwrap_or(Domain::General);
    debug!(domain = %domain, "Task classified");
    Ok(domain)
}
