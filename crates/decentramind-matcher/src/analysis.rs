//! Task shape analysis: domain, complexity, urgency, research needs

use decentramind_common::MatchError;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::classifier::{classify, Domain};
use crate::TaskMatcher;

const COMPLEXITY_MARKERS: &[&str] = &["complex", "advanced", "detailed", "comprehensive"];
const URGENCY_MARKERS: &[&str] = &["urgent", "asap", "emergency", "quick"];
const RESEARCH_MARKERS: &[&str] = &["research", "find", "search", "investigate"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Complex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Normal,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAnalysis {
    pub domain: Domain,
    pub complexity: Complexity,
    pub urgency: Urgency,
    pub requires_research: bool,
    /// Domain keywords found in the task
    pub keywords: Vec<&'static str>,
}

impl TaskAnalysis {
    /// Complex tasks are spread over every ready agent
    pub fn requires_multiple_agents(&self) -> bool {
        self.complexity == Complexity::Complex
    }
}

fn mentions_any(lowered: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| lowered.contains(m))
}

impl TaskMatcher {
    #[instrument(skip(self, task))]
    pub fn analyze(&self, task: &str) -> Result<TaskAnalysis, MatchError> {
        let domain = classify(task)?;
        let lowered = task.to_lowercase();

        let complexity = if mentions_any(&lowered, COMPLEXITY_MARKERS) {
            Complexity::Complex
        } else {
            Complexity::Simple
        };
        let urgency = if mentions_any(&lowered, URGENCY_MARKERS) {
            Urgency::High
        } else {
            Urgency::Normal
        };

        let analysis = TaskAnalysis {
            domain,
            complexity,
            urgency,
            requires_research: mentions_any(&lowered, RESEARCH_MARKERS),
            keywords: domain.matched_keywords(&lowered),
        };
        debug!(?analysis, "Task analyzed");
        Ok(analysis)
    }
}
