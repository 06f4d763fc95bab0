//! LLM and RAG profiles granted by evolution tiers

use chrono::{DateTime, Utc};
use decentramind_common::{LlmConfig, RagConfig};

/// Model parameters for a tier's `llm_upgrade`; unknown models get the
/// entry-level parameters under their own name
pub fn llm_profile(model: &str) -> LlmConfig {
    let (version, temperature, tokens) = match model {
        "GPT-3.5" => ("3.5-turbo-0613", 0.7, 4096),
        "GPT-4" => ("4-0613", 0.6, 8192),
        "Claude-3" => ("3-sonnet-20240229", 0.5, 200_000),
        "GPT-4 Turbo" => ("4-turbo-2024-04-09", 0.6, 128_000),
        "Claude-3.5 Sonnet" => ("3.5-sonnet-20241022", 0.5, 200_000),
        "GPT-5 (Preview)" => ("5-preview-2024-12-01", 0.4, 256_000),
        "Claude-4" => ("4-opus-20240229", 0.3, 200_000),
        _ => ("latest", 0.7, 4096),
    };

    LlmConfig {
        model: model.to_string(),
        version: version.to_string(),
        temperature,
        max_tokens: tokens,
        context_window: tokens,
    }
}

const TECHNICAL_KNOWLEDGE: &[&str] = &[
    "Programming languages and frameworks",
    "Software architecture patterns",
    "Database design and optimization",
    "API development and integration",
    "DevOps and deployment strategies",
];

const HEALTH_KNOWLEDGE: &[&str] = &[
    "Nutrition and dietary guidelines",
    "Exercise and fitness programs",
    "Mental health and mindfulness",
    "Medical research and studies",
    "Wellness lifestyle practices",
];

const LEARNING_KNOWLEDGE: &[&str] = &[
    "Educational methodologies",
    "Cognitive learning strategies",
    "Subject-specific knowledge bases",
    "Assessment and evaluation techniques",
    "Learning technology integration",
];

const CREATIVE_KNOWLEDGE: &[&str] = &[
    "Artistic techniques and styles",
    "Design principles and trends",
    "Creative writing methodologies",
    "Digital media production",
    "Innovation and ideation processes",
];

/// Knowledge areas unlocked for a domain at a level (`level + 2` entries,
/// capped by the domain's list). Domains without a list use Technical.
pub fn knowledge_base(domain: &str, level: u32) -> Vec<String> {
    let entries = match domain {
        "Health & Wellness" => HEALTH_KNOWLEDGE,
        "Learning" => LEARNING_KNOWLEDGE,
        "Creative" => CREATIVE_KNOWLEDGE,
        _ => TECHNICAL_KNOWLEDGE,
    };
    let take = (level as usize).saturating_add(2).min(entries.len());
    entries[..take].iter().map(|s| s.to_string()).collect()
}

/// "Health & Wellness" -> "health_&_wellness"
fn domain_slug(domain: &str) -> String {
    domain
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Content-addressed marker for an agent's RAG index at a level
fn ipfs_hash(agent_id: &str, level: u32) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(agent_id.as_bytes());
    hasher.update(&level.to_le_bytes());
    let hex = hasher.finalize().to_hex();
    format!("Qm{}", &hex[..44])
}

/// RAG profile for an agent's domain at a level
pub fn rag_profile(agent_id: &str, domain: &str, level: u32, at: DateTime<Utc>) -> RagConfig {
    RagConfig {
        data_source: format!(
            "data_source_{}_{}_level_{}",
            agent_id,
            domain_slug(domain),
            level
        ),
        vector_db: format!("vector_db_{}_{}", agent_id, level),
        ipfs_hash: Some(ipfs_hash(agent_id, level)),
        knowledge_base: knowledge_base(domain, level),
        last_updated: Some(at),
    }
}
