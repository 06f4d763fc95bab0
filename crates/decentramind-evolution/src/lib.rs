//! # DecentraMind Evolution
//!
//! DMT-funded agent evolution and XP progression.
//!
//! ## Ladders
//!
//! | Level | Master DMT | Sub DMT | LLM |
//! |-------|-----------:|--------:|-----|
//! | 1     | 0          | 0       | GPT-3.5 |
//! | 2     | 50         | 25      | GPT-4 |
//! | 3     | 100        | 50      | Claude-3 |
//! | 4     | 200        | 100     | GPT-4 Turbo |
//! | 5     | 500        | 250     | Claude-3.5 Sonnet |
//! | 10    | 1000       | 500     | GPT-5 (Preview) |
//! | 20    | 5000       | 2500    | Claude-4 |
//!
//! An agent's next tier is the first whose cumulative cost exceeds the DMT
//! it has already spent; each evolution pays exactly that tier's cost.

pub mod engine;
pub mod profile;
pub mod tier;
pub mod xp;

pub use engine::{EvolutionEngine, EvolutionOutcome};
pub use tier::{EvolutionLadder, EvolutionTier};
pub use xp::{evolution_rewards, EvolutionRewards, XpAward, XpCurve};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Evolution configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// XP granted on every successful evolution
    pub evolution_xp_bonus: u64,
    /// Domain expertise gained per evolution (capped at 100)
    pub expertise_gain: u8,
    /// Share of each evolution payment burned
    pub burn_rate: Decimal,
    /// Cumulative XP per level, starting at level 1
    pub xp_thresholds: Vec<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            evolution_xp_bonus: 100,
            expertise_gain: 10,
            burn_rate: dec!(0.15),
            xp_thresholds: vec![0, 1200, 3000, 6000, 10000, 15000, 21000, 28000, 36000, 45000],
        }
    }
}
