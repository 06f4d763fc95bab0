//! # DecentraMind
//!
//! Rule engines behind the DecentraMind platform, bundled with their
//! configuration.
//!
//! - [`matcher`]: task classification, agent matching and delegation
//! - [`evolution`]: DMT-funded tier upgrades and XP progression
//! - [`governance`]: proposal lifecycle, voting, resolution and treasury rules
//!
//! The engines are synchronous and never perform I/O. Persistence and wallet
//! state belong to the caller, which should hold [`Engines::locks`] for an
//! entity while it loads, evaluates and stores it.
//!
//! ```no_run
//! use decentramind::Engines;
//!
//! # fn main() -> anyhow::Result<()> {
//! let engines = Engines::from_env()?;
//! let domain = decentramind::matcher::classify("Help me study calculus")?;
//! # let _ = (engines, domain);
//! # Ok(())
//! # }
//! ```

pub mod config;

pub use config::DecentraMindConfig;

pub use decentramind_common as common;
pub use decentramind_evolution as evolution;
pub use decentramind_governance as governance;
pub use decentramind_matcher as matcher;

pub use decentramind_common::sync::EntityLocks;
pub use decentramind_common::{DecentraMindError, Result};

use decentramind_evolution::EvolutionEngine;
use decentramind_governance::GovernanceEngine;
use decentramind_matcher::TaskMatcher;
use tracing::info;

/// All engines built from one configuration
#[derive(Debug)]
pub struct Engines {
    pub matcher: TaskMatcher,
    pub evolution: EvolutionEngine,
    pub governance: GovernanceEngine,
    /// Per-proposal and per-agent locks shared by callers
    pub locks: EntityLocks,
}

impl Engines {
    pub fn new(config: DecentraMindConfig) -> Result<Self> {
        let engines = Self {
            matcher: TaskMatcher::new(config.matcher),
            evolution: EvolutionEngine::new(config.evolution)?,
            governance: GovernanceEngine::new(config.governance)?,
            locks: EntityLocks::new(),
        };
        info!(version = decentramind_common::VERSION, "DecentraMind engines ready");
        Ok(engines)
    }

    /// Build from `.env`, `decentramind.toml` and `DECENTRAMIND__*` variables
    pub fn from_env() -> anyhow::Result<Self> {
        let config = DecentraMindConfig::load()?;
        Ok(Self::new(config)?)
    }
}
