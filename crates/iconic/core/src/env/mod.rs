//! Traits describing what the orchestrator reads from the outside world.
//!
//! The host bomb exposes unit rosters, the active dataset exposes icons, and
//! an RNG oracle supplies part choices. [`ModuleEnv`] bundles them so the
//! orchestrator can run without hard coupling to concrete implementations.
mod bomb;
mod icons;
mod rng;

pub use bomb::{BombOracle, StaticBomb};
pub use icons::IconOracle;
pub use rng::{PcgRng, RngOracle, compute_seed};

/// Aggregates the read-only oracles required by the orchestrator.
#[derive(Clone, Copy)]
pub struct ModuleEnv<'a> {
    bomb: &'a dyn BombOracle,
    icons: &'a dyn IconOracle,
    rng: &'a dyn RngOracle,
}

impl<'a> ModuleEnv<'a> {
    pub fn new(
        bomb: &'a dyn BombOracle,
        icons: &'a dyn IconOracle,
        rng: &'a dyn RngOracle,
    ) -> Self {
        Self { bomb, icons, rng }
    }

    pub fn bomb(&self) -> &'a dyn BombOracle {
        self.bomb
    }

    pub fn icons(&self) -> &'a dyn IconOracle {
        self.icons
    }

    pub fn rng(&self) -> &'a dyn RngOracle {
        self.rng
    }
}
