use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod actor;
pub mod api;
pub mod classifier;
pub mod content;
pub mod guard;
pub mod host;
pub mod overrides;
pub mod resources;
pub mod session;
pub mod toggles;

pub use actor::{AbilityItem, Actor, MASTERFUL_PHRASE, Pool};
pub use classifier::{DomNode, MatchRule, REGEN_TEMPLATE, RenderedApp, classify};
pub use guard::{GUARD_TIMEOUT_TICKS, GuardState, SubmitGuard};
pub use host::{DieTerm, EligibleField, FormulaError, RegenerationDialog, RollFormula};
pub use overrides::{
    DECLINED_RESULT, DieEvaluator, ELIGIBLE_FACES, FORCED_RESULT, InterceptLayers,
    MasterfulOverride, PassThrough, RollContext, SubstitutionError, rewrite_formulas, substitute,
};
pub use resources::ResourceKey;
pub use session::{RegenOutcome, ResourceRoll, SubmitError, SubmitWindow, on_render, submit};
pub use toggles::{TogglePanel, ToggleSetting, ToggleSnapshot};

/// Seeded roller backing the pass-through evaluation path.
pub struct Dice {
    rng: ChaCha8Rng,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// One die in 1..=faces.
    pub fn roll(&mut self, faces: i32) -> i32 {
        self.rng.gen_range(1..=faces.max(1))
    }

    pub fn d6(&mut self) -> i32 {
        self.roll(6)
    }
}
