use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::Dice;
use crate::host::dialog::RegenerationDialog;
use crate::host::formula::{DieTerm, rewrite_d6};
use crate::toggles::ToggleSnapshot;

/// Result substituted for a selected resource's d6.
pub const FORCED_RESULT: i32 = 4;
/// Result for a resource the player declined. Models "no regeneration",
/// not a die face.
pub const DECLINED_RESULT: i32 = 0;
/// Die size eligible for the override.
pub const ELIGIBLE_FACES: i32 = 6;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubstitutionError {
    #[error("term already evaluated")]
    AlreadyEvaluated,
    #[error("term has no dice to substitute (count {0})")]
    NoDice(i32),
}

/// Transient per-submission scope for the override. While inactive no die
/// evaluation is touched; while active every eligible evaluation consumes
/// one plan slot in encounter order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollContext {
    active: bool,
    consumed: usize,
    plan: Vec<bool>,
}

impl RollContext {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Arm the context for one submission. Resets the position counter.
    pub fn activate(&mut self, plan: Vec<bool>) {
        self.active = true;
        self.consumed = 0;
        self.plan = plan;
    }

    pub fn deactivate(&mut self) {
        self.active = false;
        self.consumed = 0;
        self.plan.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Claim the next position slot. Operations beyond the plan are
    /// "extra" and resolve as if enabled. None while inactive.
    pub fn claim(&mut self) -> Option<bool> {
        if !self.active {
            return None;
        }
        let slot = self.plan.get(self.consumed).copied().unwrap_or(true);
        self.consumed += 1;
        Some(slot)
    }

    /// Build the position plan from the toggle snapshot and the fields
    /// that still roll dice, in encounter order. Dedicated fields map to
    /// their resource's toggle; a generic field is enabled when any toggle
    /// is on.
    pub fn plan_for(dialog: &RegenerationDialog, snapshot: ToggleSnapshot) -> Vec<bool> {
        dialog
            .eligible_fields()
            .iter()
            .map(|field| match field.resource {
                Some(key) => snapshot.get(key),
                None => snapshot.any_on(),
            })
            .collect()
    }
}

/// "Evaluate die" as a capability. The host pipeline calls whichever
/// strategy is attached; the decision of whether to override lives in the
/// strategy, not in patched host internals.
pub trait DieEvaluator {
    fn evaluate(&mut self, term: &mut DieTerm, dice: &mut Dice);
}

/// Host default path: seeded randomness, untouched.
pub struct PassThrough;

impl DieEvaluator for PassThrough {
    fn evaluate(&mut self, term: &mut DieTerm, dice: &mut Dice) {
        term.roll_random(dice);
    }
}

/// Deterministic override: eligible d6 terms inside an active context get
/// per-die forced values; everything else falls through to the random
/// path. A substitution that does not fit the term's shape never throws
/// past this boundary — that one term rolls randomly instead.
pub struct MasterfulOverride<'a> {
    pub ctx: &'a mut RollContext,
}

impl DieEvaluator for MasterfulOverride<'_> {
    fn evaluate(&mut self, term: &mut DieTerm, dice: &mut Dice) {
        if !self.ctx.is_active() || term.faces != ELIGIBLE_FACES {
            term.roll_random(dice);
            return;
        }
        let Some(enabled) = self.ctx.claim() else {
            term.roll_random(dice);
            return;
        };
        let forced = if enabled { FORCED_RESULT } else { DECLINED_RESULT };
        match substitute(term, forced) {
            Ok(()) => {
                debug!(position = self.ctx.consumed(), forced, "die result overridden");
            }
            Err(err) => {
                warn!(%err, "substitution failed, falling back to the random path");
                term.roll_random(dice);
            }
        }
    }
}

/// Write a forced per-die value into a term while preserving the shape
/// downstream host logic expects: `count` results and the evaluated flag.
pub fn substitute(term: &mut DieTerm, value: i32) -> Result<(), SubstitutionError> {
    if term.evaluated {
        return Err(SubstitutionError::AlreadyEvaluated);
    }
    if term.count <= 0 {
        return Err(SubstitutionError::NoDice(term.count));
    }
    term.results = vec![value; term.count as usize];
    term.evaluated = true;
    Ok(())
}

/// Formula-layer override: rewrite `1d6` to the fixed value inside the
/// fields of selected resources, before the host parses them. With only a
/// generic field present, it is patched when any toggle is on. Returns the
/// names of the patched fields.
pub fn rewrite_formulas(dialog: &mut RegenerationDialog, snapshot: ToggleSnapshot) -> Vec<String> {
    let targets: Vec<String> = dialog
        .eligible_fields()
        .iter()
        .filter(|field| match field.resource {
            Some(key) => snapshot.get(key),
            None => snapshot.any_on(),
        })
        .map(|field| field.name.clone())
        .collect();

    let mut patched = Vec::new();
    for name in targets {
        if let Some(formula) = dialog.fields.get_mut(&name) {
            let rewritten = rewrite_d6(formula, FORCED_RESULT);
            if rewritten != *formula {
                *formula = rewritten;
                patched.push(name);
            }
        }
    }
    patched
}

/// Per-layer attach-once flags. The substitution can land at several host
/// layers; each attaches exactly once per dialog instance and they stay
/// compatible when more than one is live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterceptLayers {
    pub formula: bool,
    pub term: bool,
    pub total: bool,
}

impl InterceptLayers {
    /// Mark a layer attached. False when it already was.
    pub fn attach_formula(&mut self) -> bool {
        !std::mem::replace(&mut self.formula, true)
    }

    pub fn attach_term(&mut self) -> bool {
        !std::mem::replace(&mut self.term, true)
    }

    pub fn attach_total(&mut self) -> bool {
        !std::mem::replace(&mut self.total, true)
    }

    pub fn any_attached(&self) -> bool {
        self.formula || self.term || self.total
    }
}
