use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::Dice;
use crate::classifier::{MatchRule, classify};
use crate::guard::{GUARD_TIMEOUT_TICKS, SubmitGuard};
use crate::host::dialog::RegenerationDialog;
use crate::host::formula::{FormulaError, RollFormula};
use crate::overrides::{DieEvaluator, MasterfulOverride, PassThrough, RollContext, rewrite_formulas};
use crate::resources::ResourceKey;
use crate::toggles::TogglePanel;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("host roll pipeline failed: {0}")]
    Host(#[from] FormulaError),
}

/// The guard and the roll context move together: the context is only
/// meaningful inside an open submission window, and a timed-out guard
/// must take the context down with it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitWindow {
    guard: SubmitGuard,
    ctx: RollContext,
}

impl SubmitWindow {
    pub fn new() -> Self {
        Self::with_timeout(GUARD_TIMEOUT_TICKS)
    }

    pub fn with_timeout(ticks: u64) -> Self {
        Self {
            guard: SubmitGuard::with_timeout(ticks),
            ctx: RollContext::idle(),
        }
    }

    pub fn open(&mut self, now: u64, plan: Vec<bool>) {
        self.guard.open(now);
        self.ctx.activate(plan);
    }

    pub fn close(&mut self) {
        self.guard.close();
        self.ctx.deactivate();
    }

    /// Host tick: expire a window whose close never fired.
    pub fn tick(&mut self, now: u64) {
        if self.guard.expire_if_stale(now) {
            self.ctx.deactivate();
        }
    }

    pub fn is_open(&self) -> bool {
        self.guard.is_open()
    }

    pub fn guard(&self) -> &SubmitGuard {
        &self.guard
    }

    pub fn ctx_mut(&mut self) -> &mut RollContext {
        &mut self.ctx
    }
}

/// Outcome of one resource field in a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ResourceRoll {
    /// None for the generic single-formula field.
    pub resource: Option<ResourceKey>,
    pub field: String,
    pub results: Vec<i32>,
    pub modifier: i32,
    pub recovered: i32,
}

/// Everything one submission produced, in host evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegenOutcome {
    pub rolls: Vec<ResourceRoll>,
}

/// Handle a host render event. Classification misses degrade silently;
/// actors without the masterful ability keep an untouched dialog. Panel
/// injection and layer attachment are idempotent per dialog instance, so
/// repeated renders neither stack panels nor reset the player's toggles.
pub fn on_render(dialog: &mut RegenerationDialog, mut log: impl FnMut(String)) -> Option<MatchRule> {
    let rule = classify(&dialog.app)?;
    if !dialog.actor.has_masterful() {
        debug!(actor = %dialog.actor.name, "no masterful ability, dialog left untouched");
        return Some(rule);
    }
    if dialog.panel.is_none() {
        let panel = TogglePanel::initialize(&dialog.actor, |key| dialog.field_present(key));
        dialog.panel = Some(panel);
        log(format!(
            "[ATTACH][{}] toggle panel injected ({rule:?})",
            dialog.actor.name
        ));
    }
    if dialog.layers.attach_formula() {
        debug!("formula layer attached");
    }
    if dialog.layers.attach_term() {
        debug!("term layer attached");
    }
    if dialog.layers.attach_total() {
        debug!("total layer attached");
    }
    Some(rule)
}

/// Run one dialog submission through the wrapped host pipeline.
///
/// The window opens before the host evaluates any dice and closes when
/// the pipeline settles, on the error path included: a host failure still
/// propagates to the caller unchanged, after the window is closed. With
/// no panel attached the dialog submits through the host's normal path
/// and the window is never touched.
pub fn submit(
    dialog: &mut RegenerationDialog,
    window: &mut SubmitWindow,
    dice: &mut Dice,
    now: u64,
    mut log: impl FnMut(String),
) -> Result<RegenOutcome, SubmitError> {
    window.tick(now);

    let Some(snapshot) = dialog.panel.as_ref().map(TogglePanel::snapshot) else {
        let rolls = roll_fields(dialog, &mut PassThrough, dice, &mut log)?;
        return Ok(RegenOutcome { rolls });
    };

    if dialog.layers.term {
        let plan = RollContext::plan_for(dialog, snapshot);
        log(format!(
            "[SUBMIT][{}] window open, plan {plan:?}",
            dialog.actor.name
        ));
        window.open(now, plan);
    } else {
        // No per-die seam on this host: fall back to rewriting the
        // formula strings of selected resources. Declined resources keep
        // their normal random roll on this path.
        if dialog.layers.formula {
            for name in rewrite_formulas(dialog, snapshot) {
                log(format!("[PATCH][{}] {name} rewritten", dialog.actor.name));
            }
        }
        window.open(now, Vec::new());
    }

    let result = if dialog.layers.term {
        let mut strategy = MasterfulOverride {
            ctx: window.ctx_mut(),
        };
        roll_fields(dialog, &mut strategy, dice, &mut log)
    } else {
        roll_fields(dialog, &mut PassThrough, dice, &mut log)
    };

    window.close();
    result.map(|rolls| RegenOutcome { rolls })
}

/// The host's roll computation over the dialog's formula fields, with die
/// evaluation routed through the given strategy.
fn roll_fields(
    dialog: &RegenerationDialog,
    evaluator: &mut dyn DieEvaluator,
    dice: &mut Dice,
    log: &mut impl FnMut(String),
) -> Result<Vec<ResourceRoll>, SubmitError> {
    let mut rolls = Vec::new();
    for (name, formula) in &dialog.fields {
        let Some(resource) = RegenerationDialog::resource_for_field(name) else {
            continue;
        };
        let parsed = RollFormula::parse(formula)?;
        let mut term = parsed.to_term();
        if parsed.has_dice() {
            evaluator.evaluate(&mut term, dice);
        }
        let recovered = (term.total() + parsed.modifier).max(0);
        let label = resource.map_or("ALL", ResourceKey::label);
        log(format!(
            "[ROLL][{label}] {} dice={:?} mod={} -> {recovered}",
            parsed.original, term.results, parsed.modifier
        ));
        rolls.push(ResourceRoll {
            resource,
            field: name.clone(),
            results: term.results,
            modifier: parsed.modifier,
            recovered,
        });
    }
    if rolls.is_empty() {
        log("[ROLL] no regeneration formula fields on this dialog".to_string());
    }
    Ok(rolls)
}
