use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::classifier::{DomNode, MatchRule, REGEN_TEMPLATE, RenderedApp};
use crate::content::builtin_actors;
use crate::host::dialog::RegenerationDialog;
use crate::resources::ResourceKey;
use crate::session::{ResourceRoll, SubmitWindow, on_render, submit};
use crate::{Dice, DECLINED_RESULT};

/// Config for one simulated regeneration submission.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RegenConfig {
    #[serde(default)]
    pub actor_path: Option<String>,
    #[serde(default)]
    pub actor_id: Option<String>,
    #[serde(default)]
    pub seed: u64,
    /// Resources the player unchecks before submitting.
    #[serde(default)]
    pub decline: Vec<ResourceKey>,
    /// Title override for the simulated dialog.
    #[serde(default)]
    pub title: Option<String>,
    /// Template override; the host's regeneration template when absent.
    #[serde(default)]
    pub template: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegenReport {
    pub actor: String,
    pub matched: Option<MatchRule>,
    pub panel_attached: bool,
    pub rolls: Vec<ResourceRoll>,
    pub recovered_total: i32,
    pub log: Vec<String>,
}

/// Distribution summary over many seeded submissions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct RegenStats {
    pub samples: u32,
    pub dice_rolled: u32,
    pub declined_zeroes: u32,
    /// Counts of die values 1..=6, index 0 holding the ones.
    pub die_histogram: [u32; 6],
}

pub fn load_actor(cfg: &RegenConfig) -> Result<Actor> {
    if let Some(path) = &cfg.actor_path {
        let raw =
            fs::read_to_string(path).with_context(|| format!("reading actor file {path}"))?;
        return parse_actor(path, &raw);
    }
    if let Some(id) = &cfg.actor_id {
        let raw = builtin_actors()
            .get(id.as_str())
            .copied()
            .ok_or_else(|| anyhow!("unknown builtin actor '{id}'"))?;
        return serde_json::from_str(raw).with_context(|| format!("parsing builtin actor {id}"));
    }
    bail!("config needs actor_path or actor_id");
}

/// Actor files load as JSON or YAML, decided by extension.
pub fn parse_actor(path: &str, raw: &str) -> Result<Actor> {
    let is_yaml = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext, "yaml" | "yml"));
    if is_yaml {
        serde_yaml::from_str(raw).with_context(|| format!("parsing actor yaml {path}"))
    } else {
        serde_json::from_str(raw).with_context(|| format!("parsing actor json {path}"))
    }
}

/// Build the dialog a matching host render event would carry: template,
/// title, the campsite form DOM, and one dedicated 1d6 field per pool the
/// actor owns.
pub fn build_dialog(cfg: &RegenConfig, actor: Actor) -> RegenerationDialog {
    let root = DomNode::element("form")
        .with_child(DomNode::named("select", "campsite"))
        .with_child(DomNode::named("select", "interruption"))
        .with_child(DomNode::named("input", "bad"))
        .with_child(DomNode::named("button", "roll").with_text("Roll"));
    let app = RenderedApp {
        title: cfg
            .title
            .clone()
            .or_else(|| Some(format!("Regeneration: {}", actor.name))),
        template: cfg
            .template
            .clone()
            .or_else(|| Some(REGEN_TEMPLATE.to_string())),
        root,
    };
    let mut dialog = RegenerationDialog::new(app, actor);
    for key in ResourceKey::ALL {
        if dialog.actor.has_pool(key) {
            let field = match key {
                ResourceKey::Lp => "roll_formula_lp",
                ResourceKey::Ae => "roll_formula_ae",
                ResourceKey::Ke => "roll_formula_ke",
            };
            dialog.fields.insert(field.to_string(), "1d6".to_string());
        }
    }
    dialog
}

/// One full pass through the wrapped flow: render, apply the player's
/// declines, submit once.
pub fn simulate_regeneration(cfg: RegenConfig) -> Result<RegenReport> {
    let actor = load_actor(&cfg)?;
    simulate_with_actor(cfg, actor)
}

/// Same flow for an actor the caller already loaded (the sample harness
/// decodes actor files itself).
pub fn simulate_with_actor(cfg: RegenConfig, actor: Actor) -> Result<RegenReport> {
    let mut dialog = build_dialog(&cfg, actor);

    let mut log = Vec::new();
    let matched = on_render(&mut dialog, |line| log.push(line));

    if let Some(panel) = dialog.panel.as_mut() {
        for key in &cfg.decline {
            panel.set(*key, false);
        }
    }
    let panel_attached = dialog.has_panel();

    let mut window = SubmitWindow::new();
    let mut dice = Dice::from_seed(cfg.seed);
    let outcome = submit(&mut dialog, &mut window, &mut dice, 0, |line| {
        log.push(line);
    })
    .context("submitting regeneration dialog")?;

    let recovered_total = outcome.rolls.iter().map(|roll| roll.recovered).sum();
    Ok(RegenReport {
        actor: dialog.actor.name.clone(),
        matched,
        panel_attached,
        rolls: outcome.rolls,
        recovered_total,
        log,
    })
}

/// Repeat the simulation across consecutive seeds (trial i uses seed+i)
/// and histogram every die value that came out of the pipeline.
pub fn simulate_regeneration_many(cfg: RegenConfig, samples: u32) -> Result<RegenStats> {
    let mut stats = RegenStats {
        samples,
        dice_rolled: 0,
        declined_zeroes: 0,
        die_histogram: [0; 6],
    };
    for trial in 0..samples {
        let mut trial_cfg = cfg.clone();
        trial_cfg.seed = cfg.seed.wrapping_add(u64::from(trial));
        let report = simulate_regeneration(trial_cfg)?;
        for roll in &report.rolls {
            for &value in &roll.results {
                stats.dice_rolled += 1;
                if value == DECLINED_RESULT {
                    stats.declined_zeroes += 1;
                } else if (1..=6).contains(&value) {
                    stats.die_histogram[(value - 1) as usize] += 1;
                }
            }
        }
    }
    Ok(stats)
}
