use engine::actor::{AbilityItem, Actor, Pool};
use engine::resources::ResourceKey;
use engine::toggles::TogglePanel;

fn pool() -> Option<Pool> {
    Some(Pool { value: 10, max: 20 })
}

fn actor(items: &[&str], lp: bool, ae: bool, ke: bool) -> Actor {
    Actor {
        name: "Alrik".to_string(),
        items: items.iter().map(|name| AbilityItem::named(name)).collect(),
        lp: if lp { pool() } else { None },
        ae: if ae { pool() } else { None },
        ke: if ke { pool() } else { None },
    }
}

#[test]
fn untagged_ability_defaults_everything_on() {
    let actor = actor(&["Masterful Regeneration"], true, true, true);
    let panel = TogglePanel::initialize(&actor, |_| true);
    for key in ResourceKey::ALL {
        assert!(panel.setting(key).checked, "{key} should default on");
        assert!(panel.setting(key).interactive);
    }
    assert!(panel.snapshot().any_on());
}

#[test]
fn ae_tagged_ability_narrows_defaults() {
    // The mage case: LP and AE pools exist, but the ability covers AE only.
    let actor = actor(&["Masterful Regeneration (AE)"], true, true, false);
    let panel = TogglePanel::initialize(&actor, |_| true);

    let lp = panel.setting(ResourceKey::Lp);
    assert!(lp.interactive, "LP is present, just unqualified");
    assert!(!lp.checked);

    let ae = panel.setting(ResourceKey::Ae);
    assert!(ae.interactive);
    assert!(ae.checked);

    let ke = panel.setting(ResourceKey::Ke);
    assert!(!ke.interactive, "no KE pool -> inert");
    assert!(!ke.checked);
}

#[test]
fn missing_formula_field_makes_a_toggle_inert() {
    let actor = actor(&["Masterful Regeneration"], true, true, true);
    let panel = TogglePanel::initialize(&actor, |key| key != ResourceKey::Ae);
    assert!(panel.setting(ResourceKey::Lp).interactive);
    assert!(!panel.setting(ResourceKey::Ae).interactive);
    assert!(!panel.setting(ResourceKey::Ae).checked);
}

#[test]
fn inert_toggles_ignore_clicks() {
    let actor = actor(&["Masterful Regeneration"], true, false, false);
    let mut panel = TogglePanel::initialize(&actor, |_| true);
    assert!(!panel.toggle(ResourceKey::Ae));
    assert!(!panel.setting(ResourceKey::Ae).checked);
}

#[test]
fn toggling_flips_and_snapshot_follows() {
    let actor = actor(&["Masterful Regeneration"], true, true, true);
    let mut panel = TogglePanel::initialize(&actor, |_| true);
    assert!(!panel.toggle(ResourceKey::Ae));
    let snap = panel.snapshot();
    assert!(snap.lp);
    assert!(!snap.ae);
    assert!(snap.ke);

    assert!(panel.toggle(ResourceKey::Ae));
    assert!(panel.snapshot().ae);
}
