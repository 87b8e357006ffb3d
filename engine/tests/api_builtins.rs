use engine::api::{RegenConfig, parse_actor, simulate_regeneration, simulate_regeneration_many};
use engine::classifier::MatchRule;
use engine::resources::ResourceKey;

fn builtin_cfg(id: &str, seed: u64) -> RegenConfig {
    RegenConfig {
        actor_path: None,
        actor_id: Some(id.to_string()),
        seed,
        decline: vec![],
        title: None,
        template: None,
    }
}

#[test]
fn warrior_with_the_ability_takes_four() {
    let report = simulate_regeneration(builtin_cfg("warrior", 2025)).unwrap();
    assert_eq!(report.matched, Some(MatchRule::ExactTemplate));
    assert!(report.panel_attached);
    assert_eq!(report.rolls.len(), 1, "warrior regenerates LP only");
    assert_eq!(report.rolls[0].results, vec![4]);
    assert_eq!(report.recovered_total, 4);
    assert!(!report.log.is_empty());
}

#[test]
fn mage_defaults_follow_the_ae_tagged_ability() {
    // The mage's ability covers AE only: LP defaults off, AE on.
    let report = simulate_regeneration(builtin_cfg("mage", 7)).unwrap();
    assert_eq!(report.rolls.len(), 2);
    assert_eq!(report.rolls[0].resource, Some(ResourceKey::Lp));
    assert_eq!(report.rolls[0].results, vec![0]);
    assert_eq!(report.rolls[1].resource, Some(ResourceKey::Ae));
    assert_eq!(report.rolls[1].results, vec![4]);
    assert_eq!(report.recovered_total, 4);
}

#[test]
fn decline_list_unchecks_before_submitting() {
    let mut cfg = builtin_cfg("priest", 11);
    cfg.decline = vec![ResourceKey::Ke];
    let report = simulate_regeneration(cfg).unwrap();
    assert_eq!(report.rolls.len(), 2);
    assert_eq!(report.rolls[0].results, vec![4]);
    assert_eq!(report.rolls[1].results, vec![0]);
}

#[test]
fn wanderer_without_the_ability_rolls_randomly() {
    let report = simulate_regeneration(builtin_cfg("wanderer", 123)).unwrap();
    assert_eq!(report.matched, Some(MatchRule::ExactTemplate));
    assert!(!report.panel_attached);
    assert_eq!(report.rolls.len(), 1);
    assert!((1..=6).contains(&report.rolls[0].results[0]));
}

#[test]
fn unknown_builtin_id_is_an_error() {
    assert!(simulate_regeneration(builtin_cfg("dragon", 0)).is_err());
}

#[test]
fn forced_distribution_is_a_spike_at_four() {
    let stats = simulate_regeneration_many(builtin_cfg("warrior", 1), 100).unwrap();
    assert_eq!(stats.samples, 100);
    assert_eq!(stats.dice_rolled, 100);
    assert_eq!(stats.declined_zeroes, 0);
    assert_eq!(stats.die_histogram, [0, 0, 0, 100, 0, 0]);
}

#[test]
fn untouched_distribution_spreads_over_all_faces() {
    let stats = simulate_regeneration_many(builtin_cfg("wanderer", 1), 600).unwrap();
    assert_eq!(stats.declined_zeroes, 0);
    assert!(
        stats.die_histogram.iter().all(|&count| count > 0),
        "histogram {:?}",
        stats.die_histogram
    );
}

#[test]
fn actor_files_parse_as_json_or_yaml() {
    let json = r#"{"name":"Alrik","items":[{"name":"Masterful Regeneration"}],"lp":{"value":1,"max":2}}"#;
    let actor = parse_actor("alrik.json", json).unwrap();
    assert!(actor.has_masterful());

    let yaml = "name: Alrik\nitems:\n  - name: Masterful Regeneration (KE)\nke:\n  value: 3\n  max: 9\n";
    let actor = parse_actor("alrik.yaml", yaml).unwrap();
    assert!(actor.masterful_covers(ResourceKey::Ke));
    assert!(!actor.masterful_covers(ResourceKey::Lp));
}
