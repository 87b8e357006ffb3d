use engine::actor::{AbilityItem, Actor, Pool};
use engine::resources::ResourceKey;

fn actor_with_items(items: &[&str]) -> Actor {
    Actor {
        name: "Alrik".to_string(),
        items: items.iter().map(|name| AbilityItem::named(name)).collect(),
        lp: Some(Pool { value: 12, max: 30 }),
        ae: Some(Pool { value: 5, max: 25 }),
        ke: None,
    }
}

#[test]
fn masterful_detection_is_substring_and_case_insensitive() {
    assert!(actor_with_items(&["MASTERFUL REGENERATION II"]).has_masterful());
    assert!(actor_with_items(&["Gift: masterful regeneration"]).has_masterful());
    assert!(!actor_with_items(&["Regeneration I"]).has_masterful());
    assert!(!actor_with_items(&[]).has_masterful());
}

#[test]
fn untagged_ability_covers_every_resource() {
    let actor = actor_with_items(&["Masterful Regeneration"]);
    for key in ResourceKey::ALL {
        assert!(actor.masterful_covers(key), "{key} should be covered");
    }
}

#[test]
fn tagged_ability_covers_only_its_resource() {
    let actor = actor_with_items(&["Masterful Regeneration (AE)"]);
    assert!(!actor.masterful_covers(ResourceKey::Lp));
    assert!(actor.masterful_covers(ResourceKey::Ae));
    assert!(!actor.masterful_covers(ResourceKey::Ke));
}

#[test]
fn unrecognized_tag_falls_back_to_full_coverage() {
    // A parenthetical that is not a resource label is flavor, not a scope.
    let actor = actor_with_items(&["Masterful Regeneration (Improved)"]);
    for key in ResourceKey::ALL {
        assert!(actor.masterful_covers(key));
    }
}

#[test]
fn tagged_and_untagged_items_combine() {
    let actor = actor_with_items(&["Masterful Regeneration (KE)", "Masterful Regeneration"]);
    for key in ResourceKey::ALL {
        assert!(actor.masterful_covers(key));
    }
}

#[test]
fn pools_report_presence() {
    let actor = actor_with_items(&[]);
    assert!(actor.has_pool(ResourceKey::Lp));
    assert!(actor.has_pool(ResourceKey::Ae));
    assert!(!actor.has_pool(ResourceKey::Ke));
    assert_eq!(actor.pool(ResourceKey::Lp).unwrap().max, 30);
}

#[test]
fn actor_json_round_trips_with_missing_pools() {
    let raw = r#"{"name":"Jandra","items":[{"name":"Masterful Regeneration"}],"lp":{"value":8,"max":24}}"#;
    let actor: Actor = serde_json::from_str(raw).unwrap();
    assert_eq!(actor.name, "Jandra");
    assert!(actor.has_pool(ResourceKey::Lp));
    assert!(!actor.has_pool(ResourceKey::Ae));
    assert!(actor.has_masterful());
}
