use std::collections::HashMap;

pub fn builtin_actors() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("warrior", include_str!("../content/actors/warrior.json")),
        ("mage", include_str!("../content/actors/mage.json")),
        ("priest", include_str!("../content/actors/priest.json")),
        ("wanderer", include_str!("../content/actors/wanderer.json")),
    ])
}
