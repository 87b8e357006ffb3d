use serde::{Deserialize, Serialize};

use crate::resources::ResourceKey;

/// Ability phrase the override keys on, matched case-insensitively anywhere
/// in an item name.
pub const MASTERFUL_PHRASE: &str = "masterful regeneration";

/// A named ability item owned by an actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityItem {
    pub name: String,
}

impl AbilityItem {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

/// One resource pool. A missing pool means the actor has no such resource
/// to regenerate at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub value: i32,
    pub max: i32,
}

/// Character data as the host exposes it: a name, ability items, and the
/// resource pools that exist for this character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    #[serde(default)]
    pub items: Vec<AbilityItem>,
    #[serde(default)]
    pub lp: Option<Pool>,
    #[serde(default)]
    pub ae: Option<Pool>,
    #[serde(default)]
    pub ke: Option<Pool>,
}

impl Actor {
    pub fn pool(&self, key: ResourceKey) -> Option<&Pool> {
        match key {
            ResourceKey::Lp => self.lp.as_ref(),
            ResourceKey::Ae => self.ae.as_ref(),
            ResourceKey::Ke => self.ke.as_ref(),
        }
    }

    pub fn has_pool(&self, key: ResourceKey) -> bool {
        self.pool(key).is_some()
    }

    /// True when any ability item carries the masterful-regeneration phrase.
    pub fn has_masterful(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.name.to_lowercase().contains(MASTERFUL_PHRASE))
    }

    /// Whether the masterful ability applies to a specific resource. An
    /// untagged item ("Masterful Regeneration") covers every resource; a
    /// tagged item ("Masterful Regeneration (AE)") covers only the tagged
    /// one.
    pub fn masterful_covers(&self, key: ResourceKey) -> bool {
        self.items.iter().any(|item| {
            let name = item.name.to_lowercase();
            if !name.contains(MASTERFUL_PHRASE) {
                return false;
            }
            match item_resource_tag(&name) {
                Some(tagged) => tagged == key,
                None => true,
            }
        })
    }
}

/// Extract a "(LP)" / "(AE)" / "(KE)" tag from a lowercased item name.
fn item_resource_tag(name: &str) -> Option<ResourceKey> {
    let open = name.rfind('(')?;
    let close = name[open..].find(')')? + open;
    ResourceKey::from_label(&name[open + 1..close])
}
