use serde::{Deserialize, Serialize};
use std::fmt;

/// The three recoverable resource pools a character can regenerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKey {
    /// Life points.
    Lp,
    /// Astral energy.
    Ae,
    /// Karma energy.
    Ke,
}

impl ResourceKey {
    /// Canonical order: the order the dialog renders the resource fields,
    /// which is also the order the host evaluates their dice.
    pub const ALL: [ResourceKey; 3] = [ResourceKey::Lp, ResourceKey::Ae, ResourceKey::Ke];

    pub fn label(self) -> &'static str {
        match self {
            ResourceKey::Lp => "LP",
            ResourceKey::Ae => "AE",
            ResourceKey::Ke => "KE",
        }
    }

    /// Position of this resource in the evaluation order.
    pub fn position(self) -> usize {
        match self {
            ResourceKey::Lp => 0,
            ResourceKey::Ae => 1,
            ResourceKey::Ke => 2,
        }
    }

    pub fn from_position(pos: usize) -> Option<ResourceKey> {
        ResourceKey::ALL.get(pos).copied()
    }

    /// Parse a short label like "LP" / "ae".
    pub fn from_label(label: &str) -> Option<ResourceKey> {
        match label.trim().to_ascii_uppercase().as_str() {
            "LP" => Some(ResourceKey::Lp),
            "AE" => Some(ResourceKey::Ae),
            "KE" => Some(ResourceKey::Ke),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
