use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::resources::ResourceKey;

/// One checkbox in the injected panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleSetting {
    pub checked: bool,
    /// An inert toggle is shown but cannot be flipped (the resource does
    /// not apply to this character or dialog instance).
    pub interactive: bool,
}

impl ToggleSetting {
    fn inert() -> Self {
        Self {
            checked: false,
            interactive: false,
        }
    }
}

/// Live snapshot of the three toggles, read once when a submission begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleSnapshot {
    pub lp: bool,
    pub ae: bool,
    pub ke: bool,
}

impl ToggleSnapshot {
    pub fn all_on() -> Self {
        Self {
            lp: true,
            ae: true,
            ke: true,
        }
    }

    pub fn get(self, key: ResourceKey) -> bool {
        match key {
            ResourceKey::Lp => self.lp,
            ResourceKey::Ae => self.ae,
            ResourceKey::Ke => self.ke,
        }
    }

    pub fn any_on(self) -> bool {
        self.lp || self.ae || self.ke
    }
}

/// The toggle panel injected into one dialog instance. State lives with
/// the dialog, never in a shared global, so two open dialogs for
/// different characters cannot contaminate each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TogglePanel {
    lp: ToggleSetting,
    ae: ToggleSetting,
    ke: ToggleSetting,
}

impl TogglePanel {
    /// Initial toggle state for a dialog instance. Defaults ON, narrowed
    /// by ability inspection:
    /// - no pool or no formula field for the resource -> inert;
    /// - present but the masterful ability does not cover it -> shown
    ///   interactive, defaulted off.
    pub fn initialize(actor: &Actor, field_present: impl Fn(ResourceKey) -> bool) -> Self {
        let setting = |key: ResourceKey| {
            if !actor.has_pool(key) || !field_present(key) {
                return ToggleSetting::inert();
            }
            ToggleSetting {
                checked: actor.masterful_covers(key),
                interactive: true,
            }
        };
        Self {
            lp: setting(ResourceKey::Lp),
            ae: setting(ResourceKey::Ae),
            ke: setting(ResourceKey::Ke),
        }
    }

    pub fn setting(&self, key: ResourceKey) -> ToggleSetting {
        match key {
            ResourceKey::Lp => self.lp,
            ResourceKey::Ae => self.ae,
            ResourceKey::Ke => self.ke,
        }
    }

    fn setting_mut(&mut self, key: ResourceKey) -> &mut ToggleSetting {
        match key {
            ResourceKey::Lp => &mut self.lp,
            ResourceKey::Ae => &mut self.ae,
            ResourceKey::Ke => &mut self.ke,
        }
    }

    /// Flip a toggle. Inert toggles stay put. Returns the checked state
    /// after the click.
    pub fn toggle(&mut self, key: ResourceKey) -> bool {
        let setting = self.setting_mut(key);
        if setting.interactive {
            setting.checked = !setting.checked;
        }
        setting.checked
    }

    pub fn set(&mut self, key: ResourceKey, checked: bool) {
        let setting = self.setting_mut(key);
        if setting.interactive {
            setting.checked = checked;
        }
    }

    pub fn snapshot(&self) -> ToggleSnapshot {
        ToggleSnapshot {
            lp: self.lp.checked,
            ae: self.ae.checked,
            ke: self.ke.checked,
        }
    }
}
