use indexmap::IndexMap;

use crate::actor::Actor;
use crate::classifier::RenderedApp;
use crate::host::formula::formula_mentions_d6;
use crate::overrides::InterceptLayers;
use crate::resources::ResourceKey;
use crate::toggles::TogglePanel;

/// Per-resource formula field names observed across host versions, in
/// the order the host renders them. The trailing entry is the generic
/// single-formula variant some versions use instead.
const FIELD_CANDIDATES: &[(&str, Option<ResourceKey>)] = &[
    ("roll_formula_lp", Some(ResourceKey::Lp)),
    ("roll_formula_lep", Some(ResourceKey::Lp)),
    ("roll_formula_le", Some(ResourceKey::Lp)),
    ("roll_formula_ae", Some(ResourceKey::Ae)),
    ("roll_formula_asp", Some(ResourceKey::Ae)),
    ("roll_formula_as", Some(ResourceKey::Ae)),
    ("roll_formula_ke", Some(ResourceKey::Ke)),
    ("roll_formula_kap", Some(ResourceKey::Ke)),
    ("roll_formula_ka", Some(ResourceKey::Ke)),
    ("roll_formula", None),
];

/// A formula field that participates in the regeneration roll: a known
/// field name whose current formula still carries a 1d6 term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibleField {
    pub name: String,
    /// None for the generic single-formula variant.
    pub resource: Option<ResourceKey>,
    pub formula: String,
}

/// One open regeneration dialog instance. Toggle state and layer-attach
/// flags live here, scoped to this instance, never in a process-wide
/// global.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenerationDialog {
    pub app: RenderedApp,
    pub actor: Actor,
    /// Field name -> formula string, in host render order.
    pub fields: IndexMap<String, String>,
    pub panel: Option<TogglePanel>,
    pub layers: InterceptLayers,
}

impl RegenerationDialog {
    pub fn new(app: RenderedApp, actor: Actor) -> Self {
        Self {
            app,
            actor,
            fields: IndexMap::new(),
            panel: None,
            layers: InterceptLayers::default(),
        }
    }

    pub fn with_field(mut self, name: &str, formula: &str) -> Self {
        self.fields.insert(name.to_string(), formula.to_string());
        self
    }

    pub fn resource_for_field(name: &str) -> Option<Option<ResourceKey>> {
        FIELD_CANDIDATES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .map(|(_, resource)| *resource)
    }

    /// Known formula fields that still roll a 1d6, in encounter order.
    /// Unknown field names and fields without a die are not part of the
    /// regeneration roll.
    pub fn eligible_fields(&self) -> Vec<EligibleField> {
        self.fields
            .iter()
            .filter_map(|(name, formula)| {
                let resource = Self::resource_for_field(name)?;
                if !formula_mentions_d6(formula) {
                    return None;
                }
                Some(EligibleField {
                    name: name.clone(),
                    resource,
                    formula: formula.clone(),
                })
            })
            .collect()
    }

    pub fn has_dedicated_field(&self, key: ResourceKey) -> bool {
        self.fields
            .keys()
            .any(|name| Self::resource_for_field(name) == Some(Some(key)))
    }

    pub fn has_generic_field(&self) -> bool {
        self.fields
            .keys()
            .any(|name| Self::resource_for_field(name) == Some(None))
    }

    /// Whether this dialog instance carries a field the given resource
    /// regenerates through. The generic single-formula variant counts for
    /// every resource.
    pub fn field_present(&self, key: ResourceKey) -> bool {
        self.has_dedicated_field(key) || self.has_generic_field()
    }

    pub fn has_panel(&self) -> bool {
        self.panel.is_some()
    }
}
