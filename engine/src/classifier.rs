use serde::{Deserialize, Serialize};
use tracing::debug;

/// Template path the host uses for the regeneration dialog.
pub const REGEN_TEMPLATE: &str = "systems/dsa5/templates/dialog/regeneration-dialog.hbs";

/// Title keywords, lowercased. The second entry is the localized equivalent.
pub const TITLE_KEYWORDS: [&str; 2] = ["regeneration", "regenerieren"];

/// DOM-like node as carried by a render event. Only the pieces the
/// structural fallback inspects: tag, `name` attribute, text, children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomNode {
    pub tag: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub children: Vec<DomNode>,
}

impl DomNode {
    pub fn element(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Self::default()
        }
    }

    pub fn named(tag: &str, name: &str) -> Self {
        Self {
            tag: tag.to_string(),
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_child(mut self, child: DomNode) -> Self {
        self.children.push(child);
        self
    }

    /// Depth-first search for any node satisfying the predicate.
    pub fn any(&self, pred: &dyn Fn(&DomNode) -> bool) -> bool {
        if pred(self) {
            return true;
        }
        self.children.iter().any(|child| child.any(pred))
    }

    /// Find a descendant by tag and `name` attribute.
    pub fn has_named(&self, tag: &str, name: &str) -> bool {
        self.any(&|node| node.tag == tag && node.name.as_deref() == Some(name))
    }

    /// Case-insensitive search over the visible text of the subtree.
    pub fn text_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.any(&|node| node.text.to_lowercase().contains(&needle))
    }
}

/// Opaque application descriptor from a host render event. Depending on
/// host version and localization any of these signals may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedApp {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub root: DomNode,
}

/// Which classification rule recognized the dialog. Rules are tried in
/// declaration order, short-circuit OR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Template identifier equals the known regeneration-dialog template.
    ExactTemplate,
    /// Title contains a regeneration keyword (localized list).
    TitleKeyword,
    /// Campsite/interruption selects, the bad-camp input, and a roll
    /// button are all present in the DOM.
    StructuralDom,
}

/// Decide whether a rendered application is the regeneration dialog.
///
/// No single signal is reliable across host versions, so the policy is a
/// permissive OR: a rare false positive only costs an inert panel, while a
/// false negative silently disables the feature.
pub fn classify(app: &RenderedApp) -> Option<MatchRule> {
    if app.template.as_deref() == Some(REGEN_TEMPLATE) {
        debug!(title = ?app.title, "regeneration dialog matched by template");
        return Some(MatchRule::ExactTemplate);
    }

    if let Some(title) = &app.title {
        let title = title.to_lowercase();
        if TITLE_KEYWORDS.iter().any(|kw| title.contains(kw)) {
            debug!(%title, "regeneration dialog matched by title keyword");
            return Some(MatchRule::TitleKeyword);
        }
    }

    if structural_match(&app.root) {
        debug!("regeneration dialog matched by structural fallback");
        return Some(MatchRule::StructuralDom);
    }

    None
}

/// The field trio typical for the regeneration form, plus an actionable
/// roll button.
fn structural_match(root: &DomNode) -> bool {
    let has_campsite = root.has_named("select", "campsite");
    let has_interruption = root.has_named("select", "interruption");
    let has_bad = root.has_named("input", "bad");
    let has_roll = root.any(&|node| {
        node.tag == "button"
            && (node.name.as_deref() == Some("roll") || node.text.to_lowercase().contains("roll"))
    });
    has_campsite && has_interruption && has_bad && has_roll
}
