//! Minimal model of the host collaborators the override engine cooperates
//! with: the parsed roll formula, the die term shape the host's pipeline
//! carries, and the regeneration dialog instance itself. The real dialog
//! rendering and chat output stay on the host side.

pub mod dialog;
pub mod formula;

pub use dialog::{EligibleField, RegenerationDialog};
pub use formula::{DieTerm, FormulaError, RollFormula, formula_mentions_d6, rewrite_d6};
