//! Ability system: parsing card text and computing attack.
//!
//! - `Ability` / `Effect`: structured form of spell ability text
//! - `AreaAbility`: structured form of area ability text
//! - `parser`: text to structure, total and side-effect free
//! - `calculator`: modifier fold and combo evaluation
//!
//! Card text is parsed once when a spell or area enters play. Rules code
//! only ever matches on `Effect` variants.

mod ability;
mod calculator;
mod parser;

pub use ability::{Ability, AreaAbility, ComboMode, Effect};
pub use calculator::{calculate_attack, fold_modifiers, AttackResult};
pub use parser::{parse_ability, parse_area_ability, parse_immunity, parse_modifier_text};
