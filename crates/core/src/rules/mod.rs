//! Wakethieving rules: document model, remote-with-fallback source, and
//! card rendering.

pub mod model;
pub mod render;
pub mod source;

pub use model::{RuleContent, RulesDocument};
pub use render::{
    CardBlock, LanguageDataError, RuleCard, RulesPage, RulesState, RulesView, DEFAULT_LANGUAGE,
};
pub use source::{ContentError, ContentLocation, ContentOrigin, ContentSource, ResolvedContent};
