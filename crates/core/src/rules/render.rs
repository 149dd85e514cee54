//! Turns a resolved rules document into display-ready cards.
//!
//! The renderer never decides layout; it only decides which blocks a card
//! has and in what order. Frontends walk [`RulesPage`] and draw each
//! [`CardBlock`] however suits them.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, warn};

use super::{
    model::{
        CommunityBlock, InfoNote, LanguageBundle, MainText, Rule, RuleContent, RulesDocument,
        TitledText,
    },
    source::{ContentError, ContentOrigin, ResolvedContent},
};

/// Language shown when nothing else is configured.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Rule that carries the hard-coded life jacket note.
pub const SUPPLEMENTARY_NOTE_RULE_ID: &str = "equipment";

/// Sponsor note appended to the equipment card.
pub const SUPPLEMENTARY_NOTE: SupplementaryNote = SupplementaryNote {
    text: "Restube offers inflatable life jackets perfect for this requirement. \
           10% discount with code: FEDERI10X",
    url: "https://indiana-paddlesurf.com/de_ch/pfd-by-restube-iso-norm-rt-06001-hi.html",
};

/// Fixed note rendered below the info block of one specific rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplementaryNote {
    /// Note copy.
    pub text: &'static str,
    /// Shop link.
    pub url: &'static str,
}

/// Why a language bundle could not be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageDataError {
    /// The requested key is absent from `languages`.
    #[error("language `{0}` is missing from the rules document")]
    Missing(String),
    /// The bundle exists but does not decode.
    #[error("language `{code}` is malformed: {reason}")]
    #[allow(missing_docs)]
    Malformed { code: String, reason: String },
    /// The bundle decodes but has no title.
    #[error("language `{0}` has no title")]
    EmptyTitle(String),
}

/// Header block above the card grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RulesHeader {
    /// Section title.
    pub title: String,
    /// Lead paragraph.
    pub subtitle: Option<String>,
    /// Free-form "content last updated" label.
    pub last_update: Option<String>,
    /// `api.version` of the document.
    pub version: String,
    /// `api.lastUpdated` of the document, when it parses.
    pub published: Option<DateTime<Utc>>,
}

/// Footer block below the card grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RulesFooter {
    /// Closing message.
    pub message: Option<String>,
    /// Content attribution line.
    pub attribution: Option<String>,
    /// Where the document says it was served from.
    pub api_source: Option<String>,
}

/// One rule, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleCard {
    /// Rule identifier.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Icon key as written in the document.
    pub icon_key: String,
    /// SVG path for the icon; `None` when the key is unknown.
    pub icon: Option<String>,
    /// Content blocks in display order.
    pub blocks: Vec<CardBlock>,
}

/// A block inside a card. Variants are listed in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum CardBlock {
    /// Lead text, optionally with its own heading.
    #[allow(missing_docs)]
    Main { title: Option<String>, text: String },
    /// Introductory sentence.
    Intro(String),
    /// Daytime marking.
    Day(TitledText),
    /// Night-time marking.
    Night(TitledText),
    /// Titled rule items.
    RuleList(Vec<TitledText>),
    /// Titled equipment items.
    EquipmentList(Vec<TitledText>),
    /// Plain paragraph.
    Description(String),
    /// Informational note.
    Info(InfoNote),
    /// Hard-coded note for [`SUPPLEMENTARY_NOTE_RULE_ID`].
    Supplementary(SupplementaryNote),
    /// Warning note.
    Warning(String),
    /// Community link block.
    Community(CommunityBlock),
}

/// The fully rendered rules section.
#[derive(Debug, Clone, PartialEq)]
pub struct RulesPage {
    /// Header block.
    pub header: RulesHeader,
    /// One card per rule, in document order.
    pub cards: Vec<RuleCard>,
    /// Footer block.
    pub footer: RulesFooter,
    /// Which location the document came from.
    pub origin: ContentOrigin,
}

/// Display state of the rules section.
#[derive(Debug, Clone, PartialEq)]
pub enum RulesState {
    /// Resolution has not settled yet.
    Loading,
    /// Both locations failed.
    Error(String),
    /// The document loaded but the language bundle is unusable.
    LanguageError(LanguageDataError),
    /// Cards are ready to draw.
    Ready(RulesPage),
}

/// Owns the rules section state. Leaves `Loading` exactly once.
#[derive(Debug, Clone)]
pub struct RulesView {
    language: String,
    state: RulesState,
}

impl RulesView {
    /// Start in `Loading` for the given display language.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            state: RulesState::Loading,
        }
    }

    /// Display language.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Current state.
    pub fn state(&self) -> &RulesState {
        &self.state
    }

    /// Whether resolution is still pending.
    pub fn is_loading(&self) -> bool {
        matches!(self.state, RulesState::Loading)
    }

    /// Settle the view with the outcome of [`super::ContentSource::resolve`].
    /// Returns `false` and keeps the current state if already settled.
    pub fn settle(&mut self, result: Result<ResolvedContent, ContentError>) -> bool {
        if !self.is_loading() {
            warn!("rules view already settled, ignoring late result");
            return false;
        }

        self.state = match result {
            Ok(resolved) => {
                match render_page(&resolved.document, &self.language, resolved.origin) {
                    Ok(page) => RulesState::Ready(page),
                    Err(err) => {
                        warn!(
                            language = %self.language,
                            error = %err,
                            "rules language data invalid"
                        );
                        RulesState::LanguageError(err)
                    }
                }
            }
            Err(err) => {
                if !err.is_terminal() {
                    warn!(error = %err, "rules settled on a single location failure");
                }
                RulesState::Error(err.to_string())
            }
        };
        true
    }
}

/// Render the rules section of `document` in `language`.
pub fn render_page(
    document: &RulesDocument,
    language: &str,
    origin: ContentOrigin,
) -> Result<RulesPage, LanguageDataError> {
    let bundle = select_bundle(document, language)?;

    let cards = bundle
        .rules
        .iter()
        .map(|rule| render_card(rule, document))
        .collect::<Vec<_>>();
    debug!(language, cards = cards.len(), "rendered rules page");

    Ok(RulesPage {
        header: RulesHeader {
            title: bundle.content.title.clone(),
            subtitle: non_empty(bundle.content.subtitle.as_deref()),
            last_update: non_empty(bundle.content.last_content_update.as_deref()),
            version: document.api.version.clone(),
            published: document.api.last_updated_at(),
        },
        cards,
        footer: RulesFooter {
            message: non_empty(bundle.ui.footer.message.as_deref()),
            attribution: non_empty(bundle.ui.footer.attribution.as_deref()),
            api_source: non_empty(bundle.ui.api_source.as_deref()),
        },
        origin,
    })
}

fn select_bundle(
    document: &RulesDocument,
    language: &str,
) -> Result<LanguageBundle, LanguageDataError> {
    let bundle = match document.bundle(language) {
        None => return Err(LanguageDataError::Missing(language.to_string())),
        Some(Err(err)) => {
            return Err(LanguageDataError::Malformed {
                code: language.to_string(),
                reason: err.to_string(),
            })
        }
        Some(Ok(bundle)) => bundle,
    };

    if bundle.content.title.trim().is_empty() {
        return Err(LanguageDataError::EmptyTitle(language.to_string()));
    }
    Ok(bundle)
}

/// Render a single rule. Unknown icon keys yield no icon.
pub fn render_card(rule: &Rule, document: &RulesDocument) -> RuleCard {
    RuleCard {
        id: rule.id.clone(),
        title: rule.title.clone(),
        icon_key: rule.icon.clone(),
        icon: document.icon(&rule.icon).map(str::to_string),
        blocks: content_blocks(&rule.id, &rule.content),
    }
}

/// Blocks for a rule in fixed order: main, intro, day, night, rule list,
/// equipment list, description, then info, supplementary note, warning and
/// community link.
pub fn content_blocks(rule_id: &str, content: &RuleContent) -> Vec<CardBlock> {
    let mut blocks = Vec::new();

    if let Some(main) = content.main.as_ref().and_then(main_block) {
        blocks.push(main);
    }
    if let Some(intro) = non_empty(content.intro.as_deref()) {
        blocks.push(CardBlock::Intro(intro));
    }
    if let Some(day) = content.day.as_ref().and_then(titled) {
        blocks.push(CardBlock::Day(day));
    }
    if let Some(night) = content.night.as_ref().and_then(titled) {
        blocks.push(CardBlock::Night(night));
    }
    if let Some(items) = content.rules.as_ref().filter(|items| !items.is_empty()) {
        blocks.push(CardBlock::RuleList(items.clone()));
    }
    if let Some(items) = content.equipment.as_ref().filter(|items| !items.is_empty()) {
        blocks.push(CardBlock::EquipmentList(items.clone()));
    }
    if let Some(description) = non_empty(content.description.as_deref()) {
        blocks.push(CardBlock::Description(description));
    }

    if let Some(info) = content.info.as_ref().filter(|info| {
        !info.text.trim().is_empty() || info.link.is_some()
    }) {
        blocks.push(CardBlock::Info(info.clone()));
    }
    if rule_id == SUPPLEMENTARY_NOTE_RULE_ID {
        blocks.push(CardBlock::Supplementary(SUPPLEMENTARY_NOTE));
    }
    if let Some(warning) = non_empty(content.warning.as_deref()) {
        blocks.push(CardBlock::Warning(warning));
    }
    if let Some(community) = content.community.as_ref().filter(|community| {
        non_empty(community.text.as_deref()).is_some() || community.link.is_some()
    }) {
        blocks.push(CardBlock::Community(community.clone()));
    }

    blocks
}

// A titled main with no description shows its title as the text.
fn main_block(main: &MainText) -> Option<CardBlock> {
    match main {
        MainText::Plain(text) => non_empty(Some(text.as_str())).map(|text| CardBlock::Main {
            title: None,
            text,
        }),
        MainText::Titled(item) => {
            let title = non_empty(Some(item.title.as_str()));
            match non_empty(Some(item.description.as_str())) {
                Some(text) => Some(CardBlock::Main { title, text }),
                None => title.map(|text| CardBlock::Main { title: None, text }),
            }
        }
    }
}

fn titled(item: &TitledText) -> Option<TitledText> {
    if item.title.trim().is_empty() && item.description.trim().is_empty() {
        None
    } else {
        Some(item.clone())
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
