#![allow(missing_docs)]

//! Wire model of the wakethieving rules document.
//!
//! Only the fields the renderer reads are typed. Language bundles are kept
//! as raw JSON until a language is selected so that one malformed bundle
//! surfaces as a language error instead of rejecting the whole document.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Versioned, multi-language rules content plus its icon set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesDocument {
    /// Document metadata.
    #[serde(default)]
    pub api: ApiInfo,
    /// Language code to bundle, decoded lazily by [`RulesDocument::bundle`].
    pub languages: BTreeMap<String, Value>,
    /// Icon key to SVG path descriptor.
    #[serde(default)]
    pub icons: BTreeMap<String, String>,
    /// Optional document-level UI block, kept verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<Value>,
}

impl RulesDocument {
    /// Raw bundle for `code`, if present.
    pub fn raw_bundle(&self, code: &str) -> Option<&Value> {
        self.languages.get(code)
    }

    /// Decode the bundle for `code`. `None` when the key is absent.
    pub fn bundle(&self, code: &str) -> Option<Result<LanguageBundle, serde_json::Error>> {
        self.raw_bundle(code).map(LanguageBundle::deserialize)
    }

    /// Path descriptor for an icon key.
    pub fn icon(&self, key: &str) -> Option<&str> {
        self.icons.get(key).map(String::as_str)
    }
}

/// `api` metadata block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiInfo {
    pub version: String,
    pub last_updated: Option<String>,
    pub default_language: Option<String>,
    pub supported_languages: Vec<String>,
    /// Free-form endpoint descriptor.
    pub source: Option<Value>,
    pub license: Option<String>,
}

impl ApiInfo {
    /// `lastUpdated` as a timestamp. Accepts RFC 3339 or a bare date.
    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated.as_deref().and_then(parse_timestamp)
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Everything displayed for one language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageBundle {
    pub content: BundleContent,
    pub rules: Vec<Rule>,
    pub ui: BundleUi,
}

/// Section header copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BundleContent {
    pub title: String,
    pub subtitle: Option<String>,
    pub last_content_update: Option<String>,
}

/// Per-language UI strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BundleUi {
    pub footer: FooterText,
    /// Label describing where the document was served from.
    pub api_source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterText {
    pub message: Option<String>,
    pub attribution: Option<String>,
}

/// A single rule card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub title: String,
    /// Key into [`RulesDocument::icons`].
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub content: RuleContent,
}

/// Optional display fields of a rule. Any subset may be present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleContent {
    pub main: Option<MainText>,
    pub intro: Option<String>,
    pub day: Option<TitledText>,
    pub night: Option<TitledText>,
    pub rules: Option<Vec<TitledText>>,
    pub equipment: Option<Vec<TitledText>>,
    pub description: Option<String>,
    pub info: Option<InfoNote>,
    pub warning: Option<String>,
    pub community: Option<CommunityBlock>,
}

/// Lead text of a card: a plain string or a title with description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MainText {
    Plain(String),
    Titled(TitledText),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitledText {
    pub title: String,
    pub description: String,
}

/// Informational note, optionally pointing at an external page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawInfoNote")]
pub struct InfoNote {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<ExternalLink>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInfoNote {
    Plain(String),
    Detailed {
        #[serde(default)]
        text: String,
        #[serde(default)]
        link: Option<ExternalLink>,
    },
}

impl From<RawInfoNote> for InfoNote {
    fn from(raw: RawInfoNote) -> Self {
        match raw {
            RawInfoNote::Plain(text) => Self { text, link: None },
            RawInfoNote::Detailed { text, link } => Self { text, link },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalLink {
    #[serde(default)]
    pub text: String,
    pub url: String,
}

/// Call to join the community, with an optional link card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommunityBlock {
    pub text: Option<String>,
    pub link: Option<CommunityLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunityLink {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rule_content_accepts_both_main_shapes() {
        let plain: RuleContent = serde_json::from_value(json!({ "main": "Stay back." })).unwrap();
        assert_eq!(plain.main, Some(MainText::Plain("Stay back.".into())));

        let titled: RuleContent = serde_json::from_value(json!({
            "main": { "title": "50 meters", "description": "On each side." }
        }))
        .unwrap();
        assert_eq!(
            titled.main,
            Some(MainText::Titled(TitledText {
                title: "50 meters".into(),
                description: "On each side.".into(),
            }))
        );
    }

    #[test]
    fn info_note_accepts_plain_and_linked_forms() {
        let plain: InfoNote = serde_json::from_value(json!("Short note")).unwrap();
        assert_eq!(plain.text, "Short note");
        assert!(plain.link.is_none());

        let linked: InfoNote = serde_json::from_value(json!({
            "text": "Shipping lanes",
            "link": { "text": "map", "url": "https://example.com/map" }
        }))
        .unwrap();
        assert_eq!(linked.link.map(|link| link.url).as_deref(), Some("https://example.com/map"));
    }

    #[test]
    fn document_requires_languages() {
        let err = serde_json::from_value::<RulesDocument>(json!({ "error": "not found" }));
        assert!(err.is_err());
        let doc: RulesDocument = serde_json::from_value(json!({ "languages": {} })).unwrap();
        assert!(doc.languages.is_empty());
        assert!(doc.api.version.is_empty());
    }

    #[test]
    fn malformed_bundle_does_not_reject_document() {
        let doc: RulesDocument = serde_json::from_value(json!({
            "api": { "version": "1.0" },
            "languages": { "en": { "rules": "not a list" } }
        }))
        .unwrap();
        assert!(matches!(doc.bundle("en"), Some(Err(_))));
        assert!(doc.bundle("de").is_none());
    }

    #[test]
    fn parses_last_updated_timestamps() {
        let api = ApiInfo {
            last_updated: Some("2025-05-01T10:00:00Z".into()),
            ..ApiInfo::default()
        };
        assert_eq!(
            api.last_updated_at().map(|ts| ts.to_rfc3339()),
            Some("2025-05-01T10:00:00+00:00".to_string())
        );
        assert!(parse_timestamp("2025-05-01").is_some());
        assert!(parse_timestamp("last spring").is_none());
    }
}
