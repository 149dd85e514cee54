//! Rules document retrieval with a single local fallback.

use std::{fmt, path::PathBuf};

use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::RulesConfig;

use super::model::RulesDocument;

/// Where a rules document can be read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentLocation {
    /// HTTP(S) URL fetched with a GET request.
    Remote(String),
    /// File on the local filesystem.
    Local(PathBuf),
}

impl ContentLocation {
    /// Interpret a configured address: `http://` and `https://` are remote,
    /// anything else is a file path.
    pub fn parse(address: &str) -> Self {
        let address = address.trim();
        if address.starts_with("http://") || address.starts_with("https://") {
            ContentLocation::Remote(address.to_string())
        } else {
            ContentLocation::Local(PathBuf::from(address))
        }
    }
}

impl fmt::Display for ContentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentLocation::Remote(url) => f.write_str(url),
            ContentLocation::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Which configured location produced the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentOrigin {
    /// The remote location answered.
    Primary,
    /// The remote location failed and the local copy was used.
    Secondary,
}

impl ContentOrigin {
    /// Short label for status lines.
    pub fn label(self) -> &'static str {
        match self {
            ContentOrigin::Primary => "live",
            ContentOrigin::Secondary => "offline copy",
        }
    }
}

/// A successfully resolved document.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedContent {
    /// Parsed document, unmodified.
    pub document: RulesDocument,
    /// Which location answered.
    pub origin: ContentOrigin,
    /// The address that answered.
    pub location: ContentLocation,
}

/// Failures while resolving rules content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Transport failure, non-success status or unreadable file.
    #[error("failed to fetch {location}: {reason}")]
    #[allow(missing_docs)]
    FetchFailed { location: String, reason: String },

    /// The body was read but is not a rules document.
    #[error("failed to parse {location}: {source}")]
    #[allow(missing_docs)]
    ParseFailed {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// Both locations failed.
    #[error("rules content unavailable ({primary}; {secondary})")]
    #[allow(missing_docs)]
    ContentUnavailable {
        primary: Box<ContentError>,
        secondary: Box<ContentError>,
    },
}

impl ContentError {
    /// Whether this error ends resolution. Per-location failures only
    /// trigger the fallback.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ContentError::ContentUnavailable { .. })
    }
}

/// Resolves the rules document from a primary location, falling back to a
/// secondary one. Exactly one attempt is made per location, in order.
#[derive(Debug, Clone)]
pub struct ContentSource {
    primary: ContentLocation,
    secondary: ContentLocation,
    client: reqwest::Client,
}

impl ContentSource {
    /// Build a source over two locations.
    pub fn new(primary: ContentLocation, secondary: ContentLocation) -> Self {
        Self {
            primary,
            secondary,
            client: reqwest::Client::new(),
        }
    }

    /// Build a source from the `[rules]` config table.
    pub fn from_config(config: &RulesConfig) -> Self {
        Self::new(
            ContentLocation::parse(&config.primary),
            ContentLocation::parse(&config.fallback),
        )
    }

    /// Location tried first.
    pub fn primary(&self) -> &ContentLocation {
        &self.primary
    }

    /// Location tried when the primary fails.
    pub fn secondary(&self) -> &ContentLocation {
        &self.secondary
    }

    /// Resolve the document. The secondary location is only touched after
    /// the primary has definitively failed.
    pub async fn resolve(&self) -> Result<ResolvedContent, ContentError> {
        let primary_err = match self.fetch(&self.primary).await {
            Ok(document) => {
                info!(
                    location = %self.primary,
                    version = %document.api.version,
                    "rules loaded"
                );
                return Ok(ResolvedContent {
                    document,
                    origin: ContentOrigin::Primary,
                    location: self.primary.clone(),
                });
            }
            Err(err) => err,
        };

        warn!(
            location = %self.primary,
            error = %primary_err,
            "primary rules source failed, trying fallback"
        );

        match self.fetch(&self.secondary).await {
            Ok(document) => {
                info!(
                    location = %self.secondary,
                    version = %document.api.version,
                    "rules loaded from fallback"
                );
                Ok(ResolvedContent {
                    document,
                    origin: ContentOrigin::Secondary,
                    location: self.secondary.clone(),
                })
            }
            Err(secondary_err) => {
                error!(
                    location = %self.secondary,
                    error = %secondary_err,
                    "fallback rules source failed"
                );
                Err(ContentError::ContentUnavailable {
                    primary: Box::new(primary_err),
                    secondary: Box::new(secondary_err),
                })
            }
        }
    }

    async fn fetch(&self, location: &ContentLocation) -> Result<RulesDocument, ContentError> {
        let body = match location {
            ContentLocation::Remote(url) => self.fetch_remote(url).await?,
            ContentLocation::Local(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|err| ContentError::FetchFailed {
                        location: location.to_string(),
                        reason: err.to_string(),
                    })?
            }
        };

        parse_document(&body).map_err(|source| ContentError::ParseFailed {
            location: location.to_string(),
            source,
        })
    }

    async fn fetch_remote(&self, url: &str) -> Result<Vec<u8>, ContentError> {
        let fetch_failed = |reason: String| ContentError::FetchFailed {
            location: url.to_string(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| fetch_failed(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(fetch_failed(format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| fetch_failed(err.to_string()))?;
        Ok(body.to_vec())
    }
}

/// Parse a rules document from raw JSON bytes.
pub fn parse_document(bytes: &[u8]) -> Result<RulesDocument, serde_json::Error> {
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    const DOC: &str = r#"{"api":{"version":"2.1"},"languages":{"en":{"content":{"title":"Rules"}}},"icons":{}}"#;

    #[test]
    fn parses_addresses() {
        assert_eq!(
            ContentLocation::parse("https://example.com/rules.json"),
            ContentLocation::Remote("https://example.com/rules.json".into())
        );
        assert_eq!(
            ContentLocation::parse("data/rules.json"),
            ContentLocation::Local(PathBuf::from("data/rules.json"))
        );
    }

    #[tokio::test]
    async fn primary_success_skips_secondary() -> Result<()> {
        let dir = tempdir()?;
        let primary = dir.path().join("primary.json");
        fs::write(&primary, DOC)?;
        // The secondary does not exist; touching it would fail the test.
        let source = ContentSource::new(
            ContentLocation::Local(primary.clone()),
            ContentLocation::Local(dir.path().join("missing.json")),
        );

        let resolved = source.resolve().await?;
        assert_eq!(resolved.origin, ContentOrigin::Primary);
        assert_eq!(resolved.location, ContentLocation::Local(primary));
        assert_eq!(resolved.document.api.version, "2.1");
        Ok(())
    }

    #[tokio::test]
    async fn missing_primary_falls_back() -> Result<()> {
        let dir = tempdir()?;
        let secondary = dir.path().join("secondary.json");
        fs::write(&secondary, DOC)?;
        let source = ContentSource::new(
            ContentLocation::Local(dir.path().join("missing.json")),
            ContentLocation::Local(secondary.clone()),
        );

        let resolved = source.resolve().await?;
        assert_eq!(resolved.origin, ContentOrigin::Secondary);
        assert_eq!(resolved.location, ContentLocation::Local(secondary));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_primary_falls_back() -> Result<()> {
        let dir = tempdir()?;
        let primary = dir.path().join("primary.json");
        let secondary = dir.path().join("secondary.json");
        fs::write(&primary, "{ not json")?;
        fs::write(&secondary, DOC)?;
        let source = ContentSource::new(
            ContentLocation::Local(primary),
            ContentLocation::Local(secondary),
        );

        let resolved = source.resolve().await?;
        assert_eq!(resolved.origin, ContentOrigin::Secondary);
        Ok(())
    }

    #[tokio::test]
    async fn both_failing_is_content_unavailable() -> Result<()> {
        let dir = tempdir()?;
        let secondary = dir.path().join("secondary.json");
        fs::write(&secondary, "[]")?;
        let source = ContentSource::new(
            ContentLocation::Local(dir.path().join("missing.json")),
            ContentLocation::Local(secondary),
        );

        let err = source.resolve().await.expect_err("both locations should fail");
        assert!(err.is_terminal());
        match err {
            ContentError::ContentUnavailable { primary, secondary } => {
                assert!(matches!(*primary, ContentError::FetchFailed { .. }));
                assert!(matches!(*secondary, ContentError::ParseFailed { .. }));
                assert!(!primary.is_terminal());
            }
            other => panic!("unexpected error: {other}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn repeated_resolution_is_stable() -> Result<()> {
        let dir = tempdir()?;
        let primary = dir.path().join("primary.json");
        fs::write(&primary, DOC)?;
        let source = ContentSource::new(
            ContentLocation::Local(primary),
            ContentLocation::Local(dir.path().join("missing.json")),
        );

        let first = source.resolve().await?;
        let second = source.resolve().await?;
        assert_eq!(first, second);
        Ok(())
    }
}
