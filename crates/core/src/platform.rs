//! Target platform selection.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static IOS_DEVICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)iphone|ipad|ipod|\bios\b").expect("invalid iOS device regex"));
static ANDROID_DEVICE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)android").expect("invalid Android device regex"));

/// Mobile platform whose copy is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Apple iOS, the platform the app ships on today.
    #[default]
    Ios,
    /// Android, announced but not yet released.
    Android,
}

impl Platform {
    /// All platforms in switch order.
    pub const ALL: [Platform; 2] = [Platform::Ios, Platform::Android];

    /// Label used on switches and badges.
    pub fn label(self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Android => "Android",
        }
    }

    /// The other platform.
    pub fn toggle(self) -> Self {
        match self {
            Platform::Ios => Platform::Android,
            Platform::Android => Platform::Ios,
        }
    }

    /// Guess the platform from a device descriptor such as a user agent
    /// string or an OS name. Returns `None` when nothing matches.
    pub fn detect(descriptor: &str) -> Option<Self> {
        if IOS_DEVICE_RE.is_match(descriptor) {
            Some(Platform::Ios)
        } else if ANDROID_DEVICE_RE.is_match(descriptor) {
            Some(Platform::Android)
        } else {
            None
        }
    }
}

/// Platform setting as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformPreference {
    /// Detect from the running device, defaulting to iOS.
    #[default]
    Auto,
    /// Always start on iOS.
    Ios,
    /// Always start on Android.
    Android,
}

impl PlatformPreference {
    /// Resolve the preference into a concrete platform.
    pub fn resolve(self, descriptor: &str) -> Platform {
        match self {
            PlatformPreference::Ios => Platform::Ios,
            PlatformPreference::Android => Platform::Android,
            PlatformPreference::Auto => Platform::detect(descriptor).unwrap_or_default(),
        }
    }
}
