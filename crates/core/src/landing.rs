//! Static landing page copy.
//!
//! Everything here is fixed text; only the selected [`Platform`] changes
//! which entries are returned.

use crate::platform::Platform;

/// Name of the app.
pub const APP_NAME: &str = "NextWave";
/// Contact address used across the page.
pub const CONTACT_EMAIL: &str = "contact@nextwaveapp.ch";
/// App Store listing.
pub const APP_STORE_URL: &str = "https://apps.apple.com/ch/app/nextwave/id6739363035";
/// Google Play listing (not yet live).
pub const GOOGLE_PLAY_URL: &str = "https://play.google.com/store/apps/details?id=com.nextwave.app";

/// A piece of rich copy: either a paragraph or a bullet list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextBlock {
    /// A paragraph of prose.
    Paragraph(&'static str),
    /// An unordered list.
    Bullets(&'static [&'static str]),
}

/// Navigable page sections in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// Hero with the platform switch.
    Home,
    /// Feature grid.
    Features,
    /// App screenshots.
    Screenshots,
    /// Wakethieving rules.
    Rules,
    /// Frequently asked questions.
    Faq,
    /// Store links.
    Download,
}

impl Section {
    /// All sections in page order.
    pub const ALL: [Section; 6] = [
        Section::Home,
        Section::Features,
        Section::Screenshots,
        Section::Rules,
        Section::Faq,
        Section::Download,
    ];

    /// Label used in the navigation bar.
    pub fn nav_label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Features => "Features",
            Section::Screenshots => "Screenshots",
            Section::Rules => "Rules",
            Section::Faq => "FAQ",
            Section::Download => "Download",
        }
    }

    /// Section heading and lead text. The rules heading comes from the
    /// rules document, so it has none here.
    pub fn heading(self) -> Option<(&'static str, &'static str)> {
        match self {
            Section::Home => None,
            Section::Features => Some((
                "Key Features",
                "Discover how NextWave makes wake foiling easier and more enjoyable.",
            )),
            Section::Screenshots => Some((
                "See the app in action",
                "Take a tour through NextWave's intuitive interface and powerful features.",
            )),
            Section::Rules => None,
            Section::Faq => Some((
                "Frequently asked questions",
                "Find answers to common questions about NextWave.",
            )),
            Section::Download => Some((
                "Ready to catch your next wave?",
                "Upgrade your foiling experience! Download NextWave now and never miss the perfect wake.",
            )),
        }
    }

    /// Position within [`Section::ALL`].
    pub fn index(self) -> usize {
        Section::ALL
            .iter()
            .position(|section| *section == self)
            .unwrap_or(0)
    }

    /// Section `delta` steps away, wrapping around.
    pub fn offset(self, delta: isize) -> Self {
        let len = Section::ALL.len() as isize;
        let next = (self.index() as isize + delta).rem_euclid(len);
        Section::ALL[next as usize]
    }
}

/// Hero copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hero {
    /// App name.
    pub name: &'static str,
    /// One-sentence pitch.
    pub tagline: &'static str,
    /// Prompt above the platform switch.
    pub switch_prompt: &'static str,
}

/// Hero section copy.
pub fn hero() -> Hero {
    Hero {
        name: APP_NAME,
        tagline: "NextWave helps wake foilers across Swiss lakes by providing real-time boat \
                  schedules, ensuring you never miss the perfect wake for your foiling session.",
        switch_prompt: "Select your device",
    }
}

/// A feature tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    /// Tile heading.
    pub title: &'static str,
    /// Tile body.
    pub description: &'static str,
    /// Single-cell glyph standing in for the icon.
    pub glyph: &'static str,
}

const STATION_SELECTION: Feature = Feature {
    title: "Station Selection",
    description: "Easily find and choose the best wake foiling spots on Swiss lakes. Explore an \
                  interactive map with all available stations or browse a convenient list.",
    glyph: "⌖",
};

const BOAT_TRACKING: Feature = Feature {
    title: "Real-time Boat Tracking",
    description: "Never miss a wave with real-time boat schedule tracking. Get accurate \
                  departure times and locations for all boats on Swiss lakes.",
    glyph: "◷",
};

static IOS_FEATURES: [Feature; 4] = [
    STATION_SELECTION,
    BOAT_TRACKING,
    Feature {
        title: "Smart Wave Notifications",
        description: "Customize your alerts with flexible notification times - 3, 5, 10, or 15 \
                      minutes before the perfect wave arrives. Stay prepared and never miss a session.",
        glyph: "♪",
    },
    Feature {
        title: "Weather Info",
        description: "Get detailed weather conditions including temperature, wind speed and \
                      direction, all in one glance. Make informed decisions about your foiling sessions.",
        glyph: "☁",
    },
];

static ANDROID_FEATURES: [Feature; 3] = [
    STATION_SELECTION,
    BOAT_TRACKING,
    Feature {
        title: "Favorites",
        description: "Save your most frequented spots for quick access. Mark stations as \
                      favorites and access them instantly from the home screen for faster wake tracking.",
        glyph: "★",
    },
];

/// Feature tiles for a platform.
pub fn features(platform: Platform) -> &'static [Feature] {
    match platform {
        Platform::Ios => &IOS_FEATURES,
        Platform::Android => &ANDROID_FEATURES,
    }
}

/// Screenshot reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screenshot {
    /// Asset path relative to the site root.
    pub asset: &'static str,
    /// Alt text.
    pub alt: &'static str,
}

/// Screenshot shown for a platform.
pub fn screenshot(platform: Platform) -> Screenshot {
    match platform {
        Platform::Ios => Screenshot {
            asset: "/app-interface-ios.png",
            alt: "NextWave iOS App Interface",
        },
        Platform::Android => Screenshot {
            asset: "/app-interface-android.png",
            alt: "NextWave Android App Interface",
        },
    }
}

/// Donation call-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportNote {
    /// Call-out copy.
    pub text: &'static str,
    /// Button label.
    pub link_label: &'static str,
    /// Donation page.
    pub url: &'static str,
}

/// Buy-me-a-coffee call-out.
pub fn support() -> SupportNote {
    SupportNote {
        text: "NextWave is completely free. If you enjoy using the app and would like to support \
               its development, you can buy me a coffee. Thank you!",
        link_label: "Buy Me A Coffee",
        url: "https://www.buymeacoffee.com/federi",
    }
}

/// A question with its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Faq {
    /// The question, also used as the entry's identity.
    pub question: &'static str,
    /// Answer blocks.
    pub answer: &'static [TextBlock],
}

const COMMON_FAQS: [Faq; 4] = [
    Faq {
        question: "What devices is NextWave compatible with?",
        answer: &[TextBlock::Paragraph(
            "NextWave is compatible with iOS devices running iOS 17.6 or later. Android support \
             will not be available. Sourcecode is available on GitHub \
             (https://github.com/pfederi/Next-Wave) if you want to build it yourself.",
        )],
    },
    Faq {
        question: "What data does NextWave collect?",
        answer: &[
            TextBlock::Paragraph("NextWave is privacy-focused:"),
            TextBlock::Bullets(&[
                "No tracking or analytics",
                "No personal data collection",
                "All data stays on your device",
                "Location data is only used locally and never stored or shared",
            ]),
        ],
    },
    Faq {
        question: "Can I save my favorite wake spots?",
        answer: &[TextBlock::Paragraph(
            "Yes! You can store up to 5 favorite stations, and the nearest station is \
             automatically displayed.",
        )],
    },
    Faq {
        question: "Why are no departure times showing?",
        answer: &[TextBlock::Paragraph(
            "If you're not seeing any departure times, this might be because the \
             transport.opendata.ch API service is temporarily unavailable. This is a third-party \
             service that NextWave depends on to show departure times. When this happens, you'll \
             see an error message, and there's nothing else to do but wait until the service is \
             back online.",
        )],
    },
];

const LOCATION_QUESTION: &str = "Do I need to allow location access?";

const IOS_LOCATION_FAQ: Faq = Faq {
    question: LOCATION_QUESTION,
    answer: &[
        TextBlock::Paragraph("No, but with location access enabled, you can:"),
        TextBlock::Bullets(&[
            "See your position on the map",
            "Use the location tracking button",
            "Get the nearest station displayed automatically",
        ]),
        TextBlock::Paragraph(
            "If you deny location access, these features will be disabled, but the app remains \
             fully functional.",
        ),
    ],
};

const ANDROID_LOCATION_FAQ: Faq = Faq {
    question: LOCATION_QUESTION,
    answer: &[
        TextBlock::Paragraph("No, but with location access enabled, you can:"),
        TextBlock::Bullets(&["Get the nearest station displayed automatically"]),
        TextBlock::Paragraph(
            "If you deny location access, this feature will be disabled, but the app remains \
             fully functional.",
        ),
    ],
};

const WEATHER_FAQ: Faq = Faq {
    question: "How does the weather integration work?",
    answer: &[TextBlock::Paragraph(
        "NextWave uses the OpenWeather API to provide live weather data for your session. You \
         can enable or disable the weather feature in the settings.",
    )],
};

const IOS_FAQS: [Faq; 2] = [
    Faq {
        question: "How do smart notifications work?",
        answer: &[TextBlock::Paragraph(
            "You can set alerts by swiping left on a wave. Optionally, you can set a notification \
             time in the settings for 3, 5, 10, or 15 minutes before a wake arrives, ensuring \
             you're in the right spot at the right time.",
        )],
    },
    WEATHER_FAQ,
];

const ANDROID_FAQS: [Faq; 1] = [WEATHER_FAQ];

const SUPPORT_FAQ: Faq = Faq {
    question: "Where can I get support?",
    answer: &[TextBlock::Paragraph(
        "For questions or issues, please contact contact@nextwaveapp.ch",
    )],
};

/// FAQ entries for a platform: common questions, the location question,
/// platform questions, and support last.
pub fn faqs(platform: Platform) -> Vec<Faq> {
    let (location, specific): (Faq, &[Faq]) = match platform {
        Platform::Ios => (IOS_LOCATION_FAQ, &IOS_FAQS[..]),
        Platform::Android => (ANDROID_LOCATION_FAQ, &ANDROID_FAQS[..]),
    };

    let mut entries = COMMON_FAQS.to_vec();
    entries.push(location);
    entries.extend_from_slice(specific);
    entries.push(SUPPORT_FAQ);
    entries
}

/// A store badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadLink {
    /// Platform served by the store.
    pub platform: Platform,
    /// Badge text.
    pub label: &'static str,
    /// Store listing.
    pub url: &'static str,
    /// The listing is not live yet and must not be followed.
    pub coming_soon: bool,
    /// Drawn at full strength; the other platform's badge is dimmed.
    pub highlighted: bool,
}

/// Store badges, App Store first.
pub fn downloads(selected: Platform) -> [DownloadLink; 2] {
    [
        DownloadLink {
            platform: Platform::Ios,
            label: "Download on the App Store",
            url: APP_STORE_URL,
            coming_soon: false,
            highlighted: selected == Platform::Ios,
        },
        DownloadLink {
            platform: Platform::Android,
            label: "Get it on Google Play",
            url: GOOGLE_PLAY_URL,
            coming_soon: true,
            highlighted: selected == Platform::Android,
        },
    ]
}

/// Footer copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FooterCopy {
    /// Link to the privacy policy.
    pub privacy_label: &'static str,
    /// Studio credit.
    pub credit: &'static str,
}

/// Page footer.
pub fn footer() -> FooterCopy {
    FooterCopy {
        privacy_label: "Privacy Policy",
        credit: "Made with ♥ by Lakeshore Studios",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_sets_differ_per_platform() {
        let ios: Vec<_> = features(Platform::Ios).iter().map(|f| f.title).collect();
        let android: Vec<_> = features(Platform::Android).iter().map(|f| f.title).collect();
        assert_eq!(ios.len(), 4);
        assert_eq!(android, ["Station Selection", "Real-time Boat Tracking", "Favorites"]);
        assert!(ios.contains(&"Weather Info"));
    }

    #[test]
    fn support_question_is_always_last() {
        for platform in Platform::ALL {
            let entries = faqs(platform);
            assert_eq!(entries.last().map(|faq| faq.question), Some(SUPPORT_FAQ.question));
            assert_eq!(entries[4].question, LOCATION_QUESTION);
        }
        assert_eq!(faqs(Platform::Ios).len(), 8);
        assert_eq!(faqs(Platform::Android).len(), 7);
    }

    #[test]
    fn location_answer_depends_on_platform() {
        let ios = faqs(Platform::Ios)[4];
        let android = faqs(Platform::Android)[4];
        assert_ne!(ios.answer, android.answer);
        assert!(matches!(ios.answer[1], TextBlock::Bullets(items) if items.len() == 3));
    }

    #[test]
    fn download_badges_follow_selection() {
        let [app_store, play] = downloads(Platform::Android);
        assert!(!app_store.highlighted);
        assert!(play.highlighted);
        assert!(play.coming_soon);
        assert!(!app_store.coming_soon);
    }

    #[test]
    fn section_offset_wraps() {
        assert_eq!(Section::Home.offset(-1), Section::Download);
        assert_eq!(Section::Download.offset(1), Section::Home);
        assert_eq!(Section::Features.offset(2), Section::Rules);
        assert_eq!(Section::Rules.index(), 3);
    }
}
