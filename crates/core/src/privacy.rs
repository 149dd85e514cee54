//! Privacy policy copy.

use crate::landing::TextBlock;

/// Policy title.
pub const TITLE: &str = "Privacy Policy for Next Wave";
/// Date the current policy took effect.
pub const EFFECTIVE_DATE: &str = "December 14, 2024";

/// A numbered policy section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolicySection {
    /// Section heading without its number.
    pub heading: &'static str,
    /// Section body.
    pub body: &'static [TextBlock],
}

/// Policy sections in order. Headings are numbered from one.
pub const SECTIONS: [PolicySection; 10] = [
    PolicySection {
        heading: "Introduction",
        body: &[TextBlock::Paragraph(
            "Next Wave (Pumpfoiling Community) is committed to protecting your privacy. This \
             Privacy Policy explains how we handle information in relation to our iOS application.",
        )],
    },
    PolicySection {
        heading: "Information We Don't Collect",
        body: &[
            TextBlock::Paragraph(
                "Next Wave is designed with privacy in mind. We do not collect, store, or transmit \
                 any personal data. Specifically:",
            ),
            TextBlock::Bullets(&[
                "We do not collect personal information",
                "We do not track your location",
                "We do not use analytics services",
                "We do not store any user data on external servers",
                "We do not use third-party services",
                "We do not create user profiles",
            ]),
        ],
    },
    PolicySection {
        heading: "Local Device Storage",
        body: &[
            TextBlock::Paragraph("The app stores the following data locally on your device only:"),
            TextBlock::Bullets(&["Your notification settings", "Scheduled local notifications"]),
            TextBlock::Paragraph(
                "This data never leaves your device and is only used to provide the app's core \
                 functionality.",
            ),
        ],
    },
    PolicySection {
        heading: "Notifications",
        body: &[
            TextBlock::Paragraph("If you enable notifications:"),
            TextBlock::Bullets(&[
                "Notifications are scheduled and managed locally on your device",
                "No notification data is transmitted to external servers",
                "You can disable notifications at any time through your device settings",
            ]),
        ],
    },
    PolicySection {
        heading: "Schedule Data",
        body: &[
            TextBlock::Paragraph("The boat schedule data is:"),
            TextBlock::Bullets(&[
                "Included in the app installation",
                "Public information",
                "Updated through regular app updates",
                "Not personalized or modified based on usage",
            ]),
        ],
    },
    PolicySection {
        heading: "Children's Privacy",
        body: &[TextBlock::Paragraph(
            "Our app does not collect any personal information from anyone, including children \
             under 13.",
        )],
    },
    PolicySection {
        heading: "Changes to This Policy",
        body: &[TextBlock::Paragraph(
            "We may update this Privacy Policy from time to time. We will notify you of any \
             changes by posting the new Privacy Policy in the App Store listing and updating the \
             \"Effective Date\" at the top of this policy.",
        )],
    },
    PolicySection {
        heading: "Contact Us",
        body: &[TextBlock::Paragraph(
            "If you have any questions about this Privacy Policy, please contact us at: \
             contact@nextwaveapp.ch",
        )],
    },
    PolicySection {
        heading: "Your Rights",
        body: &[TextBlock::Paragraph(
            "Since we don't collect any personal data, there is no personal information to \
             access, modify, or delete. You have full control over any app-related data through \
             your device's settings.",
        )],
    },
    PolicySection {
        heading: "Data Protection",
        body: &[TextBlock::Paragraph(
            "All app functionality operates locally on your device, protected by your device's \
             built-in security features.",
        )],
    },
];

/// Headings as displayed, e.g. `"1. Introduction"`.
pub fn numbered_headings() -> Vec<String> {
    SECTIONS
        .iter()
        .enumerate()
        .map(|(idx, section)| format!("{}. {}", idx + 1, section.heading))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landing::CONTACT_EMAIL;

    #[test]
    fn headings_are_numbered_in_order() {
        let headings = numbered_headings();
        assert_eq!(headings.len(), 10);
        assert_eq!(headings[0], "1. Introduction");
        assert_eq!(headings[9], "10. Data Protection");
    }

    #[test]
    fn contact_section_names_the_support_address() {
        let contact = SECTIONS
            .iter()
            .find(|section| section.heading == "Contact Us")
            .expect("contact section");
        assert!(matches!(
            contact.body[0],
            TextBlock::Paragraph(text) if text.contains(CONTACT_EMAIL)
        ));
    }
}
