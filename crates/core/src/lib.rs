#![warn(clippy::all, missing_docs)]

//! Core domain logic for the NextWave terminal landing page.
//!
//! This crate hosts the configuration handling, the static landing and
//! privacy copy, platform selection, and the wakethieving rules pipeline
//! used by the terminal UI and any future frontends.

pub mod config;
pub mod landing;
pub mod platform;
pub mod privacy;
pub mod rules;

pub use config::AppConfig;
pub use platform::{Platform, PlatformPreference};
pub use rules::{ContentSource, RulesState, RulesView};
