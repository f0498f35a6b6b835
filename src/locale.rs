//! Locale handling.
//!
//! The backend only understands bare two-letter language codes, so any
//! region suffix (`de-AT`, `en_US`) is dropped and the code lowercased.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A normalized two-letter lowercase language code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Normalize `raw` into a locale, or `None` if it is not a usable code.
    pub fn parse(raw: &str) -> Option<Self> {
        let base = raw.trim().split(['-', '_']).next().unwrap_or_default();
        if base.len() == 2 && base.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Self(base.to_ascii_lowercase()))
        } else {
            None
        }
    }

    /// Normalize `raw`, falling back to `default` when it is unusable.
    pub fn parse_or(raw: &str, default: &Locale) -> Self {
        Self::parse(raw).unwrap_or_else(|| default.clone())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self("en".to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Locale::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid locale '{raw}'")))
    }
}
