use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//
// ─── AGE GROUP ─────────────────────────────────────────────────────────────────
//

/// Developmental stage used to tag and filter content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "pre-birth")]
    PreBirth,
    #[serde(rename = "0-2")]
    Infant,
    #[serde(rename = "3-5")]
    Preschool,
    #[serde(rename = "6-10")]
    School,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 4] = [
        AgeGroup::PreBirth,
        AgeGroup::Infant,
        AgeGroup::Preschool,
        AgeGroup::School,
    ];

    /// Derives the bracket for a child's age in years.
    ///
    /// Ages above ten keep the preschool bracket, which is also the default
    /// for a fresh profile.
    #[must_use]
    pub fn for_age(age: u8) -> Self {
        match age {
            0..=2 => AgeGroup::Infant,
            3..=5 => AgeGroup::Preschool,
            6..=10 => AgeGroup::School,
            _ => AgeGroup::Preschool,
        }
    }

    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            AgeGroup::PreBirth => "pre-birth",
            AgeGroup::Infant => "0-2",
            AgeGroup::Preschool => "3-5",
            AgeGroup::School => "6-10",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::PreBirth => "Pre-birth",
            AgeGroup::Infant => "0-2 years",
            AgeGroup::Preschool => "3-5 years",
            AgeGroup::School => "6-10 years",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            AgeGroup::PreBirth => "👶",
            AgeGroup::Infant => "🍼",
            AgeGroup::Preschool => "🧸",
            AgeGroup::School => "🎒",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for AgeGroup {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgeGroup::ALL
            .into_iter()
            .find(|group| group.id() == s.trim())
            .ok_or_else(|| UnknownVariant::new("age group", s))
    }
}

//
// ─── LANGUAGE ──────────────────────────────────────────────────────────────────
//

/// Interface and speech language preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Es, Language::Fr];

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
        }
    }

    /// BCP 47 tag handed to speech engines.
    #[must_use]
    pub fn speech_tag(self) -> &'static str {
        match self {
            Language::En => "en-US",
            Language::Es => "es-ES",
            Language::Fr => "fr-FR",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Español",
            Language::Fr => "Français",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == normalized)
            .ok_or_else(|| UnknownVariant::new("language", s))
    }
}

/// Returned when parsing a closed set of codes fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {raw}")]
pub struct UnknownVariant {
    kind: &'static str,
    raw: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, raw: &str) -> Self {
        Self {
            kind,
            raw: raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_brackets_follow_profile_rules() {
        assert_eq!(AgeGroup::for_age(1), AgeGroup::Infant);
        assert_eq!(AgeGroup::for_age(2), AgeGroup::Infant);
        assert_eq!(AgeGroup::for_age(3), AgeGroup::Preschool);
        assert_eq!(AgeGroup::for_age(5), AgeGroup::Preschool);
        assert_eq!(AgeGroup::for_age(6), AgeGroup::School);
        assert_eq!(AgeGroup::for_age(10), AgeGroup::School);
        assert_eq!(AgeGroup::for_age(13), AgeGroup::Preschool);
    }

    #[test]
    fn age_group_parses_catalog_ids() {
        assert_eq!("6-10".parse::<AgeGroup>().unwrap(), AgeGroup::School);
        assert_eq!("pre-birth".parse::<AgeGroup>().unwrap(), AgeGroup::PreBirth);
        assert!("11-15".parse::<AgeGroup>().is_err());
    }

    #[test]
    fn language_parse_is_case_insensitive() {
        assert_eq!("FR".parse::<Language>().unwrap(), Language::Fr);
        assert_eq!(Language::Es.speech_tag(), "es-ES");
        let err = "de".parse::<Language>().unwrap_err();
        assert_eq!(err.to_string(), "unknown language: de");
    }
}
