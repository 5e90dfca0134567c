use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Site locale. The CMS stores one translation of every project per language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Uk,
}

impl Language {
    /// URL path segment / message catalog key ("en", "uk").
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Uk => "uk",
        }
    }

    /// Language enum value understood by the CMS GraphQL schema.
    #[must_use]
    pub fn cms_code(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Uk => "UK",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            // "ua" is the country code people keep typing for Ukrainian.
            "uk" | "ua" => Ok(Self::Uk),
            _ => Err(ProtocolError::UnknownLanguage(s.to_string())),
        }
    }
}
