//! Languages the mutation sensors analyze.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A JVM language PIT can mutate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Java,
    Kotlin,
}

impl Language {
    /// All supported languages.
    pub fn all() -> &'static [Language] {
        &[Language::Java, Language::Kotlin]
    }

    /// The language key used in repository keys (`mutation.analysis.java`).
    pub fn key(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kotlin",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Java => "Java",
            Self::Kotlin => "Kotlin",
        }
    }

    /// File extension of source files, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kt",
        }
    }

    /// Conventional main source root relative to a module base directory.
    pub fn main_source_root(&self) -> &'static str {
        match self {
            Self::Java => "src/main/java",
            Self::Kotlin => "src/main/kotlin",
        }
    }

    /// Conventional test source root relative to a module base directory.
    pub fn test_source_root(&self) -> &'static str {
        match self {
            Self::Java => "src/test/java",
            Self::Kotlin => "src/test/kotlin",
        }
    }

    /// Detect the language from a file path's extension.
    pub fn from_path(path: &str) -> Option<Language> {
        let ext = path.rsplit_once('.').map(|(_, ext)| ext)?;
        Language::all().iter().copied().find(|l| l.extension() == ext)
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "java" => Ok(Self::Java),
            "kotlin" | "kt" => Ok(Self::Kotlin),
            other => Err(format!("unsupported language '{other}'")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
