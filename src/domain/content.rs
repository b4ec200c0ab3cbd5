//! Weekly content lookup table.
//!
//! Content is keyed by `(language, week)`. The built-in table is compiled
//! into the binary; a `content.toml` in the home directory can replace whole
//! languages or add new ones. Both are resolved once at startup.

use crate::error::{PregtrackError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

const BUILTIN_CONTENT: &str = include_str!("../../content/weeks.toml");

/// File name of the per-user override inside the home directory
pub const CONTENT_FILE: &str = "content.toml";

pub const FALLBACK_LANGUAGE: &str = "en";

#[derive(Debug, Deserialize)]
struct ContentFile {
    #[serde(default)]
    language: Vec<LanguageContent>,
}

#[derive(Debug, Clone, Deserialize)]
struct LanguageContent {
    code: String,
    #[serde(default)]
    daily_tips: Vec<String>,
    #[serde(default)]
    weeks: Vec<WeekRange>,
}

#[derive(Debug, Clone, Deserialize)]
struct WeekRange {
    from: u32,
    to: u32,
    title: String,
    body: String,
}

/// Rendered content for one week
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekContent {
    pub title: String,
    pub body: String,
}

/// Explicit `(language, week) -> content` table
#[derive(Debug, Clone)]
pub struct ContentTable {
    languages: BTreeMap<String, LanguageContent>,
}

impl ContentTable {
    /// Table compiled into the binary
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_CONTENT)
    }

    /// Built-in table with `<home>/content.toml` merged over it
    pub fn load(home: &Path) -> Result<Self> {
        let mut table = Self::builtin()?;

        let override_path = home.join(CONTENT_FILE);
        if override_path.exists() {
            let contents = fs::read_to_string(&override_path)?;
            let overrides = Self::parse(&contents)?;
            tracing::debug!(
                path = %override_path.display(),
                languages = overrides.languages.len(),
                "merging content overrides"
            );
            table.languages.extend(overrides.languages);
        }

        Ok(table)
    }

    /// Parse a content table from TOML text
    pub fn parse(contents: &str) -> Result<Self> {
        let file: ContentFile = toml::from_str(contents)
            .map_err(|e| PregtrackError::Content(format!("Failed to parse content: {}", e)))?;

        let mut languages = BTreeMap::new();
        for language in file.language {
            if let Some(range) = language.weeks.iter().find(|r| r.from > r.to) {
                return Err(PregtrackError::Content(format!(
                    "Invalid week range {}..{} for language '{}'",
                    range.from, range.to, language.code
                )));
            }
            languages.insert(language.code.to_lowercase(), language);
        }

        Ok(ContentTable { languages })
    }

    pub fn languages(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }

    /// Content for a pregnancy week, falling back to English, then to a
    /// generic title
    pub fn week(&self, language: &str, week: u32) -> WeekContent {
        let found = [language.to_lowercase().as_str(), FALLBACK_LANGUAGE]
            .iter()
            .filter_map(|code| self.languages.get(*code))
            .find_map(|lang| lang.weeks.iter().find(|r| (r.from..=r.to).contains(&week)))
            .cloned();

        match found {
            Some(range) => WeekContent {
                title: render(&range.title, week),
                body: render(&range.body, week),
            },
            None => WeekContent {
                title: format!("Week {}", week),
                body: "Open the app to see this week's progress.".to_string(),
            },
        }
    }

    /// Tip for the given day index, rotating through the language's list
    pub fn daily_tip(&self, language: &str, day: u32) -> String {
        [language.to_lowercase().as_str(), FALLBACK_LANGUAGE]
            .iter()
            .filter_map(|code| self.languages.get(*code))
            .find(|lang| !lang.daily_tips.is_empty())
            .map(|lang| lang.daily_tips[day as usize % lang.daily_tips.len()].clone())
            .unwrap_or_else(|| "Take a moment for yourself today.".to_string())
    }
}

fn render(template: &str, week: u32) -> String {
    template.replace("{WEEK}", &week.to_string())
}
