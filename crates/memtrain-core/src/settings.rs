//! Session settings parsed from the table directive and command-line overrides.
//!
//! A directive is a single-cell row such as `settings: !level1, nquestions=5`.
//! All whitespace is removed before parsing, and labels are case-insensitive.

use serde::{Deserialize, Serialize};

use crate::error::{MemtrainError, Result};
use crate::model::Level;

/// Prefix that marks a single-cell row as a settings directive.
pub const DIRECTIVE_PREFIX: &str = "settings:";

/// Typed session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Session title, taken from a non-directive single-cell row.
    pub title: String,
    /// Level 1: multiple choice.
    pub level1: bool,
    /// Level 2: free entry with hints.
    pub level2: bool,
    /// Level 3: free entry without assistance.
    pub level3: bool,
    /// Accept shortest unambiguous prefixes in free-entry levels.
    pub alias: bool,
    /// Number of questions to ask; 0 means one per cue/response pair.
    pub nquestions: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: String::new(),
            level1: true,
            level2: true,
            level3: true,
            alias: true,
            nquestions: 0,
        }
    }
}

/// Returns `true` if the cell, ignoring case and whitespace, starts with `settings:`.
pub fn is_directive(cell: &str) -> bool {
    let compact: String = cell.split_whitespace().collect();
    compact
        .get(..DIRECTIVE_PREFIX.len())
        .is_some_and(|p| p.eq_ignore_ascii_case(DIRECTIVE_PREFIX))
}

impl Settings {
    /// Apply a `settings:` directive on top of the current values.
    ///
    /// Empty tokens (e.g. from a trailing comma) are ignored. Any other token
    /// that is not `label`, `!label` or `label=N` for a known label fails with
    /// [`MemtrainError::Configuration`].
    pub fn apply_directive(&mut self, directive: &str) -> Result<()> {
        let compact: String = directive.split_whitespace().collect();
        if !is_directive(&compact) {
            return Err(MemtrainError::Configuration(format!(
                "'{compact}': settings directive must start with '{DIRECTIVE_PREFIX}'"
            )));
        }

        for token in compact[DIRECTIVE_PREFIX.len()..].split(',') {
            if token.is_empty() {
                continue;
            }
            self.apply_token(token)?;
        }

        tracing::debug!(settings = ?self, "applied settings directive");
        Ok(())
    }

    fn apply_token(&mut self, token: &str) -> Result<()> {
        if let Some(label) = token.strip_prefix('!') {
            let flag = self
                .flag_mut(label)
                .ok_or_else(|| MemtrainError::invalid_setting(token))?;
            *flag = false;
        } else if let Some((label, value)) = token.split_once('=') {
            if !label.eq_ignore_ascii_case("nquestions") {
                return Err(MemtrainError::invalid_setting(token));
            }
            self.nquestions = value
                .parse()
                .map_err(|_| MemtrainError::invalid_setting(token))?;
        } else {
            let flag = self
                .flag_mut(token)
                .ok_or_else(|| MemtrainError::invalid_setting(token))?;
            *flag = true;
        }
        Ok(())
    }

    fn flag_mut(&mut self, label: &str) -> Option<&mut bool> {
        match label.to_ascii_lowercase().as_str() {
            "level1" => Some(&mut self.level1),
            "level2" => Some(&mut self.level2),
            "level3" => Some(&mut self.level3),
            "alias" => Some(&mut self.alias),
            _ => None,
        }
    }

    /// Set the title from a title row's text.
    pub fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    /// Apply command-line overrides after the file settings have been loaded.
    ///
    /// Selecting a level restricts the session to that level alone and fails
    /// if the table disabled it. A negative question count is rejected; a
    /// count of 0 keeps the file's value.
    pub fn apply_overrides(&mut self, level: Option<&str>, nquestions: Option<i64>) -> Result<()> {
        if let Some(level) = level {
            let level: Level = level.trim().parse()?;
            let enabled = match level {
                Level::MultipleChoice => self.level1,
                Level::Hinted => self.level2,
                Level::Unassisted => self.level3,
            };
            if !enabled {
                return Err(MemtrainError::Configuration(format!(
                    "'{}': level {} functionality has been disabled for this table",
                    level.number(),
                    level.number()
                )));
            }
            self.level1 = level == Level::MultipleChoice;
            self.level2 = level == Level::Hinted;
            self.level3 = level == Level::Unassisted;
        }

        if let Some(n) = nquestions {
            let n = usize::try_from(n).map_err(|_| {
                MemtrainError::Configuration(format!("'{n}': invalid number of questions"))
            })?;
            if n != 0 {
                self.nquestions = n;
            }
        }

        Ok(())
    }

    /// The level the session runs at: the first enabled of 1, 2, 3.
    pub fn level(&self) -> Option<Level> {
        if self.level1 {
            Some(Level::MultipleChoice)
        } else if self.level2 {
            Some(Level::Hinted)
        } else if self.level3 {
            Some(Level::Unassisted)
        } else {
            None
        }
    }

    /// Label/parameter pairs for display.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("level1", self.level1.to_string()),
            ("level2", self.level2.to_string()),
            ("level3", self.level3.to_string()),
            ("alias", self.alias.to_string()),
            ("nquestions", self.nquestions.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negated_flag_and_integer() {
        let mut settings = Settings::default();
        settings
            .apply_directive("settings:!level1,nquestions=5")
            .unwrap();
        assert!(!settings.level1);
        assert!(settings.level2);
        assert!(settings.level3);
        assert_eq!(settings.nquestions, 5);
    }

    #[test]
    fn whitespace_and_case_are_ignored() {
        let mut settings = Settings::default();
        settings
            .apply_directive("  Settings : ! Alias , Level1 ")
            .unwrap();
        assert!(!settings.alias);
        assert!(settings.level1);
    }

    #[test]
    fn trailing_comma_is_ignored() {
        let mut settings = Settings::default();
        settings.apply_directive("settings:!level3,").unwrap();
        assert!(!settings.level3);
    }

    #[test]
    fn unknown_label_is_rejected() {
        let mut settings = Settings::default();
        let err = settings.apply_directive("settings:level9").unwrap_err();
        assert!(matches!(err, MemtrainError::Configuration(_)));
        assert!(err.to_string().contains("level9"));
    }

    #[test]
    fn malformed_integer_is_rejected() {
        let mut settings = Settings::default();
        let err = settings.apply_directive("settings:nquestions=five").unwrap_err();
        assert!(err.to_string().contains("nquestions=five"));

        let err = settings.apply_directive("settings:nquestions=-2").unwrap_err();
        assert!(matches!(err, MemtrainError::Configuration(_)));
    }

    #[test]
    fn flag_with_value_is_rejected() {
        let mut settings = Settings::default();
        assert!(settings.apply_directive("settings:level1=1").is_err());
        assert!(settings.apply_directive("settings:!nquestions").is_err());
    }

    #[test]
    fn directive_detection() {
        assert!(is_directive("SETTINGS: level1"));
        assert!(is_directive("set tings:"));
        assert!(!is_directive("French capitals"));
    }

    #[test]
    fn level_override_selects_single_level() {
        let mut settings = Settings::default();
        settings.apply_overrides(Some("2"), None).unwrap();
        assert!(!settings.level1);
        assert!(settings.level2);
        assert!(!settings.level3);
        assert_eq!(settings.level(), Some(Level::Hinted));
    }

    #[test]
    fn level_override_of_disabled_level_fails() {
        let mut settings = Settings::default();
        settings.apply_directive("settings:!level1").unwrap();
        let err = settings.apply_overrides(Some("1"), None).unwrap_err();
        assert!(matches!(err, MemtrainError::Configuration(_)));
    }

    #[test]
    fn invalid_level_override_fails() {
        let mut settings = Settings::default();
        assert!(settings.apply_overrides(Some("4"), None).is_err());
    }

    #[test]
    fn negative_question_count_fails() {
        let mut settings = Settings::default();
        let err = settings.apply_overrides(None, Some(-1)).unwrap_err();
        assert!(matches!(err, MemtrainError::Configuration(_)));
        settings.apply_overrides(None, Some(7)).unwrap();
        assert_eq!(settings.nquestions, 7);
    }

    #[test]
    fn zero_question_count_keeps_file_value() {
        let mut settings = Settings::default();
        settings.apply_directive("settings: nquestions=5").unwrap();
        settings.apply_overrides(None, Some(0)).unwrap();
        assert_eq!(settings.nquestions, 5);
    }

    #[test]
    fn default_level_is_first_enabled() {
        let mut settings = Settings::default();
        assert_eq!(settings.level(), Some(Level::MultipleChoice));
        settings.apply_directive("settings:!level1,!level2").unwrap();
        assert_eq!(settings.level(), Some(Level::Unassisted));
        settings.apply_directive("settings:!level3").unwrap();
        assert_eq!(settings.level(), None);
    }
}
