use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::scenario::Scenario;

pub const TODAY: &str = "Сьогодні";

// =============================================================================
// Slot rules
// =============================================================================

/// Which time slots the coordinator offers for a selected date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlotRules {
    pub today_label: String,
    pub today_slots: Vec<String>,
    pub other_day_slots: Vec<String>,
}

impl Default for SlotRules {
    fn default() -> Self {
        Self {
            today_label: TODAY.to_string(),
            today_slots: labels(&["12:00", "14:00", "16:00"]),
            other_day_slots: labels(&["10:00", "12:00", "15:00", "18:00"]),
        }
    }
}

impl SlotRules {
    /// Anything other than the exact today label counts as another day.
    pub fn slots_for(&self, date: &str) -> &[String] {
        if date == self.today_label {
            &self.today_slots
        } else {
            &self.other_day_slots
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.today_label.trim().is_empty() {
            return Err(ConfigError::EmptyTodayLabel);
        }
        check_slots("today_slots", &self.today_slots)?;
        check_slots("other_day_slots", &self.other_day_slots)
    }
}

fn labels(slots: &[&str]) -> Vec<String> {
    slots.iter().map(|slot| slot.to_string()).collect()
}

fn slot_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("valid slot pattern"))
}

fn check_slots(field: &'static str, slots: &[String]) -> Result<(), ConfigError> {
    match slots.iter().find(|slot| !slot_pattern().is_match(slot)) {
        Some(bad) => Err(ConfigError::invalid_slot(field, bad.as_str())),
        None => Ok(()),
    }
}

// =============================================================================
// Scenario files
// =============================================================================

impl Scenario {
    /// Parses a TOML scenario. Missing rules fall back to the defaults and a
    /// missing `steps` list falls back to the demonstration sequence.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.rules.validate()?;
        log::debug!("loaded scenario with {} steps", scenario.steps.len());
        Ok(scenario)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}
