use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::components::ComponentId;

// =============================================================================
// Configuration errors
// =============================================================================

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid time slot '{label}' in {field}: expected HH:MM")]
    InvalidSlot { field: &'static str, label: String },

    #[error("The 'today' label must not be empty")]
    EmptyTodayLabel,
}

impl ConfigError {
    pub fn invalid_slot(field: &'static str, label: impl Into<String>) -> Self {
        Self::InvalidSlot {
            field,
            label: label.into(),
        }
    }
}

// =============================================================================
// Form errors
// =============================================================================

/// Failures at the edges of the form. Dispatching an event never fails.
#[derive(Error, Debug)]
pub enum FormError {
    #[error("{component} is already wired to a coordinator")]
    AlreadyWired { component: ComponentId },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_slot_display() {
        let err = ConfigError::invalid_slot("today_slots", "25:99");
        let display = err.to_string();
        assert!(display.contains("25:99"));
        assert!(display.contains("today_slots"));
    }

    #[test]
    fn test_already_wired_names_component() {
        let err = FormError::AlreadyWired {
            component: ComponentId::PickupCheckbox,
        };
        assert!(err.to_string().contains("PickupCheckbox"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: FormError = ConfigError::EmptyTodayLabel.into();
        assert!(matches!(err, FormError::Config(ConfigError::EmptyTodayLabel)));
    }
}
