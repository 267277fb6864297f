//! Suggestion engine configuration.
//!
//! # Invariants
//! - A validated config has finite, non-negative weights and non-zero limits,
//!   which keeps every produced score non-negative.

use crate::suggest::scorer::ScoringWeights;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_NOTE_LIMIT: usize = 5;
pub const DEFAULT_TEXT_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidWeight { name: &'static str, value: f64 },
    ZeroLimit(&'static str),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWeight { name, value } => {
                write!(f, "weight `{name}` must be finite and >= 0, got {value}")
            }
            Self::ZeroLimit(name) => write!(f, "`{name}` must be greater than zero"),
        }
    }
}

impl Error for ConfigError {}

/// Limits and weights used by related-content ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    /// Note suggestions returned when the caller gives no limit.
    pub note_limit: usize,
    /// Fixed cap on text suggestions.
    pub text_limit: usize,
    pub weights: ScoringWeights,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            note_limit: DEFAULT_NOTE_LIMIT,
            text_limit: DEFAULT_TEXT_LIMIT,
            weights: ScoringWeights::default(),
        }
    }
}

impl SuggestConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.note_limit == 0 {
            return Err(ConfigError::ZeroLimit("note_limit"));
        }
        if self.text_limit == 0 {
            return Err(ConfigError::ZeroLimit("text_limit"));
        }
        for (name, value) in self.weights.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SuggestConfig};

    #[test]
    fn default_config_is_valid() {
        let config = SuggestConfig::default();
        assert_eq!(config.note_limit, 5);
        assert_eq!(config.text_limit, 3);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn negative_and_nan_weights_are_rejected() {
        let mut config = SuggestConfig::default();
        config.weights.same_source = -2.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidWeight {
                name: "same_source",
                value: -2.0
            })
        );

        let mut config = SuggestConfig::default();
        config.weights.note_keyword = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidWeight {
                name: "note_keyword",
                ..
            })
        ));
    }

    #[test]
    fn zero_limits_are_rejected() {
        let config = SuggestConfig {
            text_limit: 0,
            ..SuggestConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroLimit("text_limit")));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: SuggestConfig =
            serde_json::from_str(r#"{"note_limit": 8, "weights": {"same_source": 4.0}}"#).unwrap();
        assert_eq!(config.note_limit, 8);
        assert_eq!(config.text_limit, 3);
        assert_eq!(config.weights.same_source, 4.0);
        assert_eq!(config.weights.exact_phrase, 10.0);
    }
}
