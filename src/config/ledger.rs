//! Ledger invocation limits

use serde::Deserialize;

use super::error::ValidationError;

/// Upper bound accepted for `max_argument_length`.
pub const ARGUMENT_LENGTH_CEILING: usize = 65_536;

/// Invocation limits shared by every operation.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Maximum characters per positional argument
    #[serde(default = "default_max_argument_length")]
    pub max_argument_length: usize,
}

impl LedgerConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=ARGUMENT_LENGTH_CEILING).contains(&self.max_argument_length) {
            return Err(ValidationError::InvalidArgumentLength {
                max: ARGUMENT_LENGTH_CEILING,
                actual: self.max_argument_length,
            });
        }
        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_argument_length: default_max_argument_length(),
        }
    }
}

fn default_max_argument_length() -> usize {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_two_thousand_characters() {
        let config = LedgerConfig::default();
        assert_eq!(config.max_argument_length, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_and_oversized_limits_are_rejected() {
        for max_argument_length in [0, ARGUMENT_LENGTH_CEILING + 1] {
            let config = LedgerConfig {
                max_argument_length,
            };
            assert!(config.validate().is_err());
        }
        assert!(LedgerConfig {
            max_argument_length: 200
        }
        .validate()
        .is_ok());
    }
}
