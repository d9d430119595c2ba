//! Configuration errors.
//!
//! Everything here is fatal and raised before a grid is allocated. Non-fatal
//! generation outcomes (room shortfall, missing prototype) are reported as
//! [`crate::maze::GenerationWarning`] instead.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("maze width must be at least 1, got {0}")]
    InvalidWidth(i64),

    #[error("maze depth must be at least 1, got {0}")]
    InvalidDepth(i64),

    #[error("room count cannot be negative, got {0}")]
    NegativeRoomCount(i64),

    #[error("cell spacing must be a positive finite number, got {0}")]
    InvalidSpacing(f32),

    #[error("minimum room spacing must be a non-negative finite number, got {0}")]
    InvalidRoomSpacing(f32),

    #[error("a {width}x{depth} grid has too many cells")]
    GridTooLarge { width: i64, depth: i64 },

    #[error("start position ({}, {}) is outside a {width}x{depth} grid", .start.0, .start.1)]
    StartOutOfBounds {
        start: (usize, usize),
        width: usize,
        depth: usize,
    },

    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_values() {
        assert_eq!(
            ConfigError::InvalidWidth(0).to_string(),
            "maze width must be at least 1, got 0"
        );
        assert_eq!(
            ConfigError::NegativeRoomCount(-2).to_string(),
            "room count cannot be negative, got -2"
        );

        let err = ConfigError::StartOutOfBounds {
            start: (5, 1),
            width: 3,
            depth: 3,
        };
        assert_eq!(err.to_string(), "start position (5, 1) is outside a 3x3 grid");

        let err = ConfigError::GridTooLarge {
            width: 1 << 32,
            depth: 1 << 32,
        };
        assert_eq!(
            err.to_string(),
            "a 4294967296x4294967296 grid has too many cells"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
