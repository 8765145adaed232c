use thiserror::Error;

/// Contract violations detected before any pass runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenError {
    #[error("plateCount must be at least 1")]
    ZeroPlates,

    #[error("seed must be finite, got {0}")]
    NonFiniteSeed(f64),

    #[error("grid must be at least 1x1, got {cols}x{rows}")]
    InvalidGrid { cols: usize, rows: usize },

    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
