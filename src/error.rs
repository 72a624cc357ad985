use thiserror::Error;

/// Errors raised while configuring an indicator.
///
/// Construction is the only fallible step: once an indicator exists, feeding
/// it ticks never fails.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{indicator} length must be positive, got {length}")]
    InvalidLength {
        indicator: &'static str,
        length: usize,
    },

    #[error("{indicator} length is required")]
    MissingLength { indicator: &'static str },
}

/// Result type alias for indicator construction.
pub type Result<T, E = Error> = std::result::Result<T, E>;
