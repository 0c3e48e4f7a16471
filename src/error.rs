use thiserror::Error;

/// Error produced by the move parser or the scramble generator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A move token could not be parsed.
    ///
    /// `position` is the zero-based index of the token within the sequence
    /// being parsed (always 0 for a single token).
    #[error("invalid move token {token:?} at position {position}: {reason}")]
    InvalidMoveToken {
        token: String,
        position: usize,
        reason: TokenError,
    },
    #[error("scramble length must not be negative (got {0})")]
    InvalidSequenceLength(i64),
}

/// Why a single move token was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("empty token")]
    Empty,
    #[error("unknown face {0:?}")]
    UnknownFace(char),
    #[error("unknown suffix {0:?}")]
    UnknownSuffix(String),
}

impl Error {
    pub(crate) fn token(token: &str, position: usize, reason: TokenError) -> Self {
        Error::InvalidMoveToken {
            token: token.to_string(),
            position,
            reason,
        }
    }
}
