use thiserror::Error;

use crate::color::Color;
use crate::moves::MoveSequence;

/// Errors surfaced by the cube model, the solver and the session facade.
///
/// Invalid input is rejected before any state is touched. A
/// [`CubeError::StateCorruption`] is fatal for the session that raised it.
#[derive(Debug, Error)]
pub enum CubeError {
    /// A move token is not one of the 18 face-turn symbols.
    #[error("invalid move token: {0:?}")]
    InvalidMoveToken(String),

    /// Cubes only come in sizes 2 through 7.
    #[error("invalid cube size {0}, expected 2 through 7")]
    InvalidSizeRequest(usize),

    /// A color no longer appears exactly N^2 times.
    #[error("state corruption: {color} appears {count} times, expected {expected}")]
    StateCorruption {
        color: Color,
        count: usize,
        expected: usize,
    },

    /// Every search tier of a stage ran out of attempts. `partial` holds the
    /// moves committed before the failing stage.
    #[error("solver failed at stage {stage:?} after {} committed moves", partial.len())]
    SolveFailed { stage: String, partial: MoveSequence },

    /// The requested solving algorithm does not exist.
    #[error("unknown algorithm: {0:?}")]
    UnknownAlgorithm(String),

    /// The search hook asked the solver to stop.
    #[error("solve cancelled during stage {0:?}")]
    Cancelled(String),

    /// A snapshot or saved session does not describe a cube.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// A serialization or deserialization error occurred.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
