//! Error types for the tutorial layer.

use thiserror::Error;

/// Errors surfaced to the learner during a tutorial session.
///
/// All variants are recoverable: the session and the editor contents
/// survive any of them, and the learner can edit and run again.
#[derive(Debug, Error)]
pub enum TutorialError {
    /// The requested lesson does not exist.
    #[error("No lesson named '{0}'")]
    LessonNotFound(String),

    /// An operation required a selected lesson but none was.
    #[error("No lesson selected")]
    NoLessonSelected,

    /// Shot count outside the allowed range.
    #[error("Shots must be between {min} and {max}, got {got}")]
    InvalidShots { got: u32, min: u32, max: u32 },

    /// The editor contents failed to compile.
    #[error("Error in your build() routine: {0}")]
    Compile(#[from] qq_lang::CompileError),

    /// A reference builder violated a circuit invariant.
    #[error(transparent)]
    Circuit(#[from] qq_ir::IrError),

    /// The execution backend failed.
    #[error(transparent)]
    Backend(#[from] qq_hal::HalError),
}

/// Convenience alias for tutorial results.
pub type TutorialResult<T> = Result<T, TutorialError>;
