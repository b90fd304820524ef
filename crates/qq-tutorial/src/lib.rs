//! QubitQuest tutorial core.
//!
//! Ties the pieces together: the lesson registry with its reference
//! builders, the snippet transfer into the editor, per-session state, and
//! dispatch of compiled circuits to the local simulator or the IonQ device.
//!
//! The interactive terminal binary (`qubitquest`) is a thin loop over
//! [`Session`]; everything it can do is available programmatically here.

pub mod error;
pub mod lessons;
pub mod run;
pub mod session;

pub use error::{TutorialError, TutorialResult};
pub use lessons::LessonEntry;
pub use run::{BackendChoice, DEFAULT_SHOTS, MAX_SHOTS, MIN_SHOTS, RunFailure, RunRequest, RunResult};
pub use session::{Session, populate};
