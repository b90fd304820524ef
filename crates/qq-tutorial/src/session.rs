//! Per-session state and the snippet transfer step.

use crate::error::{TutorialError, TutorialResult};
use crate::lessons::{self, LessonEntry};
use crate::run::{self, BackendChoice, RunFailure, RunRequest, RunResult};

/// Indentation unit applied to snippet body lines on populate.
const INDENT: &str = "    ";

/// Mutable state for one learner session.
///
/// Everything the interactive loop needs lives here; there is no global
/// state, so sessions are independent and trivially testable.
#[derive(Default)]
pub struct Session {
    started: bool,
    lesson: Option<&'static LessonEntry>,
    editor: String,
}

impl Session {
    /// Create a fresh session at the landing page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Leave the landing page.
    pub fn begin(&mut self) {
        self.started = true;
    }

    /// Whether the learner has left the landing page.
    pub fn started(&self) -> bool {
        self.started
    }

    /// Select a lesson by name. The editor keeps its contents so learners
    /// can compare their code across lessons.
    pub fn select_lesson(&mut self, name: &str) -> TutorialResult<&'static LessonEntry> {
        let entry = lessons::lookup(name)?;
        self.lesson = Some(entry);
        Ok(entry)
    }

    /// The currently selected lesson, if any.
    pub fn lesson(&self) -> Option<&'static LessonEntry> {
        self.lesson
    }

    /// The derived reference snippet for the current lesson.
    pub fn snippet(&self) -> TutorialResult<String> {
        let entry = self.lesson.ok_or(TutorialError::NoLessonSelected)?;
        lessons::snippet(entry)
    }

    /// Replace the editor contents with the indented reference snippet.
    ///
    /// Always derives from the immutable snippet, never from the current
    /// editor text, so repeated populates cannot compound indentation.
    pub fn populate_editor(&mut self) -> TutorialResult<&str> {
        let snippet = self.snippet()?;
        self.editor = populate(&snippet);
        Ok(&self.editor)
    }

    /// Overwrite the editor contents with learner-typed text.
    pub fn set_editor(&mut self, text: impl Into<String>) {
        self.editor = text.into();
    }

    /// Current editor contents.
    pub fn editor(&self) -> &str {
        &self.editor
    }

    /// Compile the editor contents and dispatch to the chosen backend.
    ///
    /// On failure the [`RunFailure`] carries the circuit preview whenever
    /// compilation succeeded, so the learner still sees what would have run.
    pub async fn run(&self, backend: BackendChoice, shots: u32) -> Result<RunResult, RunFailure> {
        let circuit = qq_lang::compile(&self.editor)?;
        run::run(RunRequest {
            circuit,
            backend,
            shots,
        })
        .await
    }
}

/// Indent a snippet for the editor: the `def build() {` header stays
/// unchanged, every following line gains one indentation unit.
pub fn populate(snippet: &str) -> String {
    let mut lines = snippet.lines();
    let Some(header) = lines.next() else {
        return String::new();
    };
    let mut out = vec![header.to_string()];
    for line in lines {
        out.push(format!("{INDENT}{line}"));
    }
    out.join("\n")
}
