//! Pipeline orchestrator — sequences recognition and tutoring against the
//! drawing surface and publishes results to the host UI.
//!
//! The orchestrator owns [`PipelineState`] and an event sink; hosts never
//! share mutable state with it. Every network submission is stamped with a
//! monotonically increasing [`RequestToken`], and a completion is published
//! only when its token is still the latest — a newer preview, submission,
//! or clear supersedes anything in flight, so a stale slow response can
//! never overwrite a fresher result. Cancellation is cooperative: the
//! superseded call is not aborted, its completion is dropped.
//!
//! The split `begin_*`/`finish_*` operations expose the token guard to
//! event-loop hosts that drive their own futures; [`Pipeline::preview`] and
//! [`Pipeline::submit_for_answer`] are the composition of the two around
//! one awaited service call.

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod pipeline_test;

use pad::engine::{PadEngine, PadError};
use thiserror::Error;

use crate::recognition::{RecognitionError, RecognitionRequest, RecognitionResult, Recognizer};
use crate::tutor::{Tutor, TutorError, TutorReply, TutorRequest};

/// Fixed user-facing message for a failed recognition stage.
pub const MSG_RECOGNITION_FAILED: &str = "Error processing your drawing";

/// Fixed user-facing message for a failed tutoring stage.
pub const MSG_SUBMISSION_FAILED: &str = "Error processing your submission";

/// Published when the tutor answers without a usable response body.
pub const MSG_NO_OUTPUT: &str = "No output received from AI.";

/// Where the pipeline currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelinePhase {
    #[default]
    Idle,
    /// Recognition succeeded; LaTeX is being previewed/edited.
    Previewing,
    /// A tutoring call is in flight.
    Submitting,
    /// The tutor answered.
    Done,
    /// A stage failed; `error_message` holds the published message.
    Failed,
}

/// Pipeline state shared read-only with the host.
///
/// Once `phase` reaches `Done` or `Failed`, exactly one of `answer` /
/// `error_message` is set.
#[derive(Debug, Clone, Default)]
pub struct PipelineState {
    pub phase: PipelinePhase,
    /// Recognized (or externally edited) LaTeX awaiting submission.
    pub latex: Option<String>,
    pub answer: Option<String>,
    pub error_message: Option<String>,
}

/// Callbacks the orchestrator publishes through. The contract — which
/// events fire, with what payload, how many times — is what sibling UI
/// regions rely on.
pub trait PipelineEvents {
    /// Recognition succeeded; the editable input should show `latex`.
    fn on_recognized(&mut self, latex: &str);
    /// The live preview should render `latex`, or clear when `None`.
    fn on_preview_update(&mut self, latex: Option<&str>);
    /// The tutor answered.
    fn on_answer(&mut self, text: &str);
    /// A stage failed with a user-facing message.
    fn on_error(&mut self, message: &str);
    /// The drawing and all published values were discarded.
    fn on_clear(&mut self);
}

/// Identity of one issued network submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken(u64);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// `submit_for_answer` without a recognized or edited expression.
    #[error("no recognized expression to submit")]
    MissingLatex,
}

/// The orchestrator. Owns pipeline state and the event sink.
pub struct Pipeline<E> {
    state: PipelineState,
    events: E,
    issued: u64,
    latest: u64,
}

impl<E: PipelineEvents> Pipeline<E> {
    #[must_use]
    pub fn new(events: E) -> Self {
        Self {
            state: PipelineState::default(),
            events,
            issued: 0,
            latest: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    /// The event sink, for hosts that own richer sinks than closures.
    #[must_use]
    pub fn events(&self) -> &E {
        &self.events
    }

    // --- Preview (image → LaTeX) ---

    /// Stamp a new recognition submission. Any submission still in flight
    /// is superseded.
    pub fn begin_preview(&mut self) -> RequestToken {
        let token = self.issue();
        tracing::debug!(token = token.0, "recognition submission issued");
        token
    }

    /// Apply a recognition completion. Dropped silently unless `token` is
    /// still the latest submission.
    ///
    /// On success the phase becomes `Previewing` and `on_recognized` then
    /// `on_preview_update` fire exactly once each. On failure the phase
    /// becomes `Failed` with the fixed recognition message; the drawing is
    /// left untouched so the user can retry without redrawing.
    pub fn finish_preview(
        &mut self,
        token: RequestToken,
        result: Result<RecognitionResult, RecognitionError>,
    ) {
        if !self.is_latest(token) {
            tracing::debug!(token = token.0, latest = self.latest, "stale recognition dropped");
            return;
        }
        match result {
            Ok(recognized) => {
                self.state.phase = PipelinePhase::Previewing;
                self.state.latex = Some(recognized.latex.clone());
                self.state.answer = None;
                self.state.error_message = None;
                self.events.on_recognized(&recognized.latex);
                self.events.on_preview_update(Some(&recognized.latex));
            }
            Err(error) => {
                tracing::warn!(error = %error, "recognition failed");
                self.state.phase = PipelinePhase::Failed;
                self.state.answer = None;
                self.state.error_message = Some(MSG_RECOGNITION_FAILED.to_owned());
                self.events.on_error(MSG_RECOGNITION_FAILED);
            }
        }
    }

    /// Snapshot the surface and run one recognition round-trip.
    ///
    /// # Errors
    ///
    /// Propagates [`PadError`] when the surface cannot be snapshotted
    /// (never configured). Service failures do not surface here — they
    /// become pipeline state plus an `on_error` event.
    pub async fn preview<R: Recognizer>(
        &mut self,
        pad: &PadEngine,
        recognizer: &R,
    ) -> Result<(), PadError> {
        let src = pad.snapshot_data_url()?;
        let token = self.begin_preview();
        let result = recognizer.recognize(RecognitionRequest::for_drawing(src)).await;
        self.finish_preview(token, result);
        Ok(())
    }

    /// Replace the pending LaTeX with host-edited text. The pad and the
    /// preview pane are untouched; the host already shows the edit.
    pub fn set_latex(&mut self, latex: impl Into<String>) {
        self.state.latex = Some(latex.into());
    }

    // --- Submission (LaTeX → answer) ---

    /// Enter `Submitting` and stamp a new tutoring submission.
    ///
    /// # Errors
    ///
    /// [`PipelineError::MissingLatex`] when nothing has been recognized or
    /// edited yet; state is unchanged.
    pub fn begin_submit(&mut self) -> Result<(RequestToken, String), PipelineError> {
        let Some(latex) = self.state.latex.clone() else {
            return Err(PipelineError::MissingLatex);
        };
        self.state.phase = PipelinePhase::Submitting;
        let token = self.issue();
        tracing::debug!(token = token.0, "tutoring submission issued");
        Ok((token, latex))
    }

    /// Apply a tutoring completion. Dropped silently unless `token` is
    /// still the latest submission.
    ///
    /// On success the phase becomes `Done` and `on_answer` fires once (with
    /// the fixed no-output string when the reply body was empty). On
    /// failure the phase becomes `Failed` with the fixed submission
    /// message; the recognized LaTeX is kept so submission can be retried.
    pub fn finish_submit(&mut self, token: RequestToken, result: Result<TutorReply, TutorError>) {
        if !self.is_latest(token) {
            tracing::debug!(token = token.0, latest = self.latest, "stale tutoring reply dropped");
            return;
        }
        match result {
            Ok(reply) => {
                let answer = reply
                    .response
                    .filter(|text| !text.is_empty())
                    .unwrap_or_else(|| MSG_NO_OUTPUT.to_owned());
                self.state.phase = PipelinePhase::Done;
                self.state.answer = Some(answer.clone());
                self.state.error_message = None;
                self.events.on_answer(&answer);
            }
            Err(error) => {
                tracing::warn!(error = %error, "tutoring failed");
                self.state.phase = PipelinePhase::Failed;
                self.state.answer = None;
                self.state.error_message = Some(MSG_SUBMISSION_FAILED.to_owned());
                self.events.on_error(MSG_SUBMISSION_FAILED);
            }
        }
    }

    /// Run one tutoring round-trip on the pending LaTeX.
    ///
    /// # Errors
    ///
    /// [`PipelineError::MissingLatex`] when nothing is pending. Service
    /// failures become pipeline state plus an `on_error` event.
    pub async fn submit_for_answer<T: Tutor>(
        &mut self,
        tutor: &T,
        submission_type: &str,
    ) -> Result<(), PipelineError> {
        let (token, latex) = self.begin_submit()?;
        let result = tutor.advise(TutorRequest::new(latex, submission_type)).await;
        self.finish_submit(token, result);
        Ok(())
    }

    // --- Clear ---

    /// Discard the drawing, supersede anything in flight, reset to `Idle`,
    /// and retract published values: `on_preview_update(None)` then
    /// `on_clear` fire.
    pub fn clear(&mut self, pad: &mut PadEngine) {
        pad.clear();
        self.issue();
        self.state = PipelineState::default();
        self.events.on_preview_update(None);
        self.events.on_clear();
    }

    fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        self.latest = self.issued;
        RequestToken(self.issued)
    }

    fn is_latest(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}
