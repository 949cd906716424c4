//! Submission orchestration.
//!
//! A [`Session`] owns the conversation log, the error slot, and the service
//! health shown in the status line. Submitting a review is a two-phase
//! transition:
//!
//! 1. [`Session::begin_submit`] validates the text, appends the user entry,
//!    and moves `Idle -> Submitting`. Validation failures never leave `Idle`.
//! 2. [`Session::resolve`] consumes the service outcome, appends the bot
//!    entry or fills the error slot, and moves `Submitting -> Idle`.
//!
//! Callers that can simply await the classifier use [`Session::submit`],
//! which runs both phases.

use crate::client::{Classifier, ClientError, HealthStatus, PredictionResult};
use crate::conversation::{Conversation, Entry};
use crate::review::{parse_review, Review, ValidationError};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Label of the user entry that carries a submitted review.
pub const USER_ENTRY_LABEL: &str = "Input Review Object:";

/// Submission phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Ready to accept a submission.
    #[default]
    Idle,
    /// A review has been sent and its verdict is outstanding.
    Submitting {
        /// Identifies the in-flight submission.
        id: Uuid,
    },
}

/// What the liveness probe reported.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HealthState {
    /// Probe not yet answered.
    #[default]
    Checking,
    /// Service is up.
    Ready {
        /// Model name reported by the service.
        model: Option<String>,
    },
    /// Probe failed with this message.
    Unavailable(String),
}

/// A validated review that has been recorded and awaits its verdict.
#[derive(Debug, Clone)]
#[must_use = "a pending submission must be resolved"]
pub struct PendingSubmission {
    id: Uuid,
    review: Review,
}

impl PendingSubmission {
    /// Submission id to pass back to [`Session::resolve`].
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The review to classify.
    pub fn review(&self) -> &Review {
        &self.review
    }

    /// Take the review out, e.g. to move it into a background task.
    pub fn into_parts(self) -> (Uuid, Review) {
        (self.id, self.review)
    }
}

/// Compose the bot-turn text for a verdict.
///
/// ```text
/// Decision: SPAM
/// Confidence: 87%
/// Model: gbdt+llm
/// ```
pub fn format_verdict(result: &PredictionResult) -> String {
    format!(
        "Decision: {}\nConfidence: {}%\nModel: {}",
        result.decision_label(),
        result.confidence_percent(),
        result.model
    )
}

/// Conversation state plus submission bookkeeping.
#[derive(Debug, Default)]
pub struct Session {
    conversation: Conversation,
    phase: Phase,
    error: Option<String>,
    health: HealthState,
}

impl Session {
    /// Create an idle session with an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conversation log.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    /// Message in the error slot, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Health of the service.
    pub fn health(&self) -> &HealthState {
        &self.health
    }

    /// Model name reported by the health probe.
    pub fn model_name(&self) -> Option<&str> {
        match &self.health {
            HealthState::Ready { model } => model.as_deref().filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// Overwrite the health state, e.g. `Checking` while a probe is re-run.
    pub fn set_health(&mut self, health: HealthState) {
        self.health = health;
    }

    /// Record the outcome of the health probe.
    pub fn apply_health(&mut self, result: Result<HealthStatus, ClientError>) {
        let health = match result {
            Ok(status) => {
                info!(model = ?status.model, "service is healthy");
                HealthState::Ready {
                    model: status.model,
                }
            }
            Err(e) => {
                warn!(error = %e, "service health check failed");
                HealthState::Unavailable(e.to_string())
            }
        };
        self.set_health(health);
    }

    /// Whether the submit control is enabled for `text`.
    pub fn can_submit(&self, text: &str) -> bool {
        !self.is_submitting() && !text.trim().is_empty()
    }

    /// Phase one: validate `text`, record it, and enter `Submitting`.
    ///
    /// On validation failure the error slot is set and the conversation is
    /// untouched. While a submission is in flight this returns
    /// [`SubmitError::Busy`] without changing any state.
    pub fn begin_submit(&mut self, text: &str) -> Result<PendingSubmission, SubmitError> {
        if self.is_submitting() {
            return Err(SubmitError::Busy);
        }

        self.error = None;
        let review = match parse_review(text) {
            Ok(review) => review,
            Err(e) => {
                debug!(error = %e, "rejected review input");
                self.error = Some(e.to_string());
                return Err(e.into());
            }
        };

        self.conversation
            .push(Entry::user(USER_ENTRY_LABEL, Some(review.to_value())));

        let id = Uuid::new_v4();
        self.phase = Phase::Submitting { id };
        debug!(%id, "submission started");

        Ok(PendingSubmission { id, review })
    }

    /// Phase two: apply the service outcome for submission `id`.
    ///
    /// Returns to `Idle` in both the success and the failure case. An `id`
    /// that is not the in-flight submission is rejected with
    /// [`SubmitError::Stale`] and changes nothing.
    pub fn resolve(
        &mut self,
        id: Uuid,
        outcome: Result<PredictionResult, ClientError>,
    ) -> Result<(), SubmitError> {
        if self.phase != (Phase::Submitting { id }) {
            return Err(SubmitError::Stale(id));
        }
        self.phase = Phase::Idle;

        match outcome {
            Ok(result) => {
                info!(
                    %id,
                    decision = %result.final_decision,
                    confidence = result.confidence_percent(),
                    "prediction received"
                );
                self.conversation
                    .push(Entry::bot(format_verdict(&result), Some(result.to_value())));
                Ok(())
            }
            Err(e) => {
                warn!(%id, error = %e, "prediction failed");
                self.error = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    /// Abandon the in-flight submission `id` without a verdict, e.g. when the
    /// background task running it died. Returns to `Idle` and shows `message`.
    pub fn abandon(&mut self, id: Uuid, message: impl Into<String>) -> bool {
        if self.phase != (Phase::Submitting { id }) {
            return false;
        }
        self.phase = Phase::Idle;
        self.error = Some(message.into());
        true
    }

    /// Run both phases against `classifier`.
    pub async fn submit<C: Classifier>(
        &mut self,
        text: &str,
        classifier: &C,
    ) -> Result<(), SubmitError> {
        let pending = self.begin_submit(text)?;
        let outcome = classifier.classify(pending.review()).await;
        self.resolve(pending.id(), outcome)
    }
}

/// Errors from a submission attempt.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Another submission is still in flight.
    #[error("A submission is already in progress")]
    Busy,

    /// The input was rejected locally.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The service call failed.
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The submission was already resolved or never existed.
    #[error("Submission {0} is not in flight")]
    Stale(Uuid),
}
