//! Wizard controller for the seven-step survey.
//!
//! The controller owns the draft and the current step. Forward navigation
//! is gated by the step validator; backward navigation is not. The final
//! step flattens the draft and hands it to a [`SurveySubmitter`] once.

use serde_json::Value;

use crate::draft::SurveyDraft;
use crate::error::CoreError;
use crate::flatten::flatten;
use crate::identity::IdentityProvider;
use crate::record::{CreatedSurvey, SurveySubmission};
use crate::steps::{progress_percent, SurveyStep, MIN_STEP, TOTAL_STEPS};
use crate::submit::SurveySubmitter;
use crate::validation::{is_step_valid, validate_step};

/// Where an unauthenticated user is sent instead of the wizard.
pub const LOGIN_PATH: &str = "/auth/login";

/// Where the user lands after a successful submission.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Position of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardState {
    /// On a step, 1-based.
    Step(u8),
    /// The survey was accepted; terminal.
    Submitted,
}

/// Result of a successful [`Wizard::submit`].
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub survey: CreatedSurvey,
    pub redirect_to: &'static str,
}

#[derive(Debug, Clone)]
pub struct Wizard {
    state: WizardState,
    draft: SurveyDraft,
}

impl Wizard {
    /// Open the wizard for the signed-in user.
    ///
    /// Fails with [`CoreError::Unauthorized`] when nobody is signed in; the
    /// caller should redirect to [`LOGIN_PATH`].
    pub fn start(identity: &dyn IdentityProvider) -> Result<Self, CoreError> {
        let identity = identity.current_identity().ok_or_else(|| {
            CoreError::Unauthorized(format!("Sign in required; redirect to {LOGIN_PATH}"))
        })?;

        tracing::debug!(user_id = %identity.id, "Survey wizard started");
        Ok(Self {
            state: WizardState::Step(MIN_STEP),
            draft: SurveyDraft::for_identity(&identity),
        })
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    /// Current step number, or `None` once submitted.
    pub fn current_step(&self) -> Option<u8> {
        match self.state {
            WizardState::Step(n) => Some(n),
            WizardState::Submitted => None,
        }
    }

    pub fn draft(&self) -> &SurveyDraft {
        &self.draft
    }

    /// Progress bar value; a submitted survey is complete.
    pub fn progress_percent(&self) -> u8 {
        match self.state {
            WizardState::Step(n) => progress_percent(n),
            WizardState::Submitted => 100,
        }
    }

    pub fn is_final_step(&self) -> bool {
        self.state == WizardState::Step(TOTAL_STEPS)
    }

    pub fn is_submitted(&self) -> bool {
        self.state == WizardState::Submitted
    }

    /// Whether the "Next" control should be enabled.
    pub fn can_advance(&self) -> bool {
        match self.state {
            WizardState::Step(n) => n < TOTAL_STEPS && is_step_valid(n, &self.draft),
            WizardState::Submitted => false,
        }
    }

    /// Whether the "Previous" control should be enabled.
    pub fn can_retreat(&self) -> bool {
        matches!(self.state, WizardState::Step(n) if n > MIN_STEP)
    }

    /// Whether the "Submit" control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.is_final_step() && is_step_valid(TOTAL_STEPS, &self.draft)
    }

    /// Move to the next step. Returns `false` and changes nothing when the
    /// current step is incomplete or already the last one.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        let WizardState::Step(from) = self.state else {
            return false;
        };
        self.state = WizardState::Step(from + 1);
        tracing::debug!(from_step = from, to_step = from + 1, "Advanced survey step");
        true
    }

    /// Move to the previous step. Not gated by validation.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        let WizardState::Step(from) = self.state else {
            return false;
        };
        self.state = WizardState::Step(from - 1);
        tracing::debug!(from_step = from, to_step = from - 1, "Retreated survey step");
        true
    }

    /// Merge edits into the section for `step`.
    ///
    /// Returns `Ok(false)` for unknown steps and after submission.
    pub fn update_section(&mut self, step: u8, partial: &Value) -> Result<bool, CoreError> {
        if self.is_submitted() {
            return Ok(false);
        }
        self.draft.update_section(step, partial)
    }

    /// Flatten the draft and send it to `submitter`.
    ///
    /// Only valid on the final step with a complete step 7 and a signed-in
    /// identity. On failure the wizard stays on the final step with the
    /// draft intact, so the user may try again.
    pub async fn submit(
        &mut self,
        identity: &dyn IdentityProvider,
        submitter: &dyn SurveySubmitter,
    ) -> Result<SubmitOutcome, CoreError> {
        match self.state {
            WizardState::Submitted => {
                return Err(CoreError::Conflict("Survey already submitted".into()));
            }
            WizardState::Step(n) if n != TOTAL_STEPS => {
                return Err(CoreError::Validation(format!(
                    "Survey can only be submitted from step {TOTAL_STEPS} ({}), not step {n}",
                    SurveyStep::Perceptions.title()
                )));
            }
            WizardState::Step(_) => {}
        }

        validate_step(TOTAL_STEPS, &self.draft)?;

        let identity = identity.current_identity().ok_or_else(|| {
            CoreError::Unauthorized(format!("Sign in required; redirect to {LOGIN_PATH}"))
        })?;

        let submission = SurveySubmission::new(identity.id, flatten(&self.draft));

        match submitter.submit(&submission).await {
            Ok(survey) => {
                tracing::info!(
                    survey_id = %survey.id,
                    user_id = %survey.user_id,
                    "Survey submitted",
                );
                self.state = WizardState::Submitted;
                Ok(SubmitOutcome {
                    survey,
                    redirect_to: DASHBOARD_PATH,
                })
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %submission.user_id,
                    error = %e,
                    "Survey submission failed",
                );
                Err(e)
            }
        }
    }
}
