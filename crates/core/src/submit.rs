//! The submission collaborator called by the wizard's final step.

use async_trait::async_trait;

use crate::error::CoreError;
use crate::record::{CreatedSurvey, SurveySubmission};

/// Sends a finished survey to the submission endpoint.
///
/// Implementations make exactly one attempt; failures are reported as
/// [`CoreError::Submission`] (endpoint rejected the survey) or
/// [`CoreError::Internal`] (the request never completed).
#[async_trait]
pub trait SurveySubmitter: Send + Sync {
    async fn submit(&self, submission: &SurveySubmission) -> Result<CreatedSurvey, CoreError>;
}
