//! Per-step gating rules for the survey wizard.
//!
//! | Step | Requirement |
//! |------|-------------|
//! | 1    | first name, last name, email, date of birth, gender |
//! | 2    | cancer type, diagnosis date, treatment end date |
//! | 3-5  | none |
//! | 6    | smoking, alcohol, risk stratification, coping style, cognitive score |
//! | 7    | lifestyle change effort, care coordination 1-5, fear of recurrence 0-10 |
//!
//! Only the section edited by the step is inspected.

use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::draft::SurveyDraft;
use crate::error::CoreError;
use crate::steps::SurveyStep;

/// Rejects strings that are empty once surrounding whitespace is removed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    Ok(())
}

/// Check whether the draft satisfies the requirements of `step`.
///
/// The error lists every failing field so the caller can highlight them.
pub fn validate_step(step: u8, draft: &SurveyDraft) -> Result<(), CoreError> {
    let step_enum = SurveyStep::from_number(step)?;
    if !step_enum.is_gated() {
        return Ok(());
    }

    let result = match step_enum {
        SurveyStep::PersonalInfo => draft.personal_info.validate(),
        SurveyStep::TreatmentHistory => draft.treatment_history.validate(),
        SurveyStep::LifestyleRisk => draft.lifestyle_risk.validate(),
        SurveyStep::Perceptions => draft.perceptions.validate(),
        _ => Ok(()),
    };

    result.map_err(|errors| {
        CoreError::Validation(format!(
            "Step {step} ({}) is incomplete: {}",
            step_enum.title(),
            failing_fields(&errors).join(", ")
        ))
    })
}

/// Boolean form of [`validate_step`], used to enable the "Next" control.
pub fn is_step_valid(step: u8, draft: &SurveyDraft) -> bool {
    validate_step(step, draft).is_ok()
}

fn failing_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();
    fields
}
