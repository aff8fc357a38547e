//! The in-progress survey document.
//!
//! A [`SurveyDraft`] is owned by the wizard controller and only leaves it
//! through the flattener at submit time. Sections are independently
//! mutable; nothing here enforces invariants across sections.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use crate::answers::{
    blank_as_none, unique_answer, unique_list, AlcoholUse, Answer, CancerType, ChangeEffort,
    CognitiveScore, CopingStyle, EmotionalConcern, Gender, RecoveryGoal, RiskLevel,
    SmokingStatus, SupportSystem, Symptom, Treatment,
};
use crate::error::CoreError;
use crate::identity::Identity;
use crate::steps::SurveyStep;
use crate::validation::not_blank;

/// Default care coordination satisfaction shown before the patient answers.
pub const DEFAULT_CARE_COORDINATION_SCORE: i32 = 3;

/// Default fear-of-recurrence score shown before the patient answers.
pub const DEFAULT_FEAR_OF_RECURRENCE_SCORE: i32 = 5;

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Step 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PersonalInfo {
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[validate(custom(function = "not_blank"))]
    pub email: String,
    /// Date string as typed into the form; parsed only when flattening.
    #[serde(rename = "dob", alias = "dateOfBirth")]
    #[validate(custom(function = "not_blank"))]
    pub date_of_birth: String,
    #[serde(deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub gender: Option<Gender>,
}

/// Step 2.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct TreatmentHistory {
    #[serde(deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub cancer_type: Option<CancerType>,
    #[validate(custom(function = "not_blank"))]
    pub diagnosis_date: String,
    #[validate(custom(function = "not_blank"))]
    pub treatment_end_date: String,
    #[serde(deserialize_with = "unique_list")]
    pub treatments: Vec<Treatment>,
    pub other_treatments: String,
}

/// Step 3. Nothing here gates navigation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct PhysicalHealth {
    #[serde(deserialize_with = "unique_list")]
    pub current_symptoms: Vec<Symptom>,
    pub other_symptoms: String,
    pub medications: String,
    pub allergies: String,
}

/// Step 4.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EmotionalWellbeing {
    pub mood: String,
    #[serde(deserialize_with = "blank_as_none")]
    pub support_system: Option<SupportSystem>,
    #[serde(deserialize_with = "unique_answer")]
    pub concerns: Option<Answer<EmotionalConcern>>,
}

/// Step 5.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LifestyleGoals {
    pub exercise: String,
    pub diet: String,
    pub sleep: String,
    #[serde(deserialize_with = "unique_answer")]
    pub goals: Option<Answer<RecoveryGoal>>,
    pub additional_info: String,
}

/// Step 6.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct LifestyleRisk {
    #[serde(deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub smoking_status: Option<SmokingStatus>,
    #[serde(deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub alcohol_use: Option<AlcoholUse>,
    #[serde(deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub risk_stratification: Option<RiskLevel>,
    pub cardiovascular_risk: bool,
    pub fertility_concern: bool,
    #[serde(deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub coping_style: Option<CopingStyle>,
    pub ptsd_flag: bool,
    #[serde(deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub cognitive_function_score: Option<CognitiveScore>,
}

/// Step 7.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Perceptions {
    #[validate(range(min = 1, max = 5))]
    pub care_coordination_score: i32,
    #[serde(deserialize_with = "blank_as_none")]
    #[validate(required)]
    pub lifestyle_change_effort: Option<ChangeEffort>,
    #[validate(range(min = 0, max = 10))]
    pub fear_of_recurrence_score: i32,
    pub no_significant_issues: bool,
    pub stress: bool,
    pub late_effect_symptoms: String,
}

impl Default for Perceptions {
    fn default() -> Self {
        Self {
            care_coordination_score: DEFAULT_CARE_COORDINATION_SCORE,
            lifestyle_change_effort: None,
            fear_of_recurrence_score: DEFAULT_FEAR_OF_RECURRENCE_SCORE,
            no_significant_issues: false,
            stress: false,
            late_effect_symptoms: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// Answers for every section of the survey, keyed by section name.
///
/// Multi-select answers hold no repeated members after deserialization or
/// [`SurveyDraft::update_section`]. Writing the public fields directly skips
/// that check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurveyDraft {
    pub personal_info: PersonalInfo,
    pub treatment_history: TreatmentHistory,
    pub physical_health: PhysicalHealth,
    pub emotional_wellbeing: EmotionalWellbeing,
    pub lifestyle_goals: LifestyleGoals,
    pub lifestyle_risk: LifestyleRisk,
    pub perceptions: Perceptions,
}

impl SurveyDraft {
    /// A blank draft with the personal details the identity already knows.
    ///
    /// The display name is split on the first space: the first token is the
    /// first name and everything after it the last name.
    pub fn for_identity(identity: &Identity) -> Self {
        let mut parts = identity.name.split(' ');
        let first_name = parts.next().unwrap_or_default().to_string();
        let last_name = parts.collect::<Vec<_>>().join(" ");

        let mut draft = Self::default();
        draft.personal_info.first_name = first_name;
        draft.personal_info.last_name = last_name;
        draft.personal_info.email = identity.email.clone();
        draft
    }

    /// Shallow-merge `partial` into the section edited by `step`.
    ///
    /// Fields absent from `partial` keep their current values. Returns
    /// `Ok(false)` without touching the draft when `step` is not a wizard
    /// step. A partial that is not an object, names an unknown field, or
    /// carries a value of the wrong type is rejected and the draft is left
    /// unchanged.
    pub fn update_section(&mut self, step: u8, partial: &Value) -> Result<bool, CoreError> {
        let Ok(step) = SurveyStep::from_number(step) else {
            tracing::debug!(step, "Ignoring update for unknown step");
            return Ok(false);
        };

        let patch = partial.as_object().ok_or_else(|| {
            CoreError::Validation(format!(
                "Update for '{}' must be a JSON object",
                step.section_key()
            ))
        })?;

        match step {
            SurveyStep::PersonalInfo => {
                let mut patch = patch.clone();
                if let Some(dob) = patch.remove("dateOfBirth") {
                    patch.insert("dob".to_string(), dob);
                }
                merge_section(&mut self.personal_info, &patch, step)?;
            }
            SurveyStep::TreatmentHistory => merge_section(&mut self.treatment_history, patch, step)?,
            SurveyStep::PhysicalHealth => merge_section(&mut self.physical_health, patch, step)?,
            SurveyStep::EmotionalWellbeing => {
                merge_section(&mut self.emotional_wellbeing, patch, step)?
            }
            SurveyStep::LifestyleGoals => merge_section(&mut self.lifestyle_goals, patch, step)?,
            SurveyStep::LifestyleRisk => merge_section(&mut self.lifestyle_risk, patch, step)?,
            SurveyStep::Perceptions => merge_section(&mut self.perceptions, patch, step)?,
        }

        Ok(true)
    }
}

/// Overlay `patch` onto the JSON form of `section` and parse it back.
///
/// `section` is only replaced once the merged document parses, so a bad
/// patch never leaves a half-applied section behind.
fn merge_section<S>(
    section: &mut S,
    patch: &Map<String, Value>,
    step: SurveyStep,
) -> Result<(), CoreError>
where
    S: Serialize + DeserializeOwned,
{
    let mut merged = match serde_json::to_value(&*section) {
        Ok(Value::Object(map)) => map,
        Ok(_) => {
            return Err(CoreError::Internal(format!(
                "Section '{}' did not serialize to an object",
                step.section_key()
            )))
        }
        Err(e) => return Err(CoreError::Internal(e.to_string())),
    };

    for (key, value) in patch {
        merged.insert(key.clone(), value.clone());
    }

    *section = serde_json::from_value(Value::Object(merged)).map_err(|e| {
        CoreError::Validation(format!("Invalid update for '{}': {e}", step.section_key()))
    })?;
    Ok(())
}
