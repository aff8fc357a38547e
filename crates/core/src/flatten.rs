//! Draft to flat-record transformation.
//!
//! Pure and total: any draft flattens, and flattening the same draft twice
//! yields identical records. Mapping notes:
//!
//! - `physicalHealth` is the fixed [`PHYSICAL_HEALTH_PLACEHOLDER`].
//! - `physicalActivity` comes from the lifestyle section's `exercise`.
//! - `emotionalConcerns` has no draft source and is always empty.
//! - `emotionalSymptoms` and `recoveryGoals` are normalized to lists.

use crate::answers::normalize;
use crate::draft::SurveyDraft;
use crate::record::{CalendarDate, FlatSurveyRecord};

/// Stored in the `physical_health` column for every submission.
pub const PHYSICAL_HEALTH_PLACEHOLDER: &str = "N/A";

/// Flatten a draft into the record accepted by the submission endpoint.
pub fn flatten(draft: &SurveyDraft) -> FlatSurveyRecord {
    let info = &draft.personal_info;
    let history = &draft.treatment_history;
    let physical = &draft.physical_health;
    let emotional = &draft.emotional_wellbeing;
    let lifestyle = &draft.lifestyle_goals;
    let risk = &draft.lifestyle_risk;
    let perceptions = &draft.perceptions;

    FlatSurveyRecord {
        first_name: info.first_name.clone(),
        last_name: info.last_name.clone(),
        email: info.email.clone(),
        date_of_birth: CalendarDate::parse(&info.date_of_birth),
        gender: choice(info.gender.map(|v| v.as_str())),

        type_of_cancer: choice(history.cancer_type.map(|v| v.as_str())),
        date_of_diagnosis: CalendarDate::parse(&history.diagnosis_date),
        date_treatment_ended: CalendarDate::parse(&history.treatment_end_date),
        treatments_received: wire_values(history.treatments.iter().map(|v| v.as_str())),
        other_treatments: history.other_treatments.clone(),

        physical_health: PHYSICAL_HEALTH_PLACEHOLDER.to_string(),
        symptoms: wire_values(physical.current_symptoms.iter().map(|v| v.as_str())),
        physical_activity: lifestyle.exercise.clone(),
        physical_concerns: physical.other_symptoms.clone(),
        medications: physical.medications.clone(),
        allergies: physical.allergies.clone(),

        emotional_wellbeing: emotional.mood.clone(),
        emotional_symptoms: wire_values(
            normalize(emotional.concerns.as_ref())
                .into_iter()
                .map(|v| v.as_str()),
        ),
        support_system: choice(emotional.support_system.map(|v| v.as_str())),
        emotional_concerns: String::new(),

        diet: lifestyle.diet.clone(),
        sleep_quality: lifestyle.sleep.clone(),
        recovery_goals: wire_values(
            normalize(lifestyle.goals.as_ref())
                .into_iter()
                .map(|v| v.as_str()),
        ),
        additional_info: lifestyle.additional_info.clone(),

        smoking_status: choice(risk.smoking_status.map(|v| v.as_str())),
        alcohol_use: choice(risk.alcohol_use.map(|v| v.as_str())),
        risk_stratification: choice(risk.risk_stratification.map(|v| v.as_str())),
        cardiovascular_risk: risk.cardiovascular_risk,
        fertility_concern: risk.fertility_concern,
        coping_style: choice(risk.coping_style.map(|v| v.as_str())),
        ptsd_flag: risk.ptsd_flag,
        cognitive_function_score: choice(risk.cognitive_function_score.map(|v| v.as_str())),

        care_coordination_score: perceptions.care_coordination_score,
        lifestyle_change_effort: choice(perceptions.lifestyle_change_effort.map(|v| v.as_str())),
        fear_of_recurrence_score: perceptions.fear_of_recurrence_score,
        no_significant_issues: perceptions.no_significant_issues,
        stress: perceptions.stress,
        late_effect_symptoms: perceptions.late_effect_symptoms.clone(),
    }
}

/// Unanswered single-choice questions are stored as empty text.
fn choice(value: Option<&'static str>) -> String {
    value.unwrap_or_default().to_string()
}

fn wire_values<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values.map(str::to_string).collect()
}
