//! Stored survey row.

use aftercare_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `surveys` table.
///
/// Serializes with the same camelCase keys as the submission body, plus the
/// row's `id`, `userId` and timestamps. Dates that did not parse are `None`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub id: DbId,
    pub user_id: String,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: String,

    pub type_of_cancer: String,
    pub date_of_diagnosis: Option<NaiveDate>,
    pub date_treatment_ended: Option<NaiveDate>,
    pub treatments_received: Vec<String>,
    pub other_treatments: String,

    pub physical_health: String,
    pub symptoms: Vec<String>,
    pub physical_activity: String,
    pub physical_concerns: String,
    pub medications: String,
    pub allergies: String,

    pub emotional_wellbeing: String,
    pub emotional_symptoms: Vec<String>,
    pub support_system: String,
    pub emotional_concerns: String,

    pub diet: String,
    pub sleep_quality: String,
    pub recovery_goals: Vec<String>,
    pub additional_info: String,

    pub smoking_status: String,
    pub alcohol_use: String,
    pub risk_stratification: String,
    pub cardiovascular_risk: bool,
    pub fertility_concern: bool,
    pub coping_style: String,
    pub ptsd_flag: bool,
    pub cognitive_function_score: String,

    pub care_coordination_score: i32,
    pub lifestyle_change_effort: String,
    pub fear_of_recurrence_score: i32,
    pub no_significant_issues: bool,
    pub stress: bool,
    pub late_effect_symptoms: String,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
