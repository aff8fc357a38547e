//! Repository for the `surveys` table.

use aftercare_core::record::SurveySubmission;
use aftercare_core::types::DbId;
use sqlx::PgPool;

use crate::models::survey::Survey;

/// Column list for `surveys` queries.
const COLUMNS: &str = "\
    id, user_id, \
    first_name, last_name, email, date_of_birth, gender, \
    type_of_cancer, date_of_diagnosis, date_treatment_ended, treatments_received, \
    other_treatments, \
    physical_health, symptoms, physical_activity, physical_concerns, medications, allergies, \
    emotional_wellbeing, emotional_symptoms, support_system, emotional_concerns, \
    diet, sleep_quality, recovery_goals, additional_info, \
    smoking_status, alcohol_use, risk_stratification, cardiovascular_risk, \
    fertility_concern, coping_style, ptsd_flag, cognitive_function_score, \
    care_coordination_score, lifestyle_change_effort, fear_of_recurrence_score, \
    no_significant_issues, stress, late_effect_symptoms, \
    created_at, updated_at";

/// Provides insert and lookup for submitted surveys. There is no update path.
pub struct SurveyRepo;

impl SurveyRepo {
    /// Insert one survey row with the caller-assigned `id`.
    pub async fn create(
        pool: &PgPool,
        id: DbId,
        submission: &SurveySubmission,
    ) -> Result<Survey, sqlx::Error> {
        let query = format!(
            "INSERT INTO surveys (\
                id, user_id, \
                first_name, last_name, email, date_of_birth, gender, \
                type_of_cancer, date_of_diagnosis, date_treatment_ended, treatments_received, \
                other_treatments, \
                physical_health, symptoms, physical_activity, physical_concerns, \
                medications, allergies, \
                emotional_wellbeing, emotional_symptoms, support_system, emotional_concerns, \
                diet, sleep_quality, recovery_goals, additional_info, \
                smoking_status, alcohol_use, risk_stratification, cardiovascular_risk, \
                fertility_concern, coping_style, ptsd_flag, cognitive_function_score, \
                care_coordination_score, lifestyle_change_effort, fear_of_recurrence_score, \
                no_significant_issues, stress, late_effect_symptoms) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, \
                     $11, $12, $13, $14, $15, $16, $17, $18, $19, $20, \
                     $21, $22, $23, $24, $25, $26, $27, $28, $29, $30, \
                     $31, $32, $33, $34, $35, $36, $37, $38, $39, $40) \
             RETURNING {COLUMNS}"
        );
        let r = &submission.record;
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .bind(&submission.user_id)
            .bind(&r.first_name)
            .bind(&r.last_name)
            .bind(&r.email)
            .bind(r.date_of_birth.date())
            .bind(&r.gender)
            .bind(&r.type_of_cancer)
            .bind(r.date_of_diagnosis.date())
            .bind(r.date_treatment_ended.date())
            .bind(&r.treatments_received)
            .bind(&r.other_treatments)
            .bind(&r.physical_health)
            .bind(&r.symptoms)
            .bind(&r.physical_activity)
            .bind(&r.physical_concerns)
            .bind(&r.medications)
            .bind(&r.allergies)
            .bind(&r.emotional_wellbeing)
            .bind(&r.emotional_symptoms)
            .bind(&r.support_system)
            .bind(&r.emotional_concerns)
            .bind(&r.diet)
            .bind(&r.sleep_quality)
            .bind(&r.recovery_goals)
            .bind(&r.additional_info)
            .bind(&r.smoking_status)
            .bind(&r.alcohol_use)
            .bind(&r.risk_stratification)
            .bind(r.cardiovascular_risk)
            .bind(r.fertility_concern)
            .bind(&r.coping_style)
            .bind(r.ptsd_flag)
            .bind(&r.cognitive_function_score)
            .bind(r.care_coordination_score)
            .bind(&r.lifestyle_change_effort)
            .bind(r.fear_of_recurrence_score)
            .bind(r.no_significant_issues)
            .bind(r.stress)
            .bind(&r.late_effect_symptoms)
            .fetch_one(pool)
            .await
    }

    /// Find a survey by its id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Survey>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM surveys WHERE id = $1");
        sqlx::query_as::<_, Survey>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All surveys submitted by `user_id`, most recent first.
    ///
    /// Rows stored in the same instant fall back to id order, which is
    /// insertion order for UUID v7 ids.
    pub async fn list_by_user(pool: &PgPool, user_id: &str) -> Result<Vec<Survey>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM surveys \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Survey>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
