//! Integration tests for `SurveyRepo` against a real database.

use aftercare_core::record::{CalendarDate, FlatSurveyRecord, SurveySubmission};
use aftercare_db::repositories::SurveyRepo;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn jane_doe(user_id: &str) -> SurveySubmission {
    let record = FlatSurveyRecord {
        first_name: "Jane".into(),
        last_name: "Doe".into(),
        email: "jane@x.com".into(),
        date_of_birth: CalendarDate::parse("1990-01-01"),
        gender: "female".into(),
        type_of_cancer: "Breast".into(),
        date_of_diagnosis: CalendarDate::parse("2020-01-01"),
        date_treatment_ended: CalendarDate::parse("2020-06-01"),
        treatments_received: vec![],
        other_treatments: String::new(),
        physical_health: "N/A".into(),
        symptoms: vec![],
        physical_activity: String::new(),
        physical_concerns: String::new(),
        medications: String::new(),
        allergies: String::new(),
        emotional_wellbeing: String::new(),
        emotional_symptoms: vec![],
        support_system: String::new(),
        emotional_concerns: String::new(),
        diet: String::new(),
        sleep_quality: String::new(),
        recovery_goals: vec![],
        additional_info: String::new(),
        smoking_status: "never".into(),
        alcohol_use: "never".into(),
        risk_stratification: "low".into(),
        cardiovascular_risk: false,
        fertility_concern: false,
        coping_style: "adaptive".into(),
        ptsd_flag: false,
        cognitive_function_score: "good".into(),
        care_coordination_score: 3,
        lifestyle_change_effort: "very-willing".into(),
        fear_of_recurrence_score: 5,
        no_significant_issues: false,
        stress: false,
        late_effect_symptoms: String::new(),
    };
    SurveySubmission::new(user_id, record)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_returns_stored_row(pool: PgPool) {
    aftercare_db::health_check(&pool).await.unwrap();

    let id = Uuid::now_v7();
    let survey = SurveyRepo::create(&pool, id, &jane_doe("user-1"))
        .await
        .unwrap();

    assert_eq!(survey.id, id);
    assert_eq!(survey.user_id, "user-1");
    assert_eq!(survey.first_name, "Jane");
    assert_eq!(survey.date_of_birth, NaiveDate::from_ymd_opt(1990, 1, 1));
    assert_eq!(survey.date_treatment_ended, NaiveDate::from_ymd_opt(2020, 6, 1));
    assert_eq!(survey.physical_health, "N/A");
    assert!(survey.recovery_goals.is_empty());
    assert!(survey.emotional_symptoms.is_empty());
    assert_eq!(survey.care_coordination_score, 3);
    assert_eq!(survey.fear_of_recurrence_score, 5);
    assert_eq!(survey.created_at, survey.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn collections_round_trip_in_order(pool: PgPool) {
    let mut submission = jane_doe("user-1");
    submission.record.emotional_symptoms = vec!["grief".into(), "anxiety".into()];
    submission.record.treatments_received = vec!["surgery".into(), "radiation".into()];

    let survey = SurveyRepo::create(&pool, Uuid::now_v7(), &submission)
        .await
        .unwrap();

    assert_eq!(survey.emotional_symptoms, vec!["grief", "anxiety"]);
    assert_eq!(survey.treatments_received, vec!["surgery", "radiation"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn invalid_dates_are_stored_as_null(pool: PgPool) {
    let mut submission = jane_doe("user-1");
    submission.record.date_of_diagnosis = CalendarDate::parse("last spring");

    let survey = SurveyRepo::create(&pool, Uuid::now_v7(), &submission)
        .await
        .unwrap();
    assert!(survey.date_of_diagnosis.is_none());

    let json = serde_json::to_value(&survey).unwrap();
    assert!(json["dateOfDiagnosis"].is_null());
    assert_eq!(json["dateOfBirth"], "1990-01-01");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_id_and_list_by_user(pool: PgPool) {
    let first = SurveyRepo::create(&pool, Uuid::now_v7(), &jane_doe("user-1"))
        .await
        .unwrap();
    SurveyRepo::create(&pool, Uuid::now_v7(), &jane_doe("user-2"))
        .await
        .unwrap();

    let found = SurveyRepo::find_by_id(&pool, first.id).await.unwrap();
    assert_eq!(found, Some(first.clone()));

    let missing = SurveyRepo::find_by_id(&pool, Uuid::now_v7()).await.unwrap();
    assert!(missing.is_none());

    let mine = SurveyRepo::list_by_user(&pool, "user-1").await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_by_user_returns_newest_first(pool: PgPool) {
    let older = SurveyRepo::create(&pool, Uuid::now_v7(), &jane_doe("user-1"))
        .await
        .unwrap();
    let newer = SurveyRepo::create(&pool, Uuid::now_v7(), &jane_doe("user-1"))
        .await
        .unwrap();

    sqlx::query("UPDATE surveys SET created_at = created_at - interval '1 day' WHERE id = $1")
        .bind(older.id)
        .execute(&pool)
        .await
        .unwrap();

    let ids: Vec<Uuid> = SurveyRepo::list_by_user(&pool, "user-1")
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn same_instant_rows_list_by_descending_id(pool: PgPool) {
    let mut ids = [Uuid::now_v7(), Uuid::now_v7()];
    ids.sort();
    let first = SurveyRepo::create(&pool, ids[0], &jane_doe("user-1"))
        .await
        .unwrap();
    let second = SurveyRepo::create(&pool, ids[1], &jane_doe("user-1"))
        .await
        .unwrap();

    sqlx::query("UPDATE surveys SET created_at = $1 WHERE user_id = 'user-1'")
        .bind(first.created_at)
        .execute(&pool)
        .await
        .unwrap();

    let ids: Vec<Uuid> = SurveyRepo::list_by_user(&pool, "user-1")
        .await
        .unwrap()
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_id_is_rejected(pool: PgPool) {
    let id = Uuid::now_v7();
    SurveyRepo::create(&pool, id, &jane_doe("user-1"))
        .await
        .unwrap();

    let err = SurveyRepo::create(&pool, id, &jane_doe("user-1"))
        .await
        .unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => assert_eq!(db_err.code().as_deref(), Some("23505")),
        other => panic!("expected unique violation, got {other:?}"),
    }
}
