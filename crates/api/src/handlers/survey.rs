//! Handlers for survey submission.
//!
//! The request body is parsed into a [`Value`] exactly once and that value
//! is reused for both the insert and the failure report.

use aftercare_core::error::CoreError;
use aftercare_core::record::SurveySubmission;
use aftercare_core::types::DbId;
use aftercare_db::models::survey::Survey;
use aftercare_db::repositories::SurveyRepo;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Message returned when the identity fields are absent or blank.
pub const MISSING_IDENTITY_MESSAGE: &str = "Missing required userId or email.";

// ---------------------------------------------------------------------------
// Failure body
// ---------------------------------------------------------------------------

/// `500` body for a failed submission.
///
/// `stack` and `receivedPayload` are only filled when the server runs with
/// survey diagnostics enabled.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveyCreationFailure {
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received_payload: Option<Value>,
}

impl SurveyCreationFailure {
    fn new(err: &AppError, payload: Value, diagnostics: bool) -> Self {
        Self {
            error: "Survey creation failed",
            message: err.client_message(),
            stack: diagnostics.then(|| format!("{err:?}")),
            received_payload: diagnostics.then_some(payload),
        }
    }
}

impl IntoResponse for SurveyCreationFailure {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

// ---------------------------------------------------------------------------
// POST /surveys
// ---------------------------------------------------------------------------

/// Store one flattened survey and return the created row.
pub async fn create_survey(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Survey>), SurveyCreationFailure> {
    match insert_survey(&state, &payload).await {
        Ok(survey) => {
            tracing::info!(
                survey_id = %survey.id,
                user_id = %survey.user_id,
                "Survey created",
            );
            Ok((StatusCode::CREATED, Json(survey)))
        }
        Err(err) => {
            tracing::error!(error = %err, "Survey creation failed");
            Err(SurveyCreationFailure::new(
                &err,
                payload,
                state.config.survey_diagnostics,
            ))
        }
    }
}

async fn insert_survey(state: &AppState, payload: &Value) -> AppResult<Survey> {
    require_identity_fields(payload)?;

    let submission: SurveySubmission = serde_json::from_value(payload.clone())
        .map_err(|e| AppError::BadRequest(format!("Invalid survey payload: {e}")))?;

    let id = Uuid::now_v7();
    Ok(SurveyRepo::create(&state.pool, id, &submission).await?)
}

/// Both `userId` and `email` must be present, non-blank strings.
fn require_identity_fields(payload: &Value) -> Result<(), CoreError> {
    let present = |key: &str| {
        payload
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty())
    };

    if present("userId") && present("email") {
        Ok(())
    } else {
        Err(CoreError::Validation(MISSING_IDENTITY_MESSAGE.to_string()))
    }
}

// ---------------------------------------------------------------------------
// GET /surveys/{id}
// ---------------------------------------------------------------------------

/// Read back a stored survey.
pub async fn get_survey(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Survey>>> {
    let survey = SurveyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            id,
        }))?;
    Ok(Json(DataResponse { data: survey }))
}
