//! HTTP client for the survey submission endpoint.
//!
//! [`HttpSurveySubmitter`] is the production [`SurveySubmitter`]: it posts a
//! [`SurveySubmission`] to `{base_url}/api/v1/surveys` once and reports the
//! endpoint's failure message on a non-2xx reply.

use aftercare_core::error::CoreError;
use aftercare_core::record::{CreatedSurvey, SurveySubmission};
use aftercare_core::submit::SurveySubmitter;
use async_trait::async_trait;
use serde::Deserialize;

/// Path of the creation endpoint, relative to the server's base URL.
pub const SURVEYS_PATH: &str = "/api/v1/surveys";

/// Errors from the submission HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum SubmitClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint returned a non-2xx status code.
    #[error("Survey API error ({status}): {body}")]
    Api { status: u16, body: String },
}

/// Failure body written by the endpoint. Extra diagnostic keys are ignored.
#[derive(Debug, Deserialize)]
struct FailureBody {
    message: String,
}

impl From<SubmitClientError> for CoreError {
    fn from(err: SubmitClientError) -> Self {
        match err {
            SubmitClientError::Request(e) => CoreError::Internal(e.to_string()),
            SubmitClientError::Api { status, body } => {
                let message = serde_json::from_str::<FailureBody>(&body)
                    .map(|b| b.message)
                    .unwrap_or(body);
                CoreError::Submission { status, message }
            }
        }
    }
}

pub struct HttpSurveySubmitter {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSurveySubmitter {
    /// * `base_url` - server root, e.g. `http://localhost:3000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{SURVEYS_PATH}", self.base_url)
    }

    /// Post the survey and decode the created row.
    pub async fn post_survey(
        &self,
        submission: &SurveySubmission,
    ) -> Result<CreatedSurvey, SubmitClientError> {
        let response = self
            .client
            .post(self.endpoint())
            .json(submission)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    // ---- private helpers ----

    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, SubmitClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(SubmitClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, SubmitClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl SurveySubmitter for HttpSurveySubmitter {
    async fn submit(&self, submission: &SurveySubmission) -> Result<CreatedSurvey, CoreError> {
        tracing::debug!(user_id = %submission.user_id, url = %self.endpoint(), "Posting survey");
        Ok(self.post_survey(submission).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aftercare_core::draft::SurveyDraft;
    use aftercare_core::flatten::flatten;
    use assert_matches::assert_matches;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    /// Serve `router` on an ephemeral local port and return its base URL.
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn submission() -> SurveySubmission {
        SurveySubmission::new("user-42", flatten(&SurveyDraft::default()))
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let submitter = HttpSurveySubmitter::new("http://localhost:3000/");
        assert_eq!(submitter.endpoint(), "http://localhost:3000/api/v1/surveys");
    }

    #[test]
    fn failure_message_is_extracted_from_body() {
        let err = SubmitClientError::Api {
            status: 500,
            body: r#"{"error":"Survey creation failed","message":"Missing required userId or email."}"#
                .into(),
        };
        assert_matches!(
            CoreError::from(err),
            CoreError::Submission { status: 500, message } if message == "Missing required userId or email."
        );

        let err = SubmitClientError::Api {
            status: 502,
            body: "Bad Gateway".into(),
        };
        assert_matches!(
            CoreError::from(err),
            CoreError::Submission { status: 502, message } if message == "Bad Gateway"
        );
    }

    #[tokio::test]
    async fn created_row_is_decoded() {
        let router = Router::new().route(
            SURVEYS_PATH,
            post(|Json(body): Json<Value>| async move {
                let mut row = body;
                row["id"] = json!("0190a0a0-0000-7000-8000-000000000001");
                row["createdAt"] = json!("2025-01-01T00:00:00Z");
                row["updatedAt"] = json!("2025-01-01T00:00:00Z");
                (StatusCode::CREATED, Json(row))
            }),
        );
        let submitter = HttpSurveySubmitter::new(serve(router).await);

        let created = submitter.submit(&submission()).await.unwrap();
        assert_eq!(created.user_id, "user-42");
        assert_eq!(created.id.to_string(), "0190a0a0-0000-7000-8000-000000000001");
    }

    #[tokio::test]
    async fn endpoint_failure_becomes_submission_error() {
        let router = Router::new().route(
            SURVEYS_PATH,
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Survey creation failed",
                        "message": "Missing required userId or email."
                    })),
                )
            }),
        );
        let submitter = HttpSurveySubmitter::new(serve(router).await);

        assert_matches!(
            submitter.submit(&submission()).await,
            Err(CoreError::Submission { status: 500, message }) if message.contains("userId")
        );
    }

    #[tokio::test]
    async fn unreachable_server_is_internal_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let submitter = HttpSurveySubmitter::new(format!("http://{addr}"));
        assert_matches!(
            submitter.submit(&submission()).await,
            Err(CoreError::Internal(_))
        );
    }
}
