//! Wire types exchanged with the submission endpoint.
//!
//! [`FlatSurveyRecord`] is the single-level shape of a finished survey;
//! [`SurveySubmission`] adds the submitting user's id and is the request
//! body of `POST /api/v1/surveys`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Calendar dates
// ---------------------------------------------------------------------------

/// A calendar date parsed from a form's date string.
///
/// Parsing never fails: an unparseable string yields the invalid date,
/// which serializes as `null` and is stored as SQL `NULL`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CalendarDate(Option<NaiveDate>);

impl CalendarDate {
    /// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp (its UTC date is kept).
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
            return Self(Some(date));
        }
        match DateTime::parse_from_rfc3339(input) {
            Ok(ts) => Self(Some(ts.with_timezone(&Utc).date_naive())),
            Err(_) => Self(None),
        }
    }

    pub fn invalid() -> Self {
        Self(None)
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// The parsed date, or `None` for the invalid date.
    pub fn date(&self) -> Option<NaiveDate> {
        self.0
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Some(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or_else(Self::invalid, Self::parse))
    }
}

// ---------------------------------------------------------------------------
// Flattened record
// ---------------------------------------------------------------------------

/// Every survey answer as a flat key/value record, one key per stored column.
///
/// Fields marked `#[serde(default)]` may be omitted by older clients and are
/// stored as empty text or an empty list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatSurveyRecord {
    // Personal information
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub date_of_birth: CalendarDate,
    pub gender: String,

    // Treatment history
    pub type_of_cancer: String,
    #[serde(default)]
    pub date_of_diagnosis: CalendarDate,
    #[serde(default)]
    pub date_treatment_ended: CalendarDate,
    #[serde(default)]
    pub treatments_received: Vec<String>,
    pub other_treatments: String,

    // Physical health
    #[serde(default)]
    pub physical_health: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub physical_activity: String,
    #[serde(default)]
    pub physical_concerns: String,
    #[serde(default)]
    pub medications: String,
    #[serde(default)]
    pub allergies: String,

    // Emotional wellbeing
    #[serde(default)]
    pub emotional_wellbeing: String,
    #[serde(default)]
    pub emotional_symptoms: Vec<String>,
    #[serde(default)]
    pub support_system: String,
    #[serde(default)]
    pub emotional_concerns: String,

    // Lifestyle and goals
    pub diet: String,
    pub sleep_quality: String,
    #[serde(default)]
    pub recovery_goals: Vec<String>,
    #[serde(default)]
    pub additional_info: String,

    // Lifestyle risk
    pub smoking_status: String,
    pub alcohol_use: String,
    pub risk_stratification: String,
    pub cardiovascular_risk: bool,
    pub fertility_concern: bool,
    pub coping_style: String,
    pub ptsd_flag: bool,
    pub cognitive_function_score: String,

    // Perceptions
    pub care_coordination_score: i32,
    pub lifestyle_change_effort: String,
    pub fear_of_recurrence_score: i32,
    pub no_significant_issues: bool,
    pub stress: bool,
    #[serde(default)]
    pub late_effect_symptoms: String,
}

/// Request body for the submission endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    /// Id of the authenticated identity, as issued by the auth provider.
    pub user_id: String,
    #[serde(flatten)]
    pub record: FlatSurveyRecord,
}

impl SurveySubmission {
    pub fn new(user_id: impl Into<String>, record: FlatSurveyRecord) -> Self {
        Self {
            user_id: user_id.into(),
            record,
        }
    }
}

/// The parts of a created survey row the wizard cares about.
///
/// Deserializes from the endpoint's full `201` body; other columns are
/// ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSurvey {
    pub id: DbId,
    pub user_id: String,
    pub created_at: Timestamp,
}
