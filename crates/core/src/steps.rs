//! Survey wizard step definitions.
//!
//! The wizard walks the patient through seven sections in a fixed order.
//! Steps are 1-based everywhere: in the controller, the validator and the
//! section-update API.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 7;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 7;

/// The seven sections of the health survey, in wizard order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStep {
    PersonalInfo,
    TreatmentHistory,
    PhysicalHealth,
    EmotionalWellbeing,
    LifestyleGoals,
    LifestyleRisk,
    Perceptions,
}

impl SurveyStep {
    /// All steps in wizard order.
    pub const ALL: [SurveyStep; TOTAL_STEPS as usize] = [
        Self::PersonalInfo,
        Self::TreatmentHistory,
        Self::PhysicalHealth,
        Self::EmotionalWellbeing,
        Self::LifestyleGoals,
        Self::LifestyleRisk,
        Self::Perceptions,
    ];

    /// Convert a 1-based step number to a `SurveyStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::PersonalInfo),
            2 => Ok(Self::TreatmentHistory),
            3 => Ok(Self::PhysicalHealth),
            4 => Ok(Self::EmotionalWellbeing),
            5 => Ok(Self::LifestyleGoals),
            6 => Ok(Self::LifestyleRisk),
            7 => Ok(Self::Perceptions),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::PersonalInfo => 1,
            Self::TreatmentHistory => 2,
            Self::PhysicalHealth => 3,
            Self::EmotionalWellbeing => 4,
            Self::LifestyleGoals => 5,
            Self::LifestyleRisk => 6,
            Self::Perceptions => 7,
        }
    }

    /// Heading shown above the step's form.
    pub fn title(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Information",
            Self::TreatmentHistory => "Cancer Treatment History",
            Self::PhysicalHealth => "Physical Health",
            Self::EmotionalWellbeing => "Emotional Wellbeing",
            Self::LifestyleGoals => "Lifestyle & Goals",
            Self::LifestyleRisk => "Lifestyle Risk Factors",
            Self::Perceptions => "Care Perceptions & Long-Term Effects",
        }
    }

    /// One-line description shown under the heading.
    pub fn description(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Basic information to help us personalize your care plan",
            Self::TreatmentHistory => "Details about your cancer diagnosis and treatments",
            Self::PhysicalHealth => "Your current physical health status and symptoms",
            Self::EmotionalWellbeing => "Information about your emotional and mental wellbeing",
            Self::LifestyleGoals => "Your lifestyle habits and recovery goals",
            Self::LifestyleRisk => "Assess lifestyle risks and coping strategies",
            Self::Perceptions => {
                "Perceptions of care, stress levels, and long-term recovery outlook"
            }
        }
    }

    /// Name of the draft section this step edits (camelCase, as in JSON).
    pub fn section_key(self) -> &'static str {
        match self {
            Self::PersonalInfo => "personalInfo",
            Self::TreatmentHistory => "treatmentHistory",
            Self::PhysicalHealth => "physicalHealth",
            Self::EmotionalWellbeing => "emotionalWellbeing",
            Self::LifestyleGoals => "lifestyleGoals",
            Self::LifestyleRisk => "lifestyleRisk",
            Self::Perceptions => "perceptions",
        }
    }

    /// Whether this step gates forward navigation at all.
    ///
    /// Steps 3 to 5 collect optional answers and never block.
    pub fn is_gated(self) -> bool {
        !matches!(
            self,
            Self::PhysicalHealth | Self::EmotionalWellbeing | Self::LifestyleGoals
        )
    }
}

/// Completion percentage shown in the wizard's progress bar.
pub fn progress_percent(step: u8) -> u8 {
    let step = step.clamp(MIN_STEP, MAX_STEP);
    ((f64::from(step) / f64::from(TOTAL_STEPS)) * 100.0).round() as u8
}
