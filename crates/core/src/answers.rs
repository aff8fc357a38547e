//! Answer vocabularies for the survey's single- and multi-choice questions.
//!
//! Each enum serializes to the exact value the form submits, so a draft can
//! be round-tripped through JSON without translation tables.

use std::collections::HashSet;
use std::hash::Hash;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};

macro_rules! answer_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted value, in form order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            /// Wire value as submitted by the form.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

answer_enum! {
    Gender {
        Female => "female",
        Male => "male",
        NonBinary => "non-binary",
        PreferNotToSay => "prefer-not-to-say",
    }
}

answer_enum! {
    CancerType {
        Breast => "Breast",
        Lung => "Lung",
        Colorectal => "Colorectal",
        Prostate => "Prostate",
        Skin => "Skin",
        Blood => "Blood",
        Other => "Other",
    }
}

answer_enum! {
    Treatment {
        Surgery => "surgery",
        Chemotherapy => "chemotherapy",
        Radiation => "radiation",
        Immunotherapy => "immunotherapy",
    }
}

answer_enum! {
    Symptom {
        Fatigue => "fatigue",
        Pain => "pain",
        Nausea => "nausea",
        Sleep => "sleep",
        Appetite => "appetite",
        Breathing => "breathing",
        Mobility => "mobility",
    }
}

answer_enum! {
    SupportSystem {
        YesStrong => "yes-strong",
        YesLimited => "yes-limited",
        No => "no",
    }
}

answer_enum! {
    EmotionalConcern {
        Anxiety => "anxiety",
        Depression => "depression",
        Fear => "fear",
        Grief => "grief",
        Isolation => "isolation",
        Relationship => "relationship",
        BodyImage => "body-image",
        Identity => "identity",
    }
}

answer_enum! {
    RecoveryGoal {
        PhysicalStrength => "physical-strength",
        EmotionalBalance => "emotional-balance",
        Nutrition => "nutrition",
        SleepImprovement => "sleep-improvement",
        SocialConnections => "social-connections",
        WorkReturn => "work-return",
        FamilyBalance => "family-balance",
        LongTermHealth => "long-term-health",
    }
}

answer_enum! {
    SmokingStatus {
        Never => "never",
        Former => "former",
        Current => "current",
    }
}

answer_enum! {
    AlcoholUse {
        Never => "never",
        Occasionally => "occasionally",
        Regularly => "regularly",
    }
}

answer_enum! {
    RiskLevel {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

answer_enum! {
    CopingStyle {
        Adaptive => "adaptive",
        Avoidant => "avoidant",
        Unsure => "unsure",
    }
}

answer_enum! {
    CognitiveScore {
        Excellent => "excellent",
        Good => "good",
        Fair => "fair",
        Poor => "poor",
    }
}

answer_enum! {
    ChangeEffort {
        VeryWilling => "very-willing",
        SomewhatWilling => "somewhat-willing",
        NotWilling => "not-willing",
    }
}

// ---------------------------------------------------------------------------
// Scalar-or-list answers
// ---------------------------------------------------------------------------

/// A multi-choice answer that older clients sometimes sent as a bare value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer<T> {
    Scalar(T),
    List(Vec<T>),
}

impl<T> Default for Answer<T> {
    fn default() -> Self {
        Answer::List(Vec::new())
    }
}

impl<T: Clone> Answer<T> {
    /// The answer as a sequence; a scalar becomes a one-element list.
    pub fn to_vec(&self) -> Vec<T> {
        match self {
            Answer::Scalar(value) => vec![value.clone()],
            Answer::List(values) => values.clone(),
        }
    }
}

impl<T: Copy + Eq + Hash> Answer<T> {
    pub fn dedup(&mut self) {
        if let Answer::List(values) = self {
            dedup_preserving_order(values);
        }
    }
}

/// Normalize an optional scalar-or-list answer to a plain sequence.
///
/// - a list passes through unchanged
/// - a single value becomes a one-element list
/// - an absent answer becomes an empty list
pub fn normalize<T: Clone>(answer: Option<&Answer<T>>) -> Vec<T> {
    answer.map(Answer::to_vec).unwrap_or_default()
}

/// Remove repeated members, keeping the first occurrence of each.
pub fn dedup_preserving_order<T: Copy + Eq + Hash>(values: &mut Vec<T>) {
    let mut seen = HashSet::with_capacity(values.len());
    values.retain(|v| seen.insert(*v));
}

/// Deserialize an optional answer, treating `null` and blank strings as unset.
///
/// Form controls report a cleared radio group as `""`, which is not a member
/// of any answer vocabulary.
pub fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
    }
}

/// Deserialize a multi-select list, dropping repeated members.
pub fn unique_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Copy + Eq + Hash,
{
    let mut values = Vec::<T>::deserialize(deserializer)?;
    dedup_preserving_order(&mut values);
    Ok(values)
}

/// [`blank_as_none`] for scalar-or-list answers, dropping repeated list members.
pub fn unique_answer<'de, D, T>(deserializer: D) -> Result<Option<Answer<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Copy + Eq + Hash,
{
    let mut answer: Option<Answer<T>> = blank_as_none(deserializer)?;
    if let Some(answer) = answer.as_mut() {
        answer.dedup();
    }
    Ok(answer)
}
