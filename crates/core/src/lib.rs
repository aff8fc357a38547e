//! Domain logic for the aftercare health survey.
//!
//! Everything here is pure: the draft document, the per-step validator, the
//! wizard controller, and the flattener that turns a draft into the record
//! accepted by the submission endpoint. I/O lives behind the
//! [`identity::IdentityProvider`] and [`submit::SurveySubmitter`] traits.

pub mod answers;
pub mod draft;
pub mod error;
pub mod flatten;
pub mod identity;
pub mod record;
pub mod steps;
pub mod submit;
pub mod types;
pub mod validation;
pub mod wizard;
