//! Query layer. Each repository is a zero-sized struct of async functions
//! taking the pool explicitly.

pub mod survey_repo;

pub use survey_repo::SurveyRepo;
