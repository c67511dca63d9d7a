//! Compass Algo - College recommendation service for the Compass guidance app
//!
//! This library provides the recommendation engine used by the Compass
//! college guidance app: a deterministic multi-factor match score, a fit
//! classifier, an acceptance-probability estimator, and the ranking and
//! persistence discipline around them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{classify_fit, evaluate, RecommendationSet, Recommender, MAX_RECOMMENDATIONS};
pub use self::models::{
    AcceptanceProbability, College, FitCategory, Recommendation, RecommendationsResponse,
    StudentProfile,
};
