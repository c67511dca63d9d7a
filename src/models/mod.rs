// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AcceptanceProbability, Activity, AiInsights, College, FitCategory, Recommendation,
    StudentProfile,
};
pub use requests::ListRecommendationsQuery;
pub use responses::{ErrorResponse, HealthResponse, RecommendationsResponse};
