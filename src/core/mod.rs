// Core algorithm exports
pub mod probability;
pub mod recommender;
pub mod scoring;

pub use self::probability::{acceptance_probability, adjusted_probability};
pub use self::recommender::{RecommendationSet, Recommender, MAX_RECOMMENDATIONS};
pub use self::scoring::{classify_fit, evaluate};
