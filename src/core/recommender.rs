use crate::core::scoring::evaluate;
use crate::models::{College, Recommendation, StudentProfile};

/// Number of recommendations kept after ranking
pub const MAX_RECOMMENDATIONS: usize = 15;

/// Result of a generation run
#[derive(Debug)]
pub struct RecommendationSet {
    pub recommendations: Vec<Recommendation>,
    pub total_evaluated: usize,
}

/// Recommendation orchestrator
///
/// Scores every college in the supplied catalog, ranks the results, and
/// keeps the top set. Pure: the same profile and catalog always produce
/// the same output, regardless of catalog order.
#[derive(Debug, Clone)]
pub struct Recommender {
    max_results: usize,
}

impl Recommender {
    pub fn new() -> Self {
        Self {
            max_results: MAX_RECOMMENDATIONS,
        }
    }

    pub fn with_max_results(max_results: usize) -> Self {
        Self { max_results }
    }

    /// Score and rank the full catalog for one student
    ///
    /// Results are ordered descending by match score. Ties order by
    /// ascending college ranking so output is reproducible run to run.
    pub fn generate(&self, profile: &StudentProfile, colleges: &[College]) -> RecommendationSet {
        let total_evaluated = colleges.len();

        let mut recommendations: Vec<Recommendation> = colleges
            .iter()
            .map(|college| evaluate(profile, college))
            .collect();

        recommendations.sort_by(|a, b| {
            b.match_score
                .cmp(&a.match_score)
                .then_with(|| a.ai_insights.ranking.cmp(&b.ai_insights.ranking))
        });

        recommendations.truncate(self.max_results);

        RecommendationSet {
            recommendations,
            total_evaluated,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::new()
    }
}
