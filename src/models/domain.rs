use serde::{Deserialize, Serialize};

/// Student academic profile as stored by the data platform
///
/// Optional numeric fields stay `Option` so "absent" and "zero" are
/// distinguishable; the scoring rules depend on that distinction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: String,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub sat_score: Option<u16>,
    #[serde(default)]
    pub act_score: Option<u8>,
    #[serde(default)]
    pub preferred_majors: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub career_goals: Option<String>,
    #[serde(default)]
    pub preferred_locations: Vec<String>,
    #[serde(default)]
    pub budget_max: Option<f64>,
    #[serde(default)]
    pub extracurriculars: Vec<Activity>,
}

/// Extracurricular activity entry. Only the count matters to scoring;
/// the detail fields are carried for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One college catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct College {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub city: String,
    pub acceptance_rate: f64,
    pub avg_gpa: f64,
    pub sat_range_min: u16,
    pub sat_range_max: u16,
    pub act_range_min: u8,
    pub act_range_max: u8,
    pub tuition_out_state: f64,
    #[serde(default)]
    pub majors_offered: Vec<String>,
    #[serde(default)]
    pub specializations: Vec<String>,
    pub ranking: u32,
    #[serde(default)]
    pub description: String,
}

/// Fit classification derived solely from the match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitCategory {
    Safety,
    Target,
    Reach,
}

impl FitCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitCategory::Safety => "Safety",
            FitCategory::Target => "Target",
            FitCategory::Reach => "Reach",
        }
    }
}

/// Qualitative admission-probability tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AcceptanceProbability {
    High,
    Moderate,
    Low,
    #[serde(rename = "Very Low")]
    VeryLow,
}

impl AcceptanceProbability {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcceptanceProbability::High => "High",
            AcceptanceProbability::Moderate => "Moderate",
            AcceptanceProbability::Low => "Low",
            AcceptanceProbability::VeryLow => "Very Low",
        }
    }
}

/// Derived insight block attached to every recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiInsights {
    pub acceptance_probability: AcceptanceProbability,
    pub ranking: u32,
    pub specializations: Vec<String>,
}

/// Scored recommendation for one (profile, college) pair
///
/// The persisted form is keyed by (user_id, college_id); regeneration
/// overwrites the prior record in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub college_id: String,
    pub match_score: u32,
    pub fit_category: FitCategory,
    pub reasoning: String,
    pub strengths: Vec<String>,
    pub concerns: Vec<String>,
    pub ai_insights: AiInsights,
}
