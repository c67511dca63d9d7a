use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for reading back persisted recommendations
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListRecommendationsQuery {
    #[validate(range(min = 1, max = 50))]
    #[serde(default = "default_limit")]
    pub limit: u16,
    #[serde(default)]
    pub offset: u32,
}

fn default_limit() -> u16 {
    15
}
