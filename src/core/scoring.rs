use crate::core::probability::acceptance_probability;
use crate::models::{AiInsights, College, FitCategory, Recommendation, StudentProfile};

/// Upper bound on the final match score
const MAX_SCORE: u32 = 100;

/// Score one (profile, college) pair and build the full recommendation
///
/// Scoring is a sum of six independent factors:
///
/// ```text
/// GPA              30 points
/// SAT/ACT          25 points (SAT consulted first; 0 with neither)
/// Preferred major  20 points
/// Location         10 points
/// Budget           10 points
/// Extracurriculars  5 points
/// ```
///
/// The sum is clamped to 100. Each factor contributes at most one
/// strength or one concern string.
pub fn evaluate(profile: &StudentProfile, college: &College) -> Recommendation {
    let mut score: u32 = 0;
    let mut strengths: Vec<String> = Vec::new();
    let mut concerns: Vec<String> = Vec::new();

    // GPA (30 points). An absent GPA takes the lowest branch, same as a
    // below-average one. That is the production rule set, not an accident.
    match profile.gpa {
        Some(gpa) if gpa >= college.avg_gpa => {
            score += 30;
            strengths.push("Your GPA meets or exceeds the average".to_string());
        }
        Some(gpa) if gpa >= college.avg_gpa - 0.3 => {
            score += 20;
            strengths.push("Your GPA is competitive".to_string());
        }
        _ => {
            score += 10;
            concerns.push("GPA is below average for admitted students".to_string());
        }
    }

    // Test scores (25 points). At most one scale is consulted.
    if let Some(sat) = profile.sat_score {
        score += test_score_points(
            f64::from(sat),
            f64::from(college.sat_range_min),
            f64::from(college.sat_range_max),
            "SAT",
            &mut strengths,
            &mut concerns,
        );
    } else if let Some(act) = profile.act_score {
        score += test_score_points(
            f64::from(act),
            f64::from(college.act_range_min),
            f64::from(college.act_range_max),
            "ACT",
            &mut strengths,
            &mut concerns,
        );
    }

    // Preferred major (20 points): case-insensitive substring match
    // against the offered majors.
    let major_match = profile.preferred_majors.iter().any(|major| {
        let major = major.to_lowercase();
        college
            .majors_offered
            .iter()
            .any(|offered| offered.to_lowercase().contains(&major))
    });
    if major_match {
        score += 20;
        strengths.push("Offers your preferred major(s)".to_string());
    } else {
        concerns.push("May not offer your exact preferred majors".to_string());
    }

    // Location (10 points). No stated preference scores a flat 5.
    if profile.preferred_locations.is_empty() {
        score += 5;
    } else {
        let state = college.state.to_lowercase();
        let city = college.city.to_lowercase();
        let location_match = profile.preferred_locations.iter().any(|loc| {
            let loc = loc.to_lowercase();
            state.contains(&loc) || city.contains(&loc)
        });
        if location_match {
            score += 10;
            strengths.push("Located in your preferred area".to_string());
        }
    }

    // Budget (10 points). No stated budget scores a flat 5.
    match profile.budget_max {
        Some(budget) if college.tuition_out_state <= budget => {
            score += 10;
            strengths.push("Tuition fits within your budget".to_string());
        }
        Some(_) => {
            score += 3;
            concerns.push("Tuition may exceed your budget (scholarships available)".to_string());
        }
        None => {
            score += 5;
        }
    }

    // Extracurriculars (5 points): only the activity count matters.
    if profile.extracurriculars.len() > 3 {
        score += 5;
        strengths.push("Strong extracurricular profile".to_string());
    }

    let match_score = score.min(MAX_SCORE);
    let fit_category = classify_fit(match_score);
    let reasoning = build_reasoning(profile, college, fit_category, &strengths);

    Recommendation {
        college_id: college.id.clone(),
        match_score,
        fit_category,
        reasoning,
        strengths,
        concerns,
        ai_insights: AiInsights {
            acceptance_probability: acceptance_probability(match_score, college.acceptance_rate),
            ranking: college.ranking,
            specializations: college.specializations.clone(),
        },
    }
}

/// Score a test result against a college's reported range (25 points max)
///
/// The midpoint comparison is done in floating point so an odd range sum
/// does not truncate.
fn test_score_points(
    value: f64,
    range_min: f64,
    range_max: f64,
    label: &str,
    strengths: &mut Vec<String>,
    concerns: &mut Vec<String>,
) -> u32 {
    if value >= range_max {
        strengths.push(format!("{} score is in the top range", label));
        25
    } else if value >= (range_min + range_max) / 2.0 {
        strengths.push(format!("{} score is competitive", label));
        18
    } else if value >= range_min {
        12
    } else {
        concerns.push(format!("{} score is below the typical range", label));
        5
    }
}

/// Classify a match score into a fit category (first match wins)
#[inline]
pub fn classify_fit(score: u32) -> FitCategory {
    if score >= 85 {
        FitCategory::Safety
    } else if score >= 65 {
        FitCategory::Target
    } else {
        FitCategory::Reach
    }
}

/// Build the explanation text shown to the student
///
/// Template: test identity, fit category (lower-cased), the first two
/// strengths, then the college description verbatim.
fn build_reasoning(
    profile: &StudentProfile,
    college: &College,
    fit: FitCategory,
    strengths: &[String],
) -> String {
    let gpa = profile
        .gpa
        .map(|g| g.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let test = if let Some(sat) = profile.sat_score {
        format!("SAT: {}", sat)
    } else if let Some(act) = profile.act_score {
        format!("ACT: {}", act)
    } else {
        "No test scores".to_string()
    };

    let top_strengths = strengths
        .iter()
        .take(2)
        .cloned()
        .collect::<Vec<_>>()
        .join(". ");

    format!(
        "Based on your academic profile (GPA: {}, {}), {} is a {} school for you. {}. {}",
        gpa,
        test,
        college.name,
        fit.as_str().to_lowercase(),
        top_strengths,
        college.description
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Activity;

    fn test_profile() -> StudentProfile {
        StudentProfile {
            id: "student_1".to_string(),
            gpa: Some(3.8),
            sat_score: Some(1450),
            act_score: None,
            preferred_majors: vec!["Computer Science".to_string()],
            interests: vec![],
            career_goals: None,
            preferred_locations: vec!["California".to_string()],
            budget_max: Some(60000.0),
            extracurriculars: (0..4)
                .map(|i| Activity {
                    name: format!("Activity {}", i),
                    role: None,
                    duration: None,
                    description: None,
                })
                .collect(),
        }
    }

    fn test_college() -> College {
        College {
            id: "college_1".to_string(),
            name: "Golden State Tech".to_string(),
            state: "California".to_string(),
            city: "San Jose".to_string(),
            acceptance_rate: 20.0,
            avg_gpa: 3.5,
            sat_range_min: 1300,
            sat_range_max: 1500,
            act_range_min: 28,
            act_range_max: 34,
            tuition_out_state: 55000.0,
            majors_offered: vec!["Computer Science".to_string(), "Engineering".to_string()],
            specializations: vec!["AI Research".to_string()],
            ranking: 10,
            description: "A leading technology institute.".to_string(),
        }
    }

    #[test]
    fn test_reference_scenario_scores_93() {
        // 30 (GPA) + 18 (SAT above midpoint) + 20 (major) + 10 (location)
        // + 10 (budget) + 5 (extracurriculars)
        let rec = evaluate(&test_profile(), &test_college());

        assert_eq!(rec.match_score, 93);
        assert_eq!(rec.fit_category, FitCategory::Safety);
        assert_eq!(
            rec.ai_insights.acceptance_probability,
            crate::models::AcceptanceProbability::Low
        );
    }

    #[test]
    fn test_gpa_branches() {
        let college = test_college();

        let mut profile = test_profile();
        profile.gpa = Some(3.5);
        let rec = evaluate(&profile, &college);
        assert!(rec
            .strengths
            .contains(&"Your GPA meets or exceeds the average".to_string()));

        profile.gpa = Some(3.3);
        let rec = evaluate(&profile, &college);
        assert!(rec.strengths.contains(&"Your GPA is competitive".to_string()));
        assert_eq!(rec.match_score, 83);

        profile.gpa = Some(2.9);
        let rec = evaluate(&profile, &college);
        assert!(rec
            .concerns
            .contains(&"GPA is below average for admitted students".to_string()));
    }

    #[test]
    fn test_missing_gpa_takes_lowest_branch() {
        let mut profile = test_profile();
        profile.gpa = None;

        let rec = evaluate(&profile, &test_college());

        // 10 + 18 + 20 + 10 + 10 + 5
        assert_eq!(rec.match_score, 73);
        assert!(rec
            .concerns
            .contains(&"GPA is below average for admitted students".to_string()));
    }

    #[test]
    fn test_sat_takes_priority_over_act() {
        let mut profile = test_profile();
        profile.sat_score = Some(1500);
        profile.act_score = Some(20); // would score lower on its own

        let rec = evaluate(&profile, &test_college());

        assert!(rec
            .strengths
            .contains(&"SAT score is in the top range".to_string()));
        assert!(!rec.strengths.iter().any(|s| s.starts_with("ACT")));
    }

    #[test]
    fn test_act_used_when_sat_absent() {
        let mut profile = test_profile();
        profile.sat_score = None;
        profile.act_score = Some(34);

        let rec = evaluate(&profile, &test_college());

        assert!(rec
            .strengths
            .contains(&"ACT score is in the top range".to_string()));
        assert_eq!(rec.match_score, 100);
    }

    #[test]
    fn test_no_test_scores_contribute_zero() {
        let mut profile = test_profile();
        profile.sat_score = None;
        profile.act_score = None;

        let rec = evaluate(&profile, &test_college());

        // 30 + 0 + 20 + 10 + 10 + 5
        assert_eq!(rec.match_score, 75);
        assert!(!rec.strengths.iter().any(|s| s.contains("score")));
        assert!(!rec.concerns.iter().any(|c| c.contains("score")));
    }

    #[test]
    fn test_sat_below_range_scores_five_with_concern() {
        let mut profile = test_profile();
        profile.sat_score = Some(1200);

        let rec = evaluate(&profile, &test_college());

        // 30 + 5 + 20 + 10 + 10 + 5
        assert_eq!(rec.match_score, 80);
        assert!(rec
            .concerns
            .contains(&"SAT score is below the typical range".to_string()));
    }

    #[test]
    fn test_sat_in_lower_half_scores_twelve_silently() {
        let mut profile = test_profile();
        profile.sat_score = Some(1350);

        let rec = evaluate(&profile, &test_college());

        // 30 + 12 + 20 + 10 + 10 + 5
        assert_eq!(rec.match_score, 87);
        assert!(!rec.strengths.iter().any(|s| s.starts_with("SAT")));
        assert!(!rec.concerns.iter().any(|c| c.starts_with("SAT")));
    }

    #[test]
    fn test_odd_range_midpoint_not_truncated() {
        let mut college = test_college();
        college.sat_range_min = 1300;
        college.sat_range_max = 1501; // midpoint 1400.5

        let mut profile = test_profile();
        profile.sat_score = Some(1400);

        let rec = evaluate(&profile, &college);

        // 1400 < 1400.5, so only the 12-point branch applies
        assert_eq!(rec.match_score, 87);
    }

    #[test]
    fn test_major_match_is_case_insensitive_substring() {
        let mut profile = test_profile();
        profile.preferred_majors = vec!["computer".to_string()];

        let rec = evaluate(&profile, &test_college());

        assert!(rec
            .strengths
            .contains(&"Offers your preferred major(s)".to_string()));
    }

    #[test]
    fn test_major_miss_adds_concern_without_points() {
        let mut profile = test_profile();
        profile.preferred_majors = vec!["History".to_string()];

        let rec = evaluate(&profile, &test_college());

        // 30 + 18 + 0 + 10 + 10 + 5
        assert_eq!(rec.match_score, 73);
        assert!(rec
            .concerns
            .contains(&"May not offer your exact preferred majors".to_string()));
    }

    #[test]
    fn test_no_location_preference_scores_flat_five() {
        let mut profile = test_profile();
        profile.preferred_locations = vec![];

        let rec = evaluate(&profile, &test_college());

        // 30 + 18 + 20 + 5 + 10 + 5
        assert_eq!(rec.match_score, 88);
        assert!(!rec
            .strengths
            .contains(&"Located in your preferred area".to_string()));
    }

    #[test]
    fn test_location_matches_city_too() {
        let mut profile = test_profile();
        profile.preferred_locations = vec!["san jose".to_string()];

        let rec = evaluate(&profile, &test_college());

        assert!(rec
            .strengths
            .contains(&"Located in your preferred area".to_string()));
    }

    #[test]
    fn test_budget_exceeded_scores_three_with_concern() {
        let mut profile = test_profile();
        profile.budget_max = Some(40000.0);

        let rec = evaluate(&profile, &test_college());

        // 30 + 18 + 20 + 10 + 3 + 5
        assert_eq!(rec.match_score, 86);
        assert!(rec
            .concerns
            .contains(&"Tuition may exceed your budget (scholarships available)".to_string()));
    }

    #[test]
    fn test_no_budget_scores_flat_five() {
        let mut profile = test_profile();
        profile.budget_max = None;

        let rec = evaluate(&profile, &test_college());

        // 30 + 18 + 20 + 10 + 5 + 5
        assert_eq!(rec.match_score, 88);
    }

    #[test]
    fn test_three_activities_earn_nothing() {
        let mut profile = test_profile();
        profile.extracurriculars.truncate(3);

        let rec = evaluate(&profile, &test_college());

        assert_eq!(rec.match_score, 88);
        assert!(!rec
            .strengths
            .contains(&"Strong extracurricular profile".to_string()));
    }

    #[test]
    fn test_perfect_profile_clamps_at_100() {
        let mut profile = test_profile();
        profile.gpa = Some(4.0);
        profile.sat_score = Some(1550);

        let rec = evaluate(&profile, &test_college());

        assert_eq!(rec.match_score, 100);
    }

    #[test]
    fn test_classify_fit_thresholds() {
        assert_eq!(classify_fit(100), FitCategory::Safety);
        assert_eq!(classify_fit(85), FitCategory::Safety);
        assert_eq!(classify_fit(84), FitCategory::Target);
        assert_eq!(classify_fit(65), FitCategory::Target);
        assert_eq!(classify_fit(64), FitCategory::Reach);
        assert_eq!(classify_fit(0), FitCategory::Reach);
    }

    #[test]
    fn test_reasoning_text_template() {
        let rec = evaluate(&test_profile(), &test_college());

        assert_eq!(
            rec.reasoning,
            "Based on your academic profile (GPA: 3.8, SAT: 1450), Golden State Tech is a \
             safety school for you. Your GPA meets or exceeds the average. SAT score is \
             competitive. A leading technology institute."
        );
    }

    #[test]
    fn test_reasoning_without_gpa_or_tests() {
        let mut profile = test_profile();
        profile.gpa = None;
        profile.sat_score = None;
        profile.act_score = None;

        let rec = evaluate(&profile, &test_college());

        assert!(rec
            .reasoning
            .starts_with("Based on your academic profile (GPA: N/A, No test scores),"));
    }

    #[test]
    fn test_each_factor_contributes_at_most_one_string() {
        let rec = evaluate(&test_profile(), &test_college());

        // Six factors, so never more than six strings in total
        assert!(rec.strengths.len() + rec.concerns.len() <= 6);
    }
}
