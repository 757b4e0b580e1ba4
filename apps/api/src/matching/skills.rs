//! Skills matcher — overlap between a candidate's skill list and a job's text and tags.

use crate::models::job::JobTags;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SkillsScore {
    pub score: f64,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Scores candidate skills against a job description and its tag skills.
///
/// Algorithm:
/// 1. No candidate skills → score 0, nothing matched or missing
/// 2. A skill matches when its lower-cased form is a substring of the description
///    or of any tag skill ("go" matches "mango"; kept as-is)
/// 3. A tag skill is missing when no candidate skill equals it case-insensitively
/// 4. score = matched / candidate skills × 100
pub fn score_skills(
    candidate_skills: &[String],
    job_description: &str,
    job_tags: Option<&JobTags>,
) -> SkillsScore {
    if candidate_skills.is_empty() {
        return SkillsScore::default();
    }

    let description = job_description.to_lowercase();
    let tag_skills: Vec<String> = job_tags
        .map(|t| t.skills.iter().map(|s| s.to_lowercase()).collect())
        .unwrap_or_default();

    let matched: Vec<String> = candidate_skills
        .iter()
        .filter(|skill| {
            let skill = skill.to_lowercase();
            description.contains(&skill) || tag_skills.iter().any(|tag| tag.contains(&skill))
        })
        .cloned()
        .collect();

    let candidate_lower: Vec<String> = candidate_skills.iter().map(|s| s.to_lowercase()).collect();
    let missing: Vec<String> = job_tags
        .map(|t| {
            t.skills
                .iter()
                .filter(|tag| {
                    let tag = tag.to_lowercase();
                    !candidate_lower.iter().any(|c| *c == tag)
                })
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    let score = matched.len() as f64 / candidate_skills.len() as f64 * 100.0;

    SkillsScore {
        score,
        matched,
        missing,
    }
}
