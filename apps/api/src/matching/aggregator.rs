//! Match aggregator — combines the four sub-scores into one `JobMatchScore`.

use crate::matching::experience::score_experience;
use crate::matching::location::score_location;
use crate::matching::salary::score_salary;
use crate::matching::skills::score_skills;
use crate::models::candidate::CandidateProfile;
use crate::models::job::Job;
use crate::models::match_score::{JobMatchScore, MatchDetails};

const MAX_MISSING_SKILLS: usize = 5;

/// Relative importance of each sub-score. The default set sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub location: f64,
    pub salary: f64,
}

impl MatchWeights {
    pub const DEFAULT: MatchWeights = MatchWeights {
        skills: 0.40,
        experience: 0.25,
        location: 0.20,
        salary: 0.15,
    };
}

/// Scores one candidate against one job with the default weights.
///
/// Pure: identical inputs always produce identical output.
pub fn calculate_job_match(candidate: &CandidateProfile, job: &Job) -> JobMatchScore {
    calculate_weighted_match(candidate, job, &MatchWeights::DEFAULT)
}

pub fn calculate_weighted_match(
    candidate: &CandidateProfile,
    job: &Job,
    weights: &MatchWeights,
) -> JobMatchScore {
    let skills = score_skills(&candidate.skills, &job.description, job.tags.as_ref());
    let experience = score_experience(
        candidate.years_experience,
        job.minimum_experience,
        job.experience_level.as_deref(),
    );
    let location = score_location(
        candidate.location(),
        candidate.willing_to_relocate(),
        &job.location,
        candidate.preferred_locations(),
    );
    let salary = score_salary(
        candidate.expected_salary_min,
        candidate.expected_salary_max,
        job.salary_min,
        job.salary_max,
    );

    let overall = skills.score * weights.skills
        + experience.score * weights.experience
        + location.score * weights.location
        + salary.score * weights.salary;

    let mut missing_skills = skills.missing;
    missing_skills.truncate(MAX_MISSING_SKILLS);

    JobMatchScore {
        job_id: job.id.clone(),
        match_score: round_score(overall),
        skills_match_score: round_score(skills.score),
        experience_match_score: round_score(experience.score),
        location_match_score: round_score(location.score),
        salary_match_score: round_score(salary.score),
        match_details: MatchDetails {
            matched_skills: skills.matched,
            missing_skills,
            experience_gap: experience.gap,
            location_match: location.matched,
            salary_in_range: salary.in_range,
        },
    }
}

/// Clamps to 0–100 and rounds half away from zero to 2 decimals.
pub fn round_score(value: f64) -> f64 {
    (value.clamp(0.0, 100.0) * 100.0).round() / 100.0
}
