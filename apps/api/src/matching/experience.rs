//! Experience matcher — candidate years against the job's minimum requirement.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperienceScore {
    pub score: f64,
    pub gap: i32,
}

/// Scores years of experience. First matching rule wins:
/// no candidate years → 50; no stated requirement → 100;
/// otherwise by `gap = minimum - years`: ≤0 → 100, 1 → 80, 2 → 60, else `max(0, 40 - gap×10)`.
///
/// `job_experience_level` only counts as "a requirement exists".
pub fn score_experience(
    candidate_years: Option<i32>,
    job_min_experience: Option<i32>,
    job_experience_level: Option<&str>,
) -> ExperienceScore {
    let Some(years) = candidate_years else {
        return ExperienceScore {
            score: 50.0,
            gap: 0,
        };
    };

    if job_min_experience.is_none() && job_experience_level.is_none() {
        return ExperienceScore {
            score: 100.0,
            gap: 0,
        };
    }

    let gap = job_min_experience.unwrap_or(0) - years;
    let score = match gap {
        g if g <= 0 => 100.0,
        1 => 80.0,
        2 => 60.0,
        g => (40.0 - f64::from(g) * 10.0).max(0.0),
    };

    ExperienceScore { score, gap }
}
