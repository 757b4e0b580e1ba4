//! Salary matcher — overlap between expected and offered compensation bands.

/// One-sided ranges are widened to `min × 1.5` to approximate a band.
const OPEN_RANGE_MULTIPLIER: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryScore {
    pub score: f64,
    pub in_range: bool,
}

impl SalaryScore {
    const fn new(score: f64, in_range: bool) -> Self {
        Self { score, in_range }
    }
}

/// Scores the candidate's expected band against the job's offered band.
///
/// Algorithm:
/// 1. No data on either side → 50 (no signal)
/// 2. Job discloses nothing while the candidate has an expectation → 30
/// 3. Candidate has no expectation → 100
/// 4. Derive effective bounds (missing minimums are 0, missing maximums are `min × 1.5`), then:
///    - bands overlap → share of the candidate band covered by the job band
///    - job tops out below the candidate minimum → `50 - shortfall%`, floored at 0
///    - job starts above the candidate maximum → 100
pub fn score_salary(
    candidate_min: Option<f64>,
    candidate_max: Option<f64>,
    job_min: Option<f64>,
    job_max: Option<f64>,
) -> SalaryScore {
    let candidate_has_data = candidate_min.is_some() || candidate_max.is_some();
    let job_has_data = job_min.is_some() || job_max.is_some();

    if !candidate_has_data && !job_has_data {
        return SalaryScore::new(50.0, false);
    }
    if !job_has_data {
        return SalaryScore::new(30.0, false);
    }
    if !candidate_has_data {
        return SalaryScore::new(100.0, true);
    }

    let cand_min = candidate_min.unwrap_or(0.0);
    let cand_max = candidate_max.unwrap_or(cand_min * OPEN_RANGE_MULTIPLIER);
    let offer_min = job_min.unwrap_or(0.0);
    let offer_max = job_max.unwrap_or(offer_min * OPEN_RANGE_MULTIPLIER);

    if offer_max >= cand_min && offer_min <= cand_max {
        let overlap = cand_max.min(offer_max) - cand_min.max(offer_min);
        let candidate_range = cand_max - cand_min;
        let coverage = if candidate_range > 0.0 {
            overlap / candidate_range * 100.0
        } else {
            100.0
        };
        return SalaryScore::new(coverage.clamp(0.0, 100.0), true);
    }

    if offer_max < cand_min {
        let shortfall = if cand_min > 0.0 {
            (cand_min - offer_max) / cand_min * 100.0
        } else {
            0.0
        };
        return SalaryScore::new((50.0 - shortfall).max(0.0), false);
    }

    if offer_min > cand_max {
        return SalaryScore::new(100.0, true);
    }

    SalaryScore::new(50.0, false)
}
