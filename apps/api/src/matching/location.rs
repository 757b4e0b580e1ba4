//! Location matcher — remote, same-place, preferred-location and relocation rules.

const REMOTE_MARKERS: [&str; 2] = ["remote", "anywhere"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationScore {
    pub score: f64,
    pub matched: bool,
}

impl LocationScore {
    const fn new(score: f64, matched: bool) -> Self {
        Self { score, matched }
    }
}

/// Scores geographic compatibility. Rules are checked in order:
///
/// | rule | score | match |
/// |---|---|---|
/// | no candidate location | 50 | no |
/// | job is remote/anywhere | 100 | yes |
/// | same place (either contains the other) | 100 | yes |
/// | a preferred location appears in the job location | 90 | yes |
/// | willing to relocate | 70 | yes |
/// | otherwise | 20 | no |
pub fn score_location(
    candidate_location: Option<&str>,
    willing_to_relocate: bool,
    job_location: &str,
    preferred_locations: &[String],
) -> LocationScore {
    let Some(candidate) = candidate_location.filter(|l| !l.trim().is_empty()) else {
        return LocationScore::new(50.0, false);
    };

    let job = job_location.to_lowercase();
    if REMOTE_MARKERS.iter().any(|m| job.contains(m)) {
        return LocationScore::new(100.0, true);
    }

    let candidate = candidate.to_lowercase();
    let same_place =
        candidate == job || (!job.is_empty() && (job.contains(&candidate) || candidate.contains(&job)));
    if same_place {
        return LocationScore::new(100.0, true);
    }

    let preferred_hit = preferred_locations
        .iter()
        .map(|p| p.trim().to_lowercase())
        .any(|p| !p.is_empty() && job.contains(&p));
    if preferred_hit {
        return LocationScore::new(90.0, true);
    }

    if willing_to_relocate {
        return LocationScore::new(70.0, true);
    }

    LocationScore::new(20.0, false)
}
