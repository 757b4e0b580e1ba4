use serde::{Deserialize, Serialize};

/// Relocation and location preferences stored alongside a candidate profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidatePreferences {
    pub preferred_locations: Vec<String>,
    pub willing_to_relocate: bool,
}

/// The matchable attributes of one job seeker.
///
/// Every field except `skills` may be missing; the matchers fall back to neutral
/// scores instead of rejecting incomplete profiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub years_experience: Option<i32>,
    #[serde(default)]
    pub expected_salary_min: Option<f64>,
    #[serde(default)]
    pub expected_salary_max: Option<f64>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub preferences: Option<CandidatePreferences>,
}

impl CandidateProfile {
    /// Location with blank strings treated as absent.
    pub fn location(&self) -> Option<&str> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    pub fn preferred_locations(&self) -> &[String] {
        self.preferences
            .as_ref()
            .map(|p| p.preferred_locations.as_slice())
            .unwrap_or(&[])
    }

    pub fn willing_to_relocate(&self) -> bool {
        self.preferences
            .as_ref()
            .map(|p| p.willing_to_relocate)
            .unwrap_or(false)
    }
}
