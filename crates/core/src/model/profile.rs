use thiserror::Error;
use url::Url;

use crate::model::ids::CandidateId;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProfileError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("{field} must be a valid URL")]
    InvalidLink { field: &'static str },

    #[error("years of experience must be a number")]
    InvalidExperience,

    #[error("years of experience must not be negative")]
    NegativeExperience,
}

//
// ─── CANDIDATE PROFILE ────────────────────────────────────────────────────────
//

/// A candidate's profile as the backend reports it.
///
/// Assessments only become visible once `is_complete` is true, so the
/// dashboard checks this flag before listing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateProfile {
    pub candidate_id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<Url>,
    pub github: Option<Url>,
    pub degree: Option<String>,
    pub years_of_experience: f64,
    pub is_complete: bool,
}

//
// ─── PROFILE UPDATE ───────────────────────────────────────────────────────────
//

/// Raw profile form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDraft {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
    pub degree: String,
    pub years_of_experience: String,
}

impl ProfileDraft {
    /// Validates the form into an update payload.
    ///
    /// Empty optional fields become `None`; links must parse as URLs
    /// when present.
    ///
    /// # Errors
    ///
    /// Returns the first `ProfileError` encountered, in field order.
    pub fn validate(&self) -> Result<ProfileUpdate, ProfileError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }

        let linkedin = parse_link(&self.linkedin, "linkedin")?;
        let github = parse_link(&self.github, "github")?;

        let years = self.years_of_experience.trim();
        let years_of_experience: f64 =
            years.parse().map_err(|_| ProfileError::InvalidExperience)?;
        if years_of_experience < 0.0 {
            return Err(ProfileError::NegativeExperience);
        }

        Ok(ProfileUpdate {
            name: name.to_string(),
            phone: non_empty(&self.phone),
            location: non_empty(&self.location),
            linkedin,
            github,
            degree: non_empty(&self.degree),
            years_of_experience,
        })
    }
}

/// Validated profile changes, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub linkedin: Option<Url>,
    pub github: Option<Url>,
    pub degree: Option<String>,
    pub years_of_experience: f64,
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_link(raw: &str, field: &'static str) -> Result<Option<Url>, ProfileError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Url::parse(trimmed)
        .map(Some)
        .map_err(|_| ProfileError::InvalidLink { field })
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProfileDraft {
        ProfileDraft {
            name: "Asha Rao".to_string(),
            phone: "  +91 99999 00000 ".to_string(),
            location: String::new(),
            linkedin: "https://linkedin.com/in/asha".to_string(),
            github: String::new(),
            degree: "B.Tech".to_string(),
            years_of_experience: "3.5".to_string(),
        }
    }

    #[test]
    fn validate_trims_and_drops_empty_fields() {
        let update = draft().validate().unwrap();
        assert_eq!(update.name, "Asha Rao");
        assert_eq!(update.phone.as_deref(), Some("+91 99999 00000"));
        assert_eq!(update.location, None);
        assert!(update.linkedin.is_some());
        assert_eq!(update.github, None);
        assert!((update.years_of_experience - 3.5).abs() < f64::EPSILON);
    }

    #[test]
    fn validate_rejects_blank_name() {
        let mut bad = draft();
        bad.name = "   ".to_string();
        assert_eq!(bad.validate().unwrap_err(), ProfileError::EmptyName);
    }

    #[test]
    fn validate_rejects_malformed_links() {
        let mut bad = draft();
        bad.github = "not a url".to_string();
        assert_eq!(
            bad.validate().unwrap_err(),
            ProfileError::InvalidLink { field: "github" }
        );
    }

    #[test]
    fn validate_rejects_non_numeric_experience() {
        let mut bad = draft();
        bad.years_of_experience = "three".to_string();
        assert_eq!(bad.validate().unwrap_err(), ProfileError::InvalidExperience);

        bad.years_of_experience = "-1".to_string();
        assert_eq!(bad.validate().unwrap_err(), ProfileError::NegativeExperience);
    }
}
