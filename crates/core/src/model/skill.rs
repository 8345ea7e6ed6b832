use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SkillError {
    #[error("skill name cannot be empty")]
    EmptyName,

    #[error("invalid skill priority: {0}")]
    InvalidPriority(String),
}

/// Validated skill name (trimmed, non-empty).
///
/// The backend encodes multi-word skills with underscores
/// (e.g. `Machine_Learning`); `label()` restores the spaces for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SkillName(String);

impl SkillName {
    /// Create a validated skill name.
    ///
    /// # Errors
    ///
    /// Returns `SkillError::EmptyName` if the name is empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, SkillError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SkillError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable form with underscores turned back into spaces.
    #[must_use]
    pub fn label(&self) -> String {
        self.0.replace('_', " ")
    }
}

impl std::fmt::Display for SkillName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Weight a recruiter assigns to a skill when composing an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillPriority {
    Low,
    Medium,
    High,
}

impl SkillPriority {
    /// Wire spelling expected by the backend.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SkillPriority::Low => "low",
            SkillPriority::Medium => "medium",
            SkillPriority::High => "high",
        }
    }
}

impl FromStr for SkillPriority {
    type Err = SkillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(SkillError::InvalidPriority(other.to_string())),
        }
    }
}

/// A skill with the priority it carries within one assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillRequirement {
    pub name: SkillName,
    pub priority: SkillPriority,
}

impl SkillRequirement {
    #[must_use]
    pub fn new(name: SkillName, priority: SkillPriority) -> Self {
        Self { name, priority }
    }
}
