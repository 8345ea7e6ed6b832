use std::collections::BTreeMap;

/// Per-skill slice of the backend's final report.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillReport {
    pub questions_attempted: u32,
    pub correct_answers: u32,
    pub accuracy_percent: f64,
    pub final_band: String,
}

impl SkillReport {
    #[must_use]
    pub fn new(
        questions_attempted: u32,
        correct_answers: u32,
        accuracy_percent: f64,
        final_band: impl Into<String>,
    ) -> Self {
        Self {
            questions_attempted,
            correct_answers,
            accuracy_percent,
            final_band: final_band.into(),
        }
    }
}

/// Read-only report produced by the backend when an attempt finishes.
///
/// Keyed by skill name; iteration order is alphabetical so rendering is
/// stable across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateReport {
    skills: BTreeMap<String, SkillReport>,
}

impl CandidateReport {
    #[must_use]
    pub fn new(skills: BTreeMap<String, SkillReport>) -> Self {
        Self { skills }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    #[must_use]
    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SkillReport)> {
        self.skills.iter().map(|(name, report)| (name.as_str(), report))
    }

    #[must_use]
    pub fn get(&self, skill: &str) -> Option<&SkillReport> {
        self.skills.get(skill)
    }

    /// Totals across all skills, with accuracy rounded to two decimals.
    #[must_use]
    pub fn overall(&self) -> OverallAccuracy {
        let mut total_attempted = 0_u32;
        let mut total_correct = 0_u32;
        for report in self.skills.values() {
            total_attempted = total_attempted.saturating_add(report.questions_attempted);
            total_correct = total_correct.saturating_add(report.correct_answers);
        }

        let accuracy_percent = if total_attempted > 0 {
            let raw = f64::from(total_correct) / f64::from(total_attempted) * 100.0;
            (raw * 100.0).round() / 100.0
        } else {
            0.0
        };

        OverallAccuracy {
            total_attempted,
            total_correct,
            accuracy_percent,
        }
    }
}

impl FromIterator<(String, SkillReport)> for CandidateReport {
    fn from_iter<I: IntoIterator<Item = (String, SkillReport)>>(iter: I) -> Self {
        Self {
            skills: iter.into_iter().collect(),
        }
    }
}

/// Whole-attempt totals derived from a `CandidateReport`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallAccuracy {
    pub total_attempted: u32,
    pub total_correct: u32,
    pub accuracy_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_skill_report() -> CandidateReport {
        [(
            "sql".to_string(),
            SkillReport::new(4, 3, 75.0, "intermediate"),
        )]
        .into_iter()
        .collect()
    }

    #[test]
    fn overall_sums_single_skill() {
        let overall = single_skill_report().overall();
        assert_eq!(overall.total_attempted, 4);
        assert_eq!(overall.total_correct, 3);
        assert!((overall.accuracy_percent - 75.00).abs() < f64::EPSILON);
    }

    #[test]
    fn overall_combines_skills_and_rounds() {
        let report: CandidateReport = [
            ("python".to_string(), SkillReport::new(3, 2, 66.67, "better")),
            ("sql".to_string(), SkillReport::new(3, 0, 0.0, "good")),
        ]
        .into_iter()
        .collect();

        let overall = report.overall();
        assert_eq!(overall.total_attempted, 6);
        assert_eq!(overall.total_correct, 2);
        // 2/6 = 33.333... rounds to 33.33
        assert!((overall.accuracy_percent - 33.33).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_report_has_zero_accuracy() {
        let overall = CandidateReport::default().overall();
        assert_eq!(overall.total_attempted, 0);
        assert!((overall.accuracy_percent - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn iteration_is_alphabetical() {
        let report: CandidateReport = [
            ("sql".to_string(), SkillReport::new(1, 1, 100.0, "perfect")),
            ("python".to_string(), SkillReport::new(1, 0, 0.0, "good")),
        ]
        .into_iter()
        .collect();

        let names: Vec<&str> = report.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["python", "sql"]);
    }
}
