use assess_core::model::{CandidateReport, SkillName};

/// One row of the per-skill report table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRowVm {
    pub skill: String,
    pub attempted: u32,
    pub correct: u32,
    pub accuracy: String,
    pub band: String,
}

/// The totals line under the report table.
#[derive(Debug, Clone, PartialEq)]
pub struct OverallRowVm {
    pub attempted: u32,
    pub correct: u32,
    pub accuracy: String,
}

#[must_use]
pub fn map_report_rows(report: &CandidateReport) -> Vec<ReportRowVm> {
    report
        .iter()
        .map(|(name, skill)| ReportRowVm {
            skill: SkillName::new(name).map_or_else(|_| name.to_string(), |s| s.label()),
            attempted: skill.questions_attempted,
            correct: skill.correct_answers,
            accuracy: format!("{:.2}%", skill.accuracy_percent),
            band: skill.final_band.clone(),
        })
        .collect()
}

#[must_use]
pub fn map_overall_row(report: &CandidateReport) -> OverallRowVm {
    let overall = report.overall();
    OverallRowVm {
        attempted: overall.total_attempted,
        correct: overall.total_correct,
        accuracy: format!("{:.2}%", overall.accuracy_percent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assess_core::model::SkillReport;

    fn report() -> CandidateReport {
        [
            (
                "Machine_Learning".to_string(),
                SkillReport::new(2, 1, 50.0, "good"),
            ),
            (
                "sql".to_string(),
                SkillReport::new(4, 3, 75.0, "intermediate"),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn rows_use_display_labels_and_two_decimal_accuracy() {
        let rows = map_report_rows(&report());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].skill, "Machine Learning");
        assert_eq!(rows[0].accuracy, "50.00%");
        assert_eq!(rows[1].band, "intermediate");
    }

    #[test]
    fn overall_row_aggregates_all_skills() {
        let overall = map_overall_row(&report());
        assert_eq!(overall.attempted, 6);
        assert_eq!(overall.correct, 4);
        assert_eq!(overall.accuracy, "66.67%");
    }
}
