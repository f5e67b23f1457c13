// src/services/reporting.rs

//! Counselor dashboard aggregation over the flat quiz and assessment rows.

use std::collections::{BTreeMap, HashMap};

use crate::models::{
    assessment_record::AssessmentReportRow,
    dashboard::{DashboardStatistics, StudentListParams, StudentOverview},
    quiz_record::QuizResultRow,
    student::StudentSummary,
};

/// Latest assessment row per student, by `created_at` (ties: highest id).
pub fn latest_assessments(rows: Vec<AssessmentReportRow>) -> HashMap<i64, AssessmentReportRow> {
    let mut latest: HashMap<i64, AssessmentReportRow> = HashMap::new();
    for row in rows {
        let newer = latest
            .get(&row.student_id)
            .is_none_or(|current| (current.created_at, current.id) < (row.created_at, row.id));
        if newer {
            latest.insert(row.student_id, row);
        }
    }
    latest
}

pub fn statistics(
    students: &[StudentSummary],
    quiz_results: &[QuizResultRow],
    latest: &HashMap<i64, AssessmentReportRow>,
) -> DashboardStatistics {
    let mut stats = DashboardStatistics {
        total_students: students.len(),
        ..Default::default()
    };

    let mut quiz_total: u64 = 0;
    let mut quiz_count: u64 = 0;

    for student in students {
        if let Some(assessment) = latest.get(&student.id) {
            if assessment.is_safe() {
                stats.safe_students += 1;
            } else {
                stats.at_risk_students += 1;
            }
        }

        for quiz in quiz_results.iter().filter(|q| q.student_id == student.id) {
            quiz_total += quiz.score_percentage.max(0) as u64;
            quiz_count += 1;
            *stats.topic_attempts.entry(quiz.topic_id.clone()).or_default() += 1;
        }
    }

    if quiz_count > 0 {
        stats.average_quiz_score = (quiz_total as f64 / quiz_count as f64).round() as u32;
    }

    stats
}

/// Applies the class filter and case-insensitive name search.
pub fn filter_students<'a>(
    students: &'a [StudentSummary],
    params: &StudentListParams,
) -> Vec<&'a StudentSummary> {
    let class = params
        .class
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty() && !c.eq_ignore_ascii_case("all"));
    let search = params
        .search
        .as_deref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    students
        .iter()
        .filter(|s| class.is_none_or(|c| s.class == c))
        .filter(|s| {
            search
                .as_deref()
                .is_none_or(|term| s.full_name.to_lowercase().contains(term))
        })
        .collect()
}

/// Joins students with their quiz attempts and latest assessment.
pub fn student_overviews(
    students: Vec<&StudentSummary>,
    quiz_results: &[QuizResultRow],
    latest: &HashMap<i64, AssessmentReportRow>,
) -> Vec<StudentOverview> {
    let mut quizzes_by_student: BTreeMap<i64, Vec<QuizResultRow>> = BTreeMap::new();
    for quiz in quiz_results {
        quizzes_by_student
            .entry(quiz.student_id)
            .or_default()
            .push(quiz.clone());
    }

    students
        .into_iter()
        .map(|student| StudentOverview {
            student: student.clone(),
            quiz_results: quizzes_by_student.remove(&student.id).unwrap_or_default(),
            latest_assessment: latest.get(&student.id).cloned(),
        })
        .collect()
}
