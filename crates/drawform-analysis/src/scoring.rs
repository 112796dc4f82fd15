//! Severity classification, aggregate scoring, and feedback selection.

use serde::{Deserialize, Serialize};

use crate::metrics::MetricKind;
use crate::thresholds::EvaluationResult;

/// Relative magnitude of a failing metric's deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A failing check with its classified severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormError {
    pub kind: MetricKind,
    pub severity: Severity,
    pub description: String,
    pub value: f64,
    pub threshold: f64,
}

/// Derive severity-tagged errors for every failing check, preserving
/// the fixed metric order of the evaluation.
pub fn classify_errors(evaluation: &EvaluationResult) -> Vec<FormError> {
    evaluation
        .checks
        .iter()
        .filter(|check| !check.passed)
        .map(|check| {
            let threshold = check.check.reference();
            // The denominator is clamped so near-zero thresholds (the
            // anchor ratio) don't blow severity out of scale.
            let ratio = (check.value - threshold).abs() / threshold.max(1.0);
            let severity = if ratio > 0.5 {
                Severity::High
            } else if ratio > 0.25 {
                Severity::Medium
            } else {
                Severity::Low
            };
            FormError {
                kind: check.kind,
                severity,
                description: check.description.clone(),
                value: check.value,
                threshold,
            }
        })
        .collect()
}

/// Aggregate score: `round(100 * passed / total)`.
pub fn overall_score(evaluation: &EvaluationResult) -> u8 {
    if evaluation.total() == 0 {
        return 0;
    }
    (100.0 * evaluation.pass_count() as f64 / evaluation.total() as f64).round() as u8
}

pub const ALL_PASSED_MESSAGE: &str = "Great form! All checks passed.";

/// Fixed corrective message per metric.
pub fn corrective_message(kind: MetricKind) -> &'static str {
    match kind {
        MetricKind::ShoulderLine => {
            "Level your shoulders; keep the shoulder line parallel to the ground."
        }
        MetricKind::BowElbow => {
            "Bow Arm Extension: straighten the bow arm until the elbow is nearly locked."
        }
        MetricKind::DrawAlignment => "Bring the draw elbow in line behind the arrow.",
        MetricKind::HeadTilt => {
            "Keep your head upright and bring the string to your face, not your face to the string."
        }
        MetricKind::SpineLean => "Stand tall; avoid leaning toward or away from the target.",
        MetricKind::AnchorRatio => {
            "Anchor the draw hand at the corner of your mouth on every shot."
        }
    }
}

/// Feedback persisted with a captured shot: the highest-severity
/// error's corrective message. The sort is stable, so ties keep the
/// fixed metric order.
pub fn primary_feedback(errors: &[FormError]) -> String {
    if errors.is_empty() {
        return ALL_PASSED_MESSAGE.to_string();
    }

    let mut ranked: Vec<&FormError> = errors.iter().collect();
    ranked.sort_by(|a, b| b.severity.cmp(&a.severity));
    corrective_message(ranked[0].kind).to_string()
}

/// Transient on-screen hint: the first failing check in fixed metric
/// order, severity ignored. Never persisted; may disagree with
/// [`primary_feedback`].
pub fn live_hint(evaluation: &EvaluationResult) -> Option<String> {
    evaluation
        .checks
        .iter()
        .find(|check| !check.passed)
        .map(|check| corrective_message(check.kind).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::FormMetrics;
    use crate::thresholds::ThresholdTable;

    fn metrics(bow_elbow_deg: f64) -> FormMetrics {
        FormMetrics {
            shoulder_line_deg: 2.0,
            bow_elbow_deg,
            draw_alignment_deg: 5.0,
            head_tilt_deg: 3.0,
            spine_lean_deg: 1.0,
            anchor_ratio: 0.1,
            confidence: 0.9,
            shoulder_width: 0.16,
        }
    }

    #[test]
    fn test_single_failure_scores_83() {
        let table = ThresholdTable::default();
        let evaluation = table.evaluate(&metrics(120.0));
        assert_eq!(evaluation.pass_count(), 5);
        assert_eq!(overall_score(&evaluation), 83);

        let errors = classify_errors(&evaluation);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, MetricKind::BowElbow);
        // |120 - 175| / 175 ≈ 0.31
        assert_eq!(errors[0].severity, Severity::Medium);

        let feedback = primary_feedback(&errors);
        assert!(feedback.starts_with("Bow Arm Extension"));
    }

    #[test]
    fn test_all_passed_feedback() {
        let table = ThresholdTable::default();
        let evaluation = table.evaluate(&metrics(178.0));
        assert_eq!(overall_score(&evaluation), 100);

        let errors = classify_errors(&evaluation);
        assert!(errors.is_empty());
        assert_eq!(primary_feedback(&errors), ALL_PASSED_MESSAGE);
        assert!(live_hint(&evaluation).is_none());
    }

    #[test]
    fn test_severity_bands() {
        let table = ThresholdTable::default();

        // Shoulder line 13° over a 10° max: 3/10 = 0.3 → Medium
        let mut m = metrics(178.0);
        m.shoulder_line_deg = 13.0;
        let errors = classify_errors(&table.evaluate(&m));
        assert_eq!(errors[0].severity, Severity::Medium);

        // 12° over: 2/10 = 0.2 → Low
        m.shoulder_line_deg = 12.0;
        let errors = classify_errors(&table.evaluate(&m));
        assert_eq!(errors[0].severity, Severity::Low);

        // 16° over: 6/10 = 0.6 → High
        m.shoulder_line_deg = 16.0;
        let errors = classify_errors(&table.evaluate(&m));
        assert_eq!(errors[0].severity, Severity::High);
    }

    #[test]
    fn test_anchor_severity_uses_clamped_denominator() {
        let table = ThresholdTable::default();
        let mut m = metrics(178.0);
        // |0.6 - 0.25| / max(0.25, 1) = 0.35 → Medium, not High
        m.anchor_ratio = 0.6;
        let errors = classify_errors(&table.evaluate(&m));
        assert_eq!(errors[0].kind, MetricKind::AnchorRatio);
        assert_eq!(errors[0].severity, Severity::Medium);
    }

    #[test]
    fn test_fixing_a_check_never_decreases_score() {
        let table = ThresholdTable::default();
        let mut m = metrics(120.0);
        m.shoulder_line_deg = 20.0;
        m.head_tilt_deg = 30.0;

        let mut evaluation = table.evaluate(&m);
        let before = overall_score(&evaluation);

        for i in 0..evaluation.checks.len() {
            if !evaluation.checks[i].passed {
                let mut flipped = evaluation.clone();
                flipped.checks[i].passed = true;
                assert!(overall_score(&flipped) >= before);
            }
        }

        // And flipping them all reaches 100
        for check in &mut evaluation.checks {
            check.passed = true;
        }
        assert_eq!(overall_score(&evaluation), 100);
    }

    #[test]
    fn test_primary_feedback_ranks_by_severity() {
        let table = ThresholdTable::default();
        let mut m = metrics(178.0);
        // Shoulder line fails first in metric order but only Low;
        // head tilt fails High.
        m.shoulder_line_deg = 12.0;
        m.head_tilt_deg = 30.0;

        let evaluation = table.evaluate(&m);
        let errors = classify_errors(&evaluation);
        assert_eq!(errors.len(), 2);

        let primary = primary_feedback(&errors);
        assert_eq!(primary, corrective_message(MetricKind::HeadTilt));

        // The live hint keeps fixed metric order and disagrees here.
        let hint = live_hint(&evaluation).unwrap();
        assert_eq!(hint, corrective_message(MetricKind::ShoulderLine));
    }

    #[test]
    fn test_severity_ties_keep_metric_order() {
        let table = ThresholdTable::default();
        let mut m = metrics(178.0);
        // Both Low severity: the earlier metric wins the tie.
        m.shoulder_line_deg = 12.0;
        m.spine_lean_deg = 14.0;

        let errors = classify_errors(&table.evaluate(&m));
        assert_eq!(errors[0].severity, errors[1].severity);
        assert_eq!(
            primary_feedback(&errors),
            corrective_message(MetricKind::ShoulderLine)
        );
    }
}
