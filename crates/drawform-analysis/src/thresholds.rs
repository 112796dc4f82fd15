//! Threshold configuration and per-metric evaluation.

use serde::{Deserialize, Serialize};

use crate::metrics::{FormMetrics, MetricKind};

/// How a metric value is judged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ThresholdCheck {
    /// Pass iff `value <= max`
    MaxBound { max: f64 },
    /// Pass iff `|value - target| <= tolerance`
    TargetTolerance { target: f64, tolerance: f64 },
}

impl ThresholdCheck {
    /// Indeterminate values always fail, regardless of check kind.
    pub fn passes(&self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            ThresholdCheck::MaxBound { max } => value <= *max,
            ThresholdCheck::TargetTolerance { target, tolerance } => {
                (value - target).abs() <= *tolerance
            }
        }
    }

    /// Scalar the value is compared against, used for display and
    /// severity classification.
    pub fn reference(&self) -> f64 {
        match self {
            ThresholdCheck::MaxBound { max } => *max,
            ThresholdCheck::TargetTolerance { target, .. } => *target,
        }
    }
}

/// Threshold entry for one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdSpec {
    pub check: ThresholdCheck,
    pub unit: String,
    pub label: String,
    pub description: String,
}

impl ThresholdSpec {
    fn max_bound(max: f64, unit: &str, label: &str, description: &str) -> Self {
        Self {
            check: ThresholdCheck::MaxBound { max },
            unit: unit.to_string(),
            label: label.to_string(),
            description: description.to_string(),
        }
    }

    fn target_tolerance(target: f64, tolerance: f64, unit: &str, label: &str, description: &str) -> Self {
        Self {
            check: ThresholdCheck::TargetTolerance { target, tolerance },
            unit: unit.to_string(),
            label: label.to_string(),
            description: description.to_string(),
        }
    }
}

/// One threshold spec per metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub shoulder_line: ThresholdSpec,
    pub bow_elbow: ThresholdSpec,
    pub draw_alignment: ThresholdSpec,
    pub head_tilt: ThresholdSpec,
    pub spine_lean: ThresholdSpec,
    pub anchor_ratio: ThresholdSpec,
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            shoulder_line: ThresholdSpec::max_bound(
                10.0,
                "°",
                "Shoulder Line",
                "Shoulders should stay level with the ground",
            ),
            bow_elbow: ThresholdSpec::target_tolerance(
                175.0,
                15.0,
                "°",
                "Bow Arm Extension",
                "Bow arm should be extended nearly straight",
            ),
            draw_alignment: ThresholdSpec::max_bound(
                15.0,
                "°",
                "Draw Alignment",
                "Draw forearm should line up behind the arrow",
            ),
            head_tilt: ThresholdSpec::max_bound(
                12.0,
                "°",
                "Head Position",
                "Head should stay upright and level",
            ),
            spine_lean: ThresholdSpec::max_bound(
                12.0,
                "°",
                "Spine Lean",
                "Torso should stay vertical",
            ),
            anchor_ratio: ThresholdSpec::max_bound(
                0.25,
                "ratio",
                "Anchor Point",
                "Draw hand should anchor close to the mouth corner",
            ),
        }
    }
}

impl ThresholdTable {
    pub fn spec_for(&self, kind: MetricKind) -> &ThresholdSpec {
        match kind {
            MetricKind::ShoulderLine => &self.shoulder_line,
            MetricKind::BowElbow => &self.bow_elbow,
            MetricKind::DrawAlignment => &self.draw_alignment,
            MetricKind::HeadTilt => &self.head_tilt,
            MetricKind::SpineLean => &self.spine_lean,
            MetricKind::AnchorRatio => &self.anchor_ratio,
        }
    }

    /// Load thresholds from file, with DRAWFORM_* environment overrides.
    pub fn from_file(path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("DRAWFORM"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load thresholds from environment variables only.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Environment::with_prefix("DRAWFORM"))
            .build()?;

        settings.try_deserialize()
    }

    /// Evaluate all metrics in the fixed metric order.
    pub fn evaluate(&self, metrics: &FormMetrics) -> EvaluationResult {
        let checks = MetricKind::ALL
            .iter()
            .map(|&kind| {
                let spec = self.spec_for(kind);
                let value = metrics.value(kind);
                CheckResult {
                    kind,
                    label: spec.label.clone(),
                    value,
                    check: spec.check,
                    unit: spec.unit.clone(),
                    passed: spec.check.passes(value),
                    description: spec.description.clone(),
                }
            })
            .collect();

        EvaluationResult { checks }
    }
}

/// Outcome of checking one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub kind: MetricKind,
    pub label: String,
    pub value: f64,
    pub check: ThresholdCheck,
    pub unit: String,
    pub passed: bool,
    pub description: String,
}

/// Ordered evaluation of all six metrics. Order matches
/// [`MetricKind::ALL`] and is significant for feedback tie-breaking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub checks: Vec<CheckResult>,
}

impl EvaluationResult {
    pub fn pass_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    pub fn total(&self) -> usize {
        self.checks.len()
    }

    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_metrics() -> FormMetrics {
        FormMetrics {
            shoulder_line_deg: 2.0,
            bow_elbow_deg: 178.0,
            draw_alignment_deg: 5.0,
            head_tilt_deg: 3.0,
            spine_lean_deg: 1.0,
            anchor_ratio: 0.1,
            confidence: 0.9,
            shoulder_width: 0.16,
        }
    }

    #[test]
    fn test_default_table_passes_clean_metrics() {
        let table = ThresholdTable::default();
        let result = table.evaluate(&clean_metrics());
        assert!(result.all_passed());
        assert_eq!(result.total(), 6);
    }

    #[test]
    fn test_fixed_order() {
        let table = ThresholdTable::default();
        let result = table.evaluate(&clean_metrics());
        let kinds: Vec<MetricKind> = result.checks.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, MetricKind::ALL.to_vec());
    }

    #[test]
    fn test_max_bound_boundary() {
        let check = ThresholdCheck::MaxBound { max: 10.0 };
        assert!(check.passes(10.0));
        assert!(!check.passes(10.1));
    }

    #[test]
    fn test_target_tolerance() {
        let check = ThresholdCheck::TargetTolerance {
            target: 175.0,
            tolerance: 15.0,
        };
        assert!(check.passes(160.0));
        assert!(check.passes(190.0));
        assert!(!check.passes(159.9));
        assert!(!check.passes(120.0));
    }

    #[test]
    fn test_indeterminate_values_fail() {
        let max = ThresholdCheck::MaxBound { max: 10.0 };
        let tol = ThresholdCheck::TargetTolerance {
            target: 175.0,
            tolerance: 15.0,
        };
        assert!(!max.passes(f64::NAN));
        assert!(!max.passes(f64::INFINITY));
        assert!(!tol.passes(f64::NAN));
        assert!(!tol.passes(f64::NEG_INFINITY));
    }

    #[test]
    fn test_infinite_anchor_ratio_fails() {
        let table = ThresholdTable::default();
        let mut metrics = clean_metrics();
        metrics.anchor_ratio = f64::INFINITY;

        let result = table.evaluate(&metrics);
        let anchor = result
            .checks
            .iter()
            .find(|c| c.kind == MetricKind::AnchorRatio)
            .unwrap();
        assert!(!anchor.passed);
        assert_eq!(result.pass_count(), 5);
    }
}
