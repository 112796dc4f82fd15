//! Frame-driven orchestrator tying the analysis stages together.

use drawform_core::{LandmarkSet, Result, ShotId, Timestamp, UserConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::metrics::FormMetrics;
use crate::phase::Phase;
use crate::scoring::{classify_errors, live_hint, overall_score, primary_feedback, FormError};
use crate::session::{SessionSummary, ShotHistory, ShotRecord};
use crate::thresholds::{EvaluationResult, ThresholdTable};

/// Everything derived from one frame, as plain data for the
/// presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameAssessment {
    pub metrics: FormMetrics,
    pub evaluation: EvaluationResult,
    pub errors: Vec<FormError>,
    pub phase: Phase,
    pub overall_score: u8,
    pub live_hint: Option<String>,
}

/// Per-frame form analyzer. Constructed with its configuration and
/// handed into call sites; holds the previous frame's metrics for
/// phase detection and the session's shot history.
///
/// Everything is synchronous; the caller drives it once per frame and
/// serializes capture instants itself.
pub struct FormAnalyzer {
    config: UserConfig,
    thresholds: ThresholdTable,
    previous_metrics: Option<FormMetrics>,
    history: ShotHistory,
}

impl FormAnalyzer {
    pub fn new(config: UserConfig, thresholds: ThresholdTable) -> Self {
        Self {
            config,
            thresholds,
            previous_metrics: None,
            history: ShotHistory::new(),
        }
    }

    pub fn config(&self) -> &UserConfig {
        &self.config
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    pub fn history(&self) -> &ShotHistory {
        &self.history
    }

    /// Run the full analysis pipeline on one landmark snapshot. On a
    /// missing landmark the frame is dropped and prior state is left
    /// untouched, so the caller keeps displaying the last valid result.
    pub fn process_frame(&mut self, landmarks: &LandmarkSet) -> Result<FrameAssessment> {
        let metrics = match FormMetrics::compute(landmarks, self.config.handedness) {
            Ok(metrics) => metrics,
            Err(e) => {
                warn!("frame skipped: {e}");
                return Err(e);
            }
        };

        let evaluation = self.thresholds.evaluate(&metrics);
        let errors = classify_errors(&evaluation);
        let phase = Phase::detect(&metrics, self.previous_metrics.as_ref());
        let score = overall_score(&evaluation);
        let hint = live_hint(&evaluation);

        self.previous_metrics = Some(metrics);

        Ok(FrameAssessment {
            metrics,
            evaluation,
            errors,
            phase,
            overall_score: score,
            live_hint: hint,
        })
    }

    /// Capture the given assessment as an immutable shot record and
    /// append it to the session history. The persisted feedback is the
    /// severity-ranked message, not the live hint.
    pub fn capture(&mut self, assessment: &FrameAssessment) -> ShotRecord {
        let record = ShotRecord {
            id: ShotId::new(),
            timestamp: Timestamp::now(),
            metrics: assessment.metrics,
            evaluation: assessment.evaluation.clone(),
            errors: assessment.errors.clone(),
            overall_score: assessment.overall_score,
            feedback: primary_feedback(&assessment.errors),
            user_config: self.config.clone(),
        };

        debug!(score = record.overall_score, "shot captured");
        self.history.record(record.clone());
        record
    }

    /// Close the session: return its summary and reset all state.
    pub fn end_session(&mut self) -> SessionSummary {
        let summary = self.history.summary();
        self.history.clear();
        self.previous_metrics = None;
        summary
    }
}

impl Default for FormAnalyzer {
    fn default() -> Self {
        Self::new(UserConfig::default(), ThresholdTable::default())
    }
}
