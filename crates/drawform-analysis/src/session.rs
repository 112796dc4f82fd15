//! Captured shot records and per-session aggregation.

use drawform_core::{SessionId, ShotId, Timestamp, UserConfig};
use serde::{Deserialize, Serialize};

use crate::metrics::{FormMetrics, MetricKind};
use crate::scoring::FormError;
use crate::thresholds::EvaluationResult;

/// A captured shot. Immutable once created; phase is transient and
/// deliberately not stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub id: ShotId,
    pub timestamp: Timestamp,
    pub metrics: FormMetrics,
    pub evaluation: EvaluationResult,
    pub errors: Vec<FormError>,
    pub overall_score: u8,
    pub feedback: String,
    pub user_config: UserConfig,
}

/// Summary statistics for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub shot_count: usize,
    pub mean_score: f64,
    pub best_score: u8,
    /// Up to three most frequent error kinds with their counts, ties
    /// broken by first-seen order.
    pub top_errors: Vec<(MetricKind, usize)>,
}

/// Append-only shot history for the active session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShotHistory {
    session_id: SessionId,
    records: Vec<ShotRecord>,
}

impl ShotHistory {
    pub fn new() -> Self {
        Self {
            session_id: SessionId::new(),
            records: Vec::new(),
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn record(&mut self, shot: ShotRecord) {
        self.records.push(shot);
    }

    pub fn records(&self) -> &[ShotRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> SessionSummary {
        let shot_count = self.records.len();
        let mean_score = if shot_count == 0 {
            0.0
        } else {
            self.records
                .iter()
                .map(|r| r.overall_score as f64)
                .sum::<f64>()
                / shot_count as f64
        };
        let best_score = self
            .records
            .iter()
            .map(|r| r.overall_score)
            .max()
            .unwrap_or(0);

        SessionSummary {
            session_id: self.session_id,
            shot_count,
            mean_score,
            best_score,
            top_errors: self.top_errors(3),
        }
    }

    /// Most frequent error kinds across all records. Counting order is
    /// first-seen; the stable sort keeps that order for tied counts.
    fn top_errors(&self, limit: usize) -> Vec<(MetricKind, usize)> {
        let mut counts: Vec<(MetricKind, usize)> = Vec::new();
        for record in &self.records {
            for error in &record.errors {
                match counts.iter_mut().find(|(kind, _)| *kind == error.kind) {
                    Some((_, count)) => *count += 1,
                    None => counts.push((error.kind, 1)),
                }
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(limit);
        counts
    }

    /// Drop all records and start a fresh session.
    pub fn clear(&mut self) {
        self.records.clear();
        self.session_id = SessionId::new();
    }
}

impl Default for ShotHistory {
    fn default() -> Self {
        Self::new()
    }
}
