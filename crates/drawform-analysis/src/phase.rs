//! Coarse draw-cycle phase inference.

use serde::{Deserialize, Serialize};

use crate::metrics::FormMetrics;

/// Stage of the draw cycle inferred from instantaneous metrics.
/// Derived transiently per frame, never persisted with a shot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Rest,
    Draw,
    Anchor,
    Unknown,
}

impl Phase {
    /// Memory-less heuristic over the current metrics and the previous
    /// frame's metrics. Any frame may jump to any phase; there is no
    /// enforced transition graph.
    pub fn detect(current: &FormMetrics, previous: Option<&FormMetrics>) -> Phase {
        if previous.is_none() {
            return Phase::Rest;
        }

        let elbow = current.bow_elbow_deg;
        if elbow >= 160.0 && current.anchor_ratio < 0.3 {
            Phase::Anchor
        } else if elbow > 140.0 {
            Phase::Draw
        } else if elbow < 140.0 {
            Phase::Rest
        } else {
            // An elbow of exactly 140 (or NaN) matches neither band.
            Phase::Unknown
        }
    }
}
