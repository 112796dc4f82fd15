//! Form metrics computed from a single landmark snapshot.

use drawform_core::geometry::{angle_at, distance, line_angle_deg, midpoint};
use drawform_core::{Handedness, Landmark, LandmarkSet, Result};
use serde::{Deserialize, Serialize};

/// The six evaluated form metrics, in their fixed evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    ShoulderLine,
    BowElbow,
    DrawAlignment,
    HeadTilt,
    SpineLean,
    AnchorRatio,
}

impl MetricKind {
    /// Fixed evaluation order; drives result ordering and feedback
    /// tie-breaking.
    pub const ALL: [MetricKind; 6] = [
        MetricKind::ShoulderLine,
        MetricKind::BowElbow,
        MetricKind::DrawAlignment,
        MetricKind::HeadTilt,
        MetricKind::SpineLean,
        MetricKind::AnchorRatio,
    ];
}

/// Bow/draw landmark assignment for a handedness. The bow is held by
/// the arm matching the configured handedness; the opposite arm draws
/// the string, and the anchor reference is the mouth corner on the
/// draw side.
#[derive(Debug, Clone, Copy)]
pub struct SideLandmarks {
    pub bow_shoulder: Landmark,
    pub bow_elbow: Landmark,
    pub bow_wrist: Landmark,
    pub draw_shoulder: Landmark,
    pub draw_elbow: Landmark,
    pub draw_wrist: Landmark,
    pub anchor_reference: Landmark,
}

impl SideLandmarks {
    pub fn resolve(handedness: Handedness) -> Self {
        match handedness {
            Handedness::Left => Self {
                bow_shoulder: Landmark::LeftShoulder,
                bow_elbow: Landmark::LeftElbow,
                bow_wrist: Landmark::LeftWrist,
                draw_shoulder: Landmark::RightShoulder,
                draw_elbow: Landmark::RightElbow,
                draw_wrist: Landmark::RightWrist,
                anchor_reference: Landmark::MouthRight,
            },
            Handedness::Right => Self {
                bow_shoulder: Landmark::RightShoulder,
                bow_elbow: Landmark::RightElbow,
                bow_wrist: Landmark::RightWrist,
                draw_shoulder: Landmark::LeftShoulder,
                draw_elbow: Landmark::LeftElbow,
                draw_wrist: Landmark::LeftWrist,
                anchor_reference: Landmark::MouthLeft,
            },
        }
    }
}

/// Landmarks averaged into the frame confidence score.
const CONFIDENCE_LANDMARKS: [Landmark; 7] = [
    Landmark::LeftShoulder,
    Landmark::RightShoulder,
    Landmark::LeftElbow,
    Landmark::RightElbow,
    Landmark::LeftWrist,
    Landmark::RightWrist,
    Landmark::Nose,
];

/// Complete per-frame metric package. All values are pure functions of
/// the landmark set and handedness; indeterminate geometry flows
/// through as `NaN`/`inf` rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FormMetrics {
    /// Shoulder-line deviation from horizontal, degrees in [0, 90]
    pub shoulder_line_deg: f64,
    /// Interior angle at the bow-side elbow, degrees in [0, 180]
    pub bow_elbow_deg: f64,
    /// Draw shoulder-wrist vs elbow-wrist angular deviation, [0, 180]
    pub draw_alignment_deg: f64,
    /// Head tilt from level, degrees
    pub head_tilt_deg: f64,
    /// Torso deviation from vertical, degrees
    pub spine_lean_deg: f64,
    /// Draw-wrist-to-anchor distance over shoulder width
    pub anchor_ratio: f64,
    /// Mean visibility over the key upper-body landmarks
    pub confidence: f64,
    /// Shoulder-to-shoulder distance in normalized units
    pub shoulder_width: f64,
}

impl FormMetrics {
    /// Compute all metrics for one frame. Fails when a required
    /// landmark is absent; the caller skips the frame.
    pub fn compute(landmarks: &LandmarkSet, handedness: Handedness) -> Result<Self> {
        let sides = SideLandmarks::resolve(handedness);

        let left_shoulder = landmarks.require(Landmark::LeftShoulder)?.position();
        let right_shoulder = landmarks.require(Landmark::RightShoulder)?.position();
        let left_hip = landmarks.require(Landmark::LeftHip)?.position();
        let right_hip = landmarks.require(Landmark::RightHip)?.position();
        let nose = landmarks.require(Landmark::Nose)?.position();

        let bow_shoulder = landmarks.require(sides.bow_shoulder)?.position();
        let bow_elbow = landmarks.require(sides.bow_elbow)?.position();
        let bow_wrist = landmarks.require(sides.bow_wrist)?.position();
        let draw_shoulder = landmarks.require(sides.draw_shoulder)?.position();
        let draw_elbow = landmarks.require(sides.draw_elbow)?.position();
        let draw_wrist = landmarks.require(sides.draw_wrist)?.position();
        let anchor = landmarks.require(sides.anchor_reference)?.position();

        // Shoulder line, folded into [0, 90]
        let raw = line_angle_deg(left_shoulder, right_shoulder).abs();
        let shoulder_line_deg = raw.min((180.0 - raw).abs());

        let bow_elbow_deg = angle_at(bow_shoulder, bow_elbow, bow_wrist);

        // Deviation between the two draw-arm lines, wrapped into [0, 180]
        let shoulder_to_wrist = line_angle_deg(draw_shoulder, draw_wrist);
        let elbow_to_wrist = line_angle_deg(draw_elbow, draw_wrist);
        let wrapped = (shoulder_to_wrist - elbow_to_wrist).abs();
        let draw_alignment_deg = wrapped.min(360.0 - wrapped);

        // Ear-to-ear line when both ears are visible, otherwise the
        // mouth-to-nose line's deviation from vertical
        let head_tilt_deg = match (
            landmarks.get(Landmark::LeftEar),
            landmarks.get(Landmark::RightEar),
        ) {
            (Some(left_ear), Some(right_ear))
                if left_ear.visibility > 0.0 && right_ear.visibility > 0.0 =>
            {
                let ear = line_angle_deg(left_ear.position(), right_ear.position()).abs();
                ear.min((180.0 - ear).abs())
            }
            _ => (line_angle_deg(anchor, nose) - 90.0).abs(),
        };

        let hip_mid = midpoint(left_hip, right_hip);
        let shoulder_mid = midpoint(left_shoulder, right_shoulder);
        let spine_lean_deg = (90.0 - line_angle_deg(hip_mid, shoulder_mid)).abs();

        // Zero shoulder width yields an infinite ratio, never a silent
        // pass downstream.
        let shoulder_width = distance(left_shoulder, right_shoulder);
        let anchor_ratio = if shoulder_width == 0.0 {
            f64::INFINITY
        } else {
            distance(draw_wrist, anchor) / shoulder_width
        };

        Ok(Self {
            shoulder_line_deg: round_to(shoulder_line_deg, 1),
            bow_elbow_deg: round_to(bow_elbow_deg, 1),
            draw_alignment_deg: round_to(draw_alignment_deg, 1),
            head_tilt_deg: round_to(head_tilt_deg, 1),
            spine_lean_deg: round_to(spine_lean_deg, 1),
            anchor_ratio: round_to(anchor_ratio, 2),
            confidence: round_to(frame_confidence(landmarks), 2),
            shoulder_width: round_to(shoulder_width, 3),
        })
    }

    /// Value of one named metric.
    pub fn value(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::ShoulderLine => self.shoulder_line_deg,
            MetricKind::BowElbow => self.bow_elbow_deg,
            MetricKind::DrawAlignment => self.draw_alignment_deg,
            MetricKind::HeadTilt => self.head_tilt_deg,
            MetricKind::SpineLean => self.spine_lean_deg,
            MetricKind::AnchorRatio => self.anchor_ratio,
        }
    }
}

/// Mean visibility over the key landmarks; 0 when none are present.
fn frame_confidence(landmarks: &LandmarkSet) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for landmark in CONFIDENCE_LANDMARKS {
        if let Some(point) = landmarks.get(landmark) {
            sum += point.visibility;
            count += 1;
        }
    }
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
