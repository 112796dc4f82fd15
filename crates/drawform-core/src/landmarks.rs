//! Anatomical landmark enumeration and per-frame landmark storage.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// 33-point anatomical landmark definition (BlazePose full-body topology)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Landmark {
    Nose = 0,
    LeftEyeInner = 1,
    LeftEye = 2,
    LeftEyeOuter = 3,
    RightEyeInner = 4,
    RightEye = 5,
    RightEyeOuter = 6,
    LeftEar = 7,
    RightEar = 8,
    MouthLeft = 9,
    MouthRight = 10,
    LeftShoulder = 11,
    RightShoulder = 12,
    LeftElbow = 13,
    RightElbow = 14,
    LeftWrist = 15,
    RightWrist = 16,
    LeftPinky = 17,
    RightPinky = 18,
    LeftIndex = 19,
    RightIndex = 20,
    LeftThumb = 21,
    RightThumb = 22,
    LeftHip = 23,
    RightHip = 24,
    LeftKnee = 25,
    RightKnee = 26,
    LeftAnkle = 27,
    RightAnkle = 28,
    LeftHeel = 29,
    RightHeel = 30,
    LeftFootIndex = 31,
    RightFootIndex = 32,
}

impl Landmark {
    pub const COUNT: usize = 33;

    pub fn from_index(idx: u8) -> Option<Self> {
        match idx {
            0 => Some(Self::Nose),
            1 => Some(Self::LeftEyeInner),
            2 => Some(Self::LeftEye),
            3 => Some(Self::LeftEyeOuter),
            4 => Some(Self::RightEyeInner),
            5 => Some(Self::RightEye),
            6 => Some(Self::RightEyeOuter),
            7 => Some(Self::LeftEar),
            8 => Some(Self::RightEar),
            9 => Some(Self::MouthLeft),
            10 => Some(Self::MouthRight),
            11 => Some(Self::LeftShoulder),
            12 => Some(Self::RightShoulder),
            13 => Some(Self::LeftElbow),
            14 => Some(Self::RightElbow),
            15 => Some(Self::LeftWrist),
            16 => Some(Self::RightWrist),
            17 => Some(Self::LeftPinky),
            18 => Some(Self::RightPinky),
            19 => Some(Self::LeftIndex),
            20 => Some(Self::RightIndex),
            21 => Some(Self::LeftThumb),
            22 => Some(Self::RightThumb),
            23 => Some(Self::LeftHip),
            24 => Some(Self::RightHip),
            25 => Some(Self::LeftKnee),
            26 => Some(Self::RightKnee),
            27 => Some(Self::LeftAnkle),
            28 => Some(Self::RightAnkle),
            29 => Some(Self::LeftHeel),
            30 => Some(Self::RightHeel),
            31 => Some(Self::LeftFootIndex),
            32 => Some(Self::RightFootIndex),
            _ => None,
        }
    }
}

/// A detected landmark: normalized image-plane position plus a
/// visibility confidence. Values come from an untrusted provider and
/// may fall outside [0, 1] in degenerate inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: f64,
    pub y: f64,
    pub visibility: f64,
}

impl LandmarkPoint {
    pub fn new(x: f64, y: f64, visibility: f64) -> Self {
        Self { x, y, visibility }
    }

    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// One frame's worth of landmarks, addressed by the fixed [`Landmark`]
/// index scheme. Slots are `None` when the provider did not report
/// that landmark.
#[derive(Debug, Clone)]
pub struct LandmarkSet {
    points: [Option<LandmarkPoint>; Landmark::COUNT],
}

impl LandmarkSet {
    pub fn new() -> Self {
        Self {
            points: [None; Landmark::COUNT],
        }
    }

    pub fn from_points(points: &[(Landmark, LandmarkPoint)]) -> Self {
        let mut set = Self::new();
        for (landmark, point) in points {
            set.set(*landmark, *point);
        }
        set
    }

    pub fn set(&mut self, landmark: Landmark, point: LandmarkPoint) {
        self.points[landmark as usize] = Some(point);
    }

    pub fn get(&self, landmark: Landmark) -> Option<&LandmarkPoint> {
        self.points[landmark as usize].as_ref()
    }

    /// Landmark lookup that fails instead of silently yielding nothing.
    /// Callers drop the frame on error; there is nothing to retry.
    pub fn require(&self, landmark: Landmark) -> Result<&LandmarkPoint> {
        self.get(landmark)
            .ok_or(Error::MissingLandmark { landmark })
    }

    pub fn visibility(&self, landmark: Landmark) -> f64 {
        self.get(landmark).map(|p| p.visibility).unwrap_or(0.0)
    }
}

impl Default for LandmarkSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landmark_roundtrip() {
        for i in 0..Landmark::COUNT as u8 {
            let landmark = Landmark::from_index(i).unwrap();
            assert_eq!(landmark as u8, i);
        }
        assert!(Landmark::from_index(33).is_none());
    }

    #[test]
    fn test_set_get() {
        let mut set = LandmarkSet::new();
        assert!(set.get(Landmark::Nose).is_none());

        set.set(Landmark::Nose, LandmarkPoint::new(0.5, 0.2, 0.9));
        let nose = set.get(Landmark::Nose).unwrap();
        assert_eq!(nose.x, 0.5);
        assert_eq!(nose.visibility, 0.9);

        assert_eq!(set.visibility(Landmark::Nose), 0.9);
        assert_eq!(set.visibility(Landmark::LeftEar), 0.0);
    }

    #[test]
    fn test_require_missing() {
        let set = LandmarkSet::new();
        let err = set.require(Landmark::LeftWrist).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingLandmark {
                landmark: Landmark::LeftWrist
            }
        ));
    }
}
