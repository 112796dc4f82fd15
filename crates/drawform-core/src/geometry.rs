//! Geometric primitives for landmark computations.
//!
//! All coordinates are normalized image-plane positions where the y
//! axis increases downward, so line-angle computations negate the y
//! delta before taking `atan2`.

use nalgebra::Point2;

/// Interior angle at `vertex` formed by the segments vertex→a and
/// vertex→c, in degrees within [0, 180]. Returns `NaN` when either
/// adjoining segment has zero length.
pub fn angle_at(a: Point2<f64>, vertex: Point2<f64>, c: Point2<f64>) -> f64 {
    let v1 = a - vertex;
    let v2 = c - vertex;
    let norms = v1.norm() * v2.norm();
    if norms < 1e-12 {
        return f64::NAN;
    }
    let cos = (v1.dot(&v2) / norms).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Angle of the a→b segment relative to horizontal, in degrees within
/// (-180, 180].
pub fn line_angle_deg(a: Point2<f64>, b: Point2<f64>) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (-dy).atan2(dx).to_degrees()
}

pub fn distance(a: Point2<f64>, b: Point2<f64>) -> f64 {
    (b - a).norm()
}

pub fn midpoint(a: Point2<f64>, b: Point2<f64>) -> Point2<f64> {
    Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_angle() {
        let vertex = Point2::new(0.0, 0.0);
        let a = Point2::new(1.0, 0.0);
        let c = Point2::new(0.0, 1.0);
        assert!((angle_at(a, vertex, c) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_straight_angle() {
        let vertex = Point2::new(0.5, 0.5);
        let a = Point2::new(0.0, 0.5);
        let c = Point2::new(1.0, 0.5);
        assert!((angle_at(a, vertex, c) - 180.0).abs() < 1e-10);
    }

    #[test]
    fn test_degenerate_angle_is_nan() {
        let p = Point2::new(0.3, 0.3);
        assert!(angle_at(p, p, Point2::new(0.5, 0.5)).is_nan());
    }

    #[test]
    fn test_line_angle_flips_y() {
        // b lies above a in image space (smaller y), so the segment
        // points "up" and the angle is +90.
        let a = Point2::new(0.5, 0.8);
        let b = Point2::new(0.5, 0.2);
        assert!((line_angle_deg(a, b) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_horizontal_line_angle() {
        let a = Point2::new(0.2, 0.5);
        let b = Point2::new(0.8, 0.5);
        assert!(line_angle_deg(a, b).abs() < 1e-10);
    }

    #[test]
    fn test_distance_and_midpoint() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(0.3, 0.4);
        assert!((distance(a, b) - 0.5).abs() < 1e-10);

        let m = midpoint(a, b);
        assert!((m.x - 0.15).abs() < 1e-10);
        assert!((m.y - 0.2).abs() < 1e-10);
    }
}
