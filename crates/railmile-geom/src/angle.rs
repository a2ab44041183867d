//! Crossing angles and their degree-minute rendering.

use std::f64::consts::PI;
use std::fmt;

use railmile_math::Vec2;

/// Angle from the railway's forward tangent to the feature tangent,
/// measured clockwise and reduced to `[0, pi)`.
///
/// This is the crossing angle as read off the drawing on the right-hand
/// side of the direction of travel. Reducing modulo a half turn makes
/// the result independent of which way the feature polyline was drawn:
/// a feature and its reversal describe the same crossing.
pub fn skew_angle(rail_tangent: &Vec2, feature_tangent: &Vec2) -> f64 {
    let ccw = rail_tangent
        .perp(feature_tangent)
        .atan2(rail_tangent.dot(feature_tangent));
    (-ccw).rem_euclid(PI)
}

/// An angle in whole degrees and minutes, rendered like `63°27′`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegMin {
    /// Whole degrees.
    pub degrees: u32,
    /// Whole minutes, `0..=59`.
    pub minutes: u32,
}

impl DegMin {
    /// Convert a non-negative angle in radians.
    ///
    /// Minutes are rounded to the nearest whole minute; a fraction that
    /// rounds up to 60 carries into the degrees instead of printing
    /// `62°60′`.
    pub fn from_radians(rad: f64) -> Self {
        let deg = rad.to_degrees();
        let mut degrees = deg.floor() as u32;
        let mut minutes = ((deg - deg.floor()) * 60.0).round() as u32;
        if minutes == 60 {
            degrees += 1;
            minutes = 0;
        }
        Self { degrees, minutes }
    }
}

impl fmt::Display for DegMin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°{}′", self.degrees, self.minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perpendicular_crossing() {
        let rail = Vec2::new(1.0, 0.0);
        let feature = Vec2::new(0.0, 1.0);
        let a = skew_angle(&rail, &feature);
        assert!((a - PI / 2.0).abs() < 1e-12);
        assert_eq!(DegMin::from_radians(a).to_string(), "90°0′");
    }

    #[test]
    fn test_slanted_crossing() {
        // Feature climbing 20 m over 5 m east against an eastbound rail
        let rail = Vec2::new(1.0, 0.0);
        let feature = Vec2::new(5.0, 20.0).normalize();
        let a = skew_angle(&rail, &feature);
        let expected = PI - (20.0_f64).atan2(5.0);
        assert!((a - expected).abs() < 1e-12);
        // 104.036 degrees
        assert_eq!(DegMin::from_radians(a).to_string(), "104°2′");
    }

    #[test]
    fn test_feature_direction_irrelevant() {
        let rail = Vec2::new(0.6, 0.8);
        let feature = Vec2::new(-0.3, 0.7).normalize();
        let a = skew_angle(&rail, &feature);
        let b = skew_angle(&rail, &(-feature));
        assert!((a - b).abs() < 1e-12);
        assert!((0.0..PI).contains(&a));
    }

    #[test]
    fn test_parallel_is_zero() {
        let rail = Vec2::new(1.0, 0.0);
        assert!(skew_angle(&rail, &Vec2::new(1.0, 0.0)).abs() < 1e-12);
        // Anti-parallel describes the same line
        assert!(skew_angle(&rail, &Vec2::new(-1.0, 0.0)).abs() < 1e-12);
    }

    #[test]
    fn test_range_swept() {
        let rail = Vec2::new(1.0, 0.0);
        for i in 0..360 {
            let t = (i as f64).to_radians();
            let a = skew_angle(&rail, &Vec2::new(t.cos(), t.sin()));
            assert!((0.0..PI).contains(&a), "angle {a} out of range at {i} deg");
            let dm = DegMin::from_radians(a);
            assert!(dm.minutes < 60);
            assert!(dm.degrees <= 180);
        }
    }

    #[test]
    fn test_minute_carry() {
        // 62.9999 degrees rounds to a whole 63
        let dm = DegMin::from_radians(62.9999_f64.to_radians());
        assert_eq!(dm, DegMin { degrees: 63, minutes: 0 });
        assert_eq!(dm.to_string(), "63°0′");
        // 63.45 degrees is 63°27′
        let dm = DegMin::from_radians(63.45_f64.to_radians());
        assert_eq!(dm.to_string(), "63°27′");
    }
}
