/// 2D vector utilities for the table plane.
/// Coordinates are screen pixels (origin top-left, Y-down).

#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Shorthand constructor
pub fn vec2(x: f64, y: f64) -> Vec2 {
    Vec2::new(x, y)
}

/// Dot product
pub fn dot(a: Vec2, b: Vec2) -> f64 {
    a.x * b.x + a.y * b.y
}

/// Squared length, avoids the sqrt for overlap tests
pub fn length_squared(v: Vec2) -> f64 {
    v.x * v.x + v.y * v.y
}

/// Vector length
pub fn length(v: Vec2) -> f64 {
    length_squared(v).sqrt()
}

/// Normalize vector to unit length.
/// A zero vector maps to the fixed axis (1, 0).
pub fn normalize(v: Vec2) -> Vec2 {
    let len = length(v);
    if len < 1e-10 {
        return Vec2::new(1.0, 0.0);
    }
    Vec2::new(v.x / len, v.y / len)
}

/// Scale vector by scalar
pub fn scale(v: Vec2, s: f64) -> Vec2 {
    Vec2::new(v.x * s, v.y * s)
}

/// Add two vectors
pub fn add(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x + b.x, a.y + b.y)
}

/// Subtract vectors (a - b)
pub fn sub(a: Vec2, b: Vec2) -> Vec2 {
    Vec2::new(a.x - b.x, a.y - b.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "Expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn dot_orthogonal_is_zero() {
        assert_eq!(dot(vec2(1.0, 0.0), vec2(0.0, 1.0)), 0.0);
    }

    #[test]
    fn dot_antiparallel_is_negative() {
        assert_eq!(dot(vec2(2.0, 0.0), vec2(-3.0, 0.0)), -6.0);
    }

    #[test]
    fn length_of_3_4_is_5() {
        assert_eq!(length(vec2(3.0, 4.0)), 5.0);
        assert_eq!(length_squared(vec2(3.0, 4.0)), 25.0);
    }

    #[test]
    fn normalize_returns_unit_vector() {
        let v = normalize(vec2(3.0, 4.0));
        assert_close(length(v), 1.0);
        assert_close(v.x, 0.6);
        assert_close(v.y, 0.8);
    }

    #[test]
    fn normalize_zero_returns_fixed_axis() {
        assert_eq!(normalize(Vec2::ZERO), vec2(1.0, 0.0));
    }

    #[test]
    fn add_sub_scale() {
        assert_eq!(add(vec2(1.0, 2.0), vec2(3.0, 4.0)), vec2(4.0, 6.0));
        assert_eq!(sub(vec2(1.0, 2.0), vec2(3.0, 4.0)), vec2(-2.0, -2.0));
        assert_eq!(scale(vec2(1.0, -2.0), 2.5), vec2(2.5, -5.0));
    }

    #[test]
    fn non_finite_is_detected() {
        assert!(vec2(1.0, 2.0).is_finite());
        assert!(!vec2(f64::NAN, 2.0).is_finite());
        assert!(!vec2(1.0, f64::INFINITY).is_finite());
    }
}
