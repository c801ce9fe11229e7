use crate::config::PhysicsConfig;
use crate::vec2::{length, length_squared, Vec2};

pub const DEFAULT_RADIUS: f64 = 12.0;
/// Fraction of velocity kept each frame
pub const DEFAULT_FRICTION: f64 = 0.992;
pub const DEFAULT_MASS: f64 = 1.0;

/// A ball on the table.
///
/// Position and velocity are public and change every frame. Radius, friction
/// and mass are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    radius: f64,
    friction: f64,
    mass: f64,
    pub color: u32,
}

impl Body {
    /// A standard ball at rest.
    pub fn new(x: f64, y: f64, color: u32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius: DEFAULT_RADIUS,
            friction: DEFAULT_FRICTION,
            mass: DEFAULT_MASS,
            color,
        }
    }

    /// A ball with explicit physical parameters.
    pub fn with_params(
        x: f64,
        y: f64,
        radius: f64,
        friction: f64,
        mass: f64,
        color: u32,
    ) -> Result<Self, String> {
        if !x.is_finite() || !y.is_finite() {
            return Err("position must be finite".to_string());
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err("radius must be finite and > 0".to_string());
        }
        if !(friction > 0.0 && friction <= 1.0) {
            return Err("friction must be in (0, 1]".to_string());
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err("mass must be finite and > 0".to_string());
        }
        Ok(Self {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius,
            friction,
            mass,
            color,
        })
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.vel = Vec2::new(vx, vy);
        self
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn inv_mass(&self) -> f64 {
        1.0 / self.mass
    }

    pub fn speed(&self) -> f64 {
        length(self.vel)
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * length_squared(self.vel)
    }

    pub fn is_at_rest(&self) -> bool {
        self.vel == Vec2::ZERO
    }
}

/// Advance one body by one frame: friction, rest snap, then position.
///
/// `_dt` is the wall-clock frame time. It is deliberately unused: velocities
/// are pixels per frame, so the caller must tick at a fixed rate.
pub fn integrate(body: &mut Body, config: &PhysicsConfig, _dt: f64) {
    body.vel.x *= body.friction;
    body.vel.y *= body.friction;

    if body.vel.x.abs() < config.rest_epsilon {
        body.vel.x = 0.0;
    }
    if body.vel.y.abs() < config.rest_epsilon {
        body.vel.y = 0.0;
    }

    body.pos.x += body.vel.x;
    body.pos.y += body.vel.y;
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn new_body_uses_defaults() {
        let b = Body::new(10.0, 20.0, 0xffffff);
        assert_eq!(b.radius(), DEFAULT_RADIUS);
        assert_eq!(b.friction(), DEFAULT_FRICTION);
        assert_eq!(b.mass(), DEFAULT_MASS);
        assert!(b.is_at_rest());
    }

    #[test]
    fn with_params_rejects_bad_values() {
        assert!(Body::with_params(0.0, 0.0, -1.0, 0.99, 1.0, 0).is_err());
        assert!(Body::with_params(0.0, 0.0, 0.0, 0.99, 1.0, 0).is_err());
        assert!(Body::with_params(0.0, 0.0, 12.0, 0.0, 1.0, 0).is_err());
        assert!(Body::with_params(0.0, 0.0, 12.0, 1.5, 1.0, 0).is_err());
        assert!(Body::with_params(0.0, 0.0, 12.0, f64::NAN, 1.0, 0).is_err());
        assert!(Body::with_params(0.0, 0.0, 12.0, 0.99, 0.0, 0).is_err());
        assert!(Body::with_params(f64::NAN, 0.0, 12.0, 0.99, 1.0, 0).is_err());
        assert!(Body::with_params(0.0, 0.0, 12.0, 1.0, 2.0, 0).is_ok());
    }

    #[test]
    fn integrate_applies_friction_then_moves() {
        let config = PhysicsConfig::default();
        let mut b = Body::new(100.0, 100.0, 0).with_velocity(10.0, -5.0);
        integrate(&mut b, &config, DT);
        assert!((b.vel.x - 9.92).abs() < 1e-12);
        assert!((b.vel.y + 4.96).abs() < 1e-12);
        assert!((b.pos.x - 109.92).abs() < 1e-12);
        assert!((b.pos.y - 95.04).abs() < 1e-12);
    }

    #[test]
    fn small_components_snap_to_zero() {
        let config = PhysicsConfig::default();
        let mut b = Body::new(100.0, 100.0, 0).with_velocity(0.02, 3.0);
        integrate(&mut b, &config, DT);
        // 0.02 * 0.992 falls under the threshold; y keeps moving
        assert_eq!(b.vel.x, 0.0);
        assert_eq!(b.pos.x, 100.0);
        assert!(b.vel.y > 0.0);
    }

    #[test]
    fn dt_does_not_scale_motion() {
        let config = PhysicsConfig::default();
        let mut a = Body::new(0.0, 0.0, 0).with_velocity(4.0, 2.0);
        let mut b = a.clone();
        integrate(&mut a, &config, 1.0 / 30.0);
        integrate(&mut b, &config, 1.0 / 144.0);
        assert_eq!(a, b);
    }

    #[test]
    fn speed_is_monotonic_until_exact_rest() {
        let config = PhysicsConfig::default();
        let mut b = Body::new(0.0, 0.0, 0).with_velocity(7.0, -3.0);
        let mut last = b.speed();
        let mut frames = 0;
        while !b.is_at_rest() {
            integrate(&mut b, &config, DT);
            assert!(b.speed() <= last);
            last = b.speed();
            frames += 1;
            assert!(frames < 10_000, "body never came to rest");
        }
        assert_eq!(b.vel, Vec2::ZERO);
    }

    #[test]
    fn kinetic_energy_uses_mass() {
        let b = Body::with_params(0.0, 0.0, 12.0, 0.99, 2.0, 0)
            .unwrap()
            .with_velocity(3.0, 4.0);
        assert_eq!(b.kinetic_energy(), 25.0);
    }
}
