use crate::body::Body;
use crate::config::{ShotConfig, ShotMode};
use crate::vec2::{length, normalize, scale, sub, Vec2};

/// A completed drag gesture in screen pixels.
///
/// The cue travels from `end` back towards `start`, like pulling a slingshot.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Shot {
    pub start: Vec2,
    pub end: Vec2,
}

impl Shot {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// `start - end`
    pub fn drag_vector(&self) -> Vec2 {
        sub(self.start, self.end)
    }

    pub fn length(&self) -> f64 {
        length(self.drag_vector())
    }

    /// Velocity change this shot gives a body of the given mass, or None if
    /// the drag is too short to count.
    pub fn velocity_change(&self, mass: f64, config: &ShotConfig) -> Option<Vec2> {
        let drag = self.drag_vector();
        let len = length(drag);
        if len < config.min_drag {
            return None;
        }
        match config.mode {
            ShotMode::Velocity { scale: k } => Some(scale(drag, k)),
            ShotMode::Impulse {
                power_per_pixel,
                max_drag,
            } => {
                let magnitude = len.min(max_drag) * power_per_pixel;
                Some(scale(normalize(drag), magnitude / mass))
            }
        }
    }
}

/// Launch the cue body. Returns false if the drag was too short, in which
/// case the body is left untouched.
///
/// `Velocity` mode replaces the cue velocity; `Impulse` mode adds to it.
pub fn apply_shot(cue: &mut Body, shot: &Shot, config: &ShotConfig) -> bool {
    let Some(dv) = shot.velocity_change(cue.mass(), config) else {
        return false;
    };
    match config.mode {
        ShotMode::Velocity { .. } => cue.vel = dv,
        ShotMode::Impulse { .. } => {
            cue.vel.x += dv.x;
            cue.vel.y += dv.y;
        }
    }
    true
}

/// Mouse-drag tracking for the shot gesture.
///
/// Press records the anchor, release yields the shot. Purely a value type so
/// any input layer can drive it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    start: Option<Vec2>,
}

impl DragState {
    pub fn press(&mut self, pos: Vec2) {
        self.start = Some(pos);
    }

    /// Finish the gesture. None if no press was recorded.
    pub fn release(&mut self, pos: Vec2) -> Option<Shot> {
        let start = self.start.take()?;
        Some(Shot::new(start, pos))
    }

    pub fn cancel(&mut self) {
        self.start = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.start.is_some()
    }

    /// Segment to draw while dragging: anchor to current pointer.
    pub fn aim_line(&self, current: Vec2) -> Option<(Vec2, Vec2)> {
        self.start.map(|start| (start, current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vec2::vec2;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "Expected {} to be close to {}",
            actual,
            expected
        );
    }

    #[test]
    fn velocity_mode_sets_scaled_drag() {
        let config = ShotConfig::default();
        let mut cue = Body::new(300.0, 200.0, 0xffffff).with_velocity(1.0, 1.0);
        let shot = Shot::new(vec2(300.0, 200.0), vec2(400.0, 150.0));
        assert!(apply_shot(&mut cue, &shot, &config));
        assert_close(cue.vel.x, -4.0);
        assert_close(cue.vel.y, 2.0);
    }

    #[test]
    fn short_drag_is_cancelled() {
        let config = ShotConfig::default();
        let mut cue = Body::new(300.0, 200.0, 0xffffff);
        let shot = Shot::new(vec2(300.0, 200.0), vec2(303.0, 203.0));
        assert!(shot.length() < config.min_drag);
        assert!(!apply_shot(&mut cue, &shot, &config));
        assert!(cue.is_at_rest());
    }

    #[test]
    fn impulse_mode_caps_drag_and_divides_by_mass() {
        let config = ShotConfig {
            mode: ShotMode::Impulse {
                power_per_pixel: 0.05,
                max_drag: 100.0,
            },
            min_drag: 5.0,
        };
        let mut cue = Body::with_params(300.0, 200.0, 12.0, 0.992, 2.0, 0xffffff)
            .unwrap()
            .with_velocity(1.0, 0.0);
        // 300 px drag, capped at 100 -> impulse 5 -> dv 2.5
        let shot = Shot::new(vec2(300.0, 200.0), vec2(0.0, 200.0));
        assert!(apply_shot(&mut cue, &shot, &config));
        assert_close(cue.vel.x, 1.0 + 2.5);
        assert_close(cue.vel.y, 0.0);
    }

    #[test]
    fn drag_state_press_release() {
        let mut drag = DragState::default();
        assert!(drag.release(vec2(1.0, 1.0)).is_none());

        drag.press(vec2(10.0, 10.0));
        assert!(drag.is_dragging());
        assert_eq!(
            drag.aim_line(vec2(40.0, 50.0)),
            Some((vec2(10.0, 10.0), vec2(40.0, 50.0)))
        );

        let shot = drag.release(vec2(40.0, 50.0)).unwrap();
        assert_eq!(shot.drag_vector(), vec2(-30.0, -40.0));
        assert_eq!(shot.length(), 50.0);
        assert!(!drag.is_dragging());
        assert!(drag.aim_line(vec2(0.0, 0.0)).is_none());
    }

    #[test]
    fn cancel_drops_gesture() {
        let mut drag = DragState::default();
        drag.press(vec2(10.0, 10.0));
        drag.cancel();
        assert!(drag.release(vec2(90.0, 10.0)).is_none());
    }
}
