//! Automatic shooter for unattended play and soak runs.
//!
//! The bot picks an object ball, aims the cue at it with some angular error,
//! and produces the drag gesture a player would make for that shot.

use billiards_physics::vec2::{length, normalize, scale, sub, Vec2};
use billiards_physics::view::FrameSnapshot;
use billiards_physics::{Body, Shot};
use rand::Rng;

/// Shot strength profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotStyle {
    /// Short drags (20-80px)
    Soft,
    /// Medium drags (80-200px)
    Firm,
    /// Long drags (200-400px)
    Break,
}

impl BotStyle {
    /// Drag length range for this style (min, max) in pixels
    fn drag_range(&self) -> (f64, f64) {
        match self {
            BotStyle::Soft => (20.0, 80.0),
            BotStyle::Firm => (80.0, 200.0),
            BotStyle::Break => (200.0, 400.0),
        }
    }

    /// Maximum aiming error in radians
    fn aim_error(&self) -> f64 {
        match self {
            BotStyle::Soft => 0.02,
            BotStyle::Firm => 0.05,
            BotStyle::Break => 0.12,
        }
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        match rng.gen_range(0..3) {
            0 => BotStyle::Soft,
            1 => BotStyle::Firm,
            _ => BotStyle::Break,
        }
    }
}

#[derive(Debug)]
pub struct ShotBot {
    pub style: BotStyle,
    /// Pick a fresh style before every shot
    pub vary_style: bool,
    /// Shots left to play, unlimited if None
    remaining: Option<u32>,
    shots_planned: u32,
}

impl ShotBot {
    pub fn new(style: BotStyle) -> Self {
        Self {
            style,
            vary_style: false,
            remaining: None,
            shots_planned: 0,
        }
    }

    pub fn varied(rng: &mut impl Rng) -> Self {
        Self {
            style: BotStyle::random(rng),
            vary_style: true,
            remaining: None,
            shots_planned: 0,
        }
    }

    /// Stop planning after `shots` shots.
    pub fn with_limit(mut self, shots: u32) -> Self {
        self.remaining = Some(shots);
        self
    }

    pub fn shots_planned(&self) -> u32 {
        self.shots_planned
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }

    /// Plan a shot for the cue at `cue_index`. Returns None when there is no
    /// cue ball or the shot limit is used up. With no object balls the bot
    /// shoots in a random direction.
    pub fn plan_shot(&mut self, bodies: &[Body], cue_index: usize, rng: &mut impl Rng) -> Option<Shot> {
        if self.is_exhausted() {
            return None;
        }
        let cue = bodies.get(cue_index)?;
        if self.vary_style {
            self.style = BotStyle::random(rng);
        }

        let targets: Vec<&Body> = bodies
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != cue_index)
            .map(|(_, b)| b)
            .collect();

        let base_angle = if targets.is_empty() {
            rng.gen_range(-std::f64::consts::PI..std::f64::consts::PI)
        } else {
            let target = targets[rng.gen_range(0..targets.len())];
            let aim = sub(target.pos, cue.pos);
            if length(aim) < 1e-9 {
                0.0
            } else {
                aim.y.atan2(aim.x)
            }
        };

        let err = self.style.aim_error();
        let angle = base_angle + rng.gen_range(-err..=err);
        let (min, max) = self.style.drag_range();
        let drag_len = rng.gen_range(min..max);

        // Drag away from the target: the cue travels along start - end.
        let dir = normalize(Vec2::new(angle.cos(), angle.sin()));
        let start = cue.pos;
        let end = sub(start, scale(dir, drag_len));

        self.shots_planned += 1;
        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }
        Some(Shot::new(start, end))
    }

    /// Plan from a broadcast snapshot instead of live bodies.
    pub fn plan_from_snapshot(
        &mut self,
        snapshot: &FrameSnapshot,
        cue_index: usize,
        rng: &mut impl Rng,
    ) -> Option<Shot> {
        let bodies: Vec<Body> = snapshot
            .bodies
            .iter()
            .map(|v| Body::new(v.x, v.y, v.color))
            .collect();
        self.plan_shot(&bodies, cue_index, rng)
    }
}
