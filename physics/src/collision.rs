use crate::body::Body;
use crate::config::PhysicsConfig;
use crate::vec2::{dot, length_squared, scale, sub, Vec2};

/// What the pair resolver did to two bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    /// Not touching
    Apart,
    /// Centres coincided; `b` was nudged along a fixed diagonal
    Coincident,
    /// Overlapping and already moving apart; left alone
    Receding,
    /// Overlapping with no relative motion along the normal; positions
    /// corrected only
    Separated,
    /// Approaching; impulse applied and positions corrected
    Collided,
}

impl PairOutcome {
    pub fn resolved(self) -> bool {
        !matches!(self, PairOutcome::Apart | PairOutcome::Receding)
    }
}

/// Resolve a possible disk-disk contact between `a` and `b`.
///
/// Pairs already moving apart are skipped entirely. Approaching pairs get an
/// equal and opposite impulse along the centre line with restitution
/// `config.ball_restitution`. The overlap is then removed in one step, split
/// by inverse mass so the lighter body moves further.
pub fn resolve_pair_outcome(a: &mut Body, b: &mut Body, config: &PhysicsConfig) -> PairOutcome {
    let delta = sub(b.pos, a.pos);
    let dist_sq = length_squared(delta);
    let min_dist = a.radius() + b.radius();

    if dist_sq >= min_dist * min_dist {
        return PairOutcome::Apart;
    }

    if dist_sq == 0.0 {
        // No usable normal. Push b off along the diagonal and let the next
        // frame resolve the remaining overlap.
        let nudge = min_dist * 0.5;
        b.pos.x += nudge;
        b.pos.y += nudge;
        return PairOutcome::Coincident;
    }

    let dist = dist_sq.sqrt();
    let n = Vec2::new(delta.x / dist, delta.y / dist);

    // Positive along n means b is pulling away from a.
    let rel_normal = dot(sub(b.vel, a.vel), n);
    if rel_normal > 0.0 {
        return PairOutcome::Receding;
    }
    let approaching = rel_normal < 0.0;

    let inv_a = a.inv_mass();
    let inv_b = b.inv_mass();
    let inv_sum = inv_a + inv_b;

    if approaching {
        let j = -(1.0 + config.ball_restitution) * rel_normal / inv_sum;
        let impulse = scale(n, j);
        a.vel.x -= impulse.x * inv_a;
        a.vel.y -= impulse.y * inv_a;
        b.vel.x += impulse.x * inv_b;
        b.vel.y += impulse.y * inv_b;
    }

    let overlap = min_dist - dist;
    let corr_a = overlap * inv_a / inv_sum;
    let corr_b = overlap * inv_b / inv_sum;
    a.pos.x -= corr_a * n.x;
    a.pos.y -= corr_a * n.y;
    b.pos.x += corr_b * n.x;
    b.pos.y += corr_b * n.y;

    if approaching {
        PairOutcome::Collided
    } else {
        PairOutcome::Separated
    }
}

/// Returns true if the pair was touching and got resolved.
pub fn resolve_pair(a: &mut Body, b: &mut Body, config: &PhysicsConfig) -> bool {
    resolve_pair_outcome(a, b, config).resolved()
}
