use crate::body::{integrate, Body};
use crate::collision::{resolve_pair_outcome, PairOutcome};
use crate::config::PhysicsConfig;
use crate::cushion::{resolve_cushion_sides, CushionSide};
use crate::table::Table;

/// A body touched a wall this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CushionHit {
    pub body: usize,
    pub side: CushionSide,
}

/// Two bodies touched this frame. `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BallContact {
    pub a: usize,
    pub b: usize,
    pub outcome: PairOutcome,
}

/// Events produced by one `step`. The core has no side effects of its own;
/// callers use this for sound, logging or rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub cushion_hits: Vec<CushionHit>,
    pub contacts: Vec<BallContact>,
}

impl StepReport {
    pub fn is_empty(&self) -> bool {
        self.cushion_hits.is_empty() && self.contacts.is_empty()
    }

    /// Contacts where an impulse was exchanged.
    pub fn collisions(&self) -> impl Iterator<Item = &BallContact> {
        self.contacts
            .iter()
            .filter(|c| c.outcome == PairOutcome::Collided)
    }

    pub fn clear(&mut self) {
        self.cushion_hits.clear();
        self.contacts.clear();
    }
}

/// Advance every body by one frame.
///
/// Each body is integrated and clamped to the cushions first; only then are
/// all unordered pairs resolved, in `(i, j > i)` order. A ball pushed off a
/// cushion this frame collides from its corrected position.
///
/// If the frame ends with every body at rest, the cushions are applied once
/// more so a pair correction cannot leave a resting ball over a wall. Those
/// clamps are not reported as hits.
pub fn step(bodies: &mut [Body], table: &Table, config: &PhysicsConfig, dt: f64) -> StepReport {
    let mut report = StepReport::default();
    step_into(bodies, table, config, dt, &mut report);
    report
}

/// Like [`step`], but appends into a caller-owned report to reuse its buffers.
pub fn step_into(
    bodies: &mut [Body],
    table: &Table,
    config: &PhysicsConfig,
    dt: f64,
    report: &mut StepReport,
) {
    for (i, body) in bodies.iter_mut().enumerate() {
        integrate(body, config, dt);
        let hits = resolve_cushion_sides(body, table, config);
        report
            .cushion_hits
            .extend(hits.sides().map(|side| CushionHit { body: i, side }));
    }

    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for (offset, b) in tail.iter_mut().enumerate() {
            let outcome = resolve_pair_outcome(a, b, config);
            if outcome.resolved() {
                report.contacts.push(BallContact {
                    a: i,
                    b: i + 1 + offset,
                    outcome,
                });
            }
        }
    }

    if all_at_rest(bodies) {
        for body in bodies.iter_mut() {
            resolve_cushion_sides(body, table, config);
        }
    }
}

/// Total kinetic energy of a set of bodies.
pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies.iter().map(Body::kinetic_energy).sum()
}

/// True once every body has exactly zero velocity.
pub fn all_at_rest(bodies: &[Body]) -> bool {
    bodies.iter().all(Body::is_at_rest)
}
