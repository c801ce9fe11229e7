use crate::config::SimConfig;
use billiards_physics::step::{all_at_rest, kinetic_energy, step_into};
use billiards_physics::view::{FrameSnapshot, TableView};
use billiards_physics::{
    apply_shot, Body, Colors, PhysicsConfig, Shot, ShotConfig, StepReport, Table,
};

/// Index of the cue ball in the default rack
pub const CUE_INDEX: usize = 0;

/// Opening position: white cue, yellow and red object balls.
pub fn default_rack() -> Vec<Body> {
    vec![
        Body::new(300.0, 200.0, Colors::CUE_WHITE),
        Body::new(600.0, 250.0, Colors::YELLOW),
        Body::new(400.0, 350.0, Colors::RED),
    ]
}

/// Central table state owned by the table loop task.
pub struct TableState {
    pub bodies: Vec<Body>,
    pub table: Table,
    pub physics: PhysicsConfig,
    pub shot_config: ShotConfig,
    cue_index: usize,
    frame: u64,
    shots_taken: u32,
    initial: Vec<Body>,
    report: StepReport,
}

impl TableState {
    pub fn new(config: &SimConfig) -> Self {
        Self::build(config, default_rack(), CUE_INDEX)
    }

    /// Table with a custom set of bodies. `cue_index` must be in range
    /// unless `bodies` is empty.
    pub fn with_bodies(
        config: &SimConfig,
        bodies: Vec<Body>,
        cue_index: usize,
    ) -> Result<Self, String> {
        if !bodies.is_empty() && cue_index >= bodies.len() {
            return Err(format!(
                "cue index {} out of range for {} bodies",
                cue_index,
                bodies.len()
            ));
        }
        Ok(Self::build(config, bodies, cue_index))
    }

    fn build(config: &SimConfig, bodies: Vec<Body>, cue_index: usize) -> Self {
        Self {
            initial: bodies.clone(),
            bodies,
            table: Table::new(&config.table),
            physics: config.physics,
            shot_config: config.shot,
            cue_index,
            frame: 0,
            shots_taken: 0,
            report: StepReport::default(),
        }
    }

    pub fn cue_index(&self) -> usize {
        self.cue_index
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn shots_taken(&self) -> u32 {
        self.shots_taken
    }

    pub fn cue(&self) -> Option<&Body> {
        self.bodies.get(self.cue_index)
    }

    /// Apply a drag gesture to the cue ball. Returns false if the drag was
    /// too short or there is no cue ball.
    pub fn shoot(&mut self, shot: &Shot) -> bool {
        let Some(cue) = self.bodies.get_mut(self.cue_index) else {
            return false;
        };
        let applied = apply_shot(cue, shot, &self.shot_config);
        if applied {
            self.shots_taken += 1;
            tracing::debug!(
                "Shot {} at frame {}: cue velocity ({:.3}, {:.3})",
                self.shots_taken,
                self.frame,
                cue.vel.x,
                cue.vel.y
            );
        } else {
            tracing::debug!("Shot cancelled, drag {:.1}px too short", shot.length());
        }
        applied
    }

    /// Advance one fixed tick. The returned report is valid until the next tick.
    pub fn tick(&mut self, dt: f64) -> &StepReport {
        self.report.clear();
        step_into(
            &mut self.bodies,
            &self.table,
            &self.physics,
            dt,
            &mut self.report,
        );
        self.frame += 1;
        &self.report
    }

    /// Events from the most recent tick
    pub fn last_report(&self) -> &StepReport {
        &self.report
    }

    /// Put every ball back on its starting spot.
    pub fn reset(&mut self) {
        self.bodies = self.initial.clone();
        self.report.clear();
        tracing::info!("Table reset at frame {}", self.frame);
    }

    pub fn at_rest(&self) -> bool {
        all_at_rest(&self.bodies)
    }

    pub fn total_energy(&self) -> f64 {
        kinetic_energy(&self.bodies)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self.frame, &self.bodies)
    }

    pub fn table_view(&self) -> TableView {
        TableView::from_table(&self.table)
    }
}
