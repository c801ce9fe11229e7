//! Billiards table physics.
//!
//! Frame-locked 2D disk dynamics: per-frame friction, angle-dependent cushion
//! rebounds and impulse-based ball-ball collisions. Velocities are pixels per
//! frame; call [`step::step`] once per fixed tick.

pub mod body;
pub mod collision;
pub mod config;
pub mod cushion;
pub mod shot;
pub mod step;
pub mod table;
pub mod vec2;
pub mod view;

pub use body::Body;
pub use config::{PhysicsConfig, ShotConfig, ShotMode, TableConfig};
pub use shot::{apply_shot, DragState, Shot};
pub use step::{step, StepReport};
pub use table::{Colors, Table};
pub use vec2::Vec2;
