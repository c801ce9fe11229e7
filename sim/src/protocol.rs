//! JSON-lines messages between the headless driver and a front end.

use crate::table_loop::TableBroadcast;
use billiards_physics::cushion::CushionSide;
use billiards_physics::view::{FrameSnapshot, TableView};
use billiards_physics::{Shot, Vec2};
use serde::{Deserialize, Serialize};

// === Driver -> front end ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputMsg {
    #[serde(rename = "welcome")]
    Welcome(WelcomeMsg),
    #[serde(rename = "frame")]
    Frame(FrameSnapshot),
    #[serde(rename = "cushion_hit")]
    CushionHit(CushionHitMsg),
    #[serde(rename = "collision")]
    Collision(CollisionMsg),
    #[serde(rename = "at_rest")]
    AtRest(AtRestMsg),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMsg {
    pub tick_rate_hz: u32,
    pub cue_index: usize,
    pub table: TableView,
    pub frame: FrameSnapshot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CushionHitMsg {
    pub frame: u64,
    pub body: usize,
    pub side: CushionSide,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionMsg {
    pub frame: u64,
    pub a: usize,
    pub b: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtRestMsg {
    pub frame: u64,
}

impl From<TableBroadcast> for OutputMsg {
    fn from(event: TableBroadcast) -> Self {
        match event {
            TableBroadcast::Frame(snapshot) => OutputMsg::Frame(snapshot),
            TableBroadcast::CushionHit { frame, body, side } => {
                OutputMsg::CushionHit(CushionHitMsg { frame, body, side })
            }
            TableBroadcast::Collision { frame, a, b } => {
                OutputMsg::Collision(CollisionMsg { frame, a, b })
            }
            TableBroadcast::CameToRest { frame } => OutputMsg::AtRest(AtRestMsg { frame }),
        }
    }
}

impl OutputMsg {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("cannot encode output: {}", e))
    }
}

// === Front end -> driver ===

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum InputMsg {
    /// Completed drag gesture in table pixels
    #[serde(rename = "shot")]
    Shot { sx: f64, sy: f64, ex: f64, ey: f64 },
    #[serde(rename = "reset")]
    Reset,
    #[serde(rename = "quit")]
    Quit,
}

impl InputMsg {
    pub fn parse(line: &str) -> Result<Self, String> {
        serde_json::from_str(line.trim()).map_err(|e| format!("bad input {:?}: {}", line, e))
    }
}

pub fn shot_from_input(sx: f64, sy: f64, ex: f64, ey: f64) -> Shot {
    Shot::new(Vec2::new(sx, sy), Vec2::new(ex, ey))
}
