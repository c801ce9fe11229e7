//! Read-only state handed to a renderer each frame.

use crate::body::Body;
use crate::table::{Rect, Table};
use serde::{Deserialize, Serialize};

/// Round to 2 decimal places; sub-pixel precision beyond that is never drawn
#[inline]
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyView {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub color: u32,
}

impl BodyView {
    pub fn from_body(index: usize, body: &Body) -> Self {
        Self {
            index,
            x: round2(body.pos.x),
            y: round2(body.pos.y),
            radius: body.radius(),
            color: body.color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub cushion_rect: Rect,
    pub cloth_rect: Rect,
}

impl TableView {
    pub fn from_table(table: &Table) -> Self {
        Self {
            left: table.left,
            top: table.top,
            right: table.right,
            bottom: table.bottom,
            cushion_rect: table.cushion_rect(),
            cloth_rect: table.cloth_rect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameSnapshot {
    pub frame: u64,
    pub at_rest: bool,
    pub bodies: Vec<BodyView>,
}

impl FrameSnapshot {
    pub fn capture(frame: u64, bodies: &[Body]) -> Self {
        Self {
            frame,
            at_rest: bodies.iter().all(Body::is_at_rest),
            bodies: bodies
                .iter()
                .enumerate()
                .map(|(i, b)| BodyView::from_body(i, b))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Colors;

    #[test]
    fn capture_lists_bodies_in_order() {
        let bodies = vec![
            Body::new(300.123456, 200.0, Colors::CUE_WHITE).with_velocity(1.0, 0.0),
            Body::new(600.0, 250.0, Colors::YELLOW),
        ];
        let snap = FrameSnapshot::capture(7, &bodies);
        assert_eq!(snap.frame, 7);
        assert!(!snap.at_rest);
        assert_eq!(snap.bodies.len(), 2);
        assert_eq!(snap.bodies[0].x, 300.12);
        assert_eq!(snap.bodies[1].index, 1);
        assert_eq!(snap.bodies[1].color, Colors::YELLOW);
        assert_eq!(snap.bodies[1].radius, 12.0);
    }

    #[test]
    fn snapshot_json_uses_camel_case() {
        let snap = FrameSnapshot::capture(1, &[Body::new(100.0, 100.0, Colors::RED)]);
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"atRest\":true"));
        let parsed: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snap);
    }

    #[test]
    fn table_view_exposes_cloth_and_cushion() {
        let view = TableView::from_table(&Table::default());
        assert_eq!(view.left, 55.0);
        assert_eq!(view.cloth_rect.w, 790.0);
        let json = serde_json::to_string(&view).unwrap();
        assert!(json.contains("\"cushionRect\""));
        assert!(json.contains("\"clothRect\""));
    }
}
