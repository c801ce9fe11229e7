use crate::body::Body;
use crate::config::TableConfig;

/// Display colors (0xRRGGBB). Physics never reads these.
#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const BACKGROUND: u32 = 0x04280c;
    pub const CLOTH: u32 = 0x08641c;
    pub const CUSHION: u32 = 0xc4a070;
    pub const AIM_LINE: u32 = 0xffffff;
    pub const CUE_WHITE: u32 = 0xffffff;
    pub const YELLOW: u32 = 0xffff00;
    pub const RED: u32 = 0xff0000;
}

/// Axis-aligned rectangle as (x, y, width, height).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// The playable rectangle. Built once from a `TableConfig` and shared read-only.
///
/// The cushion band is centred on the line `margin` pixels in from the window
/// edge, so the inner playfield edge sits half a cushion further in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Table {
    config: TableConfig,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Table {
    pub fn new(config: &TableConfig) -> Self {
        let inset = config.margin + config.cushion_thickness / 2.0;
        Self {
            config: *config,
            left: inset,
            top: inset,
            right: config.width - inset,
            bottom: config.height - inset,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// Outer edge of the cushion band, drawn under the cloth.
    pub fn cushion_rect(&self) -> Rect {
        let c = &self.config;
        Rect {
            x: c.margin,
            y: c.margin,
            w: c.width - 2.0 * c.margin,
            h: c.height - 2.0 * c.margin,
        }
    }

    /// Green playfield inside the cushions.
    pub fn cloth_rect(&self) -> Rect {
        Rect {
            x: self.left,
            y: self.top,
            w: self.right - self.left,
            h: self.bottom - self.top,
        }
    }

    /// Whether the whole disk lies inside the inner boundary (touching counts).
    pub fn contains(&self, body: &Body) -> bool {
        let r = body.radius();
        body.pos.x - r >= self.left
            && body.pos.x + r <= self.right
            && body.pos.y - r >= self.top
            && body.pos.y + r <= self.bottom
    }
}

impl Default for Table {
    fn default() -> Self {
        Table::new(&TableConfig::default())
    }
}
