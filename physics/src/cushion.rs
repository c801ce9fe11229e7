use crate::body::Body;
use crate::config::PhysicsConfig;
use crate::table::Table;
use crate::vec2::{add, dot, length, scale, sub, Vec2};

/// One of the four table walls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CushionSide {
    Left,
    Right,
    Top,
    Bottom,
}

impl CushionSide {
    pub const ALL: [CushionSide; 4] = [
        CushionSide::Left,
        CushionSide::Right,
        CushionSide::Top,
        CushionSide::Bottom,
    ];

    /// Unit normal pointing from the wall into the playfield.
    pub fn inward_normal(self) -> Vec2 {
        match self {
            CushionSide::Left => Vec2::new(1.0, 0.0),
            CushionSide::Right => Vec2::new(-1.0, 0.0),
            CushionSide::Top => Vec2::new(0.0, 1.0),
            CushionSide::Bottom => Vec2::new(0.0, -1.0),
        }
    }
}

/// Which walls a body touched during one resolver call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CushionHits {
    pub left: bool,
    pub right: bool,
    pub top: bool,
    pub bottom: bool,
}

impl CushionHits {
    pub fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }

    pub fn contains(&self, side: CushionSide) -> bool {
        match side {
            CushionSide::Left => self.left,
            CushionSide::Right => self.right,
            CushionSide::Top => self.top,
            CushionSide::Bottom => self.bottom,
        }
    }

    pub fn sides(&self) -> impl Iterator<Item = CushionSide> + '_ {
        CushionSide::ALL.into_iter().filter(|s| self.contains(*s))
    }
}

/// Restitution `e` and tangential retention `t` for a hit with the given
/// incidence cosine (1 = head-on, 0 = grazing).
///
/// Head-on hits keep more normal speed and lose more tangential speed than
/// grazing ones. Both results are clamped to the configured ranges.
pub fn cushion_coefficients(cos_theta: f64, config: &PhysicsConfig) -> (f64, f64) {
    let e = config.cushion_base_restitution
        - config.cushion_restitution_angle_loss * (1.0 - cos_theta);
    let t = config.cushion_base_tangent - config.cushion_tangent_angle_loss * cos_theta;
    (
        e.clamp(config.cushion_restitution_min, config.cushion_restitution_max),
        t.clamp(config.cushion_tangent_min, config.cushion_tangent_max),
    )
}

/// Bounce a body's velocity off a wall with inward unit normal `normal`.
///
/// The normal component is inverted and scaled by `e`, the tangential
/// component keeps its direction and is scaled by `t`. A stationary body is
/// left untouched.
pub fn reflect(body: &mut Body, normal: Vec2, config: &PhysicsConfig) {
    let speed = length(body.vel);
    if speed == 0.0 {
        return;
    }

    let vn_scalar = dot(body.vel, normal);
    let vn = scale(normal, vn_scalar);
    let vt = sub(body.vel, vn);

    let cos_theta = vn_scalar.abs() / speed;
    let (e, t) = cushion_coefficients(cos_theta, config);

    body.vel = add(scale(vn, -e), scale(vt, t));
}

/// Clamp a body back inside the table and bounce it off every wall it
/// crossed. Axes are tested independently in the order left, right, top,
/// bottom, so a corner hit reflects twice in sequence.
pub fn resolve_cushion_sides(body: &mut Body, table: &Table, config: &PhysicsConfig) -> CushionHits {
    let mut hits = CushionHits::default();
    let r = body.radius();

    if body.pos.x - r < table.left {
        body.pos.x = table.left + r;
        reflect(body, CushionSide::Left.inward_normal(), config);
        hits.left = true;
    }

    if body.pos.x + r > table.right {
        body.pos.x = table.right - r;
        reflect(body, CushionSide::Right.inward_normal(), config);
        hits.right = true;
    }

    if body.pos.y - r < table.top {
        body.pos.y = table.top + r;
        reflect(body, CushionSide::Top.inward_normal(), config);
        hits.top = true;
    }

    if body.pos.y + r > table.bottom {
        body.pos.y = table.bottom - r;
        reflect(body, CushionSide::Bottom.inward_normal(), config);
        hits.bottom = true;
    }

    hits
}

/// Returns true if any cushion was hit.
pub fn resolve_cushions(body: &mut Body, table: &Table, config: &PhysicsConfig) -> bool {
    resolve_cushion_sides(body, table, config).any()
}
