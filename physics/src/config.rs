/// Tunable physics constants.
///
/// Velocities are in pixels per frame, so every coefficient here is a
/// per-frame quantity. Changing the tick rate changes the feel of the table.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicsConfig {
    /// Velocity components below this magnitude snap to zero (px/frame)
    pub rest_epsilon: f64,
    /// Cushion restitution for a head-on hit, before the angle term
    pub cushion_base_restitution: f64,
    /// Restitution lost as the hit goes from head-on to grazing
    pub cushion_restitution_angle_loss: f64,
    pub cushion_restitution_min: f64,
    pub cushion_restitution_max: f64,
    /// Tangential retention for a grazing hit, before the angle term
    pub cushion_base_tangent: f64,
    /// Tangential retention lost as the hit goes from grazing to head-on
    pub cushion_tangent_angle_loss: f64,
    pub cushion_tangent_min: f64,
    pub cushion_tangent_max: f64,
    /// Ball-ball restitution
    pub ball_restitution: f64,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            rest_epsilon: 0.02,
            cushion_base_restitution: 0.93,
            cushion_restitution_angle_loss: 0.05,
            cushion_restitution_min: 0.70,
            cushion_restitution_max: 0.98,
            cushion_base_tangent: 0.97,
            cushion_tangent_angle_loss: 0.05,
            cushion_tangent_min: 0.85,
            cushion_tangent_max: 0.99,
            ball_restitution: 0.95,
        }
    }
}

impl PhysicsConfig {
    pub fn validate(&self) -> Result<(), String> {
        let values = [
            ("rest_epsilon", self.rest_epsilon),
            ("cushion_base_restitution", self.cushion_base_restitution),
            (
                "cushion_restitution_angle_loss",
                self.cushion_restitution_angle_loss,
            ),
            ("cushion_restitution_min", self.cushion_restitution_min),
            ("cushion_restitution_max", self.cushion_restitution_max),
            ("cushion_base_tangent", self.cushion_base_tangent),
            ("cushion_tangent_angle_loss", self.cushion_tangent_angle_loss),
            ("cushion_tangent_min", self.cushion_tangent_min),
            ("cushion_tangent_max", self.cushion_tangent_max),
            ("ball_restitution", self.ball_restitution),
        ];
        for (name, value) in values {
            if !value.is_finite() {
                return Err(format!("{} must be finite", name));
            }
        }
        if self.rest_epsilon < 0.0 {
            return Err("rest_epsilon must be >= 0".to_string());
        }
        validate_clamp_range(
            "cushion_restitution",
            self.cushion_restitution_min,
            self.cushion_restitution_max,
        )?;
        validate_clamp_range(
            "cushion_tangent",
            self.cushion_tangent_min,
            self.cushion_tangent_max,
        )?;
        if !(0.0..=1.0).contains(&self.ball_restitution) {
            return Err("ball_restitution must be in [0, 1]".to_string());
        }
        Ok(())
    }
}

// An upper bound above 1 would let a collision add energy.
fn validate_clamp_range(name: &str, min: f64, max: f64) -> Result<(), String> {
    if min < 0.0 {
        return Err(format!("{}_min must be >= 0", name));
    }
    if max < min {
        return Err(format!("{}_max must be >= {}_min", name, name));
    }
    if max > 1.0 {
        return Err(format!("{}_max must be <= 1", name));
    }
    Ok(())
}

/// Table dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableConfig {
    /// Outer window width
    pub width: f64,
    /// Outer window height
    pub height: f64,
    /// Background strip between the window edge and the cushion
    pub margin: f64,
    /// Cushion band width; half of it lies inside the playfield edge
    pub cushion_thickness: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 500.0,
            margin: 40.0,
            cushion_thickness: 30.0,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err("width must be finite and > 0".to_string());
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err("height must be finite and > 0".to_string());
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err("margin must be finite and >= 0".to_string());
        }
        if !self.cushion_thickness.is_finite() || self.cushion_thickness < 0.0 {
            return Err("cushion_thickness must be finite and >= 0".to_string());
        }
        let inset = 2.0 * (self.margin + self.cushion_thickness / 2.0);
        if inset >= self.width || inset >= self.height {
            return Err("margin and cushion leave no playfield".to_string());
        }
        Ok(())
    }
}

/// How a drag gesture turns into cue-ball motion.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShotMode {
    /// Cue velocity is set to `drag * scale`.
    Velocity { scale: f64 },
    /// An impulse of `min(|drag|, max_drag) * power_per_pixel` along the drag.
    #[serde(rename_all = "camelCase")]
    Impulse { power_per_pixel: f64, max_drag: f64 },
}

impl Default for ShotMode {
    fn default() -> Self {
        ShotMode::Velocity { scale: 0.04 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShotConfig {
    pub mode: ShotMode,
    /// Drags shorter than this (px) are cancelled
    pub min_drag: f64,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            mode: ShotMode::default(),
            min_drag: 5.0,
        }
    }
}

impl ShotConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.min_drag.is_finite() || self.min_drag < 0.0 {
            return Err("min_drag must be finite and >= 0".to_string());
        }
        match self.mode {
            ShotMode::Velocity { scale } => {
                if !scale.is_finite() || scale <= 0.0 {
                    return Err("velocity scale must be finite and > 0".to_string());
                }
            }
            ShotMode::Impulse {
                power_per_pixel,
                max_drag,
            } => {
                if !power_per_pixel.is_finite() || power_per_pixel <= 0.0 {
                    return Err("power_per_pixel must be finite and > 0".to_string());
                }
                if !max_drag.is_finite() || max_drag <= 0.0 {
                    return Err("max_drag must be finite and > 0".to_string());
                }
            }
        }
        Ok(())
    }
}
