use billiards_physics::{PhysicsConfig, ShotConfig, TableConfig};
use std::path::Path;

/// Environment variable naming an optional JSON config file
pub const CONFIG_ENV: &str = "BILLIARDS_CONFIG";

/// Simulation configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimConfig {
    /// Physics ticks per second. Velocities are per tick, so this sets game speed.
    pub tick_rate_hz: u32,
    /// Frame snapshots per second sent to listeners
    pub broadcast_rate_hz: u32,
    pub rng_seed: u64,
    pub physics: PhysicsConfig,
    pub table: TableConfig,
    pub shot: ShotConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            broadcast_rate_hz: 30,
            rng_seed: 42,
            physics: PhysicsConfig::default(),
            table: TableConfig::default(),
            shot: ShotConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_rate_hz == 0 {
            return Err("tick_rate_hz must be > 0".to_string());
        }
        if self.broadcast_rate_hz == 0 {
            return Err("broadcast_rate_hz must be > 0".to_string());
        }
        if self.broadcast_rate_hz > self.tick_rate_hz {
            return Err("broadcast_rate_hz must be <= tick_rate_hz".to_string());
        }
        self.physics.validate().map_err(|e| format!("physics: {}", e))?;
        self.table.validate().map_err(|e| format!("table: {}", e))?;
        self.shot.validate().map_err(|e| format!("shot: {}", e))?;
        Ok(())
    }

    /// Ticks between frame broadcasts (at least 1)
    pub fn broadcast_every_n(&self) -> u64 {
        (self.tick_rate_hz / self.broadcast_rate_hz).max(1) as u64
    }

    /// Fixed tick length in seconds
    pub fn tick_seconds(&self) -> f64 {
        1.0 / self.tick_rate_hz as f64
    }

    /// Parse a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid config JSON: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        Self::from_json(&text)
    }

    /// Defaults, overridden by the file named in `BILLIARDS_CONFIG` if set.
    pub fn from_env() -> Result<Self, String> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use billiards_physics::ShotMode;

    #[test]
    fn default_sim_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_tick_rate_invalid() {
        let config = SimConfig {
            tick_rate_hz: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn broadcast_faster_than_tick_invalid() {
        let config = SimConfig {
            tick_rate_hz: 30,
            broadcast_rate_hz: 60,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn nested_errors_are_prefixed() {
        let mut config = SimConfig::default();
        config.physics.ball_restitution = 2.0;
        let err = config.validate().unwrap_err();
        assert!(err.starts_with("physics:"), "{}", err);
    }

    #[test]
    fn broadcast_every_n_divides_rates() {
        let config = SimConfig::default();
        assert_eq!(config.broadcast_every_n(), 2);
    }

    #[test]
    fn json_overrides_merge_with_defaults() {
        let config = SimConfig::from_json(
            r#"{
                "tickRateHz": 120,
                "physics": { "ballRestitution": 0.98 },
                "shot": { "mode": { "type": "impulse", "powerPerPixel": 0.04, "maxDrag": 200.0 } }
            }"#,
        )
        .unwrap();
        assert_eq!(config.tick_rate_hz, 120);
        assert_eq!(config.broadcast_rate_hz, 30);
        assert_eq!(config.physics.ball_restitution, 0.98);
        assert_eq!(config.physics.rest_epsilon, 0.02);
        assert_eq!(config.shot.min_drag, 5.0);
        assert!(matches!(config.shot.mode, ShotMode::Impulse { .. }));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(SimConfig::from_json("{ tickRateHz: ").is_err());
    }
}
