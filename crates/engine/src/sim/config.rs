use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub player_width: f32,
    pub player_height: f32,
    pub run_speed: f32,
    /// Negative is up.
    pub jump_velocity: f32,
    pub jump_hold_seconds: f32,
    pub jump_hold_boost: f32,
    pub terminal_fall_speed: f32,
    pub friction_factor: f32,
    pub pickup_radius: f32,
    pub death_delay_seconds: f32,
    pub out_of_world_margin: f32,
    pub default_moving_speed: f32,
    pub default_crumble_delay_ms: f32,
    pub default_bounce_multiplier: f32,
    pub carry_tolerance_above: f32,
    pub carry_tolerance_below: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            player_width: 16.0,
            player_height: 24.0,
            run_speed: 220.0,
            jump_velocity: -480.0,
            jump_hold_seconds: 0.18,
            jump_hold_boost: -120.0,
            terminal_fall_speed: 600.0,
            friction_factor: 0.7,
            pickup_radius: 16.0,
            death_delay_seconds: 1.0,
            out_of_world_margin: 50.0,
            default_moving_speed: 60.0,
            default_crumble_delay_ms: 500.0,
            default_bounce_multiplier: 1.5,
            carry_tolerance_above: 2.0,
            carry_tolerance_below: 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub view_width: f32,
    pub view_height: f32,
    pub deadzone_x: f32,
    pub deadzone_y: f32,
    pub smoothing_rate: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            view_width: 480.0,
            view_height: 270.0,
            deadzone_x: 60.0,
            deadzone_y: 40.0,
            smoothing_rate: 8.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub physics: PhysicsTuning,
    pub camera: CameraConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{ "physics": { "run_speed": 300.0 } }"#).expect("config");
        assert_eq!(config.physics.run_speed, 300.0);
        assert_eq!(config.physics.jump_velocity, -480.0);
        assert_eq!(config.camera, CameraConfig::default());
    }
}
