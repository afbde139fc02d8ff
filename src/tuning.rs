//! Game balance and geometry
//!
//! Every constant the simulation reads lives here so a run can be
//! re-tuned from a JSON file without recompiling.

use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("range `{name}` is empty ({min}..{max})")]
    EmptyRange { name: &'static str, min: i32, max: i32 },
    #[error("size `{name}` must be positive, got {width}x{height}")]
    NonPositiveSize {
        name: &'static str,
        width: i32,
        height: i32,
    },
    #[error("sprite frame {frame} is outside 1..={count}")]
    InvalidSpriteFrame { frame: u8, count: u8 },
    #[error("sprite step must be non-zero")]
    ZeroSpriteStep,
    #[error("respawn jitter must not be negative, got min {min}")]
    NegativeJitter { min: i32 },
    #[error("speed ramp step must not be negative, got {step}")]
    NegativeRampStep { step: i32 },
    #[error("`{name}` must be upward (negative), got {speed}")]
    NonUpwardSpeed { name: &'static str, speed: i32 },
    #[error("`{name}` must be positive, got {speed}")]
    NonPositiveSpeed { name: &'static str, speed: i32 },
}

/// Tunable constants for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Clock ===
    /// Host tick period in milliseconds (not used by the core itself)
    pub tick_interval_ms: u64,

    // === Geometry ===
    pub background_width: i32,
    pub background_y: i32,
    pub player_start: IVec2,
    pub player_size: IVec2,
    pub ground_pos: IVec2,
    pub ground_size: IVec2,
    pub obstacle_start: IVec2,
    pub obstacle_size: IVec2,

    // === Player kinematics ===
    /// Vertical speed right after a reset
    pub base_fall_speed: i32,
    /// Vertical speed while not jumping
    pub run_speed: i32,
    /// Vertical speed applied the moment a jump registers
    pub jump_speed: i32,
    /// Vertical speed on every tick while jumping
    pub airborne_speed: i32,
    pub base_force: i32,
    pub jump_force: i32,
    /// Player y must be greater than this for a jump to register
    pub jump_min_y: i32,

    // === Scrolling and difficulty ===
    pub base_background_speed: i32,
    pub base_obstacle_speed: i32,
    pub speed_ramp_step: i32,

    // === Obstacle respawn ===
    pub obstacle_respawn_threshold: i32,
    pub next_obstacle_gap: i32,
    /// Horizontal jitter, half-open `min..max`
    pub respawn_jitter_min: i32,
    pub respawn_jitter_max: i32,
    /// Respawn height, half-open `min..max`
    pub obstacle_min_y: i32,
    pub obstacle_max_y: i32,

    // === Animation ===
    pub sprite_frame_count: u8,
    pub sprite_jump_frame: u8,
    pub sprite_step: u8,

    // === Demo ===
    /// Ticks of obstacle travel ahead of contact at which the autopilot jumps
    pub autopilot_lead_ticks: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,

            background_width: BACKGROUND_WIDTH,
            background_y: BACKGROUND_Y,
            player_start: IVec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_size: IVec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            ground_pos: IVec2::new(GROUND_X, GROUND_Y),
            ground_size: IVec2::new(GROUND_WIDTH, GROUND_HEIGHT),
            obstacle_start: IVec2::new(OBSTACLE_START_X, OBSTACLE_START_Y),
            obstacle_size: IVec2::new(OBSTACLE_WIDTH, OBSTACLE_HEIGHT),

            base_fall_speed: BASE_FALL_SPEED,
            run_speed: RUN_SPEED,
            jump_speed: JUMP_SPEED,
            airborne_speed: AIRBORNE_SPEED,
            base_force: BASE_FORCE,
            jump_force: JUMP_FORCE,
            jump_min_y: JUMP_MIN_Y,

            base_background_speed: BASE_BACKGROUND_SPEED,
            base_obstacle_speed: BASE_OBSTACLE_SPEED,
            speed_ramp_step: SPEED_RAMP_STEP,

            obstacle_respawn_threshold: OBSTACLE_RESPAWN_THRESHOLD,
            next_obstacle_gap: NEXT_OBSTACLE_GAP,
            respawn_jitter_min: RESPAWN_JITTER_MIN,
            respawn_jitter_max: RESPAWN_JITTER_MAX,
            obstacle_min_y: OBSTACLE_MIN_Y,
            obstacle_max_y: OBSTACLE_MAX_Y,

            sprite_frame_count: SPRITE_FRAME_COUNT,
            sprite_jump_frame: SPRITE_JUMP_FRAME,
            sprite_step: SPRITE_STEP,

            autopilot_lead_ticks: AUTOPILOT_LEAD_TICKS,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Serialize to pretty JSON (useful as a starting template)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check ranges, sizes, and speed directions
    ///
    /// A valid tuning keeps respawns at or past `next_obstacle_gap`, keeps
    /// the difficulty ramp non-decreasing, and makes jumps go up.
    pub fn validate(&self) -> Result<(), TuningError> {
        check_range("respawn_jitter", self.respawn_jitter_min, self.respawn_jitter_max)?;
        check_range("obstacle_y", self.obstacle_min_y, self.obstacle_max_y)?;
        if self.respawn_jitter_min < 0 {
            return Err(TuningError::NegativeJitter {
                min: self.respawn_jitter_min,
            });
        }
        if self.speed_ramp_step < 0 {
            return Err(TuningError::NegativeRampStep {
                step: self.speed_ramp_step,
            });
        }

        check_upward("jump_speed", self.jump_speed)?;
        check_upward("airborne_speed", self.airborne_speed)?;
        check_positive("base_fall_speed", self.base_fall_speed)?;
        check_positive("run_speed", self.run_speed)?;
        check_positive("base_background_speed", self.base_background_speed)?;
        check_positive("base_obstacle_speed", self.base_obstacle_speed)?;

        check_size("player_size", self.player_size)?;
        check_size("ground_size", self.ground_size)?;
        check_size("obstacle_size", self.obstacle_size)?;
        check_size(
            "background",
            IVec2::new(self.background_width, self.background_width),
        )?;

        if self.sprite_jump_frame == 0 || self.sprite_jump_frame > self.sprite_frame_count {
            return Err(TuningError::InvalidSpriteFrame {
                frame: self.sprite_jump_frame,
                count: self.sprite_frame_count,
            });
        }
        if self.sprite_step == 0 {
            return Err(TuningError::ZeroSpriteStep);
        }
        Ok(())
    }
}

fn check_range(name: &'static str, min: i32, max: i32) -> Result<(), TuningError> {
    if min >= max {
        return Err(TuningError::EmptyRange { name, min, max });
    }
    Ok(())
}

fn check_upward(name: &'static str, speed: i32) -> Result<(), TuningError> {
    if speed >= 0 {
        return Err(TuningError::NonUpwardSpeed { name, speed });
    }
    Ok(())
}

fn check_positive(name: &'static str, speed: i32) -> Result<(), TuningError> {
    if speed <= 0 {
        return Err(TuningError::NonPositiveSpeed { name, speed });
    }
    Ok(())
}

fn check_size(name: &'static str, size: IVec2) -> Result<(), TuningError> {
    if size.x <= 0 || size.y <= 0 {
        return Err(TuningError::NonPositiveSize {
            name,
            width: size.x,
            height: size.y,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "base_obstacle_speed": 20 }"#).unwrap();
        assert_eq!(tuning.base_obstacle_speed, 20);
        assert_eq!(tuning.background_width, BACKGROUND_WIDTH);
        assert_eq!(tuning.player_start, IVec2::new(PLAYER_START_X, PLAYER_START_Y));
    }

    #[test]
    fn test_json_template_parses_back() {
        let json = Tuning::default().to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), Tuning::default());
    }

    #[test]
    fn test_empty_height_range_rejected() {
        let err = Tuning::from_json(r#"{ "obstacle_min_y": 300, "obstacle_max_y": 300 }"#)
            .unwrap_err();
        assert!(matches!(err, TuningError::EmptyRange { name: "obstacle_y", .. }));
    }

    #[test]
    fn test_bad_sizes_and_frames_rejected() {
        let mut tuning = Tuning::default();
        tuning.obstacle_size = IVec2::new(0, 10);
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonPositiveSize { name: "obstacle_size", .. })
        ));

        let mut tuning = Tuning::default();
        tuning.sprite_jump_frame = 9;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::InvalidSpriteFrame { frame: 9, count: 8 })
        ));

        let mut tuning = Tuning::default();
        tuning.sprite_step = 0;
        assert!(matches!(tuning.validate(), Err(TuningError::ZeroSpriteStep)));
    }

    #[test]
    fn test_bad_respawn_and_ramp_rejected() {
        let mut tuning = Tuning::default();
        tuning.respawn_jitter_min = -60;
        tuning.respawn_jitter_max = -50;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NegativeJitter { min: -60 })
        ));

        // Zero jitter still respawns at the base
        let mut tuning = Tuning::default();
        tuning.respawn_jitter_min = 0;
        assert!(tuning.validate().is_ok());

        let mut tuning = Tuning::default();
        tuning.speed_ramp_step = -1;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NegativeRampStep { step: -1 })
        ));

        let mut tuning = Tuning::default();
        tuning.speed_ramp_step = 0;
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_bad_speed_directions_rejected() {
        let mut tuning = Tuning::default();
        tuning.jump_speed = 4;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonUpwardSpeed { name: "jump_speed", speed: 4 })
        ));

        let mut tuning = Tuning::default();
        tuning.airborne_speed = 0;
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::NonUpwardSpeed { name: "airborne_speed", .. })
        ));

        for name in ["base_fall_speed", "run_speed", "base_background_speed", "base_obstacle_speed"] {
            let mut tuning = Tuning::default();
            match name {
                "base_fall_speed" => tuning.base_fall_speed = 0,
                "run_speed" => tuning.run_speed = -3,
                "base_background_speed" => tuning.base_background_speed = 0,
                _ => tuning.base_obstacle_speed = -12,
            }
            match tuning.validate() {
                Err(TuningError::NonPositiveSpeed { name: got, .. }) => assert_eq!(got, name),
                other => panic!("{name}: expected NonPositiveSpeed, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_combined_bad_tuning_rejected_by_game() {
        let json = r#"{
            "respawn_jitter_min": -60,
            "respawn_jitter_max": -50,
            "speed_ramp_step": -1,
            "jump_speed": 4
        }"#;
        assert!(Tuning::from_json(json).is_err());

        let mut tuning = Tuning::default();
        tuning.respawn_jitter_min = -60;
        tuning.respawn_jitter_max = -50;
        tuning.speed_ramp_step = -1;
        tuning.jump_speed = 4;
        assert!(crate::sim::GameState::with_tuning(1, tuning).is_err());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Tuning::load("/nonexistent/endless-runner-tuning.json"),
            Err(TuningError::Io(_))
        ));
    }
}
