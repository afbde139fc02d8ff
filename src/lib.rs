//! Endless Runner - A side-scrolling jump-the-obstacle game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, game state)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use sim::{GameState, RenderSnapshot, TickInput, tick};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Nominal interval between ticks, driven by the host clock
    pub const TICK_INTERVAL_MS: u64 = 20;

    /// Background tile dimensions (two tiles form the loop)
    pub const BACKGROUND_WIDTH: i32 = 1250;
    pub const BACKGROUND_Y: i32 = 0;

    /// Player hit box and start position (x never changes)
    pub const PLAYER_START_X: i32 = 100;
    pub const PLAYER_START_Y: i32 = 150;
    pub const PLAYER_WIDTH: i32 = 55;
    pub const PLAYER_HEIGHT: i32 = 100;

    /// Ground plane
    pub const GROUND_X: i32 = 0;
    pub const GROUND_Y: i32 = 380;
    pub const GROUND_WIDTH: i32 = 1250;
    pub const GROUND_HEIGHT: i32 = 70;

    /// Obstacle hit box and start position
    pub const OBSTACLE_START_X: i32 = 950;
    pub const OBSTACLE_START_Y: i32 = 280;
    pub const OBSTACLE_WIDTH: i32 = 50;
    pub const OBSTACLE_HEIGHT: i32 = 60;

    /// Vertical velocities (pixels/tick, positive is down)
    pub const BASE_FALL_SPEED: i32 = 5;
    pub const RUN_SPEED: i32 = 12;
    pub const JUMP_SPEED: i32 = -12;
    pub const AIRBORNE_SPEED: i32 = -9;

    /// Jump impulse countdown
    pub const BASE_FORCE: i32 = 5;
    pub const JUMP_FORCE: i32 = 15;
    /// Jumps only register while the player is lower than this
    pub const JUMP_MIN_Y: i32 = 250;

    /// Scroll speeds (pixels/tick) and difficulty ramp
    pub const BASE_BACKGROUND_SPEED: i32 = 3;
    pub const BASE_OBSTACLE_SPEED: i32 = 12;
    pub const SPEED_RAMP_STEP: i32 = 1;

    /// Obstacle respawn
    pub const OBSTACLE_RESPAWN_THRESHOLD: i32 = -50;
    pub const NEXT_OBSTACLE_GAP: i32 = 950;
    pub const RESPAWN_JITTER_MIN: i32 = 1;
    pub const RESPAWN_JITTER_MAX: i32 = 100;
    pub const OBSTACLE_MIN_Y: i32 = 275;
    pub const OBSTACLE_MAX_Y: i32 = 290;

    /// Running animation
    pub const SPRITE_FRAME_COUNT: u8 = 8;
    pub const SPRITE_JUMP_FRAME: u8 = 2;
    pub const SPRITE_STEP: u8 = 1;

    /// Autopilot jumps when the obstacle is about this many ticks away
    pub const AUTOPILOT_LEAD_TICKS: i32 = 12;
}
