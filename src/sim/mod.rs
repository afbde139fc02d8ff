//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick, integer pixels only
//! - Seeded RNG only
//! - No rendering, timing, or platform dependencies

pub mod collision;
pub mod input;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::HitBox;
pub use input::{InputEvent, InputQueue, InputSender, TickInput};
pub use snapshot::{RenderSnapshot, TRY_AGAIN_SUFFIX};
pub use state::{
    BackgroundTile, GameEvent, GamePhase, GameState, Ground, Highlight, Obstacle, Player, RunState,
};
pub use tick::tick;
