//! Read-only view for the rendering layer

use glam::IVec2;
use serde::Serialize;

use super::collision::HitBox;
use super::state::{GameState, Highlight};

/// Appended to the score label while the run is over
pub const TRY_AGAIN_SUFFIX: &str = " - Press enter to try again.";

/// Everything a renderer needs after a tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderSnapshot {
    pub player_pos: IVec2,
    pub player_size: IVec2,
    /// Running animation frame, resolved to an image by the host
    pub sprite_frame: u8,
    pub obstacle_pos: IVec2,
    pub obstacle_size: IVec2,
    pub ground: HitBox,
    pub backgrounds: [IVec2; 2],
    pub score: u32,
    pub game_over: bool,
    pub highlight: Highlight,
    pub score_label: String,
}

impl GameState {
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            player_pos: self.player.pos,
            player_size: self.player.size,
            sprite_frame: self.player.sprite_frame,
            obstacle_pos: self.obstacle.pos,
            obstacle_size: self.obstacle.size,
            ground: self.ground.hit_box(),
            backgrounds: [self.backgrounds[0].pos, self.backgrounds[1].pos],
            score: self.run.score,
            game_over: self.is_game_over(),
            highlight: self.run.highlight,
            score_label: self.score_label(),
        }
    }

    /// "Score: N", with a retry prompt once the run is over
    pub fn score_label(&self) -> String {
        if self.is_game_over() {
            format!("Score: {}{}", self.run.score, TRY_AGAIN_SUFFIX)
        } else {
            format!("Score: {}", self.run.score)
        }
    }
}
