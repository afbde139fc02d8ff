//! Game state and core simulation types
//!
//! Everything the runner mutates lives in [`GameState`], grouped per entity
//! so each entity's invariants can be checked on its own.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::HitBox;
use crate::tuning::{Tuning, TuningError};

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advances on every tick
    Running,
    /// Player hit the obstacle; ticks are no-ops until restart
    GameOver,
}

/// Things that happened during a tick, drained by the host (audio, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A jump request was accepted
    Jumped,
    /// Player touched the ground after being airborne
    Landed,
    /// Obstacle left the screen and respawned
    ObstacleCleared { score: u32 },
    /// Player hit the obstacle
    Collided { score: u32 },
    /// A new run started from game over
    Restarted,
}

/// Oldest events are dropped once this many are waiting to be drained
pub const MAX_PENDING_EVENTS: usize = 64;

/// Queue an event, keeping at most [`MAX_PENDING_EVENTS`]
pub(crate) fn push_event(events: &mut Vec<GameEvent>, event: GameEvent) {
    if events.len() >= MAX_PENDING_EVENTS {
        events.remove(0);
    }
    events.push(event);
}

/// Outline markers shown while the run is over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub player: bool,
    pub obstacle: bool,
}

/// The runner. Only `pos.y` moves; `pos.x` is fixed for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub pos: IVec2,
    pub size: IVec2,
    /// Vertical velocity in pixels/tick (negative is up)
    pub speed: i32,
    /// Jump countdown; the jump ends once this drops below zero
    pub force: i32,
    pub jumping: bool,
    /// Touched the ground on the last tick
    pub grounded: bool,
    /// Animation frame index, 1-based
    pub sprite_frame: u8,
}

impl Player {
    pub fn hit_box(&self) -> HitBox {
        HitBox::new(self.pos, self.size)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Obstacle {
    pub fn hit_box(&self) -> HitBox {
        HitBox::new(self.pos, self.size)
    }
}

/// Static collision plane
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ground {
    pub pos: IVec2,
    pub size: IVec2,
}

impl Ground {
    pub fn hit_box(&self) -> HitBox {
        HitBox::new(self.pos, self.size)
    }
}

/// One of the two scrolling background tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundTile {
    pub pos: IVec2,
    pub width: i32,
}

/// Per-run counters and difficulty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub phase: GamePhase,
    pub score: u32,
    pub background_speed: i32,
    pub obstacle_speed: i32,
    /// Base x the obstacle respawns at (before jitter)
    pub next_obstacle_gap: i32,
    /// Simulation steps taken this run
    pub ticks: u64,
    pub highlight: Highlight,
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub tuning: Tuning,
    pub player: Player,
    pub obstacle: Obstacle,
    pub ground: Ground,
    pub backgrounds: [BackgroundTile; 2],
    pub run: RunState,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::build(seed, Tuning::default())
    }

    /// Create a new game after validating `tuning`
    pub fn with_tuning(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(seed, tuning))
    }

    fn build(seed: u64, tuning: Tuning) -> Self {
        let player = start_player(&tuning);
        let obstacle = Obstacle {
            pos: tuning.obstacle_start,
            size: tuning.obstacle_size,
        };
        let ground = Ground {
            pos: tuning.ground_pos,
            size: tuning.ground_size,
        };
        let backgrounds = start_backgrounds(&tuning);
        let run = start_run(&tuning);
        log::info!("New run (seed {})", seed);
        Self {
            seed,
            tuning,
            player,
            obstacle,
            ground,
            backgrounds,
            run,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Reset every entity in place to its start values
    pub fn start_game(&mut self) {
        let t = &self.tuning;
        self.player = start_player(t);
        self.obstacle.pos = t.obstacle_start;
        self.obstacle.size = t.obstacle_size;
        self.ground.pos = t.ground_pos;
        self.ground.size = t.ground_size;
        self.backgrounds = start_backgrounds(t);
        self.run = start_run(t);
    }

    /// Request a jump. Ignored while airborne, too high, or game over.
    ///
    /// Returns whether the jump registered.
    pub fn on_jump_pressed(&mut self) -> bool {
        if self.is_game_over() {
            log::trace!("Jump ignored: game over");
            return false;
        }
        if self.player.jumping || self.player.pos.y <= self.tuning.jump_min_y {
            log::trace!("Jump ignored at y={}", self.player.pos.y);
            return false;
        }

        self.player.jumping = true;
        self.player.force = self.tuning.jump_force;
        self.player.speed = self.tuning.jump_speed;
        self.player.sprite_frame = self.tuning.sprite_jump_frame;
        push_event(&mut self.events, GameEvent::Jumped);
        true
    }

    /// Start a new run. Only has an effect once the current run is over.
    ///
    /// The difficulty ramp is reset along with everything else; the RNG
    /// stream continues.
    pub fn on_restart_pressed(&mut self) -> bool {
        if !self.is_game_over() {
            log::trace!("Restart ignored: run in progress");
            return false;
        }
        log::info!("Restarting after score {}", self.run.score);
        self.start_game();
        push_event(&mut self.events, GameEvent::Restarted);
        true
    }

    /// Advance one fixed step with no new input
    ///
    /// Events raised by the step queue up until [`Self::drain_events`];
    /// hosts that never drain keep only the latest [`MAX_PENDING_EVENTS`].
    pub fn tick(&mut self) {
        super::tick::step(self);
    }

    pub fn is_game_over(&self) -> bool {
        self.run.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> u32 {
        self.run.score
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

fn start_player(t: &Tuning) -> Player {
    Player {
        pos: t.player_start,
        size: t.player_size,
        speed: t.base_fall_speed,
        force: t.base_force,
        jumping: false,
        grounded: false,
        sprite_frame: 1,
    }
}

fn start_backgrounds(t: &Tuning) -> [BackgroundTile; 2] {
    [
        BackgroundTile {
            pos: IVec2::new(0, t.background_y),
            width: t.background_width,
        },
        BackgroundTile {
            pos: IVec2::new(t.background_width, t.background_y),
            width: t.background_width,
        },
    ]
}

fn start_run(t: &Tuning) -> RunState {
    RunState {
        phase: GamePhase::Running,
        score: 0,
        background_speed: t.base_background_speed,
        obstacle_speed: t.base_obstacle_speed,
        next_obstacle_gap: t.next_obstacle_gap,
        ticks: 0,
        highlight: Highlight::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    /// Put the player on the ground as if it had landed
    fn grounded(state: &mut GameState) {
        state.player.pos.y = GROUND_Y - PLAYER_HEIGHT;
        state.player.grounded = true;
    }

    #[test]
    fn test_start_values() {
        let state = GameState::new(1);
        assert_eq!(state.run.phase, GamePhase::Running);
        assert_eq!(state.score(), 0);
        assert_eq!(state.player.pos, IVec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(state.player.speed, BASE_FALL_SPEED);
        assert_eq!(state.player.force, BASE_FORCE);
        assert_eq!(state.player.sprite_frame, 1);
        assert!(!state.player.jumping);
        assert_eq!(state.obstacle.pos, IVec2::new(OBSTACLE_START_X, OBSTACLE_START_Y));
        assert_eq!(state.backgrounds[0].pos.x, 0);
        assert_eq!(state.backgrounds[1].pos.x, BACKGROUND_WIDTH);
        assert_eq!(state.run.background_speed, BASE_BACKGROUND_SPEED);
        assert_eq!(state.run.obstacle_speed, BASE_OBSTACLE_SPEED);
        assert_eq!(state.run.next_obstacle_gap, NEXT_OBSTACLE_GAP);
    }

    #[test]
    fn test_jump_from_ground() {
        let mut state = GameState::new(1);
        grounded(&mut state);

        assert!(state.on_jump_pressed());
        assert!(state.player.jumping);
        assert_eq!(state.player.force, JUMP_FORCE);
        assert_eq!(state.player.speed, JUMP_SPEED);
        assert_eq!(state.player.sprite_frame, SPRITE_JUMP_FRAME);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
    }

    #[test]
    fn test_jump_while_jumping_is_noop() {
        let mut state = GameState::new(1);
        grounded(&mut state);
        assert!(state.on_jump_pressed());
        state.player.force = 3;
        state.player.speed = -9;
        let before = state.player.clone();

        assert!(!state.on_jump_pressed());
        assert_eq!(state.player, before);
    }

    #[test]
    fn test_jump_too_high_is_noop() {
        let mut state = GameState::new(1);
        // Start position is mid-air
        assert!(!state.on_jump_pressed());
        assert!(!state.player.jumping);

        state.player.pos.y = JUMP_MIN_Y;
        assert!(!state.on_jump_pressed());
        state.player.pos.y = JUMP_MIN_Y + 1;
        assert!(state.on_jump_pressed());
    }

    #[test]
    fn test_restart_only_when_over() {
        let mut state = GameState::new(1);
        state.run.score = 4;
        assert!(!state.on_restart_pressed());
        assert_eq!(state.score(), 4);

        state.run.phase = GamePhase::GameOver;
        assert!(state.on_restart_pressed());
        assert_eq!(state.score(), 0);
        assert_eq!(state.run.phase, GamePhase::Running);
        assert_eq!(state.drain_events(), vec![GameEvent::Restarted]);
    }

    #[test]
    fn test_restart_resets_ramp() {
        let mut state = GameState::new(1);
        state.run.background_speed = 9;
        state.run.obstacle_speed = 18;
        state.run.phase = GamePhase::GameOver;
        state.on_restart_pressed();
        assert_eq!(state.run.background_speed, BASE_BACKGROUND_SPEED);
        assert_eq!(state.run.obstacle_speed, BASE_OBSTACLE_SPEED);
    }

    #[test]
    fn test_with_tuning_validates() {
        let mut tuning = Tuning::default();
        tuning.respawn_jitter_max = tuning.respawn_jitter_min;
        assert!(GameState::with_tuning(1, tuning).is_err());

        let mut tuning = Tuning::default();
        tuning.player_start = IVec2::new(40, 200);
        let state = GameState::with_tuning(1, tuning).unwrap();
        assert_eq!(state.player.pos, IVec2::new(40, 200));
    }
}
