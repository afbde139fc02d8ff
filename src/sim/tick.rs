//! Fixed timestep simulation tick
//!
//! Core game loop that advances the run by one step. Every call is exactly
//! one step; the host clock decides how often that happens.

use rand::Rng;

use super::input::TickInput;
use super::state::{GameEvent, GamePhase, GameState, Highlight, push_event};

/// Apply this tick's input, then advance the game state by one step
///
/// Restart is applied before jump so that both pressed together start a
/// fresh run without jumping in it.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.on_restart_pressed();
    }

    let jump = input.jump || (input.autopilot && autopilot_wants_jump(state));
    if jump {
        state.on_jump_pressed();
    }

    step(state);
}

/// Jump when the obstacle is about `autopilot_lead_ticks` of travel away
fn autopilot_wants_jump(state: &GameState) -> bool {
    let speed = state.run.obstacle_speed.max(1);
    let gap = state.obstacle.hit_box().left() - state.player.hit_box().right();
    let lead = speed * state.tuning.autopilot_lead_ticks + speed / 2;
    (0..=lead).contains(&gap)
}

/// Next running frame, wrapping back to 1 past the last frame
fn next_sprite_frame(frame: u8, step: u8, count: u8) -> u8 {
    let next = frame.saturating_add(step);
    if next > count { 1 } else { next }
}

/// One simulation step. No-op once the run is over.
pub(crate) fn step(state: &mut GameState) {
    if state.run.phase == GamePhase::GameOver {
        return;
    }

    let tuning = &state.tuning;
    let player = &mut state.player;
    let run = &mut state.run;
    run.ticks += 1;

    // Integrate and scroll
    player.pos.y += player.speed;
    for tile in &mut state.backgrounds {
        tile.pos.x -= run.background_speed;
    }
    state.obstacle.pos.x -= run.obstacle_speed;

    // Hit boxes are rebuilt every step from position + size
    let player_box = player.hit_box();
    let ground_box = state.ground.hit_box();
    let obstacle_box = state.obstacle.hit_box();

    // --- GROUND ---
    if player_box.intersects(&ground_box) {
        player.pos.y = ground_box.top() - player.size.y;
        player.speed = 0;
        player.jumping = false;
        player.sprite_frame = next_sprite_frame(
            player.sprite_frame,
            tuning.sprite_step,
            tuning.sprite_frame_count,
        );
        if !player.grounded {
            push_event(&mut state.events, GameEvent::Landed);
        }
        player.grounded = true;
    } else {
        player.grounded = false;
    }

    // --- OBSTACLE ---
    // The rest of this step still runs; later steps are frozen.
    if player_box.intersects(&obstacle_box) {
        run.phase = GamePhase::GameOver;
        log::info!("Game over: score {} after {} ticks", run.score, run.ticks);
        push_event(&mut state.events, GameEvent::Collided { score: run.score });
    }

    // --- JUMP KINEMATICS ---
    if player.jumping {
        player.speed = tuning.airborne_speed;
        player.force -= 1;
    } else {
        player.speed = tuning.run_speed;
    }
    if player.force < 0 {
        player.jumping = false;
    }

    // --- PARALLAX WRAP ---
    for i in 0..state.backgrounds.len() {
        let other = state.backgrounds[1 - i];
        let tile = &mut state.backgrounds[i];
        if tile.pos.x < -tile.width {
            tile.pos.x = other.pos.x + other.width;
        }
    }

    // --- OBSTACLE RESPAWN & DIFFICULTY ---
    if state.obstacle.pos.x < tuning.obstacle_respawn_threshold {
        let jitter = state
            .rng
            .random_range(tuning.respawn_jitter_min..tuning.respawn_jitter_max);
        state.obstacle.pos.x = run.next_obstacle_gap + jitter;
        state.obstacle.pos.y = state
            .rng
            .random_range(tuning.obstacle_min_y..tuning.obstacle_max_y);

        run.score += 1;
        run.background_speed += tuning.speed_ramp_step;
        run.obstacle_speed += tuning.speed_ramp_step;
        log::debug!(
            "Obstacle respawned at ({}, {}); score {}, speeds {}/{}",
            state.obstacle.pos.x,
            state.obstacle.pos.y,
            run.score,
            run.background_speed,
            run.obstacle_speed
        );
        push_event(&mut state.events, GameEvent::ObstacleCleared { score: run.score });
    }

    // --- HIGHLIGHT ---
    let over = run.phase == GamePhase::GameOver;
    run.highlight = Highlight {
        player: over,
        obstacle: over,
    };
}
