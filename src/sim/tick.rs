//! Fixed timestep simulation tick
//!
//! One call advances the world by exactly one 60 Hz step. Motion is
//! expressed in per-tick units, so `tick` takes no dt; the driver owns
//! wall-clock pacing and calls this at a fixed rate.

use super::collision::first_hit;
use super::state::{GamePhase, GameState};

/// Input commands for a single tick (deterministic)
///
/// Both flags are edge-triggered one-shots: the driver sets them on the
/// press edge and clears them once a tick has consumed them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump request (space/up-arrow/tap)
    pub jump: bool,
    /// Restart request (enter/R/restart button)
    pub reset: bool,
}

/// Advance the game state by one fixed timestep
///
/// Tick order: input, runner physics, spawn gate, scroll and prune,
/// collision. In GameOver the world is frozen and only the reset flag is
/// honored; mid-run the reset flag is ignored, restart is a game-over
/// affordance.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        if input.reset {
            state.reset();
        }
        return;
    }

    state.time_ticks += 1;

    if input.jump {
        state.runner.jump();
    }
    state.runner.update();

    state.field.run_gate(&mut state.rng, state.score);
    state.score += state.field.advance(state.score);

    if first_hit(&state.runner.rect(), &state.field.obstacles).is_some() {
        state.phase = GamePhase::GameOver;
    }
}
