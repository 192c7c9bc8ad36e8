//! Game state and core simulation types
//!
//! Everything needed to replay a session from its seed lives here.

use rand_pcg::Pcg32;

use super::field::ObstacleField;
use super::rect::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended; terminal until an explicit reset
    GameOver,
}

/// The runner's jump state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpState {
    Grounded,
    Airborne,
}

/// The player entity: fixed x, integrated y, at most one jump in flight
#[derive(Debug, Clone)]
pub struct Runner {
    /// Top of the runner's rectangle (y grows downward)
    pub y: f32,
    /// Vertical velocity in units/tick; zero while grounded
    pub vy: f32,
    pub state: JumpState,
}

impl Runner {
    /// Y the runner's top rests at while grounded
    pub const GROUND_TOP: f32 = GROUND_Y - RUNNER_HEIGHT;

    pub fn new() -> Self {
        Self {
            y: Self::GROUND_TOP,
            vy: 0.0,
            state: JumpState::Grounded,
        }
    }

    /// Take off. No-op while airborne: one jump at a time, no buffering.
    pub fn jump(&mut self) {
        if self.state == JumpState::Grounded {
            self.vy = JUMP_VELOCITY;
            self.state = JumpState::Airborne;
        }
    }

    /// Per-tick physics: position first, then gravity (semi-implicit
    /// Euler), then the ground clamp ends the jump.
    pub fn update(&mut self) {
        if self.state == JumpState::Airborne {
            self.y += self.vy;
            self.vy += GRAVITY;
            if self.y >= Self::GROUND_TOP {
                self.y = Self::GROUND_TOP;
                self.vy = 0.0;
                self.state = JumpState::Grounded;
            }
        }
    }

    #[inline]
    pub fn airborne(&self) -> bool {
        self.state == JumpState::Airborne
    }

    /// Collision/render rectangle
    pub fn rect(&self) -> Rect {
        Rect::new(RUNNER_X, self.y, RUNNER_WIDTH, RUNNER_HEIGHT)
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new()
    }
}

/// A scrolling obstacle
///
/// Speed is deliberately not stored: every active obstacle moves at the
/// shared score-derived speed, recomputed each tick by the field.
#[derive(Debug, Clone)]
pub struct Obstacle {
    /// Left edge; strictly decreasing while active
    pub x: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn new(x: f32, height: f32) -> Self {
        Self { x, height }
    }

    /// Collision/render rectangle; the bottom sits on the ground line
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, GROUND_Y - self.height, OBSTACLE_WIDTH, self.height)
    }
}

/// RNG bookkeeping: one PCG-32 stream per round, all from the session seed
#[derive(Debug, Clone)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete game state, a pure function of the session seed and the input
/// sequence
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed/stream pair the current round's `rng` was constructed from
    pub rng_state: RngState,
    /// Live generator for spawn-gap and height draws
    pub rng: Pcg32,
    /// Obstacles cleared this round; frozen once the round ends
    pub score: u32,
    /// Tick counter for the current round
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub runner: Runner,
    pub field: ObstacleField,
}

impl GameState {
    /// Fresh session from a seed: round 0, grounded runner, empty field
    pub fn new(seed: u64) -> Self {
        let rng_state = RngState::new(seed);
        let rng = rng_state.to_rng();
        Self {
            rng_state,
            rng,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            runner: Runner::new(),
            field: ObstacleField::new(),
        }
    }

    /// Session seed (for logging/reproduction)
    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    /// Round index within the session (0-based)
    pub fn round(&self) -> u32 {
        self.rng_state.stream as u32
    }

    /// Start the next round. Everything is rebuilt; only the session seed
    /// carries over. The new round draws from its own RNG stream, so a
    /// session replays identically from its seed while rounds differ.
    pub fn reset(&mut self) {
        self.rng_state.stream += 1;
        self.rng = self.rng_state.to_rng();
        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Playing;
        self.runner = Runner::new();
        self.field = ObstacleField::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runner_starts_grounded() {
        let runner = Runner::new();
        assert_eq!(runner.state, JumpState::Grounded);
        assert_eq!(runner.y, Runner::GROUND_TOP);
        assert_eq!(runner.vy, 0.0);
    }

    #[test]
    fn test_jump_sets_impulse() {
        let mut runner = Runner::new();
        runner.jump();
        assert_eq!(runner.state, JumpState::Airborne);
        assert_eq!(runner.vy, JUMP_VELOCITY);
        // Position changes on the next update, not at takeoff
        assert_eq!(runner.y, Runner::GROUND_TOP);
    }

    #[test]
    fn test_jump_while_airborne_is_noop() {
        let mut runner = Runner::new();
        runner.jump();
        runner.update();
        let (y, vy) = (runner.y, runner.vy);
        runner.jump();
        assert_eq!(runner.y, y);
        assert_eq!(runner.vy, vy);
        assert_eq!(runner.state, JumpState::Airborne);
    }

    #[test]
    fn test_jump_lands_after_39_ticks() {
        // With vy0 = -15 and g = 0.8 the displacement after k ticks is
        // -15k + 0.4k(k-1); the first k where it is >= 0 is 39.
        let mut runner = Runner::new();
        runner.jump();
        for tick in 1..=38 {
            runner.update();
            assert_eq!(
                runner.state,
                JumpState::Airborne,
                "landed early at tick {tick}"
            );
            assert!(runner.y < Runner::GROUND_TOP);
        }
        runner.update();
        assert_eq!(runner.state, JumpState::Grounded);
        assert_eq!(runner.y, Runner::GROUND_TOP);
        assert_eq!(runner.vy, 0.0);
    }

    #[test]
    fn test_runner_never_below_ground() {
        let mut runner = Runner::new();
        runner.jump();
        for _ in 0..200 {
            runner.update();
            assert!(runner.y <= Runner::GROUND_TOP);
        }
    }

    #[test]
    fn test_obstacle_rect_sits_on_ground() {
        let obstacle = Obstacle::new(500.0, 42.0);
        let rect = obstacle.rect();
        assert_eq!(rect.bottom(), GROUND_Y);
        assert_eq!(rect.size.x, OBSTACLE_WIDTH);
        assert_eq!(rect.size.y, 42.0);
    }

    #[test]
    fn test_reset_rebuilds_round() {
        let mut state = GameState::new(7);
        state.score = 12;
        state.time_ticks = 400;
        state.phase = GamePhase::GameOver;
        state.runner.jump();
        state.reset();
        assert_eq!(state.score, 0);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.runner.state, JumpState::Grounded);
        assert!(state.field.obstacles.is_empty());
        assert_eq!(state.round(), 1);
        assert_eq!(state.seed(), 7);
    }

    #[test]
    fn test_rounds_share_seed_but_not_stream() {
        let state = GameState::new(99);
        let mut next = state.clone();
        next.reset();
        assert_eq!(state.seed(), next.seed());
        assert_eq!(state.round(), 0);
        assert_eq!(next.round(), 1);
    }
}
