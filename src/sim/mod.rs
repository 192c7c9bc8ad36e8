//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable obstacle order (append-only spawns, retain-based pruning)
//! - No rendering or platform dependencies

pub mod collision;
pub mod field;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::first_hit;
pub use field::{ObstacleField, gap_bounds, scroll_speed};
pub use rect::Rect;
pub use state::{GamePhase, GameState, JumpState, Obstacle, RngState, Runner};
pub use tick::{TickInput, tick};
