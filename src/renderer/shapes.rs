//! Shape generation for 2D primitives
//!
//! Everything is tessellated on the CPU in field coordinates; the pipeline
//! maps to NDC at upload time.

use super::vertex::{Vertex, palette::Palette};
use crate::consts::*;
use crate::sim::{GamePhase, GameState, Rect};

/// Two triangles covering an axis-aligned rectangle
pub fn quad(rect: &Rect, color: [f32; 4]) -> [Vertex; 6] {
    let (l, r) = (rect.left(), rect.right());
    let (t, b) = (rect.top(), rect.bottom());
    [
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Build the whole frame's triangle list
///
/// `render_time_secs` drives the run-cycle animation. It comes from the
/// frame clock, not the simulation clock, so the legs keep a steady pace
/// no matter how many ticks a frame consumed.
pub fn scene(state: &GameState, palette: &Palette, render_time_secs: f32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(64 + state.field.obstacles.len() * 6);

    // Ground band along the bottom of the field
    vertices.extend(quad(
        &Rect::new(0.0, GROUND_Y, FIELD_WIDTH, GROUND_HEIGHT),
        palette.ground,
    ));

    for obstacle in &state.field.obstacles {
        vertices.extend(quad(&obstacle.rect(), palette.obstacle));
    }

    vertices.extend(runner_sprite(state, palette, render_time_secs));

    vertices
}

/// Runner body plus a two-frame leg cycle
///
/// Running alternates single legs; airborne and game-over show the full
/// stance so the sprite reads as frozen.
fn runner_sprite(state: &GameState, palette: &Palette, render_time_secs: f32) -> Vec<Vertex> {
    let runner = state.runner.rect();
    let (x, y) = (runner.left(), runner.top());

    let mut vertices = Vec::with_capacity(30);

    // Body covers the top three quarters of the box
    vertices.extend(quad(
        &Rect::new(x, y, RUNNER_WIDTH, RUNNER_HEIGHT - 10.0),
        palette.runner,
    ));

    let left_leg = Rect::new(x + 6.0, y + RUNNER_HEIGHT - 10.0, 8.0, 10.0);
    let right_leg = Rect::new(x + 26.0, y + RUNNER_HEIGHT - 10.0, 8.0, 10.0);

    let running = state.phase == GamePhase::Playing && !state.runner.airborne();
    if running {
        // ~5 strides per second
        if (render_time_secs * 10.0) as i64 % 2 == 0 {
            vertices.extend(quad(&left_leg, palette.runner));
        } else {
            vertices.extend(quad(&right_leg, palette.runner));
        }
    } else {
        vertices.extend(quad(&left_leg, palette.runner));
        vertices.extend(quad(&right_leg, palette.runner));
    }

    // Eye notch near the top right of the head
    vertices.extend(quad(
        &Rect::new(x + RUNNER_WIDTH - 12.0, y + 6.0, 5.0, 5.0),
        palette.background,
    ));

    vertices
}
