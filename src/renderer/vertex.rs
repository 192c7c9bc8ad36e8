//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements, one set per theme
pub mod palette {
    #[derive(Debug, Clone, Copy)]
    pub struct Palette {
        pub background: [f32; 4],
        pub ground: [f32; 4],
        pub runner: [f32; 4],
        pub obstacle: [f32; 4],
    }

    /// Monochrome-on-light, the classic look
    pub const LIGHT: Palette = Palette {
        background: [0.97, 0.97, 0.97, 1.0],
        ground: [0.32, 0.32, 0.32, 1.0],
        runner: [0.32, 0.32, 0.32, 1.0],
        obstacle: [0.32, 0.32, 0.32, 1.0],
    };

    /// Inverted for dark rooms
    pub const DARK: Palette = Palette {
        background: [0.09, 0.09, 0.11, 1.0],
        ground: [0.82, 0.82, 0.84, 1.0],
        runner: [0.82, 0.82, 0.84, 1.0],
        obstacle: [0.82, 0.82, 0.84, 1.0],
    };

    pub fn select(dark_theme: bool) -> &'static Palette {
        if dark_theme { &DARK } else { &LIGHT }
    }
}
