use glam::{DVec2, IVec2};

use crate::core::Color;

pub mod buffer;
pub mod pipeline;
pub mod rasterizer;

pub use buffer::{FrameBuffer, Surface, TermBuffer};
pub use pipeline::{average_z, draw_frame, project_faces, render_frame, sort_back_to_front, to_pixel};

/// A face after rotation and projection, before pixel mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedFace {
    pub points: Vec<DVec2>,
    /// Mean rotated z of the face's vertices; larger is farther away.
    pub depth: f64,
    pub color: Color,
}

/// One filled polygon in pixel coordinates, ready for a [`Surface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenPolygon {
    pub points: Vec<IVec2>,
    pub color: Color,
}

/// Polygons of one frame in draw order (farthest first).
pub type Frame = Vec<ScreenPolygon>;

/// Fixed viewing parameters shared by every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub fov: f64,
    pub viewer_distance: f64,
    pub width: usize,
    pub height: usize,
}

impl Default for View {
    fn default() -> Self {
        Self {
            fov: 30.0,
            viewer_distance: 10.0,
            width: 600,
            height: 600,
        }
    }
}
