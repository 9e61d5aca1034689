use std::cmp::Ordering;

use glam::{DVec2, DVec3, IVec2};
use log::trace;
use rayon::prelude::*;

use super::{buffer::Surface, Frame, ProjectedFace, ScreenPolygon, View};
use crate::core::geometry::Scene;
use crate::core::transform::{project, RotationState};

/// Mean z of the given (already rotated) vertices.
pub fn average_z(vertices: &[DVec3]) -> f64 {
    vertices.iter().map(|v| v.z).sum::<f64>() / vertices.len() as f64
}

/// Rotates and projects every face, returning them farthest first.
///
/// Indices are trusted: a [`Scene`] only exists once its faces were checked
/// against the vertex list.
pub fn project_faces(scene: &Scene, rotation: &RotationState, view: &View) -> Vec<ProjectedFace> {
    let mut faces: Vec<ProjectedFace> = scene
        .faces
        .par_iter()
        .map(|face| {
            let rotated: Vec<DVec3> = face
                .indices
                .iter()
                .map(|&i| rotation.apply(scene.vertices[i]))
                .collect();
            let points = rotated
                .iter()
                .map(|&v| project(v, view.fov, view.viewer_distance).0)
                .collect();
            ProjectedFace {
                points,
                depth: average_z(&rotated),
                color: face.color,
            }
        })
        .collect();

    sort_back_to_front(&mut faces);
    faces
}

/// Painter's order: descending depth. The sort is stable, so faces at equal
/// depth keep their load order from frame to frame. `-0.0` and `0.0` count
/// as equal.
pub fn sort_back_to_front(faces: &mut [ProjectedFace]) {
    faces.sort_by(|a, b| b.depth.partial_cmp(&a.depth).unwrap_or(Ordering::Equal));
}

/// Maps a projected point to a pixel. The y axis is flipped and both
/// coordinates are truncated toward zero, not rounded.
pub fn to_pixel(p: DVec2, width: usize, height: usize) -> IVec2 {
    let (w, h) = (width as f64, height as f64);
    IVec2::new(
        (w / 2.0 + p.x * w / 2.0) as i32,
        (h / 2.0 - p.y * h / 2.0) as i32,
    )
}

/// Full per-frame pipeline: rotate, project, sort, map to pixels.
pub fn render_frame(scene: &Scene, rotation: &RotationState, view: &View) -> Frame {
    let frame: Frame = project_faces(scene, rotation, view)
        .into_iter()
        .map(|face| ScreenPolygon {
            points: face
                .points
                .iter()
                .map(|&p| to_pixel(p, view.width, view.height))
                .collect(),
            color: face.color,
        })
        .collect();

    trace!("Rendered {} polygons at {:?}", frame.len(), rotation);
    frame
}

/// Clears `surface` and fills every polygon of `frame` in order.
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, frame: &[ScreenPolygon]) {
    surface.clear();
    for polygon in frame {
        surface.fill_polygon(&polygon.points, polygon.color);
    }
}
