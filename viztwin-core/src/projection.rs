/// Perspective projection of the rotated model onto the canvas
use nalgebra::{Point2, Point3};

use crate::transform::{RotationState, Transform};

/// Half-extent of the model on screen, in pixels, before perspective
pub const MODEL_SIZE: f64 = 100.0;
/// Viewer distance used by the perspective divide
pub const PERSPECTIVE_DISTANCE: f64 = 200.0;
/// Depth units per model unit in the perspective divide
pub const DEPTH_SCALE: f64 = 50.0;

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1000.0, 700.0)
    }
}

/// A vertex in screen space. `z` is the post-rotation depth in model units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ProjectedPoint {
    pub fn screen(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// Rotate a model vertex and project it onto the canvas.
///
/// The perspective factor is `200 / (200 + z * 50)`; for vertices within the
/// unit cube `|z| <= sqrt(3)` so the denominator stays well above zero.
pub fn project(vertex: &Point3<f64>, rotation: &RotationState, viewport: &Viewport) -> ProjectedPoint {
    let rotated = Transform::rotate(vertex, rotation);
    let scale = PERSPECTIVE_DISTANCE / (PERSPECTIVE_DISTANCE + rotated.z * DEPTH_SCALE);
    let center = viewport.center();

    ProjectedPoint {
        x: center.x + rotated.x * MODEL_SIZE * scale,
        y: center.y + rotated.y * MODEL_SIZE * scale,
        z: rotated.z,
    }
}

/// Project every vertex of a model
pub fn project_all(
    vertices: &[Point3<f64>],
    rotation: &RotationState,
    viewport: &Viewport,
) -> Vec<ProjectedPoint> {
    vertices
        .iter()
        .map(|vertex| project(vertex, rotation, viewport))
        .collect()
}
