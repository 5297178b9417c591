/// Fixed building-model geometry: a unit cube with layer-tagged faces
use nalgebra::Point3;

use crate::color::{palette, Color};
use crate::layers::Layer;

/// A quad face of the model, with the layer it belongs to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    pub indices: [usize; 4],
    pub color: Color,
    pub highlight_color: Color,
    pub layer: Layer,
}

impl Face {
    pub const fn new(indices: [usize; 4], color: Color, highlight_color: Color, layer: Layer) -> Self {
        Self {
            indices,
            color,
            highlight_color,
            layer,
        }
    }
}

const CUBE_VERTICES: [[f64; 3]; 8] = [
    [-1.0, -1.0, -1.0], // 0
    [1.0, -1.0, -1.0],  // 1
    [1.0, 1.0, -1.0],   // 2
    [-1.0, 1.0, -1.0],  // 3
    [-1.0, -1.0, 1.0],  // 4
    [1.0, -1.0, 1.0],   // 5
    [1.0, 1.0, 1.0],    // 6
    [-1.0, 1.0, 1.0],   // 7
];

const CUBE_FACES: [Face; 6] = [
    Face::new([0, 1, 2, 3], palette::SKY, palette::SKY_HIGHLIGHT, Layer::Floors),
    Face::new([4, 5, 6, 7], palette::BLUSH, palette::BLUSH_HIGHLIGHT, Layer::Ceilings),
    Face::new([0, 1, 5, 4], palette::SAND, palette::WHITE, Layer::Walls),
    Face::new([2, 3, 7, 6], palette::SAND, palette::WHITE, Layer::Walls),
    Face::new([1, 2, 6, 5], palette::SAND, palette::WHITE, Layer::Walls),
    Face::new([3, 0, 4, 7], palette::SAND, palette::WHITE, Layer::Walls),
];

/// The building model shown in the dashboard viewer
#[derive(Debug, Clone)]
pub struct BuildingModel {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Face>,
}

impl BuildingModel {
    /// The eight-vertex, six-face cube standing in for a scanned building
    pub fn cube() -> Self {
        Self {
            vertices: CUBE_VERTICES
                .iter()
                .map(|&[x, y, z]| Point3::new(x, y, z))
                .collect(),
            faces: CUBE_FACES.to_vec(),
        }
    }
}

impl Default for BuildingModel {
    fn default() -> Self {
        Self::cube()
    }
}
