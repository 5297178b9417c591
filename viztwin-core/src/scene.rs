//! Frame building for the dashboard viewer.
//!
//! A [`Frame`] is a backend-neutral list of draw commands in canvas pixel
//! space. Hosts hand it to a [`Surface`] which paints the commands in order,
//! so command order is the painter's order.

use nalgebra::Point2;

use crate::color::{palette, Color};
use crate::config::{Theme, ViewerConfig};
use crate::geometry::BuildingModel;
use crate::layers::{HighlightSet, Layer, LayerTree};
use crate::projection::{project_all, ProjectedPoint, Viewport, MODEL_SIZE};
use crate::transform::RotationState;

const FACE_ALPHA: f64 = 0.3;
const FACE_HIGHLIGHT_ALPHA: f64 = 0.6;
const EDGE_WIDTH: f64 = 2.0;
const EDGE_HIGHLIGHT_WIDTH: f64 = 3.0;
const COLUMN_WIDTH: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub color: Color,
    pub alpha: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Closed polygon through the points
    Polygon(Vec<Point2<f64>>),
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl Shape {
    /// Corner points, for backends that only rasterize polygons
    pub fn outline(&self) -> Vec<Point2<f64>> {
        match self {
            Shape::Polygon(points) => points.clone(),
            Shape::Rect { x, y, width, height } => vec![
                Point2::new(*x, *y),
                Point2::new(x + width, *y),
                Point2::new(x + width, y + height),
                Point2::new(*x, y + height),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub shape: Shape,
    pub fill: Option<Paint>,
    pub stroke: Option<Stroke>,
    pub layer: Layer,
    pub highlighted: bool,
}

/// Background grid drawn before any model geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub spacing: f64,
    pub color: Color,
    pub alpha: f64,
    pub width: f64,
}

impl Grid {
    /// X positions of the vertical lines
    pub fn columns(&self, viewport: &Viewport) -> Vec<f64> {
        steps(self.spacing, viewport.width)
    }

    /// Y positions of the horizontal lines
    pub fn rows(&self, viewport: &Viewport) -> Vec<f64> {
        steps(self.spacing, viewport.height)
    }
}

fn steps(spacing: f64, limit: f64) -> Vec<f64> {
    let mut out = Vec::new();
    let mut at = 0.0;
    while at < limit {
        out.push(at);
        at += spacing;
    }
    out
}

/// Everything needed to paint one viewer frame
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub viewport: Viewport,
    /// Diagonal gradient from top-left to bottom-right
    pub background: (Color, Color),
    pub grid: Grid,
    pub commands: Vec<DrawCommand>,
}

/// A drawing backend for viewer frames
pub trait Surface {
    type Error;

    fn present(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

/// A visible face with its mean projected depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortedFace {
    pub face: usize,
    pub depth: f64,
}

/// Visible faces ordered by ascending mean depth. The sort is stable, so
/// faces at equal depth keep model order.
pub fn depth_sorted_faces(
    model: &BuildingModel,
    projected: &[ProjectedPoint],
    layers: &LayerTree,
) -> Vec<SortedFace> {
    let mut sorted: Vec<SortedFace> = model
        .faces
        .iter()
        .enumerate()
        .filter(|(_, face)| layers.is_visible(face.layer))
        .map(|(index, face)| {
            let total: f64 = face.indices.iter().map(|&i| projected[i].z).sum();
            SortedFace {
                face: index,
                depth: total / face.indices.len() as f64,
            }
        })
        .collect();

    sorted.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    sorted
}

/// Inputs to one frame
pub struct SceneState<'a> {
    pub model: &'a BuildingModel,
    pub rotation: &'a RotationState,
    pub layers: &'a LayerTree,
    pub highlights: &'a HighlightSet,
}

/// Build the frame for the current viewer state
pub fn build_frame(state: &SceneState<'_>, config: &ViewerConfig) -> Frame {
    let viewport = Viewport::new(config.canvas_width as f64, config.canvas_height as f64);
    let projected = project_all(&state.model.vertices, state.rotation, &viewport);
    let mut commands = Vec::new();

    for sorted in depth_sorted_faces(state.model, &projected, state.layers) {
        let face = &state.model.faces[sorted.face];
        let highlighted = state.highlights.is_highlighted(face.layer);
        let points = face.indices.iter().map(|&i| projected[i].screen()).collect();

        commands.push(DrawCommand {
            shape: Shape::Polygon(points),
            fill: Some(Paint {
                color: if highlighted { face.highlight_color } else { face.color },
                alpha: if highlighted { FACE_HIGHLIGHT_ALPHA } else { FACE_ALPHA },
            }),
            stroke: Some(Stroke {
                color: if highlighted { face.highlight_color } else { palette::SAND },
                width: if highlighted { EDGE_HIGHLIGHT_WIDTH } else { EDGE_WIDTH },
            }),
            layer: face.layer,
            highlighted,
        });
    }

    // Door and columns sit in screen space and ignore rotation
    if state.layers.is_visible(Layer::Doors) {
        commands.push(door_command(&viewport, state.highlights.is_highlighted(Layer::Doors)));
    }
    if state.layers.is_visible(Layer::Columns) {
        commands.extend(column_commands(&viewport, state.highlights.is_highlighted(Layer::Columns)));
    }

    Frame {
        viewport,
        background: background(&config.theme),
        grid: Grid {
            spacing: config.grid_spacing as f64,
            color: config.theme.grid,
            alpha: 0.3,
            width: 0.5,
        },
        commands,
    }
}

fn background(theme: &Theme) -> (Color, Color) {
    (theme.background_start, theme.background_end)
}

fn door_command(viewport: &Viewport, highlighted: bool) -> DrawCommand {
    let center = viewport.center();
    DrawCommand {
        shape: Shape::Rect {
            x: center.x - MODEL_SIZE * 0.3,
            y: center.y + MODEL_SIZE * 0.5,
            width: MODEL_SIZE * 0.6,
            height: MODEL_SIZE * 0.8,
        },
        fill: Some(Paint {
            color: if highlighted { palette::BLUSH_HIGHLIGHT } else { palette::BLUSH },
            alpha: if highlighted { 0.8 } else { 1.0 },
        }),
        stroke: Some(Stroke {
            color: if highlighted { palette::AMBER } else { palette::BRAND_BLUE },
            width: if highlighted { EDGE_HIGHLIGHT_WIDTH } else { EDGE_WIDTH },
        }),
        layer: Layer::Doors,
        highlighted,
    }
}

fn column_commands(viewport: &Viewport, highlighted: bool) -> Vec<DrawCommand> {
    let center = viewport.center();
    let paint = Paint {
        color: if highlighted { palette::CYAN } else { palette::SKY },
        alpha: if highlighted { 0.8 } else { 0.6 },
    };
    let corners = [
        (center.x - MODEL_SIZE * 0.8, center.y + MODEL_SIZE * 0.5),
        (center.x + MODEL_SIZE * 0.5, center.y + MODEL_SIZE * 0.5),
        (center.x - MODEL_SIZE * 0.8, center.y - MODEL_SIZE * 0.3),
        (center.x + MODEL_SIZE * 0.5, center.y - MODEL_SIZE * 0.3),
    ];

    corners
        .into_iter()
        .map(|(x, y)| DrawCommand {
            shape: Shape::Rect {
                x,
                y,
                width: COLUMN_WIDTH,
                height: MODEL_SIZE * 1.2,
            },
            fill: Some(paint),
            stroke: None,
            layer: Layer::Columns,
            highlighted,
        })
        .collect()
}
