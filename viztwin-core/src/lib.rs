/// VizTwin Core Library - Viewer, routing and library logic
///
/// This library holds everything the VizTwin front ends share: the fixed
/// building model and its projection, the layer tree, frame building,
/// click resolution, the upload simulation, the project library and page
/// routing. Hosts only translate input events and paint frames.

pub mod app;
pub mod color;
pub mod config;
pub mod content;
pub mod error;
pub mod geometry;
pub mod layers;
pub mod library;
pub mod picking;
pub mod projection;
pub mod route;
pub mod scene;
pub mod transform;
pub mod upload;
pub mod viewer;

// Re-export commonly used types
pub use app::App;
pub use color::Color;
pub use config::ViewerConfig;
pub use error::{Result, VizTwinError};
pub use geometry::{BuildingModel, Face};
pub use layers::{GroupId, HighlightSet, Layer, LayerNode, LayerTree, NodeId};
pub use library::{Project, ProjectLibrary};
pub use picking::{ClickRegion, ElementProperties};
pub use projection::{project, ProjectedPoint, Viewport};
pub use route::{History, MemoryHistory, Page, Router};
pub use scene::{DrawCommand, Frame, Shape, Surface};
pub use transform::{RotationState, Transform};
pub use upload::{Tick, UploadSimulation};
pub use viewer::{PointerEvent, Update, Viewer};
