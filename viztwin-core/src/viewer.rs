/// Dashboard viewer: drag rotation, layer and highlight toggles, selection
use nalgebra::Point2;

use crate::config::ViewerConfig;
use crate::geometry::BuildingModel;
use crate::layers::{GroupId, HighlightSet, Layer, LayerTree, NodeId};
use crate::picking::{resolve_click, ElementProperties};
use crate::projection::Viewport;
use crate::scene::{build_frame, Frame, SceneState, Surface};
use crate::transform::RotationState;

/// Pointer input on the viewer canvas. Down and Move positions only need
/// to be in a consistent space; Click positions are canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up,
    Leave,
    Click { x: f64, y: f64 },
}

/// What the host must refresh after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Update {
    Unchanged,
    /// Rotation, visibility or highlights changed; call `render`
    Redraw,
    /// A side panel (properties, layer list) changed; the canvas did not
    Panel,
}

impl Update {
    pub fn needs_redraw(&self) -> bool {
        matches!(self, Update::Redraw)
    }
}

pub struct Viewer {
    config: ViewerConfig,
    model: BuildingModel,
    rotation: RotationState,
    dragging: bool,
    last_pointer: Point2<f64>,
    layers: LayerTree,
    highlights: HighlightSet,
    selected: Option<&'static ElementProperties>,
}

impl Viewer {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            model: BuildingModel::cube(),
            rotation: RotationState::zero(),
            dragging: false,
            last_pointer: Point2::origin(),
            layers: LayerTree::default(),
            highlights: HighlightSet::new(),
            selected: None,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.config.canvas_width as f64, self.config.canvas_height as f64)
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn layers(&self) -> &LayerTree {
        &self.layers
    }

    pub fn highlights(&self) -> &HighlightSet {
        &self.highlights
    }

    pub fn selected(&self) -> Option<&'static ElementProperties> {
        self.selected
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Update {
        match event {
            PointerEvent::Down { x, y } => {
                self.dragging = true;
                self.last_pointer = Point2::new(x, y);
                Update::Unchanged
            }
            PointerEvent::Move { x, y } => {
                if !self.dragging {
                    return Update::Unchanged;
                }
                let delta = Point2::new(x, y) - self.last_pointer;
                self.rotation.drag(delta.x, delta.y, self.config.drag_sensitivity);
                self.last_pointer = Point2::new(x, y);
                Update::Redraw
            }
            PointerEvent::Up | PointerEvent::Leave => {
                self.dragging = false;
                Update::Unchanged
            }
            PointerEvent::Click { x, y } => match resolve_click(x, y, &self.viewport()) {
                Some(properties) => {
                    log::debug!("selected {}", properties.name);
                    self.selected = Some(properties);
                    Update::Panel
                }
                None => Update::Unchanged,
            },
        }
    }

    /// Rotate as if dragged by (dx, dy) pixels. Leaves any pointer drag in
    /// progress untouched.
    pub fn rotate_by(&mut self, dx: f64, dy: f64) -> Update {
        self.rotation.drag(dx, dy, self.config.drag_sensitivity);
        Update::Redraw
    }

    pub fn reset_rotation(&mut self) -> Update {
        self.rotation.reset();
        Update::Redraw
    }

    pub fn toggle_visibility(&mut self, id: impl Into<NodeId>) -> Update {
        if self.layers.toggle_visibility(id) {
            Update::Redraw
        } else {
            Update::Unchanged
        }
    }

    /// Expansion only affects the layer panel listing
    pub fn toggle_expanded(&mut self, group: GroupId) -> Update {
        if self.layers.toggle_expanded(group) {
            Update::Panel
        } else {
            Update::Unchanged
        }
    }

    pub fn toggle_highlight(&mut self, layer: Layer) -> Update {
        self.highlights.toggle(layer);
        Update::Redraw
    }

    pub fn frame(&self) -> Frame {
        let state = SceneState {
            model: &self.model,
            rotation: &self.rotation,
            layers: &self.layers,
            highlights: &self.highlights,
        };
        build_frame(&state, &self.config)
    }

    /// Paint the current state onto `surface`
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        surface.present(&self.frame())
    }
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picking::{EXTERIOR_WALL_SOUTH, MAIN_ENTRANCE_DOOR};

    #[test]
    fn test_drag_rotates() {
        let mut viewer = Viewer::default();
        assert_eq!(viewer.handle_pointer(PointerEvent::Move { x: 50.0, y: 50.0 }), Update::Unchanged);

        let _ = viewer.handle_pointer(PointerEvent::Down { x: 100.0, y: 100.0 });
        assert!(viewer.is_dragging());
        let update = viewer.handle_pointer(PointerEvent::Move { x: 120.0, y: 90.0 });
        assert!(update.needs_redraw());
        assert_eq!(viewer.rotation(), RotationState::new(-5.0, 10.0));

        let _ = viewer.handle_pointer(PointerEvent::Move { x: 130.0, y: 90.0 });
        assert_eq!(viewer.rotation(), RotationState::new(-5.0, 15.0));

        let _ = viewer.handle_pointer(PointerEvent::Leave);
        let _ = viewer.handle_pointer(PointerEvent::Move { x: 500.0, y: 500.0 });
        assert_eq!(viewer.rotation(), RotationState::new(-5.0, 15.0));

        assert!(viewer.reset_rotation().needs_redraw());
        assert_eq!(viewer.rotation(), RotationState::zero());
    }

    #[test]
    fn test_rotate_by_keeps_pointer_drag() {
        let mut viewer = Viewer::default();
        let _ = viewer.handle_pointer(PointerEvent::Down { x: 100.0, y: 100.0 });
        assert!(viewer.rotate_by(10.0, -4.0).needs_redraw());
        assert_eq!(viewer.rotation(), RotationState::new(-2.0, 5.0));
        assert!(viewer.is_dragging());

        // the pointer drag continues from where it was
        let _ = viewer.handle_pointer(PointerEvent::Move { x: 102.0, y: 100.0 });
        assert_eq!(viewer.rotation(), RotationState::new(-2.0, 6.0));
    }

    #[test]
    fn test_click_outside_keeps_selection() {
        let mut viewer = Viewer::default();
        assert_eq!(viewer.handle_pointer(PointerEvent::Click { x: 500.0, y: 420.0 }), Update::Panel);
        assert_eq!(viewer.selected(), Some(&MAIN_ENTRANCE_DOOR));

        assert_eq!(viewer.handle_pointer(PointerEvent::Click { x: 10.0, y: 10.0 }), Update::Unchanged);
        assert_eq!(viewer.selected(), Some(&MAIN_ENTRANCE_DOOR));

        let _ = viewer.handle_pointer(PointerEvent::Click { x: 10.0, y: 300.0 });
        assert_eq!(viewer.selected(), Some(&EXTERIOR_WALL_SOUTH));
    }

    #[test]
    fn test_click_ignores_rotation() {
        let mut viewer = Viewer::default();
        let _ = viewer.handle_pointer(PointerEvent::Down { x: 0.0, y: 0.0 });
        let _ = viewer.handle_pointer(PointerEvent::Move { x: 300.0, y: 170.0 });
        let _ = viewer.handle_pointer(PointerEvent::Up);
        let _ = viewer.handle_pointer(PointerEvent::Click { x: 500.0, y: 420.0 });
        assert_eq!(viewer.selected(), Some(&MAIN_ENTRANCE_DOOR));
    }

    #[test]
    fn test_toggles_request_redraw() {
        let mut viewer = Viewer::default();
        assert!(viewer.toggle_visibility(Layer::Walls).needs_redraw());
        assert!(viewer.toggle_highlight(Layer::Doors).needs_redraw());
        assert!(!viewer.toggle_expanded(GroupId::Mep).needs_redraw());
        assert!(!viewer.layers().is_visible(Layer::Walls));
        assert!(viewer.highlights().is_highlighted(Layer::Doors));
    }

    #[test]
    fn test_render_presents_current_frame() {
        struct Recorder(Vec<Frame>);

        impl Surface for Recorder {
            type Error = ();

            fn present(&mut self, frame: &Frame) -> Result<(), ()> {
                self.0.push(frame.clone());
                Ok(())
            }
        }

        let mut viewer = Viewer::default();
        let mut surface = Recorder(Vec::new());
        viewer.render(&mut surface).unwrap();
        let _ = viewer.toggle_visibility(GroupId::Structure);
        viewer.render(&mut surface).unwrap();

        assert_eq!(surface.0.len(), 2);
        // faces + door + columns, then door only
        assert_eq!(surface.0[0].commands.len(), 11);
        assert_eq!(surface.0[1].commands.len(), 1);
    }
}
