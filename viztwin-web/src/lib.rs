/// VizTwin Web - browser front end
///
/// Paints viewer frames onto a 2D canvas, forwards mouse events to the
/// viewer and keeps the page in step with the browser history. The page
/// markup is owned by the host; it listens for `viztwin-change` on the
/// window and re-reads state through the getters below.
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use viztwin_core::scene::{Frame, Shape, Surface};
use viztwin_core::{
    App, ElementProperties, History, Layer, NodeId, Page, PointerEvent, Tick, Update, ViewerConfig,
};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, HtmlCanvasElement, MouseEvent, Window};

/// Event fired on the window whenever panel state changed
const CHANGE_EVENT: &str = "viztwin-change";

fn js_err(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// History backed by the browser's History API
pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    pub fn new() -> Result<Self, JsValue> {
        Ok(Self { window: window()? })
    }
}

impl History for BrowserHistory {
    fn push(&mut self, path: &str) {
        let pushed = self
            .window
            .history()
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(path)));
        if let Err(err) = pushed {
            log::warn!("pushState to {} failed: {:?}", path, err);
        }
    }

    fn location(&self) -> String {
        self.window
            .location()
            .pathname()
            .unwrap_or_else(|_| String::from("/"))
    }
}

/// Paints frames with the canvas 2D API
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let context = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self { context })
    }

    fn trace(&self, shape: &Shape) {
        let points = shape.outline();
        let ctx = &self.context;
        ctx.begin_path();
        if let Some((first, rest)) = points.split_first() {
            ctx.move_to(first.x, first.y);
            for point in rest {
                ctx.line_to(point.x, point.y);
            }
        }
        ctx.close_path();
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn present(&mut self, frame: &Frame) -> Result<(), JsValue> {
        let ctx = &self.context;
        let (width, height) = (frame.viewport.width, frame.viewport.height);

        let gradient = ctx.create_linear_gradient(0.0, 0.0, width, height);
        gradient.add_color_stop(0.0, &frame.background.0.to_hex())?;
        gradient.add_color_stop(1.0, &frame.background.1.to_hex())?;
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style(&gradient);
        ctx.fill_rect(0.0, 0.0, width, height);

        ctx.set_stroke_style(&JsValue::from_str(&frame.grid.color.to_hex()));
        ctx.set_global_alpha(frame.grid.alpha);
        ctx.set_line_width(frame.grid.width);
        for x in frame.grid.columns(&frame.viewport) {
            ctx.begin_path();
            ctx.move_to(x, 0.0);
            ctx.line_to(x, height);
            ctx.stroke();
        }
        for y in frame.grid.rows(&frame.viewport) {
            ctx.begin_path();
            ctx.move_to(0.0, y);
            ctx.line_to(width, y);
            ctx.stroke();
        }

        for command in &frame.commands {
            self.trace(&command.shape);
            if let Some(fill) = command.fill {
                ctx.set_global_alpha(fill.alpha);
                ctx.set_fill_style(&JsValue::from_str(&fill.color.to_hex()));
                ctx.fill();
            }
            if let Some(stroke) = command.stroke {
                ctx.set_global_alpha(1.0);
                ctx.set_stroke_style(&JsValue::from_str(&stroke.color.to_hex()));
                ctx.set_line_width(stroke.width);
                ctx.stroke();
            }
        }
        ctx.set_global_alpha(1.0);
        Ok(())
    }
}

struct Shared {
    app: App<BrowserHistory>,
    surface: Option<CanvasSurface>,
    canvas: Option<HtmlCanvasElement>,
    upload_timer: Option<i32>,
}

impl Shared {
    fn redraw(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if let Err(err) = self.app.viewer.render(surface) {
            log::warn!("skipped frame: {:?}", err);
        }
    }
}

/// Mutate through `cell`, then run `after` once the borrow is released.
/// `after` may dispatch DOM events whose listeners read the same cell.
fn with_released<S, R>(
    cell: &RefCell<S>,
    change: impl FnOnce(&mut S) -> R,
    after: impl FnOnce(&R),
) -> R {
    let result = change(&mut cell.borrow_mut());
    after(&result);
    result
}

/// Run `change` against the app, redraw if asked, then notify the page
fn apply(shared: &RefCell<Shared>, change: impl FnOnce(&mut App<BrowserHistory>) -> Update) {
    let _ = with_released(
        shared,
        |shared| {
            let update = change(&mut shared.app);
            if update.needs_redraw() {
                shared.redraw();
            }
            update
        },
        |update| {
            if *update != Update::Unchanged {
                notify();
            }
        },
    );
}

/// Arm the upload timer, then start the simulation. A failed arm leaves
/// the simulation idle so a later start can retry. Returns the timer
/// handle, or `None` while an upload is already running.
fn begin_upload<H: History, E>(
    app: &mut App<H>,
    arm: impl FnOnce(Duration) -> Result<i32, E>,
) -> Result<Option<i32>, E> {
    if app.upload.is_processing() {
        return Ok(None);
    }
    let handle = arm(app.upload.interval())?;
    let started = app.start_upload();
    debug_assert!(started);
    Ok(Some(handle))
}

fn notify() {
    let dispatched = window()
        .and_then(|window| Event::new(CHANGE_EVENT).map(|event| (window, event)))
        .and_then(|(window, event)| window.dispatch_event(&event));
    if let Err(err) = dispatched {
        log::warn!("could not dispatch {}: {:?}", CHANGE_EVENT, err);
    }
}

type MouseListener = Closure<dyn FnMut(MouseEvent)>;

fn offset(event: &MouseEvent) -> (f64, f64) {
    (event.offset_x() as f64, event.offset_y() as f64)
}

/// Canvas events and how each maps to a viewer pointer event
fn pointer_bindings() -> [(&'static str, fn(&MouseEvent) -> PointerEvent); 5] {
    [
        ("mousedown", |e| {
            let (x, y) = offset(e);
            PointerEvent::Down { x, y }
        }),
        ("mousemove", |e| {
            let (x, y) = offset(e);
            PointerEvent::Move { x, y }
        }),
        ("mouseup", |_| PointerEvent::Up),
        ("mouseleave", |_| PointerEvent::Leave),
        ("click", |e| {
            let (x, y) = offset(e);
            PointerEvent::Click { x, y }
        }),
    ]
}

/// Application handle exported to JavaScript.
///
/// Listener closures are created once and live as long as the handle, so
/// re-attaching a canvas never stacks duplicate handlers.
#[wasm_bindgen]
pub struct WebApp {
    shared: Rc<RefCell<Shared>>,
    pointer_listeners: Vec<(&'static str, MouseListener)>,
    popstate: Closure<dyn FnMut(Event)>,
    upload_tick: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl WebApp {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WebApp, JsValue> {
        let app = App::new(BrowserHistory::new()?, ViewerConfig::default());
        log::info!("VizTwin starting on {}", app.page());
        let shared = Rc::new(RefCell::new(Shared {
            app,
            surface: None,
            canvas: None,
            upload_timer: None,
        }));

        let pointer_listeners = pointer_bindings()
            .into_iter()
            .map(|(name, to_pointer)| {
                let weak = Rc::downgrade(&shared);
                let listener = MouseListener::new(move |event: MouseEvent| {
                    if let Some(shared) = weak.upgrade() {
                        apply(&shared, |app| app.viewer.handle_pointer(to_pointer(&event)));
                    }
                });
                (name, listener)
            })
            .collect();

        // back/forward buttons
        let popstate = {
            let weak = Rc::downgrade(&shared);
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                let moved = shared.borrow_mut().app.history_moved();
                if moved {
                    notify();
                }
            })
        };
        window()?.add_event_listener_with_callback("popstate", popstate.as_ref().unchecked_ref())?;

        let upload_tick = {
            let weak = Rc::downgrade(&shared);
            Closure::<dyn FnMut()>::new(move || {
                let Some(shared) = weak.upgrade() else {
                    return;
                };
                let finished = {
                    let mut shared = shared.borrow_mut();
                    let tick = shared.app.upload_tick();
                    let handle = match tick {
                        Tick::Finished => shared.upload_timer.take(),
                        Tick::Advanced(_) | Tick::Idle => None,
                    };
                    handle
                };
                if let (Some(handle), Ok(window)) = (finished, window()) {
                    window.clear_interval_with_handle(handle);
                }
                notify();
            })
        };

        Ok(WebApp {
            shared,
            pointer_listeners,
            popstate,
            upload_tick,
        })
    }

    /// Bind the dashboard canvas, replacing any previously bound one.
    /// Call again whenever the host re-mounts it.
    pub fn attach_canvas(&self, canvas_id: &str) -> Result<(), JsValue> {
        let canvas = window()?
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?
            .get_element_by_id(canvas_id)
            .ok_or_else(|| js_err(format!("no element #{}", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()?;

        self.detach_canvas();
        let surface = CanvasSurface::new(&canvas)?;
        for (name, listener) in &self.pointer_listeners {
            canvas.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
        }

        let mut shared = self.shared.borrow_mut();
        let viewport = shared.app.viewer.viewport();
        canvas.set_width(viewport.width as u32);
        canvas.set_height(viewport.height as u32);
        shared.surface = Some(surface);
        shared.canvas = Some(canvas);
        shared.redraw();
        Ok(())
    }

    /// Unbind the canvas and its mouse listeners
    pub fn detach_canvas(&self) {
        let canvas = {
            let mut shared = self.shared.borrow_mut();
            shared.surface = None;
            shared.canvas.take()
        };
        let Some(canvas) = canvas else {
            return;
        };
        for (name, listener) in &self.pointer_listeners {
            if let Err(err) =
                canvas.remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref())
            {
                log::warn!("could not remove {} listener: {:?}", name, err);
            }
        }
    }

    pub fn current_page(&self) -> String {
        self.shared.borrow().app.page().name().to_string()
    }

    /// Navigate by page name: home, dashboard, library or about
    pub fn navigate(&self, page: &str) -> Result<(), JsValue> {
        let page = Page::from_name(page).ok_or_else(|| js_err(format!("unknown page {}", page)))?;
        self.shared.borrow_mut().app.navigate(page);
        notify();
        Ok(())
    }

    /// Toggle visibility of a group or layer by id
    pub fn toggle_layer(&self, id: &str) -> Result<(), JsValue> {
        let id = NodeId::from_str(id).map_err(js_err)?;
        apply(&self.shared, |app| app.viewer.toggle_visibility(id));
        Ok(())
    }

    pub fn toggle_expanded(&self, group: &str) -> Result<(), JsValue> {
        let NodeId::Group(group) = NodeId::from_str(group).map_err(js_err)? else {
            return Err(js_err(format!("{} is not a group", group)));
        };
        apply(&self.shared, |app| app.viewer.toggle_expanded(group));
        Ok(())
    }

    pub fn toggle_highlight(&self, layer: &str) -> Result<(), JsValue> {
        let layer = Layer::from_str(layer).map_err(js_err)?;
        apply(&self.shared, |app| app.viewer.toggle_highlight(layer));
        Ok(())
    }

    pub fn is_layer_visible(&self, layer: &str) -> bool {
        Layer::from_str(layer)
            .map(|layer| self.shared.borrow().app.viewer.layers().is_visible(layer))
            .unwrap_or(false)
    }

    pub fn is_layer_highlighted(&self, layer: &str) -> bool {
        Layer::from_str(layer)
            .map(|layer| self.shared.borrow().app.viewer.highlights().is_highlighted(layer))
            .unwrap_or(false)
    }

    pub fn reset_view(&self) {
        apply(&self.shared, |app| app.reset_view());
    }

    /// Start the upload simulation; ignored while one is running
    pub fn start_upload(&self) -> Result<bool, JsValue> {
        let tick = &self.upload_tick;
        with_released(
            &self.shared,
            |shared| {
                let handle = begin_upload(&mut shared.app, |interval| {
                    window()?.set_interval_with_callback_and_timeout_and_arguments_0(
                        tick.as_ref().unchecked_ref(),
                        interval.as_millis() as i32,
                    )
                })?;
                if handle.is_some() {
                    shared.upload_timer = handle;
                }
                Ok::<bool, JsValue>(handle.is_some())
            },
            |armed| {
                if matches!(armed, Ok(true)) {
                    notify();
                }
            },
        )
    }

    pub fn is_processing(&self) -> bool {
        self.shared.borrow().app.upload.is_processing()
    }

    pub fn upload_progress(&self) -> u8 {
        self.shared.borrow().app.upload.progress()
    }

    pub fn selected_name(&self) -> Option<String> {
        self.selected_field(|p| p.name.to_string())
    }

    pub fn selected_kind(&self) -> Option<String> {
        self.selected_field(|p| p.kind.to_string())
    }

    pub fn selected_material(&self) -> Option<String> {
        self.selected_field(|p| p.material.to_string())
    }

    pub fn selected_dimensions(&self) -> Option<String> {
        self.selected_field(|p| {
            format!(
                "W: {}, H: {}, D: {}",
                p.dimensions.width, p.dimensions.height, p.dimensions.depth
            )
        })
    }

    pub fn selected_area(&self) -> Option<String> {
        self.selected_field(|p| p.area.to_string())
    }

    pub fn selected_volume(&self) -> Option<String> {
        self.selected_field(|p| p.volume.to_string())
    }

    pub fn selected_notes(&self) -> Option<String> {
        self.selected_field(|p| p.notes.to_string())
    }

    pub fn library_summary(&self) -> String {
        self.shared.borrow().app.library.summary()
    }

    pub fn project_ids(&self) -> Vec<String> {
        let shared = self.shared.borrow();
        shared.app.library.projects().iter().map(|p| p.id.clone()).collect()
    }

    pub fn project_name(&self, id: &str) -> Option<String> {
        self.shared.borrow().app.library.get(id).map(|p| p.name.clone())
    }

    pub fn project_date(&self, id: &str) -> Option<String> {
        self.shared.borrow().app.library.get(id).map(|p| p.date.clone())
    }

    pub fn project_thumbnail(&self, id: &str) -> Option<String> {
        self.shared.borrow().app.library.get(id).map(|p| p.thumbnail.clone())
    }

    /// Name in the open rename field, if any
    pub fn rename_draft(&self) -> Option<String> {
        self.shared.borrow().app.library.draft().map(|d| d.name.clone())
    }

    pub fn begin_rename(&self, id: &str) -> Result<(), JsValue> {
        self.shared.borrow_mut().app.library.begin_rename(id).map_err(js_err)?;
        notify();
        Ok(())
    }

    pub fn edit_rename(&self, name: &str) -> Result<(), JsValue> {
        self.shared.borrow_mut().app.library.edit_draft(name).map_err(js_err)
    }

    pub fn save_rename(&self) -> Result<(), JsValue> {
        let saved = self.shared.borrow_mut().app.library.save_rename().map(|_| ());
        saved.map_err(js_err)?;
        notify();
        Ok(())
    }

    pub fn cancel_rename(&self) {
        self.shared.borrow_mut().app.library.cancel_rename();
        notify();
    }

    pub fn delete_project(&self, id: &str) -> Result<(), JsValue> {
        let removed = self.shared.borrow_mut().app.library.delete(id).map_err(js_err)?;
        log::info!("deleted project {}", removed.name);
        notify();
        Ok(())
    }

    /// "View" on a card and the upload actions on the home page
    pub fn open_dashboard(&self) {
        self.shared.borrow_mut().app.open_dashboard();
        notify();
    }
}

impl Drop for WebApp {
    fn drop(&mut self) {
        self.detach_canvas();
        let timer = self.shared.borrow_mut().upload_timer.take();
        if let Ok(window) = window() {
            if let Some(handle) = timer {
                window.clear_interval_with_handle(handle);
            }
            let _ = window
                .remove_event_listener_with_callback("popstate", self.popstate.as_ref().unchecked_ref());
        }
    }
}

impl WebApp {
    fn selected_field(&self, field: fn(&ElementProperties) -> String) -> Option<String> {
        self.shared.borrow().app.viewer.selected().map(field)
    }
}

/// Forwards `log` records to the browser console
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&message),
            log::Level::Warn => web_sys::console::warn_1(&message),
            log::Level::Info => web_sys::console::info_1(&message),
            log::Level::Debug | log::Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(log::LevelFilter::Info))
        .map_err(js_err)?;
    Ok(())
}
