/// Terminal front end for VizTwin
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use viztwin_core::{
    App, MemoryHistory, NodeId, Page, PointerEvent, Tick, Update, ViewerConfig,
};

pub mod pages;
pub mod renderer;

pub use renderer::AsciiRenderer;

use pages::{LAYER_PANEL_WIDTH, PROPERTIES_PANEL_WIDTH};

/// What keyboard input currently edits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Renaming,
}

/// Main application struct for the terminal front end
pub struct TerminalApp {
    state: App<MemoryHistory>,
    renderer: AsciiRenderer,
    running: bool,
    mode: InputMode,
    layer_cursor: usize,
    library_cursor: usize,
    /// Left button went down inside the viewer and has not been released
    pressed_in_viewer: bool,
    last_upload_tick: Instant,
    dirty: bool,
}

impl TerminalApp {
    pub fn new(config: ViewerConfig, start: Page) -> Self {
        let state = App::new(MemoryHistory::new(start.path()), config);
        Self {
            state,
            renderer: AsciiRenderer::new(0, 0),
            running: true,
            mode: InputMode::Normal,
            layer_cursor: 0,
            library_cursor: 0,
            pressed_in_viewer: false,
            last_upload_tick: Instant::now(),
            dirty: true,
        }
    }

    pub fn state(&self) -> &App<MemoryHistory> {
        &self.state
    }

    pub fn layer_cursor(&self) -> usize {
        self.layer_cursor
    }

    pub fn library_cursor(&self) -> usize {
        self.library_cursor
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;
        terminal::disable_raw_mode()?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let poll_interval = Duration::from_millis(1000 / 30);

        while self.running {
            if event::poll(poll_interval)? {
                let event = event::read()?;
                self.handle_event(event);
            }

            self.advance_upload();

            if self.dirty {
                self.render()?;
                self.dirty = false;
            }
        }

        Ok(())
    }

    /// Step the upload simulation once per configured interval
    fn advance_upload(&mut self) {
        if !self.state.upload.is_processing() {
            return;
        }
        if self.last_upload_tick.elapsed() < self.state.upload.interval() {
            return;
        }
        self.last_upload_tick = Instant::now();
        match self.state.upload_tick() {
            Tick::Advanced(progress) => log::trace!("upload at {}%", progress),
            Tick::Finished | Tick::Idle => {}
        }
        self.dirty = true;
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(_, _) => self.dirty = true,
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        self.dirty = true;
        if self.mode == InputMode::Renaming {
            self.handle_rename_key(key.code);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('1') => self.state.navigate(Page::Home),
            KeyCode::Char('2') => self.state.navigate(Page::Dashboard),
            KeyCode::Char('3') => self.state.navigate(Page::Library),
            KeyCode::Char('4') => self.state.navigate(Page::About),
            KeyCode::Char('[') => {
                if self.state.router.history_mut().back() {
                    self.state.history_moved();
                }
            }
            KeyCode::Char(']') => {
                if self.state.router.history_mut().forward() {
                    self.state.history_moved();
                }
            }
            code => match self.state.page() {
                Page::Home => {
                    if code == KeyCode::Enter {
                        self.state.open_dashboard();
                    }
                }
                Page::Dashboard => self.handle_dashboard_key(code),
                Page::Library => self.handle_library_key(code),
                Page::About => {}
            },
        }
    }

    fn handle_dashboard_key(&mut self, code: KeyCode) {
        let (selected, row_count) = {
            let rows = self.state.viewer.layers().rows();
            let selected = rows.get(self.layer_cursor).map(|(_, node)| node.node_id());
            (selected, rows.len())
        };

        let update = match code {
            KeyCode::Char('r') => self.state.reset_view(),
            KeyCode::Char('u') => {
                if self.state.start_upload() {
                    self.last_upload_tick = Instant::now();
                }
                Update::Panel
            }
            KeyCode::Char('j') | KeyCode::Down => {
                self.layer_cursor = (self.layer_cursor + 1).min(row_count.saturating_sub(1));
                Update::Panel
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.layer_cursor = self.layer_cursor.saturating_sub(1);
                Update::Panel
            }
            KeyCode::Char(' ') => match selected {
                Some(id) => self.state.viewer.toggle_visibility(id),
                None => Update::Unchanged,
            },
            KeyCode::Enter => match selected {
                Some(NodeId::Group(group)) => self.state.viewer.toggle_expanded(group),
                _ => Update::Unchanged,
            },
            KeyCode::Char('h') => match selected {
                Some(NodeId::Layer(layer)) => self.state.viewer.toggle_highlight(layer),
                _ => Update::Unchanged,
            },
            // keyboard drag, ten pixels per press
            KeyCode::Left => self.state.viewer.rotate_by(-10.0, 0.0),
            KeyCode::Right => self.state.viewer.rotate_by(10.0, 0.0),
            KeyCode::Char('w') => self.state.viewer.rotate_by(0.0, -10.0),
            KeyCode::Char('s') => self.state.viewer.rotate_by(0.0, 10.0),
            _ => Update::Unchanged,
        };

        // collapsing a group can leave the cursor past the end
        let row_count = self.state.viewer.layers().rows().len();
        self.layer_cursor = self.layer_cursor.min(row_count.saturating_sub(1));
        if update != Update::Unchanged {
            self.dirty = true;
        }
    }

    fn handle_library_key(&mut self, code: KeyCode) {
        let selected = self
            .state
            .library
            .projects()
            .get(self.library_cursor)
            .map(|p| p.id.clone());

        match code {
            KeyCode::Char('j') | KeyCode::Down => {
                let last = self.state.library.len().saturating_sub(1);
                self.library_cursor = (self.library_cursor + 1).min(last);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.library_cursor = self.library_cursor.saturating_sub(1);
            }
            KeyCode::Char('n') => self.state.open_dashboard(),
            // View on a card, or Create First Project on the empty state
            KeyCode::Enter => self.state.open_dashboard(),
            KeyCode::Char('e') => {
                if let Some(id) = selected {
                    if self.state.library.begin_rename(&id).is_ok() {
                        self.mode = InputMode::Renaming;
                    }
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = selected {
                    if let Err(err) = self.state.library.delete(&id) {
                        log::warn!("delete failed: {}", err);
                    }
                    let last = self.state.library.len().saturating_sub(1);
                    self.library_cursor = self.library_cursor.min(last);
                }
            }
            _ => {}
        }
    }

    fn handle_rename_key(&mut self, code: KeyCode) {
        let library = &mut self.state.library;
        let Some(mut name) = library.draft().map(|d| d.name.clone()) else {
            self.mode = InputMode::Normal;
            return;
        };

        match code {
            KeyCode::Enter => match library.save_rename() {
                Ok(project) => {
                    log::info!("renamed project {}", project.id);
                    self.mode = InputMode::Normal;
                }
                Err(err) => log::warn!("rename rejected: {}", err),
            },
            KeyCode::Esc => {
                library.cancel_rename();
                self.mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                name.pop();
                let _ = library.edit_draft(name);
            }
            KeyCode::Char(c) => {
                name.push(c);
                let _ = library.edit_draft(name);
            }
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.state.page() != Page::Dashboard {
            return;
        }
        let inside = self.renderer.contains(mouse.column, mouse.row);
        let canvas = {
            let viewport = self.state.viewer.viewport();
            (viewport.width, viewport.height)
        };
        let (x, y) = self.renderer.to_canvas(mouse.column, mouse.row, canvas);

        let events: Vec<PointerEvent> = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => {
                self.pressed_in_viewer = true;
                vec![PointerEvent::Down { x, y }]
            }
            MouseEventKind::Drag(MouseButton::Left) if inside => vec![PointerEvent::Move { x, y }],
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved if !inside => {
                vec![PointerEvent::Leave]
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let mut events = vec![PointerEvent::Up];
                // a click needs both press and release over the canvas
                if inside && self.pressed_in_viewer {
                    events.push(PointerEvent::Click { x, y });
                }
                self.pressed_in_viewer = false;
                events
            }
            _ => Vec::new(),
        };

        for event in events {
            if self.state.viewer.handle_pointer(event) != Update::Unchanged {
                self.dirty = true;
            }
        }
    }

    /// Lay out the dashboard viewer for a terminal size
    fn layout_viewer(&mut self, width: u16, height: u16) {
        let x0 = LAYER_PANEL_WIDTH;
        let viewer_width = width.saturating_sub(LAYER_PANEL_WIDTH + PROPERTIES_PANEL_WIDTH).max(10);
        let viewer_height = height.saturating_sub(4).max(5);
        self.renderer
            .resize((x0, 2), viewer_width as usize, viewer_height as usize);
    }

    fn help_line(&self) -> &'static str {
        if self.mode == InputMode::Renaming {
            return "Type a new name  Enter=Save  Esc=Cancel";
        }
        match self.state.page() {
            Page::Home => "Enter=Upload Your Scan  1-4=Pages  [ ]=Back/Forward  Q=Quit",
            Page::Dashboard => {
                "Drag=Rotate  Click=Properties  J/K=Layer  Space=Show/Hide  Enter=Expand  H=Highlight  R=Reset  U=Upload"
            }
            Page::Library => "J/K=Select  Enter=View  N=New  E=Rename  X=Delete  1-4=Pages  Q=Quit",
            Page::About => "1-4=Pages  [ ]=Back/Forward  Q=Quit",
        }
    }

    fn render(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        let mut stdout = stdout();
        queue!(stdout, terminal::Clear(ClearType::All))?;

        pages::draw_nav(&mut stdout, self.state.page(), width)?;

        match self.state.page() {
            Page::Home => pages::draw_home(&mut stdout, width)?,
            Page::About => pages::draw_about(&mut stdout, width)?,
            Page::Library => pages::draw_library(&mut stdout, self, width)?,
            Page::Dashboard => {
                self.layout_viewer(width, height);
                self.state.viewer.render(&mut self.renderer)?;
                self.renderer.draw(&mut stdout)?;
                pages::draw_layer_panel(&mut stdout, self, height)?;
                let (x0, _) = self.renderer.origin();
                let (viewer_width, _) = self.renderer.size();
                pages::draw_viewer_header(&mut stdout, x0, viewer_width as u16)?;
                pages::draw_properties_panel(&mut stdout, self, x0 + viewer_width as u16 + 1)?;
            }
        }

        pages::draw_footer(&mut stdout, width, height, self.help_line())?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use viztwin_core::picking::MAIN_ENTRANCE_DOOR;
    use viztwin_core::{History, Layer};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_page_keys_and_history() {
        let mut app = TerminalApp::new(ViewerConfig::default(), Page::Home);
        app.handle_event(key(KeyCode::Char('3')));
        assert_eq!(app.state().page(), Page::Library);
        app.handle_event(key(KeyCode::Char('4')));
        app.handle_event(key(KeyCode::Char('[')));
        assert_eq!(app.state().page(), Page::Library);
        app.handle_event(key(KeyCode::Char(']')));
        assert_eq!(app.state().page(), Page::About);
        assert_eq!(app.state().router.history().location(), "/about");
    }

    #[test]
    fn test_rename_and_delete_from_keyboard() {
        let mut app = TerminalApp::new(ViewerConfig::default(), Page::Library);
        app.handle_event(key(KeyCode::Char('e')));
        for _ in 0.."Downtown Office Building".len() {
            app.handle_event(key(KeyCode::Backspace));
        }
        for c in "HQ".chars() {
            app.handle_event(key(KeyCode::Char(c)));
        }
        app.handle_event(key(KeyCode::Enter));
        assert_eq!(app.state().library.get("1").unwrap().name, "HQ");
        assert_eq!(app.state().page(), Page::Library);

        app.handle_event(key(KeyCode::Char('x')));
        assert_eq!(app.state().library.len(), 5);
        assert!(app.state().library.get("1").is_none());
    }

    #[test]
    fn test_mouse_click_selects_door() {
        let mut app = TerminalApp::new(ViewerConfig::default(), Page::Dashboard);
        app.layout_viewer(162, 74);
        // viewer is 100x70 cells at (28, 2); canvas (500, 420) is cell (50, 42)
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 78, 44));
        app.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 78, 44));
        assert_eq!(app.state().viewer.selected(), Some(&MAIN_ENTRANCE_DOOR));
    }

    #[test]
    fn test_group_toggle_from_keyboard() {
        let mut app = TerminalApp::new(ViewerConfig::default(), Page::Dashboard);
        // cursor starts on the Structure group
        app.handle_event(key(KeyCode::Char(' ')));
        assert!(!app.state().viewer.layers().is_visible(Layer::Walls));
        app.handle_event(key(KeyCode::Char('j')));
        app.handle_event(key(KeyCode::Char('h')));
        assert!(app.state().viewer.highlights().is_highlighted(Layer::Walls));
        assert_eq!(app.state().viewer.layers().rows().len(), 11);
    }

    #[test]
    fn test_arrow_keys_during_mouse_drag() {
        let mut app = TerminalApp::new(ViewerConfig::default(), Page::Dashboard);
        app.layout_viewer(162, 74);
        app.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 60, 20));
        app.handle_event(key(KeyCode::Right));
        assert!(app.state().viewer.is_dragging());
        assert_eq!(app.state().viewer.rotation().yaw, 5.0);
        app.handle_event(key(KeyCode::Left));
        assert_eq!(app.state().viewer.rotation().yaw, 0.0);
    }
}
