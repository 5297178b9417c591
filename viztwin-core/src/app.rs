/// Whole-application state shared by the terminal and web hosts
use crate::config::ViewerConfig;
use crate::library::ProjectLibrary;
use crate::route::{History, Page, Router};
use crate::upload::{Tick, UploadSimulation};
use crate::viewer::{Update, Viewer};

/// Router, dashboard viewer, upload simulation and project library.
/// The current page lives in the router and is read from here by views.
pub struct App<H: History> {
    pub router: Router<H>,
    pub viewer: Viewer,
    pub upload: UploadSimulation,
    pub library: ProjectLibrary,
}

impl<H: History> App<H> {
    pub fn new(history: H, config: ViewerConfig) -> Self {
        let upload = UploadSimulation::from_config(&config);
        Self {
            router: Router::new(history),
            viewer: Viewer::new(config),
            upload,
            library: ProjectLibrary::seeded(),
        }
    }

    pub fn page(&self) -> Page {
        self.router.current()
    }

    pub fn navigate(&mut self, page: Page) {
        self.router.navigate(page);
    }

    /// "View" on a library card, "New Project" and the empty-state action
    /// all open the dashboard
    pub fn open_dashboard(&mut self) {
        self.navigate(Page::Dashboard);
    }

    /// Handle a back/forward move of the underlying history
    pub fn history_moved(&mut self) -> bool {
        self.router.sync()
    }

    /// Start the simulated upload. Returns true if the host should start
    /// its timer.
    pub fn start_upload(&mut self) -> bool {
        self.upload.start()
    }

    /// Timer callback. Returns the tick so the host can cancel its timer
    /// on `Finished`.
    pub fn upload_tick(&mut self) -> Tick {
        self.upload.tick()
    }

    pub fn reset_view(&mut self) -> Update {
        self.viewer.reset_rotation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::MemoryHistory;

    #[test]
    fn test_library_actions_open_dashboard() {
        let mut app = App::new(MemoryHistory::new("/library"), ViewerConfig::default());
        assert_eq!(app.page(), Page::Library);
        app.open_dashboard();
        assert_eq!(app.page(), Page::Dashboard);
        assert!(app.router.history_mut().back());
        assert!(app.history_moved());
        assert_eq!(app.page(), Page::Library);
    }

    #[test]
    fn test_upload_cycle() {
        let mut app = App::new(MemoryHistory::default(), ViewerConfig::default());
        assert!(app.start_upload());
        assert!(!app.start_upload());
        let mut ticks = 0;
        while app.upload_tick() != Tick::Finished {
            ticks += 1;
        }
        assert_eq!(ticks, 10);
        assert_eq!(app.upload.progress(), 100);
    }
}
