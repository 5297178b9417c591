/// Page routing over a browser-style history
use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::{all_consuming, eof, value},
    sequence::preceded,
    IResult,
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Page {
    #[default]
    Home,
    Dashboard,
    Library,
    About,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Dashboard, Page::Library, Page::About];

    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::Dashboard => "dashboard",
            Page::Library => "library",
            Page::About => "about",
        }
    }

    /// URL path pushed when navigating to this page
    pub fn path(&self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Dashboard => "/dashboard",
            Page::Library => "/library",
            Page::About => "/about",
        }
    }

    /// Resolve a location path. Anything unrecognized is the home page.
    pub fn from_path(path: &str) -> Page {
        match all_consuming(parse_path)(path) {
            Ok((_, page)) => page,
            Err(_) => {
                log::debug!("unknown path {:?}, falling back to home", path);
                Page::Home
            }
        }
    }

    /// Resolve a page name as used by `--page` and navigation links
    pub fn from_name(name: &str) -> Option<Page> {
        Page::ALL.into_iter().find(|page| page.name() == name)
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn parse_path(input: &str) -> IResult<&str, Page> {
    preceded(
        tag("/"),
        alt((
            value(Page::Dashboard, tag("dashboard")),
            value(Page::Library, tag("library")),
            value(Page::About, tag("about")),
            value(Page::Home, tag("home")),
            value(Page::Home, eof),
        )),
    )(input)
}

/// Session history the router pushes to and reads back from
pub trait History {
    fn push(&mut self, path: &str);

    /// Path of the current entry
    fn location(&self) -> String;
}

/// History kept in memory, with back and forward
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.to_string()],
            index: 0,
        }
    }

    /// Returns false at the oldest entry
    pub fn back(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Returns false at the newest entry
    pub fn forward(&mut self) -> bool {
        if self.index + 1 >= self.entries.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("/")
    }
}

impl History for MemoryHistory {
    fn push(&mut self, path: &str) {
        // pushing drops any forward entries
        self.entries.truncate(self.index + 1);
        self.entries.push(path.to_string());
        self.index = self.entries.len() - 1;
    }

    fn location(&self) -> String {
        self.entries[self.index].clone()
    }
}

/// Tracks the current page and keeps it in step with the history
#[derive(Debug, Clone)]
pub struct Router<H: History> {
    history: H,
    current: Page,
}

impl<H: History> Router<H> {
    /// Start on whatever page the history currently points at
    pub fn new(history: H) -> Self {
        let current = Page::from_path(&history.location());
        Self { history, current }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    /// Switch pages and push the page's path
    pub fn navigate(&mut self, page: Page) {
        log::debug!("navigate {} -> {}", self.current, page);
        self.current = page;
        self.history.push(page.path());
    }

    /// Re-derive the page after the history moved (back/forward).
    /// Returns true if the page changed.
    pub fn sync(&mut self) -> bool {
        let page = Page::from_path(&self.history.location());
        let changed = page != self.current;
        self.current = page;
        changed
    }

    pub fn history(&self) -> &H {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }
}
