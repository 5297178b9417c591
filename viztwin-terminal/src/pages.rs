/// Text layouts for the non-canvas parts of each page
use crossterm::{
    cursor,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    QueueableCommand,
};
use std::io::{self, Write};
use viztwin_core::color::palette;
use viztwin_core::content;
use viztwin_core::{LayerNode, Page};

use crate::renderer::to_term;
use crate::TerminalApp;

/// Width of the layer panel on the dashboard
pub const LAYER_PANEL_WIDTH: u16 = 28;
/// Width of the properties panel on the dashboard
pub const PROPERTIES_PANEL_WIDTH: u16 = 34;

/// Writes text lines at a fixed column, clipped to a width
struct Column<'w, W: Write> {
    writer: &'w mut W,
    x: u16,
    y: u16,
    width: u16,
}

impl<'w, W: Write> Column<'w, W> {
    fn new(writer: &'w mut W, x: u16, y: u16, width: u16) -> Self {
        Self { writer, x, y, width }
    }

    fn line(&mut self, text: &str, color: Color) -> io::Result<()> {
        let clipped: String = text.chars().take(self.width as usize).collect();
        self.writer
            .queue(cursor::MoveTo(self.x, self.y))?
            .queue(SetForegroundColor(color))?
            .queue(Print(clipped))?
            .queue(ResetColor)?;
        self.y += 1;
        Ok(())
    }

    fn bold(&mut self, text: &str, color: Color) -> io::Result<()> {
        self.writer.queue(SetAttribute(Attribute::Bold))?;
        self.line(text, color)?;
        self.writer.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    /// Word-wrapped paragraph
    fn paragraph(&mut self, text: &str, color: Color) -> io::Result<()> {
        for line in wrap(text, self.width as usize) {
            self.line(&line, color)?;
        }
        Ok(())
    }

    fn gap(&mut self) {
        self.y += 1;
    }
}

/// Greedy word wrap
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

pub fn draw_nav<W: Write>(writer: &mut W, current: Page, width: u16) -> io::Result<()> {
    writer.queue(cursor::MoveTo(0, 0))?;
    writer.queue(SetAttribute(Attribute::Bold))?;
    writer.queue(SetForegroundColor(to_term(palette::BLUSH)))?;
    writer.queue(Print(format!(" {} ", content::BRAND)))?;
    writer.queue(SetAttribute(Attribute::Reset))?;

    for (index, (page, label)) in content::NAV_LINKS.iter().enumerate() {
        let color = if *page == current { palette::BLUSH } else { palette::SAND };
        let key = match page {
            Page::Home => '1',
            Page::Library => '3',
            _ => '4',
        };
        writer.queue(SetForegroundColor(to_term(color)))?;
        writer.queue(Print(format!("  [{}] {}", key, label)))?;
        if index == 0 {
            let color = if current == Page::Dashboard { palette::BLUSH } else { palette::SAND };
            writer.queue(SetForegroundColor(to_term(color)))?;
            writer.queue(Print("  [2] Dashboard"))?;
        }
    }

    let login = format!("[{}]", content::LOGIN_LABEL);
    let column = width.saturating_sub(login.len() as u16 + 1);
    writer
        .queue(cursor::MoveTo(column, 0))?
        .queue(SetForegroundColor(to_term(palette::BLUSH)))?
        .queue(Print(login))?
        .queue(ResetColor)?;
    Ok(())
}

pub fn draw_footer<W: Write>(writer: &mut W, width: u16, height: u16, help: &str) -> io::Result<()> {
    let mut column = Column::new(writer, 1, height.saturating_sub(2), width.saturating_sub(2));
    column.line(help, to_term(palette::SKY))?;
    column.line(
        &format!("{}  {}", content::FOOTER_TAGLINE, content::FOOTER_COPYRIGHT),
        Color::DarkGrey,
    )
}

pub fn draw_home<W: Write>(writer: &mut W, width: u16) -> io::Result<()> {
    let mut column = Column::new(writer, 2, 2, width.saturating_sub(4));
    column.bold(content::HERO.headline, to_term(palette::SAND))?;
    column.paragraph(content::HERO.tagline, to_term(palette::SKY))?;
    column.gap();
    column.line(
        &format!("[Enter] {}    {}", content::HERO.primary_action, content::HERO.secondary_action),
        to_term(palette::BLUSH),
    )?;
    column.gap();
    column.bold(content::FEATURES_HEADING, to_term(palette::SAND))?;
    column.paragraph(content::FEATURES_INTRO, to_term(palette::SKY))?;
    for feature in &content::FEATURES {
        column.gap();
        column.bold(feature.title, to_term(palette::BLUSH))?;
        column.paragraph(feature.body, to_term(palette::SAND))?;
    }
    column.gap();
    column.bold(content::CTA_HEADING, to_term(palette::SAND))?;
    column.paragraph(content::CTA_BODY, to_term(palette::SKY))?;
    column.line(&format!("[Enter] {}", content::CTA_ACTION), to_term(palette::BLUSH))
}

pub fn draw_about<W: Write>(writer: &mut W, width: u16) -> io::Result<()> {
    let mut column = Column::new(writer, 2, 2, width.saturating_sub(4).min(90));
    column.bold(content::ABOUT_TITLE, to_term(palette::SAND))?;
    for paragraph in content::ABOUT_PARAGRAPHS {
        column.gap();
        column.paragraph(paragraph, to_term(palette::SKY))?;
    }
    Ok(())
}

pub fn draw_library<W: Write>(
    writer: &mut W,
    app: &TerminalApp,
    width: u16,
) -> io::Result<()> {
    let library = &app.state().library;
    let mut column = Column::new(writer, 2, 2, width.saturating_sub(4));
    column.bold(content::LIBRARY_TITLE, to_term(palette::SAND))?;
    column.line(&library.summary(), to_term(palette::SKY))?;
    column.line(&format!("[n] {}", content::NEW_PROJECT), to_term(palette::BLUSH))?;
    column.gap();

    if library.is_empty() {
        column.bold(content::EMPTY_TITLE, to_term(palette::SAND))?;
        column.line(content::EMPTY_BODY, to_term(palette::SKY))?;
        return column.line(&format!("[Enter] {}", content::EMPTY_ACTION), to_term(palette::BLUSH));
    }

    for (index, project) in library.projects().iter().enumerate() {
        let marker = if index == app.library_cursor() { '>' } else { ' ' };
        let name = match library.draft() {
            Some(draft) if draft.id == project.id => format!("{}_", draft.name),
            _ => project.name.clone(),
        };
        let color = if index == app.library_cursor() { palette::BLUSH } else { palette::SAND };
        column.line(&format!("{} {:<40} {}", marker, name, project.date), to_term(color))?;
    }
    Ok(())
}

/// Title row above the viewer canvas
pub fn draw_viewer_header<W: Write>(writer: &mut W, x: u16, width: u16) -> io::Result<()> {
    let mut column = Column::new(writer, x, 1, width);
    column.bold(
        &format!("{} / {}  {}", content::DASHBOARD_TITLE, content::VIEWER_TITLE, content::VIEWER_HINT),
        to_term(palette::SAND),
    )
}

pub fn draw_layer_panel<W: Write>(
    writer: &mut W,
    app: &TerminalApp,
    height: u16,
) -> io::Result<()> {
    let viewer = &app.state().viewer;
    let mut column = Column::new(writer, 1, 2, LAYER_PANEL_WIDTH - 2);
    column.bold("Layers", to_term(palette::SAND))?;

    for (index, (depth, node)) in viewer.layers().rows().into_iter().enumerate() {
        if column.y >= height.saturating_sub(3) {
            break;
        }
        let cursor = if index == app.layer_cursor() { '>' } else { ' ' };
        let eye = if node.is_visible() { 'o' } else { '-' };
        let text = match node {
            LayerNode::Group { expanded, .. } => {
                let arrow = if *expanded { 'v' } else { '>' };
                format!("{}{} {} {}", cursor, arrow, eye, node.label())
            }
            LayerNode::Element { layer, .. } => {
                let lit = if viewer.highlights().is_highlighted(*layer) { '*' } else { ' ' };
                format!("{}{}{} {}{}", cursor, "  ".repeat(depth), eye, node.label(), lit)
            }
        };
        column.line(&text, to_term(palette::SKY))?;
    }
    Ok(())
}

pub fn draw_properties_panel<W: Write>(
    writer: &mut W,
    app: &TerminalApp,
    x: u16,
) -> io::Result<()> {
    let state = app.state();
    let mut column = Column::new(writer, x, 2, PROPERTIES_PANEL_WIDTH - 2);
    column.bold("Properties", to_term(palette::SAND))?;

    match state.viewer.selected() {
        Some(element) => {
            column.bold(element.name, to_term(palette::BLUSH))?;
            column.line(element.kind, to_term(palette::SKY))?;
            column.gap();
            column.line(&format!("Material: {}", element.material), to_term(palette::SAND))?;
            column.line("Dimensions", to_term(palette::SAND))?;
            column.line(&format!("  W {}", element.dimensions.width), to_term(palette::SKY))?;
            column.line(&format!("  H {}", element.dimensions.height), to_term(palette::SKY))?;
            column.line(&format!("  D {}", element.dimensions.depth), to_term(palette::SKY))?;
            column.line(&format!("Area: {}", element.area), to_term(palette::SAND))?;
            column.line(&format!("Volume: {}", element.volume), to_term(palette::SAND))?;
            column.paragraph(&format!("Notes: {}", element.notes), to_term(palette::SAND))?;
        }
        None => column.paragraph(content::NO_SELECTION, to_term(palette::SKY))?,
    }

    let lit: Vec<&str> = state
        .viewer
        .highlights()
        .iter()
        .filter(|(_, on)| *on)
        .map(|(layer, _)| layer.label())
        .collect();
    if !lit.is_empty() {
        column.gap();
        column.paragraph(&format!("Highlighted: {}", lit.join(", ")), to_term(palette::AMBER))?;
    }

    column.gap();
    if state.upload.is_processing() {
        column.line(content::PROCESSING_LABEL, to_term(palette::BLUSH))?;
        column.line(&progress_bar(state.upload.progress(), 20), to_term(palette::BLUSH))?;
    } else {
        column.line(&format!("[u] {}", content::UPLOAD_LABEL), to_term(palette::BLUSH))?;
    }
    column.gap();
    column.bold("Export Model", to_term(palette::SAND))?;
    for format in content::EXPORT_FORMATS {
        column.line(&format!("  Export as {}", format), Color::DarkGrey)?;
    }
    Ok(())
}

pub fn progress_bar(progress: u8, width: usize) -> String {
    let filled = (progress as usize * width) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        " ".repeat(width - filled),
        progress
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use viztwin_core::ViewerConfig;

    #[test]
    fn test_wrap() {
        let lines = wrap("Simply drag and drop your point cloud files.", 12);
        assert!(lines.iter().all(|l| l.chars().count() <= 12));
        assert_eq!(lines.join(" "), "Simply drag and drop your point cloud files.");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[          ] 0%");
        assert_eq!(progress_bar(50, 10), "[#####     ] 50%");
        assert_eq!(progress_bar(100, 10), "[##########] 100%");
    }

    #[test]
    fn test_properties_panel_lists_highlights() {
        let mut app = TerminalApp::new(ViewerConfig::default(), Page::Dashboard);
        for code in [KeyCode::Char('j'), KeyCode::Char('h')] {
            app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
        }
        let mut out = Vec::new();
        draw_properties_panel(&mut out, &app, 0).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Highlighted: Walls"));
        assert!(text.contains(content::NO_SELECTION.split(' ').next().unwrap()));
    }
}
