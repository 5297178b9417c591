/// ASCII rasterizer for viewer frames
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::{self, Write};
use viztwin_core::scene::{DrawCommand, Frame, Surface};

/// Fill characters by coverage strength (faint to solid)
const FILL_RAMP: &[char] = &['.', ':', '=', '#', '@'];
const EDGE_CHAR: char = '+';
const GRID_CHAR: char = '·';

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    color: Color,
}

const BLANK: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

/// Rasterizes frames into a character grid covering a region of the
/// terminal. Commands are painted in frame order, later ones on top.
pub struct AsciiRenderer {
    origin: (u16, u16),
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            origin: (0, 0),
            width,
            height,
            cells: vec![BLANK; width * height],
        }
    }

    /// Place the viewer at `origin` with the given size in cells
    pub fn resize(&mut self, origin: (u16, u16), width: usize, height: usize) {
        self.origin = origin;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.cells = vec![BLANK; width * height];
        }
    }

    pub fn origin(&self) -> (u16, u16) {
        self.origin
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Does the terminal cell fall inside the viewer area
    pub fn contains(&self, column: u16, row: u16) -> bool {
        let (x0, y0) = self.origin;
        column >= x0
            && row >= y0
            && ((column - x0) as usize) < self.width
            && ((row - y0) as usize) < self.height
    }

    /// Map a terminal cell to canvas pixels (cell centers)
    pub fn to_canvas(&self, column: u16, row: u16, canvas: (f64, f64)) -> (f64, f64) {
        let (x0, y0) = self.origin;
        let cx = (column.saturating_sub(x0) as f64 + 0.5) * canvas.0 / self.width.max(1) as f64;
        let cy = (row.saturating_sub(y0) as f64 + 0.5) * canvas.1 / self.height.max(1) as f64;
        (cx, cy)
    }

    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = BLANK;
        }
    }

    fn scale(&self, frame: &Frame) -> (f32, f32) {
        (
            self.width as f32 / frame.viewport.width as f32,
            self.height as f32 / frame.viewport.height as f32,
        )
    }

    fn rasterize(&mut self, frame: &Frame) {
        self.clear();
        if self.width == 0 || self.height == 0 {
            return;
        }
        let (sx, sy) = self.scale(frame);

        let grid_color = to_term(frame.grid.color);
        for x in frame.grid.columns(&frame.viewport) {
            let column = (x as f32 * sx) as usize;
            for row in 0..self.height {
                self.put(column, row, GRID_CHAR, grid_color);
            }
        }
        for y in frame.grid.rows(&frame.viewport) {
            let row = (y as f32 * sy) as usize;
            for column in 0..self.width {
                self.put(column, row, GRID_CHAR, grid_color);
            }
        }

        for command in &frame.commands {
            self.render_command(command, sx, sy);
        }
    }

    fn render_command(&mut self, command: &DrawCommand, sx: f32, sy: f32) {
        let points: Vec<(f32, f32)> = command
            .shape
            .outline()
            .iter()
            .map(|p| (p.x as f32 * sx, p.y as f32 * sy))
            .collect();
        if points.len() < 3 {
            return;
        }

        if let Some(fill) = command.fill {
            let strength = if command.highlighted { fill.alpha + 0.2 } else { fill.alpha };
            let index = (strength as f32 * (FILL_RAMP.len() - 1) as f32).round() as usize;
            let character = FILL_RAMP[index.min(FILL_RAMP.len() - 1)];
            let color = to_term(fill.color);
            // fan triangulation; outlines are convex
            for i in 1..points.len() - 1 {
                self.rasterize_triangle(&[points[0], points[i], points[i + 1]], character, color);
            }
        }

        if let Some(stroke) = command.stroke {
            let color = to_term(stroke.color);
            for i in 0..points.len() {
                let (a, b) = (points[i], points[(i + 1) % points.len()]);
                self.draw_line(a, b, EDGE_CHAR, color);
            }
        }
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32); 3], character: char, color: Color) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box, clipped to the viewer
        let min_x = v0.0.min(v1.0).min(v2.0).floor().max(0.0) as i32;
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = v0.1.min(v1.1).min(v2.1).floor().max(0.0) as i32;
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                if let Some((w0, w1, w2)) = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), p) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        self.put(x as usize, y as usize, character, color);
                    }
                }
            }
        }
    }

    /// Bresenham between two points in cell space
    fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), character: char, color: Color) {
        let (mut x0, mut y0) = (from.0.floor() as i32, from.1.floor() as i32);
        let (x1, y1) = (to.0.floor() as i32, to.1.floor() as i32);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            if x0 >= 0 && y0 >= 0 {
                self.put(x0 as usize, y0 as usize, character, color);
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += step_x;
            }
            if e2 <= dx {
                err += dx;
                y0 += step_y;
            }
        }
    }

    fn put(&mut self, x: usize, y: usize, ch: char, color: Color) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = Cell { ch, color };
        }
    }

    /// Character at a cell, for inspection
    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x].ch)
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let (x0, y0) = self.origin;
        for y in 0..self.height {
            writer.queue(cursor::MoveTo(x0, y0 + y as u16))?;
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                writer.queue(SetForegroundColor(cell.color))?;
                writer.queue(Print(cell.ch))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for AsciiRenderer {
    type Error = io::Error;

    /// Rasterize only; `draw` writes the cells out with the rest of the page
    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        self.rasterize(frame);
        Ok(())
    }
}

pub fn to_term(color: viztwin_core::Color) -> Color {
    Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use viztwin_core::Viewer;

    #[test]
    fn test_barycentric_inside() {
        let (w0, w1, w2) = barycentric((0.0, 0.0), (4.0, 0.0), (0.0, 4.0), (1.0, 1.0)).unwrap();
        assert!(w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0);
        assert!((w0 + w1 + w2 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_triangle() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (1.0, 1.0)).is_none());
    }

    #[test]
    fn test_canvas_mapping() {
        let mut renderer = AsciiRenderer::new(100, 35);
        renderer.resize((10, 2), 100, 35);
        assert!(renderer.contains(10, 2));
        assert!(!renderer.contains(110, 2));
        assert!(!renderer.contains(9, 2));
        let (x, y) = renderer.to_canvas(60, 19, (1000.0, 700.0));
        assert!((x - 505.0).abs() < 1e-9);
        assert!((y - 350.0).abs() < 1e-9);
    }

    #[test]
    fn test_door_lands_below_center() {
        let viewer = Viewer::default();
        let mut renderer = AsciiRenderer::new(100, 70);
        viewer.render(&mut renderer).unwrap();
        // the door covers canvas (470..530, 400..480), cells (47..53, 40..48)
        let ch = renderer.char_at(50, 44).unwrap();
        assert!(FILL_RAMP.contains(&ch) || ch == EDGE_CHAR);
    }
}
