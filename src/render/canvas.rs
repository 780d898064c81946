use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;

use super::Surface;
use crate::map::{Bounds, Vec2};

/// Pixel size of one terminal cell; 80x50 cells cover the 800x600 viewport.
pub const CELL_WIDTH: f32 = 10.0;
pub const CELL_HEIGHT: f32 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub glyph: u16,
    pub fg: RGB,
    pub bg: RGB,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: b' ' as u16,
            fg: RGB::named(WHITE),
            bg: RGB::named(BLACK),
        }
    }
}

/// A pixel-addressed drawing surface that resolves to terminal cells.
#[derive(Clone, Debug)]
pub struct CellCanvas {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
    offset: Vec2,
    saved: Vec<Vec2>,
}

impl CellCanvas {
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width * height) as usize],
            offset: Vec2::ZERO,
            saved: Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
        self.offset = Vec2::ZERO;
        self.saved.clear();
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cell(&self, at: Point) -> Option<&Cell> {
        self.index(at).map(|idx| &self.cells[idx])
    }

    /// Cell under a pixel position, after the current translation.
    pub fn cell_at(&self, pixel: Vec2) -> Point {
        Point::new(
            ((pixel.x + self.offset.x) / CELL_WIDTH).floor() as i32,
            ((pixel.y + self.offset.y) / CELL_HEIGHT).floor() as i32,
        )
    }

    fn index(&self, at: Point) -> Option<usize> {
        if at.x < 0 || at.y < 0 || at.x >= self.width || at.y >= self.height {
            None
        } else {
            Some((at.y * self.width + at.x) as usize)
        }
    }

    /// Cells whose area overlaps `rect`, after the current translation.
    fn covered(&self, rect: Bounds) -> impl Iterator<Item = usize> + '_ {
        let left = ((rect.x + self.offset.x) / CELL_WIDTH).floor() as i32;
        let top = ((rect.y + self.offset.y) / CELL_HEIGHT).floor() as i32;
        let right = ((rect.right() + self.offset.x) / CELL_WIDTH).ceil() as i32;
        let bottom = ((rect.bottom() + self.offset.y) / CELL_HEIGHT).ceil() as i32;
        let (x0, x1) = (left.max(0), right.max(left + 1).min(self.width));
        let (y0, y1) = (top.max(0), bottom.max(top + 1).min(self.height));
        (y0..y1).flat_map(move |y| (x0..x1).map(move |x| (y * self.width + x) as usize))
    }

    pub fn flush(&self, ctx: &mut BTerm) {
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = &self.cells[(y * self.width + x) as usize];
                ctx.set(x, y, cell.fg, cell.bg, cell.glyph);
            }
        }
    }
}

impl Surface for CellCanvas {
    fn size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * CELL_WIDTH,
            self.height as f32 * CELL_HEIGHT,
        )
    }

    fn save(&mut self) {
        self.saved.push(self.offset);
    }

    fn restore(&mut self) {
        if let Some(offset) = self.saved.pop() {
            self.offset = offset;
        }
    }

    fn translate(&mut self, by: Vec2) {
        self.offset = self.offset + by;
    }

    fn fill_rect(&mut self, rect: Bounds, color: RGB, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let covered: Vec<usize> = self.covered(rect).collect();
        for idx in covered {
            let cell = &mut self.cells[idx];
            cell.bg = cell.bg.lerp(color, alpha);
            cell.fg = cell.fg.lerp(color, alpha);
            if alpha >= 1.0 {
                cell.glyph = b' ' as u16;
            }
        }
    }

    fn stamp(&mut self, rect: Bounds, glyph: u16, color: RGB, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let covered: Vec<usize> = self.covered(rect).collect();
        for idx in covered {
            let cell = &mut self.cells[idx];
            cell.fg = cell.fg.lerp(color, alpha);
            if alpha >= 0.5 {
                cell.glyph = glyph;
            }
        }
    }

    fn text(&mut self, at: Vec2, text: &str, color: RGB) {
        let start = self.cell_at(at);
        for (i, ch) in text.chars().enumerate() {
            if let Some(idx) = self.index(Point::new(start.x + i as i32, start.y)) {
                let cell = &mut self.cells[idx];
                cell.glyph = to_cp437(ch);
                cell.fg = color;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_covers_overlapping_cells() {
        let mut canvas = CellCanvas::new(8, 4);
        canvas.fill_rect(Bounds::new(5.0, 0.0, 10.0, 12.0), RGB::named(RED), 1.0);
        assert_eq!(canvas.cell(Point::new(0, 0)).map(|c| c.bg), Some(RGB::named(RED)));
        assert_eq!(canvas.cell(Point::new(1, 0)).map(|c| c.bg), Some(RGB::named(RED)));
        assert_eq!(canvas.cell(Point::new(2, 0)).map(|c| c.bg), Some(RGB::named(BLACK)));
        assert_eq!(canvas.cell(Point::new(0, 1)).map(|c| c.bg), Some(RGB::named(BLACK)));
    }

    #[test]
    fn test_translation_is_saved_and_restored() {
        let mut canvas = CellCanvas::new(8, 4);
        canvas.save();
        canvas.translate(Vec2::new(20.0, 12.0));
        canvas.stamp(Bounds::new(0.0, 0.0, 1.0, 1.0), to_cp437('@'), RGB::named(WHITE), 1.0);
        canvas.restore();
        canvas.stamp(Bounds::new(0.0, 0.0, 1.0, 1.0), to_cp437('#'), RGB::named(WHITE), 1.0);
        assert_eq!(canvas.cell(Point::new(2, 1)).map(|c| c.glyph), Some(to_cp437('@')));
        assert_eq!(canvas.cell(Point::new(0, 0)).map(|c| c.glyph), Some(to_cp437('#')));
    }

    #[test]
    fn test_faint_stamp_keeps_glyph() {
        let mut canvas = CellCanvas::new(2, 2);
        canvas.text(Vec2::ZERO, "a", RGB::named(WHITE));
        canvas.stamp(Bounds::new(0.0, 0.0, 1.0, 1.0), to_cp437('x'), RGB::named(RED), 0.2);
        assert_eq!(canvas.cell(Point::new(0, 0)).map(|c| c.glyph), Some(to_cp437('a')));
    }

    #[test]
    fn test_offscreen_drawing_is_clipped() {
        let mut canvas = CellCanvas::new(4, 4);
        canvas.fill_rect(Bounds::new(-500.0, -500.0, 10.0, 10.0), RGB::named(RED), 1.0);
        canvas.text(Vec2::new(30.0, 0.0), "long text", RGB::named(RED));
        assert!((0..4).all(|x| canvas.cell(Point::new(x, 1)).map(|c| c.bg) == Some(RGB::named(BLACK))));
        assert_eq!(canvas.cell(Point::new(3, 0)).map(|c| c.glyph), Some(to_cp437('l')));
    }
}
