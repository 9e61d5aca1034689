use crossterm::{
    cursor::MoveTo,
    style::{Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use glam::IVec2;
use minifb::Window;
use std::io::{self, stdout, Write};

use super::rasterizer::fill_polygon;
use crate::core::Color;

/// Something polygons can be painted onto. Drawing order is painting order;
/// there is no depth test.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    /// Resets every pixel to the background.
    fn clear(&mut self);
    /// Fills a polygon without an outline.
    fn fill_polygon(&mut self, points: &[IVec2], color: Color);
}

/// Row-major pixel grid shared by both buffers.
#[derive(Debug, Clone)]
struct Pixels {
    width: usize,
    height: usize,
    data: Vec<Color>,
    background: Color,
}

impl Pixels {
    fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            width,
            height,
            data: vec![background; width * height],
            background,
        }
    }

    fn clear(&mut self) {
        self.data.fill(self.background);
    }

    fn fill_polygon(&mut self, points: &[IVec2], color: Color) {
        let (width, height) = (self.width, self.height);
        let data = &mut self.data;
        fill_polygon(points, width, height, |y, x0, x1| {
            data[y * width + x0..y * width + x1].fill(color);
        });
    }

    fn get(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.data[y * self.width + x])
    }
}

/// Window-mode target, presented through minifb.
pub struct FrameBuffer {
    pixels: Pixels,
    packed: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            pixels: Pixels::new(width, height, background),
            packed: vec![background.to_u32(); width * height],
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        self.pixels.get(x, y)
    }

    pub fn present_window(&mut self, window: &mut Window) -> io::Result<()> {
        for (dst, src) in self.packed.iter_mut().zip(&self.pixels.data) {
            *dst = src.to_u32();
        }
        window
            .update_with_buffer(&self.packed, self.pixels.width, self.pixels.height)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))
    }
}

impl Surface for FrameBuffer {
    fn width(&self) -> usize {
        self.pixels.width
    }

    fn height(&self) -> usize {
        self.pixels.height
    }

    fn clear(&mut self) {
        self.pixels.clear();
    }

    fn fill_polygon(&mut self, points: &[IVec2], color: Color) {
        self.pixels.fill_polygon(points, color);
    }
}

/// Terminal-mode target. Each character cell shows two vertically stacked
/// pixels using an upper half block, so `height` is twice the row count.
pub struct TermBuffer {
    pixels: Pixels,
}

const HALF_BLOCK: char = '▀';

impl TermBuffer {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            pixels: Pixels::new(width, height, background),
        }
    }

    /// Largest square canvas fitting a terminal of `cols` x `rows` cells.
    pub fn square_for_terminal(cols: u16, rows: u16) -> usize {
        (cols as usize).min(rows as usize * 2)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        self.pixels.get(x, y)
    }

    /// Writes the whole grid, only emitting color changes when they differ
    /// from the previous cell.
    pub fn present_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let rows = self.pixels.height.div_ceil(2);
        let mut last: Option<(Color, Color)> = None;

        for row in 0..rows {
            out.queue(MoveTo(0, row as u16))?;
            for x in 0..self.pixels.width {
                let top = self.pixels.get(x, row * 2).unwrap_or(self.pixels.background);
                let bottom = self
                    .pixels
                    .get(x, row * 2 + 1)
                    .unwrap_or(self.pixels.background);

                if last != Some((top, bottom)) {
                    out.queue(SetForegroundColor(top.to_crossterm_color()))?;
                    out.queue(SetBackgroundColor(bottom.to_crossterm_color()))?;
                    last = Some((top, bottom));
                }
                out.queue(Print(HALF_BLOCK))?;
            }
        }
        out.queue(ResetColor)?;
        out.flush()
    }

    pub fn present(&self) -> io::Result<()> {
        self.present_to(&mut stdout().lock())
    }
}

impl Surface for TermBuffer {
    fn width(&self) -> usize {
        self.pixels.width
    }

    fn height(&self) -> usize {
        self.pixels.height
    }

    fn clear(&mut self) {
        self.pixels.clear();
    }

    fn fill_polygon(&mut self, points: &[IVec2], color: Color) {
        self.pixels.fill_polygon(points, color);
    }
}

/// Surface that remembers what was asked of it.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub clears: usize,
    pub polygons: Vec<super::ScreenPolygon>,
}

#[cfg(test)]
impl Surface for RecordingSurface {
    fn width(&self) -> usize {
        600
    }

    fn height(&self) -> usize {
        600
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.polygons.clear();
    }

    fn fill_polygon(&mut self, points: &[IVec2], color: Color) {
        self.polygons.push(super::ScreenPolygon {
            points: points.to_vec(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<IVec2> {
        vec![
            IVec2::new(x0, y0),
            IVec2::new(x1, y0),
            IVec2::new(x1, y1),
            IVec2::new(x0, y1),
        ]
    }

    #[test]
    fn later_polygons_paint_over_earlier_ones() {
        let mut fb = FrameBuffer::new(8, 8, Color::WHITE);
        fb.fill_polygon(&square(0, 0, 6, 6), Color::RED);
        fb.fill_polygon(&square(2, 2, 8, 8), Color::BLUE);

        assert_eq!(fb.pixel(0, 0), Some(Color::RED));
        assert_eq!(fb.pixel(3, 3), Some(Color::BLUE));
        assert_eq!(fb.pixel(7, 0), Some(Color::WHITE));
        assert_eq!(fb.pixel(8, 0), None);
    }

    #[test]
    fn clear_restores_background() {
        let mut fb = FrameBuffer::new(4, 4, Color::WHITE);
        fb.fill_polygon(&square(0, 0, 4, 4), Color::GREEN);
        fb.clear();
        assert!((0..4).all(|x| fb.pixel(x, 3) == Some(Color::WHITE)));
    }

    #[test]
    fn terminal_canvas_is_square() {
        assert_eq!(TermBuffer::square_for_terminal(200, 50), 100);
        assert_eq!(TermBuffer::square_for_terminal(80, 50), 80);
    }

    #[test]
    fn terminal_present_emits_one_block_per_cell() {
        let mut tb = TermBuffer::new(3, 4, Color::BLACK);
        tb.fill_polygon(&square(0, 0, 3, 1), Color::RED);

        let mut out = Vec::new();
        tb.present_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches(HALF_BLOCK).count(), 6);
        assert_eq!(tb.pixel(1, 0), Some(Color::RED));
        assert_eq!(tb.pixel(1, 1), Some(Color::BLACK));
    }
}
