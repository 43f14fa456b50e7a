//! Low-resolution colour canvas with 2D primitives
//!
//! Shapes are given in arena pixels and scaled to the canvas size, so a circle
//! becomes an ellipse when the canvas aspect differs from the arena's.

use glam::Vec2;

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::sim::Rgb;

pub struct Canvas {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl Canvas {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![Rgb(0, 0, 0); w * h],
        }
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px = vec![Rgb(0, 0, 0); w * h];
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn clear(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    /// Canvas cells per arena pixel on each axis
    fn scale(&self) -> Vec2 {
        Vec2::new(self.w as f32 / ARENA_WIDTH, self.h as f32 / ARENA_HEIGHT)
    }

    /// Arena position of a cell's centre
    fn cell_center(&self, x: i32, y: i32) -> Vec2 {
        (Vec2::new(x as f32, y as f32) + 0.5) / self.scale()
    }

    /// Cell range covering an arena-space box
    fn cell_bounds(&self, min: Vec2, max: Vec2) -> (i32, i32, i32, i32) {
        let s = self.scale();
        (
            (min.x * s.x).floor() as i32,
            (min.y * s.y).floor() as i32,
            (max.x * s.x).ceil() as i32,
            (max.y * s.y).ceil() as i32,
        )
    }

    pub fn fill_rect(&mut self, pos: Vec2, size: Vec2, c: Rgb) {
        let (x0, y0, x1, y1) = self.cell_bounds(pos, pos + size);
        for y in y0..y1 {
            for x in x0..x1 {
                let p = self.cell_center(x, y);
                if p.x >= pos.x && p.x <= pos.x + size.x && p.y >= pos.y && p.y <= pos.y + size.y {
                    self.set(x, y, c);
                }
            }
        }
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, c: Rgb) {
        let (x0, y0, x1, y1) = self.cell_bounds(center - radius, center + radius);
        for y in y0..y1 {
            for x in x0..x1 {
                if self.cell_center(x, y).distance(center) <= radius {
                    self.set(x, y, c);
                }
            }
        }
    }

    /// Circle outline about one cell thick
    pub fn ring(&mut self, center: Vec2, radius: f32, c: Rgb) {
        let s = self.scale();
        let thickness = (1.0 / s.x).max(1.0 / s.y);
        let (x0, y0, x1, y1) = self.cell_bounds(center - radius, center + radius);
        for y in y0..y1 {
            for x in x0..x1 {
                let d = self.cell_center(x, y).distance(center);
                if d <= radius && d >= radius - thickness {
                    self.set(x, y, c);
                }
            }
        }
    }

    /// Darken everything, as a translucent black overlay would
    pub fn dim(&mut self, keep: f32) {
        let keep = keep.clamp(0.0, 1.0);
        for p in &mut self.px {
            *p = Rgb(
                (p.0 as f32 * keep) as u8,
                (p.1 as f32 * keep) as u8,
                (p.2 as f32 * keep) as u8,
            );
        }
    }
}
