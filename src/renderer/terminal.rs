//! Half-block terminal output with crossterm

use std::io::{self, Write};

use crossterm::style::{self, Attribute, Color};
use crossterm::{cursor, queue};

use super::{Canvas, Presenter, scene};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::hud::{self, Align, Overlay};
use crate::sim::{Game, Rgb};

fn color(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

/// Renders the game into a terminal of `cols` x `rows` cells
pub struct TerminalRenderer<W: Write> {
    out: W,
    canvas: Canvas,
    cols: u16,
    rows: u16,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, cols: u16, rows: u16) -> Self {
        Self {
            out,
            canvas: Canvas::new(cols as usize, rows as usize * 2),
            cols,
            rows,
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        self.canvas.resize(cols as usize, rows as usize * 2);
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn write_canvas(&mut self) -> io::Result<()> {
        let out = &mut self.out;
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.canvas.height() / 2;
        let mut prev_fg = None;
        let mut prev_bg = None;

        for row in 0..rows {
            for col in 0..self.canvas.width() {
                let top = self.canvas.get(col, row * 2);
                let bot = self.canvas.get(col, row * 2 + 1);

                if top == bot {
                    if prev_bg != Some(top) {
                        queue!(out, style::SetBackgroundColor(color(top)))?;
                        prev_bg = Some(top);
                    }
                    queue!(out, style::Print(' '))?;
                } else {
                    if prev_fg != Some(top) {
                        queue!(out, style::SetForegroundColor(color(top)))?;
                        prev_fg = Some(top);
                    }
                    if prev_bg != Some(bot) {
                        queue!(out, style::SetBackgroundColor(color(bot)))?;
                        prev_bg = Some(bot);
                    }
                    queue!(out, style::Print('\u{2580}'))?; // ▀
                }
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
                prev_fg = None;
                prev_bg = None;
            }
        }
        queue!(out, style::ResetColor)
    }

    /// Cell where an overlay's first character goes, if it is on screen
    fn place(&self, overlay: &Overlay) -> Option<(u16, u16)> {
        let row = (overlay.y / ARENA_HEIGHT * self.rows as f32) as i32;
        let len = overlay.text.chars().count() as i32;
        let col = match overlay.align {
            Align::Center => (self.cols as i32 - len) / 2,
            Align::At(x) => (x / ARENA_WIDTH * self.cols as f32) as i32,
        };
        if row < 0 || row >= self.rows as i32 {
            return None;
        }
        Some((col.clamp(0, self.cols as i32) as u16, row as u16))
    }

    fn write_overlay(&mut self, overlay: &Overlay) -> io::Result<()> {
        let Some((col, row)) = self.place(overlay) else {
            return Ok(());
        };
        let room = (self.cols - col) as usize;
        let text: String = overlay.text.chars().take(room).collect();
        if text.is_empty() {
            return Ok(());
        }
        let bg = self.canvas.get(col as usize, row as usize * 2 + 1);
        let out = &mut self.out;
        queue!(
            out,
            cursor::MoveTo(col, row),
            style::SetBackgroundColor(color(bg)),
            style::SetForegroundColor(color(overlay.color)),
        )?;
        if overlay.big {
            queue!(out, style::SetAttribute(Attribute::Bold))?;
        }
        queue!(
            out,
            style::Print(text),
            style::SetAttribute(Attribute::Reset),
            style::ResetColor
        )
    }
}

impl<W: Write> Presenter for TerminalRenderer<W> {
    fn present(&mut self, game: &Game, now: f64) -> io::Result<()> {
        if self.cols == 0 || self.rows == 0 {
            return Ok(());
        }
        scene::draw(&mut self.canvas, game, now);
        self.write_canvas()?;
        for overlay in hud::overlays(game, now) {
            self.write_overlay(&overlay)?;
        }
        self.out.flush()
    }
}
