/// Rendering layer — all terminal I/O lives here.
///
/// `TerminalSurface` maps arena coordinates onto terminal cells and queues
/// `crossterm` commands.  Nothing is written until `present` flushes.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Print},
    terminal,
    QueueableCommand,
};

use grid_shooter::entities::Rect;
use grid_shooter::render::{Color, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HINT: style::Color = style::Color::DarkGrey;

fn term_color(color: Color) -> style::Color {
    match color {
        Color::White => style::Color::White,
        Color::Yellow => style::Color::Yellow,
        Color::Red => style::Color::Red,
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    scale_x: f32,
    scale_y: f32,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, arena_width: f32, arena_height: f32, cols: u16, rows: u16) -> Self {
        let mut surface = Self { out, cols: 1, rows: 1, scale_x: 1.0, scale_y: 1.0 };
        surface.resize(arena_width, arena_height, cols, rows);
        surface
    }

    /// The last row is kept free for hints.
    pub fn resize(&mut self, arena_width: f32, arena_height: f32, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.saturating_sub(1).max(1);
        self.scale_x = self.cols as f32 / arena_width;
        self.scale_y = self.rows as f32 / arena_height;
    }

    /// Cell span `[start, end)` covering `from..to`, at least one cell wide.
    fn span(from: f32, to: f32, scale: f32, limit: u16) -> Option<(u16, u16)> {
        let start = (from * scale).floor().max(0.0);
        let end = (to * scale).ceil().max(start + 1.0).min(limit as f32);
        if start >= limit as f32 || end <= 0.0 {
            return None;
        }
        Some((start as u16, end as u16))
    }

    /// Print a dimmed line on the reserved bottom row.
    pub fn draw_hint(&mut self, text: &str) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(1, self.rows))?;
        self.out.queue(style::SetForegroundColor(C_HINT))?;
        self.out.queue(Print(text))?;
        Ok(())
    }

    /// Park the cursor and flush everything queued for this frame.
    pub fn present(&mut self) -> std::io::Result<()> {
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows))?;
        self.out.flush()
    }
}

impl<W: Write> Surface for TerminalSurface<W> {
    type Error = std::io::Error;

    fn clear(&mut self) -> std::io::Result<()> {
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> std::io::Result<()> {
        let Some((c0, c1)) = Self::span(rect.x, rect.right(), self.scale_x, self.cols) else {
            return Ok(());
        };
        let Some((r0, r1)) = Self::span(rect.y, rect.bottom(), self.scale_y, self.rows) else {
            return Ok(());
        };

        let line = "█".repeat((c1 - c0) as usize);
        self.out.queue(style::SetForegroundColor(term_color(color)))?;
        for row in r0..r1 {
            self.out.queue(cursor::MoveTo(c0, row))?;
            self.out.queue(Print(&line))?;
        }
        Ok(())
    }

    fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Color) -> std::io::Result<()> {
        let half = text.chars().count() as f32 / 2.0;
        let col = (x * self.scale_x - half).max(0.0) as u16;
        let row = ((y * self.scale_y) as u16).min(self.rows.saturating_sub(1));
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(term_color(color)))?;
        self.out.queue(Print(text))?;
        Ok(())
    }
}
