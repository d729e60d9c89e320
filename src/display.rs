//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable snapshot of the
//! game.  No game logic is performed; this module only translates logical
//! pixels into terminal cells and cells into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use bubble_laser::entities::{Bubble, Snapshot};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TIME: Color = Color::Cyan;
const C_HUD_TIME_LOW: Color = Color::Red;
const C_BUBBLE: Color = Color::Blue;
const C_GUN: Color = Color::White;
const C_LASER: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

/// Seconds left at which the clock turns red.
const TIME_WARNING: u32 = 10;

/// How logical pixels map onto the terminal, and what a bubble looks like.
#[derive(Clone, Debug)]
pub struct Viewport {
    /// Pixels per column.
    pub cell_width: f32,
    /// Pixels per row.
    pub cell_height: f32,
    pub glyph: String,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// The playfield sits below the HUD row.
    const TOP: u16 = 1;

    pub fn playfield_width(&self) -> f32 {
        self.cols as f32 * self.cell_width
    }

    pub fn playfield_height(&self) -> f32 {
        self.rows.saturating_sub(Self::TOP) as f32 * self.cell_height
    }

    /// Pixel x at the centre of terminal column `col`.
    pub fn col_to_x(&self, col: u16) -> f32 {
        (col as f32 + 0.5) * self.cell_width
    }

    fn x_to_col(&self, x: f32) -> Option<u16> {
        let col = (x / self.cell_width).floor();
        (col >= 0.0 && col < self.cols as f32).then_some(col as u16)
    }

    fn y_to_row(&self, y: f32) -> Option<u16> {
        let row = (y / self.cell_height).floor() + Self::TOP as f32;
        (row >= Self::TOP as f32 && row < self.rows as f32).then_some(row as u16)
    }

    fn gun_row(&self) -> u16 {
        self.rows.saturating_sub(1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if snap.laser_visible {
        draw_laser(out, snap, view)?;
    }
    for bubble in &snap.bubbles {
        draw_bubble(out, bubble, view)?;
    }
    draw_gun(out, snap, view)?;
    draw_hud(out, snap, view)?;

    if !snap.started {
        draw_overlay(out, view, &["BUBBLE LASER", "", "ENTER - Start   Q - Quit"])?;
    } else if snap.over {
        let score_line = format!("Final Score: {}", snap.score);
        draw_overlay(
            out,
            view,
            &["TIME'S UP", score_line.as_str(), "", "ENTER - Play Again   R - Reset   Q - Quit"],
        )?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score:{:>5}", snap.score)))?;

    let time_str = format!("Time: {:>3}s", snap.time_remaining);
    let time_color = if snap.started && snap.time_remaining <= TIME_WARNING {
        C_HUD_TIME_LOW
    } else {
        C_HUD_TIME
    };
    let tx = view.cols.saturating_sub(time_str.len() as u16 + 1);
    out.queue(cursor::MoveTo(tx, 0))?;
    out.queue(style::SetForegroundColor(time_color))?;
    out.queue(Print(&time_str))?;

    let hint = "drag: aim  tap: fire";
    let hx = (view.cols / 2).saturating_sub(hint.len() as u16 / 2);
    out.queue(cursor::MoveTo(hx, 0))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// A bubble is drawn as its glyph at the cell holding its centre.
fn draw_bubble<W: Write>(out: &mut W, bubble: &Bubble, view: &Viewport) -> std::io::Result<()> {
    let cx = view.x_to_col(bubble.center_x());
    let cy = view.y_to_row(bubble.y + bubble.radius);
    if let (Some(col), Some(row)) = (cx, cy) {
        // The gun row belongs to the gun.
        if row < view.gun_row() {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_BUBBLE))?;
            out.queue(Print(&view.glyph))?;
        }
    }
    Ok(())
}

fn draw_gun<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    let first = view.x_to_col(snap.gun_position_x).unwrap_or(0);
    let cells = ((snap.gun_width / view.cell_width).round() as u16).max(1);
    let cells = cells.min(view.cols.saturating_sub(first));

    out.queue(cursor::MoveTo(first, view.gun_row()))?;
    out.queue(style::SetForegroundColor(C_GUN))?;
    out.queue(Print("▀".repeat(cells as usize)))?;
    Ok(())
}

fn draw_laser<W: Write>(out: &mut W, snap: &Snapshot, view: &Viewport) -> std::io::Result<()> {
    let Some(col) = view.x_to_col(snap.gun_position_x + snap.gun_width / 2.0) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(C_LASER))?;
    for row in Viewport::TOP..view.gun_row() {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_overlay<W: Write>(out: &mut W, view: &Viewport, lines: &[&str]) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, line) in lines.iter().enumerate() {
        let color = if i == 0 { Color::Yellow } else { Color::White };
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}
