/// Rendering layer: all terminal I/O lives here.
///
/// World coordinates are scaled down onto a fixed-size play field; the
/// game itself only ever sees the `Surface` trait.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use log::warn;

use bug_crossing::compute::{BOTTOM_ROW_Y, ENEMY_WRAP_X, GOAL_ROW_Y, STEP_Y};
use bug_crossing::entities::{World, ENEMY_SPAWN_X, ENEMY_SPRITE, PLAYER_SPRITE};
use bug_crossing::error::Result;
use bug_crossing::render::{render_world, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_CROSSINGS: Color = Color::Yellow;
const C_HUD_COLLISIONS: Color = Color::Red;
const C_GOAL: Color = Color::Cyan;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Red;
const C_HINT: Color = Color::DarkGrey;

// ── World → cell mapping ──────────────────────────────────────────────────────

/// World units per terminal column.
const UNITS_PER_COL: f32 = 10.0;
/// Terminal rows between two player grid rows.
const ROWS_PER_STEP: i32 = 2;
/// Player grid rows above the bottom one (the goal is the last).
const GRID_STEPS: i32 = ((BOTTOM_ROW_Y - GOAL_ROW_Y) / STEP_Y) as i32;

/// First row of the play field (row 0 is the HUD, row 1 the top border).
const FIELD_TOP: u16 = 2;
const FIELD_ROWS: u16 = (GRID_STEPS * ROWS_PER_STEP) as u16 + 3;
/// Enough columns for an enemy from spawn to wrap, plus its sprite.
const FIELD_COLS: u16 = ((ENEMY_WRAP_X - ENEMY_SPAWN_X) / UNITS_PER_COL) as u16 + 4;

const FRAME_WIDTH: u16 = FIELD_COLS + 2;
const FRAME_HEIGHT: u16 = FIELD_TOP + FIELD_ROWS + 2;

fn to_col(x: f32) -> i32 {
    ((x - ENEMY_SPAWN_X) / UNITS_PER_COL).round() as i32 + 1
}

/// Snap y to the nearest player grid row.  Each enemy lane lies within
/// the collision padding of exactly one player row, so a bug shares a
/// terminal row with the player rows it can catch and no others.
fn to_row(y: f32) -> i32 {
    let steps_up = ((BOTTOM_ROW_Y - y) / STEP_Y).round() as i32;
    FIELD_TOP as i32 + 1 + (GRID_STEPS - steps_up) * ROWS_PER_STEP
}

/// The asset resolver: sprite id → glyph and colour.
fn resolve_sprite(sprite: &str) -> Option<(&'static str, Color)> {
    match sprite {
        ENEMY_SPRITE => Some(("<ж>", C_ENEMY)),
        PLAYER_SPRITE => Some(("☺", C_PLAYER)),
        _ => None,
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

struct TerminalSurface<'a, W: Write> {
    out: &'a mut W,
}

impl<W: Write> Surface for TerminalSurface<'_, W> {
    fn draw_image(&mut self, sprite: &str, x: f32, y: f32) -> Result<()> {
        let Some((glyph, color)) = resolve_sprite(sprite) else {
            warn!("no glyph for sprite {:?}", sprite);
            return Ok(());
        };

        let row = to_row(y);
        if row < FIELD_TOP as i32 || row >= (FIELD_TOP + FIELD_ROWS) as i32 {
            return Ok(());
        }

        // Centre the glyph on x and clip it to the field's side walls.
        let width = glyph.chars().count() as i32;
        let left = to_col(x) - width / 2;
        let visible: String = glyph
            .chars()
            .enumerate()
            .filter(|(i, _)| {
                let col = left + *i as i32;
                col >= 1 && col <= FIELD_COLS as i32
            })
            .map(|(_, c)| c)
            .collect();
        if visible.is_empty() {
            return Ok(());
        }

        self.out.queue(cursor::MoveTo(left.max(1) as u16, row as u16))?;
        self.out.queue(style::SetForegroundColor(color))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, world: &World) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_border(out)?;
    draw_goal_row(out)?;
    draw_hud(out, world)?;

    render_world(&mut TerminalSurface { out: &mut *out }, world)?;

    draw_controls_hint(out)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, FRAME_HEIGHT))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W) -> Result<()> {
    let inner = "─".repeat(FIELD_COLS as usize);

    out.queue(style::SetForegroundColor(C_BORDER))?;

    out.queue(cursor::MoveTo(0, FIELD_TOP - 1))?;
    out.queue(Print(format!("┌{}┐", inner)))?;

    out.queue(cursor::MoveTo(0, FIELD_TOP + FIELD_ROWS))?;
    out.queue(Print(format!("└{}┘", inner)))?;

    for row in FIELD_TOP..FIELD_TOP + FIELD_ROWS {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(FRAME_WIDTH - 1, row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

fn draw_goal_row<W: Write>(out: &mut W) -> Result<()> {
    let row = to_row(GOAL_ROW_Y) as u16;
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(style::SetForegroundColor(C_GOAL))?;
    out.queue(Print("~".repeat(FIELD_COLS as usize)))?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, world: &World) -> Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_CROSSINGS))?;
    out.queue(Print(format!("Crossings:{:>4}", world.crossings)))?;

    let hits = format!("Hits:{:>4}", world.collisions);
    let rx = FRAME_WIDTH.saturating_sub(hits.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_COLLISIONS))?;
    out.queue(Print(hits))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W) -> Result<()> {
    out.queue(cursor::MoveTo(1, FRAME_HEIGHT - 1))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← ↑ → ↓ : Move   Q : Quit"))?;
    Ok(())
}
