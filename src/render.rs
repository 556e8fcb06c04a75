//! Rendering layer - all terminal drawing lives here
//!
//! The simulation runs in a fixed 800x600 world; this module projects world
//! boxes onto whatever cell grid the terminal currently has. No game logic
//! is performed, only translation of state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::consts::*;
use crate::sim::{Aabb, BonusKind, GamePhase, GameState, ObstacleKind, PowerUpKind, WindKind};

// --- Colour palette ----------------------------------------------------------

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_COMBO: Color = Color::Magenta;
const C_HUD_EFFECT: Color = Color::Cyan;
const C_PLANE: Color = Color::White;
const C_OBSTACLE_STATIC: Color = Color::Red;
const C_OBSTACLE_OSC: Color = Color::DarkYellow;
const C_OBSTACLE_ROT: Color = Color::Magenta;
const C_WIND: Color = Color::DarkCyan;
const C_POWER_SHIELD: Color = Color::Cyan;
const C_POWER_SPEED: Color = Color::Yellow;
const C_POWER_SLOW: Color = Color::Blue;
const C_BONUS_COIN: Color = Color::Yellow;
const C_BONUS_STAR: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;

/// Terminal viewport: projects world space onto the cell grid.
///
/// Layout: row 0 HUD, row 1 top border, bottom-2 border, bottom-1 key hints;
/// everything between is the play field.
pub struct Screen {
    cols: u16,
    rows: u16,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
    }

    fn field_cols(&self) -> u16 {
        self.cols.saturating_sub(2).max(1)
    }

    fn field_rows(&self) -> u16 {
        self.rows.saturating_sub(4).max(1)
    }

    /// World point to cell coordinates (unclipped)
    fn project(&self, x: f32, y: f32) -> (i32, i32) {
        let col = 1.0 + x / WORLD_WIDTH * self.field_cols() as f32;
        let row = 2.0 + y / WORLD_HEIGHT * self.field_rows() as f32;
        (col as i32, row as i32)
    }

    /// World box to an inclusive cell range, clipped to the play field.
    /// Returns None when the box projects entirely outside it.
    fn project_rect(&self, rect: &Aabb) -> Option<(u16, u16, u16, u16)> {
        let (x0, y0) = self.project(rect.left(), rect.top());
        let (x1, y1) = self.project(rect.right(), rect.bottom());

        let min_col = 1i32;
        let max_col = self.field_cols() as i32;
        let min_row = 2i32;
        let max_row = 1 + self.field_rows() as i32;

        let x0 = x0.max(min_col);
        let x1 = (x1 - 1).min(max_col).max(x0);
        let y0 = y0.max(min_row);
        let y1 = (y1 - 1).min(max_row).max(y0);

        if x0 > max_col || x1 < min_col || y0 > max_row || y1 < min_row {
            return None;
        }
        Some((x0 as u16, x1 as u16, y0 as u16, y1 as u16))
    }

    /// Render one complete frame
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        state: &GameState,
        best: u32,
        show_frames: bool,
    ) -> std::io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        self.draw_border(out)?;
        self.draw_hud(out, state, best, show_frames)?;

        for wind in &state.winds {
            self.draw_wind(out, &wind.rect, wind.kind)?;
        }
        for obstacle in &state.obstacles {
            self.draw_obstacle(out, &obstacle.rect, &obstacle.kind)?;
        }
        for power_up in &state.power_ups {
            self.draw_power_up(out, &power_up.rect, power_up.kind)?;
        }
        for bonus in &state.bonus_items {
            self.draw_bonus(out, &bonus.rect, bonus.kind)?;
        }

        self.draw_plane(out, state)?;
        self.draw_hints(out, state)?;

        match state.phase {
            GamePhase::Paused => self.draw_center_banner(out, "*  PAUSED  *", Color::Yellow)?,
            GamePhase::GameOver => self.draw_center_banner(out, "*  GAME OVER  *", Color::Red)?,
            GamePhase::Playing => {}
        }

        // Park cursor in a harmless spot and flush
        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        out.flush()?;
        Ok(())
    }

    // --- Pieces --------------------------------------------------------------

    fn draw_border<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let w = self.cols as usize;
        out.queue(style::SetForegroundColor(C_BORDER))?;

        out.queue(cursor::MoveTo(0, 1))?;
        out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

        out.queue(cursor::MoveTo(0, self.rows.saturating_sub(2)))?;
        out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

        for row in 2..self.rows.saturating_sub(2) {
            out.queue(cursor::MoveTo(0, row))?;
            out.queue(Print("│"))?;
            out.queue(cursor::MoveTo(self.cols.saturating_sub(1), row))?;
            out.queue(Print("│"))?;
        }
        Ok(())
    }

    fn draw_hud<W: Write>(
        &self,
        out: &mut W,
        state: &GameState,
        best: u32,
        show_frames: bool,
    ) -> std::io::Result<()> {
        out.queue(cursor::MoveTo(1, 0))?;
        out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        if best > 0 {
            out.queue(Print(format!("Score:{:>7}  Best:{:>7}", state.score, best)))?;
        } else {
            out.queue(Print(format!("Score:{:>7}", state.score)))?;
        }

        // Multiplier tag - centre
        if state.multiplier > 1.0 {
            let frames_left = state.multiplier_expires_at.saturating_sub(state.frame);
            let tag = format!("[x{} {:>2}s]", state.multiplier, frames_left * FRAME_MS / 1000 + 1);
            let cx = (self.cols / 2).saturating_sub(tag.chars().count() as u16 / 2);
            out.queue(cursor::MoveTo(cx, 0))?;
            out.queue(style::SetForegroundColor(C_HUD_COMBO))?;
            out.queue(Print(tag))?;
        }

        // Active effect timers - right side
        let mut tags = String::new();
        let secs = |frames: u32| frames as u64 * FRAME_MS / 1000 + 1;
        if state.effects.shield_frames > 0 {
            tags.push_str(&format!("[SHIELD {:>2}s]", secs(state.effects.shield_frames)));
        }
        if state.effects.boost_frames > 0 {
            tags.push_str(&format!("[SPEED {:>2}s]", secs(state.effects.boost_frames)));
        }
        if state.effects.slow_frames > 0 {
            tags.push_str(&format!("[SLOW {:>2}s]", secs(state.effects.slow_frames)));
        }
        if show_frames {
            tags.push_str(&format!(" f{}", state.frame));
        }
        if !tags.is_empty() {
            let rx = self.cols.saturating_sub(tags.chars().count() as u16 + 1);
            out.queue(cursor::MoveTo(rx, 0))?;
            out.queue(style::SetForegroundColor(C_HUD_EFFECT))?;
            out.queue(Print(tags))?;
        }
        Ok(())
    }

    fn fill_rect<W: Write>(
        &self,
        out: &mut W,
        span: (u16, u16, u16, u16),
        glyph: char,
        color: Color,
    ) -> std::io::Result<()> {
        let (x0, x1, y0, y1) = span;
        out.queue(style::SetForegroundColor(color))?;
        let line: String = std::iter::repeat(glyph)
            .take((x1 - x0 + 1) as usize)
            .collect();
        for row in y0..=y1 {
            out.queue(cursor::MoveTo(x0, row))?;
            out.queue(Print(&line))?;
        }
        Ok(())
    }

    fn draw_obstacle<W: Write>(
        &self,
        out: &mut W,
        rect: &Aabb,
        kind: &ObstacleKind,
    ) -> std::io::Result<()> {
        let Some(span) = self.project_rect(rect) else {
            return Ok(());
        };
        let (glyph, color) = match kind {
            ObstacleKind::Static => ('█', C_OBSTACLE_STATIC),
            ObstacleKind::Oscillating { .. } => ('▓', C_OBSTACLE_OSC),
            ObstacleKind::Rotating { angle, .. } => {
                // Quantize the angle to a spinning bar
                let glyph = ['|', '/', '-', '\\'][((angle / 45.0) as usize) % 4];
                (glyph, C_OBSTACLE_ROT)
            }
        };
        self.fill_rect(out, span, glyph, color)
    }

    fn draw_wind<W: Write>(&self, out: &mut W, rect: &Aabb, kind: WindKind) -> std::io::Result<()> {
        let Some(span) = self.project_rect(rect) else {
            return Ok(());
        };
        let glyph = match kind {
            WindKind::Updraft => '↑',
            WindKind::Downdraft => '↓',
        };
        self.fill_rect(out, span, glyph, C_WIND)
    }

    fn draw_power_up<W: Write>(
        &self,
        out: &mut W,
        rect: &Aabb,
        kind: PowerUpKind,
    ) -> std::io::Result<()> {
        let Some((x0, _, y0, _)) = self.project_rect(rect) else {
            return Ok(());
        };
        let (glyph, color) = match kind {
            PowerUpKind::Shield => ('◈', C_POWER_SHIELD),
            PowerUpKind::Speed => ('»', C_POWER_SPEED),
            PowerUpKind::Slow => ('❅', C_POWER_SLOW),
        };
        out.queue(style::SetForegroundColor(color))?;
        out.queue(cursor::MoveTo(x0, y0))?;
        out.queue(Print(glyph))?;
        Ok(())
    }

    fn draw_bonus<W: Write>(&self, out: &mut W, rect: &Aabb, kind: BonusKind) -> std::io::Result<()> {
        let Some((x0, _, y0, _)) = self.project_rect(rect) else {
            return Ok(());
        };
        let (glyph, color) = match kind {
            BonusKind::Coin => ('●', C_BONUS_COIN),
            BonusKind::Star => ('★', C_BONUS_STAR),
        };
        out.queue(style::SetForegroundColor(color))?;
        out.queue(cursor::MoveTo(x0, y0))?;
        out.queue(Print(glyph))?;
        Ok(())
    }

    fn draw_plane<W: Write>(&self, out: &mut W, state: &GameState) -> std::io::Result<()> {
        let Some((x0, x1, y0, _)) = self.project_rect(&state.plane.rect) else {
            return Ok(());
        };
        // Fuselage with a nose cone; shield tint while invincible
        let color = if state.effects.shield_active() {
            C_POWER_SHIELD
        } else {
            C_PLANE
        };
        out.queue(style::SetForegroundColor(color))?;
        out.queue(cursor::MoveTo(x0, y0))?;
        let body_len = (x1 - x0) as usize;
        out.queue(Print(format!("{}▶", "═".repeat(body_len))))?;
        Ok(())
    }

    fn draw_hints<W: Write>(&self, out: &mut W, state: &GameState) -> std::io::Result<()> {
        let hint = match state.phase {
            GamePhase::GameOver => "R : retry   M : menu   Q : quit",
            _ => "SPACE (hold) : climb   P : pause   Q : quit",
        };
        out.queue(cursor::MoveTo(1, self.rows.saturating_sub(1)))?;
        out.queue(style::SetForegroundColor(C_HINT))?;
        out.queue(Print(hint))?;
        Ok(())
    }

    fn draw_center_banner<W: Write>(
        &self,
        out: &mut W,
        text: &str,
        color: Color,
    ) -> std::io::Result<()> {
        let cx = (self.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
        let cy = self.rows / 2;
        out.queue(cursor::MoveTo(cx, cy))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
        Ok(())
    }
}
