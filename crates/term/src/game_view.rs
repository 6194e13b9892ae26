//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested.

use crate::core::{GameSnapshot, PieceSnapshot, PlacementEvent};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{ColorId, PoolKind, SpecialKind};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Block colors by color id. Index 0 is the empty cell.
pub const PALETTE: [Rgb; 7] = [
    Rgb::BLACK,
    Rgb::new(120, 37, 179),
    Rgb::new(100, 179, 179),
    Rgb::new(80, 34, 22),
    Rgb::new(80, 134, 22),
    Rgb::new(180, 34, 22),
    Rgb::new(180, 34, 122),
];

const BOARD_BG: Rgb = Rgb::new(20, 20, 28);
const ROCKET_BODY: Rgb = Rgb::new(200, 200, 210);
const ROCKET_NOSE: Rgb = Rgb::new(230, 90, 40);
const FLASH: Rgb = Rgb::new(250, 250, 250);

pub fn palette_color(color: ColorId) -> Rgb {
    PALETTE
        .get(color as usize)
        .copied()
        .unwrap_or(Rgb::GRAY)
}

/// Terminal extent of `cells` board cells plus the frame, saturating at
/// `u16::MAX`.
fn board_extent(cells: usize, cell: u16) -> u16 {
    u16::try_from(cells)
        .unwrap_or(u16::MAX)
        .saturating_mul(cell)
        .saturating_add(2)
}

/// Renders the board, the falling piece, the side panel and overlays.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Where the board frame landed on screen.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// `flash` highlights the rows and columns emptied by the last placement.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        flash: Option<&PlacementEvent>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let w = board_extent(snap.width, self.cell_w);
        let h = board_extent(snap.height, self.cell_h);
        let layout = Layout {
            x: viewport.width.saturating_sub(w.saturating_add(18)) / 2,
            y: viewport.height.saturating_sub(h) / 2,
            w,
            h,
        };

        self.draw_border(fb, layout);

        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.cell(x, y) {
                    v if v > 0 => self.draw_block(fb, layout, x as i32, y as i32, v as ColorId),
                    _ => {
                        let style = Style::new(Rgb::new(70, 70, 80), BOARD_BG).dim();
                        self.fill_cell(fb, layout, x as i32, y as i32, '·', style);
                    }
                }
            }
        }

        if let Some(event) = flash {
            let style = Style::new(FLASH, BOARD_BG);
            // Scan positions repeat after a collapse; the i-th cleared row
            // sat `i` rows higher before the clear.
            for (i, &row) in event.cleared_rows.iter().enumerate() {
                let y = row as i32 - i as i32;
                for x in 0..snap.width {
                    self.fill_cell(fb, layout, x as i32, y, '▒', style);
                }
            }
            for &col in &event.wiped_columns {
                for y in 0..snap.height {
                    self.fill_cell(fb, layout, col as i32, y as i32, '░', style);
                }
            }
        }

        if let (Some(active), Some(ghost_y)) = (&snap.active, snap.ghost_y) {
            if !active.kind.is_special() {
                let style = Style::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
                for &(dx, dy) in &active.cells {
                    self.fill_cell(fb, layout, active.x + dx, ghost_y + dy, '░', style);
                }
            }
        }

        if let Some(active) = &snap.active {
            self.draw_piece(fb, layout, active, active.x, active.y);
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.game_over {
            self.draw_overlay(fb, layout, &["GAME OVER", "r: restart", "q: quit"]);
        } else if snap.paused {
            self.draw_overlay(fb, layout, &["PAUSED"]);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, None, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, l: Layout) {
        if l.w < 2 || l.h < 2 {
            return;
        }
        let style = Style::new(Rgb::new(200, 200, 200), Rgb::BLACK);
        fb.fill_rect(l.x + 1, l.y + 1, l.w - 2, l.h - 2, ' ', Style::new(Rgb::GRAY, BOARD_BG));
        fb.put_char(l.x, l.y, '┌', style);
        fb.put_char(l.x + l.w - 1, l.y, '┐', style);
        fb.put_char(l.x, l.y + l.h - 1, '└', style);
        fb.put_char(l.x + l.w - 1, l.y + l.h - 1, '┘', style);
        for dx in 1..l.w - 1 {
            fb.put_char(l.x + dx, l.y, '─', style);
            fb.put_char(l.x + dx, l.y + l.h - 1, '─', style);
        }
        for dy in 1..l.h - 1 {
            fb.put_char(l.x, l.y + dy, '│', style);
            fb.put_char(l.x + l.w - 1, l.y + dy, '│', style);
        }
    }

    fn draw_block(&self, fb: &mut FrameBuffer, l: Layout, x: i32, y: i32, color: ColorId) {
        let style = Style::new(palette_color(color), BOARD_BG).bold();
        self.fill_cell(fb, l, x, y, '█', style);
    }

    /// Draw a piece with its frame origin at board cell `(x, y)`.
    fn draw_piece(&self, fb: &mut FrameBuffer, l: Layout, piece: &PieceSnapshot, x: i32, y: i32) {
        match (piece.kind, piece.color) {
            (PoolKind::Special(SpecialKind::Rocket), _) => {
                for &(dx, dy) in &piece.cells {
                    let (ch, fg) = if dy == 0 { ('▲', ROCKET_NOSE) } else { ('█', ROCKET_BODY) };
                    self.fill_cell(fb, l, x + dx, y + dy, ch, Style::new(fg, BOARD_BG));
                }
            }
            (PoolKind::Standard(_), color) => {
                let color = color.unwrap_or(1);
                for &(dx, dy) in &piece.cells {
                    self.draw_block(fb, l, x + dx, y + dy, color);
                }
            }
        }
    }

    /// Fill one board cell; cells outside the board are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, l: Layout, x: i32, y: i32, ch: char, style: Style) {
        let cols = (l.w.saturating_sub(2) / self.cell_w) as i32;
        let rows = (l.h.saturating_sub(2) / self.cell_h) as i32;
        if x < 0 || y < 0 || x >= cols || y >= rows {
            return;
        }
        let px = l.x.saturating_add(1).saturating_add((x as u16).saturating_mul(self.cell_w));
        let py = l.y.saturating_add(1).saturating_add((y as u16).saturating_mul(self.cell_h));
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, l: Layout) {
        let panel_x = l.x.saturating_add(l.w).saturating_add(2);
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }
        let label = Style::new(Rgb::new(220, 220, 220), Rgb::BLACK).bold();
        let value = Style::new(Rgb::new(200, 200, 200), Rgb::BLACK);

        let mut y = l.y;
        for (name, v) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.display_level),
            ("LINES", snap.lines),
            ("BLOCKS", snap.blocks_placed),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, v, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "MODE", label);
        fb.put_str(panel_x, y + 1, snap.mode.as_str(), value);
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let Some(next) = &snap.next else {
            return;
        };
        if let Some(interval) = next.interval {
            let dim = value.dim();
            fb.put_str(panel_x, y, &format!("{} (every {}th)", next.kind.as_str(), interval), dim);
            y = y.saturating_add(1);
        }
        // Preview shares the board's cell size, anchored at the panel.
        let min_dy = next.cells.iter().map(|c| c.1).min().unwrap_or(0);
        for &(dx, dy) in &next.cells {
            let ch_style = match next.color {
                Some(color) => Style::new(palette_color(color), Rgb::BLACK).bold(),
                None if dy == min_dy => Style::new(ROCKET_NOSE, Rgb::BLACK),
                None => Style::new(ROCKET_BODY, Rgb::BLACK),
            };
            let ch = if next.color.is_none() && dy == min_dy { '▲' } else { '█' };
            let px = panel_x.saturating_add(dx as u16 * self.cell_w);
            let py = y.saturating_add((dy - min_dy) as u16 * self.cell_h);
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, ch_style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, l: Layout, lines: &[&str]) {
        let style = Style::new(Rgb::WHITE, Rgb::BLACK).bold();
        let top = (l.y + l.h / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = l.x + l.w.saturating_sub(text_w) / 2;
            fb.put_str(x, top + i as u16, text, style);
        }
    }
}
