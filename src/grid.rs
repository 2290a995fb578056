use egui::{Pos2, Rect, Vec2};

/// Width of one day column in pixels.
pub const CELL_WIDTH: f32 = 20.0;
/// Height of one row lane in pixels.
pub const CELL_HEIGHT: f32 = 28.0;
/// Month label row of the header.
pub const MONTH_HEADER_HEIGHT: f32 = 32.0;
/// Day-of-month row of the header.
pub const DAY_HEADER_HEIGHT: f32 = 24.0;
/// Full header height above the cell area.
pub const HEADER_HEIGHT: f32 = MONTH_HEADER_HEIGHT + DAY_HEADER_HEIGHT;
/// Hit width of the resize handles on a task block's edges.
pub const RESIZE_HANDLE_WIDTH: f32 = 4.0;

/// A `(row, col)` position in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

impl GridPos {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Map a pixel position (relative to the grid widget's origin, header
/// included) to the cell under it, adjusting for scroll.
///
/// Positions in the header, left of the grid, or past `rows`/`cols` yield
/// `None`; callers never act on an out-of-range cell.
pub fn cell_at(x: f32, y: f32, scroll: Vec2, rows: usize, cols: usize) -> Option<GridPos> {
    let gx = x + scroll.x;
    let gy = y - HEADER_HEIGHT + scroll.y;
    if gx < 0.0 || gy < 0.0 {
        return None;
    }
    let col = (gx / CELL_WIDTH).floor() as usize;
    let row = (gy / CELL_HEIGHT).floor() as usize;
    if row >= rows || col >= cols {
        return None;
    }
    Some(GridPos { row, col })
}

/// Pixel rectangle of an inclusive column span on a row, relative to the top
/// left of the cell area (below the header).
pub fn rect_of(row: usize, start_col: usize, end_col: usize) -> Rect {
    Rect::from_min_size(
        Pos2::new(start_col as f32 * CELL_WIDTH, row as f32 * CELL_HEIGHT),
        Vec2::new(
            (end_col - start_col + 1) as f32 * CELL_WIDTH,
            CELL_HEIGHT,
        ),
    )
}
