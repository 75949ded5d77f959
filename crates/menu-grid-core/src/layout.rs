/// Grid layout engine
/// Turns placed rectangles into an occupancy matrix (which entry owns each
/// cell) and the CSS `grid-template-areas` string derived from it.

use tracing::debug;

use crate::model::LayoutItem;

/// Marker for a cell no entry owns
pub const EMPTY_CELL: &str = ".";

pub const MIN_COLS: u32 = 1;
pub const MAX_COLS: u32 = 12;

/// Rows past this are clipped like columns past `cols`
pub const MAX_ROWS: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    cols: usize,
    cells: Vec<Vec<Option<String>>>,
}

impl OccupancyGrid {
    /// Build the matrix. Rows = max(y + h), capped at `MAX_ROWS`; an empty
    /// layout gives zero rows. Columns are capped at `MAX_COLS`.
    /// Items are written in order, so a later item takes over contested cells.
    /// Cells outside the matrix are dropped.
    pub fn build(items: &[LayoutItem], cols: u32) -> Self {
        let cols = cols.min(MAX_COLS) as usize;
        let rows = items
            .iter()
            .map(|item| item.y.saturating_add(item.h).min(MAX_ROWS) as usize)
            .max()
            .unwrap_or(0);

        let mut cells = vec![vec![None; cols]; rows];

        for item in items {
            let row_end = item.y.saturating_add(item.h) as usize;
            let col_end = (item.x.saturating_add(item.w) as usize).min(cols);
            for row in cells.iter_mut().take(row_end).skip(item.y as usize) {
                for cell in row.iter_mut().take(col_end).skip(item.x as usize) {
                    *cell = Some(item.i.clone());
                }
            }
        }

        debug!("Built occupancy grid {}x{} from {} items", rows, cols, items.len());

        Self { cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Entry owning the cell, `None` when empty or out of range
    pub fn owner(&self, row: usize, col: usize) -> Option<&str> {
        self.cells.get(row)?.get(col)?.as_deref()
    }

    /// Cell names of one row, `.` for empty cells
    pub fn row(&self, row: usize) -> Vec<&str> {
        self.cells
            .get(row)
            .map(|cells| {
                cells
                    .iter()
                    .map(|c| c.as_deref().unwrap_or(EMPTY_CELL))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// First cell (row-major) the entry owns, as (row, col)
    pub fn position_of(&self, menu_id: &str) -> Option<(usize, usize)> {
        self.cells.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|c| c.as_deref() == Some(menu_id))
                .map(|c| (r, c))
        })
    }

    /// `grid-template-areas` value: one quoted line per row.
    pub fn template_areas(&self) -> String {
        (0..self.rows())
            .map(|r| format!("\"{}\"", self.row(r).join(" ")))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
