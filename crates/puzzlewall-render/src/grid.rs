//! Uniform grid partitioning of the canvas.

use serde::{Deserialize, Serialize};

/// A grid cell addressed by `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// `row * columns + col`; drives tab polarity and item assignment.
    pub fn linear_index(self, columns: u32) -> u64 {
        self.row as u64 * columns.max(1) as u64 + self.col as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: u32,
    pub columns: u32,
    pub piece_width: f64,
    pub piece_height: f64,
}

impl GridLayout {
    pub fn capacity(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && row < self.rows as i64 && col < self.columns as i64
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        if index >= self.capacity() {
            return None;
        }
        let columns = self.columns as usize;
        Some(Cell::new((index / columns) as u32, (index % columns) as u32))
    }

    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell.row as i64, cell.col as i64) {
            return None;
        }
        Some(cell.linear_index(self.columns) as usize)
    }

    /// Top-left corner of a cell in canvas coordinates.
    pub fn origin(&self, cell: Cell) -> (f64, f64) {
        (
            cell.col as f64 * self.piece_width,
            cell.row as f64 * self.piece_height,
        )
    }

    /// Cells in linear-index order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.capacity()).filter_map(|i| self.cell(i))
    }

    pub fn has_neighbor_above(&self, cell: Cell) -> bool {
        cell.row > 0
    }

    pub fn has_neighbor_below(&self, cell: Cell) -> bool {
        cell.row + 1 < self.rows
    }

    pub fn has_neighbor_left(&self, cell: Cell) -> bool {
        cell.col > 0
    }

    pub fn has_neighbor_right(&self, cell: Cell) -> bool {
        cell.col + 1 < self.columns
    }
}

fn sanitize_extent(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

/// Derives the grid for `item_count` items laid out in `columns` columns.
///
/// `columns` below 1 is treated as 1 and the row count never drops below 1, so an empty item
/// list still yields a single (empty) row.
pub fn layout(item_count: usize, columns: u32, width: f64, height: f64) -> GridLayout {
    layout_with_rows(item_count, columns, None, width, height)
}

/// Like [`layout`], with an optional fixed row count. Items beyond `rows * columns` are not
/// placed.
pub fn layout_with_rows(
    item_count: usize,
    columns: u32,
    rows: Option<u32>,
    width: f64,
    height: f64,
) -> GridLayout {
    let columns = columns.max(1);
    let rows = match rows {
        Some(r) => r.max(1),
        None => item_count.div_ceil(columns as usize).clamp(1, u32::MAX as usize) as u32,
    };
    GridLayout {
        rows,
        columns,
        piece_width: sanitize_extent(width) / columns as f64,
        piece_height: sanitize_extent(height) / rows as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_items_in_four_columns() {
        let grid = layout(10, 4, 800.0, 500.0);
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.columns, 4);
        assert_eq!(grid.piece_width, 200.0);
        assert!((grid.piece_height - 166.666_666).abs() < 1e-3);
        assert_eq!(grid.capacity(), 12);
    }

    #[test]
    fn empty_item_list_still_has_one_row() {
        let grid = layout(0, 4, 1000.0, 400.0);
        assert_eq!(grid.rows, 1);
        assert_eq!(grid.piece_height, 400.0);
        assert_eq!(grid.capacity(), 4);
    }

    #[test]
    fn zero_columns_clamp_to_one() {
        let grid = layout(3, 0, 300.0, 300.0);
        assert_eq!(grid.columns, 1);
        assert_eq!(grid.rows, 3);
        assert_eq!(grid.piece_width, 300.0);
        assert_eq!(grid.piece_height, 100.0);
    }

    #[test]
    fn sparse_last_row_is_allowed() {
        let grid = layout(2, 4, 1000.0, 400.0);
        assert_eq!(grid.rows, 1);
        assert_eq!(grid.piece_width, 250.0);
    }

    #[test]
    fn fixed_rows_override_derived_rows() {
        let grid = layout_with_rows(20, 4, Some(2), 800.0, 400.0);
        assert_eq!(grid.rows, 2);
        assert_eq!(grid.capacity(), 8);
        assert_eq!(grid.piece_height, 200.0);
    }

    #[test]
    fn cell_index_round_trip_and_origins() {
        let grid = layout(10, 4, 800.0, 600.0);
        assert_eq!(grid.cell(5), Some(Cell::new(1, 1)));
        assert_eq!(grid.index_of(Cell::new(2, 3)), Some(11));
        assert_eq!(grid.cell(12), None);
        assert_eq!(grid.index_of(Cell::new(3, 0)), None);
        assert_eq!(grid.origin(Cell::new(2, 3)), (600.0, 400.0));
        assert_eq!(grid.cells().count(), 12);
    }
}
