//! Tab/blank polarity for every cell edge.
//!
//! Right and bottom polarity come from linear-index parity. Left and top are derived from the
//! neighbor's opposite edge, so every interior edge interlocks: exactly one side protrudes.
//! Cells on the left/top border have no neighbor and use a position-parity fallback (left:
//! even, top: odd); those edges are straight anyway and the fallback only keeps the reported
//! polarity stable.

use crate::grid::{Cell, GridLayout};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabState {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

pub fn has_right_tab(row: u32, col: u32, columns: u32) -> bool {
    Cell::new(row, col).linear_index(columns) % 2 == 0
}

pub fn has_bottom_tab(row: u32, col: u32, columns: u32) -> bool {
    Cell::new(row, col).linear_index(columns) % 2 == 1
}

pub fn has_left_tab(row: u32, col: u32, columns: u32) -> bool {
    if col > 0 {
        !has_right_tab(row, col - 1, columns)
    } else {
        (row as u64 + col as u64) % 2 == 0
    }
}

pub fn has_top_tab(row: u32, col: u32, columns: u32) -> bool {
    if row > 0 {
        !has_bottom_tab(row - 1, col, columns)
    } else {
        (row as u64 + col as u64) % 2 == 1
    }
}

/// Resolves the polarity of all four edges of one cell. Pure and order-independent.
pub fn resolve_tabs(row: u32, col: u32, columns: u32) -> TabState {
    TabState {
        top: has_top_tab(row, col, columns),
        right: has_right_tab(row, col, columns),
        bottom: has_bottom_tab(row, col, columns),
        left: has_left_tab(row, col, columns),
    }
}

/// Immutable per-render table of [`TabState`]s, indexed by linear index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabTable {
    columns: u32,
    states: Vec<TabState>,
}

impl TabTable {
    pub fn new(grid: &GridLayout) -> Self {
        let states = grid
            .cells()
            .map(|cell| resolve_tabs(cell.row, cell.col, grid.columns))
            .collect();
        Self {
            columns: grid.columns,
            states,
        }
    }

    pub fn get(&self, cell: Cell) -> Option<TabState> {
        if cell.col >= self.columns {
            return None;
        }
        let index = usize::try_from(cell.linear_index(self.columns)).ok()?;
        self.states.get(index).copied()
    }
}

/// What an edge of a piece looks like once border edges are taken into account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeShape {
    Straight,
    Tab,
    Blank,
}

impl EdgeShape {
    fn interior(has_neighbor: bool, tab: bool) -> Self {
        match (has_neighbor, tab) {
            (false, _) => EdgeShape::Straight,
            (true, true) => EdgeShape::Tab,
            (true, false) => EdgeShape::Blank,
        }
    }

    /// Sign of the bump relative to the piece: `1` outward, `-1` inward, `0` none.
    pub fn sign(self) -> i8 {
        match self {
            EdgeShape::Straight => 0,
            EdgeShape::Tab => 1,
            EdgeShape::Blank => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceEdges {
    pub top: EdgeShape,
    pub right: EdgeShape,
    pub bottom: EdgeShape,
    pub left: EdgeShape,
}

impl PieceEdges {
    pub fn from_tabs(cell: Cell, grid: &GridLayout, tabs: TabState) -> Self {
        Self {
            top: EdgeShape::interior(grid.has_neighbor_above(cell), tabs.top),
            right: EdgeShape::interior(grid.has_neighbor_right(cell), tabs.right),
            bottom: EdgeShape::interior(grid.has_neighbor_below(cell), tabs.bottom),
            left: EdgeShape::interior(grid.has_neighbor_left(cell), tabs.left),
        }
    }

    pub fn for_cell(cell: Cell, grid: &GridLayout) -> Self {
        Self::from_tabs(cell, grid, resolve_tabs(cell.row, cell.col, grid.columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::layout;

    #[test]
    fn horizontal_neighbors_interlock() {
        for columns in 1..=9u32 {
            for row in 0..7u32 {
                for col in 0..columns.saturating_sub(1) {
                    let a = resolve_tabs(row, col, columns);
                    let b = resolve_tabs(row, col + 1, columns);
                    assert_eq!(a.right, !b.left, "row={row} col={col} columns={columns}");
                }
            }
        }
    }

    #[test]
    fn vertical_neighbors_interlock() {
        for columns in 1..=9u32 {
            for row in 0..6u32 {
                for col in 0..columns {
                    let a = resolve_tabs(row, col, columns);
                    let b = resolve_tabs(row + 1, col, columns);
                    assert_eq!(a.bottom, !b.top, "row={row} col={col} columns={columns}");
                }
            }
        }
    }

    #[test]
    fn parity_rules_match_linear_index() {
        let t = resolve_tabs(1, 2, 4);
        // index 6
        assert!(t.right);
        assert!(!t.bottom);
        let t = resolve_tabs(1, 3, 4);
        // index 7
        assert!(!t.right);
        assert!(t.bottom);
    }

    #[test]
    fn border_fallbacks_are_asymmetric() {
        // (row + col) even on the left border, odd on the top border.
        assert!(resolve_tabs(0, 0, 4).left);
        assert!(!resolve_tabs(0, 0, 4).top);
        assert!(!resolve_tabs(1, 0, 4).left);
        assert!(!resolve_tabs(0, 2, 4).top);
        assert!(resolve_tabs(0, 1, 4).top);
    }

    #[test]
    fn border_edges_are_straight() {
        let grid = layout(10, 4, 800.0, 600.0);
        let edges = PieceEdges::for_cell(Cell::new(0, 0), &grid);
        assert_eq!(edges.top, EdgeShape::Straight);
        assert_eq!(edges.left, EdgeShape::Straight);
        assert_ne!(edges.right, EdgeShape::Straight);
        assert_ne!(edges.bottom, EdgeShape::Straight);

        let edges = PieceEdges::for_cell(Cell::new(2, 3), &grid);
        assert_eq!(edges.right, EdgeShape::Straight);
        assert_eq!(edges.bottom, EdgeShape::Straight);
    }

    #[test]
    fn table_matches_on_demand_resolution() {
        let grid = layout(23, 5, 1000.0, 500.0);
        let table = TabTable::new(&grid);
        for cell in grid.cells() {
            assert_eq!(
                table.get(cell),
                Some(resolve_tabs(cell.row, cell.col, grid.columns))
            );
        }
        assert_eq!(table.get(Cell::new(0, 5)), None);
        assert_eq!(table.get(Cell::new(5, 0)), None);
    }

    #[test]
    fn single_column_has_no_vertical_bumps() {
        let grid = layout(3, 1, 100.0, 300.0);
        for cell in grid.cells() {
            let edges = PieceEdges::for_cell(cell, &grid);
            assert_eq!(edges.left, EdgeShape::Straight);
            assert_eq!(edges.right, EdgeShape::Straight);
        }
    }
}
