//! Hit testing and piece activation for a finished layout.
//!
//! Points are tested against the actual piece outline, so a tab knob that reaches into the
//! neighboring cell still belongs to the piece it sticks out of.

use crate::Result;
use crate::model::{PuzzlePieceLayout, PuzzleWallLayout};
use crate::path::flatten_commands;
use crate::svg::{SvgRenderOptions, render_wall_svg};
use serde::{Deserialize, Serialize};

/// Samples per cubic segment when flattening outlines for hit testing.
const OUTLINE_STEPS: usize = 12;

/// A piece activation as delivered to click handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieceActivation {
    pub index: usize,
    /// Assigned item text, empty for cells past the end of the item list.
    pub item: String,
}

impl PieceActivation {
    fn from_piece(piece: &PuzzlePieceLayout) -> Self {
        Self {
            index: piece.index,
            item: piece.item_text().to_string(),
        }
    }
}

/// Even-odd point-in-polygon test.
fn point_in_polygon(x: f64, y: f64, polygon: &[(f64, f64)]) -> bool {
    let n = polygon.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];
        if (yi > y) != (yj > y) {
            let cross_x = xi + (y - yi) * (xj - xi) / (yj - yi);
            if x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Pieces whose outline can cover `(x, y)`: the containing cell first, then its four
/// neighbors.
fn candidates(layout: &PuzzleWallLayout, x: f64, y: f64) -> Vec<usize> {
    let grid = &layout.grid;
    if !(x.is_finite() && y.is_finite()) || grid.piece_width <= 0.0 || grid.piece_height <= 0.0 {
        return Vec::new();
    }
    let col = (x / grid.piece_width).floor() as i64;
    let row = (y / grid.piece_height).floor() as i64;
    [(0, 0), (0, -1), (0, 1), (-1, 0), (1, 0)]
        .into_iter()
        .map(|(dr, dc)| (row + dr, col + dc))
        .filter(|&(r, c)| grid.contains(r, c))
        .map(|(r, c)| r as usize * grid.columns as usize + c as usize)
        .filter(|&index| index < layout.pieces.len())
        .collect()
}

/// The cell under `(x, y)` with the right and bottom canvas edges included. Catches points on
/// the outer stroke, which the half-open polygon test leaves out.
fn containing_cell(layout: &PuzzleWallLayout, x: f64, y: f64) -> Option<usize> {
    let grid = &layout.grid;
    if !(x >= 0.0 && y >= 0.0 && x <= layout.width && y <= layout.height) {
        return None;
    }
    if grid.piece_width <= 0.0 || grid.piece_height <= 0.0 {
        return None;
    }
    let col = ((x / grid.piece_width).floor() as u32).min(grid.columns.saturating_sub(1));
    let row = ((y / grid.piece_height).floor() as u32).min(grid.rows.saturating_sub(1));
    let index = row as usize * grid.columns as usize + col as usize;
    (index < layout.pieces.len()).then_some(index)
}

fn locate<'p, F>(layout: &PuzzleWallLayout, x: f64, y: f64, outline: F) -> Option<usize>
where
    F: Fn(&PuzzlePieceLayout) -> std::borrow::Cow<'p, [(f64, f64)]>,
{
    candidates(layout, x, y)
        .into_iter()
        .find(|&index| {
            let piece = &layout.pieces[index];
            let (lx, ly) = (x - piece.x, y - piece.y);
            piece.outline_bounds.contains(lx, ly) && point_in_polygon(lx, ly, &outline(piece))
        })
        .or_else(|| containing_cell(layout, x, y))
}

/// Index of the piece whose outline contains the canvas point `(x, y)`.
pub fn hit_test(layout: &PuzzleWallLayout, x: f64, y: f64) -> Option<usize> {
    locate(layout, x, y, |piece| {
        std::borrow::Cow::Owned(flatten_commands(&piece.path, OUTLINE_STEPS))
    })
}

/// A wall with click dispatch and hover/last-clicked state.
pub struct PuzzleWall<'a> {
    layout: PuzzleWallLayout,
    outlines: Vec<Vec<(f64, f64)>>,
    on_piece_click: Option<Box<dyn FnMut(usize, &str) + 'a>>,
    hovered: Option<usize>,
    last_clicked: Option<PieceActivation>,
}

impl std::fmt::Debug for PuzzleWall<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PuzzleWall")
            .field("pieces", &self.layout.pieces.len())
            .field("has_click_handler", &self.on_piece_click.is_some())
            .field("hovered", &self.hovered)
            .field("last_clicked", &self.last_clicked)
            .finish()
    }
}

impl<'a> PuzzleWall<'a> {
    pub fn new(layout: PuzzleWallLayout) -> Self {
        let outlines = layout
            .pieces
            .iter()
            .map(|piece| flatten_commands(&piece.path, OUTLINE_STEPS))
            .collect();
        Self {
            layout,
            outlines,
            on_piece_click: None,
            hovered: None,
            last_clicked: None,
        }
    }

    /// Registers the click handler, replacing any previous one.
    pub fn on_piece_click<F>(mut self, handler: F) -> Self
    where
        F: FnMut(usize, &str) + 'a,
    {
        self.on_piece_click = Some(Box::new(handler));
        self
    }

    pub fn set_on_piece_click<F>(&mut self, handler: Option<F>)
    where
        F: FnMut(usize, &str) + 'a,
    {
        self.on_piece_click = handler.map(|h| Box::new(h) as Box<dyn FnMut(usize, &str) + 'a>);
    }

    pub fn layout(&self) -> &PuzzleWallLayout {
        &self.layout
    }

    pub fn piece_at(&self, x: f64, y: f64) -> Option<usize> {
        locate(&self.layout, x, y, |piece| {
            std::borrow::Cow::Borrowed(self.outlines[piece.index].as_slice())
        })
    }

    /// Activates the piece under `(x, y)`, if any.
    pub fn click_at(&mut self, x: f64, y: f64) -> Option<PieceActivation> {
        let index = self.piece_at(x, y)?;
        self.activate(index)
    }

    /// Activates a piece by index (keyboard or programmatic activation). Indices past the grid
    /// return `None` without notifying the handler.
    pub fn activate(&mut self, index: usize) -> Option<PieceActivation> {
        let Some(piece) = self.layout.piece(index) else {
            tracing::debug!(index, "activation outside the grid ignored");
            return None;
        };
        let activation = PieceActivation::from_piece(piece);
        tracing::debug!(index, item = %activation.item, "piece activated");
        if let Some(handler) = self.on_piece_click.as_mut() {
            handler(activation.index, &activation.item);
        }
        self.last_clicked = Some(activation.clone());
        Some(activation)
    }

    /// Updates the hovered piece; returns the new hover target.
    pub fn hover_at(&mut self, x: f64, y: f64) -> Option<usize> {
        self.hovered = self.piece_at(x, y);
        self.hovered
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn last_clicked(&self) -> Option<&PieceActivation> {
        self.last_clicked.as_ref()
    }

    /// Renders the current state; the hovered piece (if any) carries the `hovered` class.
    pub fn render_svg(
        &self,
        title: Option<&str>,
        description: Option<&str>,
        options: &SvgRenderOptions,
    ) -> Result<String> {
        let options = SvgRenderOptions {
            hovered: self.hovered,
            ..options.clone()
        };
        render_wall_svg(&self.layout, title, description, &options)
    }
}
