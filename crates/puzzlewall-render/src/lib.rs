#![forbid(unsafe_code)]

//! Headless puzzle wall geometry, layout, and SVG rendering.
//!
//! The pipeline is `grid` (cell sizes) → `tabs` (edge polarity) → `path` (piece outlines) →
//! [`layout_wall`] (positioned pieces with colors and labels) → [`svg`]. [`interaction`]
//! hit-tests a finished layout and dispatches piece activations.

pub mod color;
pub mod grid;
pub mod interaction;
pub mod model;
pub mod path;
pub mod svg;
pub mod tabs;
pub mod text;

use crate::color::{Hsl, piece_hue};
use crate::model::{
    Bounds, LabelLayout, LayoutMeta, LayoutedWall, PuzzlePieceLayout, PuzzleWallLayout, WallStyle,
};
use crate::path::{TabGeometry, piece_path_for_edges};
use crate::tabs::{PieceEdges, TabTable, resolve_tabs};
use crate::text::{DeterministicTextMeasurer, TextMeasurer, TextStyle, wrap_label};
use puzzlewall_core::defaults::MAX_CELLS;
use puzzlewall_core::{ParsedWall, WallOptions};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid wall dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },
    #[error("grid of {rows}x{columns} cells exceeds the limit of {max} cells")]
    GridTooLarge { rows: u32, columns: u32, max: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Clone)]
pub struct LayoutOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(DeterministicTextMeasurer::default()),
        }
    }
}

/// Horizontal padding inside the label box, per side.
const LABEL_PADDING_X: f64 = 8.0;

pub fn layout_parsed(parsed: &ParsedWall, options: &LayoutOptions) -> Result<LayoutedWall> {
    let meta = LayoutMeta::from_wall_metadata(&parsed.meta);
    let layout = layout_wall(
        &parsed.items,
        &parsed.meta.options,
        options.text_measurer.as_ref(),
    )?;
    Ok(LayoutedWall { meta, layout })
}

fn text_style(options: &WallOptions) -> TextStyle {
    TextStyle {
        font_family: Some(options.font_family.clone()),
        font_size: options.font_size,
        font_weight: Some(options.font_weight.clone()),
    }
}

fn label_layout(
    item: &str,
    piece_width: f64,
    piece_height: f64,
    options: &WallOptions,
    measurer: &dyn TextMeasurer,
) -> LabelLayout {
    let inset = options.label_inset;
    let width = (piece_width - 2.0 * inset).max(0.0);
    let height = (piece_height - 2.0 * inset).max(0.0);
    let style = text_style(options);
    let line_height = measurer.line_height(&style);
    let max_lines = if line_height > 0.0 {
        Some((height / line_height).floor().max(1.0) as usize)
    } else {
        None
    };
    let lines = wrap_label(
        item,
        (width - 2.0 * LABEL_PADDING_X).max(0.0),
        max_lines,
        measurer,
        &style,
    );
    LabelLayout {
        x: inset,
        y: inset,
        width,
        height,
        lines,
        line_height,
    }
}

/// Lays out every cell of the wall. Cells past the end of `items` get no label; items past
/// the grid capacity are dropped.
pub fn layout_wall(
    items: &[String],
    options: &WallOptions,
    measurer: &dyn TextMeasurer,
) -> Result<PuzzleWallLayout> {
    let (width, height) = (options.width, options.height);
    if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
        return Err(Error::InvalidDimensions { width, height });
    }

    let grid = grid::layout_with_rows(items.len(), options.columns, options.rows, width, height);
    let cells = u64::from(grid.rows).checked_mul(u64::from(grid.columns));
    if !cells.is_some_and(|n| n <= MAX_CELLS as u64) {
        return Err(Error::GridTooLarge {
            rows: grid.rows,
            columns: grid.columns,
            max: MAX_CELLS,
        });
    }
    let _span = tracing::debug_span!(
        "layout_wall",
        rows = grid.rows,
        columns = grid.columns,
        items = items.len()
    )
    .entered();

    let table = TabTable::new(&grid);
    let geometry = TabGeometry {
        tab_ratio: options.tab_ratio,
        curve_ratio: options.curve_ratio,
    };
    let (pw, ph) = (grid.piece_width, grid.piece_height);

    let mut pieces = Vec::with_capacity(grid.capacity());
    for cell in grid.cells() {
        let index = pieces.len();
        let tabs = table
            .get(cell)
            .unwrap_or_else(|| resolve_tabs(cell.row, cell.col, grid.columns));
        let edges = PieceEdges::from_tabs(cell, &grid, tabs);
        let path = piece_path_for_edges(pw, ph, &edges, &geometry);
        let outline_bounds = path.bounds().unwrap_or(Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: pw,
            max_y: ph,
        });
        let hue = piece_hue(index, options.hue_step);
        let item = items.get(index).cloned();
        let label = item
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| label_layout(s, pw, ph, options, measurer));
        let (x, y) = grid.origin(cell);

        pieces.push(PuzzlePieceLayout {
            index,
            row: cell.row,
            col: cell.col,
            x,
            y,
            width: pw,
            height: ph,
            tabs,
            edges,
            d: path.to_svg_d(),
            path: path.commands,
            outline_bounds,
            hue,
            fill: Hsl::new(hue, options.saturation, options.lightness).to_css(),
            item,
            label,
        });
    }

    let truncated = items.len().saturating_sub(grid.capacity());
    if truncated > 0 {
        tracing::debug!(
            truncated,
            capacity = grid.capacity(),
            "items beyond grid capacity were not placed"
        );
    }

    Ok(PuzzleWallLayout {
        bounds: Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: width,
            max_y: height,
        },
        width,
        height,
        grid,
        item_count: items.len(),
        truncated,
        tab_size: geometry.tab_size(pw, ph),
        curve: geometry.curve(pw, ph),
        style: WallStyle {
            stroke: options.stroke.clone(),
            stroke_width: options.stroke_width,
            font_size: options.font_size,
            font_family: options.font_family.clone(),
            font_weight: options.font_weight.clone(),
            text_color: options.text_color.clone(),
            background: options.background.clone(),
        },
        pieces,
    })
}
