use crate::grid::GridLayout;
use crate::path::PathCommand;
use crate::tabs::{PieceEdges, TabState};
use puzzlewall_core::WallMetadata;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub config: Value,
    pub effective_config: Value,
}

impl LayoutMeta {
    pub fn from_wall_metadata(meta: &WallMetadata) -> Self {
        Self {
            title: meta.title.clone(),
            description: meta.description.clone(),
            config: meta.config.as_value().clone(),
            effective_config: meta.effective_config.as_value().clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Label box inside a piece, in the piece's local frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelLayout {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Wrapped lines, used by the `text` label mode and raster output.
    pub lines: Vec<String>,
    pub line_height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzlePieceLayout {
    pub index: usize,
    pub row: u32,
    pub col: u32,
    /// Canvas translation of the piece's local frame.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub tabs: TabState,
    pub edges: PieceEdges,
    pub path: Vec<PathCommand>,
    pub d: String,
    /// Outline extent in the piece's local frame, bulges included.
    pub outline_bounds: Bounds,
    pub hue: u32,
    pub fill: String,
    /// `None` for cells past the end of the item list.
    pub item: Option<String>,
    pub label: Option<LabelLayout>,
}

impl PuzzlePieceLayout {
    /// Item text as reported to click handlers (empty for unassigned cells).
    pub fn item_text(&self) -> &str {
        self.item.as_deref().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallStyle {
    pub stroke: String,
    pub stroke_width: f64,
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: String,
    pub text_color: String,
    pub background: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleWallLayout {
    /// Canvas bounds (`0,0 .. width,height`).
    pub bounds: Bounds,
    pub width: f64,
    pub height: f64,
    pub grid: GridLayout,
    pub item_count: usize,
    /// Items that did not fit into `rows * columns`.
    pub truncated: usize,
    pub tab_size: f64,
    pub curve: f64,
    pub style: WallStyle,
    pub pieces: Vec<PuzzlePieceLayout>,
}

impl PuzzleWallLayout {
    pub fn piece(&self, index: usize) -> Option<&PuzzlePieceLayout> {
        self.pieces.get(index)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutedWall {
    pub meta: LayoutMeta,
    pub layout: PuzzleWallLayout,
}
