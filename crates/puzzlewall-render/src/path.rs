//! Jigsaw piece outlines.
//!
//! A piece outline lives in the cell's local frame with `(0,0)` at its top-left corner. It is
//! emitted clockwise (top, right, bottom, left) so every piece has the same winding. A tab is a
//! knob made of two cubic segments centered on the edge midpoint; a blank is the same knob
//! mirrored across the edge baseline.

use crate::grid::{Cell, GridLayout};
use crate::model::Bounds;
use crate::svg::util::fmt_into;
use crate::tabs::{EdgeShape, PieceEdges};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "camelCase")]
pub enum PathCommand {
    MoveTo {
        x: f64,
        y: f64,
    },
    HorizontalTo {
        x: f64,
    },
    VerticalTo {
        y: f64,
    },
    CubicTo {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x: f64,
        y: f64,
    },
    Close,
}

/// Knob proportions relative to the piece size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TabGeometry {
    /// Knob size as a fraction of `min(width, height)`.
    pub tab_ratio: f64,
    /// Control-point offset as a fraction of the knob size; shapes how round the knob is.
    pub curve_ratio: f64,
}

impl Default for TabGeometry {
    fn default() -> Self {
        Self {
            tab_ratio: 0.15,
            curve_ratio: 0.4,
        }
    }
}

impl TabGeometry {
    pub fn tab_size(&self, width: f64, height: f64) -> f64 {
        width.min(height) * self.tab_ratio
    }

    pub fn curve(&self, width: f64, height: f64) -> f64 {
        self.tab_size(width, height) * self.curve_ratio
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiecePath {
    pub commands: Vec<PathCommand>,
}

impl PiecePath {
    /// SVG path data, e.g. `M0,0 H85 C85,-12 ... Z`.
    pub fn to_svg_d(&self) -> String {
        let mut out = String::with_capacity(self.commands.len() * 24);
        let mut buf = ryu_js::Buffer::new();
        for (i, cmd) in self.commands.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            match *cmd {
                PathCommand::MoveTo { x, y } => {
                    out.push('M');
                    fmt_into(&mut out, x, &mut buf);
                    out.push(',');
                    fmt_into(&mut out, y, &mut buf);
                }
                PathCommand::HorizontalTo { x } => {
                    out.push('H');
                    fmt_into(&mut out, x, &mut buf);
                }
                PathCommand::VerticalTo { y } => {
                    out.push('V');
                    fmt_into(&mut out, y, &mut buf);
                }
                PathCommand::CubicTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    out.push('C');
                    for (j, (px, py)) in [(x1, y1), (x2, y2), (x, y)].into_iter().enumerate() {
                        if j > 0 {
                            out.push(' ');
                        }
                        fmt_into(&mut out, px, &mut buf);
                        out.push(',');
                        fmt_into(&mut out, py, &mut buf);
                    }
                }
                PathCommand::Close => out.push('Z'),
            }
        }
        out
    }

    /// Bounding box of every point and control point. The knob's control points never reach
    /// past its apex, so this is the exact extent of the outline.
    pub fn bounds(&self) -> Option<Bounds> {
        let mut points = Vec::with_capacity(self.commands.len() * 3);
        let mut cur = (0.0, 0.0);
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo { x, y } => cur = (x, y),
                PathCommand::HorizontalTo { x } => cur.0 = x,
                PathCommand::VerticalTo { y } => cur.1 = y,
                PathCommand::CubicTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    points.push((x1, y1));
                    points.push((x2, y2));
                    cur = (x, y);
                }
                PathCommand::Close => continue,
            }
            points.push(cur);
        }
        Bounds::from_points(points)
    }

    /// Samples the outline into a closed polygon; each cubic contributes `steps` points.
    pub fn flatten(&self, steps: usize) -> Vec<(f64, f64)> {
        flatten_commands(&self.commands, steps)
    }
}

/// Polygon approximation of a command list; see [`PiecePath::flatten`].
pub fn flatten_commands(commands: &[PathCommand], steps: usize) -> Vec<(f64, f64)> {
    let steps = steps.max(1);
    let mut out = Vec::with_capacity(commands.len() * steps);
    let mut cur = (0.0, 0.0);
    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo { x, y } => {
                cur = (x, y);
                out.push(cur);
            }
            PathCommand::HorizontalTo { x } => {
                cur.0 = x;
                out.push(cur);
            }
            PathCommand::VerticalTo { y } => {
                cur.1 = y;
                out.push(cur);
            }
            PathCommand::CubicTo {
                x1,
                y1,
                x2,
                y2,
                x,
                y,
            } => {
                let p0 = cur;
                for step in 1..=steps {
                    let t = step as f64 / steps as f64;
                    out.push(cubic_point(p0, (x1, y1), (x2, y2), (x, y), t));
                }
                cur = (x, y);
            }
            PathCommand::Close => {}
        }
    }
    out
}

pub(crate) fn cubic_point(
    p0: (f64, f64),
    p1: (f64, f64),
    p2: (f64, f64),
    p3: (f64, f64),
    t: f64,
) -> (f64, f64) {
    let u = 1.0 - t;
    let tt = t * t;
    let uu = u * u;
    let uuu = uu * u;
    let ttt = tt * t;
    (
        uuu * p0.0 + 3.0 * uu * t * p1.0 + 3.0 * u * tt * p2.0 + ttt * p3.0,
        uuu * p0.1 + 3.0 * uu * t * p1.1 + 3.0 * u * tt * p2.1 + ttt * p3.1,
    )
}

struct Knob {
    /// Knob half-width along the edge (the knob spans `mid - t ..= mid + t`).
    t: f64,
    curve: f64,
}

fn cubic(x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) -> PathCommand {
    PathCommand::CubicTo {
        x1,
        y1,
        x2,
        y2,
        x,
        y,
    }
}

fn top_edge(out: &mut Vec<PathCommand>, w: f64, shape: EdgeShape, k: &Knob) {
    if shape != EdgeShape::Straight {
        // Outward is -y.
        let d = -(shape.sign() as f64);
        let mid = w / 2.0;
        let (t, c) = (k.t, k.curve);
        out.push(PathCommand::HorizontalTo { x: mid - t });
        out.push(cubic(mid - t, d * c, mid - t / 2.0, d * t, mid, d * t));
        out.push(cubic(mid + t / 2.0, d * t, mid + t, d * c, mid + t, 0.0));
    }
    out.push(PathCommand::HorizontalTo { x: w });
}

fn right_edge(out: &mut Vec<PathCommand>, w: f64, h: f64, shape: EdgeShape, k: &Knob) {
    if shape != EdgeShape::Straight {
        let d = shape.sign() as f64;
        let mid = h / 2.0;
        let (t, c) = (k.t, k.curve);
        out.push(PathCommand::VerticalTo { y: mid - t });
        out.push(cubic(w + d * c, mid - t, w + d * t, mid - t / 2.0, w + d * t, mid));
        out.push(cubic(w + d * t, mid + t / 2.0, w + d * c, mid + t, w, mid + t));
    }
    out.push(PathCommand::VerticalTo { y: h });
}

fn bottom_edge(out: &mut Vec<PathCommand>, w: f64, h: f64, shape: EdgeShape, k: &Knob) {
    if shape != EdgeShape::Straight {
        let d = shape.sign() as f64;
        let mid = w / 2.0;
        let (t, c) = (k.t, k.curve);
        out.push(PathCommand::HorizontalTo { x: mid + t });
        out.push(cubic(mid + t, h + d * c, mid + t / 2.0, h + d * t, mid, h + d * t));
        out.push(cubic(mid - t / 2.0, h + d * t, mid - t, h + d * c, mid - t, h));
    }
    out.push(PathCommand::HorizontalTo { x: 0.0 });
}

fn left_edge(out: &mut Vec<PathCommand>, h: f64, shape: EdgeShape, k: &Knob) {
    if shape != EdgeShape::Straight {
        // Outward is -x.
        let d = -(shape.sign() as f64);
        let mid = h / 2.0;
        let (t, c) = (k.t, k.curve);
        out.push(PathCommand::VerticalTo { y: mid + t });
        out.push(cubic(d * c, mid + t, d * t, mid + t / 2.0, d * t, mid));
        out.push(cubic(d * t, mid - t / 2.0, d * c, mid - t, 0.0, mid - t));
    }
    out.push(PathCommand::VerticalTo { y: 0.0 });
}

/// Outline for a `width x height` piece with the given edge shapes.
pub fn piece_path_for_edges(
    width: f64,
    height: f64,
    edges: &PieceEdges,
    geometry: &TabGeometry,
) -> PiecePath {
    let knob = Knob {
        t: geometry.tab_size(width, height),
        curve: geometry.curve(width, height),
    };
    let mut commands = Vec::with_capacity(14);
    commands.push(PathCommand::MoveTo { x: 0.0, y: 0.0 });
    top_edge(&mut commands, width, edges.top, &knob);
    right_edge(&mut commands, width, height, edges.right, &knob);
    bottom_edge(&mut commands, width, height, edges.bottom, &knob);
    left_edge(&mut commands, height, edges.left, &knob);
    commands.push(PathCommand::Close);
    PiecePath { commands }
}

/// Outline for the piece at `(row, col)` of `grid`.
pub fn piece_path(row: u32, col: u32, grid: &GridLayout, geometry: &TabGeometry) -> PiecePath {
    let edges = PieceEdges::for_cell(Cell::new(row, col), grid);
    piece_path_for_edges(grid.piece_width, grid.piece_height, &edges, geometry)
}
