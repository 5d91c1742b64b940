use crate::Result;
use crate::model::{LabelLayout, LayoutedWall, PuzzlePieceLayout, PuzzleWallLayout, WallStyle};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

mod css;
pub(crate) mod util;

use util::{escape_xml, fmt};

/// How piece labels are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    /// XHTML `<foreignObject>` with a centered flex box (browsers only).
    #[default]
    Html,
    /// Plain SVG `<text>` with pre-wrapped `<tspan>` lines (raster-safe).
    Text,
}

#[derive(Debug, Clone)]
pub struct SvgRenderOptions {
    /// Adds extra space around the wall in the viewBox.
    pub viewbox_padding: f64,
    /// Root element id; also scopes the stylesheet and the accessibility ids.
    pub diagram_id: Option<String>,
    pub label_mode: LabelMode,
    /// When false, the scoped `<style>` block is omitted.
    pub include_style: bool,
    /// Index of the piece to mark with the `hovered` class.
    pub hovered: Option<usize>,
}

impl Default for SvgRenderOptions {
    fn default() -> Self {
        Self {
            viewbox_padding: 0.0,
            diagram_id: None,
            label_mode: LabelMode::Html,
            include_style: true,
            hovered: None,
        }
    }
}

pub fn render_layouted_svg(wall: &LayoutedWall, options: &SvgRenderOptions) -> Result<String> {
    render_wall_svg(
        &wall.layout,
        wall.meta.title.as_deref(),
        wall.meta.description.as_deref(),
        options,
    )
}

pub fn render_wall_svg(
    layout: &PuzzleWallLayout,
    title: Option<&str>,
    description: Option<&str>,
    options: &SvgRenderOptions,
) -> Result<String> {
    let diagram_id = options.diagram_id.as_deref().unwrap_or("puzzlewall");
    let diagram_id_esc = escape_xml(diagram_id);
    let title = title.filter(|t| !t.trim().is_empty());
    let description = description.filter(|d| !d.trim().is_empty());

    let pad = if options.viewbox_padding.is_finite() {
        options.viewbox_padding.max(0.0)
    } else {
        0.0
    };
    let vb_w = (layout.bounds.width() + 2.0 * pad).max(1.0);
    let vb_h = (layout.bounds.height() + 2.0 * pad).max(1.0);

    let aria = match (title, description) {
        (Some(_), Some(_)) => format!(
            r#" aria-labelledby="{id}-title" aria-describedby="{id}-desc""#,
            id = diagram_id_esc
        ),
        (Some(_), None) => format!(r#" aria-labelledby="{id}-title""#, id = diagram_id_esc),
        (None, Some(_)) => format!(r#" aria-describedby="{id}-desc""#, id = diagram_id_esc),
        (None, None) => String::new(),
    };

    let mut out = String::with_capacity(512 + layout.pieces.len() * 512);
    let _ = write!(
        &mut out,
        r#"<svg id="{id}" class="puzzle-wall" width="{w}" height="{h}" xmlns="http://www.w3.org/2000/svg" viewBox="{min_x} {min_y} {vb_w} {vb_h}" role="graphics-document document" aria-roledescription="puzzle-wall"{aria}>"#,
        id = diagram_id_esc,
        w = fmt(layout.bounds.width()),
        h = fmt(layout.bounds.height()),
        min_x = fmt(layout.bounds.min_x - pad),
        min_y = fmt(layout.bounds.min_y - pad),
        vb_w = fmt(vb_w),
        vb_h = fmt(vb_h),
        aria = aria,
    );
    if let Some(t) = title {
        let _ = write!(
            &mut out,
            r#"<title id="{id}-title">{text}</title>"#,
            id = diagram_id_esc,
            text = escape_xml(t)
        );
    }
    if let Some(d) = description {
        let _ = write!(
            &mut out,
            r#"<desc id="{id}-desc">{text}</desc>"#,
            id = diagram_id_esc,
            text = escape_xml(d)
        );
    }
    if options.include_style {
        let _ = write!(
            &mut out,
            "<style>{}</style>",
            css::wall_css(diagram_id, &layout.style)
        );
    }
    if let Some(bg) = layout.style.background.as_deref() {
        let _ = write!(
            &mut out,
            r#"<rect class="puzzle-wall-background" x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"/>"#,
            x = fmt(layout.bounds.min_x),
            y = fmt(layout.bounds.min_y),
            w = fmt(layout.bounds.width()),
            h = fmt(layout.bounds.height()),
            fill = escape_xml(bg),
        );
    }

    for piece in &layout.pieces {
        render_piece(&mut out, piece, &layout.style, options);
    }

    out.push_str("</svg>");
    Ok(out)
}

fn render_piece(
    out: &mut String,
    piece: &PuzzlePieceLayout,
    style: &WallStyle,
    options: &SvgRenderOptions,
) {
    let class = if options.hovered == Some(piece.index) {
        "puzzle-piece hovered"
    } else {
        "puzzle-piece"
    };
    let _ = write!(
        out,
        r#"<g class="{class}" data-index="{index}" data-row="{row}" data-col="{col}" transform="translate({x}, {y})">"#,
        index = piece.index,
        row = piece.row,
        col = piece.col,
        x = fmt(piece.x),
        y = fmt(piece.y),
    );
    if let Some(item) = piece.item.as_deref().filter(|s| !s.is_empty()) {
        let _ = write!(out, "<title>{}</title>", escape_xml(item));
    }
    let _ = write!(
        out,
        r#"<path class="puzzle-piece-shape" d="{d}" fill="{fill}" stroke="{stroke}" stroke-width="{sw}"/>"#,
        d = piece.d,
        fill = escape_xml(&piece.fill),
        stroke = escape_xml(&style.stroke),
        sw = fmt(style.stroke_width),
    );
    if let (Some(item), Some(label)) = (piece.item.as_deref(), piece.label.as_ref()) {
        match options.label_mode {
            LabelMode::Html => render_html_label(out, item, label, style),
            LabelMode::Text => render_text_label(out, label, style),
        }
    }
    out.push_str("</g>");
}

fn render_html_label(out: &mut String, item: &str, label: &LabelLayout, style: &WallStyle) {
    let _ = write!(
        out,
        r#"<foreignObject x="{x}" y="{y}" width="{w}" height="{h}"><div xmlns="http://www.w3.org/1999/xhtml" class="puzzle-piece-label" style="width:100%;height:100%;display:flex;align-items:center;justify-content:center;text-align:center;padding:0 8px;box-sizing:border-box;font-size:{size}px;font-weight:{weight};color:{color};">{text}</div></foreignObject>"#,
        x = fmt(label.x),
        y = fmt(label.y),
        w = fmt(label.width),
        h = fmt(label.height),
        size = fmt(style.font_size),
        weight = escape_xml(&style.font_weight),
        color = escape_xml(&style.text_color),
        text = escape_xml(item),
    );
}

fn render_text_label(out: &mut String, label: &LabelLayout, style: &WallStyle) {
    let cx = label.x + label.width / 2.0;
    let cy = label.y + label.height / 2.0;
    let n = label.lines.len().max(1) as f64;
    let first = cy - (n - 1.0) * label.line_height / 2.0;
    let _ = write!(
        out,
        r#"<text class="puzzle-piece-label" x="{cx}" y="{cy}" text-anchor="middle" dominant-baseline="central" font-family="{font}" font-size="{size}" font-weight="{weight}" fill="{color}">"#,
        cx = fmt(cx),
        cy = fmt(cy),
        font = escape_xml(&style.font_family),
        size = fmt(style.font_size),
        weight = escape_xml(&style.font_weight),
        color = escape_xml(&style.text_color),
    );
    for (i, line) in label.lines.iter().enumerate() {
        let _ = write!(
            out,
            r#"<tspan x="{x}" y="{y}">{text}</tspan>"#,
            x = fmt(cx),
            y = fmt(first + i as f64 * label.line_height),
            text = escape_xml(line),
        );
    }
    out.push_str("</text>");
}
