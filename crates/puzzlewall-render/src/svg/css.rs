use super::util::escape_xml;
use crate::model::WallStyle;
use std::fmt::Write as _;

/// Scoped stylesheet for one wall. Hover feedback brightens the hovered piece.
pub(super) fn wall_css(diagram_id: &str, style: &WallStyle) -> String {
    let id = escape_xml(diagram_id);
    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"#{id}{{font-family:{font};font-size:{size}px;}}#{id} .puzzle-piece-shape{{cursor:pointer;transition:filter 150ms ease-in-out;}}#{id} .puzzle-piece:hover .puzzle-piece-shape,#{id} .puzzle-piece.hovered .puzzle-piece-shape{{filter:brightness(1.1);}}#{id} .puzzle-piece-label{{pointer-events:none;user-select:none;color:{color};fill:{color};font-weight:{weight};}}"#,
        id = id,
        font = escape_xml(&style.font_family),
        size = super::util::fmt(style.font_size),
        color = escape_xml(&style.text_color),
        weight = escape_xml(&style.font_weight),
    );
    out
}
