//! Built-in site defaults.
//!
//! Values mirror the browser component: a 4-column wall on a 1000x400 canvas, pastel fills
//! rotating the hue by 37 degrees per piece, slate outlines, and small centered labels.

use serde_json::{Value, json};

pub const DEFAULT_COLUMNS: u32 = 4;
pub const DEFAULT_WIDTH: f64 = 1000.0;
pub const DEFAULT_HEIGHT: f64 = 400.0;
pub const DEFAULT_TAB_RATIO: f64 = 0.15;
pub const DEFAULT_CURVE_RATIO: f64 = 0.4;
pub const DEFAULT_LABEL_INSET: f64 = 15.0;
pub const DEFAULT_HUE_STEP: u32 = 37;
pub const DEFAULT_SATURATION: f64 = 70.0;
pub const DEFAULT_LIGHTNESS: f64 = 75.0;
pub const DEFAULT_STROKE: &str = "#4b5563";
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;
pub const DEFAULT_FONT_SIZE: f64 = 14.0;
pub const DEFAULT_FONT_FAMILY: &str = r#"ui-sans-serif,system-ui,sans-serif"#;
pub const DEFAULT_FONT_WEIGHT: &str = "500";
pub const DEFAULT_TEXT_COLOR: &str = "#1f2937";
pub const DEFAULT_BACKGROUND: &str = "#fff7ed";
pub const DEFAULT_FLATTEN: &str = "tasks";

/// Upper bound on `rows * columns`; every cell costs an outline, a fill, and a label.
pub const MAX_CELLS: usize = 65_536;

pub fn default_site_config() -> crate::WallConfig {
    crate::WallConfig::from_value(default_site_config_value())
}

fn default_site_config_value() -> Value {
    json!({
        "columns": DEFAULT_COLUMNS,
        "rows": null,
        "width": DEFAULT_WIDTH,
        "height": DEFAULT_HEIGHT,
        "tabRatio": DEFAULT_TAB_RATIO,
        "curveRatio": DEFAULT_CURVE_RATIO,
        "labelInset": DEFAULT_LABEL_INSET,
        "hueStep": DEFAULT_HUE_STEP,
        "saturation": DEFAULT_SATURATION,
        "lightness": DEFAULT_LIGHTNESS,
        "stroke": DEFAULT_STROKE,
        "strokeWidth": DEFAULT_STROKE_WIDTH,
        "fontSize": DEFAULT_FONT_SIZE,
        "fontFamily": DEFAULT_FONT_FAMILY,
        "fontWeight": DEFAULT_FONT_WEIGHT,
        "textColor": DEFAULT_TEXT_COLOR,
        "background": DEFAULT_BACKGROUND,
        "flatten": DEFAULT_FLATTEN,
    })
}
