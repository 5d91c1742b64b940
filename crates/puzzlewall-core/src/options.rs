use crate::config::json_f64;
use crate::defaults::*;
use crate::{Error, ParseOptions, Result, WallConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// How a labeled tree is turned into the wall's item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlattenMode {
    /// Direct strings, nested string arrays, and the children of each group below the root.
    #[default]
    Tasks,
    /// Every leaf below the root, depth-first.
    Leaves,
    /// Every node below the root, depth-first pre-order.
    Labels,
}

impl FromStr for FlattenMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tasks" => Ok(Self::Tasks),
            "leaves" => Ok(Self::Leaves),
            "labels" => Ok(Self::Labels),
            _ => Err(()),
        }
    }
}

/// Typed view of an effective [`WallConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallOptions {
    pub columns: u32,
    pub rows: Option<u32>,
    pub width: f64,
    pub height: f64,
    pub tab_ratio: f64,
    pub curve_ratio: f64,
    pub label_inset: f64,
    pub hue_step: u32,
    pub saturation: f64,
    pub lightness: f64,
    pub stroke: String,
    pub stroke_width: f64,
    pub font_size: f64,
    pub font_family: String,
    pub font_weight: String,
    pub text_color: String,
    pub background: Option<String>,
    pub flatten: FlattenMode,
}

impl Default for WallOptions {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            tab_ratio: DEFAULT_TAB_RATIO,
            curve_ratio: DEFAULT_CURVE_RATIO,
            label_inset: DEFAULT_LABEL_INSET,
            hue_step: DEFAULT_HUE_STEP,
            saturation: DEFAULT_SATURATION,
            lightness: DEFAULT_LIGHTNESS,
            stroke: DEFAULT_STROKE.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            font_size: DEFAULT_FONT_SIZE,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_weight: DEFAULT_FONT_WEIGHT.to_string(),
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            background: Some(DEFAULT_BACKGROUND.to_string()),
            flatten: FlattenMode::Tasks,
        }
    }
}

struct Validation {
    strict: bool,
}

impl Validation {
    fn reject<T>(&self, key: &str, message: impl Into<String>, fallback: T) -> Result<T> {
        let message = message.into();
        if self.strict {
            return Err(Error::InvalidConfig {
                key: key.to_string(),
                message,
            });
        }
        tracing::warn!(key, %message, "invalid wall config value, using fallback");
        Ok(fallback)
    }

    fn count(&self, cfg: &WallConfig, key: &str, default: u32, floor: u32) -> Result<u32> {
        let Some(v) = cfg.get(key) else {
            return Ok(default);
        };
        match json_f64(v) {
            Some(n) if n.is_finite() && n.fract() == 0.0 && n >= 1.0 => Ok(n.min(u32::MAX as f64) as u32),
            Some(n) if n.is_finite() && n.fract() == 0.0 => {
                self.reject(key, format!("must be >= 1, got {n}"), floor)
            }
            _ => self.reject(key, format!("expected a positive integer, got {v}"), default),
        }
    }

    fn optional_count(&self, cfg: &WallConfig, key: &str) -> Result<Option<u32>> {
        match cfg.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(v) => match json_f64(v) {
                Some(n) if n.is_finite() && n.fract() == 0.0 && n >= 1.0 => {
                    Ok(Some(n.min(u32::MAX as f64) as u32))
                }
                _ => self.reject(key, format!("expected a positive integer or null, got {v}"), None),
            },
        }
    }

    fn number(
        &self,
        cfg: &WallConfig,
        key: &str,
        default: f64,
        valid: impl Fn(f64) -> bool,
        expected: &str,
    ) -> Result<f64> {
        let Some(v) = cfg.get(key) else {
            return Ok(default);
        };
        match json_f64(v) {
            Some(n) if n.is_finite() && valid(n) => Ok(n),
            _ => self.reject(key, format!("expected {expected}, got {v}"), default),
        }
    }

    fn text(&self, cfg: &WallConfig, key: &str, default: &str) -> Result<String> {
        let Some(v) = cfg.get(key) else {
            return Ok(default.to_string());
        };
        match v.as_str().map(str::trim) {
            Some(s) if !s.is_empty() => Ok(s.to_string()),
            _ => self.reject(key, format!("expected a non-empty string, got {v}"), default.to_string()),
        }
    }
}

impl WallOptions {
    /// Resolves typed options from an effective config.
    ///
    /// In strict mode the first invalid value is returned as [`Error::InvalidConfig`]. In lenient
    /// mode invalid values are logged and replaced: non-positive counts clamp to 1, grids past
    /// [`MAX_CELLS`] clamp to the ceiling, everything else falls back to the built-in default.
    pub fn from_config(cfg: &WallConfig, options: ParseOptions) -> Result<Self> {
        let v = Validation {
            strict: !options.suppress_errors,
        };

        let columns = match v.count(cfg, "columns", DEFAULT_COLUMNS, 1)? {
            n if n as usize > MAX_CELLS => v.reject(
                "columns",
                format!("must be <= {MAX_CELLS}, got {n}"),
                MAX_CELLS as u32,
            )?,
            n => n,
        };
        let rows = match v.optional_count(cfg, "rows")? {
            Some(r) if r as u64 * columns as u64 > MAX_CELLS as u64 => v.reject(
                "rows",
                format!("{r} rows of {columns} columns exceed {MAX_CELLS} cells"),
                Some((MAX_CELLS / columns as usize) as u32),
            )?,
            rows => rows,
        };
        let width = v.number(cfg, "width", DEFAULT_WIDTH, |n| n > 0.0, "a positive number")?;
        let height = v.number(cfg, "height", DEFAULT_HEIGHT, |n| n > 0.0, "a positive number")?;
        let tab_ratio = v.number(
            cfg,
            "tabRatio",
            DEFAULT_TAB_RATIO,
            |n| (0.0..0.5).contains(&n),
            "a ratio in [0, 0.5)",
        )?;
        let curve_ratio = v.number(
            cfg,
            "curveRatio",
            DEFAULT_CURVE_RATIO,
            |n| n >= 0.0,
            "a non-negative number",
        )?;
        let label_inset = v.number(
            cfg,
            "labelInset",
            DEFAULT_LABEL_INSET,
            |n| n >= 0.0,
            "a non-negative number",
        )?;
        let hue_step = v.number(
            cfg,
            "hueStep",
            DEFAULT_HUE_STEP as f64,
            |n| n.fract() == 0.0,
            "an integer",
        )?;
        let saturation = v.number(
            cfg,
            "saturation",
            DEFAULT_SATURATION,
            |n| (0.0..=100.0).contains(&n),
            "a percentage",
        )?;
        let lightness = v.number(
            cfg,
            "lightness",
            DEFAULT_LIGHTNESS,
            |n| (0.0..=100.0).contains(&n),
            "a percentage",
        )?;
        let stroke = v.text(cfg, "stroke", DEFAULT_STROKE)?;
        let stroke_width = v.number(
            cfg,
            "strokeWidth",
            DEFAULT_STROKE_WIDTH,
            |n| n >= 0.0,
            "a non-negative number",
        )?;
        let font_size = v.number(
            cfg,
            "fontSize",
            DEFAULT_FONT_SIZE,
            |n| n > 0.0,
            "a positive number",
        )?;
        let font_family = v.text(cfg, "fontFamily", DEFAULT_FONT_FAMILY)?;
        let font_weight = v.text(cfg, "fontWeight", DEFAULT_FONT_WEIGHT)?;
        let text_color = v.text(cfg, "textColor", DEFAULT_TEXT_COLOR)?;

        let background = match cfg.get("background") {
            None => Some(DEFAULT_BACKGROUND.to_string()),
            Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() || s.trim() == "none" => None,
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(other) => v.reject(
                "background",
                format!("expected a color string or null, got {other}"),
                Some(DEFAULT_BACKGROUND.to_string()),
            )?,
        };

        let flatten = match cfg.get("flatten") {
            None => FlattenMode::default(),
            Some(value) => match value.as_str().map(FlattenMode::from_str) {
                Some(Ok(mode)) => mode,
                _ => v.reject(
                    "flatten",
                    format!("expected one of tasks|leaves|labels, got {value}"),
                    FlattenMode::default(),
                )?,
            },
        };

        Ok(Self {
            columns,
            rows,
            width,
            height,
            tab_ratio,
            curve_ratio,
            label_inset,
            hue_step: (hue_step as i64).rem_euclid(360) as u32,
            saturation,
            lightness,
            stroke,
            stroke_width,
            font_size,
            font_family,
            font_weight,
            text_color,
            background,
            flatten,
        })
    }
}
