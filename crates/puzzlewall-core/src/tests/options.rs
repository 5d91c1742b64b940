use crate::*;
use serde_json::json;

fn resolve(overrides: serde_json::Value, options: ParseOptions) -> Result<WallOptions> {
    let mut cfg = defaults::default_site_config();
    cfg.deep_merge(&overrides);
    WallOptions::from_config(&cfg, options)
}

#[test]
fn defaults_match_the_browser_component() {
    let opts = resolve(json!({}), ParseOptions::strict()).unwrap();
    assert_eq!(opts, WallOptions::default());
    assert_eq!(opts.columns, 4);
    assert_eq!(opts.width, 1000.0);
    assert_eq!(opts.height, 400.0);
    assert_eq!(opts.rows, None);
    assert_eq!(opts.hue_step, 37);
}

#[test]
fn strict_rejects_non_positive_columns() {
    let err = resolve(json!({"columns": 0}), ParseOptions::strict()).unwrap_err();
    match err {
        Error::InvalidConfig { key, .. } => assert_eq!(key, "columns"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(resolve(json!({"columns": -3}), ParseOptions::strict()).is_err());
}

#[test]
fn lenient_clamps_non_positive_columns_to_one() {
    let opts = resolve(json!({"columns": -3}), ParseOptions::lenient()).unwrap();
    assert_eq!(opts.columns, 1);
    let opts = resolve(json!({"columns": "many"}), ParseOptions::lenient()).unwrap();
    assert_eq!(opts.columns, 4);
}

#[test]
fn strict_rejects_grids_past_the_cell_ceiling() {
    let err = resolve(json!({"columns": 20_000_000}), ParseOptions::strict()).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { ref key, .. } if key == "columns"));
    let err = resolve(json!({"columns": 1000, "rows": 1000}), ParseOptions::strict()).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { ref key, .. } if key == "rows"));
    let opts = resolve(json!({"columns": 256, "rows": 256}), ParseOptions::strict()).unwrap();
    assert_eq!((opts.columns, opts.rows), (256, Some(256)));
}

#[test]
fn lenient_clamps_grids_to_the_cell_ceiling() {
    let opts = resolve(json!({"columns": 20_000_000}), ParseOptions::lenient()).unwrap();
    assert_eq!(opts.columns as usize, defaults::MAX_CELLS);
    let opts = resolve(json!({"columns": 1000, "rows": 1000}), ParseOptions::lenient()).unwrap();
    assert_eq!(opts.rows, Some(65));
    assert!(opts.rows.unwrap() as usize * opts.columns as usize <= defaults::MAX_CELLS);
}

#[test]
fn lenient_replaces_bad_dimensions_with_defaults() {
    let opts = resolve(
        json!({"width": 0, "height": "tall", "rows": -1}),
        ParseOptions::lenient(),
    )
    .unwrap();
    assert_eq!(opts.width, 1000.0);
    assert_eq!(opts.height, 400.0);
    assert_eq!(opts.rows, None);
}

#[test]
fn strict_rejects_bad_dimensions() {
    assert!(resolve(json!({"width": -5}), ParseOptions::strict()).is_err());
    assert!(resolve(json!({"rows": 0}), ParseOptions::strict()).is_err());
    assert!(resolve(json!({"tabRatio": 0.75}), ParseOptions::strict()).is_err());
}

#[test]
fn background_null_or_none_disables_fill() {
    let opts = resolve(json!({"background": null}), ParseOptions::strict()).unwrap();
    assert_eq!(opts.background, None);
    let opts = resolve(json!({"background": "none"}), ParseOptions::strict()).unwrap();
    assert_eq!(opts.background, None);
}

#[test]
fn hue_step_wraps_into_a_turn() {
    let opts = resolve(json!({"hueStep": 397}), ParseOptions::strict()).unwrap();
    assert_eq!(opts.hue_step, 37);
    let opts = resolve(json!({"hueStep": -23}), ParseOptions::strict()).unwrap();
    assert_eq!(opts.hue_step, 337);
}
