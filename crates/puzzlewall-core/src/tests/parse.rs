use crate::*;
use serde_json::json;

#[test]
fn parse_plain_item_array() {
    let engine = Engine::new();
    let wall = engine
        .parse_wall_sync(r#"["A", "B", "C"]"#, ParseOptions::default())
        .unwrap();
    assert_eq!(wall.items, vec!["A", "B", "C"]);
    assert_eq!(wall.meta.format, InputFormat::Json);
    assert_eq!(wall.meta.title, None);
    assert_eq!(wall.meta.options.columns, 4);
}

#[test]
fn parse_items_object_with_config_overrides() {
    let engine = Engine::new();
    let text = r#"{
        "title": "Sprint",
        "description": "Work items",
        "items": ["Plan", "Build"],
        "config": {"columns": 2, "width": 800, "height": 500}
    }"#;
    let wall = engine.parse_wall_sync(text, ParseOptions::default()).unwrap();
    assert_eq!(wall.items, vec!["Plan", "Build"]);
    assert_eq!(wall.meta.title.as_deref(), Some("Sprint"));
    assert_eq!(wall.meta.description.as_deref(), Some("Work items"));
    assert_eq!(wall.meta.options.columns, 2);
    assert_eq!(wall.meta.options.width, 800.0);
    assert_eq!(wall.meta.config.get_f64("columns"), Some(2.0));
    assert_eq!(wall.meta.effective_config.get_f64("height"), Some(500.0));
}

#[test]
fn parse_tree_uses_root_label_as_title() {
    let engine = Engine::new();
    let text = json!({
        "label": "Project Tasks",
        "children": [
            {"label": "Planning", "children": ["Define requirements", "Create timeline"]},
            {"label": "Testing", "children": ["Security audit"]}
        ]
    })
    .to_string();
    let wall = engine.parse_wall_sync(&text, ParseOptions::default()).unwrap();
    assert_eq!(wall.meta.title.as_deref(), Some("Project Tasks"));
    assert_eq!(
        wall.items,
        vec!["Define requirements", "Create timeline", "Security audit"]
    );
}

#[test]
fn parse_tree_honors_flatten_mode_from_document_config() {
    let engine = Engine::new();
    let text = r#"{
        "label": "Root",
        "config": {"flatten": "labels"},
        "children": [{"label": "Group", "children": ["Leaf"]}]
    }"#;
    let wall = engine.parse_wall_sync(text, ParseOptions::default()).unwrap();
    assert_eq!(wall.items, vec!["Group", "Leaf"]);
}

#[test]
fn parse_json5_and_yaml_inputs() {
    let engine = Engine::new();
    let wall = engine
        .parse_wall_sync("{items: ['A', 'B',], // trailing comma\n}", ParseOptions::default())
        .unwrap();
    assert_eq!(wall.meta.format, InputFormat::Json5);
    assert_eq!(wall.items, vec!["A", "B"]);

    let yaml = "title: Wall\nconfig:\n  columns: 3\nitems:\n  - One\n  - Two\n";
    let wall = engine.parse_wall_sync(yaml, ParseOptions::default()).unwrap();
    assert_eq!(wall.meta.format, InputFormat::Yaml);
    assert_eq!(wall.items, vec!["One", "Two"]);
    assert_eq!(wall.meta.options.columns, 3);
}

#[test]
fn parse_rejects_unsupported_shapes_and_empty_input() {
    let engine = Engine::new();
    assert!(matches!(
        engine.parse_wall_sync("42", ParseOptions::default()),
        Err(Error::UnsupportedDocument { found: "number" })
    ));
    assert!(matches!(
        engine.parse_wall_sync(r#"{"foo": 1}"#, ParseOptions::default()),
        Err(Error::UnsupportedDocument { found: "object" })
    ));
    assert!(matches!(
        engine.parse_wall_sync("   ", ParseOptions::default()),
        Err(Error::InvalidInput { .. })
    ));
    assert!(matches!(
        engine.parse_wall_sync(r#"{"items": "A"}"#, ParseOptions::default()),
        Err(Error::InvalidInput { .. })
    ));
}

#[test]
fn strict_parse_rejects_zero_columns_but_lenient_clamps() {
    let engine = Engine::new();
    let text = r#"{"items": ["A"], "config": {"columns": 0}}"#;
    assert!(matches!(
        engine.parse_wall_sync(text, ParseOptions::strict()),
        Err(Error::InvalidConfig { .. })
    ));
    let wall = engine.parse_wall_sync(text, ParseOptions::lenient()).unwrap();
    assert_eq!(wall.meta.options.columns, 1);
}

#[test]
fn site_config_is_merged_under_document_config() {
    let engine = Engine::new().with_site_config(WallConfig::from_value(json!({
        "columns": 6,
        "stroke": "#000000"
    })));
    let wall = engine
        .parse_wall_sync(r#"{"items": ["A"], "config": {"columns": 2}}"#, ParseOptions::default())
        .unwrap();
    assert_eq!(wall.meta.options.columns, 2);
    assert_eq!(wall.meta.options.stroke, "#000000");
    assert_eq!(wall.meta.options.width, 1000.0);
}

#[test]
fn wall_from_items_uses_site_defaults() {
    let engine = Engine::new();
    let wall = engine
        .wall_from_items(["A", "B"], None, ParseOptions::default())
        .unwrap();
    assert_eq!(wall.items, vec!["A", "B"]);
    assert_eq!(wall.meta.format, InputFormat::Inline);
    assert_eq!(wall.meta.options, WallOptions::default());
}

#[test]
fn caller_overrides_beat_document_config() {
    let engine = Engine::new();
    let text = r#"{"items": ["A", "B", "C"], "config": {"columns": 3, "width": 600}}"#;
    let mut overrides = WallConfig::empty_object();
    overrides.set_value("columns", json!(1));
    let wall = engine
        .parse_wall_with_overrides_sync(text, Some(&overrides), ParseOptions::strict())
        .unwrap();
    assert_eq!(wall.meta.options.columns, 1);
    assert_eq!(wall.meta.options.width, 600.0);
    assert_eq!(wall.meta.config.get_f64("columns"), Some(1.0));
}

#[test]
fn leading_comment_selects_json5() {
    let engine = Engine::new();
    let text = "// sprint board\n{items: ['Plan', 'Ship',],}";
    let wall = engine.parse_wall_sync(text, ParseOptions::default()).unwrap();
    assert_eq!(wall.meta.format, InputFormat::Json5);
    assert_eq!(wall.items, vec!["Plan", "Ship"]);
}
