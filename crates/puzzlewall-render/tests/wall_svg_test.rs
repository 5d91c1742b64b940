use puzzlewall_core::{Engine, ParseOptions};
use puzzlewall_render::svg::{LabelMode, SvgRenderOptions, render_layouted_svg};
use puzzlewall_render::{LayoutOptions, layout_parsed};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn render_fixture(name: &str, options: &SvgRenderOptions) -> String {
    let path = workspace_root()
        .join("fixtures")
        .join("puzzlewall")
        .join(name);
    let text = std::fs::read_to_string(&path).expect("fixture");
    let parsed = Engine::new()
        .parse_wall_sync(&text, ParseOptions::default())
        .expect("parse ok");
    let out = layout_parsed(&parsed, &LayoutOptions::default()).expect("layout ok");
    render_layouted_svg(&out, options).expect("render ok")
}

#[test]
fn project_tasks_svg_has_sixteen_labeled_pieces() {
    let svg = render_fixture("project_tasks.json", &SvgRenderOptions::default());
    assert!(svg.contains(r#"width="800" height="500""#));
    assert!(svg.contains(r#"viewBox="0 0 800 500""#));
    assert_eq!(svg.matches(r#"<g class="puzzle-piece""#).count(), 16);
    assert_eq!(svg.matches("<foreignObject").count(), 16);
    assert!(svg.contains(r#"<title id="puzzlewall-title">Project Tasks</title>"#));
    assert!(svg.contains(r#"<desc id="puzzlewall-desc">Tasks grouped by project phase</desc>"#));
    assert!(svg.contains(r#"<foreignObject x="15" y="15" width="170" height="95">"#));
    assert!(svg.contains(">Security audit</div>"));
    assert!(svg.contains(r#"<rect class="puzzle-wall-background""#));
}

#[test]
fn text_mode_svg_is_free_of_foreign_objects() {
    let options = SvgRenderOptions {
        label_mode: LabelMode::Text,
        diagram_id: Some("tasks".to_string()),
        ..SvgRenderOptions::default()
    };
    let svg = render_fixture("simple_tasks.yaml", &options);
    assert!(!svg.contains("foreignObject"));
    assert_eq!(svg.matches(r#"<text class="puzzle-piece-label""#).count(), 12);
    assert!(svg.contains(r#"<svg id="tasks""#));
    assert!(svg.contains("#tasks .puzzle-piece-shape"));
}

#[test]
fn rendering_is_deterministic() {
    let a = render_fixture("project_tasks.json", &SvgRenderOptions::default());
    let b = render_fixture("project_tasks.json", &SvgRenderOptions::default());
    assert_eq!(a, b);
}
