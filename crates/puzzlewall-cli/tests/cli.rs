use assert_cmd::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn repo_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("expected crates/<name> layout")
        .to_path_buf()
}

fn fixture(name: &str) -> PathBuf {
    let path = repo_root().join("fixtures").join("puzzlewall").join(name);
    assert!(path.exists(), "fixture missing: {}", path.display());
    path
}

fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo_bin!("puzzlewall-cli"));
    cmd.current_dir(repo_root());
    cmd
}

fn write_input(dir: &tempfile::TempDir, text: &str) -> PathBuf {
    let path = dir.path().join("items.json");
    fs::write(&path, text).expect("write input");
    path
}

fn stdout_of(cmd: &mut Command) -> String {
    let out = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(out).expect("utf-8 stdout")
}

#[test]
fn cli_parses_tree_into_items() {
    let stdout = stdout_of(cli().args(["parse", fixture("project_tasks.json").to_str().unwrap()]));
    let items: Vec<String> = serde_json::from_str(&stdout).expect("json items");
    assert_eq!(items.len(), 16);
    assert_eq!(items[4], "Setup environment");
}

#[test]
fn cli_parse_meta_reports_resolved_options() {
    let stdout = stdout_of(cli().args([
        "parse",
        "--meta",
        "--columns",
        "2",
        fixture("simple_tasks.yaml").to_str().unwrap(),
    ]));
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(value["meta"]["format"], "yaml");
    assert_eq!(value["meta"]["title"], "Simple Task List");
    assert_eq!(value["meta"]["options"]["columns"], 2);
    assert_eq!(value["items"].as_array().map(Vec::len), Some(12));
}

#[test]
fn cli_renders_svg_to_stdout() {
    let stdout = stdout_of(cli().args([
        "render",
        "--id",
        "demo wall",
        fixture("sparse.json5").to_str().unwrap(),
    ]));
    assert!(stdout.starts_with(r#"<svg id="demo-wall""#));
    assert_eq!(stdout.matches(r#"<g class="puzzle-piece""#).count(), 4);
    assert!(stdout.contains(">Alpha</div>"));
}

#[test]
fn cli_renders_png_smoke() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let out = tmp.path().join("wall.png");

    cli()
        .args([
            "render",
            "--format",
            "png",
            "--out",
            out.to_string_lossy().as_ref(),
            fixture("project_tasks.json").to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&out).expect("read png");
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "output is not a PNG"
    );
    let decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    let reader = decoder.read_info().expect("png header");
    assert_eq!((reader.info().width, reader.info().height), (800, 500));
}

#[test]
fn cli_renders_pdf_with_default_out_path_for_file_input() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let tmp_fixture = tmp.path().join("board.yaml");
    fs::copy(fixture("simple_tasks.yaml"), &tmp_fixture).expect("copy fixture");
    let expected_out = tmp_fixture.with_extension("pdf");

    cli()
        .args([
            "render",
            "--format",
            "pdf",
            tmp_fixture.to_string_lossy().as_ref(),
        ])
        .assert()
        .success();

    let bytes = fs::read(&expected_out).expect("read pdf");
    assert!(bytes.starts_with(b"%PDF-"), "output is not a PDF");
}

#[test]
fn cli_click_reports_the_tab_owner() {
    // 4x2 wall of 200x200 pieces: the right tab of piece 0 reaches into cell (0,1).
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_input(&tmp, r#"["A", "B", "C", "D", "E", "F", "G", "H"]"#);
    let stdout = stdout_of(cli().args([
        "click",
        "--at",
        "215,100",
        "--width",
        "800",
        "--height",
        "400",
        input.to_str().unwrap(),
    ]));
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(value["index"], 0);
    assert_eq!(value["item"], "A");
}

#[test]
fn cli_click_outside_the_grid_exits_3() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let input = write_input(&tmp, r#"["A", "B"]"#);
    cli()
        .args(["click", "--index", "9", input.to_str().unwrap()])
        .assert()
        .code(3);
}

#[test]
fn cli_strict_parse_rejects_zero_columns() {
    cli()
        .args(["render", fixture("invalid_columns.json").to_str().unwrap()])
        .assert()
        .code(1);
    cli()
        .args([
            "render",
            "--suppress-errors",
            fixture("invalid_columns.json").to_str().unwrap(),
        ])
        .assert()
        .success();
}

#[test]
fn cli_oversized_grid_fails_instead_of_allocating() {
    cli()
        .args([
            "render",
            "--columns",
            "20000000",
            fixture("sparse.json5").to_str().unwrap(),
        ])
        .assert()
        .code(1);

    let stdout = stdout_of(cli().args([
        "parse",
        "--meta",
        "--suppress-errors",
        "--columns",
        "20000000",
        fixture("sparse.json5").to_str().unwrap(),
    ]));
    let value: serde_json::Value = serde_json::from_str(&stdout).expect("json");
    assert_eq!(value["meta"]["options"]["columns"], 65536);
}

#[test]
fn cli_usage_errors_exit_2() {
    cli().args(["--no-such-flag"]).assert().code(2);
    cli().args(["click", "-"]).assert().code(2);
}
