use puzzlewall::render::raster::{self, RasterError, RasterOptions};
use puzzlewall::render::{LabelMode, LayoutOptions, PuzzleWall, SvgRenderOptions, sanitize_svg_id};
use puzzlewall::{Engine, InputFormat, ParseOptions, WallConfig, WallOptions};
use puzzlewall_render::model::LayoutedWall;
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Parse(puzzlewall::Error),
    Render(puzzlewall_render::Error),
    Raster(RasterError),
    Json(serde_json::Error),
    NoPiece,
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Parse(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::NoPiece => write!(f, "No puzzle piece at the requested position"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<puzzlewall::Error> for CliError {
    fn from(value: puzzlewall::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<puzzlewall_render::Error> for CliError {
    fn from(value: puzzlewall_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Parse,
    Layout,
    Render,
    Click,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
    Jpeg,
    Pdf,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "pdf" => Ok(Self::Pdf),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum ClickTarget {
    At(f64, f64),
    Index(usize),
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    with_meta: bool,
    suppress_errors: bool,
    overrides: WallConfig,
    label_mode: LabelMode,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    padding: f64,
    diagram_id: Option<String>,
    click: Option<ClickTarget>,
    out: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::Parse,
            input: None,
            pretty: false,
            with_meta: false,
            suppress_errors: false,
            overrides: WallConfig::empty_object(),
            label_mode: LabelMode::Html,
            render_format: RenderFormat::Svg,
            render_scale: 1.0,
            background: None,
            padding: 0.0,
            diagram_id: None,
            click: None,
            out: None,
        }
    }
}

#[derive(Serialize)]
struct MetaOut<'a> {
    format: InputFormat,
    title: Option<&'a str>,
    description: Option<&'a str>,
    config: &'a Value,
    effective_config: &'a Value,
    options: &'a WallOptions,
}

#[derive(Serialize)]
struct ParseOut<'a> {
    meta: MetaOut<'a>,
    items: &'a [String],
}

fn usage() -> &'static str {
    "puzzlewall-cli\n\
\n\
USAGE:\n\
  puzzlewall-cli [parse] [--pretty] [--meta] [CONFIG] [<path>|-]\n\
  puzzlewall-cli layout [--pretty] [CONFIG] [<path>|-]\n\
  puzzlewall-cli render [--format svg|png|jpg|pdf] [--labels html|text] [--scale <n>] [--background <css-color>] [--padding <n>] [--id <diagram-id>] [--out <path>] [CONFIG] [<path>|-]\n\
  puzzlewall-cli click (--at <x>,<y> | --index <n>) [--pretty] [CONFIG] [<path>|-]\n\
\n\
CONFIG:\n\
  --columns <n> --rows <n> --width <w> --height <h> --set <key>=<json-or-text> --suppress-errors\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is JSON, JSON5, or YAML: an item array, {items, config}, or a {label, children} tree.\n\
  - CONFIG flags override the document's own config.\n\
  - parse prints the item list by default; --meta wraps it with the resolved configuration.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG/JPG/PDF output defaults to writing next to the input file (or ./out.<ext> for stdin).\n\
  - Set PUZZLEWALL_LOG (e.g. debug) to enable diagnostics on stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_number<T: FromStr>(raw: &str) -> Result<T, CliError> {
    raw.trim().parse::<T>().map_err(|_| CliError::Usage(usage()))
}

fn parse_point(raw: &str) -> Result<(f64, f64), CliError> {
    let (x, y) = raw.split_once(',').ok_or(CliError::Usage(usage()))?;
    let (x, y) = (parse_number::<f64>(x)?, parse_number::<f64>(y)?);
    if !(x.is_finite() && y.is_finite()) {
        return Err(CliError::Usage(usage()));
    }
    Ok((x, y))
}

/// `key=value`; the value is read as JSON when possible and as plain text otherwise.
fn parse_setting(raw: &str) -> Result<(String, Value), CliError> {
    let (key, value) = raw.split_once('=').ok_or(CliError::Usage(usage()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::Usage(usage()));
    }
    let value = serde_json::from_str::<Value>(value.trim())
        .unwrap_or_else(|_| Value::String(value.trim().to_string()));
    Ok((key.to_string(), value))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "parse" => args.command = Command::Parse,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "click" => args.command = Command::Click,
            "--pretty" => args.pretty = true,
            "--meta" => args.with_meta = true,
            "--suppress-errors" => args.suppress_errors = true,
            "--columns" | "--rows" => {
                let key = a.trim_start_matches('-');
                let n = parse_number::<i64>(next_value(&mut it)?)?;
                args.overrides.set_value(key, Value::from(n));
            }
            "--width" | "--height" => {
                let key = a.trim_start_matches('-');
                let n = parse_number::<f64>(next_value(&mut it)?)?;
                args.overrides.set_value(key, Value::from(n));
            }
            "--set" => {
                let (key, value) = parse_setting(next_value(&mut it)?)?;
                args.overrides.set_value(&key, value);
            }
            "--labels" => {
                args.label_mode = match next_value(&mut it)?.trim() {
                    "html" => LabelMode::Html,
                    "text" => LabelMode::Text,
                    _ => return Err(CliError::Usage(usage())),
                };
            }
            "--format" => {
                args.render_format = next_value(&mut it)?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                args.render_scale = parse_number::<f32>(next_value(&mut it)?)?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let bg = next_value(&mut it)?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--padding" => {
                args.padding = parse_number::<f64>(next_value(&mut it)?)?;
                if !(args.padding.is_finite() && args.padding >= 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--id" => args.diagram_id = Some(next_value(&mut it)?.clone()),
            "--out" => args.out = Some(next_value(&mut it)?.clone()),
            "--at" => {
                let (x, y) = parse_point(next_value(&mut it)?)?;
                args.click = Some(ClickTarget::At(x, y));
            }
            "--index" => {
                let index = parse_number::<usize>(next_value(&mut it)?)?;
                args.click = Some(ClickTarget::Index(index));
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if matches!(args.command, Command::Click) && args.click.is_none() {
        return Err(CliError::Usage(usage()));
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("PUZZLEWALL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn parse_options(args: &Args) -> ParseOptions {
    ParseOptions {
        suppress_errors: args.suppress_errors,
    }
}

fn layout(engine: &Engine, text: &str, args: &Args) -> Result<LayoutedWall, CliError> {
    let parsed =
        engine.parse_wall_with_overrides_sync(text, Some(&args.overrides), parse_options(args))?;
    Ok(puzzlewall_render::layout_parsed(
        &parsed,
        &LayoutOptions::default(),
    )?)
}

fn svg_options(args: &Args, label_mode: LabelMode) -> SvgRenderOptions {
    SvgRenderOptions {
        viewbox_padding: args.padding,
        diagram_id: args.diagram_id.as_deref().map(sanitize_svg_id),
        label_mode,
        ..SvgRenderOptions::default()
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let engine = Engine::new();

    match args.command {
        Command::Parse => {
            let parsed = engine.parse_wall_with_overrides_sync(
                &text,
                Some(&args.overrides),
                parse_options(&args),
            )?;
            if args.with_meta {
                let out = ParseOut {
                    meta: MetaOut {
                        format: parsed.meta.format,
                        title: parsed.meta.title.as_deref(),
                        description: parsed.meta.description.as_deref(),
                        config: parsed.meta.config.as_value(),
                        effective_config: parsed.meta.effective_config.as_value(),
                        options: &parsed.meta.options,
                    },
                    items: &parsed.items,
                };
                write_json(&out, args.pretty)
            } else {
                write_json(&parsed.items, args.pretty)
            }
        }
        Command::Layout => {
            let wall = layout(&engine, &text, &args)?;
            write_json(&wall, args.pretty)
        }
        Command::Click => {
            let wall = layout(&engine, &text, &args)?;
            let mut wall = PuzzleWall::new(wall.layout);
            let activation = match args.click {
                Some(ClickTarget::At(x, y)) => wall.click_at(x, y),
                Some(ClickTarget::Index(index)) => wall.activate(index),
                None => return Err(CliError::Usage(usage())),
            };
            let activation = activation.ok_or(CliError::NoPiece)?;
            write_json(&activation, args.pretty)
        }
        Command::Render => {
            let wall = layout(&engine, &text, &args)?;
            let raster_options = RasterOptions {
                scale: args.render_scale,
                background: args.background.clone(),
                ..RasterOptions::default()
            };
            match args.render_format {
                RenderFormat::Svg => {
                    let svg = puzzlewall_render::svg::render_layouted_svg(
                        &wall,
                        &svg_options(&args, args.label_mode),
                    )?;
                    write_text(&svg, args.out.as_deref())
                }
                RenderFormat::Png => write_raster(&wall, &args, "png", |svg| {
                    raster::svg_to_png(svg, &raster_options)
                }),
                RenderFormat::Jpeg => write_raster(&wall, &args, "jpg", |svg| {
                    raster::svg_to_jpeg(svg, &raster_options)
                }),
                RenderFormat::Pdf => write_raster(&wall, &args, "pdf", raster::svg_to_pdf),
            }
        }
    }
}

/// Raster encoders get text labels; `<foreignObject>` content is not rasterized.
fn write_raster(
    wall: &LayoutedWall,
    args: &Args,
    ext: &str,
    encode: impl FnOnce(&str) -> raster::Result<Vec<u8>>,
) -> Result<(), CliError> {
    let svg =
        puzzlewall_render::svg::render_layouted_svg(wall, &svg_options(args, LabelMode::Text))?;
    let bytes = encode(&svg)?;
    let out = args
        .out
        .as_deref()
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| default_raster_out_path(args.input.as_deref(), ext));
    std::fs::write(&out, bytes)?;
    tracing::debug!(path = %out.display(), "wrote raster output");
    Ok(())
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(CliError::NoPiece) => {
            eprintln!("{}", CliError::NoPiece);
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
