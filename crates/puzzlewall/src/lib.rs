#![forbid(unsafe_code)]

//! `puzzlewall` lays out a list of items as a wall of interlocking jigsaw pieces and renders
//! it headlessly.
//!
//! # Features
//!
//! - `render`: enable layout, SVG rendering, and click/hover interaction (`puzzlewall::render`)
//! - `raster`: enable PNG/JPG/PDF output via pure-Rust SVG rasterization/conversion

pub use puzzlewall_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use puzzlewall_render::interaction::{PieceActivation, PuzzleWall, hit_test};
    pub use puzzlewall_render::model::{LayoutedWall, PuzzlePieceLayout, PuzzleWallLayout};
    pub use puzzlewall_render::svg::{LabelMode, SvgRenderOptions};
    pub use puzzlewall_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use puzzlewall_render::{LayoutOptions, layout_parsed, layout_wall};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Parse(#[from] puzzlewall_core::Error),
        #[error(transparent)]
        Render(#[from] puzzlewall_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token, so several walls can be
    /// inlined in one document without their stylesheet and accessibility ids colliding.
    ///
    /// Unsupported characters become `-`, and the id is prefixed with `w-` when it does not start
    /// with an ASCII letter.
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        if raw.is_empty() {
            return "w-untitled".to_string();
        }

        let mut out = String::with_capacity(raw.len() + 4);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' || ch == ':' || ch == '.';
            out.push(if ok { ch } else { '-' });
        }

        let starts_ok = out.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
        if !starts_ok {
            out.insert_str(0, "w-");
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let out = out.trim_matches('-');
        if out.is_empty() || out == "w" {
            return "w-untitled".to_string();
        }
        out.to_string()
    }

    pub fn layout_wall_sync(
        engine: &puzzlewall_core::Engine,
        text: &str,
        parse_options: puzzlewall_core::ParseOptions,
        layout_options: &LayoutOptions,
    ) -> Result<LayoutedWall> {
        let parsed = engine.parse_wall_sync(text, parse_options)?;
        Ok(puzzlewall_render::layout_parsed(&parsed, layout_options)?)
    }

    pub fn render_layouted_svg(
        wall: &LayoutedWall,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        Ok(puzzlewall_render::svg::render_layouted_svg(wall, svg_options)?)
    }

    pub fn render_svg_sync(
        engine: &puzzlewall_core::Engine,
        text: &str,
        parse_options: puzzlewall_core::ParseOptions,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let wall = layout_wall_sync(engine, text, parse_options, layout_options)?;
        render_layouted_svg(&wall, svg_options)
    }

    /// Renders in-memory items (the component-style entry point) with optional config
    /// overrides such as `columns`, `width`, and `height`.
    pub fn render_items_svg_sync<I, S>(
        engine: &puzzlewall_core::Engine,
        items: I,
        overrides: Option<&puzzlewall_core::WallConfig>,
        parse_options: puzzlewall_core::ParseOptions,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parsed = engine.wall_from_items(items, overrides, parse_options)?;
        let wall = puzzlewall_render::layout_parsed(&parsed, layout_options)?;
        render_layouted_svg(&wall, svg_options)
    }

    /// Bundles an [`Engine`](puzzlewall_core::Engine) with parse, layout, and SVG options.
    #[derive(Clone)]
    pub struct WallRenderer {
        pub engine: puzzlewall_core::Engine,
        pub parse: puzzlewall_core::ParseOptions,
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl Default for WallRenderer {
        fn default() -> Self {
            Self {
                engine: puzzlewall_core::Engine::new(),
                parse: puzzlewall_core::ParseOptions::default(),
                layout: LayoutOptions::default(),
                svg: SvgRenderOptions::default(),
            }
        }
    }

    impl WallRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_site_config(mut self, site_config: puzzlewall_core::WallConfig) -> Self {
            self.engine = self.engine.with_site_config(site_config);
            self
        }

        pub fn parse_wall_sync(&self, text: &str) -> Result<puzzlewall_core::ParsedWall> {
            Ok(self.engine.parse_wall_sync(text, self.parse)?)
        }

        pub fn layout_wall_sync(&self, text: &str) -> Result<LayoutedWall> {
            layout_wall_sync(&self.engine, text, self.parse, &self.layout)
        }

        pub fn render_svg_sync(&self, text: &str) -> Result<String> {
            render_svg_sync(&self.engine, text, self.parse, &self.layout, &self.svg)
        }

        pub fn render_svg_sync_with(&self, text: &str, svg: &SvgRenderOptions) -> Result<String> {
            render_svg_sync(&self.engine, text, self.parse, &self.layout, svg)
        }

        pub fn render_svg_sync_with_diagram_id(
            &self,
            text: &str,
            diagram_id: &str,
        ) -> Result<String> {
            let mut svg = self.svg.clone();
            svg.diagram_id = Some(sanitize_svg_id(diagram_id));
            self.render_svg_sync_with(text, &svg)
        }

        /// Lays out `text` and wraps the result in an interactive [`PuzzleWall`].
        pub fn interactive_sync<'a>(&self, text: &str) -> Result<PuzzleWall<'a>> {
            let wall = self.layout_wall_sync(text)?;
            Ok(PuzzleWall::new(wall.layout))
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            text: &str,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::render_png_sync(
                &self.engine,
                text,
                self.parse,
                &self.layout,
                &self.svg,
                raster,
            )
        }

        #[cfg(feature = "raster")]
        pub fn render_jpeg_sync(
            &self,
            text: &str,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            raster::render_jpeg_sync(
                &self.engine,
                text,
                self.parse,
                &self.layout,
                &self.svg,
                raster,
            )
        }

        #[cfg(feature = "raster")]
        pub fn render_pdf_sync(&self, text: &str) -> raster::Result<Vec<u8>> {
            raster::render_pdf_sync(&self.engine, text, self.parse, &self.layout, &self.svg)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn sanitize_svg_id_produces_safe_tokens() {
            assert_eq!(sanitize_svg_id("  "), "w-untitled");
            assert_eq!(sanitize_svg_id("Project Tasks"), "Project-Tasks");
            assert_eq!(sanitize_svg_id("1st wall"), "w-1st-wall");
            assert_eq!(sanitize_svg_id("a<>b"), "a-b");
            assert_eq!(sanitize_svg_id("---"), "w-untitled");
        }

        #[test]
        fn renderer_produces_well_formed_svg() {
            let renderer = WallRenderer::new();
            let svg = renderer
                .render_svg_sync_with_diagram_id(r#"["A & B", "C"]"#, "demo wall")
                .unwrap();
            let doc = roxmltree::Document::parse(&svg).unwrap();
            let root = doc.root_element();
            assert_eq!(root.tag_name().name(), "svg");
            assert_eq!(root.attribute("id"), Some("demo-wall"));
            let pieces = root
                .descendants()
                .filter(|n| n.attribute("class") == Some("puzzle-piece"))
                .count();
            assert_eq!(pieces, 4);
        }

        #[test]
        fn render_items_honors_overrides() {
            let mut overrides = puzzlewall_core::WallConfig::empty_object();
            overrides.set_value("columns", 1.into());
            overrides.set_value("width", 300.into());
            overrides.set_value("height", 300.into());
            let svg = render_items_svg_sync(
                &puzzlewall_core::Engine::new(),
                ["One", "Two", "Three"],
                Some(&overrides),
                puzzlewall_core::ParseOptions::strict(),
                &LayoutOptions::default(),
                &SvgRenderOptions::default(),
            )
            .unwrap();
            assert!(svg.contains(r#"width="300" height="300""#));
            assert_eq!(svg.matches(r#"<g class="puzzle-piece""#).count(), 3);
        }

        #[test]
        fn parse_errors_surface_through_headless_error() {
            let renderer = WallRenderer {
                parse: puzzlewall_core::ParseOptions::strict(),
                ..WallRenderer::default()
            };
            let err = renderer
                .render_svg_sync(r#"{"items": ["A"], "config": {"columns": 0}}"#)
                .unwrap_err();
            assert!(matches!(err, HeadlessError::Parse(_)));
        }

        #[test]
        fn interactive_wall_dispatches_clicks() {
            let renderer = WallRenderer::new();
            let mut seen = Vec::new();
            {
                let mut wall = renderer
                    .interactive_sync(r#"["A", "B"]"#)
                    .unwrap()
                    .on_piece_click(|index, item| seen.push((index, item.to_string())));
                wall.activate(1);
                wall.activate(3);
            }
            assert_eq!(seen, vec![(1, "B".to_string()), (3, String::new())]);
        }
    }
}
