use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use cjk_render::{CjkRenderer, Ratio, RenderMode, RenderedText};
use clap::Parser;
use log::{debug, LevelFilter};

#[derive(Parser, Debug)]
#[command(author, version, about = "Render CJK characters to binary matrices or braille")]
struct Cli {
    /// Characters to render
    text: String,
    /// Base resolution height of each character
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    n: u32,
    /// Output the matrix as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// TrueType/OpenType font file (defaults to a discovered CJK font)
    #[arg(long, env = "CJK_RENDER_FONT")]
    font: Option<PathBuf>,
    /// Face index inside a font collection (.ttc)
    #[arg(long, default_value_t = 0)]
    font_index: u32,
    /// Aspect ratio as width:height
    #[arg(long, value_name = "W:H", default_value = "1:1", conflicts_with = "braille")]
    resolution_ratio: Ratio,
    /// Render using Unicode braille symbols
    #[arg(long, default_value_t = false)]
    braille: bool,
    /// Write the result to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Cli {
    fn mode(&self) -> RenderMode {
        if self.braille {
            RenderMode::Braille
        } else {
            RenderMode::Binary(self.resolution_ratio)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let renderer = load_renderer(cli.font.as_ref(), cli.font_index)?;

    let rendered = renderer
        .render_text(&cli.text, cli.n, cli.mode())
        .with_context(|| format!("failed to render {:?}", cli.text))?;
    debug!("rendered {}x{} matrix", rendered.width(), rendered.height());

    match &cli.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("failed to create {:?}", path))?;
            let mut out = BufWriter::new(file);
            write_rendered(&mut out, &rendered, cli.json)?;
            out.flush().with_context(|| format!("failed to write {:?}", path))?;
        },
        None => write_rendered(&mut io::stdout().lock(), &rendered, cli.json)?,
    }

    Ok(())
}

fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new().filter_level(level).parse_default_env().init();
}

fn load_renderer(font: Option<&PathBuf>, font_index: u32) -> Result<CjkRenderer> {
    match font {
        Some(path) => CjkRenderer::from_font_path(path, font_index)
            .with_context(|| format!("failed to load font {:?}", path)),
        None => CjkRenderer::with_default_font(font_index)
            .context("failed to load default font, pass --font <PATH>"),
    }
}

fn write_rendered<W: Write>(out: &mut W, rendered: &RenderedText, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", rendered.to_json()?)?;
    } else {
        for row in rendered.text_rows() {
            writeln!(out, "{}", row)?;
        }
    }
    Ok(())
}
