use crate::config::{Config, load_config};
use crate::drawio::render_drawio_file;
use crate::layout::compute_layout;
use crate::layout_dump::LayoutDump;
use crate::parser::parse_roadmap;
use crate::render::{render_svg, write_output};
use crate::resolve::resolve;
use crate::writer::write_resolved;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "rmr", version, about = "Roadmap renderer: text roadmaps to SVG and draw.io")]
pub struct Args {
    /// Input file (.roadmap, .txt or .md) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON/JSON5 file (theme, themeVariables, layout, palette)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Pixels per period column
    #[arg(long = "period-width")]
    pub period_width: Option<f32>,

    /// Pixels per item row
    #[arg(long = "item-height")]
    pub item_height: Option<f32>,

    /// Log pipeline decisions to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Drawio,
    DrawioCompressed,
    Json,
    Text,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Drawio | OutputFormat::DrawioCompressed => "drawio",
            OutputFormat::Json => "json",
            OutputFormat::Text => "roadmap",
        }
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.period_width {
        config.layout.period_width = width;
    }
    if let Some(height) = args.item_height {
        config.layout.item_height = height;
    }

    let (input, is_markdown) = read_input(args.input.as_deref())?;
    let documents = if is_markdown {
        extract_roadmap_blocks(&input)
    } else {
        vec![input]
    };

    if documents.is_empty() {
        return Err(anyhow::anyhow!("No roadmap blocks found in input"));
    }

    if documents.len() == 1 {
        let rendered = render_document(&documents[0], &config, args.output_format)?;
        write_output(&rendered, args.output.as_deref())?;
        return Ok(());
    }

    // Multiple documents (Markdown input)
    let outputs = resolve_multi_outputs(args.output.as_deref(), args.output_format, documents.len())?;
    for (document, output) in documents.iter().zip(&outputs) {
        let rendered = render_document(document, &config, args.output_format)?;
        write_output(&rendered, Some(output))?;
        tracing::info!(path = %output.display(), "wrote roadmap");
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .try_init();
}

pub fn render_document(text: &str, config: &Config, format: OutputFormat) -> Result<String> {
    let resolved = resolve(&parse_roadmap(text), Some(config.palette.as_slice()));
    let layout = compute_layout(&resolved, &config.theme, &config.layout);
    match format {
        OutputFormat::Svg => Ok(render_svg(&layout, &config.theme)),
        OutputFormat::Drawio => render_drawio_file(&layout, &config.theme, false),
        OutputFormat::DrawioCompressed => render_drawio_file(&layout, &config.theme, true),
        OutputFormat::Json => LayoutDump::from_layout(&layout).to_json(),
        OutputFormat::Text => Ok(write_resolved(&resolved)),
    }
}

fn read_input(path: Option<&Path>) -> Result<(String, bool)> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok((buf, false));
        }
        let content = std::fs::read_to_string(path)?;
        let is_md = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| matches!(ext, "md" | "markdown"))
            .unwrap_or(false);
        return Ok((content, is_md));
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok((buf, false))
}

fn extract_roadmap_blocks(input: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut fence: Option<&str> = None;
    let mut current = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim();
        match fence {
            None => {
                fence = detect_roadmap_fence(trimmed);
            }
            Some(open) if is_fence_end(trimmed, open) => {
                fence = None;
                blocks.push(current.join("\n"));
                current.clear();
            }
            Some(_) => current.push(line),
        }
    }

    blocks
}

fn detect_roadmap_fence(line: &str) -> Option<&'static str> {
    for fence in ["```", "~~~"] {
        if let Some(rest) = line.strip_prefix(fence) {
            let rest = rest.trim_start_matches(fence.chars().next().unwrap_or('`')).trim();
            if rest.starts_with("roadmap") {
                return Some(fence);
            }
        }
    }
    None
}

fn is_fence_end(line: &str, fence: &str) -> bool {
    match line.strip_prefix(fence) {
        Some(rest) => rest.trim().is_empty(),
        None => false,
    }
}

fn resolve_multi_outputs(
    output: Option<&Path>,
    format: OutputFormat,
    count: usize,
) -> Result<Vec<PathBuf>> {
    let ext = format.extension();
    let base = output.ok_or_else(|| anyhow::anyhow!("Output path required for markdown input"))?;
    if base.is_dir() {
        return Ok((0..count)
            .map(|idx| base.join(format!("roadmap-{}.{}", idx + 1, ext)))
            .collect());
    }
    let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or("roadmap");
    let parent = base.parent().unwrap_or_else(|| Path::new("."));
    Ok((0..count)
        .map(|idx| parent.join(format!("{}-{}.{}", stem, idx + 1, ext)))
        .collect())
}
