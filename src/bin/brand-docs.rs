//! brand-docs CLI
//!
//! Renders the branded document templates to PDF files.

use anyhow::{Context, Result};
use brand_docs::brand::{AssetPaths, Brand};
use brand_docs::templates::{self, TemplateContext, TemplateKind};
use chrono::NaiveDate;
use clap::{ArgGroup, Parser};
use std::path::{Path, PathBuf};

/// Generate branded PDF documents
#[derive(Parser)]
#[command(name = "brand-docs")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("mode").required(true).args(["template", "all", "list"])))]
#[command(after_help = "EXAMPLES:
    # Render the letterhead to output/letterhead_professional.pdf
    brand-docs --template letterhead

    # Render an NDA with its own wording
    brand-docs --template nda --body nda.txt --output out/nda.pdf

    # Render every template with another asset directory
    brand-docs --all --assets ../brand --output-dir build")]
struct Cli {
    /// Template to render (see --list)
    #[arg(short, long, value_parser = parse_template)]
    template: Option<TemplateKind>,

    /// Render every template
    #[arg(long)]
    all: bool,

    /// List the available templates
    #[arg(long)]
    list: bool,

    /// Output PDF path [default: <output-dir>/<template file name>]
    #[arg(short, long, conflicts_with = "all")]
    output: Option<PathBuf>,

    /// Directory generated files are written to
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Brand asset directory (palette, fonts, logos, watermark)
    #[arg(long, env = "BRAND_DOCS_ASSETS", default_value = "assets")]
    assets: PathBuf,

    /// Palette JSON file to use instead of <assets>/brand_colors.json
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Date printed on letters, YYYY-MM-DD [default: today]
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Text file with body paragraphs separated by blank lines
    #[arg(long)]
    body: Option<PathBuf>,
}

fn parse_template(name: &str) -> Result<TemplateKind, String> {
    name.parse().map_err(|e| format!("{e}"))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    if cli.list {
        for kind in TemplateKind::ALL {
            println!("{:<22}{}", kind.name(), kind.default_file_name());
        }
        return Ok(());
    }

    let mut brand = Brand::from_assets(AssetPaths::new(&cli.assets));
    if let Some(palette) = &cli.palette {
        anyhow::ensure!(
            palette.is_file(),
            "palette file {} does not exist",
            palette.display()
        );
        brand = brand.with_palette_file(palette);
    }

    let mut context = TemplateContext::default();
    if let Some(date) = cli.date {
        context = context.with_date(date);
    }
    if let Some(body) = &cli.body {
        let text = std::fs::read_to_string(body)
            .with_context(|| format!("failed to read body text from {}", body.display()))?;
        context = context.with_body_text(&text);
    }

    let kinds: Vec<TemplateKind> = match cli.template {
        Some(kind) if !cli.all => vec![kind],
        _ => TemplateKind::ALL.to_vec(),
    };

    for kind in kinds {
        let path = match (&cli.output, cli.all) {
            (Some(output), false) => output.clone(),
            _ => cli.output_dir.join(kind.default_file_name()),
        };
        generate(kind, &brand, &context, &path)?;
    }
    Ok(())
}

fn generate(kind: TemplateKind, brand: &Brand, context: &TemplateContext, path: &Path) -> Result<()> {
    templates::generate(kind, brand, context, path)
        .with_context(|| format!("failed to generate {kind} at {}", path.display()))?;
    println!("Generated {}", path.display());
    Ok(())
}
