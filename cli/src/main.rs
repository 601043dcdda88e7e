//! repdf CLI - rebuild PDFs from OCR line extractions

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use repdf::render::{render_document_with_progress, RenderReport};
use repdf::{
    load_extraction, load_layout_table, LayoutSchema, PageGeometry, PageSelection,
    PdfPageWriter, RenderOptions,
};

/// Pages between printed progress lines.
const PROGRESS_EVERY: u32 = 10;

#[derive(Parser)]
#[command(name = "repdf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rebuild a PDF from an OCR line extraction", long_about = None)]
struct Cli {
    /// Input extraction JSON
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an extraction to PDF
    Render {
        /// Input extraction JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Layout table CSV exported alongside the extraction
        #[arg(short, long, value_name = "CSV")]
        layout: Option<PathBuf>,

        /// Output PDF (defaults to the input name with a .pdf extension)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page range (e.g., "1-10", "1,3,5")
        #[arg(long)]
        pages: Option<String>,

        /// Output page size
        #[arg(long, value_enum, default_value = "a4")]
        page_size: PageSize,

        /// Margin in points
        #[arg(long, default_value = "72")]
        margin: f64,

        /// Standard PDF font name
        #[arg(long, default_value = "Helvetica", env = "REPDF_FONT")]
        font: String,

        /// Font size in points
        #[arg(long, default_value = "12")]
        font_size: f64,
    },

    /// Show extraction information
    Info {
        /// Input extraction JSON
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSize {
    /// A4 (595 x 842 pt)
    A4,
    /// US Letter (612 x 792 pt)
    Letter,
}

impl PageSize {
    fn geometry(self, margin: f64) -> PageGeometry {
        match self {
            PageSize::A4 => PageGeometry::a4(),
            PageSize::Letter => PageGeometry::letter(),
        }
        .with_margin(margin)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Render {
            input,
            layout,
            output,
            pages,
            page_size,
            margin,
            font,
            font_size,
        }) => {
            let options = build_options(pages.as_deref(), page_size, margin, font, font_size);
            options.and_then(|options| {
                cmd_render(&input, layout.as_deref(), output.as_deref(), &options)
            })
        }
        Some(Commands::Info { input, json }) => cmd_info(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render if input is provided
            if let Some(input) = cli.input {
                let layout = sibling_layout(&input);
                cmd_render(
                    &input,
                    layout.as_deref(),
                    cli.output.as_deref(),
                    &RenderOptions::default(),
                )
            } else {
                println!("{}", "Usage: repdf <FILE> [OUTPUT]".yellow());
                println!("       repdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn build_options(
    pages: Option<&str>,
    page_size: PageSize,
    margin: f64,
    font: String,
    font_size: f64,
) -> Result<RenderOptions, Box<dyn std::error::Error>> {
    let page_selection = match pages {
        Some(p) => PageSelection::parse(p)?,
        None => PageSelection::All,
    };

    Ok(RenderOptions::new()
        .with_geometry(page_size.geometry(margin))
        .with_font(font, font_size)
        .with_pages(page_selection)
        .with_progress_interval(PROGRESS_EVERY))
}

/// `layout.csv` in the same directory as the extraction, if present.
fn sibling_layout(input: &Path) -> Option<PathBuf> {
    let candidate = input.with_file_name("layout.csv");
    candidate.is_file().then_some(candidate)
}

fn cmd_render(
    input: &Path,
    layout: Option<&Path>,
    output: Option<&Path>,
    options: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| input.with_extension("pdf"));

    let extraction = load_extraction(input)?;

    if let Some(path) = layout {
        let table = load_layout_table(path, &LayoutSchema::textract())?;
        println!(
            "{} {} ({} rows)",
            "Layout".cyan(),
            path.display(),
            table.len()
        );
    }

    let total = extraction.page_count();
    println!("{} {} pages...", "Processing".cyan(), total);

    let pb = ProgressBar::new(u64::from(total));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut writer = PdfPageWriter::create(&output, options.geometry)?;
    let report = render_document_with_progress(&extraction, &mut writer, options, |page, _| {
        if page % PROGRESS_EVERY == 0 {
            pb.println(format!("Processed page {}", page));
        }
        pb.set_position(u64::from(page));
    })?;

    pb.finish_with_message("Done!");
    print_report(&report);
    println!("{} {}", "Saved to".green(), output.display());

    Ok(())
}

fn print_report(report: &RenderReport) {
    println!(
        "{}: {} pages, {} lines drawn",
        "Rendered".bold(),
        report.page_count,
        report.drawn_count
    );

    if !report.is_clean() {
        println!(
            "{}: {} lines skipped",
            "Warning".yellow().bold(),
            report.skipped_count()
        );
        for failure in &report.failures {
            println!(
                "  {} page {}: {}... ({})",
                "├─".dimmed(),
                failure.page,
                failure.excerpt,
                failure.error
            );
        }
    }
}

fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let extraction = load_extraction(input)?;
    let summary = extraction.summary();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{}", "Extraction Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), summary.page_count);
    println!("{}: {}", "Blocks".bold(), summary.block_count);
    println!("{}: {}", "Lines".bold(), summary.line_count);

    println!();
    println!("{}", "Blocks by Type".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for (block_type, count) in &summary.blocks_by_type {
        println!("{}: {}", block_type.bold(), count);
    }

    let empty_pages = (1..=summary.page_count)
        .filter(|p| !summary.lines_per_page.contains_key(p))
        .count();
    if empty_pages > 0 {
        println!();
        println!("{}: {}", "Pages without lines".yellow(), empty_pages);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "repdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF reconstruction from OCR line extractions");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/repdf".dimmed());
    println!("License: MIT");
}
