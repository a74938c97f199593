use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use pdf_images::{Alignment, ConversionOptions, PageSize};
use std::path::PathBuf;

mod logger;

#[derive(Parser)]
#[command(name = "pdfimg", about = "Convert images into a PDF, one image per page", version)]
struct Cli {
    /// More log output (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert images to a PDF
    Convert {
        /// Input image files, in page order
        #[arg(short, long, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Directory for the output PDF
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Document name (default name when empty)
        #[arg(long)]
        name: Option<String>,

        /// Append _ddMMyyyy_HHmmss to the document name
        #[arg(long)]
        timestamp: bool,

        /// Page size
        #[arg(long, value_enum)]
        page_size: Option<PageSizeArg>,

        /// Page orientation (named sizes only)
        #[arg(long, value_enum)]
        orientation: Option<OrientationArg>,

        /// Page margin preset
        #[arg(long, value_enum)]
        margin: Option<MarginArg>,

        /// Scale each image to fit the page
        #[arg(long, conflicts_with = "no_fit")]
        fit: bool,

        /// Draw images at native size
        #[arg(long)]
        no_fit: bool,

        /// Alignment key, e.g. Mid-Middle or Top-Left
        #[arg(long)]
        align: Option<String>,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// JSON options file used as the base; flags override it
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write the effective options to a JSON file
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Print page placements only, don't write a PDF
        #[arg(long)]
        plan_only: bool,
    },

    /// List the named page sizes
    Sizes,
}

#[derive(Clone, Copy, ValueEnum)]
enum PageSizeArg {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    Legal,
    Letter,
    Tabloid,
    Auto,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
    Auto,
}

#[derive(Clone, Copy, ValueEnum)]
enum MarginArg {
    Default,
    Minimum,
    None,
}

impl From<PageSizeArg> for PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::A0 => Self::A0,
            PageSizeArg::A1 => Self::A1,
            PageSizeArg::A2 => Self::A2,
            PageSizeArg::A3 => Self::A3,
            PageSizeArg::A4 => Self::A4,
            PageSizeArg::A5 => Self::A5,
            PageSizeArg::Legal => Self::Legal,
            PageSizeArg::Letter => Self::Letter,
            PageSizeArg::Tabloid => Self::Tabloid,
            PageSizeArg::Auto => Self::Auto,
        }
    }
}

impl From<OrientationArg> for pdf_images::Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
            OrientationArg::Auto => Self::Auto,
        }
    }
}

impl From<MarginArg> for pdf_images::MarginMode {
    fn from(arg: MarginArg) -> Self {
        match arg {
            MarginArg::Default => Self::Default,
            MarginArg::Minimum => Self::Minimum,
            MarginArg::None => Self::None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::CliLogger::new(cli.verbose, cli.quiet).init()?;

    match cli.command {
        Commands::Convert {
            input,
            output_dir,
            name,
            timestamp,
            page_size,
            orientation,
            margin,
            fit,
            no_fit,
            align,
            title,
            config,
            save_config,
            plan_only,
        } => {
            let mut options = match &config {
                Some(path) => ConversionOptions::load(path)
                    .await
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => ConversionOptions::default(),
            };

            if !input.is_empty() {
                options.input_files = input;
            }
            if let Some(dir) = output_dir {
                options.output_dir = dir;
            }
            if let Some(name) = name {
                options.file_name = name;
            }
            if timestamp {
                options.append_date_time = true;
            }
            if let Some(size) = page_size {
                options.layout.page_size = size.into();
            }
            if let Some(orientation) = orientation {
                options.layout.orientation = orientation.into();
            }
            if let Some(margin) = margin {
                options.layout.margin_mode = margin.into();
            }
            if fit {
                options.layout.fit_to_page = true;
            } else if no_fit {
                options.layout.fit_to_page = false;
            }
            if let Some(key) = align {
                options.layout.alignment = Alignment::resolve(&key);
            }
            if title.is_some() {
                options.title = title;
            }

            if let Some(path) = &save_config {
                options.save(path).await?;
                println!("Saved options → {}", path.display());
            }

            if options.input_files.is_empty() {
                bail!("No input files: pass --input or a --config that lists them");
            }

            if plan_only {
                let (report, placements) = pdf_images::plan(&options).await?;
                print_plan(&report, &placements);
                return Ok(());
            }

            let outcome = pdf_images::convert(&options).await?;
            for failure in &outcome.failures {
                eprintln!("Skipped {}: {}", failure.path.display(), failure.message);
            }
            println!("Converted {} pages → {}", outcome.pages, outcome.path.display());
        }

        Commands::Sizes => {
            println!("Page sizes (portrait, mm):");
            for size in PageSize::ALL {
                match size.dimensions_mm() {
                    Some((w, h)) => println!("  {:<8} {} x {}", size.key(), w, h),
                    None => println!("  {:<8} image size", size.key()),
                }
            }
        }
    }

    Ok(())
}

fn print_plan(report: &pdf_images::LoadReport, placements: &[pdf_images::PagePlacement]) {
    println!("Page Placements (mm, top-left origin):");
    for (idx, (image, placement)) in report.images.iter().zip(placements).enumerate() {
        println!(
            "  {:>3}. {} ({}x{}px)",
            idx + 1,
            image.descriptor.display_name,
            image.descriptor.pixel_width,
            image.descriptor.pixel_height
        );
        println!(
            "       page {:.1} x {:.1}, image {:.1} x {:.1} at ({:.1}, {:.1}), scale {:.4}",
            placement.page_width,
            placement.page_height,
            placement.draw_width,
            placement.draw_height,
            placement.draw_x,
            placement.draw_y,
            placement.scale
        );
    }
    for failure in &report.failures {
        println!("  skipped {}: {}", failure.path.display(), failure.message);
    }
}
