use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use grayify_core::config;
use grayify_core::exporters;
use grayify_core::grayscale;
use grayify_core::loader::Loader;
use grayify_core::models::OutputFormat;
use grayify_core::stats;
use grayify_core::verbose_println;
use grayify_core::{analysis, ImageData};

#[derive(Parser)]
#[command(name = "grayify")]
#[command(version, about = "Image color analysis and grayscale conversion", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an image's color composition and intensity statistics
    Analyze {
        /// Input image file
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Convert an image to grayscale and save it as PNG
    Convert {
        /// Input image file
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Export pixel layout (gray8 or rgb8)
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,

        /// Configuration file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Enable verbose diagnostics
        #[arg(long)]
        verbose: bool,
    },

    /// Convert multiple images in parallel
    Batch {
        /// Input image files
        #[arg(value_name = "INPUTS")]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Export pixel layout (gray8 or rgb8)
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,

        /// Configuration file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Enable verbose diagnostics
        #[arg(long)]
        verbose: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze { input } => cmd_analyze(input),

        Commands::Convert {
            input,
            out,
            format,
            config,
            verbose,
        } => cmd_convert(input, out, format, config, verbose),

        Commands::Batch {
            inputs,
            out,
            format,
            threads,
            config,
            verbose,
        } => cmd_batch(inputs, out, format, threads, config, verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_analyze(input: PathBuf) -> Result<(), String> {
    let loader = Loader::new();
    println!("Analyzing {}...", input.display());

    let image = load_and_describe(&loader, &input)?;

    let report = analysis::analyze(&image)?;
    println!("\nImage Analysis:");
    println!("  Dimensions: {}x{} pixels", report.width, report.height);
    println!("  Color type: {}", report.color_type.as_str());
    println!(
        "  Grayscale: {}",
        if report.is_monochrome { "yes" } else { "no" }
    );
    println!(
        "  Transparency: {}",
        if report.has_transparency { "yes" } else { "no" }
    );

    let gray = grayscale::to_grayscale(&image)?;
    let stats = stats::compute_stats(&gray)?;
    println!("\nGrayscale Statistics:");
    println!("  Mean intensity: {:.2}", stats.mean);
    println!("  Min intensity: {}", stats.min);
    println!("  Max intensity: {}", stats.max);
    println!("  Contrast: {}", stats.contrast());

    Ok(())
}

fn cmd_convert(
    input: PathBuf,
    out: Option<PathBuf>,
    format: Option<String>,
    config_path: Option<PathBuf>,
    verbose: bool,
) -> Result<(), String> {
    let (output_dir, export_format) = load_settings(config_path.as_deref(), out, format, verbose)?;
    let loader = Loader::new();
    convert_one(&loader, &input, &output_dir, export_format)
}

fn cmd_batch(
    inputs: Vec<PathBuf>,
    out: Option<PathBuf>,
    format: Option<String>,
    threads: Option<usize>,
    config_path: Option<PathBuf>,
    verbose: bool,
) -> Result<(), String> {
    if inputs.is_empty() {
        return Err("No input files provided".to_string());
    }

    let (output_dir, export_format) = load_settings(config_path.as_deref(), out, format, verbose)?;

    if let Some(n) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
    }

    let loader = Loader::new();
    let failed: usize = inputs
        .par_iter()
        .map(
            |input| match convert_one(&loader, input, &output_dir, export_format) {
                Ok(()) => 0,
                Err(e) => {
                    eprintln!("  {}: {}", input.display(), e);
                    1
                }
            },
        )
        .sum();

    println!("\nProcessed {} of {} files", inputs.len() - failed, inputs.len());
    if failed == 0 {
        Ok(())
    } else {
        Err(format!("{} file(s) failed", failed))
    }
}

/// Resolve output directory and export format from config file and CLI flags.
/// Flags win over the config file.
fn load_settings(
    config_path: Option<&Path>,
    out: Option<PathBuf>,
    format: Option<String>,
    verbose: bool,
) -> Result<(PathBuf, OutputFormat), String> {
    let handle = config::load_config(config_path);
    config::set_verbose(verbose || handle.config.verbose);

    for warning in &handle.warnings {
        verbose_println!("{}", warning);
    }
    if let Some(source) = &handle.source {
        verbose_println!("Loaded config from {}", source.display());
    }

    let output_dir = out.unwrap_or(handle.config.output_dir);
    let export_format = match format {
        Some(s) => s.parse::<OutputFormat>()?,
        None => handle.config.export_format,
    };

    Ok((output_dir, export_format))
}

fn load_and_describe(loader: &Loader, input: &Path) -> Result<ImageData, String> {
    let image = loader.load(input)?;
    println!(
        "  Image: {}x{}, {} channels",
        image.width, image.height, image.channels
    );
    Ok(image)
}

fn convert_one(
    loader: &Loader,
    input: &Path,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<(), String> {
    println!("Converting {} to grayscale...", input.display());
    let image = load_and_describe(loader, input)?;

    // Both branches run the same conversion; the classification only picks
    // the message
    let (gray, classification) = grayscale::get_grayscale(&image)?;
    if classification.is_monochrome {
        println!("  Image is already grayscale - extracting pixel data");
    } else {
        println!("  Image contains colors - converting to grayscale");
    }
    verbose_println!("  Luminance formula: Y = 0.2125*R + 0.7154*G + 0.0721*B");

    let stats = stats::compute_stats(&gray)?;
    println!(
        "  Intensity: mean {:.2}, min {}, max {}, contrast {}",
        stats.mean,
        stats.min,
        stats.max,
        stats.contrast()
    );

    std::fs::create_dir_all(output_dir).map_err(|e| {
        format!(
            "Failed to create output directory {}: {}",
            output_dir.display(),
            e
        )
    })?;
    let output_path = exporters::grayscale_output_path(input, output_dir)?;
    exporters::export_png(&gray, &output_path, format)?;
    println!("  Saved: {}", output_path.display());

    Ok(())
}
