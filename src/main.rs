use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use imgprep::Report;
use imgprep::config::{OptimizeConfig, ScaleConfig, with_webp_extension};
use tracing_subscriber::EnvFilter;

/// Web image preparation:
/// - optimize: crop transparent padding and write lossy WebP
/// - scale: resample with nearest/bilinear/bicubic/lanczos and write PNG, JPEG or WebP
#[derive(Parser, Debug)]
#[command(name = "imgprep")]
#[command(about = "🖼️ Crop, rasterize, scale and re-encode images for the web")]
#[command(long_about = "Crop transparent padding, rasterize SVG and resample images, then re-encode
them as PNG, JPEG or WebP. SVG inputs are rendered with supersampling.")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Crop transparent edges and save as WebP
    Optimize {
        /// Input image (PNG, JPEG, WebP, GIF, BMP or SVG)
        input: PathBuf,

        /// Output path; the extension is rewritten to .webp
        output: PathBuf,

        /// WebP quality
        #[arg(short, long, default_value_t = 80.0, help = "WebP quality (0-100)")]
        quality: f32,

        /// SVG supersample factor
        #[arg(long, default_value_t = 2.0, help = "Supersample factor for SVG input (clamped to 1-4)")]
        svg_scale: f32,
    },

    /// Resize an image by factor or to a target width/height
    Scale {
        input: PathBuf,

        /// Output path; .png, .jpg, .jpeg or .webp selects the encoder
        output: PathBuf,

        #[arg(long, help = "Uniform scale factor (e.g. 0.5, 2.0)")]
        factor: Option<f64>,

        #[arg(short, long, help = "Target width; height keeps the aspect ratio unless given")]
        width: Option<u32>,

        #[arg(short = 'H', long, help = "Target height; width keeps the aspect ratio unless given")]
        height: Option<u32>,

        #[arg(short, long, default_value = "lanczos",
              help = "Resampling algorithm: nearest, bilinear, bicubic, lanczos")]
        algorithm: String,

        #[arg(short, long, default_value_t = 90.0, help = "Output quality (0-100, JPEG/WebP only)")]
        quality: f32,

        #[arg(long, default_value_t = 2.0, help = "Supersample factor for SVG input (clamped to 1-4)")]
        svg_scale: f32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Optimize {
            input,
            output,
            quality,
            svg_scale,
        } => {
            let webp_output = with_webp_extension(&output);
            if webp_output != output {
                println!("Output will be saved as: {}", webp_output.display());
            }

            let config = OptimizeConfig {
                input,
                output: webp_output,
                quality,
                svg_scale,
            };
            let options = config.to_optimize_options()?;
            let report = imgprep::optimize_image(&options).context("failed to optimize image")?;
            print_size(&report);
            println!(
                "Successfully optimized {} -> {}",
                options.input.display(),
                options.output.display()
            );
        }
        Command::Scale {
            input,
            output,
            factor,
            width,
            height,
            algorithm,
            quality,
            svg_scale,
        } => {
            let config = ScaleConfig {
                input,
                output,
                factor,
                width,
                height,
                algorithm,
                quality,
                svg_scale,
            };
            let options = config.to_scale_options()?;
            let report = imgprep::scale_image(&options).context("failed to scale image")?;
            println!(
                "Scaling from {}x{} to {}x{}",
                report.source_width, report.source_height, report.width, report.height
            );
            print_size(&report);
            println!(
                "Successfully scaled {} -> {}",
                options.input.display(),
                options.output.display()
            );
        }
    }

    Ok(())
}

fn print_size(report: &Report) {
    println!("Output file size: {:.2} KB", report.bytes as f64 / 1024.0);
}

/// Default level is warn; each -v raises it one step. RUST_LOG overrides.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
