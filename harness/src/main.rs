use anyhow::Context;
use clap::Parser;
use generator::scene::{build_frame_from_config, SceneConfig};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use workflow::config::HarnessConfig;
use workflow::runner::Runner;

mod generator;
mod plot;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Boxcar vs Horne extraction comparison driver")]
struct Args {
    /// Load a harness config from YAML (overrides the scene flags below)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value_t = 200)]
    nrows: usize,
    #[arg(long, default_value_t = 160)]
    ncols: usize,
    #[arg(long, default_value_t = 1.0)]
    amplitude: f64,
    #[arg(long, default_value_t = 4.0)]
    sigma_pix: f64,
    #[arg(long, default_value_t = 1.0)]
    noise: f64,
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Narrow boxcar aperture width in pixels
    #[arg(long, default_value_t = 14.0)]
    narrow_width: f64,
    /// Render the comparison overlay to a PNG
    #[arg(long, default_value_t = false)]
    plot: bool,
    #[arg(long, default_value = "extraction_comparison.png")]
    plot_output: PathBuf,
    /// Append a one-line JSON run summary to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = if let Some(path) = args.config {
        HarnessConfig::load(path)?
    } else {
        let scene = SceneConfig {
            nrows: args.nrows,
            ncols: args.ncols,
            amplitude: args.amplitude,
            sigma_pix: args.sigma_pix,
            noise: args.noise,
            seed: args.seed,
            ..Default::default()
        };
        HarnessConfig::from_args(scene, args.narrow_width)
    };

    let frame = build_frame_from_config(&config.scene)?;
    log::info!(
        "synthesized frame {}x{} (seed {})",
        frame.nrows(),
        frame.ncols(),
        config.scene.seed
    );
    let runner = Runner::new(config.clone());
    let result = runner.execute(&frame)?;

    println!(
        "Comparison run -> columns {}, horne forms identical {}",
        result.full.len(),
        result.horne_forms_identical
    );
    println!(
        "peaks: narrow {:.3} full {:.3} horne {:.3} (reference {:.3} {})",
        result.narrow.peak(),
        result.full.peak(),
        result.horne_combined.peak(),
        result.peak_reference,
        result.full.unit()
    );

    if args.plot {
        plot::render_comparison(&args.plot_output, &result)?;
        println!("Comparison plot written to {}", args.plot_output.display());
    }

    if let Some(report_path) = args.report {
        let line = serde_json::json!({
            "nrows": config.scene.nrows,
            "ncols": config.scene.ncols,
            "seed": config.scene.seed,
            "narrow_width": config.narrow_width,
            "narrow_peak": result.narrow.peak(),
            "full_peak": result.full.peak(),
            "horne_peak": result.horne_combined.peak(),
            "peak_reference": result.peak_reference,
            "horne_forms_identical": result.horne_forms_identical,
        })
        .to_string()
            + "\n";
        if let Some(parent) = report_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating report directory {}", parent.display()))?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&report_path)
            .with_context(|| format!("opening report file {}", report_path.display()))?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("appending report to {}", report_path.display()))?;
    }

    Ok(())
}
