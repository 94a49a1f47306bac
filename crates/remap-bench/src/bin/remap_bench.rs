use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use image::RgbImage;
use rb_core::Image;
use rb_remap::{BorderMode, Interpolation};
use remap_bench::{BenchConfig, BenchReport, StrategyTiming, run_with};

#[derive(Parser, Debug)]
#[command(name = "remap_bench")]
#[command(about = "Benchmark full-frame vs banded image remap strategies")]
struct Cli {
    #[arg(long, default_value_t = 10_000)]
    dst_width: usize,
    #[arg(long, default_value_t = 8000)]
    dst_height: usize,
    #[arg(long, default_value_t = 6400)]
    src_width: usize,
    #[arg(long, default_value_t = 4800)]
    src_height: usize,
    /// Band heights for the banded strategies (repeatable).
    #[arg(long = "band-rows", value_name = "ROWS", default_values_t = [128usize, 256, 512])]
    band_rows: Vec<usize>,
    /// Interpolation kernels to benchmark (repeatable; defaults to
    /// bilinear and lanczos4).
    #[arg(long = "kernel", value_enum)]
    kernels: Vec<KernelArg>,
    /// Write the full report as pretty-printed JSON.
    #[arg(long)]
    json: Option<PathBuf>,
    /// Write each kernel's full-frame output as PNG into this directory.
    #[arg(long)]
    dump_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum KernelArg {
    Nearest,
    Bilinear,
    Lanczos4,
}

impl From<KernelArg> for Interpolation {
    fn from(arg: KernelArg) -> Self {
        match arg {
            KernelArg::Nearest => Interpolation::Nearest,
            KernelArg::Bilinear => Interpolation::Bilinear,
            KernelArg::Lanczos4 => Interpolation::Lanczos4,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let kernels: Vec<Interpolation> = if cli.kernels.is_empty() {
        vec![Interpolation::Bilinear, Interpolation::Lanczos4]
    } else {
        cli.kernels.iter().map(|&k| k.into()).collect()
    };

    let config = BenchConfig {
        src_width: cli.src_width,
        src_height: cli.src_height,
        dst_width: cli.dst_width,
        dst_height: cli.dst_height,
        band_rows: cli.band_rows.clone(),
        kernels,
        border: BorderMode::Constant(0.0),
    };

    println!(
        "destination: {}x{} (width x height)",
        config.dst_width, config.dst_height
    );
    println!("source:      {}x{}", config.src_width, config.src_height);

    let mut last_kernel = "";
    let run = run_with(&config, |timing: &StrategyTiming| {
        if timing.kernel != last_kernel {
            println!();
            println!("kernel: {}", timing.kernel);
            last_kernel = timing.kernel;
        }
        print_timing(timing);
    })
    .context("running benchmark")?;

    if let Some(path) = &cli.json {
        write_report_json(path, &run.report)?;
    }

    if let Some(dir) = &cli.dump_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating dump directory {}", dir.display()))?;
        for (kernel, baseline) in &run.baselines {
            save_rgb_png(&dir.join(format!("baseline_{}.png", kernel.name())), baseline)?;
        }
    }

    Ok(())
}

fn print_timing(timing: &StrategyTiming) {
    let label = match timing.band_rows {
        None => timing.strategy.label().to_string(),
        Some(rows) => format!("{} ({rows} rows)", timing.strategy.label()),
    };
    println!("  {label:<32} {:>9.0} ms", timing.elapsed_ms);
    if !timing.matches_baseline {
        println!(
            "  WARNING: {} result is NOT EQUAL to the full-frame baseline",
            timing.strategy.label()
        );
    }
}

fn write_report_json(path: &Path, report: &BenchReport) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(report).context("serializing report")?;
    fs::write(path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn save_rgb_png(path: &Path, img: &Image<u8>) -> Result<()> {
    let rgb = RgbImage::from_raw(
        img.width() as u32,
        img.height() as u32,
        img.data().to_vec(),
    )
    .context("constructing RgbImage from raw bytes")?;
    rgb.save(path)
        .with_context(|| format!("saving image {}", path.display()))
}
