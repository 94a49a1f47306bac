use std::time::Instant;

use rb_core::{Error, Image, ImageView};
use rb_remap::{BorderMode, Interpolation, remap_into};

use crate::mapping::sine_warp_map;
use crate::report::{BenchReport, StrategyKind, StrategyTiming};
use crate::strategy::{BandAccess, remap_in_bands_into};
use crate::synth::test_pattern_rgb;

/// Extents, band sizes and kernels for one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    pub src_width: usize,
    pub src_height: usize,
    pub dst_width: usize,
    pub dst_height: usize,
    pub band_rows: Vec<usize>,
    pub kernels: Vec<Interpolation>,
    pub border: BorderMode,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            src_width: 6400,
            src_height: 4800,
            dst_width: 10_000,
            dst_height: 8000,
            band_rows: vec![128, 256, 512],
            kernels: vec![Interpolation::Bilinear, Interpolation::Lanczos4],
            border: BorderMode::Constant(0.0),
        }
    }
}

/// Report plus the per-kernel full-frame baselines.
#[derive(Debug)]
pub struct BenchRun {
    pub report: BenchReport,
    pub baselines: Vec<(Interpolation, Image<u8>)>,
}

/// Runs the full benchmark, discarding per-result notifications.
pub fn run(config: &BenchConfig) -> Result<BenchRun, Error> {
    run_with(config, |_| {})
}

/// Runs the full benchmark.
///
/// Inputs are generated once. Per kernel, the full-frame baseline is timed
/// first; every partial strategy is then timed against the same inputs and
/// its owned result buffer is compared for exact equality with the
/// baseline. `observer` is called with each strategy timing as soon as it
/// is available, in run order.
///
/// A mismatch is recorded (and observable) but does not stop the run; only
/// lower-level faults surface as `Err`.
pub fn run_with(
    config: &BenchConfig,
    mut observer: impl FnMut(&StrategyTiming),
) -> Result<BenchRun, Error> {
    let src = test_pattern_rgb(config.src_width, config.src_height);
    let map = sine_warp_map(
        config.dst_width,
        config.dst_height,
        config.src_width,
        config.src_height,
    );
    let src_view = src.as_view();
    let map_view = map.as_view();

    let mut results = Vec::new();
    let mut baselines = Vec::new();

    for &kernel in &config.kernels {
        let mut baseline = Image::new_fill(config.dst_width, config.dst_height, 3, 0u8);
        let started = Instant::now();
        {
            let mut baseline_view = baseline.as_view_mut();
            remap_into(&src_view, &map_view, &mut baseline_view, kernel, config.border)?;
        }
        let timing = StrategyTiming {
            kernel: kernel.name(),
            strategy: StrategyKind::FullFrame,
            band_rows: None,
            elapsed_ms: started.elapsed().as_secs_f64() * 1000.0,
            matches_baseline: true,
        };
        observer(&timing);
        results.push(timing);

        let timing = run_banded(
            &src_view,
            &map_view,
            kernel,
            config.border,
            1,
            BandAccess::RowRange,
            StrategyKind::SingleRow,
            &baseline,
        )?;
        observer(&timing);
        results.push(timing);

        for &band_rows in &config.band_rows {
            for (access, strategy) in [
                (BandAccess::RowRange, StrategyKind::RowRange),
                (BandAccess::RectRegion, StrategyKind::RectRegion),
                (BandAccess::CopyThrough, StrategyKind::CopyThrough),
            ] {
                let timing = run_banded(
                    &src_view,
                    &map_view,
                    kernel,
                    config.border,
                    band_rows,
                    access,
                    strategy,
                    &baseline,
                )?;
                observer(&timing);
                results.push(timing);
            }
        }

        baselines.push((kernel, baseline));
    }

    Ok(BenchRun {
        report: BenchReport {
            dst_width: config.dst_width,
            dst_height: config.dst_height,
            src_width: config.src_width,
            src_height: config.src_height,
            results,
        },
        baselines,
    })
}

#[allow(clippy::too_many_arguments)]
fn run_banded(
    src: &ImageView<'_, u8>,
    map: &ImageView<'_, f32>,
    kernel: Interpolation,
    border: BorderMode,
    band_rows: usize,
    access: BandAccess,
    strategy: StrategyKind,
    baseline: &Image<u8>,
) -> Result<StrategyTiming, Error> {
    // Destination allocation stays outside the timed region; the scratch
    // buffer of the copy-through variant is part of what that strategy
    // pays for and stays inside.
    let mut dst = Image::new_fill(map.width(), map.height(), src.channels(), 0u8);

    let started = Instant::now();
    remap_in_bands_into(src, map, kernel, border, band_rows, access, &mut dst)?;
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    Ok(StrategyTiming {
        kernel: kernel.name(),
        strategy,
        band_rows: Some(band_rows),
        elapsed_ms,
        matches_baseline: dst == *baseline,
    })
}

#[cfg(test)]
mod tests {
    use rb_remap::Interpolation;

    use super::{BenchConfig, run_with};
    use crate::report::StrategyKind;

    #[test]
    fn observer_sees_results_in_run_order() {
        let config = BenchConfig {
            src_width: 16,
            src_height: 12,
            dst_width: 20,
            dst_height: 14,
            band_rows: vec![4],
            kernels: vec![Interpolation::Nearest],
            ..BenchConfig::default()
        };

        let mut seen = Vec::new();
        let run = run_with(&config, |t| seen.push(t.strategy)).expect("valid run");

        assert_eq!(
            seen,
            vec![
                StrategyKind::FullFrame,
                StrategyKind::SingleRow,
                StrategyKind::RowRange,
                StrategyKind::RectRegion,
                StrategyKind::CopyThrough,
            ]
        );
        assert_eq!(run.report.results.len(), seen.len());
        assert_eq!(run.baselines.len(), 1);
    }

    #[test]
    fn default_config_mirrors_the_reference_extents() {
        let config = BenchConfig::default();
        assert_eq!(config.dst_width, 10_000);
        assert_eq!(config.dst_height, 8000);
        assert_eq!(config.src_width, 6400);
        assert_eq!(config.src_height, 4800);
        assert_eq!(config.band_rows, vec![128, 256, 512]);
    }
}
