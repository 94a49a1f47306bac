//! Wall-clock benchmark comparing one full-frame image remap against banded
//! partitionings of the same operation.
//!
//! The destination is computed either in a single call or in horizontal
//! bands expressed three ways (row-range views, rectangle views, or a
//! copy-through scratch buffer), and every banded result is checked for
//! exact equality against the full-frame baseline. Timing differences are
//! reported as-is; only pixel equality is asserted.

mod harness;
mod mapping;
mod report;
mod strategy;
mod synth;

pub use harness::{BenchConfig, BenchRun, run, run_with};
pub use mapping::sine_warp_map;
pub use report::{BenchReport, StrategyKind, StrategyTiming};
pub use strategy::{BandAccess, remap_in_bands, remap_in_bands_into};
pub use synth::test_pattern_rgb;
