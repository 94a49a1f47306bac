use serde::Serialize;

/// Partitioning strategy identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    FullFrame,
    SingleRow,
    RowRange,
    RectRegion,
    CopyThrough,
}

impl StrategyKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FullFrame => "full-frame",
            Self::SingleRow => "single-row",
            Self::RowRange => "row-range bands",
            Self::RectRegion => "rect-region bands",
            Self::CopyThrough => "copy-through bands",
        }
    }
}

/// One timed strategy run and its equality verdict.
#[derive(Debug, Clone, Serialize)]
pub struct StrategyTiming {
    pub kernel: &'static str,
    pub strategy: StrategyKind,
    pub band_rows: Option<usize>,
    pub elapsed_ms: f64,
    pub matches_baseline: bool,
}

/// Configuration echo plus every strategy timing, in run order.
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub dst_width: usize,
    pub dst_height: usize,
    pub src_width: usize,
    pub src_height: usize,
    pub results: Vec<StrategyTiming>,
}

impl BenchReport {
    /// True when every partial strategy reproduced its baseline.
    pub fn all_match(&self) -> bool {
        self.results.iter().all(|t| t.matches_baseline)
    }
}
