use crate::core::{AggregationResult, Pipeline};
use crate::utils::error::{EtlError, Result};
use crate::utils::monitor::SystemMonitor;
use std::fmt;

/// Where a run currently stands. Stages only move forward; any failure
/// lands in `Failed` and the remaining stages are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Loaded,
    Analyzed,
    Reported,
    Charted,
    Done,
    Failed(String),
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineState::Idle => write!(f, "idle"),
            PipelineState::Loaded => write!(f, "loaded"),
            PipelineState::Analyzed => write!(f, "analyzed"),
            PipelineState::Reported => write!(f, "reported"),
            PipelineState::Charted => write!(f, "charted"),
            PipelineState::Done => write!(f, "done"),
            PipelineState::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub result: AggregationResult,
    pub rows: usize,
    pub report_path: String,
    pub chart_path: String,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
    state: PipelineState,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
            state: PipelineState::Idle,
        }
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    fn advance(&mut self, next: PipelineState) {
        tracing::debug!("Pipeline state: {} -> {}", self.state, next);
        self.state = next;
        self.monitor.log_stats(&self.state.to_string());
    }

    /// Runs load, analyze, report and chart in order, stopping at the first
    /// error.
    pub fn run(&mut self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting sales report run");
        self.state = PipelineState::Idle;

        match self.run_stages() {
            Ok(summary) => {
                self.advance(PipelineState::Done);
                self.monitor.log_final_stats();
                tracing::info!("🎉 Run completed successfully");
                Ok(summary)
            }
            Err(e) => {
                tracing::debug!("Pipeline state: {} -> failed", self.state);
                self.state = PipelineState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    fn run_stages(&mut self) -> Result<RunSummary> {
        let table = self.pipeline.load()?;
        tracing::info!("✅ Data cleaning completed ({} rows)", table.len());
        self.advance(PipelineState::Loaded);

        if table.is_empty() {
            return Err(EtlError::EmptyDataset);
        }

        let result = self.pipeline.analyze(&table)?;
        self.advance(PipelineState::Analyzed);

        let report_path = self.pipeline.report(&table, &result)?;
        self.advance(PipelineState::Reported);

        let chart_path = self.pipeline.chart(&table)?;
        self.advance(PipelineState::Charted);

        Ok(RunSummary {
            result,
            rows: table.len(),
            report_path,
            chart_path,
        })
    }
}
