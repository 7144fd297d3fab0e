//! Background worker for scheduled quality passes

use regulus_domain::RecordStore;
use tokio::time::{interval, Duration};

use crate::{PassConfig, PassMetrics, PipelineError, QualityPass};

/// Background worker that runs quality passes on a schedule
///
/// Each cycle runs one pass, records its findings in the metrics, and - when
/// the configuration says so - applies remediation. A failed remediation is
/// logged and the worker keeps running; the next cycle sees whatever state
/// the store is actually in.
///
/// # Examples
///
/// ```no_run
/// use regulus_pipeline::{PassConfig, PassWorker};
/// # struct SomeStore;
/// # impl regulus_domain::RecordStore for SomeStore {
/// #     type Error = String;
/// #     fn get_all(&self) -> Result<Vec<regulus_domain::Record>, String> { Ok(vec![]) }
/// #     fn get(&self, _: regulus_domain::RecordId) -> Result<Option<regulus_domain::Record>, String> { Ok(None) }
/// #     fn update(&mut self, _: regulus_domain::Record) -> Result<(), String> { Ok(()) }
/// #     fn delete(&mut self, _: regulus_domain::RecordId) -> Result<(), String> { Ok(()) }
/// # }
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = SomeStore;
///     let mut worker = PassWorker::new(PassConfig::default());
///
///     // Run indefinitely (until Ctrl+C)
///     worker.run(store).await?;
///     Ok(())
/// }
/// ```
pub struct PassWorker {
    pass: QualityPass,
    interval: Duration,
    metrics: PassMetrics,
}

impl PassWorker {
    /// Create a new background worker with the given configuration
    pub fn new(config: PassConfig) -> Self {
        let interval = config.pass_interval();
        Self {
            pass: QualityPass::new(config),
            interval,
            metrics: PassMetrics::new(),
        }
    }

    /// Create a worker with default configuration
    pub fn default_config() -> Self {
        Self::new(PassConfig::default())
    }

    /// Get a reference to the accumulated metrics
    pub fn metrics(&self) -> &PassMetrics {
        &self.metrics
    }

    /// Reset the metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Run the worker indefinitely
    ///
    /// Runs a pass at the configured interval until a shutdown signal
    /// (Ctrl+C) is received.
    pub async fn run<S>(&mut self, mut store: S) -> Result<(), PipelineError>
    where
        S: RecordStore,
        S::Error: std::fmt::Display,
    {
        let mut ticker = interval(self.interval);

        tracing::info!("Quality pass worker started (interval: {:?})", self.interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    tracing::debug!("Starting quality pass");
                    self.cycle(&mut store);
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Shutdown signal received, stopping quality pass worker");
                    break;
                }
            }
        }

        tracing::info!("Worker stopped. Final metrics:\n{}", self.metrics.summary());

        Ok(())
    }

    /// Run for a specific number of cycles (useful for testing)
    pub async fn run_cycles<S>(&mut self, mut store: S, cycles: usize) -> Result<(), PipelineError>
    where
        S: RecordStore,
        S::Error: std::fmt::Display,
    {
        let mut ticker = interval(self.interval);

        tracing::info!(
            "Quality pass worker started for {} cycles (interval: {:?})",
            cycles,
            self.interval
        );

        for cycle in 0..cycles {
            ticker.tick().await;

            tracing::debug!("Starting quality pass {}/{}", cycle + 1, cycles);
            self.cycle(&mut store);
        }

        tracing::info!(
            "Worker finished {} cycles. Final metrics:\n{}",
            cycles,
            self.metrics.summary()
        );

        Ok(())
    }

    fn cycle<S>(&mut self, store: &mut S)
    where
        S: RecordStore,
        S::Error: std::fmt::Display,
    {
        let start = std::time::Instant::now();

        let report = self.pass.run(store);
        tracing::info!(
            "Pass completed: {} records, {} duplicates, avg score {:.1}",
            report.total_records,
            report.duplicate_count,
            report.average_quality_score
        );
        self.metrics.record_pass(&report);

        if self.pass.config().apply_remediation {
            match self.pass.remediate(store) {
                Ok(summary) => self.metrics.record_remediation(&summary),
                Err(e) => tracing::error!("Remediation failed: {}", e),
            }
        }

        self.metrics.total_runtime_secs += start.elapsed().as_secs();
    }
}
