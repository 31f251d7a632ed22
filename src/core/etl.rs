use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    /// Runs extract, transform and load, returning where the output went.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting catalog ETL process...");

        tracing::info!("📥 Extracting raw catalog records...");
        let raw_records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", raw_records.len());
        self.monitor.log_stats("Extract", raw_records.len());

        tracing::info!("🔧 Parsing titles, descriptions and prerequisites...");
        let result = self.pipeline.transform(raw_records).await?;
        tracing::info!(
            "Parsed {} records ({} rejected)",
            result.records.len(),
            result.rejected.len()
        );
        self.monitor.log_stats("Transform", result.records.len());

        tracing::info!("💾 Writing course data...");
        let written = result.records.len();
        let output_path = self.pipeline.load(result).await?;
        self.monitor.log_stats("Load", written);
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
