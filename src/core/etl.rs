use crate::core::pipeline::FixturePipeline;
use crate::core::{ConfigProvider, Pipeline};
use crate::utils::error::Result;
use chrono::NaiveDate;

pub struct DigestEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DigestEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load once and returns the reply text.
    /// Fetch and decode errors are returned untouched for the caller to report.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Building BTTS digest");

        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} fixtures", records.len());

        let digest = self.pipeline.transform(records).await?;
        tracing::info!(
            "{} fixtures qualify for {}",
            digest.fixtures.len(),
            digest.date
        );

        self.pipeline.load(digest).await
    }
}

impl<C: ConfigProvider> DigestEngine<FixturePipeline<C>> {
    pub fn for_date(config: C, date: NaiveDate) -> Self {
        Self::new(FixturePipeline::new(config, date))
    }

    pub fn for_today(config: C) -> Self {
        Self::new(FixturePipeline::for_today(config))
    }
}
