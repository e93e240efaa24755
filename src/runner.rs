// src/runner.rs
use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::classify::classify_claim;
use crate::config::Config;
use crate::jsonl::{self, JsonlWriter};
use crate::llm::openai::LlmClient;
use crate::llm::retry::RetryPolicy;
use crate::llm::Llm;
use crate::normalize::normalize_label;
use crate::scoring::RunStats;
use crate::types::{InputRecord, OutputRecord};

#[derive(Clone)]
pub struct Engine {
    llm: Arc<dyn Llm>,
    retry: RetryPolicy,
    limit: Option<usize>,
}

impl Engine {
    pub fn new(llm: Arc<dyn Llm>, retry: RetryPolicy, limit: Option<usize>) -> Self {
        Self { llm, retry, limit }
    }

    pub fn from_config(config: &Config) -> Self {
        let client = LlmClient::new(&config.model, &config.base_url, &config.api_key);
        Self::new(Arc::new(client), config.retry_policy(), config.record_limit())
    }

    /// Labels one record. `None` for records without a usable claim.
    pub async fn label_record(&self, rec: InputRecord, stats: &mut RunStats) -> Result<Option<OutputRecord>> {
        let Some(claim) = rec.claim_text().map(str::to_string) else {
            return Ok(None);
        };
        let raw = classify_claim(self.llm.as_ref(), &claim, &self.retry)
            .await
            .with_context(|| format!("classifying claim {claim:?}"))?;
        let predicted = normalize_label(&raw);
        let gold = rec.label.as_str().map(normalize_label);
        stats.record(predicted, gold);
        debug!(raw = %raw.trim(), %predicted, gold = ?gold, "labelled claim");

        Ok(Some(OutputRecord { claim, predicted_label: predicted, label: rec.label }))
    }

    /// Processes records strictly in order, writing each result before the
    /// next request is sent. The first fatal error aborts the run.
    pub async fn run<I, W>(&self, records: I, out: &mut JsonlWriter<W>) -> Result<RunStats>
    where
        I: IntoIterator<Item = Result<InputRecord>>,
        W: Write,
    {
        let mut stats = RunStats::default();
        // take() stops before the reader parses the record past the limit.
        let limit = self.limit.unwrap_or(usize::MAX);
        for (i, rec) in records.into_iter().take(limit).enumerate() {
            debug!(index = i, "processing record");
            if let Some(row) = self.label_record(rec?, &mut stats).await? {
                out.write(&row)?;
            }
        }
        Ok(stats)
    }
}

pub async fn run_files(config: &Config, input: &Path, output: &Path) -> Result<RunStats> {
    let engine = Engine::from_config(config);
    info!(model = %config.model, base_url = %config.base_url, input = %input.display(), "starting run");

    let records = jsonl::open_reader::<InputRecord>(input)?;
    let mut writer = jsonl::create_writer(output)?;
    let stats = engine.run(records, &mut writer).await?;
    writer.finish()?;

    info!(written = stats.written, labeled = stats.labeled, correct = stats.correct, "run finished");
    Ok(stats)
}
