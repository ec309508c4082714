use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use factgen_core::{AttributePool, GeneratorConfig, Target};

use crate::errors::GenerationError;
use crate::model::GenerationReport;
use crate::output::jsonl::{FactWriter, WriteSummary};
use crate::sampler::FactSampler;

/// Entry point for generating fact fixtures from a targets corpus.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    config: GeneratorConfig,
}

impl GenerationEngine {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Build the attribute pool from `targets` and write `count` facts to
    /// `out_path`, truncating any previous file.
    ///
    /// A failed run may leave a truncated file behind; it must be
    /// regenerated.
    pub fn run(
        &self,
        targets: &[Target],
        out_path: &Path,
    ) -> Result<GenerationReport, GenerationError> {
        let start = Instant::now();
        self.config.validate()?;

        let pool = AttributePool::build(targets, &self.config)?;
        info!(
            event = "pool_built",
            targets = targets.len(),
            attributes = pool.len(),
            "attribute pool built"
        );

        info!(
            event = "generation_started",
            out = %out_path.display(),
            seed = self.config.seed,
            count = self.config.count
        );

        let writer = BufWriter::new(File::create(out_path)?);
        let (writer, summary) = self.generate_into(&pool, writer)?;
        let file = writer.into_inner().map_err(|err| err.into_error())?;
        file.sync_all()?;

        let report = GenerationReport {
            out_path: out_path.to_path_buf(),
            seed: self.config.seed,
            facts_written: summary.facts,
            attributes: pool.attributes().map(str::to_string).collect(),
            bytes_written: summary.bytes,
            sha256: summary.sha256,
            duration_ms: elapsed_ms(start.elapsed()),
        };

        info!(
            event = "generation_completed",
            facts = report.facts_written,
            bytes_written = report.bytes_written,
            sha256 = %report.sha256,
            duration_ms = report.duration_ms
        );

        Ok(report)
    }

    /// Sample `count` facts from `pool` and stream them into `writer`.
    pub fn generate_into<W: Write>(
        &self,
        pool: &AttributePool,
        writer: W,
    ) -> Result<(W, WriteSummary), GenerationError> {
        let mut sampler = FactSampler::new(pool, &self.config);
        let mut writer = FactWriter::new(writer);

        for index in 0..self.config.count {
            let fact = sampler.sample();
            writer.write_fact(&fact)?;
            if (index + 1) % 1_000 == 0 {
                debug!(event = "facts_progress", written = index + 1);
            }
        }

        writer.finish()
    }
}

/// Milliseconds in `elapsed`, saturating at `u64::MAX`.
fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
