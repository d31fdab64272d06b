//! The `generate` flow: read, run, write.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use ledger_core::{RunReport, run};
use ledger_ingest::read_table;
use ledger_model::DateOrder;
use ledger_output::{default_output_path, write_ledger};

use crate::config::RunConfigFile;

/// Inputs of one `generate` invocation after flag parsing.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub input: PathBuf,
    /// Defaults to `salida.txt` beside the input.
    pub output: Option<PathBuf>,
    /// Merged file and flag settings.
    pub config: RunConfigFile,
    /// Run every stage but skip writing the ledger file.
    pub dry_run: bool,
}

impl GenerateRequest {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: None,
            config: RunConfigFile::default(),
            dry_run: false,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

/// What a `generate` invocation produced.
#[derive(Debug)]
pub struct GenerateOutcome {
    pub report: RunReport,
    /// Where the ledger was written; `None` on a dry run.
    pub output: Option<PathBuf>,
    pub date_order: DateOrder,
}

/// Reads the input, runs the pipeline, and writes the ledger.
///
/// Nothing is written unless every stage succeeds, and never over the input.
pub fn generate(request: &GenerateRequest) -> Result<GenerateOutcome> {
    let span = info_span!("generate", input = %request.input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let output_path = request.output_path();
    if !request.dry_run && is_same_file(&output_path, &request.input) {
        bail!(
            "output {} would overwrite the input; choose another path with --output",
            output_path.display()
        );
    }

    let options = request
        .config
        .resolve(&request.input)
        .context("resolve run configuration")?;
    let table = read_table(&request.input)
        .with_context(|| format!("read input {}", request.input.display()))?;
    let report = run(&table, &options)
        .with_context(|| format!("generate ledger from {}", request.input.display()))?;

    let date_order = options.normalize.date_order;
    let output = if request.dry_run {
        info!("dry run, ledger not written");
        None
    } else {
        write_ledger(&output_path, &report.lines, date_order)
            .with_context(|| format!("write ledger {}", output_path.display()))?;
        Some(output_path)
    };

    info!(
        lines = report.lines.len(),
        balanced = report.is_balanced(),
        duration_ms = start.elapsed().as_millis(),
        "generate complete"
    );
    Ok(GenerateOutcome {
        report,
        output,
        date_order,
    })
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Loads `--config` when given and layers the flag values over it.
pub fn merged_config(config_path: Option<&Path>, flags: RunConfigFile) -> Result<RunConfigFile> {
    let file = match config_path {
        Some(path) => RunConfigFile::load(path)?,
        None => RunConfigFile::default(),
    };
    Ok(file.merge(flags))
}
