//! Run configuration: TOML file values merged under command-line flags.
//!
//! Precedence is flags, then file, then built-in defaults. An `agency`
//! resolves through the agency table and wins over `offset_account`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use ledger_core::RunOptions;
use ledger_ingest::AgencyLookup;
use ledger_model::{
    Aggregation, AmountDialect, AmountPolicy, DateOrder, GenerationConfig, NormalizeOptions,
};

/// Optional run settings as read from `--config` or built from flags.
///
/// Every field is optional so two layers can be merged field by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfigFile {
    pub generate_offsets: Option<bool>,
    /// Aggregation policy text, e.g. `total` or `by_ref`.
    pub aggregation: Option<String>,
    pub offset_account: Option<String>,
    /// Agency whose account becomes the offset account.
    pub agency: Option<String>,
    /// Directory holding `agencias.csv` or `agencias.xlsx`.
    pub agency_dir: Option<PathBuf>,
    pub offset_note: Option<String>,
    pub offset_reference: Option<String>,
    pub date_order: Option<DateOrder>,
    pub amount_dialect: Option<AmountDialect>,
    pub amount_policy: Option<AmountPolicy>,
}

impl RunConfigFile {
    /// Reads a TOML run configuration.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self =
            toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))?;
        debug!(path = %path.display(), "run config loaded");
        Ok(config)
    }

    /// Layers `overrides` on top of `self`; set fields in `overrides` win.
    #[must_use]
    pub fn merge(self, overrides: Self) -> Self {
        Self {
            generate_offsets: overrides.generate_offsets.or(self.generate_offsets),
            aggregation: overrides.aggregation.or(self.aggregation),
            offset_account: overrides.offset_account.or(self.offset_account),
            agency: overrides.agency.or(self.agency),
            agency_dir: overrides.agency_dir.or(self.agency_dir),
            offset_note: overrides.offset_note.or(self.offset_note),
            offset_reference: overrides.offset_reference.or(self.offset_reference),
            date_order: overrides.date_order.or(self.date_order),
            amount_dialect: overrides.amount_dialect.or(self.amount_dialect),
            amount_policy: overrides.amount_policy.or(self.amount_policy),
        }
    }

    /// Agency table directory: the configured one, else the input's directory.
    pub fn agency_root(&self, input: &Path) -> PathBuf {
        self.agency_dir.clone().unwrap_or_else(|| {
            input
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }

    /// Builds the options of one run.
    ///
    /// # Errors
    ///
    /// [`ledger_model::LedgerError::Configuration`] for an unknown aggregation policy or an
    /// agency without an account.
    pub fn resolve(&self, input: &Path) -> ledger_model::Result<RunOptions> {
        let mut normalize = NormalizeOptions::default();
        if let Some(order) = self.date_order {
            normalize = normalize.with_date_order(order);
        }
        if let Some(dialect) = self.amount_dialect {
            normalize = normalize.with_dialect(dialect);
        }
        if let Some(policy) = self.amount_policy {
            normalize = normalize.with_policy(policy);
        }

        let mut generation = GenerationConfig::default()
            .with_overrides(self.offset_note.clone(), self.offset_reference.clone());
        if let Some(text) = &self.aggregation {
            generation = generation.with_aggregation(text.parse::<Aggregation>()?);
        }
        if let Some(account) = &self.offset_account {
            generation = generation.with_offset_account(account.trim());
        }
        if let Some(agency) = self.agency.as_deref().filter(|name| !name.trim().is_empty()) {
            let lookup = AgencyLookup::new(self.agency_root(input));
            let account = lookup.account_for(agency)?;
            info!(agency = agency.trim(), %account, "offset account taken from agency table");
            generation = generation.with_offset_account(account);
        }
        if self.generate_offsets == Some(false) {
            generation = generation.without_offsets();
        }
        generation.validate()?;

        Ok(RunOptions {
            normalize,
            generation,
        })
    }
}
