//! Agency-to-account directory.
//!
//! An optional `agencias.csv` (or `agencias.xlsx`) beside the input maps
//! agency names to the offset account their provisions are booked against.
//! The directory is advisory: a missing or malformed file yields an empty
//! directory instead of an error.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, info, warn};

use ledger_model::{LedgerError, SourceTable};
use ledger_transform::{match_key, strip_accents};

use crate::table::assemble_table;

/// File name (without extension) of the agency table.
pub const AGENCY_FILE_STEM: &str = "agencias";

/// Agency name to offset account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgencyDirectory {
    accounts: BTreeMap<String, String>,
    source: Option<PathBuf>,
}

impl AgencyDirectory {
    /// Loads `agencias.csv`, or `agencias.xlsx` when no CSV exists, from `dir`.
    pub fn load(dir: &Path) -> Self {
        let csv_path = dir.join(format!("{AGENCY_FILE_STEM}.csv"));
        let xlsx_path = dir.join(format!("{AGENCY_FILE_STEM}.xlsx"));
        let (path, rows) = if csv_path.is_file() {
            (csv_path.clone(), crate::delimited::read_rows(&csv_path))
        } else if xlsx_path.is_file() {
            (xlsx_path.clone(), crate::spreadsheet::read_rows(&xlsx_path))
        } else {
            debug!(dir = %dir.display(), "no agency table found");
            return Self::default();
        };
        let loaded = rows.map(|rows| {
            assemble_table(rows)
                .map(|table| Self::from_table(&table))
                .unwrap_or_default()
        });
        match loaded {
            Ok(mut directory) => {
                info!(path = %path.display(), agencies = directory.len(), "agency table loaded");
                directory.source = Some(path);
                directory
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "agency table unreadable, ignoring it");
                Self::default()
            }
        }
    }

    /// Builds a directory from a decoded table.
    ///
    /// Rows with an empty agency, an empty account or the account `nan` are
    /// skipped; a repeated agency keeps its last account.
    pub fn from_table(table: &SourceTable) -> Self {
        let columns: Vec<String> = table.headers.iter().map(|h| column_key(h)).collect();
        let agency_col = columns
            .iter()
            .position(|c| c.contains("agencia") || c.contains("cliente") || c == "agente");
        let account_col = columns
            .iter()
            .position(|c| c.contains("cuenta") || c.contains("account"));
        let (Some(agency_col), Some(account_col)) = (agency_col, account_col) else {
            warn!(columns = ?table.headers, "agency table has no agency/account columns");
            return Self::default();
        };

        let mut accounts = BTreeMap::new();
        for row in 0..table.len() {
            let agency = table.cell(row, agency_col).trim();
            let account = table.cell(row, account_col).trim();
            if agency.is_empty() || account.is_empty() || account.eq_ignore_ascii_case("nan") {
                continue;
            }
            accounts.insert(agency.to_string(), account.to_string());
        }
        Self {
            accounts,
            source: None,
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// File the directory was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Agencies and their accounts, sorted by agency name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.accounts
            .iter()
            .map(|(agency, account)| (agency.as_str(), account.as_str()))
    }

    /// Account for an agency: exact name first, then ignoring case and accents.
    pub fn account(&self, agency: &str) -> Option<&str> {
        let agency = agency.trim();
        if let Some(account) = self.accounts.get(agency) {
            return Some(account.as_str());
        }
        let key = match_key(agency);
        self.accounts
            .iter()
            .find(|(name, _)| match_key(name) == key)
            .map(|(_, account)| account.as_str())
    }
}

/// Lowercase, accent-free, with runs of other characters collapsed to `_`.
fn column_key(header: &str) -> String {
    let mut key = String::with_capacity(header.len());
    let mut in_separator = false;
    for ch in strip_accents(header).trim().to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            key.push(ch);
            in_separator = false;
        } else if !in_separator {
            key.push('_');
            in_separator = true;
        }
    }
    key
}

/// Lazily loaded agency directory for one root directory.
///
/// The table is read on first access and shared read-only afterwards.
#[derive(Debug)]
pub struct AgencyLookup {
    root: PathBuf,
    directory: OnceLock<AgencyDirectory>,
}

impl AgencyLookup {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            directory: OnceLock::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn directory(&self) -> &AgencyDirectory {
        self.directory
            .get_or_init(|| AgencyDirectory::load(&self.root))
    }

    /// Offset account assigned to `agency`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Configuration`] when the agency is unknown or has no
    /// account.
    pub fn account_for(&self, agency: &str) -> ledger_model::Result<String> {
        let directory = self.directory();
        directory
            .account(agency)
            .map(str::to_string)
            .ok_or_else(|| {
                let known = if directory.is_empty() {
                    format!("no agency table in {}", self.root.display())
                } else {
                    format!("{} agencies known", directory.len())
                };
                LedgerError::Configuration(format!(
                    "agency '{}' has no assigned account ({known})",
                    agency.trim()
                ))
            })
    }
}
