//! CLI argument definitions for the ledger entry generator.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use ledger_cli::config::RunConfigFile;
use ledger_model::{AmountDialect, AmountPolicy, DateOrder};

#[derive(Parser)]
#[command(
    name = "ledger-entries",
    version,
    about = "Ledger entry generator - turn production exports into accounting import files",
    long_about = "Normalize a spreadsheet or delimited ledger export into the fixed\n\
                  accounting schema, add balancing offset entries, and write a\n\
                  tab-delimited import file."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Include cell values in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a ledger import file from an export.
    Generate(GenerateArgs),

    /// List the agencies and accounts of an agency table.
    Agencies(AgenciesArgs),
}

#[derive(Parser)]
pub struct GenerateArgs {
    /// Spreadsheet (.xlsx, .xls, .ods) or delimited text (.csv, .txt) export.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Ledger file to write (default: salida.txt beside INPUT).
    #[arg(short = 'o', long = "output", value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// TOML run configuration; flags given here take precedence.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write source lines only, without balancing offsets.
    #[arg(long = "no-offsets")]
    pub no_offsets: bool,

    /// How offset lines are grouped.
    #[arg(long = "aggregation", value_enum)]
    pub aggregation: Option<AggregationArg>,

    /// Account that receives offset lines.
    #[arg(long = "offset-account", value_name = "ACCT")]
    pub offset_account: Option<String>,

    /// Take the offset account from the agency table.
    #[arg(long = "agency", value_name = "NAME")]
    pub agency: Option<String>,

    /// Directory holding agencias.csv or agencias.xlsx (default: INPUT's directory).
    #[arg(long = "agency-dir", value_name = "DIR")]
    pub agency_dir: Option<PathBuf>,

    /// Note text for the single offset of the total policy.
    #[arg(long = "offset-note", value_name = "TEXT")]
    pub offset_note: Option<String>,

    /// Reference text for the single offset of the total policy.
    #[arg(long = "offset-reference", value_name = "TEXT")]
    pub offset_reference: Option<String>,

    /// Day/month order of dates in the output file.
    #[arg(long = "date-order", value_enum)]
    pub date_order: Option<DateOrderArg>,

    /// How separators in amount cells are read.
    #[arg(long = "amount-dialect", value_enum)]
    pub amount_dialect: Option<AmountDialectArg>,

    /// What to do with amount cells that are not numbers.
    #[arg(long = "amount-policy", value_enum)]
    pub amount_policy: Option<AmountPolicyArg>,

    /// Run every stage and report without writing the ledger file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Flag values as a config layer; unset flags stay `None`.
    pub fn config_overrides(&self) -> RunConfigFile {
        RunConfigFile {
            generate_offsets: self.no_offsets.then_some(false),
            aggregation: self.aggregation.map(|arg| arg.as_str().to_string()),
            offset_account: self.offset_account.clone(),
            agency: self.agency.clone(),
            agency_dir: self.agency_dir.clone(),
            offset_note: self.offset_note.clone(),
            offset_reference: self.offset_reference.clone(),
            date_order: self.date_order.map(Into::into),
            amount_dialect: self.amount_dialect.map(Into::into),
            amount_policy: self.amount_policy.map(Into::into),
        }
    }
}

#[derive(Parser)]
pub struct AgenciesArgs {
    /// Directory holding agencias.csv or agencias.xlsx.
    #[arg(long = "agency-dir", value_name = "DIR", default_value = ".")]
    pub agency_dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AggregationArg {
    None,
    Total,
    ByRef,
    ByJob,
}

impl AggregationArg {
    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Total => "total",
            Self::ByRef => "by_ref",
            Self::ByJob => "by_job",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DateOrderArg {
    DayFirst,
    MonthFirst,
}

impl From<DateOrderArg> for DateOrder {
    fn from(arg: DateOrderArg) -> Self {
        match arg {
            DateOrderArg::DayFirst => Self::DayFirst,
            DateOrderArg::MonthFirst => Self::MonthFirst,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AmountDialectArg {
    Simple,
    Locale,
}

impl From<AmountDialectArg> for AmountDialect {
    fn from(arg: AmountDialectArg) -> Self {
        match arg {
            AmountDialectArg::Simple => Self::Simple,
            AmountDialectArg::Locale => Self::Locale,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum AmountPolicyArg {
    Silent,
    Warn,
    Fail,
}

impl From<AmountPolicyArg> for AmountPolicy {
    fn from(arg: AmountPolicyArg) -> Self {
        match arg {
            AmountPolicyArg::Silent => Self::Silent,
            AmountPolicyArg::Warn => Self::Warn,
            AmountPolicyArg::Fail => Self::Fail,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
