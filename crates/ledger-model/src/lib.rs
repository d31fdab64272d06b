//! Data model for the ledger entry generator.
//!
//! - **record**: raw input records and the column names of both input schemas
//! - **line**: the canonical ledger line and its month type
//! - **amount**: exact two-digit monetary amounts
//! - **options**: per-run configuration (offsets, dialects, policies)
//! - **error**: the error taxonomy shared by every stage

pub mod amount;
pub mod error;
pub mod line;
pub mod options;
pub mod record;

pub use amount::Amount;
pub use error::{LedgerError, Result};
pub use line::{CanonicalLine, Month};
pub use options::{
    Aggregation, AmountDialect, AmountPolicy, DEFAULT_OFFSET_ACCOUNT, DateOrder, GenerationConfig,
    NormalizeOptions,
};
pub use record::{
    ALTERNATE_COLUMNS, AlternateColumn, CANONICAL_COLUMNS, RawRecord, SourceTable, columns,
};
