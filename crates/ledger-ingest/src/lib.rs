//! Ledger input loading.
//!
//! - **table**: extension dispatch and header/row assembly
//! - **delimited**: charset fallback and delimiter sniffing for delimited text
//! - **spreadsheet**: first-worksheet extraction via `calamine`
//! - **agency**: the optional agency-to-account directory

pub mod agency;
pub mod delimited;
pub mod error;
pub mod spreadsheet;
pub mod table;

pub use agency::{AGENCY_FILE_STEM, AgencyDirectory, AgencyLookup};
pub use error::{IngestError, Result};
pub use table::{InputFormat, read_table};
