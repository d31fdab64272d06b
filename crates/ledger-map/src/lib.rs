#![deny(unsafe_code)]

//! Input schema handling.
//!
//! A source table either already uses the canonical ledger columns or uses
//! the sales export layout (`Código`, `Mes`, `Fecha`, `Venta`, `Trabajo`).
//! [`resolve_schema`] decides which one once per run; [`remap_columns`]
//! rewrites the alternate layout into canonical records.

mod remap;
mod schema;

pub use remap::{MappingEntry, MappingReport, remap_columns, remap_with_index};
pub use schema::{ColumnIndex, InputSchema, resolve_schema};
