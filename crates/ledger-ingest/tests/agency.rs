use std::fs;

use ledger_ingest::{AgencyDirectory, AgencyLookup};
use ledger_model::LedgerError;
use tempfile::TempDir;

#[test]
fn loads_agencias_csv_once() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("agencias.csv");
    fs::write(&path, "Agencia;Cuenta\nNorte;1300102.7\nSur;1300102.8\n").expect("write");

    let lookup = AgencyLookup::new(dir.path());
    assert_eq!(lookup.account_for("Norte").unwrap(), "1300102.7");

    // Loaded on first use; later file changes are not observed.
    fs::remove_file(&path).expect("remove");
    assert_eq!(lookup.account_for("sur").unwrap(), "1300102.8");
    assert_eq!(lookup.directory().source(), Some(path.as_path()));
}

#[test]
fn missing_table_is_empty_not_error() {
    let dir = TempDir::new().expect("temp dir");
    let directory = AgencyDirectory::load(dir.path());
    assert!(directory.is_empty());
    assert!(directory.source().is_none());
}

#[test]
fn unknown_agency_is_configuration_error() {
    let dir = TempDir::new().expect("temp dir");
    let lookup = AgencyLookup::new(dir.path());
    let err = lookup.account_for("Norte").unwrap_err();
    assert!(matches!(err, LedgerError::Configuration(_)));
    assert!(err.to_string().contains("Norte"));
}

#[test]
fn unreadable_workbook_is_ignored() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join("agencias.xlsx"), b"garbage").expect("write");
    assert!(AgencyDirectory::load(dir.path()).is_empty());
}
