use std::fs;
use std::path::PathBuf;

use ledger_ingest::{IngestError, read_table};
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_semicolon_csv_with_leading_blank_lines() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "ventas.csv",
        "\n;;\nCódigo;Mes;Fecha;Venta;Trabajo\n80001;marzo;15/03/2024;1.234,50;J1\n;;;;\n80002;3;16/03/2024;10\n"
            .as_bytes(),
    );
    let table = read_table(&path).expect("read csv");
    assert_eq!(table.headers, ["Código", "Mes", "Fecha", "Venta", "Trabajo"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0][3], "1.234,50");
    assert_eq!(table.rows[1], ["80002", "3", "16/03/2024", "10", ""]);
}

#[test]
fn reads_windows_1252_csv() {
    let dir = TempDir::new().expect("temp dir");
    let mut bytes = b"C".to_vec();
    bytes.push(0xF3);
    bytes.extend_from_slice(b"digo,Trabajo\n80001,J1\n");
    let path = write_file(&dir, "legacy.csv", &bytes);
    let table = read_table(&path).expect("read csv");
    assert_eq!(table.headers, ["Código", "Trabajo"]);
}

#[test]
fn tab_separated_txt_is_csv() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "ledger.TXT", b"GL_Account\tJobNumber\n80001\tJ1\n");
    let table = read_table(&path).expect("read txt");
    assert_eq!(table.headers, ["GL_Account", "JobNumber"]);
    assert_eq!(table.cell(0, 1), "J1");
}

#[test]
fn blank_file_is_empty_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "empty.csv", b"\n ,\n");
    assert!(matches!(read_table(&path), Err(IngestError::EmptyFile { .. })));
}

#[test]
fn missing_and_unsupported_files() {
    let dir = TempDir::new().expect("temp dir");
    assert!(matches!(
        read_table(&dir.path().join("absent.csv")),
        Err(IngestError::FileNotFound { .. })
    ));
    let path = write_file(&dir, "notes.pdf", b"%PDF");
    assert!(matches!(
        read_table(&path),
        Err(IngestError::UnsupportedFormat { .. })
    ));
}

#[test]
fn corrupt_spreadsheet_is_spreadsheet_error() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "broken.xlsx", b"not a zip archive");
    assert!(matches!(
        read_table(&path),
        Err(IngestError::Spreadsheet { .. })
    ));
}
