//! Export CLI command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{LedgerError, LedgerResult};
use crate::export::{export_transactions_csv, export_transactions_json, ExportFormat};
use crate::storage::Storage;

/// Write all transactions in plaintext to a file, or stdout when no path is given
pub fn handle_export_command(
    storage: &Storage,
    format: ExportFormat,
    output: Option<PathBuf>,
) -> LedgerResult<()> {
    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                LedgerError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            let mut writer = BufWriter::new(file);
            let count = write_export(storage, format, &mut writer)?;
            writer
                .flush()
                .map_err(|e| LedgerError::Export(e.to_string()))?;
            eprintln!("Exported {} transaction(s) to {}", count, path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_export(storage, format, &mut handle)?;
        }
    }
    Ok(())
}

fn write_export<W: Write>(storage: &Storage, format: ExportFormat, writer: &mut W) -> LedgerResult<usize> {
    match format {
        ExportFormat::Json => export_transactions_json(storage, writer),
        ExportFormat::Csv => export_transactions_csv(storage, writer),
    }
}
