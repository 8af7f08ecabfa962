//! Table export: format dispatch and file writing

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::table::DataTable;

/// Supported output formats. The CLI exposes these as a closed choice set,
/// so unsupported tags never reach [`write_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Pickle,
    Xlsx,
    #[cfg(feature = "hdf5")]
    Hdf5,
}

impl ExportFormat {
    /// Look up a format from a tag string, accepting the usual aliases
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" | "yml" | "yaml" => Some(ExportFormat::Json),
            "pickle" | "pkl" => Some(ExportFormat::Pickle),
            "excel" | "xls" | "xlsx" => Some(ExportFormat::Xlsx),
            #[cfg(feature = "hdf5")]
            "hdf" | "hdf5" => Some(ExportFormat::Hdf5),
            _ => None,
        }
    }

    /// File extension for output paths in this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Pickle => "pkl",
            ExportFormat::Xlsx => "xlsx",
            #[cfg(feature = "hdf5")]
            ExportFormat::Hdf5 => "h5",
        }
    }
}

/// Errors that can occur while writing a table
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pickle error: {0}")]
    Pickle(#[from] serde_pickle::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[cfg(feature = "hdf5")]
    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),
}

/// Split-orientation payload for the JSON and pickle writers: column order
/// survives because both halves are arrays.
#[derive(Serialize)]
struct SplitTable<'a> {
    columns: &'a [String],
    data: &'a [Vec<u64>],
}

/// Write `table` to `path` in the given format, creating parent directories
/// as needed. No row index is serialized. Returns the number of data rows
/// written.
pub fn write_table(
    table: &DataTable,
    path: &Path,
    format: ExportFormat,
) -> Result<usize, ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Csv => write_csv(table, path)?,
        ExportFormat::Json => write_json(table, path)?,
        ExportFormat::Pickle => write_pickle(table, path)?,
        ExportFormat::Xlsx => write_xlsx(table, path)?,
        #[cfg(feature = "hdf5")]
        ExportFormat::Hdf5 => write_hdf5(table, path)?,
    }

    Ok(table.rows.len())
}

fn write_csv(table: &DataTable, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&table.columns)?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|value| value.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(table: &DataTable, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    serde_json::to_writer(
        BufWriter::new(file),
        &SplitTable {
            columns: &table.columns,
            data: &table.rows,
        },
    )?;
    Ok(())
}

fn write_pickle(table: &DataTable, path: &Path) -> Result<(), ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_pickle::to_writer(
        &mut writer,
        &SplitTable {
            columns: &table.columns,
            data: &table.rows,
        },
        serde_pickle::SerOptions::new(),
    )?;
    Ok(())
}

fn write_xlsx(table: &DataTable, path: &Path) -> Result<(), ExportError> {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in table.columns.iter().enumerate() {
        sheet.write_string(0, col as u16, name)?;
    }
    for (idx, row) in table.rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            sheet.write_number(idx as u32 + 1, col as u16, *value as f64)?;
        }
    }
    workbook.save(path)?;
    Ok(())
}

#[cfg(feature = "hdf5")]
fn write_hdf5(table: &DataTable, path: &Path) -> Result<(), ExportError> {
    use hdf5::types::VarLenUnicode;

    let file = hdf5::File::create(path)?;

    let values: Vec<u64> = table.rows.iter().flatten().copied().collect();
    let dataset = file
        .new_dataset::<u64>()
        .shape((table.rows.len(), table.columns.len()))
        .create("dataframe")?;
    dataset.write_raw(&values)?;

    let names = table
        .columns
        .iter()
        .map(|name| name.parse::<VarLenUnicode>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| hdf5::Error::from(err.to_string()))?;
    file.new_dataset_builder().with_data(&names).create("columns")?;

    Ok(())
}
