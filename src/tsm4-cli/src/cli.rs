//! Core CLI definitions

use std::path::PathBuf;

use clap::Parser;
use tsm4::ExportFormat;

/// Output format choices exposed on the command line
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum FormatArg {
    Json,
    #[default]
    Csv,
    Pickle,
    #[cfg(feature = "hdf5")]
    Hdf5,
    Xlsx,
}

impl From<FormatArg> for ExportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Pickle => ExportFormat::Pickle,
            #[cfg(feature = "hdf5")]
            FormatArg::Hdf5 => ExportFormat::Hdf5,
            FormatArg::Xlsx => ExportFormat::Xlsx,
        }
    }
}

#[derive(Parser)]
#[command(name = "tsm4")]
#[command(about = "Export TSM4 AppData.lua to data tables", long_about = None)]
pub struct Cli {
    /// Output file format
    #[arg(short, long, value_name = "FORMAT", default_value = "csv")]
    pub format: FormatArg,

    /// Path to AppData.lua
    #[arg(
        short = 'r',
        long = "app_helper_path",
        value_name = "APP_PATH",
        env = "TSM4_APPDATA"
    )]
    pub app_helper_path: PathBuf,

    /// Path to output directory
    #[arg(short, long = "output_dir", value_name = "OUTPUT", default_value = ".")]
    pub output_dir: PathBuf,
}
