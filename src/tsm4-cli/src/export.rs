//! Export pipeline: parse the dump, bucket by scope, join, write files

use std::path::Path;

use anyhow::{Context, Result};
use tsm4::{
    join_tables, write_table, AppDataParser, ExportFormat, ParseEvent, ScopeBuckets,
    DEFAULT_JOIN_COLUMN,
};

use crate::cli::Cli;

/// Derive the game-version tag from the dump path's ancestor directory:
/// `.../_retail_/Interface/AddOns/TradeSkillMaster_AppHelper/AppData.lua`
/// yields `retail`. Paths too shallow to carry one fall back to `unknown`.
fn version_tag(path: &Path) -> String {
    path.ancestors()
        .nth(4)
        .and_then(|dir| dir.file_name())
        .and_then(|name| name.to_str())
        .map(|name| name.trim_matches('_').to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

pub fn run(cli: Cli) -> Result<()> {
    let version = version_tag(&cli.app_helper_path);
    let parser = AppDataParser::open(&cli.app_helper_path)
        .with_context(|| format!("failed to open {}", cli.app_helper_path.display()))?;

    let mut buckets = ScopeBuckets::new();
    for event in parser {
        match event? {
            ParseEvent::Table(table) => buckets.insert(table),
            ParseEvent::Skipped { line, preview } => {
                eprintln!("no match for line {line}: {preview}");
            }
        }
    }

    println!(
        "Found {} realms and {} regions",
        buckets.realm_count(),
        buckets.region_count()
    );

    let format = ExportFormat::from(cli.format);
    for (scope, tables) in buckets.into_buckets() {
        let joined = join_tables(tables, DEFAULT_JOIN_COLUMN)
            .with_context(|| format!("failed to join tables for {scope}"))?;
        let file_name = format!("{version}_{scope}.{}", format.extension());
        let path = cli.output_dir.join(file_name);
        let rows = write_table(&joined, &path, format)
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("Saved {} with {rows} rows", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::cli::FormatArg;

    #[test]
    fn test_version_tag_from_deep_path() {
        let path = Path::new(
            "World of Warcraft/_retail_/Interface/AddOns/TradeSkillMaster_AppHelper/AppData.lua",
        );
        assert_eq!(version_tag(path), "retail");
    }

    #[test]
    fn test_version_tag_without_underscores() {
        let path = Path::new("a/classic/Interface/AddOns/TradeSkillMaster_AppHelper/AppData.lua");
        assert_eq!(version_tag(path), "classic");
    }

    #[test]
    fn test_version_tag_fallback_for_shallow_paths() {
        assert_eq!(version_tag(Path::new("AppData.lua")), "unknown");
        assert_eq!(version_tag(Path::new("a/AppData.lua")), "unknown");
    }

    #[test]
    fn test_end_to_end_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let addon_dir = dir
            .path()
            .join("_retail_/Interface/AddOns/TradeSkillMaster_AppHelper");
        fs::create_dir_all(&addon_dir).unwrap();

        let dump = concat!(
            "select(2, ...).LoadData(\"APP_INFO\",\"Global\",[[return {version=1}]])\n",
            "select(2, ...).LoadData(\"AUCTIONDB_REGION_SALE\",\"US\",[[return {downloadTime=100,fields={\"itemString\",\"price\"},data={{1,a},{2,b}}}]])\n",
            "this line is garbage\n",
        );
        let dump_path = addon_dir.join("AppData.lua");
        fs::write(&dump_path, dump).unwrap();

        let output_dir = dir.path().join("out");
        run(Cli {
            format: FormatArg::Csv,
            app_helper_path: dump_path,
            output_dir: output_dir.clone(),
        })
        .unwrap();

        let content = fs::read_to_string(output_dir.join("retail_US.csv")).unwrap();
        assert_eq!(content, "itemString,price\n1,10\n2,11\n");
    }

    #[test]
    fn test_missing_dump_file_is_an_error() {
        let err = run(Cli {
            format: FormatArg::Csv,
            app_helper_path: PathBuf::from("/nonexistent/AppData.lua"),
            output_dir: PathBuf::from("."),
        })
        .unwrap_err();
        assert!(err.to_string().contains("failed to open"));
    }
}
