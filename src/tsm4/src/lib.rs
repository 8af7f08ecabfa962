//! # tsm4
//!
//! TradeSkillMaster AppData export library - decoding, joining, and export.
//!
//! This library provides functionality to:
//! - Parse the `AppData.lua` dump written by the TSM AppHelper addon
//! - Decode its packed base-32 integer encoding
//! - Group the embedded tables by realm or region
//! - Inner-join each group into one wide table and write it to disk
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use tsm4::{AppDataParser, ParseEvent, ScopeBuckets, DEFAULT_JOIN_COLUMN};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut buckets = ScopeBuckets::new();
//! for event in AppDataParser::open("AppData.lua")? {
//!     match event? {
//!         ParseEvent::Table(table) => buckets.insert(table),
//!         ParseEvent::Skipped { line, preview } => {
//!             eprintln!("no match for line {line}: {preview}");
//!         }
//!     }
//! }
//!
//! for (scope, tables) in buckets.into_buckets() {
//!     let joined = tsm4::join_tables(tables, DEFAULT_JOIN_COLUMN)?;
//!     let path = format!("{scope}.csv");
//!     tsm4::write_table(&joined, Path::new(&path), tsm4::ExportFormat::Csv)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod bucket;
pub mod data;
pub mod decode;
pub mod export;
pub mod parser;
pub mod table;

// Re-export commonly used items
#[doc(inline)]
pub use bucket::ScopeBuckets;
#[doc(inline)]
pub use data::{AuctionTable, DataCategory};
#[doc(inline)]
pub use decode::{decode_value, unpack_row, DecodeError};
#[doc(inline)]
pub use export::{write_table, ExportError, ExportFormat};
#[doc(inline)]
pub use parser::{AppDataParser, ParseError, ParseEvent};
#[doc(inline)]
pub use table::{join_tables, DataTable, JoinError, DEFAULT_JOIN_COLUMN};
